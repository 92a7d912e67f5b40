use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{OrderStatus, SalesOrder, SalesOrderCreateDto};

impl ApiClient {
    pub async fn get_sales_orders(
        &self,
        client_id: Option<&str>,
        status: Option<OrderStatus>,
    ) -> Result<Vec<SalesOrder>, ApiError> {
        let mut query = Vec::new();
        if let Some(client_id) = client_id {
            query.push(("clientId", client_id.to_string()));
        }
        if let Some(status) = status {
            query.push(("status", status.as_str().to_string()));
        }
        self.get_query("/api/sales-orders", &query).await
    }

    pub async fn get_sales_order(&self, id: &str) -> Result<SalesOrder, ApiError> {
        self.get(&format!("/api/sales-orders/{id}")).await
    }

    pub async fn create_sales_order(
        &self,
        order: &SalesOrderCreateDto,
    ) -> Result<SalesOrder, ApiError> {
        self.post("/api/sales-orders", order).await
    }

    pub async fn reserve_order(&self, id: &str) -> Result<SalesOrder, ApiError> {
        self.put_empty(&format!("/api/sales-orders/{id}/reserve")).await
    }

    pub async fn cancel_order(&self, id: &str) -> Result<SalesOrder, ApiError> {
        self.put_empty(&format!("/api/sales-orders/{id}/cancel")).await
    }
}
