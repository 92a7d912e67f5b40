use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{InventoryReportDto, OrderReportDto, ShipmentReportDto};

impl ApiClient {
    pub async fn get_order_report(
        &self,
        from_date: Option<&str>,
        to_date: Option<&str>,
    ) -> Result<OrderReportDto, ApiError> {
        let mut query = Vec::new();
        if let Some(from_date) = from_date {
            query.push(("fromDate", from_date.to_string()));
        }
        if let Some(to_date) = to_date {
            query.push(("toDate", to_date.to_string()));
        }
        self.get_query("/api/reports/orders", &query).await
    }

    pub async fn get_inventory_report(
        &self,
        warehouse_id: Option<&str>,
    ) -> Result<InventoryReportDto, ApiError> {
        let mut query = Vec::new();
        if let Some(warehouse_id) = warehouse_id {
            query.push(("warehouseId", warehouse_id.to_string()));
        }
        self.get_query("/api/reports/inventory", &query).await
    }

    pub async fn get_shipment_report(
        &self,
        from_date: Option<&str>,
        to_date: Option<&str>,
    ) -> Result<ShipmentReportDto, ApiError> {
        let mut query = Vec::new();
        if let Some(from_date) = from_date {
            query.push(("fromDate", from_date.to_string()));
        }
        if let Some(to_date) = to_date {
            query.push(("toDate", to_date.to_string()));
        }
        self.get_query("/api/reports/shipments", &query).await
    }
}
