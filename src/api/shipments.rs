use serde_json::json;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{Page, Shipment, ShipmentCreateDto, ShipmentStatus};

impl ApiClient {
    pub async fn get_shipments(
        &self,
        page: u32,
        size: u32,
        status: Option<ShipmentStatus>,
        warehouse_id: Option<&str>,
    ) -> Result<Page<Shipment>, ApiError> {
        let mut query = vec![("page", page.to_string()), ("size", size.to_string())];
        if let Some(status) = status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(warehouse_id) = warehouse_id {
            query.push(("warehouseId", warehouse_id.to_string()));
        }
        self.get_query("/api/shipments", &query).await
    }

    pub async fn get_shipment(&self, id: &str) -> Result<Shipment, ApiError> {
        self.get(&format!("/api/shipments/{id}")).await
    }

    pub async fn create_shipment(
        &self,
        shipment: &ShipmentCreateDto,
    ) -> Result<Shipment, ApiError> {
        self.post("/api/shipments", shipment).await
    }

    pub async fn update_shipment_status(
        &self,
        id: &str,
        status: ShipmentStatus,
    ) -> Result<Shipment, ApiError> {
        self.patch(&format!("/api/shipments/{id}/status"), &json!({ "status": status }))
            .await
    }

    pub async fn delete_shipment(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/api/shipments/{id}")).await
    }
}
