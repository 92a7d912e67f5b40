use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{Inventory, InventoryAdjustDto};

impl ApiClient {
    pub async fn get_inventories(
        &self,
        warehouse_id: Option<&str>,
        product_id: Option<&str>,
    ) -> Result<Vec<Inventory>, ApiError> {
        let mut query = Vec::new();
        if let Some(warehouse_id) = warehouse_id {
            query.push(("warehouseId", warehouse_id.to_string()));
        }
        if let Some(product_id) = product_id {
            query.push(("productId", product_id.to_string()));
        }
        self.get_query("/api/inventories", &query).await
    }

    pub async fn get_inventory(&self, id: &str) -> Result<Inventory, ApiError> {
        self.get(&format!("/api/inventories/{id}")).await
    }

    pub async fn adjust_inventory(
        &self,
        adjustment: &InventoryAdjustDto,
    ) -> Result<Inventory, ApiError> {
        self.post("/api/inventories/adjust", adjustment).await
    }
}
