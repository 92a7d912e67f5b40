use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::InventoryMovement;

impl ApiClient {
    pub async fn get_inventory_movements(
        &self,
        warehouse_id: Option<&str>,
        product_id: Option<&str>,
    ) -> Result<Vec<InventoryMovement>, ApiError> {
        let mut query = Vec::new();
        if let Some(warehouse_id) = warehouse_id {
            query.push(("warehouseId", warehouse_id.to_string()));
        }
        if let Some(product_id) = product_id {
            query.push(("productId", product_id.to_string()));
        }
        self.get_query("/api/inventory-movements", &query).await
    }
}
