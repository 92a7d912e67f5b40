use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{Warehouse, WarehouseCreateDto, WarehouseUpdateDto};

impl ApiClient {
    pub async fn get_warehouses(&self) -> Result<Vec<Warehouse>, ApiError> {
        self.get("/api/warehouses").await
    }

    pub async fn get_warehouse(&self, id: &str) -> Result<Warehouse, ApiError> {
        self.get(&format!("/api/warehouses/{id}")).await
    }

    pub async fn create_warehouse(
        &self,
        warehouse: &WarehouseCreateDto,
    ) -> Result<Warehouse, ApiError> {
        self.post("/api/warehouses", warehouse).await
    }

    pub async fn update_warehouse(
        &self,
        id: &str,
        warehouse: &WarehouseUpdateDto,
    ) -> Result<Warehouse, ApiError> {
        self.put(&format!("/api/warehouses/{id}"), warehouse).await
    }

    pub async fn delete_warehouse(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/api/warehouses/{id}")).await
    }
}
