use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{Manager, ManagerCreateDto, ManagerUpdateDto};

impl ApiClient {
    pub async fn get_managers(&self) -> Result<Vec<Manager>, ApiError> {
        self.get("/api/managers").await
    }

    pub async fn get_active_managers(&self) -> Result<Vec<Manager>, ApiError> {
        self.get("/api/managers/active").await
    }

    pub async fn get_manager(&self, id: &str) -> Result<Manager, ApiError> {
        self.get(&format!("/api/managers/{id}")).await
    }

    pub async fn create_manager(&self, manager: &ManagerCreateDto) -> Result<Manager, ApiError> {
        self.post("/api/managers", manager).await
    }

    pub async fn update_manager(
        &self,
        id: &str,
        manager: &ManagerUpdateDto,
    ) -> Result<Manager, ApiError> {
        self.put(&format!("/api/managers/{id}"), manager).await
    }

    pub async fn delete_manager(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/api/managers/{id}")).await
    }

    pub async fn assign_warehouse_to_manager(
        &self,
        manager_id: &str,
        warehouse_id: &str,
    ) -> Result<Manager, ApiError> {
        self.post_empty(&format!("/api/managers/{manager_id}/warehouses/{warehouse_id}"))
            .await
    }

    pub async fn remove_warehouse_from_manager(
        &self,
        manager_id: &str,
        warehouse_id: &str,
    ) -> Result<(), ApiError> {
        self.delete(&format!("/api/managers/{manager_id}/warehouses/{warehouse_id}"))
            .await
    }
}
