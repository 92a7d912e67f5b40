use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{Supplier, SupplierCreateDto, SupplierUpdateDto};

impl ApiClient {
    pub async fn get_suppliers(&self) -> Result<Vec<Supplier>, ApiError> {
        self.get("/api/suppliers").await
    }

    pub async fn get_supplier(&self, id: &str) -> Result<Supplier, ApiError> {
        self.get(&format!("/api/suppliers/{id}")).await
    }

    pub async fn create_supplier(&self, supplier: &SupplierCreateDto) -> Result<Supplier, ApiError> {
        self.post("/api/suppliers", supplier).await
    }

    pub async fn update_supplier(
        &self,
        id: &str,
        supplier: &SupplierUpdateDto,
    ) -> Result<Supplier, ApiError> {
        self.put(&format!("/api/suppliers/{id}"), supplier).await
    }

    pub async fn delete_supplier(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/api/suppliers/{id}")).await
    }
}
