use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{Page, Product, ProductCreateDto, ProductUpdateDto};

impl ApiClient {
    pub async fn get_products(
        &self,
        page: u32,
        size: u32,
        search: Option<&str>,
        active: Option<bool>,
    ) -> Result<Page<Product>, ApiError> {
        let mut query = vec![("page", page.to_string()), ("size", size.to_string())];
        if let Some(search) = search {
            query.push(("search", search.to_string()));
        }
        if let Some(active) = active {
            query.push(("active", active.to_string()));
        }
        self.get_query("/api/products", &query).await
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, ApiError> {
        self.get(&format!("/api/products/{id}")).await
    }

    pub async fn create_product(&self, product: &ProductCreateDto) -> Result<Product, ApiError> {
        self.post("/api/products", product).await
    }

    pub async fn update_product(
        &self,
        id: &str,
        product: &ProductUpdateDto,
    ) -> Result<Product, ApiError> {
        self.put(&format!("/api/products/{id}"), product).await
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/api/products/{id}")).await
    }
}
