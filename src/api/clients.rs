use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{ClientAccount, ClientCreateDto};

impl ApiClient {
    pub async fn get_clients(&self) -> Result<Vec<ClientAccount>, ApiError> {
        self.get("/api/clients").await
    }

    pub async fn get_client(&self, id: &str) -> Result<ClientAccount, ApiError> {
        self.get(&format!("/api/clients/{id}")).await
    }

    pub async fn create_client(&self, client: &ClientCreateDto) -> Result<ClientAccount, ApiError> {
        self.post("/api/clients", client).await
    }
}
