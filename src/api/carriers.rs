use serde_json::json;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{Carrier, CarrierCreateDto, CarrierStatus, CarrierUpdateDto, Page};

impl ApiClient {
    pub async fn get_carriers(
        &self,
        page: u32,
        size: u32,
        status: Option<CarrierStatus>,
        name: Option<&str>,
    ) -> Result<Page<Carrier>, ApiError> {
        let mut query = vec![("page", page.to_string()), ("size", size.to_string())];
        if let Some(status) = status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(name) = name {
            query.push(("name", name.to_string()));
        }
        self.get_query("/api/carriers", &query).await
    }

    pub async fn get_carrier(&self, id: &str) -> Result<Carrier, ApiError> {
        self.get(&format!("/api/carriers/{id}")).await
    }

    pub async fn create_carrier(&self, carrier: &CarrierCreateDto) -> Result<Carrier, ApiError> {
        self.post("/api/carriers", carrier).await
    }

    pub async fn update_carrier(
        &self,
        id: &str,
        carrier: &CarrierUpdateDto,
    ) -> Result<Carrier, ApiError> {
        self.put(&format!("/api/carriers/{id}"), carrier).await
    }

    pub async fn update_carrier_status(
        &self,
        id: &str,
        status: CarrierStatus,
    ) -> Result<Carrier, ApiError> {
        self.patch(&format!("/api/carriers/{id}/status"), &json!({ "status": status }))
            .await
    }

    pub async fn delete_carrier(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/api/carriers/{id}")).await
    }
}
