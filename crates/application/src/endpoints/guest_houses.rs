use guesthouse_domain::GuestHouse;

use crate::ApiError;
use crate::api::ApiClient;

/// `/guesthouses`
#[derive(Clone)]
pub struct GuestHouses {
    api: ApiClient,
}

impl GuestHouses {
    /// Creates the endpoint group.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All guest houses.
    pub async fn list(&self) -> Result<Vec<GuestHouse>, ApiError> {
        self.api.get("/guesthouses").await
    }

    /// One guest house.
    pub async fn get(&self, id: i64) -> Result<GuestHouse, ApiError> {
        self.api.get(format!("/guesthouses/{id}")).await
    }

    /// Guest houses including their rooms.
    pub async fn with_rooms(&self) -> Result<Vec<GuestHouse>, ApiError> {
        self.api.get("/guesthouses/with-rooms").await
    }

    /// Guest houses that still have at least one free bed.
    pub async fn with_available_beds(&self) -> Result<Vec<GuestHouse>, ApiError> {
        self.api.get("/guesthouses/with-available-beds").await
    }

    /// Creates a guest house. Admin only.
    pub async fn create(&self, guest_house: &GuestHouse) -> Result<GuestHouse, ApiError> {
        self.api.post("/guesthouses", guest_house).await
    }

    /// Replaces a guest house. Admin only.
    pub async fn update(&self, id: i64, guest_house: &GuestHouse) -> Result<GuestHouse, ApiError> {
        self.api.put(format!("/guesthouses/{id}"), guest_house).await
    }

    /// Deletes a guest house with its rooms and beds. Admin only.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(format!("/guesthouses/{id}")).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ports::HttpMethod;
    use crate::test_support::{ScriptedTransport, anonymous_client};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_decodes_guest_houses() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(
            200,
            json!([{
                "id": 1,
                "name": "Lakeview",
                "address": "1 Shore Rd",
                "city": "Pune",
                "state": "MH",
                "country": "India",
                "amenities": "WiFi, Parking",
                "availableBeds": 4
            }]),
        );
        let guest_houses = GuestHouses::new(anonymous_client(transport.clone()));

        let list = guest_houses.list().await.unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Lakeview");
        assert_eq!(list[0].available_beds, Some(4));
        assert_eq!(transport.last_request().path, "/guesthouses");
    }

    #[tokio::test]
    async fn test_delete_hits_resource_path() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_raw(204, "");
        let guest_houses = GuestHouses::new(anonymous_client(transport.clone()));

        guest_houses.delete(3).await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.path, "/guesthouses/3");
    }
}
