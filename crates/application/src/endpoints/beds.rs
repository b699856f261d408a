use chrono::NaiveDate;
use guesthouse_domain::Bed;

use crate::ApiError;
use crate::api::ApiClient;
use crate::ports::ApiRequest;

/// `/beds`
#[derive(Clone)]
pub struct Beds {
    api: ApiClient,
}

impl Beds {
    /// Creates the endpoint group.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All beds.
    pub async fn list(&self) -> Result<Vec<Bed>, ApiError> {
        self.api.get("/beds").await
    }

    /// One bed.
    pub async fn get(&self, id: i64) -> Result<Bed, ApiError> {
        self.api.get(format!("/beds/{id}")).await
    }

    /// Beds of one room.
    pub async fn by_room(&self, room_id: i64) -> Result<Vec<Bed>, ApiError> {
        self.api.get(format!("/beds/by-room/{room_id}")).await
    }

    /// Beds of a room that are free for the whole stay.
    pub async fn available(
        &self,
        room_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Vec<Bed>, ApiError> {
        let request = ApiRequest::get("/beds/available")
            .query("roomId", room_id)
            .query("checkIn", check_in)
            .query("checkOut", check_out);
        self.api.fetch(request).await
    }

    /// Adds a bed. Admin only.
    pub async fn create(&self, bed: &Bed) -> Result<Bed, ApiError> {
        self.api.post("/beds", bed).await
    }

    /// Replaces a bed. Admin only.
    pub async fn update(&self, id: i64, bed: &Bed) -> Result<Bed, ApiError> {
        self.api.put(format!("/beds/{id}"), bed).await
    }

    /// Removes a bed. Admin only.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(format!("/beds/{id}")).await
    }

    /// Asks the server to recompute bed availability. Returns its summary.
    pub async fn update_availability(&self) -> Result<String, ApiError> {
        self.api
            .fetch_text(ApiRequest::post("/beds/update-availability"))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::{ScriptedTransport, anonymous_client};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_available_sends_stay_as_query() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(
            200,
            json!([{ "id": 9, "bedNumber": "B1", "roomId": 2, "isAvailable": true }]),
        );
        let beds = Beds::new(anonymous_client(transport.clone()));

        let free = beds
            .available(
                2,
                NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(free.len(), 1);
        assert_eq!(
            transport.last_request().query,
            vec![
                ("roomId".to_string(), "2".to_string()),
                ("checkIn".to_string(), "2026-03-01".to_string()),
                ("checkOut".to_string(), "2026-03-04".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_update_availability_returns_text() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond_raw(200, "Updated 12 beds");
        let beds = Beds::new(anonymous_client(transport));

        assert_eq!(beds.update_availability().await.unwrap(), "Updated 12 beds");
    }
}
