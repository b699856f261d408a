use guesthouse_domain::Room;

use crate::ApiError;
use crate::api::ApiClient;

/// `/rooms`
#[derive(Clone)]
pub struct Rooms {
    api: ApiClient,
}

impl Rooms {
    /// Creates the endpoint group.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All rooms.
    pub async fn list(&self) -> Result<Vec<Room>, ApiError> {
        self.api.get("/rooms").await
    }

    /// One room.
    pub async fn get(&self, id: i64) -> Result<Room, ApiError> {
        self.api.get(format!("/rooms/{id}")).await
    }

    /// Rooms of one guest house.
    pub async fn by_guest_house(&self, guest_house_id: i64) -> Result<Vec<Room>, ApiError> {
        self.api
            .get(format!("/rooms/by-guesthouse/{guest_house_id}"))
            .await
    }

    /// Adds a room. Admin only.
    pub async fn create(&self, room: &Room) -> Result<Room, ApiError> {
        self.api.post("/rooms", room).await
    }

    /// Replaces a room. Admin only.
    pub async fn update(&self, id: i64, room: &Room) -> Result<Room, ApiError> {
        self.api.put(format!("/rooms/{id}"), room).await
    }

    /// Removes a room. Admin only.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(format!("/rooms/{id}")).await
    }
}
