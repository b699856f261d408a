use guesthouse_domain::{Booking, BookingFilters, BookingForm, BookingStatus};

use crate::ApiError;
use crate::api::ApiClient;
use crate::ports::ApiRequest;

/// `/bookings`
#[derive(Clone)]
pub struct Bookings {
    api: ApiClient,
}

impl Bookings {
    /// Creates the endpoint group.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Submits a booking request. New bookings start out pending.
    pub async fn create(&self, form: &BookingForm) -> Result<Booking, ApiError> {
        self.api.post("/bookings", form).await
    }

    /// Bookings matching `filters`. Admin only.
    pub async fn list(&self, filters: &BookingFilters) -> Result<Vec<Booking>, ApiError> {
        self.api
            .fetch(ApiRequest::get("/bookings").query_pairs(filters.to_query()))
            .await
    }

    /// One booking.
    pub async fn get(&self, id: i64) -> Result<Booking, ApiError> {
        self.api.get(format!("/bookings/{id}")).await
    }

    /// Bookings of a user, optionally in one status.
    pub async fn by_user(
        &self,
        user_id: i64,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, ApiError> {
        let mut request = ApiRequest::get(format!("/bookings/by-user/{user_id}"));
        if let Some(status) = status {
            request = request.query("status", status);
        }
        self.api.fetch(request).await
    }

    /// Bookings that are not final yet.
    pub async fn active(&self) -> Result<Vec<Booking>, ApiError> {
        self.api.get("/bookings/active").await
    }

    /// Replaces a booking.
    pub async fn update(&self, id: i64, booking: &Booking) -> Result<Booking, ApiError> {
        self.api.put(format!("/bookings/{id}"), booking).await
    }

    /// Cancels a booking on behalf of its guest.
    pub async fn cancel(&self, id: i64) -> Result<Booking, ApiError> {
        self.transition(id, "cancel").await
    }

    /// Marks a stay as finished.
    pub async fn complete(&self, id: i64) -> Result<Booking, ApiError> {
        self.transition(id, "complete").await
    }

    /// Confirms a pending booking. Admin only.
    pub async fn approve(&self, id: i64) -> Result<Booking, ApiError> {
        self.transition(id, "approve").await
    }

    /// Denies a pending booking. The reason travels as a plain-text body.
    pub async fn deny(&self, id: i64, reason: Option<&str>) -> Result<Booking, ApiError> {
        let request =
            ApiRequest::put(format!("/bookings/{id}/deny")).text(reason.unwrap_or_default());
        self.api.fetch(request).await
    }

    /// Deletes a booking. Admin only.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(format!("/bookings/{id}")).await
    }

    async fn transition(&self, id: i64, action: &str) -> Result<Booking, ApiError> {
        self.api
            .fetch(ApiRequest::put(format!("/bookings/{id}/{action}")))
            .await
    }
}
