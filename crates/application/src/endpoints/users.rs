use guesthouse_domain::User;

use crate::ApiError;
use crate::api::ApiClient;

/// User administration under `/users`.
#[derive(Clone)]
pub struct Users {
    api: ApiClient,
}

impl Users {
    /// Creates the endpoint group.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All users. Admin only.
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        self.api.get("/users").await
    }

    /// One user.
    pub async fn get(&self, id: i64) -> Result<User, ApiError> {
        self.api.get(format!("/users/{id}")).await
    }

    /// Creates a user with any role. Admin only.
    pub async fn create(&self, user: &User) -> Result<User, ApiError> {
        self.api.post("/users", user).await
    }

    /// Replaces a user profile.
    pub async fn update(&self, id: i64, user: &User) -> Result<User, ApiError> {
        self.api.put(format!("/users/{id}"), user).await
    }

    /// Deletes a user. Admin only.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(format!("/users/{id}")).await
    }
}
