use chrono::NaiveDate;
use guesthouse_domain::DashboardStats;

use crate::ApiError;
use crate::api::ApiClient;
use crate::ports::ApiRequest;

/// Admin reporting under `/dashboard`.
#[derive(Clone)]
pub struct Dashboard {
    api: ApiClient,
}

impl Dashboard {
    /// Creates the endpoint group.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Current totals.
    pub async fn stats(&self) -> Result<DashboardStats, ApiError> {
        self.api.get("/dashboard/stats").await
    }

    /// Figures restricted to bookings inside `[start, end]`.
    pub async fn period_report(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DashboardStats, ApiError> {
        let request = ApiRequest::get("/dashboard/report")
            .query("startDate", start)
            .query("endDate", end);
        self.api.fetch(request).await
    }

    /// Human-readable breakdown of approved revenue, as rendered by the server.
    pub async fn approved_revenue(&self) -> Result<String, ApiError> {
        self.api
            .fetch_text(ApiRequest::get("/dashboard/approved-revenue"))
            .await
    }
}
