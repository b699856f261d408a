use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregates shown on the admin dashboard. All values are server computed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    /// Registered users.
    pub total_users: Option<u64>,
    /// Guest houses.
    pub total_guest_houses: Option<u64>,
    /// Rooms.
    pub total_rooms: Option<u64>,
    /// Beds.
    pub total_beds: Option<u64>,
    /// Currently free beds.
    pub available_beds: Option<u64>,
    /// All bookings.
    pub total_bookings: Option<u64>,
    /// Bookings in progress.
    pub active_bookings: Option<u64>,
    /// Completed bookings.
    pub completed_bookings: Option<u64>,
    /// Cancelled bookings.
    pub canceled_bookings: Option<u64>,
    /// Bookings awaiting approval.
    pub pending_bookings: Option<u64>,
    /// Approved bookings.
    pub confirmed_bookings: Option<u64>,
    /// Denied bookings.
    pub denied_bookings: Option<u64>,
    /// Revenue over all bookings.
    pub total_revenue: Option<f64>,
    /// Mean booking value.
    pub average_booking_value: Option<f64>,
    /// Occupancy as a percentage.
    pub occupancy_rate: Option<f64>,
    /// Start of the reported period.
    pub period_start_date: Option<NaiveDate>,
    /// End of the reported period.
    pub period_end_date: Option<NaiveDate>,
    /// Bookings in the period.
    pub period_bookings: Option<u64>,
    /// Revenue in the period.
    pub period_revenue: Option<f64>,
}
