//! Resources served by the booking API.
//!
//! These mirror the server's JSON (camelCase, most fields optional) and
//! carry no behaviour beyond a few read helpers. Availability and prices
//! are always computed by the server.

mod bed;
mod booking;
mod dashboard;
mod guest_house;
mod room;
mod user;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub use bed::Bed;
pub use booking::{Booking, BookingFilters, BookingForm, BookingStatus};
pub use dashboard::DashboardStats;
pub use guest_house::GuestHouse;
pub use room::Room;
pub use user::User;

/// Audit columns the server attaches to every entity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    /// Last update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
    /// Creator's username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Last editor's username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
}
