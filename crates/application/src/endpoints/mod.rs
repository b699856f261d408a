//! Typed wrappers over the booking API.
//!
//! Each method is a single [`ApiClient`](crate::api::ApiClient) call, so the
//! credential and 401 policy applies uniformly.
#![allow(clippy::missing_errors_doc)]

mod beds;
mod bookings;
mod dashboard;
mod guest_houses;
mod rooms;
mod users;

pub use beds::Beds;
pub use bookings::Bookings;
pub use dashboard::Dashboard;
pub use guest_houses::GuestHouses;
pub use rooms::Rooms;
pub use users::Users;
