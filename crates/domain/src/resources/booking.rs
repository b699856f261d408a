use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Audit, Bed, GuestHouse, Room, User};

/// Lifecycle status of a booking, driven by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Awaiting admin approval.
    Pending,
    /// Approved.
    Confirmed,
    /// Cancelled by the guest.
    Canceled,
    /// Stay finished.
    Completed,
    /// Rejected by an admin.
    Denied,
}

impl BookingStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Canceled => "CANCELED",
            Self::Completed => "COMPLETED",
            Self::Denied => "DENIED",
        }
    }

    /// Returns true once the server will no longer change the booking.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Canceled | Self::Completed | Self::Denied)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booking of one bed for a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Server id.
    pub id: i64,
    /// Booking owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Booked bed.
    pub bed_id: i64,
    /// Room of the bed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    /// Guest house of the bed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_house_id: Option<i64>,
    /// First night.
    pub check_in_date: NaiveDate,
    /// Departure day.
    pub check_out_date: NaiveDate,
    /// Current status.
    pub status: BookingStatus,
    /// Total price, server computed.
    pub total_price: f64,
    /// Purpose of the stay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Owner's username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// Label of the booked bed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bed_number: Option<String>,
    /// Number of the booked room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    /// Name of the guest house.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_house_name: Option<String>,
    /// Guest's given name.
    pub first_name: String,
    /// Guest's family name.
    pub last_name: String,
    /// Guest's email.
    pub email: String,
    /// Guest's phone.
    pub phone_number: String,
    /// Guest's gender.
    pub gender: String,
    /// Guest's postal address.
    pub address: String,
    /// Reason given when an admin denied the booking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Reason given when the guest cancelled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    /// Embedded guest house.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_house: Option<GuestHouse>,
    /// Embedded room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<Room>,
    /// Embedded bed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bed: Option<Bed>,
    /// Embedded owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Audit columns.
    #[serde(flatten)]
    pub audit: Audit,
}

impl Booking {
    /// Number of nights between check-in and check-out.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }
}

/// Body of `POST /bookings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    /// Booking owner; the server defaults to the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Bed to book.
    pub bed_id: i64,
    /// First night.
    pub check_in_date: NaiveDate,
    /// Departure day.
    pub check_out_date: NaiveDate,
    /// Guest's given name.
    pub first_name: String,
    /// Guest's family name.
    pub last_name: String,
    /// Guest's email.
    pub email: String,
    /// Guest's phone.
    pub phone_number: String,
    /// Guest's gender.
    pub gender: String,
    /// Guest's postal address.
    pub address: String,
    /// Purpose of the stay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

/// Query filters of `GET /bookings`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookingFilters {
    /// Only bookings in this status.
    pub status: Option<BookingStatus>,
    /// Only bookings starting on this day.
    pub check_in_date: Option<NaiveDate>,
    /// Only bookings ending on this day.
    pub check_out_date: Option<NaiveDate>,
    /// Only bookings in this guest house.
    pub guest_house_id: Option<i64>,
    /// Only bookings of this user.
    pub user_id: Option<i64>,
}

impl BookingFilters {
    /// Query pairs for the set filters, in a stable order.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status".to_string(), status.to_string()));
        }
        if let Some(date) = self.check_in_date {
            query.push(("checkInDate".to_string(), date.to_string()));
        }
        if let Some(date) = self.check_out_date {
            query.push(("checkOutDate".to_string(), date.to_string()));
        }
        if let Some(id) = self.guest_house_id {
            query.push(("guestHouseId".to_string(), id.to_string()));
        }
        if let Some(id) = self.user_id {
            query.push(("userId".to_string(), id.to_string()));
        }
        query
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_booking() {
        let booking: Booking = serde_json::from_value(serde_json::json!({
            "id": 10,
            "bedId": 3,
            "checkInDate": "2024-05-01",
            "checkOutDate": "2024-05-04",
            "status": "PENDING",
            "totalPrice": 90.0,
            "firstName": "Ana",
            "lastName": "Lopez",
            "email": "a@b.com",
            "phoneNumber": "555",
            "gender": "F",
            "address": "Somewhere"
        }))
        .unwrap();

        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.nights(), 3);
        assert!(!booking.status.is_final());
    }

    #[test]
    fn test_filters_to_query() {
        let filters = BookingFilters {
            status: Some(BookingStatus::Confirmed),
            guest_house_id: Some(2),
            check_in_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            ..BookingFilters::default()
        };

        assert_eq!(
            filters.to_query(),
            vec![
                ("status".to_string(), "CONFIRMED".to_string()),
                ("checkInDate".to_string(), "2024-05-01".to_string()),
                ("guestHouseId".to_string(), "2".to_string()),
            ]
        );
        assert!(BookingFilters::default().to_query().is_empty());
    }
}
