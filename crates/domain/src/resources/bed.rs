use serde::{Deserialize, Serialize};

use super::Audit;

/// A bookable bed inside a room.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bed {
    /// Server id; absent on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Bed label within the room.
    pub bed_number: String,
    /// Owning room.
    pub room_id: i64,
    /// Free-text bed type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bed_type: Option<String>,
    /// Nightly price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_night: Option<f64>,
    /// Administrative availability flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    /// Availability for the requested dates, server computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available_for_booking: Option<bool>,
    /// Room number of the owning room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    /// Guest house of the owning room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_house_id: Option<i64>,
    /// Name of that guest house.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_house_name: Option<String>,
    /// Audit columns.
    #[serde(flatten)]
    pub audit: Audit,
}

impl Bed {
    /// The server's answer on whether the bed can be booked.
    ///
    /// The date-specific flag wins over the administrative one.
    #[must_use]
    pub fn bookable(&self) -> bool {
        self.is_available_for_booking
            .or(self.is_available)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookable_prefers_date_specific_flag() {
        let mut bed = Bed {
            is_available: Some(true),
            is_available_for_booking: Some(false),
            ..Bed::default()
        };
        assert!(!bed.bookable());

        bed.is_available_for_booking = None;
        assert!(bed.bookable());

        bed.is_available = None;
        assert!(!bed.bookable());
    }
}
