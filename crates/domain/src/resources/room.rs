use serde::{Deserialize, Serialize};

use super::Audit;

/// A room inside a guest house.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Server id; absent on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Room number as printed on the door.
    pub room_number: String,
    /// Owning guest house.
    pub guest_house_id: i64,
    /// Free-text room type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    /// Number of beds the room can hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// Nightly price, server computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_night: Option<f64>,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the room is open for booking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    /// Name of the owning guest house.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_house_name: Option<String>,
    /// Bed count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_beds: Option<u32>,
    /// Free beds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_beds: Option<u32>,
    /// Audit columns.
    #[serde(flatten)]
    pub audit: Audit,
}
