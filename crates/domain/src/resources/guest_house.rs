use serde::{Deserialize, Serialize};

use super::Audit;

/// A guest house with its address and occupancy summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestHouse {
    /// Server id; absent on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Country.
    pub country: String,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Comma-separated amenities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<String>,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Picture URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Room count, server computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_rooms: Option<u32>,
    /// Bed count, server computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_beds: Option<u32>,
    /// Free beds, server computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_beds: Option<u32>,
    /// Audit columns.
    #[serde(flatten)]
    pub audit: Audit,
}

impl GuestHouse {
    /// Amenities split on commas, trimmed, empties dropped.
    #[must_use]
    pub fn amenity_list(&self) -> Vec<&str> {
        self.amenities
            .as_deref()
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_audit() {
        let house: GuestHouse = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Sea View",
            "address": "1 Beach Rd",
            "city": "Goa",
            "state": "Goa",
            "country": "India",
            "amenities": "wifi, breakfast,,parking",
            "availableBeds": 4,
            "createdAt": "2024-03-01T10:15:30",
            "createdBy": "admin"
        }))
        .unwrap();

        assert_eq!(house.id, Some(1));
        assert_eq!(house.available_beds, Some(4));
        assert_eq!(house.audit.created_by.as_deref(), Some("admin"));
        assert!(house.audit.created_at.is_some());
        assert_eq!(house.amenity_list(), vec!["wifi", "breakfast", "parking"]);
    }

    #[test]
    fn test_create_body_omits_server_fields() {
        let house = GuestHouse {
            name: "Hill Top".to_string(),
            ..GuestHouse::default()
        };
        let json = serde_json::to_value(&house).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("createdAt").is_none());
        assert_eq!(json["name"], "Hill Top");
    }
}
