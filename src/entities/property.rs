//! Property entity type

use serde::{Deserialize, Serialize};

use crate::core::entity::Record;
use crate::core::identity::{EntityKind, RecordId};
use crate::core::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum PropertyType {
    #[default]
    Apartment,
    Villa,
    Townhouse,
    Penthouse,
    Office,
    Retail,
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyType::Apartment => write!(f, "apartment"),
            PropertyType::Villa => write!(f, "villa"),
            PropertyType::Townhouse => write!(f, "townhouse"),
            PropertyType::Penthouse => write!(f, "penthouse"),
            PropertyType::Office => write!(f, "office"),
            PropertyType::Retail => write!(f, "retail"),
        }
    }
}

impl std::str::FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "apartment" => Ok(PropertyType::Apartment),
            "villa" => Ok(PropertyType::Villa),
            "townhouse" => Ok(PropertyType::Townhouse),
            "penthouse" => Ok(PropertyType::Penthouse),
            "office" => Ok(PropertyType::Office),
            "retail" => Ok(PropertyType::Retail),
            _ => Err(format!("Unknown property type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum PropertyStatus {
    #[default]
    Available,
    Reserved,
    Sold,
    Rented,
}

impl std::fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyStatus::Available => write!(f, "available"),
            PropertyStatus::Reserved => write!(f, "reserved"),
            PropertyStatus::Sold => write!(f, "sold"),
            PropertyStatus::Rented => write!(f, "rented"),
        }
    }
}

impl std::str::FromStr for PropertyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(PropertyStatus::Available),
            "reserved" => Ok(PropertyStatus::Reserved),
            "sold" => Ok(PropertyStatus::Sold),
            "rented" => Ok(PropertyStatus::Rented),
            _ => Err(format!("Unknown property status: {}", s)),
        }
    }
}

/// A listed property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Unique identifier
    pub id: RecordId,

    /// Listing title
    pub title: String,

    #[serde(rename = "type", default)]
    pub property_type: PropertyType,

    /// Asking price
    pub price: Money,

    /// Area / community, display text
    pub location: String,

    #[serde(default)]
    pub bedrooms: u8,

    #[serde(default)]
    pub bathrooms: u8,

    /// Built-up area in square feet
    #[serde(default)]
    pub area_sqft: u32,

    #[serde(default)]
    pub status: PropertyStatus,
}

#[derive(Debug, Clone)]
pub struct PropertyDraft {
    pub title: String,
    pub property_type: PropertyType,
    pub price: Money,
    pub location: String,
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub area_sqft: u32,
    pub status: PropertyStatus,
}

#[derive(Debug, Clone, Default)]
pub struct PropertyPatch {
    pub title: Option<String>,
    pub property_type: Option<PropertyType>,
    pub price: Option<Money>,
    pub location: Option<String>,
    pub bedrooms: Option<u8>,
    pub bathrooms: Option<u8>,
    pub area_sqft: Option<u32>,
    pub status: Option<PropertyStatus>,
}

impl Record for Property {
    const KIND: EntityKind = EntityKind::Property;

    type Draft = PropertyDraft;
    type Patch = PropertyPatch;

    fn create(id: RecordId, draft: PropertyDraft) -> Self {
        Self {
            id,
            title: draft.title,
            property_type: draft.property_type,
            price: draft.price,
            location: draft.location,
            bedrooms: draft.bedrooms,
            bathrooms: draft.bathrooms,
            area_sqft: draft.area_sqft,
            status: draft.status,
        }
    }

    fn apply(&mut self, patch: PropertyPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(property_type) = patch.property_type {
            self.property_type = property_type;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(bedrooms) = patch.bedrooms {
            self.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = patch.bathrooms {
            self.bathrooms = bathrooms;
        }
        if let Some(area_sqft) = patch.area_sqft {
            self.area_sqft = area_sqft;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_type_serializes_renamed() {
        let property = Property::create(
            RecordId::new(EntityKind::Property, 2),
            PropertyDraft {
                title: "Palm Vista Villa".to_string(),
                property_type: PropertyType::Villa,
                price: Money::aed(6_800_000),
                location: "Palm Jumeirah".to_string(),
                bedrooms: 5,
                bathrooms: 6,
                area_sqft: 7200,
                status: PropertyStatus::Available,
            },
        );

        let yaml = serde_yml::to_string(&property).unwrap();
        assert!(yaml.contains("type: villa"));
        assert!(yaml.contains("id: P002"));

        let back: Property = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(back, property);
    }
}
