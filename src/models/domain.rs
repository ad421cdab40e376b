use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A single listing as returned by `GET /api/properties`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub area: f64,
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl PropertySummary {
    /// First image, if the listing has a non-empty one
    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .first()
            .map(String::as_str)
            .filter(|src| !src.is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Aggregate numbers from `GET /api/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total_properties: u64,
    pub available_properties: u64,
    pub average_price: f64,
    #[serde(default)]
    pub type_distribution: BTreeMap<String, u64>,
    #[serde(default)]
    pub price_ranges: BTreeMap<String, u64>,
}
