use serde::Deserialize;
use url::form_urlencoded;

/// Snapshot of the five filter form fields, read at refresh time. Also the
/// `[filters]` config section holding the fields' initial values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FilterValues {
    pub q: String,
    pub min_price: String,
    pub max_price: String,
    pub property_type: String,
    pub bedrooms: String,
}

/// Query parameters for `GET /api/properties`
///
/// Only fields with a value are kept, in form order. Values are not
/// validated here; the API decides what a malformed price means.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    params: Vec<(&'static str, String)>,
}

impl FilterQuery {
    pub fn from_values(values: &FilterValues) -> Self {
        let mut params = Vec::new();

        let q = values.q.trim();
        if !q.is_empty() {
            params.push(("q", q.to_string()));
        }

        for (key, value) in [
            ("min_price", &values.min_price),
            ("max_price", &values.max_price),
            ("type", &values.property_type),
            ("bedrooms", &values.bedrooms),
        ] {
            if !value.is_empty() {
                params.push((key, value.clone()));
            }
        }

        Self { params }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// `application/x-www-form-urlencoded` encoding, empty when no filter is set
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
    }
}
