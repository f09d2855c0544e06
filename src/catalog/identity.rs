use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Versioned key for a status catalog (e.g., `http_status_ru_v1`).
///
/// Identifies which data snapshot a rendering came from when more than one
/// catalog file is in play (the embedded table versus an override on disk).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogKey(pub String);

/// Numeric HTTP status code as stored in the catalog.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(pub u16);

/// Response class a category groups its codes under.
///
/// The five known variants are the only ones a valid catalog may contain and
/// their declaration order is the display order. `Other` keeps unknown ids
/// deserializable so the index can reject them with a precise message.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum CategoryId {
    Informational,
    Success,
    Redirection,
    ClientError,
    ServerError,
    Other(String),
}

impl CategoryId {
    /// Canonical category order of every catalog.
    pub const ORDERED: [CategoryId; 5] = [
        CategoryId::Informational,
        CategoryId::Success,
        CategoryId::Redirection,
        CategoryId::ClientError,
        CategoryId::ServerError,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            CategoryId::Informational => "informational",
            CategoryId::Success => "success",
            CategoryId::Redirection => "redirection",
            CategoryId::ClientError => "client_error",
            CategoryId::ServerError => "server_error",
            CategoryId::Other(value) => value.as_str(),
        }
    }

    fn from_str(value: &str) -> Self {
        match value {
            "informational" => CategoryId::Informational,
            "success" => CategoryId::Success,
            "redirection" => CategoryId::Redirection,
            "client_error" => CategoryId::ClientError,
            "server_error" => CategoryId::ServerError,
            other => CategoryId::Other(other.to_string()),
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CategoryId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategoryId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

impl StatusCode {
    /// Response class implied by the leading digit, if it is one of 1xx-5xx.
    pub fn class(self) -> Option<CategoryId> {
        match self.0 / 100 {
            1 => Some(CategoryId::Informational),
            2 => Some(CategoryId::Success),
            3 => Some(CategoryId::Redirection),
            4 => Some(CategoryId::ClientError),
            5 => Some(CategoryId::ServerError),
            _ => None,
        }
    }

    /// True for three-digit codes in the 100-599 range.
    pub fn is_valid(self) -> bool {
        (100..=599).contains(&self.0)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_id_round_trips_known_and_unknown() {
        let known = CategoryId::ClientError;
        let json = serde_json::to_string(&known).unwrap();
        assert_eq!(json.trim_matches('"'), "client_error");
        let back: CategoryId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, known);

        let custom_json = "\"teapots\"";
        let parsed: CategoryId = serde_json::from_str(custom_json).unwrap();
        assert_eq!(parsed, CategoryId::Other("teapots".to_string()));
        let serialized = serde_json::to_string(&parsed).unwrap();
        assert_eq!(serialized, custom_json);
    }

    #[test]
    fn status_code_class_follows_leading_digit() {
        assert_eq!(StatusCode(100).class(), Some(CategoryId::Informational));
        assert_eq!(StatusCode(205).class(), Some(CategoryId::Success));
        assert_eq!(StatusCode(307).class(), Some(CategoryId::Redirection));
        assert_eq!(StatusCode(429).class(), Some(CategoryId::ClientError));
        assert_eq!(StatusCode(511).class(), Some(CategoryId::ServerError));
        assert_eq!(StatusCode(99).class(), None);
        assert_eq!(StatusCode(600).class(), None);
    }

    #[test]
    fn status_code_validity_is_three_digit_range() {
        assert!(StatusCode(100).is_valid());
        assert!(StatusCode(599).is_valid());
        assert!(!StatusCode(42).is_valid());
        assert!(!StatusCode(1000).is_valid());
    }

    #[test]
    fn catalog_key_and_code_are_transparent() {
        let key = CatalogKey("http_status_ru_v1".to_string());
        let serialized = serde_json::to_string(&key).unwrap();
        assert_eq!(serialized, "\"http_status_ru_v1\"");
        let parsed: CatalogKey = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed, key);

        let code: StatusCode = serde_json::from_str("404").unwrap();
        assert_eq!(code, StatusCode(404));
        assert_eq!(code.to_string(), "404");
    }
}
