//! Station types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error returned when a display name fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid name: {reason}")]
pub struct InvalidName {
    reason: &'static str,
}

impl InvalidName {
    pub(crate) fn blank() -> Self {
        Self {
            reason: "must not be blank",
        }
    }

    pub(crate) fn too_long() -> Self {
        Self {
            reason: "must be at most 255 characters",
        }
    }
}

/// Upper bound on name length, in characters.
pub(crate) const MAX_NAME_LEN: usize = 255;

/// Trims `raw` and checks it is a usable display name.
pub(crate) fn validate_name(raw: &str) -> Result<String, InvalidName> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InvalidName::blank());
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(InvalidName::too_long());
    }
    Ok(trimmed.to_string())
}

/// Identifier of a station, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub u64);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-blank station display name.
///
/// Surrounding whitespace is trimmed on parse, so `" Gangnam "` and
/// `"Gangnam"` are the same name.
///
/// # Examples
///
/// ```
/// use subway_server::domain::StationName;
///
/// let name = StationName::parse("  Gangnam ").unwrap();
/// assert_eq!(name.as_str(), "Gangnam");
///
/// assert!(StationName::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationName(String);

impl StationName {
    /// Parse a station name, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidName> {
        validate_name(s).map(Self)
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StationName {
    type Error = InvalidName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StationName> for String {
    fn from(name: StationName) -> Self {
        name.0
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A station in the network.
///
/// Stations are created once and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: StationName,
    pub created_at: DateTime<Utc>,
}

impl Station {
    /// Create a station record stamped with the current time.
    pub fn new(id: StationId, name: StationName) -> Self {
        Self {
            id,
            name,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let name = StationName::parse("  Yeoksam\t").unwrap();
        assert_eq!(name.as_str(), "Yeoksam");
    }

    #[test]
    fn reject_blank() {
        assert!(StationName::parse("").is_err());
        assert!(StationName::parse("   ").is_err());
        assert!(StationName::parse("\n\t").is_err());
    }

    #[test]
    fn reject_overlong() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert_eq!(StationName::parse(&long), Err(InvalidName::too_long()));
        assert!(StationName::parse(&"x".repeat(MAX_NAME_LEN)).is_ok());
    }

    #[test]
    fn serde_validates_name() {
        let name: StationName = serde_json::from_str("\" Seolleung \"").unwrap();
        assert_eq!(name.as_str(), "Seolleung");

        assert!(serde_json::from_str::<StationName>("\"  \"").is_err());
    }

    #[test]
    fn station_id_display_and_order() {
        assert_eq!(StationId(42).to_string(), "42");
        assert!(StationId(1) < StationId(2));
    }
}
