//! Line records: the named, coloured routes segments belong to.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::station::validate_name;
use super::{DomainError, InvalidName, LineId};

/// A non-blank line display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LineName(String);

impl LineName {
    /// Parse a line name, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidName> {
        validate_name(s).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LineName {
    type Error = InvalidName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LineName> for String {
    fn from(name: LineName) -> Self {
        name.0
    }
}

impl fmt::Display for LineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Largest surcharge a line may carry.
pub const MAX_EXTRA_FARE: u64 = 1_000_000;

/// The editable attributes of a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDraft {
    pub name: LineName,

    /// Display colour, e.g. `bg-red-600`. Must not be blank.
    pub color: String,

    /// Surcharge added to any route that rides this line, at most
    /// [`MAX_EXTRA_FARE`].
    pub extra_fare: u64,
}

impl LineDraft {
    /// Validate raw line attributes.
    pub fn new(name: &str, color: &str, extra_fare: u64) -> Result<Self, DomainError> {
        if extra_fare > MAX_EXTRA_FARE {
            return Err(DomainError::ExtraFareTooLarge(extra_fare));
        }
        Ok(Self {
            name: LineName::parse(name)?,
            color: validate_name(color)?,
            extra_fare,
        })
    }
}

/// A persisted line.
///
/// Its segments are stored separately and looked up by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub id: LineId,
    #[serde(flatten)]
    pub draft: LineDraft,
}

impl Line {
    pub fn name(&self) -> &LineName {
        &self.draft.name
    }

    pub fn color(&self) -> &str {
        &self.draft.color
    }

    pub fn extra_fare(&self) -> u64 {
        self.draft.extra_fare
    }
}
