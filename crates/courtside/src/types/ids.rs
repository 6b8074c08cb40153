//! Typed identifiers for backend entities.
//!
//! Identifiers are server-issued and opaque; validation only rejects values
//! that could never have come from the backend (empty or whitespace).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, InvalidInputError};

fn validate(field: &'static str, value: &str) -> Result<(), Error> {
    if value.is_empty() {
        return Err(InvalidInputError::Identifier {
            field,
            value: value.to_string(),
            reason: "must not be empty".to_string(),
        }
        .into());
    }
    if value.chars().any(char::is_whitespace) {
        return Err(InvalidInputError::Identifier {
            field,
            value: value.to_string(),
            reason: "must not contain whitespace".to_string(),
        }
        .into());
    }
    Ok(())
}

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident, $field:literal) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier, validating the format.
            pub fn new(s: impl Into<String>) -> Result<Self, Error> {
                let s = s.into();
                validate($field, &s)?;
                Ok(Self(s))
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(
    /// Identifier of a user account.
    UserId,
    "user id"
);

entity_id!(
    /// Identifier of a sports venue.
    VenueId,
    "venue id"
);

entity_id!(
    /// Identifier of a single court within a venue.
    CourtId,
    "court id"
);

entity_id!(
    /// Identifier of a court booking.
    BookingId,
    "booking id"
);

entity_id!(
    /// Identifier of a highlight clip.
    ClipId,
    "clip id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_opaque_ids() {
        let id = BookingId::new("bkg_01HZXK2V9").unwrap();
        assert_eq!(id.as_str(), "bkg_01HZXK2V9");
    }

    #[test]
    fn rejects_empty() {
        assert!(UserId::new("").is_err());
    }

    #[test]
    fn rejects_whitespace() {
        assert!(VenueId::new("venue 1").is_err());
    }

    #[test]
    fn serde_round_trip() {
        let id = ClipId::new("clip_42").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"clip_42\"");
        let back: ClipId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn deserialize_rejects_invalid() {
        assert!(serde_json::from_str::<CourtId>("\"\"").is_err());
    }
}
