//! Strongly-typed identifiers for domain entities
//!
//! Using newtype wrappers around UUIDs provides type safety and prevents
//! accidental mixing of different identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Accounting domain identifiers
define_id!(SettlementId, "ACC");
define_id!(LineItemId, "ITM");

// Clinical hand-off identifiers
define_id!(MedicalRecordId, "MR");

// Patient domain identifiers
define_id!(PetId, "PET");
define_id!(OwnerId, "OWN");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settlement_number_on_documents() {
        let uuid = Uuid::parse_str("0190a5d4-7c1e-7a3b-9f00-123456789abc").unwrap();
        let id = SettlementId::from_uuid(uuid);
        assert_eq!(id.to_string(), "ACC-0190a5d4-7c1e-7a3b-9f00-123456789abc");
    }

    #[test]
    fn test_owner_id_is_not_a_pet_id() {
        let owner = OwnerId::new();
        assert!(owner.to_string().parse::<PetId>().is_err());
    }

    #[test]
    fn test_bare_medical_record_uuid_is_accepted() {
        let raw = "5f0c6f1e-2d3a-4b8c-9e7f-0a1b2c3d4e5f";
        let id: MedicalRecordId = raw.parse().unwrap();
        assert_eq!(id.to_string(), format!("MR-{raw}"));
    }
}
