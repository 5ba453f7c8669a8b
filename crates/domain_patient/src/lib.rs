//! Patient Domain
//!
//! The clinic's pet roster and the lookups the front desk runs against it.
//!
//! Several record types that reach the register (legacy accounting rows,
//! vaccination slips) carry only the pet's and owner's display names, with
//! no stable foreign key. [`PetMatcher`] bridges those back to a roster
//! entry with a whitespace-insensitive containment match.
//!
//! # Examples
//!
//! ```rust
//! use core_kernel::{OwnerId, PetId};
//! use domain_patient::{Pet, Roster};
//!
//! let roster = Roster::new(vec![
//!     Pet::new(PetId::new(), OwnerId::new(), "田中　花子", "ミケ", "猫"),
//! ]);
//!
//! let pet = roster.find_by_record("ミケ", "田中花子");
//! assert!(pet.is_some());
//! ```

pub mod pet;
pub mod matching;
pub mod roster;

pub use pet::Pet;
pub use matching::{PetMatcher, normalize_name};
pub use roster::{Roster, DEFAULT_SEARCH_LIMIT};
