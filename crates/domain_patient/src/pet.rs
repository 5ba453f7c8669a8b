//! Pet roster records

use serde::{Deserialize, Serialize};

use core_kernel::{OwnerId, PetId};

/// A patient on the clinic's roster, with its owner's display details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    /// Unique identifier
    pub id: PetId,
    /// Owner identifier
    pub owner_id: OwnerId,
    /// Owner's display name, as registered (may contain spaces)
    pub owner_name: String,
    /// Pet's name
    pub name: String,
    /// Species, e.g. 犬 or 猫
    pub species: String,
    /// Breed
    pub breed: Option<String>,
    /// Owner's phone number
    pub phone: Option<String>,
    /// Pet insurance provider
    pub insurance_name: Option<String>,
}

impl Pet {
    /// Creates a roster record
    ///
    /// # Arguments
    ///
    /// * `id` - Pet identifier
    /// * `owner_id` - Owner identifier
    /// * `owner_name` - Owner's display name
    /// * `name` - Pet's name
    /// * `species` - Species
    pub fn new(
        id: PetId,
        owner_id: OwnerId,
        owner_name: impl Into<String>,
        name: impl Into<String>,
        species: impl Into<String>,
    ) -> Self {
        Self {
            id,
            owner_id,
            owner_name: owner_name.into(),
            name: name.into(),
            species: species.into(),
            breed: None,
            phone: None,
            insurance_name: None,
        }
    }

    /// Sets the breed
    pub fn with_breed(mut self, breed: impl Into<String>) -> Self {
        self.breed = Some(breed.into());
        self
    }

    /// Sets the owner's phone number
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the insurance provider
    pub fn with_insurance(mut self, insurance_name: impl Into<String>) -> Self {
        self.insurance_name = Some(insurance_name.into());
        self
    }
}
