//! The clinic's pet roster

use serde::{Deserialize, Serialize};

use core_kernel::PetId;

use crate::matching::PetMatcher;
use crate::pet::Pet;

/// Result cap used by the pet selection screen
pub const DEFAULT_SEARCH_LIMIT: usize = 100;

/// An ordered list of roster entries
///
/// Order matters: record matching is first-match-wins in roster order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    pets: Vec<Pet>,
}

impl Roster {
    pub fn new(pets: Vec<Pet>) -> Self {
        Self { pets }
    }

    /// Entries in roster order
    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }

    /// Appends an entry at the end of the roster
    pub fn push(&mut self, pet: Pet) {
        self.pets.push(pet);
    }

    /// Looks a pet up by id
    pub fn find_by_id(&self, id: PetId) -> Option<&Pet> {
        self.pets.iter().find(|pet| pet.id == id)
    }

    /// Matches a name-only record to a roster entry
    ///
    /// See [`PetMatcher::find`].
    pub fn find_by_record(&self, pet_name: &str, owner_name: &str) -> Option<&Pet> {
        PetMatcher::find(&self.pets, pet_name, owner_name)
    }

    /// Filters the roster for the pet selection screen
    ///
    /// Case-insensitive containment over owner name, pet name, species,
    /// owner id and pet id. An empty query lists the roster. At most
    /// `limit` entries are returned, in roster order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Pet> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.pets.iter().take(limit).collect();
        }

        self.pets
            .iter()
            .filter(|pet| {
                pet.owner_name.to_lowercase().contains(&query)
                    || pet.name.to_lowercase().contains(&query)
                    || pet.species.to_lowercase().contains(&query)
                    || pet.owner_id.to_string().to_lowercase().contains(&query)
                    || pet.id.to_string().to_lowercase().contains(&query)
            })
            .take(limit)
            .collect()
    }
}

impl FromIterator<Pet> for Roster {
    fn from_iter<I: IntoIterator<Item = Pet>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Pet;
    type IntoIter = std::slice::Iter<'a, Pet>;

    fn into_iter(self) -> Self::IntoIter {
        self.pets.iter()
    }
}
