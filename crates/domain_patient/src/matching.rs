//! Matching name-only records to roster entries
//!
//! A record matches a roster entry when, after stripping all whitespace
//! (including the ideographic space U+3000), the pet names contain one
//! another in either direction and the owner names do as well. Case is left
//! alone. The first matching entry in roster order wins; several entries may
//! satisfy the predicate and callers rely on that tie-break staying put.

use tracing::debug;

use crate::pet::Pet;

/// Removes every whitespace character, half- or full-width
pub fn normalize_name(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Containment in either direction
fn mutually_contains(candidate: &str, query: &str) -> bool {
    candidate.contains(query) || query.contains(candidate)
}

/// Finds roster entries for records that carry only display names
pub struct PetMatcher;

impl PetMatcher {
    /// Whether a roster entry matches the given pet and owner names
    pub fn matches(pet: &Pet, pet_name: &str, owner_name: &str) -> bool {
        let query_pet = normalize_name(pet_name);
        let query_owner = normalize_name(owner_name);
        Self::matches_normalized(pet, &query_pet, &query_owner)
    }

    fn matches_normalized(pet: &Pet, query_pet: &str, query_owner: &str) -> bool {
        mutually_contains(&normalize_name(&pet.name), query_pet)
            && mutually_contains(&normalize_name(&pet.owner_name), query_owner)
    }

    /// Returns the first roster entry matching the names, if any
    ///
    /// # Arguments
    ///
    /// * `roster` - Entries in roster order
    /// * `pet_name` - Pet name from the external record
    /// * `owner_name` - Owner name from the external record
    pub fn find<'a, I>(roster: I, pet_name: &str, owner_name: &str) -> Option<&'a Pet>
    where
        I: IntoIterator<Item = &'a Pet>,
    {
        let query_pet = normalize_name(pet_name);
        let query_owner = normalize_name(owner_name);

        let found = roster
            .into_iter()
            .find(|pet| Self::matches_normalized(pet, &query_pet, &query_owner));

        if found.is_none() {
            debug!(pet_name, owner_name, "no roster entry matched record");
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{OwnerId, PetId};

    fn pet(owner: &str, name: &str) -> Pet {
        Pet::new(PetId::new(), OwnerId::new(), owner, name, "猫")
    }

    #[test]
    fn test_normalize_strips_both_space_widths() {
        assert_eq!(normalize_name("田中　花子"), "田中花子");
        assert_eq!(normalize_name(" 田中 花子\t"), "田中花子");
        assert_eq!(normalize_name("Pochi"), "Pochi");
    }

    #[test]
    fn test_full_width_space_in_roster() {
        let roster = vec![pet("田中　花子", "ミケ")];
        let found = PetMatcher::find(&roster, "ミケ", "田中花子");
        assert_eq!(found, Some(&roster[0]));
    }

    #[test]
    fn test_truncated_names_match() {
        let roster = vec![pet("佐藤 健太郎", "チョコレート")];
        assert!(PetMatcher::find(&roster, "チョコ", "佐藤").is_some());
    }

    #[test]
    fn test_both_names_must_match() {
        let roster = vec![pet("田中 花子", "ミケ")];
        assert!(PetMatcher::find(&roster, "ミケ", "鈴木 一郎").is_none());
        assert!(PetMatcher::find(&roster, "ポチ", "田中 花子").is_none());
    }

    #[test]
    fn test_case_is_not_folded() {
        let roster = vec![pet("Smith", "Max")];
        assert!(PetMatcher::find(&roster, "max", "Smith").is_none());
    }
}
