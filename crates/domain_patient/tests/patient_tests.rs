//! Comprehensive tests for domain_patient

use core_kernel::{OwnerId, PetId};

use domain_patient::{normalize_name, Pet, PetMatcher, Roster, DEFAULT_SEARCH_LIMIT};

fn pet(owner: &str, name: &str, species: &str) -> Pet {
    Pet::new(PetId::new(), OwnerId::new(), owner, name, species)
}

// ============================================================================
// Matcher Tests
// ============================================================================

mod matcher_tests {
    use super::*;

    #[test]
    fn test_full_width_space_owner_matches_collapsed_query() {
        let roster = vec![pet("田中　花子", "ミケ", "猫")];

        let found = PetMatcher::find(&roster, "ミケ", "田中花子");

        assert_eq!(found.map(|p| p.id), Some(roster[0].id));
    }

    #[test]
    fn test_first_match_wins() {
        let roster = vec![
            pet("田中 花子", "ミケ", "猫"),
            pet("田中 花子", "ミケ", "猫"),
        ];

        let found = PetMatcher::find(&roster, "ミケ", "田中花子").unwrap();

        assert_eq!(found.id, roster[0].id);
    }

    #[test]
    fn test_query_longer_than_roster_name_matches() {
        // Containment runs both ways: the roster may hold the shorter name
        let roster = vec![pet("田中", "ミケ", "猫")];
        assert!(PetMatcher::find(&roster, "ミケちゃん", "田中 花子").is_some());
    }

    #[test]
    fn test_no_match_returns_none() {
        let roster = vec![pet("山田 太郎", "ポチ", "犬")];
        assert!(PetMatcher::find(&roster, "ミケ", "田中花子").is_none());
    }

    #[test]
    fn test_empty_roster() {
        let roster: Vec<Pet> = Vec::new();
        assert!(PetMatcher::find(&roster, "ミケ", "田中花子").is_none());
    }

    #[test]
    fn test_matches_predicate() {
        let entry = pet("佐藤 花子", "ミケ", "猫");
        assert!(PetMatcher::matches(&entry, " ミケ ", "佐藤　花子"));
        assert!(!PetMatcher::matches(&entry, "ミケ", "田中 花子"));
    }

    #[test]
    fn test_normalize_name_is_idempotent() {
        let once = normalize_name("田中　 花子 ");
        assert_eq!(normalize_name(&once), once);
    }
}

// ============================================================================
// Roster Tests
// ============================================================================

mod roster_tests {
    use super::*;

    fn sample_roster() -> Roster {
        Roster::new(vec![
            pet("山田 太郎", "ポチ", "犬"),
            pet("田中　花子", "ミケ", "猫"),
            pet("佐藤 花子", "Max", "犬"),
            pet("鈴木 一郎", "モモ", "ウサギ"),
        ])
    }

    #[test]
    fn test_find_by_record_delegates_to_matcher() {
        let roster = sample_roster();
        let found = roster.find_by_record("ミケ", "田中花子").unwrap();
        assert_eq!(found.name, "ミケ");
        assert_eq!(found.owner_name, "田中　花子");
    }

    #[test]
    fn test_find_by_id() {
        let roster = sample_roster();
        let id = roster.pets()[3].id;

        assert_eq!(roster.find_by_id(id).map(|p| p.name.as_str()), Some("モモ"));
        assert!(roster.find_by_id(PetId::new()).is_none());
    }

    #[test]
    fn test_search_matches_any_field() {
        let roster = sample_roster();

        let by_species = roster.search("犬", DEFAULT_SEARCH_LIMIT);
        assert_eq!(by_species.len(), 2);
        assert_eq!(by_species[0].name, "ポチ");

        let by_owner = roster.search("花子", DEFAULT_SEARCH_LIMIT);
        assert_eq!(by_owner.len(), 2);

        let id = roster.pets()[1].id.to_string();
        let by_id = roster.search(&id, DEFAULT_SEARCH_LIMIT);
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].name, "ミケ");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let roster = sample_roster();
        let found = roster.search("max", DEFAULT_SEARCH_LIMIT);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Max");
    }

    #[test]
    fn test_empty_query_lists_roster_up_to_limit() {
        let roster = sample_roster();

        assert_eq!(roster.search("", DEFAULT_SEARCH_LIMIT).len(), 4);
        assert_eq!(roster.search("  ", 2).len(), 2);
    }

    #[test]
    fn test_search_respects_limit() {
        let roster: Roster = (0..150)
            .map(|i| pet("山田 太郎", &format!("ポチ{}", i), "犬"))
            .collect();

        assert_eq!(roster.search("ポチ", DEFAULT_SEARCH_LIMIT).len(), 100);
    }

    #[test]
    fn test_roster_serializes_as_array() {
        let roster = Roster::new(vec![pet("山田 太郎", "ポチ", "犬")]);
        let json = serde_json::to_value(&roster).unwrap();

        assert!(json.is_array());
        assert_eq!(json[0]["name"], "ポチ");

        let back: Roster = serde_json::from_value(json).unwrap();
        assert_eq!(back, roster);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn name_strategy() -> impl Strategy<Value = String> {
        "[あ-んア-ン一-龥]{1,6}"
    }

    fn spaced(name: &str, gaps: &[(usize, bool)]) -> String {
        let mut out = String::new();
        let chars: Vec<char> = name.chars().collect();
        for (i, c) in chars.iter().enumerate() {
            for (pos, full_width) in gaps {
                if *pos == i {
                    out.push(if *full_width { '\u{3000}' } else { ' ' });
                }
            }
            out.push(*c);
        }
        out
    }

    proptest! {
        #[test]
        fn matching_ignores_inserted_whitespace(
            owner in name_strategy(),
            name in name_strategy(),
            owner_gaps in prop::collection::vec((0usize..6, any::<bool>()), 0..3),
            name_gaps in prop::collection::vec((0usize..6, any::<bool>()), 0..3),
        ) {
            let plain = pet(&owner, &name, "犬");
            let spaced_entry = pet(&spaced(&owner, &owner_gaps), &spaced(&name, &name_gaps), "犬");

            prop_assert!(PetMatcher::matches(&plain, &name, &owner));
            prop_assert!(PetMatcher::matches(&spaced_entry, &name, &owner));
            prop_assert!(PetMatcher::matches(
                &plain,
                &spaced(&name, &name_gaps),
                &spaced(&owner, &owner_gaps)
            ));
        }

        #[test]
        fn first_match_is_earliest_matching_entry(
            names in prop::collection::vec((name_strategy(), name_strategy()), 1..8),
            pick in any::<prop::sample::Index>(),
        ) {
            let roster: Vec<Pet> = names.iter().map(|(owner, name)| pet(owner, name, "猫")).collect();
            let target = &roster[pick.index(roster.len())];

            let found = PetMatcher::find(&roster, &target.name, &target.owner_name).unwrap();
            let earliest = roster
                .iter()
                .position(|p| PetMatcher::matches(p, &target.name, &target.owner_name))
                .unwrap();

            prop_assert_eq!(found.id, roster[earliest].id);
        }
    }
}
