//! Tests for the strongly typed identifiers

use core_kernel::{SettlementId, LineItemId, MedicalRecordId, PetId, OwnerId};
use uuid::Uuid;

#[test]
fn test_new_generates_unique_ids() {
    assert_ne!(SettlementId::new(), SettlementId::new());
    assert_ne!(LineItemId::new_v7(), LineItemId::new_v7());
}

#[test]
fn test_prefixes() {
    assert_eq!(SettlementId::prefix(), "ACC");
    assert_eq!(LineItemId::prefix(), "ITM");
    assert_eq!(MedicalRecordId::prefix(), "MR");
    assert_eq!(PetId::prefix(), "PET");
    assert_eq!(OwnerId::prefix(), "OWN");
}

#[test]
fn test_parse_with_and_without_prefix() {
    let uuid = Uuid::new_v4();
    let with_prefix: OwnerId = format!("OWN-{}", uuid).parse().unwrap();
    let without_prefix: OwnerId = uuid.to_string().parse().unwrap();
    assert_eq!(with_prefix, without_prefix);
    assert_eq!(with_prefix.as_uuid(), &uuid);
}

#[test]
fn test_parse_rejects_garbage() {
    assert!("PET-not-a-uuid".parse::<PetId>().is_err());
}

#[test]
fn test_serializes_transparently() {
    let uuid = Uuid::new_v4();
    let id = MedicalRecordId::from_uuid(uuid);
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{}\"", uuid));
}
