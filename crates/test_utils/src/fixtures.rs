//! Pre-built Test Fixtures
//!
//! Provides ready-to-use roster entries, line items and dates for the front
//! desk test suite. These fixtures are designed to be consistent and
//! predictable for unit tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{MedicalRecordId, OwnerId, PetId, Yen};
use domain_accounting::{ItemCategory, LineItem, TaxRate};
use domain_patient::{Pet, Roster};

/// Fixture for roster data
pub struct RosterFixtures;

impl RosterFixtures {
    /// 山田 太郎's dog
    pub fn pochi() -> Pet {
        Pet::new(PetId::new(), OwnerId::new(), "山田 太郎", "ポチ", "犬")
            .with_breed("柴犬")
            .with_phone("090-1234-5678")
            .with_insurance("アニコム")
    }

    /// 田中　花子's cat; the owner name uses an ideographic space
    pub fn mike() -> Pet {
        Pet::new(PetId::new(), OwnerId::new(), "田中　花子", "ミケ", "猫")
            .with_breed("三毛猫")
    }

    /// 佐藤 花子's cat, also named ミケ
    pub fn sato_mike() -> Pet {
        Pet::new(PetId::new(), OwnerId::new(), "佐藤 花子", "ミケ", "猫")
    }

    /// 鈴木 一郎's rabbit
    pub fn usagi() -> Pet {
        Pet::new(PetId::new(), OwnerId::new(), "鈴木 一郎", "モモ", "ウサギ")
    }

    /// A small roster in a fixed order
    pub fn roster() -> Roster {
        Roster::new(vec![
            Self::pochi(),
            Self::mike(),
            Self::sato_mike(),
            Self::usagi(),
        ])
    }
}

/// Fixture for line items
pub struct ItemFixtures;

impl ItemFixtures {
    /// 再診料 ¥800, insured, handed off from a record
    pub fn revisit_fee(record_id: Option<MedicalRecordId>) -> LineItem {
        LineItem::new(ItemCategory::Examination, "再診料", Yen::new(800))
            .with_code("EX-002")
            .insurance_applicable(true)
            .derived_from_record(record_id)
    }

    /// 血液検査 ¥2,000, insured, handed off from a record
    pub fn blood_test(record_id: Option<MedicalRecordId>) -> LineItem {
        LineItem::new(ItemCategory::Test, "血液検査", Yen::new(2000))
            .with_code("TS-010")
            .insurance_applicable(true)
            .derived_from_record(record_id)
    }

    /// 手術 ¥25,000, insured
    pub fn surgery() -> LineItem {
        LineItem::new(ItemCategory::Surgery, "避妊手術", Yen::new(25000))
            .insurance_applicable(true)
    }

    /// 療法食 ¥4,500 × 2 at the reduced rate
    pub fn therapeutic_food() -> LineItem {
        LineItem::new(ItemCategory::Food, "療法食 3kg", Yen::new(4500))
            .with_quantity(2)
            .with_tax_rate(TaxRate::Reduced)
    }

    /// A shampoo sold over the counter
    pub fn shampoo() -> LineItem {
        LineItem::new(ItemCategory::Goods, "薬用シャンプー", Yen::new(1200))
    }

    /// The medical record hand-off for a routine revisit: ¥2,800 pre-tax
    pub fn medical_record_items(record_id: MedicalRecordId) -> Vec<LineItem> {
        vec![
            Self::revisit_fee(Some(record_id)),
            Self::blood_test(Some(record_id)),
        ]
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Visit date
    pub fn visit_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    /// 2024-01-04 16:30 UTC, which is already 2024-01-05 in Tokyo
    pub fn late_evening_utc() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 4, 16, 30, 0).unwrap()
    }
}
