//! Unit tests for yen amounts and rates
//!
//! Tests cover arithmetic, the register's lenient input parsing,
//! ja-JP display formatting and exact floor application of rates.

use core_kernel::{Yen, Rate, MoneyError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod arithmetic {
    use super::*;

    #[test]
    fn test_add_and_sub() {
        let a = Yen::new(2800);
        let b = Yen::new(280);
        assert_eq!(a + b, Yen::new(3080));
        assert_eq!(a - b, Yen::new(2520));
    }

    #[test]
    fn test_negation_produces_credit() {
        let credit = -Yen::new(12500);
        assert!(credit.is_negative());
        assert_eq!(credit.amount(), -12500);
    }

    #[test]
    fn test_times_quantity() {
        assert_eq!(Yen::new(4500).times(2), Yen::new(9000));
        assert_eq!(Yen::new(0).times(7), Yen::ZERO);
    }

    #[test]
    fn test_sum_of_amounts() {
        let amounts = vec![Yen::new(800), Yen::new(2000), Yen::new(1500)];
        let total: Yen = amounts.iter().sum();
        assert_eq!(total, Yen::new(4300));

        let empty: Vec<Yen> = Vec::new();
        assert_eq!(empty.into_iter().sum::<Yen>(), Yen::ZERO);
    }

    #[test]
    fn test_saturating_does_not_panic() {
        let max = Yen::new(i64::MAX);
        assert_eq!(max + Yen::new(1), max);
        assert_eq!(max.times(3), max);
        assert_eq!(-Yen::new(i64::MIN), max);
    }

    #[test]
    fn test_non_negative_clamps() {
        assert_eq!(Yen::new(-5).non_negative(), Yen::ZERO);
        assert_eq!(Yen::new(5).non_negative(), Yen::new(5));
    }
}

mod parsing {
    use super::*;

    #[test]
    fn test_strict_parse_accepts_integers() {
        assert_eq!("2500".parse::<Yen>(), Ok(Yen::new(2500)));
        assert_eq!(" 800 ".parse::<Yen>(), Ok(Yen::new(800)));
    }

    #[test]
    fn test_strict_parse_rejects_garbage() {
        let result = "12a".parse::<Yen>();
        assert_eq!(result, Err(MoneyError::InvalidAmount("12a".to_string())));
        assert!("".parse::<Yen>().is_err());
    }

    #[test]
    fn test_lenient_parse_treats_unparsable_as_zero() {
        assert_eq!(Yen::parse_lenient(""), Yen::ZERO);
        assert_eq!(Yen::parse_lenient("   "), Yen::ZERO);
        assert_eq!(Yen::parse_lenient("おつり"), Yen::ZERO);
    }

    #[test]
    fn test_lenient_parse_takes_leading_digits() {
        assert_eq!(Yen::parse_lenient("4000"), Yen::new(4000));
        assert_eq!(Yen::parse_lenient("4000.9"), Yen::new(4000));
        assert_eq!(Yen::parse_lenient("１０，０００"), Yen::new(10000));
        assert_eq!(Yen::parse_lenient("￥5,000"), Yen::new(5000));
    }

    #[test]
    fn test_lenient_parse_overflow_is_zero() {
        assert_eq!(Yen::parse_lenient("99999999999999999999999"), Yen::ZERO);
    }
}

mod display {
    use super::*;

    #[test]
    fn test_display_with_symbol() {
        assert_eq!(Yen::new(3080).to_string(), "¥3,080");
        assert_eq!(Yen::new(-920).to_string(), "-¥920");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(Yen::new(27500).format_grouped(), "27,500");
        assert_eq!(Yen::new(100).format_grouped(), "100");
        assert_eq!(Yen::new(-1000000).format_grouped(), "-1,000,000");
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&Yen::new(3080)).unwrap();
        assert_eq!(json, "3080");
        let back: Yen = serde_json::from_str("3080").unwrap();
        assert_eq!(back, Yen::new(3080));
    }
}

mod rates {
    use super::*;

    #[test]
    fn test_apply_floor_standard_rate() {
        let rate = Rate::new(dec!(0.1));
        assert_eq!(rate.apply_floor(Yen::new(800)), Yen::new(80));
        assert_eq!(rate.apply_floor(Yen::new(2000)), Yen::new(200));
        assert_eq!(rate.apply_floor(Yen::new(999)), Yen::new(99));
    }

    #[test]
    fn test_apply_floor_reduced_rate() {
        let rate = Rate::new(dec!(0.08));
        assert_eq!(rate.apply_floor(Yen::new(9000)), Yen::new(720));
        assert_eq!(rate.apply_floor(Yen::new(1234)), Yen::new(98));
    }

    #[test]
    fn test_apply_floor_full_ratio() {
        let rate = Rate::new(dec!(1.0));
        assert_eq!(rate.apply_floor(Yen::new(25000)), Yen::new(25000));
    }

    #[test]
    fn test_percentage_round_trip() {
        let rate = Rate::from_percentage(dec!(70));
        assert_eq!(rate.as_decimal(), dec!(0.7));
        assert_eq!(rate.as_percentage(), dec!(70.0));
    }

    #[test]
    fn test_zero_rate() {
        let rate = Rate::new(Decimal::ZERO);
        assert_eq!(rate.apply_floor(Yen::new(123456)), Yen::ZERO);
    }
}
