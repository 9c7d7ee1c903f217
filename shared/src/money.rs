//! Fixed-point money arithmetic
//!
//! All monetary amounts are [`Money`] values: decimals rounded half-up to
//! two decimal places at every construction point. Binary floating point
//! never participates in money arithmetic; `f64` appears only at the API
//! boundary and is converted through [`to_decimal`] before any math.
//!
//! Percentages (discounts, commission rates) are decimal percent units:
//! `15` means 15%, not `0.15`.

use rust_decimal::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

/// Number of decimal places for monetary amounts
const DECIMAL_PLACES: u32 = 2;

/// A monetary amount, always carrying exactly two decimal places
///
/// Construction rounds half-up (midpoint away from zero), so
/// `10.005` becomes `10.01` and `-10.005` becomes `-10.01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount
    pub const ZERO: Money = Money(Decimal::from_parts(0, 0, 0, false, DECIMAL_PLACES));

    /// Create a monetary amount, rounding half-up to two decimal places
    pub fn new(value: Decimal) -> Self {
        let mut rounded =
            value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(DECIMAL_PLACES);
        Money(rounded)
    }

    /// Create a monetary amount from a float received at the API boundary
    pub fn from_f64(value: f64) -> Self {
        Money::new(to_decimal(value))
    }

    /// The underlying decimal value
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Convert to f64 for display contexts
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    /// Clamp negative amounts to zero
    pub fn max_zero(self) -> Self {
        Money(self.0.max(Decimal::ZERO))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Money::new(s.trim().parse::<Decimal>()?))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money::new(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money::new(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money::new(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Float(f64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
            Raw::Int(v) => Ok(Money::new(Decimal::from(v))),
            Raw::Float(v) => Ok(Money::from_f64(v)),
        }
    }
}

/// Convert f64 to Decimal for percentage math
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Net price after a percentage discount
///
/// `compute_net(1000000, 10)` is `900000.00`. The discount is a percent
/// value in `[0, 100]`; the result is rounded half-up to two places.
pub fn compute_net(gross: Money, discount_percent: Decimal) -> Money {
    Money::new(gross.amount() * (Decimal::ONE_HUNDRED - discount_percent) / Decimal::ONE_HUNDRED)
}

/// Commission owed on a net amount at a percent rate
///
/// `compute_commission(900000, 15)` is `135000.00`, rounded half-up to
/// two places.
pub fn compute_commission(net: Money, rate_percent: Decimal) -> Money {
    Money::new(net.amount() * rate_percent / Decimal::ONE_HUNDRED)
}

#[cfg(feature = "db")]
mod sqlite {
    use super::Money;
    use sqlx::error::BoxDynError;
    use sqlx::sqlite::{Sqlite, SqliteArgumentValue, SqliteTypeInfo, SqliteValueRef};
    use sqlx::{Decode, Encode, Type};

    // Stored as canonical two-decimal TEXT, e.g. "1000000.00"
    impl Type<Sqlite> for Money {
        fn type_info() -> SqliteTypeInfo {
            <String as Type<Sqlite>>::type_info()
        }

        fn compatible(ty: &SqliteTypeInfo) -> bool {
            <String as Type<Sqlite>>::compatible(ty)
        }
    }

    impl<'q> Encode<'q, Sqlite> for Money {
        fn encode_by_ref(
            &self,
            buf: &mut Vec<SqliteArgumentValue<'q>>,
        ) -> Result<sqlx::encode::IsNull, BoxDynError> {
            <String as Encode<'q, Sqlite>>::encode(self.to_string(), buf)
        }
    }

    impl<'r> Decode<'r, Sqlite> for Money {
        fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
            let text = <&str as Decode<Sqlite>>::decode(value)?;
            Ok(text.parse::<Money>()?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn test_rounds_half_up() {
        assert_eq!(Money::new(dec("10.005")).to_string(), "10.01");
        assert_eq!(Money::new(dec("10.004")).to_string(), "10.00");
        assert_eq!(Money::new(dec("10.015")).to_string(), "10.02");
        assert_eq!(Money::new(dec("-10.005")).to_string(), "-10.01");
    }

    #[test]
    fn test_display_always_two_places() {
        assert_eq!(Money::new(dec("100")).to_string(), "100.00");
        assert_eq!(Money::new(dec("0.5")).to_string(), "0.50");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_parse_roundtrip() {
        let m = money("1000000.00");
        assert_eq!(m.to_string(), "1000000.00");
        assert_eq!(m.to_string().parse::<Money>().unwrap(), m);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("not money".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Money::from_f64(99.99).to_string(), "99.99");
        assert_eq!(Money::from_f64(0.1).to_string(), "0.10");
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(money("10.50") + money("0.75"), money("11.25"));
        assert_eq!(money("10.50") - money("0.75"), money("9.75"));
        assert_eq!(-money("10.50"), money("-10.50"));
    }

    #[test]
    fn test_sum() {
        let total: Money = [money("1.10"), money("2.20"), money("3.30")]
            .into_iter()
            .sum();
        assert_eq!(total, money("6.60"));

        let empty: Money = std::iter::empty::<Money>().sum();
        assert_eq!(empty, Money::ZERO);
    }

    #[test]
    fn test_max_zero() {
        assert_eq!(money("-5.00").max_zero(), Money::ZERO);
        assert_eq!(money("5.00").max_zero(), money("5.00"));
        assert_eq!(Money::ZERO.max_zero(), Money::ZERO);
    }

    #[test]
    fn test_sign_checks() {
        assert!(money("0.01").is_positive());
        assert!(!money("0.01").is_negative());
        assert!(money("-0.01").is_negative());
        assert!(Money::ZERO.is_zero());
        assert!(!Money::ZERO.is_positive());
    }

    #[test]
    fn test_serialize_as_string() {
        let json = serde_json::to_string(&money("150000.00")).unwrap();
        assert_eq!(json, "\"150000.00\"");
    }

    #[test]
    fn test_deserialize_string_and_number() {
        let m: Money = serde_json::from_str("\"99.99\"").unwrap();
        assert_eq!(m, money("99.99"));

        let m: Money = serde_json::from_str("100").unwrap();
        assert_eq!(m, money("100.00"));

        let m: Money = serde_json::from_str("99.5").unwrap();
        assert_eq!(m, money("99.50"));
    }

    #[test]
    fn test_compute_net_no_discount() {
        assert_eq!(compute_net(money("1000000.00"), Decimal::ZERO), money("1000000.00"));
    }

    #[test]
    fn test_compute_net_ten_percent() {
        assert_eq!(
            compute_net(money("1000000.00"), dec("10")),
            money("900000.00")
        );
    }

    #[test]
    fn test_compute_net_full_discount() {
        assert_eq!(compute_net(money("1000000.00"), dec("100")), Money::ZERO);
    }

    #[test]
    fn test_compute_net_rounds_half_up() {
        // 10.01 * 0.875 = 8.75875 -> 8.76
        assert_eq!(compute_net(money("10.01"), dec("12.5")), money("8.76"));
    }

    #[test]
    fn test_compute_net_never_exceeds_gross() {
        let gross = money("333.33");
        for pct in 0..=100 {
            let net = compute_net(gross, Decimal::from(pct));
            assert!(net <= gross, "net {net} exceeds gross {gross} at {pct}%");
        }
    }

    #[test]
    fn test_compute_commission() {
        assert_eq!(
            compute_commission(money("1000000.00"), dec("15")),
            money("150000.00")
        );
        assert_eq!(
            compute_commission(money("900000.00"), dec("15")),
            money("135000.00")
        );
    }

    #[test]
    fn test_compute_commission_rounds_half_up() {
        // 33.33 * 15% = 4.9995 -> 5.00
        assert_eq!(compute_commission(money("33.33"), dec("15")), money("5.00"));
        // 33.30 * 15% = 4.995 -> 5.00
        assert_eq!(compute_commission(money("33.30"), dec("15")), money("5.00"));
    }

    #[test]
    fn test_compute_commission_zero_rate() {
        assert_eq!(compute_commission(money("500.00"), Decimal::ZERO), Money::ZERO);
    }

    #[test]
    fn test_to_decimal_bridges_floats() {
        assert_eq!(to_decimal(15.0), dec("15"));
        assert_eq!(to_decimal(12.5), dec("12.5"));
    }
}
