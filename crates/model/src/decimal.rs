use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::errors::TrackerError;

const DECIMALS: u8 = 2;
/// Largest magnitude accepted from user input or storage. Anything beyond is not a weight.
pub const MAX_ABS: f64 = 100_000.0;

/// Fixed point number with two decimals. Used for body weight.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal(i64);

impl Decimal {
    pub fn int(value: i64) -> Decimal {
        Decimal(value * 10i64.pow(DECIMALS as u32))
    }

    pub fn zero() -> Decimal {
        Decimal::int(0)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn inner(&self) -> i64 {
        self.0
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 10i64.pow(DECIMALS as u32) as f64
    }

    /// Accepts both `85.5` and `85,5`. Surrounding whitespace is ignored.
    pub fn parse_locale(value: &str) -> Result<Decimal, TrackerError> {
        let normalized = value.trim().replace(',', ".");
        let val = normalized
            .parse::<f64>()
            .map_err(|_| TrackerError::InvalidDecimal(value.to_owned()))?;
        Decimal::checked_from_f64(val).ok_or_else(|| TrackerError::InvalidDecimal(value.to_owned()))
    }

    /// `None` for non finite values and magnitudes above [`MAX_ABS`].
    pub fn checked_from_f64(value: f64) -> Option<Decimal> {
        if value.is_finite() && value.abs() <= MAX_ABS {
            Some(Decimal::from(value))
        } else {
            None
        }
    }

    /// Lenient weight from a stored JSON value: numbers and locale strings, anything else is `None`.
    pub fn from_json(value: &Value) -> Option<Decimal> {
        match value {
            Value::Number(number) => number.as_f64().and_then(Decimal::checked_from_f64),
            Value::String(text) => Decimal::parse_locale(text).ok(),
            _ => None,
        }
    }
}

/// `deserialize_with` helper for optional weights: a bad value becomes `None` instead of failing
/// the whole struct.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Decimal::from_json(&value))
}

impl Debug for Decimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.to_f64())
    }
}

impl Display for Decimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.to_f64())
    }
}

impl From<f64> for Decimal {
    fn from(value: f64) -> Self {
        Decimal((value * 10f64.powi(DECIMALS as i32)).round() as i64)
    }
}

impl FromStr for Decimal {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::parse_locale(s)
    }
}

impl std::ops::Add for Decimal {
    type Output = Decimal;

    fn add(self, other: Decimal) -> Decimal {
        Decimal(self.0.saturating_add(other.0))
    }
}

impl std::ops::Sub for Decimal {
    type Output = Decimal;

    fn sub(self, other: Decimal) -> Decimal {
        Decimal(self.0.saturating_sub(other.0))
    }
}

impl Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Decimal::checked_from_f64(value).ok_or_else(|| {
                serde::de::Error::custom(format!("weight is out of range: {value}"))
            }),
            Raw::Text(text) => Decimal::parse_locale(&text).map_err(serde::de::Error::custom),
        }
    }
}
