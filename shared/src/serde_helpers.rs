//! Common serde helpers for the backend's loosely-typed JSON
//!
//! The OrderQ API serializes money and quantities sometimes as JSON
//! numbers and sometimes as strings ("12.50"), and boolean flags as
//! 0/1 integers. These helpers normalize both at the deserialization
//! boundary so the rest of the code only ever sees `f64` and `bool`.

use serde::{Deserialize, Deserializer};

/// Default helper for flags that are true when the field is absent
pub fn truthy() -> bool {
    true
}

/// Deserialize bool that treats null as false
pub fn bool_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(false))
}

/// Deserialize bool that treats null as true
pub fn bool_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(true))
}

/// Flexible monetary/quantity value: number, numeric string, or null.
///
/// Anything missing or non-numeric becomes 0.0, so downstream price
/// arithmetic never sees NaN.
pub mod flex_f64 {
    use super::*;

    pub fn deserialize<'de, D>(d: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        use std::fmt;

        struct FlexVisitor;

        impl<'de> Visitor<'de> for FlexVisitor {
            type Value = f64;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number, numeric string, or null")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
                Ok(if v.is_finite() { v } else { 0.0 })
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
                Ok(v as f64)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
                Ok(v as f64)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
                Ok(v.trim().parse::<f64>().ok().filter(|p| p.is_finite()).unwrap_or(0.0))
            }

            fn visit_none<E: de::Error>(self) -> Result<f64, E> {
                Ok(0.0)
            }

            fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
                Ok(0.0)
            }

            fn visit_some<D2>(self, d: D2) -> Result<f64, D2::Error>
            where
                D2: Deserializer<'de>,
            {
                d.deserialize_any(FlexVisitor)
            }
        }

        d.deserialize_any(FlexVisitor)
    }

    pub fn serialize<S>(value: &f64, s: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        s.serialize_f64(*value)
    }
}

/// Flag encoded as a bool, a 0/1 integer, or null (false).
pub mod flex_bool {
    use super::*;

    pub fn deserialize<'de, D>(d: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        use std::fmt;

        struct FlagVisitor;

        impl<'de> Visitor<'de> for FlagVisitor {
            type Value = bool;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a boolean, 0/1 integer, or null")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
                Ok(v)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
                Ok(v != 0)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
                Ok(v != 0)
            }

            fn visit_none<E: de::Error>(self) -> Result<bool, E> {
                Ok(false)
            }

            fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
                Ok(false)
            }

            fn visit_some<D2>(self, d: D2) -> Result<bool, D2::Error>
            where
                D2: Deserializer<'de>,
            {
                d.deserialize_any(FlagVisitor)
            }
        }

        d.deserialize_any(FlagVisitor)
    }

    pub fn serialize<S>(value: &bool, s: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        s.serialize_bool(*value)
    }
}
