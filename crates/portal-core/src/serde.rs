// Module name shadows the `serde` crate; use `::serde` for the external crate.
use ::serde::{Deserialize, Deserializer, Serializer, de::Error as _};
use chrono::{DateTime, NaiveTime, SecondsFormat, Utc};

/// Serialize `DateTime<Utc>` as RFC 3339 with 3-digit fractional seconds.
pub fn to_rfc3339_ms<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Serialize a time of day as `HH:MM`.
pub fn to_hh_mm<S>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&t.format("%H:%M").to_string())
}

/// Serialize a list of times of day as `HH:MM` strings.
pub fn to_hh_mm_seq<S>(ts: &[NaiveTime], s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.collect_seq(ts.iter().map(|t| t.format("%H:%M").to_string()))
}

/// Deserialize a time of day from `HH:MM` or `HH:MM:SS`.
pub fn from_hh_mm<'de, D>(d: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(d)?;
    NaiveTime::parse_from_str(&raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
        .map_err(|_| D::Error::custom(format!("invalid time of day: {raw}")))
}
