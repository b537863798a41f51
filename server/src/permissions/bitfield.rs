//! Serde adapter carrying permission bitfields as decimal strings.
//!
//! JSON consumers parse numbers as f64, which silently drops bits above 52.
//! Every bitfield therefore crosses the API boundary as a decimal string,
//! both directions. Use with `#[serde(with = "crate::permissions::bitfield")]`.

use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(value)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse::<u64>().map_err(|_| {
        serde::de::Error::custom(format!(
            "expected a non-negative decimal string bitfield, got {raw:?}"
        ))
    })
}
