use crate::error::IrrigationError;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Sensor depth label, in inches below the surface.
///
/// Host payloads are inconsistent about whether depths arrive as `16` or `"16"`;
/// both deserialize into the same numeric identifier so lookups and depth
/// comparisons never depend on the wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoneId(u32);

impl ZoneId {
    pub const fn new(depth_inches: u32) -> Self {
        Self(depth_inches)
    }

    pub fn depth(&self) -> u32 {
        self.0
    }
}

impl FromStr for ZoneId {
    type Err = IrrigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(ZoneId).map_err(|_| {
            IrrigationError::InvalidZoneOrdering(format!(
                "zone label '{}' is not a numeric depth",
                s
            ))
        })
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ZoneId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

struct ZoneIdVisitor;

impl<'de> Visitor<'de> for ZoneIdVisitor {
    type Value = ZoneId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a zone depth as an integer or numeric string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ZoneId, E> {
        u32::try_from(v)
            .map(ZoneId)
            .map_err(|_| E::custom(format!("zone depth {} out of range", v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ZoneId, E> {
        u32::try_from(v)
            .map(ZoneId)
            .map_err(|_| E::custom(format!("zone depth {} out of range", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ZoneId, E> {
        v.parse::<ZoneId>().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for ZoneId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ZoneIdVisitor)
    }
}
