use scribe_types::{BlockKey, BlockType, EntityKey, InlineStyle, Mutability, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Serializable document: blocks plus a flat entity map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    pub blocks: Vec<RawBlock>,
    #[serde(
        rename = "entityMap",
        default,
        deserialize_with = "entity_map_serde::deserialize"
    )]
    pub entity_map: BTreeMap<EntityKey, RawEntity>,
}

impl RawDocument {
    /// Parses a raw document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a raw document from an already-decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One block of the raw form. Missing optional fields default to an
/// unstyled block at depth 0 with no ranges and no data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    pub key: BlockKey,
    pub text: String,
    #[serde(rename = "type", default)]
    pub block_type: BlockType,
    #[serde(default)]
    pub depth: u8,
    #[serde(default)]
    pub inline_style_ranges: Vec<RawInlineStyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<RawEntityRange>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// A style applied to `[offset, offset + length)`, in UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInlineStyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: InlineStyle,
}

/// An entity reference over `[offset, offset + length)`, in UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntityRange {
    pub offset: usize,
    pub length: usize,
    pub key: EntityKey,
}

/// An entity record as stored in `entityMap`.
///
/// The type tag and payload stay untyped here; [`crate::import`] checks
/// them against the known entity kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntity {
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default)]
    pub mutability: Mutability,
    #[serde(default)]
    pub data: Value,
}

/// Reads `entityMap` keyed by decimal strings, rejecting keys that appear
/// more than once instead of letting the last one win.
mod entity_map_serde {
    use super::*;
    use serde::Deserializer;

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> std::result::Result<BTreeMap<EntityKey, RawEntity>, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{Error, MapAccess, Visitor};

        struct EntityMapVisitor;

        impl<'de> Visitor<'de> for EntityMapVisitor {
            type Value = BTreeMap<EntityKey, RawEntity>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map from entity keys to entities")
            }

            fn visit_map<M>(self, mut access: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut map = BTreeMap::new();
                while let Some((key, value)) = access.next_entry::<String, RawEntity>()? {
                    let entity_key: EntityKey = key.parse().map_err(M::Error::custom)?;
                    if map.insert(entity_key, value).is_some() {
                        return Err(M::Error::custom(format!(
                            "duplicate entity key {entity_key}"
                        )));
                    }
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(EntityMapVisitor)
    }
}
