use scribe_types::{EntityKey, Error, Mutability, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::fmt;

/// The kinds of entity a document can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    /// A free-text description attached to a span of text.
    Description,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Description => "DESCRIPTION",
        }
    }

    /// Parses the raw type tag. Returns `None` for unknown tags.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "DESCRIPTION" => Some(Self::Description),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The payload of an entity, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityData {
    Description { description: String },
}

impl EntityData {
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Description { .. } => EntityKind::Description,
        }
    }

    /// The JSON payload stored under `data` in the raw form.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        match self {
            Self::Description { description } => json!({ "description": description }),
        }
    }

    /// Rebuilds typed data from a raw payload.
    pub fn from_payload(kind: EntityKind, payload: &Value) -> Result<Self> {
        match kind {
            EntityKind::Description => {
                let description = payload
                    .pointer("/description")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        Error::MalformedDocument(
                            "DESCRIPTION entity without a string `description`".to_string(),
                        )
                    })?;
                Ok(Self::Description {
                    description: description.to_string(),
                })
            }
        }
    }
}

/// A metadata record attached to one or more text ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    data: EntityData,
    mutability: Mutability,
}

impl Entity {
    #[must_use]
    pub fn new(data: EntityData, mutability: Mutability) -> Self {
        Self { data, mutability }
    }

    /// A mutable DESCRIPTION entity.
    #[must_use]
    pub fn new_description(description: impl Into<String>) -> Self {
        Self::new(
            EntityData::Description {
                description: description.into(),
            },
            Mutability::Mutable,
        )
    }

    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.data.kind()
    }

    #[must_use]
    pub fn data(&self) -> &EntityData {
        &self.data
    }

    #[must_use]
    pub fn mutability(&self) -> Mutability {
        self.mutability
    }

    /// The description text, for DESCRIPTION entities.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match &self.data {
            EntityData::Description { description } => Some(description),
        }
    }
}

/// Document-scoped table of entity records.
///
/// Keys are allocated in increasing order. Records are never removed: a
/// detached entity stays in the map even when no range references it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityMap {
    entries: BTreeMap<EntityKey, Entity>,
}

impl EntityMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new entity and returns its key.
    ///
    /// The key follows the highest key in use. When that is `u64::MAX` the
    /// lowest unused key from [`EntityKey::first`] up is taken instead.
    pub fn create(&mut self, entity: Entity) -> Result<EntityKey> {
        let key = match self.entries.last_key_value() {
            None => Some(EntityKey::first()),
            Some((last, _)) => last.next().or_else(|| self.lowest_free()),
        }
        .ok_or(Error::EntityKeysExhausted)?;
        self.entries.insert(key, entity);
        Ok(key)
    }

    /// Stores an entity under an explicit key (used when importing).
    pub fn insert(&mut self, key: EntityKey, entity: Entity) -> Option<Entity> {
        self.entries.insert(key, entity)
    }

    #[must_use]
    pub fn get(&self, key: EntityKey) -> Option<&Entity> {
        self.entries.get(&key)
    }

    #[must_use]
    pub fn contains(&self, key: EntityKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// The kind of the entity stored under `key`.
    #[must_use]
    pub fn kind_of(&self, key: EntityKey) -> Option<EntityKind> {
        self.get(key).map(Entity::kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lowest_free(&self) -> Option<EntityKey> {
        let mut candidate = EntityKey::first();
        for key in self.entries.range(EntityKey::first()..).map(|(k, _)| *k) {
            if key != candidate {
                return Some(candidate);
            }
            candidate = candidate.next()?;
        }
        Some(candidate)
    }
}
