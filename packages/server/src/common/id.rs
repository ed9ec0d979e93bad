//! Typed primary keys.
//!
//! `Id<T>` is a UUIDv7 tagged with the entity it names, so a `ParentId` cannot
//! be bound where a `ChildId` belongs. Registration passes both to the claim
//! step, and adoption assignment takes both from the request body.
//!
//! ```rust
//! use adoptlink_core::common::{ChildId, ParentId};
//!
//! let parent_id = ParentId::new();
//! let child_id = ChildId::new();
//! assert_ne!(parent_id.into_uuid(), child_id.into_uuid());
//! ```
//!
//! ```compile_fail
//! use adoptlink_core::common::{ChildId, ParentId};
//!
//! let child_id: ChildId = ParentId::new();
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef, Postgres};
use sqlx::{Decode, Encode, Type};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use uuid::Uuid;

#[repr(transparent)]
pub struct Id<T>(Uuid, PhantomData<fn() -> T>);

impl<T> Id<T> {
    /// Fresh time-ordered key for a new row
    pub fn new() -> Self {
        Self(Uuid::now_v7(), PhantomData)
    }

    /// Tag a raw UUID, e.g. a token subject, with its entity
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, PhantomData)
    }

    pub fn into_uuid(self) -> Uuid {
        self.0
    }

    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self::from_uuid)
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Manual impls: derives would demand the same traits of the marker type.

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entity = std::any::type_name::<T>().rsplit("::").next().unwrap_or("?");
        write!(f, "{}Id({})", entity, self.0)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Uuid::deserialize(deserializer).map(Self::from_uuid)
    }
}

impl<T> Type<Postgres> for Id<T> {
    fn type_info() -> PgTypeInfo {
        <Uuid as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <Uuid as Type<Postgres>>::compatible(ty)
    }
}

impl<T> Encode<'_, Postgres> for Id<T> {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        <Uuid as Encode<Postgres>>::encode_by_ref(&self.0, buf)
    }
}

impl<T> Decode<'_, Postgres> for Id<T> {
    fn decode(value: PgValueRef<'_>) -> Result<Self, BoxDynError> {
        <Uuid as Decode<Postgres>>::decode(value).map(Self::from_uuid)
    }
}

#[cfg(test)]
mod tests {
    use crate::common::{ChildId, ParentId};

    #[test]
    fn test_new_ids_are_version_7() {
        let id = ChildId::new();
        assert_eq!(id.into_uuid().get_version_num(), 7);
        assert_ne!(id, ChildId::new());
    }

    #[test]
    fn test_path_segment_parses_and_displays() {
        let id = ParentId::new();
        assert_eq!(ParentId::parse(&id.to_string()).unwrap(), id);
        assert!(ParentId::parse("CARE-42").is_err());
    }

    #[test]
    fn test_serializes_as_bare_uuid() {
        let id = ChildId::new();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::Value::String(id.to_string()));
        assert_eq!(serde_json::from_value::<ChildId>(json).unwrap(), id);
    }

    #[test]
    fn test_debug_names_the_entity() {
        let debug = format!("{:?}", ParentId::new());
        assert!(debug.starts_with("ParentId("));
    }
}
