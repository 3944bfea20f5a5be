//! Tri-state values for nullable fields of update requests.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How an update request treats a nullable column.
///
/// On the wire an absent key is [`Patch::Keep`], an explicit `null` is
/// [`Patch::Clear`], and any other value is [`Patch::Set`]. Fields of this
/// type need `#[serde(default, skip_serializing_if = "Patch::is_keep")]` so
/// the absent case survives a round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Leave the stored value untouched.
    Keep,
    /// Store `null`.
    Clear,
    /// Store the given value.
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T> Patch<T> {
    /// Whether the field was absent from the request.
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// The value to store, if the request changes the field.
    ///
    /// `None` means the field is untouched; `Some(None)` means clear it.
    pub fn into_change(self) -> Option<Option<T>> {
        match self {
            Self::Keep => None,
            Self::Clear => Some(None),
            Self::Set(value) => Some(Some(value)),
        }
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Set(value) => value.serialize(serializer),
            Self::Keep | Self::Clear => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<T>::deserialize(deserializer)?.map_or(Self::Clear, Self::Set))
    }
}
