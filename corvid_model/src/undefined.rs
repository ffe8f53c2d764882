//! A three-state type for fields that update events may leave out.

use crate::serde::*;

/// A field of an update payload.
///
/// Discord omits fields that did not change from many update events. This is distinct from
/// a field that was explicitly set to `null`, and the two must not be confused: a message update
/// without `content` does not mean that the content was removed.
///
/// When used in a struct, the field should be marked with
/// `#[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]`.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub enum Undefinable<T> {
    /// The field was not present in the payload.
    Unchanged,
    /// The field was present, and explicitly set to `null`.
    Null,
    /// The field was present with a value.
    Value(T),
}
impl <T> Undefinable<T> {
    /// Returns `true` if this field was left out of the payload.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Undefinable::Unchanged)
    }

    /// Returns `true` if this field was explicitly `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Undefinable::Null)
    }

    /// Returns `true` if this field contains a value.
    pub fn is_value(&self) -> bool {
        matches!(self, Undefinable::Value(_))
    }

    /// Borrows the contents of this field.
    pub fn as_ref(&self) -> Undefinable<&T> {
        match self {
            Undefinable::Unchanged => Undefinable::Unchanged,
            Undefinable::Null => Undefinable::Null,
            Undefinable::Value(v) => Undefinable::Value(v),
        }
    }

    /// Maps the value contained in this field, if any.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Undefinable<U> {
        match self {
            Undefinable::Unchanged => Undefinable::Unchanged,
            Undefinable::Null => Undefinable::Null,
            Undefinable::Value(v) => Undefinable::Value(f(v)),
        }
    }

    /// Returns the value of this field, treating both `null` and a missing field as `None`.
    pub fn value(self) -> Option<T> {
        match self {
            Undefinable::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Converts this field into nested options. The outer option is `None` if the field was
    /// unchanged, and the inner option is `None` if the field was `null`.
    pub fn into_update(self) -> Option<Option<T>> {
        match self {
            Undefinable::Unchanged => None,
            Undefinable::Null => Some(None),
            Undefinable::Value(v) => Some(Some(v)),
        }
    }

    /// Applies this update to a stored value.
    pub fn apply_to(self, target: &mut Option<T>) {
        if let Some(update) = self.into_update() {
            *target = update;
        }
    }
}
impl <T> Default for Undefinable<T> {
    fn default() -> Self {
        Undefinable::Unchanged
    }
}
impl <T> From<Option<Option<T>>> for Undefinable<T> {
    fn from(update: Option<Option<T>>) -> Self {
        match update {
            None => Undefinable::Unchanged,
            Some(None) => Undefinable::Null,
            Some(Some(v)) => Undefinable::Value(v),
        }
    }
}

impl <T: Serialize> Serialize for Undefinable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Undefinable::Value(v) => serializer.serialize_some(v),
            _ => serializer.serialize_none(),
        }
    }
}
impl <'de, T: Deserialize<'de>> Deserialize<'de> for Undefinable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Undefinable::Value(v),
            None => Undefinable::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
    struct Update {
        id: u32,
        #[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]
        content: Undefinable<String>,
    }

    #[test]
    fn three_states_survive_decoding() {
        let missing: Update = serde_json::from_str(r#"{"id":1}"#).unwrap();
        let null: Update = serde_json::from_str(r#"{"id":1,"content":null}"#).unwrap();
        let value: Update = serde_json::from_str(r#"{"id":1,"content":"hi"}"#).unwrap();

        assert_eq!(missing.content, Undefinable::Unchanged);
        assert_eq!(null.content, Undefinable::Null);
        assert_eq!(value.content, Undefinable::Value("hi".to_string()));
        assert_ne!(missing, null);
    }

    #[test]
    fn unchanged_fields_are_skipped() {
        let update = Update { id: 1, content: Undefinable::Unchanged };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"id":1}"#);
        let update = Update { id: 1, content: Undefinable::Null };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"id":1,"content":null}"#);
    }

    #[test]
    fn applying_updates() {
        let mut stored = Some(3);
        Undefinable::Unchanged.apply_to(&mut stored);
        assert_eq!(stored, Some(3));
        Undefinable::Null.apply_to(&mut stored);
        assert_eq!(stored, None);
        Undefinable::Value(5).apply_to(&mut stored);
        assert_eq!(stored, Some(5));
    }
}
