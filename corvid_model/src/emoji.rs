//! Types related to emoji, as used in reactions.

use crate::serde::*;
use crate::types::*;
use std::fmt;

/// A built-in emoji, identified by its unicode representation.
#[derive(Serialize, Deserialize, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[serde(transparent)]
pub struct UnicodeEmoji(pub String);
impl fmt::Display for UnicodeEmoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A reference to a custom emoji.
///
/// The name is missing if the emoji was deleted.
#[derive(Serialize, Deserialize, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct CustomEmoji {
    pub id: EmojiId,
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "utils::if_false")]
    pub animated: bool,
}
into_id!(CustomEmoji, EmojiId, id);

/// An emoji, as sent in reaction events.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub enum Emoji {
    Unicode(UnicodeEmoji),
    Custom(CustomEmoji),
}
impl Emoji {
    /// Creates a reference to a custom emoji.
    pub fn custom(id: EmojiId, name: Option<String>, animated: bool) -> Emoji {
        Emoji::Custom(CustomEmoji { id, name, animated })
    }

    /// Returns the ID of this emoji, if it is a custom emoji.
    pub fn id(&self) -> Option<EmojiId> {
        match self {
            Emoji::Custom(e) => Some(e.id),
            Emoji::Unicode(_) => None,
        }
    }

    /// Returns the name of this emoji. For built-in emoji, this is the emoji itself.
    pub fn name(&self) -> Option<&str> {
        match self {
            Emoji::Custom(e) => e.name.as_deref(),
            Emoji::Unicode(e) => Some(&e.0),
        }
    }

    /// Returns the name of this emoji as used in the reaction endpoints.
    pub fn url_name(&self) -> String {
        match self {
            Emoji::Custom(e) => format!("{}:{}", e.name.as_deref().unwrap_or("_"), e.id),
            Emoji::Unicode(e) => e.0.clone(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawEmoji {
    id: Option<EmojiId>,
    name: Option<String>,
    #[serde(default, skip_serializing_if = "utils::if_false")]
    animated: bool,
}

impl Serialize for Emoji {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = match self {
            Emoji::Unicode(e) => RawEmoji { id: None, name: Some(e.0.clone()), animated: false },
            Emoji::Custom(e) => RawEmoji { id: Some(e.id), name: e.name.clone(), animated: e.animated },
        };
        raw.serialize(serializer)
    }
}
impl <'de> Deserialize<'de> for Emoji {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEmoji::deserialize(deserializer)?;
        match raw.id {
            Some(id) => Ok(Emoji::custom(id, raw.name, raw.animated)),
            None => match raw.name {
                Some(name) => Ok(Emoji::Unicode(UnicodeEmoji(name))),
                None => Err(D::Error::custom("emoji has neither an id nor a name")),
            },
        }
    }
}
