//! Types related to message embeds.
//!
//! Embeds received from Discord contain proxied copies of their media, hosted by Discord. These
//! are read-only, and are left out when an embed is serialized to be sent back.

use chrono::{DateTime, Utc};
use crate::serde::*;
use crate::types::Color;
use derive_setters::*;

/// A piece of media referenced by an embed.
#[derive(Serialize, Deserialize, Default, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct EmbedResource {
    /// The location this resource was originally sourced from.
    pub url: String,
    /// Discord's proxied copy of this resource. Never serialized.
    #[serde(default, skip_serializing)]
    pub proxy_url: Option<String>,
}
impl EmbedResource {
    /// Creates a new resource from its original location.
    pub fn new(url: impl Into<String>) -> Self {
        EmbedResource { url: url.into(), proxy_url: None }
    }
}

/// An image, thumbnail or video in an embed.
#[derive(Serialize, Deserialize, Default, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct EmbedImage {
    #[serde(flatten)]
    pub resource: EmbedResource,
    #[serde(default, skip_serializing)]
    pub height: Option<u32>,
    #[serde(default, skip_serializing)]
    pub width: Option<u32>,
}
impl EmbedImage {
    /// Creates a new image from its original location.
    pub fn new(url: impl Into<String>) -> Self {
        EmbedImage { resource: EmbedResource::new(url), ..Default::default() }
    }
}

/// The footer of an embed.
#[derive(Serialize, Deserialize, Default, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct EmbedFooter {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing)]
    pub proxy_icon_url: Option<String>,
}

/// The author of an embed.
#[derive(Serialize, Deserialize, Default, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing)]
    pub proxy_icon_url: Option<String>,
}

/// The provider of an embed, such as the site a link embed was generated for.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Default, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct EmbedProvider {
    pub name: Option<String>,
    pub url: Option<String>,
}

/// A field in an embed.
#[derive(Serialize, Deserialize, Default, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "utils::if_false")]
    pub inline: bool,
}

/// A rich embed attached to a message.
///
/// An embed with no fields is represented the same way whether it never had fields or they were
/// all removed.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Default, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[derive(Setters)]
#[setters(strip_option)]
#[non_exhaustive]
pub struct Embed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub color: Option<Color>,
    pub footer: Option<EmbedFooter>,
    pub image: Option<EmbedImage>,
    pub thumbnail: Option<EmbedImage>,
    pub video: Option<EmbedImage>,
    pub provider: Option<EmbedProvider>,
    pub author: Option<EmbedAuthor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}
impl Embed {
    /// Adds a field to this embed.
    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) {
        self.fields.push(EmbedField { name: name.into(), value: value.into(), inline });
    }

    /// Removes every field from this embed.
    pub fn clear_fields(&mut self) {
        self.fields.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn proxies_are_dropped() {
        let embed: Embed = serde_json::from_value(json!({
            "title": "hello",
            "image": {
                "url": "https://example.com/a.png",
                "proxy_url": "https://media.discordapp.net/a.png",
                "height": 10,
                "width": 20,
            },
            "footer": {
                "text": "foot",
                "icon_url": "https://example.com/i.png",
                "proxy_icon_url": "https://media.discordapp.net/i.png",
            },
        })).unwrap();
        let image = embed.image.as_ref().unwrap();
        assert_eq!(image.resource.proxy_url.as_deref(), Some("https://media.discordapp.net/a.png"));
        assert_eq!(image.height, Some(10));

        assert_eq!(serde_json::to_value(&embed).unwrap(), json!({
            "title": "hello",
            "image": { "url": "https://example.com/a.png" },
            "footer": { "text": "foot", "icon_url": "https://example.com/i.png" },
        }));
    }

    #[test]
    fn cleared_fields_match_unset_fields() {
        let mut embed = Embed::default().title("hello".to_string()).color(Color(0xFF0000));
        embed.add_field("a", "b", true);
        embed.clear_fields();
        assert_eq!(embed, Embed::default().title("hello".to_string()).color(Color(0xFF0000)));
        assert_eq!(serde_json::to_value(&embed).unwrap(), json!({
            "title": "hello",
            "color": 0xFF0000,
        }));

        let mut embed = Embed::default();
        embed.add_field("a", "b", true);
        embed.clear_fields();
        assert_eq!(embed, Embed::default());
        assert_eq!(serde_json::to_value(&embed).unwrap(), json!({}));
    }
}
