use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::ClientError;

/// The content fields the site knows how to render and edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKey {
    Name,
    Title,
    Slogan,
    About,
    ProfileImage,
    Instagram,
    Linkedin,
    X,
    Email,
    Facebook,
    Youtube,
}

impl ContentKey {
    pub const ALL: [Self; 11] = [
        Self::Name,
        Self::Title,
        Self::Slogan,
        Self::About,
        Self::ProfileImage,
        Self::Instagram,
        Self::Linkedin,
        Self::X,
        Self::Email,
        Self::Facebook,
        Self::Youtube,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Title => "title",
            Self::Slogan => "slogan",
            Self::About => "about",
            Self::ProfileImage => "profile_image",
            Self::Instagram => "instagram",
            Self::Linkedin => "linkedin",
            Self::X => "x",
            Self::Email => "email",
            Self::Facebook => "facebook",
            Self::Youtube => "youtube",
        }
    }

    /// Form label for the field.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Title => "Title",
            Self::Slogan => "Slogan",
            Self::About => "About",
            Self::ProfileImage => "Profile Image",
            Self::Instagram => "Instagram",
            Self::Linkedin => "LinkedIn",
            Self::X => "X (Twitter)",
            Self::Email => "Email",
            Self::Facebook => "Facebook",
            Self::Youtube => "YouTube",
        }
    }

    /// Whether the dashboard shows and saves this field. The remaining keys
    /// are managed elsewhere and hidden from the content form.
    #[must_use]
    pub fn is_dashboard_editable(self) -> bool {
        !matches!(self, Self::Email | Self::Facebook | Self::Youtube | Self::X)
    }

    #[must_use]
    pub fn is_social_link(self) -> bool {
        matches!(
            self,
            Self::Instagram | Self::Linkedin | Self::X | Self::Facebook | Self::Youtube
        )
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKey {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ClientError::InvalidInput(format!("Unknown content key '{s}'")))
    }
}

/// The site's editable copy, keyed by [`ContentKey`]. Keys that were never
/// set read as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFields {
    values: BTreeMap<ContentKey, String>,
}

impl ContentFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the backend's loose JSON object. Unknown keys are dropped
    /// with a warning; `null` values count as absent.
    #[must_use]
    pub fn from_raw(raw: Map<String, Value>) -> Self {
        let mut values = BTreeMap::new();
        for (key, value) in raw {
            let Ok(content_key) = key.parse::<ContentKey>() else {
                tracing::warn!(key = %key, "ignoring unknown content key from backend");
                continue;
            };
            let text = match value {
                Value::Null => continue,
                Value::String(text) => text,
                other => {
                    tracing::warn!(key = %key, "content value is not a string, storing its JSON form");
                    other.to_string()
                }
            };
            values.insert(content_key, text);
        }
        Self { values }
    }

    #[must_use]
    pub fn get(&self, key: ContentKey) -> &str {
        self.values.get(&key).map_or("", String::as_str)
    }

    pub fn set(&mut self, key: ContentKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    #[must_use]
    pub fn contains(&self, key: ContentKey) -> bool {
        self.values.contains_key(&key)
    }

    /// Present, non-blank value for `key`.
    #[must_use]
    pub fn non_empty(&self, key: ContentKey) -> Option<&str> {
        self.values
            .get(&key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContentKey, &str)> {
        self.values.iter().map(|(key, value)| (*key, value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.get(ContentKey::Name)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.get(ContentKey::Title)
    }

    #[must_use]
    pub fn slogan(&self) -> &str {
        self.get(ContentKey::Slogan)
    }

    #[must_use]
    pub fn about(&self) -> &str {
        self.get(ContentKey::About)
    }

    #[must_use]
    pub fn profile_image(&self) -> &str {
        self.get(ContentKey::ProfileImage)
    }

    #[must_use]
    pub fn instagram(&self) -> &str {
        self.get(ContentKey::Instagram)
    }

    #[must_use]
    pub fn linkedin(&self) -> &str {
        self.get(ContentKey::Linkedin)
    }

    #[must_use]
    pub fn x(&self) -> &str {
        self.get(ContentKey::X)
    }

    #[must_use]
    pub fn email(&self) -> &str {
        self.get(ContentKey::Email)
    }

    #[must_use]
    pub fn facebook(&self) -> &str {
        self.get(ContentKey::Facebook)
    }

    #[must_use]
    pub fn youtube(&self) -> &str {
        self.get(ContentKey::Youtube)
    }
}

impl FromIterator<(ContentKey, String)> for ContentFields {
    fn from_iter<I: IntoIterator<Item = (ContentKey, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Serialize for ContentFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ContentFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Self::from_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_and_null_keys_are_dropped() {
        let fields: ContentFields = serde_json::from_value(json!({
            "name": "Ismail",
            "about": null,
            "tiktok": "https://tiktok.com/@someone"
        }))
        .unwrap();

        assert_eq!(fields.len(), 1);
        assert_eq!(fields.name(), "Ismail");
        assert_eq!(fields.about(), "");
        assert!(!fields.contains(ContentKey::About));
    }

    #[test]
    fn parsing_unknown_key_is_rejected() {
        assert!(matches!(
            "tiktok".parse::<ContentKey>(),
            Err(ClientError::InvalidInput(_))
        ));
        assert_eq!(
            "profile_image".parse::<ContentKey>().unwrap(),
            ContentKey::ProfileImage
        );
    }

    #[test]
    fn serializes_with_wire_key_names() {
        let mut fields = ContentFields::new();
        fields.set(ContentKey::ProfileImage, "data:image/png;base64,AA");
        assert_eq!(
            serde_json::to_value(&fields).unwrap(),
            json!({ "profile_image": "data:image/png;base64,AA" })
        );
    }

    #[test]
    fn hidden_keys_are_not_dashboard_editable() {
        let editable: Vec<_> = ContentKey::ALL
            .into_iter()
            .filter(|key| key.is_dashboard_editable())
            .collect();
        assert_eq!(
            editable,
            vec![
                ContentKey::Name,
                ContentKey::Title,
                ContentKey::Slogan,
                ContentKey::About,
                ContentKey::ProfileImage,
                ContentKey::Instagram,
                ContentKey::Linkedin,
            ]
        );
    }
}
