use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::ContentKey;

/// Server-assigned identifier shared by every collection.
pub type ResourceId = i64;

/// The response envelope every backend endpoint answers with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Any other top-level field. The login endpoint puts `token` here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiEnvelope {
    /// A successful envelope carrying `data`.
    #[must_use]
    pub fn ok(data: Option<Value>) -> Self {
        Self {
            success: true,
            data,
            message: None,
            extra: Map::new(),
        }
    }

    /// A rejected envelope carrying an optional server message.
    pub fn rejected(message: impl Into<Option<String>>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_extra(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub secret: String,
}

/// Result of a login attempt. Login never fails with an error past the
/// client boundary; every failure is folded into `Failure`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Failure { message: String },
}

impl LoginOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentUpdate {
    pub key: ContentKey,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: ResourceId,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub level: Option<u8>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// The create form for a skill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillDraft {
    pub name: String,
    pub level: Option<u8>,
    pub description: String,
    pub icon: Option<String>,
}

/// Fields to change on a skill. `None` leaves a field untouched; for the
/// nullable fields `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Option<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ResourceId,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub video_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
}

impl Project {
    /// Embeddable player URL for `video_url`, if there is one.
    #[must_use]
    pub fn embed_url(&self) -> Option<String> {
        if self.video_url.trim().is_empty() {
            None
        } else {
            Some(crate::embed_url(&self.video_url))
        }
    }

    /// Vertical short-form video (YouTube Shorts).
    #[must_use]
    pub fn is_short(&self) -> bool {
        crate::embed::is_short(&self.video_url)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectDraft {
    pub title: String,
    pub image: String,
    pub video_url: String,
    pub description: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A message left through the public contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: ResourceId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "flag_from_bool_or_int")]
    pub read_status: bool,
    #[serde(deserialize_with = "timestamp_from_str")]
    pub created_at: DateTime<Utc>,
}

/// What the public contact form submits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// SQL-backed servers send flags as 0/1.
fn flag_from_bool_or_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(flag)) => Ok(flag),
        Some(Value::Number(number)) => Ok(number.as_i64().is_some_and(|n| n != 0)),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a boolean flag, got {other}"
        ))),
    }
}

fn timestamp_from_str<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("unrecognized timestamp format: {raw}"))
    })
}

/// Accepts RFC 3339 as well as the `YYYY-MM-DD HH:MM:SS` form SQL databases
/// emit, the latter interpreted as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn message_accepts_integer_flags_and_sql_timestamps() {
        let message: Message = serde_json::from_value(json!({
            "id": 7,
            "name": "Sam",
            "email": "sam@example.com",
            "message": "Hello",
            "read_status": 1,
            "created_at": "2024-03-05 10:20:30"
        }))
        .unwrap();

        assert!(message.read_status);
        assert_eq!(
            message.created_at,
            Utc.with_ymd_and_hms(2024, 3, 5, 10, 20, 30).unwrap()
        );
    }

    #[test]
    fn skill_tolerates_null_text_fields() {
        let skill: Skill = serde_json::from_value(json!({
            "id": 1,
            "name": "Color Grading",
            "level": null,
            "description": null,
            "icon": null
        }))
        .unwrap();

        assert_eq!(skill.description, "");
        assert_eq!(skill.level, None);
    }

    #[test]
    fn skill_patch_serializes_only_present_fields() {
        let patch = SkillPatch {
            level: Some(None),
            description: Some("Cinematic looks".to_string()),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({ "level": null, "description": "Cinematic looks" })
        );
    }
}
