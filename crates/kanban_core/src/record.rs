//! Wire records for the board document.
//!
//! # Responsibility
//! - Define the field names of the persisted board document.
//! - Coerce loosely typed incoming scalars into the shapes the model uses.
//!
//! # Invariants
//! - Missing or `null` fields decode to their empty/default value.
//! - A `null` top-level list decodes as an empty list.
//! - Serialized records mirror their load-time shape.

use crate::model::id::RecordId;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Whole board document as read from and written to the data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardDocument {
    #[serde(default, deserialize_with = "nullable_list")]
    pub users: Vec<UserRecord>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub clients: Vec<ClientRecord>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub projects: Vec<ProjectRecord>,
    /// Ids of the projects currently in focus.
    #[serde(
        rename = "activeProjects",
        default,
        deserialize_with = "nullable_list"
    )]
    pub active_projects: Vec<RecordId>,
    /// Board-level sticker palette.
    #[serde(default, deserialize_with = "nullable_list")]
    pub stickers: Vec<StickerRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    /// Alternate external identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<RecordId>,
    #[serde(default, deserialize_with = "loose_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub email: Option<String>,
    #[serde(rename = "apiToken", default, deserialize_with = "loose_string")]
    pub api_token: Option<String>,
    /// Admission flag consulted by bulk user import only.
    #[serde(default, deserialize_with = "loose_bool", skip_serializing)]
    pub active: bool,
    /// Exclusion flag consulted by bulk user import only.
    #[serde(default, deserialize_with = "loose_bool", skip_serializing)]
    pub inactive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: RecordId,
    #[serde(default, deserialize_with = "loose_string")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: RecordId,
    #[serde(default, deserialize_with = "loose_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "loose_bool")]
    pub hidden: bool,
    #[serde(rename = "clientID", default)]
    pub client_id: Option<RecordId>,
    /// Legacy client reference, consulted when `clientID` is blank.
    #[serde(default, skip_serializing)]
    pub cid: Option<RecordId>,
    #[serde(rename = "clientName", default, deserialize_with = "loose_string")]
    pub client_name: Option<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub stickers: Vec<StickerRecord>,
    /// Per-project user associations.
    #[serde(
        default,
        deserialize_with = "nullable_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub users: Vec<RecordId>,
}

impl ProjectRecord {
    /// Returns the declared client id, preferring `clientID` over `cid`.
    ///
    /// Blank ids (`0`, `""`, `"0"`) count as undeclared.
    pub fn declared_client_id(&self) -> Option<&RecordId> {
        self.client_id
            .as_ref()
            .filter(|id| !id.is_blank())
            .or_else(|| self.cid.as_ref().filter(|id| !id.is_blank()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerRecord {
    #[serde(default, deserialize_with = "loose_string")]
    pub label: Option<String>,
    #[serde(rename = "backgroundColor", default, deserialize_with = "loose_string")]
    pub background_color: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub icon: Option<String>,
    /// Style tag.
    #[serde(default, deserialize_with = "loose_string")]
    pub class: Option<String>,
    #[serde(default, deserialize_with = "loose_position")]
    pub position: PositionRecord,
}

/// Integer sticker coordinates, written as `{x, y}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub x: i64,
    pub y: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseScalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl LooseScalar {
    fn into_text(self) -> String {
        match self {
            Self::Bool(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Text(value) => value,
        }
    }

    fn truthy(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Int(value) => *value != 0,
            Self::Float(value) => *value != 0.0,
            Self::Text(value) => {
                let trimmed = value.trim();
                !(trimmed.is_empty() || trimmed == "0" || trimmed.eq_ignore_ascii_case("false"))
            }
        }
    }

    fn to_int(&self) -> i64 {
        match self {
            Self::Bool(value) => i64::from(*value),
            Self::Int(value) => *value,
            Self::Float(value) => value.trunc() as i64,
            Self::Text(value) => leading_int(value),
        }
    }
}

/// Parses the leading integer of `value`, `0` when there is none.
fn leading_int(value: &str) -> i64 {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude = digits[..end].parse::<i64>().unwrap_or(0);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PositionInput {
    Named { x: LooseScalar, y: LooseScalar },
    Pair(Vec<LooseScalar>),
    Other(IgnoredAny),
}

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<LooseScalar>::deserialize(deserializer)?.map(LooseScalar::into_text))
}

fn loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<LooseScalar>::deserialize(deserializer)?
        .map(|value| value.truthy())
        .unwrap_or(false))
}

fn loose_position<'de, D>(deserializer: D) -> Result<PositionRecord, D::Error>
where
    D: Deserializer<'de>,
{
    let position = match Option::<PositionInput>::deserialize(deserializer)? {
        Some(PositionInput::Named { x, y }) => PositionRecord {
            x: x.to_int(),
            y: y.to_int(),
        },
        Some(PositionInput::Pair(values)) => PositionRecord {
            x: values.first().map(LooseScalar::to_int).unwrap_or(0),
            y: values.get(1).map(LooseScalar::to_int).unwrap_or(0),
        },
        Some(PositionInput::Other(_)) | None => PositionRecord::default(),
    };
    Ok(position)
}
