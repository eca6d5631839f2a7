//! Agent profile records as seen by the discovery engine.
//!
//! Agent documents come from a schemaless store, so every field is read
//! leniently: missing or `null` values default, numbers stand in for strings
//! (zipcodes are often stored as integers), and a lone string stands in for a
//! one-element list. Normalization happens once, at the boundary, so the
//! filter engine never has to care.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{ScoutError, ScoutResult};

/// Document id of an agent profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fetched agent profile. Read-only from the engine's perspective.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    #[serde(default)]
    pub id: AgentId,

    #[serde(default, deserialize_with = "lenient_string")]
    pub full_name: String,

    /// Legacy single-value field kept alongside `specializations`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub specialization: String,

    #[serde(default, deserialize_with = "lenient_string_list")]
    pub specializations: Vec<String>,

    #[serde(default, deserialize_with = "lenient_string_list")]
    pub states: Vec<String>,

    #[serde(default, deserialize_with = "lenient_string_list")]
    pub counties: Vec<String>,

    #[serde(default, deserialize_with = "lenient_string_list")]
    pub zipcodes: Vec<String>,

    /// Any other profile fields, carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl AgentRecord {
    /// Normalize a raw store document into a record.
    ///
    /// `id` is the document id and always wins over any `id` field inside
    /// the document body. The name may be stored as `full_name` or
    /// `fullName`; the first non-blank one is kept. Only a body that is not
    /// an object is an error.
    pub fn from_document(id: impl Into<String>, document: Value) -> ScoutResult<Self> {
        let id = id.into();
        let Value::Object(mut body) = document else {
            return Err(ScoutError::MalformedDocument {
                id,
                reason: "document body is not an object".to_string(),
            });
        };
        body.remove("id");
        let name = [body.remove("full_name"), body.remove("fullName")]
            .into_iter()
            .flatten()
            .find(|v| !is_blank(v));
        if let Some(name) = name {
            body.insert("full_name".to_string(), name);
        }
        let mut record: AgentRecord = serde_json::from_value(Value::Object(body)).map_err(|e| {
            ScoutError::MalformedDocument { id: id.clone(), reason: e.to_string() }
        })?;
        record.id = AgentId(id);
        Ok(record)
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_to_string).unwrap_or_default())
}

fn lenient_string_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.into_iter().filter_map(scalar_to_string).collect(),
        Some(other) => scalar_to_string(other)
            .filter(|s| !s.is_empty())
            .into_iter()
            .collect(),
        None => Vec::new(),
    })
}
