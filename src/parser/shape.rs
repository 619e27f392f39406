//! Roadmap layout detection, decided once per response

use crate::error::ParserError;
use serde_json::{Map, Value};

/// The layouts a model has been seen to return under `"roadmap"`
#[derive(Debug, Clone, PartialEq)]
pub enum RoadmapShape {
    /// Month entries, each carrying a `weeks` list
    Nested(Vec<Value>),
    /// Week-sized units without week nesting; regrouped into months
    Flat(Vec<Value>),
    /// Year entries, each carrying a `months` list
    Yearly(Vec<Value>),
    /// `{"Month 1": {"week1": {"tasks": [...]}}}`
    Keyed(Map<String, Value>),
}

impl RoadmapShape {
    /// A missing or null roadmap is an empty nested one
    pub fn detect(roadmap: Option<&Value>) -> Result<Self, ParserError> {
        match roadmap {
            None | Some(Value::Null) => Ok(RoadmapShape::Nested(Vec::new())),
            Some(Value::Array(entries)) => Ok(Self::from_entries(entries.clone())),
            Some(Value::Object(map)) => Ok(RoadmapShape::Keyed(map.clone())),
            Some(other) => Err(ParserError::InvalidRoadmap(json_kind(other))),
        }
    }

    fn from_entries(entries: Vec<Value>) -> Self {
        if entries.iter().all(|e| has_key(e, "weeks")) {
            RoadmapShape::Nested(entries)
        } else if entries.iter().all(|e| has_key(e, "months")) {
            RoadmapShape::Yearly(entries)
        } else {
            RoadmapShape::Flat(entries)
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RoadmapShape::Nested(_) => "nested",
            RoadmapShape::Flat(_) => "flat",
            RoadmapShape::Yearly(_) => "yearly",
            RoadmapShape::Keyed(_) => "keyed",
        }
    }
}

fn has_key(value: &Value, key: &str) -> bool {
    value.as_object().is_some_and(|m| m.contains_key(key))
}

pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
