//! Evaluation records as delivered by the evaluation pipeline.
//!
//! The pipeline emits loosely typed JSON (numbers sometimes arrive as
//! strings, identifiers sometimes as integers). Everything is converted once,
//! here, into [`EvaluationRecord`] so the rendering layer never inspects raw
//! values.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, SceneError};
use crate::view::SharedMetadata;

/// Reference plausibility label for a scene.
///
/// `Integer(0)` is the only implausible value; every other integer and every
/// value that does not parse as an integer is treated as plausible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GroundTruth {
    Integer(i64),
    Unparsed(String),
}

impl GroundTruth {
    /// Parse a textual label the same way the ingestion layer does.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(v) => GroundTruth::Integer(v),
            Err(_) => GroundTruth::Unparsed(raw.to_string()),
        }
    }

    pub fn is_implausible(&self) -> bool {
        matches!(self, GroundTruth::Integer(0))
    }
}

impl fmt::Display for GroundTruth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroundTruth::Integer(v) => write!(f, "{v}"),
            GroundTruth::Unparsed(raw) => f.write_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for GroundTruth {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        Ok(GroundTruth::from_value(Value::deserialize(d)?))
    }
}

impl GroundTruth {
    /// Never fails: anything that is not an integer label is kept as text.
    fn from_value(value: Value) -> Self {
        match value {
            Value::Null => GroundTruth::Unparsed("null".to_string()),
            Value::Number(n) => match n.as_i64() {
                Some(v) => GroundTruth::Integer(v),
                None => match n.as_f64().and_then(whole_number) {
                    Some(v) => GroundTruth::Integer(v),
                    None => GroundTruth::Unparsed(n.to_string()),
                },
            },
            Value::String(s) => GroundTruth::parse(&s),
            other => GroundTruth::Unparsed(other.to_string()),
        }
    }
}

/// One scene's evaluation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    #[serde(deserialize_with = "de_identifier")]
    pub block: String,
    #[serde(deserialize_with = "de_identifier")]
    pub test: String,
    pub ground_truth: GroundTruth,
    #[serde(deserialize_with = "de_score")]
    pub plausibility: f64,
    #[serde(deserialize_with = "de_count")]
    pub complexity: u32,
    #[serde(deserialize_with = "de_flag")]
    pub occluder: bool,
    #[serde(deserialize_with = "de_count")]
    pub num_objects: u32,
}

impl EvaluationRecord {
    pub fn shared_metadata(&self) -> SharedMetadata {
        SharedMetadata {
            complexity: self.complexity,
            occluder: self.occluder,
            num_objects: self.num_objects,
        }
    }
}

/// A non-empty, ordered set of records. Scene numbers are 1-based positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EvaluationSet {
    records: Vec<EvaluationRecord>,
}

impl EvaluationSet {
    pub fn new(records: Vec<EvaluationRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(SceneError::EmptyEvaluationSet);
        }
        let set = Self { records };
        let conflicts = set.metadata_conflicts();
        if !conflicts.is_empty() {
            tracing::warn!(
                "scene metadata differs from scene 1 in scenes {:?}; showing scene 1 values",
                conflicts
            );
        }
        Ok(set)
    }

    /// Accepts either a bare array of records or `{ "records": [...] }`.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(strip_bom(text))?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: Value) -> Result<Self> {
        let records = match value {
            Value::Array(items) => {
                serde_json::from_value::<Vec<EvaluationRecord>>(Value::Array(items))?
            }
            Value::Object(mut map) => match map.remove("records") {
                Some(inner) => serde_json::from_value::<Vec<EvaluationRecord>>(inner)?,
                None => {
                    return Err(SceneError::Records(de::Error::custom(
                        "expected an array of records or an object with a \"records\" key",
                    )));
                }
            },
            _ => {
                return Err(SceneError::Records(de::Error::custom(
                    "expected an array of records or an object with a \"records\" key",
                )));
            }
        };
        Self::new(records)
    }

    pub fn records(&self) -> &[EvaluationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    // Never empty; present for clippy's len_without_is_empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Metadata of the first record, representative for the whole set.
    pub fn shared_metadata(&self) -> SharedMetadata {
        self.records[0].shared_metadata()
    }

    /// 1-based scene numbers whose metadata differs from scene 1.
    pub fn metadata_conflicts(&self) -> Vec<usize> {
        let first = self.shared_metadata();
        self.records
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, r)| r.shared_metadata() != first)
            .map(|(idx, _)| idx + 1)
            .collect()
    }
}

/// Load an evaluation set from a JSON file on disk.
pub fn load_evaluation_set(path: impl AsRef<Path>) -> Result<EvaluationSet> {
    let path = path.as_ref();
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(SceneError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    let value: Value =
        serde_json::from_str(strip_bom(&text)).map_err(|source| SceneError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;
    let set = EvaluationSet::from_json_value(value)?;
    tracing::info!("loaded {} evaluation records from {}", set.len(), path.display());
    Ok(set)
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

fn whole_number(v: f64) -> Option<i64> {
    if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

fn de_identifier<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    match Scalar::deserialize(d)? {
        Scalar::Text(s) => Ok(s),
        Scalar::Int(v) => Ok(v.to_string()),
        Scalar::Float(v) => whole_number(v)
            .map(|v| v.to_string())
            .ok_or_else(|| de::Error::custom(format!("identifier must be an integer, got {v}"))),
        Scalar::Bool(b) => Err(de::Error::custom(format!(
            "identifier must be a string or integer, got {b}"
        ))),
    }
}

fn de_score<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<f64, D::Error> {
    match Scalar::deserialize(d)? {
        Scalar::Int(v) => Ok(v as f64),
        Scalar::Float(v) => Ok(v),
        Scalar::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("score is not numeric: {s:?}"))),
        Scalar::Bool(b) => Err(de::Error::custom(format!("score is not numeric: {b}"))),
    }
    .and_then(|v: f64| {
        if v.is_finite() {
            Ok(v)
        } else {
            Err(de::Error::custom(format!("score must be finite, got {v}")))
        }
    })
}

fn de_count<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<u32, D::Error> {
    let parsed = match Scalar::deserialize(d)? {
        Scalar::Int(v) => Some(v),
        Scalar::Float(v) => whole_number(v),
        Scalar::Text(s) => s.trim().parse::<i64>().ok(),
        Scalar::Bool(_) => None,
    };
    parsed
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| de::Error::custom("expected a non-negative integer"))
}

fn de_flag<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<bool, D::Error> {
    match Scalar::deserialize(d)? {
        Scalar::Bool(b) => Ok(b),
        Scalar::Int(0) => Ok(false),
        Scalar::Int(1) => Ok(true),
        Scalar::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(de::Error::custom(format!("expected a boolean, got {s:?}"))),
        },
        other => Err(de::Error::custom(format!("expected a boolean, got {other:?}"))),
    }
}
