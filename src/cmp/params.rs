//! Comparator parameter values, sets and schemas.

use crate::util::{VoxFiltError, VoxFiltResult};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Type tag of a comparator parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamType {
    Int,
    Float,
    FloatArray,
    String,
}

impl ParamType {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamType::Int => "INT",
            ParamType::Float => "FLOAT",
            ParamType::FloatArray => "FLOATARRAY",
            ParamType::String => "STRING",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single parameter value.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f32),
    FloatArray(Vec<f32>),
    String(String),
}

impl ParamValue {
    pub fn kind(&self) -> ParamType {
        match self {
            ParamValue::Int(_) => ParamType::Int,
            ParamValue::Float(_) => ParamType::Float,
            ParamValue::FloatArray(_) => ParamType::FloatArray,
            ParamValue::String(_) => ParamType::String,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::FloatArray(v) => {
                for (i, x) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{x}")?;
                }
                Ok(())
            }
            ParamValue::String(v) => f.write_str(v),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        ParamValue::Float(v)
    }
}

impl From<Vec<f32>> for ParamValue {
    fn from(v: Vec<f32>) -> Self {
        ParamValue::FloatArray(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::String(v.to_string())
    }
}

/// Named parameter values for a comparator.
///
/// Keys a comparator does not recognize are kept and ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params {
    values: BTreeMap<String, ParamValue>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Integer value of `key`, or `default` when absent.
    pub fn int_or(&self, key: &str, default: i64) -> VoxFiltResult<i64> {
        match self.values.get(key) {
            None => Ok(default),
            Some(ParamValue::Int(v)) => Ok(*v),
            Some(other) => Err(type_mismatch(key, ParamType::Int, other)),
        }
    }

    /// Flag semantics: any non-zero integer is `true`.
    pub fn flag(&self, key: &str) -> VoxFiltResult<bool> {
        Ok(self.int_or(key, 0)? != 0)
    }

    /// Float value of `key`; integers are widened.
    pub fn float_or(&self, key: &str, default: f32) -> VoxFiltResult<f32> {
        match self.values.get(key) {
            None => Ok(default),
            Some(ParamValue::Float(v)) => Ok(*v),
            Some(ParamValue::Int(v)) => Ok(*v as f32),
            Some(other) => Err(type_mismatch(key, ParamType::Float, other)),
        }
    }

    /// Float array value of `key`; a scalar becomes a one-element array.
    pub fn float_array(&self, key: &str) -> VoxFiltResult<Option<Cow<'_, [f32]>>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(ParamValue::FloatArray(v)) => Ok(Some(Cow::Borrowed(v.as_slice()))),
            Some(ParamValue::Float(v)) => Ok(Some(Cow::Owned(vec![*v]))),
            Some(ParamValue::Int(v)) => Ok(Some(Cow::Owned(vec![*v as f32]))),
            Some(other) => Err(type_mismatch(key, ParamType::FloatArray, other)),
        }
    }
}

fn type_mismatch(key: &str, expected: ParamType, got: &ParamValue) -> VoxFiltError {
    VoxFiltError::invalid_argument(format!(
        "parameter '{key}' expects {expected}, got {}",
        got.kind()
    ))
}

/// Declared parameter of a comparator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamType,
    pub description: &'static str,
}

/// Ordered list of the parameters a comparator understands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParamSchema {
    specs: Vec<ParamSpec>,
}

impl ParamSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(mut self, name: &'static str, kind: ParamType, description: &'static str) -> Self {
        self.specs.push(ParamSpec {
            name,
            kind,
            description,
        });
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParamSpec> {
        self.specs.iter()
    }
}
