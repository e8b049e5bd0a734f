//! Generic nested key-value storage container.
//!
//! The container is the only persistence surface the simulation core
//! knows about: string keys, float/int/string scalars, nested containers,
//! key enumeration. It serializes to JSON through serde.

use crate::error::{IoError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Untagged so containers read naturally as JSON. `Int` precedes `Float`
/// because an untagged f32 would otherwise swallow integer tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StorageValue {
    Int(i64),
    Float(f32),
    Text(String),
    Container(StorageContainer),
}

/// An opaque nested key-value store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageContainer {
    entries: BTreeMap<String, StorageValue>,
}

impl StorageContainer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All keys present in this container, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn set_f32(&mut self, key: impl Into<String>, value: f32) {
        self.entries.insert(key.into(), StorageValue::Float(value));
    }

    pub fn set_i64(&mut self, key: impl Into<String>, value: i64) {
        self.entries.insert(key.into(), StorageValue::Int(value));
    }

    pub fn set_str(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .insert(key.into(), StorageValue::Text(value.into()));
    }

    pub fn set_container(&mut self, key: impl Into<String>, value: StorageContainer) {
        self.entries
            .insert(key.into(), StorageValue::Container(value));
    }

    pub fn get_f32(&self, key: &str) -> Result<f32> {
        match self.get(key)? {
            // JSON round-trips whole floats through the Int arm.
            StorageValue::Float(v) => Ok(*v),
            StorageValue::Int(v) => Ok(*v as f32),
            other => Err(type_mismatch(key, "float", other)),
        }
    }

    pub fn get_i64(&self, key: &str) -> Result<i64> {
        match self.get(key)? {
            StorageValue::Int(v) => Ok(*v),
            other => Err(type_mismatch(key, "int", other)),
        }
    }

    pub fn get_str(&self, key: &str) -> Result<&str> {
        match self.get(key)? {
            StorageValue::Text(v) => Ok(v),
            other => Err(type_mismatch(key, "string", other)),
        }
    }

    pub fn get_container(&self, key: &str) -> Result<&StorageContainer> {
        match self.get(key)? {
            StorageValue::Container(v) => Ok(v),
            other => Err(type_mismatch(key, "container", other)),
        }
    }

    fn get(&self, key: &str) -> Result<&StorageValue> {
        self.entries
            .get(key)
            .ok_or_else(|| IoError::not_found(key.to_string()))
    }
}

fn type_mismatch(key: &str, expected: &str, got: &StorageValue) -> IoError {
    IoError::validation(format!("key '{key}' expected {expected}, got {got:?}"))
}
