//! Key-value records.
use crate::error::ReplabError;
use chrono::prelude::{DateTime, Local};
use std::collections::{
    hash_map::{Iter, Keys},
    HashMap,
};

/// Possible values in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single value such as a loss or an episode return.
    Scalar(f32),

    /// A timestamp.
    DateTime(DateTime<Local>),

    /// A 1-dimensional array.
    Array1(Vec<f32>),

    /// A text value.
    String(String),
}

/// A set of named values.
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record with a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> Keys<String, RecordValue> {
        self.0.keys()
    }

    /// Inserts a key-value pair.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Gets a reference to the value of the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges two records.
    ///
    /// Values in `record` overwrite values with the same key in `self`.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Merges another record into this one in place.
    pub fn merge_inplace(&mut self, record: Record) {
        for (k, v) in record.0 {
            self.0.insert(k, v);
        }
    }

    /// Gets a scalar value.
    pub fn get_scalar(&self, k: &str) -> Result<f32, ReplabError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(ReplabError::RecordValueTypeError("Scalar".to_string())),
            None => Err(ReplabError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a 1-dimensional array.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f32>, ReplabError> {
        match self.0.get(k) {
            Some(RecordValue::Array1(v)) => Ok(v.clone()),
            Some(_) => Err(ReplabError::RecordValueTypeError("Array1".to_string())),
            None => Err(ReplabError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a string value.
    pub fn get_string(&self, k: &str) -> Result<String, ReplabError> {
        match self.0.get(k) {
            Some(RecordValue::String(s)) => Ok(s.clone()),
            Some(_) => Err(ReplabError::RecordValueTypeError("String".to_string())),
            None => Err(ReplabError::RecordKeyError(k.to_string())),
        }
    }

    /// Returns `true` if the record has no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}
