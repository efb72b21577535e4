//! Parameter provider port.
//!
//! The host resolves user-configured fields; nodes read them through
//! this trait, keyed by `(name, input item index)`. Expression-valued
//! fields may differ per item, which is why the index is part of the
//! key even for fields that are constant across a run.

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domain::errors::{NodeError, NodeResult};
use crate::domain::models::Pagination;

/// Per-field parameter accessor keyed by `(name, item index)`.
pub trait ParameterProvider: Send + Sync {
    /// Fetch the value of a named parameter for the given item index.
    ///
    /// Returns `None` when the user did not configure the field.
    fn get(&self, name: &str, index: usize) -> Option<Value>;
}

/// Typed convenience wrapper around a [`ParameterProvider`].
///
/// Required accessors map an absent field to
/// [`NodeError::MissingParameter`]; optional accessors return `None`
/// so absent fields can be omitted from outgoing requests entirely.
#[derive(Clone)]
pub struct Parameters {
    provider: Arc<dyn ParameterProvider>,
}

impl Parameters {
    /// Wrap a provider.
    pub fn new(provider: Arc<dyn ParameterProvider>) -> Self {
        Self { provider }
    }

    /// Raw value of a parameter, if configured.
    pub fn value(&self, name: &str, index: usize) -> Option<Value> {
        self.provider.get(name, index)
    }

    /// Required string parameter.
    pub fn string(&self, name: &str, index: usize) -> NodeResult<String> {
        match self.value(name, index) {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(NodeError::InvalidParameter {
                name: name.to_string(),
                reason: format!("expected a string, got {other}"),
            }),
            None => Err(NodeError::MissingParameter {
                name: name.to_string(),
                index,
            }),
        }
    }

    /// Required boolean parameter.
    pub fn boolean(&self, name: &str, index: usize) -> NodeResult<bool> {
        match self.value(name, index) {
            Some(Value::Bool(b)) => Ok(b),
            Some(other) => Err(NodeError::InvalidParameter {
                name: name.to_string(),
                reason: format!("expected a boolean, got {other}"),
            }),
            None => Err(NodeError::MissingParameter {
                name: name.to_string(),
                index,
            }),
        }
    }

    /// Required unsigned integer parameter.
    pub fn unsigned(&self, name: &str, index: usize) -> NodeResult<usize> {
        match self.value(name, index) {
            Some(Value::Number(n)) => n.as_u64().map(|v| v as usize).ok_or_else(|| {
                NodeError::InvalidParameter {
                    name: name.to_string(),
                    reason: format!("expected an unsigned integer, got {n}"),
                }
            }),
            Some(other) => Err(NodeError::InvalidParameter {
                name: name.to_string(),
                reason: format!("expected a number, got {other}"),
            }),
            None => Err(NodeError::MissingParameter {
                name: name.to_string(),
                index,
            }),
        }
    }

    /// Required list-of-strings parameter.
    pub fn string_list(&self, name: &str, index: usize) -> NodeResult<Vec<String>> {
        match self.value(name, index) {
            Some(value) => {
                serde_json::from_value(value).map_err(|e| NodeError::InvalidParameter {
                    name: name.to_string(),
                    reason: e.to_string(),
                })
            }
            None => Err(NodeError::MissingParameter {
                name: name.to_string(),
                index,
            }),
        }
    }

    /// Optional object parameter; an absent field yields an empty map.
    pub fn object(&self, name: &str, index: usize) -> NodeResult<Map<String, Value>> {
        match self.value(name, index) {
            Some(Value::Object(map)) => Ok(map),
            Some(Value::Null) | None => Ok(Map::new()),
            Some(other) => Err(NodeError::InvalidParameter {
                name: name.to_string(),
                reason: format!("expected an object, got {other}"),
            }),
        }
    }

    /// Deserialize an optional object parameter into a sparse typed
    /// bag; an absent field yields `T::default()`.
    pub fn sparse<T>(&self, name: &str, index: usize) -> NodeResult<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.value(name, index) {
            Some(Value::Null) | None => Ok(T::default()),
            Some(value) => {
                serde_json::from_value(value).map_err(|e| NodeError::InvalidParameter {
                    name: name.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Resolve the "return all" toggle and its companion limit.
    ///
    /// When `return_all` is false the `limit` parameter is required.
    pub fn pagination(&self, index: usize) -> NodeResult<Pagination> {
        if self.boolean("return_all", index)? {
            Ok(Pagination::All)
        } else {
            Ok(Pagination::Limit(self.unsigned("limit", index)?))
        }
    }
}

/// In-memory [`ParameterProvider`] backing the CLI and tests.
///
/// Holds a base map applied to every item index plus optional
/// per-index overrides, mirroring how hosts resolve expression
/// parameters per item.
#[derive(Debug, Clone, Default)]
pub struct StaticParameters {
    base: Map<String, Value>,
    overrides: HashMap<usize, Map<String, Value>>,
}

impl StaticParameters {
    /// Create a provider from a uniform parameter map.
    pub fn new(base: Map<String, Value>) -> Self {
        Self {
            base,
            overrides: HashMap::new(),
        }
    }

    /// Set a parameter for every item index.
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.base.insert(name.into(), value);
        self
    }

    /// Override a parameter for a single item index.
    pub fn with_override(mut self, index: usize, name: impl Into<String>, value: Value) -> Self {
        self.overrides
            .entry(index)
            .or_default()
            .insert(name.into(), value);
        self
    }
}

impl ParameterProvider for StaticParameters {
    fn get(&self, name: &str, index: usize) -> Option<Value> {
        if let Some(map) = self.overrides.get(&index) {
            if let Some(value) = map.get(name) {
                return Some(value.clone());
            }
        }
        self.base.get(name).cloned()
    }
}
