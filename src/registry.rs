//! Name-keyed constructors for strategy objects restored from a profile.
//!
//! Each strategy kind builds one `Registry` on first use; it is read-only
//! afterwards.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{NnError, Result};

pub(crate) type Factory<T> = fn(&Value) -> Result<T>;

pub(crate) struct Registry<T> {
    kind: &'static str,
    factories: HashMap<&'static str, Factory<T>>,
}

impl<T> Registry<T> {
    pub(crate) fn new(kind: &'static str) -> Self {
        Registry {
            kind,
            factories: HashMap::new(),
        }
    }

    pub(crate) fn register(mut self, name: &'static str, factory: Factory<T>) -> Self {
        self.factories.insert(name, factory);
        self
    }

    /// Builds a fresh instance for `name` (matched case-insensitively).
    pub(crate) fn generate(&self, name: &str, props: &Value) -> Result<T> {
        match self.factories.get(name.to_lowercase().as_str()) {
            Some(factory) => factory(props),
            None => Err(NnError::UnsupportedStrategy {
                kind: self.kind,
                name: name.to_string(),
            }),
        }
    }
}

/// Decodes strategy parameters. A missing (`null`) payload reads as `{}`.
pub(crate) fn decode_props<P: DeserializeOwned>(kind: &'static str, props: &Value) -> Result<P> {
    let props = if props.is_null() {
        Value::Object(Default::default())
    } else {
        props.clone()
    };
    serde_json::from_value(props).map_err(|source| NnError::InvalidProps { kind, source })
}
