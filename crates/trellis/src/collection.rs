//! Structural contracts over sequences and mappings.

use std::collections::BTreeMap;

use crate::{Check, Contract, ValidationError, Value};

/// Homogeneous sequence: every element must satisfy one item contract.
///
/// Check order is fixed: container type, then length bounds, then elements
/// in order. The first failing element's own message is reported as-is.
#[derive(Debug, Clone)]
pub struct List {
    item: Box<Contract>,
    min_length: usize,
    max_length: Option<usize>,
}

impl List {
    pub fn new(item: impl Into<Contract>) -> Self {
        Self {
            item: Box::new(item.into()),
            min_length: 0,
            max_length: None,
        }
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

impl Check for List {
    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let items = match value {
            Value::List(items) => items,
            _ => return Err(ValidationError::new("value is not list")),
        };
        if items.len() < self.min_length {
            return Err(ValidationError::new(format!(
                "list length is less than {}",
                self.min_length
            )));
        }
        if let Some(max_length) = self.max_length {
            if items.len() > max_length {
                return Err(ValidationError::new(format!(
                    "list length is greater than {max_length}"
                )));
            }
        }
        for item in items {
            self.item.check(item)?;
        }
        Ok(())
    }
}

/// Keyed mapping with declared per-key contracts, optional keys and an
/// extra-key policy.
///
/// Declared keys are required unless listed in `optionals`. Undeclared keys
/// are rejected unless listed in `extras` or `allow_any` is set; permitted
/// extras are accepted without further validation. The builder mutators are
/// not designed for concurrent use — finish building before sharing.
#[derive(Debug, Clone, Default)]
pub struct Dict {
    fields: BTreeMap<String, Contract>,
    optionals: Vec<String>,
    extras: Vec<String>,
    allow_any: bool,
}

/// Wildcard token accepted by [`Dict::allow_extra`] and
/// [`Dict::allow_optionals`].
pub const WILDCARD: &str = "*";

impl Dict {
    pub fn new<I, K, C>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<String>,
        C: Into<Contract>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(key, contract)| (key.into(), contract.into()))
                .collect(),
            optionals: Vec::new(),
            extras: Vec::new(),
            allow_any: false,
        }
    }

    /// Permits the given undeclared key names; the `"*"` wildcard permits
    /// any undeclared key. Mutates in place and returns `self` for chaining.
    pub fn allow_extra<'a, I>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            if name == WILDCARD {
                self.allow_any = true;
            } else {
                self.extras.push(name.to_string());
            }
        }
        self
    }

    /// Marks the given declared keys as allowed to be absent; the `"*"`
    /// wildcard snapshots every currently declared key. Keys declared later
    /// would not join the snapshot.
    pub fn allow_optionals<'a, I>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            if name == WILDCARD {
                self.optionals = self.fields.keys().cloned().collect();
            } else {
                self.optionals.push(name.to_string());
            }
        }
        self
    }

    fn check_presence(&self, map: &BTreeMap<String, Value>) -> Result<(), ValidationError> {
        for key in self.fields.keys() {
            if !self.optionals.iter().any(|optional| optional == key) && !map.contains_key(key) {
                return Err(ValidationError::new(format!("{key} is required")));
            }
        }
        Ok(())
    }

    fn check_item(&self, key: &str, value: &Value) -> Result<(), ValidationError> {
        if let Some(contract) = self.fields.get(key) {
            return contract.check(value);
        }
        if !self.allow_any && !self.extras.iter().any(|extra| extra == key) {
            return Err(ValidationError::new(format!("{key} is not allowed key")));
        }
        Ok(())
    }
}

impl Check for Dict {
    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let map = match value {
            Value::Map(map) => map,
            _ => return Err(ValidationError::new("value is not dict")),
        };
        self.check_presence(map)?;
        for (key, item) in map {
            self.check_item(key, item)?;
        }
        Ok(())
    }
}
