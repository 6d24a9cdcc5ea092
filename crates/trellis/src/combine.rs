//! The `Or` combinator.

use crate::{Check, Contract, ValidationError, Value};

/// Ordered alternatives; the first one that accepts wins and no further
/// alternatives are tried.
///
/// When every alternative fails the combinator reports one generic reason.
/// The individual failure messages are discarded on purpose: no single one
/// is authoritative once all alternatives have been ruled out.
#[derive(Debug, Clone, Default)]
pub struct Or {
    alternatives: Vec<Contract>,
}

impl Or {
    pub fn new<I>(alternatives: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Contract>,
    {
        Self {
            alternatives: alternatives.into_iter().map(Into::into).collect(),
        }
    }

    /// Appends a further alternative in place. Takes effect on the next
    /// `check`; nothing is re-validated retroactively.
    pub fn push(&mut self, contract: impl Into<Contract>) -> &mut Self {
        self.alternatives.push(contract.into());
        self
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
}

impl Check for Or {
    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        for alternative in &self.alternatives {
            if alternative.check(value).is_ok() {
                return Ok(());
            }
        }
        Err(ValidationError::new("no contract matches"))
    }
}
