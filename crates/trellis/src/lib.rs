//! Composable runtime contracts for loosely typed data.
//!
//! A contract tree is built once out of leaf contracts ([`Int`], [`Str`],
//! [`Enum`], ...), the [`Or`] combinator and the structural [`List`] and
//! [`Dict`] contracts, then checked against [`Value`]s any number of times.
//! [`Guard`] applies the same contracts to function-call arguments before a
//! wrapped callable runs.
//!
//! Contracts are read-heavy: finish building a tree (including the `Or`/`Dict`
//! mutators) before sharing it across threads.

mod collection;
mod combine;
mod contract;
mod guard;
mod primitive;
mod value;

pub use collection::{Dict, List, WILDCARD};
pub use combine::Or;
pub use contract::Contract;
pub use guard::{Args, Guard, Guarded};
pub use primitive::{Any, Call, Callable, Enum, Float, Int, Null, Str};
pub use value::{NativeFn, Value};

use serde::Serialize;

/// The single capability every contract provides: accept the value or report
/// the first rule it violates. Never returns a boolean and never fails with
/// anything but [`ValidationError`].
pub trait Check {
    fn check(&self, value: &Value) -> Result<(), ValidationError>;
}

/// Validation failure carrying one human-readable reason. Violations are
/// never aggregated; the first one detected wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Contract violation at a guarded call boundary. Same message as the
/// underlying [`ValidationError`], distinct type so callers can tell a bad
/// call-site argument from bad nested data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct GuardError {
    pub message: String,
}

impl From<ValidationError> for GuardError {
    fn from(err: ValidationError) -> Self {
        Self {
            message: err.message,
        }
    }
}

/// Construction-time programmer error. Never produced by `check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum ConfigError {
    #[error("duplicate parameter `{0}` in guard binding")]
    DuplicateParam(String),
    #[error("unknown parameter `{0}` in guard binding")]
    UnknownParam(String),
}
