//! Leaf contracts over single values.

use std::fmt;
use std::sync::Arc;

use crate::{Check, ValidationError, Value};

/// Accepts every value, including null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Any;

impl Any {
    pub fn new() -> Self {
        Self
    }
}

impl Check for Any {
    fn check(&self, _value: &Value) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Accepts only the null value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Null;

impl Null {
    pub fn new() -> Self {
        Self
    }
}

impl Check for Null {
    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        match value {
            Value::Null => Ok(()),
            _ => Err(ValidationError::new("value should be null")),
        }
    }
}

/// Integral values with optional inclusive bounds. A float never passes,
/// even when it carries an integral number; the contract models declared
/// intent, not numeric compatibility. `min <= max` is the caller's
/// responsibility and is not validated at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Int {
    min: Option<i64>,
    max: Option<i64>,
}

impl Int {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }
}

impl Check for Int {
    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let n = match value {
            Value::Int(n) => *n,
            _ => return Err(ValidationError::new("value is not int")),
        };
        if let Some(min) = self.min {
            if n < min {
                return Err(ValidationError::new(format!("value is less than {min}")));
            }
        }
        if let Some(max) = self.max {
            if n > max {
                return Err(ValidationError::new(format!("value is greater than {max}")));
            }
        }
        Ok(())
    }
}

/// Floating-point values with optional inclusive bounds. Strictly distinct
/// from [`Int`]: an integer value is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Float {
    min: Option<f64>,
    max: Option<f64>,
}

impl Float {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

impl Check for Float {
    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let n = match value {
            Value::Float(n) => *n,
            _ => return Err(ValidationError::new("value is not float")),
        };
        if let Some(min) = self.min {
            if n < min {
                return Err(ValidationError::new(format!("value is less than {min}")));
            }
        }
        if let Some(max) = self.max {
            if n > max {
                return Err(ValidationError::new(format!("value is greater than {max}")));
            }
        }
        Ok(())
    }
}

/// Text values. Blank strings are rejected unless [`Str::allow_blank`] is
/// set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Str {
    allow_blank: bool,
}

impl Str {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_blank(mut self) -> Self {
        self.allow_blank = true;
        self
    }
}

impl Check for Str {
    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let s = match value {
            Value::Str(s) => s,
            _ => return Err(ValidationError::new("value is not string")),
        };
        if s.is_empty() && !self.allow_blank {
            return Err(ValidationError::new("blank value is not allowed"));
        }
        Ok(())
    }
}

/// A fixed, ordered set of permitted literal values, compared by value
/// equality.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enum {
    variants: Vec<Value>,
}

impl Enum {
    pub fn new<I>(variants: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self {
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }
}

impl Check for Enum {
    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        if self.variants.iter().any(|variant| variant == value) {
            Ok(())
        } else {
            Err(ValidationError::new("value doesn't match any variant"))
        }
    }
}

/// Accepts any invocable value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Callable;

impl Callable {
    pub fn new() -> Self {
        Self
    }
}

impl Check for Callable {
    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        match value {
            Value::Func(_) => Ok(()),
            _ => Err(ValidationError::new("value is not callable")),
        }
    }
}

type Predicate = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// Delegates to a user-supplied one-argument predicate. The predicate
/// accepts by returning `None`; a returned message becomes the failure
/// reason verbatim.
#[derive(Clone)]
pub struct Call {
    predicate: Predicate,
}

impl Call {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }
}

impl fmt::Debug for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Call(..)")
    }
}

impl Check for Call {
    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        match (self.predicate)(value) {
            None => Ok(()),
            Some(message) => Err(ValidationError { message }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_accepts_everything() {
        let any = Any::new();
        any.check(&Value::Null).unwrap();
        any.check(&Value::Int(1)).unwrap();
        any.check(&Value::func(|_| Value::Null)).unwrap();
    }

    #[test]
    fn null_accepts_only_null() {
        Null::new().check(&Value::Null).unwrap();
        let err = Null::new().check(&Value::Int(1)).unwrap_err();
        assert_eq!(err.message, "value should be null");
    }

    #[test]
    fn int_type_check_comes_first() {
        let err = Int::new().min(1).check(&Value::from("foo")).unwrap_err();
        assert_eq!(err.message, "value is not int");
    }

    #[test]
    fn int_bounds_are_inclusive() {
        let contract = Int::new().min(1).max(10);
        contract.check(&Value::Int(1)).unwrap();
        contract.check(&Value::Int(10)).unwrap();
        assert_eq!(
            contract.check(&Value::Int(0)).unwrap_err().message,
            "value is less than 1"
        );
        assert_eq!(
            contract.check(&Value::Int(11)).unwrap_err().message,
            "value is greater than 10"
        );
    }

    #[test]
    fn int_rejects_floats_and_floats_reject_ints() {
        assert_eq!(
            Int::new().check(&Value::Float(1.0)).unwrap_err().message,
            "value is not int"
        );
        assert_eq!(
            Float::new().check(&Value::Int(1)).unwrap_err().message,
            "value is not float"
        );
        Float::new().min(2.0).check(&Value::Float(3.0)).unwrap();
    }

    #[test]
    fn int_rejects_bool() {
        Int::new().check(&Value::Bool(true)).unwrap_err();
    }

    #[test]
    fn str_rejects_blank_unless_allowed() {
        assert_eq!(
            Str::new().check(&Value::from("")).unwrap_err().message,
            "blank value is not allowed"
        );
        Str::new().allow_blank().check(&Value::from("")).unwrap();
        assert_eq!(
            Str::new().check(&Value::Int(1)).unwrap_err().message,
            "value is not string"
        );
    }

    #[test]
    fn enum_compares_by_value_equality() {
        let contract = Enum::new([Value::from("foo"), Value::from("bar"), Value::Int(1)]);
        contract.check(&Value::from("foo")).unwrap();
        contract.check(&Value::Int(1)).unwrap();
        let err = contract.check(&Value::Int(2)).unwrap_err();
        assert_eq!(err.message, "value doesn't match any variant");
        // Equality never crosses the numeric divide.
        contract.check(&Value::Float(1.0)).unwrap_err();
    }

    #[test]
    fn callable_wants_a_function() {
        Callable::new().check(&Value::func(|_| Value::Null)).unwrap();
        assert_eq!(
            Callable::new().check(&Value::Int(1)).unwrap_err().message,
            "value is not callable"
        );
    }

    #[test]
    fn call_uses_the_predicate_message() {
        let contract = Call::new(|value| match value {
            Value::Str(s) if s == "foo" => None,
            _ => Some("I want only foo!".to_string()),
        });
        contract.check(&Value::from("foo")).unwrap();
        let err = contract.check(&Value::from("bar")).unwrap_err();
        assert_eq!(err.message, "I want only foo!");
    }

    #[test]
    fn checks_are_deterministic() {
        let contract = Int::new().min(2);
        for _ in 0..3 {
            assert_eq!(
                contract.check(&Value::Int(1)).unwrap_err().message,
                "value is less than 2"
            );
        }
    }
}
