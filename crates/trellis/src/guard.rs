//! Function-boundary guard: applies contracts to call arguments before a
//! wrapped callable runs.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, trace};

use crate::{Check, ConfigError, Contract, GuardError, Value};

/// Call-time arguments: positional values plus keyword pairs.
#[derive(Debug, Clone, Default)]
pub struct Args {
    positional: Vec<Value>,
    keyword: Vec<(String, Value)>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.push((name.into(), value.into()));
        self
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn keyword(&self) -> &[(String, Value)] {
        &self.keyword
    }
}

/// Maps a target's declared parameter list onto contracts.
///
/// There is no runtime reflection in Rust, so the parameter names are
/// supplied explicitly in declaration order; positional arguments resolve to
/// names by that order, keyword arguments by name. Built once per guarded
/// function and reused across calls.
#[derive(Debug, Clone, Default)]
pub struct Guard {
    params: Vec<String>,
    contracts: BTreeMap<String, Contract>,
}

impl Guard {
    /// Declares the target's parameter names in order. Duplicate names are a
    /// configuration error.
    pub fn new<I, S>(params: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for param in params {
            let param = param.into();
            if names.contains(&param) {
                return Err(ConfigError::DuplicateParam(param));
            }
            names.push(param);
        }
        Ok(Self {
            params: names,
            contracts: BTreeMap::new(),
        })
    }

    /// Binds a contract to a declared parameter. Binding an undeclared name
    /// is a configuration error.
    pub fn contract(mut self, name: &str, contract: impl Into<Contract>) -> Result<Self, ConfigError> {
        if !self.params.iter().any(|param| param == name) {
            return Err(ConfigError::UnknownParam(name.to_string()));
        }
        trace!(parameter = name, "bound contract to guard parameter");
        self.contracts.insert(name.to_string(), contract.into());
        Ok(self)
    }

    /// Checks every supplied argument that resolves to a bound parameter.
    /// Parameters without a contract, parameters not supplied in the call,
    /// surplus positional arguments and unknown keyword names all pass
    /// through unchecked.
    pub fn check_call(&self, args: &Args) -> Result<(), GuardError> {
        for (name, value) in self.params.iter().zip(args.positional()) {
            self.check_one(name, value)?;
        }
        for (name, value) in args.keyword() {
            self.check_one(name, value)?;
        }
        Ok(())
    }

    /// Wraps a callable; [`Guarded::call`] rejects bad arguments before the
    /// target ever runs.
    pub fn wrap<F>(self, func: F) -> Guarded<F> {
        Guarded { guard: self, func }
    }

    fn check_one(&self, name: &str, value: &Value) -> Result<(), GuardError> {
        let Some(contract) = self.contracts.get(name) else {
            return Ok(());
        };
        contract.check(value).map_err(|err| {
            debug!(parameter = name, error = %err, "guard rejected argument");
            GuardError::from(err)
        })
    }
}

/// A callable paired with its guard. The target is never invoked when a
/// guard check fails.
pub struct Guarded<F> {
    guard: Guard,
    func: F,
}

impl<F> Guarded<F> {
    pub fn guard(&self) -> &Guard {
        &self.guard
    }
}

impl<F> fmt::Debug for Guarded<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guarded").field("guard", &self.guard).finish()
    }
}

impl<F, R> Guarded<F>
where
    F: Fn(&Args) -> R,
{
    pub fn call(&self, args: &Args) -> Result<R, GuardError> {
        self.guard.check_call(args)?;
        Ok((self.func)(args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Int, Str};

    fn string_guard() -> Guard {
        Guard::new(["a", "b"]).unwrap().contract("a", Str::new()).unwrap()
    }

    #[test]
    fn rejects_a_bad_positional_argument() {
        let guard = string_guard();
        let err = guard
            .check_call(&Args::new().arg(1).arg(2))
            .unwrap_err();
        assert_eq!(err.message, "value is not string");
    }

    #[test]
    fn passes_matching_arguments_through() {
        let guard = string_guard();
        guard.check_call(&Args::new().arg("x").arg(2)).unwrap();
    }

    #[test]
    fn keyword_arguments_resolve_by_name() {
        let guard = string_guard();
        guard.check_call(&Args::new().arg("x").kwarg("b", 2)).unwrap();
        let err = guard
            .check_call(&Args::new().kwarg("a", 1))
            .unwrap_err();
        assert_eq!(err.message, "value is not string");
    }

    #[test]
    fn unsupplied_parameters_are_not_checked() {
        // `a` carries a contract but is absent from the call.
        let guard = string_guard();
        guard.check_call(&Args::new().kwarg("b", 2)).unwrap();
    }

    #[test]
    fn unbound_parameters_pass_through() {
        let guard = Guard::new(["a", "b", "c"])
            .unwrap()
            .contract("c", Int::new())
            .unwrap();
        guard.check_call(&Args::new().arg(1).arg(2)).unwrap();
        let err = guard
            .check_call(&Args::new().arg(1).arg(2).arg("x"))
            .unwrap_err();
        assert_eq!(err.message, "value is not int");
    }

    #[test]
    fn surplus_arguments_are_ignored() {
        let guard = string_guard();
        guard
            .check_call(&Args::new().arg("x").arg(2).arg(3).kwarg("zzz", 1))
            .unwrap();
    }

    #[test]
    fn duplicate_parameter_is_a_config_error() {
        let err = Guard::new(["a", "a"]).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateParam("a".to_string()));
    }

    #[test]
    fn binding_an_undeclared_parameter_is_a_config_error() {
        let err = Guard::new(["a"]).unwrap().contract("nope", Int::new()).unwrap_err();
        assert_eq!(err, ConfigError::UnknownParam("nope".to_string()));
    }

    #[test]
    fn wrapped_callable_never_runs_on_rejection() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let calls = AtomicUsize::new(0);
        let guarded = string_guard().wrap(|args: &Args| {
            calls.fetch_add(1, Ordering::SeqCst);
            args.positional().len()
        });

        guarded.call(&Args::new().arg(1).arg(2)).unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let len = guarded.call(&Args::new().arg("x").arg(2)).unwrap();
        assert_eq!(len, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
