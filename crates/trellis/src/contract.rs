//! The tagged union over every contract kind and the `|` composition
//! operator.

use std::ops::BitOr;

use crate::{
    Any, Call, Callable, Check, Dict, Enum, Float, Int, List, Null, Or, Str, ValidationError,
    Value,
};

/// A contract of any kind. Nested-contract parameters throughout the crate
/// take `impl Into<Contract>`, so concrete contract types slot in directly.
#[derive(Debug, Clone)]
pub enum Contract {
    Any(Any),
    Null(Null),
    Int(Int),
    Float(Float),
    Str(Str),
    Enum(Enum),
    Callable(Callable),
    Call(Call),
    Or(Or),
    List(List),
    Dict(Dict),
}

impl Check for Contract {
    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        match self {
            Contract::Any(c) => c.check(value),
            Contract::Null(c) => c.check(value),
            Contract::Int(c) => c.check(value),
            Contract::Float(c) => c.check(value),
            Contract::Str(c) => c.check(value),
            Contract::Enum(c) => c.check(value),
            Contract::Callable(c) => c.check(value),
            Contract::Call(c) => c.check(value),
            Contract::Or(c) => c.check(value),
            Contract::List(c) => c.check(value),
            Contract::Dict(c) => c.check(value),
        }
    }
}

/// `a | b` produces an [`Or`] contract. When the left side already is an
/// `Or`, the right side is appended instead of nesting.
impl<R: Into<Contract>> BitOr<R> for Contract {
    type Output = Contract;

    fn bitor(self, rhs: R) -> Contract {
        match self {
            Contract::Or(mut or) => {
                or.push(rhs);
                Contract::Or(or)
            }
            lhs => Contract::Or(Or::new([lhs, rhs.into()])),
        }
    }
}

macro_rules! contract_kinds {
    ($($kind:ident),+ $(,)?) => {
        $(
            impl From<$kind> for Contract {
                fn from(contract: $kind) -> Self {
                    Contract::$kind(contract)
                }
            }

            impl<R: Into<Contract>> BitOr<R> for $kind {
                type Output = Contract;

                fn bitor(self, rhs: R) -> Contract {
                    Contract::from(self) | rhs.into()
                }
            }
        )+
    };
}

contract_kinds!(Any, Null, Int, Float, Str, Enum, Callable, Call, Or, List, Dict);
