//! Operator overload registry.
//!
//! Every operator owns a fixed set of signatures. Arithmetic never coerces
//! between integer and float; comparisons always yield a boolean.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::{ast::ast::Operator, errors::errors::ErrorImpl};

use super::types::Type;

/// One overload: the operand types in order and the type produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub operands: Vec<Type>,
    pub result: Type,
}

impl Signature {
    pub fn new(operands: &[Type], result: Type) -> Self {
        Signature {
            operands: operands.to_vec(),
            result,
        }
    }

    pub fn accepts(&self, operands: &[Type]) -> bool {
        self.operands == operands
    }
}

/// The overload set of a single operator.
#[derive(Debug, Clone)]
pub struct Signatures {
    operator: Option<Operator>,
    entries: Vec<Signature>,
}

lazy_static! {
    static ref REGISTRY: FxHashMap<Operator, Signatures> = build_registry();
    static ref EMPTY: Signatures = Signatures {
        operator: None,
        entries: vec![],
    };
}

fn build_registry() -> FxHashMap<Operator, Signatures> {
    use Type::*;

    let mut registry = FxHashMap::default();

    for operator in [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ] {
        let mut entries = vec![
            Signature::new(&[Integer, Integer], Integer),
            Signature::new(&[Float, Float], Float),
        ];
        if operator == Operator::Subtract {
            entries.push(Signature::new(&[Integer], Integer));
            entries.push(Signature::new(&[Float], Float));
        }
        registry.insert(operator, Signatures::new(operator, entries));
    }

    for operator in [
        Operator::Greater,
        Operator::GreaterOrEqual,
        Operator::Equal,
        Operator::NotEqual,
        Operator::Lesser,
        Operator::LesserOrEqual,
    ] {
        let mut entries = vec![
            Signature::new(&[Integer, Integer], Boolean),
            Signature::new(&[Float, Float], Boolean),
            Signature::new(&[Character, Character], Boolean),
        ];
        if matches!(operator, Operator::Equal | Operator::NotEqual) {
            entries.push(Signature::new(&[String, String], Boolean));
            entries.push(Signature::new(&[Boolean, Boolean], Boolean));
        }
        registry.insert(operator, Signatures::new(operator, entries));
    }

    registry.insert(
        Operator::Not,
        Signatures::new(Operator::Not, vec![Signature::new(&[Boolean], Boolean)]),
    );

    registry
}

impl Signatures {
    fn new(operator: Operator, entries: Vec<Signature>) -> Self {
        Signatures {
            operator: Some(operator),
            entries,
        }
    }

    /// The registered overload set for `operator`.
    pub fn signatures_of(operator: Operator) -> &'static Signatures {
        REGISTRY.get(&operator).unwrap_or(&EMPTY)
    }

    pub fn accepts(&self, operands: &[Type]) -> bool {
        self.entries.iter().any(|signature| signature.accepts(operands))
    }

    /// Result type of the overload matching `operands`.
    pub fn resolve(&self, operands: &[Type]) -> Result<Type, ErrorImpl> {
        match self.entries.iter().find(|signature| signature.accepts(operands)) {
            Some(signature) => Ok(signature.result),
            None => Err(ErrorImpl::IncompatibleOperands {
                operator: self
                    .operator
                    .map(|operator| operator.lexeme().to_string())
                    .unwrap_or_default(),
                operands: operands
                    .iter()
                    .map(Type::name)
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Signature> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
