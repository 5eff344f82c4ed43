use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use super::assignment::Assignment;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sentence {
    Symbol(String),
    Negation(Box<Sentence>),
    Conjunction(Vec<Sentence>),
    Disjunction(Vec<Sentence>),
    Implication(Box<Sentence>, Box<Sentence>),
    Biconditional(Box<Sentence>, Box<Sentence>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SentenceError {
    #[error("{connective} needs at least two operands, got {got}")]
    TooFewOperands {
        connective: &'static str,
        got: usize,
    },
    #[error("symbol name is empty")]
    EmptySymbol,
}

impl Sentence {
    pub fn symbol(name: impl Into<String>) -> Self {
        Sentence::Symbol(name.into())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(operand: Sentence) -> Self {
        Sentence::Negation(Box::new(operand))
    }

    pub fn implies(premise: Sentence, conclusion: Sentence) -> Self {
        Sentence::Implication(Box::new(premise), Box::new(conclusion))
    }

    pub fn iff(left: Sentence, right: Sentence) -> Self {
        Sentence::Biconditional(Box::new(left), Box::new(right))
    }

    pub fn conj(left: Sentence, right: Sentence) -> Self {
        Sentence::Conjunction(vec![left, right])
    }

    pub fn disj(left: Sentence, right: Sentence) -> Self {
        Sentence::Disjunction(vec![left, right])
    }

    pub fn and(operands: Vec<Sentence>) -> Result<Self, SentenceError> {
        if operands.len() < 2 {
            return Err(SentenceError::TooFewOperands {
                connective: "conjunction",
                got: operands.len(),
            });
        }
        Ok(Sentence::Conjunction(operands))
    }

    pub fn or(operands: Vec<Sentence>) -> Result<Self, SentenceError> {
        if operands.len() < 2 {
            return Err(SentenceError::TooFewOperands {
                connective: "disjunction",
                got: operands.len(),
            });
        }
        Ok(Sentence::Disjunction(operands))
    }

    pub fn validate(&self) -> Result<(), SentenceError> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Sentence::Symbol(name) => {
                    if name.is_empty() {
                        return Err(SentenceError::EmptySymbol);
                    }
                }
                Sentence::Negation(inner) => stack.push(inner),
                Sentence::Conjunction(ops) => {
                    if ops.len() < 2 {
                        return Err(SentenceError::TooFewOperands {
                            connective: "conjunction",
                            got: ops.len(),
                        });
                    }
                    stack.extend(ops.iter());
                }
                Sentence::Disjunction(ops) => {
                    if ops.len() < 2 {
                        return Err(SentenceError::TooFewOperands {
                            connective: "disjunction",
                            got: ops.len(),
                        });
                    }
                    stack.extend(ops.iter());
                }
                Sentence::Implication(a, b) | Sentence::Biconditional(a, b) => {
                    stack.push(a);
                    stack.push(b);
                }
            }
        }
        Ok(())
    }

    pub fn symbols(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Sentence::Symbol(name) => {
                    if !out.contains(name) {
                        out.insert(name.clone());
                    }
                }
                Sentence::Negation(inner) => stack.push(inner),
                Sentence::Conjunction(ops) | Sentence::Disjunction(ops) => {
                    stack.extend(ops.iter());
                }
                Sentence::Implication(a, b) | Sentence::Biconditional(a, b) => {
                    stack.push(a);
                    stack.push(b);
                }
            }
        }
        out
    }

    pub fn eval(&self, model: &Assignment) -> Option<bool> {
        match self {
            Sentence::Symbol(name) => model.get(name),
            Sentence::Negation(inner) => inner.eval(model).map(|v| !v),
            Sentence::Conjunction(ops) => {
                let mut all = true;
                for op in ops {
                    all &= op.eval(model)?;
                }
                Some(all)
            }
            Sentence::Disjunction(ops) => {
                let mut any = false;
                for op in ops {
                    any |= op.eval(model)?;
                }
                Some(any)
            }
            Sentence::Implication(a, b) => Some(!a.eval(model)? || b.eval(model)?),
            Sentence::Biconditional(a, b) => Some(a.eval(model)? == b.eval(model)?),
        }
    }

    pub fn is_nnf(&self) -> bool {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Sentence::Symbol(_) => {}
                Sentence::Negation(inner) => {
                    if !matches!(**inner, Sentence::Symbol(_)) {
                        return false;
                    }
                }
                Sentence::Conjunction(ops) | Sentence::Disjunction(ops) => {
                    stack.extend(ops.iter());
                }
                Sentence::Implication(..) | Sentence::Biconditional(..) => return false,
            }
        }
        true
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Sentence::Symbol(name) => Some(name),
            _ => None,
        }
    }

    fn is_compound(&self) -> bool {
        !matches!(self, Sentence::Symbol(_) | Sentence::Negation(_))
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentence::Symbol(name) => write!(f, "{name}"),
            Sentence::Negation(inner) => {
                if inner.is_compound() {
                    write!(f, "~({inner})")
                } else {
                    write!(f, "~{inner}")
                }
            }
            Sentence::Conjunction(ops) => write_joined(f, ops, " & "),
            Sentence::Disjunction(ops) => write_joined(f, ops, " || "),
            Sentence::Implication(a, b) => {
                write_operand(f, a)?;
                write!(f, " => ")?;
                write_operand(f, b)
            }
            Sentence::Biconditional(a, b) => {
                write_operand(f, a)?;
                write!(f, " <=> ")?;
                write_operand(f, b)
            }
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, ops: &[Sentence], sep: &str) -> fmt::Result {
    for (idx, op) in ops.iter().enumerate() {
        if idx > 0 {
            write!(f, "{sep}")?;
        }
        write_operand(f, op)?;
    }
    Ok(())
}

fn write_operand(f: &mut fmt::Formatter<'_>, op: &Sentence) -> fmt::Result {
    if op.is_compound() {
        write!(f, "({op})")
    } else {
        write!(f, "{op}")
    }
}

#[cfg(test)]
mod tests {
    use super::{Sentence, SentenceError};
    use crate::logic::assignment::Assignment;

    fn sym(name: &str) -> Sentence {
        Sentence::symbol(name)
    }

    #[test]
    fn symbols_are_distinct() {
        let s = Sentence::conj(
            Sentence::implies(sym("a"), sym("b")),
            Sentence::iff(sym("b"), Sentence::not(sym("c"))),
        );
        let names = s.symbols().into_iter().collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn nary_constructors_reject_short_lists() {
        let err = match Sentence::and(vec![sym("a")]) {
            Ok(s) => panic!("accepted single operand: {s}"),
            Err(e) => e,
        };
        assert_eq!(
            err,
            SentenceError::TooFewOperands {
                connective: "conjunction",
                got: 1
            }
        );
        assert!(Sentence::or(Vec::new()).is_err());
        assert!(Sentence::or(vec![sym("a"), sym("b")]).is_ok());
    }

    #[test]
    fn validate_catches_hand_built_nodes() {
        let bad = Sentence::not(Sentence::Disjunction(vec![sym("a")]));
        assert!(bad.validate().is_err());
        assert_eq!(sym("").validate(), Err(SentenceError::EmptySymbol));
        assert!(Sentence::iff(sym("a"), sym("b")).validate().is_ok());
    }

    #[test]
    fn eval_follows_connectives() {
        let model = [("a".to_string(), true), ("b".to_string(), false)]
            .into_iter()
            .collect::<Assignment>();
        assert_eq!(Sentence::implies(sym("a"), sym("b")).eval(&model), Some(false));
        assert_eq!(Sentence::implies(sym("b"), sym("a")).eval(&model), Some(true));
        assert_eq!(Sentence::iff(sym("b"), sym("b")).eval(&model), Some(true));
        assert_eq!(Sentence::disj(sym("b"), sym("z")).eval(&model), None);
    }

    #[test]
    fn display_parenthesizes_compound_operands() {
        let s = Sentence::implies(
            Sentence::conj(sym("a"), sym("b")),
            Sentence::not(Sentence::disj(sym("c"), sym("d"))),
        );
        assert_eq!(s.to_string(), "(a & b) => ~(c || d)");
    }
}
