use indexmap::IndexSet;
use thiserror::Error;

use crate::log::targets;
use crate::logic::sentence::{Sentence, SentenceError};

use super::cnf::{Clause, Cnf, Lit, merge_clauses};
use super::nnf::to_nnf;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("malformed sentence: {0}")]
    Malformed(#[from] SentenceError),
    #[error("{connective} with {got} operand(s) reached clause distribution")]
    Arity {
        connective: &'static str,
        got: usize,
    },
    #[error("clause distribution expects negation normal form, found '{found}'")]
    NotNegationNormal { found: String },
}

pub fn to_cnf(sentence: &Sentence) -> Result<Cnf, ConvertError> {
    let mut cnf = Cnf::new();
    append_cnf(&mut cnf, sentence)?;
    Ok(cnf)
}

pub fn append_cnf(cnf: &mut Cnf, sentence: &Sentence) -> Result<(), ConvertError> {
    sentence.validate()?;
    let nnf = to_nnf(sentence);
    let clauses = distribute(cnf, &nnf)?;
    log::debug!(
        target: targets::CONVERSION,
        "{} clause(s) over {} variable(s) from '{}'",
        clauses.len(),
        cnf.num_vars(),
        sentence
    );
    for clause in clauses {
        cnf.add_clause(clause);
    }
    Ok(())
}

enum Step<'a> {
    Visit(&'a Sentence),
    Meet(usize),
    Join(usize),
}

/// Distributes disjunction over conjunction on an NNF tree.
pub fn distribute(cnf: &mut Cnf, nnf: &Sentence) -> Result<Vec<Clause>, ConvertError> {
    let mut steps = vec![Step::Visit(nnf)];
    let mut out = Vec::<Vec<Clause>>::new();

    while let Some(step) = steps.pop() {
        match step {
            Step::Visit(node) => match node {
                Sentence::Symbol(name) => {
                    out.push(vec![vec![Lit::new(cnf.symbols.intern(name), true)]]);
                }
                Sentence::Negation(inner) => match inner.as_ref() {
                    Sentence::Symbol(name) => {
                        out.push(vec![vec![Lit::new(cnf.symbols.intern(name), false)]]);
                    }
                    other => {
                        return Err(ConvertError::NotNegationNormal {
                            found: Sentence::not(other.clone()).to_string(),
                        });
                    }
                },
                Sentence::Conjunction(ops) => {
                    check_arity("conjunction", ops.len())?;
                    steps.push(Step::Meet(ops.len()));
                    steps.extend(ops.iter().rev().map(Step::Visit));
                }
                Sentence::Disjunction(ops) => {
                    check_arity("disjunction", ops.len())?;
                    steps.push(Step::Join(ops.len()));
                    steps.extend(ops.iter().rev().map(Step::Visit));
                }
                Sentence::Implication(..) | Sentence::Biconditional(..) => {
                    return Err(ConvertError::NotNegationNormal {
                        found: node.to_string(),
                    });
                }
            },
            Step::Meet(n) => {
                let start = out.len().saturating_sub(n);
                let mut merged = IndexSet::<Clause>::new();
                for set in out.split_off(start) {
                    merged.extend(set);
                }
                out.push(merged.into_iter().collect());
            }
            Step::Join(n) => {
                let start = out.len().saturating_sub(n);
                let mut sets = out.split_off(start).into_iter();
                let mut acc = sets.next().unwrap_or_default();
                for next in sets {
                    acc = cross(&acc, &next);
                }
                out.push(acc);
            }
        }
    }

    Ok(out.pop().unwrap_or_default())
}

fn check_arity(connective: &'static str, got: usize) -> Result<(), ConvertError> {
    if got < 2 {
        return Err(ConvertError::Arity { connective, got });
    }
    Ok(())
}

// (C1 & C2) || (D1 & D2)  ~>  (C1|D1) & (C1|D2) & (C2|D1) & (C2|D2)
fn cross(left: &[Clause], right: &[Clause]) -> Vec<Clause> {
    let mut out = IndexSet::<Clause>::new();
    for l in left {
        for r in right {
            if let Some(clause) = merge_clauses(l, r) {
                out.insert(clause);
            }
        }
    }
    out.into_iter().collect()
}
