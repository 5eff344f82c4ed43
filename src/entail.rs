use thiserror::Error;

use crate::cnf::convert::{ConvertError, to_cnf};
use crate::log::targets;
use crate::logic::assignment::Assignment;
use crate::logic::kb::KnowledgeBase;
use crate::logic::sentence::Sentence;
use crate::sat::dpll::named_model;
use crate::solver::dpll_backend::DpllBackend;
use crate::solver::{SatBackend, SolveResult, SolverStats};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntailError {
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error("{backend} returned a model that does not satisfy KB & ~query")]
    InvalidModel { backend: &'static str },
    #[error("{backend} could not decide KB & ~query")]
    Inconclusive { backend: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Entailed,
    NotEntailed { countermodel: Assignment },
}

impl Verdict {
    pub fn holds(&self) -> bool {
        matches!(self, Verdict::Entailed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntailReport {
    pub verdict: Verdict,
    pub backend: &'static str,
    pub vars: u32,
    pub clauses: usize,
    pub stats: SolverStats,
}

pub fn refutation_formula(kb: Option<&Sentence>, query: &Sentence) -> Sentence {
    let negated = Sentence::not(query.clone());
    match kb {
        Some(kb) => Sentence::conj(kb.clone(), negated),
        None => negated,
    }
}

pub fn check(
    kb: Option<&Sentence>,
    query: &Sentence,
    backend: &mut dyn SatBackend,
) -> Result<EntailReport, EntailError> {
    let formula = refutation_formula(kb, query);
    let cnf = to_cnf(&formula)?;
    let mut variables = query.symbols();
    if let Some(kb) = kb {
        variables.extend(kb.symbols());
    }

    let verdict = match backend.solve(&cnf) {
        SolveResult::Unsat => Verdict::Entailed,
        SolveResult::Sat => {
            let values = (0..=cnf.max_var())
                .map(|var| if var == 0 { None } else { backend.model_value(var) })
                .collect::<Vec<_>>();
            if cnf.eval_formula_partial(&values) != Some(true) {
                return Err(EntailError::InvalidModel {
                    backend: backend.backend_name(),
                });
            }
            let model = values.iter().map(|v| v.unwrap_or(true)).collect::<Vec<_>>();
            Verdict::NotEntailed {
                countermodel: named_model(&cnf, &model, &variables),
            }
        }
        SolveResult::Unknown => {
            return Err(EntailError::Inconclusive {
                backend: backend.backend_name(),
            });
        }
    };

    log::debug!(
        target: targets::ENTAIL,
        "{}: {} var(s), {} clause(s), entailed={}",
        backend.backend_name(),
        cnf.num_vars(),
        cnf.clauses.len(),
        verdict.holds()
    );

    Ok(EntailReport {
        verdict,
        backend: backend.backend_name(),
        vars: cnf.num_vars(),
        clauses: cnf.clauses.len(),
        stats: backend.stats(),
    })
}

pub fn entails(kb: &Sentence, query: &Sentence) -> Result<bool, EntailError> {
    let mut backend = DpllBackend::new();
    Ok(check(Some(kb), query, &mut backend)?.verdict.holds())
}

pub fn entails_kb(kb: &KnowledgeBase, query: &Sentence) -> Result<bool, EntailError> {
    let mut backend = DpllBackend::new();
    let kb = kb.to_sentence();
    Ok(check(kb.as_ref(), query, &mut backend)?.verdict.holds())
}
