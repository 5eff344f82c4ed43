pub mod backward;
pub mod forward;
pub mod horn;
pub mod truth_table;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::config::EngineConfig;
use crate::entail::{EntailError, check};
use crate::log::targets;
use crate::logic::sentence::SentenceError;
use crate::problem::Problem;

use self::backward::backward_chain;
use self::forward::forward_chain;
use self::horn::{HornKb, query_symbol};
use self::truth_table::tt_entails;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    #[error(transparent)]
    Entail(#[from] EntailError),
    #[error("malformed sentence: {0}")]
    Malformed(#[from] SentenceError),
    #[error("truth table over {got} symbols exceeds the limit of {limit}")]
    TooManySymbols { got: usize, limit: usize },
    #[error("'{0}' is not a Horn clause")]
    NotHorn(String),
    #[error("chaining needs a single symbol as query, got '{0}'")]
    QueryNotSymbol(String),
    #[error("unknown method '{0}', expected TT, MC, FC, BC or DPLL")]
    UnknownMethod(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    TruthTable,
    ModelCheck,
    ForwardChaining,
    BackwardChaining,
    Dpll,
}

impl Method {
    pub const ALL: [Method; 5] = [
        Method::TruthTable,
        Method::ModelCheck,
        Method::ForwardChaining,
        Method::BackwardChaining,
        Method::Dpll,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Method::TruthTable => "TT",
            Method::ModelCheck => "MC",
            Method::ForwardChaining => "FC",
            Method::BackwardChaining => "BC",
            Method::Dpll => "DPLL",
        }
    }
}

impl FromStr for Method {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StrategyError::UnknownMethod(s.to_owned()))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    No,
    Yes,
    YesModels(u64),
    YesChain(Vec<String>),
}

impl Answer {
    pub fn is_yes(&self) -> bool {
        !matches!(self, Answer::No)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::No => write!(f, "NO"),
            Answer::Yes => write!(f, "YES"),
            Answer::YesModels(n) => write!(f, "YES: {n}"),
            Answer::YesChain(chain) => write!(f, "YES: {}", chain.join(", ")),
        }
    }
}

pub fn run(problem: &Problem, config: &EngineConfig) -> Result<Answer, StrategyError> {
    log::debug!(
        target: targets::STRATEGY,
        "{} on {} sentence(s), query '{}'",
        config.method,
        problem.kb.len(),
        problem.query
    );
    let answer = match config.method {
        Method::TruthTable => {
            let out = tt_entails(&problem.kb, &problem.query, config.max_truth_table_symbols)?;
            if out.entailed {
                Answer::YesModels(out.kb_models)
            } else {
                Answer::No
            }
        }
        Method::ModelCheck => {
            let out = tt_entails(&problem.kb, &problem.query, config.max_truth_table_symbols)?;
            yes_no(out.entailed)
        }
        Method::ForwardChaining | Method::BackwardChaining => {
            let horn = HornKb::from_kb(&problem.kb)?;
            let query = query_symbol(&problem.query)?;
            let out = if config.method == Method::ForwardChaining {
                forward_chain(&horn, query)
            } else {
                backward_chain(&horn, query)
            };
            if out.entailed {
                Answer::YesChain(out.chain)
            } else {
                Answer::No
            }
        }
        Method::Dpll => {
            let mut backend = config.backend.build(config.dpll_options());
            let kb = problem.kb.to_sentence();
            let report = check(kb.as_ref(), &problem.query, &mut *backend)?;
            yes_no(report.verdict.holds())
        }
    };
    Ok(answer)
}

fn yes_no(holds: bool) -> Answer {
    if holds { Answer::Yes } else { Answer::No }
}

#[cfg(test)]
mod tests {
    use super::{Answer, Method, StrategyError};

    #[test]
    fn method_codes_parse_case_insensitively() {
        assert_eq!("dpll".parse::<Method>(), Ok(Method::Dpll));
        assert_eq!(" fc ".parse::<Method>(), Ok(Method::ForwardChaining));
        assert_eq!(
            "XX".parse::<Method>(),
            Err(StrategyError::UnknownMethod("XX".into()))
        );
        for m in Method::ALL {
            assert_eq!(m.code().parse::<Method>(), Ok(m));
        }
    }

    #[test]
    fn answers_render_like_the_cli_prints_them() {
        assert_eq!(Answer::No.to_string(), "NO");
        assert_eq!(Answer::Yes.to_string(), "YES");
        assert_eq!(Answer::YesModels(3).to_string(), "YES: 3");
        assert_eq!(
            Answer::YesChain(vec!["a".into(), "b".into()]).to_string(),
            "YES: a, b"
        );
    }
}
