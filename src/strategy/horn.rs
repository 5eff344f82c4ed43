use crate::logic::kb::KnowledgeBase;
use crate::logic::sentence::Sentence;

use super::StrategyError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HornRule {
    pub premises: Vec<String>,
    pub conclusion: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HornKb {
    pub facts: Vec<String>,
    pub rules: Vec<HornRule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainOutcome {
    pub entailed: bool,
    pub chain: Vec<String>,
}

impl HornKb {
    pub fn from_kb(kb: &KnowledgeBase) -> Result<Self, StrategyError> {
        let mut out = HornKb::default();
        let mut pending = kb.sentences().iter().rev().collect::<Vec<_>>();
        while let Some(s) = pending.pop() {
            match s {
                Sentence::Symbol(name) => {
                    if !out.facts.contains(name) {
                        out.facts.push(name.clone());
                    }
                }
                // a told conjunction is a list of told sentences
                Sentence::Conjunction(ops) => pending.extend(ops.iter().rev()),
                Sentence::Implication(premise, conclusion) => {
                    let Some(conclusion) = conclusion.as_symbol() else {
                        return Err(StrategyError::NotHorn(s.to_string()));
                    };
                    let premises = premise_symbols(premise)
                        .ok_or_else(|| StrategyError::NotHorn(s.to_string()))?;
                    out.rules.push(HornRule {
                        premises,
                        conclusion: conclusion.to_owned(),
                    });
                }
                _ => return Err(StrategyError::NotHorn(s.to_string())),
            }
        }
        Ok(out)
    }

    pub fn rules_for<'a>(&'a self, conclusion: &'a str) -> impl Iterator<Item = &'a HornRule> + 'a {
        self.rules.iter().filter(move |r| r.conclusion == conclusion)
    }
}

pub fn query_symbol(query: &Sentence) -> Result<&str, StrategyError> {
    query
        .as_symbol()
        .ok_or_else(|| StrategyError::QueryNotSymbol(query.to_string()))
}

fn premise_symbols(premise: &Sentence) -> Option<Vec<String>> {
    let mut out = Vec::<String>::new();
    let mut push = |name: &str| {
        if !out.iter().any(|p| p == name) {
            out.push(name.to_owned());
        }
    };
    match premise {
        Sentence::Symbol(name) => push(name),
        Sentence::Conjunction(ops) => {
            for op in ops {
                push(op.as_symbol()?);
            }
        }
        _ => return None,
    }
    Some(out)
}
