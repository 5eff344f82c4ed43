use crate::logic::assignment::Assignment;
use crate::logic::kb::KnowledgeBase;
use crate::logic::sentence::Sentence;

use super::StrategyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruthTableOutcome {
    pub entailed: bool,
    /// Models of the knowledge base seen before the answer was known; all
    /// of them when `entailed`.
    pub kb_models: u64,
}

pub fn tt_entails(
    kb: &KnowledgeBase,
    query: &Sentence,
    max_symbols: usize,
) -> Result<TruthTableOutcome, StrategyError> {
    for s in kb.sentences() {
        s.validate()?;
    }
    query.validate()?;

    let mut symbols = kb.symbols();
    symbols.extend(query.symbols());
    if symbols.len() > max_symbols || symbols.len() >= 64 {
        return Err(StrategyError::TooManySymbols {
            got: symbols.len(),
            limit: max_symbols,
        });
    }
    let symbols = symbols.into_iter().collect::<Vec<_>>();

    let mut model = Assignment::new();
    let mut kb_models = 0u64;
    for row in 0..(1u64 << symbols.len()) {
        for (bit, name) in symbols.iter().enumerate() {
            model.insert(name.as_str(), row & (1 << bit) != 0);
        }
        let kb_holds = kb.sentences().iter().all(|s| s.eval(&model) == Some(true));
        if !kb_holds {
            continue;
        }
        kb_models += 1;
        if query.eval(&model) != Some(true) {
            return Ok(TruthTableOutcome {
                entailed: false,
                kb_models,
            });
        }
    }

    Ok(TruthTableOutcome {
        entailed: true,
        kb_models,
    })
}
