use anyhow::{Result, bail};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::logic::kb::KnowledgeBase;
use crate::logic::sentence::Sentence;
use crate::problem::Problem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HornGenOptions {
    pub symbols: usize,
    pub facts: usize,
    pub rules: usize,
    pub max_premises: usize,
    pub seed: u64,
}

impl Default for HornGenOptions {
    fn default() -> Self {
        Self {
            symbols: 8,
            facts: 2,
            rules: 8,
            max_premises: 2,
            seed: 0,
        }
    }
}

pub fn symbol_names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("p{i}")).collect()
}

pub fn random_horn_problem(opts: &HornGenOptions) -> Result<Problem> {
    if opts.symbols == 0 {
        bail!("symbols must be >= 1");
    }
    if opts.max_premises == 0 {
        bail!("max_premises must be >= 1");
    }
    let names = symbol_names(opts.symbols);
    let mut rng = ChaCha8Rng::seed_from_u64(opts.seed);
    let mut kb = KnowledgeBase::new();

    for _ in 0..opts.rules {
        let n = rng.random_range(1..=opts.max_premises);
        let mut premises = (0..n)
            .map(|_| Sentence::symbol(pick(&mut rng, &names)))
            .collect::<Vec<_>>();
        let premise = if premises.len() == 1 {
            premises.remove(0)
        } else {
            Sentence::Conjunction(premises)
        };
        let conclusion = Sentence::symbol(pick(&mut rng, &names));
        kb.tell(Sentence::implies(premise, conclusion));
    }
    for _ in 0..opts.facts {
        kb.tell(Sentence::symbol(pick(&mut rng, &names)));
    }

    let query = Sentence::symbol(pick(&mut rng, &names));
    Ok(Problem { kb, query })
}

pub fn random_problem(symbols: usize, sentences: usize, depth: usize, seed: u64) -> Result<Problem> {
    if symbols == 0 {
        bail!("symbols must be >= 1");
    }
    let names = symbol_names(symbols);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let kb = (0..sentences)
        .map(|_| random_sentence(&mut rng, &names, depth))
        .collect::<KnowledgeBase>();
    let query = random_sentence(&mut rng, &names, depth);
    Ok(Problem { kb, query })
}

fn random_sentence(rng: &mut ChaCha8Rng, names: &[String], depth: usize) -> Sentence {
    if depth == 0 || rng.random::<f64>() < 0.3 {
        return Sentence::symbol(pick(rng, names));
    }
    let sub = |rng: &mut ChaCha8Rng| random_sentence(rng, names, depth - 1);
    match rng.random_range(0..5) {
        0 => Sentence::not(sub(rng)),
        1 => {
            let n = rng.random_range(2..=3);
            Sentence::Conjunction((0..n).map(|_| sub(rng)).collect())
        }
        2 => {
            let n = rng.random_range(2..=3);
            Sentence::Disjunction((0..n).map(|_| sub(rng)).collect())
        }
        3 => Sentence::implies(sub(rng), sub(rng)),
        _ => Sentence::iff(sub(rng), sub(rng)),
    }
}

// callers reject an empty symbol list up front
fn pick(rng: &mut ChaCha8Rng, names: &[String]) -> String {
    names[rng.random_range(0..names.len())].clone()
}
