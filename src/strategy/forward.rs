use std::collections::{HashMap, HashSet, VecDeque};

use super::horn::{ChainOutcome, HornKb};

pub fn forward_chain(kb: &HornKb, query: &str) -> ChainOutcome {
    let mut remaining = kb.rules.iter().map(|r| r.premises.len()).collect::<Vec<_>>();
    let mut uses = HashMap::<&str, Vec<usize>>::new();
    for (idx, rule) in kb.rules.iter().enumerate() {
        for p in &rule.premises {
            uses.entry(p.as_str()).or_default().push(idx);
        }
    }

    let mut agenda = kb.facts.iter().map(String::as_str).collect::<VecDeque<_>>();
    let mut inferred = HashSet::<&str>::new();
    let mut chain = Vec::<String>::new();

    while let Some(p) = agenda.pop_front() {
        if !inferred.insert(p) {
            continue;
        }
        chain.push(p.to_owned());
        if p == query {
            return ChainOutcome {
                entailed: true,
                chain,
            };
        }
        for &idx in uses.get(p).map(Vec::as_slice).unwrap_or_default() {
            remaining[idx] -= 1;
            if remaining[idx] == 0 {
                agenda.push_back(kb.rules[idx].conclusion.as_str());
            }
        }
    }

    ChainOutcome {
        entailed: false,
        chain,
    }
}

#[cfg(test)]
mod tests {
    use super::forward_chain;
    use crate::logic::kb::KnowledgeBase;
    use crate::strategy::horn::HornKb;

    fn horn(text: &str) -> HornKb {
        let kb = match KnowledgeBase::parse(text) {
            Ok(v) => v,
            Err(e) => panic!("kb parse failed: {e}"),
        };
        match HornKb::from_kb(&kb) {
            Ok(v) => v,
            Err(e) => panic!("not horn: {e}"),
        }
    }

    #[test]
    fn chain_stops_at_query() {
        let kb = horn("p2=> p3; p3 => p1; c => e; b&e => f; f&g => h; p1=>d; p1&p3 => c; a; b; p2;");
        let out = forward_chain(&kb, "d");
        assert!(out.entailed);
        assert_eq!(out.chain, vec!["a", "b", "p2", "p3", "p1", "d"]);
    }

    #[test]
    fn unreachable_query() {
        let kb = horn("a => b; b => a; c");
        let out = forward_chain(&kb, "a");
        assert!(!out.entailed);
        assert_eq!(out.chain, vec!["c"]);
    }

    #[test]
    fn conjunctive_premise_waits_for_all() {
        let kb = horn("a & b => c; a");
        assert!(!forward_chain(&kb, "c").entailed);
        let kb = horn("a & b => c; a; b");
        assert!(forward_chain(&kb, "c").entailed);
    }
}
