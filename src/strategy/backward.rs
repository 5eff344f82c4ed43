use std::collections::HashSet;

use super::horn::{ChainOutcome, HornKb};

struct Search<'a> {
    kb: &'a HornKb,
    facts: HashSet<&'a str>,
    proved: HashSet<&'a str>,
    on_path: HashSet<&'a str>,
    chain: Vec<&'a str>,
}

/// A goal already on the current path counts as unproved there, which
/// cuts cycles such as `a => b; b => a`.
pub fn backward_chain(kb: &HornKb, query: &str) -> ChainOutcome {
    let mut search = Search {
        kb,
        facts: kb.facts.iter().map(String::as_str).collect(),
        proved: HashSet::new(),
        on_path: HashSet::new(),
        chain: Vec::new(),
    };
    let entailed = search.prove(query);
    ChainOutcome {
        entailed,
        chain: search.chain.into_iter().map(str::to_owned).collect(),
    }
}

impl<'a> Search<'a> {
    fn prove(&mut self, goal: &str) -> bool {
        if self.proved.contains(goal) {
            return true;
        }
        if let Some(&fact) = self.facts.get(goal) {
            self.mark(fact);
            return true;
        }
        let kb = self.kb;
        let Some(goal) = kb.rules.iter().map(|r| r.conclusion.as_str()).find(|&c| c == goal) else {
            return false;
        };
        if !self.on_path.insert(goal) {
            return false;
        }

        for rule in kb.rules_for(goal) {
            let mark = self.chain.len();
            if rule.premises.iter().all(|p| self.prove(p)) {
                self.on_path.remove(goal);
                self.mark(goal);
                return true;
            }
            // forget partial proofs of a rule that did not fire
            for name in self.chain.drain(mark..) {
                self.proved.remove(name);
            }
        }

        self.on_path.remove(goal);
        false
    }

    fn mark(&mut self, name: &'a str) {
        if self.proved.insert(name) {
            self.chain.push(name);
        }
    }
}
