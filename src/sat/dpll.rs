use std::collections::BTreeSet;

use crate::cnf::cnf::{Clause, Cnf, Lit, normalize_clause};
use crate::log::targets;
use crate::logic::assignment::Assignment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatResult {
    // slot 0 is unused
    Sat(Vec<bool>),
    Unsat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DpllOptions {
    pub pure_literals: bool,
}

impl Default for DpllOptions {
    fn default() -> Self {
        Self {
            pure_literals: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DpllStats {
    pub decisions: usize,
    pub propagations: usize,
    pub pure_literals: usize,
    pub conflicts: usize,
}

pub fn solve(cnf: &Cnf) -> SatResult {
    solve_with(cnf, DpllOptions::default()).0
}

pub fn solve_model(cnf: &Cnf) -> Option<Vec<bool>> {
    match solve(cnf) {
        SatResult::Sat(m) => Some(m),
        SatResult::Unsat => None,
    }
}

/// A model restricted to `variables`, or `None` when `cnf` has none.
pub fn satisfiable(cnf: &Cnf, variables: &BTreeSet<String>) -> Option<Assignment> {
    let model = solve_model(cnf)?;
    Some(named_model(cnf, &model, variables))
}

// names outside the formula, or without a slot in `model`, default to true
pub fn named_model(cnf: &Cnf, model: &[bool], variables: &BTreeSet<String>) -> Assignment {
    variables
        .iter()
        .map(|name| {
            let value = cnf
                .symbols
                .var(name)
                .and_then(|var| model.get(var as usize).copied())
                .unwrap_or(true);
            (name.clone(), value)
        })
        .collect()
}

// clauses only mention unassigned variables: assigning a literal drops the
// clauses it satisfies and strips its complement from the rest
#[derive(Debug, Clone)]
struct Frame {
    clauses: Vec<Clause>,
    assignment: Vec<Option<bool>>,
}

impl Frame {
    fn assign(&mut self, lit: Lit) {
        self.assignment[lit.var as usize] = Some(lit.sign);
        let falsified = lit.neg();
        self.clauses = std::mem::take(&mut self.clauses)
            .into_iter()
            .filter(|c| !c.contains(&lit))
            .map(|mut c| {
                c.retain(|&l| l != falsified);
                c
            })
            .collect();
    }
}

/// Depth-first DPLL over an explicit stack of frames. The `false` frame is
/// cloned before the `true` side is touched.
pub fn solve_with(cnf: &Cnf, opts: DpllOptions) -> (SatResult, DpllStats) {
    let mut stats = DpllStats::default();
    let num_slots = cnf.max_var() as usize + 1;
    let rank = name_rank(cnf, num_slots);

    let clauses = cnf
        .clauses
        .iter()
        .cloned()
        .filter_map(normalize_clause)
        .collect::<Vec<_>>();
    let mut stack = vec![Frame {
        clauses,
        assignment: vec![None; num_slots],
    }];

    while let Some(mut frame) = stack.pop() {
        loop {
            if frame.clauses.is_empty() {
                log::debug!(
                    target: targets::BRANCH,
                    "model found after {} decision(s), {} conflict(s)",
                    stats.decisions,
                    stats.conflicts
                );
                let model = frame
                    .assignment
                    .into_iter()
                    .map(|v| v.unwrap_or(true))
                    .collect();
                return (SatResult::Sat(model), stats);
            }

            if frame.clauses.iter().any(Vec::is_empty) {
                stats.conflicts += 1;
                log::debug!(target: targets::BRANCH, "conflict, {} branch(es) pending", stack.len());
                break;
            }

            if let Some(lit) = find_unit(&frame.clauses) {
                stats.propagations += 1;
                log::trace!(target: targets::PROPAGATION, "unit {}", cnf.lit_name(lit));
                frame.assign(lit);
                continue;
            }

            if opts.pure_literals {
                if let Some(lit) = find_pure(&frame.clauses, &rank) {
                    stats.pure_literals += 1;
                    log::trace!(target: targets::PROPAGATION, "pure {}", cnf.lit_name(lit));
                    frame.assign(lit);
                    continue;
                }
            }

            // non-empty clauses over free variables always offer a candidate
            let Some(var) = pick_branch_var(&frame.clauses, &rank) else {
                break;
            };
            stats.decisions += 1;
            log::debug!(
                target: targets::BRANCH,
                "decide {} at depth {}",
                cnf.lit_name(Lit::new(var, true)),
                stack.len()
            );
            let mut other = frame.clone();
            other.assign(Lit::new(var, false));
            stack.push(other);
            frame.assign(Lit::new(var, true));
        }
    }

    (SatResult::Unsat, stats)
}

fn find_unit(clauses: &[Clause]) -> Option<Lit> {
    clauses.iter().find(|c| c.len() == 1).map(|c| c[0])
}

fn find_pure(clauses: &[Clause], rank: &[usize]) -> Option<Lit> {
    const POS: u8 = 1;
    const NEG: u8 = 2;
    let mut seen = vec![0u8; rank.len()];
    for lit in clauses.iter().flatten() {
        seen[lit.var as usize] |= if lit.sign { POS } else { NEG };
    }
    (1..seen.len())
        .filter_map(|var| match seen[var] {
            POS => Some(Lit::new(var as u32, true)),
            NEG => Some(Lit::new(var as u32, false)),
            _ => None,
        })
        .min_by_key(|lit| rank[lit.var as usize])
}

fn pick_branch_var(clauses: &[Clause], rank: &[usize]) -> Option<u32> {
    clauses
        .iter()
        .flatten()
        .map(|lit| lit.var)
        .min_by_key(|&var| rank[var as usize])
}

// position of each variable when sorted by name; unnamed ids sort last
fn name_rank(cnf: &Cnf, num_slots: usize) -> Vec<usize> {
    let mut order = (1..num_slots as u32).collect::<Vec<_>>();
    order.sort_by(|&a, &b| {
        match (cnf.symbols.name(a), cnf.symbols.name(b)) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.cmp(&b),
        }
    });
    let mut rank = vec![0usize; num_slots];
    for (pos, var) in order.into_iter().enumerate() {
        rank[var as usize] = pos;
    }
    rank
}
