use crate::cnf::cnf::{Cnf, Lit};
use crate::solver::{SatBackend, SolveResult, SolverStats};
use varisat::ExtendFormula;

#[derive(Default)]
pub struct VarisatBackend {
    vars: Vec<varisat::Var>,
    last_model: Option<Vec<varisat::Lit>>,
    stats: SolverStats,
}

impl VarisatBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn to_var(&self, v: u32) -> Option<varisat::Var> {
        if v == 0 {
            return None;
        }
        self.vars.get(v as usize - 1).copied()
    }

    fn to_lit(&self, lit: Lit) -> Option<varisat::Lit> {
        let var = self.to_var(lit.var)?;
        Some(varisat::Lit::from_var(var, lit.sign))
    }
}

impl SatBackend for VarisatBackend {
    fn solve(&mut self, cnf: &Cnf) -> SolveResult {
        self.stats.solve_calls += 1;
        let mut inner = varisat::Solver::new();
        self.vars = (0..cnf.max_var()).map(|_| inner.new_var()).collect();
        for clause in &cnf.clauses {
            let lits = clause
                .iter()
                .copied()
                .filter_map(|x| self.to_lit(x))
                .collect::<Vec<_>>();
            inner.add_clause(&lits);
        }
        match inner.solve() {
            Ok(true) => {
                self.last_model = inner.model();
                SolveResult::Sat
            }
            Ok(false) => {
                self.last_model = None;
                SolveResult::Unsat
            }
            Err(e) => {
                log::error!("varisat failed: {e}");
                self.last_model = None;
                SolveResult::Unknown
            }
        }
    }

    fn model_value(&self, var: u32) -> Option<bool> {
        let v = self.to_var(var)?;
        let model = self.last_model.as_ref()?;
        let pos = v.lit(true);
        let neg = v.lit(false);
        if model.contains(&pos) {
            Some(true)
        } else if model.contains(&neg) {
            Some(false)
        } else {
            None
        }
    }

    fn stats(&self) -> SolverStats {
        self.stats
    }

    fn backend_name(&self) -> &'static str {
        "varisat"
    }
}
