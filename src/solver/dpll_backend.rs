use crate::cnf::cnf::Cnf;
use crate::sat::dpll::{DpllOptions, SatResult, solve_with};
use crate::solver::{SatBackend, SolveResult, SolverStats};

#[derive(Debug, Clone, Default)]
pub struct DpllBackend {
    opts: DpllOptions,
    last_model: Option<Vec<bool>>,
    stats: SolverStats,
}

impl DpllBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(opts: DpllOptions) -> Self {
        Self {
            opts,
            ..Self::default()
        }
    }
}

impl SatBackend for DpllBackend {
    fn solve(&mut self, cnf: &Cnf) -> SolveResult {
        self.stats.solve_calls += 1;
        let (result, run) = solve_with(cnf, self.opts);
        self.stats.decisions += run.decisions;
        self.stats.propagations += run.propagations + run.pure_literals;
        self.stats.conflicts += run.conflicts;
        match result {
            SatResult::Sat(model) => {
                self.last_model = Some(model);
                SolveResult::Sat
            }
            SatResult::Unsat => {
                self.last_model = None;
                SolveResult::Unsat
            }
        }
    }

    fn model_value(&self, var: u32) -> Option<bool> {
        let idx = var as usize;
        self.last_model
            .as_ref()
            .and_then(|m| if idx < m.len() { Some(m[idx]) } else { None })
    }

    fn stats(&self) -> SolverStats {
        self.stats
    }

    fn backend_name(&self) -> &'static str {
        "dpll"
    }
}
