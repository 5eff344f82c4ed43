pub mod dpll_backend;
pub mod varisat;

use crate::cnf::cnf::Cnf;
use crate::sat::dpll::DpllOptions;

use self::dpll_backend::DpllBackend;
use self::varisat::VarisatBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveResult {
    Sat,
    Unsat,
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    pub solve_calls: usize,
    pub decisions: usize,
    pub propagations: usize,
    pub conflicts: usize,
}

pub trait SatBackend {
    fn solve(&mut self, cnf: &Cnf) -> SolveResult;
    /// Value of `var` in the model of the last satisfiable call.
    fn model_value(&self, var: u32) -> Option<bool>;
    fn stats(&self) -> SolverStats;
    fn backend_name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    #[default]
    Dpll,
    Varisat,
}

impl Backend {
    pub fn build(self, opts: DpllOptions) -> Box<dyn SatBackend> {
        match self {
            Backend::Dpll => Box::new(DpllBackend::with_options(opts)),
            Backend::Varisat => Box::new(VarisatBackend::new()),
        }
    }
}
