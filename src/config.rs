use crate::sat::dpll::DpllOptions;
use crate::solver::Backend;
use crate::strategy::Method;

pub const DEFAULT_MAX_TT_SYMBOLS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub method: Method,
    pub backend: Backend,
    pub pure_literals: bool,
    pub max_truth_table_symbols: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            method: Method::Dpll,
            backend: Backend::Dpll,
            pure_literals: true,
            max_truth_table_symbols: DEFAULT_MAX_TT_SYMBOLS,
        }
    }
}

impl EngineConfig {
    pub fn with_method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn dpll_options(&self) -> DpllOptions {
        DpllOptions {
            pure_literals: self.pure_literals,
        }
    }
}
