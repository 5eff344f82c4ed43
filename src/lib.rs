pub mod cnf {
    pub mod cnf;
    pub mod convert;
    pub mod dimacs;
    pub mod nnf;
}
pub mod config;
pub mod entail;
pub mod gen;
pub mod log;
pub mod logic {
    pub mod assignment;
    pub mod kb;
    pub mod parse;
    pub mod sentence;
}
pub mod problem;
pub mod sat {
    pub mod dpll;
}
pub mod solver;
pub mod strategy;
