use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use iengine::cnf::convert::to_cnf;
use iengine::cnf::dimacs::to_dimacs;
use iengine::config::{DEFAULT_MAX_TT_SYMBOLS, EngineConfig};
use iengine::entail::refutation_formula;
use iengine::gen::{HornGenOptions, random_horn_problem, random_problem};
use iengine::problem::load_problem;
use iengine::solver::Backend;
use iengine::strategy::{Method, run};

#[derive(Debug, Parser)]
#[command(name = "iengine")]
#[command(about = "Propositional inference engine")]
struct Cli {
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    Ask {
        path: String,
        #[arg(value_name = "TT|MC|FC|BC|DPLL")]
        method: String,
        #[arg(long, value_enum, default_value_t = Backend::Dpll)]
        backend: Backend,
        #[arg(long)]
        no_pure_literals: bool,
        #[arg(long, default_value_t = DEFAULT_MAX_TT_SYMBOLS)]
        max_tt_symbols: usize,
    },
    Cnf {
        path: String,
        #[arg(long)]
        emit: String,
    },
    Gen {
        #[arg(long, default_value_t = 8)]
        symbols: usize,
        #[arg(long, default_value_t = 8)]
        rules: usize,
        #[arg(long, default_value_t = 2)]
        facts: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        general: bool,
        #[arg(long, default_value_t = 3)]
        depth: usize,
        #[arg(long)]
        out: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Cmd::Ask {
            path,
            method,
            backend,
            no_pure_literals,
            max_tt_symbols,
        } => ask_cmd(&path, &method, backend, !no_pure_literals, max_tt_symbols)?,
        Cmd::Cnf { path, emit } => cnf_cmd(&path, &emit)?,
        Cmd::Gen {
            symbols,
            rules,
            facts,
            seed,
            general,
            depth,
            out,
        } => gen_cmd(symbols, rules, facts, seed, general, depth, out.as_deref())?,
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn ask_cmd(
    path: &str,
    method: &str,
    backend: Backend,
    pure_literals: bool,
    max_tt_symbols: usize,
) -> Result<()> {
    let problem = load_problem(path)?;
    let method = method.parse::<Method>()?;
    let config = EngineConfig {
        method,
        backend,
        pure_literals,
        max_truth_table_symbols: max_tt_symbols,
    };
    let answer = run(&problem, &config).with_context(|| format!("{method} failed on {path}"))?;
    println!("{answer}");
    Ok(())
}

fn cnf_cmd(path: &str, emit: &str) -> Result<()> {
    let problem = load_problem(path)?;
    let kb = problem.kb.to_sentence();
    let formula = refutation_formula(kb.as_ref(), &problem.query);
    let cnf = to_cnf(&formula)?;
    std::fs::write(emit, to_dimacs(&cnf)).with_context(|| format!("failed to write {emit}"))?;
    println!(
        "sentences={} vars={} clauses={}",
        problem.kb.len(),
        cnf.num_vars(),
        cnf.clauses.len()
    );
    Ok(())
}

fn gen_cmd(
    symbols: usize,
    rules: usize,
    facts: usize,
    seed: u64,
    general: bool,
    depth: usize,
    out: Option<&str>,
) -> Result<()> {
    let problem = if general {
        random_problem(symbols, rules, depth, seed)?
    } else {
        random_horn_problem(&HornGenOptions {
            symbols,
            facts,
            rules,
            seed,
            ..HornGenOptions::default()
        })?
    };
    match out {
        Some(path) => std::fs::write(path, problem.to_string())
            .with_context(|| format!("failed to write {path}"))?,
        None => std::io::stdout().write_all(problem.to_string().as_bytes())?,
    }
    Ok(())
}
