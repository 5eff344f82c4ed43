use std::path::PathBuf;

use iengine::gen::{HornGenOptions, random_horn_problem, random_problem};
use iengine::problem::{load_problem, parse_problem_str};

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("iengine-{}-{name}", std::process::id()))
}

#[test]
fn loads_problem_from_disk() {
    let path = scratch("horn.txt");
    std::fs::write(&path, "TELL\na; a => b;\nb => c\nASK\nc\n").expect("write");
    let problem = load_problem(&path).expect("load");
    std::fs::remove_file(&path).expect("cleanup");
    assert_eq!(problem.kb.len(), 3);
    assert_eq!(problem.query.as_symbol(), Some("c"));
}

#[test]
fn missing_file_names_the_path() {
    let path = scratch("does-not-exist.txt");
    let err = match load_problem(&path) {
        Ok(_) => panic!("loaded a missing file"),
        Err(e) => e,
    };
    assert!(err.to_string().contains("does-not-exist.txt"), "{err}");
}

#[test]
fn generated_problems_read_back() {
    for seed in 0..25 {
        let horn = random_horn_problem(&HornGenOptions {
            seed,
            ..HornGenOptions::default()
        })
        .expect("gen");
        assert_eq!(parse_problem_str(&horn.to_string()).expect("reparse"), horn);

        let general = random_problem(4, 3, 3, seed).expect("gen");
        assert_eq!(parse_problem_str(&general.to_string()).expect("reparse"), general);
    }
}

#[test]
fn different_seeds_differ() {
    let a = random_problem(6, 4, 3, 1).expect("gen");
    let b = random_problem(6, 4, 3, 2).expect("gen");
    assert_ne!(a, b);
}
