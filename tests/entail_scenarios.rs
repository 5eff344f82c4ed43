use proptest::prelude::*;

use iengine::entail::{Verdict, check, entails, entails_kb};
use iengine::gen::random_problem;
use iengine::logic::kb::KnowledgeBase;
use iengine::logic::parse::parse_sentence;
use iengine::logic::sentence::Sentence;
use iengine::solver::dpll_backend::DpllBackend;
use iengine::solver::varisat::VarisatBackend;

fn s(text: &str) -> Sentence {
    parse_sentence(text).expect("parse sentence")
}

fn kb(text: &str) -> KnowledgeBase {
    KnowledgeBase::parse(text).expect("parse kb")
}

#[test]
fn modus_ponens_is_entailed() {
    let kb = kb("a; a => b").to_sentence().expect("non-empty kb");
    assert!(entails(&kb, &s("b")).expect("entails"));
}

#[test]
fn unrelated_query_has_countermodel() {
    let mut backend = DpllBackend::new();
    let report = check(Some(&s("a")), &s("b"), &mut backend).expect("check");
    match report.verdict {
        Verdict::NotEntailed { countermodel } => {
            assert_eq!(countermodel.get("a"), Some(true));
            assert_eq!(countermodel.get("b"), Some(false));
            assert_eq!(countermodel.len(), 2);
        }
        Verdict::Entailed => panic!("a should not entail b"),
    }
}

#[test]
fn chained_implications_need_no_decisions() {
    let kb = kb("p => q; q => r; p").to_sentence().expect("non-empty kb");
    let mut backend = DpllBackend::new();
    let report = check(Some(&kb), &s("r"), &mut backend).expect("check");
    assert_eq!(report.verdict, Verdict::Entailed);
    assert_eq!(report.stats.decisions, 0);
    assert!(report.stats.propagations >= 2);
}

#[test]
fn disjunctive_syllogism() {
    let kb = kb("a || b; ~a").to_sentence().expect("non-empty kb");
    assert!(entails(&kb, &s("b")).expect("entails"));
    assert!(!entails(&kb, &s("a")).expect("entails"));
}

#[test]
fn empty_kb_entails_only_tautologies() {
    let empty = KnowledgeBase::new();
    assert!(!entails_kb(&empty, &s("a")).expect("entails"));
    assert!(entails_kb(&empty, &s("a || ~a")).expect("entails"));
    assert!(entails_kb(&empty, &s("a => a")).expect("entails"));
    assert!(!entails_kb(&empty, &s("a => b")).expect("entails"));

    let mut backend = DpllBackend::new();
    let report = check(None, &s("a"), &mut backend).expect("check");
    match report.verdict {
        Verdict::NotEntailed { countermodel } => assert_eq!(countermodel.get("a"), Some(false)),
        Verdict::Entailed => panic!("empty kb entailed a"),
    }
}

#[test]
fn negated_compound_queries() {
    let kb = kb("a; ~b").to_sentence().expect("non-empty kb");
    for (query, want) in [
        ("~(a & b)", true),
        ("~(a || b)", false),
        ("~(a => b)", true),
        ("~(b => a)", false),
        ("~(a <=> b)", true),
        ("~(a <=> ~b)", false),
        ("~~a", true),
        ("~~~a", false),
    ] {
        assert_eq!(
            entails(&kb, &s(query)).expect("entails"),
            want,
            "a & ~b |= {query}"
        );
    }
}

#[test]
fn negated_compounds_in_the_kb() {
    let cases = [
        ("~(a || b)", "~b", true),
        ("~(a => b)", "a & ~b", true),
        ("~(a <=> b); a", "~b", true),
        ("~(a & b); a", "~b", true),
        ("~(a & b)", "~a", false),
    ];
    for (kb_text, query, want) in cases {
        let kb = kb(kb_text);
        assert_eq!(
            entails_kb(&kb, &s(query)).expect("entails"),
            want,
            "{kb_text} |= {query}"
        );
    }
}

#[test]
fn contradictory_kb_entails_everything() {
    let kb = kb("a; ~a").to_sentence().expect("non-empty kb");
    assert!(entails(&kb, &s("z")).expect("entails"));
    assert!(entails(&kb, &s("~z & y")).expect("entails"));
}

#[test]
fn biconditional_chains() {
    let kb = kb("a <=> b; b <=> c; c").to_sentence().expect("non-empty kb");
    assert!(entails(&kb, &s("a")).expect("entails"));
    assert!(entails(&kb, &s("a & b")).expect("entails"));
    assert!(!entails(&kb, &s("~a")).expect("entails"));
}

#[test]
fn monotonic_under_extra_conjuncts() {
    let base = kb("a => b; b => c; a");
    let query = s("c");
    assert!(entails_kb(&base, &query).expect("entails"));

    let mut grown = base.clone();
    for extra in ["d || e", "~e", "c => f", "x <=> ~y"] {
        grown.tell(s(extra));
        assert!(entails_kb(&grown, &query).expect("entails"), "after {extra}");
    }
}

#[test]
fn repeated_calls_agree() {
    let kb = kb("a || b; b => c; a => c").to_sentence().expect("non-empty kb");
    let q = s("c");
    let first = entails(&kb, &q).expect("entails");
    for _ in 0..5 {
        assert_eq!(entails(&kb, &q).expect("entails"), first);
    }
    assert!(first);
}

#[test]
fn varisat_backend_gives_same_verdicts() {
    let cases = [
        ("a; a => b", "b", true),
        ("a", "b", false),
        ("a || b; ~a", "b", true),
        ("a <=> b; ~b", "a", false),
    ];
    for (kb_text, query, want) in cases {
        let kb = kb(kb_text).to_sentence().expect("non-empty kb");
        let mut backend = VarisatBackend::new();
        let report = check(Some(&kb), &s(query), &mut backend).expect("check");
        assert_eq!(report.verdict.holds(), want, "{kb_text} |= {query}");
        assert_eq!(report.backend, "varisat");
        if let Verdict::NotEntailed { countermodel } = report.verdict {
            assert_eq!(kb.eval(&countermodel), Some(true));
            assert_eq!(s(query).eval(&countermodel), Some(false));
        }
    }
}

proptest! {
    #[test]
    fn extra_conjunct_keeps_entailment(seed in 0u64..5_000, extra_seed in 0u64..5_000) {
        let problem = random_problem(4, 3, 2, seed).expect("gen");
        let extra = random_problem(4, 1, 2, extra_seed).expect("gen");
        let held = entails_kb(&problem.kb, &problem.query).expect("entails");
        if held {
            let mut grown = problem.kb.clone();
            for s in extra.kb.sentences() {
                grown.tell(s.clone());
            }
            prop_assert!(entails_kb(&grown, &problem.query).expect("entails"), "{}", problem);
        }
    }

    #[test]
    fn entails_is_deterministic(seed in 0u64..5_000) {
        let problem = random_problem(5, 3, 3, seed).expect("gen");
        let first = entails_kb(&problem.kb, &problem.query).expect("entails");
        for _ in 0..3 {
            prop_assert_eq!(entails_kb(&problem.kb, &problem.query).expect("entails"), first);
        }
    }
}
