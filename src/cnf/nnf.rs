use crate::logic::sentence::Sentence;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connective {
    And,
    Or,
}

enum Task<'a> {
    // sentence to rewrite, `false` when it sits under an odd number of negations
    Visit(&'a Sentence, bool),
    Build(Connective, usize),
}

enum Shape<'a> {
    Leaf(&'a Sentence, bool),
    Node(Connective, Vec<Shape<'a>>),
}

/// Operand counts are carried over as found, so a malformed node stays
/// malformed for the caller to reject.
pub fn to_nnf(sentence: &Sentence) -> Sentence {
    let mut tasks = vec![Task::Visit(sentence, true)];
    let mut out = Vec::<Sentence>::new();

    while let Some(task) = tasks.pop() {
        match task {
            Task::Visit(node, positive) => match node {
                Sentence::Symbol(_) => {
                    if positive {
                        out.push(node.clone());
                    } else {
                        out.push(Sentence::not(node.clone()));
                    }
                }
                Sentence::Negation(inner) => tasks.push(Task::Visit(inner, !positive)),
                Sentence::Conjunction(ops) => {
                    let conn = if positive { Connective::And } else { Connective::Or };
                    let kids = ops.iter().map(|op| Shape::Leaf(op, positive)).collect();
                    schedule(&mut tasks, Shape::Node(conn, kids));
                }
                Sentence::Disjunction(ops) => {
                    let conn = if positive { Connective::Or } else { Connective::And };
                    let kids = ops.iter().map(|op| Shape::Leaf(op, positive)).collect();
                    schedule(&mut tasks, Shape::Node(conn, kids));
                }
                Sentence::Implication(a, b) => {
                    let shape = if positive {
                        // a => b  ~>  ~a || b
                        Shape::Node(Connective::Or, vec![Shape::Leaf(a, false), Shape::Leaf(b, true)])
                    } else {
                        // ~(a => b)  ~>  a & ~b
                        Shape::Node(Connective::And, vec![Shape::Leaf(a, true), Shape::Leaf(b, false)])
                    };
                    schedule(&mut tasks, shape);
                }
                Sentence::Biconditional(a, b) => {
                    let shape = if positive {
                        // (~a || b) & (a || ~b)
                        Shape::Node(
                            Connective::And,
                            vec![
                                Shape::Node(Connective::Or, vec![Shape::Leaf(a, false), Shape::Leaf(b, true)]),
                                Shape::Node(Connective::Or, vec![Shape::Leaf(a, true), Shape::Leaf(b, false)]),
                            ],
                        )
                    } else {
                        // (a & ~b) || (~a & b)
                        Shape::Node(
                            Connective::Or,
                            vec![
                                Shape::Node(Connective::And, vec![Shape::Leaf(a, true), Shape::Leaf(b, false)]),
                                Shape::Node(Connective::And, vec![Shape::Leaf(a, false), Shape::Leaf(b, true)]),
                            ],
                        )
                    };
                    schedule(&mut tasks, shape);
                }
            },
            Task::Build(conn, n) => {
                let start = out.len().saturating_sub(n);
                let kids = out.split_off(start);
                out.push(build(conn, kids));
            }
        }
    }

    // exactly one sentence is left for a single root visit
    out.pop().unwrap_or_else(|| sentence.clone())
}

fn schedule<'a>(tasks: &mut Vec<Task<'a>>, shape: Shape<'a>) {
    match shape {
        Shape::Leaf(node, positive) => tasks.push(Task::Visit(node, positive)),
        Shape::Node(conn, kids) => {
            tasks.push(Task::Build(conn, kids.len()));
            for kid in kids.into_iter().rev() {
                schedule(tasks, kid);
            }
        }
    }
}

fn build(conn: Connective, kids: Vec<Sentence>) -> Sentence {
    let mut flat = Vec::with_capacity(kids.len());
    for kid in kids {
        match (conn, kid) {
            (Connective::And, Sentence::Conjunction(inner)) if inner.len() >= 2 => flat.extend(inner),
            (Connective::Or, Sentence::Disjunction(inner)) if inner.len() >= 2 => flat.extend(inner),
            (_, other) => flat.push(other),
        }
    }
    match conn {
        Connective::And => Sentence::Conjunction(flat),
        Connective::Or => Sentence::Disjunction(flat),
    }
}

#[cfg(test)]
mod tests {
    use super::to_nnf;
    use crate::logic::parse::parse_sentence;
    use crate::logic::sentence::Sentence;

    fn nnf(src: &str) -> Sentence {
        let s = match parse_sentence(src) {
            Ok(v) => v,
            Err(e) => panic!("parse failed: {e}"),
        };
        to_nnf(&s)
    }

    fn sym(name: &str) -> Sentence {
        Sentence::symbol(name)
    }

    fn neg(name: &str) -> Sentence {
        Sentence::not(sym(name))
    }

    #[test]
    fn double_negation_cancels() {
        assert_eq!(nnf("~~a"), sym("a"));
        assert_eq!(nnf("~~~a"), neg("a"));
    }

    #[test]
    fn de_morgan_both_ways() {
        assert_eq!(nnf("~(a & b)"), Sentence::disj(neg("a"), neg("b")));
        assert_eq!(nnf("~(a || b)"), Sentence::conj(neg("a"), neg("b")));
    }

    #[test]
    fn implication_under_negation() {
        assert_eq!(nnf("a => b"), Sentence::disj(neg("a"), sym("b")));
        assert_eq!(nnf("~(a => b)"), Sentence::conj(sym("a"), neg("b")));
    }

    #[test]
    fn biconditional_both_polarities() {
        assert_eq!(
            nnf("a <=> b"),
            Sentence::conj(
                Sentence::disj(neg("a"), sym("b")),
                Sentence::disj(sym("a"), neg("b"))
            )
        );
        assert_eq!(
            nnf("~(a <=> b)"),
            Sentence::disj(
                Sentence::conj(sym("a"), neg("b")),
                Sentence::conj(neg("a"), sym("b"))
            )
        );
    }

    #[test]
    fn same_kind_nodes_flatten() {
        assert_eq!(
            nnf("~(a || (b || ~c))"),
            Sentence::Conjunction(vec![neg("a"), neg("b"), sym("c")])
        );
        let deep = nnf("~((a => b) <=> ~(c & (d || e)))");
        assert!(deep.is_nnf());
    }
}
