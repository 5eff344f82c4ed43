use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::logic::kb::KnowledgeBase;
use crate::logic::parse::parse_sentence;
use crate::logic::sentence::Sentence;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub kb: KnowledgeBase,
    pub query: Sentence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Start,
    Tell,
    Ask,
}

pub fn load_problem(path: impl AsRef<Path>) -> Result<Problem> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    parse_problem_reader(BufReader::new(file))
        .with_context(|| format!("invalid problem file {}", path.display()))
}

pub fn parse_problem_str(s: &str) -> Result<Problem> {
    parse_problem_reader(std::io::Cursor::new(s.as_bytes()))
}

pub fn parse_problem_reader<R: BufRead>(r: R) -> Result<Problem> {
    let mut section = Section::Start;
    let mut kb = KnowledgeBase::new();
    let mut query = None::<Sentence>;

    for (idx, line) in r.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.context("failed to read problem line")?;
        let clean = line.trim();
        if clean.is_empty() {
            continue;
        }

        if clean.eq_ignore_ascii_case("TELL") {
            if section != Section::Start {
                bail!("line {}: unexpected TELL", line_no);
            }
            section = Section::Tell;
            continue;
        }
        if clean.eq_ignore_ascii_case("ASK") {
            if section != Section::Tell {
                bail!("line {}: ASK must follow a TELL section", line_no);
            }
            section = Section::Ask;
            continue;
        }

        match section {
            Section::Start => bail!("line {}: expected TELL", line_no),
            Section::Tell => {
                let part = KnowledgeBase::parse(clean)
                    .with_context(|| format!("line {}: invalid sentence", line_no))?;
                for s in part.sentences() {
                    kb.tell(s.clone());
                }
            }
            Section::Ask => {
                if query.is_some() {
                    bail!("line {}: only one query is allowed", line_no);
                }
                let text = clean.trim_end_matches(';').trim();
                let parsed = parse_sentence(text)
                    .with_context(|| format!("line {}: invalid query", line_no))?;
                query = Some(parsed);
            }
        }
    }

    match section {
        Section::Start => bail!("missing TELL section"),
        Section::Tell => bail!("missing ASK section"),
        Section::Ask => {}
    }
    let query = query.ok_or_else(|| anyhow::anyhow!("ASK section has no query"))?;
    Ok(Problem { kb, query })
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TELL")?;
        writeln!(f, "{}", self.kb.to_string().trim_end())?;
        writeln!(f, "ASK")?;
        writeln!(f, "{}", self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::parse_problem_str;
    use crate::logic::parse::parse_sentence;

    const CLASSIC: &str = "TELL\np2=> p3; p3 => p1; c => e; b&e => f; f&g => h; p1=>d; p1&p3 => c; a; b; p2;\nASK\nd\n";

    #[test]
    fn reads_tell_and_ask() {
        let p = parse_problem_str(CLASSIC).expect("problem");
        assert_eq!(p.kb.len(), 10);
        assert_eq!(p.query, parse_sentence("d").expect("query"));
    }

    #[test]
    fn keywords_ignore_case_and_blank_lines() {
        let p = parse_problem_str("\ntell\na; a => b\n\nb => c;\nask\n\nc;\n").expect("problem");
        assert_eq!(p.kb.len(), 3);
        assert_eq!(p.query.as_symbol(), Some("c"));
    }

    #[test]
    fn display_reads_back() {
        let p = parse_problem_str(CLASSIC).expect("problem");
        let again = parse_problem_str(&p.to_string()).expect("reparse");
        assert_eq!(p, again);
    }

    #[test]
    fn empty_tell_is_allowed() {
        let p = parse_problem_str("TELL\nASK\na\n").expect("problem");
        assert!(p.kb.is_empty());
    }

    #[test]
    fn structural_errors_name_the_line() {
        let cases = [
            ("a\nTELL\n", "line 1: expected TELL"),
            ("TELL\na\n", "missing ASK section"),
            ("TELL\na\nASK\n", "ASK section has no query"),
            ("TELL\na\nASK\nb\nc\n", "line 5: only one query is allowed"),
            ("ASK\na\n", "line 1: ASK must follow a TELL section"),
            ("TELL\nTELL\n", "line 2: unexpected TELL"),
            ("", "missing TELL section"),
        ];
        for (text, want) in cases {
            match parse_problem_str(text) {
                Ok(p) => panic!("accepted {text:?}: {p}"),
                Err(e) => assert_eq!(e.to_string(), want, "input {text:?}"),
            }
        }
    }

    #[test]
    fn bad_sentence_is_reported_with_line() {
        let err = match parse_problem_str("TELL\na & \nASK\na\n") {
            Ok(_) => panic!("accepted"),
            Err(e) => e,
        };
        assert_eq!(err.to_string(), "line 2: invalid sentence");
    }
}
