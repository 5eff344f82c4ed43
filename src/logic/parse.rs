use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

use super::sentence::Sentence;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty sentence")]
    Empty,
    #[error("offset {pos}: unexpected character '{ch}'")]
    UnexpectedChar { pos: usize, ch: char },
    #[error("offset {pos}: expected {expected}, found '{found}'")]
    UnexpectedToken {
        pos: usize,
        expected: &'static str,
        found: String,
    },
    #[error("expected {expected} but the sentence ended")]
    UnexpectedEnd { expected: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Tok {
    Ident(String),
    Not,
    And,
    Or,
    Implies,
    Iff,
    LParen,
    RParen,
}

impl Tok {
    fn text(&self) -> String {
        match self {
            Tok::Ident(name) => name.clone(),
            Tok::Not => "~".to_owned(),
            Tok::And => "&".to_owned(),
            Tok::Or => "||".to_owned(),
            Tok::Implies => "=>".to_owned(),
            Tok::Iff => "<=>".to_owned(),
            Tok::LParen => "(".to_owned(),
            Tok::RParen => ")".to_owned(),
        }
    }
}

pub fn parse_sentence(src: &str) -> Result<Sentence, ParseError> {
    let toks = tokenize(src)?;
    if toks.is_empty() {
        return Err(ParseError::Empty);
    }
    let mut parser = Parser { toks, pos: 0 };
    let sentence = parser.biconditional()?;
    if let Some((pos, tok)) = parser.toks.get(parser.pos) {
        return Err(ParseError::UnexpectedToken {
            pos: *pos,
            expected: "end of sentence",
            found: tok.text(),
        });
    }
    Ok(sentence)
}

fn tokenize(src: &str) -> Result<Vec<(usize, Tok)>, ParseError> {
    let mut out = Vec::new();
    let mut chars = src.char_indices().peekable();
    while let Some((pos, ch)) = chars.next() {
        let tok = match ch {
            c if c.is_whitespace() => continue,
            '~' => Tok::Not,
            '&' => Tok::And,
            '(' => Tok::LParen,
            ')' => Tok::RParen,
            '|' => {
                expect_char(&mut chars, '|')?;
                Tok::Or
            }
            '=' => {
                expect_char(&mut chars, '>')?;
                Tok::Implies
            }
            '<' => {
                expect_char(&mut chars, '=')?;
                expect_char(&mut chars, '>')?;
                Tok::Iff
            }
            c if is_ident_char(c) => {
                let mut name = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if !is_ident_char(next) {
                        break;
                    }
                    name.push(next);
                    chars.next();
                }
                Tok::Ident(name)
            }
            c => return Err(ParseError::UnexpectedChar { pos, ch: c }),
        };
        out.push((pos, tok));
    }
    Ok(out)
}

fn expect_char(chars: &mut Peekable<CharIndices<'_>>, want: char) -> Result<(), ParseError> {
    match chars.next() {
        Some((_, c)) if c == want => Ok(()),
        Some((pos, c)) => Err(ParseError::UnexpectedChar { pos, ch: c }),
        None => Err(ParseError::UnexpectedEnd {
            expected: "operator",
        }),
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

struct Parser {
    toks: Vec<(usize, Tok)>,
    pos: usize,
}

impl Parser {
    fn eat(&mut self, want: &Tok) -> bool {
        match self.toks.get(self.pos) {
            Some((_, tok)) if tok == want => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn biconditional(&mut self) -> Result<Sentence, ParseError> {
        let mut left = self.implication()?;
        while self.eat(&Tok::Iff) {
            let right = self.implication()?;
            left = Sentence::iff(left, right);
        }
        Ok(left)
    }

    fn implication(&mut self) -> Result<Sentence, ParseError> {
        let mut left = self.conjunction()?;
        while self.eat(&Tok::Implies) {
            let right = self.conjunction()?;
            left = Sentence::implies(left, right);
        }
        Ok(left)
    }

    fn conjunction(&mut self) -> Result<Sentence, ParseError> {
        let mut ops = vec![self.disjunction()?];
        while self.eat(&Tok::And) {
            ops.push(self.disjunction()?);
        }
        Ok(collapse(ops, Sentence::Conjunction))
    }

    fn disjunction(&mut self) -> Result<Sentence, ParseError> {
        let mut ops = vec![self.negation()?];
        while self.eat(&Tok::Or) {
            ops.push(self.negation()?);
        }
        Ok(collapse(ops, Sentence::Disjunction))
    }

    fn negation(&mut self) -> Result<Sentence, ParseError> {
        if self.eat(&Tok::Not) {
            return Ok(Sentence::not(self.negation()?));
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<Sentence, ParseError> {
        let Some((pos, tok)) = self.toks.get(self.pos).cloned() else {
            return Err(ParseError::UnexpectedEnd {
                expected: "symbol or '('",
            });
        };
        self.pos += 1;
        match tok {
            Tok::Ident(name) => Ok(Sentence::Symbol(name)),
            Tok::LParen => {
                let inner = self.biconditional()?;
                match self.toks.get(self.pos) {
                    Some((_, Tok::RParen)) => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    Some((pos, other)) => Err(ParseError::UnexpectedToken {
                        pos: *pos,
                        expected: "')'",
                        found: other.text(),
                    }),
                    None => Err(ParseError::UnexpectedEnd { expected: "')'" }),
                }
            }
            other => Err(ParseError::UnexpectedToken {
                pos,
                expected: "symbol or '('",
                found: other.text(),
            }),
        }
    }
}

fn collapse(mut ops: Vec<Sentence>, build: fn(Vec<Sentence>) -> Sentence) -> Sentence {
    if ops.len() == 1 {
        if let Some(only) = ops.pop() {
            return only;
        }
    }
    build(ops)
}
