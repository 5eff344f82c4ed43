use std::collections::BTreeSet;
use std::fmt;

use super::parse::{ParseError, parse_sentence};
use super::sentence::Sentence;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    sentences: Vec<Sentence>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let sentences = text
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_sentence)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { sentences })
    }

    pub fn tell(&mut self, sentence: Sentence) {
        self.sentences.push(sentence);
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn symbols(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        for s in &self.sentences {
            out.extend(s.symbols());
        }
        out
    }

    pub fn to_sentence(&self) -> Option<Sentence> {
        match self.sentences.as_slice() {
            [] => None,
            [only] => Some(only.clone()),
            many => Some(Sentence::Conjunction(many.to_vec())),
        }
    }
}

impl FromIterator<Sentence> for KnowledgeBase {
    fn from_iter<I: IntoIterator<Item = Sentence>>(iter: I) -> Self {
        Self {
            sentences: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for KnowledgeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.sentences {
            write!(f, "{s}; ")?;
        }
        Ok(())
    }
}
