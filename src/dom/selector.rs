//! Minimal CSS selector engine for the in-memory document.
//!
//! Supports selector lists of compound selectors: optional tag (or `*`),
//! `.class`, `#id`, attribute tests (`[a]`, `[a=v]`, `[a^=v]`, `[a$=v]`,
//! `[a*=v]`, `[a~=v]`) and the `:invalid` pseudo-class. Combinators are
//! rejected; the page markup contract never needs them.

#[cfg(test)]
#[path = "selector_test.rs"]
mod selector_test;

use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unsupported selector syntax at offset {pos} in {selector:?}")]
    Unsupported { selector: String, pos: usize },
    #[error("unterminated attribute selector in {0:?}")]
    Unterminated(String),
}

/// What a selector needs to know about an element.
pub trait SelectorSubject {
    fn tag(&self) -> String;
    fn attr(&self, name: &str) -> Option<String>;
    /// Whether the element fails constraint validation.
    fn is_invalid(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
    Suffix(String),
    Contains(String),
    Word(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Condition {
    Class(String),
    Id(String),
    Attr { name: String, op: AttrOp },
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    conditions: Vec<Condition>,
}

/// A parsed selector list (`a, b, c`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

impl Selector {
    /// Parse a selector list.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] for empty input, combinators, unknown
    /// pseudo-classes, or malformed attribute tests.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut cursor = Cursor::new(input);
        let mut alternatives = Vec::new();
        loop {
            cursor.skip_ws();
            alternatives.push(cursor.compound()?);
            cursor.skip_ws();
            match cursor.peek() {
                None => break,
                Some(',') => cursor.bump(),
                Some(_) => return Err(cursor.unsupported()),
            }
        }
        Ok(Self { alternatives })
    }

    /// Whether any alternative matches `subject`.
    pub fn matches(&self, subject: &impl SelectorSubject) -> bool {
        self.alternatives.iter().any(|compound| compound.matches(subject))
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Compound {
    fn matches(&self, subject: &impl SelectorSubject) -> bool {
        if let Some(tag) = &self.tag {
            if !subject.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        self.conditions.iter().all(|cond| cond.matches(subject))
    }
}

impl Condition {
    fn matches(&self, subject: &impl SelectorSubject) -> bool {
        match self {
            Self::Class(class) => subject
                .attr("class")
                .is_some_and(|list| list.split_whitespace().any(|c| c == class)),
            Self::Id(id) => subject.attr("id").is_some_and(|v| v == *id),
            Self::Invalid => subject.is_invalid(),
            Self::Attr { name, op } => {
                let Some(value) = subject.attr(name) else {
                    return false;
                };
                match op {
                    AttrOp::Exists => true,
                    AttrOp::Equals(want) => value == *want,
                    AttrOp::Prefix(want) => value.starts_with(want.as_str()),
                    AttrOp::Suffix(want) => value.ends_with(want.as_str()),
                    AttrOp::Contains(want) => value.contains(want.as_str()),
                    AttrOp::Word(want) => value.split_whitespace().any(|w| w == want),
                }
            }
        }
    }
}

struct Cursor<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self { source, chars: source.chars().collect(), pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn unsupported(&self) -> SelectorError {
        SelectorError::Unsupported { selector: self.source.to_owned(), pos: self.pos }
    }

    fn ident(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn required_ident(&mut self) -> Result<String, SelectorError> {
        let ident = self.ident();
        if ident.is_empty() {
            return Err(self.unsupported());
        }
        Ok(ident)
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();
        let mut saw_any = false;
        match self.peek() {
            Some('*') => {
                self.bump();
                saw_any = true;
            }
            Some(c) if is_ident_char(c) => {
                compound.tag = Some(self.ident().to_ascii_lowercase());
            }
            _ => {}
        }
        loop {
            match self.peek() {
                Some('.') => {
                    self.bump();
                    compound.conditions.push(Condition::Class(self.required_ident()?));
                }
                Some('#') => {
                    self.bump();
                    compound.conditions.push(Condition::Id(self.required_ident()?));
                }
                Some('[') => {
                    self.bump();
                    compound.conditions.push(self.attribute()?);
                }
                Some(':') => {
                    self.bump();
                    let pseudo = self.required_ident()?;
                    if pseudo != "invalid" {
                        return Err(self.unsupported());
                    }
                    compound.conditions.push(Condition::Invalid);
                }
                _ => break,
            }
        }
        if compound.tag.is_none() && compound.conditions.is_empty() && !saw_any {
            return Err(if self.source.trim().is_empty() {
                SelectorError::Empty
            } else {
                self.unsupported()
            });
        }
        Ok(compound)
    }

    fn attribute(&mut self) -> Result<Condition, SelectorError> {
        self.skip_ws();
        let name = self.required_ident()?;
        self.skip_ws();
        let op_char = match self.peek() {
            None => return Err(SelectorError::Unterminated(self.source.to_owned())),
            Some(']') => {
                self.bump();
                return Ok(Condition::Attr { name, op: AttrOp::Exists });
            }
            Some('=') => {
                self.bump();
                '='
            }
            Some(c @ ('^' | '$' | '*' | '~')) => {
                self.bump();
                if self.peek() != Some('=') {
                    return Err(self.unsupported());
                }
                self.bump();
                c
            }
            Some(_) => return Err(self.unsupported()),
        };
        self.skip_ws();
        let value = self.attribute_value()?;
        self.skip_ws();
        if self.peek() != Some(']') {
            return Err(SelectorError::Unterminated(self.source.to_owned()));
        }
        self.bump();
        let op = match op_char {
            '^' => AttrOp::Prefix(value),
            '$' => AttrOp::Suffix(value),
            '*' => AttrOp::Contains(value),
            '~' => AttrOp::Word(value),
            _ => AttrOp::Equals(value),
        };
        Ok(Condition::Attr { name, op })
    }

    fn attribute_value(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let start = self.pos;
                while let Some(c) = self.peek() {
                    if c == quote {
                        let value = self.chars[start..self.pos].iter().collect();
                        self.bump();
                        return Ok(value);
                    }
                    self.bump();
                }
                Err(SelectorError::Unterminated(self.source.to_owned()))
            }
            _ => self.required_ident(),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
