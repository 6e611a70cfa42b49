use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;

lazy_static! {
    static ref LITERAL_PATTERN: Regex =
        Regex::new(r"^\s*(~?)\s*([a-z][_[:alnum:]]*)\s*(?:\(([^()]*)\))?\s*$").unwrap();
    static ref TERM_PATTERN: Regex = Regex::new(r"^[_[:alnum:]]+$").unwrap();
}

/// A term of a literal: either a constant or a variable.
///
/// Variables are identifiers beginning with an uppercase letter or an underscore, as in Prolog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    /// A constant symbol
    Constant(String),
    /// A variable symbol
    Variable(String),
}

impl Term {
    /// Builds a term from its textual form, deciding whether it is a variable or a constant.
    pub fn new(name: &str) -> Self {
        match name.chars().next() {
            Some(c) if c.is_uppercase() || c == '_' => Term::Variable(name.to_string()),
            _ => Term::Constant(name.to_string()),
        }
    }

    /// Returns the name of the symbol.
    pub fn name(&self) -> &str {
        match self {
            Term::Constant(s) | Term::Variable(s) => s,
        }
    }

    /// Returns `true` iff this term is a variable.
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An atom, made of a predicate and a (possibly empty) list of terms.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom {
    predicate: String,
    terms: Vec<Term>,
}

impl Atom {
    /// Builds a new atom.
    pub fn new(predicate: &str, terms: Vec<Term>) -> Self {
        Atom {
            predicate: predicate.to_string(),
            terms,
        }
    }

    /// Returns the predicate of the atom.
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    /// Returns the terms of the atom.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }
}

impl Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.predicate)?;
        if !self.terms.is_empty() {
            let terms = self
                .terms
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<String>>();
            write!(f, "({})", terms.join(","))?;
        }
        Ok(())
    }
}

/// A literal, that is an atom or its (strong) negation.
///
/// Literals are value objects: two literals are equal iff they have the same atom and the same polarity.
/// They are totally ordered, allowing their use in ordered sets.
///
/// # Example
///
/// ```
/// # use crudelp::delp::Literal;
/// let l = Literal::try_from("~flies(tweety)").unwrap();
/// assert!(l.is_negated());
/// assert_eq!("flies(tweety)", l.complement().to_string());
/// assert_eq!(l, l.complement().complement());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    atom: Atom,
    negated: bool,
}

impl Literal {
    /// Builds a new literal.
    pub fn new(atom: Atom, negated: bool) -> Self {
        Literal { atom, negated }
    }

    /// Builds a positive literal with constant and variable terms given by their names.
    pub fn positive(predicate: &str, terms: &[&str]) -> Self {
        Literal::new(
            Atom::new(predicate, terms.iter().map(|t| Term::new(t)).collect()),
            false,
        )
    }

    /// Returns the atom of this literal.
    pub fn atom(&self) -> &Atom {
        &self.atom
    }

    /// Returns `true` iff this literal is a negated atom.
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Returns the complement of this literal.
    pub fn complement(&self) -> Literal {
        Literal {
            atom: self.atom.clone(),
            negated: !self.negated,
        }
    }

    /// Returns `true` iff this literal has no variable.
    pub fn is_ground(&self) -> bool {
        !self.atom.terms.iter().any(|t| t.is_variable())
    }

    /// Returns the names of the variables of this literal.
    pub fn variables(&self) -> BTreeSet<String> {
        self.atom
            .terms
            .iter()
            .filter(|t| t.is_variable())
            .map(|t| t.name().to_string())
            .collect()
    }

    /// Returns the names of the constants of this literal.
    pub fn constants(&self) -> BTreeSet<String> {
        self.atom
            .terms
            .iter()
            .filter(|t| !t.is_variable())
            .map(|t| t.name().to_string())
            .collect()
    }

    /// Replaces the variables by the constants they are mapped to.
    ///
    /// Unmapped variables are left unchanged.
    pub fn substitute(&self, substitution: &HashMap<String, String>) -> Literal {
        let terms = self
            .atom
            .terms
            .iter()
            .map(|t| match t {
                Term::Variable(v) => match substitution.get(v) {
                    Some(c) => Term::Constant(c.clone()),
                    None => t.clone(),
                },
                Term::Constant(_) => t.clone(),
            })
            .collect();
        Literal {
            atom: Atom::new(&self.atom.predicate, terms),
            negated: self.negated,
        }
    }
}

impl TryFrom<&str> for Literal {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let context = || format!(r#"while parsing literal "{}""#, value.trim());
        let captures = LITERAL_PATTERN
            .captures(value)
            .ok_or_else(|| anyhow!("syntax error"))
            .with_context(context)?;
        let negated = !captures.get(1).map(|m| m.as_str()).unwrap_or("").is_empty();
        let predicate = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
        let terms = match captures.get(3) {
            Some(m) => m
                .as_str()
                .split(',')
                .map(|t| {
                    let trimmed = t.trim();
                    if TERM_PATTERN.is_match(trimmed) {
                        Ok(Term::new(trimmed))
                    } else {
                        Err(anyhow!(r#"invalid term "{}""#, trimmed))
                    }
                })
                .collect::<Result<Vec<Term>>>()
                .with_context(context)?,
            None => vec![],
        };
        Ok(Literal::new(Atom::new(predicate, terms), negated))
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negated {
            write!(f, "~")?;
        }
        write!(f, "{}", self.atom)
    }
}
