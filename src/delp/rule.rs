use super::Literal;
use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;

/// The kind of a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleKind {
    /// A strict rule: its conclusion cannot be disputed once its premises hold
    Strict,
    /// A defeasible rule: a tentative reason to believe its conclusion
    Defeasible,
}

/// A rule of a defeasible logic program.
///
/// Rules are immutable once built.
/// The premises form a set: they are kept sorted and without duplicates, so the order in which they are given does not matter.
/// Strict rules are displayed with a `<-` arrow, defeasible rules with a `-<` one.
///
/// # Example
///
/// ```
/// # use crudelp::delp::{Literal, Rule};
/// let rule = Rule::new_defeasible(
///     Literal::positive("flies", &["X"]),
///     vec![Literal::positive("bird", &["X"])],
/// );
/// assert!(rule.is_defeasible());
/// assert_eq!("flies(X) -< bird(X)", rule.to_string());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rule {
    head: Literal,
    body: Vec<Literal>,
    kind: RuleKind,
}

impl Rule {
    /// Builds a new rule of the given kind.
    pub fn new(head: Literal, mut body: Vec<Literal>, kind: RuleKind) -> Self {
        body.sort_unstable();
        body.dedup();
        Rule { head, body, kind }
    }

    /// Builds a new strict rule.
    pub fn new_strict(head: Literal, body: Vec<Literal>) -> Self {
        Rule::new(head, body, RuleKind::Strict)
    }

    /// Builds a new defeasible rule.
    pub fn new_defeasible(head: Literal, body: Vec<Literal>) -> Self {
        Rule::new(head, body, RuleKind::Defeasible)
    }

    /// Returns the conclusion of the rule.
    pub fn head(&self) -> &Literal {
        &self.head
    }

    /// Returns the premises of the rule.
    pub fn body(&self) -> &[Literal] {
        &self.body
    }

    /// Returns the kind of the rule.
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Returns `true` iff this is a strict rule.
    pub fn is_strict(&self) -> bool {
        self.kind == RuleKind::Strict
    }

    /// Returns `true` iff this is a defeasible rule.
    pub fn is_defeasible(&self) -> bool {
        self.kind == RuleKind::Defeasible
    }

    /// Returns `true` iff no literal of this rule has a variable.
    pub fn is_ground(&self) -> bool {
        self.head.is_ground() && self.body.iter().all(|l| l.is_ground())
    }

    /// Returns the names of the variables appearing in the rule.
    pub fn variables(&self) -> BTreeSet<String> {
        std::iter::once(&self.head)
            .chain(self.body.iter())
            .flat_map(|l| l.variables())
            .collect()
    }

    /// Returns the names of the constants appearing in the rule.
    pub fn constants(&self) -> BTreeSet<String> {
        std::iter::once(&self.head)
            .chain(self.body.iter())
            .flat_map(|l| l.constants())
            .collect()
    }

    /// Applies a substitution to each literal of the rule.
    pub fn substitute(&self, substitution: &HashMap<String, String>) -> Rule {
        Rule::new(
            self.head.substitute(substitution),
            self.body
                .iter()
                .map(|l| l.substitute(substitution))
                .collect(),
            self.kind,
        )
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arrow = match self.kind {
            RuleKind::Strict => "<-",
            RuleKind::Defeasible => "-<",
        };
        write!(f, "{} {}", self.head, arrow)?;
        if !self.body.is_empty() {
            let body = self
                .body
                .iter()
                .map(|l| l.to_string())
                .collect::<Vec<String>>();
            write!(f, " {}", body.join(", "))?;
        }
        Ok(())
    }
}
