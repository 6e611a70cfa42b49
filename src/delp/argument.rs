use super::{derivation::DerivationSearch, DefeasibleLogicProgram, Literal, Rule};
use std::collections::BTreeSet;
use std::fmt::Display;

/// An argument of a defeasible logic program.
///
/// An argument is made of a conclusion and a support, which is a set of defeasible rules allowing to derive the conclusion
/// when combined with the facts and the strict rules of the program.
/// Two arguments are equal iff they have the same conclusion and the same support;
/// the strict rules involved in the derivation are not part of the identity of an argument (see [ArgumentCompletion](crate::delp::ArgumentCompletion)).
///
/// Arguments are usually obtained through [DefeasibleLogicProgram::arguments].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Argument {
    conclusion: Literal,
    support: BTreeSet<Rule>,
}

impl Argument {
    /// Builds a new argument.
    ///
    /// No check is made on the fact the support actually derives the conclusion.
    pub fn new(conclusion: Literal, support: BTreeSet<Rule>) -> Self {
        Argument {
            conclusion,
            support,
        }
    }

    /// Returns the conclusion of the argument.
    pub fn conclusion(&self) -> &Literal {
        &self.conclusion
    }

    /// Returns the support of the argument.
    pub fn support(&self) -> &BTreeSet<Rule> {
        &self.support
    }

    /// Returns `true` iff the support is empty, i.e. the conclusion is strictly derived.
    pub fn is_strict(&self) -> bool {
        self.support.is_empty()
    }

    /// Returns `true` iff the support of this argument is included in the support of the other one.
    pub fn is_subargument_of(&self, other: &Argument) -> bool {
        self.support.is_subset(&other.support)
    }

    /// Returns the conclusion of this argument together with the conclusions of the rules of its support.
    pub fn conclusions(&self) -> BTreeSet<Literal> {
        std::iter::once(&self.conclusion)
            .chain(self.support.iter().map(|r| r.head()))
            .cloned()
            .collect()
    }

    /// Returns the subargument of this argument concluding the given literal, if any.
    ///
    /// The support of the returned argument is the smallest subset of this argument's support that derives the literal.
    pub fn subargument_for(
        &self,
        literal: &Literal,
        program: &DefeasibleLogicProgram,
    ) -> Option<Argument> {
        if literal == &self.conclusion {
            return Some(self.clone());
        }
        DerivationSearch::new(
            program,
            self.support.iter().chain(program.strict_rules().iter()),
        )
        .derivations(literal)
        .into_iter()
        .map(|rules| {
            rules
                .into_iter()
                .filter(|r| r.is_defeasible())
                .collect::<BTreeSet<Rule>>()
        })
        .min_by(|s1, s2| s1.len().cmp(&s2.len()).then_with(|| s1.cmp(s2)))
        .map(|support| Argument::new(literal.clone(), support))
    }

    /// Returns the subargument of this argument which conclusion disagrees with the given literal.
    ///
    /// The conclusion of the argument is checked first, then the conclusions of its support rules.
    /// If no subargument disagrees with the literal, the argument itself is returned.
    pub fn disagreement_subargument(
        &self,
        literal: &Literal,
        program: &DefeasibleLogicProgram,
    ) -> Argument {
        std::iter::once(&self.conclusion)
            .chain(
                self.support
                    .iter()
                    .map(|r| r.head())
                    .filter(|h| *h != &self.conclusion),
            )
            .filter(|c| program.disagree(literal, c))
            .find_map(|c| self.subargument_for(c, program))
            .unwrap_or_else(|| self.clone())
    }

    /// Returns the literals that may be used to attack this argument.
    ///
    /// These are the literals of the program language (and their complements) disagreeing with one of the conclusions of this argument.
    /// Literals inconsistent with the strict part of the program on their own are ignored.
    pub fn attack_opportunities(&self, program: &DefeasibleLogicProgram) -> BTreeSet<Literal> {
        let conclusions = self.conclusions();
        program
            .literals()
            .into_iter()
            .flat_map(|l| [l.complement(), l])
            .collect::<BTreeSet<Literal>>()
            .into_iter()
            .filter(|l| !program.disagree(l, l))
            .filter(|l| conclusions.iter().any(|c| program.disagree(l, c)))
            .collect()
    }
}

impl Display for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rules = self
            .support
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<String>>();
        write!(f, "<{{{}}}, {}>", rules.join("; "), self.conclusion)
    }
}
