use super::{ComparisonCriterion, ComparisonResult};
use crate::delp::{Argument, ArgumentCompletion, DefeasibleLogicProgram, Literal};
use log::{debug, trace};
use std::collections::BTreeSet;

/// The generalized specificity criterion.
///
/// An argument is preferred to another one if it is more specific, that is if it relies on more precise information.
/// Specificity is computed with activation sets: an argument is more specific than another one iff
/// each non-trivial activation set of the former activates the latter, while the converse does not hold.
/// Otherwise, the arguments are not comparable; this criterion never considers two arguments as equal.
///
/// The activation sets of an argument are the ones of its completions (see [ArgumentCompletion]).
/// Since the number of completions may be exponential, an upper bound may be set on the number of completions considered per argument.
///
/// # Example
///
/// ```
/// # use crudelp::comparators::{ComparisonCriterion, ComparisonResult, GeneralizedSpecificity};
/// # use crudelp::delp::{DefeasibleLogicProgram, Literal};
/// let lit = |s: &str| Literal::try_from(s).unwrap();
/// let mut program = DefeasibleLogicProgram::default();
/// program.add_fact(lit("bird(tweety)")).unwrap();
/// program.add_fact(lit("penguin(tweety)")).unwrap();
/// program.add_strict_rule(lit("bird(tweety)"), vec![lit("penguin(tweety)")]);
/// program.add_defeasible_rule(lit("flies(tweety)"), vec![lit("bird(tweety)")]);
/// program.add_defeasible_rule(lit("~flies(tweety)"), vec![lit("penguin(tweety)")]);
/// let flies = program.arguments_for(&lit("flies(tweety)")).remove(0);
/// let not_flies = program.arguments_for(&lit("~flies(tweety)")).remove(0);
/// let criterion = GeneralizedSpecificity::default();
/// assert_eq!(ComparisonResult::IsBetter, criterion.compare(&not_flies, &flies, &program));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct GeneralizedSpecificity {
    max_completions: Option<usize>,
}

impl GeneralizedSpecificity {
    /// Builds the criterion, with no limit on the number of completions considered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the criterion, considering at most the given number of completions per argument.
    pub fn with_completion_limit(max_completions: Option<usize>) -> Self {
        GeneralizedSpecificity { max_completions }
    }

    fn activation_sets(
        &self,
        argument: &Argument,
        program: &DefeasibleLogicProgram,
    ) -> BTreeSet<BTreeSet<Literal>> {
        let sets = ArgumentCompletion::completions_with_limit(argument, program, self.max_completions)
            .iter()
            .flat_map(|c| c.non_trivial_activation_sets())
            .collect::<BTreeSet<BTreeSet<Literal>>>();
        debug!(
            "argument {} has {} non-trivial activation set(s)",
            argument,
            sets.len()
        );
        sets
    }

    /// Returns `true` iff the activation set, together with the support of the argument and the strict rules, derives the conclusion of the argument.
    ///
    /// The facts of the program are not considered.
    pub fn is_activated(
        argument: &Argument,
        activation_set: &BTreeSet<Literal>,
        program: &DefeasibleLogicProgram,
    ) -> bool {
        program
            .strict_closure(activation_set, argument.support(), false)
            .contains(argument.conclusion())
    }

    /// Returns `true` iff each activation set activates the argument.
    pub fn act_set_test(
        activation_sets: &BTreeSet<BTreeSet<Literal>>,
        argument: &Argument,
        program: &DefeasibleLogicProgram,
    ) -> bool {
        activation_sets
            .iter()
            .all(|s| Self::is_activated(argument, s, program))
    }
}

impl ComparisonCriterion for GeneralizedSpecificity {
    fn compare(
        &self,
        argument1: &Argument,
        argument2: &Argument,
        program: &DefeasibleLogicProgram,
    ) -> ComparisonResult {
        let test1 =
            Self::act_set_test(&self.activation_sets(argument1, program), argument2, program);
        let test2 =
            Self::act_set_test(&self.activation_sets(argument2, program), argument1, program);
        let result = match (test1, test2) {
            (true, false) => ComparisonResult::IsBetter,
            (false, true) => ComparisonResult::IsWorse,
            (true, true) | (false, false) => ComparisonResult::NotComparable,
        };
        trace!("comparing {} with {}: {}", argument1, argument2, result);
        result
    }
}
