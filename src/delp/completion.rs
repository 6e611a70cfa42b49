use super::{derivation::DerivationSearch, Argument, DefeasibleLogicProgram, Literal, Rule};
use log::debug;
use std::collections::BTreeSet;
use std::fmt::Display;

/// An argument together with the strict rules used in one of its derivations.
///
/// An argument only records the defeasible rules it relies on.
/// Its conclusion may be derived in several ways depending on the strict rules involved; each of these ways is a completion.
/// The rules of a completion (the support and the strict rules) derive the conclusion from the facts, each of them being involved in the derivation.
///
/// # Example
///
/// ```
/// # use crudelp::delp::{ArgumentCompletion, DefeasibleLogicProgram, Literal};
/// let mut program = DefeasibleLogicProgram::default();
/// program.add_fact(Literal::positive("a", &[])).unwrap();
/// program.add_fact(Literal::positive("b", &[])).unwrap();
/// program.add_strict_rule(Literal::positive("c", &[]), vec![Literal::positive("a", &[])]);
/// program.add_strict_rule(Literal::positive("c", &[]), vec![Literal::positive("b", &[])]);
/// program.add_defeasible_rule(Literal::positive("d", &[]), vec![Literal::positive("c", &[])]);
/// let argument = program.arguments_for(&Literal::positive("d", &[])).remove(0);
/// assert_eq!(2, ArgumentCompletion::completions(&argument, &program).len());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ArgumentCompletion {
    argument: Argument,
    completion: BTreeSet<Rule>,
}

impl ArgumentCompletion {
    /// Computes all the completions of an argument.
    ///
    /// The search is exponential in the number of alternative strict derivations of shared sub-literals.
    /// An empty set is returned iff the support of the argument and the strict rules cannot derive its conclusion, which denotes a malformed argument.
    pub fn completions(
        argument: &Argument,
        program: &DefeasibleLogicProgram,
    ) -> BTreeSet<ArgumentCompletion> {
        Self::completions_with_limit(argument, program, None)
    }

    /// Computes the completions of an argument, stopping after a given number of completions if a limit is provided.
    pub fn completions_with_limit(
        argument: &Argument,
        program: &DefeasibleLogicProgram,
        max_completions: Option<usize>,
    ) -> BTreeSet<ArgumentCompletion> {
        let completions = DerivationSearch::new(
            program,
            argument.support().iter().chain(program.strict_rules().iter()),
        )
        .with_limit(max_completions)
        .derivations(argument.conclusion())
        .into_iter()
        .filter(|rules| {
            rules.iter().filter(|r| r.is_defeasible()).count() == argument.support().len()
        })
        .map(|rules| ArgumentCompletion {
            argument: argument.clone(),
            completion: rules.into_iter().filter(|r| r.is_strict()).collect(),
        })
        .collect::<BTreeSet<ArgumentCompletion>>();
        if completions.is_empty() {
            debug!("argument {} has no completion", argument);
        }
        completions
    }

    /// Returns the completed argument.
    pub fn argument(&self) -> &Argument {
        &self.argument
    }

    /// Returns the strict rules of this completion.
    pub fn completion(&self) -> &BTreeSet<Rule> {
        &self.completion
    }

    /// Returns the rules of the derivation, that is the support of the argument and the strict rules of the completion.
    pub fn rules(&self) -> BTreeSet<Rule> {
        self.argument
            .support()
            .iter()
            .chain(self.completion.iter())
            .cloned()
            .collect()
    }

    /// Returns the non-trivial activation sets of this completion.
    ///
    /// An activation set is a set of literals which, together with the rules of the completion, derives the conclusion of the argument.
    /// They are enumerated by a depth-first search starting from the conclusion; each literal met is either kept in the activation set or expanded through a rule concluding it.
    /// An activation set is non-trivial iff at least one defeasible rule is expanded to obtain it.
    pub fn non_trivial_activation_sets(&self) -> BTreeSet<BTreeSet<Literal>> {
        let rules = self.rules();
        let mut result = BTreeSet::new();
        let mut stack = vec![(
            BTreeSet::new(),
            vec![self.argument.conclusion().clone()],
            false,
        )];
        while let Some((activation_set, mut pending, non_trivial)) = stack.pop() {
            let literal = match pending.pop() {
                Some(l) => l,
                None => {
                    if non_trivial {
                        result.insert(activation_set);
                    }
                    continue;
                }
            };
            for rule in rules.iter().filter(|r| r.head() == &literal) {
                let mut expanded_pending = pending.clone();
                for premise in rule.body() {
                    if !expanded_pending.contains(premise) && !activation_set.contains(premise) {
                        expanded_pending.push(premise.clone());
                    }
                }
                stack.push((
                    activation_set.clone(),
                    expanded_pending,
                    non_trivial || rule.is_defeasible(),
                ));
            }
            let mut kept_set = activation_set;
            kept_set.insert(literal);
            stack.push((kept_set, pending, non_trivial));
        }
        result
    }
}

impl Display for ArgumentCompletion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rules = self
            .completion
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<String>>();
        write!(f, "{} + {{{}}}", self.argument, rules.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delp::test_programs::{lit, single_argument, tweety_program};

    fn set(literals: &[&str]) -> BTreeSet<Literal> {
        literals.iter().map(|l| lit(l)).collect()
    }

    #[test]
    fn test_completions_tweety() {
        let program = tweety_program();
        let flies = single_argument(&program, "flies(tweety)");
        let completions = ArgumentCompletion::completions(&flies, &program);
        assert_eq!(1, completions.len());
        let completion = completions.iter().next().unwrap();
        assert!(completion.completion().is_empty());
        assert_eq!(&flies, completion.argument());
    }

    #[test]
    fn test_completions_are_sound() {
        let mut program = DefeasibleLogicProgram::default();
        program.add_fact(lit("a")).unwrap();
        program.add_fact(lit("b")).unwrap();
        program.add_strict_rule(lit("c"), vec![lit("a")]);
        program.add_strict_rule(lit("c"), vec![lit("b")]);
        program.add_defeasible_rule(lit("d"), vec![lit("c")]);
        program.add_strict_rule(lit("e"), vec![lit("d")]);
        let e = single_argument(&program, "e");
        let completions = ArgumentCompletion::completions(&e, &program);
        assert_eq!(2, completions.len());
        for c in completions.iter() {
            assert_eq!(2, c.completion().len());
            assert!(program.derives(&c.rules(), &lit("e")));
        }
    }

    #[test]
    fn test_completions_must_use_the_whole_support() {
        let mut program = DefeasibleLogicProgram::default();
        program.add_fact(lit("a")).unwrap();
        program.add_strict_rule(lit("c"), vec![lit("a")]);
        let support = [Rule::new_defeasible(lit("c"), vec![lit("a")])]
            .into_iter()
            .collect();
        let argument = Argument::new(lit("c"), support);
        let completions = ArgumentCompletion::completions(&argument, &program);
        assert_eq!(1, completions.len());
        assert!(completions.iter().next().unwrap().completion().is_empty());
    }

    #[test]
    fn test_malformed_argument_has_no_completion() {
        let program = tweety_program();
        let argument = Argument::new(lit("flies(tweety)"), BTreeSet::new());
        assert!(ArgumentCompletion::completions(&argument, &program).is_empty());
    }

    #[test]
    fn test_completion_limit() {
        let mut program = DefeasibleLogicProgram::default();
        program.add_fact(lit("a")).unwrap();
        program.add_fact(lit("b")).unwrap();
        program.add_strict_rule(lit("c"), vec![lit("a")]);
        program.add_strict_rule(lit("c"), vec![lit("b")]);
        program.add_defeasible_rule(lit("d"), vec![lit("c")]);
        let d = single_argument(&program, "d");
        assert_eq!(
            1,
            ArgumentCompletion::completions_with_limit(&d, &program, Some(1)).len()
        );
    }

    #[test]
    fn test_activation_sets_tweety() {
        let program = tweety_program();
        let flies = single_argument(&program, "flies(tweety)");
        let completion = ArgumentCompletion::completions(&flies, &program)
            .into_iter()
            .next()
            .unwrap();
        assert_eq!(
            vec![set(&["bird(tweety)"])],
            completion
                .non_trivial_activation_sets()
                .into_iter()
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_activation_sets_with_strict_rules() {
        let mut program = DefeasibleLogicProgram::default();
        program.add_fact(lit("y")).unwrap();
        program.add_fact(lit("b")).unwrap();
        program.add_defeasible_rule(lit("x"), vec![lit("y")]);
        program.add_strict_rule(lit("h"), vec![lit("x"), lit("b")]);
        let h = single_argument(&program, "h");
        let completion = ArgumentCompletion::completions(&h, &program)
            .into_iter()
            .next()
            .unwrap();
        let sets = completion.non_trivial_activation_sets();
        assert_eq!(
            vec![set(&["b", "y"])],
            sets.into_iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_strict_argument_has_no_non_trivial_activation_set() {
        let program = tweety_program();
        let bird = single_argument(&program, "bird(tweety)");
        for completion in ArgumentCompletion::completions(&bird, &program) {
            assert!(completion.non_trivial_activation_sets().is_empty());
        }
    }
}
