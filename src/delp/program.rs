use super::{derivation::DerivationSearch, Argument, Literal, Rule, RuleKind};
use anyhow::{anyhow, Result};
use log::{debug, warn};
use std::collections::{BTreeSet, HashMap};

/// A defeasible logic program, made of facts, strict rules and defeasible rules.
///
/// Facts must be ground literals. Rules may contain variables; in this case, the program must be
/// grounded (see [ground](Self::ground)) before reasoning on it, since the reasoning methods only consider
/// ground literals.
///
/// # Example
///
/// ```
/// # use crudelp::delp::{DefeasibleLogicProgram, Literal, Rule};
/// let mut program = DefeasibleLogicProgram::default();
/// program.add_fact(Literal::positive("penguin", &["tweety"])).unwrap();
/// program.add_rule(Rule::new_strict(
///     Literal::positive("bird", &["X"]),
///     vec![Literal::positive("penguin", &["X"])],
/// ));
/// program.add_rule(Rule::new_defeasible(
///     Literal::positive("flies", &["X"]),
///     vec![Literal::positive("bird", &["X"])],
/// ));
/// let ground_program = program.ground();
/// assert_eq!(1, ground_program.n_strict_rules());
/// assert_eq!(3, ground_program.arguments().len());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefeasibleLogicProgram {
    facts: BTreeSet<Literal>,
    strict_rules: BTreeSet<Rule>,
    defeasible_rules: BTreeSet<Rule>,
}

fn forward_chaining<'a, I>(mut known: BTreeSet<Literal>, rules: I) -> (BTreeSet<Literal>, usize)
where
    I: IntoIterator<Item = &'a Rule>,
{
    let mut remaining = rules.into_iter().collect::<Vec<&Rule>>();
    loop {
        let (fired, not_fired): (Vec<&Rule>, Vec<&Rule>) = remaining
            .into_iter()
            .partition(|r| r.body().iter().all(|l| known.contains(l)));
        remaining = not_fired;
        if fired.is_empty() {
            break;
        }
        fired.into_iter().for_each(|r| {
            known.insert(r.head().clone());
        });
    }
    (known, remaining.len())
}

fn has_complementary_pair(literals: &BTreeSet<Literal>) -> bool {
    literals
        .iter()
        .any(|l| !l.is_negated() && literals.contains(&l.complement()))
}

impl DefeasibleLogicProgram {
    /// Adds a fact to the program.
    ///
    /// Facts must be ground; if this is not the case, an error is returned.
    /// Returns `true` iff the fact was not already in the program.
    pub fn add_fact(&mut self, fact: Literal) -> Result<bool> {
        if !fact.is_ground() {
            return Err(anyhow!("facts must be ground, but {} is not", fact));
        }
        Ok(self.facts.insert(fact))
    }

    /// Adds a rule to the program.
    ///
    /// Returns `true` iff the rule was not already in the program.
    pub fn add_rule(&mut self, rule: Rule) -> bool {
        match rule.kind() {
            RuleKind::Strict => self.strict_rules.insert(rule),
            RuleKind::Defeasible => self.defeasible_rules.insert(rule),
        }
    }

    /// Adds a strict rule to the program, given its head and its body.
    pub fn add_strict_rule(&mut self, head: Literal, body: Vec<Literal>) -> bool {
        self.add_rule(Rule::new_strict(head, body))
    }

    /// Adds a defeasible rule to the program, given its head and its body.
    pub fn add_defeasible_rule(&mut self, head: Literal, body: Vec<Literal>) -> bool {
        self.add_rule(Rule::new_defeasible(head, body))
    }

    /// Returns the facts of the program.
    pub fn facts(&self) -> &BTreeSet<Literal> {
        &self.facts
    }

    /// Returns the strict rules of the program.
    pub fn strict_rules(&self) -> &BTreeSet<Rule> {
        &self.strict_rules
    }

    /// Returns the defeasible rules of the program.
    pub fn defeasible_rules(&self) -> &BTreeSet<Rule> {
        &self.defeasible_rules
    }

    /// Returns the number of facts.
    pub fn n_facts(&self) -> usize {
        self.facts.len()
    }

    /// Returns the number of strict rules.
    pub fn n_strict_rules(&self) -> usize {
        self.strict_rules.len()
    }

    /// Returns the number of defeasible rules.
    pub fn n_defeasible_rules(&self) -> usize {
        self.defeasible_rules.len()
    }

    /// Returns `true` iff the literal is a fact of the program.
    pub fn contains_fact(&self, literal: &Literal) -> bool {
        self.facts.contains(literal)
    }

    /// Returns the rules (strict and defeasible) which conclusion is the given literal.
    pub fn rules_with_head(&self, literal: &Literal) -> Vec<&Rule> {
        self.iter_rules().filter(|r| r.head() == literal).collect()
    }

    /// Iterates over the strict rules, then over the defeasible ones.
    pub fn iter_rules(&self) -> impl Iterator<Item = &Rule> + '_ {
        self.strict_rules.iter().chain(self.defeasible_rules.iter())
    }

    /// Returns all the literals appearing in the program (facts, rule heads and rule bodies).
    pub fn literals(&self) -> BTreeSet<Literal> {
        self.facts
            .iter()
            .chain(
                self.iter_rules()
                    .flat_map(|r| std::iter::once(r.head()).chain(r.body().iter())),
            )
            .cloned()
            .collect()
    }

    /// Returns `true` iff the program has no variables.
    pub fn is_ground(&self) -> bool {
        self.iter_rules().all(|r| r.is_ground())
    }

    /// Returns the ground instance of this program.
    ///
    /// Each rule with variables is replaced by all its instances built from the constants appearing in the program (its Herbrand universe).
    /// If the program has no constant at all, the non-ground rules are discarded.
    pub fn ground(&self) -> DefeasibleLogicProgram {
        let universe = self
            .facts
            .iter()
            .flat_map(|f| f.constants())
            .chain(self.iter_rules().flat_map(|r| r.constants()))
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect::<Vec<String>>();
        let mut ground_program = DefeasibleLogicProgram {
            facts: self.facts.clone(),
            ..Default::default()
        };
        for rule in self.iter_rules() {
            let variables = rule.variables().into_iter().collect::<Vec<String>>();
            if variables.is_empty() {
                ground_program.add_rule(rule.clone());
                continue;
            }
            if universe.is_empty() {
                warn!("discarding rule {} since the program has no constant", rule);
                continue;
            }
            let mut indices = vec![0; variables.len()];
            'instances: loop {
                let substitution = variables
                    .iter()
                    .zip(indices.iter())
                    .map(|(v, i)| (v.clone(), universe[*i].clone()))
                    .collect::<HashMap<String, String>>();
                ground_program.add_rule(rule.substitute(&substitution));
                for i in indices.iter_mut() {
                    *i += 1;
                    if *i < universe.len() {
                        continue 'instances;
                    }
                    *i = 0;
                }
                break;
            }
        }
        debug!(
            "grounding produced {} strict and {} defeasible rules over {} constant(s)",
            ground_program.n_strict_rules(),
            ground_program.n_defeasible_rules(),
            universe.len()
        );
        ground_program
    }

    /// Computes the closure of a set of literals under the strict rules of the program and the provided rules.
    ///
    /// The provided rules are applied as if they were strict, whatever their kind.
    /// If `use_facts` is set, the facts of the program are added to the initial set of literals.
    pub fn strict_closure(
        &self,
        literals: &BTreeSet<Literal>,
        rules: &BTreeSet<Rule>,
        use_facts: bool,
    ) -> BTreeSet<Literal> {
        let mut init = literals.clone();
        if use_facts {
            init.extend(self.facts.iter().cloned());
        }
        forward_chaining(init, self.strict_rules.iter().chain(rules.iter())).0
    }

    /// Returns `true` iff the facts, the strict rules and the provided rules do not derive two complementary literals.
    pub fn is_consistent(&self, rules: &BTreeSet<Rule>) -> bool {
        !has_complementary_pair(&self.strict_closure(&BTreeSet::new(), rules, true))
    }

    /// Checks that the strict part of the program (facts and strict rules) is consistent.
    pub fn check_strict_consistency(&self) -> Result<()> {
        let closure = self.strict_closure(&BTreeSet::new(), &BTreeSet::new(), true);
        match closure
            .iter()
            .find(|l| !l.is_negated() && closure.contains(&l.complement()))
        {
            Some(l) => Err(anyhow!(
                "the strict part of the program derives both {} and {}",
                l,
                l.complement()
            )),
            None => Ok(()),
        }
    }

    /// Returns `true` iff two literals disagree, that is iff adding both to the strict part of the program leads to an inconsistency.
    pub fn disagree(&self, l1: &Literal, l2: &Literal) -> bool {
        let literals = [l1.clone(), l2.clone()].into_iter().collect();
        has_complementary_pair(&self.strict_closure(&literals, &BTreeSet::new(), true))
    }

    /// Returns `true` iff the facts and exactly the provided rules derive the goal, each rule being involved.
    pub fn derives(&self, rules: &BTreeSet<Rule>, goal: &Literal) -> bool {
        let (known, n_unfired) = forward_chaining(self.facts.clone(), rules.iter());
        n_unfired == 0 && known.contains(goal)
    }

    /// Returns all the arguments of this (ground) program.
    ///
    /// An argument is computed for each minimal, consistent set of defeasible rules deriving a literal.
    /// Literals derived by the strict part of the program get an argument with an empty support.
    pub fn arguments(&self) -> Vec<Argument> {
        let conclusions = self
            .facts
            .iter()
            .chain(self.iter_rules().map(|r| r.head()))
            .collect::<BTreeSet<&Literal>>();
        let arguments = conclusions
            .into_iter()
            .flat_map(|l| self.arguments_for(l))
            .collect::<Vec<Argument>>();
        debug!("the program has {} argument(s)", arguments.len());
        arguments
    }

    /// Returns the arguments of this (ground) program concluding the given literal.
    pub fn arguments_for(&self, literal: &Literal) -> Vec<Argument> {
        let supports = DerivationSearch::new(self, self.iter_rules())
            .derivations(literal)
            .into_iter()
            .map(|rules| {
                rules
                    .into_iter()
                    .filter(|r| r.is_defeasible())
                    .collect::<BTreeSet<Rule>>()
            })
            .filter(|s| self.is_consistent(s))
            .collect::<BTreeSet<BTreeSet<Rule>>>();
        supports
            .iter()
            .filter(|s| !supports.iter().any(|o| o != *s && o.is_subset(s)))
            .map(|s| Argument::new(literal.clone(), s.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delp::test_programs::{lit, tweety_program};

    #[test]
    fn test_non_ground_fact() {
        let mut program = DefeasibleLogicProgram::default();
        assert!(program.add_fact(lit("p(X)")).is_err());
    }

    #[test]
    fn test_duplicates() {
        let mut program = DefeasibleLogicProgram::default();
        assert!(program.add_fact(lit("p")).unwrap());
        assert!(!program.add_fact(lit("p")).unwrap());
        assert!(program.add_strict_rule(lit("q"), vec![lit("p")]));
        assert!(!program.add_strict_rule(lit("q"), vec![lit("p")]));
        assert!(program.add_defeasible_rule(lit("q"), vec![lit("p")]));
        assert_eq!(1, program.n_facts());
        assert_eq!(1, program.n_strict_rules());
        assert_eq!(1, program.n_defeasible_rules());
    }

    #[test]
    fn test_ground() {
        let program = tweety_program();
        assert!(program.is_ground());
        assert_eq!(1, program.n_strict_rules());
        assert_eq!(2, program.n_defeasible_rules());
        assert_eq!(
            vec![&Rule::new_strict(lit("bird(tweety)"), vec![lit("penguin(tweety)")])],
            program.rules_with_head(&lit("bird(tweety)"))
        );
        assert_eq!(program, program.ground());
    }

    #[test]
    fn test_ground_two_variables() {
        let mut program = DefeasibleLogicProgram::default();
        program.add_fact(lit("p(a)")).unwrap();
        program.add_fact(lit("p(b)")).unwrap();
        program.add_defeasible_rule(lit("q(X,Y)"), vec![lit("p(X)"), lit("p(Y)")]);
        assert_eq!(4, program.ground().n_defeasible_rules());
    }

    #[test]
    fn test_ground_without_constants() {
        let mut program = DefeasibleLogicProgram::default();
        program.add_defeasible_rule(lit("q(X)"), vec![lit("p(X)")]);
        assert_eq!(0, program.ground().n_defeasible_rules());
    }

    #[test]
    fn test_strict_closure() {
        let program = tweety_program();
        let closure = program.strict_closure(&BTreeSet::new(), &BTreeSet::new(), true);
        assert_eq!(
            vec![lit("bird(tweety)"), lit("penguin(tweety)")],
            closure.into_iter().collect::<Vec<_>>()
        );
        let rules = program.defeasible_rules().clone();
        let literals = [lit("penguin(tweety)")].into_iter().collect();
        let closure = program.strict_closure(&literals, &rules, false);
        assert!(closure.contains(&lit("flies(tweety)")));
        assert!(closure.contains(&lit("~flies(tweety)")));
    }

    #[test]
    fn test_consistency() {
        let program = tweety_program();
        program.check_strict_consistency().unwrap();
        assert!(!program.is_consistent(program.defeasible_rules()));
        let one_rule = program.rules_with_head(&lit("flies(tweety)"))[0].clone();
        assert!(program.is_consistent(&[one_rule].into_iter().collect()));
    }

    #[test]
    fn test_strict_inconsistency() {
        let mut program = DefeasibleLogicProgram::default();
        program.add_fact(lit("p")).unwrap();
        program.add_strict_rule(lit("~p"), vec![]);
        assert!(program.check_strict_consistency().is_err());
    }

    #[test]
    fn test_disagree() {
        let program = tweety_program();
        assert!(program.disagree(&lit("flies(tweety)"), &lit("~flies(tweety)")));
        assert!(!program.disagree(&lit("flies(tweety)"), &lit("flies(tweety)")));
    }

    #[test]
    fn test_disagree_through_strict_rules() {
        let mut program = DefeasibleLogicProgram::default();
        program.add_strict_rule(lit("~c"), vec![lit("a"), lit("b")]);
        program.add_strict_rule(lit("c"), vec![lit("d")]);
        assert!(!program.disagree(&lit("a"), &lit("b")));
        assert!(!program.disagree(&lit("a"), &lit("d")));
        program.add_fact(lit("b")).unwrap();
        assert!(program.disagree(&lit("a"), &lit("d")));
    }

    #[test]
    fn test_arguments() {
        let program = tweety_program();
        let arguments = program.arguments();
        assert_eq!(4, arguments.len());
        let flies = program.arguments_for(&lit("flies(tweety)"));
        assert_eq!(1, flies.len());
        assert_eq!(1, flies[0].support().len());
        let not_flies = program.arguments_for(&lit("~flies(tweety)"));
        assert_eq!(1, not_flies.len());
        let bird = program.arguments_for(&lit("bird(tweety)"));
        assert_eq!(1, bird.len());
        assert!(bird[0].support().is_empty());
    }

    #[test]
    fn test_arguments_are_minimal() {
        let mut program = DefeasibleLogicProgram::default();
        program.add_fact(lit("a")).unwrap();
        program.add_defeasible_rule(lit("b"), vec![lit("a")]);
        program.add_defeasible_rule(lit("c"), vec![lit("b")]);
        program.add_defeasible_rule(lit("c"), vec![lit("a")]);
        let supports = program
            .arguments_for(&lit("c"))
            .iter()
            .map(|a| a.support().clone())
            .collect::<BTreeSet<BTreeSet<Rule>>>();
        let expected = [
            vec![Rule::new_defeasible(lit("c"), vec![lit("a")])],
            vec![
                Rule::new_defeasible(lit("b"), vec![lit("a")]),
                Rule::new_defeasible(lit("c"), vec![lit("b")]),
            ],
        ]
        .into_iter()
        .map(|s| s.into_iter().collect::<BTreeSet<Rule>>())
        .collect::<BTreeSet<BTreeSet<Rule>>>();
        assert_eq!(expected, supports);
    }

    #[test]
    fn test_arguments_drop_support_supersets() {
        let mut program = DefeasibleLogicProgram::default();
        program.add_fact(lit("a")).unwrap();
        program.add_defeasible_rule(lit("b"), vec![lit("a")]);
        program.add_strict_rule(lit("b"), vec![lit("a")]);
        program.add_defeasible_rule(lit("c"), vec![lit("b")]);
        let arguments = program.arguments_for(&lit("c"));
        assert_eq!(1, arguments.len());
        assert_eq!(
            vec![&Rule::new_defeasible(lit("c"), vec![lit("b")])],
            arguments[0].support().iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_premise_order_does_not_split_arguments() {
        let mut program = DefeasibleLogicProgram::default();
        program.add_fact(lit("a")).unwrap();
        program.add_fact(lit("b")).unwrap();
        program.add_defeasible_rule(lit("p"), vec![lit("a"), lit("b")]);
        program.add_defeasible_rule(lit("p"), vec![lit("b"), lit("a")]);
        assert_eq!(1, program.arguments_for(&lit("p")).len());
    }

    #[test]
    fn test_arguments_are_consistent() {
        let mut program = DefeasibleLogicProgram::default();
        program.add_fact(lit("a")).unwrap();
        program.add_defeasible_rule(lit("b"), vec![lit("a")]);
        program.add_defeasible_rule(lit("~b"), vec![lit("a")]);
        program.add_defeasible_rule(lit("c"), vec![lit("b"), lit("~b")]);
        assert!(program.arguments_for(&lit("c")).is_empty());
        assert_eq!(1, program.arguments_for(&lit("b")).len());
    }

    #[test]
    fn test_derives() {
        let program = tweety_program();
        let rules = program.rules_with_head(&lit("flies(tweety)"))
            .into_iter()
            .cloned()
            .collect::<BTreeSet<Rule>>();
        assert!(program.derives(&rules, &lit("flies(tweety)")));
        assert!(!program.derives(&rules, &lit("~flies(tweety)")));
        assert!(program.derives(&BTreeSet::new(), &lit("bird(tweety)")));
    }

    #[test]
    fn test_derives_rejects_unused_rules() {
        let mut program = DefeasibleLogicProgram::default();
        program.add_fact(lit("a")).unwrap();
        program.add_defeasible_rule(lit("b"), vec![lit("c")]);
        let rules = program.defeasible_rules().clone();
        assert!(!program.derives(&rules, &lit("a")));
    }
}
