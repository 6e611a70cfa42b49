use super::{DefeasibleLogicProgram, Literal, Rule};
use log::{trace, warn};
use std::collections::{BTreeSet, HashMap};

/// A literal waiting to be discharged, with the chain of literals that required it.
#[derive(Clone)]
struct PendingLiteral {
    literal: Literal,
    ancestors: Vec<Literal>,
}

#[derive(Clone)]
struct PartialDerivation<'a> {
    rules_used: Vec<&'a Rule>,
    pending: Vec<PendingLiteral>,
}

impl PartialDerivation<'_> {
    fn is_pending_or_concluded(&self, literal: &Literal) -> bool {
        self.pending.iter().any(|p| &p.literal == literal)
            || self.rules_used.iter().any(|r| r.head() == literal)
    }
}

/// A backward chaining search enumerating the derivations of a literal.
///
/// The rules the search may use are given at construction time (the pool); the facts are the ones of the program.
/// Each derivation is returned as the set of rules it involves; facts are never expanded.
///
/// The search maintains a worklist of partial derivations.
/// At each step, a pending literal of a partial derivation is discharged, either because it is a fact or by branching on each rule of the pool concluding it.
/// A partial derivation with no pending literal is complete.
///
/// The number of derivations may be exponential in the number of alternative ways to derive shared sub-literals.
/// An upper bound on the number of derivations can be set; in this case, the search stops as soon as this number is reached.
pub(crate) struct DerivationSearch<'a> {
    program: &'a DefeasibleLogicProgram,
    rules_by_head: HashMap<&'a Literal, Vec<&'a Rule>>,
    max_derivations: Option<usize>,
}

impl<'a> DerivationSearch<'a> {
    pub(crate) fn new<I>(program: &'a DefeasibleLogicProgram, pool: I) -> Self
    where
        I: IntoIterator<Item = &'a Rule>,
    {
        let mut rules_by_head: HashMap<&'a Literal, Vec<&'a Rule>> = HashMap::new();
        for rule in pool {
            rules_by_head.entry(rule.head()).or_default().push(rule);
        }
        DerivationSearch {
            program,
            rules_by_head,
            max_derivations: None,
        }
    }

    pub(crate) fn with_limit(mut self, max_derivations: Option<usize>) -> Self {
        self.max_derivations = max_derivations;
        self
    }

    /// Returns the distinct derivations of the goal.
    ///
    /// Derivations in which a literal depends on itself are discarded: a rule is never applied if one of its premises is an ancestor of the literal under expansion,
    /// and the derivations that survive are checked to be sound by forward chaining.
    pub(crate) fn derivations(&self, goal: &Literal) -> Vec<BTreeSet<Rule>> {
        let mut found: BTreeSet<BTreeSet<Rule>> = BTreeSet::new();
        let mut worklist = vec![PartialDerivation {
            rules_used: vec![],
            pending: vec![PendingLiteral {
                literal: goal.clone(),
                ancestors: vec![],
            }],
        }];
        while let Some(mut partial) = worklist.pop() {
            let pending = match partial.pending.pop() {
                Some(p) => p,
                None => {
                    let rules = partial
                        .rules_used
                        .iter()
                        .map(|r| (*r).clone())
                        .collect::<BTreeSet<Rule>>();
                    if !self.program.derives(&rules, goal) {
                        trace!("discarding a cyclic derivation of {}", goal);
                        continue;
                    }
                    found.insert(rules);
                    if self.max_derivations.map_or(false, |m| found.len() >= m) {
                        warn!(
                            "derivation search for {} stopped after {} derivation(s)",
                            goal,
                            found.len()
                        );
                        break;
                    }
                    continue;
                }
            };
            if self.program.contains_fact(&pending.literal) {
                worklist.push(partial);
                continue;
            }
            let candidates = match self.rules_by_head.get(&pending.literal) {
                Some(rules) => rules,
                None => continue,
            };
            for rule in candidates.iter().copied() {
                if rule
                    .body()
                    .iter()
                    .any(|p| p == &pending.literal || pending.ancestors.contains(p))
                {
                    continue;
                }
                let mut next = partial.clone();
                next.rules_used.push(rule);
                let mut ancestors = pending.ancestors.clone();
                ancestors.push(pending.literal.clone());
                for premise in rule.body() {
                    if !next.is_pending_or_concluded(premise) {
                        next.pending.push(PendingLiteral {
                            literal: premise.clone(),
                            ancestors: ancestors.clone(),
                        });
                    }
                }
                worklist.push(next);
            }
        }
        found.into_iter().collect()
    }
}
