use super::{DialecticalTree, Mark, SearchLimits};
use crate::{
    comparators::ComparisonCriterion,
    delp::{Argument, DefeasibleLogicProgram, Literal},
};
use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use strum_macros::Display;

/// The answer to a warrant query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum DelpAnswer {
    /// The literal is warranted
    Yes,
    /// The complement of the literal is warranted
    No,
    /// Neither the literal nor its complement is warranted
    Undecided,
    /// The literal does not belong to the language of the program
    Unknown,
}

/// A reasoner deciding whether literals are warranted by a defeasible logic program.
///
/// A literal is warranted iff it is the conclusion of an argument which is undefeated in its dialectical tree.
/// The trees are built with the comparison criterion given at construction time,
/// and their depth is bounded by the [SearchLimits] if a maximal depth is set.
///
/// # Example
///
/// ```
/// # use crudelp::comparators::GeneralizedSpecificity;
/// # use crudelp::delp::{DefeasibleLogicProgram, Literal};
/// # use crudelp::reasoner::{DelpAnswer, DelpReasoner, SearchLimits};
/// let lit = |s: &str| Literal::try_from(s).unwrap();
/// let mut program = DefeasibleLogicProgram::default();
/// program.add_fact(lit("penguin(tweety)")).unwrap();
/// program.add_strict_rule(lit("bird(tweety)"), vec![lit("penguin(tweety)")]);
/// program.add_defeasible_rule(lit("flies(tweety)"), vec![lit("bird(tweety)")]);
/// program.add_defeasible_rule(lit("~flies(tweety)"), vec![lit("penguin(tweety)")]);
/// let reasoner = DelpReasoner::new(Box::new(GeneralizedSpecificity::default()), SearchLimits::default());
/// assert_eq!(DelpAnswer::No, reasoner.query(&program, &lit("flies(tweety)")).unwrap());
/// ```
pub struct DelpReasoner {
    criterion: Box<dyn ComparisonCriterion>,
    limits: SearchLimits,
}

impl DelpReasoner {
    /// Builds a new reasoner given a comparison criterion and search limits.
    pub fn new(criterion: Box<dyn ComparisonCriterion>, limits: SearchLimits) -> Self {
        DelpReasoner { criterion, limits }
    }

    /// Builds the dialectical tree rooted at an argument.
    ///
    /// Each node is expanded, except the ones lying at the maximal depth (if any).
    /// The arguments must be the ones of the program.
    pub fn build_tree(
        &self,
        argument: Argument,
        arguments: &[Argument],
        program: &DefeasibleLogicProgram,
    ) -> DialecticalTree {
        let mut tree = DialecticalTree::new(argument);
        let mut truncated = false;
        let mut to_expand = vec![tree.root()];
        while let Some(node) = to_expand.pop() {
            if let Some(max_depth) = self.limits.max_depth() {
                if tree.depth(node) >= max_depth {
                    truncated = true;
                    continue;
                }
            }
            let children = tree.expand(node, arguments, program, Some(self.criterion.as_ref()));
            to_expand.extend(children);
        }
        if truncated {
            warn!(
                "the dialectical tree of {} was truncated at depth {}",
                tree.argument(tree.root()),
                self.limits.max_depth().unwrap_or_default()
            );
        }
        debug!(
            "built a dialectical tree of {} node(s) for {}",
            tree.n_nodes(),
            tree.argument(tree.root())
        );
        tree
    }

    /// Builds the dialectical trees of the arguments concluding a literal.
    pub fn trees_for(
        &self,
        literal: &Literal,
        arguments: &[Argument],
        program: &DefeasibleLogicProgram,
    ) -> Vec<DialecticalTree> {
        arguments
            .iter()
            .filter(|a| a.conclusion() == literal)
            .map(|a| self.build_tree(a.clone(), arguments, program))
            .collect()
    }

    /// Returns `true` iff the literal is the conclusion of an argument which is undefeated in its dialectical tree.
    pub fn is_warranted(
        &self,
        literal: &Literal,
        arguments: &[Argument],
        program: &DefeasibleLogicProgram,
    ) -> bool {
        arguments
            .iter()
            .filter(|a| a.conclusion() == literal)
            .any(|a| {
                let tree = self.build_tree(a.clone(), arguments, program);
                tree.marking(tree.root()) == Mark::Undefeated
            })
    }

    /// Answers a warrant query.
    ///
    /// The program and the literal must be ground; if this is not the case, an error is returned.
    pub fn query(&self, program: &DefeasibleLogicProgram, literal: &Literal) -> Result<DelpAnswer> {
        if !program.is_ground() {
            return Err(anyhow!("the program must be ground before being queried"));
        }
        if !literal.is_ground() {
            return Err(anyhow!("cannot query the non-ground literal {}", literal));
        }
        let language = program.literals();
        if !language.contains(literal) && !language.contains(&literal.complement()) {
            info!("{} does not belong to the language of the program", literal);
            return Ok(DelpAnswer::Unknown);
        }
        let arguments = program.arguments();
        let answer = if self.is_warranted(literal, &arguments, program) {
            DelpAnswer::Yes
        } else if self.is_warranted(&literal.complement(), &arguments, program) {
            DelpAnswer::No
        } else {
            DelpAnswer::Undecided
        };
        info!("answer for {} is {}", literal, answer);
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparators::{EmptyCriterion, GeneralizedSpecificity};
    use crate::delp::test_programs::{lit, single_argument, tweety_program};
    use crate::io::{DelpReader, ProgramReader};

    fn read_program(instance: &str) -> DefeasibleLogicProgram {
        let reader = DelpReader::default();
        reader.read(&mut instance.as_bytes()).unwrap().ground()
    }

    macro_rules! test_for_criterion {
        ($criterion:expr, $suffix:literal, $flies:expr, $not_flies:expr) => {
            paste::item! {
    #[test]
    fn [< test_tweety_ $suffix >] () {
        let program = tweety_program();
        let reasoner = DelpReasoner::new(Box::new($criterion), SearchLimits::default());
        assert_eq!($flies, reasoner.query(&program, &lit("flies(tweety)")).unwrap());
        assert_eq!($not_flies, reasoner.query(&program, &lit("~flies(tweety)")).unwrap());
    }

    #[test]
    fn [< test_facts_are_warranted_ $suffix >] () {
        let program = tweety_program();
        let reasoner = DelpReasoner::new(Box::new($criterion), SearchLimits::default());
        assert_eq!(DelpAnswer::Yes, reasoner.query(&program, &lit("bird(tweety)")).unwrap());
        assert_eq!(DelpAnswer::No, reasoner.query(&program, &lit("~penguin(tweety)")).unwrap());
    }

    #[test]
    fn [< test_unknown_ $suffix >] () {
        let program = tweety_program();
        let reasoner = DelpReasoner::new(Box::new($criterion), SearchLimits::default());
        assert_eq!(DelpAnswer::Unknown, reasoner.query(&program, &lit("swims(tweety)")).unwrap());
        assert_eq!(DelpAnswer::Unknown, reasoner.query(&program, &lit("flies(opus)")).unwrap());
    }

    #[test]
    fn [< test_nixon_ $suffix >] () {
        let instance = r#"
        quaker(nixon).
        republican(nixon).
        pacifist(X) -< quaker(X).
        ~pacifist(X) -< republican(X).
        "#;
        let program = read_program(instance);
        let reasoner = DelpReasoner::new(Box::new($criterion), SearchLimits::default());
        assert_eq!(DelpAnswer::Undecided, reasoner.query(&program, &lit("pacifist(nixon)")).unwrap());
        assert_eq!(DelpAnswer::Undecided, reasoner.query(&program, &lit("~pacifist(nixon)")).unwrap());
    }

    #[test]
    fn [< test_no_attacker_ $suffix >] () {
        let instance = r#"
        a.
        b -< a.
        "#;
        let program = read_program(instance);
        let reasoner = DelpReasoner::new(Box::new($criterion), SearchLimits::default());
        assert_eq!(DelpAnswer::Yes, reasoner.query(&program, &lit("b")).unwrap());
        assert_eq!(DelpAnswer::No, reasoner.query(&program, &lit("~b")).unwrap());
    }

    #[test]
    fn [< test_trees_for_ $suffix >] () {
        let program = tweety_program();
        let arguments = program.arguments();
        let reasoner = DelpReasoner::new(Box::new($criterion), SearchLimits::default());
        let trees = reasoner.trees_for(&lit("flies(tweety)"), &arguments, &program);
        assert_eq!(1, trees.len());
        assert_eq!(&single_argument(&program, "flies(tweety)"), trees[0].argument(trees[0].root()));
        assert!(reasoner.trees_for(&lit("swims(tweety)"), &arguments, &program).is_empty());
    }
            }
        };
    }

    test_for_criterion!(
        EmptyCriterion,
        "empty",
        DelpAnswer::Undecided,
        DelpAnswer::Undecided
    );

    test_for_criterion!(
        GeneralizedSpecificity::new(),
        "generalized_specificity",
        DelpAnswer::No,
        DelpAnswer::Yes
    );

    #[test]
    fn test_empty_criterion_trees_have_depth_one() {
        let program = tweety_program();
        let arguments = program.arguments();
        let reasoner = DelpReasoner::new(Box::new(EmptyCriterion), SearchLimits::default());
        let tree = reasoner.build_tree(
            single_argument(&program, "flies(tweety)"),
            &arguments,
            &program,
        );
        assert_eq!(2, tree.n_nodes());
        let child = tree.children(tree.root())[0];
        assert!(tree.children(child).is_empty());
        assert_eq!(Mark::Defeated, tree.marking(tree.root()));
    }

    #[test]
    fn test_depth_limit() {
        let program = tweety_program();
        let arguments = program.arguments();
        let limits = SearchLimits::default().with_max_depth(Some(0));
        let reasoner = DelpReasoner::new(Box::new(GeneralizedSpecificity::new()), limits);
        let tree = reasoner.build_tree(
            single_argument(&program, "flies(tweety)"),
            &arguments,
            &program,
        );
        assert_eq!(1, tree.n_nodes());
        assert_eq!(Mark::Undefeated, tree.marking(tree.root()));
        assert_eq!(
            DelpAnswer::Yes,
            reasoner.query(&program, &lit("flies(tweety)")).unwrap()
        );
    }

    #[test]
    fn test_more_specific_defeater() {
        let instance = r#"
        a.
        b.
        c.
        p -< a.
        ~p -< b.
        ~p <- q.
        q -< b.
        ~q -< b, c.
        "#;
        let program = read_program(instance);
        let reasoner = DelpReasoner::new(
            Box::new(GeneralizedSpecificity::new()),
            SearchLimits::default(),
        );
        assert_eq!(
            DelpAnswer::No,
            reasoner.query(&program, &lit("q")).unwrap()
        );
    }

    #[test]
    fn test_query_non_ground_program() {
        let mut program = DefeasibleLogicProgram::default();
        program.add_fact(lit("bird(tweety)")).unwrap();
        program.add_defeasible_rule(lit("flies(X)"), vec![lit("bird(X)")]);
        let reasoner = DelpReasoner::new(Box::new(EmptyCriterion), SearchLimits::default());
        assert!(reasoner.query(&program, &lit("flies(tweety)")).is_err());
    }

    #[test]
    fn test_query_non_ground_literal() {
        let program = tweety_program();
        let reasoner = DelpReasoner::new(Box::new(EmptyCriterion), SearchLimits::default());
        assert!(reasoner.query(&program, &lit("flies(X)")).is_err());
    }

    #[test]
    fn test_answer_display() {
        assert_eq!("YES", DelpAnswer::Yes.to_string());
        assert_eq!("NO", DelpAnswer::No.to_string());
        assert_eq!("UNDECIDED", DelpAnswer::Undecided.to_string());
        assert_eq!("UNKNOWN", DelpAnswer::Unknown.to_string());
    }
}
