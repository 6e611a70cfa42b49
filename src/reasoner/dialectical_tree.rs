use crate::{
    comparators::{ComparisonCriterion, ComparisonResult, EmptyCriterion},
    delp::{Argument, DefeasibleLogicProgram},
};
use log::trace;
use std::fmt::Display;
use strum_macros::Display;

/// The handle of a node in a [DialecticalTree].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// The status of a node of a dialectical tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Mark {
    /// At least one defeater of the argument is undefeated
    Defeated,
    /// All the defeaters of the argument are defeated
    Undefeated,
}

#[derive(Debug)]
struct Node {
    argument: Argument,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A dialectical tree, rooted at an argument, which children are its defeaters.
///
/// The nodes are stored in an arena and designated by [NodeId] handles.
/// Each node owns the list of its children and knows its parent, allowing to rebuild the argumentation line leading to it.
/// The tree is built on demand: the children of a node are computed by [expand](Self::expand),
/// which replaces the previous children of the node (if any) by the defeaters computed for it.
/// Nodes that are detached this way stay in the arena but are no longer reachable from the root.
///
/// Handles are only meaningful for the tree that returned them; methods taking a handle from another tree may panic.
///
/// # Example
///
/// ```
/// # use crudelp::comparators::GeneralizedSpecificity;
/// # use crudelp::delp::{DefeasibleLogicProgram, Literal};
/// # use crudelp::reasoner::{DialecticalTree, Mark};
/// let lit = |s: &str| Literal::try_from(s).unwrap();
/// let mut program = DefeasibleLogicProgram::default();
/// program.add_fact(lit("penguin(tweety)")).unwrap();
/// program.add_strict_rule(lit("bird(tweety)"), vec![lit("penguin(tweety)")]);
/// program.add_defeasible_rule(lit("flies(tweety)"), vec![lit("bird(tweety)")]);
/// program.add_defeasible_rule(lit("~flies(tweety)"), vec![lit("penguin(tweety)")]);
/// let arguments = program.arguments();
/// let flies = program.arguments_for(&lit("flies(tweety)")).remove(0);
/// let mut tree = DialecticalTree::new(flies);
/// let criterion = GeneralizedSpecificity::default();
/// let defeaters = tree.expand(tree.root(), &arguments, &program, Some(&criterion));
/// assert_eq!(1, defeaters.len());
/// assert_eq!(Mark::Defeated, tree.marking(tree.root()));
/// ```
#[derive(Debug)]
pub struct DialecticalTree {
    nodes: Vec<Node>,
}

impl DialecticalTree {
    /// Builds a new tree made of a root node for the given argument.
    pub fn new(argument: Argument) -> Self {
        DialecticalTree {
            nodes: vec![Node {
                argument,
                parent: None,
                children: vec![],
            }],
        }
    }

    /// Returns the root of the tree.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn node(&self, node: NodeId) -> &Node {
        &self.nodes[node.0]
    }

    fn new_node(&mut self, argument: Argument, parent: NodeId) -> NodeId {
        self.nodes.push(Node {
            argument,
            parent: Some(parent),
            children: vec![],
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Adds a child to a node, returning the handle of the new node.
    ///
    /// No check is made on the fact the argument is a defeater of the parent's argument.
    pub fn add_child(&mut self, parent: NodeId, argument: Argument) -> NodeId {
        let child = self.new_node(argument, parent);
        self.nodes[parent.0].children.push(child);
        child
    }

    /// Returns the argument of a node.
    pub fn argument(&self, node: NodeId) -> &Argument {
        &self.node(node).argument
    }

    /// Returns the parent of a node, or `None` for the root.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    /// Returns the children of a node.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    /// Returns the depth of a node; the root has depth 0.
    pub fn depth(&self, node: NodeId) -> usize {
        let mut depth = 0;
        let mut current = node;
        while let Some(p) = self.parent(current) {
            depth += 1;
            current = p;
        }
        depth
    }

    /// Returns the number of nodes reachable from the root.
    pub fn n_nodes(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend_from_slice(self.children(node));
        }
        count
    }

    /// Returns the argumentation line ending at a node, that is the arguments on the path from the root to the node (root first).
    pub fn argumentation_line(&self, node: NodeId) -> Vec<&Argument> {
        let mut line = vec![self.argument(node)];
        let mut current = node;
        while let Some(p) = self.parent(current) {
            line.push(self.argument(p));
            current = p;
        }
        line.reverse();
        line
    }

    /// Checks whether an argument is an acceptable continuation of the argumentation line ending at a node.
    ///
    /// The argument is rejected if
    ///   * it is a subargument of an argument of the line,
    ///   * its support is inconsistent with the supports of the arguments of the line that are on its side,
    ///   * it is worse than the subargument it attacks,
    ///   * the argument of the node is a blocking defeater and the candidate is not a proper defeater.
    ///
    /// If no criterion is given, the [EmptyCriterion] is used.
    pub fn is_acceptable(
        &self,
        node: NodeId,
        candidate: &Argument,
        program: &DefeasibleLogicProgram,
        criterion: Option<&dyn ComparisonCriterion>,
    ) -> bool {
        let criterion = criterion.unwrap_or(&EmptyCriterion);
        let line = self.argumentation_line(node);
        if let Some(a) = line.iter().find(|a| candidate.is_subargument_of(a)) {
            trace!("rejecting {}: subargument of {}", candidate, a);
            return false;
        }
        let mut rules = candidate.support().clone();
        line.iter()
            .rev()
            .skip(1)
            .step_by(2)
            .for_each(|a| rules.extend(a.support().iter().cloned()));
        if !program.is_consistent(&rules) {
            trace!("rejecting {}: not concordant with its line", candidate);
            return false;
        }
        let last = line[line.len() - 1];
        let disagreement = last.disagreement_subargument(candidate.conclusion(), program);
        let candidate_comparison = criterion.compare(candidate, &disagreement, program);
        match candidate_comparison {
            ComparisonResult::IsWorse => {
                trace!("rejecting {}: worse than {}", candidate, disagreement);
                return false;
            }
            ComparisonResult::IsBetter
            | ComparisonResult::IsEqual
            | ComparisonResult::NotComparable => {}
        }
        if line.len() > 1 {
            let attacked = line[line.len() - 2].disagreement_subargument(last.conclusion(), program);
            match criterion.compare(last, &attacked, program) {
                ComparisonResult::NotComparable => {
                    if candidate_comparison != ComparisonResult::IsBetter {
                        trace!(
                            "rejecting {}: blocking defeater of a blocking defeater",
                            candidate
                        );
                        return false;
                    }
                }
                ComparisonResult::IsBetter | ComparisonResult::IsWorse | ComparisonResult::IsEqual => {}
            }
        }
        true
    }

    /// Computes the defeaters of the argument of a node, given all the arguments of the program.
    ///
    /// The defeaters are the arguments attacking the node argument that are acceptable continuations of its argumentation line (see [is_acceptable](Self::is_acceptable)).
    /// This method does not modify the tree; see [expand](Self::expand) to store the defeaters as children of the node.
    pub fn defeaters(
        &self,
        node: NodeId,
        arguments: &[Argument],
        program: &DefeasibleLogicProgram,
        criterion: Option<&dyn ComparisonCriterion>,
    ) -> Vec<Argument> {
        let opportunities = self.argument(node).attack_opportunities(program);
        arguments
            .iter()
            .filter(|a| opportunities.contains(a.conclusion()))
            .filter(|a| self.is_acceptable(node, a, program, criterion))
            .cloned()
            .collect()
    }

    /// Computes the defeaters of a node and sets them as its children.
    ///
    /// The previous children of the node are replaced, not kept.
    /// The handles of the new children are returned.
    pub fn expand(
        &mut self,
        node: NodeId,
        arguments: &[Argument],
        program: &DefeasibleLogicProgram,
        criterion: Option<&dyn ComparisonCriterion>,
    ) -> Vec<NodeId> {
        let defeaters = self.defeaters(node, arguments, program, criterion);
        let children = defeaters
            .into_iter()
            .map(|d| self.new_node(d, node))
            .collect::<Vec<NodeId>>();
        trace!(
            "argument {} has {} defeater(s)",
            self.argument(node),
            children.len()
        );
        self.nodes[node.0].children = children.clone();
        children
    }

    /// Computes the mark of a node.
    ///
    /// A node is defeated iff at least one of its children is undefeated.
    /// In particular, a node with no children is undefeated.
    pub fn marking(&self, node: NodeId) -> Mark {
        if self
            .children(node)
            .iter()
            .any(|c| self.marking(*c) == Mark::Undefeated)
        {
            Mark::Defeated
        } else {
            Mark::Undefeated
        }
    }

    /// Returns a textual representation of the subtree rooted at a node.
    ///
    /// A node is written `[argument - child1, child2, ...]`, or `[argument]` if it has no children.
    pub fn node_to_string(&self, node: NodeId) -> String {
        let children = self.children(node);
        if children.is_empty() {
            format!("[{}]", self.argument(node))
        } else {
            let children_str = children
                .iter()
                .map(|c| self.node_to_string(*c))
                .collect::<Vec<String>>();
            format!("[{} - {}]", self.argument(node), children_str.join(", "))
        }
    }
}

/// Writes the whole tree from its root, as [`DialecticalTree::node_to_string`] does.
///
/// Leaves drop the ` - ` separator and are written `[argument]`.
impl Display for DialecticalTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.node_to_string(self.root()))
    }
}
