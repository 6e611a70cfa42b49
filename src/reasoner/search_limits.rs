/// Bounds on the combinatorial searches involved in the computation of warrants.
///
/// By default, no bound is set.
/// The number of completions bounds the number of derivations considered per argument when arguments are compared,
/// while the maximal depth bounds the length of the argumentation lines of the dialectical trees.
/// When a bound is reached, the result is computed on the explored part of the search space only.
///
/// # Example
///
/// ```
/// # use crudelp::reasoner::SearchLimits;
/// let limits = SearchLimits::default().with_max_depth(Some(4));
/// assert_eq!(Some(4), limits.max_depth());
/// assert_eq!(None, limits.max_completions());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchLimits {
    max_completions: Option<usize>,
    max_depth: Option<usize>,
}

impl SearchLimits {
    /// Sets the maximal number of completions considered for an argument.
    pub fn with_max_completions(mut self, max_completions: Option<usize>) -> Self {
        self.max_completions = max_completions;
        self
    }

    /// Sets the maximal depth of the dialectical trees.
    ///
    /// The root of a tree has depth 0, so a maximal depth of 0 prevents any expansion.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the maximal number of completions considered for an argument, if any.
    pub fn max_completions(&self) -> Option<usize> {
        self.max_completions
    }

    /// Returns the maximal depth of the dialectical trees, if any.
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }
}
