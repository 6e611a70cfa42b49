use crate::delp::{Argument, DefeasibleLogicProgram};
use strum_macros::Display;

/// The result of the comparison of two arguments.
///
/// This is a relation, not an order: two arguments may be incomparable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonResult {
    /// The first argument is preferred to the second one
    IsBetter,
    /// The second argument is preferred to the first one
    IsWorse,
    /// Both arguments are equally preferred
    IsEqual,
    /// The arguments cannot be compared
    NotComparable,
}

impl ComparisonResult {
    /// Returns the result of the comparison in which the arguments are swapped.
    pub fn reverse(self) -> Self {
        match self {
            ComparisonResult::IsBetter => ComparisonResult::IsWorse,
            ComparisonResult::IsWorse => ComparisonResult::IsBetter,
            ComparisonResult::IsEqual => ComparisonResult::IsEqual,
            ComparisonResult::NotComparable => ComparisonResult::NotComparable,
        }
    }
}

/// A trait for the criteria used to compare arguments.
///
/// Criteria decide whether an attack is a proper defeat, a blocking one, or no defeat at all.
pub trait ComparisonCriterion {
    /// Compares two arguments in the context of a program.
    ///
    /// The result is expressed from the point of view of the first argument
    /// (e.g. [IsBetter](ComparisonResult::IsBetter) means the first argument is preferred).
    fn compare(
        &self,
        argument1: &Argument,
        argument2: &Argument,
        program: &DefeasibleLogicProgram,
    ) -> ComparisonResult;
}
