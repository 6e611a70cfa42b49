use super::{ComparisonCriterion, ComparisonResult};
use crate::delp::{Argument, DefeasibleLogicProgram};

/// A criterion that never prefers an argument to another.
///
/// This is the criterion used when no preference information is available.
/// Any attack is then a blocking defeat.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyCriterion;

impl ComparisonCriterion for EmptyCriterion {
    fn compare(
        &self,
        _argument1: &Argument,
        _argument2: &Argument,
        _program: &DefeasibleLogicProgram,
    ) -> ComparisonResult {
        ComparisonResult::NotComparable
    }
}
