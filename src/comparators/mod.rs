//! The criteria used to compare arguments.

mod criterion_kind;
pub use criterion_kind::CriterionKind;

mod empty_criterion;
pub use empty_criterion::EmptyCriterion;

mod generalized_specificity;
pub use generalized_specificity::GeneralizedSpecificity;

mod specs;
pub use specs::ComparisonCriterion;
pub use specs::ComparisonResult;
