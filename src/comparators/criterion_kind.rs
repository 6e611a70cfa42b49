use super::{ComparisonCriterion, EmptyCriterion, GeneralizedSpecificity};
use crate::reasoner::SearchLimits;
use strum_macros::{AsRefStr, EnumIter, EnumString, EnumVariantNames, IntoStaticStr};

/// The available comparison criteria.
///
/// The string representation of a criterion kind is used to select it on the command line.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, AsRefStr, EnumIter, EnumString, EnumVariantNames, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum CriterionKind {
    /// The [EmptyCriterion]
    Empty,
    /// The [GeneralizedSpecificity] criterion
    GeneralizedSpecificity,
}

impl CriterionKind {
    /// Builds the criterion corresponding to this kind.
    pub fn to_criterion(self, limits: &SearchLimits) -> Box<dyn ComparisonCriterion> {
        match self {
            CriterionKind::Empty => Box::new(EmptyCriterion),
            CriterionKind::GeneralizedSpecificity => Box::new(
                GeneralizedSpecificity::with_completion_limit(limits.max_completions()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::{IntoEnumIterator, VariantNames};

    #[test]
    fn test_names() {
        assert_eq!("empty", CriterionKind::Empty.as_ref());
        assert_eq!(
            "generalized-specificity",
            CriterionKind::GeneralizedSpecificity.as_ref()
        );
        assert_eq!(
            &["empty", "generalized-specificity"],
            CriterionKind::VARIANTS
        );
    }

    #[test]
    fn test_from_str() {
        for kind in CriterionKind::iter() {
            assert_eq!(kind, CriterionKind::from_str(kind.as_ref()).unwrap());
        }
        assert!(CriterionKind::from_str("foo").is_err());
    }
}
