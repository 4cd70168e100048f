//! Extraction state: pass flags, the retry ladder and attempt history.
//!
//! The first pass runs with every heuristic switched on. Each failed pass
//! switches exactly one off, in a fixed order, until none are left. The
//! ladder is the [`RetryStage`] enum. The controller threads it through its
//! loop rather than flipping booleans in place.

use crate::dom::{NodeId, Tree};

/// Heuristics active during one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Flags {
    /// Drop unlikely candidates and nodes with boilerplate roles before scoring.
    pub strip_unlikelys: bool,
    /// Let class/id names add or subtract weight.
    pub use_weight_classes: bool,
    /// Remove fishy forms, tables, lists and divs from the article.
    pub clean_conditionally: bool,
}

/// Where the controller is on the relaxation ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryStage {
    AllStrict,
    RelaxUnlikely,
    RelaxWeight,
    RelaxConditional,
    Exhausted,
}

impl RetryStage {
    /// Flags for a pass at this stage, `None` once exhausted.
    #[must_use]
    pub fn flags(self) -> Option<Flags> {
        let (strip_unlikelys, use_weight_classes, clean_conditionally) = match self {
            Self::AllStrict => (true, true, true),
            Self::RelaxUnlikely => (false, true, true),
            Self::RelaxWeight => (false, false, true),
            Self::RelaxConditional => (false, false, false),
            Self::Exhausted => return None,
        };
        Some(Flags {
            strip_unlikelys,
            use_weight_classes,
            clean_conditionally,
        })
    }

    /// The stage after a failed pass.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::AllStrict => Self::RelaxUnlikely,
            Self::RelaxUnlikely => Self::RelaxWeight,
            Self::RelaxWeight => Self::RelaxConditional,
            Self::RelaxConditional | Self::Exhausted => Self::Exhausted,
        }
    }
}

/// Facts picked up while walking the page. They outlive a single pass: once a
/// byline is found, later passes neither look for one nor remove it again.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageFacts {
    /// Normalized text of the first byline node.
    pub byline: Option<String>,
    /// `lang` attribute of `<html>`.
    pub lang: Option<String>,
}

/// Output of a pass that fell short of the length threshold.
#[derive(Debug, Clone)]
pub struct Attempt {
    /// The pass's working tree.
    pub tree: Tree,
    /// Article container inside `tree`.
    pub content: NodeId,
    /// Normalized character count of the container's text.
    pub text_length: usize,
}

/// Picks the attempt with the most text. Earlier attempts win ties. Returns
/// `None` when there are none, or when even the longest one is empty.
#[must_use]
pub fn best_attempt(mut attempts: Vec<Attempt>) -> Option<Attempt> {
    // Stable sort keeps pass order among equal lengths.
    attempts.sort_by(|a, b| b.text_length.cmp(&a.text_length));
    attempts
        .into_iter()
        .next()
        .filter(|attempt| attempt.text_length > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(text_length: usize, marker: &str) -> Attempt {
        let mut tree = Tree::new();
        let content = tree.create_element(marker);
        Attempt {
            tree,
            content,
            text_length,
        }
    }

    #[test]
    fn test_stage_order() {
        let mut stage = RetryStage::AllStrict;
        let mut seen = vec![stage];
        while stage != RetryStage::Exhausted {
            stage = stage.next();
            seen.push(stage);
        }
        assert_eq!(
            seen,
            [
                RetryStage::AllStrict,
                RetryStage::RelaxUnlikely,
                RetryStage::RelaxWeight,
                RetryStage::RelaxConditional,
                RetryStage::Exhausted,
            ]
        );
        assert_eq!(RetryStage::Exhausted.next(), RetryStage::Exhausted);
    }

    #[test]
    fn test_each_stage_clears_exactly_one_flag() {
        let count = |f: Flags| {
            [f.strip_unlikelys, f.use_weight_classes, f.clean_conditionally]
                .iter()
                .filter(|b| **b)
                .count()
        };
        let mut stage = RetryStage::AllStrict;
        let mut expected = 3;
        while let Some(flags) = stage.flags() {
            assert_eq!(count(flags), expected);
            expected = expected.saturating_sub(1);
            stage = stage.next();
        }
        assert_eq!(stage, RetryStage::Exhausted);
    }

    #[test]
    fn test_relaxation_order() {
        let relax_unlikely = RetryStage::RelaxUnlikely.flags().expect("flags");
        assert!(!relax_unlikely.strip_unlikelys);
        assert!(relax_unlikely.use_weight_classes);

        let relax_weight = RetryStage::RelaxWeight.flags().expect("flags");
        assert!(!relax_weight.use_weight_classes);
        assert!(relax_weight.clean_conditionally);
    }

    #[test]
    fn test_best_attempt_prefers_longest() {
        let best = best_attempt(vec![
            attempt(10, "div"),
            attempt(40, "section"),
            attempt(20, "article"),
        ])
        .expect("best attempt");
        assert_eq!(best.text_length, 40);
        assert_eq!(best.tree.tag_name(best.content), "section");
    }

    #[test]
    fn test_best_attempt_tie_keeps_earliest() {
        let best =
            best_attempt(vec![attempt(30, "div"), attempt(30, "section")]).expect("best attempt");
        assert_eq!(best.tree.tag_name(best.content), "div");
    }

    #[test]
    fn test_best_attempt_rejects_empty() {
        assert!(best_attempt(vec![attempt(0, "div"), attempt(0, "section")]).is_none());
        assert!(best_attempt(Vec::new()).is_none());
    }
}
