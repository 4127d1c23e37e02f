//! Compatibility rules deciding whether two attachment points may bind.
//!
//! [`Assembly::join`](crate::Assembly::join) uses [`ExactLabel`]. Other rules
//! plug into [`Assembly::join_with`](crate::Assembly::join_with) without
//! changing the search itself.

use crate::attachment::AttachmentPoint;

pub trait ApCompatibility {
    fn compatible(&self, a: &AttachmentPoint, b: &AttachmentPoint) -> bool;
}

/// Labels must be identical.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExactLabel;

impl ApCompatibility for ExactLabel {
    fn compatible(&self, a: &AttachmentPoint, b: &AttachmentPoint) -> bool {
        a.matches(b)
    }
}

/// Compares only the rule of a `rule:subclass` AP class label.
///
/// `"amide:0"` and `"amide:1"` are compatible; `"amide:0"` and `"ester:0"` are
/// not. A label without a `:` is its own rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SameRule;

pub fn ap_rule(label: &str) -> &str {
    match label.split_once(':') {
        Some((rule, _)) => rule,
        None => label,
    }
}

impl ApCompatibility for SameRule {
    fn compatible(&self, a: &AttachmentPoint, b: &AttachmentPoint) -> bool {
        ap_rule(a.label()) == ap_rule(b.label())
    }
}

impl<F> ApCompatibility for F
where
    F: Fn(&AttachmentPoint, &AttachmentPoint) -> bool,
{
    fn compatible(&self, a: &AttachmentPoint, b: &AttachmentPoint) -> bool {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::NodeIndex;

    fn ap(label: &str) -> AttachmentPoint {
        AttachmentPoint::new(label, NodeIndex::new(0), 0)
    }

    #[test]
    fn rule_extraction() {
        assert_eq!(ap_rule("amide:1"), "amide");
        assert_eq!(ap_rule("amide"), "amide");
        assert_eq!(ap_rule(":3"), "");
    }

    #[test]
    fn same_rule_ignores_subclass() {
        assert!(SameRule.compatible(&ap("amide:0"), &ap("amide:1")));
        assert!(!SameRule.compatible(&ap("amide:0"), &ap("ester:0")));
        assert!(!ExactLabel.compatible(&ap("amide:0"), &ap("amide:1")));
    }

    #[test]
    fn closures_are_rules() {
        let never = |_: &AttachmentPoint, _: &AttachmentPoint| false;
        assert!(!never.compatible(&ap("a"), &ap("a")));
    }
}
