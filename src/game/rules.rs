use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// A family of winning patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Horizontal,
    Vertical,
    DiagonalDownRight,
    DiagonalDownLeft,
    /// A 2x2 block.
    Square,
    /// All four corners of the board.
    FourCorners,
}

impl RuleKind {
    pub const ALL: [RuleKind; 6] = [
        RuleKind::Horizontal,
        RuleKind::Vertical,
        RuleKind::DiagonalDownRight,
        RuleKind::DiagonalDownLeft,
        RuleKind::Square,
        RuleKind::FourCorners,
    ];

    /// Base rules are always active and cannot be toggled off.
    pub fn is_base(self) -> bool {
        !matches!(self, RuleKind::Square | RuleKind::FourCorners)
    }

    pub fn name(self) -> &'static str {
        match self {
            RuleKind::Horizontal => "horizontal",
            RuleKind::Vertical => "vertical",
            RuleKind::DiagonalDownRight => "diagonal down-right",
            RuleKind::DiagonalDownLeft => "diagonal down-left",
            RuleKind::Square => "square",
            RuleKind::FourCorners => "four corners",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The enabled win conditions. Only the optional kinds are stored; the base
/// four are implied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub square: bool,
    pub four_corners: bool,
}

impl RuleSet {
    /// Only the base rules
    pub fn base() -> Self {
        RuleSet::default()
    }

    pub fn is_enabled(&self, kind: RuleKind) -> bool {
        match kind {
            RuleKind::Square => self.square,
            RuleKind::FourCorners => self.four_corners,
            _ => true,
        }
    }

    /// Toggle a rule. Enabling a base rule is accepted as a no-op; disabling
    /// one is refused.
    pub fn set(&mut self, kind: RuleKind, enabled: bool) -> Result<(), RuleError> {
        match kind {
            RuleKind::Square => self.square = enabled,
            RuleKind::FourCorners => self.four_corners = enabled,
            _ if enabled => {}
            _ => return Err(RuleError::BaseRule { kind }),
        }
        Ok(())
    }

    /// Enabled kinds in evaluation order
    pub fn enabled(&self) -> impl Iterator<Item = RuleKind> + '_ {
        RuleKind::ALL
            .into_iter()
            .filter(move |&kind| self.is_enabled(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_rules_always_enabled() {
        let rules = RuleSet::base();
        assert!(rules.is_enabled(RuleKind::Horizontal));
        assert!(rules.is_enabled(RuleKind::Vertical));
        assert!(rules.is_enabled(RuleKind::DiagonalDownRight));
        assert!(rules.is_enabled(RuleKind::DiagonalDownLeft));
        assert!(!rules.is_enabled(RuleKind::Square));
        assert!(!rules.is_enabled(RuleKind::FourCorners));
        assert_eq!(rules.enabled().count(), 4);
    }

    #[test]
    fn test_toggle_optional_rules() {
        let mut rules = RuleSet::base();
        rules.set(RuleKind::Square, true).unwrap();
        assert!(rules.is_enabled(RuleKind::Square));
        rules.set(RuleKind::FourCorners, true).unwrap();
        assert_eq!(rules.enabled().count(), 6);
        rules.set(RuleKind::Square, false).unwrap();
        assert!(!rules.is_enabled(RuleKind::Square));
    }

    #[test]
    fn test_base_rule_cannot_be_disabled() {
        let mut rules = RuleSet::base();
        assert_eq!(
            rules.set(RuleKind::Horizontal, false),
            Err(RuleError::BaseRule {
                kind: RuleKind::Horizontal
            })
        );
        assert!(rules.set(RuleKind::Horizontal, true).is_ok());
        assert_eq!(rules, RuleSet::base());
    }

    #[test]
    fn test_is_base() {
        let base: Vec<_> = RuleKind::ALL.into_iter().filter(|k| k.is_base()).collect();
        assert_eq!(base.len(), 4);
        assert!(!RuleKind::FourCorners.is_base());
    }
}
