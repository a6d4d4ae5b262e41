//! Dice-notation normalization.
//!
//! Sheet values are written as `N<die>[+M]` with a document-language die
//! letter (`3W+1`); records carry the canonical letter (`3D+1`).

use serde::{Deserialize, Serialize};

/// Die letters of the source document and of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiceNotation {
    /// Die letter used in the document
    pub source_die: char,
    /// Die letter used in extracted records
    pub canonical_die: char,
}

impl Default for DiceNotation {
    fn default() -> Self {
        Self {
            source_die: 'W',
            canonical_die: 'D',
        }
    }
}

impl DiceNotation {
    /// Normalize a raw cell value, or reject it.
    ///
    /// The die letter is case-folded and rewritten to the canonical letter;
    /// the result must then be `digits, letter, optional(+digits)`. Anything
    /// else yields `None`. Normalizing a canonical value returns it unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use charsheet::locate::DiceNotation;
    ///
    /// let dice = DiceNotation::default();
    /// assert_eq!(dice.normalize("3W+1").as_deref(), Some("3D+1"));
    /// assert_eq!(dice.normalize("2d").as_deref(), Some("2D"));
    /// assert_eq!(dice.normalize("Stärke"), None);
    /// ```
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let value = raw.trim();
        let digits_end = value
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(value.len());
        let (count, rest) = value.split_at(digits_end);
        if count.is_empty() {
            return None;
        }

        let mut chars = rest.chars();
        let die = chars.next()?;
        if !self.is_die(die) {
            return None;
        }

        let modifier = chars.as_str();
        if !modifier.is_empty() {
            let bonus = modifier.strip_prefix('+')?;
            if bonus.is_empty() || !bonus.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
        }

        let mut normalized = String::with_capacity(value.len());
        normalized.push_str(count);
        normalized.push(self.canonical_die.to_ascii_uppercase());
        normalized.push_str(modifier);
        Some(normalized)
    }

    /// Check whether a value reads as dice notation.
    pub fn is_dice(&self, raw: &str) -> bool {
        self.normalize(raw).is_some()
    }

    fn is_die(&self, c: char) -> bool {
        let c = c.to_ascii_uppercase();
        c == self.source_die.to_ascii_uppercase() || c == self.canonical_die.to_ascii_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrites_source_die() {
        let dice = DiceNotation::default();
        assert_eq!(dice.normalize("3W+1").as_deref(), Some("3D+1"));
        assert_eq!(dice.normalize("2w").as_deref(), Some("2D"));
        assert_eq!(dice.normalize(" 12W+10 ").as_deref(), Some("12D+10"));
    }

    #[test]
    fn test_canonical_is_unchanged() {
        let dice = DiceNotation::default();
        for value in ["1D", "2D+2", "10D+3"] {
            assert_eq!(dice.normalize(value).as_deref(), Some(value));
        }
        assert_eq!(dice.normalize("2d+1").as_deref(), Some("2D+1"));
    }

    #[test]
    fn test_rejects_malformed() {
        let dice = DiceNotation::default();
        for value in ["", "W", "D+1", "3", "3X", "3W+", "3W-1", "3W+1+1", "3 W", "drei W", "3W+a"] {
            assert_eq!(dice.normalize(value), None, "{value:?} should be rejected");
        }
    }

    #[test]
    fn test_custom_letters() {
        let dice = DiceNotation {
            source_die: 'k',
            canonical_die: 'd',
        };
        assert_eq!(dice.normalize("4K+2").as_deref(), Some("4D+2"));
        assert_eq!(dice.normalize("4W"), None);
    }

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_normalization_is_idempotent(
                count in 0u32..100,
                modifier in prop::option::of(0u32..20),
                die in prop_oneof![Just('W'), Just('w'), Just('D'), Just('d')],
            ) {
                let dice = DiceNotation::default();
                let raw = match modifier {
                    Some(m) => format!("{count}{die}+{m}"),
                    None => format!("{count}{die}"),
                };
                let once = dice.normalize(&raw);
                prop_assert!(once.is_some());
                let once = once.unwrap();
                prop_assert_eq!(dice.normalize(&once), Some(once.clone()));
            }
        }
    }
}
