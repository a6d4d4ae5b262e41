//! Tie-break policies for repeated heuristic matches.
//!
//! A heuristic scan can hit the same target more than once. Whether a later
//! candidate replaces the value already held is decided by a
//! [`MatchPolicy`], so the locator and the matrix grouper can be tested
//! against alternative strategies.

/// Decides whether a new candidate replaces the current value.
pub trait MatchPolicy {
    /// Return true when `candidate` should replace `current`.
    fn replaces(&self, current: Option<&str>, candidate: &str) -> bool;

    /// Apply the policy to a slot.
    fn offer(&self, slot: &mut Option<String>, candidate: &str) -> bool {
        let replace = self.replaces(slot.as_deref(), candidate);
        if replace {
            *slot = Some(candidate.to_string());
        }
        replace
    }
}

/// The last match in scan order wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastMatchWins;

impl MatchPolicy for LastMatchWins {
    fn replaces(&self, _current: Option<&str>, _candidate: &str) -> bool {
        true
    }
}

/// The first match is kept; a later one replaces it only if strictly longer
/// (counted in characters).
#[derive(Debug, Clone, Copy, Default)]
pub struct LongestMatchWins;

impl MatchPolicy for LongestMatchWins {
    fn replaces(&self, current: Option<&str>, candidate: &str) -> bool {
        current.is_none_or(|current| candidate.chars().count() > current.chars().count())
    }
}

/// The first match is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMatchWins;

impl MatchPolicy for FirstMatchWins {
    fn replaces(&self, current: Option<&str>, _candidate: &str) -> bool {
        current.is_none()
    }
}
