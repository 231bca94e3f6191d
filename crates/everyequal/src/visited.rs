//! In-progress pair tracking for cycle handling.
//!
//! The table maps the identity of the target-side container currently being
//! descended into to the identity of its paired source-side container.
//! Entries live strictly for one recursive descent: mark before recursing,
//! clear when the recursion returns, equal or not. Meeting the same pairing
//! again deeper down is trivially equal (the cycle case); meeting the target
//! paired with a different source is an inconsistency and rejects.

use std::collections::HashMap;

use everyequal_value::ObjId;

/// Verdict of a lookup against the active pair table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PairState {
    /// Target is not on the active descent path.
    Unseen,
    /// Target is currently paired with exactly this source.
    ActivePair,
    /// Target is currently paired with a different source.
    Conflict,
}

#[derive(Debug, Default)]
pub(crate) struct VisitedPairs {
    active: HashMap<ObjId, ObjId>,
}

impl VisitedPairs {
    pub fn new() -> Self {
        VisitedPairs::default()
    }

    pub fn state(&self, target: ObjId, source: ObjId) -> PairState {
        match self.active.get(&target) {
            None => PairState::Unseen,
            Some(paired) if *paired == source => PairState::ActivePair,
            Some(_) => PairState::Conflict,
        }
    }

    /// Marks a pair active for the duration of one descent.
    pub fn enter(&mut self, target: ObjId, source: ObjId) {
        self.active.insert(target, source);
    }

    /// Clears the mark once the descent has returned.
    pub fn exit(&mut self, target: ObjId) {
        self.active.remove(&target);
    }
}
