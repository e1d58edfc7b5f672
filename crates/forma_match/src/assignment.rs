//! Backtracking assignment search for unordered patterns.
//!
//! Given `k` pattern entries and `m` subject candidates, find an injective
//! assignment of entries to candidates such that every pair matches and all
//! captures agree. Entries are taken in order; for each one, every unclaimed
//! candidate is tried on a scratch copy of the binding table. A candidate that
//! matches is claimed and the search recurses to the next entry; if that
//! fails, the claim and the scratch copy are dropped and the next candidate
//! is tried.
//!
//! On success the winning scratch table replaces the caller's table. On
//! failure the caller's table is untouched.
//!
//! Worst case is exponential in the number of entries that overlap on the
//! same candidates. Patterns are expected to be small; the search always
//! runs to success or exhaustion.
//!
//! When several assignments are valid, the first one found wins. Which one
//! that is depends on entry and candidate order and is not part of the
//! contract.

use smallvec::SmallVec;

use crate::bindings::BindingTable;
use crate::stack::ensure_sufficient_stack;

/// One search over `entries` and `candidates`.
///
/// `pair` decides whether an entry matches a candidate, capturing into the
/// table it is given.
pub(crate) struct AssignmentSearch<'s, E, C, F> {
    entries: &'s [E],
    candidates: &'s [C],
    claimed: SmallVec<[bool; 16]>,
    pair: F,
    /// Pair tests run so far.
    steps: usize,
}

impl<'s, E, C, F> AssignmentSearch<'s, E, C, F>
where
    F: FnMut(&E, &C, &mut BindingTable) -> bool,
{
    pub(crate) fn new(entries: &'s [E], candidates: &'s [C], pair: F) -> Self {
        AssignmentSearch {
            entries,
            candidates,
            claimed: SmallVec::from_elem(false, candidates.len()),
            pair,
            steps: 0,
        }
    }

    /// Run the search, committing into `bindings` only on success.
    pub(crate) fn run(mut self, bindings: &mut BindingTable) -> bool {
        // An injective assignment needs at least one candidate per entry.
        if self.entries.len() > self.candidates.len() {
            tracing::trace!(
                entries = self.entries.len(),
                candidates = self.candidates.len(),
                "too few candidates"
            );
            return false;
        }

        let outcome = self.assign(0, bindings.clone());
        let matched = outcome.is_some();
        tracing::debug!(
            entries = self.entries.len(),
            candidates = self.candidates.len(),
            steps = self.steps,
            matched,
            "assignment search"
        );
        if let Some(trial) = outcome {
            *bindings = trial;
        }
        matched
    }

    /// Assign entries `index..` given the captures in `trial`.
    ///
    /// Returns the completed table, or `None` when no assignment exists.
    fn assign(&mut self, index: usize, trial: BindingTable) -> Option<BindingTable> {
        let entries = self.entries;
        let candidates = self.candidates;
        let Some(entry) = entries.get(index) else {
            return Some(trial);
        };

        for (slot, candidate) in candidates.iter().enumerate() {
            if self.claimed[slot] {
                continue;
            }
            self.steps += 1;
            let mut branch = trial.clone();
            if !(self.pair)(entry, candidate, &mut branch) {
                continue;
            }

            self.claimed[slot] = true;
            let outcome = ensure_sufficient_stack(|| self.assign(index + 1, branch));
            self.claimed[slot] = false;

            if outcome.is_some() {
                return outcome;
            }
            tracing::trace!(entry = index, candidate = slot, "backtrack");
        }
        None
    }
}
