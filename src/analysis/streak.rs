//! Trailing-run detection over a most-recent-first outcome log.
//!
//! Given a workflow's run history as returned by the API (newest first),
//! [`compute_streak`] measures the most recent contiguous run of a target
//! outcome. Neutral outcomes (cancelled, skipped, still running) neither
//! extend nor break the run; the scan stops at the first opposite outcome
//! seen after the run has started.

/// An event with one observable outcome label. `None` covers events that
/// have not concluded yet.
pub trait OutcomeEvent {
    fn outcome(&self) -> Option<&str>;
}

/// A maximal trailing run of one outcome, borrowed from the scanned log.
///
/// `last` is the chronologically latest member (first matching event in
/// scan order), `first` the earliest. Both are `None` iff `length == 0`;
/// they are the same event when `length == 1`.
#[derive(Debug)]
pub struct Streak<'a, E> {
    pub length: usize,
    pub first: Option<&'a E>,
    pub last: Option<&'a E>,
}

impl<E> Clone for Streak<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Streak<'_, E> {}

/// Scan `events` (ordered most-recent-first) for the trailing run of
/// `target` outcomes. The scan stops at the first `opposite` outcome once
/// a run has started; an `opposite` before any `target` is passed over,
/// as is every other outcome value.
pub fn compute_streak<'a, E: OutcomeEvent>(
    events: &'a [E],
    target: &str,
    opposite: &str,
) -> Streak<'a, E> {
    let mut streak = Streak {
        length: 0,
        first: None,
        last: None,
    };
    for event in events {
        if event.outcome() == Some(target) {
            if streak.last.is_none() {
                streak.last = Some(event);
                streak.first = Some(event);
                streak.length = 1;
            } else {
                streak.first = Some(event);
                streak.length += 1;
            }
        }
        // The break is only armed once a run has started.
        if event.outcome() == Some(opposite) && streak.last.is_some() {
            break;
        }
    }
    streak
}
