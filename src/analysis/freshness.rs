use chrono::{DateTime, Duration, Utc};

/// How recently a package release happened, bucketed by age.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Released within the last 8 weeks.
    Fresh,
    /// Older than 8 weeks.
    Aging,
    /// Older than 16 weeks.
    Stale,
}

impl Freshness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Freshness::Fresh => "fresh",
            Freshness::Aging => "aging",
            Freshness::Stale => "stale",
        }
    }
}

pub fn release_freshness(released_at: DateTime<Utc>, now: DateTime<Utc>) -> Freshness {
    let age = now - released_at;
    if age > Duration::weeks(16) {
        Freshness::Stale
    } else if age > Duration::weeks(8) {
        Freshness::Aging
    } else {
        Freshness::Fresh
    }
}

/// A workflow whose newest run is more than 3 days old is likely stuck or
/// disabled and gets flagged.
pub fn run_is_stale(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - updated_at > Duration::days(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_recent_release_is_fresh() {
        let released = now() - Duration::weeks(2);
        assert_eq!(release_freshness(released, now()), Freshness::Fresh);
    }

    #[test]
    fn test_exactly_eight_weeks_is_still_fresh() {
        let released = now() - Duration::weeks(8);
        assert_eq!(release_freshness(released, now()), Freshness::Fresh);
    }

    #[test]
    fn test_over_eight_weeks_is_aging() {
        let released = now() - Duration::weeks(8) - Duration::days(1);
        assert_eq!(release_freshness(released, now()), Freshness::Aging);
    }

    #[test]
    fn test_exactly_sixteen_weeks_is_aging() {
        let released = now() - Duration::weeks(16);
        assert_eq!(release_freshness(released, now()), Freshness::Aging);
    }

    #[test]
    fn test_over_sixteen_weeks_is_stale() {
        let released = now() - Duration::weeks(16) - Duration::days(1);
        assert_eq!(release_freshness(released, now()), Freshness::Stale);
    }

    #[test]
    fn test_run_staleness_boundary() {
        assert!(!run_is_stale(now() - Duration::days(3), now()));
        assert!(run_is_stale(now() - Duration::days(3) - Duration::hours(1), now()));
    }
}
