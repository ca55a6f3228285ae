//! Half-open stay period `[check_in, check_out)`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected date range: check-in must fall strictly before check-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid stay period: check-in {check_in} must fall before check-out {check_out}")]
pub struct InvalidStayPeriod {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// A validated date range with half-open interval semantics.
///
/// The night of `check_out` is not part of the stay, so back-to-back
/// periods like `[d1, d2)` and `[d2, d3)` do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayPeriod {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayPeriod {
    /// Creates a period, rejecting empty or inverted ranges.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, InvalidStayPeriod> {
        if check_in < check_out {
            Ok(Self {
                check_in,
                check_out,
            })
        } else {
            Err(InvalidStayPeriod {
                check_in,
                check_out,
            })
        }
    }

    /// First occupied night.
    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Exclusive end of the stay.
    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights covered, always at least 1.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// True iff the two half-open ranges intersect:
    /// `self.check_in < other.check_out && other.check_in < self.check_out`.
    pub fn overlaps(&self, other: &StayPeriod) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}

impl std::fmt::Display for StayPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.check_in, self.check_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn period(check_in: u32, check_out: u32) -> StayPeriod {
        StayPeriod::new(date(check_in), date(check_out)).unwrap()
    }

    #[test]
    fn rejects_empty_range() {
        let err = StayPeriod::new(date(5), date(5)).unwrap_err();
        assert_eq!(err.check_in, date(5));
        assert_eq!(err.check_out, date(5));
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(StayPeriod::new(date(7), date(3)).is_err());
    }

    #[test]
    fn counts_nights() {
        assert_eq!(period(1, 2).nights(), 1);
        assert_eq!(period(1, 8).nights(), 7);
    }

    #[test]
    fn adjacent_periods_do_not_overlap() {
        let first = period(1, 3);
        let second = period(3, 5);
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn contained_period_overlaps() {
        let outer = period(1, 10);
        let inner = period(4, 6);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn partial_overlap_detected_in_both_directions() {
        let first = period(1, 4);
        let second = period(3, 6);
        assert!(first.overlaps(&second));
        assert!(second.overlaps(&first));
    }

    #[test]
    fn overlap_matches_shared_night_oracle() {
        // Exhaustive sweep over a small window, checked against a
        // brute-force "do they share an occupied night" oracle.
        for s1 in 1..9u32 {
            for e1 in (s1 + 1)..10 {
                for s2 in 1..9u32 {
                    for e2 in (s2 + 1)..10 {
                        let a = period(s1, e1);
                        let b = period(s2, e2);
                        let shared_night =
                            (s1..e1).any(|night| (s2..e2).contains(&night));
                        assert_eq!(
                            a.overlaps(&b),
                            shared_night,
                            "periods {a} and {b} disagree with oracle"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn serialization_roundtrip() {
        let p = period(1, 4);
        let json = serde_json::to_string(&p).unwrap();
        let deserialized: StayPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(p, deserialized);
    }

    #[test]
    fn display_shows_half_open_range() {
        assert_eq!(period(1, 4).to_string(), "[2026-03-01, 2026-03-04)");
    }
}
