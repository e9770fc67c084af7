//! Summary buckets for a result set, and the timing format used per file.
//!
//! Summaries are a pure fold over the outcomes; bucket lists keep the
//! processing order.

use crate::outcome::{CreateOutcome, CreateStatus, VerifyOutcome, VerifyStatus};
use std::time::Duration;

/// Verification results grouped by status.
#[derive(Debug, Default)]
pub struct VerifySummary<'a> {
    pub total: usize,
    pub matched: usize,
    pub not_matched: Vec<&'a VerifyOutcome>,
    pub not_found: Vec<&'a VerifyOutcome>,
    pub locked: Vec<&'a VerifyOutcome>,
    pub failed: Vec<&'a VerifyOutcome>,
}

impl<'a> VerifySummary<'a> {
    pub fn from_outcomes(outcomes: &'a [VerifyOutcome]) -> Self {
        outcomes.iter().fold(
            Self {
                total: outcomes.len(),
                ..Self::default()
            },
            |mut s, o| {
                match o.status {
                    VerifyStatus::Match => s.matched += 1,
                    VerifyStatus::NotMatch => s.not_matched.push(o),
                    VerifyStatus::NotFound => s.not_found.push(o),
                    VerifyStatus::Locked(_) => s.locked.push(o),
                    VerifyStatus::CheckingFailed(_) => s.failed.push(o),
                }
                s
            },
        )
    }

    /// True when every processed file matched its sidecar.
    pub fn all_matched(&self) -> bool {
        self.matched == self.total
    }
}

/// Creation results grouped by status.
#[derive(Debug, Default)]
pub struct CreateSummary<'a> {
    pub total: usize,
    pub created: usize,
    pub existing: Vec<&'a CreateOutcome>,
    pub locked: Vec<&'a CreateOutcome>,
    pub failed: Vec<&'a CreateOutcome>,
}

impl<'a> CreateSummary<'a> {
    pub fn from_outcomes(outcomes: &'a [CreateOutcome]) -> Self {
        outcomes.iter().fold(
            Self {
                total: outcomes.len(),
                ..Self::default()
            },
            |mut s, o| {
                match o.status {
                    CreateStatus::Created => s.created += 1,
                    CreateStatus::Existing => s.existing.push(o),
                    CreateStatus::LockedCreation(_) => s.locked.push(o),
                    CreateStatus::Failed(_) => s.failed.push(o),
                }
                s
            },
        )
    }
}

/// Human timing: `1h2m3s`, `4m5s`, `6s`, or `789ms`.
pub fn format_duration(d: Duration) -> String {
    let millis = (d.as_nanos() + 500_000) / 1_000_000;
    if millis < 1_000 {
        return format!("{millis}ms");
    }
    let total_secs = (millis + 500) / 1_000;
    if millis >= 3_600_000 {
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        let seconds = total_secs % 60;
        return format!("{hours}h{minutes}m{seconds}s");
    }
    if millis >= 60_000 {
        return format!("{}m{}s", total_secs / 60, total_secs % 60);
    }
    format!("{total_secs}s")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::Path;

    #[test]
    fn verify_summary_buckets() {
        let p = Path::new("/f");
        let outcomes = vec![
            VerifyOutcome::new(p, VerifyStatus::Match),
            VerifyOutcome::new(p, VerifyStatus::NotFound),
            VerifyOutcome::new(p, VerifyStatus::Match),
            VerifyOutcome::new(Path::new("/bad"), VerifyStatus::NotMatch),
            VerifyOutcome::locked(p, io::Error::from(io::ErrorKind::PermissionDenied)),
            VerifyOutcome::failed(p, io::Error::new(io::ErrorKind::Other, "x")),
        ];
        let s = VerifySummary::from_outcomes(&outcomes);
        assert_eq!(s.total, 6);
        assert_eq!(s.matched, 2);
        assert_eq!(s.not_matched.len(), 1);
        assert_eq!(s.not_matched[0].path, Path::new("/bad"));
        assert_eq!(s.not_found.len(), 1);
        assert_eq!(s.locked.len(), 1);
        assert_eq!(s.failed.len(), 1);
        assert!(!s.all_matched());
    }

    #[test]
    fn empty_summaries() {
        let s = VerifySummary::from_outcomes(&[]);
        assert_eq!(s.total, 0);
        assert!(s.all_matched());
        let c = CreateSummary::from_outcomes(&[]);
        assert_eq!(c.created, 0);
        assert!(c.existing.is_empty());
    }

    #[test]
    fn create_summary_buckets() {
        let p = Path::new("/f");
        let outcomes = vec![
            CreateOutcome::new(p, CreateStatus::Created),
            CreateOutcome::new(p, CreateStatus::Existing),
            CreateOutcome::new(p, CreateStatus::Created),
            CreateOutcome::locked(p, io::Error::from(io::ErrorKind::PermissionDenied)),
            CreateOutcome::failed(p, io::Error::new(io::ErrorKind::Other, "x")),
        ];
        let s = CreateSummary::from_outcomes(&outcomes);
        assert_eq!(s.total, 5);
        assert_eq!(s.created, 2);
        assert_eq!(s.existing.len(), 1);
        assert_eq!(s.locked.len(), 1);
        assert_eq!(s.failed.len(), 1);
    }

    #[test]
    fn duration_formats() {
        assert_eq!(format_duration(Duration::ZERO), "0ms");
        assert_eq!(format_duration(Duration::from_micros(1_400)), "1ms");
        assert_eq!(format_duration(Duration::from_millis(999)), "999ms");
        assert_eq!(format_duration(Duration::from_millis(1_000)), "1s");
        assert_eq!(format_duration(Duration::from_millis(1_499)), "1s");
        assert_eq!(format_duration(Duration::from_millis(1_500)), "2s");
        assert_eq!(format_duration(Duration::from_secs(59)), "59s");
        assert_eq!(format_duration(Duration::from_secs(61)), "1m1s");
        assert_eq!(format_duration(Duration::from_secs(3_599)), "59m59s");
        assert_eq!(format_duration(Duration::from_secs(3_661)), "1h1m1s");
    }
}
