//! Report persistence
//!
//! One JSON report per suite per run. Before a new report is written, stale
//! reports for the same suite are removed from the directory; the fresh file
//! gets a collision-resistant `{suite}_{timestamp}_{hex}.json` name.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use usercheck_core::Report;

/// Remove previous reports of this suite, then persist the new one.
///
/// Returns the report file path on success.
pub fn save_report(report: &Report, suite: &str, dir: &Path) -> Result<PathBuf, std::io::Error> {
    std::fs::create_dir_all(dir)?;
    remove_stale_reports(dir, suite)?;

    let path = dir.join(format!("{suite}_{}.json", unique_suffix()));
    let json =
        serde_json::to_string_pretty(report).map_err(|e| std::io::Error::other(e.to_string()))?;
    std::fs::write(&path, json)?;
    Ok(path)
}

/// Persist a `.http` reproduction file next to the report.
pub fn save_repro(content: &str, report_path: &Path) -> Result<PathBuf, std::io::Error> {
    let path = report_path.with_extension("http");
    std::fs::write(&path, content)?;
    Ok(path)
}

/// Delete every file in `dir` belonging to `suite`: reports and
/// reproduction files alike. Not safe for concurrent batches sharing a
/// directory.
fn remove_stale_reports(dir: &Path, suite: &str) -> Result<(), std::io::Error> {
    let prefix = format!("{suite}_");
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.starts_with(&prefix) && (name.ends_with(".json") || name.ends_with(".http")) {
            std::fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

/// `{timestamp}_{hex}`: compact UTC time plus a random suffix.
fn unique_suffix() -> String {
    format!("{}_{:08x}", timestamp_compact(), rand::random::<u32>())
}

/// `"20260205T193000"`, a filesystem-safe compact timestamp.
fn timestamp_compact() -> String {
    let (y, mo, d, h, mi, s) = utc_now();
    format!("{y:04}{mo:02}{d:02}T{h:02}{mi:02}{s:02}")
}

/// `"2026-02-05T19:30:00Z"`, ISO 8601 for the report body.
pub fn timestamp_iso() -> String {
    let (y, mo, d, h, mi, s) = utc_now();
    format!("{y:04}-{mo:02}-{d:02}T{h:02}:{mi:02}:{s:02}Z")
}

/// Current UTC date-time from epoch. No external crate needed.
fn utc_now() -> (i32, u32, u32, u32, u32, u32) {
    let epoch_secs = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let days = (epoch_secs / 86400) as i64;
    let tod = epoch_secs % 86400;
    let (y, m, d) = civil_from_days(days);
    (
        y,
        m,
        d,
        (tod / 3600) as u32,
        ((tod % 3600) / 60) as u32,
        (tod % 60) as u32,
    )
}

/// Howard Hinnant's `civil_from_days`: epoch days to (year, month, day).
///
/// Reference: <https://howardhinnant.github.io/date_algorithms.html#civil_from_days>
fn civil_from_days(days: i64) -> (i32, u32, u32) {
    let z = days + 719_468;
    let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
    let doe = (z - era * 146_097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y as i32, m, d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use usercheck_core::report::MatchStrategy;

    fn sample_report(title: &str) -> Report {
        Report::build(title, timestamp_iso(), &[], MatchStrategy::Substring)
    }

    #[test]
    fn civil_from_days_epoch() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
    }

    #[test]
    fn civil_from_days_known_date() {
        // 2026-02-05 = day 20489 from epoch
        assert_eq!(civil_from_days(20_489), (2026, 2, 5));
    }

    #[test]
    fn saved_report_name_carries_suite_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_report(&sample_report("login"), "login", dir.path()).unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("login_"));
        assert!(name.ends_with(".json"));
        assert!(path.exists());
    }

    #[test]
    fn saved_report_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_report(&sample_report("login"), "login", dir.path()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Report = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.title, "login");
        assert_eq!(parsed.total_cases, 0);
    }

    #[test]
    fn stale_reports_of_same_suite_removed() {
        let dir = tempfile::tempdir().unwrap();
        let first = save_report(&sample_report("login"), "login", dir.path()).unwrap();
        let repro = save_repro("### old", &first).unwrap();
        let other = save_report(&sample_report("create-user"), "create-user", dir.path()).unwrap();

        let second = save_report(&sample_report("login"), "login", dir.path()).unwrap();

        assert!(!first.exists(), "stale report must be removed");
        assert!(!repro.exists(), "stale repro must be removed");
        assert!(second.exists());
        assert!(other.exists(), "other suites' reports are untouched");
    }

    #[test]
    fn consecutive_saves_get_distinct_names() {
        let dir = tempfile::tempdir().unwrap();
        let a = save_report(&sample_report("login"), "login", dir.path()).unwrap();
        let b = save_report(&sample_report("login"), "login", dir.path()).unwrap();
        // a was cleaned up; the fresh name must still differ
        assert_ne!(a, b);
    }

    #[test]
    fn repro_written_next_to_report() {
        let dir = tempfile::tempdir().unwrap();
        let report = save_report(&sample_report("login"), "login", dir.path()).unwrap();
        let repro = save_repro("### case", &report).unwrap();

        assert_eq!(repro.extension().unwrap(), "http");
        assert_eq!(repro.parent(), report.parent());
        assert_eq!(std::fs::read_to_string(repro).unwrap(), "### case");
    }

    #[test]
    fn iso_timestamp_shape() {
        let ts = timestamp_iso();
        assert_eq!(ts.len(), 20);
        assert!(ts.ends_with('Z'));
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], "T");
    }
}
