use std::fs;
use std::io;
use std::path::Path;

use chrono::NaiveDateTime;

/// Write a file atomically: write a temp sibling, then rename over the
/// target so readers never observe a half-written file.
pub fn atomic_write_str(path: &Path, content: &str) -> io::Result<()> {
    let mut tmp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Parse a backend or booking-form timestamp.
///
/// The backend omits `:00` seconds for on-the-minute times and the booking
/// form never sends them, so both shapes are accepted.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// Render a timestamp for terminal output. Unparseable input passes through.
pub fn format_datetime(raw: &str) -> String {
    match parse_datetime(raw) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        atomic_write_str(&path, "{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        atomic_write_str(&path, "first").unwrap();
        atomic_write_str(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_parse_datetime_with_and_without_seconds() {
        let with = parse_datetime("2025-05-12T10:30:00").unwrap();
        let without = parse_datetime("2025-05-12T10:30").unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn test_format_datetime_passes_through_garbage() {
        assert_eq!(format_datetime("not a date"), "not a date");
        assert_eq!(format_datetime("2025-05-12T10:30"), "2025-05-12 10:30");
    }
}
