//! Roster file parsing.
//!
//! One student per line: `<email> <password> [<freeform additional info>]`,
//! tokens separated by arbitrary runs of whitespace. Whitespace-only lines
//! are skipped. A line with fewer than two tokens invalidates the whole
//! file: the loader reports it and returns no records at all, never a
//! partial batch.

use std::path::Path;
use tracing::error;

/// One parsed roster line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub email: String,
    pub password: String,
    /// Remaining tokens joined with single spaces; empty when absent.
    pub additional_info: String,
}

/// Load a roster file into records, in file order.
///
/// Never panics and never returns an error: unreadable files and malformed
/// lines are logged and collapse to an empty vector, which the runner treats
/// as a hard stop.
pub fn load_roster<P: AsRef<Path>>(path: P) -> Vec<UserRecord> {
    let path = path.as_ref();
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) => {
            error!(path = %path.display(), %err, "failed to read roster file");
            return Vec::new();
        }
    };

    match parse_roster(&data) {
        Ok(records) => records,
        Err(line) => {
            error!(
                path = %path.display(),
                line,
                "roster line has fewer than two fields; discarding the whole roster"
            );
            Vec::new()
        }
    }
}

/// Parse roster text; `Err` carries the first malformed line.
fn parse_roster(data: &str) -> Result<Vec<UserRecord>, String> {
    let mut records = Vec::new();

    for line in data.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let (Some(email), Some(password)) = (tokens.next(), tokens.next()) else {
            return Err(line.to_string());
        };

        records.push(UserRecord {
            email: email.to_string(),
            password: password.to_string(),
            additional_info: tokens.collect::<Vec<_>>().join(" "),
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_and_three_token_lines() {
        let records = parse_roster("a@x.com pw1\nb@x.com pw2 extra note\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].email, "a@x.com");
        assert_eq!(records[0].password, "pw1");
        assert_eq!(records[0].additional_info, "");
        assert_eq!(records[1].additional_info, "extra note");
    }

    #[test]
    fn collapses_whitespace_runs() {
        let records = parse_roster("a@x.com\t\tpw1   retakes  the   course\n").unwrap();
        assert_eq!(records[0].password, "pw1");
        assert_eq!(records[0].additional_info, "retakes the course");
    }

    #[test]
    fn skips_blank_and_whitespace_only_lines() {
        let records = parse_roster("\n  \t \na@x.com pw1\n\n").unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn single_token_line_discards_everything() {
        assert_eq!(parse_roster("badline\n"), Err("badline".to_string()));
        // Well-formed neighbours do not rescue the batch.
        assert_eq!(
            parse_roster("a@x.com pw1\nbadline\nb@x.com pw2\n"),
            Err("badline".to_string())
        );
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert_eq!(parse_roster("").unwrap(), Vec::new());
    }

    #[test]
    fn load_roster_missing_file_is_empty() {
        assert!(load_roster("definitely-not-here.txt").is_empty());
    }

    #[test]
    fn load_roster_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.txt");
        std::fs::write(&path, "a@x.com pw1\nb@x.com pw2 extra note\n").unwrap();

        let records = load_roster(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].additional_info, "extra note");
    }

    #[test]
    fn load_roster_malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.txt");
        std::fs::write(&path, "a@x.com pw1\nbadline\n").unwrap();

        assert!(load_roster(&path).is_empty());
    }
}
