use once_cell::sync::Lazy;
use regex::Regex;

/// Exact body the server sends when no files are stored.
pub const NO_FILES_SENTINEL: &str = "There are no files on the server.";

static SIZE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s+bytes").unwrap());
static UPLOADED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Uploaded by (.+) on (.+)").unwrap());

const UNKNOWN: &str = "Unknown";

/// One parsed line of the listing response. Rebuilt from scratch on every
/// fetch; entries have no identity across refreshes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub filename: String,
    pub owner: String,
    pub size_bytes: u64,
    pub timestamp: String,
}

impl FileEntry {
    /// Size in mebibytes with exactly two fractional digits.
    pub fn size_mb(&self) -> String {
        format!("{:.2}", self.size_bytes as f64 / 1_048_576.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// The server reported no stored files (sentinel or blank body).
    Empty,
    /// Entries in the order the server listed them.
    Files(Vec<FileEntry>),
}

/// Parse a `/api/list` response body. Malformed lines are dropped without
/// error; the remaining lines keep their input order.
pub fn parse_listing(body: &str) -> Listing {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == NO_FILES_SENTINEL {
        return Listing::Empty;
    }
    Listing::Files(body.lines().filter_map(parse_line).collect())
}

/// Parse one listing line of the form
/// `<filename> - <size> bytes - Uploaded by <owner> on <timestamp>`.
///
/// A line with fewer than three ` - ` separated segments yields no entry.
/// An unparseable size falls back to 0, an unparseable uploader segment
/// falls back to "Unknown" for both owner and timestamp.
pub fn parse_line(line: &str) -> Option<FileEntry> {
    let segments: Vec<&str> = line.split(" - ").collect();
    if segments.len() < 3 {
        return None;
    }

    let raw_name = segments[0].trim();
    let filename = match urlencoding::decode(raw_name) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw_name.to_string(),
    };

    let size_bytes = SIZE_RE
        .captures(segments[1])
        .and_then(|caps| caps[1].parse::<u64>().ok())
        .unwrap_or(0);

    let (owner, timestamp) = match UPLOADED_RE.captures(segments[2]) {
        Some(caps) => (caps[1].trim().to_string(), caps[2].trim().to_string()),
        None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
    };

    Some(FileEntry {
        filename,
        owner,
        size_bytes,
        timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_line() {
        let entry = parse_line("notes.txt - 2048 bytes - Uploaded by alice on 2024-01-01").unwrap();
        assert_eq!(entry.filename, "notes.txt");
        assert_eq!(entry.owner, "alice");
        assert_eq!(entry.size_bytes, 2048);
        assert_eq!(entry.size_mb(), "0.00");
        assert_eq!(entry.timestamp, "2024-01-01");
    }

    #[test]
    fn size_mb_rounds_to_two_digits() {
        let entry =
            parse_line("bigfile.zip - 5242880 bytes - Uploaded by bob on 2024-02-02").unwrap();
        assert_eq!(entry.size_mb(), "5.00");
    }

    #[test]
    fn line_with_too_few_segments_yields_no_entry() {
        assert_eq!(parse_line("justafilename"), None);
        assert_eq!(parse_line("name.txt - 12 bytes"), None);
    }

    #[test]
    fn size_segment_without_bytes_suffix_defaults_to_zero() {
        let entry = parse_line("a.txt - big - Uploaded by alice on today").unwrap();
        assert_eq!(entry.size_bytes, 0);
        assert_eq!(entry.size_mb(), "0.00");
    }

    #[test]
    fn uploader_segment_mismatch_defaults_to_unknown() {
        let entry = parse_line("a.txt - 10 bytes - something else entirely").unwrap();
        assert_eq!(entry.owner, "Unknown");
        assert_eq!(entry.timestamp, "Unknown");
    }

    #[test]
    fn filename_is_trimmed_and_percent_decoded() {
        let entry =
            parse_line("  my%20report.pdf  - 100 bytes - Uploaded by carol on 2024-03-03").unwrap();
        assert_eq!(entry.filename, "my report.pdf");
    }

    #[test]
    fn sentinel_body_is_empty_listing() {
        assert_eq!(parse_listing("There are no files on the server."), Listing::Empty);
        assert_eq!(parse_listing("  \n"), Listing::Empty);
    }

    #[test]
    fn malformed_line_is_skipped_others_survive_in_order() {
        let body = "a.txt - 10 bytes - Uploaded by alice on d1\n\
                    justafilename\n\
                    b.txt - 20 bytes - Uploaded by bob on d2";
        match parse_listing(body) {
            Listing::Files(entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].filename, "a.txt");
                assert_eq!(entries[1].filename, "b.txt");
            }
            Listing::Empty => panic!("expected entries"),
        }
    }
}
