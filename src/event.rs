/// A timestamp of `0` is the "no valid timestamp" sentinel.
const INVALID_TIMESTAMP: u64 = 0;

/// One well-formed `(timestamp, key)` record, borrowing its key from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event<'a> {
    pub timestamp: u64,
    pub key: &'a str,
}

/// Parses a single TSV line into an [`Event`].
///
/// Returns `None` for malformed records: fewer than two fields, an empty or
/// non UTF-8 key, or a timestamp that is not a non-zero decimal `u64` made of
/// ASCII digits only (no sign, no whitespace).
/// Fields after the second one are ignored.
pub fn parse_line(line: &[u8]) -> Option<Event<'_>> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    let mut fields = line.split(|&b| b == b'\t');

    let timestamp = fields.next()?;
    let key = fields.next()?;
    if key.is_empty() {
        return None;
    }

    if timestamp.is_empty() || !timestamp.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let timestamp: u64 = std::str::from_utf8(timestamp).ok()?.parse().ok()?;
    if timestamp == INVALID_TIMESTAMP {
        return None;
    }
    let key = std::str::from_utf8(key).ok()?;

    Some(Event { timestamp, key })
}

/// Inclusive timestamp range with independently optional bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub from: Option<u64>,
    pub to: Option<u64>,
}

impl TimeRange {
    pub fn new(from: Option<u64>, to: Option<u64>) -> Self {
        Self { from, to }
    }

    /// The unbounded range.
    pub fn all() -> Self {
        Self::default()
    }

    #[inline]
    pub fn contains(&self, timestamp: u64) -> bool {
        self.from.map_or(true, |from| from <= timestamp)
            && self.to.map_or(true, |to| timestamp <= to)
    }

    /// `true` when `from > to`, in which case nothing can match.
    pub fn is_empty(&self) -> bool {
        matches!((self.from, self.to), (Some(from), Some(to)) if from > to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_line() {
        let event = parse_line(b"1438387200\thttp://example.com/a").unwrap();
        assert_eq!(event.timestamp, 1438387200);
        assert_eq!(event.key, "http://example.com/a");
    }

    #[test]
    fn test_parse_strips_carriage_return_and_extra_fields() {
        assert_eq!(
            parse_line(b"42\turl\r"),
            Some(Event { timestamp: 42, key: "url" })
        );
        assert_eq!(
            parse_line(b"42\turl\tignored\tfields"),
            Some(Event { timestamp: 42, key: "url" })
        );
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        assert_eq!(parse_line(b""), None);
        assert_eq!(parse_line(b"12345"), None);
        assert_eq!(parse_line(b"12345\t"), None);
        assert_eq!(parse_line(b"abc\turl"), None);
        assert_eq!(parse_line(b"-5\turl"), None);
        assert_eq!(parse_line(b" 5\turl"), None);
        assert_eq!(parse_line(b"+5\turl"), None);
        assert_eq!(parse_line(b"\turl"), None);
        assert_eq!(parse_line(b"99999999999999999999999\turl"), None);
        assert_eq!(parse_line(b"7\t\xff\xfe"), None);
    }

    #[test]
    fn test_parse_rejects_sentinel_timestamp() {
        assert_eq!(parse_line(b"0\turl"), None);
        assert_eq!(parse_line(b"000\turl"), None);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let range = TimeRange::new(Some(10), Some(20));
        assert!(!range.contains(5));
        assert!(range.contains(10));
        assert!(range.contains(15));
        assert!(range.contains(20));
        assert!(!range.contains(25));
    }

    #[test]
    fn test_range_bounds_are_independent() {
        let from_only = TimeRange::new(Some(10), None);
        assert!(!from_only.contains(9));
        assert!(from_only.contains(u64::MAX));

        let to_only = TimeRange::new(None, Some(10));
        assert!(to_only.contains(1));
        assert!(!to_only.contains(11));

        assert!(TimeRange::all().contains(1));
        assert!(TimeRange::all().contains(u64::MAX));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        assert!(TimeRange::new(Some(20), Some(10)).is_empty());
        assert!(!TimeRange::new(Some(10), Some(10)).is_empty());
        assert!(!TimeRange::all().is_empty());
        assert!(!TimeRange::new(Some(20), Some(10)).contains(15));
    }
}
