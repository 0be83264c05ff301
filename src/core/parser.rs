// FofaSift - core/parser.rs
//
// Line-oriented parsing of FOFA scan dumps into host records.
// Core layer: accepts text that is already in memory, never touches the
// filesystem directly.
//
// The scan is a two-state machine (no open record / open record) driven by a
// rule table evaluated in fixed order against each trimmed line. The first
// rule that matches consumes the line. Unrecognised lines are skipped: this
// is best-effort extraction, not validation, so parsing never fails.

use crate::core::model::HostRecord;
use crate::util::constants;
use regex::Regex;
use std::sync::OnceLock;

/// Result of parsing one scan dump.
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Records in the order their `ip:port` lines appeared.
    pub records: Vec<HostRecord>,
    /// Total lines read, including lines consumed by a `CloudName` look-ahead.
    pub lines_processed: u64,
    /// Non-blank lines that no rule consumed.
    pub lines_ignored: u64,
    /// Field lines seen before the first `ip:port` line. Their values are
    /// discarded because there is no record to attach them to.
    pub orphan_lines: u64,
}

/// Parse raw scan text into host records.
///
/// Each call is independent; no state survives between calls.
pub fn parse(text: &str) -> Vec<HostRecord> {
    parse_with_stats(text).records
}

/// Parse raw scan text, also returning line counters for diagnostics.
pub fn parse_with_stats(text: &str) -> ParseResult {
    let lines: Vec<&str> = text.lines().map(trim_line).collect();

    let mut scanner = RecordScanner::default();
    let mut cursor = 0;
    while cursor < lines.len() {
        let next_line = lines.get(cursor + 1).copied();
        cursor += scanner.feed(lines[cursor], next_line);
    }

    let result = scanner.finish();

    tracing::debug!(
        records = result.records.len(),
        lines = result.lines_processed,
        ignored = result.lines_ignored,
        orphans = result.orphan_lines,
        "Parsing complete"
    );

    result
}

// =============================================================================
// Scanner state machine
// =============================================================================

#[derive(Debug, Default)]
enum ScanState {
    /// No `ip:port` line seen yet.
    #[default]
    NoRecord,
    /// A record is accumulating fields.
    Open(HostRecord),
}

#[derive(Debug, Default)]
struct RecordScanner {
    state: ScanState,
    records: Vec<HostRecord>,
    lines_processed: u64,
    lines_ignored: u64,
    orphan_lines: u64,
}

impl RecordScanner {
    /// Evaluate one trimmed line against the rule table.
    ///
    /// `next_line` is only read by the cloud marker rule. Returns how many
    /// lines were consumed (1, or 2 when the look-ahead line was taken).
    fn feed(&mut self, line: &str, next_line: Option<&str>) -> usize {
        self.lines_processed += 1;

        // 1. Record boundary: `<ip>:<port>` at the start of the line.
        if let Some(caps) = boundary_regex().captures(line) {
            self.open(&caps[1], &caps[2]);
            return 1;
        }

        // 2. Geolocation: `country <country> / <region> / <city>`.
        if let Some(rest) = line.strip_prefix(constants::GEO_PREFIX) {
            self.assign(|record| {
                let mut segments = rest.split(constants::GEO_SEPARATOR);
                if let Some(country) = segments.next() {
                    record.country = country.to_string();
                }
                if let Some(region) = segments.next() {
                    record.region = region.to_string();
                }
                if let Some(city) = segments.next() {
                    record.city = city.to_string();
                }
            });
            return 1;
        }

        // 3-4. Verbatim prefixed values.
        if let Some(asn) = line.strip_prefix(constants::ASN_PREFIX) {
            self.assign(|record| record.asn = asn.to_string());
            return 1;
        }
        if let Some(org) = line.strip_prefix(constants::ORGANIZATION_PREFIX) {
            self.assign(|record| record.organization = org.to_string());
            return 1;
        }

        // 5. A line that is nothing but a date.
        if date_regex().is_match(line) {
            self.assign(|record| record.date = line.to_string());
            return 1;
        }

        // 6. Server banner.
        if let Some(server) = line.strip_prefix(constants::SERVER_PREFIX) {
            self.assign(|record| record.server = server.to_string());
            return 1;
        }

        // 7. First URL of the record sets the domain. The protocol upgrade
        // shares the same guard, so a later https:// line never upgrades a
        // record whose domain came from an earlier http:// line.
        if let Some(caps) = url_regex().captures(line) {
            match &mut self.state {
                ScanState::Open(record) if record.domain.is_empty() => {
                    record.domain = caps[1].to_string();
                    if line.contains(constants::SECURE_SCHEME) {
                        record.protocol = constants::HTTPS_PROTOCOL.to_string();
                    }
                    return 1;
                }
                ScanState::NoRecord => {
                    self.orphan_lines += 1;
                    return 1;
                }
                // Domain already captured: fall through to the remaining rules.
                ScanState::Open(_) => {}
            }
        }

        // 8. `CloudName` marker: the following line is the provider.
        if line == constants::CLOUD_MARKER {
            return match next_line.filter(|next| !next.is_empty()) {
                Some(provider) => {
                    self.lines_processed += 1;
                    self.assign(|record| record.cloud = provider.to_string());
                    2
                }
                None => 1,
            };
        }

        // 9. Title fallback.
        if let ScanState::Open(record) = &mut self.state {
            if record.title.is_empty() && is_title_candidate(line) {
                record.title = line.to_string();
                return 1;
            }
        }

        if !line.is_empty() {
            self.lines_ignored += 1;
            tracing::trace!(line = %preview(line), "Ignoring unrecognised line");
        }
        1
    }

    /// Apply a field assignment to the open record, or count it as an
    /// orphan when no record is open yet.
    fn assign(&mut self, apply: impl FnOnce(&mut HostRecord)) {
        match &mut self.state {
            ScanState::Open(record) => apply(record),
            ScanState::NoRecord => self.orphan_lines += 1,
        }
    }

    /// Close the current record (if any) and open a fresh one.
    fn open(&mut self, ip: &str, port: &str) {
        self.flush();
        self.state = ScanState::Open(HostRecord::new(ip, port));
    }

    fn flush(&mut self) {
        if let ScanState::Open(record) = std::mem::take(&mut self.state) {
            self.records.push(record);
        }
    }

    fn finish(mut self) -> ParseResult {
        self.flush();
        ParseResult {
            records: self.records,
            lines_processed: self.lines_processed,
            lines_ignored: self.lines_ignored,
            orphan_lines: self.orphan_lines,
        }
    }
}

// =============================================================================
// Line predicates
// =============================================================================

/// Trim whitespace and byte-order marks from both ends of a line.
///
/// Dumps saved by Windows editors start with U+FEFF, and joining several such
/// files puts one at the start of each file's first line.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == constants::BYTE_ORDER_MARK)
}

/// True when `line` is acceptable as a page title.
///
/// Length is counted in UTF-16 code units, strictly between the two bounds,
/// so a character outside the BMP counts twice. Lines that look like protocol
/// status lines, geolocation, `key: value` pairs or numeric data are rejected.
fn is_title_candidate(line: &str) -> bool {
    let len = line.encode_utf16().count();
    len > constants::TITLE_MIN_EXCLUSIVE
        && len < constants::TITLE_MAX_EXCLUSIVE
        && !constants::TITLE_REJECT_SUBSTRINGS
            .iter()
            .any(|needle| line.contains(*needle))
        && !line.starts_with(|c: char| c.is_ascii_digit())
}

/// Truncate a line for debug output.
fn preview(line: &str) -> String {
    line.chars().take(constants::DEBUG_MAX_LINE_PREVIEW).collect()
}

// Patterns use explicit ASCII classes: `\d` and `\w` are Unicode-aware in the
// regex crate and would accept e.g. Arabic-Indic digits as a port.

fn boundary_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9.]+):([0-9]+)").expect("boundary regex is valid"))
}

fn date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date regex is valid"))
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://([A-Za-z0-9_.-]+)").expect("url regex is valid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[&str]) -> String {
        lines.join("\n")
    }

    #[test]
    fn test_parse_full_record() {
        let records = parse(&text(&[
            "212.94.40.19:443",
            "country Switzerland / Zug / Baar",
            "ASN: 28859",
            "Organization: Convotis Schweiz AG",
            "2025-11-23",
            "Server: Apache/2.4.52 (Ubuntu)",
        ]));

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.ip, "212.94.40.19");
        assert_eq!(r.port, "443");
        assert_eq!(r.country, "Switzerland");
        assert_eq!(r.region, "Zug");
        assert_eq!(r.city, "Baar");
        assert_eq!(r.asn, "28859");
        assert_eq!(r.organization, "Convotis Schweiz AG");
        assert_eq!(r.date, "2025-11-23");
        assert_eq!(r.server, "Apache/2.4.52 (Ubuntu)");
        assert_eq!(r.protocol, "HTTP/1.1");
        assert_eq!(r.domain, "");
        assert_eq!(r.title, "");
        assert_eq!(r.cloud, "");
    }

    #[test]
    fn test_https_url_sets_domain_and_protocol_on_that_record_only() {
        let records = parse(&text(&[
            "104.18.14.143:443",
            "https://avfirewalls.com/login",
            "104.18.15.143:80",
            "country United States of America / California / San Francisco",
        ]));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].domain, "avfirewalls.com");
        assert_eq!(records[0].protocol, "HTTPS");
        assert_eq!(records[1].domain, "");
        assert_eq!(records[1].protocol, "HTTP/1.1");
    }

    #[test]
    fn test_plain_http_url_keeps_default_protocol() {
        let records = parse(&text(&["1.2.3.4:80", "http://plain.example.org/index"]));
        assert_eq!(records[0].domain, "plain.example.org");
        assert_eq!(records[0].protocol, "HTTP/1.1");
    }

    #[test]
    fn test_protocol_upgrade_only_on_first_url_line() {
        let records = parse(&text(&[
            "1.2.3.4:443",
            "http://first.example.com",
            "https://second.example.com",
        ]));
        assert_eq!(records[0].domain, "first.example.com");
        assert_eq!(records[0].protocol, "HTTP/1.1");
    }

    #[test]
    fn test_cloud_marker_consumes_next_line() {
        let records = parse(&text(&["51.84.170.231:646", "CloudName", "aws"]));
        assert_eq!(records[0].cloud, "aws");
        assert_eq!(records[0].title, "");

        // A provider name long enough to be a title must still not become one.
        let records = parse(&text(&["1.2.3.4:80", "CloudName", "Amazon Web Services"]));
        assert_eq!(records[0].cloud, "Amazon Web Services");
        assert_eq!(records[0].title, "");
    }

    #[test]
    fn test_cloud_marker_without_following_line() {
        let records = parse(&text(&["1.2.3.4:80", "CloudName"]));
        assert_eq!(records[0].cloud, "");

        // A blank look-ahead is not consumed, so the title after it still counts.
        let records = parse(&text(&["1.2.3.4:80", "CloudName", "", "Router Login Page"]));
        assert_eq!(records[0].cloud, "");
        assert_eq!(records[0].title, "Router Login Page");
    }

    #[test]
    fn test_consecutive_boundaries_produce_default_records() {
        let records = parse(&text(&["10.0.0.1:22", "10.0.0.2:8080"]));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], HostRecord::new("10.0.0.1", "22"));
        assert_eq!(records[1], HostRecord::new("10.0.0.2", "8080"));
    }

    #[test]
    fn test_title_first_match_wins() {
        let records = parse(&text(&[
            "1.2.3.4:80",
            "Please login",
            "Another Candidate Title",
        ]));
        assert_eq!(records[0].title, "Please login");
    }

    #[test]
    fn test_domain_first_match_wins() {
        let records = parse(&text(&[
            "1.2.3.4:80",
            "https://one.example",
            "https://two.example",
        ]));
        assert_eq!(records[0].domain, "one.example");
    }

    #[test]
    fn test_title_rejections() {
        let long_line = "x".repeat(200);
        let records = parse(&text(&[
            "1.2.3.4:80",
            "short",
            "HTTP/1.1 200 OK",
            "Welcome to the country club",
            "Content-Type: text/html",
            "404 Not Found",
            &long_line,
            "Fortinet Network Security Solutions",
        ]));
        assert_eq!(records[0].title, "Fortinet Network Security Solutions");
    }

    #[test]
    fn test_title_length_counts_utf16_units() {
        // Six units, more than six bytes.
        let records = parse(&text(&["1.2.3.4:80", "Lösung"]));
        assert_eq!(records[0].title, "Lösung");

        let records = parse(&text(&["1.2.3.4:80", "Lösu"]));
        assert_eq!(records[0].title, "");

        // Three characters outside the BMP are six units.
        let records = parse(&text(&["1.2.3.4:80", "🚀🚀🚀"]));
        assert_eq!(records[0].title, "🚀🚀🚀");

        let at_limit = "🚀".repeat(100);
        let under_limit = "🚀".repeat(99);
        let records = parse(&text(&["1.2.3.4:80", &at_limit, &under_limit]));
        assert_eq!(records[0].title, under_limit);
    }

    #[test]
    fn test_leading_byte_order_mark_is_ignored() {
        let records = parse("\u{FEFF}212.94.40.19:443\nASN: 28859\n1.1.1.1:80\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].ip, "212.94.40.19");
        assert_eq!(records[0].asn, "28859");
        assert_eq!(records[1].ip, "1.1.1.1");

        // Concatenated files each keep their own mark.
        let joined = "\u{FEFF}1.2.3.4:80\n\u{FEFF}5.6.7.8:443\n\u{FEFF}Server: nginx";
        let result = parse_with_stats(joined);
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[1].server, "nginx");
        assert_eq!(result.orphan_lines, 0);
    }

    #[test]
    fn test_other_fields_are_last_write_wins() {
        let records = parse(&text(&[
            "1.2.3.4:80",
            "ASN: 100",
            "ASN: 200",
            "Server: nginx",
            "Server: cloudflare",
        ]));
        assert_eq!(records[0].asn, "200");
        assert_eq!(records[0].server, "cloudflare");
    }

    #[test]
    fn test_geo_line_with_fewer_or_more_segments() {
        let records = parse(&text(&["1.2.3.4:80", "country Poland / Mazowieckie"]));
        assert_eq!(records[0].country, "Poland");
        assert_eq!(records[0].region, "Mazowieckie");
        assert_eq!(records[0].city, "");

        let records = parse(&text(&["1.2.3.4:80", "country A / B / C / D"]));
        assert_eq!(records[0].country, "A");
        assert_eq!(records[0].region, "B");
        assert_eq!(records[0].city, "C");
    }

    #[test]
    fn test_date_must_be_the_whole_line() {
        let records = parse(&text(&["1.2.3.4:80", "2025-11-23 10:00:00"]));
        assert_eq!(records[0].date, "");
    }

    #[test]
    fn test_boundary_ignores_trailing_text() {
        let records = parse(&text(&["8.8.8.8:53 (open)"]));
        assert_eq!(records[0].ip, "8.8.8.8");
        assert_eq!(records[0].port, "53");
    }

    #[test]
    fn test_lines_are_trimmed_and_crlf_tolerated() {
        let records = parse("  1.2.3.4:80  \r\n\tASN: 13335 \r\n  Organization: CLOUDFLARENET\r\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ip, "1.2.3.4");
        assert_eq!(records[0].asn, "13335");
        assert_eq!(records[0].organization, "CLOUDFLARENET");
    }

    #[test]
    fn test_lines_before_first_record_are_discarded() {
        let result = parse_with_stats(&text(&[
            "FOFA search results",
            "country Nowhere / Nothing",
            "https://orphan.example",
            "1.2.3.4:80",
        ]));

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0], HostRecord::new("1.2.3.4", "80"));
        assert_eq!(result.orphan_lines, 2);
        assert_eq!(result.lines_ignored, 1);
        assert_eq!(result.lines_processed, 4);
    }

    #[test]
    fn test_empty_and_garbage_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n   \n").is_empty());
        assert!(parse("no records here\nat all").is_empty());
    }

    #[test]
    fn test_emitted_records_always_have_ip_and_port() {
        let messy = text(&[
            "ASN: 1",
            "CloudName",
            "aws",
            "5.5.5.5:5",
            ":80",
            "CloudName",
            "6.6.6.6:6",
            "...:1",
            "random words here",
        ]);
        let records = parse(&messy);
        assert!(!records.is_empty());
        for r in &records {
            assert!(!r.ip.is_empty());
            assert!(!r.port.is_empty());
        }
    }

    #[test]
    fn test_cloud_look_ahead_skips_boundary_line() {
        // The consumed line is not re-evaluated, even if it looks like a boundary.
        let result = parse_with_stats(&text(&["1.2.3.4:80", "CloudName", "9.9.9.9:99"]));
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].cloud, "9.9.9.9:99");
        assert_eq!(result.lines_processed, 3);
    }
}
