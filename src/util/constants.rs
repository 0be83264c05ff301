// FofaSift - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.
// Parser line markers live here too so the rule table reads in one place.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "FofaSift";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "FofaSift";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Host record defaults
// =============================================================================

/// Protocol assigned to every freshly opened record.
pub const DEFAULT_PROTOCOL: &str = "HTTP/1.1";

/// Protocol assigned when the first URL line of a record uses `https://`.
pub const HTTPS_PROTOCOL: &str = "HTTPS";

// =============================================================================
// Parser line markers
// =============================================================================

/// Prefix of the geolocation line: `country <country> / <region> / <city>`.
pub const GEO_PREFIX: &str = "country ";

/// Separator between the geolocation segments.
pub const GEO_SEPARATOR: &str = " / ";

/// Prefix of the autonomous system number line.
pub const ASN_PREFIX: &str = "ASN: ";

/// Prefix of the organisation line.
pub const ORGANIZATION_PREFIX: &str = "Organization: ";

/// Prefix of the server banner line.
pub const SERVER_PREFIX: &str = "Server: ";

/// Literal scheme that upgrades a record's protocol to HTTPS.
pub const SECURE_SCHEME: &str = "https://";

/// A line consisting solely of this token marks the next line as the
/// cloud provider name.
pub const CLOUD_MARKER: &str = "CloudName";

/// Title candidates must be strictly longer than this many characters.
pub const TITLE_MIN_EXCLUSIVE: usize = 5;

/// Title candidates must be strictly shorter than this many characters.
pub const TITLE_MAX_EXCLUSIVE: usize = 200;

/// Substrings that disqualify a line from being used as a title.
pub const TITLE_REJECT_SUBSTRINGS: &[&str] = &["HTTP/", "country", ":"];

// =============================================================================
// Input limits
// =============================================================================

/// Maximum size of a single input file in bytes.
pub const MAX_INPUT_FILE_SIZE: u64 = 64 * 1024 * 1024; // 64 MiB

/// Path argument that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

/// Unicode byte-order mark, stripped from line edges before parsing.
pub const BYTE_ORDER_MARK: char = '\u{FEFF}';

// =============================================================================
// Display
// =============================================================================

/// Default width of the title column in table output (characters).
pub const DEFAULT_MAX_TITLE_WIDTH: usize = 48;

/// Minimum user-configurable title column width.
pub const MIN_TITLE_WIDTH: usize = 8;

/// Maximum user-configurable title column width.
pub const MAX_TITLE_WIDTH: usize = 200;

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Results go to stdout, so diagnostics stay quiet.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Maximum length of an input line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 80;

// =============================================================================
// Export
// =============================================================================

/// File name prefix for generated CSV exports (`fofa_data_<date>.csv`).
pub const EXPORT_FILE_PREFIX: &str = "fofa_data_";

/// File extension for CSV exports.
pub const CSV_EXTENSION: &str = "csv";

/// `--output` value that requests the default dated export file name.
pub const AUTO_OUTPUT_NAME: &str = "auto";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
