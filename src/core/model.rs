// FofaSift - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use serde::{Deserialize, Serialize};

// =============================================================================
// Host Record (normalised output of parsing)
// =============================================================================

/// One discovered network endpoint with its associated metadata.
///
/// Every field is a plain `String`. Fields never observed in the source text
/// stay empty rather than absent, so search, sort and export can treat all
/// thirteen columns uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    /// Dotted-quad address from the boundary line. Never empty.
    pub ip: String,

    /// Port from the boundary line. Never empty.
    pub port: String,

    pub country: String,
    pub region: String,
    pub city: String,

    /// Autonomous system number, kept verbatim.
    pub asn: String,

    pub organization: String,

    /// Scan date in `YYYY-MM-DD` form.
    pub date: String,

    /// Server banner (`Server:` header value).
    pub server: String,

    /// Page or service title. First candidate line wins.
    pub title: String,

    /// `HTTP/1.1` unless the first URL line of the record is `https://`.
    pub protocol: String,

    /// Host captured from the first URL line. First match wins.
    pub domain: String,

    /// Cloud provider label from a `CloudName` block.
    pub cloud: String,
}

impl HostRecord {
    /// Open a new record for `ip:port` with every other field at its default.
    pub fn new(ip: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            port: port.into(),
            country: String::new(),
            region: String::new(),
            city: String::new(),
            asn: String::new(),
            organization: String::new(),
            date: String::new(),
            server: String::new(),
            title: String::new(),
            protocol: constants::DEFAULT_PROTOCOL.to_string(),
            domain: String::new(),
            cloud: String::new(),
        }
    }

    /// Borrow the value of a field by name.
    pub fn field(&self, field: RecordField) -> &str {
        match field {
            RecordField::Ip => &self.ip,
            RecordField::Port => &self.port,
            RecordField::Country => &self.country,
            RecordField::Region => &self.region,
            RecordField::City => &self.city,
            RecordField::Asn => &self.asn,
            RecordField::Organization => &self.organization,
            RecordField::Date => &self.date,
            RecordField::Server => &self.server,
            RecordField::Title => &self.title,
            RecordField::Protocol => &self.protocol,
            RecordField::Domain => &self.domain,
            RecordField::Cloud => &self.cloud,
        }
    }

    /// True when the record was reached over TLS.
    pub fn is_https(&self) -> bool {
        self.protocol.contains(constants::HTTPS_PROTOCOL)
    }
}

// =============================================================================
// Record fields
// =============================================================================

/// The thirteen host record columns, in export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Ip,
    Port,
    Country,
    Region,
    City,
    Asn,
    Organization,
    Date,
    Server,
    Title,
    Protocol,
    Domain,
    Cloud,
}

impl RecordField {
    /// Returns all fields in export column order.
    pub fn all() -> &'static [RecordField] {
        &[
            RecordField::Ip,
            RecordField::Port,
            RecordField::Country,
            RecordField::Region,
            RecordField::City,
            RecordField::Asn,
            RecordField::Organization,
            RecordField::Date,
            RecordField::Server,
            RecordField::Title,
            RecordField::Protocol,
            RecordField::Domain,
            RecordField::Cloud,
        ]
    }

    /// Column label used in the CSV header row.
    pub fn header(&self) -> &'static str {
        match self {
            RecordField::Ip => "IP",
            RecordField::Port => "Port",
            RecordField::Country => "Country",
            RecordField::Region => "Region",
            RecordField::City => "City",
            RecordField::Asn => "ASN",
            RecordField::Organization => "Organization",
            RecordField::Date => "Date",
            RecordField::Server => "Server",
            RecordField::Title => "Title",
            RecordField::Protocol => "Protocol",
            RecordField::Domain => "Domain",
            RecordField::Cloud => "Cloud",
        }
    }

    /// Lowercase field name, as used for sort keys and JSON keys.
    pub fn key(&self) -> &'static str {
        match self {
            RecordField::Ip => "ip",
            RecordField::Port => "port",
            RecordField::Country => "country",
            RecordField::Region => "region",
            RecordField::City => "city",
            RecordField::Asn => "asn",
            RecordField::Organization => "organization",
            RecordField::Date => "date",
            RecordField::Server => "server",
            RecordField::Title => "title",
            RecordField::Protocol => "protocol",
            RecordField::Domain => "domain",
            RecordField::Cloud => "cloud",
        }
    }

    /// Case-insensitive lookup by field name. Unknown names return `None`.
    pub fn from_key(name: &str) -> Option<RecordField> {
        let wanted = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|field| field.key().eq_ignore_ascii_case(wanted))
    }
}

impl std::fmt::Display for RecordField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
