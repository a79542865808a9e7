use super::RecordType;
use std::fmt;
use std::net::IpAddr;

/// One decoded record: a type and its presentation-format value.
///
/// The value is handed to the wire layer verbatim (`"1.2.3.4"`,
/// `"10 mail.example.com"`); its syntax was checked when it was decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DnsRecord {
    pub record_type: RecordType,

    pub value: String,
}

impl DnsRecord {
    pub fn new(record_type: RecordType, value: impl Into<String>) -> Self {
        Self {
            record_type,
            value: value.into(),
        }
    }

    /// A record for IPv4 addresses, AAAA for IPv6.
    pub fn from_address(address: IpAddr) -> Self {
        match address {
            IpAddr::V4(v4) => Self::new(RecordType::A, v4.to_string()),
            IpAddr::V6(v6) => Self::new(RecordType::AAAA, v6.to_string()),
        }
    }

    /// Whitespace-separated fields of the value.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.value.split_whitespace()
    }
}

impl fmt::Display for DnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.record_type, self.value)
    }
}
