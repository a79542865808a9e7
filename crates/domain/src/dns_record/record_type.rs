use std::fmt;
use std::str::FromStr;

/// Record types a name-encoded record set may carry.
///
/// The set is closed: anything else found in a JSON payload is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    MX,
    TXT,
    NS,
    PTR,
    SRV,
    SOA,
    CAA,
    DNAME,
    TLSA,
    SSHFP,
    NAPTR,
    HINFO,
    LOC,
}

impl RecordType {
    pub const ALL: [RecordType; 16] = [
        RecordType::A,
        RecordType::AAAA,
        RecordType::CNAME,
        RecordType::MX,
        RecordType::TXT,
        RecordType::NS,
        RecordType::PTR,
        RecordType::SRV,
        RecordType::SOA,
        RecordType::CAA,
        RecordType::DNAME,
        RecordType::TLSA,
        RecordType::SSHFP,
        RecordType::NAPTR,
        RecordType::HINFO,
        RecordType::LOC,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CNAME => "CNAME",
            RecordType::MX => "MX",
            RecordType::TXT => "TXT",
            RecordType::NS => "NS",
            RecordType::PTR => "PTR",
            RecordType::SRV => "SRV",
            RecordType::SOA => "SOA",
            RecordType::CAA => "CAA",
            RecordType::DNAME => "DNAME",
            RecordType::TLSA => "TLSA",
            RecordType::SSHFP => "SSHFP",
            RecordType::NAPTR => "NAPTR",
            RecordType::HINFO => "HINFO",
            RecordType::LOC => "LOC",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::NS => 2,
            RecordType::CNAME => 5,
            RecordType::SOA => 6,
            RecordType::PTR => 12,
            RecordType::HINFO => 13,
            RecordType::MX => 15,
            RecordType::TXT => 16,
            RecordType::AAAA => 28,
            RecordType::LOC => 29,
            RecordType::SRV => 33,
            RecordType::NAPTR => 35,
            RecordType::DNAME => 39,
            RecordType::SSHFP => 44,
            RecordType::TLSA => 52,
            RecordType::CAA => 257,
        }
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            1 => Some(RecordType::A),
            2 => Some(RecordType::NS),
            5 => Some(RecordType::CNAME),
            6 => Some(RecordType::SOA),
            12 => Some(RecordType::PTR),
            13 => Some(RecordType::HINFO),
            15 => Some(RecordType::MX),
            16 => Some(RecordType::TXT),
            28 => Some(RecordType::AAAA),
            29 => Some(RecordType::LOC),
            33 => Some(RecordType::SRV),
            35 => Some(RecordType::NAPTR),
            39 => Some(RecordType::DNAME),
            44 => Some(RecordType::SSHFP),
            52 => Some(RecordType::TLSA),
            257 => Some(RecordType::CAA),
            _ => None,
        }
    }

    /// Minimum number of whitespace-separated fields in a value of this
    /// type, `None` when the value is free-form.
    pub fn required_fields(&self) -> Option<usize> {
        match self {
            RecordType::MX => Some(2),
            RecordType::HINFO => Some(2),
            RecordType::SSHFP => Some(3),
            RecordType::CAA => Some(3),
            RecordType::SRV => Some(4),
            RecordType::TLSA => Some(4),
            RecordType::NAPTR => Some(6),
            RecordType::SOA => Some(7),
            _ => None,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::AAAA),
            "CNAME" => Ok(RecordType::CNAME),
            "MX" => Ok(RecordType::MX),
            "TXT" => Ok(RecordType::TXT),
            "NS" => Ok(RecordType::NS),
            "PTR" => Ok(RecordType::PTR),
            "SRV" => Ok(RecordType::SRV),
            "SOA" => Ok(RecordType::SOA),
            "CAA" => Ok(RecordType::CAA),
            "DNAME" => Ok(RecordType::DNAME),
            "TLSA" => Ok(RecordType::TLSA),
            "SSHFP" => Ok(RecordType::SSHFP),
            "NAPTR" => Ok(RecordType::NAPTR),
            "HINFO" => Ok(RecordType::HINFO),
            "LOC" => Ok(RecordType::LOC),
            _ => Err(format!("Unknown record type: {}", s)),
        }
    }
}
