//! JSON record sets carried in Base32 labels.
//!
//! Single-label form: `j<base32>.<suffix>`, where the first payload
//! character is not a digit.
//!
//! Multi-label form: `j1<frag>.j2<frag>...<suffix>`. Fragments are
//! concatenated by index, whatever order the labels appear in, then decoded
//! as one Base32 string.
//!
//! The decoded text must be a JSON object mapping record type names to
//! string values. Entries with an unknown type, a non-string value or a
//! value that fails its type's syntax check are dropped with a warning.

use crate::codec::{base32, labels};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use tracing::{debug, warn};
use twodns_domain::{DecodeOutcome, DnsRecord, DomainError, RecordSet, RecordType};

/// Largest index a multi-label fragment may carry.
pub const MAX_JSON_PARTS: usize = 10;

const JSON_MARKER: char = 'j';

pub struct JsonRecordDecoder;

impl JsonRecordDecoder {
    /// Single-label form first; a name can never satisfy both.
    pub fn decode(prefix: &str) -> DecodeOutcome<RecordSet> {
        match Self::decode_single_label(prefix) {
            DecodeOutcome::NoMatch => Self::decode_multi_label(prefix),
            outcome => outcome,
        }
    }

    pub fn decode_single_label(prefix: &str) -> DecodeOutcome<RecordSet> {
        if !labels::is_single_label(prefix) {
            return DecodeOutcome::NoMatch;
        }
        let Some(payload) = prefix.strip_prefix(JSON_MARKER) else {
            return DecodeOutcome::NoMatch;
        };
        match payload.chars().next() {
            Some(c) if !c.is_ascii_digit() => {}
            _ => return DecodeOutcome::NoMatch,
        }

        debug!(prefix = %prefix, "Trying single-label JSON");
        Self::decode_payload(payload)
    }

    pub fn decode_multi_label(prefix: &str) -> DecodeOutcome<RecordSet> {
        let parts: Vec<&str> = labels::split_labels(prefix)
            .filter(|label| is_part_label(label))
            .collect();
        if parts.len() < 2 {
            return DecodeOutcome::NoMatch;
        }

        let mut indexed: Vec<(usize, &str)> = Vec::with_capacity(parts.len());
        for part in parts {
            let body = &part[JSON_MARKER.len_utf8()..];
            let digits = body.chars().take_while(|c| c.is_ascii_digit()).count();
            let index: usize = match body[..digits].parse() {
                Ok(index) => index,
                Err(_) => {
                    return DecodeOutcome::malformed(format!("unreadable part index in '{}'", part))
                }
            };
            if index == 0 || index > MAX_JSON_PARTS {
                return DecodeOutcome::malformed(format!("part index {} out of range", index));
            }
            if indexed.iter().any(|(seen, _)| *seen == index) {
                return DecodeOutcome::malformed(format!("duplicate part index {}", index));
            }
            indexed.push((index, &body[digits..]));
        }

        let count = indexed.len();
        if indexed.iter().any(|(index, _)| *index > count) {
            return DecodeOutcome::malformed(format!("part indices are not 1..={}", count));
        }

        indexed.sort_by_key(|(index, _)| *index);
        let payload: String = indexed.iter().map(|(_, fragment)| *fragment).collect();

        debug!(prefix = %prefix, parts = count, "Reassembled multi-label JSON");
        Self::decode_payload(&payload)
    }

    fn decode_payload(payload: &str) -> DecodeOutcome<RecordSet> {
        let text = match base32::base32_to_json_string(payload) {
            Ok(text) => text,
            Err(e) => return DecodeOutcome::malformed(format!("JSON payload: {}", e)),
        };
        match parse_record_set(&text) {
            Ok(set) if set.is_empty() => {
                debug!("JSON payload produced no usable records");
                DecodeOutcome::NoMatch
            }
            Ok(set) => DecodeOutcome::Matched(set),
            Err(e) => DecodeOutcome::malformed(e.to_string()),
        }
    }
}

/// `j` followed by at least one digit.
fn is_part_label(label: &str) -> bool {
    let mut chars = label.chars();
    chars.next() == Some(JSON_MARKER) && chars.next().is_some_and(|c| c.is_ascii_digit())
}

/// Parses a JSON object of type/value pairs into a record set.
///
/// Fails only when the text is not a JSON object. Unusable entries are
/// dropped, so the result may be empty. Repeated keys are all kept, in
/// document order.
pub fn parse_record_set(text: &str) -> Result<RecordSet, DomainError> {
    let entries: OrderedEntries = serde_json::from_str(text)
        .map_err(|e| DomainError::EncodingError(format!("invalid JSON record set: {}", e)))?;

    let mut set = RecordSet::new();
    for (key, value) in entries.0 {
        let record_type = match RecordType::from_str(&key) {
            Ok(record_type) => record_type,
            Err(_) => {
                warn!(key = %key, "Dropping JSON entry with unknown record type");
                continue;
            }
        };
        let Value::String(value) = value else {
            warn!(record_type = %record_type, "Dropping JSON entry with non-string value");
            continue;
        };
        if let Err(e) = validate_record_value(record_type, &value) {
            warn!(record_type = %record_type, error = %e, "Dropping invalid JSON entry");
            continue;
        }
        set.push(DnsRecord::new(record_type, value));
    }
    Ok(set)
}

/// Type-specific syntax check for a record value.
pub fn validate_record_value(record_type: RecordType, value: &str) -> Result<(), DomainError> {
    let invalid = || DomainError::InvalidRecordValue {
        record_type: record_type.to_string(),
        value: value.to_string(),
    };

    match record_type {
        RecordType::A => {
            value.parse::<Ipv4Addr>().map_err(|_| invalid())?;
            return Ok(());
        }
        RecordType::AAAA => {
            value.parse::<Ipv6Addr>().map_err(|_| invalid())?;
            return Ok(());
        }
        _ => {}
    }

    if value.trim().is_empty() {
        return Err(invalid());
    }

    let fields: Vec<&str> = value.split_whitespace().collect();
    if let Some(required) = record_type.required_fields() {
        if fields.len() < required {
            return Err(invalid());
        }
    }

    let fields_ok = match record_type {
        RecordType::CNAME | RecordType::NS | RecordType::PTR | RecordType::DNAME => {
            fields.len() == 1 && is_name(fields[0])
        }
        RecordType::MX => fields.len() == 2 && all_parse::<u16>(&fields[..1]) && is_name(fields[1]),
        RecordType::SRV => {
            fields.len() == 4 && all_parse::<u16>(&fields[..3]) && is_name(fields[3])
        }
        RecordType::SOA => {
            fields.len() == 7
                && fields[..2].iter().all(|field| is_name(field))
                && all_parse::<u32>(&fields[2..3])
                && all_parse::<i32>(&fields[3..6])
                && all_parse::<u32>(&fields[6..])
        }
        RecordType::SSHFP => {
            fields.len() == 3 && all_parse::<u8>(&fields[..2]) && is_hex(fields[2])
        }
        RecordType::TLSA => fields.len() == 4 && all_parse::<u8>(&fields[..3]) && is_hex(fields[3]),
        RecordType::CAA => {
            all_parse::<u8>(&fields[..1])
                && !fields[1].is_empty()
                && fields[1].chars().all(|c| c.is_ascii_alphanumeric())
        }
        RecordType::NAPTR => {
            fields.len() == 6 && all_parse::<u16>(&fields[..2]) && is_name(fields[5])
        }
        _ => true,
    };

    if fields_ok {
        Ok(())
    } else {
        Err(invalid())
    }
}

fn all_parse<T: FromStr>(fields: &[&str]) -> bool {
    fields.iter().all(|field| field.parse::<T>().is_ok())
}

fn is_name(field: &str) -> bool {
    labels::validate_domain_name(field).is_ok()
}

/// Even-length hex, as SSHFP fingerprints and TLSA association data are
/// written.
fn is_hex(field: &str) -> bool {
    hex::decode(field).is_ok_and(|bytes| !bytes.is_empty())
}

/// Object entries in document order, duplicates included.
struct OrderedEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object of record type to value")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    entries.push((key, value));
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
