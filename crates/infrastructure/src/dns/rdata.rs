//! Record data construction
//!
//! Turns the presentation-format value of a [`DnsRecord`] into hickory
//! `RData`. Values were syntax-checked when they were decoded; anything
//! that still fails to parse here is reported as
//! [`DomainError::RecordEmission`].

use hickory_proto::rr::rdata::sshfp::{Algorithm, FingerprintType};
use hickory_proto::rr::rdata::tlsa::{CertUsage, Matching, Selector};
use hickory_proto::rr::rdata::{self, HINFO, MX, NAPTR, NULL, SOA, SRV, SSHFP, TLSA, TXT};
use hickory_proto::rr::{Name, RData, RecordType as HickoryRecordType};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use twodns_domain::{DnsRecord, DomainError, RecordType};

/// Longest character-string a TXT record can carry in one chunk.
const TXT_CHUNK_LEN: usize = 255;

/// Builds hickory record data from decoded records
pub struct RDataBuilder;

impl RDataBuilder {
    /// Build the `RData` for a record.
    ///
    /// Returns `Ok(None)` for types the wire layer does not serialize
    /// (DNAME, LOC).
    pub fn build(record: &DnsRecord) -> Result<Option<RData>, DomainError> {
        let fields: Vec<&str> = record.fields().collect();

        let rdata = match record.record_type {
            RecordType::A => RData::A(rdata::A(parse_field::<Ipv4Addr>(record, record.value.trim())?)),
            RecordType::AAAA => {
                RData::AAAA(rdata::AAAA(parse_field::<Ipv6Addr>(record, record.value.trim())?))
            }
            RecordType::CNAME => RData::CNAME(rdata::CNAME(parse_name(record, record.value.trim())?)),
            RecordType::NS => RData::NS(rdata::NS(parse_name(record, record.value.trim())?)),
            RecordType::PTR => RData::PTR(rdata::PTR(parse_name(record, record.value.trim())?)),
            RecordType::MX => {
                let [preference, exchange] = exact::<2>(record, &fields)?;
                RData::MX(MX::new(
                    parse_field(record, preference)?,
                    parse_name(record, exchange)?,
                ))
            }
            RecordType::TXT => RData::TXT(TXT::new(txt_chunks(&record.value))),
            RecordType::SRV => {
                let [priority, weight, port, target] = exact::<4>(record, &fields)?;
                RData::SRV(SRV::new(
                    parse_field(record, priority)?,
                    parse_field(record, weight)?,
                    parse_field(record, port)?,
                    parse_name(record, target)?,
                ))
            }
            RecordType::SOA => {
                let [mname, rname, serial, refresh, retry, expire, minimum] =
                    exact::<7>(record, &fields)?;
                RData::SOA(SOA::new(
                    parse_name(record, mname)?,
                    parse_name(record, rname)?,
                    parse_field(record, serial)?,
                    parse_field(record, refresh)?,
                    parse_field(record, retry)?,
                    parse_field(record, expire)?,
                    parse_field(record, minimum)?,
                ))
            }
            RecordType::HINFO => {
                if fields.len() < 2 {
                    return Err(emission_error(record, "expected cpu and os"));
                }
                RData::HINFO(HINFO::new(unquote(fields[0]), unquote(fields[1])))
            }
            RecordType::NAPTR => {
                if fields.len() < 6 {
                    return Err(emission_error(record, "expected 6 fields"));
                }
                RData::NAPTR(NAPTR::new(
                    parse_field(record, fields[0])?,
                    parse_field(record, fields[1])?,
                    character_string(fields[2]),
                    character_string(fields[3]),
                    character_string(fields[4]),
                    parse_name(record, fields[5])?,
                ))
            }
            RecordType::SSHFP => {
                let [algorithm, fingerprint_type, fingerprint] = exact::<3>(record, &fields)?;
                RData::SSHFP(SSHFP::new(
                    Algorithm::from(parse_field::<u8>(record, algorithm)?),
                    FingerprintType::from(parse_field::<u8>(record, fingerprint_type)?),
                    parse_hex(record, fingerprint)?,
                ))
            }
            RecordType::TLSA => {
                let [usage, selector, matching, data] = exact::<4>(record, &fields)?;
                RData::TLSA(TLSA::new(
                    CertUsage::from(parse_field::<u8>(record, usage)?),
                    Selector::from(parse_field::<u8>(record, selector)?),
                    Matching::from(parse_field::<u8>(record, matching)?),
                    parse_hex(record, data)?,
                ))
            }
            RecordType::CAA => RData::Unknown {
                code: HickoryRecordType::CAA,
                rdata: NULL::with(caa_wire(record, &fields)?),
            },
            RecordType::DNAME | RecordType::LOC => return Ok(None),
        };

        Ok(Some(rdata))
    }
}

/// Parse a domain name, making it fully qualified. `.` is the root.
fn parse_name(record: &DnsRecord, value: &str) -> Result<Name, DomainError> {
    if value == "." {
        return Ok(Name::root());
    }
    let fqdn = if value.ends_with('.') {
        value.to_string()
    } else {
        format!("{}.", value)
    };
    Name::from_str(&fqdn).map_err(|e| emission_error(record, &format!("bad name '{}': {}", value, e)))
}

fn parse_field<T: FromStr>(record: &DnsRecord, value: &str) -> Result<T, DomainError> {
    value
        .parse()
        .map_err(|_| emission_error(record, &format!("bad field '{}'", value)))
}

fn exact<'a, const N: usize>(
    record: &DnsRecord,
    fields: &[&'a str],
) -> Result<[&'a str; N], DomainError> {
    <[&str; N]>::try_from(fields)
        .map_err(|_| emission_error(record, &format!("expected {} fields, got {}", N, fields.len())))
}

fn parse_hex(record: &DnsRecord, value: &str) -> Result<Vec<u8>, DomainError> {
    hex::decode(value).map_err(|e| emission_error(record, &format!("bad hex '{}': {}", value, e)))
}

/// CAA RDATA as sent on the wire: flags, tag length, tag, then the value
/// with no length prefix (RFC 8659 section 4.1).
fn caa_wire(record: &DnsRecord, fields: &[&str]) -> Result<Vec<u8>, DomainError> {
    let [flags, tag, ..] = fields else {
        return Err(emission_error(record, "expected flags, tag and value"));
    };
    let flags: u8 = parse_field(record, flags)?;
    let tag_len = u8::try_from(tag.len())
        .ok()
        .filter(|len| *len > 0)
        .ok_or_else(|| emission_error(record, "tag must be 1 to 255 bytes"))?;
    let value = fields[2..].join(" ");
    let value = value.trim_matches('"');

    let mut wire = Vec::with_capacity(2 + tag.len() + value.len());
    wire.push(flags);
    wire.push(tag_len);
    wire.extend_from_slice(tag.as_bytes());
    wire.extend_from_slice(value.as_bytes());
    Ok(wire)
}

fn unquote(field: &str) -> String {
    field.trim_matches('"').to_string()
}

fn character_string(field: &str) -> Box<[u8]> {
    field.trim_matches('"').as_bytes().into()
}

/// Split TXT text into character-strings of at most 255 bytes, never
/// cutting a UTF-8 sequence.
fn txt_chunks(text: &str) -> Vec<String> {
    if text.len() <= TXT_CHUNK_LEN {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let mut end = rest.len().min(TXT_CHUNK_LEN);
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        let (chunk, tail) = rest.split_at(end);
        chunks.push(chunk.to_string());
        rest = tail;
    }
    chunks
}

fn emission_error(record: &DnsRecord, reason: &str) -> DomainError {
    DomainError::RecordEmission(format!("{}: {}", record, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(record_type: RecordType, value: &str) -> Result<Option<RData>, DomainError> {
        RDataBuilder::build(&DnsRecord::new(record_type, value))
    }

    #[test]
    fn test_build_a() {
        let rdata = build(RecordType::A, "1.2.3.4").unwrap().unwrap();
        assert_eq!(rdata, RData::A(rdata::A(Ipv4Addr::new(1, 2, 3, 4))));
    }

    #[test]
    fn test_build_aaaa() {
        let rdata = build(RecordType::AAAA, "2001:db8::1").unwrap().unwrap();
        let expected: Ipv6Addr = "2001:db8::1".parse().unwrap();
        assert_eq!(rdata, RData::AAAA(rdata::AAAA(expected)));
    }

    #[test]
    fn test_build_cname_is_fully_qualified() {
        let rdata = build(RecordType::CNAME, "target.example.com").unwrap().unwrap();
        match rdata {
            RData::CNAME(name) => {
                assert!(name.0.is_fqdn());
                assert_eq!(name.0.to_utf8(), "target.example.com.");
            }
            other => panic!("unexpected rdata {:?}", other),
        }
    }

    #[test]
    fn test_build_mx() {
        let rdata = build(RecordType::MX, "10 mail.example.com").unwrap().unwrap();
        let expected = MX::new(10, Name::from_str("mail.example.com.").unwrap());
        assert_eq!(rdata, RData::MX(expected));
    }

    #[test]
    fn test_build_srv() {
        let rdata = build(RecordType::SRV, "10 60 5060 sip.example.com")
            .unwrap()
            .unwrap();
        let expected = SRV::new(10, 60, 5060, Name::from_str("sip.example.com.").unwrap());
        assert_eq!(rdata, RData::SRV(expected));
    }

    #[test]
    fn test_build_soa() {
        let rdata = build(
            RecordType::SOA,
            "ns1.2dns.dev hostmaster.2dns.dev 2025010101 3600 1800 604800 86400",
        )
        .unwrap()
        .unwrap();
        assert!(matches!(rdata, RData::SOA(_)));
    }

    #[test]
    fn test_build_naptr_root_replacement() {
        let rdata = build(RecordType::NAPTR, "100 10 \"U\" \"E2U+sip\" \"!^.*$!sip:info@example.com!\" .")
            .unwrap()
            .unwrap();
        assert!(matches!(rdata, RData::NAPTR(_)));
    }

    #[test]
    fn test_build_txt_short_is_single_chunk() {
        let rdata = build(RecordType::TXT, "hello world").unwrap().unwrap();
        assert_eq!(rdata, RData::TXT(TXT::new(vec!["hello world".to_string()])));
    }

    #[test]
    fn test_txt_chunks_split_long_text() {
        let text = "x".repeat(600);
        let chunks = txt_chunks(&text);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 255);
        assert_eq!(chunks[1].len(), 255);
        assert_eq!(chunks[2].len(), 90);
    }

    #[test]
    fn test_txt_chunks_respect_char_boundaries() {
        let text = "é".repeat(200);
        let chunks = txt_chunks(&text);
        assert!(chunks.iter().all(|c| c.len() <= 255));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_build_sshfp() {
        let rdata = build(RecordType::SSHFP, "1 1 abcdef").unwrap().unwrap();
        let expected = SSHFP::new(
            Algorithm::from(1),
            FingerprintType::from(1),
            vec![0xab, 0xcd, 0xef],
        );
        assert_eq!(rdata, RData::SSHFP(expected));
    }

    #[test]
    fn test_build_tlsa() {
        let rdata = build(RecordType::TLSA, "3 1 1 0102ff").unwrap().unwrap();
        let expected = TLSA::new(
            CertUsage::from(3),
            Selector::from(1),
            Matching::from(1),
            vec![0x01, 0x02, 0xff],
        );
        assert_eq!(rdata, RData::TLSA(expected));
    }

    #[test]
    fn test_build_caa_wire_layout() {
        let wire = caa_wire(
            &DnsRecord::new(RecordType::CAA, "128 issue \"letsencrypt.org\""),
            &["128", "issue", "\"letsencrypt.org\""],
        )
        .unwrap();
        let mut expected = vec![128, 5];
        expected.extend_from_slice(b"issue");
        expected.extend_from_slice(b"letsencrypt.org");
        assert_eq!(wire, expected);

        let rdata = build(RecordType::CAA, "0 issue letsencrypt.org").unwrap().unwrap();
        assert_eq!(rdata.record_type(), HickoryRecordType::CAA);
    }

    #[test]
    fn test_caa_value_keeps_inner_spaces() {
        let fields = ["0", "issue", "ca.example;", "account=42"];
        let record = DnsRecord::new(RecordType::CAA, fields.join(" "));
        let wire = caa_wire(&record, &fields).unwrap();
        assert_eq!(&wire[7..], b"ca.example; account=42");
    }

    #[test]
    fn test_unserialized_types_return_none() {
        assert!(build(RecordType::DNAME, "example.net").unwrap().is_none());
        assert!(build(RecordType::LOC, "51 30 12.748 N 0 7 39.611 W 0.00m").unwrap().is_none());
    }

    #[test]
    fn test_bad_values_are_emission_errors() {
        assert!(matches!(
            build(RecordType::A, "not-an-ip"),
            Err(DomainError::RecordEmission(_))
        ));
        assert!(matches!(
            build(RecordType::MX, "ten mail.example.com"),
            Err(DomainError::RecordEmission(_))
        ));
        assert!(matches!(
            build(RecordType::SRV, "10 60 5060"),
            Err(DomainError::RecordEmission(_))
        ));
        assert!(matches!(
            build(RecordType::SSHFP, "1 1 xyz"),
            Err(DomainError::RecordEmission(_))
        ));
        assert!(matches!(
            build(RecordType::CAA, "0"),
            Err(DomainError::RecordEmission(_))
        ));
    }
}
