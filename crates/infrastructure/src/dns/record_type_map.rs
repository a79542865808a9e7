//! Mapping between `twodns_domain` record/query types and
//! `hickory_proto::rr::RecordType`.

use hickory_proto::rr::RecordType as HickoryRecordType;
use twodns_domain::{QueryType, RecordType};

/// Bidirectional mapper between domain and hickory record types
pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert domain RecordType → hickory RecordType
    pub fn to_hickory(record_type: &RecordType) -> HickoryRecordType {
        match record_type {
            RecordType::A => HickoryRecordType::A,
            RecordType::AAAA => HickoryRecordType::AAAA,
            RecordType::CNAME => HickoryRecordType::CNAME,
            RecordType::MX => HickoryRecordType::MX,
            RecordType::TXT => HickoryRecordType::TXT,
            RecordType::NS => HickoryRecordType::NS,
            RecordType::PTR => HickoryRecordType::PTR,
            RecordType::SRV => HickoryRecordType::SRV,
            RecordType::SOA => HickoryRecordType::SOA,
            RecordType::CAA => HickoryRecordType::CAA,
            RecordType::TLSA => HickoryRecordType::TLSA,
            RecordType::SSHFP => HickoryRecordType::SSHFP,
            RecordType::NAPTR => HickoryRecordType::NAPTR,
            RecordType::HINFO => HickoryRecordType::HINFO,

            // No dedicated hickory variants
            RecordType::DNAME | RecordType::LOC => HickoryRecordType::from(record_type.to_u16()),
        }
    }

    /// Convert the type of an incoming question into a query filter.
    ///
    /// `ANY` becomes the wildcard; codes outside the domain set become
    /// `Unsupported` and match nothing.
    pub fn to_query_type(hickory_type: HickoryRecordType) -> QueryType {
        QueryType::from_u16(u16::from(hickory_type))
    }

    /// Convert hickory RecordType → domain RecordType
    ///
    /// Returns `None` for unsupported record types.
    pub fn from_hickory(hickory_type: HickoryRecordType) -> Option<RecordType> {
        RecordType::from_u16(u16::from(hickory_type))
    }
}
