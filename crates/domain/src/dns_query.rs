use super::RecordType;
use std::fmt;
use std::sync::Arc;

/// Record type requested by a query.
///
/// `Any` is the wildcard (code 255) and matches every record type.
/// `Unsupported` carries a numeric type outside [`RecordType`]; it matches
/// nothing, so such queries always end up with an empty answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    Any,
    Exact(RecordType),
    Unsupported(u16),
}

impl QueryType {
    pub const ANY_CODE: u16 = 255;

    pub fn from_u16(code: u16) -> Self {
        if code == Self::ANY_CODE {
            return QueryType::Any;
        }
        match RecordType::from_u16(code) {
            Some(record_type) => QueryType::Exact(record_type),
            None => QueryType::Unsupported(code),
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            QueryType::Any => Self::ANY_CODE,
            QueryType::Exact(record_type) => record_type.to_u16(),
            QueryType::Unsupported(code) => *code,
        }
    }

    pub fn matches(&self, record_type: RecordType) -> bool {
        match self {
            QueryType::Any => true,
            QueryType::Exact(wanted) => *wanted == record_type,
            QueryType::Unsupported(_) => false,
        }
    }
}

impl From<RecordType> for QueryType {
    fn from(record_type: RecordType) -> Self {
        QueryType::Exact(record_type)
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryType::Any => write!(f, "ANY"),
            QueryType::Exact(record_type) => write!(f, "{}", record_type),
            QueryType::Unsupported(code) => write!(f, "TYPE{}", code),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub query_type: QueryType,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, query_type: impl Into<QueryType>) -> Self {
        Self {
            domain: domain.into(),
            query_type: query_type.into(),
        }
    }
}
