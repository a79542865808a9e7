use super::DnsRecord;
use crate::dns_query::QueryType;

/// Ordered collection of records decoded from one name.
///
/// Insertion order is preserved and several records of the same type may
/// coexist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<DnsRecord>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: DnsRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DnsRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[DnsRecord] {
        &self.records
    }

    /// Records that answer a query of `query_type`.
    pub fn matching(&self, query_type: QueryType) -> impl Iterator<Item = &DnsRecord> {
        self.records
            .iter()
            .filter(move |r| query_type.matches(r.record_type))
    }
}

impl FromIterator<DnsRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = DnsRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RecordSet {
    type Item = DnsRecord;
    type IntoIter = std::vec::IntoIter<DnsRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a DnsRecord;
    type IntoIter = std::slice::Iter<'a, DnsRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
