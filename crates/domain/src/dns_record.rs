mod record;
mod record_set;
mod record_type;

pub use record::DnsRecord;
pub use record_set::RecordSet;
pub use record_type::RecordType;
