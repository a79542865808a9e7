pub mod handler;
pub mod rdata;
pub mod record_type_map;

pub use handler::{DnsServerHandler, MessageRecordSink, MAX_UDP_RESPONSE};
pub use rdata::RDataBuilder;
pub use record_type_map::RecordTypeMapper;
