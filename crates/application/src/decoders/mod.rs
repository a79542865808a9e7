pub mod address;
pub mod json;

pub use address::{AddressDecoder, AddressMatch};
pub use json::{parse_record_set, validate_record_value, JsonRecordDecoder, MAX_JSON_PARTS};
