pub mod base32;
pub mod labels;

pub use base32::Base32Error;
