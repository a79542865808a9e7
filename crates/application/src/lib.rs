pub mod codec;
pub mod decoders;
pub mod ports;
pub mod use_cases;
