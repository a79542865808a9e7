mod encode_name;
mod resolve_encoded_name;
mod zone_authority;

pub use encode_name::{EncodeNameUseCase, Ipv6Notation};
pub use resolve_encoded_name::{describe_name, ResolutionStatus, ResolveEncodedNameUseCase};
pub use zone_authority::ZoneAuthorityUseCase;
