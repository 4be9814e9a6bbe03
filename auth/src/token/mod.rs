pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::Claims;
pub use claims::Role;
pub use codec::TokenCodec;
pub use codec::ACCESS_TOKEN_TTL_HOURS;
pub use errors::TokenError;
