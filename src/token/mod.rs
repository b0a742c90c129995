mod claims;
mod codec;
mod header;

pub use claims::Claims;
pub use codec::{DecodedToken, TokenCodec};
pub use header::Header;

pub(crate) use claims::Expiration;
