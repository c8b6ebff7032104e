// Internal modules
mod header;
mod parsed;
mod sign;
#[allow(clippy::module_inception)]
mod token;
mod verify;

// Public API exports
pub use header::TokenHeader;
pub use parsed::{peek_claims, peek_header};
pub use token::Token;

pub(crate) use parsed::ParsedToken;
