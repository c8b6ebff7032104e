pub mod base64url;
pub mod time;

pub use base64url::{decode_bytes, encode, encode_bytes};
