#![warn(missing_docs)]

//! Text encoding for password hash records.
//!
//! A record is stored on a single line as
//! `scheme SEP iterations SEP salt SEP hex-password`, for example
//! `sha256$1000$abc123$deadbeef`. Plain records are written with zero
//! iterations and an empty salt: `plain$0$$70617373`.
//!
//! # Example
//!
//! ```
//! use passwd_marshaler::{Hasher, HexMarshaler, Marshaler, Scheme};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let marshaler = HexMarshaler::new("$")?;
//!
//! let hasher = Hasher::new(Scheme::Sha256, 1000, "abc123", vec![0xde, 0xad, 0xbe, 0xef]);
//! let encoded = marshaler.marshal(&hasher)?;
//! assert_eq!(encoded, "sha256$1000$abc123$deadbeef");
//!
//! assert_eq!(marshaler.unmarshal(&encoded)?, hasher);
//! # Ok(())
//! # }
//! ```
//!
//! The format has no escaping. A salt containing the separator is written
//! as-is but cannot be read back: the extra field makes the record
//! [`Error::MalformedInput`]. Callers must keep the separator out of salts.

mod hasher;
mod layout;
mod marshaler;
mod scheme;

pub use hasher::{Hasher, Salted};
pub use marshaler::{DEFAULT_SEPARATOR, Error, HexMarshaler, Marshaler};
pub use scheme::{Error as SchemeError, Scheme};
