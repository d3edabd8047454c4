//! Field layout shared by the render and parse directions.
//!
//! Every record is laid out as `tag SEP iterations SEP salt SEP hex-password`.
//! Plain records are normalized to zero iterations and an empty salt.

use crate::hasher::Hasher;
use crate::scheme::Scheme;
use regex::Regex;
use std::fmt::{self, Write};
use zeroize::Zeroizing;

/// Uniform 4-field view of a record.
pub(crate) struct Fields<'a> {
    pub scheme: Scheme,
    pub iterations: u32,
    pub salt: &'a str,
    pub password: Zeroizing<String>,
}

impl<'a> Fields<'a> {
    /// Extract the layout fields, hex-encoding the password.
    pub fn from_hasher(hasher: &'a Hasher) -> Self {
        let (iterations, salt) = match hasher {
            Hasher::Plain { .. } => (0, ""),
            Hasher::Md5(params)
            | Hasher::Sha1(params)
            | Hasher::Sha224(params)
            | Hasher::Sha256(params)
            | Hasher::Sha384(params)
            | Hasher::Sha512(params)
            | Hasher::Sha512_224(params)
            | Hasher::Sha512_256(params) => (params.iterations, params.salt.as_str()),
        };

        Self {
            scheme: hasher.scheme(),
            iterations,
            salt,
            password: Zeroizing::new(hex::encode(hasher.password())),
        }
    }

    /// Write the fields joined by `separator`.
    pub fn render<W: Write>(&self, out: &mut W, separator: &str) -> fmt::Result {
        write!(
            out,
            "{scheme}{sep}{iterations}{sep}{salt}{sep}{password}",
            scheme = self.scheme,
            sep = separator,
            iterations = self.iterations,
            salt = self.salt,
            password = self.password.as_str(),
        )
    }
}

/// Capture group names, in layout order.
pub(crate) const SCHEME_GROUP: &str = "scheme";
pub(crate) const ITERATIONS_GROUP: &str = "iterations";
pub(crate) const SALT_GROUP: &str = "salt";
pub(crate) const PASSWORD_GROUP: &str = "password";

/// Build the anchored pattern matching one encoded record.
///
/// The tag, iteration and password groups only admit characters the
/// separator may not contain. The salt group may span newlines; a salt that
/// swallowed a separator is rejected by the caller, which also validates the
/// field contents.
pub(crate) fn pattern(separator: &str) -> Result<Regex, regex::Error> {
    let sep = regex::escape(separator);
    Regex::new(&format!(
        r"(?s)\A(?P<{SCHEME_GROUP}>[[:alnum:]/]+){sep}(?P<{ITERATIONS_GROUP}>[[:alnum:]]+){sep}(?P<{SALT_GROUP}>.*){sep}(?P<{PASSWORD_GROUP}>[[:alnum:]]*)\z"
    ))
}
