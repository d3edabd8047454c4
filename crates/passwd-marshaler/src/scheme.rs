use snafu::Snafu;
use std::str::FromStr;

/// Errors that can occur while resolving a scheme tag.
#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum Error {
    /// The tag does not name any known scheme.
    #[snafu(display("Unsupported hash scheme '{tag}'"))]
    UnknownScheme {
        /// The rejected tag.
        tag: String,
    },
}

/// Hashing schemes a password record can be stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Unhashed password.
    Plain,
    /// MD5.
    Md5,
    /// SHA-1.
    Sha1,
    /// SHA-224.
    Sha224,
    /// SHA-256.
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
    /// SHA-512 truncated to 224 bits.
    Sha512_224,
    /// SHA-512 truncated to 256 bits.
    Sha512_256,
}

impl Scheme {
    /// Every known scheme, in tag order.
    pub const ALL: [Scheme; 9] = [
        Scheme::Plain,
        Scheme::Md5,
        Scheme::Sha1,
        Scheme::Sha224,
        Scheme::Sha256,
        Scheme::Sha384,
        Scheme::Sha512,
        Scheme::Sha512_224,
        Scheme::Sha512_256,
    ];

    /// Canonical tag written in front of every encoded record.
    pub const fn as_str(self) -> &'static str {
        match self {
            Scheme::Plain => "plain",
            Scheme::Md5 => "md5",
            Scheme::Sha1 => "sha1",
            Scheme::Sha224 => "sha224",
            Scheme::Sha256 => "sha256",
            Scheme::Sha384 => "sha384",
            Scheme::Sha512 => "sha512",
            Scheme::Sha512_224 => "sha512/224",
            Scheme::Sha512_256 => "sha512/256",
        }
    }

    /// Whether records of this scheme carry an iteration count and a salt.
    pub const fn is_salted(self) -> bool {
        !matches!(self, Scheme::Plain)
    }
}

impl FromStr for Scheme {
    type Err = Error;

    // Tags are matched exactly; "SHA256" is not "sha256".
    fn from_str(s: &str) -> Result<Self, Error> {
        Scheme::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == s)
            .ok_or_else(|| UnknownSchemeSnafu { tag: s }.build())
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
