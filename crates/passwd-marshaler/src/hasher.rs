use crate::scheme::Scheme;
use zeroize::Zeroizing;

/// Parameters shared by every salted scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salted {
    /// Number of hashing rounds.
    pub iterations: u32,
    /// Scheme-specific salt, opaque to the encoding.
    pub salt: String,
    /// Password-derived secret bytes.
    pub password: Zeroizing<Vec<u8>>,
}

impl Salted {
    /// Bundle salted parameters.
    pub fn new(iterations: u32, salt: impl Into<String>, password: impl Into<Vec<u8>>) -> Self {
        Self {
            iterations,
            salt: salt.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

/// A password hash record, one variant per [`Scheme`].
///
/// Only [`Hasher::Plain`] lacks an iteration count and a salt; every other
/// variant always carries both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hasher {
    /// Unhashed password bytes.
    Plain {
        /// Raw password bytes.
        password: Zeroizing<Vec<u8>>,
    },
    /// MD5 record.
    Md5(Salted),
    /// SHA-1 record.
    Sha1(Salted),
    /// SHA-224 record.
    Sha224(Salted),
    /// SHA-256 record.
    Sha256(Salted),
    /// SHA-384 record.
    Sha384(Salted),
    /// SHA-512 record.
    Sha512(Salted),
    /// SHA-512/224 record.
    Sha512_224(Salted),
    /// SHA-512/256 record.
    Sha512_256(Salted),
}

impl Hasher {
    /// Create a plain record.
    pub fn plain(password: impl Into<Vec<u8>>) -> Self {
        Hasher::Plain {
            password: Zeroizing::new(password.into()),
        }
    }

    /// Create the record variant matching `scheme`.
    ///
    /// `iterations` and `salt` are dropped for [`Scheme::Plain`].
    pub fn new(
        scheme: Scheme,
        iterations: u32,
        salt: impl Into<String>,
        password: impl Into<Vec<u8>>,
    ) -> Self {
        let variant: fn(Salted) -> Hasher = match scheme {
            Scheme::Plain => return Hasher::plain(password),
            Scheme::Md5 => Hasher::Md5,
            Scheme::Sha1 => Hasher::Sha1,
            Scheme::Sha224 => Hasher::Sha224,
            Scheme::Sha256 => Hasher::Sha256,
            Scheme::Sha384 => Hasher::Sha384,
            Scheme::Sha512 => Hasher::Sha512,
            Scheme::Sha512_224 => Hasher::Sha512_224,
            Scheme::Sha512_256 => Hasher::Sha512_256,
        };
        variant(Salted::new(iterations, salt, password))
    }

    /// The scheme this record belongs to.
    pub fn scheme(&self) -> Scheme {
        match self {
            Hasher::Plain { .. } => Scheme::Plain,
            Hasher::Md5(_) => Scheme::Md5,
            Hasher::Sha1(_) => Scheme::Sha1,
            Hasher::Sha224(_) => Scheme::Sha224,
            Hasher::Sha256(_) => Scheme::Sha256,
            Hasher::Sha384(_) => Scheme::Sha384,
            Hasher::Sha512(_) => Scheme::Sha512,
            Hasher::Sha512_224(_) => Scheme::Sha512_224,
            Hasher::Sha512_256(_) => Scheme::Sha512_256,
        }
    }

    /// Salted parameters, or `None` for a plain record.
    pub fn salted(&self) -> Option<&Salted> {
        match self {
            Hasher::Plain { .. } => None,
            Hasher::Md5(params)
            | Hasher::Sha1(params)
            | Hasher::Sha224(params)
            | Hasher::Sha256(params)
            | Hasher::Sha384(params)
            | Hasher::Sha512(params)
            | Hasher::Sha512_224(params)
            | Hasher::Sha512_256(params) => Some(params),
        }
    }

    /// Secret bytes of the record.
    pub fn password(&self) -> &[u8] {
        match self {
            Hasher::Plain { password } => password.as_slice(),
            Hasher::Md5(params)
            | Hasher::Sha1(params)
            | Hasher::Sha224(params)
            | Hasher::Sha256(params)
            | Hasher::Sha384(params)
            | Hasher::Sha512(params)
            | Hasher::Sha512_224(params)
            | Hasher::Sha512_256(params) => params.password.as_slice(),
        }
    }

    /// Iteration count, absent for plain records.
    pub fn iterations(&self) -> Option<u32> {
        self.salted().map(|params| params.iterations)
    }

    /// Salt, absent for plain records.
    pub fn salt(&self) -> Option<&str> {
        self.salted().map(|params| params.salt.as_str())
    }
}
