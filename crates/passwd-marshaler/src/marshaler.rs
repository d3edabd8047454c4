use crate::hasher::Hasher;
use crate::layout::{
    self, Fields, ITERATIONS_GROUP, PASSWORD_GROUP, SALT_GROUP, SCHEME_GROUP,
};
use crate::scheme::{self, Scheme};
use regex::Regex;
use snafu::{OptionExt, ResultExt, Snafu};

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: &str = "$";

/// Errors that can occur while encoding or decoding a record.
#[derive(Debug, Snafu)]
pub enum Error {
    /// Separator cannot be used to delimit fields.
    #[snafu(display(
        "Separator '{separator}' must be non-empty and contain no alphanumeric characters or '/'"
    ))]
    InvalidSeparator {
        /// The rejected separator.
        separator: String,
    },

    /// Failed to compile the parsing pattern.
    #[snafu(display("Failed to build the pattern for separator '{separator}'"))]
    Pattern {
        /// Underlying regex error.
        source: regex::Error,
        /// Separator the pattern was built for.
        separator: String,
    },

    /// Input does not have the `tag SEP iterations SEP salt SEP hex` shape.
    #[snafu(display("Input does not match the '{separator}'-separated record layout"))]
    MalformedInput {
        /// Separator the input was expected to use.
        separator: String,
    },

    /// Password field is not valid hex.
    #[snafu(display("Invalid hex password payload"))]
    InvalidHexPayload {
        /// Underlying decode error.
        source: hex::FromHexError,
    },

    /// Iteration field is not a non-negative integer in range.
    #[snafu(display("Invalid iteration count '{value}'"))]
    InvalidIterationCount {
        /// Underlying parse error.
        source: std::num::ParseIntError,
        /// The rejected field.
        value: String,
    },

    /// Scheme tag names no known scheme.
    #[snafu(display("Unsupported hash scheme '{tag}'"))]
    UnsupportedScheme {
        /// Underlying scheme error.
        source: scheme::Error,
        /// The rejected tag.
        tag: String,
    },

    /// Failed to render a record.
    #[snafu(display("Failed to encode {scheme} record"))]
    EncodingFailure {
        /// Underlying formatting error.
        source: std::fmt::Error,
        /// Scheme of the record being rendered.
        scheme: Scheme,
    },
}

/// Conversion between [`Hasher`] records and their text form.
pub trait Marshaler {
    /// Error returned by both directions.
    type Error;

    /// Encode a record as text.
    fn marshal(&self, hasher: &Hasher) -> Result<String, Self::Error>;

    /// Decode a record from text.
    fn unmarshal(&self, s: &str) -> Result<Hasher, Self::Error>;
}

/// Stores records as `tag SEP iterations SEP salt SEP hex-password`.
///
/// The separator is fixed at construction and the parsing pattern compiled
/// once, so a single instance can be shared between threads.
#[derive(Debug, Clone)]
pub struct HexMarshaler {
    separator: String,
    pattern: Regex,
}

impl HexMarshaler {
    /// Create a marshaler using `separator` between fields.
    ///
    /// The separator must be non-empty and must not contain ASCII
    /// alphanumerics or `/`, which can appear inside tags, iteration counts
    /// and hex payloads.
    pub fn new(separator: impl Into<String>) -> Result<Self, Error> {
        let separator = separator.into();
        snafu::ensure!(
            !separator.is_empty()
                && !separator
                    .chars()
                    .any(|c| c.is_ascii_alphanumeric() || c == '/'),
            InvalidSeparatorSnafu {
                separator: separator.as_str()
            }
        );

        let pattern = layout::pattern(&separator).context(PatternSnafu {
            separator: separator.as_str(),
        })?;
        log::debug!("hex marshaler ready: separator={separator:?}");

        Ok(Self { separator, pattern })
    }

    /// Create a marshaler using [`DEFAULT_SEPARATOR`].
    pub fn with_default_separator() -> Result<Self, Error> {
        Self::new(DEFAULT_SEPARATOR)
    }

    /// The configured separator.
    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl Marshaler for HexMarshaler {
    type Error = Error;

    fn marshal(&self, hasher: &Hasher) -> Result<String, Error> {
        let fields = Fields::from_hasher(hasher);
        let mut out = String::new();
        fields
            .render(&mut out, &self.separator)
            .context(EncodingFailureSnafu {
                scheme: fields.scheme,
            })?;

        log::trace!("marshaled {} record", fields.scheme);
        Ok(out)
    }

    fn unmarshal(&self, s: &str) -> Result<Hasher, Error> {
        let caps = self
            .pattern
            .captures(s)
            .context(MalformedInputSnafu {
                separator: self.separator.as_str(),
            })
            .inspect_err(|e| log::debug!("unmarshal rejected: {e}"))?;

        // The salt group is greedy, so extra fields end up inside it.
        let salt = &caps[SALT_GROUP];
        if salt.contains(self.separator.as_str()) {
            log::debug!("unmarshal rejected: too many fields");
            return MalformedInputSnafu {
                separator: self.separator.as_str(),
            }
            .fail();
        }

        let password = hex::decode(&caps[PASSWORD_GROUP])
            .context(InvalidHexPayloadSnafu)
            .inspect_err(|e| log::debug!("unmarshal rejected: {e}"))?;

        let raw_iterations = &caps[ITERATIONS_GROUP];
        let iterations = raw_iterations
            .parse::<u32>()
            .context(InvalidIterationCountSnafu {
                value: raw_iterations,
            })
            .inspect_err(|e| log::debug!("unmarshal rejected: {e}"))?;

        let raw_scheme = &caps[SCHEME_GROUP];
        let scheme = raw_scheme
            .parse::<Scheme>()
            .context(UnsupportedSchemeSnafu { tag: raw_scheme })
            .inspect_err(|e| log::debug!("unmarshal rejected: {e}"))?;

        if !scheme.is_salted() && (iterations != 0 || !salt.is_empty()) {
            log::debug!("dropping iterations and salt of plain record");
        }

        log::trace!("unmarshaled {scheme} record");
        Ok(Hasher::new(scheme, iterations, salt, password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marshaler() -> HexMarshaler {
        HexMarshaler::with_default_separator().unwrap()
    }

    #[test]
    fn test_marshal_plain() {
        let hasher = Hasher::plain(vec![0x70, 0x61, 0x73, 0x73]);
        assert_eq!(marshaler().marshal(&hasher).unwrap(), "plain$0$$70617373");
    }

    #[test]
    fn test_marshal_salted() {
        let hasher = Hasher::new(Scheme::Sha256, 1000, "abc123", vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(
            marshaler().marshal(&hasher).unwrap(),
            "sha256$1000$abc123$deadbeef"
        );
    }

    #[test]
    fn test_marshal_is_deterministic() {
        let hasher = Hasher::new(Scheme::Sha1, 7, "s", b"secret".to_vec());
        let m = marshaler();
        assert_eq!(m.marshal(&hasher).unwrap(), m.marshal(&hasher.clone()).unwrap());
    }

    #[test]
    fn test_unmarshal_salted() {
        let hasher = marshaler()
            .unmarshal("sha256$1000$abc123$deadbeef")
            .unwrap();
        assert_eq!(
            hasher,
            Hasher::new(Scheme::Sha256, 1000, "abc123", vec![0xde, 0xad, 0xbe, 0xef])
        );
    }

    #[test]
    fn test_unmarshal_plain() {
        let hasher = marshaler().unmarshal("plain$0$$70617373").unwrap();
        assert_eq!(hasher, Hasher::plain(b"pass".to_vec()));
    }

    #[test]
    fn test_unmarshal_plain_drops_parameters() {
        let hasher = marshaler().unmarshal("plain$12$salt$70617373").unwrap();
        assert_eq!(hasher, Hasher::plain(b"pass".to_vec()));
    }

    #[test]
    fn test_unmarshal_uppercase_hex() {
        let hasher = marshaler().unmarshal("md5$1$s$DEADBEEF").unwrap();
        assert_eq!(hasher.password(), &[0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_unmarshal_empty_password() {
        let hasher = marshaler().unmarshal("sha1$3$s$").unwrap();
        assert!(hasher.password().is_empty());
    }

    #[test]
    fn test_unmarshal_invalid_iterations() {
        let result = marshaler().unmarshal("sha256$abc$salt$ff");
        assert!(matches!(result, Err(Error::InvalidIterationCount { .. })));
    }

    #[test]
    fn test_unmarshal_iterations_overflow() {
        let result = marshaler().unmarshal("sha256$99999999999$salt$ff");
        assert!(matches!(result, Err(Error::InvalidIterationCount { .. })));
    }

    #[test]
    fn test_unmarshal_negative_iterations() {
        let result = marshaler().unmarshal("sha256$-1$salt$ff");
        assert!(matches!(result, Err(Error::MalformedInput { .. })));
    }

    #[test]
    fn test_unmarshal_invalid_hex() {
        let result = marshaler().unmarshal("sha256$10$salt$zz");
        assert!(matches!(result, Err(Error::InvalidHexPayload { .. })));
    }

    #[test]
    fn test_unmarshal_odd_length_hex() {
        let result = marshaler().unmarshal("sha256$10$salt$fff");
        assert!(matches!(result, Err(Error::InvalidHexPayload { .. })));
    }

    #[test]
    fn test_unmarshal_unknown_scheme() {
        let result = marshaler().unmarshal("bogus$10$salt$ff");
        assert!(matches!(result, Err(Error::UnsupportedScheme { ref tag, .. }) if tag == "bogus"));
    }

    #[test]
    fn test_unmarshal_missing_field() {
        let result = marshaler().unmarshal("sha256$10$salt");
        assert!(matches!(result, Err(Error::MalformedInput { .. })));
    }

    #[test]
    fn test_unmarshal_trailing_garbage() {
        let result = marshaler().unmarshal("sha256$10$salt$ff extra");
        assert!(matches!(result, Err(Error::MalformedInput { .. })));
    }

    #[test]
    fn test_unmarshal_other_separator() {
        let result = marshaler().unmarshal("sha256:10:salt:ff");
        assert!(matches!(result, Err(Error::MalformedInput { .. })));

        let colon = HexMarshaler::new(":").unwrap();
        let result = colon.unmarshal("sha256$10$salt$ff");
        assert!(matches!(result, Err(Error::MalformedInput { .. })));
    }

    #[test]
    fn test_invalid_separator() {
        for separator in ["", "a", "x$", "5", "/", "$/"] {
            let result = HexMarshaler::new(separator);
            assert!(
                matches!(result, Err(Error::InvalidSeparator { .. })),
                "separator {separator:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_multi_char_separator() {
        let m = HexMarshaler::new("::").unwrap();
        let hasher = Hasher::new(Scheme::Sha384, 5, "pepper", vec![0x01, 0xff]);
        let s = m.marshal(&hasher).unwrap();
        assert_eq!(s, "sha384::5::pepper::01ff");
        assert_eq!(m.unmarshal(&s).unwrap(), hasher);
        assert_eq!(m.separator(), "::");
    }

    #[test]
    fn test_regex_metacharacter_separator() {
        let m = HexMarshaler::new("|").unwrap();
        let hasher = Hasher::new(Scheme::Md5, 2, "x", vec![0xab]);
        assert_eq!(m.marshal(&hasher).unwrap(), "md5|2|x|ab");
        assert_eq!(m.unmarshal("md5|2|x|ab").unwrap(), hasher);
    }

    #[test]
    fn test_unmarshal_extra_field() {
        let m = marshaler();
        for input in ["sha256$10$salt$ff$00", "sha256$10$salt$ff$extra", "md5$1$$$ff"] {
            let result = m.unmarshal(input);
            assert!(
                matches!(result, Err(Error::MalformedInput { .. })),
                "{input:?} should be malformed"
            );
        }

        let m = HexMarshaler::new("::").unwrap();
        let result = m.unmarshal("sha256::10::a::b::ff");
        assert!(matches!(result, Err(Error::MalformedInput { .. })));
    }

    #[test]
    fn test_salt_with_newline_roundtrips() {
        let m = marshaler();
        let hasher = Hasher::new(Scheme::Sha256, 5, "a\nb", vec![0xff]);
        let s = m.marshal(&hasher).unwrap();
        assert_eq!(s, "sha256$5$a\nb$ff");
        assert_eq!(m.unmarshal(&s).unwrap(), hasher);
    }

    #[test]
    fn test_marshaler_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HexMarshaler>();
    }
}
