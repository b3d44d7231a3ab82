// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::SondaError;
use std::fmt;
use std::str::FromStr;

/// Source encoding of a structured document
///
/// The set is closed. Every backend in `sonda-formats` reports one of these
/// tags; `Yaml` and `Toml` are recognised names that have no backend yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// JSON text
    Json,
    /// XML text
    Xml,
    /// URL or bare query string
    Url,
    /// HTTP `Accept-Language` header notation
    Hal,
    /// YAML text
    Yaml,
    /// TOML text
    Toml,
}

impl Encoding {
    /// Every known encoding, in declaration order
    pub const ALL: [Self; 6] = [
        Self::Json,
        Self::Xml,
        Self::Url,
        Self::Hal,
        Self::Yaml,
        Self::Toml,
    ];

    /// Lower-case tag used on the command line and in error messages
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Url => "url",
            Self::Hal => "hal",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = SondaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|enc| enc.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SondaError::UnknownEncoding(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("json".parse::<Encoding>(), Ok(Encoding::Json));
        assert_eq!("XML".parse::<Encoding>(), Ok(Encoding::Xml));
        assert_eq!(
            "msgpack".parse::<Encoding>(),
            Err(SondaError::UnknownEncoding("msgpack".to_string()))
        );
    }

    #[test]
    fn test_display_matches_tag() {
        for enc in Encoding::ALL {
            assert_eq!(enc.to_string().parse::<Encoding>(), Ok(enc));
        }
    }
}
