use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

const SEPARATOR: &str = "::";

/// Stable, globally comparable descriptor of a value type.
///
/// A tag is a fully-qualified name with at least two `::`-separated
/// segments, e.g. `folio::coin::USD` or `0x2::sui::SUI`. Each segment is
/// non-empty and made of ASCII alphanumerics and `_`. Tags compare and hash
/// by their text, which makes them usable as map keys independent of any
/// in-process type identity.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeTag(String);

impl TypeTag {
    /// Parse and validate a fully-qualified type name.
    pub fn parse(name: &str) -> Result<Self, TypeError> {
        validate(name)?;
        Ok(Self(name.to_string()))
    }

    /// Build a tag from a compile-time constant name.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a well-formed type name. Use [`parse`] for
    /// names that are not literals.
    ///
    /// [`parse`]: TypeTag::parse
    pub fn from_static(name: &'static str) -> Self {
        assert!(is_valid_type_name(name), "malformed type name {name:?}");
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last path segment, e.g. `USD` for `folio::coin::USD`.
    pub fn name(&self) -> &str {
        self.0
            .rsplit_once(SEPARATOR)
            .map(|(_, name)| name)
            .unwrap_or(&self.0)
    }

    /// Everything before the last segment, e.g. `folio::coin`.
    pub fn module_path(&self) -> &str {
        self.0
            .rsplit_once(SEPARATOR)
            .map(|(path, _)| path)
            .unwrap_or("")
    }
}

/// Whether `name` is a well-formed type name, usable in const context.
///
/// Accepts exactly the names [`TypeTag::parse`] accepts.
pub const fn is_valid_type_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    let mut segments = 1;
    let mut segment_len = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b':' {
            if segment_len == 0 || i + 1 >= bytes.len() || bytes[i + 1] != b':' {
                return false;
            }
            segments += 1;
            segment_len = 0;
            i += 2;
            continue;
        }
        if !(b.is_ascii_alphanumeric() || b == b'_') {
            return false;
        }
        segment_len += 1;
        i += 1;
    }
    segments >= 2 && segment_len > 0
}

fn validate(name: &str) -> Result<(), TypeError> {
    let invalid = |reason: &str| TypeError::InvalidTypeTag {
        tag: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("empty"));
    }
    let segments: Vec<&str> = name.split(SEPARATOR).collect();
    if segments.len() < 2 {
        return Err(invalid("must be fully qualified (module::Name)"));
    }
    for segment in segments {
        if segment.is_empty() {
            return Err(invalid("empty path segment"));
        }
        if !segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(invalid("segments may only contain ASCII alphanumerics and '_'"));
        }
    }
    Ok(())
}

impl FromStr for TypeTag {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TypeTag {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate(&value)?;
        Ok(Self(value))
    }
}

impl From<TypeTag> for String {
    fn from(tag: TypeTag) -> Self {
        tag.0
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.0)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
