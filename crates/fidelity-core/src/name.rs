//! Validated names used to address side-channel entries
//!
//! [`GroupName`] names a field-group inside a record, [`VersionTag`] names a
//! schema version. Both are restricted to lowercase ASCII letters, digits and
//! `-`, which keeps them free of the `.` and `/` separators used by
//! [`KeyScheme`](crate::store::KeyScheme).

use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Longest name accepted, matching the annotation name-segment limit
pub const MAX_NAME_LEN: usize = 63;

fn validate(raw: &str) -> Result<(), NameError> {
    if raw.is_empty() {
        return Err(NameError::Empty);
    }
    if raw.len() > MAX_NAME_LEN {
        return Err(NameError::TooLong {
            name: raw.to_string(),
            max: MAX_NAME_LEN,
        });
    }
    if let Some(c) = raw
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
    {
        return Err(NameError::InvalidChar {
            name: raw.to_string(),
            ch: c,
        });
    }
    if raw.starts_with('-') || raw.ends_with('-') {
        return Err(NameError::DanglingHyphen(raw.to_string()));
    }
    Ok(())
}

macro_rules! name_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap a name
            ///
            /// # Errors
            /// Returns error if the name is empty, too long, or contains
            /// characters outside `[a-z0-9-]`
            pub fn new(raw: impl Into<String>) -> Result<Self, NameError> {
                let raw = raw.into();
                validate(&raw)?;
                Ok(Self(raw))
            }

            /// Borrow as `&str`
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = NameError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = NameError;

            fn try_from(s: &str) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

name_type!(
    /// Name of a field-group (`spec`, `status`, ...)
    GroupName
);

name_type!(
    /// Name of a schema version (`v1alpha7`, `v1alpha8`, ...)
    VersionTag
);

/// Errors when validating names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// Empty name
    #[error("name must not be empty")]
    Empty,

    /// Name exceeds [`MAX_NAME_LEN`]
    #[error("name '{name}' is longer than {max} characters")]
    TooLong { name: String, max: usize },

    /// Character outside `[a-z0-9-]`
    #[error("name '{name}' contains invalid character '{ch}'")]
    InvalidChar { name: String, ch: char },

    /// Leading or trailing `-`
    #[error("name '{0}' must not start or end with '-'")]
    DanglingHyphen(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        assert_eq!(GroupName::new("spec").unwrap().as_str(), "spec");
        assert_eq!(VersionTag::new("v1alpha7").unwrap().to_string(), "v1alpha7");
        assert!(GroupName::new("template-spec").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(GroupName::new(""), Err(NameError::Empty));
    }

    #[test]
    fn rejects_separators_and_uppercase() {
        assert!(matches!(
            GroupName::new("spec.template"),
            Err(NameError::InvalidChar { ch: '.', .. })
        ));
        assert!(matches!(
            GroupName::new("a/b"),
            Err(NameError::InvalidChar { ch: '/', .. })
        ));
        assert!(matches!(
            VersionTag::new("V1"),
            Err(NameError::InvalidChar { ch: 'V', .. })
        ));
    }

    #[test]
    fn rejects_dangling_hyphen() {
        assert!(matches!(
            GroupName::new("-spec"),
            Err(NameError::DanglingHyphen(_))
        ));
        assert!(matches!(
            GroupName::new("spec-"),
            Err(NameError::DanglingHyphen(_))
        ));
    }

    #[test]
    fn rejects_overlong() {
        let long = "a".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(GroupName::new(long), Err(NameError::TooLong { .. })));
        assert!(GroupName::new("a".repeat(MAX_NAME_LEN)).is_ok());
    }

    #[test]
    fn parse_and_try_from_agree() {
        let parsed: GroupName = "status".parse().unwrap();
        let converted = GroupName::try_from("status").unwrap();
        assert_eq!(parsed, converted);
    }
}
