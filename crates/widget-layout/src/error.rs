#![forbid(unsafe_code)]

//! Errors surfaced by width lookup and layout planning.
//!
//! Both variants describe caller or configuration mistakes (a bad lookup
//! table, a bad viewport measurement). They are returned immediately and
//! never retried.

use std::fmt;

/// Errors from widget layout operations.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The container width is not a finite positive number.
    InvalidContainerWidth {
        /// The rejected measurement.
        value: f64,
    },
    /// A size token has no width mapping.
    UnknownWidgetSize {
        /// The token as given by the caller.
        token: String,
    },
}

impl LayoutError {
    pub(crate) fn unknown_size(token: impl Into<String>) -> Self {
        Self::UnknownWidgetSize {
            token: token.into(),
        }
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidContainerWidth { value } => {
                write!(f, "invalid container width: {value}")
            }
            Self::UnknownWidgetSize { token } => write!(f, "unknown widget size '{token}'"),
        }
    }
}

impl std::error::Error for LayoutError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_value() {
        let err = LayoutError::InvalidContainerWidth { value: -3.0 };
        assert_eq!(err.to_string(), "invalid container width: -3");

        let err = LayoutError::unknown_size("xxl");
        assert_eq!(err.to_string(), "unknown widget size 'xxl'");
    }

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<LayoutError>();
    }
}
