use std::fmt;

/// Fatal registration error
///
/// Returned by [`Router::add_route`](super::Router::add_route) and the pattern
/// compiler. These are raised at startup so misconfiguration is caught before
/// traffic arrives; matching itself never produces a `RouterError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// A segment of the form `{...}` contains further braces, so the
    /// parameter name cannot be extracted unambiguously (e.g. `{a}{b}`).
    MalformedPattern {
        /// The full pattern as registered
        pattern: String,
        /// The offending segment
        segment: String,
    },
    /// The same parameter name appears twice in one pattern.
    DuplicateParameter {
        /// The full pattern as registered
        pattern: String,
        /// The repeated parameter name
        name: String,
    },
    /// The method string is not a valid HTTP method token.
    InvalidMethod {
        /// The raw method string
        method: String,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::MalformedPattern { pattern, segment } => {
                write!(
                    f,
                    "Malformed route pattern '{}': segment '{}' has nested or unbalanced braces \
                    and the parameter name cannot be determined.",
                    pattern, segment
                )
            }
            RouterError::DuplicateParameter { pattern, name } => {
                write!(
                    f,
                    "Route pattern '{}' declares parameter '{{{}}}' more than once.",
                    pattern, name
                )
            }
            RouterError::InvalidMethod { method } => {
                write!(f, "Invalid HTTP method '{}'.", method)
            }
        }
    }
}

impl std::error::Error for RouterError {}
