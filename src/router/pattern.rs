//! Pattern compiler
//!
//! Turns a path-pattern string such as `/users/{user_id}/posts` into an
//! ordered [`RoutePattern`]. Request paths go through [`path_components`],
//! which applies exactly the same splitting rules without classification, so
//! a pattern and the paths it matches always agree on segment boundaries.
//!
//! Splitting rules:
//!
//! - `""` and `"/"` are the root pattern (zero segments)
//! - consecutive slashes collapse (`/a//b` == `/a/b`)
//! - a trailing slash is kept as an empty final segment (`/a/` != `/a`)
//!
//! Brace handling is lenient. Only `{ident}` is a parameter; stray braces that
//! do not enclose a plausible identifier are matched literally. A segment that
//! is wrapped in braces *and* contains more braces inside is rejected, since
//! there is no way to tell which name was meant.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use super::error::RouterError;

/// One `/`-delimited component of a route pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Matches exactly this text (case-sensitive)
    Literal(Box<str>),
    /// Matches any single non-empty component and binds it to this name
    Parameter(Arc<str>),
}

impl Segment {
    #[inline]
    #[must_use]
    pub fn is_parameter(&self) -> bool {
        matches!(self, Segment::Parameter(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Parameter(name) => write!(f, "{{{name}}}"),
        }
    }
}

/// A compiled route pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Compile a path-pattern string.
    ///
    /// # Errors
    ///
    /// * [`RouterError::MalformedPattern`] for `{...}` segments with nested braces
    /// * [`RouterError::DuplicateParameter`] when a parameter name repeats
    pub fn compile(pattern: &str) -> Result<Self, RouterError> {
        let mut segments = Vec::new();
        let mut seen: SmallVec<[&str; 8]> = SmallVec::new();

        for component in path_components(pattern) {
            let segment = classify(pattern, component)?;
            if let Segment::Parameter(name) = &segment {
                let name_str = component_param_name(component);
                if seen.contains(&name_str) {
                    return Err(RouterError::DuplicateParameter {
                        pattern: pattern.to_string(),
                        name: name.to_string(),
                    });
                }
                seen.push(name_str);
            }
            segments.push(segment);
        }

        Ok(Self { segments })
    }

    /// The root pattern (`/`)
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Parameter names in path order
    pub fn param_names(&self) -> impl Iterator<Item = &Arc<str>> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Parameter(name) => Some(name),
            Segment::Literal(_) => None,
        })
    }

    #[must_use]
    pub fn param_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_parameter()).count()
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Split a path (or pattern) into its components.
///
/// Allocation-free; used on the match hot path.
pub fn path_components(path: &str) -> impl Iterator<Item = &str> + '_ {
    let mut parts = path.split('/').filter(|s| !s.is_empty()).peekable();
    let has_content = parts.peek().is_some();
    let trailing = has_content && path.ends_with('/');
    parts.chain(trailing.then_some(""))
}

fn classify(pattern: &str, component: &str) -> Result<Segment, RouterError> {
    let Some(inner) = component
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
    else {
        return Ok(Segment::Literal(component.into()));
    };

    if is_identifier(inner) {
        return Ok(Segment::Parameter(Arc::from(inner)));
    }
    if inner.contains(['{', '}']) {
        return Err(RouterError::MalformedPattern {
            pattern: pattern.to_string(),
            segment: component.to_string(),
        });
    }
    Ok(Segment::Literal(component.into()))
}

// Only called for components already classified as parameters.
fn component_param_name(component: &str) -> &str {
    &component[1..component.len() - 1]
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Segment {
        Segment::Literal(s.into())
    }

    fn param(s: &str) -> Segment {
        Segment::Parameter(Arc::from(s))
    }

    #[test]
    fn test_root_and_empty_are_equivalent() {
        assert!(RoutePattern::compile("").unwrap().is_root());
        assert!(RoutePattern::compile("/").unwrap().is_root());
        assert!(RoutePattern::compile("//").unwrap().is_root());
        assert_eq!(RoutePattern::root().to_string(), "/");
    }

    #[test]
    fn test_literal_and_parameter_classification() {
        let p = RoutePattern::compile("/users/{user_id}/posts").unwrap();
        assert_eq!(p.segments(), &[lit("users"), param("user_id"), lit("posts")]);
        assert_eq!(p.param_count(), 1);
        assert_eq!(p.to_string(), "/users/{user_id}/posts");
    }

    #[test]
    fn test_consecutive_slashes_collapse() {
        let p = RoutePattern::compile("/a//b///c").unwrap();
        assert_eq!(p.segments(), &[lit("a"), lit("b"), lit("c")]);
    }

    #[test]
    fn test_trailing_slash_is_distinct() {
        let p = RoutePattern::compile("/items/").unwrap();
        assert_eq!(p.segments(), &[lit("items"), lit("")]);
        assert_eq!(p.to_string(), "/items/");
        assert_ne!(p, RoutePattern::compile("/items").unwrap());
    }

    #[test]
    fn test_missing_leading_slash_is_tolerated() {
        assert_eq!(
            RoutePattern::compile("items/{id}").unwrap(),
            RoutePattern::compile("/items/{id}").unwrap()
        );
    }

    #[test]
    fn test_stray_braces_are_literal() {
        let p = RoutePattern::compile("/{unclosed").unwrap();
        assert_eq!(p.segments(), &[lit("{unclosed")]);

        let p = RoutePattern::compile("/closed}/{}/{1st}/item-{id}").unwrap();
        assert_eq!(
            p.segments(),
            &[lit("closed}"), lit("{}"), lit("{1st}"), lit("item-{id}")]
        );
        assert_eq!(p.param_count(), 0);
    }

    #[test]
    fn test_nested_braces_are_malformed() {
        for bad in ["/{a}{b}", "/x/{{id}}", "/{a{b}"] {
            match RoutePattern::compile(bad) {
                Err(RouterError::MalformedPattern { pattern, .. }) => assert_eq!(pattern, bad),
                other => panic!("expected MalformedPattern for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_duplicate_parameter_rejected() {
        let err = RoutePattern::compile("/orgs/{id}/users/{id}").unwrap_err();
        assert_eq!(
            err,
            RouterError::DuplicateParameter {
                pattern: "/orgs/{id}/users/{id}".to_string(),
                name: "id".to_string(),
            }
        );
    }

    #[test]
    fn test_path_components_match_pattern_rules() {
        let parts: Vec<&str> = path_components("/a//b/").collect();
        assert_eq!(parts, vec!["a", "b", ""]);
        assert_eq!(path_components("/").count(), 0);
        assert_eq!(path_components("").count(), 0);
    }
}
