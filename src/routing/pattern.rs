//! Path shape matching.
//!
//! # Responsibilities
//! - Parse a pattern string (`/users/{user_id}/playlists`) into segments
//! - Match a concrete request path against the segment shape
//! - Re-expand bound variables into the downstream path, in order
//!
//! # Design Decisions
//! - Matching is exact on segment count; no prefix or wildcard semantics
//! - Path segments are compared case-sensitively
//! - No regex to guarantee O(n) matching

use std::fmt;

/// One segment of a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the request path segment exactly.
    Literal(String),
    /// Binds whatever the request path carries at this position.
    Variable(String),
}

/// An ordered sequence of literal and variable segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern string. Segments wrapped in braces become variables,
    /// everything else is literal. `/` parses to the empty segment list.
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if let Some(name) = s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Segment::Variable(name.to_string())
                } else {
                    Segment::Literal(s.to_string())
                }
            })
            .collect();

        Self { segments }
    }

    /// Match a concrete request path against this shape.
    ///
    /// Returns the bound variables as `(name, value)` pairs in path order, or
    /// `None` if the shape differs. A trailing slash is a different shape.
    pub fn bind<'p>(&'p self, path: &str) -> Option<Vec<(&'p str, String)>> {
        let path = path.strip_prefix('/').unwrap_or(path);
        let parts: Vec<&str> = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').collect()
        };

        if parts.len() != self.segments.len() {
            return None;
        }

        let mut bound = Vec::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Variable(name) => bound.push((name.as_str(), part.to_string())),
            }
        }

        Some(bound)
    }

    /// Rebuild the concrete path from bound variable values, consumed in the
    /// order the variables appear in the pattern.
    pub fn expand<'v>(&self, mut values: impl Iterator<Item = &'v str>) -> String {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(literal) => path.push_str(literal),
                Segment::Variable(_) => path.push_str(values.next().unwrap_or("")),
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        path
    }

    /// Whether this pattern could match the same concrete path as `other`.
    ///
    /// Two patterns overlap when they have the same length and every segment
    /// pair is either an identical literal or has a variable on at least one
    /// side. Used to enforce the at-most-one-match table invariant.
    pub fn overlaps(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self.segments.iter().zip(&other.segments).all(|(a, b)| match (a, b) {
                (Segment::Literal(a), Segment::Literal(b)) => a == b,
                _ => true,
            })
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => write!(f, "/{literal}")?,
                Segment::Variable(name) => write!(f, "/{{{name}}}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_pattern_matches_exact_path() {
        let pattern = PathPattern::parse("/artists");
        assert_eq!(pattern.bind("/artists"), Some(vec![]));
        assert_eq!(pattern.bind("/songs"), None);
        assert_eq!(pattern.bind("/artists/1"), None);
    }

    #[test]
    fn variables_bind_in_path_order() {
        let pattern = PathPattern::parse("/users/{user_id}/playlists/{playlist_id}");
        let bound = pattern.bind("/users/42/playlists/7").unwrap();
        assert_eq!(bound, vec![("user_id", "42".to_string()), ("playlist_id", "7".to_string())]);
    }

    #[test]
    fn trailing_slash_is_a_different_shape() {
        let pattern = PathPattern::parse("/artists");
        assert_eq!(pattern.bind("/artists/"), None);
    }

    #[test]
    fn expand_substitutes_positionally() {
        let pattern = PathPattern::parse("/users/{user_id}/playlists/{playlist_id}/songs");
        let values = ["42", "7"];
        assert_eq!(
            pattern.expand(values.iter().copied()),
            "/users/42/playlists/7/songs"
        );
    }

    #[test]
    fn bind_then_expand_round_trips() {
        let pattern = PathPattern::parse("/users/{user_id}/songs/{song_id}");
        let bound = pattern.bind("/users/abc/songs/xyz").unwrap();
        assert_eq!(
            pattern.expand(bound.iter().map(|(_, v)| v.as_str())),
            "/users/abc/songs/xyz"
        );
    }

    #[test]
    fn overlap_detection() {
        let a = PathPattern::parse("/users/{user_id}");
        let b = PathPattern::parse("/users/me");
        let c = PathPattern::parse("/users");
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(!b.overlaps(&c));
    }

    #[test]
    fn display_reconstructs_pattern() {
        let raw = "/users/{user_id}/playlists";
        assert_eq!(PathPattern::parse(raw).to_string(), raw);
    }
}
