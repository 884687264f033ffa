use std::collections::BTreeMap;

use serde::Serialize;

use super::error::RouteError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A route template such as `/dashboard/:userName`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

/// Placeholder values bound by a match, keyed by placeholder name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Split a path into its non-empty segments. Query strings are ignored.
fn segments(path: &str) -> impl Iterator<Item = &str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Canonical form of a location path: leading slash, no trailing slash,
/// no query.
pub fn normalize_path(path: &str) -> String {
    let joined: Vec<&str> = segments(path).collect();
    format!("/{}", joined.join("/"))
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        if pattern.contains(['?', '#']) {
            return Err(RouteError::invalid(pattern, "query or fragment in pattern"));
        }

        let mut parsed = Vec::new();
        for segment in segments(pattern) {
            match segment.strip_prefix(':') {
                Some("") => return Err(RouteError::invalid(pattern, "empty placeholder name")),
                Some(name) => {
                    if parsed
                        .iter()
                        .any(|existing| matches!(existing, Segment::Param(n) if n == name))
                    {
                        return Err(RouteError::invalid(
                            pattern,
                            format!("placeholder ':{name}' used twice"),
                        ));
                    }
                    parsed.push(Segment::Param(name.to_string()));
                }
                None => parsed.push(Segment::Literal(segment.to_string())),
            }
        }

        Ok(Self {
            source: normalize_path(pattern),
            segments: parsed,
        })
    }

    /// The pattern in canonical form.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of literal segments. Among several matching patterns the one
    /// with more literals wins.
    pub fn specificity(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| matches!(segment, Segment::Literal(_)))
            .count()
    }

    /// True when both patterns match exactly the same paths: same literals
    /// in the same positions, placeholder names ignored.
    pub fn same_shape(&self, other: &RoutePattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }

    /// Name derived from the pattern when a route has none: path
    /// separators stripped.
    pub fn fallback_name(&self) -> String {
        self.source.replace('/', "")
    }

    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let concrete: Vec<&str> = segments(path).collect();
        if concrete.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, value) in self.segments.iter().zip(concrete) {
            match segment {
                Segment::Literal(literal) if literal == value => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), value.to_string());
                }
            }
        }
        Some(RouteParams(params))
    }
}

impl std::fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}
