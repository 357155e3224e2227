// ── Path patterns ──
//
// `/assignment/:id` style patterns: static segments must match exactly,
// `:name` segments capture one non-empty path segment. Segments are
// percent-decoded after splitting, so `%2F` binds a literal `/`.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

use crate::error::CoreError;

/// Characters escaped when rendering a param into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Decode one raw segment. Invalid UTF-8 is kept as written.
fn decode(segment: &str) -> Cow<'_, str> {
    percent_decode_str(segment)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(segment))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A parsed route path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

/// Split a path into its non-empty segments. `/` has none.
pub(crate) fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

impl PathPattern {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let invalid = |reason: &str| CoreError::InvalidPattern {
            pattern: raw.to_owned(),
            reason: reason.to_owned(),
        };

        if !raw.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }

        let mut parsed = Vec::new();
        for seg in segments(raw) {
            if let Some(name) = seg.strip_prefix(':') {
                if name.is_empty() {
                    return Err(invalid("parameter name is empty"));
                }
                if parsed
                    .iter()
                    .any(|s| matches!(s, Segment::Param(p) if p == name))
                {
                    return Err(invalid("parameter name used twice"));
                }
                parsed.push(Segment::Param(name.to_owned()));
            } else {
                parsed.push(Segment::Static(seg.to_owned()));
            }
        }

        Ok(Self {
            raw: raw.to_owned(),
            segments: parsed,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// `true` when the pattern has no parameters.
    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Static(_)))
    }

    pub fn static_segments(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Static(_)))
            .count()
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Canonical form used for uniqueness checks: params collapse to `:`,
    /// so `/a/:id` and `/a/:slug` count as the same path.
    pub(crate) fn shape(&self) -> String {
        if self.segments.is_empty() {
            return "/".into();
        }
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Static(v) => format!("/{v}"),
                Segment::Param(_) => "/:".into(),
            })
            .collect()
    }

    /// Match a normalized path, binding params by name.
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let mut params = BTreeMap::new();
        let mut parts = segments(path);

        for seg in &self.segments {
            let part = decode(parts.next()?);
            match seg {
                Segment::Static(expected) => {
                    if *expected != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.insert(name.clone(), part.into_owned());
                }
            }
        }

        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }

    /// Build a concrete path, substituting every param from `params`.
    pub fn render(&self, route: &str, params: &[(&str, &str)]) -> Result<String, CoreError> {
        if self.segments.is_empty() {
            return Ok("/".into());
        }

        let mut out = String::new();
        for seg in &self.segments {
            out.push('/');
            match seg {
                Segment::Static(v) => out.push_str(v),
                Segment::Param(name) => {
                    let value = params
                        .iter()
                        .find(|(k, _)| *k == name.as_str())
                        .map(|(_, v)| *v)
                        .filter(|v| !v.is_empty() && !v.contains('/'))
                        .ok_or_else(|| CoreError::MissingParam {
                            route: route.to_owned(),
                            param: name.clone(),
                        })?;
                    out.extend(utf8_percent_encode(value, SEGMENT));
                }
            }
        }
        Ok(out)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn root_matches_only_root() {
        let p = PathPattern::parse("/").unwrap();
        assert!(p.is_static());
        assert!(p.matches("/").is_some());
        assert!(p.matches("/login").is_none());
    }

    #[test]
    fn param_segment_binds_value() {
        let p = PathPattern::parse("/assignment/:id").unwrap();
        let params = p.matches("/assignment/42").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
        assert!(p.matches("/assignment").is_none());
        assert!(p.matches("/assignment/42/extra").is_none());
        assert!(p.matches("/programming/42").is_none());
    }

    #[test]
    fn rejects_bad_patterns() {
        assert!(PathPattern::parse("login").is_err());
        assert!(PathPattern::parse("/a/:").is_err());
        assert!(PathPattern::parse("/a/:id/:id").is_err());
    }

    #[test]
    fn shape_ignores_param_names() {
        let a = PathPattern::parse("/a/:id").unwrap();
        let b = PathPattern::parse("/a/:slug").unwrap();
        assert_eq!(a.shape(), b.shape());
    }

    #[test]
    fn render_substitutes_params() {
        let p = PathPattern::parse("/programming/:id").unwrap();
        assert_eq!(p.render("P", &[("id", "7")]).unwrap(), "/programming/7");
        assert!(matches!(
            p.render("P", &[]),
            Err(CoreError::MissingParam { .. })
        ));
        assert!(p.render("P", &[("id", "a/b")]).is_err());
        assert_eq!(
            p.render("P", &[("id", "two words")]).unwrap(),
            "/programming/two%20words"
        );
    }

    #[test]
    fn params_are_percent_decoded() {
        let p = PathPattern::parse("/assignment/:id").unwrap();
        let params = p.matches("/assignment/a%20b").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("a b"));

        let params = p.matches("/assignment/a%2Fb").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("a/b"));

        let params = p.matches("/assignment/%FF").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("%FF"));
    }

    #[test]
    fn static_segments_compare_decoded() {
        let p = PathPattern::parse("/generate-mock").unwrap();
        assert!(p.matches("/generate%2Dmock").is_some());
    }
}
