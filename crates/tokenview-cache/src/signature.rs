use std::fmt;

use url::form_urlencoded;

/// Cache key for one request: method, path and query parameters sorted by
/// key.
///
/// The sort is stable, so repeated keys (`?ticker=a&ticker=b`) keep their
/// relative order while `?limit=2&offset=0` and `?offset=0&limit=2` produce
/// the same signature.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteSignature(String);

impl RouteSignature {
    pub fn new(method: &str, path: &str, query: Option<&str>) -> Self {
        let mut pairs: Vec<(String, String)> = query
            .map(|q| {
                form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        let mut signature = format!("{} {}", method.to_ascii_uppercase(), path);
        if !pairs.is_empty() {
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs)
                .finish();
            signature.push('?');
            signature.push_str(&encoded);
        }
        Self(signature)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteSignature({})", self.0)
    }
}

impl fmt::Display for RouteSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
