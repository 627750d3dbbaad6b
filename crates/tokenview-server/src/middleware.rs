//! Response caching in front of the token routes.
//!
//! The gate runs before the handler. Hits are answered from the cache;
//! successful misses are buffered and recorded at the watermark observed
//! before the handler ran, so an entry can only ever be older than its
//! content, never newer. `If-None-Match` is honoured only for a cached hit
//! or a fresh 200; errors always reach the client as computed.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{CONTENT_TYPE, ETAG, IF_NONE_MATCH};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tokenview_cache::{entity_tag, if_none_match, CacheGate, CachedEntry, GateOutcome, RouteSignature};

use crate::error::ServerError;

pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

const HIT: &str = "HIT";
const MISS: &str = "MISS";

pub async fn cache_responses(
    State(gate): State<CacheGate>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let signature = RouteSignature::new(
        request.method().as_str(),
        request.uri().path(),
        request.uri().query(),
    );
    let conditional = request
        .headers()
        .get(IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let outcome = gate.check(&signature).await;
    let etag = outcome
        .watermark()
        .map(|watermark| entity_tag(&signature, watermark));
    // Only a 200 at this watermark has a current representation to match.
    let revalidated = |etag: &str| {
        conditional
            .as_deref()
            .is_some_and(|header| if_none_match(header, etag))
    };

    let watermark = match outcome {
        GateOutcome::Hit { entry, .. } => {
            if let Some(etag) = etag.as_deref().filter(|etag| revalidated(etag)) {
                return not_modified(etag, HIT);
            }
            let mut response = Response::new(Body::from(entry.payload));
            if let Ok(content_type) = HeaderValue::from_str(&entry.content_type) {
                response.headers_mut().insert(CONTENT_TYPE, content_type);
            }
            tag(response.headers_mut(), etag.as_deref(), HIT);
            return response;
        }
        GateOutcome::Miss { watermark } => watermark,
    };

    let mut response = next.run(request).await;
    let Some(watermark) = watermark.filter(|_| response.status() == StatusCode::OK) else {
        response
            .headers_mut()
            .insert(X_CACHE, HeaderValue::from_static(MISS));
        return response;
    };

    let (mut parts, body) = response.into_parts();
    let payload = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(payload) => payload,
        Err(e) => return ServerError::Internal(format!("buffering response: {e}")).into_response(),
    };
    let content_type = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/json")
        .to_string();

    gate.record(
        signature,
        CachedEntry {
            position: watermark,
            payload: payload.clone(),
            content_type,
        },
    )
    .await;

    if let Some(etag) = etag.as_deref().filter(|etag| revalidated(etag)) {
        return not_modified(etag, MISS);
    }
    tag(&mut parts.headers, etag.as_deref(), MISS);
    Response::from_parts(parts, Body::from(payload))
}

fn not_modified(etag: &str, cache: &'static str) -> Response {
    let mut response = StatusCode::NOT_MODIFIED.into_response();
    tag(response.headers_mut(), Some(etag), cache);
    response
}

fn tag(headers: &mut HeaderMap, etag: Option<&str>, cache: &'static str) {
    if let Some(value) = etag.and_then(|etag| HeaderValue::from_str(etag).ok()) {
        headers.insert(ETAG, value);
    }
    headers.insert(X_CACHE, HeaderValue::from_static(cache));
}
