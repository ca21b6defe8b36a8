//! Request identification.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for requests lacking one
//! - Preserve IDs supplied by trusted upstream proxies
//!
//! # Design Decisions
//! - Request ID added as early as possible so every log line and the
//!   forwarded upstream hop correlate
//! - Implemented as a plain tower layer; no per-request allocation on
//!   the hit path beyond the ID itself

use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use tower::{Layer, Service};
use uuid::Uuid;

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer that stamps `x-request-id` onto incoming requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service produced by [`RequestIdLayer`].
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestIdService<S>
where
    S: Service<Request<Body>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        if !req.headers().contains_key(X_REQUEST_ID) {
            let id = Uuid::new_v4().to_string();
            if let Ok(value) = HeaderValue::from_str(&id) {
                req.headers_mut().insert(X_REQUEST_ID, value);
            }
        }
        self.inner.call(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_id_stamped_when_absent() {
        let service = RequestIdLayer.layer(tower::service_fn(|req: Request<Body>| async move {
            Ok::<_, Infallible>(req.headers().get(X_REQUEST_ID).cloned())
        }));
        let req = Request::builder().body(Body::empty()).unwrap();
        let id = service.oneshot(req).await.unwrap();
        assert!(id.is_some());
    }

    #[tokio::test]
    async fn test_existing_id_preserved() {
        let service = RequestIdLayer.layer(tower::service_fn(|req: Request<Body>| async move {
            Ok::<_, Infallible>(req.headers().get(X_REQUEST_ID).cloned())
        }));
        let req = Request::builder()
            .header(X_REQUEST_ID, "abc-123")
            .body(Body::empty())
            .unwrap();
        let id = service.oneshot(req).await.unwrap();
        assert_eq!(id.unwrap(), "abc-123");
    }
}
