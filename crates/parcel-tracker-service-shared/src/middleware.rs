//! Per-request correlation ids, tracing spans and HTTP metrics.
//!
//! [`ObservabilityLayer`] wraps every route of the service router. For each
//! request it:
//!
//! - takes the `X-Request-ID` header, or generates a UUID v7 when absent
//! - stores the [`RequestId`] in request extensions, where handlers read it
//!   with `Option<Extension<RequestId>>` to stamp problem documents
//! - runs the handler inside a `request` span carrying the id and route
//! - records `http_requests_total` / `http_request_duration_seconds` labelled
//!   by route template, with [`UNMATCHED_ROUTE`] for anything the router does
//!   not know
//! - echoes the id in the `x-request-id` response header

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use std::time::Instant;

use axum::extract::{ConnectInfo, MatchedPath};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, Request, Response};
use pin_project_lite::pin_project;
use tower::{Layer, Service};
use tracing::{info_span, Span};
use uuid::Uuid;

use crate::metrics::record_http_request;

/// Header carrying the request correlation ID.
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Route label for requests that matched no route.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Correlation id of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh time-sortable UUID v7.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Use a non-empty `X-Request-ID` header, otherwise generate a new id.
pub fn extract_or_generate_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get(&REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|id| !id.is_empty())
        .map(RequestId::from)
        .unwrap_or_else(RequestId::generate)
}

/// Route template the router matched (e.g. `/api/track`), or [`UNMATCHED_ROUTE`].
pub fn route_label<B>(req: &Request<B>) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

/// Tower layer adding request ids, spans and route-level metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObservabilityLayer;

impl<S> Layer<S> for ObservabilityLayer {
    type Service = Observed<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Observed { inner }
    }
}

/// Service produced by [`ObservabilityLayer`].
#[derive(Debug, Clone)]
pub struct Observed<S> {
    inner: S,
}

impl<S, B, ResBody> Service<Request<B>> for Observed<S>
where
    S: Service<Request<B>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = ObservedFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let request_id = extract_or_generate_request_id(req.headers());
        let route = route_label(&req);
        let method = req.method().clone();
        let remote_addr = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.to_string());

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %method,
            route = %route,
            remote_addr = remote_addr.as_deref().unwrap_or("-"),
        );
        span.in_scope(|| tracing::debug!(path = req.uri().path(), "request received"));

        req.extensions_mut().insert(request_id.clone());
        let inner = span.in_scope(|| self.inner.call(req));

        ObservedFuture {
            inner,
            span,
            request_id,
            method,
            route,
            start: Instant::now(),
        }
    }
}

pin_project! {
    /// Response future that records metrics and stamps the request id.
    pub struct ObservedFuture<F> {
        #[pin]
        inner: F,
        span: Span,
        request_id: RequestId,
        method: Method,
        route: String,
        start: Instant,
    }
}

impl<F, ResBody, E> Future for ObservedFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _guard = this.span.enter();
        let mut result = ready!(this.inner.poll(cx));

        // Axum routers are infallible, so only responses are observed.
        if let Ok(response) = &mut result {
            let elapsed = this.start.elapsed();
            let status = response.status();
            record_http_request(this.method, this.route, status, elapsed.as_secs_f64());

            if let Ok(value) = HeaderValue::from_str(this.request_id.as_str()) {
                response
                    .headers_mut()
                    .entry(REQUEST_ID_HEADER.clone())
                    .or_insert(value);
            }

            tracing::info!(
                status = status.as_u16(),
                latency_ms = elapsed.as_secs_f64() * 1000.0,
                "request completed"
            );
        }

        Poll::Ready(result)
    }
}
