use std::collections::HashMap;
use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use axum::Json;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use tower::{Layer, Service};
use tracing::warn;

use crate::application::errors::RATE_LIMITED_MESSAGE;
use crate::domain::responses::ErrorResponse;

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

struct Buckets {
    by_ip: HashMap<IpAddr, Bucket>,
    last_sweep: Instant,
}

struct RateLimiter {
    buckets: Mutex<Buckets>,
    capacity: f64,
    refill_per_sec: f64,
    window: Duration,
}

impl RateLimiter {
    fn new(capacity: u32, window: Duration) -> Self {
        Self {
            buckets: Mutex::new(Buckets {
                by_ip: HashMap::new(),
                last_sweep: Instant::now(),
            }),
            capacity: f64::from(capacity),
            refill_per_sec: f64::from(capacity) / window.as_secs_f64(),
            window,
        }
    }

    fn check(&self, ip: IpAddr) -> bool {
        let mut buckets = self
            .buckets
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let now = Instant::now();

        // A bucket idle for a whole window is full again, so forgetting it changes nothing.
        if now.duration_since(buckets.last_sweep) >= self.window {
            let window = self.window;
            buckets
                .by_ip
                .retain(|_, bucket| now.duration_since(bucket.last_refill) < window);
            buckets.last_sweep = now;
        }

        let bucket = buckets.by_ip.entry(ip).or_insert(Bucket {
            tokens: self.capacity,
            last_refill: now,
        });

        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_per_sec).min(self.capacity);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

/// Tower layer that applies per-IP rate limiting via a token bucket.
///
/// Falls open if the client IP cannot be determined (e.g. missing `ConnectInfo`).
/// Rejected requests get a `429` with the usual `{error}` body.
#[derive(Clone)]
pub struct RateLimitLayer {
    limiter: Arc<RateLimiter>,
}

impl RateLimitLayer {
    /// Create a rate limiter allowing `requests` per minute per IP.
    pub fn per_minute(requests: u32) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::new(requests, Duration::from_secs(60))),
        }
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimitService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimitService {
            inner,
            limiter: Arc::clone(&self.limiter),
        }
    }
}

#[derive(Clone)]
pub struct RateLimitService<S> {
    inner: S,
    limiter: Arc<RateLimiter>,
}

impl<S> Service<Request<Body>> for RateLimitService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let limiter = Arc::clone(&self.limiter);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let ip = request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ci| ci.0.ip());

            if let Some(ip) = ip
                && !limiter.check(ip)
            {
                warn!(%ip, "rate limit exceeded");
                return Ok((
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(ErrorResponse::new(RATE_LIMITED_MESSAGE)),
                )
                    .into_response());
            }

            inner.call(request).await
        })
    }
}
