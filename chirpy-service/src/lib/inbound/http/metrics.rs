use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;

/// Number of requests served by the static file server.
#[derive(Debug, Clone, Default)]
pub struct HitCounter(Arc<AtomicU64>);

impl HitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}

/// Middleware counting every request that reaches the wrapped routes
pub async fn count_hits(State(hits): State<HitCounter>, req: Request, next: Next) -> Response {
    hits.increment();
    next.run(req).await
}
