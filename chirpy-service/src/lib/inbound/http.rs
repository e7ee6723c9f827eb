pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
