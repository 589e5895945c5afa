//! Observability module - request ids on spans and responses.

mod request_id;

pub use request_id::RequestIdMiddleware;
