//! University records backend library modules.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::RequestLog;
