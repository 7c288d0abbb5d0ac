//! User record service: domain core, REST adapter, and Diesel persistence.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use doc::ApiDoc;
pub use middleware::trace::Trace;
