//! Outbound component (C4): a worker that registers readiness and loops
//! dispatch → handle → feedback (§4.4).

pub mod component;
pub mod config;
pub mod error;
pub mod traits;

pub use component::{OutboundComponent, HANDLER_FAILURE_MARKER};
pub use config::OutboundConfig;
pub use error::OutboundError;
pub use traits::{IdentityHandler, OutboundHandler};
