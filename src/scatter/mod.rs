//! Scatter/gather service (C5): fans one broker message out to a worker
//! pool and gathers feedback before acknowledging the broker (§4.5).

pub mod component;
pub mod config;
pub mod error;
pub mod traits;

pub use component::{ScatterService, WorkerPool};
pub use config::ScatterConfig;
pub use error::ScatterError;
pub use traits::{IdentityScatter, ScatterHooks};
