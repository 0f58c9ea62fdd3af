//! Pipeline orchestration and state machine for VidPipe.
//!
//! The controller is the single entry point the transport layer calls:
//! it validates transitions, serializes concurrent requests per asset,
//! and delegates the media work to the transcoder seam.

pub mod config;
pub mod controller;
pub mod error;
pub mod executor;
pub mod locks;
pub mod logging;

pub use config::{BusyPolicy, PipelineConfig};
pub use controller::PipelineController;
pub use error::{PipelineError, PipelineResult};
pub use executor::StageExecutor;
pub use locks::AssetLocks;
pub use logging::init_tracing;
