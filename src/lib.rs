//! forecast-viz: headless presentation core for energy-forecast dashboards.
//!
//! Two independent leaf utilities form the core: pure chart projection in
//! [`core`] and one-shot scroll reveal state in [`reveal`]. [`render`] turns
//! projected geometry into SVG, [`api`] composes chart cards and types the
//! forecast service payloads, and [`notify`] carries toast messages.

pub mod api;
pub mod core;
pub mod error;
pub mod notify;
pub mod render;
pub mod reveal;
pub mod telemetry;

pub use api::ChartFrameBuilder;
pub use error::{ChartError, ChartResult};
pub use reveal::{RevealController, RevealHandle, RevealOptions};
