//! dotpath Animation System
//!
//! Eased marker animation along click-queued waypoints.
//!
//! # Features
//!
//! - **Easing**: the bounce curve and friends, mirrored into symmetric ease-in/ease-out
//! - **Driver**: one time-bounded session sampled once per frame
//! - **Sequencer**: FIFO click queue drained one session at a time
//! - **Tour**: clickless autoplay over a fixed checkpoint path
//! - **Hosts**: a deterministic virtual clock and a tokio wall-clock ticker

pub mod driver;
pub mod easing;
pub mod error;
pub mod frame;
pub mod headless;
pub mod realtime;
pub mod sequencer;
pub mod tour;

pub use driver::{run_animation, SessionState, SessionStats};
pub use easing::{bounce, make_ease_in_out, Easing};
pub use error::{AnimationError, Result};
pub use frame::FrameSource;
pub use headless::Headless;
pub use realtime::{ClickSender, Realtime};
pub use sequencer::{
    ClickOutcome, IgnoreReason, LegConfig, LegReport, Sequencer, SequencerReport,
};
pub use tour::{run_tour, TourConfig, DEFAULT_CHECKPOINTS};
