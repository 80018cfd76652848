//! Display refresh abstraction
//!
//! The driver samples progress once per frame. Where frames come from is up
//! to the host: a virtual clock in [`crate::headless`], a tokio interval in
//! [`crate::realtime`].

/// Source of refresh ticks and delays.
///
/// Timestamps are milliseconds on the source's own clock.
#[allow(async_fn_in_trait)]
pub trait FrameSource {
    /// Current timestamp without waiting
    fn now(&self) -> f64;

    /// Suspend until the next refresh and return its timestamp
    async fn next_frame(&mut self) -> f64;

    /// Suspend for `ms` milliseconds
    async fn pause(&mut self, ms: u64);
}
