//! Click events
//!
//! The only input is a stream of pointer clicks on container elements.

use crate::element::ElementId;
use serde::Serialize;

/// A click on an element inside the container
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ClickEvent {
    pub target: ElementId,
}

impl ClickEvent {
    pub fn new(target: ElementId) -> Self {
        Self { target }
    }
}

/// A stream of clicks.
///
/// `next_click` suspends until the next click arrives and returns `None`
/// once the stream is closed. `try_next_click` only yields clicks that have
/// already arrived.
#[allow(async_fn_in_trait)]
pub trait ClickSource {
    async fn next_click(&mut self) -> Option<ClickEvent>;

    fn try_next_click(&mut self) -> Option<ClickEvent>;
}
