//! Rendering surface contract

use crate::element::{Element, ElementId};
use crate::geometry::Point;

/// What the sequencer needs from the place markers are drawn on.
///
/// There is exactly one movable marker; its offset is written only by the
/// animation's draw callback.
pub trait Surface {
    /// Look up a live element. Dead ids return `None`.
    fn element(&self, id: ElementId) -> Option<&Element>;

    /// Set or clear the active visual state of a waypoint
    fn set_active(&mut self, id: ElementId, active: bool);

    /// Move the marker to an absolute pixel offset
    fn move_marker(&mut self, offset: Point);
}
