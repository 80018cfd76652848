//! Waypoint elements and the headless stage
//!
//! A waypoint marker is an element carrying the [`WAYPOINT_CLASS`] class and
//! a JSON coordinate pair under the [`COORD_KEY`] dataset entry. While it is
//! the current animation target it also carries [`ACTIVE_CLASS`].

use crate::error::{CoordError, Result};
use crate::geometry::Point;
use crate::surface::Surface;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tracing::trace;

new_key_type! {
    /// Identifier for an element on the stage
    pub struct ElementId;
}

/// Class identifying a clickable waypoint
pub const WAYPOINT_CLASS: &str = "dot";
/// Class present while a waypoint is the animation target
pub const ACTIVE_CLASS: &str = "dot-active";
/// Dataset key holding the waypoint's coordinates
pub const COORD_KEY: &str = "vec";

/// Name of the container element that receives background clicks
pub const BACKGROUND_NAME: &str = "app";

/// A stage element with a class list and string dataset
#[derive(Clone, Debug, Default)]
pub struct Element {
    name: String,
    classes: SmallVec<[String; 2]>,
    dataset: FxHashMap<String, String>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// A waypoint marker positioned at `point`
    pub fn waypoint(name: impl Into<String>, point: Point) -> Self {
        // Non-finite components encode as `null` and read back as malformed
        let encoded = serde_json::to_string(&[point.x, point.y]).unwrap_or_default();
        Self::new(name)
            .with_class(WAYPOINT_CLASS)
            .with_data(COORD_KEY, encoded)
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dataset.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.dataset.get(key).map(String::as_str)
    }

    pub fn is_waypoint(&self) -> bool {
        self.has_class(WAYPOINT_CLASS)
    }

    pub fn is_active(&self) -> bool {
        self.has_class(ACTIVE_CLASS)
    }

    /// Parse the stored coordinate pair
    pub fn coordinates(&self) -> Result<Point> {
        let raw = self.data(COORD_KEY).ok_or(CoordError::Missing(COORD_KEY))?;
        serde_json::from_str(raw).map_err(|e| CoordError::Malformed {
            raw: raw.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Headless rendering surface.
///
/// Holds the container's elements, the single movable marker's offset and
/// (optionally) a trace of every offset it was moved to.
pub struct Stage {
    elements: SlotMap<ElementId, Element>,
    names: FxHashMap<String, ElementId>,
    background: ElementId,
    marker_offset: Point,
    trace: Option<Vec<Point>>,
}

impl Stage {
    pub fn new() -> Self {
        let mut elements = SlotMap::with_key();
        let background = elements.insert(Element::new(BACKGROUND_NAME));
        let mut names = FxHashMap::default();
        names.insert(BACKGROUND_NAME.to_string(), background);

        Self {
            elements,
            names,
            background,
            marker_offset: Point::ORIGIN,
            trace: Some(Vec::new()),
        }
    }

    /// A stage with one waypoint marker per point, named `dot1`, `dot2`, ...
    pub fn with_waypoints(points: &[Point]) -> Self {
        let mut stage = Self::new();
        for (index, point) in points.iter().enumerate() {
            stage.insert(Element::waypoint(format!("dot{}", index + 1), *point));
        }
        stage
    }

    /// Stop recording marker offsets
    pub fn without_trace(mut self) -> Self {
        self.trace = None;
        self
    }

    /// Add an element. A later element with the same name shadows the
    /// earlier one for [`Stage::lookup`].
    pub fn insert(&mut self, element: Element) -> ElementId {
        let name = element.name().to_string();
        let id = self.elements.insert(element);
        self.names.insert(name, id);
        id
    }

    /// Remove an element; its id becomes dead
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let element = self.elements.remove(id)?;
        if self.names.get(element.name()) == Some(&id) {
            self.names.remove(element.name());
        }
        Some(element)
    }

    pub fn lookup(&self, name: &str) -> Option<ElementId> {
        self.names.get(name).copied()
    }

    /// Name to id map of all live elements
    pub fn names(&self) -> FxHashMap<String, ElementId> {
        self.names.clone()
    }

    /// The container itself; clicks on it are background clicks
    pub fn background(&self) -> ElementId {
        self.background
    }

    pub fn marker_offset(&self) -> Point {
        self.marker_offset
    }

    /// Every offset the marker has been moved to, oldest first
    pub fn trace(&self) -> &[Point] {
        self.trace.as_deref().unwrap_or_default()
    }

    /// Iterate over waypoint markers in insertion order
    pub fn waypoints(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements.iter().filter(|(_, e)| e.is_waypoint())
    }

    pub fn active_count(&self) -> usize {
        self.elements.values().filter(|e| e.is_active()).count()
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for Stage {
    fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    fn set_active(&mut self, id: ElementId, active: bool) {
        if let Some(element) = self.elements.get_mut(id) {
            if active {
                element.add_class(ACTIVE_CLASS);
            } else {
                element.remove_class(ACTIVE_CLASS);
            }
        }
    }

    fn move_marker(&mut self, offset: Point) {
        trace!(x = offset.x, y = offset.y, "marker moved");
        self.marker_offset = offset;
        if let Some(trace) = self.trace.as_mut() {
            trace.push(offset);
        }
    }
}
