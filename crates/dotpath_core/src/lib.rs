//! dotpath Core
//!
//! Foundational pieces shared by the animation and CLI crates:
//!
//! - **Geometry**: immutable 2D points and linear interpolation
//! - **Elements**: the waypoint marker contract and a headless `Stage`
//! - **Surface**: what the sequencer needs from a rendering surface
//! - **Events**: click events and click sources
//!
//! # Example
//!
//! ```rust
//! use dotpath_core::{lerp, Point, Stage, Surface};
//!
//! let stage = Stage::with_waypoints(&[Point::new(10.0, 10.0), Point::new(40.0, 65.0)]);
//! let dot2 = stage.lookup("dot2").unwrap();
//! let target = stage.element(dot2).unwrap().coordinates().unwrap();
//!
//! let halfway = lerp(Point::new(10.0, 10.0), target, 0.5);
//! assert_eq!(halfway, Point::new(25.0, 37.5));
//! ```

pub mod element;
pub mod error;
pub mod events;
pub mod geometry;
pub mod surface;

pub use element::{Element, ElementId, Stage, ACTIVE_CLASS, COORD_KEY, WAYPOINT_CLASS};
pub use error::{CoordError, Result};
pub use events::{ClickEvent, ClickSource};
pub use geometry::{lerp, Point};
pub use surface::Surface;
