//! Shared data model for vehicle damage detections
//!
//! Holds the types every stage of the assessment pipeline agrees on:
//! - pixel-frame bounding boxes
//! - the canonical damaged-part taxonomy and label normalization
//! - coarse positional regions and the thirds-based region assignment
//! - the `Detection` record produced by the object-detector boundary

pub mod bbox;
pub mod detection;
pub mod part;
pub mod region;

pub use bbox::BoundingBox;
pub use detection::Detection;
pub use part::{normalize_label, DamagePart};
pub use region::{assign_region, Region};
