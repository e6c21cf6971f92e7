//! Water regions the swim controller can be dropped into.
//!
//! Two flavors exist:
//! - [`WaterZone`]: a single axis-aligned box, containment tested at the
//!   body position, surface at the top edge.
//! - [`WaterProbe`]: a circle around the body tested for overlap against a
//!   set of layered water bodies.
//!
//! Both implement [`RegionTest`], which is all the controller sees.

pub mod region;

pub use region::{
    RegionShape, RegionTest, WaterBody, WaterContact, WaterProbe, WaterRegion, WaterRegions,
    WaterZone,
};
