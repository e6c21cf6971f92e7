use bevy::math::bounding::{Aabb2d, BoundingCircle, IntersectsVolume};
use bevy::prelude::*;
use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PROBE_RADIUS, WATER_LAYER};

/// Outcome of a positive water test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterContact {
    /// Height of the water surface, when the region knows it. A swimmer
    /// that gets `None` keeps measuring depth from the last surface it saw.
    pub surface_y: Option<f32>,
}

/// Shape description used for debug drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegionShape {
    Box { center: Vec2, size: Vec2 },
    Circle { center: Vec2, radius: f32 },
}

/// Host-provided water test.
pub trait RegionTest {
    /// Returns a contact when `point` is considered to be in the water.
    fn probe(&self, point: Vec2) -> Option<WaterContact>;

    /// Debug descriptor of the region around `point`, if it has one.
    fn debug_shape(&self, _point: Vec2) -> Option<RegionShape> {
        None
    }
}

/// Axis-aligned water box. The top edge is the water surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterZone {
    pub min: Vec2,
    pub max: Vec2,
}

impl WaterZone {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn surface_y(&self) -> f32 {
        self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Inclusive on every edge.
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn aabb(&self) -> Aabb2d {
        Aabb2d {
            min: self.min,
            max: self.max,
        }
    }
}

impl RegionTest for WaterZone {
    fn probe(&self, point: Vec2) -> Option<WaterContact> {
        self.contains(point).then(|| WaterContact {
            surface_y: Some(self.surface_y()),
        })
    }

    fn debug_shape(&self, _point: Vec2) -> Option<RegionShape> {
        Some(RegionShape::Box {
            center: self.center(),
            size: self.size(),
        })
    }
}

/// A water box tagged with layer bits, as seen by a [`WaterProbe`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterBody {
    pub zone: WaterZone,
    #[serde(default = "default_water_layer")]
    pub layers: u32,
}

fn default_water_layer() -> u32 {
    WATER_LAYER
}

impl WaterBody {
    pub fn new(zone: WaterZone) -> Self {
        Self {
            zone,
            layers: WATER_LAYER,
        }
    }

    pub fn with_layers(mut self, layers: u32) -> Self {
        self.layers = layers;
        self
    }
}

/// Circle overlap probe against a set of water bodies.
///
/// Only bodies sharing at least one bit with `mask` are considered. When
/// several bodies overlap the circle the highest surface wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterProbe {
    pub bodies: Vec<WaterBody>,
    #[serde(default = "default_probe_radius")]
    pub radius: f32,
    #[serde(default = "default_water_layer")]
    pub mask: u32,
}

fn default_probe_radius() -> f32 {
    DEFAULT_PROBE_RADIUS
}

impl WaterProbe {
    pub fn new(bodies: Vec<WaterBody>, radius: f32, mask: u32) -> Self {
        Self {
            bodies,
            radius,
            mask,
        }
    }

    fn overlapping(&self, point: Vec2) -> impl Iterator<Item = &WaterBody> {
        let circle = BoundingCircle::new(point, self.radius);
        self.bodies
            .iter()
            .filter(move |body| body.layers & self.mask != 0)
            .filter(move |body| circle.intersects(&body.zone.aabb()))
    }
}

impl RegionTest for WaterProbe {
    fn probe(&self, point: Vec2) -> Option<WaterContact> {
        self.overlapping(point)
            .map(|body| body.zone.surface_y())
            .reduce(f32::max)
            .map(|surface| WaterContact {
                surface_y: Some(surface),
            })
    }

    fn debug_shape(&self, point: Vec2) -> Option<RegionShape> {
        Some(RegionShape::Circle {
            center: point,
            radius: self.radius,
        })
    }
}

/// Either flavor of water region, loadable from config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WaterRegion {
    Zone(WaterZone),
    Probe(WaterProbe),
}

impl RegionTest for WaterRegion {
    fn probe(&self, point: Vec2) -> Option<WaterContact> {
        match self {
            WaterRegion::Zone(zone) => zone.probe(point),
            WaterRegion::Probe(probe) => probe.probe(point),
        }
    }

    fn debug_shape(&self, point: Vec2) -> Option<RegionShape> {
        match self {
            WaterRegion::Zone(zone) => zone.debug_shape(point),
            WaterRegion::Probe(probe) => probe.debug_shape(point),
        }
    }
}

/// The water swimmers are tested against. `None` means no water is wired
/// up, in which case every swimmer reads as dry.
#[derive(Resource, Debug, Clone, Default)]
pub struct WaterRegions {
    pub region: Option<WaterRegion>,
}

impl WaterRegions {
    pub fn new(region: WaterRegion) -> Self {
        Self {
            region: Some(region),
        }
    }

    pub fn as_region_test(&self) -> Option<&dyn RegionTest> {
        self.region.as_ref().map(|region| region as &dyn RegionTest)
    }
}
