//! Environmental collaborators consumed by the ingress driver.

use fl_core::Real;

/// Supplies ambient water height and rain intensity.
pub trait Environment {
    /// Ambient water surface height (world Y) at world position `world_x`.
    fn ambient_water_height(&self, world_x: Real) -> Real;

    /// Rain multiplier in `[0, 1]`; values outside are clamped by the driver.
    fn rain_intensity(&self) -> Real;
}

/// Flat sea at a fixed height with constant rain.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CalmSea {
    pub level: Real,
    pub rain: Real,
}

impl Environment for CalmSea {
    fn ambient_water_height(&self, _world_x: Real) -> Real {
        self.level
    }

    fn rain_intensity(&self) -> Real {
        self.rain
    }
}
