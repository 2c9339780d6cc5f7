//! Floodable compartment: a convex quadrilateral holding water and trapped air.

use fl_core::{ConnectionId, Real, clamp01};
use fl_geom::{Pose, Vec2, clip_below_plane, polygon_area, project_bounds, submerged_area};

use crate::error::{VesselError, VesselResult};
use crate::source::{ExternalSource, SourceKind};
use crate::validate::{validate_corners, validate_fraction, validate_non_negative};

/// Fixed bisection depth for recovering a surface plane from an area.
pub const SURFACE_BISECTION_ITERATIONS: usize = 12;

/// Trapped-air tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirParams {
    /// Fraction of the hull area reserved for air while integrity is 1.
    pub min_air_fraction: Real,
    /// Integrity lost per second while the compartment cannot vent.
    pub leak_rate: Real,
}

impl Default for AirParams {
    fn default() -> Self {
        Self {
            min_air_fraction: 0.0,
            leak_rate: 0.0,
        }
    }
}

/// A floodable compartment.
///
/// Water is stored as a cross-sectional area; the surface plane position
/// (`water_surface_offset`, measured along the pose's up axis) is cached
/// and recomputed whenever the area or the pose changes.
#[derive(Debug, Clone)]
pub struct Compartment {
    name: String,
    /// Local corners: top-left, top-right, bottom-right, bottom-left.
    local_corners: [Vec2; 4],
    world_corners: [Vec2; 4],
    up: Vec2,
    max_water_area: Real,

    water_area: Real,
    water_surface_offset: Real,

    air_integrity: Real,
    air: AirParams,
    vents_to_outside: bool,
    can_release_air: bool,

    pub(crate) connections: Vec<ConnectionId>,
    sources: Vec<ExternalSource>,
}

impl Compartment {
    /// Create an empty compartment from clockwise local corners.
    pub fn new(name: impl Into<String>, corners: [Vec2; 4]) -> VesselResult<Self> {
        let name = name.into();
        validate_corners(&name, &corners)?;

        let mut compartment = Self {
            name,
            local_corners: corners,
            world_corners: corners,
            up: Pose::default().up(),
            max_water_area: polygon_area(&corners),
            water_area: 0.0,
            water_surface_offset: 0.0,
            air_integrity: 1.0,
            air: AirParams::default(),
            vents_to_outside: false,
            can_release_air: false,
            connections: Vec::new(),
            sources: Vec::new(),
        };
        compartment.refresh_surface();
        Ok(compartment)
    }

    /// Axis-aligned box spanning `[left, right] x [bottom, top]` in local space.
    pub fn rectangle(
        name: impl Into<String>,
        left: Real,
        right: Real,
        bottom: Real,
        top: Real,
    ) -> VesselResult<Self> {
        Self::new(
            name,
            [
                Vec2::new(left, top),
                Vec2::new(right, top),
                Vec2::new(right, bottom),
                Vec2::new(left, bottom),
            ],
        )
    }

    /// Set the trapped-air tunables.
    pub fn with_air(mut self, air: AirParams) -> VesselResult<Self> {
        validate_fraction(air.min_air_fraction, "min_air_fraction")?;
        validate_non_negative(air.leak_rate, "air_leak_rate")?;
        self.air = air;
        Ok(self)
    }

    /// Mark the compartment as open to the atmosphere.
    pub fn with_vent(mut self, vents_to_outside: bool) -> Self {
        self.vents_to_outside = vents_to_outside;
        self
    }

    /// Start with `area` of water (clamped to the hull).
    pub fn with_water(mut self, area: Real) -> Self {
        self.set_water_area(area);
        self
    }

    /// Attach an ingress source.
    pub fn with_source(mut self, source: ExternalSource) -> VesselResult<Self> {
        self.add_source(source)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local_corners(&self) -> &[Vec2; 4] {
        &self.local_corners
    }

    /// Corners in world space under the most recent pose.
    pub fn world_corners(&self) -> &[Vec2; 4] {
        &self.world_corners
    }

    /// Up axis of the most recent pose.
    pub fn up(&self) -> Vec2 {
        self.up
    }

    /// Re-derive world geometry from a new placement/gravity and refresh the surface.
    pub fn set_pose(&mut self, pose: &Pose) {
        self.world_corners = self.local_corners.map(|c| pose.to_world(&c));
        self.up = pose.up();
        self.refresh_surface();
    }

    /// Lowest corner height along the up axis.
    pub fn floor_offset(&self) -> Real {
        project_bounds(&self.world_corners, &self.up).0
    }

    /// Highest corner height along the up axis.
    pub fn ceiling_offset(&self) -> Real {
        project_bounds(&self.world_corners, &self.up).1
    }

    pub fn max_water_area(&self) -> Real {
        self.max_water_area
    }

    pub fn water_area(&self) -> Real {
        self.water_area
    }

    pub fn water_surface_offset(&self) -> Real {
        self.water_surface_offset
    }

    /// Room left for water once trapped air has claimed its share.
    pub fn available_capacity(&self) -> Real {
        let reserved = self.air.min_air_fraction * self.air_integrity;
        let limit = (self.max_water_area * (1.0 - reserved)).min(self.max_water_area);
        (limit - self.water_area).max(0.0)
    }

    /// Overwrite the stored water area, clamped to `[0, max_water_area]`.
    pub fn set_water_area(&mut self, area: Real) {
        self.water_area = if area.is_nan() {
            0.0
        } else {
            area.clamp(0.0, self.max_water_area)
        };
        self.refresh_surface();
    }

    /// Take up to `volume` of water; returns the amount actually accepted.
    ///
    /// Anything beyond `available_capacity` is refused and stays with the caller.
    pub fn accept_water(&mut self, volume: Real) -> Real {
        if volume.is_nan() || volume <= 0.0 {
            return 0.0;
        }
        let accepted = volume.min(self.available_capacity());
        if accepted <= 0.0 {
            return 0.0;
        }
        self.water_area = (self.water_area + accepted).min(self.max_water_area);
        self.refresh_surface();
        accepted
    }

    /// Drain up to `volume` of water; returns the amount actually removed.
    pub fn remove_water(&mut self, volume: Real) -> Real {
        if volume.is_nan() || volume <= 0.0 {
            return 0.0;
        }
        let removed = volume.min(self.water_area);
        self.water_area = (self.water_area - removed).max(0.0);
        self.refresh_surface();
        removed
    }

    /// Area of the hull below the plane at `offset` along the up axis.
    pub fn submerged_area_at(&self, offset: Real) -> Real {
        submerged_area(&self.world_corners, &self.up, offset)
    }

    /// Plane offset whose submerged area matches `target_area`.
    ///
    /// Bisects between the floor and ceiling projections for a fixed
    /// `SURFACE_BISECTION_ITERATIONS` steps. Relies on submerged area being
    /// non-decreasing in the offset, which holds for any convex hull.
    pub fn solve_surface_offset_from_area(&self, target_area: Real) -> Real {
        let (mut lo, mut hi) = project_bounds(&self.world_corners, &self.up);
        for _ in 0..SURFACE_BISECTION_ITERATIONS {
            let mid = 0.5 * (lo + hi);
            if self.submerged_area_at(mid) < target_area {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        0.5 * (lo + hi)
    }

    /// Wetted part of the hull in world space (empty when dry).
    pub fn water_polygon_world(&self) -> Vec<Vec2> {
        if self.water_area <= 0.0 {
            return Vec::new();
        }
        clip_below_plane(&self.world_corners, &self.up, self.water_surface_offset)
    }

    fn refresh_surface(&mut self) {
        self.water_surface_offset = self.solve_surface_offset_from_area(self.water_area);
    }

    pub fn air_integrity(&self) -> Real {
        self.air_integrity
    }

    pub fn air_params(&self) -> AirParams {
        self.air
    }

    pub fn vents_to_outside(&self) -> bool {
        self.vents_to_outside
    }

    pub fn set_vents_to_outside(&mut self, vents: bool) {
        self.vents_to_outside = vents;
    }

    /// Result of the latest air-escape analysis.
    pub fn can_release_air(&self) -> bool {
        self.can_release_air
    }

    pub fn set_can_release_air(&mut self, can_release: bool) {
        self.can_release_air = can_release;
    }

    /// Venting snaps integrity to 1; otherwise it decays by `leak_rate * dt`.
    pub fn update_air_integrity(&mut self, can_release_air: bool, dt: Real) {
        self.air_integrity = if can_release_air {
            1.0
        } else {
            clamp01(self.air_integrity - self.air.leak_rate * dt.max(0.0))
        };
    }

    /// Connections touching this compartment.
    pub fn connections(&self) -> &[ConnectionId] {
        &self.connections
    }

    pub fn sources(&self) -> &[ExternalSource] {
        &self.sources
    }

    pub fn sources_mut(&mut self) -> &mut [ExternalSource] {
        &mut self.sources
    }

    pub fn add_source(&mut self, source: ExternalSource) -> VesselResult<()> {
        validate_non_negative(source.rate, "source.rate")?;
        if let SourceKind::Sea { edge } = source.kind {
            if edge >= self.local_corners.len() {
                return Err(VesselError::InvalidParameter {
                    what: "sea source edge",
                    value: edge as f64,
                });
            }
        }
        self.sources.push(source);
        Ok(())
    }

    /// World endpoints of hull edge `edge` (corner `edge` to `edge + 1`).
    pub fn world_edge(&self, edge: usize) -> Option<(Vec2, Vec2)> {
        let n = self.world_corners.len();
        (edge < n).then(|| (self.world_corners[edge], self.world_corners[(edge + 1) % n]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    fn box2() -> Compartment {
        Compartment::rectangle("box", 0.0, 2.0, 0.0, 2.0).unwrap()
    }

    #[test]
    fn rectangle_area_and_bounds() {
        let c = box2();
        assert_eq!(c.max_water_area(), 4.0);
        assert_eq!(c.floor_offset(), 0.0);
        assert_eq!(c.ceiling_offset(), 2.0);
        assert_eq!(c.available_capacity(), 4.0);
    }

    #[test]
    fn trapezoid_capacity() {
        let c = Compartment::new(
            "trap",
            [
                Vec2::new(0.0, 1.0),
                Vec2::new(4.0, 1.0),
                Vec2::new(3.0, 0.0),
                Vec2::new(1.0, 0.0),
            ],
        )
        .unwrap();
        assert!((c.max_water_area() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn counter_clockwise_rejected() {
        let err = Compartment::new(
            "ccw",
            [
                Vec2::new(0.0, 2.0),
                Vec2::new(0.0, 0.0),
                Vec2::new(2.0, 0.0),
                Vec2::new(2.0, 2.0),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, VesselError::InvalidGeometry { .. }));
    }

    #[test]
    fn accept_clamps_to_capacity() {
        let mut c = box2();
        assert_eq!(c.accept_water(3.0), 3.0);
        assert_eq!(c.accept_water(3.0), 1.0);
        assert_eq!(c.water_area(), 4.0);
        assert_eq!(c.accept_water(1.0), 0.0);
    }

    #[test]
    fn accept_ignores_negative_and_nan() {
        let mut c = box2();
        assert_eq!(c.accept_water(-1.0), 0.0);
        assert_eq!(c.accept_water(f64::NAN), 0.0);
        assert_eq!(c.water_area(), 0.0);
    }

    #[test]
    fn remove_floors_at_zero() {
        let mut c = box2().with_water(1.0);
        assert_eq!(c.remove_water(f64::NAN), 0.0);
        assert_eq!(c.remove_water(-1.0), 0.0);
        assert_eq!(c.remove_water(0.25), 0.25);
        assert_eq!(c.remove_water(5.0), 0.75);
        assert_eq!(c.water_area(), 0.0);
    }

    #[test]
    fn surface_tracks_area() {
        let mut c = box2();
        c.accept_water(2.0);
        assert!((c.water_surface_offset() - 1.0).abs() < 1e-3);
        c.remove_water(1.0);
        assert!((c.water_surface_offset() - 0.5).abs() < 1e-3);
    }

    #[test]
    fn trapped_air_reserves_capacity() {
        let mut c = box2()
            .with_air(AirParams {
                min_air_fraction: 0.25,
                leak_rate: 0.5,
            })
            .unwrap();
        assert!((c.available_capacity() - 3.0).abs() < 1e-12);

        // integrity decays linearly: 1.0 -> 0.5 after one second
        c.update_air_integrity(false, 1.0);
        assert!((c.air_integrity() - 0.5).abs() < 1e-12);
        assert!((c.available_capacity() - 3.5).abs() < 1e-12);

        c.update_air_integrity(false, 10.0);
        assert_eq!(c.air_integrity(), 0.0);
        assert!((c.available_capacity() - 4.0).abs() < 1e-12);

        c.update_air_integrity(true, 0.1);
        assert_eq!(c.air_integrity(), 1.0);
    }

    #[test]
    fn full_tank_with_restored_air_has_no_capacity() {
        let mut c = box2()
            .with_air(AirParams {
                min_air_fraction: 0.5,
                leak_rate: 1.0,
            })
            .unwrap();
        c.update_air_integrity(false, 1.0);
        c.accept_water(4.0);
        c.update_air_integrity(true, 0.0);
        assert_eq!(c.available_capacity(), 0.0);
        assert_eq!(c.water_area(), 4.0);
    }

    #[test]
    fn invalid_air_params_rejected() {
        let bad = AirParams {
            min_air_fraction: 1.5,
            leak_rate: 0.0,
        };
        assert!(box2().with_air(bad).is_err());
    }

    #[test]
    fn pose_moves_world_corners() {
        let mut c = box2().with_water(2.0);
        let before = c.water_surface_offset();
        c.set_pose(&Pose::from_parts(0.0, 10.0, 0.0));
        assert_eq!(c.world_corners()[0], Vec2::new(0.0, 12.0));
        assert!((c.water_surface_offset() - (before + 10.0)).abs() < 1e-3);
        assert_eq!(c.local_corners()[0], Vec2::new(0.0, 2.0));
    }

    #[test]
    fn heeled_compartment_holds_same_area() {
        let mut c = box2().with_water(1.0);
        c.set_pose(&Pose::from_parts(0.0, 0.0, FRAC_PI_4));
        let wet = polygon_area(&c.water_polygon_world());
        assert!((wet - 1.0).abs() < 0.04);
    }

    #[test]
    fn dry_compartment_has_no_water_polygon() {
        assert!(box2().water_polygon_world().is_empty());
    }

    #[test]
    fn sea_source_edge_checked() {
        let mut c = box2();
        assert!(c.add_source(ExternalSource::sea(4, 1.0)).is_err());
        assert!(c.add_source(ExternalSource::sea(3, 1.0)).is_ok());
        assert!(c.add_source(ExternalSource::rain(-1.0)).is_err());
        assert_eq!(c.sources().len(), 1);
    }

    #[test]
    fn world_edge_wraps() {
        let c = box2();
        let (a, b) = c.world_edge(3).unwrap();
        assert_eq!(a, Vec2::new(0.0, 0.0));
        assert_eq!(b, Vec2::new(0.0, 2.0));
        assert!(c.world_edge(4).is_none());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn bisection_reproduces_area(
            w in 0.5_f64..6.0,
            h in 0.5_f64..6.0,
            skew in -0.4_f64..0.4,
            angle in -1.2_f64..1.2,
            frac in 0.0_f64..=1.0,
        ) {
            // trapezoid with a narrowed or slanted bottom edge
            let inset = skew * w;
            let corners = [
                Vec2::new(0.0, h),
                Vec2::new(w, h),
                Vec2::new(w - inset.max(0.0), 0.0),
                Vec2::new(inset.abs(), 0.0),
            ];
            let Ok(mut c) = Compartment::new("p", corners) else {
                return Ok(());
            };
            c.set_pose(&Pose::from_parts(1.0, -3.0, angle));
            let target = frac * c.max_water_area();
            let offset = c.solve_surface_offset_from_area(target);
            let measured = c.submerged_area_at(offset);
            prop_assert!((measured - target).abs() <= 0.01 * c.max_water_area(),
                "target {} measured {}", target, measured);
        }
    }
}
