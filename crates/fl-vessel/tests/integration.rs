//! Integration tests for fl-vessel.

use fl_geom::{Pose, Vec2, polygon_area};
use fl_vessel::{AirParams, Compartment, ExternalSource, OpeningRect, VesselBuilder};

#[test]
fn build_two_compartment_barge() {
    let mut builder = VesselBuilder::new("barge");
    let fore = builder.add_compartment(
        Compartment::rectangle("fore", 0.0, 2.0, 0.0, 2.0)
            .unwrap()
            .with_water(4.0),
    );
    let aft = builder.add_compartment(
        Compartment::rectangle("aft", 2.0, 4.0, 0.0, 2.0)
            .unwrap()
            .with_vent(true)
            .with_air(AirParams {
                min_air_fraction: 0.1,
                leak_rate: 0.2,
            })
            .unwrap()
            .with_source(ExternalSource::rain(0.5))
            .unwrap(),
    );
    let hatch = builder.add_connection(fore, aft, OpeningRect::new(1.0, 3.0, 0.0, 2.0), 1.0);
    let vessel = builder.build().unwrap();

    assert_eq!(vessel.total_water(), 4.0);
    assert!(vessel.compartment(aft).unwrap().vents_to_outside());
    assert_eq!(vessel.compartment(aft).unwrap().sources().len(), 1);

    let conn = vessel.connection(hatch).unwrap();
    assert_eq!(conn.endpoints(), (fore, aft));
    assert_eq!(conn.width(), 2.0);

    let neighbors: Vec<_> = vessel.open_neighbors(fore).collect();
    assert_eq!(neighbors, vec![(hatch, aft)]);
}

#[test]
fn rolling_the_vessel_keeps_water_area() {
    let mut builder = VesselBuilder::new("roll");
    let tank = builder.add_compartment(
        Compartment::new(
            "bilge",
            [
                Vec2::new(-2.0, 1.0),
                Vec2::new(2.0, 1.0),
                Vec2::new(1.0, -1.0),
                Vec2::new(-1.0, -1.0),
            ],
        )
        .unwrap()
        .with_water(2.0),
    );
    let mut vessel = builder.build().unwrap();

    for angle in [-0.6, -0.2, 0.0, 0.3, 0.9] {
        vessel.set_pose(Pose::from_parts(3.0, -1.0, angle));
        let c = vessel.compartment(tank).unwrap();
        let wet = polygon_area(&c.water_polygon_world());
        assert!((wet - 2.0).abs() < 0.01 * c.max_water_area(), "angle {angle}: {wet}");
        assert!(c.water_surface_offset() >= c.floor_offset());
        assert!(c.water_surface_offset() <= c.ceiling_offset());
    }
}
