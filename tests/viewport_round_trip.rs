mod common;

use common::{assert_close, assert_longitude_close};
use mapframe::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const STRATEGIES: [ScaleStrategy; 4] = [
    ScaleStrategy::Width,
    ScaleStrategy::Height,
    ScaleStrategy::Fit,
    ScaleStrategy::Fill,
];

#[test]
fn test_bounds_survive_camera_round_trip() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let center = GeoCoordinate::new(rng.gen_range(-70.0..70.0), rng.gen_range(-180.0..180.0));
        let radius_x = Length::meters(rng.gen_range(200.0..200_000.0));
        let radius_y = Length::meters(rng.gen_range(200.0..200_000.0));
        let viewport = ViewportSize::new(rng.gen_range(200.0..2000.0), rng.gen_range(200.0..2000.0));
        let bounds = MapBounds::from_center(center)
            .with_radii(radius_x, radius_y)
            .with_bearing(rng.gen_range(0.0..360.0))
            .with_padding(Padding::NONE);

        let pose = bounds.to_camera_pose(viewport);
        let read_back = MapBounds::from_camera_pose(&pose, viewport);

        assert_close(read_back.center().latitude, center.latitude, 1e-9, "latitude");
        assert_close(read_back.center().longitude, center.longitude, 1e-9, "longitude");
        let expected = bounds.radius().as_meters();
        assert_close(read_back.radius().as_meters(), expected, expected * 1e-9, "radius");
        assert_close(read_back.bearing(), bounds.bearing(), 1e-9, "bearing");
    }
}

#[test]
fn test_pose_survives_padding_round_trip_for_every_strategy() {
    let viewports = [ViewportSize::new(400.0, 800.0), ViewportSize::new(1280.0, 720.0)];
    let paddings = [
        Padding::new(0.1, 0.3, 0.05, 0.2),
        Padding::new(0.0, 0.5, 0.0, 0.0),
        Padding::uniform(0.05),
    ];
    let bearings = [0.0, 45.0, 200.0];
    // The last two sit close enough to the antimeridian for the padding shift
    // to cross it
    let targets = [
        GeoCoordinate::new(47.6, -122.3),
        GeoCoordinate::new(-12.0, 179.995),
        GeoCoordinate::new(5.0, -179.995),
    ];

    for target in targets {
        for viewport in viewports {
            for padding in paddings {
                for bearing in bearings {
                    for strategy in STRATEGIES {
                        let pose = CameraPose::new(target, 12.5, bearing, 30.0);
                        let bounds =
                            MapBounds::from_camera_pose_excluding_padding(&pose, strategy, padding, viewport);
                        assert_eq!(bounds.scale_strategy(), strategy);
                        assert_eq!(bounds.padding(), padding);
                        assert!(bounds.center().is_valid(), "{:?}", bounds.center());

                        let restored = bounds.to_camera_pose(viewport);
                        let context = format!("{target:?} {strategy:?} {padding:?} bearing {bearing}");
                        assert!(restored.target.is_valid(), "{context}");
                        assert_close(restored.target.latitude, target.latitude, 1e-7, &context);
                        assert_longitude_close(restored.target.longitude, target.longitude, 1e-7, &context);
                        assert_close(restored.zoom, 12.5, 1e-7, &context);
                        assert_close(restored.bearing, bearing, 1e-9, &context);
                        assert_close(restored.tilt, 30.0, 1e-9, &context);
                    }
                }
            }
        }
    }
}

#[test]
fn test_bounds_near_antimeridian_survive_padding_round_trip() {
    let viewport = ViewportSize::new(400.0, 800.0);
    let padding = Padding::new(0.0, 0.0, 0.0, 0.3);

    for longitude in [179.95, 179.999, -179.95, -179.999] {
        let center = GeoCoordinate::new(0.0, longitude);
        for strategy in STRATEGIES {
            let bounds = MapBounds::from_center_with_radius(center, Length::kilometers(50.0))
                .with_padding(padding)
                .with_scale_strategy(strategy);
            let pose = bounds.to_camera_pose(viewport);
            let context = format!("{longitude} {strategy:?}");
            assert!(pose.target.is_valid(), "{context}: {:?}", pose.target);

            let read = MapBounds::from_camera_pose_excluding_padding(&pose, strategy, padding, viewport);
            assert!(read.center().is_valid(), "{context}");
            assert_longitude_close(read.center().longitude, longitude, 1e-9, &context);
            assert_close(read.center().latitude, 0.0, 1e-9, &context);
        }
    }
}

#[test]
fn test_padding_moves_visible_center_off_target() {
    let viewport = ViewportSize::new(400.0, 800.0);
    let pose = CameraPose::new(GeoCoordinate::new(10.0, 20.0), 10.0, 0.0, 0.0);

    // Content hidden at the bottom: the visible middle sits north of the target
    let bottom_sheet = Padding::new(0.0, 0.5, 0.0, 0.0);
    let bounds = MapBounds::from_camera_pose_excluding_padding(&pose, ScaleStrategy::Fit, bottom_sheet, viewport);
    assert!(bounds.center().latitude > 10.0);
    assert_close(bounds.center().longitude, 20.0, 1e-12, "longitude");

    let unpadded = MapBounds::from_camera_pose(&pose, viewport);
    assert_close(
        bounds.radius_y().as_meters(),
        unpadded.radius_y().as_meters() * 0.5,
        1e-6,
        "visible radius",
    );
}

#[test]
fn test_zoom_is_clamped_at_both_ends() {
    let viewport = ViewportSize::new(400.0, 400.0);
    let center = GeoCoordinate::new(0.0, 0.0);

    let tiny = MapBounds::from_center_with_radius(center, Length::meters(0.5)).with_padding(Padding::NONE);
    assert_eq!(tiny.to_camera_pose(viewport).zoom, 21.0);

    let huge = MapBounds::from_center_with_radius(center, Length::kilometers(20_000.0)).with_padding(Padding::NONE);
    assert_eq!(huge.to_camera_pose(viewport).zoom, 1.0);

    let limits = ZoomLimits::new(3.0, 15.0);
    assert_eq!(tiny.to_camera_pose_within(viewport, &limits).zoom, 15.0);
    assert_eq!(huge.to_camera_pose_within(viewport, &limits).zoom, 3.0);
}

#[test]
fn test_degenerate_inputs_stay_finite() {
    let bounds = MapBounds::from_center(GeoCoordinate::new(89.9, 0.0))
        .with_radius(Length::meters(-5.0))
        .with_padding(Padding::new(0.8, 0.8, 0.9, 0.9));
    for viewport in [ViewportSize::new(0.0, 0.0), ViewportSize::new(f64::NAN, -3.0)] {
        for strategy in STRATEGIES {
            let pose = bounds.with_scale_strategy(strategy).to_camera_pose(viewport);
            assert!(pose.zoom.is_finite());
            assert!(pose.target.latitude.is_finite());
            assert!(pose.target.longitude.is_finite());
        }
    }
}

#[test]
fn test_mercator_scale_matches_projection() {
    // A 256 dp tile at zoom 0 spans the whole circumference
    let projection = common::WebMercator::new(0.0, 0.0, 0.0);
    let viewport = ViewportSize::new(256.0, 256.0);
    let bounds = MapBounds::from_camera_pose(&projection.current_camera_pose(), viewport);
    assert_close(
        bounds.radius_x().as_meters() * 2.0,
        mapframe::constants::EARTH_CIRCUMFERENCE_METERS,
        1e-3,
        "world width",
    );

    let east_edge = projection
        .geo_coordinate_of(Point::new(256.0, 128.0), &projection.pose, viewport)
        .map(|coordinate| coordinate.longitude);
    assert_close(east_edge.unwrap_or_default(), 180.0, 1e-9, "east edge");
}
