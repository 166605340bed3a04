use tile_grid::stencil::{
    DoubleBuffer, EDGE_COORDINATES, Neighborhood, RoundTripReport, StencilParams,
    exhaustive_coordinates, run_round_trip_check, run_stencil_benchmark, sample_coordinates,
    seed_double_buffer,
};
use tile_grid::tiled::{Addressing, Coord, LinearAddressSpace, TileConfig, TiledAddressSpace};

fn seven_by_three() -> TiledAddressSpace {
    TiledAddressSpace::new(TileConfig::new(3).unwrap(), 7, 3).unwrap()
}

#[test]
fn edge_coordinates_all_pass() {
    let report = run_round_trip_check(&seven_by_three(), &EDGE_COORDINATES);
    assert_eq!(
        report,
        RoundTripReport {
            passed: 11,
            tested: 11
        }
    );
    assert_eq!(report.failed_percent(), 0.0);
}

#[test]
fn sampled_and_exhaustive_checks_pass() {
    let space = seven_by_three();
    let coords = sample_coordinates(&space, 100_000, 0xB2, usize::MAX);
    let report = run_round_trip_check(&space, &coords);
    assert_eq!(report.tested, coords.len());
    assert!(report.all_passed(), "{} failures", report.failed());

    let big = TiledAddressSpace::for_dimensions(TileConfig::new(4).unwrap(), 256, 128).unwrap();
    let report = run_round_trip_check(&big, &exhaustive_coordinates(&big));
    assert_eq!(report.tested, big.size());
    assert!(report.all_passed());
}

#[test]
fn out_of_range_samples_are_counted_not_fatal() {
    let space = seven_by_three();
    let coords = [Coord::new(12, 9), Coord::new(56, 0), Coord::new(60, 1), Coord::new(3, 3)];
    let report = run_round_trip_check(&space, &coords);
    assert_eq!(report.tested, 4);
    assert_eq!(report.passed, 2);
    assert_eq!(report.failed_percent(), 50.0);
}

#[test]
fn tiled_benchmark_leaves_border_and_returns_elapsed() {
    let space = seven_by_three();
    let params = StencilParams::default().border(2).repetitions(6);
    let mut buffer = seed_double_buffer(&space, 0xC3, 10.0);
    let initial = buffer.current().to_vec();

    let elapsed = run_stencil_benchmark(&space, &mut buffer, &params);
    assert!(elapsed.as_nanos() > 0);

    let mut changed_interior = 0;
    for y in 0..space.height() {
        for x in 0..space.width() {
            let index = space.coord_to_offset(x, y);
            let interior =
                (2..space.width() - 2).contains(&x) && (2..space.height() - 2).contains(&y);
            if interior {
                changed_interior += usize::from(buffer.current()[index] != initial[index]);
            } else {
                assert_eq!(buffer.current()[index], initial[index], "border ({x},{y}) written");
            }
        }
    }
    assert!(changed_interior > 0);
}

#[test]
fn diffusion_shrinks_the_interior_spread() {
    let linear = LinearAddressSpace::new(64, 64);
    let mut buffer = seed_double_buffer(&linear, 0xD4, 10.0);
    let spread = |buffer: &DoubleBuffer| {
        let mut lo = f32::MAX;
        let mut hi = f32::MIN;
        for y in 8..56 {
            for x in 8..56 {
                let v = buffer.current()[linear.offset(x, y)];
                lo = lo.min(v);
                hi = hi.max(v);
            }
        }
        hi - lo
    };
    let before = spread(&buffer);
    let params = StencilParams::default()
        .repetitions(200)
        .neighborhood(Neighborhood::Square);
    run_stencil_benchmark(&linear, &mut buffer, &params);
    assert!(spread(&buffer) < before / 2.0);
}

#[test]
fn border_wider_than_grid_leaves_tiled_buffer_unchanged() {
    let space = seven_by_three();
    for border in [u32::MAX / 2 + 1, u32::MAX, 40_000] {
        let mut buffer = seed_double_buffer(&space, 0xE1, 10.0);
        let initial = buffer.current().to_vec();
        let params = StencilParams::default().border(border).repetitions(1);
        run_stencil_benchmark(&space, &mut buffer, &params);
        assert_eq!(buffer.current(), initial.as_slice(), "border {border}");
    }
}
