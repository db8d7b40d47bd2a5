#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for route editing using rstest-bdd.
//!
//! These scenarios drive the engine through a stub provider and a recording
//! renderer, covering padding, selection, dragging and reset.

use std::cell::RefCell;
use std::sync::Arc;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use rtd_core::test_support::{RecordingRenderer, StubDirectionsProvider, sample_route, single_path};
use rtd_core::{Direction, GeoPoint};
use rtd_engine::{ComputeOutcome, DualRouteEngine, EngineError};
use tokio::runtime::{Builder, Runtime};

const SOURCE: GeoPoint = GeoPoint { lat: 19.07, lng: 72.87 };
const DESTINATION: GeoPoint = GeoPoint { lat: 18.52, lng: 73.85 };

type Engine = DualRouteEngine<StubDirectionsProvider, RecordingRenderer>;

/// World state for route editing scenarios.
struct EditingWorld {
    runtime: Runtime,
    engine: RefCell<Option<Engine>>,
    outcome: RefCell<Option<Result<ComputeOutcome, EngineError>>>,
}

#[fixture]
fn world() -> EditingWorld {
    EditingWorld {
        runtime: Builder::new_current_thread()
            .build()
            .expect("test runtime builds"),
        engine: RefCell::new(None),
        outcome: RefCell::new(None),
    }
}

fn direction(name: &str) -> Direction {
    match name {
        "outbound" => Direction::Outbound,
        "return" => Direction::Return,
        other => panic!("unknown direction {other}"),
    }
}

fn install(world: &EditingWorld, provider: StubDirectionsProvider) {
    world.engine.replace(Some(DualRouteEngine::new(
        Arc::new(provider),
        RecordingRenderer::default(),
    )));
}

fn with_engine<T>(world: &EditingWorld, action: impl FnOnce(&mut Engine) -> T) -> T {
    let mut slot = world.engine.borrow_mut();
    let engine = slot.as_mut().expect("engine should be installed");
    action(engine)
}

#[given("a provider with one outbound route and four return routes")]
fn given_full_provider(world: &EditingWorld) {
    let provider = StubDirectionsProvider::new()
        .with_route(
            SOURCE,
            DESTINATION,
            vec![sample_route(5_100, "5.1 km", "45 mins")],
        )
        .with_route(
            DESTINATION,
            SOURCE,
            vec![
                sample_route(6_200, "6.2 km", "30 mins"),
                sample_route(4_900, "4.9 km", "20 mins"),
                sample_route(7_000, "7.0 km", "35 mins"),
                sample_route(5_500, "5.5 km", "25 mins"),
            ],
        );
    install(world, provider);
}

#[given("a provider without return routes")]
fn given_outbound_only(world: &EditingWorld) {
    let provider = StubDirectionsProvider::new().with_route(
        SOURCE,
        DESTINATION,
        vec![sample_route(5_100, "5.1 km", "45 mins")],
    );
    install(world, provider);
}

#[when("routes are computed")]
fn when_computed(world: &EditingWorld) {
    let mut slot = world.engine.borrow_mut();
    let engine = slot.as_mut().expect("engine should be installed");
    let outcome = world
        .runtime
        .block_on(engine.compute_routes(SOURCE, DESTINATION));
    world.outcome.replace(Some(outcome));
}

#[when("the user selects {name} candidate {index}")]
fn when_selects(world: &EditingWorld, name: String, index: usize) {
    with_engine(world, |engine| engine.select_route(direction(&name), index))
        .expect("selection succeeds");
}

#[when("the user drags {name} candidate {index}")]
fn when_drags(world: &EditingWorld, name: String, index: usize) {
    let dragged = single_path(sample_route(8_800, "8.8 km", "50 mins"));
    with_engine(world, |engine| {
        engine.on_path_dragged(direction(&name), index, dragged)
    })
    .expect("drag is accepted");
}

#[when("the user resets {name} candidate {index}")]
fn when_resets(world: &EditingWorld, name: String, index: usize) {
    with_engine(world, |engine| {
        engine.reset_to_original(direction(&name), index)
    })
    .expect("reset succeeds");
}

#[then("the outbound direction shows {count} identical candidates")]
fn then_identical(world: &EditingWorld, count: usize) {
    with_engine(world, |engine| {
        let set = engine.direction_set(Direction::Outbound);
        assert_eq!(set.len(), count);
        let first = set.candidate(0).expect("first candidate");
        assert!(
            set.candidates()
                .iter()
                .all(|candidate| candidate.raw_path == first.raw_path)
        );
    });
}

#[then("the return candidates are ordered by distance")]
fn then_ordered(world: &EditingWorld) {
    with_engine(world, |engine| {
        let distances: Vec<u64> = engine
            .direction_set(Direction::Return)
            .candidates()
            .iter()
            .map(|candidate| candidate.leg_metric.distance_value_meters)
            .collect();
        assert_eq!(distances, vec![4_900, 5_500, 6_200, 7_000]);
    });
}

#[then("{name} candidate {index} is custom")]
fn then_custom(world: &EditingWorld, name: String, index: usize) {
    with_engine(world, |engine| {
        let set = engine.direction_set(direction(&name));
        assert!(set.candidate(index).is_some_and(|candidate| candidate.is_custom));
    });
}

#[then("{name} candidate {index} is not custom")]
fn then_not_custom(world: &EditingWorld, name: String, index: usize) {
    with_engine(world, |engine| {
        let set = engine.direction_set(direction(&name));
        assert!(set.candidate(index).is_some_and(|candidate| !candidate.is_custom));
    });
}

#[then("{name} candidate {index} has its fetched distance")]
fn then_fetched_distance(world: &EditingWorld, name: String, index: usize) {
    with_engine(world, |engine| {
        let candidate = engine
            .direction_set(direction(&name))
            .candidate(index)
            .expect("candidate exists");
        assert_eq!(candidate.leg_metric.distance_value_meters, 5_100);
        assert_eq!(candidate.leg_metric.distance_text, "5.1 km");
    });
}

#[then("the {name} direction has a custom path")]
fn then_has_custom_path(world: &EditingWorld, name: String) {
    with_engine(world, |engine| {
        let trip = engine.trip_route().expect("trip route");
        assert!(trip.direction(direction(&name)).custom_path.is_some());
    });
}

#[then("the {name} direction has no custom path")]
fn then_no_custom_path(world: &EditingWorld, name: String) {
    with_engine(world, |engine| {
        let trip = engine.trip_route().expect("trip route");
        assert!(trip.direction(direction(&name)).custom_path.is_none());
    });
}

#[then("a route computation error is reported")]
fn then_computation_error(world: &EditingWorld) {
    let outcome = world.outcome.borrow();
    assert!(matches!(
        outcome.as_ref(),
        Some(Err(EngineError::RouteComputation {
            direction: Direction::Return,
            ..
        }))
    ));
}

#[then("no trip route is available")]
fn then_no_trip(world: &EditingWorld) {
    with_engine(world, |engine| assert!(engine.trip_route().is_none()));
}

#[scenario(path = "tests/features/route_editing.feature", index = 0)]
fn padded_and_sorted(world: EditingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/route_editing.feature", index = 1)]
fn drag_return_candidate(world: EditingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/route_editing.feature", index = 2)]
fn reset_outbound_candidate(world: EditingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/route_editing.feature", index = 3)]
fn failing_return_request(world: EditingWorld) {
    let _ = world;
}
