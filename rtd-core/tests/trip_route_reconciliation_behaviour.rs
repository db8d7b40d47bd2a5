//! Behavioural tests for trip route reconciliation using rstest-bdd.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use rtd_core::reconcile::reconstruct_trip_route;
use rtd_core::{EndpointPair, GeoPoint, TripMetrics, TripRoute};
use serde_json::{Value, json};

const PERSISTED: &str = include_str!("fixtures/trip_route.json");

/// World state shared by reconciliation scenarios.
#[derive(Debug, Default)]
struct ReconcileWorld {
    raw: RefCell<Value>,
    trip: RefCell<TripRoute>,
}

#[fixture]
fn world() -> ReconcileWorld {
    ReconcileWorld::default()
}

fn endpoints() -> EndpointPair {
    EndpointPair {
        source: GeoPoint { lat: 19.07, lng: 72.87 },
        destination: GeoPoint { lat: 18.52, lng: 73.85 },
    }
}

#[given("a persisted trip route with mixed coordinate encodings")]
fn given_mixed_encodings(world: &ReconcileWorld) {
    let raw: Value = serde_json::from_str(PERSISTED).expect("fixture is valid JSON");
    world.raw.replace(raw);
}

#[given("a persisted trip route whose return direction is malformed")]
fn given_malformed_return(world: &ReconcileWorld) {
    let mut raw: Value = serde_json::from_str(PERSISTED).expect("fixture is valid JSON");
    if let Some(record) = raw.as_object_mut() {
        record.insert("return".to_owned(), json!({"selected": {"routes": 7}, "suggested": "x"}));
    }
    world.raw.replace(raw);
}

#[when("the trip route is reconstructed")]
fn when_reconstructed(world: &ReconcileWorld) {
    let trip = reconstruct_trip_route(&world.raw.borrow(), Some(endpoints()));
    world.trip.replace(trip);
}

#[then("the outbound leg keeps its distance text")]
fn then_distance_text(world: &ReconcileWorld) {
    let trip = world.trip.borrow();
    let leg = trip.outbound.selected.primary_leg().expect("outbound leg");
    assert_eq!(leg.distance.text, "5.1 km");
    assert_eq!(leg.start_address, "Andheri depot");
}

#[then("every outbound coordinate is decoded")]
fn then_coordinates_decoded(world: &ReconcileWorld) {
    let trip = world.trip.borrow();
    let route = trip.outbound.selected.primary_route().expect("outbound route");
    let points: Vec<&GeoPoint> = route.points().collect();
    assert!(!points.is_empty());
    assert!(points.iter().all(|point| !point.is_zero()));
    assert_eq!(route.overview_polyline, "a~l~Fjk~uOwHJy@P");
}

#[then("the outbound direction has a selected route")]
fn then_outbound_selected(world: &ReconcileWorld) {
    assert!(!world.trip.borrow().outbound.selected.is_empty());
}

#[then("the return direction is empty")]
fn then_return_empty(world: &ReconcileWorld) {
    assert!(world.trip.borrow().return_trip.is_empty());
}

#[then("the total distance is {distance}")]
fn then_total_distance(world: &ReconcileWorld, distance: String) {
    let metrics = TripMetrics::from_trip_route(&world.trip.borrow());
    assert_eq!(metrics.total_distance, distance);
}

#[then("the total duration is {duration}")]
fn then_total_duration(world: &ReconcileWorld, duration: String) {
    let metrics = TripMetrics::from_trip_route(&world.trip.borrow());
    assert_eq!(metrics.total_duration, duration);
}

#[scenario(path = "tests/features/trip_route_reconciliation.feature", index = 0)]
fn mixed_encodings(world: ReconcileWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/trip_route_reconciliation.feature", index = 1)]
fn malformed_direction(world: ReconcileWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/trip_route_reconciliation.feature", index = 2)]
fn aggregate_metrics(world: ReconcileWorld) {
    let _ = world;
}
