use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use cucumber::{gherkin::Step, given, then, when, World as _};
use fleet::{
    classify_trips, normalize_trips, trips_from_json, AlertEvaluator, ConflictDetector,
    ConflictReport, DispatchBoard, DriverId, FleetError, RawTrip, Trip, TripAlert, TripId,
};

#[derive(Debug, cucumber::World, Default)]
struct FleetWorld {
    trips: Vec<Trip>,
    board: Option<DispatchBoard>,
    report: Option<ConflictReport>,
    alerts: HashMap<TripId, TripAlert>,
    payload_error: Option<FleetError>,
}

impl FleetWorld {
    fn board(&self) -> &DispatchBoard {
        self.board.as_ref().expect("board must be built first")
    }

    fn report(&self) -> &ConflictReport {
        self.report.as_ref().expect("conflicts must be scanned first")
    }
}

fn raw_trip_from_row(cells: &[String]) -> RawTrip {
    let cell = |index: usize| -> Option<String> {
        cells
            .get(index)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };
    RawTrip {
        id: cell(0),
        date: cell(1),
        time: cell(2),
        status: cell(3),
        driver_id: cell(4),
        ..RawTrip::default()
    }
}

fn parse_day(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("scenario dates must be ISO")
}

fn parse_instant(raw: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M").expect("scenario instants must be ISO")
}

#[given("these trips:")]
async fn given_these_trips(world: &mut FleetWorld, step: &Step) {
    let table = step.table.as_ref().expect("step must carry a trips table");
    let raw: Vec<RawTrip> = table
        .rows
        .iter()
        .skip(1)
        .map(|row| raw_trip_from_row(row))
        .collect();
    world.trips = normalize_trips(raw);
}

#[given("an empty dispatch list")]
async fn given_empty_list(world: &mut FleetWorld) {
    world.trips.clear();
}

#[when(regex = r#"^the board is built for "([^"]+)"$"#)]
async fn when_board_is_built(world: &mut FleetWorld, today: String) {
    world.board = Some(classify_trips(&world.trips, parse_day(&today)));
}

#[when("conflicts are scanned")]
async fn when_conflicts_scanned(world: &mut FleetWorld) {
    world.report = Some(ConflictDetector::default().detect(&world.trips));
}

#[when(regex = r"^conflicts are scanned with a (\d+) minute window$")]
async fn when_conflicts_scanned_with_window(world: &mut FleetWorld, window: i64) {
    world.report = Some(ConflictDetector::new(window).detect(&world.trips));
}

#[when(regex = r#"^alerts are evaluated at "([^"]+)"$"#)]
async fn when_alerts_evaluated(world: &mut FleetWorld, instant: String) {
    world.alerts = AlertEvaluator::default().evaluate_all(&world.trips, parse_instant(&instant));
}

#[when("the dispatcher loads this payload:")]
async fn when_payload_loaded(world: &mut FleetWorld, step: &Step) {
    let payload = step.docstring.as_ref().expect("step must carry a payload");
    match trips_from_json(payload.as_bytes()) {
        Ok(trips) => {
            world.trips = trips;
            world.payload_error = None;
        }
        Err(err) => {
            world.trips.clear();
            world.payload_error = Some(err);
        }
    }
}

fn assert_column_holds(world: &FleetWorld, column: &str, expected: &str) {
    let board = world.board();
    let bucket = match column {
        "upcoming" => &board.upcoming,
        "in_progress" => &board.in_progress,
        "later_scheduled" => &board.later_scheduled,
        "completed" => &board.completed,
        other => panic!("unknown board column {other}"),
    };
    let mut actual: Vec<&str> = bucket.iter().map(|trip| trip.id.as_str()).collect();
    actual.sort_unstable();
    let mut wanted: Vec<&str> = expected
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect();
    wanted.sort_unstable();
    assert_eq!(actual, wanted);
}

#[then(regex = r#"^the "([^"]+)" column holds exactly "([^"]*)"$"#)]
async fn then_column_holds(world: &mut FleetWorld, column: String, expected: String) {
    assert_column_holds(world, &column, &expected);
}

#[then(regex = r#"^the "([^"]+)" column is empty$"#)]
async fn then_column_is_empty(world: &mut FleetWorld, column: String) {
    assert_column_holds(world, &column, "");
}

#[then("the board is empty")]
async fn then_board_is_empty(world: &mut FleetWorld) {
    assert!(world.board().is_empty());
}

#[then(regex = r#"^trips "([^"]+)" and "([^"]+)" are in conflict$"#)]
async fn then_trips_in_conflict(world: &mut FleetWorld, first: String, second: String) {
    let report = world.report();
    assert!(report.is_conflicted(&TripId::from(first.as_str())));
    assert!(report.is_conflicted(&TripId::from(second.as_str())));
}

#[then(regex = r#"^trip "([^"]+)" is not conflicted$"#)]
async fn then_trip_not_conflicted(world: &mut FleetWorld, id: String) {
    assert!(!world.report().is_conflicted(&TripId::from(id.as_str())));
}

#[then("no conflicts are found")]
async fn then_no_conflicts(world: &mut FleetWorld) {
    assert!(world.report().is_empty());
}

#[then(regex = r#"^driver "([^"]+)" has (\d+) conflicted trips$"#)]
async fn then_driver_conflicts(world: &mut FleetWorld, driver: String, expected: usize) {
    let report = world.report();
    let group = report
        .by_driver
        .get(&DriverId::from(driver.as_str()))
        .expect("driver must appear in the conflict report");
    assert_eq!(group.len(), expected);
}

#[then(regex = r#"^trip "([^"]+)" is tagged "([^"]+)"$"#)]
async fn then_trip_tagged(world: &mut FleetWorld, id: String, tag: String) {
    let alert = world
        .alerts
        .get(&TripId::from(id.as_str()))
        .expect("trip must have been evaluated");
    assert_eq!(alert.as_str(), tag);
}

#[then(regex = r"^(\d+) trips survive the intake$")]
async fn then_trips_survive(world: &mut FleetWorld, expected: usize) {
    assert!(world.payload_error.is_none());
    assert_eq!(world.trips.len(), expected);
}

#[then("the payload is rejected")]
async fn then_payload_rejected(world: &mut FleetWorld) {
    assert!(matches!(
        world.payload_error,
        Some(FleetError::InvalidPayload(_))
    ));
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,fleet=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();
    FleetWorld::cucumber()
        .fail_on_skipped()
        .with_default_cli()
        .run("tests/features")
        .await;
}
