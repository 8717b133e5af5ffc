//! End-to-end tests for the scheduled posting pipeline
//!
//! Drives the daily schedule, the rotation state machine and the publisher
//! together through the mock platform, with a simulated clock instead of
//! real sleeps.

use chrono::{DateTime, Local, TimeZone};
use libxpost::content::ContentDb;
use libxpost::platforms::mock::MockPlatform;
use libxpost::publisher::{Outcome, Publisher};
use libxpost::rotation::{RotationState, Tick};
use libxpost::scheduling::{parse_times, DailySchedule};

fn at(d: u32, h: u32, mi: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 4, d, h, mi, 0).unwrap()
}

fn sample_db() -> ContentDb {
    ContentDb::from_pairs(vec![
        ("tech", vec!["t1", "t2"]),
        ("quotes", vec!["q1"]),
    ])
}

/// One scheduled slot: tick the rotation and publish whatever comes out.
async fn fire_slot(
    state: &mut RotationState,
    db: &ContentDb,
    publisher: &Publisher,
) -> Option<Outcome> {
    match state.tick(db)? {
        Tick::Post { text, .. } => Some(publisher.publish(&text).await),
        Tick::Empty { .. } => None,
    }
}

#[tokio::test]
async fn rotation_publishes_round_robin_across_a_day() {
    let db = sample_db();
    let mut state = RotationState::new(&db);

    let platform = MockPlatform::success("x");
    let recorder = platform.recorder();
    let publisher = Publisher::new(Box::new(platform), false);

    let times = parse_times("09:00,12:00,15:00,18:00").unwrap();
    let mut schedule = DailySchedule::new(times, at(6, 8, 0));

    // Poll every 20 minutes for one day
    for step in 0..(24 * 3) {
        let now = at(6, 0, 0) + chrono::Duration::minutes(20 * step + 8 * 60);
        for _ in schedule.due(now) {
            fire_slot(&mut state, &db, &publisher).await;
        }
    }

    // Four slots fired: tech/quotes alternate, tech's cursor advanced
    // after each completed rotation, quotes wrapped on its single post
    assert_eq!(
        recorder.posted_content_list(),
        vec!["t1", "q1", "t2", "q1"]
    );
}

#[tokio::test]
async fn empty_category_slot_publishes_nothing_but_rotation_moves_on() {
    let db = ContentDb::from_pairs(vec![("quiet", vec![]), ("loud", vec!["l1"])]);
    let mut state = RotationState::new(&db);

    let platform = MockPlatform::success("x");
    let recorder = platform.recorder();
    let publisher = Publisher::new(Box::new(platform), false);

    // First slot hits the empty category: nothing published
    assert_eq!(fire_slot(&mut state, &db, &publisher).await, None);
    // Second slot publishes from the non-empty one
    assert!(matches!(
        fire_slot(&mut state, &db, &publisher).await,
        Some(Outcome::Posted { .. })
    ));

    assert_eq!(recorder.posted_content_list(), vec!["l1"]);
}

#[tokio::test]
async fn dry_run_schedule_makes_no_platform_calls() {
    let db = sample_db();
    let mut state = RotationState::new(&db);

    let platform = MockPlatform::success("x");
    let recorder = platform.recorder();
    let publisher = Publisher::new(Box::new(platform), true);

    for _ in 0..10 {
        let outcome = fire_slot(&mut state, &db, &publisher).await;
        assert!(matches!(outcome, Some(Outcome::DryRun)));
    }

    assert_eq!(recorder.post_call_count(), 0);
}

#[tokio::test]
async fn publish_failure_does_not_stall_the_rotation() {
    let db = sample_db();
    let mut state = RotationState::new(&db);

    let publisher = Publisher::new(Box::new(MockPlatform::post_failure("x", "boom")), false);

    // Every slot fails remotely; the rotation still advances and later
    // ticks still produce the expected posts
    for _ in 0..4 {
        let outcome = fire_slot(&mut state, &db, &publisher).await;
        assert!(matches!(outcome, Some(Outcome::Failed { .. })));
    }

    // After two full rotations the state is back where it started
    assert_eq!(state.cursor("tech"), Some(0));
    assert_eq!(state.cursor("quotes"), Some(0));
    assert_eq!(state.current_slot(), 0);
}

#[tokio::test]
async fn immediate_selection_feeds_the_publisher() {
    let db = sample_db();
    let platform = MockPlatform::success("x");
    let recorder = platform.recorder();
    let publisher = Publisher::new(Box::new(platform), false);

    let text = db.select("tech", Some(1)).unwrap().to_string();
    let outcome = publisher.publish(&text).await;

    assert!(matches!(outcome, Outcome::Posted { .. }));
    assert_eq!(recorder.posted_content_list(), vec!["t2"]);
}
