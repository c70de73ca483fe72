//! Moving events around the month grid, against an in-memory API

use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate, Utc};
use serde_json::json;

use lifeboard::app::SessionContext;
use lifeboard::calendar::{RescheduleIntent, YearMonth};
use lifeboard::local::LocalGateway;
use lifeboard::sections::{AgendaSection, RescheduleOutcome};
use lifeboard::session::Session;
use lifeboard::utils::parse_timestamp;
use lifeboard::ItemId;

fn session() -> Session {
    Session { user_id: "u1".into(), name: "Demo".into(), email: "demo@user.com".into() }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn populated_gateway() -> Arc<LocalGateway> {
    let gateway = Arc::new(LocalGateway::new());
    gateway.insert_item("/events", json!({
        "_id": "e1",
        "user_id": "u1",
        "title": "Dentist",
        "start_time": "2024-03-05T14:00",
        "end_time": "2024-03-05T15:30",
    })).unwrap();
    gateway.insert_item("/events", json!({
        "_id": 7,
        "user_id": "u1",
        "title": "Team lunch",
        "start_time": "2024-03-29T12:00:00Z",
        "end_time": "2024-03-29T13:00:00Z",
    })).unwrap();
    gateway
}

#[tokio::test]
async fn march_2024_scenario() {
    let _ = env_logger::builder().is_test(true).try_init();

    let gateway = populated_gateway();
    let agenda = AgendaSection::new(SessionContext::new(session(), Arc::clone(&gateway)));
    agenda.load().await;

    let month = YearMonth::new(2024, 3).unwrap();
    agenda.with_grid(month, &Utc, |grid| {
        assert_eq!(grid.cells().len(), 42);
        assert_eq!(grid.first_day(), date(2024, 2, 26));
        assert_eq!(grid.last_day(), date(2024, 4, 7));

        let in_month: Vec<usize> = grid.cells().iter()
            .enumerate()
            .filter(|(_, c)| c.in_month())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(in_month, (4..35).collect::<Vec<_>>());

        let dentist = grid.cell(date(2024, 3, 5)).unwrap();
        assert_eq!(dentist.events().len(), 1);
        assert_eq!(dentist.events()[0].title(), "Dentist");
    });

    let outcome = agenda.reschedule(&RescheduleIntent::new(ItemId::from("e1"), date(2024, 3, 12)), &Utc).await.unwrap();
    let update = match outcome {
        RescheduleOutcome::Updated(u) => u,
        RescheduleOutcome::NoOp => panic!("The event should have been moved"),
    };
    assert_eq!(update.start_time, parse_timestamp("2024-03-12T14:00:00Z").unwrap());

    // One PATCH with only the new times, then a full reload
    let history = gateway.history();
    let methods: Vec<&str> = history.iter().map(|r| r.method).collect();
    assert_eq!(methods, vec!["GET", "PATCH", "GET"]);
    assert_eq!(history[1].path, "/events/e1");
    assert_eq!(history[1].body, Some(json!({
        "start_time": "2024-03-12T14:00:00.000Z",
        "end_time": "2024-03-12T15:30:00.000Z",
    })));

    agenda.with_grid(month, &Utc, |grid| {
        assert!(grid.cell(date(2024, 3, 5)).unwrap().events().is_empty());
        assert_eq!(grid.cell(date(2024, 3, 12)).unwrap().events()[0].title(), "Dentist");
    });
}

#[tokio::test]
async fn local_times_in_another_timezone() {
    let gateway = populated_gateway();
    let agenda = AgendaSection::new(SessionContext::new(session(), Arc::clone(&gateway)));
    agenda.load().await;
    let plus_one = FixedOffset::east_opt(3600).unwrap();

    // "2024-03-05T14:00" has no offset: it is 14:00 for this viewer too
    let month = YearMonth::new(2024, 3).unwrap();
    agenda.with_grid(month, &plus_one, |grid| {
        assert_eq!(grid.cell(date(2024, 3, 5)).unwrap().events()[0].title(), "Dentist");
    });

    let intent = RescheduleIntent::new(ItemId::from("e1"), date(2024, 3, 12));
    agenda.reschedule(&intent, &plus_one).await.unwrap();
    assert_eq!(gateway.history()[1].body, Some(json!({
        "start_time": "2024-03-12T13:00:00.000Z",
        "end_time": "2024-03-12T14:30:00.000Z",
    })));

    // The reloaded event is now an instant, still displayed at 14:00 local time on the 12th
    agenda.with_grid(month, &plus_one, |grid| {
        let moved = grid.cell(date(2024, 3, 12)).unwrap().events()[0];
        assert_eq!(moved.start_in(&plus_one).format("%H:%M").to_string(), "14:00");
    });
}

#[tokio::test]
async fn numeric_ids_are_matched_by_their_text() {
    let gateway = populated_gateway();
    let agenda = AgendaSection::new(SessionContext::new(session(), Arc::clone(&gateway)));
    agenda.load().await;

    let outcome = agenda.reschedule(&RescheduleIntent::new(ItemId::from("7"), date(2024, 4, 2)), &Utc).await.unwrap();
    assert!(matches!(outcome, RescheduleOutcome::Updated(_)));
    assert_eq!(gateway.history()[1].path, "/events/7");

    // The moved event now starts in April
    agenda.with_grid(YearMonth::new(2024, 4).unwrap(), &Utc, |grid| {
        let cell = grid.cell(date(2024, 4, 2)).unwrap();
        assert_eq!(cell.events()[0].title(), "Team lunch");
        assert!(cell.in_month());
    });
}

#[tokio::test]
async fn moving_an_unknown_event_sends_nothing() {
    let gateway = populated_gateway();
    let agenda = AgendaSection::new(SessionContext::new(session(), Arc::clone(&gateway)));
    agenda.load().await;
    gateway.clear_history();

    let intent = RescheduleIntent::new(ItemId::from("not-there"), date(2024, 3, 12));
    assert_eq!(agenda.reschedule(&intent, &Utc).await.unwrap(), RescheduleOutcome::NoOp);
    assert!(gateway.history().is_empty());
}

#[tokio::test]
async fn nothing_can_be_moved_before_loading() {
    let gateway = populated_gateway();
    let agenda = AgendaSection::new(SessionContext::new(session(), Arc::clone(&gateway)));

    let intent = RescheduleIntent::new(ItemId::from("e1"), date(2024, 3, 12));
    assert_eq!(agenda.reschedule(&intent, &Utc).await.unwrap(), RescheduleOutcome::NoOp);
    assert!(gateway.history().is_empty());
}

#[cfg(feature = "local_gateway_mocks_remote")]
#[tokio::test]
async fn failed_update_is_returned_and_nothing_is_reloaded() {
    use std::sync::Mutex;
    use lifeboard::mock_behaviour::MockBehaviour;

    let behaviour = Arc::new(Mutex::new(MockBehaviour {
        patch_behaviour: (0, 1),
        ..MockBehaviour::new()
    }));
    let gateway = LocalGateway::new().with_mock_behaviour(Arc::clone(&behaviour));
    gateway.insert_item("/events", json!({
        "_id": "e1", "title": "Dentist", "start_time": "2024-03-05T14:00", "end_time": "2024-03-05T15:30",
    })).unwrap();
    let gateway = Arc::new(gateway);

    let agenda = AgendaSection::new(SessionContext::new(session(), Arc::clone(&gateway)));
    agenda.load().await;

    let intent = RescheduleIntent::new(ItemId::from("e1"), date(2024, 3, 12));
    assert!(agenda.reschedule(&intent, &Utc).await.is_err());

    let methods: Vec<&str> = gateway.history().iter().map(|r| r.method).collect();
    assert_eq!(methods, vec!["GET", "PATCH"]);
    assert_eq!(agenda.events()[0].start_in(&Utc), parse_timestamp("2024-03-05T14:00").unwrap());

    // The next attempt goes through
    assert!(agenda.reschedule(&intent, &Utc).await.is_ok());
    assert_eq!(agenda.events()[0].start_in(&Utc), parse_timestamp("2024-03-12T14:00").unwrap());
}

#[cfg(not(feature = "local_gateway_mocks_remote"))]
#[test]
fn failed_update_is_returned_and_nothing_is_reloaded() {
    println!("WARNING: This test requires the \"integration_tests\" Cargo feature");
}
