//! The agenda: a list of the upcoming events, and a month grid where they can be moved around

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::ai::{AiRelay, AiRequest};
use crate::app::SessionContext;
use crate::calendar::drag::{self, DataTransfer};
use crate::calendar::{self, CalendarGrid, EventUpdate, RescheduleIntent, YearMonth};
use crate::event::{Event, NewEvent};
use crate::resource::{self, ResourceKind};
use crate::section::{required, ResourceList, ResourceView, Submission};
use crate::traits::Gateway;
use crate::BoxError;

/// How many events the list shows
pub const UPCOMING_COUNT: usize = 10;
/// Shown until a weekly plan has been asked for
pub const PLAN_PLACEHOLDER: &str = "Click \"Weekly plan (AI)\" to generate one.";


/// What happened to a [`RescheduleIntent`]
#[derive(Clone, Debug, PartialEq)]
pub enum RescheduleOutcome {
    /// The event is not (or no longer) in the loaded list. Nothing has been sent
    NoOp,
    /// The event has been updated, and the events have been reloaded
    Updated(EventUpdate),
}

pub struct AgendaSection<G> {
    events: ResourceList<Event, G>,
    relay: AiRelay<G>,
}

impl<G: Gateway + 'static> AgendaSection<G> {
    pub fn new(ctx: SessionContext<G>) -> Self {
        Self {
            events: ResourceView::new(ctx.clone(), ResourceKind::Events),
            relay: AiRelay::new(ctx),
        }
    }

    pub fn view(&self) -> &ResourceList<Event, G> {
        &self.events
    }

    pub async fn load(&self) {
        self.events.load().await
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.items()
    }

    /// The first events of the list, in the order the API sent them
    pub fn upcoming(&self) -> Vec<Event> {
        self.events.first(UPCOMING_COUNT)
    }

    /// Build the grid of `month` out of the loaded events, and hand it to `f`
    pub fn with_grid<Tz, R, F>(&self, month: YearMonth, viewer: &Tz, f: F) -> R
    where
        Tz: TimeZone,
        F: FnOnce(&CalendarGrid) -> R,
    {
        self.events.with_data(|events| {
            let events = events.map(|e| e.as_slice()).unwrap_or(&[]);
            let grid = calendar::build_grid(events, month, viewer);
            f(&grid)
        })
    }

    /// Move an event to another day, keeping its time of day and duration.
    ///
    /// The new times are sent to the API, then the events are reloaded. The local list is never modified directly.
    /// If the update request fails, the error is returned and nothing is reloaded.
    pub async fn reschedule<Tz: TimeZone>(&self, intent: &RescheduleIntent, viewer: &Tz) -> Result<RescheduleOutcome, BoxError> {
        let update = self.events.with_data(|events| {
            calendar::reschedule(events.map(|e| e.as_slice()).unwrap_or(&[]), intent, viewer)
        });
        let update = match update {
            None => return Ok(RescheduleOutcome::NoOp),
            Some(u) => u,
        };

        log::debug!("Moving event {} to {}", update.id, intent.target_date);
        let gateway = self.events.ctx().gateway();
        resource::update(&**gateway, ResourceKind::Events, &update.id, &update).await?;
        self.events.load().await;
        Ok(RescheduleOutcome::Updated(update))
    }

    /// Handle a drop onto the day `target_date` of the grid.
    ///
    /// A drop that carries no event is ignored.
    pub async fn drop_onto<D, Tz>(&self, data: &D, target_date: NaiveDate, viewer: &Tz) -> Result<RescheduleOutcome, BoxError>
    where
        D: DataTransfer + ?Sized,
        Tz: TimeZone,
    {
        match drag::drop_intent(data, target_date) {
            None => Ok(RescheduleOutcome::NoOp),
            Some(intent) => self.reschedule(&intent, viewer).await,
        }
    }

    /// Add an event, then reload the events. A blank title is skipped
    pub async fn add_event(&self, title: &str, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Result<Submission, BoxError> {
        let title = match required(title) {
            None => return Ok(Submission::Skipped),
            Some(t) => t,
        };
        let body = NewEvent {
            user_id: self.events.ctx().user_id().to_string(),
            title: title.to_string(),
            start_time,
            end_time,
        };
        self.events.create(&body).await?;
        Ok(Submission::Saved)
    }

    /// Ask the AI for a plan of the week
    pub async fn weekly_plan(&self) -> Result<Value, BoxError> {
        self.relay.run(AiRequest::WeeklyPlan).await
    }

    /// The last weekly plan, ready to be displayed
    pub fn plan_text(&self) -> String {
        self.relay.render(PLAN_PLACEHOLDER)
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use serde_json::json;

    use crate::item::ItemId;
    use crate::local::LocalGateway;
    use crate::session::Session;
    use crate::utils::parse_timestamp;

    fn agenda(gateway: &Arc<LocalGateway>) -> AgendaSection<LocalGateway> {
        let session = Session { user_id: "u1".into(), name: "Demo".into(), email: "demo@user.com".into() };
        AgendaSection::new(SessionContext::new(session, Arc::clone(gateway)))
    }

    #[tokio::test]
    async fn grid_of_the_loaded_events() {
        let gateway = Arc::new(LocalGateway::new());
        gateway.insert_item("/events", json!({"_id": "e1", "title": "Dentist", "user_id": "u1",
            "start_time": "2024-03-05T14:00", "end_time": "2024-03-05T15:30"})).unwrap();
        let agenda = agenda(&gateway);

        let month = YearMonth::new(2024, 3).unwrap();
        let count = agenda.with_grid(month, &Utc, |grid| grid.cells().iter().map(|c| c.events().len()).sum::<usize>());
        assert_eq!(count, 0);

        agenda.load().await;
        let titles = agenda.with_grid(month, &Utc, |grid| {
            let cell = grid.cell(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()).unwrap();
            cell.events().iter().map(|e| e.title().to_string()).collect::<Vec<_>>()
        });
        assert_eq!(titles, vec!["Dentist"]);
    }

    #[tokio::test]
    async fn drop_an_event_onto_another_day() {
        let gateway = Arc::new(LocalGateway::new());
        gateway.insert_item("/events", json!({"_id": "e1", "title": "Dentist",
            "start_time": "2024-03-05T14:00", "end_time": "2024-03-05T15:30"})).unwrap();
        let agenda = agenda(&gateway);
        agenda.load().await;

        let (format, content) = drag::drag_start(&ItemId::from("e1"));
        let mut data = HashMap::new();
        data.insert(format.to_string(), content);
        let outcome = agenda.drop_onto(&data, NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(), &Utc).await.unwrap();
        assert!(matches!(outcome, RescheduleOutcome::Updated(_)));

        let events = agenda.events();
        assert_eq!(events[0].start_in(&Utc), parse_timestamp("2024-03-12T14:00").unwrap());

        // An empty drop does nothing
        gateway.clear_history();
        let outcome = agenda.drop_onto(&HashMap::<String, String>::new(), NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(), &Utc).await.unwrap();
        assert_eq!(outcome, RescheduleOutcome::NoOp);
        assert!(gateway.history().is_empty());
    }

    #[tokio::test]
    async fn add_event() {
        let gateway = Arc::new(LocalGateway::new());
        let agenda = agenda(&gateway);
        let start = parse_timestamp("2024-03-05T09:00").unwrap();
        let end = parse_timestamp("2024-03-05T10:00").unwrap();

        assert_eq!(agenda.add_event("  ", start, end).await.unwrap(), Submission::Skipped);
        assert!(gateway.history().is_empty());

        assert_eq!(agenda.add_event("Standup ", start, end).await.unwrap(), Submission::Saved);
        assert_eq!(gateway.history()[0].body, Some(json!({
            "user_id": "u1",
            "title": "Standup",
            "start_time": "2024-03-05T09:00:00.000Z",
            "end_time": "2024-03-05T10:00:00.000Z",
        })));
        assert_eq!(agenda.upcoming().len(), 1);
    }

    #[tokio::test]
    async fn weekly_plan() {
        let gateway = Arc::new(LocalGateway::new());
        let agenda = agenda(&gateway);
        assert_eq!(agenda.plan_text(), PLAN_PLACEHOLDER);

        gateway.set_reply("/ai/weekly-plan", json!({"monday": ["Deep work"]}));
        agenda.weekly_plan().await.unwrap();
        assert!(agenda.plan_text().contains("Deep work"));
    }
}
