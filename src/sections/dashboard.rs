//! The daily overview

use crate::app::SessionContext;
use crate::dashboard::{Dashboard, Habit, UpcomingEvent};
use crate::resource::ResourceKind;
use crate::section::ResourceView;
use crate::task::Task;
use crate::traits::Gateway;

/// How many tasks, habits and events are shown
pub const DISPLAY_COUNT: usize = 5;

pub struct DashboardSection<G> {
    view: ResourceView<Dashboard, G>,
}

impl<G: Gateway + 'static> DashboardSection<G> {
    pub fn new(ctx: SessionContext<G>) -> Self {
        Self { view: ResourceView::new(ctx, ResourceKind::Dashboard) }
    }

    pub fn view(&self) -> &ResourceView<Dashboard, G> {
        &self.view
    }

    pub async fn load(&self) {
        self.view.load().await
    }

    /// The whole overview, if it has been loaded
    pub fn dashboard(&self) -> Option<Dashboard> {
        self.view.data()
    }

    pub fn recommendations(&self) -> Vec<String> {
        self.view.with_data(|d| d.map(|d| d.recommendations.clone()).unwrap_or_default())
    }

    /// The alerts, as they are displayed
    pub fn alert_labels(&self) -> Vec<String> {
        self.view.with_data(|d| {
            d.map(|d| d.alerts.iter().map(|a| a.label()).collect())
                .unwrap_or_default()
        })
    }

    pub fn today_tasks(&self) -> Vec<Task> {
        self.view.with_data(|d| d.map(|d| first(&d.tasks)).unwrap_or_default())
    }

    pub fn habits(&self) -> Vec<Habit> {
        self.view.with_data(|d| d.map(|d| first(&d.habits)).unwrap_or_default())
    }

    pub fn upcoming_events(&self) -> Vec<UpcomingEvent> {
        self.view.with_data(|d| d.map(|d| first(&d.events)).unwrap_or_default())
    }
}

fn first<T: Clone>(items: &[T]) -> Vec<T> {
    items.iter().take(DISPLAY_COUNT).cloned().collect()
}
