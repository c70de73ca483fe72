//! The view-models of the dashboard sections
//!
//! Each section is a thin layer over one or several [`ResourceView`](crate::section::ResourceView)s
//! (and possibly an [`AiRelay`](crate::ai::AiRelay)), that adds what this section displays.
//! They are all built from a [`SessionContext`](crate::app::SessionContext), and load nothing until asked to.

pub mod dashboard;
pub mod agenda;
pub mod tasks;
pub mod goals;
pub mod contacts;
pub mod notes;
pub mod assistant;

pub use dashboard::DashboardSection;
pub use agenda::{AgendaSection, RescheduleOutcome};
pub use tasks::TasksSection;
pub use goals::GoalsSection;
pub use contacts::ContactsSection;
pub use notes::NotesSection;
pub use assistant::AssistantSection;
