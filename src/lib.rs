//! This crate provides the client core of a personal life-management dashboard.
//!
//! Every piece of data lives in a remote JSON API, reached through a [`Gateway`](traits::Gateway).
//! The real implementation is the HTTP [`Client`](client::Client); an in-memory [`LocalGateway`](local::LocalGateway) can stand in for it (offline usage, tests).
//!
//! A user signs in through an [`App`](app::App), which owns the [`Session`](session::Session) and persists it in a durable [`Storage`](traits::Storage). \
//! The `App` then hands a [`SessionContext`](app::SessionContext) to every section view-model (see [`sections`]).
//!
//! The most involved one is the agenda: it builds a 6-week month [grid](calendar::build_grid) out of the loaded events,
//! and supports moving an event to another day while keeping its time of day and duration (see [`calendar::reschedule`]).

pub mod traits;
pub mod config;
pub mod utils;
pub mod timestamp;
pub use timestamp::Timestamp;

mod item;
pub use item::ItemId;
mod event;
pub use event::Event;
mod task;
pub use task::Task;
mod note;
pub use note::Note;
mod goal;
pub use goal::Goal;
mod contact;
pub use contact::Contact;
pub mod dashboard;
pub use dashboard::Dashboard;

pub mod resource;
pub mod client;
pub mod local;
pub mod session;
pub mod app;
pub mod section;
pub mod sections;
pub mod ai;
pub mod calendar;

#[cfg(any(test, feature = "local_gateway_mocks_remote"))]
pub mod mock_behaviour;

/// The error type used across this crate
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
