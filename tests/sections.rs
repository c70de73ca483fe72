//! Sections driven from sign-in to display, against an in-memory API and a broken one

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use lifeboard::app::{App, SessionContext};
use lifeboard::local::LocalGateway;
use lifeboard::section::Submission;
use lifeboard::sections::{
    AgendaSection, ContactsSection, DashboardSection, GoalsSection, NotesSection, TasksSection,
};
use lifeboard::session::{FileStorage, Session};
use lifeboard::traits::Gateway;
use lifeboard::BoxError;


/// A gateway that cannot reach anything
struct OfflineGateway;

#[async_trait]
impl Gateway for OfflineGateway {
    async fn get(&self, path: &str, _query: &[(&str, &str)]) -> Result<Value, BoxError> {
        Err(format!("Unable to reach {}", path).into())
    }
    async fn post(&self, path: &str, _body: &Value) -> Result<Value, BoxError> {
        Err(format!("Unable to reach {}", path).into())
    }
    async fn patch(&self, path: &str, _body: &Value) -> Result<Value, BoxError> {
        Err(format!("Unable to reach {}", path).into())
    }
}

fn offline_context() -> SessionContext<OfflineGateway> {
    let session = Session { user_id: "u1".into(), name: "Demo".into(), email: "demo@user.com".into() };
    SessionContext::new(session, Arc::new(OfflineGateway))
}


#[tokio::test]
async fn session_survives_a_restart() {
    let _ = env_logger::builder().is_test(true).try_init();
    let folder = tempfile::tempdir().unwrap();

    let gateway = Arc::new(LocalGateway::new());
    gateway.set_reply("/auth/login", json!({"user_id": 12, "name": "Demo", "email": "demo@user.com"}));

    let mut app = App::new(Arc::clone(&gateway), FileStorage::new(folder.path()));
    assert!(app.is_authenticated() == false);
    app.login("Demo", "demo@user.com").await.unwrap();

    // Another run of the application
    let app = App::new(Arc::clone(&gateway), FileStorage::new(folder.path()));
    let ctx = app.context().unwrap();
    assert_eq!(ctx.user_id(), "12");

    let tasks = TasksSection::new(ctx);
    tasks.load().await;
    assert_eq!(gateway.history()[1].query, vec![("user_id".to_string(), "12".to_string())]);

    let mut app = app;
    app.logout();
    let app = App::new(Arc::clone(&gateway), FileStorage::new(folder.path()));
    assert!(app.context().is_none());
}

#[tokio::test]
async fn corrupted_session_reads_as_signed_out() {
    use lifeboard::traits::Storage;

    let folder = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(folder.path());
    storage.set_item("user", "{\"user_id\": ").unwrap();

    let app = App::new(Arc::new(LocalGateway::new()), storage);
    assert!(app.is_authenticated() == false);
}

#[tokio::test]
async fn offline_sections_stay_empty() {
    let _ = env_logger::builder().is_test(true).try_init();

    let dashboard = DashboardSection::new(offline_context());
    dashboard.load().await;
    assert!(dashboard.dashboard().is_none());
    assert!(dashboard.today_tasks().is_empty());
    assert!(dashboard.view().is_loading() == false);

    let agenda = AgendaSection::new(offline_context());
    agenda.load().await;
    assert!(agenda.upcoming().is_empty());
    assert!(agenda.view().is_loaded() == false);

    let goals = GoalsSection::new(offline_context());
    goals.load().await;
    assert_eq!(goals.overall_progress(), 0);

    let contacts = ContactsSection::new(offline_context());
    contacts.view().spawn_load().await.unwrap();
    assert!(contacts.entries().is_empty());
}

#[tokio::test]
async fn offline_mutations_return_their_error() {
    let tasks = TasksSection::new(offline_context());
    assert!(tasks.add_task("Call the bank").await.is_err());
    assert!(tasks.prioritize().await.is_err());
    assert!(tasks.tasks().is_empty());

    // Blank submissions do not even try
    assert_eq!(tasks.add_task("").await.unwrap(), Submission::Skipped);

    let notes = NotesSection::new(offline_context());
    assert!(notes.add_note("Title", "Content").await.is_err());
    assert!(notes.newest_first().is_empty());
}

#[tokio::test]
async fn load_failure_keeps_the_previous_data() {
    use std::sync::Mutex;

    /// Serves some notes once, then fails
    struct FlakyGateway {
        inner: LocalGateway,
        served: Mutex<bool>,
    }

    #[async_trait]
    impl Gateway for FlakyGateway {
        async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, BoxError> {
            let already_served = {
                let mut served = self.served.lock().unwrap();
                std::mem::replace(&mut *served, true)
            };
            if already_served {
                return Err("Connection reset".into());
            }
            self.inner.get(path, query).await
        }
        async fn post(&self, path: &str, body: &Value) -> Result<Value, BoxError> {
            self.inner.post(path, body).await
        }
        async fn patch(&self, path: &str, body: &Value) -> Result<Value, BoxError> {
            self.inner.patch(path, body).await
        }
    }

    let inner = LocalGateway::new();
    inner.insert_item("/notes", json!({"title": "Kept", "content": "Still here"})).unwrap();
    let gateway = Arc::new(FlakyGateway { inner, served: Mutex::new(false) });
    let session = Session { user_id: "u1".into(), name: "Demo".into(), email: "demo@user.com".into() };
    let notes = NotesSection::new(SessionContext::new(session, gateway));

    notes.load().await;
    assert_eq!(notes.newest_first().len(), 1);

    // The note is stored, but the reload fails: the previous list is still displayed
    assert_eq!(notes.add_note("New", "Not reloaded").await.unwrap(), Submission::Saved);
    let titles: Vec<String> = notes.newest_first().iter().map(|n| n.title().to_string()).collect();
    assert_eq!(titles, vec!["Kept"]);
}
