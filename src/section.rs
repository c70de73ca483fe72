//! A generic view-model for one resource of the API
//!
//! Every section follows the same pattern: load the resource, submit a change, reload the resource.
//! [`ResourceView`] implements it once for any resource kind and payload type.

use std::sync::{Arc, Mutex, Weak};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::app::SessionContext;
use crate::resource::ResourceKind;
use crate::traits::Gateway;
use crate::utils::lock;
use crate::BoxError;


/// The outcome of a form submission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// The change has been sent, and the resource has been reloaded
    Saved,
    /// A required field was blank. Nothing has been sent
    Skipped,
}

/// Returns the trimmed value of a required field, or `None` if it is blank
pub fn required(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}


#[derive(Debug)]
struct ViewState<T> {
    data: Option<T>,
    /// Loads started but not finished yet
    in_flight: usize,
    /// Every load gets the next ticket when it starts
    next_ticket: u64,
    /// The ticket of the load `data` comes from. An older response never replaces it
    applied_ticket: Option<u64>,
}

impl<T> ViewState<T> {
    fn new() -> Self {
        Self { data: None, in_flight: 0, next_ticket: 0, applied_ticket: None }
    }

    fn start_load(&mut self) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight += 1;
        ticket
    }

    /// Returns whether `data` has been applied
    fn finish_load(&mut self, ticket: u64, data: Option<T>) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        let data = match data {
            None => return false,
            Some(d) => d,
        };
        if self.applied_ticket.map(|applied| ticket < applied).unwrap_or(false) {
            return false;
        }
        self.data = Some(data);
        self.applied_ticket = Some(ticket);
        true
    }
}

/// The local state of a section: the last successfully loaded value of a resource.
///
/// Failed loads are logged and leave the state as it was. Callers are never given an error for them,
/// they just keep seeing "not loaded yet" (or the previous data).
///
/// Loads may overlap. The view is loading as long as one of them is in flight, and the data always comes
/// from the most recently started load that succeeded, whatever the order the responses arrive in.
pub struct ResourceView<T, G> {
    ctx: SessionContext<G>,
    kind: ResourceKind,
    state: Arc<Mutex<ViewState<T>>>,
}

/// A [`ResourceView`] of a collection
pub type ResourceList<I, G> = ResourceView<Vec<I>, G>;

impl<T, G> ResourceView<T, G>
where
    T: DeserializeOwned + Clone + Send + 'static,
    G: Gateway + 'static,
{
    /// Create a view. Nothing is loaded until [`Self::load`] is called
    pub fn new(ctx: SessionContext<G>, kind: ResourceKind) -> Self {
        Self {
            ctx,
            kind,
            state: Arc::new(Mutex::new(ViewState::new())),
        }
    }

    pub fn ctx(&self) -> &SessionContext<G> { &self.ctx }
    pub fn kind(&self) -> ResourceKind      { self.kind }

    /// Whether a load is in flight
    pub fn is_loading(&self) -> bool {
        lock(&self.state).in_flight > 0
    }

    /// Whether something has been successfully loaded already
    pub fn is_loaded(&self) -> bool {
        lock(&self.state).data.is_some()
    }

    /// Returns a copy of the last loaded value
    pub fn data(&self) -> Option<T> {
        lock(&self.state).data.clone()
    }

    /// Run `f` on the last loaded value, without copying it
    pub fn with_data<R, F>(&self, f: F) -> R
    where
        F: FnOnce(Option<&T>) -> R,
    {
        let state = lock(&self.state);
        f(state.data.as_ref())
    }

    /// Fetch the resource, and replace the local state with it.
    pub async fn load(&self) {
        load_into(
            Arc::clone(self.ctx.gateway()),
            self.kind,
            self.ctx.user_id().to_string(),
            Arc::downgrade(&self.state),
        ).await
    }

    /// Same as [`Self::load`], but in the background.
    ///
    /// If this view has been dropped when the response arrives, the response is discarded.
    pub fn spawn_load(&self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(load_into(
            Arc::clone(self.ctx.gateway()),
            self.kind,
            self.ctx.user_id().to_string(),
            Arc::downgrade(&self.state),
        ))
    }

    /// Add an item to this resource, then reload it.
    ///
    /// The local state is not touched if the request fails.
    pub async fn create<B>(&self, body: &B) -> Result<(), BoxError>
    where
        B: Serialize + ?Sized,
    {
        crate::resource::create(&**self.ctx.gateway(), self.kind, body).await?;
        self.load().await;
        Ok(())
    }
}

impl<I, G> ResourceView<Vec<I>, G>
where
    I: Clone,
{
    /// The loaded items, or none if nothing has been loaded
    pub fn items(&self) -> Vec<I> {
        lock(&self.state).data.clone().unwrap_or_default()
    }

    /// The first `n` loaded items
    pub fn first(&self, n: usize) -> Vec<I> {
        lock(&self.state).data
            .as_ref()
            .map(|items| items.iter().take(n).cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        lock(&self.state).data.as_ref().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}


async fn load_into<T, G>(gateway: Arc<G>, kind: ResourceKind, user_id: String, state: Weak<Mutex<ViewState<T>>>)
where
    T: DeserializeOwned,
    G: Gateway,
{
    let ticket = match state.upgrade() {
        None => return,
        Some(s) => {
            let mut guard = lock(&s);
            guard.start_load()
        },
    };

    log::debug!("Loading {} for user {} (#{})", kind, user_id, ticket);
    let result = crate::resource::fetch::<T, G>(&*gateway, kind, &user_id).await;

    let state = match state.upgrade() {
        None => {
            log::debug!("The {} view is gone, discarding the response", kind);
            return;
        },
        Some(s) => s,
    };
    let mut guard = lock(&state);
    match result {
        Ok(data) => {
            if guard.finish_load(ticket, Some(data)) == false {
                log::debug!("A newer {} response is already displayed, discarding #{}", kind, ticket);
            }
        },
        Err(err) => {
            guard.finish_load(ticket, None);
            log::warn!("Unable to load {}: {}", kind, err);
        },
    }
}
