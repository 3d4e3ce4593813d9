//! Query-cache synchronization layer.
//!
//! Every list read and every mutation in the console flows through this one
//! object. Reads are keyed by resource name plus all parameters that affect
//! the result; identical concurrent reads share one in-flight request; fresh
//! entries are served without touching the network. A confirmed mutation
//! invalidates every cached read for its resource regardless of parameters,
//! tracks a pending marker so duplicate submissions for the same record are
//! rejected, and emits a settlement notice for user-facing feedback.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{broadcast, watch};

use crate::errors::AppError;

/// Resource names, the coarse half of every cache key. Invalidation is by
/// resource: any write to a resource stales every cached read for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Brands,
    Models,
    Cars,
    Enquiries,
    SellRequests,
    ScrapRequests,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Brands => "brands",
            Resource::Models => "models",
            Resource::Cars => "cars",
            Resource::Enquiries => "enquiries",
            Resource::SellRequests => "sell-requests",
            Resource::ScrapRequests => "scrap-requests",
        }
    }
}

/// Composite identity of one cached read: resource name plus every parameter
/// that changes the result (page, limit, search term, type filter).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: Resource,
    pub params: String,
}

impl QueryKey {
    pub fn new(resource: Resource, params: impl Into<String>) -> Self {
        Self {
            resource,
            params: params.into(),
        }
    }
}

/// Identity and display label of a mutation, used for pending markers and
/// settlement notices.
#[derive(Debug, Clone)]
pub struct MutationAction {
    pub resource: Resource,
    /// Record id, or `"new"` for creates
    pub target: String,
    /// Action name surfaced in notifications ("Delete brand")
    pub label: String,
}

impl MutationAction {
    pub fn new(resource: Resource, target: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            resource,
            target: target.into(),
            label: label.into(),
        }
    }
}

/// Notice emitted when a mutation settles. UI feedback (toasts) hangs off
/// this channel, never off the raw network future.
#[derive(Debug, Clone)]
pub struct MutationNotice {
    pub resource: Resource,
    pub target: String,
    pub label: String,
    pub error: Option<AppError>,
}

impl MutationNotice {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

struct Entry {
    value: serde_json::Value,
    fetched_at: Instant,
    stale: bool,
}

#[derive(Clone)]
enum FetchState {
    Pending,
    Done(Result<serde_json::Value, AppError>),
}

#[derive(Default)]
struct Inner {
    entries: HashMap<QueryKey, Entry>,
    in_flight: HashMap<QueryKey, watch::Receiver<FetchState>>,
    /// Ticket of the newest fetch per key; a completed fetch only stores its
    /// result while it still holds the newest ticket.
    latest_fetch: HashMap<QueryKey, u64>,
    /// Bumped per invalidation; a fetch started before the bump lands stale.
    epochs: HashMap<Resource, u64>,
    pending: HashMap<(Resource, String), String>,
    next_ticket: u64,
}

/// The query cache. One instance per client; cheap to share behind `Arc`.
pub struct QueryCache {
    inner: Mutex<Inner>,
    notices: broadcast::Sender<MutationNotice>,
    ttl: Duration,
}

enum Plan {
    Hit(serde_json::Value),
    Join(watch::Receiver<FetchState>),
    Fetch {
        ticket: u64,
        epoch: u64,
        tx: watch::Sender<FetchState>,
    },
}

impl QueryCache {
    /// Create a cache whose entries stay fresh for `ttl` after a fetch.
    pub fn new(ttl: Duration) -> Self {
        let (notices, _) = broadcast::channel(64);
        Self {
            inner: Mutex::new(Inner::default()),
            notices,
            ttl,
        }
    }

    /// Read-through query. `fetch` must be idempotent and side-effect-free;
    /// it runs at most once per cache miss, shared across concurrent callers
    /// with the same key.
    pub async fn query<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<T, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let plan = {
            let mut inner = self.inner.lock().unwrap();

            let fresh = inner
                .entries
                .get(&key)
                .filter(|e| !e.stale && e.fetched_at.elapsed() < self.ttl)
                .map(|e| e.value.clone());

            if let Some(value) = fresh {
                Plan::Hit(value)
            } else if let Some(rx) = inner.in_flight.get(&key) {
                Plan::Join(rx.clone())
            } else {
                inner.next_ticket += 1;
                let ticket = inner.next_ticket;
                inner.latest_fetch.insert(key.clone(), ticket);
                let epoch = inner.epochs.get(&key.resource).copied().unwrap_or(0);
                let (tx, rx) = watch::channel(FetchState::Pending);
                inner.in_flight.insert(key.clone(), rx);
                Plan::Fetch { ticket, epoch, tx }
            }
        };

        match plan {
            Plan::Hit(value) => {
                tracing::debug!("Cache hit for {}?{}", key.resource.as_str(), key.params);
                Ok(serde_json::from_value(value)?)
            }
            Plan::Join(rx) => Self::join(rx).await,
            Plan::Fetch { ticket, epoch, tx } => {
                // If this future is dropped mid-fetch the guard unregisters
                // the in-flight slot, so later reads start a fresh request
                // instead of joining a dead channel.
                let mut guard = FetchGuard {
                    cache: self,
                    key: key.clone(),
                    ticket,
                    settled: false,
                };

                let result = fetch().await;

                let shared = match &result {
                    Ok(data) => serde_json::to_value(data).map_err(AppError::from),
                    Err(e) => Err(e.clone()),
                };

                {
                    let mut inner = self.inner.lock().unwrap();
                    if inner.latest_fetch.get(&key) == Some(&ticket) {
                        inner.in_flight.remove(&key);
                        inner.latest_fetch.remove(&key);
                        if let Ok(value) = &shared {
                            // An invalidation that raced this fetch means the
                            // response may predate the write: store it stale.
                            let stale =
                                inner.epochs.get(&key.resource).copied().unwrap_or(0) != epoch;
                            inner.entries.insert(
                                key.clone(),
                                Entry {
                                    value: value.clone(),
                                    fetched_at: Instant::now(),
                                    stale,
                                },
                            );
                        }
                    }
                }
                guard.settled = true;

                let _ = tx.send(FetchState::Done(shared));
                result
            }
        }
    }

    async fn join<T: DeserializeOwned>(mut rx: watch::Receiver<FetchState>) -> Result<T, AppError> {
        loop {
            let state = rx.borrow().clone();
            if let FetchState::Done(result) = state {
                let value = result?;
                return Ok(serde_json::from_value(value)?);
            }
            if rx.changed().await.is_err() {
                // The owning fetch was dropped before completing
                return Err(AppError::Transport("Request was cancelled".to_string()));
            }
        }
    }

    /// Mark every cached read for `resource` stale, whatever its parameters.
    pub fn invalidate(&self, resource: Resource) {
        let mut inner = self.inner.lock().unwrap();
        *inner.epochs.entry(resource).or_insert(0) += 1;

        let mut count = 0;
        for (key, entry) in inner.entries.iter_mut() {
            if key.resource == resource && !entry.stale {
                entry.stale = true;
                count += 1;
            }
        }
        tracing::debug!("Invalidated {} cached reads for {}", count, resource.as_str());
    }

    /// Whether a mutation for this record is currently outstanding. Drives
    /// per-row disabled/loading affordances.
    pub fn is_pending(&self, resource: Resource, target: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .pending
            .contains_key(&(resource, target.to_string()))
    }

    /// Run a mutation with pending-marker bookkeeping.
    ///
    /// The marker is set before `run` is polled and cleared when the mutation
    /// settles, including when the future is dropped mid-flight. A second
    /// mutation for the same `(resource, target)` is rejected while the first
    /// is outstanding. The resource is invalidated only on confirmed success.
    pub async fn mutate<T, F, Fut>(&self, action: MutationAction, run: F) -> Result<T, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        {
            let mut inner = self.inner.lock().unwrap();
            let slot = (action.resource, action.target.clone());
            if inner.pending.contains_key(&slot) {
                return Err(AppError::ActionInFlight {
                    action: action.label.clone(),
                    target: action.target.clone(),
                });
            }
            inner.pending.insert(slot, action.label.clone());
        }
        let _guard = PendingGuard {
            cache: self,
            resource: action.resource,
            target: action.target.clone(),
        };

        let result = run().await;

        match &result {
            Ok(_) => {
                self.invalidate(action.resource);
                tracing::info!("{} succeeded", action.label);
            }
            Err(e) => {
                tracing::warn!("{} failed: {}", action.label, e);
            }
        }

        let _ = self.notices.send(MutationNotice {
            resource: action.resource,
            target: action.target,
            label: action.label,
            error: result.as_ref().err().cloned(),
        });

        result
    }

    /// Subscribe to mutation settlement notices.
    pub fn subscribe_notices(&self) -> broadcast::Receiver<MutationNotice> {
        self.notices.subscribe()
    }
}

/// Unregisters an abandoned in-flight fetch so the key is not wedged.
struct FetchGuard<'a> {
    cache: &'a QueryCache,
    key: QueryKey,
    ticket: u64,
    settled: bool,
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        if let Ok(mut inner) = self.cache.inner.lock() {
            if inner.latest_fetch.get(&self.key) == Some(&self.ticket) {
                inner.in_flight.remove(&self.key);
                inner.latest_fetch.remove(&self.key);
            }
        }
    }
}

/// Clears the pending marker on settlement, including drop mid-flight.
struct PendingGuard<'a> {
    cache: &'a QueryCache,
    resource: Resource,
    target: String,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.cache.inner.lock() {
            inner
                .pending
                .remove(&(self.resource, std::mem::take(&mut self.target)));
        }
    }
}
