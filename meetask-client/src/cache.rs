/// Remote-query cache
///
/// An explicit, injectable key → entry map that arbitrates every server
/// read the screens make. It deduplicates concurrent identical fetches,
/// caches successful results, supports invalidation after mutations, and
/// notifies subscribers so dependent screens can refetch.
///
/// # Ordering guarantees
///
/// - Concurrent fetches for the same key share one in-flight request;
///   joiners await the same result.
/// - `invalidate` bumps the entry's generation. A fetch that completes
///   after its generation was invalidated still delivers its value to the
///   callers that started it, but is never applied to the cache — a stale
///   in-flight read cannot overwrite fresher data.
/// - Fetches run on spawned tasks, so a caller that goes away mid-flight
///   (screen unmount) neither cancels other joiners nor applies anything
///   to unmounted state.
///
/// # Retry policy
///
/// A transport failure on the first attempt of a read is retried once
/// (configurable); any other failure is returned as-is. Failures are
/// shared with all joiners but never cached, so the next read refetches.
///
/// # Example
///
/// ```no_run
/// use meetask_client::cache::{QueryCache, QueryKey};
/// use meetask_shared::models::group::Group;
///
/// # async fn example(cache: QueryCache) -> Result<(), Box<dyn std::error::Error>> {
/// let groups = cache
///     .fetch(QueryKey::Groups, || async {
///         // issue the GET here
///         Ok(Vec::<Group>::new())
///     })
///     .await?;
/// println!("{} groups", groups.len());
/// # Ok(())
/// # }
/// ```
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, watch};

use crate::api::TaskListQuery;
use crate::error::{ClientError, ClientResult};

/// Cache key: resource plus its scoping identifiers
///
/// Filter parameters are part of the task-list key so a narrowed fetch
/// never aliases the full list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// `GET /groups`
    Groups,

    /// `GET /groups/:groupId/members`
    GroupMembers(i64),

    /// `GET /groups/:groupId/tasks` with its query parameters
    GroupTasks {
        /// Owning group
        group_id: i64,

        /// Server-side narrowing, `Default` for the full list
        query: TaskListQuery,
    },

    /// `GET /tasks/:taskId`
    Task(i64),

    /// `GET /tasks/:taskId/comments`
    TaskComments(i64),

    /// `GET /me`
    Me,
}

/// What happened to a cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheEventKind {
    /// A fetch completed and was applied
    Updated,

    /// The entry was marked stale; the next read refetches
    Invalidated,
}

/// Notification sent to subscribers when an entry changes
#[derive(Debug, Clone)]
pub struct CacheEvent {
    /// The entry concerned
    pub key: QueryKey,

    /// What happened to it
    pub kind: CacheEventKind,
}

type SharedValue = Arc<dyn Any + Send + Sync>;
type FetchOutcome = Result<SharedValue, ClientError>;
type ResultReceiver = watch::Receiver<Option<FetchOutcome>>;

struct Entry {
    /// Bumped on every invalidation; guards stale in-flight completions
    generation: u64,
    state: EntryState,
}

enum EntryState {
    /// No value and no fetch running
    Idle,

    /// A fetch is in flight; joiners wait on the channel
    Pending(ResultReceiver),

    /// Last applied fetch result
    Ready(SharedValue),
}

enum Plan {
    Hit(SharedValue),
    Join(ResultReceiver),
    Start {
        tx: watch::Sender<Option<FetchOutcome>>,
        rx: ResultReceiver,
        generation: u64,
    },
}

/// The single arbiter of read consistency across screens
#[derive(Clone)]
pub struct QueryCache {
    entries: Arc<Mutex<HashMap<QueryKey, Entry>>>,
    events: broadcast::Sender<CacheEvent>,
    retry_reads: bool,
}

impl Default for QueryCache {
    fn default() -> Self {
        QueryCache::new(true)
    }
}

impl QueryCache {
    /// Creates an empty cache
    ///
    /// `retry_reads` enables the single retry of a read that fails at the
    /// transport level.
    pub fn new(retry_reads: bool) -> Self {
        let (events, _) = broadcast::channel(64);
        QueryCache {
            entries: Arc::new(Mutex::new(HashMap::new())),
            events,
            retry_reads,
        }
    }

    /// Subscribes to entry change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    /// Returns the cached value for a key, without fetching
    pub fn get_cached<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let entries = self.lock();
        match entries.get(key) {
            Some(Entry {
                state: EntryState::Ready(value),
                ..
            }) => value.clone().downcast::<T>().ok(),
            _ => None,
        }
    }

    /// Fetches the value for a key, deduplicating concurrent calls
    ///
    /// Returns the cached value when fresh; otherwise either joins the
    /// in-flight request for the same key or starts a new one on a
    /// spawned task.
    ///
    /// # Errors
    ///
    /// Propagates the fetcher's error to every joiner. Errors are not
    /// cached.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> ClientResult<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        let plan = {
            let mut entries = self.lock();
            let entry = entries.entry(key.clone()).or_insert(Entry {
                generation: 0,
                state: EntryState::Idle,
            });

            match &entry.state {
                EntryState::Ready(value) => Plan::Hit(value.clone()),
                EntryState::Pending(rx) => Plan::Join(rx.clone()),
                EntryState::Idle => {
                    let (tx, rx) = watch::channel(None);
                    entry.state = EntryState::Pending(rx.clone());
                    Plan::Start {
                        tx,
                        rx,
                        generation: entry.generation,
                    }
                }
            }
        };

        match plan {
            Plan::Hit(value) => downcast::<T>(value),
            Plan::Join(rx) => join::<T>(rx).await,
            Plan::Start { tx, rx, generation } => {
                let cache = self.clone();
                let retry = self.retry_reads;
                let task_key = key.clone();

                tokio::spawn(async move {
                    let mut result = fetcher().await;
                    if retry && matches!(&result, Err(e) if e.is_transport()) {
                        tracing::debug!(key = ?task_key, "read failed at transport level, retrying once");
                        result = fetcher().await;
                    }

                    let outcome: FetchOutcome =
                        result.map(|value| Arc::new(value) as SharedValue);
                    cache.complete(&task_key, generation, &outcome);

                    // Joiners may all be gone; that is fine
                    let _ = tx.send(Some(outcome));
                });

                join::<T>(rx).await
            }
        }
    }

    /// Marks one entry stale and notifies subscribers
    ///
    /// The next read for the key refetches; an in-flight fetch started
    /// before the invalidation will not be applied.
    pub fn invalidate(&self, key: &QueryKey) {
        {
            let mut entries = self.lock();
            let entry = entries.entry(key.clone()).or_insert(Entry {
                generation: 0,
                state: EntryState::Idle,
            });
            entry.generation += 1;
            entry.state = EntryState::Idle;
        }

        tracing::debug!(key = ?key, "cache entry invalidated");
        let _ = self.events.send(CacheEvent {
            key: key.clone(),
            kind: CacheEventKind::Invalidated,
        });
    }

    /// Invalidates every task-list entry for a group, whatever its query
    /// parameters
    pub fn invalidate_group_tasks(&self, group_id: i64) {
        let keys: Vec<QueryKey> = {
            let entries = self.lock();
            entries
                .keys()
                .filter(|key| matches!(key, QueryKey::GroupTasks { group_id: g, .. } if *g == group_id))
                .cloned()
                .collect()
        };

        if keys.is_empty() {
            // Nothing cached yet; still invalidate the canonical full-list
            // key so subscribers hear about the mutation
            self.invalidate(&QueryKey::GroupTasks {
                group_id,
                query: TaskListQuery::default(),
            });
            return;
        }

        for key in keys {
            self.invalidate(&key);
        }
    }

    fn complete(&self, key: &QueryKey, generation: u64, outcome: &FetchOutcome) {
        let applied = {
            let mut entries = self.lock();
            match entries.get_mut(key) {
                Some(entry) if entry.generation == generation => {
                    match outcome {
                        Ok(value) => entry.state = EntryState::Ready(value.clone()),
                        // Errors are delivered to joiners but not cached
                        Err(_) => entry.state = EntryState::Idle,
                    }
                    outcome.is_ok()
                }
                // Invalidated (or dropped) while in flight: deliver to
                // waiters only, leave the entry alone
                _ => false,
            }
        };

        if applied {
            let _ = self.events.send(CacheEvent {
                key: key.clone(),
                kind: CacheEventKind::Updated,
            });
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<QueryKey, Entry>> {
        self.entries.lock().expect("query cache lock poisoned")
    }
}

fn downcast<T: Send + Sync + 'static>(value: SharedValue) -> ClientResult<Arc<T>> {
    value
        .downcast::<T>()
        .map_err(|_| ClientError::Decode("cached value has unexpected type".to_string()))
}

async fn join<T: Send + Sync + 'static>(mut rx: ResultReceiver) -> ClientResult<Arc<T>> {
    loop {
        let current = rx.borrow().clone();
        if let Some(outcome) = current {
            return match outcome {
                Ok(value) => downcast::<T>(value),
                Err(err) => Err(err),
            };
        }

        if rx.changed().await.is_err() {
            // Fetch task dropped without sending; behaves like a lost
            // connection
            return Err(ClientError::Transport(
                "fetch ended without a result".to_string(),
            ));
        }
    }
}
