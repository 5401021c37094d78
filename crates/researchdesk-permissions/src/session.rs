//! Per-session owner of the in-memory permission table.
//!
//! A [`PermissionSession`] is built once when a UI session (or the service)
//! starts and torn down with [`PermissionSession::close`]. It keeps the
//! authoritative in-memory table and mirrors it to a [`PermissionStore`].
//!
//! Startup:
//! 1. load the table from the store;
//! 2. on a load failure, a malformed response or zero records, use the
//!    generated defaults and try to seed the store with them (a failed seed
//!    is logged, the defaults are still used);
//! 3. otherwise use the loaded records verbatim, without topping up missing
//!    pairs from the defaults.
//!
//! Updates replace the in-memory table immediately, then persist the whole
//! table in a background task. Save failures are logged and never roll the
//! in-memory table back. Every save carries a generation number and a save
//! never overwrites a newer one that already reached the store.
//!
//! All mutations (`update`, `set_access_level`, `reset_to_defaults`, `save`
//! and `reload`) hold one edit lock from reading the current table until
//! the new one is installed and its generation assigned. Edits never start
//! from a stale snapshot, and generation order is install order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use metrics::counter;
use researchdesk_config::NavigationConfig;
use researchdesk_models::{AccessDecision, AccessLevel, MenuEntry, NavigationPermission};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::defaults::generate_defaults;
use crate::error::{SessionError, StoreError, TableError};
use crate::resolver::PermissionResolver;
use crate::store::PermissionStore;

/// Where the current in-memory table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableOrigin {
    /// Loaded from the store.
    Store { records: usize },
    /// Generated defaults; `seeded` tells whether the store accepted them.
    Defaults { seeded: bool },
    /// Changed in this session since the last load.
    Local,
}

struct SessionState {
    resolver: Arc<PermissionResolver>,
    origin: TableOrigin,
}

pub struct PermissionSession {
    store: Arc<dyn PermissionStore>,
    fallback: AccessLevel,
    state: RwLock<SessionState>,
    pending_saves: Mutex<Vec<JoinHandle<()>>>,
    generation: AtomicU64,
    persisted_generation: Arc<tokio::sync::Mutex<u64>>,
    edits: tokio::sync::Mutex<()>,
}

impl std::fmt::Debug for PermissionSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionSession")
            .field("backend", &self.store.backend())
            .field("fallback", &self.fallback)
            .field("origin", &self.origin())
            .finish_non_exhaustive()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn failure_counter(operation: &'static str, err: &StoreError) {
    counter!(
        "navigation_permission_store_failures_total",
        "operation" => operation,
        "kind" => err.kind()
    )
    .increment(1);
}

/// Startup protocol. Never fails: every degraded path ends on the defaults.
async fn load_or_seed(
    store: &dyn PermissionStore,
    fallback: AccessLevel,
) -> (PermissionResolver, TableOrigin) {
    let backend = store.backend();

    match store.load().await {
        Ok(records) if !records.is_empty() => {
            let count = records.len();
            match PermissionResolver::new(records, fallback) {
                Ok(resolver) => {
                    info!(backend, records = count, "Loaded navigation permissions");
                    return (resolver, TableOrigin::Store { records: count });
                }
                Err(err) => {
                    warn!(backend, error = %err, "Stored permissions rejected, using defaults");
                    counter!(
                        "navigation_permission_store_failures_total",
                        "operation" => "load",
                        "kind" => "malformed"
                    )
                    .increment(1);
                }
            }
        }
        Ok(_) => {
            info!(backend, "Permission store is empty, seeding defaults");
        }
        Err(err) if err.is_malformed() => {
            warn!(backend, error = %err, "Malformed permission store response, seeding defaults");
            failure_counter("load", &err);
        }
        Err(err) => {
            warn!(backend, error = %err, "Permission store unavailable, using defaults");
            failure_counter("load", &err);
        }
    }

    let defaults = generate_defaults();
    let seeded = match store.bulk_save(&defaults).await {
        Ok(()) => {
            info!(backend, records = defaults.len(), "Seeded default navigation permissions");
            counter!("navigation_permission_seeds_total").increment(1);
            true
        }
        Err(err) => {
            warn!(backend, error = %err, "Seeding default permissions failed, continuing in memory");
            failure_counter("seed", &err);
            false
        }
    };

    (
        PermissionResolver::from_unique(defaults, fallback),
        TableOrigin::Defaults { seeded },
    )
}

/// Write one generation of the table unless a newer one already landed.
/// Returns `Ok(false)` when the save was skipped as stale.
async fn persist_generation(
    store: &dyn PermissionStore,
    persisted_generation: &tokio::sync::Mutex<u64>,
    generation: u64,
    records: &[NavigationPermission],
) -> Result<bool, StoreError> {
    let mut persisted = persisted_generation.lock().await;
    if *persisted > generation {
        debug!(generation, persisted = *persisted, "Skipping stale permission save");
        return Ok(false);
    }

    store.bulk_save(records).await?;
    *persisted = generation;
    counter!("navigation_permission_saves_total").increment(1);
    Ok(true)
}

impl PermissionSession {
    /// Build a session, running the startup protocol against `store`.
    pub async fn start(store: Arc<dyn PermissionStore>, config: &NavigationConfig) -> Self {
        let fallback = config.fallback_access;
        let (resolver, origin) = load_or_seed(store.as_ref(), fallback).await;

        Self {
            store,
            fallback,
            state: RwLock::new(SessionState {
                resolver: Arc::new(resolver),
                origin,
            }),
            pending_saves: Mutex::new(Vec::new()),
            generation: AtomicU64::new(0),
            persisted_generation: Arc::new(tokio::sync::Mutex::new(0)),
            edits: tokio::sync::Mutex::new(()),
        }
    }

    /// Re-run the startup protocol and swap the result in.
    pub async fn reload(&self) -> TableOrigin {
        let _edit = self.edits.lock().await;
        let (resolver, origin) = load_or_seed(self.store.as_ref(), self.fallback).await;
        self.install(resolver, origin);
        origin
    }

    /// Current table snapshot. Cheap to clone and safe to hold across edits.
    pub fn resolver(&self) -> Arc<PermissionResolver> {
        Arc::clone(&self.read_state().resolver)
    }

    pub fn origin(&self) -> TableOrigin {
        self.read_state().origin
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    pub fn records(&self) -> Vec<NavigationPermission> {
        self.resolver().records().to_vec()
    }

    pub fn access_level(&self, job_title: &str, navigation_item: &str) -> AccessLevel {
        self.resolver().access_level(job_title, navigation_item)
    }

    pub fn can_view(&self, job_title: &str, navigation_item: &str) -> bool {
        self.access_level(job_title, navigation_item).can_view()
    }

    pub fn can_edit(&self, job_title: &str, navigation_item: &str) -> bool {
        self.access_level(job_title, navigation_item).can_edit()
    }

    pub fn is_hidden(&self, job_title: &str, navigation_item: &str) -> bool {
        self.access_level(job_title, navigation_item).is_hidden()
    }

    pub fn is_read_only(&self, job_title: &str, navigation_item: &str) -> bool {
        self.access_level(job_title, navigation_item).is_read_only()
    }

    pub fn decision(&self, job_title: &str, navigation_item: &str) -> AccessDecision {
        self.resolver().decision(job_title, navigation_item)
    }

    pub fn menu(&self, job_title: &str) -> Vec<MenuEntry> {
        self.resolver().menu(job_title)
    }

    /// Replace the whole table in memory and persist it in the background.
    ///
    /// A table that fails [`check_table`](crate::resolver::check_table) is
    /// refused and nothing changes.
    pub async fn update(&self, records: Vec<NavigationPermission>) -> Result<(), TableError> {
        let resolver = PermissionResolver::new(records, self.fallback)?;
        let _edit = self.edits.lock().await;
        self.install_and_persist(resolver);
        Ok(())
    }

    /// Set one pair and persist the whole resulting table in the background.
    pub async fn set_access_level(
        &self,
        job_title: &str,
        navigation_item: &str,
        access_level: AccessLevel,
    ) -> Result<AccessDecision, TableError> {
        let _edit = self.edits.lock().await;
        let resolver =
            self.resolver()
                .with_access_level(job_title, navigation_item, access_level)?;
        self.install_and_persist(resolver);
        Ok(AccessDecision::new(job_title, navigation_item, access_level))
    }

    /// Regenerate the defaults, install them and persist them in the
    /// background. Returns the number of records.
    pub async fn reset_to_defaults(&self) -> usize {
        let resolver = PermissionResolver::from_unique(generate_defaults(), self.fallback);
        let count = resolver.len();
        info!(records = count, "Resetting navigation permissions to defaults");
        let _edit = self.edits.lock().await;
        self.install_and_persist(resolver);
        count
    }

    /// Persist the whole table and wait for the store to confirm, then
    /// install it in memory. On failure the in-memory table is untouched.
    ///
    /// Used for explicit user-initiated saves whose failure must be reported.
    pub async fn save(&self, records: Vec<NavigationPermission>) -> Result<usize, SessionError> {
        let resolver = PermissionResolver::new(records, self.fallback)?;
        // Held across the store write; background edits queue behind it.
        let _edit = self.edits.lock().await;
        let generation = self.next_generation();

        if let Err(err) = persist_generation(
            self.store.as_ref(),
            &self.persisted_generation,
            generation,
            resolver.records(),
        )
        .await
        {
            failure_counter("save", &err);
            return Err(err.into());
        }

        let count = resolver.len();
        self.install(resolver, TableOrigin::Local);
        info!(records = count, "Saved navigation permissions");
        Ok(count)
    }

    /// Wait for every background save started so far.
    pub async fn flush(&self) {
        let pending = std::mem::take(&mut *lock(&self.pending_saves));
        for handle in pending {
            if let Err(err) = handle.await {
                warn!(error = %err, "Permission save task did not complete");
            }
        }
    }

    /// Explicit teardown: let in-flight saves finish, then drop the session.
    pub async fn close(self) {
        self.flush().await;
        debug!(backend = self.store.backend(), "Permission session closed");
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn install(&self, resolver: PermissionResolver, origin: TableOrigin) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.resolver = Arc::new(resolver);
        state.origin = origin;
    }

    /// Caller holds the edit lock.
    fn install_and_persist(&self, resolver: PermissionResolver) {
        let records = resolver.records().to_vec();
        self.install(resolver, TableOrigin::Local);
        self.persist_in_background(records);
    }

    fn persist_in_background(&self, records: Vec<NavigationPermission>) {
        let generation = self.next_generation();
        let store = Arc::clone(&self.store);
        let persisted_generation = Arc::clone(&self.persisted_generation);

        let handle = tokio::spawn(async move {
            match persist_generation(
                store.as_ref(),
                &persisted_generation,
                generation,
                &records,
            )
            .await
            {
                Ok(true) => {
                    debug!(generation, records = records.len(), "Persisted navigation permissions")
                }
                Ok(false) => {}
                Err(err) => {
                    warn!(
                        backend = store.backend(),
                        generation,
                        error = %err,
                        "Saving navigation permissions failed, keeping in-memory table"
                    );
                    failure_counter("save", &err);
                }
            }
        });

        let mut pending = lock(&self.pending_saves);
        pending.retain(|handle| !handle.is_finished());
        pending.push(handle);
    }
}
