//! In-memory permission store.
//!
//! Keeps the table in process memory and records every bulk save so tests can
//! inspect exactly what a session wrote. Loads and saves can be made to fail
//! on demand.

use std::sync::{Mutex, MutexGuard, PoisonError};

use researchdesk_models::NavigationPermission;

use super::{PermissionStore, StoreFuture};
use crate::error::StoreError;

/// Failure injected into [`MemoryPermissionStore`] calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatedFailure {
    Unreachable,
    Malformed,
}

impl SimulatedFailure {
    fn to_error(self) -> StoreError {
        match self {
            Self::Unreachable => StoreError::Unreachable("simulated outage".to_string()),
            Self::Malformed => StoreError::Malformed("simulated bad payload".to_string()),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<NavigationPermission>,
    saved: Vec<Vec<NavigationPermission>>,
    load_failure: Option<SimulatedFailure>,
    save_failure: Option<SimulatedFailure>,
    loads: usize,
}

#[derive(Debug, Default)]
pub struct MemoryPermissionStore {
    inner: Mutex<Inner>,
}

impl MemoryPermissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `records`. They are returned verbatim by
    /// `load`, duplicates included.
    pub fn with_records(records: Vec<NavigationPermission>) -> Self {
        let store = Self::default();
        store.lock().records = records;
        store
    }

    pub fn failing_loads(self, failure: SimulatedFailure) -> Self {
        self.set_load_failure(Some(failure));
        self
    }

    pub fn failing_saves(self, failure: SimulatedFailure) -> Self {
        self.set_save_failure(Some(failure));
        self
    }

    pub fn set_load_failure(&self, failure: Option<SimulatedFailure>) {
        self.lock().load_failure = failure;
    }

    pub fn set_save_failure(&self, failure: Option<SimulatedFailure>) {
        self.lock().save_failure = failure;
    }

    /// Current durable table.
    pub fn records(&self) -> Vec<NavigationPermission> {
        self.lock().records.clone()
    }

    /// Every table successfully written, oldest first.
    pub fn saved_tables(&self) -> Vec<Vec<NavigationPermission>> {
        self.lock().saved.clone()
    }

    pub fn save_count(&self) -> usize {
        self.lock().saved.len()
    }

    pub fn load_count(&self) -> usize {
        self.lock().loads
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PermissionStore for MemoryPermissionStore {
    fn load(&self) -> StoreFuture<'_, Vec<NavigationPermission>> {
        Box::pin(async move {
            let mut inner = self.lock();
            inner.loads += 1;
            match inner.load_failure {
                Some(failure) => Err(failure.to_error()),
                None => Ok(inner.records.clone()),
            }
        })
    }

    fn bulk_save<'a>(&'a self, permissions: &'a [NavigationPermission]) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let mut inner = self.lock();
            if let Some(failure) = inner.save_failure {
                return Err(failure.to_error());
            }
            inner.records = permissions.to_vec();
            inner.saved.push(permissions.to_vec());
            Ok(())
        })
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
