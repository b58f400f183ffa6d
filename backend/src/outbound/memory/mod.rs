//! In-process adapters used when no database is configured.
//!
//! State lives behind a `std::sync::Mutex` that is only held for the
//! synchronous body of each call. Both adapters can be switched to an
//! "unavailable" mode that fails every call with a connection error, which
//! tests use to exercise outage handling.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::ports::{
    AdminAccountRepository, AdminAccountRepositoryError, RepairRequestRepository,
    RepairRequestRepositoryError,
};
use crate::domain::{AdminAccount, RepairRequest, RepairStatus, TrackingToken};

const UNAVAILABLE: &str = "in-memory store switched off";

/// Repair requests held in a process-local map.
#[derive(Debug, Default)]
pub struct InMemoryRepairRequestRepository {
    requests: Mutex<HashMap<Uuid, RepairRequest>>,
    unavailable: AtomicBool,
    token_lookups: AtomicUsize,
}

impl InMemoryRepairRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a connection error (or recover).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `find_by_token` calls served so far.
    pub fn token_lookup_count(&self) -> usize {
        self.token_lookups.load(Ordering::SeqCst)
    }

    fn state(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<Uuid, RepairRequest>>, RepairRequestRepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepairRequestRepositoryError::connection(UNAVAILABLE));
        }
        self.requests
            .lock()
            .map_err(|_| RepairRequestRepositoryError::query("repair request store poisoned"))
    }
}

#[async_trait]
impl RepairRequestRepository for InMemoryRepairRequestRepository {
    async fn insert(&self, request: &RepairRequest) -> Result<(), RepairRequestRepositoryError> {
        let mut requests = self.state()?;
        if requests
            .values()
            .any(|existing| existing.tracking_token() == request.tracking_token())
        {
            return Err(RepairRequestRepositoryError::duplicate_token());
        }
        if requests.contains_key(&request.id()) {
            return Err(RepairRequestRepositoryError::query("duplicate repair request id"));
        }
        requests.insert(request.id(), request.clone());
        Ok(())
    }

    async fn find_by_token(
        &self,
        token: &TrackingToken,
    ) -> Result<Option<RepairRequest>, RepairRequestRepositoryError> {
        self.token_lookups.fetch_add(1, Ordering::SeqCst);
        let requests = self.state()?;
        Ok(requests
            .values()
            .find(|request| request.tracking_token() == token)
            .cloned())
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<RepairRequest>, RepairRequestRepositoryError> {
        Ok(self.state()?.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<RepairRequest>, RepairRequestRepositoryError> {
        Ok(self.state()?.values().cloned().collect())
    }

    async fn update_status(
        &self,
        id: &Uuid,
        from: RepairStatus,
        to: RepairStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<RepairRequest>, RepairRequestRepositoryError> {
        let mut requests = self.state()?;
        let Some(stored) = requests.get_mut(id).filter(|stored| stored.status() == from) else {
            return Ok(None);
        };
        stored
            .change_status(to, updated_at)
            .map_err(|err| RepairRequestRepositoryError::query(err.to_string()))?;
        Ok(Some(stored.clone()))
    }

    async fn update_notes(
        &self,
        id: &Uuid,
        notes: Option<String>,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<RepairRequest>, RepairRequestRepositoryError> {
        let mut requests = self.state()?;
        Ok(requests.get_mut(id).map(|stored| {
            stored.replace_notes(notes, updated_at);
            stored.clone()
        }))
    }
}

/// Admin accounts held in a process-local map keyed by email.
#[derive(Debug, Default)]
pub struct InMemoryAdminAccountRepository {
    accounts: Mutex<HashMap<String, AdminAccount>>,
    unavailable: AtomicBool,
}

impl InMemoryAdminAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a connection error (or recover).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn state(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<String, AdminAccount>>, AdminAccountRepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AdminAccountRepositoryError::connection(UNAVAILABLE));
        }
        self.accounts
            .lock()
            .map_err(|_| AdminAccountRepositoryError::query("admin account store poisoned"))
    }
}

#[async_trait]
impl AdminAccountRepository for InMemoryAdminAccountRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AdminAccount>, AdminAccountRepositoryError> {
        Ok(self.state()?.get(email).cloned())
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<AdminAccount>, AdminAccountRepositoryError> {
        Ok(self
            .state()?
            .values()
            .find(|account| account.id() == *id)
            .cloned())
    }

    async fn upsert(&self, account: &AdminAccount) -> Result<(), AdminAccountRepositoryError> {
        let mut accounts = self.state()?;
        let merged = match accounts.get(account.email()) {
            Some(existing) => AdminAccount::new(
                existing.id(),
                account.email(),
                account.password_hash().clone(),
                account.is_admin(),
            ),
            None => account.clone(),
        };
        accounts.insert(merged.email().to_owned(), merged);
        Ok(())
    }
}
