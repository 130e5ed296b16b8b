// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{password::DEFAULT_BCRYPT_COST, TokenCodec};
use crate::clock::{Clock, SystemClock};
use crate::storage::{FileStorage, StorageError};

/// Default deadline for a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Document store (synchronous file I/O)
    pub storage: Arc<FileStorage>,
    /// Token codec holding the signing secret
    pub tokens: Arc<TokenCodec>,
    /// Time source for token expiry and booking validation
    pub clock: Arc<dyn Clock>,
    /// Deadline applied to each store call
    pub store_timeout: Duration,
    /// bcrypt work factor for new passwords
    pub bcrypt_cost: u32,
}

impl AppState {
    /// Create state around an initialized storage and a token codec.
    pub fn new(storage: FileStorage, tokens: TokenCodec) -> Self {
        Self {
            storage: Arc::new(storage),
            tokens: Arc::new(tokens),
            clock: Arc::new(SystemClock),
            store_timeout: DEFAULT_STORE_TIMEOUT,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Get a reference to the storage.
    pub fn storage(&self) -> &FileStorage {
        &self.storage
    }

    /// Run a synchronous store operation on the blocking pool, bounded by
    /// the store deadline.
    ///
    /// On timeout the blocking task keeps running; its outcome is unknown to
    /// the caller.
    pub async fn with_storage<T, E, F>(&self, f: F) -> Result<T, E>
    where
        T: Send + 'static,
        E: From<StorageError> + Send + 'static,
        F: FnOnce(&FileStorage) -> Result<T, E> + Send + 'static,
    {
        let storage = Arc::clone(&self.storage);
        let task = tokio::task::spawn_blocking(move || f(&storage));

        match tokio::time::timeout(self.store_timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(StorageError::TaskFailed(join_error.to_string()).into()),
            Err(_) => {
                tracing::warn!(timeout = ?self.store_timeout, "Store operation timed out");
                Err(StorageError::Timeout(self.store_timeout).into())
            }
        }
    }
}
