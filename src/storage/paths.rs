// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path constants and utilities for the document store layout.

use std::path::{Path, PathBuf};

/// Default base directory for persistent storage.
pub const DATA_ROOT: &str = "./data";

/// Document collections kept by the store.
///
/// Each collection is a directory of `{id}.json` files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Hotels,
    Rooms,
    Bookings,
}

impl Collection {
    /// Every collection, in initialization order.
    pub const ALL: [Collection; 4] = [
        Collection::Users,
        Collection::Hotels,
        Collection::Rooms,
        Collection::Bookings,
    ];

    /// Directory name of the collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Hotels => "hotels",
            Collection::Rooms => "rooms",
            Collection::Bookings => "bookings",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage path utilities.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DATA_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every document of a collection.
    pub fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.as_str())
    }

    /// Path to a single document file.
    ///
    /// `id` must already be validated; it is joined verbatim.
    pub fn document(&self, collection: Collection, id: &str) -> PathBuf {
        self.collection_dir(collection).join(format!("{id}.json"))
    }

    /// Scratch file for one readiness probe, distinct per `nonce`.
    pub fn health_check_file(&self, nonce: &str) -> PathBuf {
        self.root.join(format!(".health_check.{nonce}"))
    }
}
