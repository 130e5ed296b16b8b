// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Typed document collections over [`FileStorage`].
//!
//! `Documents<T>` implements the store contract used by the repositories:
//! `find_one`, `find_many`, `insert_one`, `update_one` and `delete_one`, all
//! driven by structured [`Filter`] documents. Queries scan the collection in
//! identifier order.

use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{Collection, FileStorage, Filter, Pagination, StorageError, StorageResult, Update};

/// A value stored as one JSON file in a collection.
pub trait Document: Serialize + DeserializeOwned {
    /// Collection the document lives in.
    const COLLECTION: Collection;

    /// Unique identifier (UUID string).
    fn id(&self) -> &str;
}

/// Reject identifiers that are not UUIDs before they reach a file path.
pub fn validate_id(id: &str) -> StorageResult<()> {
    Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| StorageError::InvalidId(id.to_string()))
}

/// Access to a single collection.
pub struct Documents<'a, T> {
    storage: &'a FileStorage,
    _marker: PhantomData<T>,
}

impl<'a, T: Document> Documents<'a, T> {
    pub fn new(storage: &'a FileStorage) -> Self {
        Self {
            storage,
            _marker: PhantomData,
        }
    }

    /// Get a document by ID.
    pub fn get(&self, id: &str) -> StorageResult<T> {
        validate_id(id)?;
        let path = self.storage.paths().document(T::COLLECTION, id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("{} {id}", T::COLLECTION)));
        }
        self.storage.read_json(path)
    }

    /// First document matching `filter`, in identifier order.
    pub fn find_one(&self, filter: &Filter) -> StorageResult<Option<T>> {
        for (_, raw) in self.scan()? {
            if filter.matches(&raw) {
                return Ok(Some(serde_json::from_value(raw)?));
            }
        }
        Ok(None)
    }

    /// All documents matching `filter`, optionally paginated.
    pub fn find_many(&self, filter: &Filter, page: Option<Pagination>) -> StorageResult<Vec<T>> {
        let matching = self.scan()?.into_iter().filter(|(_, raw)| filter.matches(raw));

        let selected: Vec<(String, Value)> = match page {
            Some(page) => matching
                .skip(page.offset())
                .take(page.effective_limit())
                .collect(),
            None => matching.collect(),
        };

        selected
            .into_iter()
            .map(|(_, raw)| serde_json::from_value(raw).map_err(StorageError::from))
            .collect()
    }

    /// Number of documents matching `filter`.
    pub fn count(&self, filter: &Filter) -> StorageResult<usize> {
        Ok(self
            .scan()?
            .iter()
            .filter(|(_, raw)| filter.matches(raw))
            .count())
    }

    /// Insert a new document. Fails if the identifier is already taken.
    pub fn insert_one(&self, document: &T) -> StorageResult<()> {
        let id = document.id();
        validate_id(id)?;

        let path = self.storage.paths().document(T::COLLECTION, id);
        if self.storage.exists(&path) {
            return Err(StorageError::AlreadyExists(format!("{} {id}", T::COLLECTION)));
        }
        self.storage.write_json(path, document)
    }

    /// Apply `update` to the first document matching `filter`.
    ///
    /// Returns the updated document, or `None` when nothing matched.
    pub fn update_one(&self, filter: &Filter, update: &Update) -> StorageResult<Option<T>> {
        self.storage.with_lock(T::COLLECTION.as_str(), || {
            let Some((id, mut raw)) = self.scan()?.into_iter().find(|(_, raw)| filter.matches(raw))
            else {
                return Ok(None);
            };

            update.apply(&mut raw)?;
            // Round-trip through T so an update can never persist a malformed document
            let updated: T = serde_json::from_value(raw)?;
            self.storage
                .write_json(self.storage.paths().document(T::COLLECTION, &id), &updated)?;
            Ok(Some(updated))
        })
    }

    /// Delete the first document matching `filter`. Returns whether one was removed.
    pub fn delete_one(&self, filter: &Filter) -> StorageResult<bool> {
        self.storage.with_lock(T::COLLECTION.as_str(), || {
            let Some((id, _)) = self.scan()?.into_iter().find(|(_, raw)| filter.matches(raw))
            else {
                return Ok(false);
            };
            self.storage
                .delete(self.storage.paths().document(T::COLLECTION, &id))?;
            Ok(true)
        })
    }

    /// Every document of the collection as raw JSON, keyed by file stem.
    fn scan(&self) -> StorageResult<Vec<(String, Value)>> {
        let dir = self.storage.paths().collection_dir(T::COLLECTION);
        let mut documents = Vec::new();
        for id in self.storage.list_files(&dir, "json")? {
            match self
                .storage
                .read_json::<Value>(self.storage.paths().document(T::COLLECTION, &id))
            {
                Ok(raw) => documents.push((id, raw)),
                // Deleted between listing and reading
                Err(StorageError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(documents)
    }
}
