//! Repository layer
//!
//! Storage seam for the services. [`InMemoryRepository`] is the only backing
//! store the binary uses; tests may plug in anything implementing
//! [`Repository`].

use thiserror::Error;

use crate::models::Record;

/// Repository failures. Guards normally prevent these, so seeing one at the
/// HTTP layer means a 500.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Record not found: {0}")]
    NotFound(String),
}

/// CRUD over one collection, insertion ordered.
pub trait Repository<T: Record>: Send {
    /// All records in insertion order
    fn list(&self) -> Vec<T>;

    fn get(&self, id: &str) -> Option<T>;

    /// Append a record; its id must be new
    fn insert(&mut self, record: T) -> Result<T, RepositoryError>;

    /// Replace the record with the same id, keeping its position
    fn update(&mut self, record: T) -> Result<T, RepositoryError>;

    /// Remove and return the record
    fn delete(&mut self, id: &str) -> Result<T, RepositoryError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `Vec`-backed repository
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    records: Vec<T>,
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Seed with existing records, rejecting duplicate ids
    pub fn with_records(records: Vec<T>) -> Result<Self, RepositoryError> {
        let mut repo = Self::new();
        for record in records {
            repo.insert(record)?;
        }
        Ok(repo)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }
}

impl<T: Record> Repository<T> for InMemoryRepository<T> {
    fn list(&self) -> Vec<T> {
        self.records.clone()
    }

    fn get(&self, id: &str) -> Option<T> {
        self.records.iter().find(|r| r.id() == id).cloned()
    }

    fn insert(&mut self, record: T) -> Result<T, RepositoryError> {
        if self.position(record.id()).is_some() {
            return Err(RepositoryError::DuplicateId(record.id().to_string()));
        }
        self.records.push(record.clone());
        Ok(record)
    }

    fn update(&mut self, record: T) -> Result<T, RepositoryError> {
        let idx = self
            .position(record.id())
            .ok_or_else(|| RepositoryError::NotFound(record.id().to_string()))?;
        self.records[idx] = record.clone();
        Ok(record)
    }

    fn delete(&mut self, id: &str) -> Result<T, RepositoryError> {
        let idx = self
            .position(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        Ok(self.records.remove(idx))
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
