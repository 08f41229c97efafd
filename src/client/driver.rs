use std::future::Future;

use bson::Document;

use crate::errors::FilterError;

/// A stored document with a string primary key.
pub trait Entity {
    fn id(&self) -> &str;
}

/// Options for `find`.
///
/// `sort` is a compiled sort clause; `skip`/`limit` come from page arithmetic, see
/// [`FindOptions::paged`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    pub sort: Option<Document>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl FindOptions {
    #[must_use]
    pub fn sorted(sort: Option<Document>) -> Self {
        Self { sort, ..Self::default() }
    }

    /// Applies 1-based paging; either value being zero means no paging.
    #[must_use]
    pub fn paged(mut self, page_no: u64, page_size: u64) -> Self {
        if page_no > 0 && page_size > 0 {
            self.skip = Some((page_no - 1).saturating_mul(page_size));
            self.limit = Some(page_size);
        }
        self
    }
}

/// Blocking capability set of a backing document store.
///
/// Filters arrive as compiled query-filter strings; the driver owns connections, timeouts and
/// retries.
pub trait DocumentDriver<T> {
    /// # Errors
    /// Returns `FilterError::Driver` when the store rejects the query.
    fn find(&self, filter: &str, opts: &FindOptions) -> Result<Vec<T>, FilterError>;

    /// # Errors
    /// Returns `FilterError::Driver` when the store rejects the query.
    fn count(&self, filter: &str) -> Result<u64, FilterError>;

    /// # Errors
    /// Returns `FilterError::Driver` when the store rejects the query.
    fn delete_many(&self, filter: &str) -> Result<u64, FilterError>;

    /// # Errors
    /// Returns `FilterError::Driver` when the store rejects the update.
    fn update_many(&self, filter: &str, update: &Document) -> Result<u64, FilterError>;

    /// # Errors
    /// Returns `FilterError::Driver` when the store rejects the write.
    fn insert_one(&self, entity: &T) -> Result<(), FilterError>;

    /// # Errors
    /// Returns `FilterError::Driver` when the store rejects the write.
    fn replace_one(&self, id: &str, entity: &T) -> Result<(), FilterError>;

    /// # Errors
    /// Returns `FilterError::Driver` when the store rejects the delete.
    fn delete_one(&self, id: &str) -> Result<u64, FilterError>;
}

/// Async counterpart of [`DocumentDriver`].
pub trait AsyncDocumentDriver<T> {
    fn find(
        &self,
        filter: &str,
        opts: &FindOptions,
    ) -> impl Future<Output = Result<Vec<T>, FilterError>> + Send;

    fn count(&self, filter: &str) -> impl Future<Output = Result<u64, FilterError>> + Send;

    fn delete_many(&self, filter: &str) -> impl Future<Output = Result<u64, FilterError>> + Send;

    fn update_many(
        &self,
        filter: &str,
        update: &Document,
    ) -> impl Future<Output = Result<u64, FilterError>> + Send;

    fn insert_one(&self, entity: &T) -> impl Future<Output = Result<(), FilterError>> + Send;

    fn replace_one(
        &self,
        id: &str,
        entity: &T,
    ) -> impl Future<Output = Result<(), FilterError>> + Send;

    fn delete_one(&self, id: &str) -> impl Future<Output = Result<u64, FilterError>> + Send;
}
