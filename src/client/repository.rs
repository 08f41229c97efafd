use std::marker::PhantomData;

use crate::config::ClientConfig;
use crate::errors::FilterError;
use crate::query::{FilterExpression, MATCH_ALL, MongoDialect, QueryDialect, SortField, UpdateSpec};

use super::driver::{AsyncDocumentDriver, DocumentDriver, Entity, FindOptions};

/// Typed façade over a driver: compiles filters, sorts and updates, then hands them over.
///
/// Entities pass through untouched.
pub struct Repository<D, T, Q = MongoDialect> {
    driver: D,
    dialect: Q,
    default_page_size: Option<u64>,
    _entity: PhantomData<fn() -> T>,
}

impl<D, T> Repository<D, T> {
    pub fn new(driver: D) -> Self {
        Self::with_dialect(driver, MongoDialect)
    }

    /// Repository whose paged reads fall back to `config.default_page_size` when called with a
    /// page size of zero.
    pub fn from_config(driver: D, config: &ClientConfig) -> Self {
        Self::new(driver).with_default_page_size(config.default_page_size)
    }
}

impl<D, T, Q: QueryDialect> Repository<D, T, Q> {
    pub fn with_dialect(driver: D, dialect: Q) -> Self {
        Self { driver, dialect, default_page_size: None, _entity: PhantomData }
    }

    #[must_use]
    pub fn with_default_page_size(mut self, size: Option<u64>) -> Self {
        self.default_page_size = size.filter(|s| *s > 0);
        self
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub const fn default_page_size(&self) -> Option<u64> {
        self.default_page_size
    }

    fn id_filter(&self, id: &str) -> Result<String, FilterError> {
        self.dialect.compile_filter(&FilterExpression::by_id(id))
    }

    fn sorted_options(&self, sorts: &[SortField]) -> FindOptions {
        FindOptions::sorted(self.dialect.compile_sort(sorts))
    }

    fn page_options(&self, sorts: &[SortField], page_no: u64, page_size: u64) -> FindOptions {
        let size = match page_size {
            0 => self.default_page_size.unwrap_or(0),
            n => n,
        };
        self.sorted_options(sorts).paged(page_no, size)
    }
}

/// Keeps a single optional sort only when it names a field.
fn single_sort(sort: Option<&SortField>) -> Vec<SortField> {
    sort.filter(|s| !s.field.is_empty()).cloned().into_iter().collect()
}

impl<D, T, Q> Repository<D, T, Q>
where
    D: DocumentDriver<T>,
    T: Entity,
    Q: QueryDialect,
{
    /// # Errors
    /// Propagates driver failures.
    pub fn insert(&self, entity: T) -> Result<T, FilterError> {
        self.driver.insert_one(&entity)?;
        Ok(entity)
    }

    /// Replaces the stored document whose id matches `entity`.
    ///
    /// # Errors
    /// Propagates driver failures.
    pub fn update(&self, entity: T) -> Result<T, FilterError> {
        self.driver.replace_one(entity.id(), &entity)?;
        Ok(entity)
    }

    /// # Errors
    /// Propagates driver failures.
    pub fn delete_by_id(&self, id: &str) -> Result<u64, FilterError> {
        self.driver.delete_one(id)
    }

    /// # Errors
    /// Propagates driver failures.
    pub fn delete_entity(&self, entity: &T) -> Result<u64, FilterError> {
        self.driver.delete_one(entity.id())
    }

    /// Deletes every document matching `filter`.
    ///
    /// # Errors
    /// Returns `FilterError::Structural` for a malformed filter, otherwise propagates driver
    /// failures.
    pub fn delete(&self, filter: &FilterExpression) -> Result<u64, FilterError> {
        let q = self.dialect.compile_filter(filter)?;
        log::debug!("delete_many filter={q}");
        self.driver.delete_many(&q)
    }

    /// # Errors
    /// Propagates driver failures.
    pub fn is_exist_by_id(&self, id: &str) -> Result<bool, FilterError> {
        Ok(self.driver.count(&self.id_filter(id)?)? > 0)
    }

    /// # Errors
    /// Returns `FilterError::Structural` for a malformed filter, otherwise propagates driver
    /// failures.
    pub fn is_exist(&self, filter: &FilterExpression) -> Result<bool, FilterError> {
        Ok(self.get_count(filter)? > 0)
    }

    /// # Errors
    /// Propagates driver failures.
    pub fn get_by_id(&self, id: &str) -> Result<Option<T>, FilterError> {
        let opts = FindOptions { limit: Some(1), ..FindOptions::default() };
        Ok(self.driver.find(&self.id_filter(id)?, &opts)?.into_iter().next())
    }

    /// # Errors
    /// Propagates driver failures.
    pub fn get_all(&self) -> Result<Vec<T>, FilterError> {
        self.driver.find(MATCH_ALL, &FindOptions::default())
    }

    /// # Errors
    /// Returns `FilterError::Structural` for a malformed filter, otherwise propagates driver
    /// failures.
    pub fn get_all_filtered(&self, filter: &FilterExpression) -> Result<Vec<T>, FilterError> {
        self.get_all_sorted(filter, &[])
    }

    /// # Errors
    /// Returns `FilterError::Structural` for a malformed filter, otherwise propagates driver
    /// failures.
    pub fn get_all_sorted(
        &self,
        filter: &FilterExpression,
        sorts: &[SortField],
    ) -> Result<Vec<T>, FilterError> {
        let q = self.dialect.compile_filter(filter)?;
        log::debug!("find filter={q}");
        self.driver.find(&q, &self.sorted_options(sorts))
    }

    /// # Errors
    /// Returns `FilterError::Structural` for a malformed filter, otherwise propagates driver
    /// failures.
    pub fn get_all_sorted_by(
        &self,
        filter: &FilterExpression,
        sort: Option<&SortField>,
    ) -> Result<Vec<T>, FilterError> {
        self.get_all_sorted(filter, &single_sort(sort))
    }

    /// One page of matches, `page_no` starting at 1. A `page_size` of zero uses the configured
    /// default page size, if any.
    ///
    /// # Errors
    /// Returns `FilterError::Structural` for a malformed filter, otherwise propagates driver
    /// failures.
    pub fn get_page_data(
        &self,
        page_no: u64,
        page_size: u64,
        filter: &FilterExpression,
        sorts: &[SortField],
    ) -> Result<Vec<T>, FilterError> {
        let q = self.dialect.compile_filter(filter)?;
        let opts = self.page_options(sorts, page_no, page_size);
        log::debug!("find page={page_no} size={page_size} filter={q}");
        self.driver.find(&q, &opts)
    }

    /// # Errors
    /// Returns `FilterError::Structural` for a malformed filter, otherwise propagates driver
    /// failures.
    pub fn get_count(&self, filter: &FilterExpression) -> Result<u64, FilterError> {
        self.driver.count(&self.dialect.compile_filter(filter)?)
    }

    /// Applies the `$set` assignments of `update` to its target documents.
    ///
    /// # Errors
    /// Returns `FilterError::Structural` for a malformed target filter, otherwise propagates
    /// driver failures.
    pub fn update_set(&self, update: &UpdateSpec) -> Result<u64, FilterError> {
        let compiled = self.dialect.compile_update(update)?;
        log::debug!("update_many filter={}", compiled.filter);
        self.driver.update_many(&compiled.filter, &compiled.update)
    }
}

impl<D, T, Q> Repository<D, T, Q>
where
    D: AsyncDocumentDriver<T>,
    T: Entity,
    Q: QueryDialect,
{
    /// # Errors
    /// Propagates driver failures.
    pub async fn insert_async(&self, entity: T) -> Result<T, FilterError> {
        self.driver.insert_one(&entity).await?;
        Ok(entity)
    }

    /// # Errors
    /// Propagates driver failures.
    pub async fn update_async(&self, entity: T) -> Result<T, FilterError> {
        self.driver.replace_one(entity.id(), &entity).await?;
        Ok(entity)
    }

    /// # Errors
    /// Propagates driver failures.
    pub async fn delete_by_id_async(&self, id: &str) -> Result<u64, FilterError> {
        self.driver.delete_one(id).await
    }

    /// # Errors
    /// Propagates driver failures.
    pub async fn delete_entity_async(&self, entity: &T) -> Result<u64, FilterError> {
        self.driver.delete_one(entity.id()).await
    }

    /// # Errors
    /// Returns `FilterError::Structural` for a malformed filter, otherwise propagates driver
    /// failures.
    pub async fn delete_async(&self, filter: &FilterExpression) -> Result<u64, FilterError> {
        let q = self.dialect.compile_filter(filter)?;
        self.driver.delete_many(&q).await
    }

    /// # Errors
    /// Propagates driver failures.
    pub async fn is_exist_by_id_async(&self, id: &str) -> Result<bool, FilterError> {
        let q = self.id_filter(id)?;
        Ok(self.driver.count(&q).await? > 0)
    }

    /// # Errors
    /// Returns `FilterError::Structural` for a malformed filter, otherwise propagates driver
    /// failures.
    pub async fn is_exist_async(&self, filter: &FilterExpression) -> Result<bool, FilterError> {
        Ok(self.get_count_async(filter).await? > 0)
    }

    /// # Errors
    /// Propagates driver failures.
    pub async fn get_by_id_async(&self, id: &str) -> Result<Option<T>, FilterError> {
        let q = self.id_filter(id)?;
        let opts = FindOptions { limit: Some(1), ..FindOptions::default() };
        Ok(self.driver.find(&q, &opts).await?.into_iter().next())
    }

    /// # Errors
    /// Propagates driver failures.
    pub async fn get_all_async(&self) -> Result<Vec<T>, FilterError> {
        self.driver.find(MATCH_ALL, &FindOptions::default()).await
    }

    /// # Errors
    /// Returns `FilterError::Structural` for a malformed filter, otherwise propagates driver
    /// failures.
    pub async fn get_all_filtered_async(
        &self,
        filter: &FilterExpression,
    ) -> Result<Vec<T>, FilterError> {
        self.get_all_sorted_async(filter, &[]).await
    }

    /// # Errors
    /// Returns `FilterError::Structural` for a malformed filter, otherwise propagates driver
    /// failures.
    pub async fn get_all_sorted_async(
        &self,
        filter: &FilterExpression,
        sorts: &[SortField],
    ) -> Result<Vec<T>, FilterError> {
        let q = self.dialect.compile_filter(filter)?;
        let opts = self.sorted_options(sorts);
        self.driver.find(&q, &opts).await
    }

    /// # Errors
    /// Returns `FilterError::Structural` for a malformed filter, otherwise propagates driver
    /// failures.
    pub async fn get_all_sorted_by_async(
        &self,
        filter: &FilterExpression,
        sort: Option<&SortField>,
    ) -> Result<Vec<T>, FilterError> {
        self.get_all_sorted_async(filter, &single_sort(sort)).await
    }

    /// # Errors
    /// Returns `FilterError::Structural` for a malformed filter, otherwise propagates driver
    /// failures.
    pub async fn get_page_data_async(
        &self,
        page_no: u64,
        page_size: u64,
        filter: &FilterExpression,
        sorts: &[SortField],
    ) -> Result<Vec<T>, FilterError> {
        let q = self.dialect.compile_filter(filter)?;
        let opts = self.page_options(sorts, page_no, page_size);
        self.driver.find(&q, &opts).await
    }

    /// # Errors
    /// Returns `FilterError::Structural` for a malformed filter, otherwise propagates driver
    /// failures.
    pub async fn get_count_async(&self, filter: &FilterExpression) -> Result<u64, FilterError> {
        let q = self.dialect.compile_filter(filter)?;
        self.driver.count(&q).await
    }

    /// # Errors
    /// Returns `FilterError::Structural` for a malformed target filter, otherwise propagates
    /// driver failures.
    pub async fn update_set_async(&self, update: &UpdateSpec) -> Result<u64, FilterError> {
        let compiled = self.dialect.compile_update(update)?;
        self.driver.update_many(&compiled.filter, &compiled.update).await
    }
}
