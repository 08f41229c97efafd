use bson::Document;

use crate::errors::FilterError;

use super::compile::compile;
use super::types::{FieldValue, FilterExpression, MATCH_ALL};

/// Which documents an update applies to, after precedence has been resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateTarget<'a> {
    Id(&'a str),
    Filter(&'a FilterExpression),
    All,
}

/// Field assignments plus the selector of the documents they apply to.
///
/// Always carries at least one assignment; construct it through [`UpdateSpec::builder`] or the
/// shorthand constructors.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSpec {
    id: Option<String>,
    filter: Option<FilterExpression>,
    assignments: Vec<FieldValue>,
}

impl UpdateSpec {
    #[must_use]
    pub fn builder() -> UpdateSpecBuilder {
        UpdateSpecBuilder::default()
    }

    /// # Errors
    /// Returns `FilterError::EmptyUpdate` when `assignments` is empty.
    pub fn by_id(id: impl Into<String>, assignments: Vec<FieldValue>) -> Result<Self, FilterError> {
        Self::builder().id(id).set_all(assignments).build()
    }

    /// # Errors
    /// Returns `FilterError::EmptyUpdate` when `assignments` is empty.
    pub fn by_filter(
        filter: FilterExpression,
        assignments: Vec<FieldValue>,
    ) -> Result<Self, FilterError> {
        Self::builder().filter(filter).set_all(assignments).build()
    }

    /// # Errors
    /// Returns `FilterError::EmptyUpdate` when `assignments` is empty.
    pub fn all(assignments: Vec<FieldValue>) -> Result<Self, FilterError> {
        Self::builder().set_all(assignments).build()
    }

    #[must_use]
    pub fn assignments(&self) -> &[FieldValue] {
        &self.assignments
    }

    /// Explicit id beats an explicit filter, which beats matching everything.
    #[must_use]
    pub fn target(&self) -> UpdateTarget<'_> {
        if let Some(id) = self.id.as_deref() {
            UpdateTarget::Id(id)
        } else if let Some(filter) = &self.filter {
            UpdateTarget::Filter(filter)
        } else {
            UpdateTarget::All
        }
    }

    /// Query-filter string selecting the documents to update.
    ///
    /// # Errors
    /// Returns `FilterError::Structural` when the target filter is malformed.
    pub fn compile_target(&self) -> Result<String, FilterError> {
        match self.target() {
            UpdateTarget::Id(id) => compile(&FilterExpression::by_id(id)),
            UpdateTarget::Filter(filter) => compile(filter),
            UpdateTarget::All => Ok(MATCH_ALL.to_string()),
        }
    }

    /// Single `$set` document covering every assignment. A field assigned twice keeps the last
    /// value.
    #[must_use]
    pub fn get_update_definition(&self) -> Document {
        let mut set = Document::new();
        for fv in &self.assignments {
            set.insert(fv.field.clone(), fv.value.clone());
        }
        let mut update = Document::new();
        update.insert("$set", set);
        update
    }
}

#[derive(Debug, Default)]
pub struct UpdateSpecBuilder {
    id: Option<String>,
    filter: Option<FilterExpression>,
    assignments: Vec<FieldValue>,
}

impl UpdateSpecBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: FilterExpression) -> Self {
        self.filter = Some(filter);
        self
    }

    #[must_use]
    pub fn set(mut self, field: impl Into<String>, value: impl Into<bson::Bson>) -> Self {
        self.assignments.push(FieldValue::new(field, value));
        self
    }

    #[must_use]
    pub fn set_all(mut self, assignments: Vec<FieldValue>) -> Self {
        self.assignments.extend(assignments);
        self
    }

    /// # Errors
    /// Returns `FilterError::EmptyUpdate` if no field was assigned.
    pub fn build(self) -> Result<UpdateSpec, FilterError> {
        if self.assignments.is_empty() {
            return Err(FilterError::EmptyUpdate);
        }
        Ok(UpdateSpec { id: self.id, filter: self.filter, assignments: self.assignments })
    }
}
