use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;
use tracing::trace;

use super::alias::AliasList;
use super::condition::ConditionBuilder;
use super::key_condition::KeyConditionBuilder;
use super::projection::ProjectionBuilder;
use super::update::UpdateBuilder;
use crate::error::Error;

/// Collects the expressions of one request and renders them with a shared
/// placeholder table.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    condition: Option<ConditionBuilder>,
    filter: Option<ConditionBuilder>,
    key_condition: Option<KeyConditionBuilder>,
    projection: Option<ProjectionBuilder>,
    update: Option<UpdateBuilder>,
}

impl Builder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the condition expression
    pub fn with_condition(mut self, condition: ConditionBuilder) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Set the filter expression
    pub fn with_filter(mut self, filter: ConditionBuilder) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set the key condition expression
    pub fn with_key_condition(mut self, key_condition: KeyConditionBuilder) -> Self {
        self.key_condition = Some(key_condition);
        self
    }

    /// Set the projection expression
    pub fn with_projection(mut self, projection: ProjectionBuilder) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Set the update expression
    pub fn with_update(mut self, update: UpdateBuilder) -> Self {
        self.update = Some(update);
        self
    }

    /// Render every expression that was set
    ///
    /// Expressions are rendered in the order condition, filter, key
    /// condition, projection, update; placeholders are numbered in that
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsetParameter`] when no expression was set, or the
    /// first rendering error of an individual expression.
    pub fn build(self) -> Result<Expression, Error> {
        if self.condition.is_none()
            && self.filter.is_none()
            && self.key_condition.is_none()
            && self.projection.is_none()
            && self.update.is_none()
        {
            return Err(Error::UnsetParameter("Builder"));
        }

        let mut aliases = AliasList::default();
        let condition = self
            .condition
            .map(|c| c.render(&mut aliases))
            .transpose()?;
        let filter = self.filter.map(|f| f.render(&mut aliases)).transpose()?;
        let key_condition = self
            .key_condition
            .map(|k| k.render(&mut aliases))
            .transpose()?;
        let projection = self
            .projection
            .map(|p| p.render(&mut aliases))
            .transpose()?;
        let update = self.update.map(|u| u.render(&mut aliases)).transpose()?;

        let (names, values) = aliases.into_maps();
        trace!(names = names.len(), values = values.len(), "expression built");

        Ok(Expression {
            condition,
            filter,
            key_condition,
            projection,
            update,
            names,
            values,
        })
    }
}

/// Rendered expressions plus their placeholder tables
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Expression {
    pub(super) condition: Option<String>,
    pub(super) filter: Option<String>,
    pub(super) key_condition: Option<String>,
    pub(super) projection: Option<String>,
    pub(super) update: Option<String>,
    pub(super) names: HashMap<String, String>,
    pub(super) values: HashMap<String, AttributeValue>,
}

impl Expression {
    /// Condition expression
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    /// Filter expression
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Key condition expression
    pub fn key_condition(&self) -> Option<&str> {
        self.key_condition.as_deref()
    }

    /// Projection expression
    pub fn projection(&self) -> Option<&str> {
        self.projection.as_deref()
    }

    /// Update expression
    pub fn update(&self) -> Option<&str> {
        self.update.as_deref()
    }

    /// `#n` placeholder to attribute name
    pub fn names(&self) -> &HashMap<String, String> {
        &self.names
    }

    /// `:n` placeholder to attribute value
    pub fn values(&self) -> &HashMap<String, AttributeValue> {
        &self.values
    }
}
