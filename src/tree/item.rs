use std::any;
use tracing::debug;

use super::attribute::Attribute;
use super::node::{Aggregate, ExpressionTree};
use crate::config::BuilderConfig;
use crate::error::Error;
use crate::expression::{
    Builder, ConditionBuilder, Expression, KeyConditionBuilder, ProjectionBuilder, UpdateBuilder,
};

/// Item-level entry point owning the root node of an expression tree
///
/// The tree is built once with [`build`](Self::build); intent is then
/// attached to nodes through [`access_mut`](Self::access_mut) and read back
/// through the `build_*_builder` aggregations.
#[derive(Debug)]
pub struct ItemExpressionBuilder<T: ExpressionTree> {
    root: Attribute<T>,
    config: BuilderConfig,
}

impl<T: ExpressionTree> Default for ItemExpressionBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ExpressionTree> ItemExpressionBuilder<T> {
    /// Create an unbuilt tree with the default configuration
    pub fn new() -> Self {
        Self::with_config(BuilderConfig::default())
    }

    /// Create an unbuilt tree
    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            root: T::build_tree(""),
            config,
        }
    }

    /// Assign document paths to every node
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyBuilt`] on a second call. A failed build
    /// leaves the tree in an unspecified structural state.
    pub fn build(&mut self) -> Result<(), Error> {
        self.root.build("")?;
        debug!(item = any::type_name::<T>(), "expression tree built");
        Ok(())
    }

    /// Whether [`build`](Self::build) has run
    pub fn is_built(&self) -> bool {
        self.root.is_built()
    }

    /// Root node
    pub fn root(&self) -> &Attribute<T> {
        &self.root
    }

    /// Mutable root node
    pub fn root_mut(&mut self) -> &mut Attribute<T> {
        &mut self.root
    }

    /// Access reference of the root node
    pub fn access(&self) -> &T {
        self.root.access()
    }

    /// Mutable access reference of the root node
    pub fn access_mut(&mut self) -> &mut T {
        self.root.access_mut()
    }

    /// Configuration in use
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Paths of every projected node, in traversal order
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotBuilt`] before build.
    pub fn build_projection_builder(&self) -> Result<ProjectionBuilder, Error> {
        self.ensure_built("build a projection")?;
        self.root.add_name(Some(ProjectionBuilder::new()))
    }

    /// Key conditions of the root's key attributes, folded left to right
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotBuilt`] before build.
    pub fn build_key_condition_builder(&self) -> Result<Option<KeyConditionBuilder>, Error> {
        self.ensure_built("build a key condition")?;
        self.root
            .access()
            .children()
            .into_iter()
            .try_fold(None, |acc, child| child.add_key_condition(acc))
    }

    /// Conditions of every node, folded left to right
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotBuilt`] before build.
    pub fn build_condition_builder(&self) -> Result<Option<ConditionBuilder>, Error> {
        self.ensure_built("build a condition")?;
        self.root.add_condition(None)
    }

    /// Update operations of every node not shadowed by an ancestor operation
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotBuilt`] before build, and
    /// [`Error::SupersededUpdate`] for a shadowed update when
    /// [`BuilderConfig::strict_updates`] is set.
    pub fn build_update_builder(&self) -> Result<UpdateBuilder, Error> {
        self.ensure_built("build an update")?;
        let update = self.root.add_update(Some(UpdateBuilder::new()))?;

        let mut shadowed = Vec::new();
        self.root.collect_shadowed_updates(false, &mut shadowed);
        if self.config.strict_updates {
            if let Some(path) = shadowed.into_iter().next() {
                return Err(Error::SupersededUpdate { path });
            }
        } else {
            for path in &shadowed {
                debug!(path = %path, "update superseded by an ancestor operation");
            }
        }

        Ok(update)
    }

    /// Render every non-empty aggregation into one [`Expression`]
    ///
    /// # Errors
    ///
    /// Returns the aggregation errors above, or
    /// [`Error::UnsetParameter`] when the tree carries no intent at all.
    pub fn expression(&self) -> Result<Expression, Error> {
        let mut builder = Builder::new();

        let projection = self.build_projection_builder()?;
        if !projection.is_empty() {
            builder = builder.with_projection(projection);
        }
        if let Some(key_condition) = self.build_key_condition_builder()? {
            builder = builder.with_key_condition(key_condition);
        }
        if let Some(condition) = self.build_condition_builder()? {
            builder = builder.with_condition(condition);
        }
        let update = self.build_update_builder()?;
        if !update.is_empty() {
            builder = builder.with_update(update);
        }

        builder.build()
    }

    fn ensure_built(&self, action: &'static str) -> Result<(), Error> {
        if self.root.is_built() {
            Ok(())
        } else {
            Err(Error::NotBuilt {
                name: any::type_name::<T>().to_string(),
                action,
            })
        }
    }
}
