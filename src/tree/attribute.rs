use super::node::{
    Aggregate, Child, ChildMut, ExpressionTree, NodeState, TreeField, UpdateOperation, UpdateValue,
};
use crate::error::Error;
use crate::expression::{ConditionBuilder, NameBuilder, ProjectionBuilder, UpdateBuilder};

/// Scalar or nested-struct attribute node
///
/// Owns its access reference `T`, whose fields are the node's children.
#[derive(Debug)]
pub struct Attribute<T> {
    state: NodeState,
    access: T,
}

impl<T> Attribute<T> {
    /// Create an unbuilt node
    pub fn new(name: impl Into<String>, access: T) -> Self {
        Self {
            state: NodeState::new(name.into()),
            access,
        }
    }

    /// Declared wire name
    pub fn name(&self) -> &str {
        &self.state.name
    }

    /// Document path, available once built
    pub fn document_path(&self) -> Option<&str> {
        self.state.document_path()
    }

    /// Whether `build` has run
    pub fn is_built(&self) -> bool {
        self.state.built
    }

    /// Whether the node is marked for projection
    pub fn is_projected(&self) -> bool {
        self.state.projected
    }

    /// Pending condition local to this node
    pub fn condition(&self) -> Option<&ConditionBuilder> {
        self.state.condition.as_ref()
    }

    /// Pending update operation
    pub fn operation(&self) -> UpdateOperation {
        self.state.operation
    }

    /// Pending update payload
    pub fn update_value(&self) -> &UpdateValue {
        &self.state.value
    }

    /// Name reference bound to the document path
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotBuilt`] before build.
    pub fn name_builder(&self) -> Result<NameBuilder, Error> {
        self.state
            .name_builder("create a name reference")
            .cloned()
    }

    /// Access reference, for navigating to child nodes
    pub fn access(&self) -> &T {
        &self.access
    }

    /// Mutable access reference, for navigating to child nodes
    pub fn access_mut(&mut self) -> &mut T {
        &mut self.access
    }

    /// Mark the node for projection
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotBuilt`] before build.
    pub fn project(&mut self) -> Result<(), Error> {
        self.state.project()
    }

    /// AND `condition` onto the pending condition, existing first
    pub fn and_with_condition(&mut self, condition: ConditionBuilder) {
        self.state.and_with_condition(condition);
    }

    /// Overwrite the pending update operation and payload
    ///
    /// A `SET` with a derived value fails at aggregation on plain nodes.
    pub fn add_value(&mut self, operation: UpdateOperation, value: impl Into<UpdateValue>) {
        self.state.set_update(operation, value.into());
    }
}

impl<T: ExpressionTree> Aggregate for Attribute<T> {
    fn name(&self) -> &str {
        &self.state.name
    }

    fn build(&mut self, parent_path: &str) -> Result<(), Error> {
        self.state.assign_path(parent_path)?;
        for child in self.access.children_mut() {
            child.build(&self.state.document_path)?;
        }
        self.state.built = true;
        Ok(())
    }

    fn add_name(&self, acc: Option<ProjectionBuilder>) -> Result<ProjectionBuilder, Error> {
        let acc = self.state.projection_accumulator(acc)?;
        if self.state.projected {
            return Ok(acc.add_names(self.name_builder()?));
        }

        self.access
            .children()
            .into_iter()
            .try_fold(acc, |acc, child| child.add_name(acc))
    }

    fn add_condition(
        &self,
        incoming: Option<ConditionBuilder>,
    ) -> Result<Option<ConditionBuilder>, Error> {
        let outgoing = self.state.merge_condition(incoming)?;
        self.access
            .children()
            .into_iter()
            .try_fold(outgoing, |acc, child| child.add_condition(acc))
    }

    // Descendant intent below an operation is dropped here and only reported
    // by `collect_shadowed_updates`.
    fn add_update(&self, acc: Option<UpdateBuilder>) -> Result<UpdateBuilder, Error> {
        let acc = self.state.update_accumulator(acc)?;
        if self.state.has_operation() {
            return self.state.apply_update(acc, false);
        }

        self.access
            .children()
            .into_iter()
            .try_fold(acc, |acc, child| child.add_update(acc))
    }

    fn collect_shadowed_updates(&self, shadowed: bool, paths: &mut Vec<String>) {
        let shadowed = self.state.record_shadowed(shadowed, paths);
        for child in self.access.children() {
            child.collect_shadowed_updates(shadowed, paths);
        }
    }
}

impl<T: ExpressionTree> TreeField for Attribute<T> {
    fn named(name: &str) -> Self {
        T::build_tree(name)
    }

    fn as_child(&self) -> Child<'_> {
        Child::Attribute(self)
    }

    fn as_child_mut(&mut self) -> ChildMut<'_> {
        ChildMut::Attribute(self)
    }
}
