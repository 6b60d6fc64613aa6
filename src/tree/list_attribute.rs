use std::collections::HashMap;

use super::attribute::Attribute;
use super::node::{
    Aggregate, Child, ChildMut, ExpressionTree, NodeState, TreeField, UpdateOperation, UpdateValue,
};
use crate::error::Error;
use crate::expression::{ConditionBuilder, NameBuilder, ProjectionBuilder, UpdateBuilder};

/// List or set attribute node with sparse, index-addressed elements
///
/// Elements are created through a factory function, never cloned from a
/// live template, and are traversed in the order they were added.
#[derive(Debug)]
pub struct ListAttribute<T> {
    state: NodeState,
    factory: fn(&str) -> Attribute<T>,
    order: Vec<usize>,
    elements: HashMap<usize, Attribute<T>>,
}

impl<T: ExpressionTree> ListAttribute<T> {
    /// Create an unbuilt list whose elements are built with `T::build_tree`
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_factory(name, T::build_tree)
    }
}

impl<T> ListAttribute<T> {
    /// Create an unbuilt list with a custom element factory
    pub fn with_factory(name: impl Into<String>, factory: fn(&str) -> Attribute<T>) -> Self {
        Self {
            state: NodeState::new(name.into()),
            factory,
            order: Vec::new(),
            elements: HashMap::new(),
        }
    }

    /// Declare elements by index
    ///
    /// A repeated index replaces the stored element but is traversed once
    /// per declaration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyBuilt`] once the list is built.
    pub fn add_elements(&mut self, indices: &[usize]) -> Result<(), Error> {
        if self.state.built {
            return Err(Error::AlreadyBuilt {
                path: self.state.document_path.clone(),
            });
        }

        for &index in indices {
            let element = (self.factory)(&format!("[{index}]"));
            let _ = self.elements.insert(index, element);
            self.order.push(index);
        }
        Ok(())
    }

    /// Element at `index`, if it was declared
    ///
    /// An undeclared index is silently `None`; see [`try_index_mut`](Self::try_index_mut).
    pub fn index(&self, index: usize) -> Option<&Attribute<T>> {
        self.elements.get(&index)
    }

    /// Mutable element at `index`, if it was declared
    ///
    /// An undeclared index is silently `None`; see [`try_index_mut`](Self::try_index_mut).
    pub fn index_mut(&mut self, index: usize) -> Option<&mut Attribute<T>> {
        self.elements.get_mut(&index)
    }

    /// Mutable element at `index`
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingElement`] when `index` was never declared.
    pub fn try_index_mut(&mut self, index: usize) -> Result<&mut Attribute<T>, Error> {
        let path = match self.state.document_path() {
            Some(path) => path.to_string(),
            None => self.state.name.clone(),
        };
        self.elements
            .get_mut(&index)
            .ok_or(Error::MissingElement { path, index })
    }

    /// Declared indices in declaration order, duplicates included
    pub fn indices(&self) -> &[usize] {
        &self.order
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

    /// Whether the list is marked for projection
    pub fn is_projected(&self) -> bool {
        self.state.projected
    }

    /// Pending condition local to this list
    pub fn condition(&self) -> Option<&ConditionBuilder> {
        self.state.condition.as_ref()
    }

    /// Pending update operation
    pub fn operation(&self) -> UpdateOperation {
        self.state.operation
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

    /// Mark the whole list for projection
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
    /// `SET` accepts derived values such as `list_append` as-is.
    pub fn add_value(&mut self, operation: UpdateOperation, value: impl Into<UpdateValue>) {
        self.state.set_update(operation, value.into());
    }

    fn ordered_elements(&self) -> impl Iterator<Item = &Attribute<T>> {
        self.order.iter().filter_map(|index| self.elements.get(index))
    }
}

impl<T: ExpressionTree> Aggregate for ListAttribute<T> {
    fn name(&self) -> &str {
        &self.state.name
    }

    fn build(&mut self, parent_path: &str) -> Result<(), Error> {
        self.state.assign_path(parent_path)?;
        for element in self.elements.values_mut() {
            element.build(&self.state.document_path)?;
        }
        self.state.built = true;
        Ok(())
    }

    fn add_name(&self, acc: Option<ProjectionBuilder>) -> Result<ProjectionBuilder, Error> {
        let acc = self.state.projection_accumulator(acc)?;
        if self.state.projected {
            return Ok(acc.add_names(self.name_builder()?));
        }

        self.ordered_elements()
            .try_fold(acc, |acc, element| element.add_name(Some(acc)))
    }

    fn add_condition(
        &self,
        incoming: Option<ConditionBuilder>,
    ) -> Result<Option<ConditionBuilder>, Error> {
        let outgoing = self.state.merge_condition(incoming)?;
        self.ordered_elements()
            .try_fold(outgoing, |acc, element| element.add_condition(acc))
    }

    fn add_update(&self, acc: Option<UpdateBuilder>) -> Result<UpdateBuilder, Error> {
        let acc = self.state.update_accumulator(acc)?;
        if self.state.has_operation() {
            return self.state.apply_update(acc, true);
        }

        self.ordered_elements()
            .try_fold(acc, |acc, element| element.add_update(Some(acc)))
    }

    fn collect_shadowed_updates(&self, shadowed: bool, paths: &mut Vec<String>) {
        let shadowed = self.state.record_shadowed(shadowed, paths);
        for element in self.ordered_elements() {
            element.collect_shadowed_updates(shadowed, paths);
        }
    }
}

impl<T: ExpressionTree> TreeField for ListAttribute<T> {
    fn named(name: &str) -> Self {
        ListAttribute::new(name)
    }

    fn as_child(&self) -> Child<'_> {
        Child::Attribute(self)
    }

    fn as_child_mut(&mut self) -> ChildMut<'_> {
        ChildMut::Attribute(self)
    }
}
