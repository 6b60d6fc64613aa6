use std::fmt;
use std::marker::PhantomData;

use super::attribute::Attribute;
use crate::error::Error;
use crate::expression::{
    ConditionBuilder, KeyConditionBuilder, NameBuilder, ProjectionBuilder, SetValueBuilder,
    UpdateBuilder, ValueBuilder, name,
};

/// Access reference type of a tree node
///
/// Implemented by the structs declared through
/// [`expression_builder!`](crate::expression_builder) and by [`Scalar`].
pub trait ExpressionTree: Sized {
    /// Construct an unbuilt node named `name` wrapping a fresh access reference
    fn build_tree(name: &str) -> Attribute<Self>;

    /// Child nodes in declaration order
    fn children(&self) -> Vec<Child<'_>> {
        Vec::new()
    }

    /// Mutable child nodes in declaration order
    fn children_mut(&mut self) -> Vec<ChildMut<'_>> {
        Vec::new()
    }
}

/// Leaf access reference for a primitive or foreign field type `V`
pub struct Scalar<V: ?Sized>(PhantomData<fn() -> V>);

impl<V: ?Sized> Default for Scalar<V> {
    fn default() -> Self {
        Scalar(PhantomData)
    }
}

impl<V: ?Sized> fmt::Debug for Scalar<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar<{}>", std::any::type_name::<V>())
    }
}

impl<V: ?Sized> ExpressionTree for Scalar<V> {
    fn build_tree(name: &str) -> Attribute<Self> {
        Attribute::new(name, Scalar::default())
    }
}

/// Borrowed child node
#[derive(Clone, Copy)]
pub enum Child<'a> {
    /// Plain or list attribute
    Attribute(&'a dyn Aggregate),
    /// Partition or sort key
    Key(&'a dyn KeyAggregate),
}

/// Mutably borrowed child node
pub enum ChildMut<'a> {
    /// Plain or list attribute
    Attribute(&'a mut dyn Aggregate),
    /// Partition or sort key
    Key(&'a mut dyn KeyAggregate),
}

impl fmt::Debug for Child<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Child::Attribute(node) => write!(f, "Attribute({})", node.name()),
            Child::Key(node) => write!(f, "Key({})", node.name()),
        }
    }
}

impl fmt::Debug for ChildMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildMut::Attribute(node) => write!(f, "Attribute({})", node.name()),
            ChildMut::Key(node) => write!(f, "Key({})", node.name()),
        }
    }
}

impl Child<'_> {
    pub(crate) fn add_name(self, acc: ProjectionBuilder) -> Result<ProjectionBuilder, Error> {
        match self {
            Child::Attribute(node) => node.add_name(Some(acc)),
            Child::Key(node) => node.add_name(Some(acc)),
        }
    }

    pub(crate) fn add_condition(
        self,
        incoming: Option<ConditionBuilder>,
    ) -> Result<Option<ConditionBuilder>, Error> {
        match self {
            Child::Attribute(node) => node.add_condition(incoming),
            Child::Key(_) => Ok(incoming),
        }
    }

    pub(crate) fn add_update(self, acc: UpdateBuilder) -> Result<UpdateBuilder, Error> {
        match self {
            Child::Attribute(node) => node.add_update(Some(acc)),
            Child::Key(_) => Ok(acc),
        }
    }

    pub(crate) fn add_key_condition(
        self,
        incoming: Option<KeyConditionBuilder>,
    ) -> Result<Option<KeyConditionBuilder>, Error> {
        match self {
            Child::Key(node) => node.add_key_condition(incoming),
            Child::Attribute(_) => Ok(incoming),
        }
    }

    pub(crate) fn collect_shadowed_updates(self, shadowed: bool, paths: &mut Vec<String>) {
        match self {
            Child::Attribute(node) => {
                node.collect_shadowed_updates(shadowed, paths)
            }
            Child::Key(_) => {}
        }
    }
}

impl ChildMut<'_> {
    pub(crate) fn build(self, parent_path: &str) -> Result<(), Error> {
        match self {
            ChildMut::Attribute(node) => node.build(parent_path),
            ChildMut::Key(node) => node.build(parent_path),
        }
    }
}

/// Capabilities of plain and list nodes
pub trait Aggregate {
    /// Declared wire name
    fn name(&self) -> &str;

    /// Assign the document path below `parent_path` and build the subtree
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyBuilt`] when the node (or a descendant) was
    /// already built.
    fn build(&mut self, parent_path: &str) -> Result<(), Error>;

    /// Append the paths of projected nodes in traversal order
    ///
    /// A projected node is appended as a whole and its descendants are not
    /// visited.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotBuilt`] before build and
    /// [`Error::MissingAccumulator`] when `acc` is `None`.
    fn add_name(&self, acc: Option<ProjectionBuilder>) -> Result<ProjectionBuilder, Error>;

    /// Fold pending conditions into `incoming`, as `incoming AND mine`
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotBuilt`] before build.
    fn add_condition(
        &self,
        incoming: Option<ConditionBuilder>,
    ) -> Result<Option<ConditionBuilder>, Error>;

    /// Apply pending update operations onto `acc`
    ///
    /// A node carrying an operation does not visit its descendants; their
    /// update intent is dropped without error unless
    /// [`BuilderConfig::strict_updates`](crate::BuilderConfig::strict_updates)
    /// is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotBuilt`] before build,
    /// [`Error::MissingAccumulator`] when `acc` is `None` and
    /// [`Error::UnsupportedUpdateValue`] for a derived value the node cannot
    /// carry.
    fn add_update(&self, acc: Option<UpdateBuilder>) -> Result<UpdateBuilder, Error>;

    /// Push the paths of descendants whose update operations are shadowed
    /// by an operation on an ancestor
    fn collect_shadowed_updates(&self, shadowed: bool, paths: &mut Vec<String>);
}

/// Capabilities of partition and sort key nodes
pub trait KeyAggregate {
    /// Declared wire name
    fn name(&self) -> &str;

    /// Assign the document path below `parent_path`
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyBuilt`] on a second call.
    fn build(&mut self, parent_path: &str) -> Result<(), Error>;

    /// Append the key path when projected
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotBuilt`] before build and
    /// [`Error::MissingAccumulator`] when `acc` is `None`.
    fn add_name(&self, acc: Option<ProjectionBuilder>) -> Result<ProjectionBuilder, Error>;

    /// Fold the pending key condition into `incoming`, as `incoming AND mine`
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotBuilt`] before build.
    fn add_key_condition(
        &self,
        incoming: Option<KeyConditionBuilder>,
    ) -> Result<Option<KeyConditionBuilder>, Error>;
}

/// Field of a struct declared through
/// [`expression_builder!`](crate::expression_builder)
pub trait TreeField {
    /// Construct the unbuilt node for the wire name `name`
    fn named(name: &str) -> Self;

    /// Borrow as a child node
    fn as_child(&self) -> Child<'_>;

    /// Mutably borrow as a child node
    fn as_child_mut(&mut self) -> ChildMut<'_>;
}

/// Pending update operation of a node
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateOperation {
    /// Nothing to do here, descend into children
    #[default]
    NoOp,
    /// `SET path = value`
    Set,
    /// `REMOVE path`
    Remove,
    /// `ADD path value`
    Add,
    /// `DELETE path value`
    Delete,
}

/// Payload of a pending update operation
#[derive(Clone, Debug, Default, PartialEq)]
pub enum UpdateValue {
    /// No payload; written as `NULL` by value-carrying operations
    #[default]
    None,
    /// Literal value
    Literal(ValueBuilder),
    /// Derived value such as `list_append`, only supported on list nodes
    Derived(SetValueBuilder),
}

impl From<ValueBuilder> for UpdateValue {
    fn from(value: ValueBuilder) -> Self {
        UpdateValue::Literal(value)
    }
}

impl From<SetValueBuilder> for UpdateValue {
    fn from(value: SetValueBuilder) -> Self {
        UpdateValue::Derived(value)
    }
}

impl From<Option<ValueBuilder>> for UpdateValue {
    fn from(value: Option<ValueBuilder>) -> Self {
        value.map_or(UpdateValue::None, UpdateValue::Literal)
    }
}

/// Document path of a child named `name` below `parent`
///
/// List elements are named `[i]` and attach without a separator.
pub(crate) fn document_path(parent: &str, name: &str) -> String {
    if name.ends_with(']') {
        format!("{parent}{name}")
    } else if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

/// State shared by plain and list nodes
///
/// The build latch freezes the structure; projection, condition and update
/// intent stay writable afterwards.
#[derive(Debug)]
pub(crate) struct NodeState {
    pub(crate) name: String,
    pub(crate) document_path: String,
    pub(crate) built: bool,
    name_builder: Option<NameBuilder>,
    pub(crate) projected: bool,
    pub(crate) condition: Option<ConditionBuilder>,
    pub(crate) operation: UpdateOperation,
    pub(crate) value: UpdateValue,
}

impl NodeState {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            document_path: String::new(),
            built: false,
            name_builder: None,
            projected: false,
            condition: None,
            operation: UpdateOperation::NoOp,
            value: UpdateValue::None,
        }
    }

    /// First half of a build: children are built by the owner afterwards
    pub(crate) fn assign_path(&mut self, parent_path: &str) -> Result<(), Error> {
        if self.built {
            return Err(Error::AlreadyBuilt {
                path: self.document_path.clone(),
            });
        }
        self.document_path = document_path(parent_path, &self.name);
        self.name_builder = Some(name(self.document_path.clone()));
        Ok(())
    }

    pub(crate) fn document_path(&self) -> Option<&str> {
        self.built.then_some(self.document_path.as_str())
    }

    pub(crate) fn name_builder(&self, action: &'static str) -> Result<&NameBuilder, Error> {
        match &self.name_builder {
            Some(name_builder) if self.built => Ok(name_builder),
            _ => Err(Error::NotBuilt {
                name: self.name.clone(),
                action,
            }),
        }
    }

    pub(crate) fn project(&mut self) -> Result<(), Error> {
        let _ = self.name_builder("mark this attribute for projection")?;
        self.projected = true;
        Ok(())
    }

    pub(crate) fn and_with_condition(&mut self, condition: ConditionBuilder) {
        self.condition = Some(match self.condition.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
    }

    pub(crate) fn set_update(&mut self, operation: UpdateOperation, value: UpdateValue) {
        self.operation = operation;
        self.value = value;
    }

    pub(crate) fn projection_accumulator(
        &self,
        acc: Option<ProjectionBuilder>,
    ) -> Result<ProjectionBuilder, Error> {
        let _ = self.name_builder("aggregate projections")?;
        acc.ok_or_else(|| Error::MissingAccumulator {
            builder: "projection",
            path: self.document_path.clone(),
        })
    }

    pub(crate) fn update_accumulator(
        &self,
        acc: Option<UpdateBuilder>,
    ) -> Result<UpdateBuilder, Error> {
        let _ = self.name_builder("aggregate updates")?;
        acc.ok_or_else(|| Error::MissingAccumulator {
            builder: "update",
            path: self.document_path.clone(),
        })
    }

    /// `incoming AND mine`, or whichever side is present
    pub(crate) fn merge_condition(
        &self,
        incoming: Option<ConditionBuilder>,
    ) -> Result<Option<ConditionBuilder>, Error> {
        let _ = self.name_builder("aggregate conditions")?;
        Ok(match (incoming, &self.condition) {
            (Some(incoming), Some(mine)) => Some(incoming.and(mine.clone())),
            (None, Some(mine)) => Some(mine.clone()),
            (incoming, None) => incoming,
        })
    }

    /// Apply this node's own operation; a `NoOp` returns `acc` untouched
    pub(crate) fn apply_update(
        &self,
        acc: UpdateBuilder,
        derived_allowed: bool,
    ) -> Result<UpdateBuilder, Error> {
        let name = self.name_builder("aggregate updates")?.clone();
        Ok(match self.operation {
            UpdateOperation::NoOp => acc,
            UpdateOperation::Remove => acc.remove(name),
            UpdateOperation::Set => match &self.value {
                UpdateValue::Derived(derived) if derived_allowed => acc.set(name, derived.clone()),
                _ => acc.set(name, self.literal()?),
            },
            UpdateOperation::Add => acc.add(name, self.literal()?),
            UpdateOperation::Delete => acc.delete(name, self.literal()?),
        })
    }

    fn literal(&self) -> Result<ValueBuilder, Error> {
        match &self.value {
            UpdateValue::None => Ok(ValueBuilder::null()),
            UpdateValue::Literal(value) => Ok(value.clone()),
            UpdateValue::Derived(_) => Err(Error::UnsupportedUpdateValue {
                path: self.document_path.clone(),
            }),
        }
    }

    pub(crate) fn has_operation(&self) -> bool {
        self.operation != UpdateOperation::NoOp
    }

    /// Record this node when shadowed; returns whether descendants are shadowed
    pub(crate) fn record_shadowed(&self, shadowed: bool, paths: &mut Vec<String>) -> bool {
        if shadowed && self.has_operation() {
            paths.push(self.document_path.clone());
        }
        shadowed || self.has_operation()
    }
}
