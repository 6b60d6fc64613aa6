use std::marker::PhantomData;

use super::node::{Child, ChildMut, KeyAggregate, TreeField, document_path};
use crate::error::Error;
use crate::expression::{KeyBuilder, KeyConditionBuilder, ProjectionBuilder, key, name};

/// Partition or sort key node, always a direct child of the item root
///
/// Carries a key condition instead of a general condition; key nodes take
/// no part in condition or update aggregation.
#[derive(Debug)]
pub struct KeyAttribute<V> {
    name: String,
    document_path: String,
    built: bool,
    key_builder: Option<KeyBuilder>,
    projected: bool,
    key_condition: Option<KeyConditionBuilder>,
    _value: PhantomData<fn() -> V>,
}

impl<V> KeyAttribute<V> {
    /// Create an unbuilt key node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            document_path: String::new(),
            built: false,
            key_builder: None,
            projected: false,
            key_condition: None,
            _value: PhantomData,
        }
    }

    /// Declared wire name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Document path, available once built
    pub fn document_path(&self) -> Option<&str> {
        self.built.then_some(self.document_path.as_str())
    }

    /// Whether `build` has run
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Whether the key is marked for projection
    pub fn is_projected(&self) -> bool {
        self.projected
    }

    /// Pending key condition
    pub fn key_condition(&self) -> Option<&KeyConditionBuilder> {
        self.key_condition.as_ref()
    }

    /// Key reference bound to the document path
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotBuilt`] before build.
    pub fn key_builder(&self) -> Result<KeyBuilder, Error> {
        self.ensure_built("create a key reference").cloned()
    }

    /// Mark the key for projection
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotBuilt`] before build.
    pub fn project(&mut self) -> Result<(), Error> {
        let _ = self.ensure_built("mark this attribute for projection")?;
        self.projected = true;
        Ok(())
    }

    /// AND `key_condition` onto the pending key condition, existing first
    pub fn and_with_key_condition(&mut self, key_condition: KeyConditionBuilder) {
        self.key_condition = Some(match self.key_condition.take() {
            Some(existing) => existing.and(key_condition),
            None => key_condition,
        });
    }

    fn ensure_built(&self, action: &'static str) -> Result<&KeyBuilder, Error> {
        match &self.key_builder {
            Some(key_builder) if self.built => Ok(key_builder),
            _ => Err(Error::NotBuilt {
                name: self.name.clone(),
                action,
            }),
        }
    }
}

impl<V> KeyAggregate for KeyAttribute<V> {
    fn name(&self) -> &str {
        &self.name
    }

    fn build(&mut self, parent_path: &str) -> Result<(), Error> {
        if self.built {
            return Err(Error::AlreadyBuilt {
                path: self.document_path.clone(),
            });
        }
        self.document_path = document_path(parent_path, &self.name);
        self.key_builder = Some(key(self.document_path.clone()));
        self.built = true;
        Ok(())
    }

    fn add_name(&self, acc: Option<ProjectionBuilder>) -> Result<ProjectionBuilder, Error> {
        let _ = self.ensure_built("aggregate projections")?;
        let acc = acc.ok_or_else(|| Error::MissingAccumulator {
            builder: "projection",
            path: self.document_path.clone(),
        })?;

        Ok(if self.projected {
            acc.add_names(name(self.document_path.clone()))
        } else {
            acc
        })
    }

    fn add_key_condition(
        &self,
        incoming: Option<KeyConditionBuilder>,
    ) -> Result<Option<KeyConditionBuilder>, Error> {
        let _ = self.ensure_built("aggregate key conditions")?;
        Ok(match (incoming, &self.key_condition) {
            (Some(incoming), Some(mine)) => Some(incoming.and(mine.clone())),
            (None, Some(mine)) => Some(mine.clone()),
            (incoming, None) => incoming,
        })
    }
}

impl<V> TreeField for KeyAttribute<V> {
    fn named(name: &str) -> Self {
        KeyAttribute::new(name)
    }

    fn as_child(&self) -> Child<'_> {
        Child::Key(self)
    }

    fn as_child_mut(&mut self) -> ChildMut<'_> {
        ChildMut::Key(self)
    }
}
