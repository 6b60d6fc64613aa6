use std::collections::BTreeMap;
use std::fmt;

use super::alias::AliasList;
use super::name::NameBuilder;
use super::operand::{Operand, ValueBuilder};
use crate::error::Error;

/// Update expression clause; the ordering is the rendering order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Clause {
    Add,
    Delete,
    Remove,
    Set,
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "ADD"),
            Self::Delete => write!(f, "DELETE"),
            Self::Remove => write!(f, "REMOVE"),
            Self::Set => write!(f, "SET"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Action {
    name: NameBuilder,
    operand: Option<Operand>,
}

/// Update expression, grouped by clause
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateBuilder {
    clauses: BTreeMap<Clause, Vec<Action>>,
}

impl UpdateBuilder {
    /// Create an empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// `SET name = operand`
    pub fn set(self, name: NameBuilder, operand: impl Into<Operand>) -> Self {
        self.push(Clause::Set, name, Some(operand.into()))
    }

    /// `REMOVE name`
    pub fn remove(self, name: NameBuilder) -> Self {
        self.push(Clause::Remove, name, None)
    }

    /// `ADD name value`
    pub fn add(self, name: NameBuilder, value: ValueBuilder) -> Self {
        self.push(Clause::Add, name, Some(value.into()))
    }

    /// `DELETE name value`
    pub fn delete(self, name: NameBuilder, value: ValueBuilder) -> Self {
        self.push(Clause::Delete, name, Some(value.into()))
    }

    /// No action has been recorded
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    fn push(mut self, clause: Clause, name: NameBuilder, operand: Option<Operand>) -> Self {
        self.clauses
            .entry(clause)
            .or_default()
            .push(Action { name, operand });
        self
    }

    pub(crate) fn render(&self, aliases: &mut AliasList) -> Result<String, Error> {
        if self.clauses.is_empty() {
            return Err(Error::UnsetParameter("UpdateBuilder"));
        }

        let mut expression = String::new();
        for (clause, actions) in &self.clauses {
            let mut rendered = Vec::with_capacity(actions.len());
            for action in actions {
                let name = action.name.render(aliases)?;
                rendered.push(match (&action.operand, clause) {
                    (None, _) => name,
                    (Some(operand), Clause::Set) => format!("{name} = {}", operand.render(aliases)?),
                    (Some(operand), _) => format!("{name} {}", operand.render(aliases)?),
                });
            }
            expression.push_str(&format!("{clause} {}\n", rendered.join(", ")));
        }
        Ok(expression)
    }
}
