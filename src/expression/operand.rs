use aws_sdk_dynamodb::types::AttributeValue;
use serde::Serialize;

use super::alias::AliasList;
use super::name::NameBuilder;
use crate::error::Error;

/// Literal operand, bound to a `:n` placeholder when rendered
#[derive(Clone, Debug, PartialEq)]
pub struct ValueBuilder {
    value: AttributeValue,
}

/// Marshal a value into a [`ValueBuilder`] through `serde_dynamo`
///
/// # Errors
///
/// Returns [`Error::SerdeDynamo`] when the value cannot be represented as an
/// `AttributeValue`.
pub fn value<T: Serialize>(value: T) -> Result<ValueBuilder, Error> {
    let value: AttributeValue = serde_dynamo::to_attribute_value(value)?;
    Ok(ValueBuilder { value })
}

impl ValueBuilder {
    /// The `NULL` literal
    pub fn null() -> Self {
        Self {
            value: AttributeValue::Null(true),
        }
    }

    /// Marshalled value
    pub fn attribute_value(&self) -> &AttributeValue {
        &self.value
    }

    /// Take the marshalled value
    pub fn into_attribute_value(self) -> AttributeValue {
        self.value
    }

    pub(crate) fn render(&self, aliases: &mut AliasList) -> String {
        aliases.value(&self.value)
    }
}

impl From<AttributeValue> for ValueBuilder {
    fn from(value: AttributeValue) -> Self {
        Self { value }
    }
}

/// `size (<path>)` operand
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizeBuilder {
    name: NameBuilder,
}

impl SizeBuilder {
    pub(crate) fn new(name: NameBuilder) -> Self {
        Self { name }
    }

    pub(crate) fn render(&self, aliases: &mut AliasList) -> Result<String, Error> {
        Ok(format!("size ({})", self.name.render(aliases)?))
    }
}

/// Derived update value, only valid on the right side of `SET`
#[derive(Clone, Debug, PartialEq)]
pub enum SetValueBuilder {
    /// `list_append(<a>, <b>)`
    ListAppend(Operand, Operand),
    /// `if_not_exists(<path>, <fallback>)`
    IfNotExists(NameBuilder, Operand),
    /// `<a> + <b>`
    Plus(Operand, Operand),
    /// `<a> - <b>`
    Minus(Operand, Operand),
}

impl SetValueBuilder {
    /// `list_append(<a>, <b>)`
    pub fn list_append(a: impl Into<Operand>, b: impl Into<Operand>) -> Self {
        Self::ListAppend(a.into(), b.into())
    }

    /// `if_not_exists(<path>, <fallback>)`
    pub fn if_not_exists(path: NameBuilder, fallback: impl Into<Operand>) -> Self {
        Self::IfNotExists(path, fallback.into())
    }

    /// `<a> + <b>`
    pub fn plus(a: impl Into<Operand>, b: impl Into<Operand>) -> Self {
        Self::Plus(a.into(), b.into())
    }

    /// `<a> - <b>`
    pub fn minus(a: impl Into<Operand>, b: impl Into<Operand>) -> Self {
        Self::Minus(a.into(), b.into())
    }

    pub(crate) fn render(&self, aliases: &mut AliasList) -> Result<String, Error> {
        Ok(match self {
            SetValueBuilder::ListAppend(a, b) => {
                let a = a.render(aliases)?;
                format!("list_append({a}, {})", b.render(aliases)?)
            }
            SetValueBuilder::IfNotExists(path, fallback) => {
                let path = path.render(aliases)?;
                format!("if_not_exists({path}, {})", fallback.render(aliases)?)
            }
            SetValueBuilder::Plus(a, b) => {
                let a = a.render(aliases)?;
                format!("{a} + {}", b.render(aliases)?)
            }
            SetValueBuilder::Minus(a, b) => {
                let a = a.render(aliases)?;
                format!("{a} - {}", b.render(aliases)?)
            }
        })
    }
}

/// Any operand of a condition or update action
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// Document path
    Name(NameBuilder),
    /// Literal value
    Value(ValueBuilder),
    /// `size (<path>)`
    Size(SizeBuilder),
    /// Derived update value
    SetValue(Box<SetValueBuilder>),
}

impl Operand {
    pub(crate) fn render(&self, aliases: &mut AliasList) -> Result<String, Error> {
        match self {
            Operand::Name(name) => name.render(aliases),
            Operand::Value(value) => Ok(value.render(aliases)),
            Operand::Size(size) => size.render(aliases),
            Operand::SetValue(set_value) => set_value.render(aliases),
        }
    }
}

impl From<NameBuilder> for Operand {
    fn from(name: NameBuilder) -> Self {
        Operand::Name(name)
    }
}

impl From<ValueBuilder> for Operand {
    fn from(value: ValueBuilder) -> Self {
        Operand::Value(value)
    }
}

impl From<SizeBuilder> for Operand {
    fn from(size: SizeBuilder) -> Self {
        Operand::Size(size)
    }
}

impl From<SetValueBuilder> for Operand {
    fn from(set_value: SetValueBuilder) -> Self {
        Operand::SetValue(Box::new(set_value))
    }
}

impl From<AttributeValue> for Operand {
    fn from(value: AttributeValue) -> Self {
        Operand::Value(value.into())
    }
}
