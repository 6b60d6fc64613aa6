use aws_sdk_dynamodb::types::AttributeValue;
use std::fmt;

use super::alias::AliasList;
use super::name::NameBuilder;
use super::operand::{Operand, SizeBuilder, ValueBuilder};
use crate::error::Error;

/// Condition (or filter) expression tree.
#[derive(Clone, Debug, PartialEq)]
pub enum ConditionBuilder {
    /// `left op right`
    Compare {
        /// Left-hand operand
        left: Operand,
        /// Comparison operator
        op: Comparator,
        /// Right-hand operand
        right: Operand,
    },
    /// `value BETWEEN low AND high`
    Between {
        /// Value to test
        value: Operand,
        /// Lower bound (inclusive)
        low: Operand,
        /// Upper bound (inclusive)
        high: Operand,
    },
    /// `value IN (candidates...)`
    In {
        /// Value to search for
        value: Operand,
        /// Candidate values
        candidates: Vec<Operand>,
    },
    /// `(left) AND (right)` or `(left) OR (right)`
    Logical {
        /// Logical operator
        op: LogicalOp,
        /// Left-hand condition
        left: Box<ConditionBuilder>,
        /// Right-hand condition
        right: Box<ConditionBuilder>,
    },
    /// `NOT (condition)`
    Not(Box<ConditionBuilder>),
    /// `function (path[, argument])`
    Function {
        /// Function name
        function: ConditionFunction,
        /// Attribute the function applies to
        path: NameBuilder,
        /// Second argument, rendered as a value placeholder
        argument: Option<ValueBuilder>,
    },
}

/// Comparison operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparator {
    /// `=`
    Equal,
    /// `<>`
    NotEqual,
    /// `<`
    LessThan,
    /// `<=`
    LessThanEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanEqual,
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "="),
            Self::NotEqual => write!(f, "<>"),
            Self::LessThan => write!(f, "<"),
            Self::LessThanEqual => write!(f, "<="),
            Self::GreaterThan => write!(f, ">"),
            Self::GreaterThanEqual => write!(f, ">="),
        }
    }
}

/// Logical operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicalOp {
    /// `AND`
    And,
    /// `OR`
    Or,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
        }
    }
}

/// Condition functions applied to a document path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConditionFunction {
    /// `attribute_exists (path)`
    AttributeExists,
    /// `attribute_not_exists (path)`
    AttributeNotExists,
    /// `attribute_type (path, type)`
    AttributeType,
    /// `begins_with (path, prefix)`
    BeginsWith,
    /// `contains (path, operand)`
    Contains,
}

impl fmt::Display for ConditionFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AttributeExists => write!(f, "attribute_exists"),
            Self::AttributeNotExists => write!(f, "attribute_not_exists"),
            Self::AttributeType => write!(f, "attribute_type"),
            Self::BeginsWith => write!(f, "begins_with"),
            Self::Contains => write!(f, "contains"),
        }
    }
}

/// DynamoDB attribute type descriptors for `attribute_type`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeType {
    /// `S`
    String,
    /// `SS`
    StringSet,
    /// `N`
    Number,
    /// `NS`
    NumberSet,
    /// `B`
    Binary,
    /// `BS`
    BinarySet,
    /// `BOOL`
    Boolean,
    /// `NULL`
    Null,
    /// `L`
    List,
    /// `M`
    Map,
}

impl AttributeType {
    /// Wire descriptor
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "S",
            Self::StringSet => "SS",
            Self::Number => "N",
            Self::NumberSet => "NS",
            Self::Binary => "B",
            Self::BinarySet => "BS",
            Self::Boolean => "BOOL",
            Self::Null => "NULL",
            Self::List => "L",
            Self::Map => "M",
        }
    }
}

impl ConditionBuilder {
    /// `(self) AND (right)`
    pub fn and(self, right: ConditionBuilder) -> ConditionBuilder {
        ConditionBuilder::Logical {
            op: LogicalOp::And,
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    /// `(self) OR (right)`
    pub fn or(self, right: ConditionBuilder) -> ConditionBuilder {
        ConditionBuilder::Logical {
            op: LogicalOp::Or,
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    /// `NOT (self)`
    pub fn not(self) -> ConditionBuilder {
        ConditionBuilder::Not(Box::new(self))
    }

    pub(crate) fn render(&self, aliases: &mut AliasList) -> Result<String, Error> {
        Ok(match self {
            ConditionBuilder::Compare { left, op, right } => {
                let left = left.render(aliases)?;
                format!("{left} {op} {}", right.render(aliases)?)
            }
            ConditionBuilder::Between { value, low, high } => {
                let value = value.render(aliases)?;
                let low = low.render(aliases)?;
                format!("{value} BETWEEN {low} AND {}", high.render(aliases)?)
            }
            ConditionBuilder::In { value, candidates } => {
                if candidates.is_empty() {
                    return Err(Error::InvalidParameter("ConditionBuilder"));
                }
                let value = value.render(aliases)?;
                let candidates = candidates
                    .iter()
                    .map(|candidate| candidate.render(aliases))
                    .collect::<Result<Vec<_>, _>>()?;
                format!("{value} IN ({})", candidates.join(", "))
            }
            ConditionBuilder::Logical { op, left, right } => {
                let left = left.render(aliases)?;
                format!("({left}) {op} ({})", right.render(aliases)?)
            }
            ConditionBuilder::Not(condition) => format!("NOT ({})", condition.render(aliases)?),
            ConditionBuilder::Function {
                function,
                path,
                argument,
            } => {
                let path = path.render(aliases)?;
                match argument {
                    Some(argument) => format!("{function} ({path}, {})", argument.render(aliases)),
                    None => format!("{function} ({path})"),
                }
            }
        })
    }
}

fn function(
    function: ConditionFunction,
    path: NameBuilder,
    argument: Option<AttributeValue>,
) -> ConditionBuilder {
    ConditionBuilder::Function {
        function,
        path,
        argument: argument.map(ValueBuilder::from),
    }
}

impl NameBuilder {
    /// `attribute_exists (path)`
    pub fn attribute_exists(self) -> ConditionBuilder {
        function(ConditionFunction::AttributeExists, self, None)
    }

    /// `attribute_not_exists (path)`
    pub fn attribute_not_exists(self) -> ConditionBuilder {
        function(ConditionFunction::AttributeNotExists, self, None)
    }

    /// `attribute_type (path, type)`
    pub fn attribute_type(self, attribute_type: AttributeType) -> ConditionBuilder {
        let descriptor = AttributeValue::S(attribute_type.as_str().to_string());
        function(ConditionFunction::AttributeType, self, Some(descriptor))
    }

    /// `begins_with (path, prefix)`
    pub fn begins_with(self, prefix: impl Into<String>) -> ConditionBuilder {
        let prefix = AttributeValue::S(prefix.into());
        function(ConditionFunction::BeginsWith, self, Some(prefix))
    }

    /// `contains (path, substr)`
    pub fn contains(self, substr: impl Into<String>) -> ConditionBuilder {
        let substr = AttributeValue::S(substr.into());
        function(ConditionFunction::Contains, self, Some(substr))
    }
}

macro_rules! impl_comparators {
    ($($operand:ty),* $(,)?) => {
        $(
            impl $operand {
                /// `self = right`
                pub fn equal(self, right: impl Into<Operand>) -> ConditionBuilder {
                    self.compare(Comparator::Equal, right)
                }

                /// `self <> right`
                pub fn not_equal(self, right: impl Into<Operand>) -> ConditionBuilder {
                    self.compare(Comparator::NotEqual, right)
                }

                /// `self < right`
                pub fn less_than(self, right: impl Into<Operand>) -> ConditionBuilder {
                    self.compare(Comparator::LessThan, right)
                }

                /// `self <= right`
                pub fn less_than_equal(self, right: impl Into<Operand>) -> ConditionBuilder {
                    self.compare(Comparator::LessThanEqual, right)
                }

                /// `self > right`
                pub fn greater_than(self, right: impl Into<Operand>) -> ConditionBuilder {
                    self.compare(Comparator::GreaterThan, right)
                }

                /// `self >= right`
                pub fn greater_than_equal(self, right: impl Into<Operand>) -> ConditionBuilder {
                    self.compare(Comparator::GreaterThanEqual, right)
                }

                /// `self BETWEEN low AND high`
                pub fn between(
                    self,
                    low: impl Into<Operand>,
                    high: impl Into<Operand>,
                ) -> ConditionBuilder {
                    ConditionBuilder::Between {
                        value: self.into(),
                        low: low.into(),
                        high: high.into(),
                    }
                }

                /// `self IN (candidates...)`
                pub fn is_in<I, O>(self, candidates: I) -> ConditionBuilder
                where
                    I: IntoIterator<Item = O>,
                    O: Into<Operand>,
                {
                    ConditionBuilder::In {
                        value: self.into(),
                        candidates: candidates.into_iter().map(Into::into).collect(),
                    }
                }

                fn compare(self, op: Comparator, right: impl Into<Operand>) -> ConditionBuilder {
                    ConditionBuilder::Compare {
                        left: self.into(),
                        op,
                        right: right.into(),
                    }
                }
            }
        )*
    };
}

impl_comparators!(NameBuilder, ValueBuilder, SizeBuilder);
