use super::alias::AliasList;
use super::condition::Comparator;
use super::name::KeyBuilder;
use super::operand::ValueBuilder;
use crate::error::Error;

/// Key condition expression tree.
///
/// Only partition and sort key predicates are representable: an `AND` must
/// have the partition key equality on its left and a single sort key
/// predicate on its right.
#[derive(Clone, Debug, PartialEq)]
pub enum KeyConditionBuilder {
    /// `key op value`
    Compare {
        /// Key attribute
        key: KeyBuilder,
        /// Comparison operator
        op: Comparator,
        /// Key value
        value: ValueBuilder,
    },
    /// `key BETWEEN low AND high`
    Between {
        /// Key attribute
        key: KeyBuilder,
        /// Lower bound (inclusive)
        low: ValueBuilder,
        /// Upper bound (inclusive)
        high: ValueBuilder,
    },
    /// `begins_with (key, prefix)`
    BeginsWith {
        /// Key attribute
        key: KeyBuilder,
        /// Prefix value
        prefix: ValueBuilder,
    },
    /// `(left) AND (right)`
    And(Box<KeyConditionBuilder>, Box<KeyConditionBuilder>),
}

impl KeyConditionBuilder {
    /// `(self) AND (right)`
    pub fn and(self, right: KeyConditionBuilder) -> KeyConditionBuilder {
        KeyConditionBuilder::And(Box::new(self), Box::new(right))
    }

    pub(crate) fn render(&self, aliases: &mut AliasList) -> Result<String, Error> {
        Ok(match self {
            KeyConditionBuilder::Compare { key, op, value } => {
                let key = key.render(aliases)?;
                format!("{key} {op} {}", value.render(aliases))
            }
            KeyConditionBuilder::Between { key, low, high } => {
                let key = key.render(aliases)?;
                let low = low.render(aliases);
                format!("{key} BETWEEN {low} AND {}", high.render(aliases))
            }
            KeyConditionBuilder::BeginsWith { key, prefix } => {
                let key = key.render(aliases)?;
                format!("begins_with ({key}, {})", prefix.render(aliases))
            }
            KeyConditionBuilder::And(left, right) => {
                let partition_equality = matches!(
                    **left,
                    KeyConditionBuilder::Compare {
                        op: Comparator::Equal,
                        ..
                    }
                );
                if !partition_equality || matches!(**right, KeyConditionBuilder::And(..)) {
                    return Err(Error::InvalidParameter("KeyConditionBuilder"));
                }
                let left = left.render(aliases)?;
                format!("({left}) AND ({})", right.render(aliases)?)
            }
        })
    }

    fn compare(key: KeyBuilder, op: Comparator, value: ValueBuilder) -> Self {
        KeyConditionBuilder::Compare { key, op, value }
    }
}

impl KeyBuilder {
    /// `key = value`
    pub fn equal(self, value: impl Into<ValueBuilder>) -> KeyConditionBuilder {
        KeyConditionBuilder::compare(self, Comparator::Equal, value.into())
    }

    /// `key < value`
    pub fn less_than(self, value: impl Into<ValueBuilder>) -> KeyConditionBuilder {
        KeyConditionBuilder::compare(self, Comparator::LessThan, value.into())
    }

    /// `key <= value`
    pub fn less_than_equal(self, value: impl Into<ValueBuilder>) -> KeyConditionBuilder {
        KeyConditionBuilder::compare(self, Comparator::LessThanEqual, value.into())
    }

    /// `key > value`
    pub fn greater_than(self, value: impl Into<ValueBuilder>) -> KeyConditionBuilder {
        KeyConditionBuilder::compare(self, Comparator::GreaterThan, value.into())
    }

    /// `key >= value`
    pub fn greater_than_equal(self, value: impl Into<ValueBuilder>) -> KeyConditionBuilder {
        KeyConditionBuilder::compare(self, Comparator::GreaterThanEqual, value.into())
    }

    /// `key BETWEEN low AND high`
    pub fn between(
        self,
        low: impl Into<ValueBuilder>,
        high: impl Into<ValueBuilder>,
    ) -> KeyConditionBuilder {
        KeyConditionBuilder::Between {
            key: self,
            low: low.into(),
            high: high.into(),
        }
    }

    /// `begins_with (key, prefix)`
    pub fn begins_with(self, prefix: impl Into<String>) -> KeyConditionBuilder {
        let prefix = aws_sdk_dynamodb::types::AttributeValue::S(prefix.into());
        KeyConditionBuilder::BeginsWith {
            key: self,
            prefix: prefix.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{key, value};

    fn render(condition: &KeyConditionBuilder) -> Result<String, Error> {
        condition.render(&mut AliasList::default())
    }

    #[test]
    fn test_partition_and_sort_key() {
        let condition = key("pk")
            .equal(value("user#1").unwrap())
            .and(key("sk").begins_with("order#"));
        assert_eq!(render(&condition).unwrap(), "(#0 = :0) AND (begins_with (#1, :1))");
    }

    #[test]
    fn test_sort_key_comparators() {
        let condition = key("pk")
            .equal(value(1).unwrap())
            .and(key("sk").between(value(1).unwrap(), value(5).unwrap()));
        assert_eq!(render(&condition).unwrap(), "(#0 = :0) AND (#1 BETWEEN :1 AND :2)");

        let condition = key("sk").greater_than(value(3).unwrap());
        assert_eq!(render(&condition).unwrap(), "#0 > :0");
    }

    #[test]
    fn test_and_requires_equality_on_left() {
        let condition = key("sk")
            .begins_with("x")
            .and(key("pk").equal(value(1).unwrap()));
        assert!(matches!(
            render(&condition),
            Err(Error::InvalidParameter("KeyConditionBuilder"))
        ));
    }

    #[test]
    fn test_and_rejects_nested_right_side() {
        let condition = key("pk").equal(value("a").unwrap()).and(
            key("sk")
                .equal(value("b").unwrap())
                .and(key("x").equal(value("c").unwrap())),
        );
        assert!(matches!(
            render(&condition),
            Err(Error::InvalidParameter("KeyConditionBuilder"))
        ));
    }
}
