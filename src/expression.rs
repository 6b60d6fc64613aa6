//! DynamoDB expression representation
//!
//! Operands, condition / key condition / update / projection trees and the
//! [`Builder`] that renders them into wire expressions with `#n` name and
//! `:n` value placeholders.
//!
//! ```rust
//! use dynamo_expr::expression::{Builder, key, name, value};
//!
//! # fn main() -> Result<(), dynamo_expr::Error> {
//! let expression = Builder::new()
//!     .with_key_condition(key("pk").equal(value("user#1")?))
//!     .with_filter(name("profile.age").greater_than(value(18)?))
//!     .build()?;
//!
//! assert_eq!(expression.filter(), Some("#0.#1 > :0"));
//! assert_eq!(expression.key_condition(), Some("#2 = :1"));
//! # Ok(())
//! # }
//! ```

mod alias;
mod builder;
mod condition;
mod key_condition;
mod name;
mod operand;
mod projection;
mod sdk;
mod update;

pub use builder::{Builder, Expression};
pub use condition::{AttributeType, Comparator, ConditionBuilder, ConditionFunction, LogicalOp};
pub use key_condition::KeyConditionBuilder;
pub use name::{KeyBuilder, NameBuilder, key, name};
pub use operand::{Operand, SetValueBuilder, SizeBuilder, ValueBuilder, value};
pub use projection::{ProjectionBuilder, names_list};
pub use update::UpdateBuilder;
