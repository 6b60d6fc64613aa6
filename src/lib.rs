//! # DynamoDB Expression Trees
//!
//! Type-safe construction of DynamoDB projection, condition, key-condition
//! and update expressions for Rust, with support for:
//! - Typed attribute trees mirroring an item's shape
//! - Sparse, index-addressed list elements
//! - Partition / sort key conditions kept apart from general conditions
//! - Placeholder tables ready for `aws-sdk-dynamodb` requests
//!
//! ## Features
//!
//! - **Two-phase lifecycle**: build the tree once to assign document paths,
//!   then attach intent and aggregate it
//! - **Deterministic output**: traversal follows field declaration order and
//!   list elements follow the order they were added
//! - **Serde values**: literals are marshalled with `serde_dynamo`
//! - **SDK integration**: apply an [`Expression`](expression::Expression)
//!   directly onto query, scan and item request builders
//!
//! ## Quick Start
//!
//! ```rust
//! use dynamo_expr::expression::value;
//! use dynamo_expr::{Attribute, ItemExpressionBuilder, KeyAttribute, Scalar, UpdateOperation};
//!
//! dynamo_expr::expression_builder! {
//!     /// Expression tree of a user item
//!     pub struct UserTree {
//!         user_id: KeyAttribute<String> = "user_id",
//!         email: Attribute<Scalar<String>> = "email",
//!         name: Attribute<Scalar<String>> = "name",
//!     }
//! }
//!
//! fn main() -> Result<(), dynamo_expr::Error> {
//!     let mut item = ItemExpressionBuilder::<UserTree>::new();
//!     item.build()?;
//!
//!     let user = item.access_mut();
//!     let email = user.email.name_builder()?;
//!     user.email.and_with_condition(email.attribute_exists());
//!     user.name.add_value(UpdateOperation::Set, value("John Doe")?);
//!
//!     let expression = item.expression()?;
//!     assert_eq!(expression.condition(), Some("attribute_exists (#0)"));
//!     assert_eq!(expression.update(), Some("SET #1 = :0\n"));
//!     Ok(())
//! }
//! ```
#![deny(
    warnings,
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    unused_allocation,
    unused_comparisons,
    unused_parens,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results,
    deprecated,
    unknown_lints,
    unreachable_code,
    unused_mut
)]

mod macros;

mod config;
mod error;
pub use config::BuilderConfig;
pub use error::Error;

/// DynamoDB expression representation
pub mod expression;

/// Expression-builder tree
pub mod tree;

// Re-export main types for convenience
pub use tree::{
    Aggregate, Attribute, Child, ChildMut, ExpressionTree, ItemExpressionBuilder, KeyAggregate,
    KeyAttribute, ListAttribute, Scalar, TreeField, UpdateOperation, UpdateValue,
};
