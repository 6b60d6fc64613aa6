//! Expression-builder tree
//!
//! A typed tree of attribute nodes mirroring an item's shape. The tree is
//! built once to assign document paths; callers then mark nodes for
//! projection, attach conditions and key conditions, and set update
//! operations, and finally read the aggregated expressions back from the
//! [`ItemExpressionBuilder`].

mod attribute;
mod item;
mod key_attribute;
mod list_attribute;
mod node;

pub use attribute::Attribute;
pub use item::ItemExpressionBuilder;
pub use key_attribute::KeyAttribute;
pub use list_attribute::ListAttribute;
pub use node::{
    Aggregate, Child, ChildMut, ExpressionTree, KeyAggregate, Scalar, TreeField, UpdateOperation,
    UpdateValue,
};
