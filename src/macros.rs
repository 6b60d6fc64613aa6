/// Declare an expression-builder struct and implement
/// [`ExpressionTree`](crate::ExpressionTree) for it
///
/// Every field is an [`Attribute`](crate::Attribute),
/// [`ListAttribute`](crate::ListAttribute) or
/// [`KeyAttribute`](crate::KeyAttribute) followed by its wire name. Children
/// are traversed in field declaration order.
///
/// ```rust
/// use dynamo_expr::{Attribute, ItemExpressionBuilder, KeyAttribute, ListAttribute, Scalar};
///
/// dynamo_expr::expression_builder! {
///     pub struct OrderTree {
///         customer_id: KeyAttribute<String> = "customer_id",
///         total: Attribute<Scalar<u64>> = "total",
///         lines: ListAttribute<OrderLineTree> = "lines",
///     }
/// }
///
/// dynamo_expr::expression_builder! {
///     pub struct OrderLineTree {
///         sku: Attribute<Scalar<String>> = "sku",
///     }
/// }
///
/// # fn main() -> Result<(), dynamo_expr::Error> {
/// let mut item = ItemExpressionBuilder::<OrderTree>::new();
/// item.access_mut().lines.add_elements(&[0, 2])?;
/// item.build()?;
///
/// if let Some(line) = item.access_mut().lines.index_mut(2) {
///     line.access_mut().sku.project()?;
/// }
/// let projection = item.expression()?;
/// assert_eq!(projection.projection(), Some("#0[2].#1"));
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! expression_builder {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty = $wire:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl $crate::ExpressionTree for $name {
            fn build_tree(name: &str) -> $crate::Attribute<Self> {
                $crate::Attribute::new(
                    name,
                    $name {
                        $($field: <$ty as $crate::TreeField>::named($wire),)*
                    },
                )
            }

            fn children(&self) -> ::std::vec::Vec<$crate::Child<'_>> {
                ::std::vec![$($crate::TreeField::as_child(&self.$field),)*]
            }

            fn children_mut(&mut self) -> ::std::vec::Vec<$crate::ChildMut<'_>> {
                ::std::vec![$($crate::TreeField::as_child_mut(&mut self.$field),)*]
            }
        }
    };
}
