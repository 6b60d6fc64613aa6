use aws_sdk_dynamodb::operation::delete_item::builders::DeleteItemFluentBuilder;
use aws_sdk_dynamodb::operation::get_item::builders::GetItemFluentBuilder;
use aws_sdk_dynamodb::operation::put_item::builders::PutItemFluentBuilder;
use aws_sdk_dynamodb::operation::query::builders::QueryFluentBuilder;
use aws_sdk_dynamodb::operation::scan::builders::ScanFluentBuilder;
use aws_sdk_dynamodb::operation::update_item::builders::UpdateItemFluentBuilder;

use super::builder::Expression;

// Placeholder entries are fed one at a time so that entries already present
// on the request builder are kept.
macro_rules! with_placeholders {
    ($builder:ident, $expression:expr, names) => {
        for (key, name) in &$expression.names {
            $builder = $builder.expression_attribute_names(key, name);
        }
    };
    ($builder:ident, $expression:expr, values) => {
        for (key, value) in &$expression.values {
            $builder = $builder.expression_attribute_values(key, value.clone());
        }
    };
}

impl Expression {
    /// Copy key condition, filter and projection onto a `Query` request
    pub fn apply_to_query(&self, mut builder: QueryFluentBuilder) -> QueryFluentBuilder {
        if let Some(key_condition) = &self.key_condition {
            builder = builder.key_condition_expression(key_condition);
        }
        if let Some(filter) = &self.filter {
            builder = builder.filter_expression(filter);
        }
        if let Some(projection) = &self.projection {
            builder = builder.projection_expression(projection);
        }
        with_placeholders!(builder, self, names);
        with_placeholders!(builder, self, values);
        builder
    }

    /// Copy filter and projection onto a `Scan` request
    pub fn apply_to_scan(&self, mut builder: ScanFluentBuilder) -> ScanFluentBuilder {
        if let Some(filter) = &self.filter {
            builder = builder.filter_expression(filter);
        }
        if let Some(projection) = &self.projection {
            builder = builder.projection_expression(projection);
        }
        with_placeholders!(builder, self, names);
        with_placeholders!(builder, self, values);
        builder
    }

    /// Copy the projection onto a `GetItem` request
    ///
    /// `GetItem` accepts no value placeholders, so the expression should only
    /// carry a projection.
    pub fn apply_to_get_item(&self, mut builder: GetItemFluentBuilder) -> GetItemFluentBuilder {
        if let Some(projection) = &self.projection {
            builder = builder.projection_expression(projection);
        }
        with_placeholders!(builder, self, names);
        builder
    }

    /// Copy the condition onto a `PutItem` request
    pub fn apply_to_put_item(&self, mut builder: PutItemFluentBuilder) -> PutItemFluentBuilder {
        if let Some(condition) = &self.condition {
            builder = builder.condition_expression(condition);
        }
        with_placeholders!(builder, self, names);
        with_placeholders!(builder, self, values);
        builder
    }

    /// Copy update and condition onto an `UpdateItem` request
    pub fn apply_to_update_item(
        &self,
        mut builder: UpdateItemFluentBuilder,
    ) -> UpdateItemFluentBuilder {
        if let Some(update) = &self.update {
            builder = builder.update_expression(update);
        }
        if let Some(condition) = &self.condition {
            builder = builder.condition_expression(condition);
        }
        with_placeholders!(builder, self, names);
        with_placeholders!(builder, self, values);
        builder
    }

    /// Copy the condition onto a `DeleteItem` request
    pub fn apply_to_delete_item(
        &self,
        mut builder: DeleteItemFluentBuilder,
    ) -> DeleteItemFluentBuilder {
        if let Some(condition) = &self.condition {
            builder = builder.condition_expression(condition);
        }
        with_placeholders!(builder, self, names);
        with_placeholders!(builder, self, values);
        builder
    }
}
