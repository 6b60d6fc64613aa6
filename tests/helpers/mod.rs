/// Test helpers and fixtures for expression tree integration tests
///
/// This module provides common test utilities, fixtures, and helper functions
/// used across all integration tests.
pub mod fixtures;

pub use dynamo_expr::expression::{Builder, Expression, name, value};
pub use dynamo_expr::{BuilderConfig, Error, ItemExpressionBuilder, UpdateOperation};
pub use serde::{Deserialize, Serialize};

// Re-export common fixtures
pub use fixtures::{BankAccount, Child, PersonTree, SAVINGS};

#[allow(unused_imports)]
pub use fixtures::TransactionTree;

use aws_sdk_dynamodb::types::AttributeValue;

/// Person tree with the list elements used across tests, already built
///
/// Accounts 1, 3 and 5, children 2 and 10, phone numbers 12 and 14.
#[allow(dead_code)]
pub fn built_person() -> ItemExpressionBuilder<PersonTree> {
    built_person_with(BuilderConfig::default())
}

/// Same as [`built_person`] with an explicit configuration
#[allow(dead_code)]
pub fn built_person_with(config: BuilderConfig) -> ItemExpressionBuilder<PersonTree> {
    let mut item = ItemExpressionBuilder::<PersonTree>::with_config(config);
    let person = item.access_mut();
    person
        .bank_details
        .access_mut()
        .accounts
        .add_elements(&[1, 3, 5])
        .unwrap();
    person
        .family_details
        .access_mut()
        .children
        .add_elements(&[2, 10])
        .unwrap();
    person.phone_nos.add_elements(&[12, 14]).unwrap();
    item.build().unwrap();
    item
}

/// Expected `#n -> name` table
#[allow(dead_code)]
pub fn expected_names(names: &[&str]) -> std::collections::HashMap<String, String> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| (format!("#{index}"), name.to_string()))
        .collect()
}

/// String attribute value
#[allow(dead_code)]
pub fn s(value: &str) -> AttributeValue {
    AttributeValue::S(value.to_string())
}

/// Number attribute value
#[allow(dead_code)]
pub fn n(value: &str) -> AttributeValue {
    AttributeValue::N(value.to_string())
}

/// DynamoDB client for the opt-in live tests
///
/// Honors `AWS_PROFILE=localstack` by targeting the local endpoint.
#[allow(dead_code)]
pub async fn live_client() -> aws_sdk_dynamodb::Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if std::env::var("AWS_PROFILE").unwrap_or_default() == "localstack" {
        loader = loader.endpoint_url("http://127.0.0.1:4566");
    }
    aws_sdk_dynamodb::Client::new(&loader.load().await)
}

/// Generate a unique partition key for test isolation
#[allow(dead_code)]
pub fn unique_test_key(prefix: &str) -> String {
    format!("{prefix}#{}", rusty_ulid::generate_ulid_string())
}
