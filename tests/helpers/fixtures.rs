//! Common test fixtures and data structures
//!
//! Defines the person data model used across the integration tests together
//! with the expression trees mirroring its shape.

use super::{Deserialize, Serialize};
use dynamo_expr::{Attribute, KeyAttribute, ListAttribute, Scalar};

/// Savings account type
pub const SAVINGS: u8 = 0;

/// Bank account payload
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct BankAccount {
    pub bank_account_number: u64,
    pub account_type: u8,
}

/// Child payload
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Child {
    pub name: String,
    pub dob: String,
}

dynamo_expr::expression_builder! {
    /// Expression tree of a bank account
    pub struct BankAccountTree {
        bank_account_number: Attribute<Scalar<u64>> = "bank_account_number",
        account_type: Attribute<Scalar<u8>> = "account_type",
    }
}

dynamo_expr::expression_builder! {
    /// Expression tree of bank details; `accounts` is stored as a set
    pub struct BankDetailsTree {
        accounts: ListAttribute<BankAccountTree> = "accounts",
    }
}

dynamo_expr::expression_builder! {
    /// Expression tree of a child
    pub struct ChildTree {
        name: Attribute<Scalar<String>> = "name",
        dob: Attribute<Scalar<String>> = "dob",
    }
}

dynamo_expr::expression_builder! {
    /// Expression tree of family details
    pub struct FamilyDetailTree {
        children: ListAttribute<ChildTree> = "children",
        is_married: Attribute<Scalar<bool>> = "is_married",
    }
}

dynamo_expr::expression_builder! {
    /// Expression tree of a person item
    pub struct PersonTree {
        pk: KeyAttribute<String> = "pk",
        sk: KeyAttribute<String> = "sk",
        name: Attribute<Scalar<String>> = "name",
        bank_details: Attribute<BankDetailsTree> = "bank_details",
        family_details: Attribute<FamilyDetailTree> = "family_details",
        phone_nos: ListAttribute<Scalar<String>> = "phone_nos",
    }
}

dynamo_expr::expression_builder! {
    /// Expression tree of a transaction item
    pub struct TransactionTree {
        user_id: KeyAttribute<String> = "user_id",
        transaction_id: KeyAttribute<String> = "transaction_id",
        amount: Attribute<Scalar<u64>> = "amount",
    }
}
