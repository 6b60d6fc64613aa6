/// SDK integration tests
///
/// Applies aggregated expressions onto `aws-sdk-dynamodb` request builders.
/// The round trip against a real table is ignored by default; run it with
/// `AWS_PROFILE=localstack cargo test -- --ignored`.
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, KeySchemaElement, KeyType, ProvisionedThroughput,
    ScalarAttributeType,
};
use serial_test::serial;

mod helpers;
use helpers::*;

fn offline_client() -> Client {
    let config = aws_sdk_dynamodb::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .build();
    Client::from_conf(config)
}

/// Query request carries key condition, projection and placeholders
#[tokio::test]
async fn test_apply_to_query() {
    let mut item = built_person();
    let person = item.access_mut();
    let pk = person.pk.key_builder().unwrap();
    person
        .pk
        .and_with_key_condition(pk.equal(value("person#1").unwrap()));
    person.name.project().unwrap();

    let expression = item.expression().unwrap();
    let request = expression.apply_to_query(offline_client().query().table_name("people"));
    let input = request.as_input();

    assert_eq!(input.get_key_condition_expression().as_deref(), Some("#0 = :0"));
    assert_eq!(input.get_projection_expression().as_deref(), Some("#1"));
    assert_eq!(
        input.get_expression_attribute_names().as_ref(),
        Some(&expected_names(&["pk", "name"]))
    );
    assert_eq!(
        input
            .get_expression_attribute_values()
            .as_ref()
            .and_then(|values| values.get(":0")),
        Some(&s("person#1"))
    );
}

/// Update request carries update and condition
#[tokio::test]
async fn test_apply_to_update_item() {
    let mut item = built_person();
    let person = item.access_mut();
    let name_path = person.name.name_builder().unwrap();
    person.name.and_with_condition(name_path.attribute_exists());
    person
        .name
        .add_value(UpdateOperation::Set, value("Renamed").unwrap());

    let expression = item.expression().unwrap();
    let request = expression.apply_to_update_item(
        offline_client()
            .update_item()
            .table_name("people")
            .key("pk", s("person#1")),
    );
    let input = request.as_input();

    assert_eq!(
        input.get_condition_expression().as_deref(),
        Some("attribute_exists (#0)")
    );
    assert_eq!(input.get_update_expression().as_deref(), Some("SET #0 = :0\n"));
    assert_eq!(
        input.get_expression_attribute_names().as_ref(),
        Some(&expected_names(&["name"]))
    );
}

/// Put request carries only the condition
#[tokio::test]
async fn test_apply_to_put_item() {
    let mut item = built_person();
    let person = item.access_mut();
    let name_path = person.name.name_builder().unwrap();
    person.name.and_with_condition(name_path.attribute_not_exists());

    let expression = item.expression().unwrap();
    let request = expression.apply_to_put_item(
        offline_client()
            .put_item()
            .table_name("people")
            .item("pk", s("person#1"))
            .item("name", s("New Person")),
    );
    let input = request.as_input();

    assert_eq!(
        input.get_condition_expression().as_deref(),
        Some("attribute_not_exists (#0)")
    );
    assert_eq!(
        input.get_expression_attribute_names().as_ref(),
        Some(&expected_names(&["name"]))
    );
    assert_eq!(input.get_expression_attribute_values(), &None);
    assert_eq!(
        input.get_item().as_ref().and_then(|item| item.get("name")),
        Some(&s("New Person"))
    );
}

/// Scan and delete requests only pick up their own expressions
#[tokio::test]
async fn test_apply_to_scan_and_delete_item() {
    let expression = Builder::new()
        .with_filter(name("amount").greater_than(value(10).unwrap()))
        .build()
        .unwrap();

    let scan = expression.apply_to_scan(offline_client().scan().table_name("transactions"));
    assert_eq!(scan.as_input().get_filter_expression().as_deref(), Some("#0 > :0"));

    let delete = expression.apply_to_delete_item(offline_client().delete_item());
    assert_eq!(delete.as_input().get_condition_expression(), &None);
}

async fn setup_people_table(client: &Client) {
    let result = client
        .create_table()
        .table_name("dynamo_expr_people")
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name("pk")
                .key_type(KeyType::Hash)
                .build()
                .unwrap(),
        )
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name("sk")
                .key_type(KeyType::Range)
                .build()
                .unwrap(),
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name("pk")
                .attribute_type(ScalarAttributeType::S)
                .build()
                .unwrap(),
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name("sk")
                .attribute_type(ScalarAttributeType::S)
                .build()
                .unwrap(),
        )
        .provisioned_throughput(
            ProvisionedThroughput::builder()
                .read_capacity_units(10)
                .write_capacity_units(10)
                .build()
                .unwrap(),
        )
        .send()
        .await;

    // Table may already exist from a previous run
    if let Err(e) = result {
        let exists = e
            .as_service_error()
            .map(|e| e.is_resource_in_use_exception())
            .unwrap_or(false);
        assert!(exists, "Failed to create table: {e:?}");
    }
}

/// Round trip against a live table
#[tokio::test]
#[serial]
#[ignore]
async fn test_live_update_and_query() {
    let client = live_client().await;
    setup_people_table(&client).await;

    let pk = unique_test_key("person");
    let _ = client
        .put_item()
        .table_name("dynamo_expr_people")
        .item("pk", s(&pk))
        .item("sk", s("profile"))
        .item("name", s("Old Name"))
        .item("phone_nos", AttributeValue::L(vec![s("1")]))
        .send()
        .await
        .unwrap();

    let mut item = ItemExpressionBuilder::<PersonTree>::new();
    item.build().unwrap();
    let person = item.access_mut();
    let name_path = person.name.name_builder().unwrap();
    person.name.and_with_condition(name_path.attribute_exists());
    person
        .name
        .add_value(UpdateOperation::Set, value("New Name").unwrap());
    let phones = person.phone_nos.name_builder().unwrap();
    person.phone_nos.add_value(
        UpdateOperation::Set,
        dynamo_expr::expression::SetValueBuilder::list_append(
            phones,
            value(["2"]).unwrap(),
        ),
    );

    let expression = item.expression().unwrap();
    let _ = expression
        .apply_to_update_item(
            client
                .update_item()
                .table_name("dynamo_expr_people")
                .key("pk", s(&pk))
                .key("sk", s("profile")),
        )
        .send()
        .await
        .unwrap();

    let mut query = ItemExpressionBuilder::<PersonTree>::new();
    query.build().unwrap();
    let person = query.access_mut();
    let key = person.pk.key_builder().unwrap();
    person.pk.and_with_key_condition(key.equal(value(&pk).unwrap()));
    person.name.project().unwrap();
    person.phone_nos.project().unwrap();

    let expression = query.expression().unwrap();
    let output = expression
        .apply_to_query(client.query().table_name("dynamo_expr_people"))
        .send()
        .await
        .unwrap();

    let items = output.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].get("name"), Some(&s("New Name")));
    assert_eq!(
        items[0].get("phone_nos"),
        Some(&AttributeValue::L(vec![s("1"), s("2")]))
    );
    assert!(items[0].get("sk").is_none());
}
