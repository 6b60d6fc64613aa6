/// Projection aggregation tests
///
/// Marks nodes of the person tree for projection and checks the rendered
/// projection expression and name table.
mod helpers;
use helpers::*;

/// Marking a node hides the marks of its descendants
#[test]
fn test_top_level_attribute_projection() {
    let mut item = built_person();
    let person = item.access_mut();
    person.pk.project().unwrap();
    person.sk.project().unwrap();
    person.name.project().unwrap();
    person.bank_details.project().unwrap();
    person.family_details.project().unwrap();

    // Below an already projected node, so it never reaches the output
    person
        .family_details
        .access_mut()
        .is_married
        .project()
        .unwrap();

    let projection = item.build_projection_builder().unwrap();
    let expr = Builder::new().with_projection(projection).build().unwrap();

    assert_eq!(
        expr.names(),
        &expected_names(&["pk", "sk", "name", "bank_details", "family_details"])
    );
    assert_eq!(expr.projection(), Some("#0, #1, #2, #3, #4"));
    assert!(expr.values().is_empty());
    assert_eq!(expr.update(), None);
}

/// Projection of leaves inside list elements, in traversal order
#[test]
fn test_primitive_attribute_projection() {
    let mut item = built_person();
    let person = item.access_mut();
    person.pk.project().unwrap();
    person.sk.project().unwrap();
    person.name.project().unwrap();

    let accounts = &mut person.bank_details.access_mut().accounts;
    for index in [1, 3, 5] {
        let account = accounts.index_mut(index).unwrap().access_mut();
        account.account_type.project().unwrap();
        account.bank_account_number.project().unwrap();
    }

    let family = person.family_details.access_mut();
    family.is_married.project().unwrap();
    for index in [2, 10] {
        let child = family.children.index_mut(index).unwrap().access_mut();
        child.dob.project().unwrap();
        child.name.project().unwrap();
    }

    let projection = item.build_projection_builder().unwrap();
    let expr = Builder::new().with_projection(projection).build().unwrap();

    assert_eq!(
        expr.names(),
        &expected_names(&[
            "pk",
            "sk",
            "name",
            "bank_details",
            "accounts",
            "bank_account_number",
            "account_type",
            "family_details",
            "children",
            "dob",
            "is_married",
        ])
    );
    assert_eq!(
        expr.projection(),
        Some(
            "#0, #1, #2, #3.#4[1].#5, #3.#4[1].#6, #3.#4[3].#5, #3.#4[3].#6, #3.#4[5].#5, \
             #3.#4[5].#6, #7.#8[2].#2, #7.#8[2].#9, #7.#8[10].#2, #7.#8[10].#9, #7.#10"
        )
    );
    assert!(expr.values().is_empty());
}

/// List elements are traversed in the order they were added
#[test]
fn test_list_elements_follow_insertion_order() {
    for order in [[2, 10], [10, 2]] {
        let mut item = ItemExpressionBuilder::<PersonTree>::new();
        item.access_mut()
            .family_details
            .access_mut()
            .children
            .add_elements(&order)
            .unwrap();
        item.build().unwrap();

        let children = &mut item.access_mut().family_details.access_mut().children;
        for index in order {
            children.index_mut(index).unwrap().project().unwrap();
        }

        let projection = item.build_projection_builder().unwrap();
        let paths: Vec<&str> = projection.names().iter().map(|n| n.path()).collect();
        let expected: Vec<String> = order
            .iter()
            .map(|index| format!("family_details.children[{index}]"))
            .collect();
        assert_eq!(paths, expected);
    }
}

/// Nothing marked yields an empty projection, which cannot be rendered
#[test]
fn test_empty_projection() {
    let item = built_person();
    let projection = item.build_projection_builder().unwrap();
    assert!(projection.is_empty());

    let result = Builder::new().with_projection(projection).build();
    assert!(matches!(result, Err(Error::UnsetParameter("ProjectionBuilder"))));
}

/// Projection paths of the built tree
#[test]
fn test_document_paths() {
    let item = built_person();
    let person = item.access();
    assert_eq!(person.name.document_path(), Some("name"));
    assert_eq!(
        person.bank_details.access().accounts.document_path(),
        Some("bank_details.accounts")
    );
    let account = person.bank_details.access().accounts.index(3).unwrap();
    assert_eq!(
        account.access().bank_account_number.document_path(),
        Some("bank_details.accounts[3].bank_account_number")
    );
    assert_eq!(
        person.phone_nos.index(14).unwrap().document_path(),
        Some("phone_nos[14]")
    );
}
