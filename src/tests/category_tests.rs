use crate::core::errors::CatalogError;
use crate::core::models::category::{CategoryUpdate, NewCategory};
use crate::core::validation::validate;
use crate::tests::create_test_service;
use serde_json::json;

fn new_category(name: &str, description: Option<&str>) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        description: description.map(String::from),
    }
}

#[tokio::test]
async fn test_create_and_get_category() {
    let service = create_test_service();
    let created = service
        .create_category(new_category("Shoes", Some("Footwear")))
        .await
        .unwrap();

    assert_eq!(created.id.len(), 24);
    assert!(created.id.chars().all(|c| c.is_ascii_hexdigit()));

    let fetched = service.get_category(&created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.description.as_deref(), Some("Footwear"));
}

#[tokio::test]
async fn test_duplicate_category_name_is_rejected() {
    let service = create_test_service();
    service.create_category(new_category("Shoes", None)).await.unwrap();

    let result = service.create_category(new_category("Shoes", Some("again"))).await;
    assert!(matches!(
        result,
        Err(CatalogError::DuplicateKey { field: "name", .. })
    ));
    assert_eq!(service.list_categories().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_missing_category() {
    let service = create_test_service();
    let result = service.get_category("000000000000000000000000").await;
    assert!(matches!(result, Err(CatalogError::NotFound("Category"))));

    let result = service.get_category("not-an-id").await;
    assert!(matches!(result, Err(CatalogError::NotFound(_))));
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let service = create_test_service();
    let created = service
        .create_category(new_category("Shoes", Some("Footwear")))
        .await
        .unwrap();

    let updated = service
        .update_category(
            &created.id,
            CategoryUpdate {
                name: Some("Boots".to_string()),
                description: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Boots");
    assert_eq!(updated.description.as_deref(), Some("Footwear"));
    assert_eq!(service.get_category(&created.id).await.unwrap(), updated);
}

#[tokio::test]
async fn test_rename_to_taken_name_is_rejected() {
    let service = create_test_service();
    service.create_category(new_category("Shoes", None)).await.unwrap();
    let hats = service.create_category(new_category("Hats", None)).await.unwrap();

    let result = service
        .update_category(
            &hats.id,
            CategoryUpdate {
                name: Some("Shoes".to_string()),
                description: None,
            },
        )
        .await;
    assert!(matches!(result, Err(CatalogError::DuplicateKey { .. })));

    // Renaming to its own name is not a conflict.
    let same = service
        .update_category(
            &hats.id,
            CategoryUpdate {
                name: Some("Hats".to_string()),
                description: Some("Headwear".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(same.description.as_deref(), Some("Headwear"));
}

#[tokio::test]
async fn test_update_missing_category() {
    let service = create_test_service();
    let result = service
        .update_category("000000000000000000000000", CategoryUpdate::default())
        .await;
    assert!(matches!(result, Err(CatalogError::NotFound("Category"))));
}

#[tokio::test]
async fn test_delete_category() {
    let service = create_test_service();
    let created = service.create_category(new_category("Shoes", None)).await.unwrap();

    service.delete_category(&created.id).await.unwrap();
    assert!(matches!(
        service.get_category(&created.id).await,
        Err(CatalogError::NotFound(_))
    ));
    assert!(matches!(
        service.delete_category(&created.id).await,
        Err(CatalogError::NotFound("Category"))
    ));
}

#[tokio::test]
async fn test_list_keeps_insertion_order() {
    let service = create_test_service();
    for name in ["Zebra", "Apple", "Mango"] {
        service.create_category(new_category(name, None)).await.unwrap();
    }

    let names: Vec<String> = service
        .list_categories()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Zebra", "Apple", "Mango"]);
}

#[test]
fn test_category_schema() {
    let errors = validate::<NewCategory>(&json!({ "description": "x".repeat(501) })).unwrap_err();
    assert_eq!(
        errors,
        vec![
            "\"name\" is required",
            "\"description\" length must be less than or equal to 500 characters long",
        ]
    );

    let update = validate::<CategoryUpdate>(&json!({})).unwrap();
    assert!(update.name.is_none() && update.description.is_none());

    let errors = validate::<CategoryUpdate>(&json!({ "name": "" })).unwrap_err();
    assert_eq!(errors, vec!["\"name\" is not allowed to be empty"]);
}
