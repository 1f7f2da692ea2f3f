use crate::auth::jwt::JwtService;
use crate::core::errors::CatalogError;
use crate::core::models::user::{Credentials, PasswordChange, Registration, Role};
use crate::core::password::verify_password;
use crate::core::validation::validate;
use crate::tests::{TEST_SECRET, create_test_service};
use serde_json::json;

fn registration(username: &str, email: &str) -> Registration {
    Registration {
        username: username.to_string(),
        email: email.to_string(),
        password: "secret1".to_string(),
        role: Role::Customer,
    }
}

fn credentials(email: &str, password: &str) -> Credentials {
    Credentials {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_register_stores_only_a_hash() {
    let service = create_test_service();
    let user = service.register(registration("al", "a@x.com")).await.unwrap();

    assert_ne!(user.password_hash, "secret1");
    assert!(verify_password("secret1", &user.password_hash).unwrap());
    assert!(!verify_password("secret2", &user.password_hash).unwrap());
    assert!(!verify_password("", &user.password_hash).unwrap());

    let stored = service.list_users().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].password_hash, user.password_hash);
}

#[tokio::test]
async fn test_serialized_user_has_no_password() {
    let service = create_test_service();
    let user = service.register(registration("al", "a@x.com")).await.unwrap();

    let body = serde_json::to_value(&user).unwrap();
    let mut keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["_id", "email", "role", "username"]);
    assert_eq!(body["role"], "customer");
}

#[tokio::test]
async fn test_duplicate_username_or_email_is_rejected() {
    let service = create_test_service();
    service.register(registration("alice", "alice@example.com")).await.unwrap();

    let same_email = service.register(registration("alicia", "alice@example.com")).await;
    assert!(matches!(
        same_email,
        Err(CatalogError::DuplicateKey { field: "email", .. })
    ));

    let same_username = service.register(registration("alice", "other@example.com")).await;
    assert!(matches!(
        same_username,
        Err(CatalogError::DuplicateKey { field: "username", .. })
    ));
    assert_eq!(service.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_login_issues_token_with_role() {
    let service = create_test_service();
    let mut admin = registration("root", "root@example.com");
    admin.role = Role::Admin;
    let user = service.register(admin).await.unwrap();

    let token = service.login(credentials("root@example.com", "secret1")).await.unwrap();
    let claims = JwtService::new(TEST_SECRET, 3600).validate_token(&token).unwrap();
    assert_eq!(claims.id, user.id);
    assert_eq!(claims.role, Role::Admin);
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let service = create_test_service();
    service.register(registration("al", "a@x.com")).await.unwrap();

    let wrong_password = service.login(credentials("a@x.com", "secret2")).await;
    assert!(matches!(wrong_password, Err(CatalogError::InvalidCredentials)));

    let unknown_email = service.login(credentials("nobody@x.com", "secret1")).await;
    assert!(matches!(unknown_email, Err(CatalogError::InvalidCredentials)));
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let service = create_test_service();
    let forged = JwtService::new("another-secret", 3600)
        .generate_token("someone", Role::Admin)
        .unwrap();

    let result = service.validate_token(&forged);
    assert!(matches!(result, Err(CatalogError::Unauthenticated(_))));
}

#[tokio::test]
async fn test_change_password_rehashes() {
    let service = create_test_service();
    let user = service.register(registration("al", "a@x.com")).await.unwrap();

    let wrong_current = service
        .change_password(
            &user.id,
            PasswordChange {
                current_password: "nope".to_string(),
                new_password: "fresh-secret".to_string(),
            },
        )
        .await;
    assert!(matches!(wrong_current, Err(CatalogError::InvalidCredentials)));

    service
        .change_password(
            &user.id,
            PasswordChange {
                current_password: "secret1".to_string(),
                new_password: "fresh-secret".to_string(),
            },
        )
        .await
        .unwrap();

    assert!(service.login(credentials("a@x.com", "secret1")).await.is_err());
    assert!(service.login(credentials("a@x.com", "fresh-secret")).await.is_ok());
    let stored = service.list_users().await.unwrap();
    assert_ne!(stored[0].password_hash, "fresh-secret");
}

#[test]
fn test_registration_lists_every_violation() {
    let errors = validate::<Registration>(&json!({})).unwrap_err();
    assert_eq!(
        errors,
        vec![
            "\"username\" is required",
            "\"email\" is required",
            "\"password\" is required",
        ]
    );

    let errors = validate::<Registration>(&json!({
        "username": "a",
        "email": "not-an-email",
        "password": "123",
        "role": "superuser",
    }))
    .unwrap_err();
    assert_eq!(
        errors,
        vec![
            "\"username\" length must be at least 2 characters long",
            "\"email\" must be a valid email",
            "\"password\" length must be at least 6 characters long",
            "\"role\" must be one of [admin, customer]",
        ]
    );
}

#[test]
fn test_registration_defaults_role_and_strips_unknown_fields() {
    let registration = validate::<Registration>(&json!({
        "username": "alice",
        "email": "alice@example.com",
        "password": "secret1",
        "isAdmin": true,
    }))
    .unwrap();
    assert_eq!(registration.role, Role::Customer);
    assert_eq!(registration.username, "alice");
}

#[test]
fn test_registration_type_errors() {
    let errors = validate::<Registration>(&json!({
        "username": 42,
        "email": "",
        "password": "secret1",
    }))
    .unwrap_err();
    assert_eq!(
        errors,
        vec!["\"username\" must be a string", "\"email\" is not allowed to be empty"]
    );

    let errors = validate::<Registration>(&json!(["not", "an", "object"])).unwrap_err();
    assert_eq!(errors, vec!["\"value\" must be of type object"]);
}

#[test]
fn test_empty_role_reports_allowed_values() {
    let errors = validate::<Registration>(&json!({
        "username": "alice",
        "email": "alice@example.com",
        "password": "secret1",
        "role": "",
    }))
    .unwrap_err();
    assert_eq!(errors, vec!["\"role\" must be one of [admin, customer]"]);
}
