use crate::{
    api::{
        SharedService,
        extract::{Valid, ValidQuery},
        middleware::{authenticate, authorize},
        models::*,
        rate_limit::{RateLimiter, rate_limit},
    },
    auth::jwt::Claims,
    core::models::{
        category::{Category, CategoryUpdate, NewCategory},
        product::{InventorySummary, LowStockReport, NewProduct, Product, ProductFilter, ProductUpdate, ReportQuery},
        user::{Credentials, PasswordChange, Registration, Role, User},
    },
};
use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
};

// Interceptors run outermost first: rate limit, authenticate, authorize,
// then the handler's own extractors (path, schema validation).
pub fn api_routes(service: SharedService, limiter: RateLimiter) -> Router {
    let authenticated = middleware::from_fn_with_state(service.clone(), authenticate);
    let admin_only = middleware::from_fn_with_state(Role::Admin, authorize);

    let public_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product));

    let signed_in_routes = Router::new()
        .route("/users/me/password", put(change_password))
        .route_layer(authenticated.clone());

    let admin_routes = Router::new()
        .route("/users", get(list_users))
        .route("/products", post(create_product))
        .route("/products/{id}", put(update_product).delete(delete_product))
        .route("/products/reports/low-stock", get(low_stock_report))
        .route("/products/reports/summary", get(inventory_summary))
        .route_layer(admin_only.clone())
        .route_layer(authenticated.clone());

    let category_admin_routes = Router::new()
        .route("/categories", post(create_category))
        .route("/categories/{id}", put(update_category).delete(delete_category))
        .route_layer(admin_only)
        .route_layer(authenticated);

    let category_routes = Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}", get(get_category))
        .merge(category_admin_routes)
        .layer(middleware::from_fn_with_state(limiter, rate_limit));

    Router::new()
        .merge(public_routes)
        .merge(signed_in_routes)
        .merge(admin_routes)
        .merge(category_routes)
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = Registration,
    responses(
        (status = 201, description = "User registered; password is never returned", body = User),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "Username or email already registered", body = ErrorResponse)
    )
)]
pub async fn register(
    State(service): State<SharedService>,
    Valid(registration): Valid<Registration>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = service.register(registration).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = Credentials,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(service): State<SharedService>,
    Valid(credentials): Valid<Credentials>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = service.login(credentials).await?;
    Ok(Json(LoginResponse { token }))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users, without password hashes", body = Vec<User>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn list_users(State(service): State<SharedService>) -> Result<Json<Vec<User>>, ApiError> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

#[utoipa::path(
    put,
    path = "/users/me/password",
    tag = "Users",
    request_body = PasswordChange,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing token or wrong current password", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn change_password(
    State(service): State<SharedService>,
    Extension(claims): Extension<Claims>,
    Valid(change): Valid<PasswordChange>,
) -> Result<Json<MessageResponse>, ApiError> {
    service.change_password(&claims.id, change).await?;
    Ok(Json(MessageResponse::new("Password updated")))
}

#[utoipa::path(
    post,
    path = "/categories",
    tag = "Categories",
    request_body = NewCategory,
    responses(
        (status = 201, description = "Category created successfully", body = Category),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin access required", body = ErrorResponse),
        (status = 409, description = "Category name already exists", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn create_category(
    State(service): State<SharedService>,
    Valid(input): Valid<NewCategory>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = service.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "All categories", body = Vec<Category>),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    )
)]
pub async fn list_categories(State(service): State<SharedService>) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = service.list_categories().await?;
    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "Categories",
    params(("id" = String, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
pub async fn get_category(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<Json<Category>, ApiError> {
    let category = service.get_category(&id).await?;
    Ok(Json(category))
}

#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "Categories",
    params(("id" = String, Path, description = "Category identifier")),
    request_body = CategoryUpdate,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Category name already exists", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_category(
    State(service): State<SharedService>,
    Path(id): Path<String>,
    Valid(update): Valid<CategoryUpdate>,
) -> Result<Json<Category>, ApiError> {
    let category = service.update_category(&id, update).await?;
    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "Categories",
    params(("id" = String, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn delete_category(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    service.delete_category(&id).await?;
    Ok(Json(MessageResponse::new("Category deleted")))
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin access required", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn create_product(
    State(service): State<SharedService>,
    Valid(input): Valid<NewProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive match on name or description"),
        ("categories" = Option<String>, Query, description = "Comma-separated category names or ids"),
        ("minPrice" = Option<f64>, Query, description = "Lowest price, inclusive"),
        ("maxPrice" = Option<f64>, Query, description = "Highest price, inclusive"),
        ("onSale" = Option<bool>, Query, description = "Only products on sale (true) or full price (false)"),
        ("color" = Option<String>, Query, description = "Variant color"),
        ("size" = Option<String>, Query, description = "Variant size"),
        ("createdAfter" = Option<String>, Query, description = "ISO-8601 date, inclusive"),
        ("createdBefore" = Option<String>, Query, description = "ISO-8601 date, inclusive")
    ),
    responses(
        (status = 200, description = "Matching products", body = Vec<Product>),
        (status = 400, description = "Query validation failed", body = ErrorResponse)
    )
)]
pub async fn list_products(
    State(service): State<SharedService>,
    ValidQuery(filter): ValidQuery<ProductFilter>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = service.list_products(&filter).await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn get_product(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = service.get_product(&id).await?;
    Ok(Json(product))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product identifier")),
    request_body = ProductUpdate,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_product(
    State(service): State<SharedService>,
    Path(id): Path<String>,
    Valid(update): Valid<ProductUpdate>,
) -> Result<Json<Product>, ApiError> {
    let product = service.update_product(&id, update).await?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn delete_product(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    service.delete_product(&id).await?;
    Ok(Json(MessageResponse::new("Product deleted")))
}

#[utoipa::path(
    get,
    path = "/products/reports/low-stock",
    tag = "Reports",
    params(("threshold" = Option<u32>, Query, description = "Stock below this is reported (1-1000, default 10)")),
    responses(
        (status = 200, description = "Products below the stock threshold", body = LowStockReport),
        (status = 400, description = "Query validation failed", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn low_stock_report(
    State(service): State<SharedService>,
    ValidQuery(query): ValidQuery<ReportQuery>,
) -> Result<Json<LowStockReport>, ApiError> {
    let report = service.low_stock_report(query).await?;
    Ok(Json(report))
}

#[utoipa::path(
    get,
    path = "/products/reports/summary",
    tag = "Reports",
    responses(
        (status = 200, description = "Inventory totals", body = InventorySummary),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn inventory_summary(State(service): State<SharedService>) -> Result<Json<InventorySummary>, ApiError> {
    let summary = service.inventory_summary().await?;
    Ok(Json(summary))
}
