use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

use crate::{
    api::models::{ErrorResponse, LoginResponse, MessageResponse},
    core::models::{
        category::{Category, CategoryUpdate, NewCategory},
        product::{CategoryStock, InventorySummary, LowStockReport, NewProduct, Product, ProductUpdate, Variant},
        user::{Credentials, PasswordChange, Registration, Role, User},
    },
};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(
                Http::builder()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::register,
        super::handlers::login,
        super::handlers::list_users,
        super::handlers::change_password,
        super::handlers::create_category,
        super::handlers::list_categories,
        super::handlers::get_category,
        super::handlers::update_category,
        super::handlers::delete_category,
        super::handlers::create_product,
        super::handlers::list_products,
        super::handlers::get_product,
        super::handlers::update_product,
        super::handlers::delete_product,
        super::handlers::low_stock_report,
        super::handlers::inventory_summary
    ),
    components(schemas(
        Registration,
        Credentials,
        PasswordChange,
        LoginResponse,
        MessageResponse,
        ErrorResponse,
        Role,
        User,
        Category,
        NewCategory,
        CategoryUpdate,
        Variant,
        Product,
        NewProduct,
        ProductUpdate,
        LowStockReport,
        InventorySummary,
        CategoryStock
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Users", description = "User management"),
        (name = "Categories", description = "Product categories"),
        (name = "Products", description = "Catalog products"),
        (name = "Reports", description = "Inventory reporting")
    ),
    info(
        title = "Product Catalog API",
        description = "A RESTful API for managing product catalogs with authentication, inventory tracking, and reporting features.",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
