use crate::core::errors::CatalogError;
use crate::core::models::{
    category::{Category, CategoryUpdate},
    product::{Product, ProductFilter, ProductUpdate},
    user::User,
};
use async_trait::async_trait;

/// Document store. Implementations enforce the unique fields
/// (user `username` and `email`, category `name`) and report clashes as
/// [`CatalogError::DuplicateKey`].
#[async_trait]
pub trait Storage: Send + Sync {
    async fn insert_user(&self, user: User) -> Result<User, CatalogError>;
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, CatalogError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, CatalogError>;
    async fn list_users(&self) -> Result<Vec<User>, CatalogError>;
    async fn set_password_hash(&self, user_id: &str, password_hash: String) -> Result<bool, CatalogError>;

    async fn insert_category(&self, category: Category) -> Result<Category, CatalogError>;
    async fn get_category(&self, category_id: &str) -> Result<Option<Category>, CatalogError>;
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError>;
    async fn update_category(
        &self,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<Option<Category>, CatalogError>;
    async fn delete_category(&self, category_id: &str) -> Result<bool, CatalogError>;

    async fn insert_product(&self, product: Product) -> Result<Product, CatalogError>;
    async fn get_product(&self, product_id: &str) -> Result<Option<Product>, CatalogError>;
    async fn find_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, CatalogError>;
    async fn update_product(&self, product_id: &str, update: ProductUpdate)
    -> Result<Option<Product>, CatalogError>;
    async fn delete_product(&self, product_id: &str) -> Result<bool, CatalogError>;
}

pub mod in_memory;
