use crate::core::errors::CatalogError;
use crate::core::models::{
    category::{Category, CategoryUpdate},
    product::{Product, ProductFilter, ProductUpdate},
    user::User,
};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

// Keyed by document id; ids sort in insertion order.
type Collection<T> = Arc<RwLock<BTreeMap<String, T>>>;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    users: Collection<User>,
    categories: Collection<Category>,
    products: Collection<Product>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn insert_user(&self, user: User) -> Result<User, CatalogError> {
        let mut users = self.users.write().await;
        for existing in users.values() {
            if existing.username == user.username {
                return Err(CatalogError::DuplicateKey {
                    field: "username",
                    value: user.username,
                });
            }
            if existing.email == user.email {
                return Err(CatalogError::DuplicateKey {
                    field: "email",
                    value: user.email,
                });
            }
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, CatalogError> {
        let users = self.users.read().await;
        Ok(users.get(user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, CatalogError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, CatalogError> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn set_password_hash(&self, user_id: &str, password_hash: String) -> Result<bool, CatalogError> {
        let mut users = self.users.write().await;
        Ok(users
            .get_mut(user_id)
            .map(|user| user.password_hash = password_hash)
            .is_some())
    }

    async fn insert_category(&self, category: Category) -> Result<Category, CatalogError> {
        let mut categories = self.categories.write().await;
        if categories.values().any(|c| c.name == category.name) {
            return Err(CatalogError::DuplicateKey {
                field: "name",
                value: category.name,
            });
        }
        categories.insert(category.id.clone(), category.clone());
        Ok(category)
    }

    async fn get_category(&self, category_id: &str) -> Result<Option<Category>, CatalogError> {
        let categories = self.categories.read().await;
        Ok(categories.get(category_id).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let categories = self.categories.read().await;
        Ok(categories.values().cloned().collect())
    }

    async fn update_category(
        &self,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<Option<Category>, CatalogError> {
        let mut categories = self.categories.write().await;
        if let Some(name) = &update.name {
            if categories.values().any(|c| c.id != category_id && &c.name == name) {
                return Err(CatalogError::DuplicateKey {
                    field: "name",
                    value: name.clone(),
                });
            }
        }
        Ok(categories.get_mut(category_id).map(|category| {
            update.apply(category);
            category.clone()
        }))
    }

    async fn delete_category(&self, category_id: &str) -> Result<bool, CatalogError> {
        let mut categories = self.categories.write().await;
        Ok(categories.remove(category_id).is_some())
    }

    async fn insert_product(&self, product: Product) -> Result<Product, CatalogError> {
        let mut products = self.products.write().await;
        products.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    async fn get_product(&self, product_id: &str) -> Result<Option<Product>, CatalogError> {
        let products = self.products.read().await;
        Ok(products.get(product_id).cloned())
    }

    async fn find_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, CatalogError> {
        let products = self.products.read().await;
        Ok(products.values().filter(|p| filter.matches(p)).cloned().collect())
    }

    async fn update_product(
        &self,
        product_id: &str,
        update: ProductUpdate,
    ) -> Result<Option<Product>, CatalogError> {
        let mut products = self.products.write().await;
        Ok(products.get_mut(product_id).map(|product| {
            update.apply(product, Utc::now());
            product.clone()
        }))
    }

    async fn delete_product(&self, product_id: &str) -> Result<bool, CatalogError> {
        let mut products = self.products.write().await;
        Ok(products.remove(product_id).is_some())
    }
}
