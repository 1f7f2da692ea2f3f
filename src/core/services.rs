use crate::auth::jwt::{Claims, JwtService};
use crate::core::errors::CatalogError;
use crate::core::models::{
    category::{Category, CategoryUpdate, NewCategory},
    new_document_id,
    product::{
        CategoryStock, InventorySummary, LowStockReport, NewProduct, Product, ProductFilter, ProductUpdate,
        ReportQuery,
    },
    user::{Credentials, PasswordChange, Registration, User},
};
use crate::core::password::{hash_password, verify_password};
use crate::infrastructure::storage::Storage;
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::{info, warn};

pub struct CatalogService<S: Storage> {
    storage: S,
    jwt_service: JwtService,
}

impl<S: Storage> CatalogService<S> {
    pub fn new(storage: S, jwt_service: JwtService) -> Self {
        CatalogService { storage, jwt_service }
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, CatalogError> {
        self.jwt_service.validate_token(token)
    }

    /// Hashes the password, then persists the user.
    pub async fn register(&self, registration: Registration) -> Result<User, CatalogError> {
        let password_hash = hash_password(&registration.password)?;
        let user = User {
            id: new_document_id(),
            username: registration.username,
            email: registration.email,
            password_hash,
            role: registration.role,
        };
        let user = self.storage.insert_user(user).await?;
        info!(user_id = %user.id, role = %user.role, "user registered");
        Ok(user)
    }

    pub async fn login(&self, credentials: Credentials) -> Result<String, CatalogError> {
        let user = self
            .storage
            .get_user_by_email(&credentials.email)
            .await?
            .ok_or(CatalogError::InvalidCredentials)?;

        if !verify_password(&credentials.password, &user.password_hash)? {
            warn!(user_id = %user.id, "login rejected");
            return Err(CatalogError::InvalidCredentials);
        }
        self.jwt_service.generate_token(&user.id, user.role)
    }

    pub async fn change_password(&self, user_id: &str, change: PasswordChange) -> Result<(), CatalogError> {
        let user = self
            .storage
            .get_user(user_id)
            .await?
            .ok_or(CatalogError::NotFound("User"))?;
        if !verify_password(&change.current_password, &user.password_hash)? {
            return Err(CatalogError::InvalidCredentials);
        }

        let password_hash = hash_password(&change.new_password)?;
        if !self.storage.set_password_hash(user_id, password_hash).await? {
            return Err(CatalogError::NotFound("User"));
        }
        info!(user_id, "password changed");
        Ok(())
    }

    pub async fn list_users(&self) -> Result<Vec<User>, CatalogError> {
        self.storage.list_users().await
    }

    pub async fn create_category(&self, input: NewCategory) -> Result<Category, CatalogError> {
        let category = Category {
            id: new_document_id(),
            name: input.name,
            description: input.description,
        };
        let category = self.storage.insert_category(category).await?;
        info!(category_id = %category.id, name = %category.name, "category created");
        Ok(category)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        self.storage.list_categories().await
    }

    pub async fn get_category(&self, category_id: &str) -> Result<Category, CatalogError> {
        self.storage
            .get_category(category_id)
            .await?
            .ok_or(CatalogError::NotFound("Category"))
    }

    pub async fn update_category(&self, category_id: &str, update: CategoryUpdate) -> Result<Category, CatalogError> {
        let category = self
            .storage
            .update_category(category_id, update)
            .await?
            .ok_or(CatalogError::NotFound("Category"))?;
        info!(category_id, "category updated");
        Ok(category)
    }

    pub async fn delete_category(&self, category_id: &str) -> Result<(), CatalogError> {
        if !self.storage.delete_category(category_id).await? {
            return Err(CatalogError::NotFound("Category"));
        }
        info!(category_id, "category deleted");
        Ok(())
    }

    pub async fn create_product(&self, input: NewProduct) -> Result<Product, CatalogError> {
        let product = input.into_product(new_document_id(), Utc::now());
        let product = self.storage.insert_product(product).await?;
        info!(product_id = %product.id, category = %product.category, "product created");
        Ok(product)
    }

    pub async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, CatalogError> {
        self.storage.find_products(filter).await
    }

    pub async fn get_product(&self, product_id: &str) -> Result<Product, CatalogError> {
        self.storage
            .get_product(product_id)
            .await?
            .ok_or(CatalogError::NotFound("Product"))
    }

    pub async fn update_product(&self, product_id: &str, update: ProductUpdate) -> Result<Product, CatalogError> {
        let product = self
            .storage
            .update_product(product_id, update)
            .await?
            .ok_or(CatalogError::NotFound("Product"))?;
        info!(product_id, "product updated");
        Ok(product)
    }

    pub async fn delete_product(&self, product_id: &str) -> Result<(), CatalogError> {
        if !self.storage.delete_product(product_id).await? {
            return Err(CatalogError::NotFound("Product"));
        }
        info!(product_id, "product deleted");
        Ok(())
    }

    /// Products whose stock is below the threshold, lowest stock first.
    pub async fn low_stock_report(&self, query: ReportQuery) -> Result<LowStockReport, CatalogError> {
        let mut products: Vec<Product> = self
            .storage
            .find_products(&ProductFilter::default())
            .await?
            .into_iter()
            .filter(|p| p.stock < query.threshold)
            .collect();
        products.sort_by_key(|p| p.stock);

        Ok(LowStockReport {
            threshold: query.threshold,
            count: products.len(),
            products,
        })
    }

    pub async fn inventory_summary(&self) -> Result<InventorySummary, CatalogError> {
        let products = self.storage.find_products(&ProductFilter::default()).await?;

        // Grouped case-insensitively, like the category filter; first spelling wins.
        let mut by_category: BTreeMap<String, CategoryStock> = BTreeMap::new();
        for product in &products {
            let entry = by_category
                .entry(product.category.to_ascii_lowercase())
                .or_insert_with(|| CategoryStock {
                    category: product.category.clone(),
                    product_count: 0,
                    total_stock: 0,
                });
            entry.product_count += 1;
            entry.total_stock += u64::from(product.stock);
        }

        let inventory_value = products.iter().map(Product::stock_value).sum::<f64>();
        Ok(InventorySummary {
            total_products: products.len(),
            total_stock: products.iter().map(|p| u64::from(p.stock)).sum(),
            inventory_value: (inventory_value * 100.0).round() / 100.0,
            on_sale_count: products.iter().filter(|p| p.is_on_sale()).count(),
            categories: by_category.into_values().collect(),
        })
    }
}
