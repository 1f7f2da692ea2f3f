use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, ToSchema, PartialEq)]
pub struct Variant {
    pub size: String,
    pub color: String,
    pub quantity: u32,
}

#[derive(Clone, Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category name or identifier; not checked against stored categories.
    pub category: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    pub stock: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub variants: Vec<Variant>,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn is_on_sale(&self) -> bool {
        self.sale_price.is_some_and(|sale| sale < self.price)
            || self.discount_percentage.is_some_and(|pct| pct > 0.0)
    }

    pub fn stock_value(&self) -> f64 {
        self.price * f64::from(self.stock)
    }
}

#[derive(Debug, Clone, ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: f64,
    pub sale_price: Option<f64>,
    pub discount_percentage: Option<f64>,
    pub stock: u32,
    pub image: Option<String>,
    pub variants: Vec<Variant>,
}

impl NewProduct {
    pub fn into_product(self, id: String, now: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            price: self.price,
            sale_price: self.sale_price,
            discount_percentage: self.discount_percentage,
            stock: self.stock,
            image: self.image,
            variants: self.variants,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub sale_price: Option<f64>,
    pub discount_percentage: Option<f64>,
    pub stock: Option<u32>,
    pub image: Option<String>,
    pub variants: Option<Vec<Variant>>,
}

impl ProductUpdate {
    pub fn apply(self, product: &mut Product, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = Some(description);
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(sale_price) = self.sale_price {
            product.sale_price = Some(sale_price);
        }
        if let Some(pct) = self.discount_percentage {
            product.discount_percentage = Some(pct);
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(image) = self.image {
            product.image = Some(image);
        }
        if let Some(variants) = self.variants {
            product.variants = variants;
        }
        product.updated_at = now;
    }
}

/// Product search. Every populated criterion must match.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub categories: Vec<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub on_sale: Option<bool>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_name = product.name.to_lowercase().contains(&needle);
            let in_description = product
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_name && !in_description {
                return false;
            }
        }
        if !self.categories.is_empty()
            && !self
                .categories
                .iter()
                .any(|c| c.eq_ignore_ascii_case(&product.category))
        {
            return false;
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        if self.on_sale.is_some_and(|flag| product.is_on_sale() != flag) {
            return false;
        }
        if let Some(color) = &self.color {
            if !product.variants.iter().any(|v| v.color.eq_ignore_ascii_case(color)) {
                return false;
            }
        }
        if let Some(size) = &self.size {
            if !product.variants.iter().any(|v| v.size.eq_ignore_ascii_case(size)) {
                return false;
            }
        }
        if self.created_after.is_some_and(|after| product.created_at < after) {
            return false;
        }
        if self.created_before.is_some_and(|before| product.created_at > before) {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReportQuery {
    pub threshold: u32,
}

impl Default for ReportQuery {
    fn default() -> Self {
        ReportQuery { threshold: 10 }
    }
}

#[derive(Clone, Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStock {
    pub category: String,
    pub product_count: usize,
    pub total_stock: u64,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_products: usize,
    pub total_stock: u64,
    pub inventory_value: f64,
    pub on_sale_count: usize,
    pub categories: Vec<CategoryStock>,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LowStockReport {
    pub threshold: u32,
    pub count: usize,
    pub products: Vec<Product>,
}
