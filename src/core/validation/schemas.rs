use super::{Checker, NumberRule, Schema, StringRule};
use crate::core::models::{
    category::{CategoryUpdate, NewCategory},
    product::{NewProduct, ProductFilter, ProductUpdate, ReportQuery, Variant},
    user::{Credentials, PasswordChange, Registration, Role},
};

fn money() -> NumberRule {
    NumberRule::new().positive().precision(2)
}

fn discount() -> NumberRule {
    NumberRule::new().min(0.0).max(100.0).precision(2)
}

impl Schema for Registration {
    fn check(c: &mut Checker<'_>) -> Option<Self> {
        let username = c.string("username", StringRule::new().required().min(2).max(50));
        let email = c.string("email", StringRule::new().required().email());
        let password = c.string("password", StringRule::new().required().min(6));
        let role = c.string("role", StringRule::new().one_of(&Role::ALL));
        Some(Registration {
            username: username?,
            email: email?,
            password: password?,
            role: role.as_deref().and_then(Role::parse).unwrap_or_default(),
        })
    }
}

impl Schema for Credentials {
    fn check(c: &mut Checker<'_>) -> Option<Self> {
        let email = c.string("email", StringRule::new().required().email());
        let password = c.string("password", StringRule::new().required());
        Some(Credentials {
            email: email?,
            password: password?,
        })
    }
}

impl Schema for PasswordChange {
    fn check(c: &mut Checker<'_>) -> Option<Self> {
        let current_password = c.string("currentPassword", StringRule::new().required());
        let new_password = c.string("newPassword", StringRule::new().required().min(6));
        Some(PasswordChange {
            current_password: current_password?,
            new_password: new_password?,
        })
    }
}

impl Schema for NewCategory {
    fn check(c: &mut Checker<'_>) -> Option<Self> {
        let name = c.string("name", StringRule::new().required().min(1).max(100));
        let description = c.string("description", StringRule::new().max(500));
        Some(NewCategory { name: name?, description })
    }
}

impl Schema for CategoryUpdate {
    fn check(c: &mut Checker<'_>) -> Option<Self> {
        let name = c.string("name", StringRule::new().min(1).max(100));
        let description = c.string("description", StringRule::new().max(500));
        Some(CategoryUpdate { name, description })
    }
}

impl Schema for Variant {
    fn check(c: &mut Checker<'_>) -> Option<Self> {
        let size = c.string("size", StringRule::new().required().min(1).max(50));
        let color = c.string("color", StringRule::new().required().min(1).max(50));
        let quantity = c.count("quantity", true);
        Some(Variant {
            size: size?,
            color: color?,
            quantity: quantity?,
        })
    }
}

impl Schema for NewProduct {
    fn check(c: &mut Checker<'_>) -> Option<Self> {
        let name = c.string("name", StringRule::new().required().min(1).max(200));
        let description = c.string("description", StringRule::new().max(1000));
        let category = c.string("category", StringRule::new().required().min(1).max(100));
        let price = c.number("price", money().required());
        let sale_price = c.number("salePrice", money());
        let discount_percentage = c.number("discountPercentage", discount());
        let stock = c.count("stock", false);
        let image = c.string("image", StringRule::new().uri());
        let variants = c.objects("variants", Variant::check);
        Some(NewProduct {
            name: name?,
            description,
            category: category?,
            price: price?,
            sale_price,
            discount_percentage,
            stock: stock.unwrap_or(0),
            image,
            variants: variants.unwrap_or_default(),
        })
    }
}

impl Schema for ProductUpdate {
    fn check(c: &mut Checker<'_>) -> Option<Self> {
        Some(ProductUpdate {
            name: c.string("name", StringRule::new().min(1).max(200)),
            description: c.string("description", StringRule::new().max(1000)),
            category: c.string("category", StringRule::new().min(1).max(100)),
            price: c.number("price", money()),
            sale_price: c.number("salePrice", money()),
            discount_percentage: c.number("discountPercentage", discount()),
            stock: c.count("stock", false),
            image: c.string("image", StringRule::new().uri()),
            variants: c.objects("variants", Variant::check),
        })
    }
}

impl Schema for ProductFilter {
    fn check(c: &mut Checker<'_>) -> Option<Self> {
        let term = StringRule::new().min(1).max(100);
        let attribute = StringRule::new().min(1).max(50);

        let filter = ProductFilter {
            search: c.string("search", term),
            categories: c
                .string("categories", term)
                .map(|list| {
                    list.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            min_price: c.number("minPrice", money()),
            max_price: c.number("maxPrice", money()),
            on_sale: c.boolean("onSale"),
            color: c.string("color", attribute),
            size: c.string("size", attribute),
            created_after: c.date("createdAfter"),
            created_before: c.date("createdBefore"),
        };

        if let (Some(min), Some(max)) = (filter.min_price, filter.max_price) {
            if min > max {
                c.reject("minPrice", "must be less than or equal to \"maxPrice\"");
            }
        }
        Some(filter)
    }
}

impl Schema for ReportQuery {
    fn check(c: &mut Checker<'_>) -> Option<Self> {
        let threshold = c.number("threshold", NumberRule::new().integer().min(1.0).max(1000.0));
        Some(threshold.map_or_else(ReportQuery::default, |t| ReportQuery { threshold: t as u32 }))
    }
}
