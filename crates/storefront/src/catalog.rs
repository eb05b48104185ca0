//! Static sample catalog for the browse screen.
//!
//! There is no product backend; the home screen shows a fixed set of
//! categories and featured products, and the cart opens pre-seeded from the
//! same products. The browse screen's fixed copy (welcome heading, search
//! placeholder, promo banner) lives here too.

use shopeasy_core::{CategoryId, CurrencyCode, Price, ProductId};

use crate::cart::CartItem;

/// A browsable category tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: &'static str,
    pub icon: &'static str,
}

/// A featured product card.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: &'static str,
    pub price: Price,
    pub glyph: &'static str,
    /// Average review score out of 5.
    pub rating: f32,
}

/// First line of the browse screen heading.
pub const WELCOME_LINE: &str = "Welcome to";

/// Store name shown under [`WELCOME_LINE`].
pub const STORE_NAME: &str = "ShopEasy";

/// Placeholder of the display-only search field.
pub const SEARCH_PLACEHOLDER: &str = "Search products...";

/// The promotional banner at the foot of the browse screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromoBanner {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub code: &'static str,
    pub glyph: &'static str,
}

impl PromoBanner {
    /// e.g. `Use code: WELCOME20`.
    #[must_use]
    pub fn code_line(&self) -> String {
        format!("Use code: {}", self.code)
    }
}

pub const PROMO_BANNER: PromoBanner = PromoBanner {
    title: "Special Offer!",
    subtitle: "Get 20% off on your first order",
    code: "WELCOME20",
    glyph: "🎉",
};

const CATEGORIES: [(&str, &str, &str); 8] = [
    ("1", "Electronics", "📱"),
    ("2", "Fashion", "👕"),
    ("3", "Home", "🏠"),
    ("4", "Sports", "⚽"),
    ("5", "Books", "📚"),
    ("6", "Beauty", "💄"),
    ("7", "Health", "🏥"),
    ("8", "Travel", "✈️"),
];

/// (id, name, price in cents, glyph, rating)
const FEATURED: [(&str, &str, u64, &str, f32); 4] = [
    ("1", "Wireless Headphones", 9999, "🎧", 4.5),
    ("2", "Smart Watch", 19999, "⌚", 4.8),
    ("3", "Laptop Stand", 4999, "💻", 4.3),
    ("4", "Coffee Maker", 7999, "☕", 4.6),
];

/// (product id, quantity) lines of the sample cart.
const SAMPLE_CART: [(&str, u32); 3] = [("1", 1), ("2", 2), ("4", 1)];

/// All categories in display order.
#[must_use]
pub fn categories() -> Vec<Category> {
    CATEGORIES
        .iter()
        .map(|&(id, name, icon)| Category {
            id: CategoryId::new(id),
            name,
            icon,
        })
        .collect()
}

/// Featured products in display order.
#[must_use]
pub fn featured_products() -> Vec<Product> {
    FEATURED
        .iter()
        .map(|&(id, name, cents, glyph, rating)| Product {
            id: ProductId::new(id),
            name,
            price: Price::from_minor_units(cents, CurrencyCode::USD),
            glyph,
            rating,
        })
        .collect()
}

/// Look up a featured product by id.
#[must_use]
pub fn product(id: &ProductId) -> Option<Product> {
    featured_products().into_iter().find(|p| &p.id == id)
}

/// Line items the cart opens with.
///
/// Cart line ids are positions in the cart, numbered from 1, matching how the
/// cart screen has always keyed its rows.
#[must_use]
pub fn sample_cart_items() -> Vec<CartItem> {
    SAMPLE_CART
        .iter()
        .zip(1_u32..)
        .filter_map(|(&(product_id, quantity), line)| {
            let product = product(&ProductId::new(product_id))?;
            Some(CartItem::new(
                line.to_string(),
                product.name,
                product.price,
                quantity,
                product.glyph,
            ))
        })
        .collect()
}
