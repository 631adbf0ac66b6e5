use chrono::NaiveDateTime;

/// Storage format of `registered_at`, identical to SQLite's `CURRENT_TIMESTAMP`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Display format of `registered_at` in listings
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Validated product fields awaiting insertion
///
/// Built through [`crate::rules::validation::parse_product_fields`]; the
/// store assigns `id` and `registered_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

/// A persisted product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Store-assigned, strictly increasing
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
    /// UTC, second precision
    pub registered_at: NaiveDateTime,
}

impl Product {
    /// Price in Brazilian currency notation, e.g. `R$ 12,50`
    pub fn price_display(&self) -> String {
        format!("R$ {:.2}", self.price).replace('.', ",")
    }

    pub fn registered_at_display(&self) -> String {
        self.registered_at
            .format(DISPLAY_TIMESTAMP_FORMAT)
            .to_string()
    }
}

/// Newest first; equal timestamps fall back to the higher id
pub fn sort_newest_first(products: &mut [Product]) {
    products.sort_by(|a, b| {
        b.registered_at
            .cmp(&a.registered_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
