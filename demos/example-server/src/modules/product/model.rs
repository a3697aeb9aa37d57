use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub in_stock: bool,
}

impl Product {
    /// Values a request body is laid over
    pub fn draft() -> Self {
        Self {
            name: String::new(),
            price: 0.0,
            category: "uncategorized".to_string(),
            in_stock: true,
        }
    }
}
