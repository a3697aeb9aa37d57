pub mod controller;
pub mod model;

pub use controller::{CategoryController, ProductController};
pub use model::Product;
