//! HTTP handlers for the Henco inventory & pricing backend

pub mod health;
pub mod mix;
pub mod price_type;
pub mod product;
pub mod product_type;
pub mod report;

pub use health::*;
pub use mix::*;
pub use price_type::*;
pub use product::*;
pub use product_type::*;
pub use report::*;
