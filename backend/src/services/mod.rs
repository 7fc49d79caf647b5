//! Business logic services for the Henco inventory & pricing backend

pub mod mix;
pub mod price_type;
pub mod product;
pub mod product_type;
pub mod report;

pub use mix::MixService;
pub use price_type::PriceTypeService;
pub use product::ProductService;
pub use product_type::ProductTypeService;
pub use report::ReportService;
