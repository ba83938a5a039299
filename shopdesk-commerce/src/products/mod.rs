//! Product lookup: id resolution, detail fetch and normalization.

pub mod lookup;
pub mod parser;
pub mod resolver;

pub use lookup::fetch_product_detail;
pub use parser::normalize_product;
pub use resolver::{ProductResolver, Resolution, SearchMiss};
