pub mod catalog;
pub mod filters;

pub use catalog::CatalogService;
pub use filters::{ActiveFilter, SneakerFilter, SneakerFilterParams};
