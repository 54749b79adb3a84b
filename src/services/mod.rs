pub mod catalog_service;
pub mod invoice_service;
pub mod shop_service;

pub use catalog_service::*;
pub use invoice_service::*;
pub use shop_service::*;
