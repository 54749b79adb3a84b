pub mod basket;
pub mod product;

pub use basket::*;
pub use product::*;
