pub mod product;
pub mod rating;
