pub mod product;
pub mod recommendation;
