pub mod prediction;
pub mod price;
