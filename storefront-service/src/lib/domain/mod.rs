pub mod errors;
pub mod health;
pub mod order;
pub mod product;
pub mod user;
