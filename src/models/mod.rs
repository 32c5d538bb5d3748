pub mod health;
pub mod order;
