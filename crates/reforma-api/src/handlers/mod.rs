pub mod health;
pub mod visualization;
