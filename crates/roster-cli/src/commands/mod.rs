pub mod demo;
pub mod schema;
