pub mod memory;
pub mod poetrydb;
