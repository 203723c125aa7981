pub mod fetch;
pub mod migrate;
pub mod token;
