pub mod analytics;
pub mod demo;
pub mod fetch;
pub mod parser;
pub mod records;
pub mod snapshot;
