pub mod analysis;
pub mod config;
pub mod error;
pub mod fetch;
pub mod projects;
pub mod render;
pub mod site;
pub mod source;
