pub mod catalog;
pub mod feed;
pub mod languages;
pub mod prompts;
pub mod templates;
