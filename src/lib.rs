#[macro_use]
pub mod errors;
pub mod config;
pub mod debian;
pub mod fetch;
pub mod tag;
pub mod template;
pub mod upstream;
pub mod util;
