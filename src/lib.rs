pub mod app_config;
pub mod auth;
pub mod cli;
pub mod drive;
pub mod profile;
pub mod resolve;
pub mod util;
