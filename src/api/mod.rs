pub mod admin;
pub mod auth;
pub mod pages;
pub mod server;
pub mod session;
