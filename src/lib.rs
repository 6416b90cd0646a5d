//! Backend for a mess (canteen) menu and feedback board: staff publish a
//! weekly menu, registered users rate meals, an admin curates both.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod password;
pub mod views;
