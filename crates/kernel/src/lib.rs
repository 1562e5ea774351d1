//! Agora Kernel Library
//!
//! Menu composition for forum pages (menus, builders, the menu manager and
//! rendering through the theme engine) plus user administration helpers.
//! The `agora` binary is a thin command line front end.

pub mod admin;
pub mod config;
pub mod lang;
pub mod menu;
pub mod models;
pub mod services;
pub mod tap;
pub mod theme;
