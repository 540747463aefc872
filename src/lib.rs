/*
 * Responsibility
 * - crate のモジュールツリー (tests/ からも使えるように lib にする)
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
