pub mod app_core;
pub mod state;
pub mod ui;
pub mod handlers;

pub use app_core::DashboardApp;
