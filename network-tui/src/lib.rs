// Library interface for the Network client (shared by the binary and integration tests)
#[macro_use]
pub mod logging;

pub mod actions;
pub mod api;
pub mod app;
pub mod config;
pub mod history;
pub mod notice;
pub mod route;
pub mod router;
pub mod server_config;
pub mod session;
pub mod terminal;
pub mod ui;
pub mod view;

#[cfg(test)]
pub mod test_support;
