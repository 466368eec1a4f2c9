pub mod addresses;
pub mod app;
pub mod config;
pub mod contacts;
pub mod error;
pub mod extract;
pub mod paging;
pub mod response;
pub mod state;
pub mod users;
pub mod validation;
