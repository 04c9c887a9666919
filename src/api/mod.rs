pub mod rest;

pub use rest::{serve, AppState};
