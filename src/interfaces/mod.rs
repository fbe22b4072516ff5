//! Outer adapters: the HTTP backend, its client, and the step views.

pub mod client;
pub mod http;
pub mod views;
