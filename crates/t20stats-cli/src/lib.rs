// Library root for the dashboard binary: configuration and presenters, exposed
// so integration tests can drive them directly.

pub mod config;
pub mod present;
