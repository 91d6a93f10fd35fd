/// Main configuration module.
///
/// Re-exports submodules for server and client session configuration.
pub mod server;
pub mod session;
