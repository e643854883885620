// === PUBLIC CONTRACT ===
// Other crates should depend on the contract module only
pub mod contract;

pub use contract::{client, error, model};

// === MODULE DEFINITION ===
pub mod module;
pub use module::UsersDirectory;

pub mod config;
pub use config::UsersDirectoryConfig;

// === TEST SUPPORT ===
// Scoped user fixtures shared by integration tests of this and dependent crates.
pub mod testing;

// === INTERNAL MODULES ===
// WARNING: internal implementation details, exposed only for comprehensive testing.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
