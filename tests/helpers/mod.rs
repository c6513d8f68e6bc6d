// Test Helper Modules
//
// Shared infrastructure for contract and integration tests. The gateway
// is a real local HTTP server and the order store a real file in a
// temporary directory.
//
// Usage (from a test file):
//   #[path = "../helpers/mod.rs"]
//   mod helpers;
//   use helpers::*;

#![allow(dead_code)]

pub mod test_server;

// Re-export commonly used types and functions
pub use assertions::*;
pub use gateway_sandbox::*;
pub use test_data::*;
pub use test_server::*;
