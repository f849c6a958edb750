//! Public entry points for delivery layers: the JSON contract and the C ABI.

pub mod contract;
pub mod ffi;

pub use contract::{handle, handle_json, handle_json_batch, ApiResponse};
