//! ABCD Tools module
//!
//! MCP tool implementations. Each function takes a reference snapshot or
//! store and returns a serializable response.

pub mod assessment;
pub mod classification;
pub mod foods;
pub mod reference;
pub mod status;
