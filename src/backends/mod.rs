//! Concrete [`JsonBackend`](crate::tree::JsonBackend) implementations.

pub mod serde_value;
pub mod simd_value;

pub use serde_value::SerdeJson;
pub use simd_value::SimdJson;
