// Adapters layer: concrete implementations for external systems (catalog APIs, storage).

pub mod fake_store;
pub mod http;
pub mod platzi;
pub mod storage;
