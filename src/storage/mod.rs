//! Storage implementations for processed payments

pub mod in_memory;

pub use in_memory::InMemoryPaymentStore;
