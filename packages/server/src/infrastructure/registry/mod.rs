//! `ConnectionRegistry` の実装
//!
//! - `inmemory`: プロセスメモリ上の HashMap を使った実装

pub mod inmemory;

pub use inmemory::InMemoryConnectionRegistry;
