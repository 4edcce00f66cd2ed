//! Data models shared by every backend.

pub mod tools;

pub use tools::{BitProfile, RouterBit};
