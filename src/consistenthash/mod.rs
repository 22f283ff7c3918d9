//! Consistent Hash Ring
//!
//! Maps arbitrary keys onto a dynamic set of node identifiers.
//!
//! ## Core Concepts
//! - **Virtual nodes**: each real node is hashed `replicas` times (`"{i}{node}"` for `i` in
//!   `0..replicas`) to smooth the load across a small node count.
//! - **Lookup**: a key is owned by the first virtual node clockwise from `hash(key)`, wrapping
//!   around to the smallest virtual hash.
//! - **Determinism**: two rings built with the same replica count, hash function and node set
//!   answer identically for every key.

pub mod ring;

pub use ring::{HashFn, HashRing};
