//! Consistent Hashing Module
//!
//! Maps keys onto peer identifiers so that every node in the cluster agrees on who owns a key.
//!
//! ## Core Concepts
//! - **Virtual points**: Each peer is placed on a 32-bit ring `replicas` times, at
//!   `hash(peer + i)`, which evens out the share of keys each peer receives.
//! - **Lookup**: A key belongs to the first point clockwise from `hash(key)`, wrapping past the end.
//! - **Bounded remapping**: Adding a peer only moves the keys that now fall in front of its points.

pub mod ring;

pub use ring::{HashFn, HashRing};

#[cfg(test)]
mod tests;
