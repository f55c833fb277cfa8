//! Cache Group Module
//!
//! The orchestration layer: ties a local cache, a getter, a peer picker and a coalescer into a
//! single `get` operation.
//!
//! ## Submodules
//! - **`group`**: The `Group` type and its lookup state machine.
//! - **`registry`**: Name-based group discovery, including the process-wide default registry.
//! - **`types`**: The `Getter` trait and the statistics types.

pub mod group;
pub mod registry;
pub mod types;

pub use group::Group;
pub use registry::{GroupRegistry, get_group, global, new_group};
pub use types::{Getter, GetterFn, GroupStats, StatsSnapshot};
