/*!
 * Partition Simulator Library
 * Fixed and dynamic memory partitioning, first-fit placement, and compaction
 */

pub mod cli;
pub mod core;
pub mod memory;
pub mod monitoring;

// Re-exports
pub use crate::core::{ProcessName, SimulatorConfig};
pub use memory::{
    Block, BlockStatus, FragmentationReport, MemoryError, MemoryResult, MemorySimulator,
    MemoryStats, PartitionMode, PartitionScheme, Placement, SharedSimulator,
};
pub use monitoring::init_tracing;
