/*!
 * Memory Simulator
 *
 * Partitioned memory simulator over a single linear address space measured in MB.
 *
 * ## Partitioning
 *
 * - **Fixed**: the space is cut into `n` equal partitions up front. A process
 *   takes a whole partition, so the unused rest of it is internal fragmentation.
 * - **Dynamic**: the space starts as one free block. Allocation splits blocks to
 *   the exact request size and deallocation coalesces free neighbours, so free
 *   memory scatters into holes (external fragmentation) until it is compacted.
 *
 * ## Operations
 *
 * - **Establish**: reset the block list for a partition mode, unloading every process
 * - **Allocate**: first-fit placement by address order
 * - **Deallocate**: free by process name, coalescing in dynamic mode
 * - **Analyze**: internal/external fragmentation totals
 * - **Compact**: slide occupied blocks to address 0 behind one trailing free block
 *
 * Every rejected request leaves the block list untouched.
 */

mod allocator;
mod block_list;
mod compactor;
mod deallocator;
mod fragmentation;
mod integrity;
mod partition;
mod shared;
mod stats;

pub use block_list::BlockList;
pub use shared::SharedSimulator;

use super::traits::{Allocator, Compaction, MemoryInfo};
use super::types::{
    Block, FragmentationReport, MemoryError, MemoryResult, MemoryStats, PartitionMode, PartitionScheme,
    Placement,
};
use crate::core::limits::DEFAULT_MEMORY_SIZE;
use crate::core::types::{RawAmount, Size};
use crate::core::SimulatorConfig;
use log::{info, warn};

/// Memory simulator
///
/// Owns the block list exclusively; callers only ever receive copies of blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySimulator {
    pub(super) blocks: BlockList,
    pub(super) total_memory: Size,
    pub(super) available_memory: Size,
    pub(super) scheme: PartitionScheme,
}

impl MemorySimulator {
    /// Create a simulator with the default 64 MB in dynamic mode
    pub fn new() -> Self {
        Self::dynamic(DEFAULT_MEMORY_SIZE)
    }

    /// Create a simulator with `total` MB in dynamic mode
    ///
    /// Zero memory is rejected with [`MemoryError::InvalidCapacity`].
    pub fn with_capacity(total: Size) -> MemoryResult<Self> {
        if total == 0 {
            warn!("Rejected simulator with 0 MB of memory");
            return Err(MemoryError::InvalidCapacity(total));
        }
        Ok(Self::dynamic(total))
    }

    fn dynamic(total: Size) -> Self {
        info!(
            "Memory simulator initialized with {} MB in dynamic partition mode",
            total
        );
        Self {
            blocks: BlockList::single(total),
            total_memory: total,
            available_memory: total,
            scheme: PartitionScheme::Dynamic,
        }
    }

    /// Create a simulator from configuration, establishing its initial mode
    pub fn from_config(config: &SimulatorConfig) -> MemoryResult<Self> {
        let mut sim = Self::with_capacity(config.total_memory)?;
        if config.initial_mode == PartitionMode::Fixed {
            sim.establish(PartitionMode::Fixed, config.fixed_partitions)?;
        }
        Ok(sim)
    }

    #[inline]
    pub fn total_memory(&self) -> Size {
        self.total_memory
    }

    #[inline]
    pub fn available_memory(&self) -> Size {
        self.available_memory
    }

    #[inline]
    pub fn used_memory(&self) -> Size {
        self.total_memory - self.available_memory
    }

    #[inline]
    pub fn mode(&self) -> PartitionMode {
        self.scheme.mode()
    }

    #[inline]
    pub fn scheme(&self) -> PartitionScheme {
        self.scheme
    }

    /// Read-only view of the block list in address order
    #[inline]
    pub fn blocks(&self) -> &BlockList {
        &self.blocks
    }

    /// Owned copy of the block list in address order, for rendering
    pub fn snapshot(&self) -> Vec<Block> {
        self.blocks.as_slice().to_vec()
    }
}

// Implement trait interfaces
impl Allocator for MemorySimulator {
    fn allocate(&mut self, name: &str, size: RawAmount) -> MemoryResult<Placement> {
        MemorySimulator::allocate(self, name, size)
    }

    fn deallocate(&mut self, name: &str) -> MemoryResult<Size> {
        MemorySimulator::deallocate(self, name)
    }

    fn is_loaded(&self, name: &str) -> bool {
        MemorySimulator::is_loaded(self, name)
    }

    fn block_of(&self, name: &str) -> Option<Block> {
        MemorySimulator::block_of(self, name)
    }
}

impl MemoryInfo for MemorySimulator {
    fn stats(&self) -> MemoryStats {
        MemorySimulator::stats(self)
    }

    fn info(&self) -> (Size, Size, Size) {
        MemorySimulator::info(self)
    }

    fn snapshot(&self) -> Vec<Block> {
        MemorySimulator::snapshot(self)
    }
}

impl Compaction for MemorySimulator {
    fn analyze_fragmentation(&self) -> FragmentationReport {
        MemorySimulator::analyze_fragmentation(self)
    }

    fn compact(&mut self) -> MemoryResult<()> {
        MemorySimulator::compact(self)
    }
}

impl Default for MemorySimulator {
    fn default() -> Self {
        Self::new()
    }
}
