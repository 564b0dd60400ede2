/*!
 * Memory Compaction
 * Sliding occupied blocks to the start of the address space
 */

use super::super::types::{Block, BlockStatus, MemoryError, MemoryResult};
use super::{BlockList, MemorySimulator};
use log::{info, warn};

impl MemorySimulator {
    /// Compact the address space (dynamic mode only)
    ///
    /// Occupied blocks keep their id, size, owner and relative order, and are
    /// laid out from address 0 with no gaps. All available memory becomes one
    /// trailing free block whose id follows the last placed block. The old
    /// block list is replaced as a whole.
    pub fn compact(&mut self) -> MemoryResult<()> {
        if !self.scheme.is_dynamic() {
            warn!("Compaction requested in fixed partition mode; nothing to do");
            return Err(MemoryError::NotApplicable);
        }

        let holes_before = self.blocks.count_by_status(BlockStatus::Free);
        let mut compacted: Vec<Block> = Vec::with_capacity(self.blocks.len());
        let mut next_address = 0;

        for block in self.blocks.iter().filter(|b| b.is_occupied()) {
            compacted.push(Block {
                start_address: next_address,
                ..block.clone()
            });
            next_address += block.size;
        }

        if self.available_memory > 0 {
            let id = compacted.last().map_or(0, |last| last.id + 1);
            compacted.push(Block::free(id, next_address, self.available_memory));
        }

        self.blocks = BlockList::from_blocks(compacted);

        info!(
            "Memory compacted: {} free holes merged into one {} MB block at {} MB",
            holes_before, self.available_memory, next_address
        );
        self.debug_verify();

        Ok(())
    }
}
