/*!
 * Memory Allocator Implementation
 * First-fit placement of named processes
 */

use super::super::types::{Block, MemoryError, MemoryPressure, MemoryResult, PartitionScheme, Placement};
use super::MemorySimulator;
use crate::core::types::{RawAmount, Size};
use crate::core::ProcessName;
use log::{info, warn};

impl MemorySimulator {
    /// Load `name` into the first free block, in address order, that can hold `size` MB
    ///
    /// In fixed mode the whole partition is charged against available memory.
    /// In dynamic mode a larger block is split so exactly `size` MB is taken.
    /// All checks run before the block list is touched.
    pub fn allocate(&mut self, name: &str, size: RawAmount) -> MemoryResult<Placement> {
        let name = ProcessName::new(name);
        if name.is_empty() {
            warn!("Rejected allocation of {} MB: empty process name", size);
            return Err(MemoryError::InvalidName);
        }

        if size <= 0 {
            warn!("Rejected allocation for '{}': invalid size {} MB", name, size);
            return Err(MemoryError::InvalidSize(size));
        }

        // Requests beyond the platform's address width cannot fit either
        let requested = Size::try_from(size).unwrap_or(Size::MAX);
        if requested > self.available_memory {
            warn!(
                "Insufficient memory: '{}' requested {} MB, only {} MB available ({} used / {} total)",
                name,
                requested,
                self.available_memory,
                self.used_memory(),
                self.total_memory
            );
            return Err(MemoryError::InsufficientMemory {
                requested,
                available: self.available_memory,
            });
        }

        if self.blocks.contains_owner(&name) {
            warn!("Rejected allocation: process '{}' is already loaded", name);
            return Err(MemoryError::DuplicateName(name));
        }

        let Some(index) = self.blocks.first_fit(requested) else {
            let largest_free = self.blocks.largest_free();
            warn!(
                "No free block can hold '{}' ({} MB); largest free block is {} MB",
                name, requested, largest_free
            );
            return Err(MemoryError::NoSuitableBlock {
                requested,
                largest_free,
            });
        };

        let placement = match self.scheme {
            PartitionScheme::Fixed { .. } => {
                let block = self.blocks.occupy(index, name);
                Placement {
                    block_id: block.id,
                    start_address: block.start_address,
                    size: block.size,
                    charged: block.size,
                }
            }
            PartitionScheme::Dynamic => self.place_dynamic(index, requested, name),
        };

        self.available_memory -= placement.charged;
        self.log_allocation(&placement, requested);
        self.debug_verify();

        Ok(placement)
    }

    /// Occupy the free block at `index` exactly, splitting off any excess
    fn place_dynamic(&mut self, index: usize, requested: Size, name: ProcessName) -> Placement {
        let block_size = self.blocks.as_slice()[index].size;

        let index = if block_size == requested {
            self.blocks.occupy(index, name);
            index
        } else {
            let id = self.blocks.max_id().map_or(0, |max| max + 1);
            self.blocks.split_front(index, requested, id, name)
        };

        let block = &self.blocks.as_slice()[index];
        Placement {
            block_id: block.id,
            start_address: block.start_address,
            size: block.size,
            charged: requested,
        }
    }

    fn log_allocation(&self, placement: &Placement, requested: Size) {
        let used = self.used_memory();
        let usage_ratio = used as f64 / self.total_memory as f64;
        let pressure = MemoryPressure::from_ratio(usage_ratio);

        if pressure >= MemoryPressure::Medium {
            warn!(
                "Memory pressure {}: placed {} MB in block {} at {} MB ({:.1}% used: {} / {})",
                pressure,
                requested,
                placement.block_id,
                placement.start_address,
                usage_ratio * 100.0,
                used,
                self.total_memory
            );
        } else {
            info!(
                "Placed {} MB in block {} at {} MB (charged {} MB, {} MB available)",
                requested,
                placement.block_id,
                placement.start_address,
                placement.charged,
                self.available_memory
            );
        }
    }

    /// Whether a process named `name` currently occupies a block
    pub fn is_loaded(&self, name: &str) -> bool {
        self.blocks.contains_owner(&ProcessName::new(name))
    }

    /// Copy of the block occupied by `name`
    pub fn block_of(&self, name: &str) -> Option<Block> {
        let name = ProcessName::new(name);
        self.blocks
            .position_of(&name)
            .and_then(|index| self.blocks.get(index))
            .cloned()
    }
}
