/*!
 * Block List
 * Address-ordered sequence of blocks covering the simulated address space
 */

use super::super::types::{Block, BlockStatus, MemoryError, MemoryResult, PartitionScheme};
use crate::core::types::{Address, BlockId, Size};
use crate::core::ProcessName;
use log::debug;
use serde::Serialize;
use std::collections::HashSet;

/// Ordered, contiguous, non-overlapping blocks
///
/// Blocks live in a `Vec` and are spliced in place: a split inserts the new
/// block in front of the shrunk remainder, a merge removes the absorbed block.
/// Indices are only valid until the next shape change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BlockList {
    blocks: Vec<Block>,
}

impl BlockList {
    /// A single free block spanning `[0, total)`
    pub(super) fn single(total: Size) -> Self {
        Self {
            blocks: vec![Block::free(0, 0, total)],
        }
    }

    /// `partitions` free blocks of `partition_size` each, ids `0..partitions`
    pub(super) fn partitioned(partitions: usize, partition_size: Size) -> Self {
        let blocks = (0..partitions)
            .map(|i| Block::free(i, i * partition_size, partition_size))
            .collect();
        Self { blocks }
    }

    pub(super) fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Block] {
        &self.blocks
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Index of the occupied block bound to `name`
    pub fn position_of(&self, name: &ProcessName) -> Option<usize> {
        self.blocks.iter().position(|b| b.is_owned_by(name))
    }

    pub fn contains_owner(&self, name: &ProcessName) -> bool {
        self.position_of(name).is_some()
    }

    /// Index of the first free block, in address order, that can hold `size`
    pub fn first_fit(&self, size: Size) -> Option<usize> {
        self.blocks
            .iter()
            .position(|b| b.is_free() && size <= b.size)
    }

    pub fn largest_free(&self) -> Size {
        self.blocks
            .iter()
            .filter(|b| b.is_free())
            .map(|b| b.size)
            .max()
            .unwrap_or(0)
    }

    pub fn max_id(&self) -> Option<BlockId> {
        self.blocks.iter().map(|b| b.id).max()
    }

    /// Sum of all block sizes
    pub fn covered(&self) -> Size {
        self.blocks.iter().map(|b| b.size).sum()
    }

    /// Sum of occupied block sizes
    pub fn occupied_size(&self) -> Size {
        self.sum_by_status(BlockStatus::Occupied)
    }

    /// Sum of free block sizes
    pub fn free_size(&self) -> Size {
        self.sum_by_status(BlockStatus::Free)
    }

    pub fn count_by_status(&self, status: BlockStatus) -> usize {
        self.blocks.iter().filter(|b| b.status == status).count()
    }

    fn sum_by_status(&self, status: BlockStatus) -> Size {
        self.blocks
            .iter()
            .filter(|b| b.status == status)
            .map(|b| b.size)
            .sum()
    }

    /// Bind the free block at `index` to `owner` without changing its shape
    pub(super) fn occupy(&mut self, index: usize, owner: ProcessName) -> &Block {
        let block = &mut self.blocks[index];
        block.occupy(owner);
        block
    }

    /// Carve `size` off the front of the free block at `index`
    ///
    /// The occupied piece keeps the original start address and is inserted
    /// before the remainder, which shifts forward and shrinks. Returns the
    /// index of the new occupied block (always `index`).
    pub(super) fn split_front(
        &mut self,
        index: usize,
        size: Size,
        id: BlockId,
        owner: ProcessName,
    ) -> usize {
        let remainder = &mut self.blocks[index];
        debug_assert!(remainder.is_free() && size < remainder.size);

        let start = remainder.start_address;
        remainder.start_address += size;
        remainder.size -= size;

        debug!(
            "Split block {} at {} MB: {} MB occupied by '{}', {} MB remain free",
            remainder.id, start, size, owner, remainder.size
        );

        self.blocks.insert(index, Block::occupied(id, start, size, owner));
        index
    }

    /// Mark the block at `index` free and return its size
    pub(super) fn release(&mut self, index: usize) -> Size {
        let block = &mut self.blocks[index];
        block.release();
        block.size
    }

    /// Merge the free block at `index` with free neighbours
    ///
    /// The following block is absorbed first, then the block itself is
    /// absorbed into the preceding one. Returns the index of the block that
    /// now holds the merged region.
    pub(super) fn coalesce_at(&mut self, index: usize) -> usize {
        debug_assert!(self.blocks[index].is_free());

        if self.blocks.get(index + 1).is_some_and(Block::is_free) {
            let next = self.blocks.remove(index + 1);
            self.blocks[index].size += next.size;
            debug!(
                "Coalesced block {} ({} MB) into block {} at {} MB",
                next.id, next.size, self.blocks[index].id, self.blocks[index].start_address
            );
        }

        if index > 0 && self.blocks[index - 1].is_free() {
            let current = self.blocks.remove(index);
            let prev = &mut self.blocks[index - 1];
            prev.size += current.size;
            debug!(
                "Coalesced block {} ({} MB) into block {} at {} MB",
                current.id, current.size, prev.id, prev.start_address
            );
            return index - 1;
        }

        index
    }

    /// Check the structural invariants for `scheme` over `addressable` MB
    pub fn verify(&self, scheme: PartitionScheme, addressable: Size) -> MemoryResult<()> {
        let mut expected_start: Address = 0;
        let mut owners = HashSet::new();

        for (i, block) in self.blocks.iter().enumerate() {
            if block.size == 0 {
                return Err(corruption(format!("block {} at index {} has zero size", block.id, i)));
            }
            if block.start_address != expected_start {
                return Err(corruption(format!(
                    "block {} starts at {} MB, expected {} MB",
                    block.id, block.start_address, expected_start
                )));
            }
            match (&block.status, &block.owner) {
                (BlockStatus::Occupied, Some(owner)) => {
                    if !owners.insert(owner.clone()) {
                        return Err(corruption(format!("process '{}' occupies more than one block", owner)));
                    }
                }
                (BlockStatus::Occupied, None) => {
                    return Err(corruption(format!("occupied block {} has no owner", block.id)));
                }
                (BlockStatus::Free, Some(owner)) => {
                    return Err(corruption(format!("free block {} still names owner '{}'", block.id, owner)));
                }
                (BlockStatus::Free, None) => {}
            }
            expected_start = block.end_address();
        }

        if expected_start != addressable {
            return Err(corruption(format!(
                "blocks cover {} MB, expected {} MB",
                expected_start, addressable
            )));
        }

        match scheme {
            PartitionScheme::Dynamic => {
                if let Some(pair) = self
                    .blocks
                    .windows(2)
                    .find(|pair| pair[0].is_free() && pair[1].is_free())
                {
                    return Err(corruption(format!(
                        "adjacent free blocks {} and {} were not coalesced",
                        pair[0].id, pair[1].id
                    )));
                }
            }
            PartitionScheme::Fixed {
                partitions,
                partition_size,
            } => {
                if self.blocks.len() != partitions {
                    return Err(corruption(format!(
                        "fixed layout has {} blocks, expected {}",
                        self.blocks.len(),
                        partitions
                    )));
                }
                if let Some(block) = self.blocks.iter().find(|b| b.size != partition_size) {
                    return Err(corruption(format!(
                        "fixed partition {} has {} MB, expected {} MB",
                        block.id, block.size, partition_size
                    )));
                }
            }
        }

        Ok(())
    }
}

fn corruption(reason: String) -> MemoryError {
    MemoryError::CorruptionDetected(reason)
}

impl<'a> IntoIterator for &'a BlockList {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
