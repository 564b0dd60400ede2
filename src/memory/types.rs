/*!
 * Memory Types
 * Common types for partitioned memory management
 */

use crate::core::limits::{
    CRITICAL_PRESSURE_THRESHOLD, HIGH_PRESSURE_THRESHOLD, MEDIUM_PRESSURE_THRESHOLD,
};
use crate::core::types::{Address, BlockId, RawAmount, Size};
use crate::core::ProcessName;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
///
/// Every variant except [`MemoryError::CorruptionDetected`] is a rejected
/// request: the simulator state is left exactly as it was before the call.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum MemoryError {
    #[error("Invalid memory size {0} MB: simulated memory must be at least 1 MB")]
    #[diagnostic(code(memory::invalid_capacity))]
    InvalidCapacity(Size),

    #[error("Invalid partition count {count}: must be between 1 and {total} for {total} MB of memory")]
    #[diagnostic(
        code(memory::invalid_configuration),
        help("Fixed partitioning needs at least one partition of at least 1 MB.")
    )]
    InvalidConfiguration { count: RawAmount, total: Size },

    #[error("Invalid process name: names must contain at least one visible character")]
    #[diagnostic(code(memory::invalid_name))]
    InvalidName,

    #[error("Invalid process size {0} MB: size must be greater than zero")]
    #[diagnostic(code(memory::invalid_size))]
    InvalidSize(RawAmount),

    #[error("Insufficient memory: requested {requested} MB, available {available} MB")]
    #[diagnostic(
        code(memory::insufficient_memory),
        help("Free a loaded process before loading this one.")
    )]
    InsufficientMemory { requested: Size, available: Size },

    #[error("A process named '{0}' is already loaded")]
    #[diagnostic(code(memory::duplicate_name))]
    DuplicateName(ProcessName),

    #[error("No free block can hold {requested} MB (largest free block: {largest_free} MB)")]
    #[diagnostic(
        code(memory::no_suitable_block),
        help("Free memory is fragmented. Compaction may produce a large enough block in dynamic mode.")
    )]
    NoSuitableBlock { requested: Size, largest_free: Size },

    #[error("Process '{0}' not found")]
    #[diagnostic(code(memory::not_found))]
    NotFound(ProcessName),

    #[error("Compaction is only applicable in dynamic partition mode")]
    #[diagnostic(code(memory::not_applicable))]
    NotApplicable,

    #[error("Memory map corruption detected: {0}")]
    #[diagnostic(code(memory::corruption_detected))]
    CorruptionDetected(String),
}

/// Partitioning discipline of the address space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionMode {
    /// Equal-size partitions established up front; internal fragmentation
    Fixed,
    /// Variable-size blocks created by split and merge; external fragmentation
    Dynamic,
}

impl fmt::Display for PartitionMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PartitionMode::Fixed => write!(f, "fixed"),
            PartitionMode::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// Established partition layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PartitionScheme {
    /// `partitions` blocks of `partition_size` MB each. Any remainder of the
    /// total that does not divide evenly is left unaddressed.
    Fixed {
        partitions: usize,
        partition_size: Size,
    },
    Dynamic,
}

impl PartitionScheme {
    pub fn mode(&self) -> PartitionMode {
        match self {
            PartitionScheme::Fixed { .. } => PartitionMode::Fixed,
            PartitionScheme::Dynamic => PartitionMode::Dynamic,
        }
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, PartitionScheme::Dynamic)
    }

    /// Memory covered by blocks under this scheme
    pub fn addressable(&self, total_memory: Size) -> Size {
        match *self {
            PartitionScheme::Fixed {
                partitions,
                partition_size,
            } => partitions * partition_size,
            PartitionScheme::Dynamic => total_memory,
        }
    }
}

/// Block occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockStatus {
    Free,
    Occupied,
}

impl fmt::Display for BlockStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BlockStatus::Free => write!(f, "FREE"),
            BlockStatus::Occupied => write!(f, "OCCUPIED"),
        }
    }
}

/// One contiguous region of the simulated address space
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub start_address: Address,
    pub size: Size,
    pub status: BlockStatus,
    pub owner: Option<ProcessName>,
}

impl Block {
    pub fn free(id: BlockId, start_address: Address, size: Size) -> Self {
        Self {
            id,
            start_address,
            size,
            status: BlockStatus::Free,
            owner: None,
        }
    }

    pub fn occupied(id: BlockId, start_address: Address, size: Size, owner: ProcessName) -> Self {
        Self {
            id,
            start_address,
            size,
            status: BlockStatus::Occupied,
            owner: Some(owner),
        }
    }

    /// First address past the end of the block
    #[inline]
    pub fn end_address(&self) -> Address {
        self.start_address + self.size
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.status == BlockStatus::Free
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.status == BlockStatus::Occupied
    }

    /// Whether this block is occupied by `name`
    pub fn is_owned_by(&self, name: &ProcessName) -> bool {
        self.is_occupied() && self.owner.as_ref() == Some(name)
    }

    pub fn occupy(&mut self, owner: ProcessName) {
        self.status = BlockStatus::Occupied;
        self.owner = Some(owner);
    }

    pub fn release(&mut self) {
        self.status = BlockStatus::Free;
        self.owner = None;
    }
}

/// Where a process was placed by a successful allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub block_id: BlockId,
    pub start_address: Address,
    /// Size of the block now holding the process
    pub size: Size,
    /// Memory deducted from the available total (the whole partition in fixed mode)
    pub charged: Size,
}

/// Fragmentation totals in MB
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentationReport {
    pub internal: Size,
    pub external: Size,
}

impl FragmentationReport {
    pub fn total(&self) -> Size {
        self.internal + self.external
    }
}

/// Memory statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStats {
    pub mode: PartitionMode,
    pub total_memory: Size,
    pub used_memory: Size,
    pub available_memory: Size,
    pub usage_percentage: f64,
    pub occupied_blocks: usize,
    pub free_blocks: usize,
    pub largest_free_block: Size,
}

impl MemoryStats {
    pub fn memory_pressure(&self) -> MemoryPressure {
        MemoryPressure::from_ratio(self.usage_percentage / 100.0)
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl MemoryPressure {
    pub fn from_ratio(usage_ratio: f64) -> Self {
        if usage_ratio >= CRITICAL_PRESSURE_THRESHOLD {
            MemoryPressure::Critical
        } else if usage_ratio >= HIGH_PRESSURE_THRESHOLD {
            MemoryPressure::High
        } else if usage_ratio >= MEDIUM_PRESSURE_THRESHOLD {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

impl fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}
