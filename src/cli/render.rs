/*!
 * Memory Map Rendering
 * Text table, proportional bar, and JSON export built from simulator snapshots
 */

use crate::core::limits::MAP_BAR_WIDTH;
use crate::core::types::Size;
use crate::memory::{Block, FragmentationReport, MemorySimulator, MemoryStats};
use serde::Serialize;
use std::fmt::Write;

const RULE: &str = "--------------------------------------------------------------";

/// Full memory map: header, block table, bar, and legend
pub fn render_memory_map(sim: &MemorySimulator) -> String {
    let blocks = sim.snapshot();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "=== Memory state ({} MB total, {} MB available, {} partitions) ===",
        sim.total_memory(),
        sim.available_memory(),
        sim.mode()
    );
    out.push_str(&render_table(&blocks));
    out.push('\n');
    out.push_str("Memory layout:\n");
    out.push_str(&render_bar(&blocks, sim.total_memory()));
    out.push('\n');
    out.push_str("Legend: [.] = free, [#] = occupied\n");
    out
}

/// Block table in address order
pub fn render_table(blocks: &[Block]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<10} {:<10} {:<10} {}", "Address", "Size", "Status", "Process");
    let _ = writeln!(out, "{}", RULE);
    for block in blocks {
        let owner = block.owner.as_ref().map_or("-", |name| name.as_str());
        let _ = writeln!(
            out,
            "{:>4} MB    {:>4} MB    {:<10} {}",
            block.start_address, block.size, block.status, owner
        );
    }
    let _ = writeln!(out, "{}", RULE);
    out
}

/// Proportional bar: each block gets `size * 50 / total` characters, at least one
pub fn render_bar(blocks: &[Block], total_memory: Size) -> String {
    let segments: Vec<String> = blocks
        .iter()
        .map(|block| {
            let width = (block.size * MAP_BAR_WIDTH / total_memory.max(1)).max(1);
            let fill = if block.is_free() { "." } else { "#" };
            fill.repeat(width)
        })
        .collect();
    format!("[{}]", segments.join("|"))
}

pub fn render_fragmentation(report: &FragmentationReport) -> String {
    format!(
        "Fragmentation:\n- Internal fragmentation: {} MB\n- External fragmentation: {} MB\n",
        report.internal, report.external
    )
}

/// Serializable view of the whole simulator state
#[derive(Debug, Serialize)]
pub struct MapExport<'a> {
    pub stats: MemoryStats,
    pub fragmentation: FragmentationReport,
    pub blocks: &'a [Block],
}

/// Pretty-printed JSON of stats, fragmentation and blocks
pub fn render_json(sim: &MemorySimulator) -> serde_json::Result<String> {
    let export = MapExport {
        stats: sim.stats(),
        fragmentation: sim.analyze_fragmentation(),
        blocks: sim.blocks().as_slice(),
    };
    serde_json::to_string_pretty(&export)
}
