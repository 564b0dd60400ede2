/*!
 * Partition Simulator - Main Entry Point
 *
 * Interactive memory management simulator:
 * - Fixed and dynamic partitioning
 * - Loading and freeing named processes
 * - Internal and external fragmentation
 * - Compaction
 */

use miette::{IntoDiagnostic, Result};
use std::io;
use tracing::info;

use partition_sim::cli::Menu;
use partition_sim::{init_tracing, MemorySimulator, SimulatorConfig};

fn main() -> Result<()> {
    init_tracing();

    let config = SimulatorConfig::from_env()?;
    info!(
        total_memory = config.total_memory,
        mode = %config.initial_mode,
        "Starting partition simulator"
    );

    let simulator = MemorySimulator::from_config(&config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(simulator, stdin.lock(), stdout.lock());
    menu.run().into_diagnostic()?;

    info!("Partition simulator finished");
    Ok(())
}
