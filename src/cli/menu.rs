/*!
 * Interactive Menu
 * Numbered-menu loop driving a simulator from line-oriented input
 */

use super::render::{render_fragmentation, render_json, render_memory_map};
use crate::core::limits::MAX_PROCESS_NAME;
use crate::core::types::RawAmount;
use crate::core::ProcessName;
use crate::memory::{MemoryError, MemorySimulator, PartitionMode, PartitionScheme};
use crate::monitoring::span_operation;
use std::io::{self, BufRead, Write};

const MENU: &str = "\
=== Memory Management Simulator ===
1. Set partition mode
2. Load process
3. Free process
4. Calculate fragmentation
5. Compact memory
6. Show memory state
7. Export memory state as JSON
0. Exit";

/// Menu loop over an input/output pair
///
/// The simulator is the only state; the menu just parses input, calls into it
/// and prints what it returns. End of input behaves like choosing exit.
pub struct Menu<R, W> {
    sim: MemorySimulator,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(sim: MemorySimulator, input: R, output: W) -> Self {
        Self { sim, input, output }
    }

    pub fn simulator(&self) -> &MemorySimulator {
        &self.sim
    }

    pub fn into_simulator(self) -> MemorySimulator {
        self.sim
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "Simulator initialized with {} MB of memory.",
            self.sim.total_memory()
        )?;

        loop {
            writeln!(self.output, "\n{}", MENU)?;
            let Some(choice) = self.prompt("\nEnter your option: ")? else {
                break;
            };

            let keep_running = match choice.as_str() {
                "1" => self.set_partition_mode()?,
                "2" => self.load_process()?,
                "3" => self.free_process()?,
                "4" => self.show_fragmentation()?,
                "5" => self.compact()?,
                "6" => self.show_map()?,
                "7" => self.export_json()?,
                "0" => false,
                _ => {
                    writeln!(self.output, "\nInvalid option.")?;
                    true
                }
            };

            if !keep_running {
                break;
            }
        }

        writeln!(self.output, "\nSimulator finished.")?;
        self.output.flush()
    }

    /// Print `message` and read one trimmed line; `None` at end of input
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt for an integer; `Ok(None)` at end of input or on a parse failure
    fn prompt_amount(&mut self, message: &str) -> io::Result<Option<RawAmount>> {
        let Some(raw) = self.prompt(message)? else {
            return Ok(None);
        };
        match raw.parse::<RawAmount>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                writeln!(self.output, "Invalid number: '{}'.", raw)?;
                Ok(None)
            }
        }
    }

    fn report_error(&mut self, err: &MemoryError) -> io::Result<()> {
        writeln!(self.output, "Error: {}", err)
    }

    fn set_partition_mode(&mut self) -> io::Result<bool> {
        let span = span_operation("establish");
        writeln!(self.output, "\nSelect the partition type:")?;
        writeln!(self.output, "1. Fixed partitions")?;
        writeln!(self.output, "2. Dynamic partitions")?;

        let Some(kind) = self.prompt("Enter your option: ")? else {
            return Ok(false);
        };

        let outcome = match kind.as_str() {
            "1" => {
                let Some(count) = self.prompt_amount("Enter the number of fixed partitions: ")? else {
                    return Ok(true);
                };
                self.sim.establish(PartitionMode::Fixed, Some(count))
            }
            "2" => self.sim.establish(PartitionMode::Dynamic, None),
            _ => {
                writeln!(self.output, "Invalid option.")?;
                return Ok(true);
            }
        };
        span.record_outcome(&outcome);

        match outcome {
            Ok(()) => match self.sim.scheme() {
                PartitionScheme::Fixed {
                    partitions,
                    partition_size,
                } => writeln!(
                    self.output,
                    "Fixed partition mode set with {} partitions of {} MB each.",
                    partitions, partition_size
                )?,
                PartitionScheme::Dynamic => {
                    writeln!(self.output, "Dynamic partition mode set.")?
                }
            },
            Err(err) => self.report_error(&err)?,
        }
        Ok(true)
    }

    fn load_process(&mut self) -> io::Result<bool> {
        let span = span_operation("allocate");
        let Some(name) = self.prompt("\nEnter the process name: ")? else {
            return Ok(false);
        };
        if ProcessName::would_truncate(&name) {
            writeln!(
                self.output,
                "Warning: process names are limited to {} characters; using '{}'.",
                MAX_PROCESS_NAME,
                ProcessName::new(&name)
            )?;
        }
        let Some(size) = self.prompt_amount("Enter the process size (MB): ")? else {
            return Ok(true);
        };

        let outcome = self.sim.allocate(&name, size);
        span.record_outcome(&outcome);

        match outcome {
            Ok(placement) => writeln!(
                self.output,
                "\nProcess '{}' loaded at {} MB ({} MB block).",
                name, placement.start_address, placement.size
            )?,
            Err(err) => {
                writeln!(self.output, "\nCould not load process '{}'.", name)?;
                self.report_error(&err)?;
            }
        }

        self.show_map()
    }

    fn free_process(&mut self) -> io::Result<bool> {
        let span = span_operation("deallocate");
        let Some(name) = self.prompt("\nEnter the name of the process to free: ")? else {
            return Ok(false);
        };

        let outcome = self.sim.deallocate(&name);
        span.record_outcome(&outcome);

        match outcome {
            Ok(released) => writeln!(
                self.output,
                "\nProcess '{}' freed ({} MB released).",
                name, released
            )?,
            Err(err) => self.report_error(&err)?,
        }

        self.show_map()
    }

    fn show_fragmentation(&mut self) -> io::Result<bool> {
        let report = self.sim.analyze_fragmentation();
        write!(self.output, "\n{}", render_fragmentation(&report))?;
        Ok(true)
    }

    fn compact(&mut self) -> io::Result<bool> {
        let span = span_operation("compact");
        writeln!(self.output, "\nMemory state before compaction:")?;
        self.show_map()?;

        let outcome = self.sim.compact();
        span.record_outcome(&outcome);

        match outcome {
            Ok(()) => {
                writeln!(self.output, "Memory compacted successfully.")?;
                writeln!(self.output, "\nMemory state after compaction:")?;
                self.show_map()
            }
            Err(err) => {
                self.report_error(&err)?;
                Ok(true)
            }
        }
    }

    fn show_map(&mut self) -> io::Result<bool> {
        write!(self.output, "\n{}", render_memory_map(&self.sim))?;
        Ok(true)
    }

    fn export_json(&mut self) -> io::Result<bool> {
        let json = render_json(&self.sim).map_err(io::Error::other)?;
        writeln!(self.output, "\n{}", json)?;
        Ok(true)
    }
}
