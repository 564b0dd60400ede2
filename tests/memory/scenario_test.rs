/*!
 * Memory Simulator Scenarios
 * Reference walkthroughs for fixed and dynamic partitioning
 */

use partition_sim::memory::{
    Allocator, Block, FragmentationReport, MemoryError, MemoryManager, MemorySimulator,
    PartitionMode,
};
use partition_sim::ProcessName;
use pretty_assertions::assert_eq;

fn occupied(id: usize, start: usize, size: usize, owner: &str) -> Block {
    Block::occupied(id, start, size, ProcessName::new(owner))
}

/// (start, size, owner) triples, ignoring ids
fn layout(sim: &MemorySimulator) -> Vec<(usize, usize, Option<String>)> {
    sim.snapshot()
        .into_iter()
        .map(|b| (b.start_address, b.size, b.owner.map(String::from)))
        .collect()
}

fn owned(s: &str) -> Option<String> {
    Some(s.to_string())
}

#[test]
fn test_simulator_initialization() {
    let sim = MemorySimulator::new();
    let (total, used, available) = sim.info();

    assert_eq!(total, 64);
    assert_eq!(used, 0);
    assert_eq!(available, total);
    assert_eq!(sim.mode(), PartitionMode::Dynamic);
    assert_eq!(sim.snapshot(), vec![Block::free(0, 0, 64)]);
}

#[test]
fn test_fixed_partition_internal_fragmentation() {
    let mut sim = MemorySimulator::with_capacity(64).unwrap();
    sim.establish(PartitionMode::Fixed, Some(4)).unwrap();
    assert_eq!(sim.blocks().len(), 4);
    assert!(sim.blocks().iter().all(|b| b.size == 16 && b.is_free()));

    let placement = sim.allocate("P1", 10).unwrap();
    assert_eq!(placement.block_id, 0);
    assert_eq!(sim.available_memory(), 48);
    assert_eq!(
        sim.analyze_fragmentation(),
        FragmentationReport {
            internal: 5,
            external: 0
        }
    );
}

#[test]
fn test_dynamic_walkthrough() {
    let mut sim = MemorySimulator::with_capacity(64).unwrap();

    // Two loads split the initial block from the front
    sim.allocate("P1", 20).unwrap();
    sim.allocate("P2", 10).unwrap();
    assert_eq!(
        layout(&sim),
        vec![(0, 20, owned("P1")), (20, 10, owned("P2")), (30, 34, None)]
    );
    assert_eq!(sim.available_memory(), 34);

    // Freeing P1 cannot merge across the occupied P2
    sim.deallocate("P1").unwrap();
    assert_eq!(
        layout(&sim),
        vec![(0, 20, None), (20, 10, owned("P2")), (30, 34, None)]
    );

    // Freeing P2 joins all three regions
    sim.deallocate("P2").unwrap();
    assert_eq!(layout(&sim), vec![(0, 64, None)]);
    assert_eq!(sim.available_memory(), 64);
}

#[test]
fn test_compaction_walkthrough() {
    // A[0,10) FREE[10,15) B[15,25) FREE[25,64)
    let mut sim = MemorySimulator::with_capacity(64).unwrap();
    sim.allocate("A", 10).unwrap();
    sim.allocate("HOLE", 5).unwrap();
    sim.allocate("B", 10).unwrap();
    sim.deallocate("HOLE").unwrap();
    assert_eq!(
        layout(&sim),
        vec![
            (0, 10, owned("A")),
            (10, 5, None),
            (15, 10, owned("B")),
            (25, 39, None)
        ]
    );

    let a = sim.block_of("A").unwrap();
    let b = sim.block_of("B").unwrap();
    sim.compact().unwrap();

    assert_eq!(
        sim.snapshot(),
        vec![
            occupied(a.id, 0, 10, "A"),
            occupied(b.id, 10, 10, "B"),
            Block::free(b.id + 1, 20, 44),
        ]
    );
    assert_eq!(
        sim.analyze_fragmentation(),
        FragmentationReport {
            internal: 0,
            external: 44
        }
    );
}

#[test]
fn test_compaction_preserves_order_not_size() {
    let mut sim = MemorySimulator::with_capacity(64).unwrap();
    sim.allocate("big", 20).unwrap();
    sim.allocate("gap", 4).unwrap();
    sim.allocate("small", 2).unwrap();
    sim.deallocate("gap").unwrap();
    sim.compact().unwrap();

    let owners: Vec<_> = sim
        .snapshot()
        .into_iter()
        .filter_map(|b| b.owner.map(String::from))
        .collect();
    assert_eq!(owners, vec!["big", "small"]);
}

#[test]
fn test_compaction_makes_room_for_blocked_request() {
    let mut sim = MemorySimulator::with_capacity(64).unwrap();
    sim.allocate("A", 20).unwrap();
    sim.allocate("B", 20).unwrap();
    sim.allocate("C", 20).unwrap();
    sim.deallocate("B").unwrap();

    // 24 MB free in total but split 20 + 4
    assert!(matches!(
        sim.allocate("D", 24),
        Err(MemoryError::NoSuitableBlock { .. })
    ));

    sim.compact().unwrap();
    let placement = sim.allocate("D", 24).unwrap();
    assert_eq!(placement.start_address, 40);
    assert_eq!(sim.available_memory(), 0);
}

#[test]
fn test_error_cases() {
    let mut sim = MemorySimulator::with_capacity(64).unwrap();
    assert_eq!(sim.allocate("X", -5), Err(MemoryError::InvalidSize(-5)));
    assert_eq!(
        sim.establish(PartitionMode::Fixed, Some(0)),
        Err(MemoryError::InvalidConfiguration {
            count: 0,
            total: 64
        })
    );

    sim.establish(PartitionMode::Fixed, Some(2)).unwrap();
    assert_eq!(sim.compact(), Err(MemoryError::NotApplicable));
}

#[test]
fn test_insufficient_versus_no_suitable_block() {
    let mut sim = MemorySimulator::with_capacity(64).unwrap();
    sim.establish(PartitionMode::Fixed, Some(4)).unwrap();
    sim.allocate("P1", 1).unwrap();
    sim.allocate("P2", 1).unwrap();
    sim.allocate("P3", 1).unwrap();

    // 16 MB available, but more than that is requested
    assert_eq!(
        sim.allocate("P4", 17),
        Err(MemoryError::InsufficientMemory {
            requested: 17,
            available: 16
        })
    );
    sim.allocate("P4", 16).unwrap();
    assert_eq!(sim.available_memory(), 0);
}

#[test]
fn test_fixed_remainder_counts_as_available_but_unplaceable() {
    // 64 / 3 = 21 MB partitions, 1 MB never addressed
    let mut sim = MemorySimulator::with_capacity(64).unwrap();
    sim.establish(PartitionMode::Fixed, Some(3)).unwrap();
    for name in ["A", "B", "C"] {
        sim.allocate(name, 21).unwrap();
    }

    assert_eq!(sim.available_memory(), 1);
    assert_eq!(
        sim.allocate("D", 1),
        Err(MemoryError::NoSuitableBlock {
            requested: 1,
            largest_free: 0
        })
    );
}

#[test]
fn test_fixed_fragmentation_matches_reference_truncation() {
    let mut sim = MemorySimulator::with_capacity(90).unwrap();
    sim.establish(PartitionMode::Fixed, Some(1)).unwrap();
    sim.allocate("P1", 50).unwrap();
    assert_eq!(sim.analyze_fragmentation().internal, 28);
}

#[test]
fn test_trait_objects_drive_the_simulator() {
    fn load_and_report<M: MemoryManager>(m: &mut M) -> usize {
        m.allocate("svc", 8).unwrap();
        m.compact().unwrap();
        m.stats().used_memory
    }

    let mut sim = MemorySimulator::with_capacity(64).unwrap();
    assert_eq!(load_and_report(&mut sim), 8);
    assert!(Allocator::is_loaded(&sim, "svc"));
}
