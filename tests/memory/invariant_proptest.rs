/*!
 * Block List Invariant Properties
 * Random operation sequences must keep the memory map consistent
 */

use partition_sim::memory::{Block, MemorySimulator, PartitionMode, PartitionScheme};
use proptest::prelude::*;

const NAMES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

#[derive(Debug, Clone)]
enum Op {
    Allocate(usize, i64),
    Deallocate(usize),
    Compact,
    Fixed(i64),
    Dynamic,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0..NAMES.len(), -2i64..40).prop_map(|(name, size)| Op::Allocate(name, size)),
        4 => (0..NAMES.len()).prop_map(Op::Deallocate),
        1 => Just(Op::Compact),
        1 => (-1i64..10).prop_map(Op::Fixed),
        1 => Just(Op::Dynamic),
    ]
}

fn apply(sim: &mut MemorySimulator, op: &Op) -> bool {
    match *op {
        Op::Allocate(name, size) => sim.allocate(NAMES[name], size).is_ok(),
        Op::Deallocate(name) => sim.deallocate(NAMES[name]).is_ok(),
        Op::Compact => sim.compact().is_ok(),
        Op::Fixed(count) => sim.establish(PartitionMode::Fixed, Some(count)).is_ok(),
        Op::Dynamic => sim.establish(PartitionMode::Dynamic, None).is_ok(),
    }
}

/// Block shapes without ids
fn layout(blocks: &[Block]) -> Vec<(usize, usize, bool)> {
    blocks
        .iter()
        .map(|b| (b.start_address, b.size, b.is_free()))
        .collect()
}

proptest! {
    #[test]
    fn prop_invariants_hold_after_every_operation(
        total in 1usize..128,
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let mut sim = MemorySimulator::with_capacity(total).unwrap();

        for op in &ops {
            let before = sim.clone();
            let succeeded = apply(&mut sim, op);

            prop_assert!(sim.verify_integrity().is_ok(), "{:?} broke {:?}", op, sim.snapshot());
            if !succeeded {
                prop_assert_eq!(&sim, &before, "rejected {:?} changed state", op);
            }

            let occupied: usize = sim.blocks().iter().filter(|b| b.is_occupied()).map(|b| b.size).sum();
            prop_assert_eq!(sim.used_memory(), occupied);
        }
    }

    #[test]
    fn prop_fixed_layout_never_changes(
        count in 1i64..9,
        ops in prop::collection::vec(
            prop_oneof![
                (0..NAMES.len(), 1i64..30).prop_map(|(n, s)| Op::Allocate(n, s)),
                (0..NAMES.len()).prop_map(Op::Deallocate),
                Just(Op::Compact),
            ],
            1..40,
        ),
    ) {
        let mut sim = MemorySimulator::with_capacity(64).unwrap();
        sim.establish(PartitionMode::Fixed, Some(count)).unwrap();
        let shape: Vec<_> = sim.snapshot().iter().map(|b| (b.id, b.start_address, b.size)).collect();

        for op in &ops {
            apply(&mut sim, op);
            let now: Vec<_> = sim.snapshot().iter().map(|b| (b.id, b.start_address, b.size)).collect();
            prop_assert_eq!(&now, &shape);
        }

        let partition_size = match sim.scheme() {
            PartitionScheme::Fixed { partition_size, .. } => partition_size,
            PartitionScheme::Dynamic => unreachable!(),
        };
        let loaded = sim.blocks().iter().filter(|b| b.is_occupied()).count();
        prop_assert_eq!(sim.available_memory(), 64 - loaded * partition_size);
    }

    #[test]
    fn prop_allocate_then_free_restores_layout(
        sizes in prop::collection::vec(1i64..16, 0..5),
        free_mask in prop::collection::vec(any::<bool>(), 5),
        probe in 1i64..64,
    ) {
        let mut sim = MemorySimulator::with_capacity(64).unwrap();
        for (i, &size) in sizes.iter().enumerate() {
            let _ = sim.allocate(NAMES[i], size);
        }
        for (i, free) in free_mask.iter().enumerate() {
            if *free {
                let _ = sim.deallocate(NAMES[i]);
            }
        }

        let before = layout(&sim.snapshot());
        let available = sim.available_memory();
        if sim.allocate("probe", probe).is_ok() {
            prop_assert_eq!(sim.deallocate("probe"), Ok(probe as usize));
            prop_assert_eq!(layout(&sim.snapshot()), before);
            prop_assert_eq!(sim.available_memory(), available);
        }
    }

    #[test]
    fn prop_compaction_is_idempotent(
        sizes in prop::collection::vec(1i64..20, 1..6),
        free_mask in prop::collection::vec(any::<bool>(), 6),
    ) {
        let mut sim = MemorySimulator::with_capacity(100).unwrap();
        for (i, &size) in sizes.iter().enumerate() {
            let _ = sim.allocate(NAMES[i], size);
        }
        for (i, free) in free_mask.iter().enumerate() {
            if *free {
                let _ = sim.deallocate(NAMES[i]);
            }
        }

        let owners_before: Vec<_> = sim.snapshot().into_iter().filter_map(|b| b.owner).collect();
        sim.compact().unwrap();
        let once = sim.snapshot();
        sim.compact().unwrap();

        prop_assert_eq!(&sim.snapshot(), &once);
        prop_assert!(sim.blocks().iter().filter(|b| b.is_free()).count() <= 1);
        let owners_after: Vec<_> = once.into_iter().filter_map(|b| b.owner).collect();
        prop_assert_eq!(owners_after, owners_before);
        prop_assert_eq!(sim.analyze_fragmentation().external, sim.available_memory());
    }
}
