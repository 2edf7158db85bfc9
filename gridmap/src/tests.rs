use crate::*;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use test_case::test_case;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 11
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start) as u64) as usize
    }

    fn gen_ratio(&mut self, numerator: u64, denominator: u64) -> bool {
        self.next_u64() % denominator < numerator
    }
}

fn mapper_with(length: usize) -> IndexMapper {
    let mut mapper = IndexMapper::new();
    mapper.init_to_length(length);
    mapper
}

fn flag_indexes(mapper: &mut IndexMapper, name: &str, indexes: &[usize]) {
    mapper
        .update_map::<bool, _>(name, |map| {
            for &index in indexes {
                map.set_value_at(index, true);
            }
        })
        .unwrap();
}

fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    (Arc::clone(&count), count)
}

fn assert_consistent(mapper: &IndexMapper) {
    let n = mapper.number_of_indexes();
    let mut sorted = mapper.indexes_sequence().to_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..n).collect::<Vec<_>>(), "sequence must be a permutation");

    for (_, map) in mapper.trimming_collection().maps().iter() {
        assert_eq!(map.len(), n);
    }
    for (_, map) in mapper.hiding_collection().maps().iter() {
        assert_eq!(map.len(), n);
    }
    for (_, map) in mapper.value_collection().iter() {
        assert_eq!(map.len(), n);
    }

    assert_eq!(mapper.not_trimmed_indexes(), &mapper.compute_not_trimmed_indexes()[..]);
    assert_eq!(mapper.not_hidden_indexes(), &mapper.compute_not_hidden_indexes()[..]);
    assert_eq!(mapper.renderable_indexes(), &mapper.compute_renderable_indexes()[..]);

    for visual in 0..mapper.not_trimmed_indexes_length() {
        let physical = mapper.physical_from_visual(visual).unwrap();
        assert_eq!(mapper.visual_from_physical(physical), Some(visual));
    }
    for renderable in 0..mapper.renderable_indexes_length() {
        let visual = mapper.visual_from_renderable(renderable).unwrap();
        assert_eq!(mapper.renderable_from_visual(visual), Some(renderable));
    }
}

#[test]
fn starts_empty() {
    let mapper = IndexMapper::new();
    assert!(mapper.indexes_sequence().is_empty());
    assert!(mapper.not_trimmed_indexes().is_empty());
    assert_eq!(mapper.number_of_indexes(), 0);
    assert_eq!(mapper.not_trimmed_indexes_length(), 0);
    assert_eq!(mapper.physical_from_visual(0), None);
    assert_eq!(mapper.visual_from_physical(0), None);
}

#[test]
fn init_to_length_seeds_identity() {
    for n in 0..20 {
        let mapper = mapper_with(n);
        let identity: Vec<usize> = (0..n).collect();
        assert_eq!(mapper.indexes_sequence(), &identity[..]);
        assert_eq!(mapper.not_trimmed_indexes(), &identity[..]);
        assert_eq!(mapper.not_hidden_indexes(), &identity[..]);
        assert_eq!(mapper.renderable_indexes(), &identity[..]);
        assert_eq!(mapper.number_of_indexes(), n);
    }
}

#[test]
fn init_to_length_resets_registered_maps() {
    let mut mapper = mapper_with(4);
    mapper.register_map("trim", IndexMap::trimming()).unwrap();
    flag_indexes(&mut mapper, "trim", &[1]);
    mapper.move_indexes(&[2], 0).unwrap();
    assert_eq!(mapper.indexes_sequence(), &[3, 0, 1, 2]);

    mapper.init_to_length(6);
    assert_eq!(mapper.indexes_sequence(), &[0, 1, 2, 3, 4, 5]);
    assert_eq!(mapper.map::<bool>("trim").unwrap().values(), &[false; 6]);
    assert_eq!(mapper.not_trimmed_indexes_length(), 6);
}

#[test]
fn initial_length_option_initializes_on_construction() {
    let (inits, seen) = counter();
    let mapper = IndexMapper::with_options(
        IndexMapperOptions::new()
            .with_initial_length(3)
            .with_on_init(Some(move |_: &IndexMapper| {
                seen.fetch_add(1, Ordering::Relaxed);
            })),
    );
    assert_eq!(mapper.indexes_sequence(), &[0, 1, 2]);
    assert_eq!(inits.load(Ordering::Relaxed), 1);
}

#[test]
fn init_fires_single_init_and_no_change() {
    let (changes, seen_changes) = counter();
    let (inits, seen_inits) = counter();
    let (rebuilds, seen_rebuilds) = counter();
    let mut mapper = IndexMapper::new();
    mapper.register_map("trim", IndexMap::trimming()).unwrap();
    mapper.register_map("hide", IndexMap::hiding()).unwrap();
    mapper.register_map("width", IndexMap::new(0u32)).unwrap();
    mapper.set_on_change(Some(move |_: &IndexMapper, _: MapChange<'_>| {
        seen_changes.fetch_add(1, Ordering::Relaxed);
    }));
    mapper.set_on_init(Some(move |m: &IndexMapper| {
        assert_eq!(m.not_trimmed_indexes_length(), 10);
        seen_inits.fetch_add(1, Ordering::Relaxed);
    }));
    mapper.set_on_cache_updated(Some(move |_: &IndexMapper, _: CacheChanges| {
        seen_rebuilds.fetch_add(1, Ordering::Relaxed);
    }));

    mapper.init_to_length(10);
    assert_eq!(inits.load(Ordering::Relaxed), 1);
    assert_eq!(rebuilds.load(Ordering::Relaxed), 1);
    assert_eq!(changes.load(Ordering::Relaxed), 0);
}

#[test]
fn register_dispatches_by_category() {
    let mut mapper = IndexMapper::new();
    mapper.register_map("trim", IndexMap::trimming()).unwrap();
    mapper.register_map("hide", IndexMap::hiding()).unwrap();
    mapper.register_map("width", IndexMap::new(50u32)).unwrap();

    assert_eq!(mapper.trimming_collection().len(), 1);
    assert_eq!(mapper.hiding_collection().len(), 1);
    assert_eq!(mapper.value_collection().len(), 1);
    assert_eq!(mapper.registered_maps(), 3);
    assert_eq!(mapper.map_category("hide"), Some(MapCategory::Hiding));
    assert!(mapper.trimming_collection().get("trim").is_some());
    assert!(mapper.map::<u32>("width").is_some());
}

#[test]
fn duplicate_names_are_rejected_across_categories() {
    let mut mapper = IndexMapper::new();
    mapper.register_map("unique", IndexMap::trimming()).unwrap();

    assert_eq!(
        mapper.register_map("unique", IndexMap::trimming()).unwrap_err(),
        Error::DuplicateName {
            name: String::from("unique")
        }
    );
    assert!(matches!(
        mapper.register_map("unique", IndexMap::new(0u8)),
        Err(Error::DuplicateName { .. })
    ));
    assert!(matches!(
        mapper.register_map("unique", IndexMap::hiding()),
        Err(Error::DuplicateName { .. })
    ));
    assert_eq!(mapper.trimming_collection().len(), 1);
    assert_eq!(mapper.value_collection().len(), 0);
    assert_eq!(mapper.hiding_collection().len(), 0);

    mapper.register_map("unique2", IndexMap::new(0u8)).unwrap();
    assert_eq!(mapper.value_collection().len(), 1);
}

#[test]
fn unregister_frees_the_name() {
    let mut mapper = mapper_with(5);
    mapper.register_map("trim", IndexMap::trimming()).unwrap();
    flag_indexes(&mut mapper, "trim", &[0, 1]);
    assert_eq!(mapper.not_trimmed_indexes(), &[2, 3, 4]);

    assert!(mapper.unregister_map("trim"));
    assert!(!mapper.unregister_map("trim"));
    assert!(mapper.trimming_collection().is_empty());
    // The cache must not keep the trimmed indexes of an unregistered map.
    assert_eq!(mapper.not_trimmed_indexes(), &[0, 1, 2, 3, 4]);

    mapper.register_map("trim", IndexMap::new(1i64)).unwrap();
    assert_eq!(mapper.map::<i64>("trim").unwrap().values(), &[1; 5]);
}

#[test]
fn registering_into_populated_mapper_initializes_the_map() {
    let mut mapper = mapper_with(4);
    let mut prefilled = IndexMap::new(7u32);
    prefilled.init(2);
    let map = mapper.register_map("size", prefilled).unwrap();
    assert_eq!(map.values(), &[7, 7, 7, 7]);
}

#[test]
fn update_map_reports_missing_and_mistyped_maps() {
    let mut mapper = mapper_with(3);
    mapper.register_map("width", IndexMap::new(0u32)).unwrap();

    assert_eq!(
        mapper.update_map::<u32, _>("nope", |_| ()).unwrap_err(),
        Error::MapNotFound {
            name: String::from("nope")
        }
    );
    assert_eq!(
        mapper.update_map::<bool, _>("width", |_| ()).unwrap_err(),
        Error::TypeMismatch {
            name: String::from("width")
        }
    );
    assert!(mapper.map::<bool>("width").is_none());

    let updated = mapper
        .update_map::<u32, _>("width", |map| map.set_value_at(1, 120))
        .unwrap();
    assert!(updated);
    assert_eq!(mapper.map::<u32>("width").unwrap().values(), &[0, 120, 0]);
}

#[test]
fn update_map_reverts_a_length_change() {
    let (changes, seen) = counter();
    let mut mapper = mapper_with(5);
    mapper.register_map("trim", IndexMap::trimming()).unwrap();
    flag_indexes(&mut mapper, "trim", &[1]);
    mapper.set_on_change(Some(move |_: &IndexMapper, _: MapChange<'_>| {
        seen.fetch_add(1, Ordering::Relaxed);
    }));

    let result = mapper.update_map::<bool, _>("trim", |map| {
        map.init(8);
        map.set_value_at(7, true);
    });
    assert_eq!(
        result,
        Err(Error::LengthMismatch {
            expected: 5,
            actual: 8
        })
    );
    assert_eq!(changes.load(Ordering::Relaxed), 0);
    assert_eq!(
        mapper.map::<bool>("trim").unwrap().values(),
        &[false, true, false, false, false]
    );
    assert_eq!(mapper.number_of_indexes(), 5);
    assert_eq!(mapper.trimming_collection().merged_values().len(), 5);
    assert_eq!(mapper.not_trimmed_indexes(), &[0, 2, 3, 4]);
    assert_consistent(&mapper);
}

#[test]
fn trimming_map_translates_indexes() {
    let mut mapper = mapper_with(10);
    assert_eq!(mapper.visual_from_physical(0), Some(0));
    assert_eq!(mapper.physical_from_visual(0), Some(0));
    assert_eq!(mapper.visual_from_physical(10), None);
    assert_eq!(mapper.physical_from_visual(10), None);

    mapper.register_map("trim", IndexMap::trimming()).unwrap();
    flag_indexes(&mut mapper, "trim", &[0, 2, 5]);

    assert_eq!(mapper.indexes_sequence(), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(mapper.not_trimmed_indexes(), &[1, 3, 4, 6, 7, 8, 9]);
    assert_eq!(mapper.number_of_indexes(), 10);
    assert_eq!(mapper.not_trimmed_indexes_length(), 7);
    assert!(mapper.is_trimmed(0));
    assert!(mapper.is_trimmed(2));
    assert!(!mapper.is_trimmed(3));
    assert!(!mapper.is_trimmed(100));

    assert_eq!(mapper.visual_from_physical(0), None);
    assert_eq!(mapper.physical_from_visual(0), Some(1));
    assert_eq!(mapper.visual_from_physical(2), None);
    assert_eq!(mapper.physical_from_visual(2), Some(4));
    assert_eq!(mapper.visual_from_physical(5), None);
    assert_eq!(mapper.physical_from_visual(5), Some(8));
    assert_eq!(mapper.physical_from_visual(7), None);
    assert_eq!(
        mapper.map::<bool>("trim").unwrap().flagged_indexes(),
        alloc::vec![0, 2, 5]
    );
}

#[test]
fn aggregated_flags_are_or_of_every_map() {
    let mut rng = Lcg::new(0x5eed);
    for round in 0..25 {
        let n = rng.gen_range_usize(1, 40);
        let mut mapper = mapper_with(n);
        let names = ["a", "b", "c"];
        let mut expected = alloc::vec![false; n];

        for name in names {
            mapper.register_map(name, IndexMap::trimming()).unwrap();
            let flagged: Vec<usize> = (0..n).filter(|_| rng.gen_ratio(1, 4)).collect();
            for &i in &flagged {
                expected[i] = true;
            }
            flag_indexes(&mut mapper, name, &flagged);
        }

        for (i, &flag) in expected.iter().enumerate() {
            assert_eq!(mapper.is_trimmed(i), flag, "round={round} i={i}");
        }
        assert_consistent(&mapper);
    }
}

#[test]
fn aggregated_collection_handles_empty_and_out_of_range() {
    let mut collection = AggregatedCollection::new(any_true, false);
    assert!(collection.compute_merged_values().is_empty());
    assert!(!collection.merged_value_at(3));

    let mut first = IndexMap::trimming();
    first.init(3);
    first.set_value_at(0, true);
    let mut second = IndexMap::trimming();
    second.init(3);
    second.set_value_at(2, true);
    collection.register("first", first).unwrap();
    collection.register("second", second).unwrap();

    // The cache is only refreshed on request.
    assert!(collection.merged_values().is_empty());
    collection.update_cache();
    assert_eq!(collection.merged_values(), &[true, false, true]);
    assert!(!collection.merged_value_at(99));
    assert!(collection.register("first", IndexMap::trimming()).is_err());
}

#[test]
fn round_trip_visual_physical() {
    let mut rng = Lcg::new(42);
    let mut mapper = mapper_with(30);
    mapper.register_map("trim", IndexMap::trimming()).unwrap();
    let flagged: Vec<usize> = (0..30).filter(|_| rng.gen_ratio(1, 3)).collect();
    flag_indexes(&mut mapper, "trim", &flagged);
    mapper.move_indexes(&[4, 1, 9], 2).unwrap();

    for visual in 0..mapper.not_trimmed_indexes_length() {
        let physical = mapper.physical_from_visual(visual).unwrap();
        assert_eq!(mapper.visual_from_physical(physical), Some(visual));
    }
}

#[test]
fn rebuild_cache_is_idempotent() {
    let mut mapper = mapper_with(8);
    mapper.register_map("hide", IndexMap::hiding()).unwrap();
    flag_indexes(&mut mapper, "hide", &[1, 6]);
    mapper.move_indexes(&[7], 0).unwrap();

    mapper.rebuild_cache();
    let first = mapper.cache().clone();
    mapper.rebuild_cache();
    assert_eq!(mapper.cache(), &first);
    mapper.update_cache();
    assert_eq!(mapper.cache(), &first);
}

#[test]
fn moves_are_resolved_against_current_visual_order() {
    let mut mapper = mapper_with(10);
    mapper.move_indexes(&[8], 0).unwrap();
    assert_eq!(mapper.indexes_sequence(), &[8, 0, 1, 2, 3, 4, 5, 6, 7, 9]);
    mapper.move_indexes(&[3], 1).unwrap();
    assert_eq!(mapper.indexes_sequence(), &[8, 2, 0, 1, 3, 4, 5, 6, 7, 9]);
    mapper.move_indexes(&[5], 2).unwrap();
    assert_eq!(mapper.indexes_sequence(), &[8, 2, 4, 0, 1, 3, 5, 6, 7, 9]);
}

#[test_case(&[0], 0 => alloc::vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9]; "single in place")]
#[test_case(&[9], 9 => alloc::vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9]; "last in place")]
#[test_case(&[0, 1, 2], 0 => alloc::vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9]; "block in place")]
#[test_case(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9], 0 => alloc::vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9]; "everything")]
#[test_case(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9], 100 => alloc::vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9]; "everything past the end")]
#[test_case(&[9, 8, 7, 6, 5, 4, 3, 0, 1, 2], 0 => alloc::vec![9, 8, 7, 6, 5, 4, 3, 0, 1, 2]; "reorder in place")]
#[test_case(&[0, 1, 2, 3], 5 => alloc::vec![4, 5, 6, 7, 8, 0, 1, 2, 3, 9]; "down ascending")]
#[test_case(&[3, 2, 1, 0], 5 => alloc::vec![4, 5, 6, 7, 8, 3, 2, 1, 0, 9]; "down descending")]
#[test_case(&[1, 3, 2, 0], 5 => alloc::vec![4, 5, 6, 7, 8, 1, 3, 2, 0, 9]; "down mixed")]
#[test_case(&[4, 5, 6, 7], 2 => alloc::vec![0, 1, 4, 5, 6, 7, 2, 3, 8, 9]; "up ascending")]
#[test_case(&[7, 6, 5, 4], 2 => alloc::vec![0, 1, 7, 6, 5, 4, 2, 3, 8, 9]; "up descending")]
#[test_case(&[7, 5, 4, 6], 2 => alloc::vec![0, 1, 7, 5, 4, 6, 2, 3, 8, 9]; "up mixed")]
#[test_case(&[1, 2, 6, 7], 4 => alloc::vec![0, 3, 4, 5, 1, 2, 6, 7, 8, 9]; "scattered ascending")]
#[test_case(&[7, 6, 2, 1], 4 => alloc::vec![0, 3, 4, 5, 7, 6, 2, 1, 8, 9]; "scattered descending")]
#[test_case(&[7, 2, 1, 6], 4 => alloc::vec![0, 3, 4, 5, 7, 2, 1, 6, 8, 9]; "scattered mixed")]
#[test_case(&[0], 20 => alloc::vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 0]; "destination clamped to end")]
fn move_indexes_from_identity(moved: &[usize], final_index: usize) -> Vec<usize> {
    let mut mapper = mapper_with(10);
    mapper.move_indexes(moved, final_index).unwrap();
    mapper.indexes_sequence().to_vec()
}

#[test]
fn move_rejects_invalid_input() {
    let mut mapper = mapper_with(5);
    assert_eq!(
        mapper.move_indexes(&[5], 0),
        Err(Error::VisualIndexOutOfRange {
            index: 5,
            length: 5
        })
    );
    assert_eq!(
        mapper.move_indexes(&[1, 1], 0),
        Err(Error::DuplicateIndex { index: 1 })
    );
    assert_eq!(mapper.indexes_sequence(), &[0, 1, 2, 3, 4]);
    assert_eq!(mapper.move_indexes(&[], 3), Ok(()));
}

#[test]
fn move_skips_trimmed_indexes_and_keeps_flags() {
    let mut mapper = mapper_with(6);
    mapper.register_map("trim", IndexMap::trimming()).unwrap();
    mapper.register_map("hide", IndexMap::hiding()).unwrap();
    flag_indexes(&mut mapper, "trim", &[1]);
    flag_indexes(&mut mapper, "hide", &[4]);
    assert_eq!(mapper.not_trimmed_indexes(), &[0, 2, 3, 4, 5]);

    // Visual 3 is physical 4; place it at visual 1 (in front of physical 2).
    mapper.move_indexes(&[3], 1).unwrap();
    assert_eq!(mapper.indexes_sequence(), &[0, 1, 4, 2, 3, 5]);
    assert_eq!(mapper.not_trimmed_indexes(), &[0, 4, 2, 3, 5]);
    assert!(mapper.is_hidden(4));
    assert!(mapper.is_trimmed(1));
    assert_eq!(mapper.renderable_indexes(), &[0, 2, 3, 5]);

    // Past the end with trimmed indexes present: the block goes to the very end.
    mapper.move_indexes(&[0], 4).unwrap();
    assert_eq!(mapper.indexes_sequence(), &[1, 4, 2, 3, 5, 0]);
    assert_consistent(&mapper);
}

#[test]
fn first_not_hidden_walks_in_direction() {
    let mut mapper = mapper_with(10);
    mapper.register_map("hide", IndexMap::hiding()).unwrap();
    flag_indexes(&mut mapper, "hide", &[0, 2, 5]);
    assert_eq!(mapper.not_hidden_indexes(), &[1, 3, 4, 6, 7, 8, 9]);

    assert_eq!(mapper.first_not_hidden_index(0, Direction::Forward), Some(1));
    assert_eq!(mapper.first_not_hidden_index(0, Direction::Backward), None);
    assert_eq!(mapper.first_not_hidden_index(2, Direction::Forward), Some(3));
    assert_eq!(mapper.first_not_hidden_index(2, Direction::Backward), Some(1));
    assert_eq!(mapper.first_not_hidden_index(5, Direction::Forward), Some(6));
    assert_eq!(mapper.first_not_hidden_index(5, Direction::Backward), Some(4));
    assert_eq!(mapper.first_not_hidden_index(7, Direction::Forward), Some(7));
    assert_eq!(mapper.first_not_hidden_index(10, Direction::Backward), None);
    assert_eq!(mapper.first_not_hidden_index(usize::MAX, Direction::Forward), None);

    assert_eq!(mapper.nearest_not_hidden_index(0, Direction::Backward), Some(1));
}

#[test]
fn first_not_hidden_terminates_when_everything_is_hidden() {
    let mut mapper = mapper_with(4);
    mapper.register_map("hide", IndexMap::hiding()).unwrap();
    flag_indexes(&mut mapper, "hide", &[0, 1, 2, 3]);
    assert_eq!(mapper.first_not_hidden_index(0, Direction::Forward), None);
    assert_eq!(mapper.first_not_hidden_index(3, Direction::Backward), None);
    assert_eq!(mapper.nearest_not_hidden_index(2, Direction::Forward), None);
    assert_eq!(mapper.renderable_indexes_length(), 0);
}

#[test]
fn renderable_translation_skips_hidden_and_trimmed() {
    let mut mapper = mapper_with(8);
    mapper.register_map("trim", IndexMap::trimming()).unwrap();
    mapper.register_map("hide", IndexMap::hiding()).unwrap();
    flag_indexes(&mut mapper, "trim", &[0]);
    flag_indexes(&mut mapper, "hide", &[2, 3]);

    // visual: [1, 2, 3, 4, 5, 6, 7]; renderable: [1, 4, 5, 6, 7]
    assert_eq!(mapper.renderable_indexes(), &[1, 4, 5, 6, 7]);
    assert_eq!(mapper.renderable_from_visual(0), Some(0));
    assert_eq!(mapper.renderable_from_visual(1), None);
    assert_eq!(mapper.renderable_from_visual(2), None);
    assert_eq!(mapper.renderable_from_visual(3), Some(1));
    assert_eq!(mapper.renderable_from_visual(6), Some(4));
    assert_eq!(mapper.renderable_from_visual(7), None);
    assert_eq!(mapper.physical_from_renderable(1), Some(4));
    assert_eq!(mapper.visual_from_renderable(1), Some(3));
    assert_eq!(mapper.physical_from_renderable(5), None);
    assert_eq!(mapper.visual_from_renderable(5), None);
    assert_eq!(mapper.not_hidden_indexes(), &[0, 1, 4, 5, 6, 7]);
}

#[test]
fn insert_at_length_appends() {
    let mut mapper = mapper_with(3);
    mapper.insert_indexes(3, 1);
    assert_eq!(mapper.indexes_sequence(), &[0, 1, 2, 3]);
    mapper.insert_indexes(100, 2);
    assert_eq!(mapper.indexes_sequence(), &[0, 1, 2, 3, 4, 5]);
    mapper.insert_indexes(0, 0);
    assert_eq!(mapper.number_of_indexes(), 6);
}

#[test]
fn insert_that_would_overflow_changes_nothing() {
    let mut mapper = mapper_with(3);
    mapper.register_map("trim", IndexMap::trimming()).unwrap();
    mapper.insert_indexes(0, usize::MAX);
    mapper.insert_indexes(3, usize::MAX - 2);
    assert_eq!(mapper.indexes_sequence(), &[0, 1, 2]);
    assert_eq!(mapper.map::<bool>("trim").unwrap().len(), 3);
    assert_consistent(&mapper);
}

#[test]
fn insert_in_the_middle_shifts_physical_indexes_and_values() {
    let mut mapper = mapper_with(4);
    mapper.register_map("trim", IndexMap::trimming()).unwrap();
    mapper.register_map("width", IndexMap::new(0u32)).unwrap();
    flag_indexes(&mut mapper, "trim", &[3]);
    mapper
        .update_map::<u32, _>("width", |map| {
            map.set_values(alloc::vec![10, 11, 12, 13]).unwrap();
        })
        .unwrap();
    mapper.move_indexes(&[2], 0).unwrap();
    assert_eq!(mapper.indexes_sequence(), &[2, 0, 1, 3]);

    // Visual 1 is physical 0, sitting at sequence position 1.
    mapper.insert_indexes(1, 2);
    assert_eq!(mapper.indexes_sequence(), &[4, 0, 1, 2, 3, 5]);
    assert_eq!(
        mapper.map::<u32>("width").unwrap().values(),
        &[0, 0, 10, 11, 12, 13]
    );
    assert_eq!(
        mapper.map::<bool>("trim").unwrap().flagged_indexes(),
        alloc::vec![5]
    );
    assert_eq!(mapper.not_trimmed_indexes(), &[4, 0, 1, 2, 3]);
    assert_consistent(&mapper);
}

#[test]
fn remove_renumbers_remaining_indexes() {
    let mut mapper = mapper_with(6);
    mapper.register_map("hide", IndexMap::hiding()).unwrap();
    mapper.register_map("label", IndexMap::with_provider(|i| i * 100)).unwrap();
    flag_indexes(&mut mapper, "hide", &[4]);
    mapper.move_indexes(&[5], 0).unwrap();
    assert_eq!(mapper.indexes_sequence(), &[5, 0, 1, 2, 3, 4]);

    mapper.remove_indexes(&[3, 1, 3]).unwrap();
    assert_eq!(mapper.indexes_sequence(), &[3, 0, 1, 2]);
    assert_eq!(
        mapper.map::<usize>("label").unwrap().values(),
        &[0, 200, 400, 500]
    );
    assert!(mapper.is_hidden(2));
    assert_eq!(mapper.renderable_indexes(), &[3, 0, 1]);
    assert_consistent(&mapper);
}

#[test]
fn remove_everything_empties_every_cache() {
    let mut mapper = mapper_with(5);
    mapper.register_map("trim", IndexMap::trimming()).unwrap();
    flag_indexes(&mut mapper, "trim", &[2]);
    mapper.remove_indexes(&[0, 1, 2, 3, 4]).unwrap();

    assert_eq!(mapper.number_of_indexes(), 0);
    assert!(mapper.not_trimmed_indexes().is_empty());
    assert!(mapper.not_hidden_indexes().is_empty());
    assert!(mapper.renderable_indexes().is_empty());
    assert!(mapper.map::<bool>("trim").unwrap().is_empty());
}

#[test]
fn remove_rejects_unknown_physical_index() {
    let mut mapper = mapper_with(3);
    assert_eq!(
        mapper.remove_indexes(&[0, 3]),
        Err(Error::PhysicalIndexOutOfRange {
            index: 3,
            length: 3
        })
    );
    assert_eq!(mapper.number_of_indexes(), 3);
    assert_eq!(mapper.remove_indexes(&[]), Ok(()));
}

#[test]
fn batch_defers_rebuild_to_outermost_scope() {
    let (rebuilds, seen) = counter();
    let mut mapper = mapper_with(10);
    mapper.set_on_cache_updated(Some(move |_: &IndexMapper, _: CacheChanges| {
        seen.fetch_add(1, Ordering::Relaxed);
    }));

    mapper.execute_batch_operations(|m| {
        m.insert_indexes(0, 2);
        m.execute_batch_operations(|m| {
            m.remove_indexes(&[5]).unwrap();
            m.move_indexes(&[0], 3).unwrap();
        });
        assert!(m.is_batched());
        m.insert_indexes(4, 1);
    });
    assert!(!mapper.is_batched());
    assert_eq!(rebuilds.load(Ordering::Relaxed), 1);
    assert_consistent(&mapper);

    {
        let mut batch = mapper.batch();
        batch.insert_indexes(0, 1);
        batch.remove_indexes(&[0]).unwrap();
    }
    assert_eq!(rebuilds.load(Ordering::Relaxed), 2);

    // Nothing changed, nothing to rebuild.
    mapper.execute_batch_operations(|_| ());
    assert_eq!(rebuilds.load(Ordering::Relaxed), 2);
}

#[test]
fn batched_and_unbatched_operations_agree() {
    fn apply(mapper: &mut IndexMapper) {
        mapper.insert_indexes(2, 3);
        flag_indexes(mapper, "trim", &[1, 6]);
        mapper.move_indexes(&[0, 4], 2).unwrap();
        mapper.remove_indexes(&[3, 7]).unwrap();
        flag_indexes(mapper, "hide", &[0]);
        mapper.insert_indexes(20, 1);
    }

    let (batched_rebuilds, seen) = counter();
    let mut batched = mapper_with(8);
    batched.register_map("trim", IndexMap::trimming()).unwrap();
    batched.register_map("hide", IndexMap::hiding()).unwrap();
    batched.set_on_cache_updated(Some(move |_: &IndexMapper, _: CacheChanges| {
        seen.fetch_add(1, Ordering::Relaxed);
    }));

    let mut plain = mapper_with(8);
    plain.register_map("trim", IndexMap::trimming()).unwrap();
    plain.register_map("hide", IndexMap::hiding()).unwrap();

    batched.execute_batch_operations(apply);
    apply(&mut plain);

    assert_eq!(batched_rebuilds.load(Ordering::Relaxed), 1);
    assert_eq!(batched.indexes_sequence(), plain.indexes_sequence());
    assert_eq!(batched.cache(), plain.cache());
    assert_consistent(&batched);
}

#[test]
fn reads_inside_a_batch_see_the_current_state() {
    let (rebuilds, seen) = counter();
    let mut mapper = mapper_with(4);
    mapper.register_map("hide", IndexMap::hiding()).unwrap();
    mapper.set_on_cache_updated(Some(move |_: &IndexMapper, _: CacheChanges| {
        seen.fetch_add(1, Ordering::Relaxed);
    }));

    mapper.execute_batch_operations(|m| {
        m.move_indexes(&[3], 0).unwrap();
        assert_eq!(m.physical_from_visual(0), Some(3));
        assert_eq!(m.visual_from_physical(0), Some(1));
        assert_eq!(m.not_trimmed_indexes(), &[3, 0, 1, 2]);

        flag_indexes(m, "hide", &[3]);
        assert!(m.is_hidden(3));
        assert_eq!(m.renderable_indexes(), &[0, 1, 2]);
        assert_eq!(m.renderable_from_visual(0), None);
        assert_eq!(m.renderable_from_visual(1), Some(0));

        m.insert_indexes(4, 1);
        assert_eq!(m.not_trimmed_indexes_length(), 5);
        assert_eq!(m.physical_from_visual(4), Some(4));
    });
    assert_eq!(rebuilds.load(Ordering::Relaxed), 1);
    assert_eq!(mapper.renderable_indexes(), &[0, 1, 2, 4]);
    assert_consistent(&mapper);
}

#[test]
fn change_callbacks_observe_rebuilt_cache() {
    let (changes, seen) = counter();
    let mut mapper = mapper_with(5);
    mapper.register_map("trim", IndexMap::trimming()).unwrap();
    mapper.set_on_change(Some(move |m: &IndexMapper, change: MapChange<'_>| {
        if change.name == Some("trim") {
            assert_eq!(change.source, ChangeSource::Collection(MapCategory::Trimming));
            assert_eq!(m.not_trimmed_indexes(), &m.compute_not_trimmed_indexes()[..]);
        }
        seen.fetch_add(1, Ordering::Relaxed);
    }));

    flag_indexes(&mut mapper, "trim", &[1]);
    assert_eq!(changes.load(Ordering::Relaxed), 1);

    // A no-op update changes no revision and raises nothing.
    mapper.update_map::<bool, _>("trim", |_| ()).unwrap();
    assert_eq!(changes.load(Ordering::Relaxed), 1);

    // The sequence plus one registered map.
    mapper.insert_indexes(0, 1);
    assert_eq!(changes.load(Ordering::Relaxed), 3);
}

#[test]
fn cache_updated_reports_change_kinds() {
    let last = Arc::new(core::sync::atomic::AtomicU8::new(0));
    let seen = Arc::clone(&last);
    let mut mapper = mapper_with(4);
    mapper.register_map("hide", IndexMap::hiding()).unwrap();
    mapper.set_on_cache_updated(Some(move |_: &IndexMapper, changes: CacheChanges| {
        let bits = changes.indexes_sequence as u8
            | (changes.trimmed as u8) << 1
            | (changes.hidden as u8) << 2;
        seen.store(bits, Ordering::Relaxed);
    }));

    flag_indexes(&mut mapper, "hide", &[0]);
    assert_eq!(last.load(Ordering::Relaxed), 0b100);
    mapper.move_indexes(&[1], 0).unwrap();
    assert_eq!(last.load(Ordering::Relaxed), 0b001);
}

#[test]
fn set_indexes_sequence_requires_a_permutation() {
    let mut mapper = mapper_with(4);
    assert_eq!(
        mapper.set_indexes_sequence(alloc::vec![0, 1, 2]),
        Err(Error::InvalidSequence { length: 4 })
    );
    assert_eq!(
        mapper.set_indexes_sequence(alloc::vec![0, 1, 1, 3]),
        Err(Error::InvalidSequence { length: 4 })
    );
    assert_eq!(
        mapper.set_indexes_sequence(alloc::vec![0, 1, 2, 4]),
        Err(Error::InvalidSequence { length: 4 })
    );
    mapper.set_indexes_sequence(alloc::vec![3, 2, 1, 0]).unwrap();
    assert_eq!(mapper.not_trimmed_indexes(), &[3, 2, 1, 0]);
    assert_eq!(mapper.visual_from_physical(3), Some(0));
}

#[test]
fn index_map_set_values_checks_length() {
    let mut map = IndexMap::new(0i32);
    map.init(3);
    assert_eq!(
        map.set_values(alloc::vec![1, 2]),
        Err(Error::LengthMismatch {
            expected: 3,
            actual: 2
        })
    );
    map.set_values(alloc::vec![1, 2, 3]).unwrap();
    assert!(!map.set_value_at(3, 9));
    assert_eq!(map.value_at(1), Some(&2));
    map.clear();
    assert_eq!(map.values(), &[0, 0, 0]);
}

#[test]
fn index_map_revision_tracks_mutations() {
    let mut map = IndexMap::hiding();
    let start = map.revision();
    map.init(2);
    assert!(map.revision() > start);
    let before = map.revision();
    assert!(!map.set_value_at(5, true));
    map.insert(0, &[]);
    map.remove(&[]);
    assert_eq!(map.revision(), before);
}

#[test]
fn sequence_policy_renumbers_values() {
    let mut sequence = IndexMap::indexes_sequence();
    sequence.init(4);
    sequence.set_values(alloc::vec![3, 1, 0, 2]).unwrap();

    sequence.insert(1, &[2, 3]);
    assert_eq!(sequence.values(), &[5, 2, 3, 1, 0, 4]);

    sequence.remove(&[0, 5]);
    assert_eq!(sequence.values(), &[1, 2, 0, 3]);
}

#[test]
fn physical_policy_splices_at_physical_index() {
    let mut map = IndexMap::with_provider(|i| -(i as i32));
    map.init(3);
    // The sequence position is ignored for physically keyed maps.
    map.insert(0, &[1, 2]);
    assert_eq!(map.values(), &[0, -1, -2, -1, -2]);
    map.remove(&[4, 0]);
    assert_eq!(map.values(), &[-1, -2, -1]);
}

#[test]
fn loose_binds_keep_pointing_at_their_rows() {
    let mut binds = IndexMap::loose_binds();
    binds.init(4);
    binds.set_values(alloc::vec![2, 0, 3, 1]).unwrap();

    binds.insert(1, &[1]);
    assert_eq!(binds.values(), &[3, 1, 0, 4, 2]);

    binds.remove(&[0]);
    assert_eq!(binds.values(), &[0, 0, 3, 1]);
}

#[test]
fn renumbering_helpers_in_isolation() {
    let mut values = alloc::vec![0, 3, 5, 7];
    renumber::increase_indexes(&mut values, &[3, 4]);
    assert_eq!(values, [0, 5, 7, 9]);
    renumber::decrease_indexes(&mut values, &[1, 6]);
    assert_eq!(values, [0, 4, 5, 7]);

    let custom: Renumbering<u8> = Renumbering::new(
        |values, _, inserted, _| values.extend(inserted.iter().map(|_| 9)),
        |values, removed| values.truncate(values.len() - removed.len()),
    );
    let mut map = IndexMap::new(1u8).with_renumbering(custom);
    map.init(2);
    map.insert(0, &[0]);
    assert_eq!(map.values(), &[1, 1, 9]);
    map.remove(&[0, 1]);
    assert_eq!(map.values(), &[1]);
}

#[test]
fn random_operations_keep_caches_consistent() {
    let mut rng = Lcg::new(0xC0FFEE);
    let mut mapper = mapper_with(12);
    mapper.register_map("trim-a", IndexMap::trimming()).unwrap();
    mapper.register_map("trim-b", IndexMap::trimming()).unwrap();
    mapper.register_map("hide", IndexMap::hiding()).unwrap();
    mapper.register_map("width", IndexMap::new(0u32)).unwrap();
    mapper.register_map("binds", IndexMap::loose_binds()).unwrap();

    for step in 0..400 {
        let n = mapper.number_of_indexes();
        match rng.gen_range_usize(0, 6) {
            0 => {
                let at = rng.gen_range_usize(0, n + 2);
                let amount = rng.gen_range_usize(1, 4);
                mapper.insert_indexes(at, amount);
            }
            1 if n > 0 => {
                let removed: Vec<usize> = (0..rng.gen_range_usize(1, 3))
                    .map(|_| rng.gen_range_usize(0, n))
                    .collect();
                mapper.remove_indexes(&removed).unwrap();
            }
            2 if mapper.not_trimmed_indexes_length() > 0 => {
                let len = mapper.not_trimmed_indexes_length();
                let mut moved: Vec<usize> = (0..rng.gen_range_usize(1, 4))
                    .map(|_| rng.gen_range_usize(0, len))
                    .collect();
                moved.dedup();
                if moved.iter().enumerate().all(|(i, v)| !moved[..i].contains(v)) {
                    mapper
                        .move_indexes(&moved, rng.gen_range_usize(0, len + 2))
                        .unwrap();
                }
            }
            3 if n > 0 => {
                let name = if rng.gen_ratio(1, 2) { "trim-a" } else { "trim-b" };
                let index = rng.gen_range_usize(0, n);
                let value = rng.gen_ratio(1, 3);
                mapper
                    .update_map::<bool, _>(name, |map| map.set_value_at(index, value))
                    .unwrap();
            }
            4 if n > 0 => {
                let index = rng.gen_range_usize(0, n);
                let value = rng.gen_ratio(1, 2);
                mapper
                    .update_map::<bool, _>("hide", |map| map.set_value_at(index, value))
                    .unwrap();
            }
            _ => {
                mapper.execute_batch_operations(|m| {
                    m.insert_indexes(0, 1);
                    m.remove_indexes(&[0]).unwrap();
                });
            }
        }

        assert_consistent(&mapper);
        let widths = mapper.map::<u32>("width").unwrap();
        assert_eq!(widths.len(), mapper.number_of_indexes(), "step={step}");
    }
}
