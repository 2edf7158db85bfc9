// Example: keyboard navigation skips hidden columns; batched updates rebuild once.
use gridmap::{CacheChanges, Direction, IndexMap, IndexMapper};

fn main() {
    let mut columns = IndexMapper::new();
    columns.set_on_cache_updated(Some(|mapper: &IndexMapper, changes: CacheChanges| {
        println!(
            "cache rebuilt: {changes:?} renderable={:?}",
            mapper.renderable_indexes()
        );
    }));
    columns.init_to_length(10);
    columns.register_map("hidden", IndexMap::hiding()).unwrap();

    columns.execute_batch_operations(|mapper| {
        mapper
            .update_map::<bool, _>("hidden", |map| {
                for index in [3, 4, 5] {
                    map.set_value_at(index, true);
                }
            })
            .unwrap();
        mapper.move_indexes(&[9], 0).unwrap();
    });

    let from = 4;
    println!(
        "right of {from}: {:?}",
        columns.first_not_hidden_index(from, Direction::Forward)
    );
    println!(
        "left of {from}: {:?}",
        columns.first_not_hidden_index(from, Direction::Backward)
    );
}
