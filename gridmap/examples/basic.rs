// Example: translate between physical, visual and renderable indexes.
use gridmap::{IndexMap, IndexMapper, IndexMapperOptions};

fn main() {
    let mut rows = IndexMapper::with_options(IndexMapperOptions::new().with_initial_length(8));
    rows.register_map("filter", IndexMap::trimming()).unwrap();
    rows.register_map("collapsed", IndexMap::hiding()).unwrap();

    rows.update_map::<bool, _>("filter", |map| {
        map.set_value_at(0, true);
        map.set_value_at(5, true);
    })
    .unwrap();
    rows.update_map::<bool, _>("collapsed", |map| map.set_value_at(2, true))
        .unwrap();

    println!("sequence={:?}", rows.indexes_sequence());
    println!("not_trimmed={:?}", rows.not_trimmed_indexes());
    println!("renderable={:?}", rows.renderable_indexes());

    for visual in 0..rows.not_trimmed_indexes_length() {
        println!(
            "visual={visual} physical={:?} renderable={:?}",
            rows.physical_from_visual(visual),
            rows.renderable_from_visual(visual)
        );
    }
}
