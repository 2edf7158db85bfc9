// Example: column widths follow their columns through a drag-and-drop reorder.
use gridmap::IndexMap;
use gridmap::IndexMapper;

fn main() {
    let mut columns = IndexMapper::new();
    columns.init_to_length(6);
    columns
        .register_map("width", IndexMap::with_provider(|i| 50 + i as u32 * 10))
        .unwrap();

    // Drag visual columns 4 and 5 in front of visual column 1.
    columns.move_indexes(&[4, 5], 1).unwrap();

    let widths = columns.map::<u32>("width").unwrap();
    for (visual, &physical) in columns.not_trimmed_indexes().iter().enumerate() {
        println!(
            "visual={visual} physical={physical} width={:?}",
            widths.value_at(physical)
        );
    }

    // Insert two columns at visual 2; existing widths keep pointing at their columns.
    columns.insert_indexes(2, 2);
    println!("sequence after insert={:?}", columns.indexes_sequence());
    println!(
        "widths after insert={:?}",
        columns.map::<u32>("width").unwrap().values()
    );
}
