// Example: run a few operations with `RUST_LOG=gridmap=trace` to see what the mapper does.
use gridmap::{IndexMap, IndexMapper};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gridmap=trace")),
        )
        .init();

    let mut rows = IndexMapper::new();
    rows.init_to_length(5);
    rows.register_map("trim", IndexMap::trimming()).unwrap();
    rows.insert_indexes(1, 2);
    rows.move_indexes(&[0], 3).unwrap();
    rows.remove_indexes(&[2]).unwrap();

    // Rejected input is logged before the error is returned.
    if let Err(err) = rows.remove_indexes(&[42]) {
        println!("error: {err}");
    }
}
