#[cfg(feature = "tracing")]
macro_rules! pdebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "gridmap_plugins", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! pdebug {
    ($($tt:tt)*) => {};
}
