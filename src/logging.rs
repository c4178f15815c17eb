//! Logger setup for the binaries

use log::LevelFilter;

/// Initialises `env_logger` at `level` unless `RUST_LOG` says otherwise.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init(LevelFilter::Debug);
        init(LevelFilter::Info);
        log::debug!("logger initialised");
    }
}
