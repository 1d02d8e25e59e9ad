/// Initializes env_logger: debug output with `--verbose`, silent otherwise.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Off
        })
        .format_timestamp(None)
        .init();
}
