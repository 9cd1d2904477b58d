use log::Level;

/// Route `log` records to the browser console; debug builds include `debug!` output.
pub fn init_logging() {
    let level = if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Info
    };

    if console_log::init_with_level(level).is_ok() {
        log::info!("console logging enabled at {level}");
    }
}
