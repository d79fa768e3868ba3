use std::sync::Once;

static LOGGER_INIT: Once = Once::new();

/// Initializes a logger printing messages of level `Info` and above to the standard error.
///
/// The library never initializes logging by itself: applications and tests embedding it call this function (or use their own `log` backend).
/// Calling it more than once has no effect.
pub fn init_logger() {
    init_logger_with_level(log::LevelFilter::Info)
}

/// Initializes a logger printing messages of the given level and above to the standard error.
///
/// Only the first call to a logger initialization function is taken into account.
pub fn init_logger_with_level(level: log::LevelFilter) {
    LOGGER_INIT.call_once(|| {
        let colors = fern::colors::ColoredLevelConfig::new()
            .info(fern::colors::Color::Cyan)
            .debug(fern::colors::Color::Magenta);
        fern::Dispatch::new()
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "![{:5}] {} {} {}",
                    colors.color(record.level()),
                    chrono::Local::now().format("[%Y-%m-%d %H:%M:%S%.3f]"),
                    record.target(),
                    message
                ))
            })
            .level(level)
            .chain(std::io::stderr())
            .apply()
            .unwrap_or(());
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice() {
        init_logger_with_level(log::LevelFilter::Debug);
        init_logger();
        log::debug!("logger initialized twice");
    }
}
