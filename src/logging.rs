use std::sync::Once;

/// Logger configuration.
///
/// `filter` uses the `env_logger` syntax ("info", "renderer=trace,ducky=debug", ...). Without
/// one, `RUST_LOG` is used, and without that everything at `info` and above is shown.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub filter: Option<String>,
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// Output goes to stdout so GL error reports land next to the program's own output.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.target(env_logger::Target::Stdout);
        builder.init();

        log::debug!("logging initialized");
    });
}
