#[macro_use] extern crate clap;

mod app;
mod config;
mod logging;

use std::env;
use std::process;

use config::Config;
use logging::{init_logging, LoggingConfig};

fn main() {
    let config = match Config::from_args(env::args_os()) {
        Ok(config) => config,
        Err(e) => match e.downcast_ref::<clap::Error>() {
            Some(clap_error) => clap_error.exit(),
            None => {
                eprintln!("Error: {:#}", e);
                process::exit(2);
            }
        },
    };

    init_logging(LoggingConfig {
        filter: config.log_filter.clone(),
    });

    if let Err(e) = app::run(config) {
        log::error!("{:#}", e);
        process::exit(1);
    }
}
