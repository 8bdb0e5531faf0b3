use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::{json::JsonEncoder, pattern::PatternEncoder, Encode},
};
use std::env;
use std::str::FromStr;

use once_cell::sync::OnceCell;

use crate::config::{LogFormat, LoggingConfig};

pub struct Logger;

pub static LOGGER_ENABLED: OnceCell<bool> = OnceCell::new();

/// `Logger::init`が成功するまでは何も出力しない
#[macro_export]
macro_rules! logger {
    ($level:ident, $($arg:tt)+) => {
        if let Some(true) = $crate::logging::LOGGER_ENABLED.get() {
            ::log::$level!($($arg)+);
        }
    };
}

impl Logger {
    pub fn init(config: &LoggingConfig) -> Result<(), anyhow::Error> {
        let level_filter =
            LevelFilter::from_str(&env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))?;

        let logfile = FileAppender::builder()
            .append(false)
            .encoder(encoder(config.format))
            .build(&config.path)?;

        let config = Config::builder()
            .appender(Appender::builder().build("logfile", Box::new(logfile)))
            .build(Root::builder().appender("logfile").build(level_filter))?;

        log4rs::init_config(config)?;

        LOGGER_ENABLED
            .set(true)
            .map_err(|_| anyhow::anyhow!("logger is already initialized"))?;

        Ok(())
    }
}

fn encoder(format: LogFormat) -> Box<dyn Encode> {
    match format {
        LogFormat::Json => Box::new(JsonEncoder::new()),
        LogFormat::Pattern => Box::new(PatternEncoder::new("{d} {l} {t} - {m}{n}")),
    }
}
