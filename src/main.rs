use std::process::ExitCode;

use anyhow::Result;

use gwconflict::{
    app::{App, Status},
    cmd::Command,
    config::Config,
    logging::Logger,
};

fn main() -> Result<ExitCode> {
    let cmd = Command::init();

    let config = cmd.apply(Config::load(cmd.config_load_option()?)?);

    if cmd.logging {
        Logger::init(&config.logging)?;
    }

    match App::run(cmd, config)? {
        Status::Success => Ok(ExitCode::SUCCESS),
        Status::Failure => Ok(ExitCode::FAILURE),
    }
}
