use std::io::{self, Write};

use anyhow::Result;

use crate::{
    analysis::{self, analyzers},
    cmd::Command,
    config::Config,
    logger,
    manifest::Manifests,
    output,
};

/// Process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

pub struct App;

impl App {
    pub fn run(cmd: Command, config: Config) -> Result<Status> {
        logger!(info, "app start");

        let mut stdout = io::stdout().lock();

        if cmd.list_analyzers {
            for analyzer in analyzers() {
                let metadata = analyzer.metadata();
                writeln!(stdout, "{}: {}", metadata.name, metadata.description)?;
            }

            return Ok(Status::Success);
        }

        let mut manifests = Manifests::new(&config.analysis.default_namespace);

        for path in &cmd.paths {
            manifests.load(path)?;
        }

        let messages = analysis::analyze(manifests.into_instances());

        logger!(info, "{} messages", messages.len());

        let visible = output::visible(&messages, config.output.output_threshold);

        writeln!(stdout, "{}", output::render(&visible, config.output.format)?)?;

        let status = if output::fails(&messages, config.output.failure_threshold) {
            Status::Failure
        } else {
            Status::Success
        };

        logger!(info, "app end: {:?}", status);

        Ok(status)
    }
}
