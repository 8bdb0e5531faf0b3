mod context;
mod gateway;
mod message;

pub use self::context::SnapshotContext;
pub use self::gateway::{ConflictIndex, ConflictKey, ConflictingGatewayAnalyzer};
pub use self::message::*;

use crate::resource::{Instance, Kind};

/// Resource iteration and diagnostic sink supplied to analyzers.
pub trait Context {
    /// Calls `visit` for every resource of `kind` until it returns `false`.
    fn for_each(&self, kind: Kind, visit: &mut dyn FnMut(&Instance) -> bool);

    fn report(&mut self, kind: Kind, message: Message);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub name: &'static str,
    pub description: &'static str,
    pub inputs: Vec<Kind>,
}

pub trait Analyzer {
    fn metadata(&self) -> Metadata;

    fn analyze(&self, ctx: &mut dyn Context);
}

/// All analyzers, in the order they run.
pub fn analyzers() -> Vec<Box<dyn Analyzer>> {
    vec![Box::new(ConflictingGatewayAnalyzer)]
}

/// Runs every analyzer over `instances` and returns the reported messages.
pub fn analyze(instances: Vec<Instance>) -> Vec<Message> {
    let mut ctx = SnapshotContext::new(instances);

    for analyzer in analyzers() {
        crate::logger!(debug, "run analyzer {}", analyzer.metadata().name);
        analyzer.analyze(&mut ctx);
    }

    ctx.into_messages()
}
