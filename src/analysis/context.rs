use crate::resource::{Instance, Kind};

use super::{Context, Message};

/// Analysis context over an immutable set of resources.
///
/// Reported messages are kept in report order.
#[derive(Debug, Default)]
pub struct SnapshotContext {
    instances: Vec<Instance>,
    messages: Vec<Message>,
}

impl SnapshotContext {
    pub fn new(instances: Vec<Instance>) -> Self {
        Self {
            instances,
            messages: Vec::new(),
        }
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

impl Context for SnapshotContext {
    fn for_each(&self, kind: Kind, visit: &mut dyn FnMut(&Instance) -> bool) {
        for instance in self.instances.iter().filter(|i| i.metadata.kind == kind) {
            if !visit(instance) {
                break;
            }
        }
    }

    /// The message is recorded under `kind`.
    fn report(&mut self, kind: Kind, message: Message) {
        self.messages.push(Message { kind, ..message });
    }
}
