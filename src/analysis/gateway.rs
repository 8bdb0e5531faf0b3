use std::collections::BTreeMap;

use crate::{
    host, labels, logger,
    resource::{FullName, Instance, Kind},
};

use super::{Analyzer, Context, Message, Metadata};

/// Gateways sharing one `ConflictKey`, with the hosts of their server on that port.
pub type ConflictGroup = BTreeMap<FullName, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConflictKey {
    /// Normalized workload selector
    pub selector: String,
    pub port: u32,
}

impl ConflictKey {
    pub fn new(selector: impl Into<String>, port: u32) -> Self {
        Self {
            selector: selector.into(),
            port,
        }
    }
}

/// (selector, port) → gateway name → hosts, built from every Gateway before detection.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConflictIndex {
    groups: BTreeMap<ConflictKey, ConflictGroup>,
}

impl ConflictIndex {
    pub fn build(ctx: &dyn Context) -> Self {
        let mut index = Self::default();

        ctx.for_each(Kind::Gateway, &mut |instance| {
            index.insert(instance);
            true
        });

        index
    }

    /// A later server on the same port replaces the hosts of an earlier one.
    fn insert(&mut self, instance: &Instance) {
        let selector = labels::normalize(&instance.gateway.selector);

        for server in &instance.gateway.servers {
            self.groups
                .entry(ConflictKey::new(selector.clone(), server.port.number))
                .or_default()
                .insert(instance.full_name().clone(), server.hosts.clone());
        }
    }

    pub fn get(&self, key: &ConflictKey) -> Option<&ConflictGroup> {
        self.groups.get(key)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups whose selector textually contains `selector` or is contained in it.
    pub fn overlapping(&self, selector: &str) -> Vec<(&ConflictKey, &ConflictGroup)> {
        self.groups
            .iter()
            .filter(|(key, _)| labels::overlaps(&key.selector, selector))
            .collect()
    }
}

/// Findings for one gateway against a complete index.
pub fn detect(instance: &Instance, index: &ConflictIndex) -> Vec<Message> {
    let name = instance.full_name();
    let selector = labels::normalize(&instance.gateway.selector);

    let groups = index.overlapping(&selector);

    if groups.is_empty() && !selector.is_empty() {
        return vec![Message::referenced_resource_not_found(
            instance, "selector", selector,
        )];
    }

    instance
        .gateway
        .servers
        .iter()
        .filter_map(|server| {
            let hosts = &server.hosts;

            // 同じpeerに複数のhostがマッチしたときはその数だけ記録する
            let mut peers: Vec<String> = groups
                .iter()
                .filter(|(key, _)| key.port == server.port.number)
                .flat_map(|(_, group)| group.iter())
                .filter(|(peer, _)| *peer != name)
                .flat_map(|(peer, peer_hosts)| {
                    hosts
                        .iter()
                        .filter(move |candidate| host::matches_any(candidate, peer_hosts))
                        .map(move |_| peer.to_string())
                })
                .collect();

            if peers.is_empty() {
                return None;
            }

            peers.sort();

            Some(Message::conflicting_gateways(
                instance,
                peers.join(","),
                selector.as_str(),
                server.port.number.to_string(),
                hosts.join(","),
            ))
        })
        .collect()
}

/// Checks a gateway's selector, port number and hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConflictingGatewayAnalyzer;

impl Analyzer for ConflictingGatewayAnalyzer {
    fn metadata(&self) -> Metadata {
        Metadata {
            name: "gateway.ConflictingGatewayAnalyzer",
            description: "Checks a gateway's selector, port number and hosts",
            inputs: vec![Kind::Gateway],
        }
    }

    fn analyze(&self, ctx: &mut dyn Context) {
        let index = ConflictIndex::build(&*ctx);

        logger!(info, "conflict index: {} groups", index.len());

        let mut messages = Vec::new();

        ctx.for_each(Kind::Gateway, &mut |instance| {
            let found = detect(instance, &index);

            logger!(
                debug,
                "gateway {}: {} findings",
                instance.full_name(),
                found.len()
            );

            messages.extend(found);
            true
        });

        for message in messages {
            ctx.report(Kind::Gateway, message);
        }
    }
}
