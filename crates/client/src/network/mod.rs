// Path: crates/client/src/network/mod.rs
//! The client's view of the network: an ordered node list and per-node health.
//!
//! The node list lives behind an [`ArcSwap`], so a submission in flight keeps
//! reading the snapshot it started with while [`Network::set_nodes`] publishes
//! a new one. Health counters are atomics shared by every operation using the
//! client. A node whose consecutive failures reach the threshold is
//! deprioritized until its cool-down elapses; after that it is tried again
//! (half-open), and a further failure re-arms the cool-down.

use arc_swap::ArcSwap;
use hgsdk_types::app::AccountId;
use hgsdk_types::config::{ClientConfig, NodeAddress};
use hgsdk_types::error::ConfigError;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Failure bookkeeping for one node.
#[derive(Debug, Default)]
pub struct NodeHealth {
    consecutive_failures: AtomicU32,
    total_failures: AtomicU64,
    /// Milliseconds since the network's epoch; zero when never armed.
    cooldown_until_ms: AtomicU64,
}

impl NodeHealth {
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures.load(Ordering::Acquire)
    }

    pub fn total_failures(&self) -> u64 {
        self.total_failures.load(Ordering::Acquire)
    }
}

/// A node together with its health.
#[derive(Debug)]
pub struct Node {
    address: NodeAddress,
    health: NodeHealth,
}

impl Node {
    fn new(address: NodeAddress) -> Self {
        Self {
            address,
            health: NodeHealth::default(),
        }
    }

    pub fn account_id(&self) -> AccountId {
        self.address.account_id
    }

    pub fn address(&self) -> &NodeAddress {
        &self.address
    }

    pub fn health(&self) -> &NodeHealth {
        &self.health
    }
}

/// The ordered node list shared by every operation of one client.
#[derive(Debug)]
pub struct Network {
    nodes: ArcSwap<Vec<Arc<Node>>>,
    epoch: Instant,
    failure_threshold: u32,
    cooldown: Duration,
}

impl Network {
    /// Creates a network. A threshold of zero is treated as one.
    pub fn new(nodes: Vec<NodeAddress>, failure_threshold: u32, cooldown: Duration) -> Self {
        Self {
            nodes: ArcSwap::from_pointee(nodes.into_iter().map(Node::new).map(Arc::new).collect()),
            epoch: Instant::now(),
            failure_threshold: failure_threshold.max(1),
            cooldown,
        }
    }

    /// Builds the network described by `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.network.resolve()?,
            config.node_failure_threshold,
            config.node_cooldown(),
        ))
    }

    /// Replaces the node list.
    ///
    /// Nodes that keep the same account id and address keep their health.
    /// Submissions already running finish against the list they started with.
    pub fn set_nodes(&self, nodes: Vec<NodeAddress>) {
        self.nodes.rcu(|current| {
            nodes
                .iter()
                .map(|address| {
                    current
                        .iter()
                        .find(|n| n.address == *address)
                        .cloned()
                        .unwrap_or_else(|| Arc::new(Node::new(address.clone())))
                })
                .collect::<Vec<_>>()
        });
        tracing::info!(target: "network", nodes = nodes.len(), "node list replaced");
    }

    /// The current node list.
    ///
    /// Operations take one snapshot up front and route every attempt through
    /// it, so a concurrent [`Network::set_nodes`] never changes their view.
    pub fn snapshot(&self) -> Arc<Vec<Arc<Node>>> {
        self.nodes.load_full()
    }

    pub fn node(&self, account_id: &AccountId) -> Option<Arc<Node>> {
        find(&self.nodes.load(), account_id).cloned()
    }

    pub fn contains(&self, account_id: &AccountId) -> bool {
        self.node(account_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.nodes.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.load().is_empty()
    }

    /// Up to `max` node ids, eligible nodes first, each group in list order.
    pub fn healthy_first(&self, max: usize) -> Vec<AccountId> {
        self.healthy_first_in(&self.nodes.load(), max)
    }

    /// [`Network::healthy_first`] over a snapshot.
    pub fn healthy_first_in(&self, nodes: &[Arc<Node>], max: usize) -> Vec<AccountId> {
        let now = self.now_ms();
        let (healthy, cooling): (Vec<_>, Vec<_>) =
            nodes.iter().partition(|n| !self.cooling_down(n, now));
        healthy
            .into_iter()
            .chain(cooling)
            .take(max)
            .map(|n| n.account_id())
            .collect()
    }

    /// Picks the index in `candidates` to try next.
    ///
    /// The first candidate that is not deprioritized wins. If every candidate
    /// is cooling down, the one whose cool-down ends first is used. Candidates
    /// unknown to the network are skipped.
    pub fn select(&self, candidates: &[AccountId]) -> Option<usize> {
        self.select_in(&self.nodes.load(), candidates)
    }

    /// [`Network::select`] over a snapshot.
    pub fn select_in(&self, nodes: &[Arc<Node>], candidates: &[AccountId]) -> Option<usize> {
        let now = self.now_ms();
        let mut fallback: Option<(usize, u64)> = None;
        for (i, id) in candidates.iter().enumerate() {
            let Some(node) = find(nodes, id) else {
                continue;
            };
            if !self.cooling_down(node, now) {
                return Some(i);
            }
            let until = node.health.cooldown_until_ms.load(Ordering::Acquire);
            if fallback.map_or(true, |(_, best)| until < best) {
                fallback = Some((i, until));
            }
        }
        fallback.map(|(i, _)| i)
    }

    /// Resets the node's consecutive failure count.
    pub fn record_success(&self, account_id: &AccountId) {
        if let Some(node) = self.node(account_id) {
            self.mark_success(&node);
        }
    }

    /// Counts a failure against the node and returns its consecutive count.
    pub fn record_failure(&self, account_id: &AccountId) -> u32 {
        match self.node(account_id) {
            Some(node) => self.mark_failure(&node),
            None => 0,
        }
    }

    /// [`Network::record_success`] for a node taken from a snapshot.
    pub fn mark_success(&self, node: &Node) {
        node.health.consecutive_failures.store(0, Ordering::Release);
    }

    /// [`Network::record_failure`] for a node taken from a snapshot.
    ///
    /// Health lives on the node, so a node that survived a list swap carries
    /// the count into the new list.
    pub fn mark_failure(&self, node: &Node) -> u32 {
        node.health.total_failures.fetch_add(1, Ordering::AcqRel);
        let consecutive = node
            .health
            .consecutive_failures
            .fetch_add(1, Ordering::AcqRel)
            .saturating_add(1);
        if consecutive >= self.failure_threshold {
            let cooldown_ms = u64::try_from(self.cooldown.as_millis()).unwrap_or(u64::MAX);
            let until = self.now_ms().saturating_add(cooldown_ms).max(1);
            node.health.cooldown_until_ms.store(until, Ordering::Release);
            tracing::warn!(
                target: "network",
                node = %node.account_id(),
                consecutive,
                cooldown_ms,
                "node deprioritized"
            );
        }
        consecutive
    }

    /// Whether the node is currently cooling down after repeated failures.
    pub fn is_deprioritized(&self, account_id: &AccountId) -> bool {
        self.node(account_id)
            .map(|n| self.cooling_down(&n, self.now_ms()))
            .unwrap_or(false)
    }

    /// Total failures recorded against the node since it joined the list.
    pub fn failure_count(&self, account_id: &AccountId) -> u64 {
        self.node(account_id)
            .map(|n| n.health.total_failures())
            .unwrap_or(0)
    }

    fn cooling_down(&self, node: &Node, now_ms: u64) -> bool {
        node.health.consecutive_failures() >= self.failure_threshold
            && now_ms < node.health.cooldown_until_ms.load(Ordering::Acquire)
    }

    fn now_ms(&self) -> u64 {
        let elapsed = Instant::now().saturating_duration_since(self.epoch);
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Looks `account_id` up in a snapshot.
pub fn find<'a>(nodes: &'a [Arc<Node>], account_id: &AccountId) -> Option<&'a Arc<Node>> {
    nodes.iter().find(|n| n.account_id() == *account_id)
}
