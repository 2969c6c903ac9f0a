//! Shared-entity, time-windowed clustering of alerts into incident
//! candidates.
//!
//! Two alerts are linkable when they share at least one non-sentinel entity
//! (user, host or ip) and joining them keeps the candidate's total time span
//! within the correlation window. Linkability extends transitively via
//! union-find; connectivity components become incident candidates. Sharing
//! only an alert type never links: type alone is too weak a signal and would
//! merge unrelated activity.

use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeMap, BTreeSet};

use crate::alert::Alert;
use crate::engine::features::{extract, AlertFeatures};

/// Which identity field justified a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntityKind {
    User,
    Host,
    Ip,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::User => write!(f, "user"),
            EntityKind::Host => write!(f, "host"),
            EntityKind::Ip => write!(f, "ip"),
        }
    }
}

/// A shared-entity key that caused a grouping, e.g. `user=admin`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EntityKey {
    pub kind: EntityKind,
    pub value: String,
}

impl std::fmt::Display for EntityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.kind, self.value)
    }
}

/// An ephemeral incident candidate produced by one clustering pass.
#[derive(Debug, Clone)]
pub struct IncidentCandidate {
    /// Member alert ids in (timestamp, id) order. Never empty.
    pub alert_ids: Vec<u64>,
    /// The shared-entity keys that justified the grouping. Empty for
    /// singletons.
    pub shared_entities: BTreeSet<EntityKey>,
    /// Earliest member timestamp.
    pub first_ts: DateTime<Utc>,
    /// Latest member timestamp.
    pub last_ts: DateTime<Utc>,
}

/// Entity keys shared by two alerts. Sentinel (unset) fields never match.
fn shared_entities(a: &AlertFeatures<'_>, b: &AlertFeatures<'_>) -> Vec<EntityKey> {
    let mut keys = Vec::new();
    if let (Some(x), Some(y)) = (a.user, b.user) {
        if x == y {
            keys.push(EntityKey { kind: EntityKind::User, value: x.to_string() });
        }
    }
    if let (Some(x), Some(y)) = (a.host, b.host) {
        if x == y {
            keys.push(EntityKey { kind: EntityKind::Host, value: x.to_string() });
        }
    }
    if let (Some(x), Some(y)) = (a.ip, b.ip) {
        if x == y {
            keys.push(EntityKey { kind: EntityKind::Ip, value: x.to_string() });
        }
    }
    keys
}

/// Union-find over alert indices, tracking each component's time span so
/// the window constraint applies to the whole forming group.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
    min_ts: Vec<DateTime<Utc>>,
    max_ts: Vec<DateTime<Utc>>,
}

impl UnionFind {
    fn new(timestamps: &[DateTime<Utc>]) -> Self {
        Self {
            parent: (0..timestamps.len()).collect(),
            rank: vec![0; timestamps.len()],
            min_ts: timestamps.to_vec(),
            max_ts: timestamps.to_vec(),
        }
    }

    fn find(&mut self, i: usize) -> usize {
        if self.parent[i] != i {
            let root = self.find(self.parent[i]);
            self.parent[i] = root;
        }
        self.parent[i]
    }

    /// Span the merged component would cover.
    fn merged_span(&self, ra: usize, rb: usize) -> Duration {
        let min = self.min_ts[ra].min(self.min_ts[rb]);
        let max = self.max_ts[ra].max(self.max_ts[rb]);
        max - min
    }

    fn union(&mut self, ra: usize, rb: usize) {
        let (min, max) = (
            self.min_ts[ra].min(self.min_ts[rb]),
            self.max_ts[ra].max(self.max_ts[rb]),
        );
        let root = if self.rank[ra] < self.rank[rb] {
            self.parent[ra] = rb;
            rb
        } else if self.rank[ra] > self.rank[rb] {
            self.parent[rb] = ra;
            ra
        } else {
            self.parent[rb] = ra;
            self.rank[ra] += 1;
            ra
        };
        self.min_ts[root] = min;
        self.max_ts[root] = max;
    }
}

/// Partitions the alert pool into incident candidates.
///
/// The partition is deterministic regardless of ingestion order: alerts are
/// sorted by (timestamp, id) before graph construction, and candidate pairs
/// are examined in that fixed order. An empty pool yields no candidates;
/// alerts sharing nothing with anyone become singletons.
pub fn cluster(alerts: &[Alert], window: Duration) -> Vec<IncidentCandidate> {
    if alerts.is_empty() {
        return Vec::new();
    }

    let mut order: Vec<&Alert> = alerts.iter().collect();
    order.sort_by_key(|a| (a.ts, a.id));

    let features: Vec<AlertFeatures<'_>> = order.iter().map(|a| extract(a)).collect();
    let timestamps: Vec<DateTime<Utc>> = order.iter().map(|a| a.ts).collect();
    let mut uf = UnionFind::new(&timestamps);
    // Entity keys recorded per successful union, grouped by member index.
    let mut link_keys: Vec<Vec<EntityKey>> = vec![Vec::new(); order.len()];

    for j in 1..order.len() {
        for i in 0..j {
            let keys = shared_entities(&features[i], &features[j]);
            if keys.is_empty() {
                continue;
            }
            let (ra, rb) = (uf.find(i), uf.find(j));
            if ra == rb {
                continue;
            }
            // Window is evaluated against the whole merged span, not the
            // i..j delta, so clusters cannot drift past the budget.
            if uf.merged_span(ra, rb) <= window {
                uf.union(ra, rb);
                link_keys[j].extend(keys);
            }
        }
    }

    // Group members by component root, preserving sorted traversal order.
    let mut components: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for i in 0..order.len() {
        let root = uf.find(i);
        components.entry(root).or_default().push(i);
    }

    let mut candidates: Vec<IncidentCandidate> = components
        .into_values()
        .map(|members| {
            let mut shared = BTreeSet::new();
            for &m in &members {
                shared.extend(link_keys[m].iter().cloned());
            }
            let first_ts = members.iter().map(|&m| order[m].ts).min().unwrap_or_default();
            let last_ts = members.iter().map(|&m| order[m].ts).max().unwrap_or_default();
            IncidentCandidate {
                alert_ids: members.iter().map(|&m| order[m].id).collect(),
                shared_entities: shared,
                first_ts,
                last_ts,
            }
        })
        .collect();

    candidates.sort_by_key(|c| (c.first_ts, c.alert_ids[0]));
    candidates
}
