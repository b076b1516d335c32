use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::Utc;
use parking_lot::RwLock;
use tokio::sync::watch;

use crate::foundation::error::{ReelError, ReelResult};
use crate::jobs::state::{JobEvent, JobId, RenderJob};

/// Limits on how many finished jobs the table keeps.
///
/// In-flight jobs are never evicted. The default keeps everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Upper bound on stored jobs; the oldest finished jobs go first.
    pub max_jobs: Option<usize>,
    /// How long a finished job stays queryable.
    pub ttl: Option<Duration>,
}

struct Entry {
    seq: u64,
    finished_at: Option<Instant>,
    tx: watch::Sender<RenderJob>,
}

#[derive(Default)]
struct Table {
    next_seq: u64,
    entries: HashMap<JobId, Entry>,
}

/// Process-wide job table.
///
/// Snapshot reads take a shared lock and never wait on a renderer. Each job also owns a `watch`
/// channel so waiters observe transitions in order.
#[derive(Default)]
pub struct JobStore {
    table: RwLock<Table>,
    policy: RetentionPolicy,
}

impl JobStore {
    /// Empty table governed by `policy`.
    pub fn new(policy: RetentionPolicy) -> Self {
        Self {
            table: RwLock::new(Table::default()),
            policy,
        }
    }

    /// Retention limits in force.
    pub fn policy(&self) -> RetentionPolicy {
        self.policy
    }

    /// Add a freshly created job.
    pub fn insert(&self, job: RenderJob) {
        let mut table = self.table.write();
        let id = job.job_id;
        let seq = table.next_seq;
        table.next_seq += 1;
        let (tx, _rx) = watch::channel(job);
        table.entries.insert(
            id,
            Entry {
                seq,
                finished_at: None,
                tx,
            },
        );
        evict(&mut table, self.policy, Instant::now());
    }

    /// Apply `event` to job `id` and return the new snapshot.
    pub fn apply(&self, id: &JobId, event: JobEvent) -> ReelResult<RenderJob> {
        let mut table = self.table.write();
        let entry = table
            .entries
            .get_mut(id)
            .ok_or_else(|| ReelError::not_found(format!("job '{id}'")))?;

        let mut next = entry.tx.borrow().clone();
        next.apply(event, Utc::now())?;
        if next.status.is_terminal() {
            entry.finished_at = Some(Instant::now());
        }
        entry.tx.send_replace(next.clone());

        if next.status.is_terminal() {
            evict(&mut table, self.policy, Instant::now());
        }
        Ok(next)
    }

    /// Current snapshot of job `id`. Finished jobs past their time to live are absent.
    pub fn get(&self, id: &JobId) -> Option<RenderJob> {
        let table = self.table.read();
        self.live(&table, id).map(|e| e.tx.borrow().clone())
    }

    /// Receiver that observes every later transition of job `id`.
    pub fn subscribe(&self, id: &JobId) -> Option<watch::Receiver<RenderJob>> {
        let table = self.table.read();
        self.live(&table, id).map(|e| e.tx.subscribe())
    }

    fn live<'t>(&self, table: &'t Table, id: &JobId) -> Option<&'t Entry> {
        let now = Instant::now();
        table
            .entries
            .get(id)
            .filter(|e| !expired(e, self.policy.ttl, now))
    }

    /// Drop finished jobs past their time to live.
    pub fn evict_expired(&self) {
        let mut table = self.table.write();
        evict(&mut table, self.policy, Instant::now());
    }

    /// Number of stored jobs, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.table.read().entries.len()
    }

    /// `true` when no job is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn expired(entry: &Entry, ttl: Option<Duration>, now: Instant) -> bool {
    match (entry.finished_at, ttl) {
        (Some(done), Some(ttl)) => now.saturating_duration_since(done) >= ttl,
        _ => false,
    }
}

fn evict(table: &mut Table, policy: RetentionPolicy, now: Instant) {
    if policy.ttl.is_some() {
        table.entries.retain(|_, e| !expired(e, policy.ttl, now));
    }

    let Some(max) = policy.max_jobs else {
        return;
    };
    let excess = table.entries.len().saturating_sub(max);
    if excess == 0 {
        return;
    }

    let mut finished: Vec<(u64, JobId)> = table
        .entries
        .iter()
        .filter(|(_, e)| e.finished_at.is_some())
        .map(|(id, e)| (e.seq, *id))
        .collect();
    finished.sort_unstable();
    for (_, id) in finished.into_iter().take(excess) {
        tracing::debug!(job = %id, "evicting finished job");
        table.entries.remove(&id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/jobs/store.rs"]
mod tests;
