//! Demo Record Source
//!
//! In-memory roster served with simulated latency and injectable failures,
//! so the list can be exercised without a backend. Search, filters, sort
//! and paging are applied "server side" with the same pipeline the list uses.

use std::hash::BuildHasher;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use ahash::RandomState;
use futures::future::BoxFuture;

use super::source::RecordSource;
use crate::domain::config::SourceConfig;
use crate::domain::player::{CommitmentStatus, Player, PlayerField};
use crate::domain::query::{FetchQuery, FetchResult};
use crate::error::Error;
use crate::list::pipeline::{ListQuery, SortState, apply};
use crate::list::policy::{RecordPolicy, player_policy};

const FIRST_NAMES: [&str; 24] = [
    "Aiden", "Ava", "Blake", "Brooks", "Caleb", "Carter", "Dylan", "Eli", "Ethan", "Gavin",
    "Hayden", "Isaac", "Jace", "Jalen", "Kai", "Landon", "Logan", "Mason", "Nolan", "Owen",
    "Parker", "Reid", "Tyler", "Wyatt",
];
const LAST_NAMES: [&str; 24] = [
    "Alvarez", "Bennett", "Brooks", "Castillo", "Chen", "Delgado", "Ellis", "Foster", "Garcia",
    "Hayes", "Jensen", "Kim", "Lopez", "Martinez", "Nguyen", "Ortiz", "Patel", "Reed", "Rivera",
    "Santos", "Thompson", "Walker", "Young", "Zimmerman",
];
const POSITIONS: [&str; 10] = ["RHP", "LHP", "C", "1B", "2B", "3B", "SS", "LF", "CF", "RF"];
const STATES: [&str; 12] = [
    "AZ", "CA", "FL", "GA", "IL", "NC", "NJ", "NY", "OH", "TN", "TX", "WA",
];
const COLLEGES: [&str; 8] = [
    "Arizona State",
    "Florida",
    "LSU",
    "Stanford",
    "TCU",
    "Texas",
    "Vanderbilt",
    "Wake Forest",
];

/// Deterministic pseudo-random stream
struct Dice {
    hasher: RandomState,
}

impl Dice {
    fn seeded(seed: u64) -> Self {
        Self {
            hasher: RandomState::with_seeds(seed, seed ^ 0x9e37_79b9, 0x5bd1_e995, 0x2545_f491),
        }
    }

    fn roll(&self, index: u64, salt: u64) -> u64 {
        self.hasher.hash_one((index, salt))
    }

    /// Uniform in `[0, 1)`
    fn unit(&self, index: u64, salt: u64) -> f64 {
        (self.roll(index, salt) >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&self, items: &[&'a str], index: u64, salt: u64) -> &'a str {
        items[(self.roll(index, salt) % items.len() as u64) as usize]
    }

    fn range(&self, low: f64, high: f64, index: u64, salt: u64) -> f64 {
        let value = low + (high - low) * self.unit(index, salt);
        (value * 10.0).round() / 10.0
    }
}

/// Generate `count` players; same seed, same roster
pub fn generate_players(count: usize, seed: u64) -> Vec<Player> {
    let dice = Dice::seeded(seed);
    (0..count as u64)
        .map(|i| {
            let primary = dice.pick(&POSITIONS, i, 3);
            let pitcher = primary.ends_with("HP");
            let commitment_status = match dice.roll(i, 10) % 6 {
                0 => CommitmentStatus::Signed,
                1 | 2 => CommitmentStatus::Committed,
                _ => CommitmentStatus::Uncommitted,
            };
            let college_name = (commitment_status != CommitmentStatus::Uncommitted)
                .then(|| dice.pick(&COLLEGES, i, 11).to_string());
            Player {
                id: format!("p-{:05}", i + 1),
                full_name: format!(
                    "{} {}",
                    dice.pick(&FIRST_NAMES, i, 1),
                    dice.pick(&LAST_NAMES, i, 2)
                ),
                grad_year: 2025 + (dice.roll(i, 4) % 4) as i32,
                primary_position: primary.to_string(),
                secondary_position: (dice.roll(i, 5) % 3 == 0)
                    .then(|| dice.pick(&POSITIONS, i, 6).to_string())
                    .filter(|secondary| secondary != primary),
                high_school_state: Some(dice.pick(&STATES, i, 7).to_string()),
                avatar_url: None,
                pitch_velo: pitcher.then(|| dice.range(78.0, 97.0, i, 8)),
                exit_velo: (!pitcher).then(|| dice.range(80.0, 104.0, i, 8)),
                sixty_time: (!pitcher && dice.roll(i, 9) % 5 != 0)
                    .then(|| dice.range(6.3, 7.6, i, 9)),
                gpa: (dice.roll(i, 12) % 4 != 0).then(|| dice.range(2.5, 4.0, i, 12)),
                height: Some(format!("{}'{}\"", 5 + dice.roll(i, 13) % 2, dice.roll(i, 14) % 12)),
                weight: Some((150 + dice.roll(i, 15) % 70) as f64),
                commitment_status,
                college_name,
            }
        })
        .collect()
}

struct DemoInner {
    players: Vec<Player>,
    policy: RecordPolicy<Player>,
    latency: Duration,
    failure_rate: f64,
    dice: Dice,
    requests: AtomicU64,
}

/// Generated roster behind a fake network
#[derive(Clone)]
pub struct DemoSource {
    inner: Arc<DemoInner>,
}

impl DemoSource {
    pub fn new(players: Vec<Player>, latency: Duration, failure_rate: f64) -> Self {
        Self {
            inner: Arc::new(DemoInner {
                players,
                policy: player_policy(),
                latency,
                failure_rate: failure_rate.clamp(0.0, 1.0),
                dice: Dice::seeded(0x00c0_ffee),
                requests: AtomicU64::new(0),
            }),
        }
    }

    pub fn from_config(config: &SourceConfig) -> Self {
        Self::new(
            generate_players(config.demo_size, 42),
            Duration::from_millis(config.latency_ms),
            config.failure_rate,
        )
    }

    pub fn len(&self) -> usize {
        self.inner.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.players.is_empty()
    }
}

impl DemoInner {
    fn list_query(&self, query: &FetchQuery) -> ListQuery<PlayerField> {
        let mut list = ListQuery {
            search: query.search.clone(),
            ..Default::default()
        };
        for (key, value) in &query.filters {
            if self.policy.find_dimension(key).is_none() {
                continue;
            }
            let values = match value {
                serde_json::Value::Array(items) => items.clone(),
                other => vec![other.clone()],
            };
            for value in values {
                let value = match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                if !list.filters.is_selected(key, &value) {
                    list.filters.toggle(key, &value);
                }
            }
        }
        list.sort = query
            .sort_by
            .as_deref()
            .and_then(PlayerField::from_key)
            .map(|field| SortState {
                field,
                order: query.sort_order,
            });
        list
    }

    fn serve(&self, query: &FetchQuery) -> Result<FetchResult<Player>, Error> {
        let request = self.requests.fetch_add(1, Ordering::Relaxed);
        if self.failure_rate > 0.0 && self.dice.unit(request, 99) < self.failure_rate {
            return Err(if request % 2 == 0 {
                Error::Transport {
                    message: "network unreachable (simulated)".to_string(),
                }
            } else {
                Error::Status {
                    status: 503,
                    message: "service unavailable (simulated)".to_string(),
                }
            });
        }

        let matched = apply(&self.players, &self.policy, &self.list_query(query));
        let limit = query.limit as usize;
        let start = (query.page.saturating_sub(1) as usize).saturating_mul(limit);
        let records: Vec<Player> = matched.iter().skip(start).take(limit).cloned().collect();
        Ok(FetchResult {
            has_more: start + records.len() < matched.len(),
            total: matched.len() as u64,
            page: query.page,
            records,
        })
    }
}

impl RecordSource<Player> for DemoSource {
    fn fetch(&self, query: FetchQuery) -> BoxFuture<'static, anyhow::Result<FetchResult<Player>>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            if !inner.latency.is_zero() {
                tokio::time::sleep(inner.latency).await;
            }
            if let Err(e) = query.validate() {
                return Err(anyhow::Error::new(e));
            }
            inner.serve(&query).map_err(anyhow::Error::new)
        })
    }
}
