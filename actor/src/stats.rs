//! Actor statistics tracking and persistence.
//!
//! This module provides statistics tracking for the actor, including:
//! - Episode counts and outcomes
//! - MCTS search metrics
//! - Episode timing information
//!
//! Stats are written to a JSON file at the end of a run.

use engine_core::{Outcome, Player};
use mcts::SearchStats;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, AtomicU32, AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, warn};

/// Aggregated actor statistics, designed for lock-free updates.
#[derive(Debug)]
pub struct ActorStats {
    /// Number of episodes completed
    episodes_completed: AtomicU32,
    /// Total moves across all episodes
    total_steps: AtomicU64,
    /// Episodes won by the opening player
    opener_wins: AtomicU32,
    /// Episodes won by any other player
    opponent_wins: AtomicU32,
    /// Episodes that ended in a draw
    draws: AtomicU32,
    /// Episodes that ended with a score
    scored_episodes: AtomicU32,
    score_sum: AtomicI64,
    max_score: AtomicI64,
    /// Start time for rate calculations
    start_time: Instant,
    /// Path to write stats file
    stats_path: PathBuf,
    /// Environment ID
    env_id: String,
    /// MCTS stats: total search time (microseconds)
    search_time_us: AtomicU64,
    /// MCTS stats: total searches performed
    searches: AtomicU64,
    /// MCTS stats: total iterations run
    iterations: AtomicU64,
}

/// Serializable stats for JSON output.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActorStatsSnapshot {
    pub env_id: String,
    pub episodes_completed: u32,
    pub total_steps: u64,
    pub opener_wins: u32,
    pub opponent_wins: u32,
    pub draws: u32,
    pub scored_episodes: u32,
    pub mean_score: f64,
    pub max_score: Option<i64>,
    pub avg_episode_length: f64,
    pub episodes_per_second: f64,
    pub runtime_seconds: f64,
    pub mcts_searches: u64,
    pub mcts_avg_search_us: f64,
    pub mcts_avg_iterations: f64,
    pub timestamp: u64,
}

impl ActorStats {
    /// Create new stats tracker.
    pub fn new(data_dir: &Path, env_id: &str) -> Self {
        let stats_path = data_dir.join("actor_stats.json");

        // Ensure data directory exists
        if let Err(e) = fs::create_dir_all(data_dir) {
            warn!("Failed to create data directory: {}", e);
        }

        Self {
            episodes_completed: AtomicU32::new(0),
            total_steps: AtomicU64::new(0),
            opener_wins: AtomicU32::new(0),
            opponent_wins: AtomicU32::new(0),
            draws: AtomicU32::new(0),
            scored_episodes: AtomicU32::new(0),
            score_sum: AtomicI64::new(0),
            max_score: AtomicI64::new(i64::MIN),
            start_time: Instant::now(),
            stats_path,
            env_id: env_id.to_string(),
            search_time_us: AtomicU64::new(0),
            searches: AtomicU64::new(0),
            iterations: AtomicU64::new(0),
        }
    }

    /// Record a completed episode.
    pub fn record_episode(&self, steps: u32, outcome: Outcome, opener: Player) {
        self.episodes_completed.fetch_add(1, Ordering::Relaxed);
        self.total_steps.fetch_add(steps as u64, Ordering::Relaxed);

        match outcome {
            Outcome::Winner(p) if p == opener => {
                self.opener_wins.fetch_add(1, Ordering::Relaxed);
            }
            Outcome::Winner(_) => {
                self.opponent_wins.fetch_add(1, Ordering::Relaxed);
            }
            Outcome::Draw => {
                self.draws.fetch_add(1, Ordering::Relaxed);
            }
            Outcome::Score(score) => {
                self.scored_episodes.fetch_add(1, Ordering::Relaxed);
                self.score_sum.fetch_add(score, Ordering::Relaxed);
                self.max_score.fetch_max(score, Ordering::Relaxed);
            }
        }
    }

    /// Record one MCTS search.
    pub fn record_search(&self, stats: &SearchStats) {
        self.searches.fetch_add(1, Ordering::Relaxed);
        self.search_time_us
            .fetch_add(stats.total_time_us, Ordering::Relaxed);
        self.iterations
            .fetch_add(stats.iterations as u64, Ordering::Relaxed);
    }

    /// Get a snapshot of current stats.
    pub fn snapshot(&self) -> ActorStatsSnapshot {
        let episodes = self.episodes_completed.load(Ordering::Relaxed);
        let total_steps = self.total_steps.load(Ordering::Relaxed);
        let runtime = self.start_time.elapsed().as_secs_f64();
        let searches = self.searches.load(Ordering::Relaxed);
        let scored = self.scored_episodes.load(Ordering::Relaxed);

        let per = |total: f64, count: f64| if count > 0.0 { total / count } else { 0.0 };

        ActorStatsSnapshot {
            env_id: self.env_id.clone(),
            episodes_completed: episodes,
            total_steps,
            opener_wins: self.opener_wins.load(Ordering::Relaxed),
            opponent_wins: self.opponent_wins.load(Ordering::Relaxed),
            draws: self.draws.load(Ordering::Relaxed),
            scored_episodes: scored,
            mean_score: per(self.score_sum.load(Ordering::Relaxed) as f64, scored as f64),
            max_score: (scored > 0).then(|| self.max_score.load(Ordering::Relaxed)),
            avg_episode_length: per(total_steps as f64, episodes as f64),
            episodes_per_second: per(episodes as f64, runtime),
            runtime_seconds: runtime,
            mcts_searches: searches,
            mcts_avg_search_us: per(
                self.search_time_us.load(Ordering::Relaxed) as f64,
                searches as f64,
            ),
            mcts_avg_iterations: per(
                self.iterations.load(Ordering::Relaxed) as f64,
                searches as f64,
            ),
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    /// Write stats to JSON file (atomic write-then-rename).
    pub fn write_stats(&self) {
        let snapshot = self.snapshot();

        // Serialize to JSON
        let json = match serde_json::to_string_pretty(&snapshot) {
            Ok(j) => j,
            Err(e) => {
                warn!("Failed to serialize actor stats: {}", e);
                return;
            }
        };

        // Write to temp file then rename (atomic on most filesystems)
        let temp_path = self.stats_path.with_extension("json.tmp");
        match fs::File::create(&temp_path) {
            Ok(mut file) => {
                if let Err(e) = file.write_all(json.as_bytes()) {
                    warn!("Failed to write actor stats: {}", e);
                    return;
                }
            }
            Err(e) => {
                warn!("Failed to create temp stats file: {}", e);
                return;
            }
        }

        if let Err(e) = fs::rename(&temp_path, &self.stats_path) {
            warn!("Failed to rename stats file: {}", e);
            // Try to clean up temp file
            let _ = fs::remove_file(&temp_path);
            return;
        }

        debug!("Wrote actor stats to {}", self.stats_path.display());
    }

    pub fn stats_path(&self) -> &Path {
        &self.stats_path
    }
}
