//! Actor implementation: drives episodes of one game with a policy

use anyhow::{anyhow, Result};
use engine_core::{Game, GameMetadata, Outcome, Player, RewardConvention};
use engine_games::GameId;
use indicatif::{ProgressBar, ProgressStyle};
use mcts::SearchStats;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::fmt;
use std::path::Path;
use std::sync::{
    atomic::{AtomicBool, AtomicU32, Ordering},
    Arc, Mutex,
};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::{Config, Mode};
use crate::mcts_policy::MctsPolicy;
use crate::policy::{Decision, Policy, PolicyKind, RandomPolicy};
use crate::stats::ActorStats;

/// Upper bound on moves in one episode; every bundled game ends far sooner.
const MAX_EPISODE_STEPS: u32 = 1000;

type SharedPolicy<G> = Arc<Mutex<Box<dyn Policy<G>>>>;

/// Aggregated MCTS stats for an episode.
#[derive(Debug, Default, Clone)]
struct EpisodeStats {
    /// Number of MCTS searches performed
    search_count: u32,
    /// Total wall-clock time across all searches (microseconds)
    total_time_us: u64,
    selection_time_us: u64,
    expansion_time_us: u64,
    rollout_time_us: u64,
    backprop_time_us: u64,
    iterations: u64,
    nodes_created: u64,
    rollout_steps: u64,
    terminal_hits: u64,
}

impl EpisodeStats {
    /// Add stats from a single MCTS search.
    fn add(&mut self, stats: &SearchStats) {
        self.search_count += 1;
        self.total_time_us += stats.total_time_us;
        self.selection_time_us += stats.selection_time_us;
        self.expansion_time_us += stats.expansion_time_us;
        self.rollout_time_us += stats.rollout_time_us;
        self.backprop_time_us += stats.backprop_time_us;
        self.iterations += stats.iterations as u64;
        self.nodes_created += stats.nodes_created as u64;
        self.rollout_steps += stats.rollout_steps;
        self.terminal_hits += stats.terminal_hits as u64;
    }

    /// Log a summary of the episode stats.
    fn log_summary(&self, episode_num: u32) {
        if self.search_count == 0 || self.total_time_us == 0 {
            return;
        }

        let pct = |part: u64| part as f64 / self.total_time_us as f64 * 100.0;

        info!(
            episode = episode_num,
            searches = self.search_count,
            total_ms = format!("{:.1}", self.total_time_us as f64 / 1000.0),
            selection_pct = format!("{:.1}%", pct(self.selection_time_us)),
            expansion_pct = format!("{:.1}%", pct(self.expansion_time_us)),
            rollout_pct = format!("{:.1}%", pct(self.rollout_time_us)),
            backprop_pct = format!("{:.1}%", pct(self.backprop_time_us)),
            iterations = self.iterations,
            nodes = self.nodes_created,
            rollout_steps = self.rollout_steps,
            terminal_hits = self.terminal_hits,
            "MCTS episode stats"
        );
    }
}

/// Result of one finished episode.
#[derive(Debug, Clone)]
struct EpisodeResult {
    steps: u32,
    /// `None` when the episode stopped on a non-terminal state with no
    /// legal move
    outcome: Option<Outcome>,
    duration: Duration,
    search: EpisodeStats,
}

/// One row of the benchmark table.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchRow {
    pub iterations: u32,
    pub games: u32,
    pub total_time: Duration,
    /// Wins for the opening player
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub score_sum: i64,
    pub max_score: Option<i64>,
}

impl BenchRow {
    fn new(iterations: u32) -> Self {
        Self {
            iterations,
            games: 0,
            total_time: Duration::ZERO,
            wins: 0,
            draws: 0,
            losses: 0,
            score_sum: 0,
            max_score: None,
        }
    }

    fn record(&mut self, outcome: Outcome, opener: Player, elapsed: Duration) {
        self.games += 1;
        self.total_time += elapsed;
        match outcome {
            Outcome::Winner(p) if p == opener => self.wins += 1,
            Outcome::Winner(_) => self.losses += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Score(s) => {
                self.score_sum += s;
                self.max_score = Some(self.max_score.map_or(s, |m| m.max(s)));
            }
        }
    }

    fn rate(&self, count: u32) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.games as f64
        }
    }

    pub fn avg_time_ms(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_time.as_secs_f64() * 1000.0 / self.games as f64
        }
    }

    pub fn mean_score(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.score_sum as f64 / self.games as f64
        }
    }

    /// One console line, in the layout that suits the game's scoring.
    pub fn line(&self, convention: RewardConvention) -> String {
        match convention {
            RewardConvention::WinLossDraw => format!(
                "Iterations: {} | Avg Time: {:.2} ms | Win Rate: {:.2}% | Draw Rate: {:.2}% | Loss Rate: {:.2}%",
                self.iterations,
                self.avg_time_ms(),
                self.rate(self.wins),
                self.rate(self.draws),
                self.rate(self.losses),
            ),
            RewardConvention::CumulativeScore => format!(
                "Iterations: {} | Avg Time: {:.2} ms | Mean Score: {:.1} | Max Score: {}",
                self.iterations,
                self.avg_time_ms(),
                self.mean_score(),
                self.max_score.unwrap_or(0),
            ),
        }
    }
}

pub struct Actor<G: Game> {
    config: Config,
    game: Arc<G>,
    metadata: GameMetadata,
    /// Search budget per move in play mode
    iterations: u32,
    seed: Option<u64>,
    game_rng: Mutex<ChaCha20Rng>,
    stats: ActorStats,
    episode_count: AtomicU32,
    shutdown_signal: AtomicBool,
}

impl<G> Actor<G>
where
    G: Game,
    G::State: fmt::Display,
{
    pub fn new(config: Config, game: G) -> Result<Self> {
        let game_id: GameId = config.game_id()?;
        let metadata = game.metadata();
        let iterations = config.iterations_for(game_id);
        let seed = config.effective_seed();

        let game_rng = match seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };

        let stats = ActorStats::new(Path::new(&config.data_dir), &config.env_id);

        info!(
            game = %metadata.display_name,
            policy = ?config.policy,
            iterations,
            seed = ?seed,
            "Actor initialized"
        );

        Ok(Self {
            config,
            game: Arc::new(game),
            metadata,
            iterations,
            seed,
            game_rng: Mutex::new(game_rng),
            stats,
            episode_count: AtomicU32::new(0),
            shutdown_signal: AtomicBool::new(false),
        })
    }

    pub async fn run(&self) -> Result<()> {
        let result = match self.config.mode {
            Mode::Play => self.run_play().await,
            Mode::Bench => self.run_bench().await.map(|_| ()),
        };

        self.stats.write_stats();
        info!(
            path = %self.stats.stats_path().display(),
            "Wrote actor stats"
        );
        result
    }

    pub fn shutdown(&self) {
        self.shutdown_signal.store(true, Ordering::Relaxed);
        info!("Shutdown signal set");
    }

    fn is_shutting_down(&self) -> bool {
        self.shutdown_signal.load(Ordering::Relaxed)
    }

    /// Get current episode count
    pub fn episode_count(&self) -> u32 {
        self.episode_count.load(Ordering::Relaxed)
    }

    /// Build a policy with its own seed derived from the run seed.
    fn make_policy(&self, iterations: u32, salt: u64) -> SharedPolicy<G> {
        let policy_seed = self.seed.map(|s| s.wrapping_add(1).wrapping_add(salt));
        let policy: Box<dyn Policy<G>> = match (self.config.policy, policy_seed) {
            (PolicyKind::Mcts, Some(seed)) => Box::new(MctsPolicy::with_seed(iterations, seed)),
            (PolicyKind::Mcts, None) => Box::new(MctsPolicy::new(iterations)),
            (PolicyKind::Random, Some(seed)) => Box::new(RandomPolicy::with_seed(seed)),
            (PolicyKind::Random, None) => Box::new(RandomPolicy::new()),
        };
        debug!(policy = policy.name(), iterations, seed = ?policy_seed, "Policy ready");
        Arc::new(Mutex::new(policy))
    }

    fn progress_bar(len: u64, unit: &str) -> Result<Option<ProgressBar>> {
        if !std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            return Ok(None);
        }
        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(&format!(
                    "{{spinner:.green}} [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {unit} ({{eta}})"
                ))?
                .progress_chars("#>-"),
        );
        Ok(Some(pb))
    }

    /// Print above the progress bar without tearing it.
    fn emit(progress: Option<&ProgressBar>, text: &str) {
        match progress {
            Some(pb) => pb.suspend(|| println!("{text}")),
            None => println!("{text}"),
        }
    }

    async fn run_play(&self) -> Result<()> {
        let max_episodes = self.config.max_episodes;
        info!(
            max_episodes,
            env_id = %self.config.env_id,
            "Actor starting play loop"
        );

        // Progress bar for bounded runs (only when stderr is a TTY)
        let progress = if max_episodes > 0 {
            Self::progress_bar(max_episodes as u64, "episodes")?
        } else {
            None
        };

        let policy = self.make_policy(self.iterations, 0);

        loop {
            if self.is_shutting_down() {
                info!("Shutdown signal received, stopping actor");
                break;
            }

            let current = self.episode_count();
            if max_episodes > 0 && current >= max_episodes as u32 {
                info!("Reached maximum episodes ({}), stopping", max_episodes);
                break;
            }

            let Some(result) = self
                .run_episode(&policy, self.config.verbose, progress.as_ref())
                .await?
            else {
                info!("Episode interrupted by shutdown");
                break;
            };

            let new_count = self.episode_count.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(outcome) = result.outcome {
                self.stats
                    .record_episode(result.steps, outcome, self.game.opener());
            }

            if self.config.verbose {
                Self::emit(progress.as_ref(), &self.summary(&result));
            }

            debug!(
                episode = new_count,
                steps = result.steps,
                outcome = ?result.outcome,
                duration_ms = result.duration.as_millis() as u64,
                "Episode completed"
            );

            if let Some(ref pb) = progress {
                pb.inc(1);
            }

            if self.config.log_interval > 0 && new_count % self.config.log_interval == 0 {
                let log = || {
                    info!(
                        "Completed {} episodes (last: {:.2}s)",
                        new_count,
                        result.duration.as_secs_f64()
                    );
                    result.search.log_summary(new_count);
                };
                match progress {
                    Some(ref pb) => pb.suspend(log),
                    None => log(),
                }
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message("done");
        }

        info!(episodes = self.episode_count(), "Actor stopped gracefully");
        Ok(())
    }

    /// Play `bench_games` episodes per iteration budget and print one row
    /// per budget.
    async fn run_bench(&self) -> Result<Vec<BenchRow>> {
        let budgets = &self.config.bench_iterations;
        let games = self.config.bench_games;
        let convention = self.game.reward_convention();

        info!(
            budgets = ?budgets,
            games,
            env_id = %self.config.env_id,
            "Actor starting benchmark"
        );

        let total = budgets.len() as u64 * games as u64;
        let progress = Self::progress_bar(total, "games")?;

        let mut rows = Vec::with_capacity(budgets.len());
        'budgets: for (index, &iterations) in budgets.iter().enumerate() {
            let policy = self.make_policy(iterations, index as u64);
            let mut row = BenchRow::new(iterations);

            for _ in 0..games {
                let Some(result) = self.run_episode(&policy, false, progress.as_ref()).await?
                else {
                    break 'budgets;
                };

                self.episode_count.fetch_add(1, Ordering::Relaxed);
                if let Some(outcome) = result.outcome {
                    row.record(outcome, self.game.opener(), result.duration);
                    self.stats
                        .record_episode(result.steps, outcome, self.game.opener());
                }

                if let Some(ref pb) = progress {
                    pb.inc(1);
                }
            }

            let line = row.line(convention);
            Self::emit(progress.as_ref(), &line);
            info!(
                iterations,
                games = row.games,
                avg_time_ms = format!("{:.2}", row.avg_time_ms()),
                "Benchmark row complete"
            );
            rows.push(row);
        }

        if let Some(pb) = progress {
            pb.finish_with_message("done");
        }

        if self.is_shutting_down() {
            warn!(rows = rows.len(), "Benchmark interrupted");
        }
        Ok(rows)
    }

    /// Ask the policy for a move on a blocking worker thread.
    async fn decide(
        &self,
        policy: &SharedPolicy<G>,
        state: &G::State,
    ) -> Result<Option<Decision<G::Action>>> {
        let game = Arc::clone(&self.game);
        let policy = Arc::clone(policy);
        let state = state.clone();

        tokio::task::spawn_blocking(move || {
            let mut guard = policy
                .lock()
                .map_err(|e| anyhow!("Policy lock poisoned: {}", e))?;
            guard.select_action(&game, &state)
        })
        .await
        .map_err(|e| anyhow!("Decision task failed: {}", e))?
    }

    /// Play one episode to the end. Returns `Ok(None)` if shutdown was
    /// requested mid-episode.
    async fn run_episode(
        &self,
        policy: &SharedPolicy<G>,
        verbose: bool,
        progress: Option<&ProgressBar>,
    ) -> Result<Option<EpisodeResult>> {
        let start = Instant::now();

        let mut state = {
            let mut rng = self
                .game_rng
                .lock()
                .map_err(|e| anyhow!("Game rng lock poisoned: {}", e))?;
            self.game.start(&mut rng)
        };

        if verbose {
            Self::emit(
                progress,
                &format!("Start {}!\n{}", self.metadata.display_name, state),
            );
        }

        let mut steps = 0u32;
        let mut search = EpisodeStats::default();

        while !self.game.is_terminal(&state) {
            if self.is_shutting_down() {
                return Ok(None);
            }
            if steps >= MAX_EPISODE_STEPS {
                return Err(anyhow!(
                    "Episode exceeded {} steps without terminating",
                    MAX_EPISODE_STEPS
                ));
            }

            let mover = self.game.to_move(&state);
            let Some(decision) = self.decide(policy, &state).await? else {
                if verbose {
                    Self::emit(progress, "No possible moves!");
                }
                warn!(steps, "No possible moves, ending episode");
                return Ok(Some(EpisodeResult {
                    steps,
                    outcome: None,
                    duration: start.elapsed(),
                    search,
                }));
            };

            if let Some(ref stats) = decision.stats {
                search.add(stats);
                self.stats.record_search(stats);
            }

            state = {
                let mut rng = self
                    .game_rng
                    .lock()
                    .map_err(|e| anyhow!("Game rng lock poisoned: {}", e))?;
                self.game.apply(&state, &decision.action, &mut rng)?
            };
            steps += 1;

            if verbose {
                Self::emit(
                    progress,
                    &format!(
                        "\n{} Round\nMove chosen: {}\n{}",
                        self.metadata.player_name(mover),
                        decision.action,
                        state
                    ),
                );
            }
        }

        Ok(Some(EpisodeResult {
            steps,
            outcome: Some(self.game.outcome(&state)),
            duration: start.elapsed(),
            search,
        }))
    }

    /// Game-over text for a finished episode.
    fn summary(&self, result: &EpisodeResult) -> String {
        let verdict = match result.outcome {
            Some(Outcome::Winner(p)) => format!("Winner: {}", self.metadata.player_name(p)),
            Some(Outcome::Draw) => "Draw!".to_string(),
            Some(Outcome::Score(s)) => format!("Final score: {}", s),
            None => "Stopped before the game ended".to_string(),
        };
        format!(
            "\nGame Over!\n{}\nTime taken: {} ms",
            verdict,
            result.duration.as_millis()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyKind;
    use games_balatro::Balatro;
    use games_blackjack::Blackjack;
    use games_tictactoe::TicTacToe;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir, env_id: &str) -> Config {
        Config {
            env_id: env_id.into(),
            mode: Mode::Play,
            policy: PolicyKind::Mcts,
            max_iterations: 50, // Fewer for tests
            max_episodes: 2,
            seed: Some(42),
            log_level: "info".into(),
            log_interval: 1,
            verbose: false,
            data_dir: dir.path().to_string_lossy().into_owned(),
            bench_iterations: vec![10, 30],
            bench_games: 2,
        }
    }

    #[tokio::test]
    async fn test_actor_nonexistent_game() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(&dir, "tictactoe");
        config.env_id = "nonexistent_game".into();

        let result = Actor::new(config, TicTacToe::new());
        let err = result.err().unwrap();
        assert!(err.to_string().contains("Unknown game"));
    }

    #[tokio::test]
    async fn test_actor_run_single_episode() {
        let dir = TempDir::new().unwrap();
        let actor = Actor::new(test_config(&dir, "tictactoe"), TicTacToe::new()).unwrap();
        let policy = actor.make_policy(50, 0);

        let result = actor.run_episode(&policy, false, None).await.unwrap().unwrap();
        assert!((5..=9).contains(&result.steps));
        assert!(matches!(
            result.outcome,
            Some(Outcome::Winner(_) | Outcome::Draw)
        ));
        assert_eq!(result.search.search_count, result.steps);
    }

    #[tokio::test]
    async fn test_actor_play_writes_stats() {
        let dir = TempDir::new().unwrap();
        let actor = Actor::new(test_config(&dir, "blackjack"), Blackjack::new()).unwrap();

        actor.run().await.unwrap();
        assert_eq!(actor.episode_count(), 2);

        let content = std::fs::read_to_string(dir.path().join("actor_stats.json")).unwrap();
        let snapshot: crate::stats::ActorStatsSnapshot = serde_json::from_str(&content).unwrap();
        assert_eq!(snapshot.episodes_completed, 2);
        assert_eq!(snapshot.env_id, "blackjack");
    }

    #[tokio::test]
    async fn test_actor_bench_rows() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(&dir, "balatro");
        config.mode = Mode::Bench;
        let actor = Actor::new(config, Balatro::new()).unwrap();

        let rows = actor.run_bench().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].iterations, 10);
        assert_eq!(rows[1].iterations, 30);
        assert!(rows.iter().all(|r| r.games == 2));
        assert!(rows.iter().all(|r| r.max_score.is_some()));
        assert_eq!(actor.episode_count(), 4);
    }

    #[tokio::test]
    async fn test_actor_random_policy() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(&dir, "tictactoe");
        config.policy = PolicyKind::Random;
        let actor = Actor::new(config, TicTacToe::new()).unwrap();
        let policy = actor.make_policy(0, 0);

        let result = actor.run_episode(&policy, false, None).await.unwrap().unwrap();
        assert_eq!(result.search.search_count, 0);
    }

    async fn play_seeded(dir: &TempDir) -> (u32, Option<Outcome>) {
        let actor = Actor::new(test_config(dir, "tictactoe"), TicTacToe::new()).unwrap();
        let policy = actor.make_policy(50, 0);
        let result = actor.run_episode(&policy, false, None).await.unwrap().unwrap();
        (result.steps, result.outcome)
    }

    #[tokio::test]
    async fn test_same_seed_same_episode() {
        let dir = TempDir::new().unwrap();
        assert_eq!(play_seeded(&dir).await, play_seeded(&dir).await);
    }

    #[tokio::test]
    async fn test_shutdown_stops_before_first_episode() {
        let dir = TempDir::new().unwrap();
        let actor = Actor::new(test_config(&dir, "tictactoe"), TicTacToe::new()).unwrap();

        actor.shutdown();
        actor.run().await.unwrap();
        assert_eq!(actor.episode_count(), 0);
    }

    /// A game that opens on a non-terminal position with no legal move.
    #[derive(Debug)]
    struct Stalled;

    impl Game for Stalled {
        type State = u8;
        type Action = games_tictactoe::Action;

        fn metadata(&self) -> GameMetadata {
            GameMetadata::new("stalled", "Stalled")
        }

        fn reward_convention(&self) -> RewardConvention {
            RewardConvention::WinLossDraw
        }

        fn opener(&self) -> Player {
            Player(0)
        }

        fn start(&self, _: &mut ChaCha20Rng) -> u8 {
            0
        }

        fn to_move(&self, _: &u8) -> Player {
            Player(0)
        }

        fn legal_actions(&self, _: &u8, _: Player) -> Vec<Self::Action> {
            Vec::new()
        }

        fn apply(
            &self,
            _: &u8,
            action: &Self::Action,
            _: &mut ChaCha20Rng,
        ) -> Result<u8, engine_core::GameError> {
            Err(engine_core::GameError::illegal(action, "no moves"))
        }

        fn is_terminal(&self, _: &u8) -> bool {
            false
        }

        fn outcome(&self, _: &u8) -> Outcome {
            panic!("outcome asked of a non-terminal state")
        }
    }

    #[tokio::test]
    async fn test_stalled_episode_is_not_recorded() {
        let dir = TempDir::new().unwrap();
        let actor = Actor::new(test_config(&dir, "tictactoe"), Stalled).unwrap();
        let policy = actor.make_policy(50, 0);

        let result = actor.run_episode(&policy, false, None).await.unwrap().unwrap();
        assert_eq!(result.steps, 0);
        assert!(result.outcome.is_none());
        assert!(actor.summary(&result).contains("Stopped before the game ended"));

        actor.run().await.unwrap();
        assert_eq!(actor.episode_count(), 2);
        let snapshot = actor.stats.snapshot();
        assert_eq!(snapshot.episodes_completed, 0);
        assert_eq!(snapshot.draws, 0);
    }

    #[tokio::test]
    async fn test_stalled_episodes_skip_bench_rows() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(&dir, "tictactoe");
        config.mode = Mode::Bench;
        let actor = Actor::new(config, Stalled).unwrap();

        let rows = actor.run_bench().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.games == 0 && r.draws == 0));
        assert_eq!(actor.episode_count(), 4);
    }

    #[test]
    fn test_bench_row_lines() {
        let mut row = BenchRow::new(200);
        row.record(Outcome::Winner(Player(0)), Player(0), Duration::from_millis(10));
        row.record(Outcome::Winner(Player(1)), Player(0), Duration::from_millis(20));
        row.record(Outcome::Draw, Player(0), Duration::from_millis(30));
        row.record(Outcome::Winner(Player(0)), Player(0), Duration::from_millis(40));

        assert_eq!(
            row.line(RewardConvention::WinLossDraw),
            "Iterations: 200 | Avg Time: 25.00 ms | Win Rate: 50.00% | Draw Rate: 25.00% | Loss Rate: 25.00%"
        );

        let mut row = BenchRow::new(500);
        row.record(Outcome::Score(100), Player(0), Duration::from_millis(5));
        row.record(Outcome::Score(60), Player(0), Duration::from_millis(15));
        assert_eq!(
            row.line(RewardConvention::CumulativeScore),
            "Iterations: 500 | Avg Time: 10.00 ms | Mean Score: 80.0 | Max Score: 100"
        );
    }
}
