//! Tests for the configuration module.

use super::*;
use std::io::Write;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.env_id, "tictactoe");
    assert_eq!(config.common.data_dir, "./data");
    assert_eq!(config.common.log_level, "info");
    assert!(config.common.seed.is_none());
    assert_eq!(config.mcts.max_iterations, 0);
}

#[test]
fn test_actor_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.actor.max_episodes, 1);
    assert_eq!(config.actor.log_interval, 10);
    assert!(config.actor.verbose);
}

#[test]
fn test_bench_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.bench.iterations, vec![100, 500, 1000]);
    assert_eq!(config.bench.games, 20);
}

#[test]
fn test_playout_env_overrides() {
    // Keys here are not asserted by any other test, so parallel runs agree
    std::env::set_var("PLAYOUT_ACTOR_LOG_INTERVAL", "3");
    std::env::set_var("PLAYOUT_COMMON_SEED", "1234");
    std::env::set_var("PLAYOUT_BENCH_ITERATIONS", "50, 150");

    let config = load_config();
    assert_eq!(config.actor.log_interval, 3);
    assert_eq!(config.common.seed, Some(1234));
    assert_eq!(config.bench.iterations, vec![50, 150]);

    std::env::remove_var("PLAYOUT_ACTOR_LOG_INTERVAL");
    std::env::remove_var("PLAYOUT_COMMON_SEED");
    std::env::remove_var("PLAYOUT_BENCH_ITERATIONS");
}

#[test]
fn test_unparseable_env_override_is_ignored() {
    std::env::set_var("PLAYOUT_BENCH_GAMES", "lots");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.bench.games, 20);

    std::env::remove_var("PLAYOUT_BENCH_GAMES");
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
env_id = "blackjack"
data_dir = "/custom/data"
seed = 7

[mcts]
max_iterations = 2500

[actor]
max_episodes = 100
verbose = false

[bench]
iterations = [10, 20]
games = 4
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.env_id, "blackjack");
    assert_eq!(config.common.data_dir, "/custom/data");
    assert_eq!(config.common.seed, Some(7));
    assert_eq!(config.mcts.max_iterations, 2500);
    assert_eq!(config.actor.max_episodes, 100);
    assert!(!config.actor.verbose);
    assert_eq!(config.bench.iterations, vec![10, 20]);
    assert_eq!(config.bench.games, 4);
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[common]
env_id = "balatro"
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.env_id, "balatro");
    assert_eq!(config.common.data_dir, "./data"); // Default
    assert_eq!(config.actor.max_episodes, 1); // Default
    assert_eq!(config.bench.games, 20); // Default
}

#[test]
fn test_load_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[common]
data_dir = "/tmp/playout"

[mcts]
max_iterations = 321
"#
    )
    .unwrap();

    let config = load_from_path(file.path());
    assert_eq!(config.common.data_dir, "/tmp/playout");
    assert_eq!(config.mcts.max_iterations, 321);
}

#[test]
fn test_load_from_invalid_path_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_from_path(&dir.path().join("missing.toml"));
    assert_eq!(config.common.data_dir, "./data");
}

#[test]
fn test_load_malformed_file_uses_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[mcts\nmax_iterations = ").unwrap();

    let config = load_from_path(file.path());
    assert_eq!(config.mcts.max_iterations, 0);
}

#[test]
fn test_config_clone() {
    let config = CentralConfig::default();
    let cloned = config.clone();
    assert_eq!(config.common.env_id, cloned.common.env_id);
    assert_eq!(config.bench.iterations, cloned.bench.iterations);
}
