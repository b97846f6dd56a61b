//! Integration tests for agents, the TD(0) pass and the episode driver.

use rust_2584::agents::{Agent, HeuristicPlayer, RandomEnvironment, TdPlayer};
use rust_2584::core::{Action, AgentConfig, Board, Direction, PlanPreset, Symmetry, TrainConfig, Variant};
use rust_2584::ntuple::{NTupleNetwork, SamplingPlan, TupleShape};
use rust_2584::training::{backward_td0, play_episode, train, Afterstate, Trainer, Trajectory};
use rust_2584::{Error, PersistError};

fn single_lookup() -> NTupleNetwork {
    let mut plan = SamplingPlan::new();
    let table = plan.declare_table(TupleShape::OUTER_ROW);
    plan.add_sample(table, Symmetry::IDENTITY);
    NTupleNetwork::new(plan, 16)
}

fn top(row: [u8; 4]) -> Board {
    Board::from_ranks([row, [0; 4], [0; 4], [0; 4]])
}

// =============================================================================
// Backward TD(0)
// =============================================================================

#[test]
fn test_hand_computed_three_steps() {
    let mut network = single_lookup();
    let a0 = top([1, 0, 0, 0]);
    let a1 = top([2, 0, 0, 0]);
    let a2 = top([3, 0, 0, 0]);

    let mut trajectory: Trajectory = [
        Afterstate::new(a0, 1, 1.0),
        Afterstate::new(a1, 2, 1.0),
        Afterstate::new(a2, 4, 1.0),
    ]
    .into_iter()
    .collect();

    backward_td0(&mut network, &mut trajectory, 0.5);

    // i = 1: delta = 0.5 * (4 + 1 - 1) = 2; weight(a1) = 2; value1 = 1 + 2 = 3
    // i = 0: delta = 0.5 * (2 + 3 - 1) = 2; weight(a0) = 2; value0 = 1 + 2 = 3
    assert_eq!(network.value(&a1), 2.0);
    assert_eq!(network.value(&a0), 2.0);
    assert_eq!(network.value(&a2), 0.0);

    let values: Vec<f32> = trajectory.steps().iter().map(|s| s.value).collect();
    assert_eq!(values, vec![3.0, 3.0, 1.0]);
}

#[test]
fn test_backward_order_propagates_in_one_pass() {
    let mut network = single_lookup();
    let boards: Vec<Board> = (1..=5).map(|r| top([r, 0, 0, 0])).collect();

    let mut trajectory: Trajectory = boards
        .iter()
        .enumerate()
        .map(|(i, &b)| Afterstate::new(b, if i == 4 { 8 } else { 0 }, 0.0))
        .collect();

    backward_td0(&mut network, &mut trajectory, 0.5);

    // The final reward reaches the first afterstate in a single pass.
    assert!(network.value(&boards[0]) > 0.0);
    assert_eq!(network.value(&boards[3]), 4.0);
    assert_eq!(network.value(&boards[2]), 2.0);
    assert_eq!(network.value(&boards[1]), 1.0);
    assert_eq!(network.value(&boards[0]), 0.5);
}

// =============================================================================
// TD Player
// =============================================================================

#[test]
fn test_player_records_one_step_per_call() {
    let mut player = TdPlayer::new(NTupleNetwork::new(SamplingPlan::rows(), 16), 0.01, Variant::Fibonacci);
    let boards = [
        top([1, 1, 0, 0]),
        top([0, 0, 0, 1]),
        Board::from_ranks([[1, 3, 1, 3], [3, 1, 3, 1], [1, 3, 1, 3], [3, 1, 3, 1]]),
    ];

    player.open_episode();
    let actions: Vec<Action> = boards.iter().map(|b| player.take_action(b)).collect();

    assert_eq!(player.trajectory().len(), 3);
    assert!(actions[..2].iter().all(|a| matches!(a, Action::Slide(_))));
    assert_eq!(actions[2], Action::None);
}

#[test]
fn test_player_avoids_devalued_afterstate() {
    // Only the top row is read, in one orientation.
    let mut network = single_lookup();
    let board = Board::from_ranks([[0; 4], [1, 0, 0, 0], [0; 4], [0; 4]]);
    let (up, _) = board.after(Direction::Up, Variant::Fibonacci).unwrap();
    network.update(&up, -10.0);

    // Right and Down tie at zero; Right comes first.
    let mut player = TdPlayer::new(network, 0.01, Variant::Fibonacci);
    assert_eq!(player.take_action(&board), Action::Slide(Direction::Right));
    assert_eq!(player.trajectory().last().unwrap().value, 0.0);
}

#[test]
fn test_seeded_first_direction_is_reproducible() {
    let first_move = |seed: u64| {
        let mut env = RandomEnvironment::new(seed);
        let mut player = TdPlayer::new(NTupleNetwork::new(SamplingPlan::rows(), 16), 0.01, Variant::Fibonacci);

        let mut board = Board::default();
        for _ in 0..2 {
            env.take_action(&board).apply(&mut board, Variant::Fibonacci).unwrap();
        }
        (board, player.take_action(&board))
    };

    let (board_a, action_a) = first_move(2584);
    let (board_b, action_b) = first_move(2584);
    assert_eq!(board_a, board_b);
    assert_eq!(action_a, action_b);
    assert!(matches!(action_a, Action::Slide(_)));
}

#[test]
fn test_seeded_episodes_are_reproducible() {
    let run = || {
        let mut env = RandomEnvironment::new(17);
        let mut player = TdPlayer::new(NTupleNetwork::new(SamplingPlan::rows(), 16), 0.01, Variant::Fibonacci);
        let first = play_episode(&mut player, &mut env, Variant::Fibonacci);
        let second = play_episode(&mut player, &mut env, Variant::Fibonacci);
        (first, second, player.network().tables().to_vec())
    };

    let (a1, a2, weights_a) = run();
    let (b1, b2, weights_b) = run();
    assert_eq!(a1, b1);
    assert_eq!(a2, b2);
    assert_eq!(weights_a, weights_b);
}

#[test]
fn test_learning_episode_updates_weights() {
    let mut env = RandomEnvironment::new(5);
    let mut player = TdPlayer::new(NTupleNetwork::new(SamplingPlan::rows(), 16), 0.1, Variant::Fibonacci);

    let summary = play_episode(&mut player, &mut env, Variant::Fibonacci);
    assert!(summary.moves > 1);
    assert!(player.trajectory().is_empty());
    assert!(player.network().tables().iter().any(|t| t.nonzero() > 0));
}

// =============================================================================
// Episode Driver
// =============================================================================

/// Plays the first legal direction and counts its calls.
struct Scripted {
    opened: usize,
    closed: usize,
    calls: usize,
}

impl Agent for Scripted {
    fn name(&self) -> &str {
        "scripted"
    }

    fn open_episode(&mut self) {
        self.opened += 1;
    }

    fn close_episode(&mut self) {
        self.closed += 1;
    }

    fn take_action(&mut self, board: &Board) -> Action {
        self.calls += 1;
        Direction::ALL
            .into_iter()
            .find(|&d| board.after(d, Variant::Classic).is_some())
            .map_or(Action::None, Action::Slide)
    }
}

#[test]
fn test_episode_lifecycle() {
    let mut player = Scripted { opened: 0, closed: 0, calls: 0 };
    let mut env = RandomEnvironment::new(8);

    let summary = play_episode(&mut player, &mut env, Variant::Classic);

    assert_eq!(player.opened, 1);
    assert_eq!(player.closed, 1);
    // Every slide plus the final call that found nothing.
    assert_eq!(player.calls, summary.moves + 1);
    assert!(!summary.board.can_move(Variant::Classic));
    assert_eq!(summary.board.count_empty(), 0);
}

#[test]
fn test_trainer_with_dyn_agents() {
    let mut player: Box<dyn Agent> = Box::new(HeuristicPlayer::new(Variant::Fibonacci));
    let mut env: Box<dyn Agent> = Box::new(RandomEnvironment::new(4));
    let mut trainer = Trainer::new(Variant::Fibonacci, 3);

    let blocks = trainer.run(player.as_mut(), env.as_mut(), 3);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].episodes, 3);
    assert!(blocks[0].mean_score() > 0.0);
    assert!((blocks[0].reach_rate(1) - 1.0).abs() < f64::EPSILON);
}

// =============================================================================
// Training Session
// =============================================================================

#[test]
fn test_train_saves_and_resumes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weights.bin");

    let agent = AgentConfig::default()
        .with_seed(1)
        .with_alpha(0.05)
        .with_load(&path)
        .with_save(&path)
        .init_if_missing();
    let config = TrainConfig::default()
        .with_episodes(4)
        .with_block(2)
        .with_plan(PlanPreset::Rows)
        .with_alphabet(16)
        .with_agent(agent);

    let blocks = train(&config).unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[1].completed, 4);

    let first = NTupleNetwork::open(SamplingPlan::rows(), 16, &path, false).unwrap();
    assert!(first.tables().iter().any(|t| t.nonzero() > 0));

    // A second session starts from the saved weights.
    train(&config).unwrap();
    let second = NTupleNetwork::open(SamplingPlan::rows(), 16, &path, false).unwrap();
    assert_ne!(first.tables(), second.tables());
}

#[test]
fn test_train_reports_failed_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no").join("such").join("weights.bin");

    let config = TrainConfig::default()
        .with_episodes(2)
        .with_block(1)
        .with_plan(PlanPreset::Rows)
        .with_agent(AgentConfig::default().with_seed(1).with_save(&path));

    match train(&config) {
        Err(Error::Persist(PersistError::Io { path: failed, .. })) => assert_eq!(failed, path),
        other => panic!("expected the save to fail, got {other:?}"),
    }
    assert!(!path.exists());
}

#[test]
fn test_train_rejects_invalid_config() {
    let config = TrainConfig::default().with_block(0);
    assert!(matches!(train(&config), Err(Error::Config(_))));

    let config = TrainConfig::default().with_agent(AgentConfig::default().with_alpha(-1.0));
    assert!(matches!(train(&config), Err(Error::Config(_))));
}

#[test]
fn test_train_missing_weights_without_init() {
    let dir = tempfile::tempdir().unwrap();
    let config = TrainConfig::default()
        .with_episodes(1)
        .with_agent(AgentConfig::default().with_load(dir.path().join("absent.bin")));

    match train(&config) {
        Err(Error::Persist(err)) => assert!(err.is_not_found()),
        other => panic!("expected a missing-file error, got {other:?}"),
    }
}
