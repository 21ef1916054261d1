use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use puct_mcts::{Action, Environment, Evaluator, MCTSConfig, MCTSEngine};

#[derive(Clone, Debug)]
struct BenchAction(usize);

impl Action for BenchAction {
    fn id(&self) -> usize {
        self.0
    }
}

/// A perfect `branching_factor`-ary game tree of fixed `max_depth`, scored
/// 0.75/0.25 for whichever player is to move at the terminal depth. Built
/// to stress the arena and selector, not to resemble a real game.
#[derive(Clone, Debug)]
struct BenchState {
    depth: usize,
    player: usize,
}

struct BenchEnv {
    branching_factor: usize,
    max_depth: usize,
}

impl Environment for BenchEnv {
    type State = BenchState;
    type Action = BenchAction;

    fn initial_state(&self, _seed: u64) -> BenchState {
        BenchState { depth: 0, player: 0 }
    }

    fn step(&self, state: &BenchState, action: &BenchAction) -> (BenchState, Vec<f64>, bool) {
        let next = BenchState { depth: state.depth + 1, player: (state.player + action.0) % 2 };
        let terminated = next.depth >= self.max_depth;
        let reward =
            if terminated { if next.player == 0 { vec![0.75, 0.25] } else { vec![0.25, 0.75] } } else { vec![0.0, 0.0] };
        (next, reward, terminated)
    }

    fn legal_action_mask(&self, state: &BenchState) -> Vec<bool> {
        vec![state.depth < self.max_depth; self.branching_factor]
    }

    fn num_players(&self) -> usize {
        2
    }

    fn action_shape(&self) -> usize {
        self.branching_factor
    }

    fn current_player(&self, state: &BenchState) -> usize {
        state.player
    }

    fn action_from_id(&self, id: usize) -> BenchAction {
        BenchAction(id)
    }
}

/// Uniform policy, constant value: isolates the arena/selector/driver cost
/// from any particular evaluator's cost.
struct UniformEvaluator {
    branching_factor: usize,
}

impl Evaluator<BenchState> for UniformEvaluator {
    fn evaluate(&self, _state: &BenchState) -> (Vec<f32>, f32) {
        (vec![0.0; self.branching_factor], 0.5)
    }
}

fn bench_mcts_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search");
    group.measurement_time(Duration::from_secs(10));

    // Branching factor sweep at a fixed iteration count.
    for &bf in &[2usize, 3, 5] {
        let max_depth = 4;
        let env = BenchEnv { branching_factor: bf, max_depth };
        let evaluator = UniformEvaluator { branching_factor: bf };
        let config = MCTSConfig::default().with_puct_coeff(1.414).with_num_iterations(1000).with_max_nodes(20_000);

        group.bench_with_input(BenchmarkId::new("branching_factor", bf), &bf, |b, &_| {
            b.iter(|| {
                let mut engine = MCTSEngine::new(&env, &evaluator, config.clone()).unwrap();
                engine.reset(0);
                let root = env.initial_state(0);
                black_box(engine.search(root, config.num_iterations).unwrap())
            })
        });
    }

    // Iteration-count sweep at a fixed branching factor.
    for &iter_count in &[100usize, 1000, 5000] {
        let env = BenchEnv { branching_factor: 2, max_depth: 4 };
        let evaluator = UniformEvaluator { branching_factor: 2 };
        let config = MCTSConfig::default().with_puct_coeff(1.414).with_num_iterations(iter_count).with_max_nodes(20_000);

        group.bench_with_input(BenchmarkId::new("iterations", iter_count), &iter_count, |b, &_| {
            b.iter(|| {
                let mut engine = MCTSEngine::new(&env, &evaluator, config.clone()).unwrap();
                engine.reset(0);
                let root = env.initial_state(0);
                black_box(engine.search(root, config.num_iterations).unwrap())
            })
        });
    }

    // Sequential searches across several plies: promoting the committed
    // subtree each move against discarding the tree and starting cold,
    // to measure what reuse actually buys.
    {
        let branching_factor = 5;
        let max_depth = 6;
        let search_iterations = 500;
        let search_count = 5;

        let env = BenchEnv { branching_factor, max_depth };
        let evaluator = UniformEvaluator { branching_factor };
        let config =
            MCTSConfig::default().with_puct_coeff(1.414).with_num_iterations(search_iterations).with_max_nodes(20_000);

        group.bench_function("sequential_searches_with_promotion", |b| {
            b.iter(|| {
                let mut engine = MCTSEngine::new(&env, &evaluator, config.clone()).unwrap();
                engine.reset(0);
                let mut state = env.initial_state(0);

                for _ in 0..search_count {
                    let output = black_box(engine.search(state.clone(), search_iterations).unwrap());
                    let action = env.action_from_id(output.sampled_action);
                    let (next, _reward, terminated) = env.step(&state, &action);
                    engine.commit(output.sampled_action, terminated).unwrap();
                    state = next;
                    if terminated {
                        break;
                    }
                }
            })
        });

        group.bench_function("sequential_searches_cold", |b| {
            b.iter(|| {
                let mut state = env.initial_state(0);

                for _ in 0..search_count {
                    let mut engine = MCTSEngine::new(&env, &evaluator, config.clone()).unwrap();
                    engine.reset(0);
                    let output = black_box(engine.search(state.clone(), search_iterations).unwrap());
                    let action = env.action_from_id(output.sampled_action);
                    let (next, _reward, terminated) = env.step(&state, &action);
                    state = next;
                    if terminated {
                        break;
                    }
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_mcts_search);
criterion_main!(benches);
