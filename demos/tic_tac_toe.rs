//! Tic-Tac-Toe demo for the MCTS engine
//!
//! Demonstrates implementing [`Environment`] and [`Evaluator`] and driving
//! [`MCTSEngine`] through a human-vs-AI game loop.

use std::fmt;
use std::io::{self, Write};

use puct_mcts::{Action, Environment, Evaluator, MCTSConfig, MCTSEngine};

fn main() {
    env_logger::init();

    println!("MCTS Tic-Tac-Toe Demo");
    println!("=====================");
    println!();

    let env = TicTacToe;
    let evaluator = HeuristicEvaluator;
    let config = MCTSConfig::default().with_puct_coeff(1.414).with_num_iterations(4_000);

    let mut engine = MCTSEngine::new(&env, &evaluator, config).expect("valid configuration");
    engine.reset(0);

    let mut state = env.initial_state(0);

    while !env.legal_action_mask(&state).iter().all(|&l| !l) && winner(&state).is_none() {
        println!("{state}");

        if env.current_player(&state) == 0 {
            println!("Your move (enter row column, e.g. '1 2'): ");
            io::stdout().flush().unwrap();

            let mut input = String::new();
            io::stdin().read_line(&mut input).unwrap();
            let coords: Vec<usize> = input.trim().split_whitespace().filter_map(|s| s.parse().ok()).collect();

            if coords.len() != 2 || coords[0] > 2 || coords[1] > 2 {
                println!("Invalid move! Enter row and column (0-2).");
                continue;
            }

            let index = coords[0] * 3 + coords[1];
            if state.board[index].is_some() {
                println!("Illegal move! Try again.");
                continue;
            }

            let mv = Move(index);
            let (next, _, _) = env.step(&state, &mv);
            state = next;
        } else {
            println!("AI is thinking...");
            let output = engine.search(state.clone(), 4_000).unwrap();
            println!("AI chooses: {}", output.sampled_action);

            let mv = env.action_from_id(output.sampled_action);
            let (next, _, terminated) = env.step(&state, &mv);
            engine.commit(output.sampled_action, terminated).unwrap();
            state = next;
        }
    }

    println!("{state}");
    match winner(&state) {
        Some(Player::X) => println!("X wins!"),
        Some(Player::O) => println!("O wins!"),
        None => println!("The game is a draw!"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Player {
    X,
    O,
}

#[derive(Debug, Clone, Copy)]
struct Move(usize);

impl Action for Move {
    fn id(&self) -> usize {
        self.0
    }
}

/// Board state: `None` = empty, `Some(Player)` = occupied.
#[derive(Clone)]
struct State {
    board: [Option<Player>; 9],
    current_player: Player,
    moves_played: usize,
}

fn winner(state: &State) -> Option<Player> {
    const LINES: [[usize; 3]; 8] = [
        [0, 1, 2], [3, 4, 5], [6, 7, 8],
        [0, 3, 6], [1, 4, 7], [2, 5, 8],
        [0, 4, 8], [2, 4, 6],
    ];
    for line in LINES {
        let [a, b, c] = line;
        if state.board[a].is_some() && state.board[a] == state.board[b] && state.board[a] == state.board[c] {
            return state.board[a];
        }
    }
    None
}

struct TicTacToe;

impl Environment for TicTacToe {
    type State = State;
    type Action = Move;

    fn initial_state(&self, _seed: u64) -> State {
        State { board: [None; 9], current_player: Player::X, moves_played: 0 }
    }

    fn step(&self, state: &State, action: &Move) -> (State, Vec<f64>, bool) {
        let mut next = state.clone();
        next.board[action.0] = Some(state.current_player);
        next.moves_played += 1;
        next.current_player = match state.current_player {
            Player::X => Player::O,
            Player::O => Player::X,
        };

        let terminated = winner(&next).is_some() || next.moves_played == 9;
        let reward = match winner(&next) {
            Some(Player::X) => vec![1.0, -1.0],
            Some(Player::O) => vec![-1.0, 1.0],
            None => vec![0.0, 0.0],
        };

        (next, reward, terminated)
    }

    fn legal_action_mask(&self, state: &State) -> Vec<bool> {
        if winner(state).is_some() {
            return vec![false; 9];
        }
        state.board.iter().map(|cell| cell.is_none()).collect()
    }

    fn num_players(&self) -> usize {
        2
    }

    fn action_shape(&self) -> usize {
        9
    }

    fn current_player(&self, state: &State) -> usize {
        match state.current_player {
            Player::X => 0,
            Player::O => 1,
        }
    }

    fn action_from_id(&self, id: usize) -> Move {
        Move(id)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  0 1 2")?;
        for row in 0..3 {
            write!(f, "{row} ")?;
            for col in 0..3 {
                let symbol = match self.board[row * 3 + col] {
                    Some(Player::X) => "X",
                    Some(Player::O) => "O",
                    None => ".",
                };
                write!(f, "{symbol} ")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "\nPlayer {:?}'s turn", self.current_player)
    }
}

/// A uniform-prior evaluator whose value head counts two-in-a-rows with an
/// open third cell, from the perspective of the player to move. Good
/// enough to give PUCT a useful signal without a trained network.
struct HeuristicEvaluator;

impl Evaluator<State> for HeuristicEvaluator {
    fn evaluate(&self, state: &State) -> (Vec<f32>, f32) {
        const LINES: [[usize; 3]; 8] = [
            [0, 1, 2], [3, 4, 5], [6, 7, 8],
            [0, 3, 6], [1, 4, 7], [2, 5, 8],
            [0, 4, 8], [2, 4, 6],
        ];

        let mover = state.current_player;
        let opponent = match mover {
            Player::X => Player::O,
            Player::O => Player::X,
        };

        let mut score = 0.0f32;
        for line in LINES {
            let cells: Vec<Option<Player>> = line.iter().map(|&i| state.board[i]).collect();
            let mine = cells.iter().filter(|&&c| c == Some(mover)).count();
            let theirs = cells.iter().filter(|&&c| c == Some(opponent)).count();
            if theirs == 0 {
                score += mine as f32 * 0.2;
            }
            if mine == 0 {
                score -= theirs as f32 * 0.2;
            }
        }

        (vec![0.0; 9], score.clamp(-1.0, 1.0))
    }
}
