//! Event-driven protocol engine with the AI search on a worker thread.

use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use reversi_core::{Game, MatchScore, Outcome, Turn};
use reversi_engine::{Decision, Difficulty, SearchResult, Searcher};

use crate::command::{Command, EngineOption, MoveToken, parse_command};
use crate::error::ProtoError;

/// Configuration knobs adjustable via `setoption`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    /// AI difficulty tier.
    pub level: Difficulty,
    /// Fixed seed for the AI's random source; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl EngineConfig {
    fn searcher(&self) -> Searcher {
        match self.seed {
            Some(seed) => Searcher::with_seed(self.level, seed),
            None => Searcher::new(self.level),
        }
    }
}

/// Internal engine state.
enum EngineState {
    Idle,
    Searching,
}

/// Events processed by the main engine loop.
enum EngineEvent {
    Input(Result<Command, ProtoError>),
    SearchDone(SearchDone),
    InputClosed,
}

/// Payload returned by the search thread when it finishes.
struct SearchDone {
    result: SearchResult,
    searcher: Searcher,
    elapsed: Duration,
}

/// The protocol engine: one game session, the AI and the match tally.
///
/// Runs an event-driven loop on the calling thread, dispatching searches
/// to a worker thread and processing commands concurrently.
pub struct ReversiEngine<W: Write> {
    game: Game,
    searcher: Option<Searcher>,
    state: EngineState,
    config: EngineConfig,
    /// Options received while the searcher was away on the worker thread.
    pending_options: Vec<EngineOption>,
    score: MatchScore,
    /// Result of the current game if it has been added to `score`.
    tallied: Option<Outcome>,
    out: W,
}

impl ReversiEngine<io::Stdout> {
    /// Create an engine answering on stdout.
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for ReversiEngine<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> ReversiEngine<W> {
    /// Create an engine writing its responses to `out`.
    pub fn with_output(out: W) -> Self {
        Self::with_config(EngineConfig::default(), out)
    }

    /// Create an engine with explicit configuration.
    pub fn with_config(config: EngineConfig, out: W) -> Self {
        Self {
            game: Game::new(),
            searcher: Some(config.searcher()),
            state: EngineState::Idle,
            config,
            pending_options: Vec::new(),
            score: MatchScore::default(),
            tallied: None,
            out,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Run the event loop on stdin until `quit` or input closes.
    pub fn run(self) -> Result<W, ProtoError> {
        self.run_with(io::BufReader::new(io::stdin()))
    }

    /// Run the event loop on `input`, returning the output sink when done.
    pub fn run_with<R>(mut self, input: R) -> Result<W, ProtoError>
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<EngineEvent>();

        let input_tx = tx.clone();
        std::thread::spawn(move || {
            for line in input.lines() {
                match line {
                    Ok(line) => {
                        let trimmed = line.trim().to_string();
                        if trimmed.is_empty() {
                            continue;
                        }
                        debug!(cmd = %trimmed, "received command");
                        let cmd = parse_command(&trimmed);
                        if input_tx.send(EngineEvent::Input(cmd)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
            let _ = input_tx.send(EngineEvent::InputClosed);
        });

        for event in &rx {
            let outcome = match event {
                EngineEvent::Input(Ok(Command::Quit)) | EngineEvent::InputClosed => {
                    self.wait_for_search(&rx)?;
                    break;
                }
                EngineEvent::Input(Ok(cmd)) => self.dispatch(cmd, &tx),
                EngineEvent::Input(Err(e)) => Err(e),
                EngineEvent::SearchDone(done) => self.finish_search(done),
            };

            match outcome {
                Ok(()) => {}
                Err(e @ ProtoError::Io { .. }) => return Err(e),
                Err(e) => warn!(error = %e, "command rejected"),
            }
            self.out.flush()?;
        }

        info!("reversi shutting down");
        self.out.flush()?;
        Ok(self.out)
    }

    fn dispatch(&mut self, cmd: Command, tx: &mpsc::Sender<EngineEvent>) -> Result<(), ProtoError> {
        match cmd {
            Command::Reversi => self.handle_reversi(),
            Command::IsReady => self.handle_isready(),
            Command::NewGame => self.handle_newgame(),
            Command::Position(game) => self.handle_position(game),
            Command::SetOption(option) => self.handle_setoption(option),
            Command::Go => self.handle_go(tx),
            Command::Play(token) => self.handle_play(token),
            Command::Moves => self.handle_moves(),
            Command::Undo(n) => self.handle_undo(n),
            Command::Display => self.handle_display(),
            Command::Score => self.handle_score(),
            Command::Quit | Command::Unknown(_) => Ok(()),
        }
    }

    /// Block until a running search reports back, then print its move.
    fn wait_for_search(&mut self, rx: &mpsc::Receiver<EngineEvent>) -> Result<(), ProtoError> {
        if matches!(self.state, EngineState::Idle) {
            return Ok(());
        }
        for event in rx {
            if let EngineEvent::SearchDone(done) = event {
                return self.finish_search(done);
            }
        }
        Ok(())
    }

    /// Refuse commands that would change the position under a running search.
    fn ensure_idle(&self, command: &str) -> bool {
        if matches!(self.state, EngineState::Searching) {
            warn!(command, "search in progress, ignoring");
            return false;
        }
        true
    }

    fn handle_reversi(&mut self) -> Result<(), ProtoError> {
        writeln!(self.out, "id name reversi")?;
        writeln!(
            self.out,
            "option name Level type combo default {} var beginner var intermediate var advanced var expert",
            Difficulty::default()
        )?;
        writeln!(self.out, "option name Seed type string default random")?;
        writeln!(self.out, "reversiok")?;
        Ok(())
    }

    fn handle_isready(&mut self) -> Result<(), ProtoError> {
        writeln!(self.out, "readyok")?;
        Ok(())
    }

    fn handle_newgame(&mut self) -> Result<(), ProtoError> {
        if self.ensure_idle("newgame") {
            self.game = Game::new();
            self.tallied = None;
        }
        Ok(())
    }

    fn handle_position(&mut self, game: Game) -> Result<(), ProtoError> {
        if self.ensure_idle("position") {
            self.game = game;
            self.tallied = None;
        }
        Ok(())
    }

    fn handle_setoption(&mut self, option: EngineOption) -> Result<(), ProtoError> {
        match option {
            EngineOption::Level(level) => self.config.level = level,
            EngineOption::Seed(seed) => self.config.seed = Some(seed),
        }
        match self.searcher.as_mut() {
            Some(searcher) => apply_option(searcher, option),
            None => self.pending_options.push(option),
        }
        debug!(?option, "option set");
        Ok(())
    }

    fn handle_go(&mut self, tx: &mpsc::Sender<EngineEvent>) -> Result<(), ProtoError> {
        if !matches!(self.state, EngineState::Idle) {
            warn!("go received while searching, ignoring");
            return Ok(());
        }

        // The search thread owns the searcher until it reports back.
        let mut searcher = self.searcher.take().unwrap_or_else(|| self.config.searcher());

        let board = *self.game.board();
        let to_move = self.game.to_move();
        let game_over = self.game.is_over();
        let tx = tx.clone();

        std::thread::spawn(move || {
            let start = Instant::now();
            let result = if game_over {
                SearchResult {
                    best_move: None,
                    score: None,
                    nodes: 0,
                    depth: 0,
                    decision: Decision::NoMove,
                }
            } else {
                searcher.select_move(&board, to_move)
            };
            let elapsed = start.elapsed();
            let _ = tx.send(EngineEvent::SearchDone(SearchDone {
                result,
                searcher,
                elapsed,
            }));
        });

        self.state = EngineState::Searching;
        Ok(())
    }

    fn finish_search(&mut self, done: SearchDone) -> Result<(), ProtoError> {
        let mut searcher = done.searcher;
        for option in self.pending_options.drain(..) {
            apply_option(&mut searcher, option);
        }
        self.searcher = Some(searcher);
        self.state = EngineState::Idle;

        let result = &done.result;
        let mut info = format!("info depth {}", result.depth);
        if let Some(score) = result.score {
            info.push_str(&format!(" score {score}"));
        }
        info.push_str(&format!(
            " nodes {} time {}",
            result.nodes,
            done.elapsed.as_millis()
        ));
        writeln!(self.out, "{info}")?;

        match result.best_move {
            Some(mv) => writeln!(self.out, "bestmove {mv}")?,
            None => writeln!(self.out, "bestmove pass")?,
        }
        Ok(())
    }

    fn handle_play(&mut self, token: MoveToken) -> Result<(), ProtoError> {
        if !self.ensure_idle("play") {
            return Ok(());
        }

        let player = self.game.to_move();
        match token {
            MoveToken::Place(sq) => {
                let report = self
                    .game
                    .play(sq)
                    .map_err(|source| ProtoError::IllegalMove {
                        token: token.to_string(),
                        source,
                    })?;
                writeln!(self.out, "played {sq} {player}")?;
                let flipped: Vec<String> = report.flipped.map(|s| s.to_string()).collect();
                writeln!(self.out, "flipped {}", flipped.join(" "))?;
                self.report_turn(report.turn)
            }
            MoveToken::Pass => {
                let turn = token.apply(&mut self.game)?;
                writeln!(self.out, "pass {player}")?;
                self.report_turn(turn)
            }
        }
    }

    fn report_turn(&mut self, turn: Turn) -> Result<(), ProtoError> {
        match turn {
            Turn::Next(player) => writeln!(self.out, "turn {player}")?,
            Turn::Passed { passed, to_move } => {
                writeln!(self.out, "pass {passed}")?;
                writeln!(self.out, "turn {to_move}")?;
            }
            Turn::GameOver(outcome) => {
                self.score.record(outcome);
                self.tallied = Some(outcome);
                let (black, white) = self.game.counts();
                let result = match outcome {
                    Outcome::Winner(player) => player.to_string(),
                    Outcome::Draw => "draw".to_string(),
                };
                info!(result = %result, black, white, "game over");
                writeln!(self.out, "gameover {result} {black} {white}")?;
            }
        }
        Ok(())
    }

    fn handle_moves(&mut self) -> Result<(), ProtoError> {
        let moves = self.game.legal_moves();
        let mut line = String::from("legal");
        for mv in moves.as_slice() {
            line.push_str(&format!(" {mv}"));
        }
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    fn handle_undo(&mut self, n: usize) -> Result<(), ProtoError> {
        if !self.ensure_idle("undo") {
            return Ok(());
        }
        let undone = self
            .game
            .undo_turns(n)
            .map_err(|source| ProtoError::IllegalMove {
                token: "undo".to_string(),
                source,
            })?;
        if !self.game.is_over() {
            if let Some(outcome) = self.tallied.take() {
                self.score.retract(outcome);
            }
        }
        writeln!(self.out, "undone {undone}")?;
        Ok(())
    }

    fn handle_display(&mut self) -> Result<(), ProtoError> {
        let board = *self.game.board();
        writeln!(self.out, "{}", board.pretty())?;
        writeln!(self.out, "board {board} {}", self.game.to_move())?;
        let (black, white) = self.game.counts();
        writeln!(self.out, "black {black} white {white}")?;
        Ok(())
    }

    fn handle_score(&mut self) -> Result<(), ProtoError> {
        let score = self.score;
        writeln!(
            self.out,
            "score black {} white {} draws {}",
            score.black, score.white, score.draws
        )?;
        Ok(())
    }
}

fn apply_option(searcher: &mut Searcher, option: EngineOption) {
    match option {
        EngineOption::Level(level) => searcher.set_difficulty(level),
        EngineOption::Seed(seed) => searcher.reseed(seed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(config: EngineConfig, script: &str) -> String {
        let engine = ReversiEngine::with_config(config, Vec::new());
        let out = engine.run_with(Cursor::new(script.to_string())).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn seeded() -> EngineConfig {
        EngineConfig {
            level: Difficulty::Intermediate,
            seed: Some(7),
        }
    }

    #[test]
    fn handshake() {
        let out = run(seeded(), "reversi\nisready\nquit\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "id name reversi");
        assert!(lines.contains(&"reversiok"));
        assert_eq!(lines.last(), Some(&"readyok"));
    }

    #[test]
    fn play_reports_flips_and_turn() {
        let out = run(seeded(), "play d3\nmoves\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec!["played d3 b", "flipped d4", "turn w", "legal c3 e3 c5"]);
    }

    #[test]
    fn illegal_play_is_ignored() {
        let out = run(seeded(), "play a1\nplay d4\nmoves\n");
        assert_eq!(out.trim(), "legal d3 c4 f5 e6");
    }

    #[test]
    fn undo_reports_count() {
        let out = run(seeded(), "play d3\nplay c3\nundo 5\nundo\nmoves\n");
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines.contains(&"undone 2"));
        assert_eq!(lines.last(), Some(&"legal d3 c4 f5 e6"));
    }

    #[test]
    fn game_over_updates_score() {
        let board = format!("XO{}", "-".repeat(62));
        let script = format!("position board {board} b\nplay c1\nscore\nnewgame\nmoves\n");
        let out = run(seeded(), &script);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines.contains(&"gameover b 3 0"));
        assert!(lines.contains(&"score black 1 white 0 draws 0"));
        assert_eq!(lines.last(), Some(&"legal d3 c4 f5 e6"));
    }

    #[test]
    fn undo_after_game_over_keeps_one_result() {
        let board = format!("XO{}", "-".repeat(62));
        let script = format!(
            "position board {board} b\nplay c1\nundo\nplay c1\nundo\nplay c1\nscore\n"
        );
        let out = run(seeded(), &script);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.iter().filter(|l| **l == "gameover b 3 0").count(), 3);
        assert_eq!(lines.last(), Some(&"score black 1 white 0 draws 0"));
    }

    #[test]
    fn undo_of_unfinished_game_leaves_tally() {
        let board = format!("XO{}", "-".repeat(62));
        let script =
            format!("position board {board} b\nplay c1\nnewgame\nplay d3\nundo\nscore\n");
        let out = run(seeded(), &script);
        assert!(out.ends_with("score black 1 white 0 draws 0\n"), "{out}");
    }

    #[test]
    fn auto_pass_is_reported() {
        let board = format!("XO-O{}", "-".repeat(60));
        let script = format!("position board {board} b\nplay c1\n");
        let out = run(seeded(), &script);
        assert!(out.contains("pass w\nturn b\n"), "{out}");
    }

    #[test]
    fn go_prints_info_and_bestmove() {
        let out = run(seeded(), "go\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2, "{out}");
        assert!(lines[0].starts_with("info depth 3 score "));
        let mv = lines[1].strip_prefix("bestmove ").unwrap();
        assert!(["d3", "c4", "f5", "e6"].contains(&mv));
    }

    #[test]
    fn go_without_moves_passes() {
        let board = format!("XO{}", "-".repeat(62));
        let out = run(seeded(), &format!("position board {board} w\ngo\n"));
        assert!(out.ends_with("bestmove pass\n"), "{out}");
    }

    #[test]
    fn go_takes_a_corner_immediately() {
        let board = format!("-OX{}", "-".repeat(61));
        let out = run(seeded(), &format!("position board {board} b\ngo\nquit\n"));
        assert!(out.starts_with("info depth 0 nodes 0 time "), "{out}");
        assert!(out.ends_with("bestmove a1\n"), "{out}");
    }

    #[test]
    fn setoption_updates_config() {
        let mut engine = ReversiEngine::with_config(seeded(), Vec::new());
        engine
            .handle_setoption(EngineOption::Level(Difficulty::Expert))
            .unwrap();
        engine.handle_setoption(EngineOption::Seed(3)).unwrap();
        assert_eq!(
            engine.config(),
            EngineConfig {
                level: Difficulty::Expert,
                seed: Some(3),
            }
        );
    }

    #[test]
    fn display_shows_board_and_counts() {
        let out = run(seeded(), "d\n");
        assert!(out.contains("4  . . . O X . . ."));
        assert!(out.contains(&format!("board {} b", reversi_core::STARTING_POSITION)));
        assert!(out.contains("black 2 white 2"));
    }
}
