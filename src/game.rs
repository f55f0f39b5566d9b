//! Frame driver around the simulation
//!
//! Input handlers never touch `GameState`. They send `Command`s through a
//! `CommandSender`; the driver drains the queue at the top of each frame, on
//! the same context that runs `tick`, so the state has exactly one writer.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::renderer::{RenderSink, Scene};
use crate::sim::{self, GameEvent, GameState, TickOutcome, WorldParams};

/// Input messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start or restart a run
    Start,
    /// Flap
    Impulse,
}

/// Cloneable handle for input sources
#[derive(Debug, Clone)]
pub struct CommandSender(Sender<Command>);

impl CommandSender {
    pub fn send(&self, command: Command) {
        if self.0.send(command).is_err() {
            log::debug!("Dropped {:?}: game is gone", command);
        }
    }

    pub fn start(&self) {
        self.send(Command::Start);
    }

    pub fn impulse(&self) {
        self.send(Command::Impulse);
    }
}

/// Receives the final score once per run
pub trait GameOverSink {
    fn on_game_over(&mut self, final_score: u64);
}

impl<F: FnMut(u64)> GameOverSink for F {
    fn on_game_over(&mut self, final_score: u64) {
        self(final_score)
    }
}

/// Result of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Nothing to do until a start command arrives
    Idle,
    /// Request another frame
    Continue,
    /// The run just ended; stop requesting frames
    GameOver { final_score: u64 },
}

impl FrameOutcome {
    pub fn wants_next_frame(&self) -> bool {
        matches!(self, FrameOutcome::Continue)
    }
}

/// Game instance: state plus its command queue
pub struct Game {
    pub state: GameState,
    /// Idle/demo mode - the autopilot flaps
    pub autopilot: bool,
    commands: Receiver<Command>,
    sender: Sender<Command>,
}

impl Game {
    pub fn new(seed: u64, params: WorldParams) -> Self {
        let (sender, commands) = mpsc::channel();
        Self {
            state: GameState::new(seed, params),
            autopilot: false,
            commands,
            sender,
        }
    }

    pub fn command_sender(&self) -> CommandSender {
        CommandSender(self.sender.clone())
    }

    /// Apply every queued command in arrival order. Returns true if a run started.
    fn drain_commands(&mut self) -> bool {
        let mut started = false;
        while let Ok(command) = self.commands.try_recv() {
            match command {
                Command::Start => started |= sim::start(&mut self.state),
                Command::Impulse => {
                    sim::handle_impulse(&mut self.state);
                }
            }
        }
        started
    }

    /// Run one frame: drain input, tick once, draw, report game over.
    ///
    /// A frame that starts a run only draws the fresh run; its first tick
    /// happens on the next frame.
    pub fn frame(
        &mut self,
        renderer: &mut dyn RenderSink,
        game_over: &mut dyn GameOverSink,
    ) -> FrameOutcome {
        if self.drain_commands() {
            self.state.events.clear();
            renderer.draw(&Scene::from_state(&self.state));
            return FrameOutcome::Continue;
        }

        if self.autopilot && sim::wants_impulse(&self.state) {
            sim::handle_impulse(&mut self.state);
        }

        let outcome = sim::tick(&mut self.state);
        if outcome == TickOutcome::Idle {
            return FrameOutcome::Idle;
        }

        renderer.draw(&Scene::from_state(&self.state));

        for event in self.state.drain_events() {
            if let GameEvent::GameOver { final_score } = event {
                game_over.on_game_over(final_score);
            }
        }

        match outcome {
            TickOutcome::Ended { final_score } => FrameOutcome::GameOver { final_score },
            _ => FrameOutcome::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::NullRenderer;
    use crate::sim::{GamePhase, ObstaclePair};

    #[derive(Default)]
    struct Recorder {
        frames: Vec<Scene>,
    }

    impl RenderSink for Recorder {
        fn draw(&mut self, scene: &Scene) {
            self.frames.push(scene.clone());
        }
    }

    fn game() -> Game {
        Game::new(2024, WorldParams::default())
    }

    #[test]
    fn test_idle_until_started() {
        let mut game = game();
        let mut recorder = Recorder::default();
        let mut overs = Vec::new();

        let sender = game.command_sender();
        sender.impulse();

        let outcome = game.frame(&mut recorder, &mut |s: u64| overs.push(s));
        assert_eq!(outcome, FrameOutcome::Idle);
        assert!(!outcome.wants_next_frame());
        assert!(recorder.frames.is_empty());
        assert_eq!(game.state.phase, GamePhase::Ready);
        assert_eq!(game.state.actor.velocity, 0.0);
    }

    #[test]
    fn test_start_frame_draws_then_ticks() {
        let mut game = game();
        let mut recorder = Recorder::default();
        let mut overs = Vec::new();

        game.command_sender().start();
        let outcome = game.frame(&mut recorder, &mut |s: u64| overs.push(s));
        assert_eq!(outcome, FrameOutcome::Continue);
        assert_eq!(recorder.frames.len(), 1);
        assert_eq!(recorder.frames[0].obstacles.len(), 2);
        assert_eq!(game.state.score, 0);

        let outcome = game.frame(&mut recorder, &mut |s: u64| overs.push(s));
        assert!(outcome.wants_next_frame());
        assert_eq!(recorder.frames.len(), 2);
        assert_eq!(recorder.frames[1].score.text, "Score: 1");
        assert!(overs.is_empty());
    }

    #[test]
    fn test_impulse_and_start_in_same_frame() {
        let mut game = game();
        let sender = game.command_sender();
        sender.start();
        sender.impulse();
        sender.impulse();

        game.frame(&mut NullRenderer, &mut |_: u64| {});
        assert_eq!(game.state.actor.velocity, crate::consts::IMPULSE_STRENGTH);
    }

    #[test]
    fn test_game_over_fires_once() {
        let mut game = game();
        let mut recorder = Recorder::default();
        let mut overs = Vec::new();

        game.command_sender().start();
        game.frame(&mut recorder, &mut |s: u64| overs.push(s));
        for _ in 0..5 {
            game.frame(&mut recorder, &mut |s: u64| overs.push(s));
        }
        assert_eq!(game.state.score, 5);

        // Drop a wall onto the actor
        let params = game.state.params;
        let mut wall = ObstaclePair::with_gap(500, game.state.actor.pos.x - 40.0, 0.0, &params);
        wall.gap_top = params.world_height;
        wall.gap_bottom = params.world_height;
        game.state.obstacles.insert(0, wall);

        let outcome = game.frame(&mut recorder, &mut |s: u64| overs.push(s));
        assert_eq!(outcome, FrameOutcome::GameOver { final_score: 5 });
        assert!(!outcome.wants_next_frame());
        assert_eq!(overs, vec![5]);

        // Further frames are idle and never re-fire
        for _ in 0..3 {
            let outcome = game.frame(&mut recorder, &mut |s: u64| overs.push(s));
            assert_eq!(outcome, FrameOutcome::Idle);
        }
        assert_eq!(overs, vec![5]);
        assert_eq!(game.state.score, 5);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut game = game();
        let sender = game.command_sender();
        let mut overs = Vec::new();

        sender.start();
        game.frame(&mut NullRenderer, &mut |s: u64| overs.push(s));
        game.state.phase = GamePhase::Ended;

        sender.start();
        let outcome = game.frame(&mut NullRenderer, &mut |s: u64| overs.push(s));
        assert_eq!(outcome, FrameOutcome::Continue);
        assert_eq!(game.state.phase, GamePhase::Running);
        assert_eq!(game.state.run_index, 2);
        assert_eq!(game.state.score, 0);
    }

    #[test]
    fn test_sender_from_another_thread() {
        let mut game = game();
        let sender = game.command_sender();
        std::thread::spawn(move || {
            sender.start();
            sender.impulse();
        })
        .join()
        .unwrap();

        game.frame(&mut NullRenderer, &mut |_: u64| {});
        assert_eq!(game.state.phase, GamePhase::Running);
        assert_eq!(game.state.actor.velocity, crate::consts::IMPULSE_STRENGTH);
    }

    #[test]
    fn test_autopilot_flaps() {
        let mut game = game();
        game.autopilot = true;
        game.command_sender().start();
        game.frame(&mut NullRenderer, &mut |_: u64| {});

        let mut flapped = false;
        for _ in 0..120 {
            game.state.obstacles.clear();
            game.frame(&mut NullRenderer, &mut |_: u64| {});
            flapped |= game.state.actor.velocity < 0.0;
        }
        assert!(flapped);
        assert_eq!(game.state.phase, GamePhase::Running);
    }
}
