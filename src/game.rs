use std::io::{self, Write};
use std::time::{Duration, Instant};
use crossterm::event::{self, Event};
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::audio::{Tone, ToneGenerator};
use crate::config::Cli;
use crate::entities::Starfield;
use crate::input::{InputCommand, apply_input};
use crate::rendering::{GameGrid, OutputTarget};
use crate::scene::draw_scene;
use crate::session::{GameEvent, Session};
use crate::terminal_io::SimulatedInput;
use crate::types::Canvas;

pub struct Game {
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub stdout_target: OutputTarget,
    canvas: Canvas,
    simulated_input: Option<SimulatedInput>,
    debug_mode_active: bool,
    max_frames: Option<u64>,
    frame_interval: Duration,
    tones: Box<dyn ToneGenerator>,
    rng: StdRng,
    starfield: Starfield,
}

impl Game {
    pub fn new(
        cli: &Cli,
        terminal_width: u16,
        terminal_height: u16,
        stdout_target: OutputTarget,
        simulated_input: Option<SimulatedInput>,
        tones: Box<dyn ToneGenerator>,
    ) -> Self {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let canvas = Canvas::from_cells(terminal_width, terminal_height);
        let starfield = Starfield::new(&mut rng, canvas);

        Game {
            terminal_width,
            terminal_height,
            stdout_target,
            canvas,
            simulated_input,
            debug_mode_active: cli.debug,
            max_frames: cli.max_frames,
            frame_interval: cli.frame_interval(),
            tones,
            rng,
            starfield,
        }
    }

    /// Runs frames until quit or the frame limit. Returns the number of frames run.
    pub fn run(&mut self) -> io::Result<u64> {
        let mut session = Session::new(&mut self.rng, self.canvas);
        let mut game_grid = GameGrid::new(self.terminal_width, self.terminal_height);
        let mut running = true;
        let mut frame_count: u64 = 0;
        let started = Instant::now();
        let mut next_frame_at = started;

        info!("Canvas is {}x{} px", self.canvas.width, self.canvas.height);

        while running && self.max_frames.is_none_or(|max| frame_count < max) {
            next_frame_at += self.frame_interval;
            let now = Instant::now();
            if next_frame_at < now {
                next_frame_at = now; // Fell behind; don't try to catch up
            }

            for event in self.collect_input(frame_count, next_frame_at)? {
                match event {
                    Event::Key(key_event) => match InputCommand::from_key_event(&key_event) {
                        Some(InputCommand::Quit) => {
                            info!("Quit requested at frame {}.", frame_count);
                            running = false;
                        }
                        Some(command) => {
                            let (next, events) = apply_input(session, command, self.canvas, &mut self.rng);
                            session = next;
                            self.announce(&session, &events);
                        }
                        None => {}
                    },
                    Event::Resize(new_width, new_height) => {
                        self.resize(new_width, new_height)?;
                        session = session.fit_to(self.canvas, &mut self.rng);
                        game_grid = GameGrid::new(self.terminal_width, self.terminal_height);
                    }
                    _ => {}
                }
            }
            if !running {
                break;
            }

            let (next, events) = session.step(self.canvas, &mut self.rng);
            session = next;
            self.announce(&session, &events);

            let now_ms = if self.debug_mode_active {
                frame_count as f64 * self.frame_interval.as_secs_f64() * 1000.0
            } else {
                started.elapsed().as_secs_f64() * 1000.0
            };
            draw_scene(&mut game_grid, &self.starfield, &session, now_ms);
            self.render(&game_grid, frame_count)?;

            frame_count += 1;
        }

        info!("Game loop ended after {} frames.", frame_count);
        Ok(frame_count)
    }

    /// Events that arrived before `deadline`. Headless runs take the script for this frame.
    fn collect_input(&mut self, frame_count: u64, deadline: Instant) -> io::Result<Vec<Event>> {
        if let Some(sim_input) = &mut self.simulated_input {
            return sim_input.take(frame_count);
        }

        let mut events = Vec::new();
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
                break;
            }
            events.push(event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?);
            if Instant::now() >= deadline {
                break;
            }
        }
        Ok(events)
    }

    fn resize(&mut self, new_width: u16, new_height: u16) -> io::Result<()> {
        self.terminal_width = new_width;
        self.terminal_height = new_height;
        self.canvas = Canvas::from_cells(new_width, new_height);
        info!("Terminal resized to {}x{} ({}x{} px)", new_width, new_height, self.canvas.width, self.canvas.height);

        if let OutputTarget::ScreenBuffer(sb) = &mut self.stdout_target {
            sb.resize(new_width, new_height);
        } else {
            GameGrid::new(new_width, new_height)
                .clear_screen_manual(&mut self.stdout_target)
                .map_err(|e| { error!("Failed to clear screen after resize: {}", e); e })?;
        }
        Ok(())
    }

    fn announce(&self, session: &Session, events: &[GameEvent]) {
        for &event in events {
            match event {
                GameEvent::Started => info!("Run started."),
                GameEvent::Crashed => info!("Ship crashed. Score: {}, level: {}", session.score, session.level),
                GameEvent::FuelExhausted => info!("Out of fuel. Score: {}, level: {}", session.score, session.level),
                GameEvent::FuelCollected => info!("Fuel collected. Fuel: {:.1}", session.fuel),
                GameEvent::PackageDelivered => info!("Package delivered. Score: {}", session.score),
                GameEvent::LevelUp { level } => info!("Level up: {} ({} asteroids)", level, session.asteroids.len()),
            }
            if let Some(tone) = Tone::for_event(event) {
                self.tones.play(tone);
            }
        }
    }

    fn render(&mut self, game_grid: &GameGrid, frame_count: u64) -> io::Result<()> {
        game_grid.render(&mut self.stdout_target).map_err(|e| { error!("Failed to render game grid: {}", e); e })?;
        self.stdout_target.flush().map_err(|e| { error!("Failed to flush stdout after rendering: {}", e); e })?;

        if self.debug_mode_active {
            if let OutputTarget::ScreenBuffer(sb) = &self.stdout_target {
                sb.print_to_log(frame_count);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::MutedTones;
    use crate::rendering::ScreenBuffer;
    use clap::Parser;
    use crossterm::event::{KeyCode, KeyEvent};
    use std::collections::HashMap;

    fn headless(args: &[&str], script: HashMap<u64, Vec<Event>>) -> Game {
        let mut argv = vec!["cosmic-courier", "--debug", "--mute", "--seed", "99"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        Game::new(
            &cli,
            cli.width,
            cli.height,
            OutputTarget::ScreenBuffer(ScreenBuffer::new(cli.width, cli.height)),
            Some(SimulatedInput::new(script)),
            Box::new(MutedTones),
        )
    }

    fn screen(game: &Game) -> Vec<String> {
        match &game.stdout_target {
            OutputTarget::ScreenBuffer(sb) => sb.lines(),
            OutputTarget::Stdout(_) => unreachable!(),
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    #[test]
    fn shows_start_screen_until_space() {
        let mut game = headless(&["--max-frames", "3"], HashMap::new());
        assert_eq!(game.run().unwrap(), 3);
        assert_eq!(&screen(&game)[9][25..39], "Cosmic Courier");
    }

    #[test]
    fn space_starts_a_run() {
        let script = HashMap::from([(1, vec![key(KeyCode::Char(' '))])]);
        let mut game = headless(&["--max-frames", "2"], script);
        game.run().unwrap();
        let lines = screen(&game);
        assert!(!lines[9].contains("Cosmic Courier"));
        assert!(lines.iter().any(|l| l.contains('A')));
    }

    #[test]
    fn quit_key_stops_the_loop() {
        let script = HashMap::from([(4, vec![key(KeyCode::Char('q'))])]);
        let mut game = headless(&[], script);
        assert_eq!(game.run().unwrap(), 4);
    }

    #[test]
    fn resize_rebuilds_canvas_and_screen() {
        let script = HashMap::from([(1, vec![Event::Resize(100, 40)])]);
        let mut game = headless(&["--max-frames", "2"], script);
        game.run().unwrap();
        assert_eq!(game.canvas, Canvas::new(1000.0, 800.0));
        let lines = screen(&game);
        assert_eq!(lines.len(), 40);
        assert_eq!(lines[0].chars().count(), 100);
    }

    #[test]
    fn demo_script_runs_to_its_quit() {
        let cli = Cli::try_parse_from(["cosmic-courier", "--debug", "--mute", "--seed", "1"]).unwrap();
        let mut game = Game::new(
            &cli,
            cli.width,
            cli.height,
            OutputTarget::ScreenBuffer(ScreenBuffer::new(cli.width, cli.height)),
            Some(SimulatedInput::scripted_demo()),
            Box::new(MutedTones),
        );
        assert_eq!(game.run().unwrap(), 240);
    }
}
