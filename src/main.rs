mod audio;
mod collision;
mod config;
mod constants;
mod entities;
mod error;
mod game;
mod input;
mod rendering;
mod scene;
mod session;
mod terminal_io;
mod types;

use std::io;
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    terminal::{disable_raw_mode, enable_raw_mode, size},
};
use log::{error, info};

use crate::config::Cli;
use crate::error::{GameError, Result};
use crate::game::Game;
use crate::rendering::{GameGrid, OutputTarget, ScreenBuffer};
use crate::terminal_io::SimulatedInput;

fn main() -> Result<()> {
    let cli = Cli::parse();

    simple_logging::log_to_file(&cli.log_file, cli.log_level).map_err(|source| GameError::Logging {
        path: cli.log_file.clone(),
        source,
    })?;
    info!("Starting Cosmic Courier.");

    let tones = audio::open_tone_generator(cli.mute)?;

    if cli.debug {
        info!("Debug mode enabled. Resolution {}x{}", cli.width, cli.height);
        let stdout_target = OutputTarget::ScreenBuffer(ScreenBuffer::new(cli.width, cli.height));
        let mut game = Game::new(&cli, cli.width, cli.height, stdout_target, Some(SimulatedInput::scripted_demo()), tones);
        game.run()?;
        return Ok(());
    }

    info!("Attempting to enable raw mode.");
    enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
    let result = play_in_terminal(&cli, tones);
    let restored = restore_terminal();
    result?;
    restored?;
    info!("Exiting application.");
    Ok(())
}

fn play_in_terminal(cli: &Cli, tones: Box<dyn audio::ToneGenerator>) -> Result<()> {
    let (width, height) = size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
    info!("Terminal size: {}x{}", width, height);

    let mut stdout_target = OutputTarget::Stdout(io::stdout());
    GameGrid::new(width, height)
        .clear_screen_manual(&mut stdout_target)
        .map_err(|e| { error!("Failed to clear screen: {}", e); e })?;
    stdout_target.execute_other_command(Hide).map_err(|e| { error!("Failed to hide cursor: {}", e); e })?;

    let mut game = Game::new(cli, width, height, stdout_target, None, tones);
    let frames = game.run()?;
    info!("Played {} frames.", frames);

    GameGrid::new(game.terminal_width, game.terminal_height).clear_screen_manual(&mut game.stdout_target)?;
    Ok(())
}

fn restore_terminal() -> Result<()> {
    let mut stdout_target = OutputTarget::Stdout(io::stdout());
    stdout_target.execute_other_command(Show).map_err(|e| { error!("Failed to show cursor on exit: {}", e); e })?;
    disable_raw_mode().map_err(|e| { error!("Failed to disable raw mode on exit: {}", e); e })?;
    Ok(())
}
