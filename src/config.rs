use std::time::Duration;

use clap::Parser;
use log::LevelFilter;

use crate::constants::{DEFAULT_DEBUG_HEIGHT, DEFAULT_DEBUG_WIDTH, DEFAULT_FPS};

#[derive(Parser, Debug, Clone)]
#[command(name = "cosmic-courier")]
#[command(about = "Pilot a courier ship: deliver packages, grab fuel, dodge asteroids")]
pub struct Cli {
    /// Run headless with scripted input, logging every frame
    #[arg(long)]
    pub debug: bool,

    /// Headless screen width in cells
    #[arg(long, default_value_t = DEFAULT_DEBUG_WIDTH)]
    pub width: u16,

    /// Headless screen height in cells
    #[arg(long, default_value_t = DEFAULT_DEBUG_HEIGHT)]
    pub height: u16,

    /// Stop after this many frames
    #[arg(long)]
    pub max_frames: Option<u64>,

    /// Seed for asteroid, star and pickup placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Nominal frame rate; fuel decay is per frame
    #[arg(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Do not open an audio device
    #[arg(long)]
    pub mute: bool,

    /// Log file path
    #[arg(long, default_value = "cosmic-courier.log")]
    pub log_file: String,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", value_parser = parse_level_filter)]
    pub log_level: LevelFilter,
}

fn parse_level_filter(value: &str) -> Result<LevelFilter, String> {
    value
        .parse()
        .map_err(|_| format!("unknown log level `{value}`"))
}

impl Cli {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["cosmic-courier"]).unwrap();
        assert!(!cli.debug);
        assert_eq!(cli.width, 80);
        assert_eq!(cli.height, 30);
        assert_eq!(cli.max_frames, None);
        assert_eq!(cli.fps, 60);
        assert_eq!(cli.log_file, "cosmic-courier.log");
        assert_eq!(cli.log_level, LevelFilter::Info);
        assert_eq!(cli.frame_interval(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn headless_flags() {
        let cli = Cli::try_parse_from([
            "cosmic-courier", "--debug", "--width", "100", "--height", "40", "--max-frames", "300",
            "--seed", "42", "--log-level", "debug", "--mute",
        ])
        .unwrap();
        assert!(cli.debug && cli.mute);
        assert_eq!((cli.width, cli.height), (100, 40));
        assert_eq!(cli.max_frames, Some(300));
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.log_level, LevelFilter::Debug);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Cli::try_parse_from(["cosmic-courier", "--fps", "0"]).is_err());
        assert!(Cli::try_parse_from(["cosmic-courier", "--log-level", "loud"]).is_err());
    }
}
