use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Logical playfield size. Everything in the simulation is measured in
/// these units, independent of the terminal size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(320.0, 240.0)
    }
}

/// Settings the simulation needs at session start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub viewport: Viewport,
    pub star_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            star_count: 30,
        }
    }
}

/// Command line for the terminal build.
#[derive(Debug, Clone, Parser)]
#[command(name = "starstrike", version, about = "Side-scrolling space shooter for the terminal")]
pub struct Cli {
    /// Logical playfield width
    #[arg(long, default_value_t = 320, value_parser = clap::value_parser!(u16).range(64..=4096))]
    pub width: u16,

    /// Logical playfield height
    #[arg(long, default_value_t = 240, value_parser = clap::value_parser!(u16).range(48..=4096))]
    pub height: u16,

    /// Target frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u16).range(1..=240))]
    pub fps: u16,

    /// Number of background stars
    #[arg(long, default_value_t = 30)]
    pub stars: usize,

    /// Where tracing output goes (the terminal itself is taken by the game)
    #[arg(long, default_value = "debug.log")]
    pub log_file: PathBuf,
}

impl Cli {
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            viewport: Viewport::new(f32::from(self.width), f32::from(self.height)),
            star_count: self.stars,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / u32::from(self.fps)
    }
}
