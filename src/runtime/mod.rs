use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::info;

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::bridge::EventBridge;
use crate::config::PlayerMode;
use crate::logging;

mod event_loop;
mod input;
mod settings;

#[derive(Parser, Debug)]
#[command(name = "needle")]
#[command(version, about = "A terminal audio player: a shuffled folder playlist or a single track")]
pub struct Args {
    /// Folder (playlist mode) or file (single mode) to open at startup
    pub path: Option<PathBuf>,

    /// Player variant, overriding `playback.mode` from the config
    #[arg(long, value_enum)]
    pub mode: Option<PlayerMode>,

    /// Config file to use instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut settings = settings::load_settings(args.config.as_deref())?;
    if let Some(mode) = args.mode {
        settings.playback.mode = mode;
    }

    if args.print_config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    let _log_guard = match logging::init(&settings.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("needle: logging disabled: {e}");
            None
        }
    };
    info!(mode = ?settings.playback.mode, "starting");

    let (audio_player, events) = AudioPlayer::new(&settings.audio, &settings.ui);
    let mut bridge = EventBridge::new(events);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let size = terminal.size()?;
        let mut app = App::new(&settings, Rect::new(0, 0, size.width, size.height));

        if let Some(path) = args.path.clone() {
            event_loop::open_path(&mut app, &audio_player, &settings, path);
        }

        event_loop::run(&mut terminal, &settings, &mut app, &audio_player, &mut bridge)
    })();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
    info!("bye");

    run_result
}
