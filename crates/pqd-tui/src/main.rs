//! Terminal UI for walking an operating point around the four-quadrant
//! power plane: drag or steer the apparent-power phasor and watch P, Q,
//! power factor, and the phase waveforms respond.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

mod app;
mod config;
mod ui;

use app::App;
use config::TuiConfig;

#[derive(Debug, Parser)]
#[command(name = "pqd-tui", version, about = "Four-quadrant power explorer")]
struct Cli {
    /// TOML config path; defaults to the platform config dir.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // Resolve the config before touching the terminal so errors print
    // normally.
    let config = TuiConfig::load(cli.config.as_deref())?;
    let tick_rate = Duration::from_millis(config.tick_ms);
    let mut app = App::new(&config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, tick_rate);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<()> {
    'outer: loop {
        terminal.draw(|f| ui::draw_ui(f, app))?;

        // Poll with the tick as timeout; a timeout just redraws, which
        // keeps the header clock moving.
        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break 'outer,
                    KeyCode::Left => app.step_angle(-1.0, false),
                    KeyCode::Right => app.step_angle(1.0, false),
                    KeyCode::Char('h') => app.step_angle(-1.0, true),
                    KeyCode::Char('l') => app.step_angle(1.0, true),
                    KeyCode::Up => app.step_magnitude(1.0),
                    KeyCode::Down => app.step_magnitude(-1.0),
                    KeyCode::Char('c') => app.toggle_convention(),
                    KeyCode::Char('p') => app.cycle_preset(true),
                    KeyCode::Char('P') => app.cycle_preset(false),
                    KeyCode::Char('r') => app.reset(),
                    _ => {}
                },
                Event::Mouse(mouse) => app.on_mouse(mouse),
                _ => {}
            }
        }
    }
    Ok(())
}
