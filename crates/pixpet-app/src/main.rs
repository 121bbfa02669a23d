mod app;
mod cli;

use std::io::{self, Stdout};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use pixpet_config::PetConfig;
use pixpet_core::{
    event::Event,
    logging::{self, LogBuffer},
};

use crate::app::{App, Step};
use crate::cli::Cli;

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let terminal = enter_screen();
    if terminal.is_err() {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
    terminal
}

fn enter_screen() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("failed to initialise terminal")
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let log_buffer = logging::init(cli.verbose());
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "pixpet starting up");

    match start(&cli, log_buffer) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "pixpet stopped");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn start(cli: &Cli, log_buffer: LogBuffer) -> Result<()> {
    let config = PetConfig::load(cli.config.as_deref())?;
    let mut app = App::new(cli, &config, log_buffer, Instant::now());

    let mut terminal = setup_terminal()?;
    let res = run(&mut terminal, &mut app);
    let restored = restore_terminal(terminal).context("failed to restore terminal");
    finish(res, restored)
}

/// The loop's own error wins over a failed terminal restore.
fn finish(res: Result<()>, restored: Result<()>) -> Result<()> {
    match (res, restored) {
        (Err(err), Err(restore_err)) => {
            tracing::warn!(error = %format!("{restore_err:#}"), "terminal restore failed");
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(()), restored) => restored,
    }
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let tick = app.tick_interval();
    let mut next_tick = Instant::now();

    loop {
        // ── Poll → Publish ──
        while event::poll(Duration::ZERO)? {
            app.handle_input(event::read()?);
        }

        let now = Instant::now();
        if now >= next_tick {
            app.bus.publish(Event::Tick { now });
            next_tick += tick;
            if next_tick < now {
                next_tick = now + tick;
            }
        }

        // ── Drain → Render ──
        match app.drain_events() {
            Step::Quit => {
                tracing::info!("quit requested");
                return Ok(());
            }
            Step::Redraw => {
                terminal.draw(|f| app.draw(f))?;
            }
            Step::Idle => {}
        }

        // Sleep until the next tick; input wakes the loop early.
        event::poll(next_tick.saturating_duration_since(Instant::now()))?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn loop_error_wins_over_restore_error() {
        let err = finish(Err(anyhow!("draw failed")), Err(anyhow!("restore failed"))).unwrap_err();
        assert_eq!(err.to_string(), "draw failed");
    }

    #[test]
    fn restore_error_surfaces_after_clean_loop() {
        let err = finish(Ok(()), Err(anyhow!("restore failed"))).unwrap_err();
        assert_eq!(err.to_string(), "restore failed");
        assert!(finish(Ok(()), Ok(())).is_ok());
    }
}
