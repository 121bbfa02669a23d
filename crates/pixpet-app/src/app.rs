use std::time::{Duration, Instant};

use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{layout::Rect, Frame};

use pixpet_agent::{AnimationClock, Pet, PetFrame, Thresholds, Variant};
use pixpet_config::PetConfig;
use pixpet_core::{
    bus::EventBus, event::Event, fps::TickRate, logging::LogBuffer, state::AppState,
};
use pixpet_metrics::{
    format::{format_uptime, snapshot_lines},
    MetricSource, Sampler, ScenarioCycle,
};
use pixpet_ui::{
    layout::pet_layout,
    shell::{render_shell, ShellView},
    sprite::render_sprite,
};

use crate::cli::Cli;

const HUD_HEIGHT: u16 = 6;
const LOG_TAIL: usize = 50;

/// What the loop should do after draining the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Quit,
    Redraw,
    Idle,
}

pub struct App {
    state: AppState,
    pub bus: EventBus,
    pet: Pet,
    sampler: Box<dyn Sampler>,
    rate: TickRate,
    log: LogBuffer,
    tick: Duration,
    verbose: bool,
    test_mode: bool,
}

impl App {
    pub fn new(cli: &Cli, config: &PetConfig, log: LogBuffer, now: Instant) -> Self {
        let sampler: Box<dyn Sampler> = if cli.test {
            Box::new(ScenarioCycle::new())
        } else {
            Box::new(MetricSource::from_config(&config.telemetry))
        };
        let variant = if cli.classic {
            Variant::Classic
        } else {
            Variant::Rich
        };
        let clock = AnimationClock::new(config.timing.blink(), config.timing.refresh(), now);

        Self {
            state: AppState::started(now),
            bus: EventBus::new(),
            pet: Pet::new(variant, Thresholds::from(&config.thresholds), clock),
            sampler,
            rate: TickRate::default(),
            log,
            tick: config.timing.tick(),
            verbose: cli.verbose(),
            test_mode: cli.test,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick
    }

    /// Translate one terminal event onto the bus.
    pub fn handle_input(&mut self, event: CEvent) {
        match event {
            CEvent::Key(key) if key.kind == KeyEventKind::Press => {
                if is_quit_key(&key) {
                    self.bus.publish(Event::Quit);
                } else {
                    self.bus.publish(Event::Key(key));
                }
            }
            CEvent::Resize(cols, rows) => self.bus.publish(Event::Resize { cols, rows }),
            _ => {}
        }
    }

    /// Drain the bus in order. A quit stops processing immediately.
    pub fn drain_events(&mut self) -> Step {
        let mut step = Step::Idle;
        for ev in self.bus.drain() {
            match ev {
                Event::Quit => return Step::Quit,
                Event::Tick { now } => {
                    self.on_tick(now);
                    step = Step::Redraw;
                }
                Event::Resize { cols, rows } => {
                    tracing::debug!(cols, rows, "terminal resized");
                    step = Step::Redraw;
                }
                Event::Key(key) => {
                    tracing::trace!(code = ?key.code, "ignored key");
                }
            }
        }
        step
    }

    fn on_tick(&mut self, now: Instant) {
        self.rate.record(now);
        let report = self.pet.tick(now, self.sampler.as_mut());

        if let Some(snap) = report.refreshed {
            tracing::debug!(
                source = self.sampler.label(),
                cpu = snap.cpu_percent,
                ram = snap.ram_percent,
                "metrics refreshed"
            );
            if self.verbose {
                tracing::info!(target: "pixpet::snapshot", "{}", self.pet.describe(&snap));
            }
        }

        self.state.status_line = format!(
            "{} | up {} | {:.1} tps",
            self.sampler.label(),
            format_uptime(self.state.uptime(now).as_secs()),
            self.rate.per_second()
        );
    }

    pub fn mode_tag(&self) -> String {
        let variant = match self.pet.variant() {
            Variant::Rich => "RICH",
            Variant::Classic => "CLASSIC",
        };
        if self.test_mode {
            format!("{variant} TEST")
        } else {
            variant.to_string()
        }
    }

    pub fn draw(&self, f: &mut Frame) {
        let rects = pet_layout(f.area(), HUD_HEIGHT, self.verbose);
        let mode = self.mode_tag();
        let log = if self.verbose {
            self.log.tail(LOG_TAIL)
        } else {
            Vec::new()
        };
        let hud_left = match self.pet.snapshot() {
            Some(snap) => snapshot_lines(snap),
            None => vec!["sampling...".to_string()],
        };

        let view = ShellView {
            mode: &mode,
            status_line: &self.state.status_line,
            hud_left,
            hud_right: self.pet.status_lines(),
            log: &log,
        };
        render_shell(f, rects, view, |f, area| self.render_pet(f, area));
    }

    fn render_pet(&self, f: &mut Frame, area: Rect) {
        let frame = self.pet.frame();
        let palette = frame.palette();
        let title = self.pet.mood().name();
        match &frame {
            PetFrame::Rich(grid) => render_sprite(f.buffer_mut(), area, title, grid, palette),
            PetFrame::Classic { grid, .. } => {
                render_sprite(f.buffer_mut(), area, title, grid, palette)
            }
        }
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use crossterm::event::KeyEventState;
    use pixpet_config::ConnectivityMode;
    use pixpet_core::logging::{LogEntry, LogLevel};
    use pixpet_metrics::{Battery, MetricSnapshot};
    use ratatui::{backend::TestBackend, Terminal};

    fn app(args: &[&str], t0: Instant) -> App {
        let cli = Cli::try_parse_from(args).unwrap();
        App::new(&cli, &PetConfig::default(), LogBuffer::new(16), t0)
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CEvent {
        CEvent::Key(KeyEvent::new(code, modifiers))
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn quit_keys() {
        let t0 = Instant::now();
        for ev in [
            key(KeyCode::Char('q'), KeyModifiers::NONE),
            key(KeyCode::Esc, KeyModifiers::NONE),
            key(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut a = app(&["pixpet", "--test"], t0);
            a.handle_input(ev);
            assert_eq!(a.drain_events(), Step::Quit);
        }
    }

    #[test]
    fn other_keys_do_not_quit() {
        let t0 = Instant::now();
        let mut a = app(&["pixpet", "--test"], t0);
        a.handle_input(key(KeyCode::Char('c'), KeyModifiers::NONE));
        a.handle_input(key(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(a.drain_events(), Step::Idle);
    }

    #[test]
    fn key_release_is_ignored() {
        let t0 = Instant::now();
        let mut a = app(&["pixpet", "--test"], t0);
        a.handle_input(CEvent::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }));
        assert!(!a.bus.has_pending());
    }

    #[test]
    fn quit_wins_over_a_later_tick() {
        let t0 = Instant::now();
        let mut a = app(&["pixpet", "--test"], t0);
        a.handle_input(key(KeyCode::Char('q'), KeyModifiers::NONE));
        a.bus.publish(Event::Tick { now: t0 });
        assert_eq!(a.drain_events(), Step::Quit);
        assert!(a.pet.snapshot().is_none());
    }

    #[test]
    fn first_tick_samples_and_redraws() {
        let t0 = Instant::now();
        let mut a = app(&["pixpet", "--test"], t0);
        a.bus.publish(Event::Tick { now: t0 });
        assert_eq!(a.drain_events(), Step::Redraw);
        assert_eq!(a.pet.snapshot().map(|s| s.connected), Some(true));
        assert!(a.state.status_line.starts_with("test | up 0s"));
    }

    #[test]
    fn mode_tag_names_variant_and_test() {
        let t0 = Instant::now();
        assert_eq!(app(&["pixpet", "--test"], t0).mode_tag(), "RICH TEST");
        assert_eq!(app(&["pixpet", "--test", "--classic"], t0).mode_tag(), "CLASSIC TEST");
    }

    #[test]
    fn screen_shows_status_metrics_and_pet() {
        let t0 = Instant::now();
        let mut a = app(&["pixpet", "--test"], t0);
        a.bus.publish(Event::Tick { now: t0 });
        a.drain_events();

        let text = screen(&a);
        assert!(text.contains("PIXPET | RICH TEST | test | up 0s"));
        assert!(text.contains("BAT  100%"));
        assert!(text.contains("MOOD HAPPY"));
        assert!(text.contains("FX   green-eyes"));
        assert!(text.contains('▀'));
    }

    #[test]
    fn verbose_screen_tails_the_log() {
        let t0 = Instant::now();
        let a = app(&["pixpet", "--test"], t0);
        a.log.push(LogEntry {
            level: LogLevel::Info,
            target: "pixpet::snapshot".into(),
            message: "hello from the log".into(),
        });
        let text = screen(&a);
        assert!(text.contains("sampling..."));
        assert!(text.contains("hello from the log"));
    }

    #[test]
    fn missing_telemetry_degrades_without_stopping_the_loop() {
        let empty = std::env::temp_dir().join(format!("pixpet-app-empty-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&empty);
        std::fs::create_dir_all(&empty).unwrap();

        let mut config = PetConfig::default();
        config.timing.refresh_secs = 1;
        config.telemetry.proc_root = empty.join("proc");
        config.telemetry.sys_root = empty.join("sys");
        // Nothing listens on port 1, so the probe can only ever report offline.
        config.telemetry.connectivity = ConnectivityMode::Probe;
        config.telemetry.probe_addr = "127.0.0.1:1".to_string();

        let cli = Cli::try_parse_from(["pixpet"]).unwrap();
        let t0 = Instant::now();
        let mut a = App::new(&cli, &config, LogBuffer::new(16), t0);

        for ms in (0..=2500u64).step_by(500) {
            a.bus.publish(Event::Tick {
                now: t0 + Duration::from_millis(ms),
            });
            assert_eq!(a.drain_events(), Step::Redraw);
            assert_eq!(a.pet.snapshot(), Some(&MetricSnapshot::default()));
        }
        assert_eq!(
            a.pet.snapshot().map(|s| s.battery),
            Some(Battery::Unknown)
        );
        let _ = std::fs::remove_dir_all(&empty);
    }
}
