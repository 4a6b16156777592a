//! The poll loop
//!
//! Once a second the voice module is asked for a command. Nothing recognised
//! means `waiting....` on the log output, anything else is resolved through
//! the dispatch table and rendered on the screen.

use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;

use crate::commands::{resolve, CommandId, DispatchEntry, NO_COMMAND};
use crate::config::Settings;
use crate::screen::{self, LogStyle, ScrollState, Surface};
use crate::voice::{begin_with_retry, CommandSource, Ready, StartupError};

/// Outcome of one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Nothing recognised since the last poll
    Idle,
    Dispatched {
        id: CommandId,
        entry: DispatchEntry,
    },
}

pub struct VoiceLog<S, V, D> {
    surface: S,
    source: V,
    delay: D,
    settings: Settings,
    style: LogStyle,
    scroll: ScrollState,
}

impl<S, V, D> VoiceLog<S, V, D>
where
    S: Surface,
    V: CommandSource,
    D: DelayNs,
{
    pub fn new(surface: S, source: V, delay: D, settings: Settings) -> Self {
        let style = settings.log_style();
        let scroll = ScrollState::new(settings.line_capacity);
        Self {
            surface,
            source,
            delay,
            settings,
            style,
            scroll,
        }
    }

    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn source(&self) -> &V {
        &self.source
    }

    /// Clear the screen, set up the text style and print the banner lines
    pub fn show_banner(&mut self) -> Result<(), DisplayError> {
        self.surface.fill_screen(self.settings.background)?;
        self.surface.set_cursor(0, 0);
        self.surface.set_text_color(self.settings.foreground);
        self.surface.set_text_size(self.settings.text_size);
        for line in self.settings.banner {
            self.surface.println(line)?;
        }
        self.scroll = ScrollState::with_lines(self.settings.line_capacity, self.settings.banner.len());
        Ok(())
    }

    /// Wait for the voice module, configure it and play the greeting reply
    pub fn start(&mut self) -> Result<Ready, StartupError> {
        let ready = begin_with_retry(
            &mut self.source,
            &mut self.delay,
            &self.settings.startup_retry,
        )?;
        log::info!("Voice module answered after {} attempt(s)", ready.attempts);

        if !self.settings.voice.is_empty() {
            if let Err(e) = self.source.apply_settings(&self.settings.voice) {
                log::warn!("Failed to apply voice settings: {:?}", e);
            }
        }

        if let Some(id) = self.settings.greeting_command {
            if let Err(e) = self.source.play_reply(id) {
                log::warn!("Failed to play reply for {}: {:?}", id, e);
            }
        }

        Ok(ready)
    }

    /// Poll the voice module once and render whatever it recognised
    pub fn tick(&mut self) -> Tick {
        let id = match self.source.command_id() {
            Ok(id) => id,
            Err(e) => {
                log::warn!("Failed to read command id: {:?}", e);
                NO_COMMAND
            }
        };

        if id == NO_COMMAND {
            log::info!("waiting....");
            return Tick::Idle;
        }

        log::info!("CMDID = {}", id);
        let entry = resolve(id);
        match screen::render_entry(
            self.scroll,
            id,
            &entry,
            &mut self.surface,
            &mut self.delay,
            &self.style,
        ) {
            Ok(scroll) => self.scroll = scroll,
            Err(e) => log::error!("Failed to render command {} {}: {:?}", id, entry, e),
        }

        Tick::Dispatched { id, entry }
    }

    /// Poll forever
    pub fn run(&mut self) -> ! {
        loop {
            self.tick();
            self.delay.delay_ms(self.settings.poll_period_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Effect;
    use crate::screen::tests::{Op, RecordingDelay, RecordingSurface};
    use crate::voice::tests::ScriptedSource;
    use crate::voice::RetryPolicy;
    use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

    type App = VoiceLog<RecordingSurface, ScriptedSource, RecordingDelay>;

    /// Keeps the `info` messages of the current test thread
    struct StatusLog;

    thread_local! {
        static STATUS: std::cell::RefCell<Vec<String>> = const { std::cell::RefCell::new(Vec::new()) };
    }

    impl log::Log for StatusLog {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Info
        }

        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                STATUS.with(|s| s.borrow_mut().push(record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: StatusLog = StatusLog;
    static INIT_LOGGER: std::sync::Once = std::sync::Once::new();

    /// Route `log` to [`StatusLog`] and forget what this thread logged so far
    fn capture_status() {
        INIT_LOGGER.call_once(|| {
            log::set_logger(&LOGGER).expect("no other logger in tests");
            log::set_max_level(log::LevelFilter::Info);
        });
        STATUS.with(|s| s.borrow_mut().clear());
    }

    fn status_lines() -> Vec<String> {
        STATUS.with(|s| s.borrow().clone())
    }

    fn app(ids: Vec<Result<CommandId, ()>>) -> App {
        VoiceLog::new(
            RecordingSurface::default(),
            ScriptedSource {
                ids,
                ..Default::default()
            },
            RecordingDelay::default(),
            Settings::default(),
        )
    }

    #[test]
    fn banner_counts_as_log_lines() {
        let mut app = app(vec![]);
        app.show_banner().unwrap();
        assert_eq!(app.scroll().line_count(), 2);
        assert_eq!(app.scroll().capacity(), 13);
        assert_eq!(app.surface().printed(), vec!["DFRobot Voice Activation", " "]);
        assert_eq!(
            &app.surface().ops[..4],
            &[
                Op::Fill(Rgb565::BLACK),
                Op::Cursor(0, 0),
                Op::Color(Rgb565::WHITE),
                Op::Size(2)
            ]
        );
    }

    #[test]
    fn start_plays_the_greeting() {
        let mut app = app(vec![]);
        let ready = app.start().unwrap();
        assert_eq!(ready.attempts, 1);
        assert_eq!(app.source().replies, vec![23]);
    }

    #[test]
    fn start_gives_up_with_a_bounded_policy() {
        let mut app = VoiceLog::new(
            RecordingSurface::default(),
            ScriptedSource {
                failures: u32::MAX,
                ..Default::default()
            },
            RecordingDelay::default(),
            Settings {
                startup_retry: RetryPolicy::attempts(3000, 2),
                ..Default::default()
            },
        );
        assert_eq!(app.start(), Err(StartupError::Exhausted { attempts: 2 }));
        assert!(app.source().replies.is_empty());
    }

    #[test]
    fn no_command_leaves_the_screen_alone() {
        let mut app = app(vec![Ok(0)]);
        assert_eq!(app.tick(), Tick::Idle);
        assert!(app.surface().ops.is_empty());
        assert_eq!(app.scroll().line_count(), 0);
    }

    #[test]
    fn idle_tick_reports_waiting() {
        capture_status();
        let mut app = app(vec![Ok(0)]);
        app.tick();
        assert_eq!(status_lines(), vec!["waiting...."]);
    }

    #[test]
    fn command_tick_reports_the_id() {
        capture_status();
        let mut app = app(vec![Ok(22)]);
        app.tick();
        assert_eq!(status_lines(), vec!["CMDID = 22"]);
        assert_eq!(app.surface().printed(), vec!["22: Go Forward"]);
    }

    #[test]
    fn read_errors_count_as_idle() {
        let mut app = app(vec![Err(())]);
        assert_eq!(app.tick(), Tick::Idle);
        assert!(app.surface().ops.is_empty());
    }

    #[test]
    fn commands_are_logged_and_scroll() {
        let mut app = app(vec![Ok(22), Ok(23), Ok(45), Ok(23)]);
        let mut trace = Vec::new();
        for _ in 0..4 {
            app.tick();
            trace.push(app.scroll().line_count());
        }
        assert_eq!(trace, vec![1, 2, 0, 1]);
    }

    #[test]
    fn tick_reports_the_resolved_entry() {
        let mut app = app(vec![Ok(53), Ok(200)]);
        assert_eq!(
            app.tick(),
            Tick::Dispatched {
                id: 53,
                entry: DispatchEntry::new("Display Number One", Effect::ShowDigit(1)),
            }
        );
        assert_eq!(app.scroll().line_count(), 0);
        assert_eq!(
            app.tick(),
            Tick::Dispatched {
                id: 200,
                entry: DispatchEntry::EMPTY,
            }
        );
        assert_eq!(app.scroll().line_count(), 1);
        assert_eq!(app.surface().printed(), vec!["1", "200: "]);
    }

    #[test]
    fn log_wraps_after_capacity() {
        let mut app = app(vec![Ok(92); 16]);
        app.show_banner().unwrap();
        let mut counts = Vec::new();
        for _ in 0..16 {
            app.tick();
            counts.push(app.scroll().line_count());
        }
        // banner took two lines, 12 more reach 14 and the next one starts over
        assert_eq!(counts[11], 14);
        assert_eq!(counts[12], 1);
        assert_eq!(counts[15], 4);
    }
}
