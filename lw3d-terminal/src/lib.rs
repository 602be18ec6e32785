/// Terminal front end for the LW3D mesh viewer
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use lw3d_core::{render_frame, LightControl, Viewer};
use std::io::{self, stdout, Stdout, Write};
use std::time::{Duration, Instant};

pub mod surface;

pub use surface::TerminalCanvas;

/// Interactive viewer application.
///
/// Runs a fixed-rate frame loop in the alternate screen and feeds key
/// events to the light controller: w/s pitch, a/d yaw, q/e roll, with
/// the arrow keys doubling for pitch and yaw. Esc or Ctrl-C quits.
pub struct TerminalApp {
    viewer: Viewer,
    canvas: TerminalCanvas<Stdout>,
    held: Option<LightControl>,
    release_events: bool,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(viewer: Viewer) -> Self {
        let (width, height) = (viewer.config().width, viewer.config().height);

        Self {
            viewer,
            canvas: TerminalCanvas::new(stdout(), width, height),
            held: None,
            release_events: false,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);
        log::debug!("key release events supported: {}", self.release_events);

        // Raw mode is live from here on; a failed screen setup falls
        // through to the restore below just like a failed loop.
        let result =
            enter_screen(&mut stdout(), self.release_events).and_then(|_| self.main_loop());

        // Always restore terminal state.
        let _ = leave_screen(&mut stdout(), self.release_events);
        let _ = terminal::disable_raw_mode();

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Rotate the light one step per frame while a control key is
            // held. Terminals that cannot report key releases get one
            // step per key event instead.
            if let Some(control) = self.held {
                self.viewer.control_light(control);
                if !self.release_events {
                    self.held = None;
                }
            }

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read()?
        {
            if kind == KeyEventKind::Release {
                if key_control(code) == self.held {
                    self.held = None;
                }
                return Ok(());
            }
            match code {
                KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    self.running = false;
                }
                _ => {
                    if let Some(control) = key_control(code) {
                        self.held = Some(control);
                    }
                }
            }
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        render_frame(&self.viewer, &mut self.canvas)?;

        // Status line on the terminal row below the pixel grid
        let light = self.viewer.light_vector();
        let status = format!(
            "light [{:+.2} {:+.2} {:+.2}] | {:.1} fps | w/s a/d q/e rotate light, esc quits",
            light.x, light.y, light.z, self.fps
        );
        let mut stdout = stdout();
        queue!(
            stdout,
            cursor::MoveTo(0, self.canvas.cell_rows()),
            SetForegroundColor(Color::Yellow),
            Print(status),
            Clear(ClearType::UntilNewLine),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }
}

/// Queue the alternate-screen setup onto `writer`.
fn enter_screen(writer: &mut impl Write, release_events: bool) -> io::Result<()> {
    execute!(writer, terminal::EnterAlternateScreen, cursor::Hide)?;
    if release_events {
        execute!(
            writer,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    Ok(())
}

/// Undo [`enter_screen`], leaving the cursor visible on the main screen.
fn leave_screen(writer: &mut impl Write, release_events: bool) -> io::Result<()> {
    if release_events {
        execute!(writer, PopKeyboardEnhancementFlags)?;
    }
    execute!(writer, terminal::LeaveAlternateScreen, cursor::Show)
}

fn key_control(code: KeyCode) -> Option<LightControl> {
    match code {
        KeyCode::Char('w') | KeyCode::Up => Some(LightControl::PitchUp),
        KeyCode::Char('s') | KeyCode::Down => Some(LightControl::PitchDown),
        KeyCode::Char('a') | KeyCode::Left => Some(LightControl::YawLeft),
        KeyCode::Char('d') | KeyCode::Right => Some(LightControl::YawRight),
        KeyCode::Char('q') => Some(LightControl::RollLeft),
        KeyCode::Char('e') => Some(LightControl::RollRight),
        _ => None,
    }
}
