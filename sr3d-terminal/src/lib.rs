//! Terminal host for the SR3D software renderer

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use sr3d_core::{render_frame, FrameStats, RenderConfig, RotationState, Scene};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::debug;

pub mod renderer;

pub use renderer::AsciiSurface;

/// Degrees added per keypress when steering by hand
const NUDGE: f32 = 5.0;

/// How the app animates the scene
#[derive(Debug, Clone, Copy)]
pub struct AppOptions {
    /// Rotation added to every mesh each frame (degrees)
    pub spin: RotationState,
    /// Distance along +z at which freshly loaded meshes are placed
    pub placement_depth: f32,
    pub target_fps: u32,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            spin: RotationState::new(0.6, 0.6, 0.0),
            placement_depth: 50.0,
            target_fps: 30,
        }
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: Scene,
    config: RenderConfig,
    options: AppOptions,
    surface: AsciiSurface,
    running: bool,
    paused: bool,
    last_stats: FrameStats,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: Scene, config: RenderConfig, options: AppOptions) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            scene,
            config,
            options,
            surface: AsciiSurface::new(
                width as usize,
                height as usize,
                config.camera.width,
                config.camera.height,
            ),
            running: true,
            paused: false,
            last_stats: FrameStats::default(),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / self.options.target_fps.max(1) as u64);

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Loads land between frames
            self.update();

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
        match event::read()? {
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char(' ') => {
                    self.paused = !self.paused;
                }
                KeyCode::Char('w') | KeyCode::Up => self.nudge(NUDGE, 0.0, 0.0),
                KeyCode::Char('s') | KeyCode::Down => self.nudge(-NUDGE, 0.0, 0.0),
                KeyCode::Char('a') | KeyCode::Left => self.nudge(0.0, -NUDGE, 0.0),
                KeyCode::Char('d') | KeyCode::Right => self.nudge(0.0, NUDGE, 0.0),
                KeyCode::Char('e') => self.nudge(0.0, 0.0, NUDGE),
                KeyCode::Char('r') => self.nudge(0.0, 0.0, -NUDGE),
                _ => {}
            },
            Event::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                self.surface.resize(width as usize, height as usize);
            }
            _ => {}
        }
        Ok(())
    }

    fn nudge(&mut self, dx: f32, dy: f32, dz: f32) {
        for mesh in self.scene.meshes_mut() {
            mesh.rotation.rotate(dx, dy, dz);
        }
    }

    fn update(&mut self) {
        advance_scene(&mut self.scene, &self.options, self.paused);
    }

    fn render(&mut self) -> io::Result<()> {
        self.last_stats = render_frame(&mut self.scene, &self.config, &mut self.surface);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.surface.draw(&mut stdout)?;

        // Draw UI overlay
        let status = if self.scene.pending_loads() > 0 {
            " | loading..."
        } else {
            ""
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "SR3D | FPS: {:.1} | tris {}/{}{} | WASD/Arrows=Rotate E/R=Roll Space=Pause Q=Quit",
                self.fps, self.last_stats.drawn, self.last_stats.triangles, status
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Append finished loads, then advance the animation by one frame.
///
/// Newly loaded meshes are pushed out to `placement_depth`; every mesh
/// spins by `spin` unless paused.
pub fn advance_scene(scene: &mut Scene, options: &AppOptions, paused: bool) {
    let added = scene.poll_loads();
    for mesh in &mut scene.meshes_mut()[added] {
        mesh.position.z += options.placement_depth;
    }

    if !paused {
        let spin = options.spin;
        for mesh in scene.meshes_mut() {
            mesh.rotation.rotate(spin.x, spin.y, spin.z);
        }
    }
}
