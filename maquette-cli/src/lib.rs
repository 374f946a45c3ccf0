/// Terminal preview and CLI support for generated meshes
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use maquette_core::{Camera, Mesh, ProjectionMode};
use nalgebra::{Matrix4, Point3, Vector3};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Model spin around the three axes (in radians).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spin {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Spin {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Spin by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// Rotation matrix, applying the axes in order X, Y, Z.
    pub fn matrix(&self) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(self.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, self.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, self.z));

        rz * ry * rx
    }
}

/// Default output name for a generated building mesh, derived from its
/// parameters.
pub fn building_filename(sides: u32, height: f32, bottom_radius: f32, top_radius: f32) -> String {
    format!("building_{sides}_{height}_{bottom_radius}_{top_radius}.obj")
}

/// Interactive terminal viewer for a mesh.
pub struct TerminalApp {
    mesh: Mesh,
    center: Vector3<f32>,
    spin: Spin,
    camera: Camera,
    renderer: AsciiRenderer,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mesh: Mesh) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let (center, extent) = bounds(&mesh);

        let mut camera = Camera::new(width as u32, height as u32);
        camera.position = Point3::new(0.0, 0.0, (extent * 1.8).max(2.0));

        Ok(Self {
            mesh,
            center,
            spin: Spin::new(0.3, 0.3, 0.0),
            camera,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn set_projection(&mut self, mode: ProjectionMode) {
        self.camera.mode = mode;
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
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Update
            self.update();

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
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('w') | KeyCode::Up => {
                    self.spin.rotate(0.1, 0.0, 0.0);
                }
                KeyCode::Char('s') | KeyCode::Down => {
                    self.spin.rotate(-0.1, 0.0, 0.0);
                }
                KeyCode::Char('a') | KeyCode::Left => {
                    self.spin.rotate(0.0, -0.1, 0.0);
                }
                KeyCode::Char('d') | KeyCode::Right => {
                    self.spin.rotate(0.0, 0.1, 0.0);
                }
                KeyCode::Char('e') => {
                    self.spin.rotate(0.0, 0.0, 0.1);
                }
                KeyCode::Char('r') => {
                    self.spin.rotate(0.0, 0.0, -0.1);
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn update(&mut self) {
        // Continuous slow spin for demo effect
        self.spin.rotate(0.01, 0.015, 0.0);
    }

    fn render(&mut self) -> io::Result<()> {
        // Keep the mesh centered on the camera target while it spins.
        let model = self.spin.matrix() * Matrix4::new_translation(&(-self.center));

        self.renderer.clear();
        self.renderer.render_mesh(&self.mesh, &model, &self.camera);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Maquette preview | FPS: {:.1} | Controls: WASD/Arrows=Spin E/R=Roll Q=Quit",
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Center of the mesh bounding box and its diagonal extent, used to frame
/// the camera.
fn bounds(mesh: &Mesh) -> (Vector3<f32>, f32) {
    if mesh.vertex_count() == 0 {
        return (Vector3::zeros(), 1.0);
    }

    let mut min = Vector3::repeat(f32::INFINITY);
    let mut max = Vector3::repeat(f32::NEG_INFINITY);
    for v in mesh.vertices() {
        min = min.inf(&v.coords);
        max = max.sup(&v.coords);
    }

    ((min + max) / 2.0, (max - min).norm().max(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use maquette_core::Frustum;

    #[test]
    fn test_zero_spin_is_identity() {
        let spin = Spin::default();
        assert!((spin.matrix() - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_spin_accumulates() {
        let mut spin = Spin::default();
        spin.rotate(0.1, 0.2, 0.3);
        assert!((spin.x - 0.1).abs() < 1e-6);
        assert!((spin.y - 0.2).abs() < 1e-6);
        assert!((spin.z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_building_filename_matches_parameters() {
        assert_eq!(
            building_filename(8, 6.0, 1.0, 0.8),
            "building_8_6_1_0.8.obj"
        );
        assert_eq!(
            building_filename(12, 2.5, 1.0, 1.0),
            "building_12_2.5_1_1.obj"
        );
    }

    #[test]
    fn test_bounds_center_a_building() {
        let mesh = Frustum::new(8, 6.0, 1.0, 1.0).unwrap().mesh().unwrap();
        let (center, extent) = bounds(&mesh);
        assert!((center.y - 3.0).abs() < 1e-5);
        assert!(extent > 6.0);
    }
}
