use sfml::graphics::{
    Color, PrimitiveType, RenderStates, RenderTarget, RenderWindow, Vertex,
};
use sfml::system::{Clock, Vector2f, Vector2u};
use sfml::window::{ContextSettings, Event, Key, Style, VideoMode};
use sfml::SfBox;

use crate::config::Config;
use crate::error::{Error, GlErrorCode, Result, Stage};
use crate::mesh::OutlineMesh;
use crate::surface::{Input, Surface};

const SIZE: (u32, u32) = (500, 500);
const TITLE: &str = "Polygon animation";
const STEP_KEY: Key = Key::Space;

const BACKGROUND: Color = Color {
    r: 178,
    g: 178,
    b: 178,
    a: 255,
};
const OUTLINE: Color = Color::BLACK;

// SFML already links the platform GL library.
extern "system" {
    fn glGetError() -> u32;
}

/// Triangle list ready for drawing.
///
/// SFML draws unindexed primitives, so the outline's index list is resolved
/// into one vertex per index on upload.
#[derive(Default)]
pub struct MeshBuffer {
    vertices: Vec<Vertex>,
}

/// A fixed-size, non-resizable SFML window.
pub struct SfmlSurface {
    window: RenderWindow,
    clock: SfBox<Clock>,
}

impl SfmlSurface {
    pub fn open(config: &Config) -> Result<SfmlSurface> {
        let settings = ContextSettings {
            antialiasing_level: config.sample_count,
            ..Default::default()
        };

        let mut window = RenderWindow::new(
            VideoMode::from(SIZE),
            TITLE,
            Style::TITLEBAR | Style::CLOSE,
            &settings,
        );
        if !window.is_open() {
            return Err(Error::Setup {
                stage: Stage::Window,
                reason: "window did not open".to_string(),
            });
        }
        window.set_vertical_sync_enabled(true);
        window.set_key_repeat_enabled(true);

        if !window.set_active(true) {
            return Err(Error::Setup {
                stage: Stage::Context,
                reason: "could not make the OpenGL context current".to_string(),
            });
        }

        let granted = window.settings().antialiasing_level;
        if granted != config.sample_count {
            log::info!(
                "anti-aliasing level {granted} granted ({} requested)",
                config.sample_count
            );
        } else {
            log::debug!("anti-aliasing level {granted}");
        }

        Ok(SfmlSurface {
            window,
            clock: Clock::start(),
        })
    }

    /// Maps normalized device coordinates onto window pixels.
    pub fn unit_to_screen_point(point: [f32; 2], size: Vector2u) -> Vector2f {
        Vector2f::new(
            (point[0] + 1.0) * 0.5 * size.x as f32,
            (1.0 - point[1]) * 0.5 * size.y as f32,
        )
    }
}

/// Turns a raw `glGetError` result into an error, if it is one.
fn check_gl(raw: u32) -> Option<GlErrorCode> {
    Some(GlErrorCode(raw)).filter(|code| code.is_error())
}

impl Surface for SfmlSurface {
    type Buffer = MeshBuffer;

    fn elapsed(&self) -> f32 {
        self.clock.elapsed_time().as_seconds()
    }

    fn create_buffer(&mut self) -> Result<MeshBuffer> {
        Ok(MeshBuffer::default())
    }

    fn upload(&mut self, buffer: &mut MeshBuffer, mesh: &OutlineMesh) {
        let size = self.window.size();
        buffer.vertices.clear();
        buffer.vertices.extend(mesh.indices.iter().map(|&index| {
            Vertex::new(
                Self::unit_to_screen_point(mesh.vertices[index as usize], size),
                OUTLINE,
                (0.0, 0.0).into(),
            )
        }));
    }

    fn clear(&mut self) {
        self.window.clear(BACKGROUND);
    }

    fn draw(&mut self, buffer: &MeshBuffer) {
        self.window.draw_primitives(
            &buffer.vertices,
            PrimitiveType::TRIANGLES,
            &RenderStates::DEFAULT,
        );
    }

    fn present(&mut self) {
        self.window.display();
    }

    fn poll_events(&mut self, handler: &mut dyn FnMut(Input)) {
        while let Some(event) = self.window.poll_event() {
            match event {
                Event::Closed => handler(Input::Quit),
                Event::KeyPressed { code, .. } => {
                    if code == STEP_KEY {
                        handler(Input::Step);
                    } else if code == Key::Escape {
                        handler(Input::Quit);
                    }
                }
                _ => (),
            }
        }
    }

    fn take_error(&mut self) -> Option<GlErrorCode> {
        // SAFETY: the window's context was made current in `open`, and
        // glGetError takes no arguments.
        check_gl(unsafe { glGetError() })
    }

    fn should_close(&self) -> bool {
        !self.window.is_open()
    }

    fn request_close(&mut self) {
        self.window.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_square_maps_to_window_corners() {
        let size = Vector2u::new(500, 500);

        let top_left = SfmlSurface::unit_to_screen_point([-1.0, 1.0], size);
        assert_eq!((top_left.x, top_left.y), (0.0, 0.0));

        let bottom_right = SfmlSurface::unit_to_screen_point([1.0, -1.0], size);
        assert_eq!((bottom_right.x, bottom_right.y), (500.0, 500.0));

        let center = SfmlSurface::unit_to_screen_point([0.0, 0.0], size);
        assert_eq!((center.x, center.y), (250.0, 250.0));
    }

    #[test]
    fn raw_gl_codes_become_errors() {
        assert_eq!(check_gl(0), None);
        assert_eq!(check_gl(0x0502), Some(GlErrorCode::INVALID_OPERATION));
        assert_eq!(check_gl(0x0506).map(GlErrorCode::name), Some("GL_INVALID_FRAMEBUFFER_OPERATION"));
        assert_eq!(check_gl(0x0503).map(GlErrorCode::name), Some("unknown error"));
    }
}
