use std::thread;

use crate::animation::{Animator, Frame, IDLE_SLEEP};
use crate::config::Config;
use crate::error::{Error, Result, Stage};
use crate::mesh::{self, OutlineMesh};
use crate::surface::{Input, Surface};

/// Drives the animation on a [`Surface`].
///
/// Owns one buffer for the polygon and one for the circle. Both are released
/// when the app is dropped, whichever way [`App::run`] returns.
pub struct App<'s, S: Surface> {
    surface: &'s mut S,
    config: Config,
    animator: Animator,

    polygon: S::Buffer,
    polygon_mesh: OutlineMesh,
    circle: S::Buffer,

    frames_drawn: u64,
}

impl<'s, S: Surface> App<'s, S> {
    //
    // Lifecycle code
    //

    /// Allocates the mesh buffers and uploads the circle, which never changes.
    ///
    /// `config` is expected to have passed [`Config::validate`].
    pub fn new(surface: &'s mut S, config: Config) -> Result<App<'s, S>> {
        let mut polygon = surface.create_buffer()?;
        let mut circle = surface.create_buffer()?;

        let circle_mesh = mesh::generate(&config.circle());
        surface.upload(&mut circle, &circle_mesh);
        log::debug!(
            "circle uploaded: {} vertices, {} indices",
            circle_mesh.vertex_count(),
            circle_mesh.index_count()
        );

        let polygon_mesh = mesh::generate(&config.polygon(config.start_sides));
        surface.upload(&mut polygon, &polygon_mesh);

        if let Some(code) = surface.take_error() {
            log::error!("GL error during {}: {code}", Stage::Upload);
        }

        let mut animator = Animator::new(config.start_sides, config.max_sides, config.pacing());
        if config.step_mode() {
            // Show the starting polygon without waiting for the first press.
            animator.signal_step();
        }

        Ok(App {
            surface,
            config,
            animator,
            polygon,
            polygon_mesh,
            circle,
            frames_drawn: 0,
        })
    }

    /// Runs until the surface closes. A render error closes the surface and
    /// is returned for the caller to report.
    pub fn run(&mut self) -> Result<()> {
        while !self.surface.should_close() {
            match self.animator.poll(self.surface.elapsed()) {
                Frame::Advance(sides) => self.draw_frame(sides),
                Frame::Idle => thread::sleep(IDLE_SLEEP),
            }

            let animator = &mut self.animator;
            let mut quit = false;
            self.surface.poll_events(&mut |input| match input {
                Input::Step => animator.signal_step(),
                Input::Quit => quit = true,
            });
            if quit {
                self.surface.request_close();
            }

            if let Some(code) = self.surface.take_error() {
                self.surface.request_close();
                return Err(Error::Render(code));
            }
        }

        log::info!("closing after {} frames", self.frames_drawn);
        Ok(())
    }

    //
    // Draw code
    //

    fn draw_frame(&mut self, sides: u32) {
        log::trace!("drawing {sides}-gon");

        self.surface.clear();

        self.polygon_mesh.rebuild(&self.config.polygon(sides));
        self.surface.upload(&mut self.polygon, &self.polygon_mesh);
        self.surface.draw(&self.polygon);
        self.surface.draw(&self.circle);

        self.surface.present();
        self.frames_drawn += 1;
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }
}
