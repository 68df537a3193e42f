use std::collections::HashMap;

use polygon_circle::config::{Config, Flags};
use polygon_circle::error::{Error, GlErrorCode};
use polygon_circle::mesh::OutlineMesh;
use polygon_circle::surface::{Input, Surface};
use polygon_circle::viewer::App;

struct TestBuffer {
    id: usize,
    indices: usize,
}

/// In-memory surface that replays scripted input and errors, one entry per
/// loop iteration, and records what was drawn.
struct ScriptedSurface {
    now: f32,
    tick: f32,
    iteration: usize,
    max_iterations: usize,
    inputs: HashMap<usize, Vec<Input>>,
    errors: HashMap<usize, GlErrorCode>,
    setup_error: Option<GlErrorCode>,
    buffers_created: usize,
    drawn: Vec<(usize, usize)>,
    presents: usize,
    closed: bool,
}

impl ScriptedSurface {
    fn new(start: f32, tick: f32, max_iterations: usize) -> ScriptedSurface {
        ScriptedSurface {
            now: start,
            tick,
            iteration: 0,
            max_iterations,
            inputs: HashMap::new(),
            errors: HashMap::new(),
            setup_error: None,
            buffers_created: 0,
            drawn: Vec::new(),
            presents: 0,
            closed: false,
        }
    }

    fn with_input(mut self, iteration: usize, input: Input) -> ScriptedSurface {
        self.inputs.entry(iteration).or_default().push(input);
        self
    }

    /// Side counts of every polygon drawn, in order.
    fn polygon_sides(&self) -> Vec<usize> {
        self.drawn
            .iter()
            .filter(|(id, _)| *id == 0)
            .map(|(_, indices)| indices / 6)
            .collect()
    }
}

impl Surface for ScriptedSurface {
    type Buffer = TestBuffer;

    fn elapsed(&self) -> f32 {
        self.now
    }

    fn create_buffer(&mut self) -> polygon_circle::Result<TestBuffer> {
        let id = self.buffers_created;
        self.buffers_created += 1;
        Ok(TestBuffer { id, indices: 0 })
    }

    fn upload(&mut self, buffer: &mut TestBuffer, mesh: &OutlineMesh) {
        buffer.indices = mesh.index_count();
    }

    fn clear(&mut self) {}

    fn draw(&mut self, buffer: &TestBuffer) {
        self.drawn.push((buffer.id, buffer.indices));
    }

    fn present(&mut self) {
        self.presents += 1;
    }

    fn poll_events(&mut self, handler: &mut dyn FnMut(Input)) {
        for input in self.inputs.remove(&self.iteration).unwrap_or_default() {
            handler(input);
        }
        self.iteration += 1;
        self.now += self.tick;
    }

    fn take_error(&mut self) -> Option<GlErrorCode> {
        if let Some(code) = self.setup_error.take() {
            return Some(code);
        }
        self.errors.remove(&self.iteration.wrapping_sub(1))
    }

    fn should_close(&self) -> bool {
        self.closed || self.iteration >= self.max_iterations
    }

    fn request_close(&mut self) {
        self.closed = true;
    }
}

fn timed(interval: f32) -> Config {
    Config {
        interval,
        ..Config::default()
    }
}

fn stepped() -> Config {
    Config {
        flags: Flags::STEP,
        ..Config::default()
    }
}

#[test]
fn timed_mode_advances_on_deadlines() {
    let mut surface = ScriptedSurface::new(0.25, 0.25, 9);
    App::new(&mut surface, timed(0.5)).unwrap().run().unwrap();

    assert_eq!(surface.polygon_sides(), vec![3, 4, 5]);
    assert_eq!(surface.presents, 3);
}

#[test]
fn every_frame_draws_polygon_then_circle() {
    let mut surface = ScriptedSurface::new(1.0, 1.0, 4);
    App::new(&mut surface, timed(0.5)).unwrap().run().unwrap();

    assert_eq!(surface.drawn.len(), 8);
    for pair in surface.drawn.chunks_exact(2) {
        assert_eq!(pair[0].0, 0);
        assert_eq!(pair[1], (1, 600));
    }
}

#[test]
fn zero_interval_wraps_every_frame() {
    let config = Config {
        max_sides: 5,
        ..timed(0.0)
    };
    let mut surface = ScriptedSurface::new(0.1, 0.1, 6);
    App::new(&mut surface, config).unwrap().run().unwrap();

    assert_eq!(surface.polygon_sides(), vec![3, 4, 3, 4, 3, 4]);
}

#[test]
fn step_mode_draws_only_after_presses() {
    let mut surface = ScriptedSurface::new(0.0, 10.0, 10)
        .with_input(2, Input::Step)
        .with_input(5, Input::Step)
        .with_input(5, Input::Step);
    let mut app = App::new(&mut surface, stepped()).unwrap();
    app.run().unwrap();
    assert_eq!(app.frames_drawn(), 3);
    assert_eq!(app.animator().current(), 6);

    // The starting polygon shows up immediately, then one polygon per
    // iteration that had a pending press.
    assert_eq!(surface.polygon_sides(), vec![3, 4, 5]);
}

#[test]
fn quit_input_closes_cleanly() {
    let mut surface = ScriptedSurface::new(1.0, 1.0, 100).with_input(3, Input::Quit);
    App::new(&mut surface, timed(0.5)).unwrap().run().unwrap();

    assert!(surface.closed);
    assert_eq!(surface.iteration, 4);
}

#[test]
fn render_error_stops_the_loop() {
    let mut surface = ScriptedSurface::new(1.0, 1.0, 100);
    surface.errors.insert(2, GlErrorCode::INVALID_OPERATION);

    let result = App::new(&mut surface, timed(0.5)).unwrap().run();

    assert!(matches!(result, Err(Error::Render(GlErrorCode::INVALID_OPERATION))));
    assert!(surface.closed);
    assert_eq!(surface.iteration, 3);
}

#[test]
fn setup_error_is_logged_and_the_loop_still_runs() {
    let mut surface = ScriptedSurface::new(1.0, 1.0, 3);
    surface.setup_error = Some(GlErrorCode::OUT_OF_MEMORY);

    let mut app = App::new(&mut surface, timed(0.5)).unwrap();
    app.run().unwrap();
    assert_eq!(app.frames_drawn(), 3);

    assert!(surface.setup_error.is_none());
    assert!(!surface.closed);
    assert_eq!(surface.polygon_sides(), vec![3, 4, 5]);
}
