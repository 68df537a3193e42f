//! The rendering collaborator the frame loop draws through.

use crate::error::{GlErrorCode, Result};
use crate::mesh::OutlineMesh;

/// Discrete input the frame loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// The step key was pressed or auto-repeated.
    Step,
    /// The user asked to leave.
    Quit,
}

/// A window (or stand-in) that can hold mesh buffers and draw them.
///
/// Buffers are owned handles. Whatever they hold on the device side is
/// released when they are dropped.
pub trait Surface {
    type Buffer;

    /// Seconds since the surface was opened. Never decreases.
    fn elapsed(&self) -> f32;

    fn create_buffer(&mut self) -> Result<Self::Buffer>;

    /// Replaces the contents of `buffer` with `mesh`.
    fn upload(&mut self, buffer: &mut Self::Buffer, mesh: &OutlineMesh);

    fn clear(&mut self);

    fn draw(&mut self, buffer: &Self::Buffer);

    fn present(&mut self);

    /// Drains pending window events, calling `handler` for each relevant one
    /// before returning.
    fn poll_events(&mut self, handler: &mut dyn FnMut(Input));

    /// Returns the oldest unreported device error, if any.
    fn take_error(&mut self) -> Option<GlErrorCode>;

    fn should_close(&self) -> bool;

    fn request_close(&mut self);
}
