//! OpenGL 3.3 backend.
//!
//! The backend type is [`Gl33`]. It owns the cached [`GlState`] of the current thread and
//! exposes the per-frame operations the demos need: clearing, viewport updates, depth test
//! toggling, program binding and uniform uploads.

use crate::shader::{Program, Uniform, Uniformable};
use crate::state::{GlState, StateQueryError};
use gl::types::*;
use std::cell::RefCell;
use std::rc::Rc;

/// An OpenGL 3.3 backend.
///
/// Create one with [`Gl33::new`] once an OpenGL context is current on the calling thread.
#[derive(Debug)]
pub struct Gl33 {
  pub(crate) state: Rc<RefCell<GlState>>,
}

impl Gl33 {
  /// Create a new OpenGL 3.3 backend.
  ///
  /// Fails with [`StateQueryError::UnavailableGlState`] when a backend has already been
  /// acquired on this thread.
  pub fn new() -> Result<Self, StateQueryError> {
    GlState::new().map(|state| Gl33 {
      state: Rc::new(RefCell::new(state)),
    })
  }

  /// Clear the color buffer to start a new frame; `clear_depth` also clears the depth
  /// buffer.
  pub fn clear_frame(&mut self, clear_color: [f32; 4], clear_depth: bool) {
    let mut state = self.state.borrow_mut();

    unsafe {
      state.set_clear_color(clear_color);

      let mut bits = gl::COLOR_BUFFER_BIT;
      if clear_depth {
        bits |= gl::DEPTH_BUFFER_BIT;
      }

      gl::Clear(bits);
    }
  }

  /// Set the viewport to the given framebuffer pixel dimensions.
  pub fn set_viewport(&mut self, width: u32, height: u32) {
    unsafe {
      self
        .state
        .borrow_mut()
        .set_viewport([0, 0, width as GLint, height as GLint]);
    }
  }

  /// Enable or disable depth testing.
  pub fn set_depth_test(&mut self, enabled: bool) {
    unsafe {
      self.state.borrow_mut().set_depth_test(enabled);
    }
  }

  /// Make `program` the current program.
  ///
  /// Binding a program whose link failed is allowed; subsequent draws will render nothing
  /// or garbage, which is the expected degraded behavior.
  pub fn use_program(&mut self, program: &Program) {
    unsafe {
      self.state.borrow_mut().use_program(program.handle());
    }
  }

  /// Upload a uniform value to `program`, binding it first if needed.
  pub fn set_uniform<T>(&mut self, program: &Program, uniform: &Uniform<T>, value: T)
  where
    T: Uniformable,
  {
    unsafe {
      self.state.borrow_mut().use_program(program.handle());
    }

    value.upload(uniform.location());
  }
}
