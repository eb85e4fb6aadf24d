//! Graphics state.
//!
//! A cache layer over the raw OpenGL state machine. Binding the same buffer, vertex array or
//! program twice in a row is elided, as are redundant viewport, clear color and depth test
//! changes.

use gl::types::*;
use std::cell::RefCell;
use std::error;
use std::fmt;
use std::marker::PhantomData;

// TLS synchronization barrier for `GlState`.
thread_local!(static TLS_ACQUIRE_GFX_STATE: RefCell<Option<()>> = RefCell::new(Some(())));

/// Cached value.
///
/// Used to prevent issuing a GPU command when the target value is already what the command
/// would set.
#[derive(Debug)]
struct Cached<T>(Option<T>)
where
  T: PartialEq;

impl<T> Cached<T>
where
  T: PartialEq,
{
  fn new(initial: T) -> Self {
    Cached(Some(initial))
  }

  fn set(&mut self, value: T) {
    self.0 = Some(value);
  }

  /// A non-cached (empty) value is invalid whatever the compared value; a cached one is
  /// invalid if it differs from the input value.
  fn is_invalid(&self, new_val: &T) -> bool {
    match &self.0 {
      Some(ref t) => t != new_val,
      _ => true,
    }
  }
}

/// Whether a binding should go through the cache or be forced.
///
/// Forcing is required when a binding is meaningful only while another object is bound, e.g.
/// binding an array buffer while a fresh vertex array is bound.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Bind {
  Forced,
  Cached,
}

/// The graphics state.
///
/// Represents the current state of the graphics context on the current thread. At most one
/// value of this type can exist per thread; see [`GlState::new`].
#[derive(Debug)]
pub struct GlState {
  _a: PhantomData<*const ()>, // !Send and !Sync

  viewport: Cached<[GLint; 4]>,
  clear_color: Cached<[GLfloat; 4]>,
  depth_test: Cached<bool>,

  bound_array_buffer: GLuint,
  bound_vertex_array: GLuint,
  current_program: GLuint,
}

impl GlState {
  /// Create a new `GlState`.
  ///
  /// Only one per thread: acquiring a second one on the same thread fails with
  /// [`StateQueryError::UnavailableGlState`].
  pub(crate) fn new() -> Result<Self, StateQueryError> {
    TLS_ACQUIRE_GFX_STATE.with(|rc| {
      let mut inner = rc.borrow_mut();

      match *inner {
        Some(_) => {
          inner.take();
          Self::get_from_context()
        }

        None => Err(StateQueryError::UnavailableGlState),
      }
    })
  }

  /// Seed the cache from the current OpenGL context.
  fn get_from_context() -> Result<Self, StateQueryError> {
    unsafe {
      let viewport = Cached::new(get_ctx_viewport());
      let clear_color = Cached::new(get_ctx_clear_color());
      let depth_test = Cached::new(get_ctx_depth_test()?);
      let bound_array_buffer = get_ctx_binding(gl::ARRAY_BUFFER_BINDING);
      let bound_vertex_array = get_ctx_binding(gl::VERTEX_ARRAY_BINDING);
      let current_program = get_ctx_binding(gl::CURRENT_PROGRAM);

      Ok(GlState {
        _a: PhantomData,
        viewport,
        clear_color,
        depth_test,
        bound_array_buffer,
        bound_vertex_array,
        current_program,
      })
    }
  }

  pub(crate) unsafe fn bind_array_buffer(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced || self.bound_array_buffer != handle {
      gl::BindBuffer(gl::ARRAY_BUFFER, handle);
      self.bound_array_buffer = handle;
    }
  }

  /// Forget about a buffer that is about to be deleted.
  pub(crate) unsafe fn unbind_buffer(&mut self, handle: GLuint) {
    if self.bound_array_buffer == handle {
      self.bind_array_buffer(0, Bind::Cached);
    }
  }

  pub(crate) unsafe fn bind_vertex_array(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced || self.bound_vertex_array != handle {
      gl::BindVertexArray(handle);
      self.bound_vertex_array = handle;
    }
  }

  pub(crate) unsafe fn unbind_vertex_array(&mut self) {
    self.bind_vertex_array(0, Bind::Cached)
  }

  pub(crate) unsafe fn use_program(&mut self, handle: GLuint) {
    if self.current_program != handle {
      gl::UseProgram(handle);
      self.current_program = handle;
    }
  }

  pub(crate) unsafe fn set_viewport(&mut self, viewport: [GLint; 4]) {
    if self.viewport.is_invalid(&viewport) {
      gl::Viewport(viewport[0], viewport[1], viewport[2], viewport[3]);
      self.viewport.set(viewport);
    }
  }

  pub(crate) unsafe fn set_clear_color(&mut self, clear_color: [GLfloat; 4]) {
    if self.clear_color.is_invalid(&clear_color) {
      gl::ClearColor(
        clear_color[0],
        clear_color[1],
        clear_color[2],
        clear_color[3],
      );
      self.clear_color.set(clear_color);
    }
  }

  pub(crate) unsafe fn set_depth_test(&mut self, enabled: bool) {
    if self.depth_test.is_invalid(&enabled) {
      if enabled {
        gl::Enable(gl::DEPTH_TEST);
      } else {
        gl::Disable(gl::DEPTH_TEST);
      }

      self.depth_test.set(enabled);
    }
  }
}

/// An error that might happen when the graphics state is gathered from the context.
#[non_exhaustive]
#[derive(Debug)]
pub enum StateQueryError {
  /// The [`GlState`] object is unavailable.
  ///
  /// That might occur when trying to acquire more than one graphics state on the same
  /// thread.
  UnavailableGlState,
  /// Corrupted depth test state.
  UnknownDepthTestState(GLboolean),
}

impl fmt::Display for StateQueryError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StateQueryError::UnavailableGlState => write!(f, "unavailable graphics state"),
      StateQueryError::UnknownDepthTestState(ref s) => write!(f, "unknown depth test state: {}", s),
    }
  }
}

impl error::Error for StateQueryError {}

unsafe fn get_ctx_viewport() -> [GLint; 4] {
  let mut data = [0; 4];
  gl::GetIntegerv(gl::VIEWPORT, data.as_mut_ptr());
  data
}

unsafe fn get_ctx_clear_color() -> [GLfloat; 4] {
  let mut data = [0.; 4];
  gl::GetFloatv(gl::COLOR_CLEAR_VALUE, data.as_mut_ptr());
  data
}

unsafe fn get_ctx_depth_test() -> Result<bool, StateQueryError> {
  let state = gl::IsEnabled(gl::DEPTH_TEST);

  match state {
    gl::TRUE => Ok(true),
    gl::FALSE => Ok(false),
    _ => Err(StateQueryError::UnknownDepthTestState(state)),
  }
}

unsafe fn get_ctx_binding(binding: GLenum) -> GLuint {
  let mut handle: GLint = 0;
  gl::GetIntegerv(binding, &mut handle);
  handle as GLuint
}
