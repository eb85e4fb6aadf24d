//! [GLFW](https://crates.io/crates/glfw) surface backend for trigon.

#![deny(missing_docs)]

use gl;
use glfw::{self, Context as _, InitError, Window, WindowEvent};
pub use trigon::state::StateQueryError;
use trigon::{Gl33, GraphicsContext};
use trigon_windowing::{WindowDim, WindowOpt};
use std::{error, fmt, os::raw::c_void, sync::mpsc::Receiver};

/// Error that can be risen while creating a surface.
#[non_exhaustive]
#[derive(Debug)]
pub enum GlfwSurfaceError {
  /// Initialization of the surface went wrong.
  ///
  /// This variant exposes a **glfw** error for further information about what went wrong.
  InitError(InitError),

  /// Window creation failed.
  WindowCreationFailed,

  /// No primary monitor to open a fullscreen surface on.
  NoPrimaryMonitor,

  /// No video mode available on the primary monitor.
  NoVideoMode,

  /// The graphics state is not available.
  ///
  /// This error is generated when the initialization code is called on a thread on which the
  /// graphics state has already been acquired.
  GraphicsStateError(StateQueryError),
}

impl fmt::Display for GlfwSurfaceError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      GlfwSurfaceError::InitError(ref e) => write!(f, "initialization error: {}", e),
      GlfwSurfaceError::WindowCreationFailed => f.write_str("failed to create window"),
      GlfwSurfaceError::NoPrimaryMonitor => f.write_str("no primary monitor"),
      GlfwSurfaceError::NoVideoMode => f.write_str("no video mode"),
      GlfwSurfaceError::GraphicsStateError(ref e) => {
        write!(f, "failed to get graphics state: {}", e)
      }
    }
  }
}

impl From<InitError> for GlfwSurfaceError {
  fn from(e: InitError) -> Self {
    GlfwSurfaceError::InitError(e)
  }
}

impl error::Error for GlfwSurfaceError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      GlfwSurfaceError::InitError(e) => Some(e),
      GlfwSurfaceError::GraphicsStateError(e) => Some(e),
      _ => None,
    }
  }
}

/// GLFW surface.
///
/// This type exposes two important concepts: the GLFW event receiver, to poll events with,
/// and the [`Gl33Context`], which performs the rendering part.
pub struct GlfwSurface {
  /// Wrapped GLFW events queue.
  pub events_rx: Receiver<(f64, WindowEvent)>,

  /// Wrapped trigon context.
  pub context: Gl33Context,
}

impl GlfwSurface {
  /// Initialize GLFW to provide a trigon environment with an OpenGL 3.3 core context.
  pub fn new_gl33(title: &str, win_opt: WindowOpt) -> Result<Self, GlfwSurfaceError> {
    let mut glfw = glfw::init(glfw::FAIL_ON_ERRORS)?;

    // OpenGL hints
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
      glfw::OpenGlProfileHint::Core,
    ));
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
    glfw.window_hint(glfw::WindowHint::ContextVersionMajor(3));
    glfw.window_hint(glfw::WindowHint::ContextVersionMinor(3));

    let (mut window, events_rx) = create_window(&mut glfw, title, win_opt)?;

    window.make_current();
    window.set_framebuffer_size_polling(true);
    window.set_key_polling(true);
    window.set_close_polling(true);

    // init OpenGL
    gl::load_with(|s| window.get_proc_address(s) as *const c_void);

    let gl = Gl33::new().map_err(GlfwSurfaceError::GraphicsStateError)?;
    let context = Gl33Context { window, gl };
    let surface = GlfwSurface { events_rx, context };

    Ok(surface)
  }
}

fn create_window(
  glfw: &mut glfw::Glfw,
  title: &str,
  win_opt: WindowOpt,
) -> Result<(Window, Receiver<(f64, WindowEvent)>), GlfwSurfaceError> {
  match win_opt.dim() {
    WindowDim::Windowed { width, height } => glfw
      .create_window(width, height, title, glfw::WindowMode::Windowed)
      .ok_or(GlfwSurfaceError::WindowCreationFailed),

    WindowDim::Fullscreen => glfw.with_primary_monitor(|glfw, monitor| {
      let monitor = monitor.ok_or(GlfwSurfaceError::NoPrimaryMonitor)?;
      let vmode = monitor.get_video_mode().ok_or(GlfwSurfaceError::NoVideoMode)?;

      glfw
        .create_window(
          vmode.width,
          vmode.height,
          title,
          glfw::WindowMode::FullScreen(monitor),
        )
        .ok_or(GlfwSurfaceError::WindowCreationFailed)
    }),
  }
}

/// Trigon OpenGL 3.3 context over a GLFW window.
///
/// This type also re-exports the GLFW window, if you need access to it.
pub struct Gl33Context {
  /// Wrapped GLFW window.
  pub window: Window,

  /// OpenGL 3.3 backend.
  gl: Gl33,
}

impl GraphicsContext for Gl33Context {
  fn backend(&mut self) -> &mut Gl33 {
    &mut self.gl
  }
}
