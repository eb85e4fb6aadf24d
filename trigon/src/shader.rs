//! Shader stages, programs and uniforms.
//!
//! Programs are built with [`Gl33::build_program`], which compiles a vertex and a fragment
//! stage, links them and deletes the intermediate stages whether or not the link succeeded.
//! Failures never abort the build: the caller receives the (possibly broken) [`Program`]
//! together with the collected diagnostics and decides what to do with them. Info logs are
//! bounded to [`MAX_DIAGNOSTIC_LEN`] characters.

use crate::gl33::Gl33;
use gl::types::*;
use std::error;
use std::ffi::CString;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::null;

/// Upper bound, in characters, on compile and link diagnostics.
pub const MAX_DIAGNOSTIC_LEN: usize = 511;

/// A shader stage type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StageType {
  /// Vertex shader.
  VertexShader,
  /// Fragment shader.
  FragmentShader,
}

impl fmt::Display for StageType {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageType::VertexShader => f.write_str("vertex shader"),
      StageType::FragmentShader => f.write_str("fragment shader"),
    }
  }
}

/// Errors that shader stages can emit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StageError {
  /// Occurs when a shader fails to compile.
  CompilationFailed(StageType, String),
}

impl fmt::Display for StageError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageError::CompilationFailed(ref ty, ref r) => write!(f, "{} compilation error: {}", ty, r),
    }
  }
}

impl error::Error for StageError {}

impl From<StageError> for ProgramError {
  fn from(e: StageError) -> Self {
    ProgramError::StageError(e)
  }
}

/// Errors that a [`Program`] can generate.
///
/// These are *diagnostics*, not fatal conditions: a program whose build emitted them can
/// still be bound and drawn with, and will simply not produce meaningful fragments.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProgramError {
  /// A shader stage failed to compile.
  StageError(StageError),
  /// Program link failed. The contained `String` is the bounded info log.
  LinkFailed(String),
}

impl fmt::Display for ProgramError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ProgramError::StageError(ref e) => write!(f, "shader program has stage error: {}", e),

      ProgramError::LinkFailed(ref s) => write!(f, "shader program failed to link: {}", s),
    }
  }
}

impl error::Error for ProgramError {}

/// Warnings related to uniform lookup.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UniformWarning {
  /// Inactive uniform: the name didn't resolve to a location.
  ///
  /// This is the normal outcome when looking up any name on a program whose link failed.
  Inactive(String),
}

impl fmt::Display for UniformWarning {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      UniformWarning::Inactive(ref name) => write!(f, "inactive uniform: {}", name),
    }
  }
}

impl error::Error for UniformWarning {}

/// A compiled shader stage.
///
/// Deleted on drop, which is how the intermediate stages get released right after the link
/// has been attempted.
#[derive(Debug)]
struct Stage {
  handle: GLuint,
}

impl Drop for Stage {
  fn drop(&mut self) {
    unsafe {
      gl::DeleteShader(self.handle);
    }
  }
}

impl Stage {
  /// Compile a stage from source.
  ///
  /// A failed compilation still yields a stage object next to the compile diagnostic;
  /// attaching and linking it is allowed and reports its own diagnostic.
  fn compile(ty: StageType, src: &str) -> (Self, Option<StageError>) {
    unsafe {
      let handle = gl::CreateShader(opengl_shader_type(ty));

      if handle == 0 {
        let err = StageError::CompilationFailed(ty, "unable to create shader stage".to_owned());
        return (Stage { handle }, Some(err));
      }

      let c_src = CString::new(src.as_bytes()).unwrap();
      gl::ShaderSource(handle, 1, [c_src.as_ptr()].as_ptr(), null());
      gl::CompileShader(handle);

      let mut compiled: GLint = gl::FALSE.into();
      gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut compiled);

      if compiled == gl::TRUE.into() {
        (Stage { handle }, None)
      } else {
        let log = read_info_log(|len, written, ptr| {
          gl::GetShaderInfoLog(handle, len, written, ptr);
        });

        (
          Stage { handle },
          Some(StageError::CompilationFailed(ty, log)),
        )
      }
    }
  }
}

/// A linked (or link-attempted) shader program.
#[derive(Debug)]
pub struct Program {
  handle: GLuint,
}

impl Drop for Program {
  fn drop(&mut self) {
    unsafe {
      gl::DeleteProgram(self.handle);
    }
  }
}

impl Program {
  pub(crate) fn handle(&self) -> GLuint {
    self.handle
  }

  /// Look up a uniform location by name.
  ///
  /// Locations are stable for the lifetime of the program, so looking them up once at
  /// bootstrap and reusing the [`Uniform`] every frame is both allowed and encouraged.
  pub fn uniform<T>(&self, name: &str) -> Result<Uniform<T>, UniformWarning>
  where
    T: Uniformable,
  {
    let location = {
      let c_name = CString::new(name.as_bytes()).unwrap();
      unsafe { gl::GetUniformLocation(self.handle, c_name.as_ptr() as *const GLchar) }
    };

    if location < 0 {
      return Err(UniformWarning::Inactive(name.to_owned()));
    }

    Ok(Uniform::new(location))
  }

  fn link(&self) -> Option<ProgramError> {
    let handle = self.handle;

    unsafe {
      gl::LinkProgram(handle);

      let mut linked: GLint = gl::FALSE.into();
      gl::GetProgramiv(handle, gl::LINK_STATUS, &mut linked);

      if linked == gl::TRUE.into() {
        None
      } else {
        let log = read_info_log(|len, written, ptr| {
          gl::GetProgramInfoLog(handle, len, written, ptr);
        });

        Some(ProgramError::LinkFailed(log))
      }
    }
  }
}

/// The outcome of a program build: the program object plus whatever diagnostics the build
/// emitted.
///
/// An empty diagnostics list means the program compiled and linked cleanly.
#[derive(Debug)]
pub struct BuiltProgram {
  /// The built program. Usable even when `diagnostics` is non-empty; drawing with it then
  /// renders nothing or garbage.
  pub program: Program,
  /// Compile and link diagnostics, in emission order.
  pub diagnostics: Vec<ProgramError>,
}

impl BuiltProgram {
  /// Whether the program compiled and linked without diagnostics.
  pub fn is_clean(&self) -> bool {
    self.diagnostics.is_empty()
  }
}

impl Gl33 {
  /// Compile and link a program from a vertex and a fragment source.
  ///
  /// Both stages are compiled and attached regardless of their compile status, the link is
  /// always attempted, and the stages are released unconditionally afterwards. All failures
  /// are turned into diagnostics on the returned [`BuiltProgram`].
  pub fn build_program(&mut self, vertex_src: &str, fragment_src: &str) -> BuiltProgram {
    let mut diagnostics = Vec::new();

    let (vertex, vertex_err) = Stage::compile(StageType::VertexShader, vertex_src);
    diagnostics.extend(vertex_err.map(ProgramError::from));

    let (fragment, fragment_err) = Stage::compile(StageType::FragmentShader, fragment_src);
    diagnostics.extend(fragment_err.map(ProgramError::from));

    let program = unsafe {
      let handle = gl::CreateProgram();
      gl::AttachShader(handle, vertex.handle);
      gl::AttachShader(handle, fragment.handle);

      Program { handle }
    };

    diagnostics.extend(program.link());

    // dropping the vertex and fragment stages here deletes them, link success or not
    BuiltProgram {
      program,
      diagnostics,
    }
  }
}

/// A typed uniform location on a program.
#[derive(Debug)]
pub struct Uniform<T>
where
  T: Uniformable,
{
  location: GLint,
  _t: PhantomData<*const T>,
}

impl<T> Uniform<T>
where
  T: Uniformable,
{
  fn new(location: GLint) -> Self {
    Uniform {
      location,
      _t: PhantomData,
    }
  }

  /// A uniform that writes nowhere.
  ///
  /// Useful to keep running with a program whose link failed: uploads through an unbound
  /// uniform are silently ignored by the GL.
  pub fn unbound() -> Self {
    Uniform::new(-1)
  }

  pub(crate) fn location(&self) -> GLint {
    self.location
  }
}

/// Types that can be uploaded as uniform values.
pub trait Uniformable {
  /// Upload the value at `location` of the currently used program.
  fn upload(self, location: GLint);
}

impl Uniformable for f32 {
  fn upload(self, location: GLint) {
    unsafe { gl::Uniform1f(location, self) }
  }
}

impl Uniformable for [f32; 2] {
  fn upload(self, location: GLint) {
    unsafe { gl::Uniform2fv(location, 1, self.as_ptr()) }
  }
}

impl Uniformable for [f32; 3] {
  fn upload(self, location: GLint) {
    unsafe { gl::Uniform3fv(location, 1, self.as_ptr()) }
  }
}

/// Column-major 4×4 matrix.
impl Uniformable for [[f32; 4]; 4] {
  fn upload(self, location: GLint) {
    unsafe { gl::UniformMatrix4fv(location, 1, gl::FALSE, self.as_ptr() as *const f32) }
  }
}

fn opengl_shader_type(t: StageType) -> GLenum {
  match t {
    StageType::VertexShader => gl::VERTEX_SHADER,
    StageType::FragmentShader => gl::FRAGMENT_SHADER,
  }
}

/// Fetch an info log through `fetch` and bound it to [`MAX_DIAGNOSTIC_LEN`] characters.
unsafe fn read_info_log(fetch: impl FnOnce(GLsizei, *mut GLsizei, *mut GLchar)) -> String {
  // 511 characters plus the NUL terminator, like the original fixed-size log buffers
  let cap = MAX_DIAGNOSTIC_LEN + 1;
  let mut log: Vec<u8> = Vec::with_capacity(cap);
  let mut written: GLsizei = 0;

  fetch(cap as GLsizei, &mut written, log.as_mut_ptr() as *mut GLchar);
  log.set_len(written.max(0) as usize);

  bound_diagnostic(log)
}

/// Turn a raw info log into a diagnostic string of at most [`MAX_DIAGNOSTIC_LEN`]
/// characters.
fn bound_diagnostic(mut raw: Vec<u8>) -> String {
  if raw.last() == Some(&0) {
    raw.pop();
  }

  let mut log = String::from_utf8_lossy(&raw).into_owned();

  if log.len() > MAX_DIAGNOSTIC_LEN {
    let mut end = MAX_DIAGNOSTIC_LEN;
    while !log.is_char_boundary(end) {
      end -= 1;
    }
    log.truncate(end);
  }

  log
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn diagnostic_passthrough() {
    let log = b"0:1(10): error: syntax error, unexpected IDENTIFIER".to_vec();
    assert_eq!(
      bound_diagnostic(log),
      "0:1(10): error: syntax error, unexpected IDENTIFIER"
    );
  }

  #[test]
  fn diagnostic_drops_trailing_nul() {
    assert_eq!(bound_diagnostic(b"link failed\0".to_vec()), "link failed");
  }

  #[test]
  fn diagnostic_is_bounded() {
    let log = vec![b'x'; 4096];
    let bounded = bound_diagnostic(log);
    assert_eq!(bounded.len(), MAX_DIAGNOSTIC_LEN);
  }

  #[test]
  fn diagnostic_bound_respects_char_boundaries() {
    // multi-byte characters straddling the bound must not be split
    let log = "é".repeat(400).into_bytes();
    let bounded = bound_diagnostic(log);
    assert!(bounded.len() <= MAX_DIAGNOSTIC_LEN);
    assert!(bounded.chars().all(|c| c == 'é'));
  }

  #[test]
  fn diagnostic_survives_invalid_utf8() {
    let bounded = bound_diagnostic(vec![0xff, 0xfe, b'o', b'k']);
    assert!(bounded.ends_with("ok"));
  }
}
