//! Graphics context.
//!
//! A graphics context is an object giving access to a [`Gl33`] backend. The crate doesn't
//! provide one: surface crates (such as **trigon-glfw**) create the OpenGL context and wrap
//! it into a type implementing [`GraphicsContext`].
//!
//! A context is tied to the thread its OpenGL context is current on; [`Gl33`] is `!Send` and
//! `!Sync`, so contexts cannot be moved nor shared across threads.

use crate::gl33::Gl33;
use crate::mesh::MeshBuilder;
use crate::shader::BuiltProgram;

/// Class of graphics context.
pub trait GraphicsContext {
  /// Access the underlying backend.
  fn backend(&mut self) -> &mut Gl33;

  /// Start building a new mesh.
  fn new_mesh(&mut self) -> MeshBuilder<'_> {
    MeshBuilder::new(self.backend())
  }

  /// Compile and link a shader program from a vertex and a fragment source.
  ///
  /// Never fails: compile and link diagnostics are returned next to the program object; see
  /// [`BuiltProgram`].
  fn new_shader_program(&mut self, vertex_src: &str, fragment_src: &str) -> BuiltProgram {
    self.backend().build_program(vertex_src, fragment_src)
  }
}
