//! GPU meshes.
//!
//! A [`Mesh`] is one vertex array and one vertex buffer holding tightly interleaved `f32`
//! attributes, uploaded once at build time. The storage can be rewritten in place with
//! [`Mesh::upload_vertices`]; the usage hint chosen at build time does not restrict that.

use crate::gl33::Gl33;
use crate::state::{Bind, GlState};
use crate::vertex::VertexDesc;
use gl::types::*;
use std::cell::RefCell;
use std::error;
use std::fmt;
use std::mem;
use std::rc::Rc;

/// Primitive assembly mode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PrimitiveMode {
  /// Point list.
  Point,
  /// Line list.
  Line,
  /// Triangle list.
  Triangle,
}

/// Buffer storage usage hint.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BufferUsage {
  /// Uploaded once, drawn many times.
  Static,
  /// Rewritten frequently, typically every frame.
  Dynamic,
}

/// Errors that can occur while building or updating a mesh.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MeshError {
  /// No vertices were provided.
  NoVertices,
  /// No vertex layout was provided.
  NoVertexLayout,
  /// The vertex slice length is not a whole number of vertices for the layout.
  LengthIncoherency {
    /// Length of the provided slice, in `f32` components.
    len: usize,
    /// Number of `f32` components per vertex in the layout.
    components: usize,
  },
  /// An in-place upload changed the length of the storage.
  LengthMismatch {
    /// Length of the provided slice, in `f32` components.
    len: usize,
    /// Length of the original upload, in `f32` components.
    expected: usize,
  },
}

impl fmt::Display for MeshError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      MeshError::NoVertices => f.write_str("building a mesh without vertices"),

      MeshError::NoVertexLayout => f.write_str("building a mesh without a vertex layout"),

      MeshError::LengthIncoherency { len, components } => write!(
        f,
        "vertex slice length ({}) is not a multiple of the layout components ({})",
        len, components
      ),

      MeshError::LengthMismatch { len, expected } => write!(
        f,
        "in-place upload of {} components into a storage of {}",
        len, expected
      ),
    }
  }
}

impl error::Error for MeshError {}

/// Build a [`Mesh`] out of interleaved vertex data.
pub struct MeshBuilder<'a> {
  backend: &'a mut Gl33,
  vertices: Vec<f32>,
  layout: VertexDesc,
  mode: PrimitiveMode,
  usage: BufferUsage,
}

impl<'a> MeshBuilder<'a> {
  pub(crate) fn new(backend: &'a mut Gl33) -> Self {
    MeshBuilder {
      backend,
      vertices: Vec::new(),
      layout: VertexDesc::new(),
      mode: PrimitiveMode::Triangle,
      usage: BufferUsage::Static,
    }
  }

  /// Set the interleaved vertex data.
  pub fn set_vertices(mut self, vertices: &[f32]) -> Self {
    self.vertices = vertices.to_vec();
    self
  }

  /// Set the vertex layout.
  pub fn set_layout(mut self, layout: VertexDesc) -> Self {
    self.layout = layout;
    self
  }

  /// Set the primitive mode. Defaults to [`PrimitiveMode::Triangle`].
  pub fn set_mode(mut self, mode: PrimitiveMode) -> Self {
    self.mode = mode;
    self
  }

  /// Set the storage usage hint. Defaults to [`BufferUsage::Static`].
  pub fn set_usage(mut self, usage: BufferUsage) -> Self {
    self.usage = usage;
    self
  }

  /// Create the vertex array and buffer, upload the data and describe the attribute layout.
  pub fn build(self) -> Result<Mesh, MeshError> {
    if self.layout.is_empty() {
      return Err(MeshError::NoVertexLayout);
    }

    if self.vertices.is_empty() {
      return Err(MeshError::NoVertices);
    }

    let components = self.layout.components();
    if self.vertices.len() % components != 0 {
      return Err(MeshError::LengthIncoherency {
        len: self.vertices.len(),
        components,
      });
    }

    let mut vao: GLuint = 0;
    let mut vbo: GLuint = 0;
    let mut state = self.backend.state.borrow_mut();

    unsafe {
      gl::GenVertexArrays(1, &mut vao);

      // force the binding so that a previously bound vertex array (possibly the same
      // handle) doesn't shadow the pointer setup below
      state.bind_vertex_array(vao, Bind::Forced);

      gl::GenBuffers(1, &mut vbo);

      // force binding as it's meaningful while the fresh vertex array is bound
      state.bind_array_buffer(vbo, Bind::Forced);

      let bytes = self.vertices.len() * mem::size_of::<f32>();
      gl::BufferData(
        gl::ARRAY_BUFFER,
        bytes as isize,
        self.vertices.as_ptr() as _,
        opengl_usage(self.usage),
      );

      set_vertex_pointers(&self.layout);
    }

    drop(state);

    Ok(Mesh {
      vao,
      vbo,
      vert_nb: self.vertices.len() / components,
      components,
      mode: opengl_mode(self.mode),
      state: self.backend.state.clone(),
    })
  }
}

/// A GPU mesh: one vertex array, one interleaved vertex buffer.
#[derive(Debug)]
pub struct Mesh {
  vao: GLuint,
  vbo: GLuint,
  vert_nb: usize,
  components: usize,
  mode: GLenum,
  state: Rc<RefCell<GlState>>,
}

impl Mesh {
  /// Number of vertices.
  pub fn vert_nb(&self) -> usize {
    self.vert_nb
  }

  /// Rewrite the whole vertex storage in place.
  ///
  /// The new slice must have exactly the same length as the original upload; the layout does
  /// not change.
  pub fn upload_vertices(&mut self, vertices: &[f32]) -> Result<(), MeshError> {
    let expected = self.vert_nb * self.components;

    if vertices.len() != expected {
      return Err(MeshError::LengthMismatch {
        len: vertices.len(),
        expected,
      });
    }

    let mut state = self.state.borrow_mut();

    unsafe {
      state.bind_array_buffer(self.vbo, Bind::Cached);

      let bytes = vertices.len() * mem::size_of::<f32>();
      gl::BufferSubData(gl::ARRAY_BUFFER, 0, bytes as isize, vertices.as_ptr() as _);
    }

    Ok(())
  }

  /// Bind the vertex array and issue a single draw of all vertices.
  ///
  /// The caller is responsible for having the wanted program in use.
  pub fn draw(&self) {
    let mut state = self.state.borrow_mut();

    unsafe {
      state.bind_vertex_array(self.vao, Bind::Cached);
      gl::DrawArrays(self.mode, 0, self.vert_nb as GLsizei);
    }
  }
}

impl Drop for Mesh {
  fn drop(&mut self) {
    let mut state = self.state.borrow_mut();

    // vertex array first, then its buffer
    unsafe {
      state.unbind_vertex_array();
      gl::DeleteVertexArrays(1, &self.vao);

      state.unbind_buffer(self.vbo);
      gl::DeleteBuffers(1, &self.vbo);
    }
  }
}

fn opengl_mode(mode: PrimitiveMode) -> GLenum {
  match mode {
    PrimitiveMode::Point => gl::POINTS,
    PrimitiveMode::Line => gl::LINES,
    PrimitiveMode::Triangle => gl::TRIANGLES,
  }
}

fn opengl_usage(usage: BufferUsage) -> GLenum {
  match usage {
    BufferUsage::Static => gl::STATIC_DRAW,
    BufferUsage::Dynamic => gl::DYNAMIC_DRAW,
  }
}

/// Describe the interleaved attribute pointers of the currently bound vertex array.
unsafe fn set_vertex_pointers(layout: &VertexDesc) {
  let stride = layout.stride() as GLsizei;

  for (i, (attrib, offset)) in layout.attribs_with_offsets().enumerate() {
    gl::VertexAttribPointer(
      i as GLuint,
      attrib.dim as GLint,
      gl::FLOAT,
      gl::FALSE,
      stride,
      offset as *const GLvoid,
    );
    gl::EnableVertexAttribArray(i as GLuint);
  }
}
