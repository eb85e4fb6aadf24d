//! A triangle translated around the screen with the keyboard.
//!
//! Every frame, each held directional key moves the triangle by a fixed step along its axis;
//! the accumulated offset is uploaded as a `vec2` uniform. Movement is frame-rate-dependent
//! on purpose and the offset is unbounded: nothing stops you from walking the triangle far
//! out of the clip volume. Press <escape> to quit or close the window.

use crate::{motion_of, Demo, InputAction, LoopFeedback, BACKDROP};
use trigon::mesh::Mesh;
use trigon::shader::{BuiltProgram, Program, Uniform};
use trigon::transform::{Axis, TransformState};
use trigon::vertex::VertexDesc;
use trigon::GraphicsContext;

const VS: &str = include_str!("offset-vs.glsl");
const FS: &str = include_str!("hello-fs.glsl");

#[rustfmt::skip]
const TRI_VERTICES: [f32; 9] = [
  -0.5, 0., 0.,
   0., 0.5, 0.,
   0.5, 0., 0.,
];

pub struct LocalDemo {
  triangle: Mesh,
  program: Program,
  offset: Uniform<[f32; 2]>,
  transform: TransformState,
}

impl Demo for LocalDemo {
  fn bootstrap(context: &mut impl GraphicsContext) -> Self {
    let BuiltProgram {
      program,
      diagnostics,
    } = context.new_shader_program(VS, FS);

    for diagnostic in &diagnostics {
      log::error!("{}", diagnostic);
    }

    // uniform names are compile-time constants; resolve once and reuse every frame
    let offset = program.uniform("offset").unwrap_or_else(|w| {
      log::warn!("{}", w);
      Uniform::unbound()
    });

    let triangle = context
      .new_mesh()
      .set_vertices(&TRI_VERTICES)
      .set_layout(VertexDesc::new().with_attribute(3))
      .build()
      .expect("triangle creation");

    LocalDemo {
      triangle,
      program,
      offset,
      transform: TransformState::new(),
    }
  }

  fn render_frame(
    mut self,
    _: f32,
    actions: impl Iterator<Item = InputAction>,
    context: &mut impl GraphicsContext,
  ) -> LoopFeedback<Self> {
    for action in actions {
      match action {
        InputAction::Quit => return LoopFeedback::Exit,

        action => match motion_of(action) {
          // a flat demo; depth motions are meaningless here
          Some((Axis::Z, _)) | None => (),
          Some((axis, sign)) => self.transform.translate(axis, sign),
        },
      }
    }

    let gl = context.backend();

    gl.clear_frame(BACKDROP, false);
    gl.set_uniform(&self.program, &self.offset, self.transform.offset_2d());
    self.triangle.draw();

    LoopFeedback::Continue(self)
  }
}
