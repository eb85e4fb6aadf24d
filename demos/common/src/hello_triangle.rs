//! The simplest demo: a static magenta triangle on a dark backdrop.
//!
//! The program is compiled once, the three vertices are uploaded once, and every frame just
//! clears and redraws. Press <escape> to quit or close the window.

use crate::{Demo, InputAction, LoopFeedback, BACKDROP};
use trigon::mesh::Mesh;
use trigon::shader::{BuiltProgram, Program};
use trigon::vertex::VertexDesc;
use trigon::GraphicsContext;

const VS: &str = include_str!("hello-vs.glsl");
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

    let triangle = context
      .new_mesh()
      .set_vertices(&TRI_VERTICES)
      .set_layout(VertexDesc::new().with_attribute(3))
      .build()
      .expect("triangle creation");

    LocalDemo { triangle, program }
  }

  fn render_frame(
    self,
    _: f32,
    actions: impl Iterator<Item = InputAction>,
    context: &mut impl GraphicsContext,
  ) -> LoopFeedback<Self> {
    for action in actions {
      if let InputAction::Quit = action {
        return LoopFeedback::Exit;
      }
    }

    let gl = context.backend();

    gl.clear_frame(BACKDROP, false);
    gl.use_program(&self.program);
    self.triangle.draw();

    LoopFeedback::Continue(self)
  }
}
