//! A colored triangle rendered in 3D under a perspective projection.
//!
//! Three matrices are uploaded every frame: a model matrix translating the triangle in its
//! plane, a view matrix backing the camera off along depth, and a perspective projection
//! with a 45° vertical field of view and the current framebuffer aspect ratio. Directional
//! keys move the triangle in the plane; <W>/<S> move it along depth. Depth testing is on and
//! the depth buffer is cleared each frame. Press <escape> to quit or close the window.

use crate::shared::{interleave, vertex_layout, Vertex};
use crate::{motion_of, Demo, InputAction, LoopFeedback, BACKDROP};
use cgmath::{perspective, Deg, Matrix4, Vector3};
use trigon::mesh::Mesh;
use trigon::shader::{BuiltProgram, Program, Uniform};
use trigon::transform::TransformState;
use trigon::GraphicsContext;

const VS: &str = include_str!("mvp-vs.glsl");
const FS: &str = include_str!("color-fs.glsl");

const TRI_VERTICES: [Vertex; 3] = [
  Vertex::new([-0.5, 0., 0.], [1., 0., 0.]),
  Vertex::new([0., 0.5, 0.], [0., 1., 0.]),
  Vertex::new([0.5, 0., 0.], [0., 0., 1.]),
];

/// Vertical field of view.
const FOVY: Deg<f32> = Deg(45.);
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.;

/// Starting depth offset, backing the view off the triangle.
const Z_START: f32 = -3.;

pub struct LocalDemo {
  triangle: Mesh,
  program: Program,
  model: Uniform<[[f32; 4]; 4]>,
  view: Uniform<[[f32; 4]; 4]>,
  projection: Uniform<[[f32; 4]; 4]>,
  transform: TransformState,
  aspect: f32,
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

    let ask = |name: &str| -> Uniform<[[f32; 4]; 4]> {
      program.uniform(name).unwrap_or_else(|w| {
        log::warn!("{}", w);
        Uniform::unbound()
      })
    };

    let model = ask("model");
    let view = ask("view");
    let projection = ask("projection");

    let triangle = context
      .new_mesh()
      .set_vertices(&interleave(&TRI_VERTICES))
      .set_layout(vertex_layout())
      .build()
      .expect("triangle creation");

    context.backend().set_depth_test(true);

    LocalDemo {
      triangle,
      program,
      model,
      view,
      projection,
      transform: TransformState::with_z(Z_START),
      aspect: 1.,
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

        InputAction::Resized { width, height } => {
          self.aspect = width as f32 / height as f32;
        }

        action => {
          if let Some((axis, sign)) = motion_of(action) {
            self.transform.translate(axis, sign);
          }
        }
      }
    }

    let model = Matrix4::from_translation(Vector3::new(self.transform.x, self.transform.y, 0.));
    let view = Matrix4::from_translation(Vector3::new(0., 0., self.transform.z));
    let projection = perspective(FOVY, self.aspect, Z_NEAR, Z_FAR);

    let gl = context.backend();

    gl.clear_frame(BACKDROP, true);
    gl.set_uniform(&self.program, &self.model, model.into());
    gl.set_uniform(&self.program, &self.view, view.into());
    gl.set_uniform(&self.program, &self.projection, projection.into());
    self.triangle.draw();

    LoopFeedback::Continue(self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const TOLERANCE: f32 = 1e-5;

  #[test]
  fn projection_matches_reference_formula() {
    let aspect = 1.;
    let projection: [[f32; 4]; 4] = perspective(FOVY, aspect, Z_NEAR, Z_FAR).into();

    let f = 1. / (45_f32.to_radians() / 2.).tan();
    #[rustfmt::skip]
    let reference: [[f32; 4]; 4] = [
      [f / aspect, 0., 0., 0.],
      [0., f, 0., 0.],
      [0., 0., (Z_FAR + Z_NEAR) / (Z_NEAR - Z_FAR), -1.],
      [0., 0., 2. * Z_FAR * Z_NEAR / (Z_NEAR - Z_FAR), 0.],
    ];

    for (column, reference_column) in projection.iter().zip(&reference) {
      for (value, reference_value) in column.iter().zip(reference_column) {
        assert!(
          (value - reference_value).abs() < TOLERANCE,
          "{} != {}",
          value,
          reference_value
        );
      }
    }
  }

  #[test]
  fn model_translates_in_plane() {
    let mut transform = TransformState::with_z(Z_START);
    transform.translate(trigon::transform::Axis::X, 1.);

    let model: [[f32; 4]; 4] =
      Matrix4::from_translation(Vector3::new(transform.x, transform.y, 0.)).into();

    // translation lands in the last column
    assert!((model[3][0] - trigon::transform::TRANSLATION_STEP).abs() < TOLERANCE);
    assert_eq!(model[3][1], 0.);
    assert_eq!(model[3][2], 0.);
  }

  #[test]
  fn view_starts_backed_off() {
    let transform = TransformState::with_z(Z_START);
    let view: [[f32; 4]; 4] =
      Matrix4::from_translation(Vector3::new(0., 0., transform.z)).into();

    assert_eq!(view[3][2], Z_START);
  }
}
