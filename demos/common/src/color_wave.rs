//! A triangle whose vertex colors oscillate over time.
//!
//! This is the only demo that mutates its mesh: every frame, the clock is resampled, the
//! green and blue channels of each vertex are recomputed from a phase-shifted sine and the
//! whole vertex storage is re-uploaded in place before the draw. The red channel stays
//! pinned at full intensity. Keyboard translation works as in the moving-triangle demo.
//! Press <escape> to quit or close the window.

use crate::shared::{interleave, vertex_layout, Vertex};
use crate::{motion_of, Demo, InputAction, LoopFeedback, BACKDROP};
use trigon::mesh::{BufferUsage, Mesh};
use trigon::shader::{BuiltProgram, Program, Uniform};
use trigon::transform::{Axis, TransformState};
use trigon::GraphicsContext;

const VS: &str = include_str!("color-vs.glsl");
const FS: &str = include_str!("color-fs.glsl");

#[rustfmt::skip]
const TRI_POSITIONS: [[f32; 3]; 3] = [
  [-0.5, 0., 0.],
  [ 0., 0.5, 0.],
  [ 0.5, 0., 0.],
];

/// Per-vertex phase shifts, in radians.
const COLOR_PHASES: [f32; 3] = [0., 2., 4.];

/// Remap a sine into the [0, 1] color range.
fn oscillation(t: f32) -> f32 {
  (t.sin() + 1.) * 0.5
}

/// The triangle at time `t`: red pinned at 1, green and blue following each vertex's phase.
fn wave_vertices(t: f32) -> [Vertex; 3] {
  let mut vertices = [Vertex::new([0.; 3], [0.; 3]); 3];

  for i in 0..3 {
    let wave = oscillation(t + COLOR_PHASES[i]);
    vertices[i] = Vertex::new(TRI_POSITIONS[i], [1., wave, wave]);
  }

  vertices
}

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

    let offset = program.uniform("offset").unwrap_or_else(|w| {
      log::warn!("{}", w);
      Uniform::unbound()
    });

    let triangle = context
      .new_mesh()
      .set_vertices(&interleave(&wave_vertices(0.)))
      .set_layout(vertex_layout())
      .set_usage(BufferUsage::Dynamic)
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
    t: f32,
    actions: impl Iterator<Item = InputAction>,
    context: &mut impl GraphicsContext,
  ) -> LoopFeedback<Self> {
    for action in actions {
      match action {
        InputAction::Quit => return LoopFeedback::Exit,

        action => match motion_of(action) {
          Some((Axis::Z, _)) | None => (),
          Some((axis, sign)) => self.transform.translate(axis, sign),
        },
      }
    }

    // the upload must land before this frame's draw call
    if let Err(e) = self.triangle.upload_vertices(&interleave(&wave_vertices(t))) {
      log::error!("cannot update triangle colors: {}", e);
    }

    let gl = context.backend();

    gl.clear_frame(BACKDROP, false);
    gl.set_uniform(&self.program, &self.offset, self.transform.offset_2d());
    self.triangle.draw();

    LoopFeedback::Continue(self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const TOLERANCE: f32 = 1e-6;

  #[test]
  fn red_channel_is_pinned() {
    for t in [0., 0.5, 1., 100.] {
      for vertex in wave_vertices(t) {
        assert_eq!(vertex.rgb[0], 1.);
      }
    }
  }

  #[test]
  fn second_vertex_green_follows_phase_two() {
    for t in [0., 0.25, 1.5, 42.] {
      let vertices = wave_vertices(t);
      let expected = ((t + 2.).sin() + 1.) / 2.;
      assert!((vertices[1].rgb[1] - expected).abs() < TOLERANCE);
    }
  }

  #[test]
  fn third_vertex_blue_follows_phase_four() {
    for t in [0., 0.25, 1.5, 42.] {
      let vertices = wave_vertices(t);
      let expected = ((t + 4.).sin() + 1.) / 2.;
      assert!((vertices[2].rgb[2] - expected).abs() < TOLERANCE);
    }
  }

  #[test]
  fn oscillation_stays_in_color_range() {
    for i in 0..1000 {
      let w = oscillation(i as f32 * 0.1);
      assert!((0. ..=1.).contains(&w));
    }
  }

  #[test]
  fn positions_are_stable_over_time() {
    let early = wave_vertices(0.);
    let late = wave_vertices(1000.);

    for (e, l) in early.iter().zip(&late) {
      assert_eq!(e.pos, l.pos);
    }
  }
}
