use trigon::vertex::VertexDesc;

/// A vertex with a position and a color, as used by the colored demos.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
  pub pos: [f32; 3],
  pub rgb: [f32; 3],
}

impl Vertex {
  pub const fn new(pos: [f32; 3], rgb: [f32; 3]) -> Self {
    Vertex { pos, rgb }
  }
}

/// Layout of [`Vertex`]: 3-component position at attribute 0, 3-component color at 1.
pub fn vertex_layout() -> VertexDesc {
  VertexDesc::new().with_attribute(3).with_attribute(3)
}

/// Flatten vertices into the interleaved form meshes upload.
pub fn interleave(vertices: &[Vertex]) -> Vec<f32> {
  vertices
    .iter()
    .flat_map(|v| v.pos.into_iter().chain(v.rgb))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn interleave_matches_layout() {
    let vertices = [
      Vertex::new([-0.5, 0., 0.], [1., 0., 0.]),
      Vertex::new([0., 0.5, 0.], [0., 1., 0.]),
    ];
    let flat = interleave(&vertices);

    assert_eq!(flat.len() % vertex_layout().components(), 0);
    assert_eq!(
      flat,
      vec![-0.5, 0., 0., 1., 0., 0., 0., 0.5, 0., 0., 1., 0.]
    );
  }
}
