//! Per-session transform state.
//!
//! Scalar translation offsets written by the input step and read by the uniform step of the
//! same frame. Movement is a fixed step per held key per frame, deliberately
//! frame-rate-dependent with no delta-time scaling, and offsets are unbounded.

/// Translation applied per held directional key per frame, in normalized device units.
pub const TRANSLATION_STEP: f32 = 0.01;

/// A translation axis.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Axis {
  /// Horizontal.
  X,
  /// Vertical.
  Y,
  /// Depth.
  Z,
}

/// Accumulated translation offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformState {
  /// Horizontal offset.
  pub x: f32,
  /// Vertical offset.
  pub y: f32,
  /// Depth offset.
  pub z: f32,
}

impl TransformState {
  /// All offsets at zero.
  pub fn new() -> Self {
    Self::default()
  }

  /// Start with a given depth offset; used by the perspective demo to back the view off the
  /// triangle.
  pub fn with_z(z: f32) -> Self {
    TransformState {
      z,
      ..Self::default()
    }
  }

  /// Apply one step along `axis`. `sign` is `1.` or `-1.`.
  pub fn translate(&mut self, axis: Axis, sign: f32) {
    match axis {
      Axis::X => self.x += sign * TRANSLATION_STEP,
      Axis::Y => self.y += sign * TRANSLATION_STEP,
      Axis::Z => self.z += sign * TRANSLATION_STEP,
    }
  }

  /// The 2D translation uniform value.
  pub fn offset_2d(&self) -> [f32; 2] {
    [self.x, self.y]
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn per_frame_deltas_accumulate() {
    let mut transform = TransformState::new();

    // 10 frames holding right, 3 frames holding left, 5 frames holding up
    for _ in 0..10 {
      transform.translate(Axis::X, 1.);
    }
    for _ in 0..3 {
      transform.translate(Axis::X, -1.);
    }
    for _ in 0..5 {
      transform.translate(Axis::Y, 1.);
    }

    assert!((transform.x - 7. * TRANSLATION_STEP).abs() < 1e-6);
    assert!((transform.y - 5. * TRANSLATION_STEP).abs() < 1e-6);
    assert_eq!(transform.z, 0.);
  }

  #[test]
  fn drift_is_unbounded() {
    let mut transform = TransformState::new();

    for _ in 0..100_000 {
      transform.translate(Axis::X, 1.);
    }

    // no clamping: 100_000 * 0.01 = 1000, far outside clip space
    assert!(transform.x > 999.);
  }

  #[test]
  fn depth_start_offset() {
    let transform = TransformState::with_z(-3.);
    assert_eq!(transform.offset_2d(), [0., 0.]);
    assert_eq!(transform.z, -3.);
  }
}
