//! Trigon demos.
//!
//! Four incremental triangle demos sharing one render core: a static triangle, a
//! keyboard-translated triangle, a color-animated triangle and a perspective-projected 3D
//! triangle. The demos are platform-agnostic on purpose: they do not depend on system events
//! nor window capacities, and whenever one requires user interaction, the abstract
//! [`InputAction`] type is fed to it by the platform code running the demo.
//!
//! Demos are responsible for allocating their GPU resources and implementing the per-frame
//! effects through the [`Demo`] trait.
//!
//! # Error handling
//!
//! Demos showcase the degraded-but-running path on purpose: shader compile and link
//! diagnostics are logged and execution carries on with the broken program, which renders
//! nothing. Resource allocations that are infallible by construction use `.expect()`.

use trigon::transform::Axis;
use trigon::GraphicsContext;

pub mod color_wave;
pub mod hello_triangle;
pub mod moving_triangle;
pub mod perspective_triangle;
mod shared;

/// Background color shared by every demo.
pub const BACKDROP: [f32; 4] = [0., 0., 0.1, 1.];

/// Demo interface.
pub trait Demo: Sized {
  /// Bootstrap the demo: compile its program, upload its mesh, resolve its uniforms.
  fn bootstrap(context: &mut impl GraphicsContext) -> Self;

  /// Render a frame of the demo.
  ///
  /// `t` is the time elapsed since the loop started, in seconds. `actions` holds the inputs
  /// observed for this frame: one motion action per held directional key, plus whatever
  /// window events the platform translated.
  fn render_frame(
    self,
    t: f32,
    actions: impl Iterator<Item = InputAction>,
    context: &mut impl GraphicsContext,
  ) -> LoopFeedback<Self>;
}

/// A type used to pass "inputs" to demos.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputAction {
  /// Quit the demo.
  Quit,

  /// Left direction.
  Left,

  /// Right direction.
  Right,

  /// Up direction.
  Up,

  /// Down direction.
  Down,

  /// Forward along depth, towards the viewer.
  Forward,

  /// Backward along depth, away from the viewer.
  Backward,

  /// Framebuffer size changed.
  Resized {
    /// New width in pixels.
    width: u32,
    /// New height in pixels.
    height: u32,
  },
}

/// Whether the loop should go on after a frame.
#[derive(Debug)]
pub enum LoopFeedback<D> {
  /// Continue with the stepped demo.
  Continue(D),
  /// Stop the loop.
  Exit,
}

/// Mapping from directional actions to the (axis, sign) motion they apply.
const MOTION_TABLE: [(InputAction, Axis, f32); 6] = [
  (InputAction::Left, Axis::X, -1.),
  (InputAction::Right, Axis::X, 1.),
  (InputAction::Up, Axis::Y, 1.),
  (InputAction::Down, Axis::Y, -1.),
  (InputAction::Forward, Axis::Z, 1.),
  (InputAction::Backward, Axis::Z, -1.),
];

/// The motion a directional action maps to, if any.
pub fn motion_of(action: InputAction) -> Option<(Axis, f32)> {
  MOTION_TABLE
    .iter()
    .find(|(a, ..)| *a == action)
    .map(|&(_, axis, sign)| (axis, sign))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn directional_actions_map_to_motions() {
    assert_eq!(motion_of(InputAction::Left), Some((Axis::X, -1.)));
    assert_eq!(motion_of(InputAction::Right), Some((Axis::X, 1.)));
    assert_eq!(motion_of(InputAction::Up), Some((Axis::Y, 1.)));
    assert_eq!(motion_of(InputAction::Down), Some((Axis::Y, -1.)));
    assert_eq!(motion_of(InputAction::Forward), Some((Axis::Z, 1.)));
    assert_eq!(motion_of(InputAction::Backward), Some((Axis::Z, -1.)));
  }

  #[test]
  fn non_motion_actions_map_to_none() {
    assert_eq!(motion_of(InputAction::Quit), None);
    assert_eq!(
      motion_of(InputAction::Resized {
        width: 800,
        height: 800
      }),
      None
    );
  }
}
