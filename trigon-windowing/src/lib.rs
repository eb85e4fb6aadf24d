//! # trigon windowing
//!
//! Base crate for windowing options shared by trigon surface backends. **trigon** abstracts
//! over OpenGL but doesn't open windows nor create contexts; backend crates such as
//! **trigon-glfw** do, and they all accept the option types defined here.

#![deny(missing_docs)]

/// Dimension metrics.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WindowDim {
  /// Windowed mode with the wished resolution.
  Windowed {
    /// Width of the window.
    width: u32,
    /// Height of the window.
    height: u32,
  },
  /// Fullscreen mode, adapting to the primary monitor resolution.
  Fullscreen,
}

/// Window options.
///
/// Start with `default()`, an 800×800 window, and tweak from there.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WindowOpt {
  dim: WindowDim,
}

impl Default for WindowOpt {
  fn default() -> Self {
    WindowOpt {
      dim: WindowDim::Windowed {
        width: 800,
        height: 800,
      },
    }
  }
}

impl WindowOpt {
  /// Set the dimension of the window.
  #[inline]
  pub fn set_dim(self, dim: WindowDim) -> Self {
    WindowOpt { dim }
  }

  /// Get the dimension of the window.
  #[inline]
  pub fn dim(&self) -> WindowDim {
    self.dim
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_is_windowed_800() {
    assert_eq!(
      WindowOpt::default().dim(),
      WindowDim::Windowed {
        width: 800,
        height: 800
      }
    );
  }

  #[test]
  fn set_dim_overrides() {
    let opt = WindowOpt::default().set_dim(WindowDim::Fullscreen);
    assert_eq!(opt.dim(), WindowDim::Fullscreen);
  }
}
