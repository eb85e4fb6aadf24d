//! Vertex layout description.
//!
//! Meshes store tightly interleaved `f32` attributes. A [`VertexDesc`] lists the attribute
//! dimensions in declaration order; attribute indices in the shader are the positions in
//! that list.

use std::mem;

/// A single vertex attribute: its number of `f32` components.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VertexAttribDesc {
  /// Number of components, 1 to 4.
  pub dim: usize,
}

/// An ordered description of the attributes of one vertex.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VertexDesc {
  attribs: Vec<VertexAttribDesc>,
}

impl VertexDesc {
  /// An empty description; chain [`VertexDesc::with_attribute`] to populate it.
  pub fn new() -> Self {
    Self::default()
  }

  /// Append an attribute of `dim` components.
  pub fn with_attribute(mut self, dim: usize) -> Self {
    self.attribs.push(VertexAttribDesc { dim });
    self
  }

  /// Total number of `f32` components per vertex.
  pub fn components(&self) -> usize {
    self.attribs.iter().map(|a| a.dim).sum()
  }

  /// Byte stride of one interleaved vertex.
  pub fn stride(&self) -> usize {
    self.components() * mem::size_of::<f32>()
  }

  /// Attributes with their byte offsets into one vertex, in index order.
  pub(crate) fn attribs_with_offsets(&self) -> impl Iterator<Item = (VertexAttribDesc, usize)> + '_ {
    self.attribs.iter().scan(0, |offset, attrib| {
      let current = *offset;
      *offset += attrib.dim * mem::size_of::<f32>();
      Some((*attrib, current))
    })
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.attribs.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn position_only() {
    let desc = VertexDesc::new().with_attribute(3);
    assert_eq!(desc.components(), 3);
    assert_eq!(desc.stride(), 12);
  }

  #[test]
  fn position_and_color() {
    let desc = VertexDesc::new().with_attribute(3).with_attribute(3);
    assert_eq!(desc.components(), 6);
    assert_eq!(desc.stride(), 24);
  }

  #[test]
  fn interleaved_offsets() {
    let desc = VertexDesc::new().with_attribute(3).with_attribute(3);
    let offsets: Vec<_> = desc.attribs_with_offsets().map(|(_, o)| o).collect();
    assert_eq!(offsets, vec![0, 12]);
  }

  #[test]
  fn empty_desc() {
    let desc = VertexDesc::new();
    assert!(desc.is_empty());
    assert_eq!(desc.stride(), 0);
  }
}
