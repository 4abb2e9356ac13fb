/// Container path listing command.
pub mod containers;
/// Session-level information command.
pub mod info;
/// Live2D model export command.
pub mod live2d;
/// Game-object hierarchy command.
pub mod tree;

#[cfg(test)]
pub(crate) mod test_support;
pub(crate) mod util;
