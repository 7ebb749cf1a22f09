//! Node trait definitions.
//!
//! Each link is an `Option<u32>` index into a slice-backed arena. Tree
//! functions take the arena as `&[N]` / `&mut [N]` and work with indices,
//! so a node type only has to expose its three links.

/// Binary-tree links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

