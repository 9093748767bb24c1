pub mod colormap;
pub mod graph;
pub mod layout;
pub mod phase;
pub mod shape;
