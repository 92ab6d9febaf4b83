mod component;
mod render;
mod state;
mod style;

pub use component::ForceGraphCanvas;
