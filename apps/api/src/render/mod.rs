// Layout Renderer
// Turns a resolved section layout, a template descriptor and resume content into
// a RenderTree for the print/export side. Pure; safe to re-run on every edit.

pub mod renderer;
pub mod tree;

pub use renderer::render;
pub use tree::RenderTree;
