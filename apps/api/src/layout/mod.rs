// Section registry, default layout resolution and page geometry.
// Everything here is pure and synchronous; handlers call it inline.

pub mod font_metrics;
pub mod page_fill;
pub mod resolver;
pub mod sections;

pub use font_metrics::{page_geometry, PageGeometry};
