// Template Style Registry
// Static, read-only catalog of built-in templates. Unknown ids resolve to the
// default descriptor.

pub mod handlers;
pub mod registry;

pub use registry::{
    catalog, deserialize_shape_lenient, resolve_style, HeaderPlacement, LayoutShape,
    TemplateCatalogEntry, TemplateStyle, DEFAULT_TEMPLATE_ID,
};
