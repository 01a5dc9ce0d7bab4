//! Default layout resolution and legacy-layout backfill.
//!
//! # Rules
//! - A non-empty stored layout is the starting point; otherwise the template
//!   shape's default split is.
//! - A stored layout arranged for a shape with different sidebar-ness (e.g. made
//!   under a single-column template, now rendered two-column) is discarded and
//!   rebuilt from the new shape's default split.
//! - `basics`, unknown kinds and duplicates are dropped (first occurrence wins,
//!   `main` before `sidebar`).
//! - Single-column shapes have no sidebar region: any sidebar kinds are appended to `main`.
//! - Every placeable kind still missing is appended in canonical order, to
//!   `sidebar` when the shape has one, else to `main`.
//!
//! The input document is never mutated; the caller decides whether to persist.

use std::collections::HashSet;

use tracing::debug;

use crate::layout::sections::{SectionKind, PLACEABLE_KINDS};
use crate::models::resume::{ResumeDocument, SectionLayout};
use crate::templates::{LayoutShape, TemplateStyle};

/// Resolves the effective `{main, sidebar}` assignment for a document under a template.
///
/// The result always contains every kind in [`PLACEABLE_KINDS`] exactly once and is
/// tagged with the template's shape, so resolving it again returns it unchanged.
pub fn resolve_layout(doc: &ResumeDocument, style: &TemplateStyle) -> SectionLayout {
    resolve_for_shape(doc.render_metadata.section_layout.as_ref(), style.layout_shape)
}

/// Shape-level core of [`resolve_layout`].
pub fn resolve_for_shape(stored: Option<&SectionLayout>, shape: LayoutShape) -> SectionLayout {
    let (mut main, mut sidebar) = match stored.filter(|layout| !layout.is_empty()) {
        Some(layout) if is_stale(layout, shape) => {
            debug!(
                "stored layout was arranged for {:?}; rebuilding for {:?}",
                layout.shape, shape
            );
            default_split(shape)
        }
        Some(layout) => (layout.main.clone(), layout.sidebar.clone()),
        None => default_split(shape),
    };

    let mut seen: HashSet<SectionKind> = HashSet::new();
    main.retain(|kind| kind.is_placeable() && seen.insert(*kind));
    sidebar.retain(|kind| kind.is_placeable() && seen.insert(*kind));

    if !shape.has_sidebar() && !sidebar.is_empty() {
        debug!("folding {} sidebar kinds into main for single-column template", sidebar.len());
        main.append(&mut sidebar);
    }

    let missing: Vec<SectionKind> = PLACEABLE_KINDS
        .iter()
        .copied()
        .filter(|kind| !seen.contains(kind))
        .collect();
    if !missing.is_empty() {
        debug!("backfilling missing section kinds: {missing:?}");
        if shape.has_sidebar() {
            sidebar.extend(missing);
        } else {
            main.extend(missing);
        }
    }

    let resolved = SectionLayout {
        main,
        sidebar,
        shape: Some(shape),
    };
    debug_assert!(is_complete(&resolved), "incomplete layout: {resolved:?}");
    resolved
}

/// Built-in split for a layout shape.
pub fn default_split(shape: LayoutShape) -> (Vec<SectionKind>, Vec<SectionKind>) {
    use SectionKind::*;
    match shape {
        LayoutShape::SingleColumn => (PLACEABLE_KINDS.to_vec(), Vec::new()),
        LayoutShape::TwoColumnLeft => (
            vec![Summary, Experience, Projects, Certificates],
            vec![Education, Skills, Languages, Activities],
        ),
        LayoutShape::TwoColumnRight => (
            vec![Summary, Experience, Projects, Certificates],
            vec![Skills, Education, Languages, Activities],
        ),
    }
}

fn is_stale(layout: &SectionLayout, shape: LayoutShape) -> bool {
    matches!(layout.shape, Some(recorded) if recorded.has_sidebar() != shape.has_sidebar())
}

/// Whether `layout` holds every placeable kind exactly once and nothing else.
pub fn is_complete(layout: &SectionLayout) -> bool {
    let mut seen = HashSet::new();
    let all_unique = layout
        .main
        .iter()
        .chain(layout.sidebar.iter())
        .all(|kind| kind.is_placeable() && seen.insert(*kind));
    all_unique && seen.len() == PLACEABLE_KINDS.len()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::resolve_style;
    use SectionKind::*;

    const ALL_SHAPES: [LayoutShape; 3] = [
        LayoutShape::SingleColumn,
        LayoutShape::TwoColumnLeft,
        LayoutShape::TwoColumnRight,
    ];

    fn make_doc(template: &str, layout: Option<SectionLayout>) -> ResumeDocument {
        let mut doc = ResumeDocument::new(None, Some(template), None);
        doc.render_metadata.section_layout = layout;
        doc
    }

    fn layout(main: &[SectionKind], sidebar: &[SectionKind]) -> SectionLayout {
        SectionLayout::new(main.to_vec(), sidebar.to_vec())
    }

    // ── completeness ────────────────────────────────────────────────────────

    #[test]
    fn test_default_splits_are_complete() {
        for shape in ALL_SHAPES {
            let (main, sidebar) = default_split(shape);
            assert!(is_complete(&SectionLayout::new(main, sidebar.clone())), "{shape:?}");
            assert_eq!(sidebar.is_empty(), !shape.has_sidebar());
        }
    }

    #[test]
    fn test_resolution_is_complete_for_assorted_inputs() {
        let inputs = vec![
            None,
            Some(layout(&[], &[])),
            Some(layout(&[Summary], &[])),
            Some(layout(&[Skills, Skills, Basics], &[Skills, Education])),
            Some(layout(&[], &[Projects, Languages])),
        ];
        for shape in ALL_SHAPES {
            for input in &inputs {
                let resolved = resolve_for_shape(input.as_ref(), shape);
                assert!(is_complete(&resolved), "{shape:?} {input:?} -> {resolved:?}");
                if !shape.has_sidebar() {
                    assert!(resolved.sidebar.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_resolution_is_a_fixed_point() {
        for shape in ALL_SHAPES {
            let first = resolve_for_shape(Some(&layout(&[Experience], &[Skills])), shape);
            let second = resolve_for_shape(Some(&first), shape);
            assert_eq!(first, second, "{shape:?}");
        }
    }

    // ── non-destructive backfill ────────────────────────────────────────────

    #[test]
    fn test_complete_layout_is_returned_unchanged() {
        let stored = layout(
            &[Experience, Summary, Projects],
            &[Activities, Languages, Skills, Education, Certificates],
        );
        let doc = make_doc("azurill", Some(stored.clone()));
        let resolved = resolve_layout(&doc, resolve_style("azurill"));
        assert_eq!(resolved.main, stored.main);
        assert_eq!(resolved.sidebar, stored.sidebar);
    }

    #[test]
    fn test_resolve_does_not_mutate_document() {
        let doc = make_doc("onyx", Some(layout(&[Summary], &[])));
        let before = doc.clone();
        let _ = resolve_layout(&doc, resolve_style("onyx"));
        assert_eq!(doc, before);
    }

    // ── legacy migration scenarios ──────────────────────────────────────────

    #[test]
    fn test_legacy_single_column_appends_missing_in_canonical_order() {
        let doc = make_doc("onyx", Some(layout(&[Summary, Experience], &[])));
        let resolved = resolve_layout(&doc, resolve_style("onyx"));
        assert_eq!(
            resolved.main,
            vec![Summary, Experience, Education, Skills, Projects, Certificates, Languages, Activities]
        );
        assert!(resolved.sidebar.is_empty());
    }

    #[test]
    fn test_legacy_two_column_appends_missing_to_sidebar() {
        let doc = make_doc(
            "azurill",
            Some(layout(&[Summary, Experience], &[Education, Skills])),
        );
        let resolved = resolve_layout(&doc, resolve_style("azurill"));
        assert_eq!(resolved.main, vec![Summary, Experience]);
        assert_eq!(
            resolved.sidebar,
            vec![Education, Skills, Projects, Certificates, Languages, Activities]
        );
    }

    #[test]
    fn test_missing_layout_uses_shape_default() {
        let doc = make_doc("chikorita", None);
        let resolved = resolve_layout(&doc, resolve_style("chikorita"));
        let (main, sidebar) = default_split(LayoutShape::TwoColumnRight);
        assert_eq!(resolved.main, main);
        assert_eq!(resolved.sidebar, sidebar);
    }

    #[test]
    fn test_empty_layout_uses_shape_default() {
        let doc = make_doc("onyx", Some(layout(&[], &[])));
        let resolved = resolve_layout(&doc, resolve_style("onyx"));
        assert_eq!(resolved.main, PLACEABLE_KINDS.to_vec());
    }

    #[test]
    fn test_unknown_template_resolves_single_column() {
        let doc = make_doc("nonexistent-xyz", None);
        let resolved = resolve_layout(&doc, resolve_style("nonexistent-xyz"));
        assert_eq!(resolved.shape, Some(LayoutShape::SingleColumn));
        assert_eq!(resolved.main, PLACEABLE_KINDS.to_vec());
    }

    // ── cleanup ─────────────────────────────────────────────────────────────

    #[test]
    fn test_duplicates_and_basics_are_dropped() {
        let stored = layout(&[Basics, Summary, Skills], &[Skills, Summary, Education]);
        let resolved = resolve_for_shape(Some(&stored), LayoutShape::TwoColumnLeft);
        assert_eq!(resolved.main, vec![Summary, Skills]);
        assert_eq!(resolved.sidebar[0], Education);
        assert!(is_complete(&resolved));
    }

    // ── template switches ───────────────────────────────────────────────────

    #[test]
    fn test_single_column_folds_legacy_sidebar_into_main() {
        let stored = layout(&[Summary, Experience], &[Education, Skills]);
        let resolved = resolve_for_shape(Some(&stored), LayoutShape::SingleColumn);
        assert_eq!(&resolved.main[..4], &[Summary, Experience, Education, Skills]);
        assert!(resolved.sidebar.is_empty());
    }

    #[test]
    fn test_switch_single_to_two_column_rebuilds_from_new_default() {
        let single = resolve_for_shape(None, LayoutShape::SingleColumn);
        let resolved = resolve_for_shape(Some(&single), LayoutShape::TwoColumnLeft);
        let (main, sidebar) = default_split(LayoutShape::TwoColumnLeft);
        assert_eq!(resolved.main, main);
        assert_eq!(resolved.sidebar, sidebar);
    }

    #[test]
    fn test_switch_two_column_to_single_rebuilds_from_new_default() {
        let two = resolve_for_shape(None, LayoutShape::TwoColumnRight);
        let resolved = resolve_for_shape(Some(&two), LayoutShape::SingleColumn);
        assert_eq!(resolved.main, PLACEABLE_KINDS.to_vec());
        assert!(resolved.sidebar.is_empty());
    }

    #[test]
    fn test_switch_left_to_right_keeps_user_arrangement() {
        let mut arranged = resolve_for_shape(None, LayoutShape::TwoColumnLeft);
        arranged.main.reverse();
        let resolved = resolve_for_shape(Some(&arranged), LayoutShape::TwoColumnRight);
        assert_eq!(resolved.main, arranged.main);
        assert_eq!(resolved.sidebar, arranged.sidebar);
        assert_eq!(resolved.shape, Some(LayoutShape::TwoColumnRight));
    }
}
