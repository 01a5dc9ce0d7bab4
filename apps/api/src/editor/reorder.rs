//! Section reorder controller.
//!
//! `validate_reorder` guards the single layout mutation. `DragController` is the
//! three-state gesture machine (`Idle → Dragging → Dropped | Cancelled`) that
//! turns one completed drag into the pair of arrays handed to `reorder`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::sections::{Region, SectionKind, PLACEABLE_KINDS};
use crate::models::resume::SectionLayout;
use crate::templates::LayoutShape;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReorderError {
    #[error("section '{0}' appears more than once")]
    Duplicate(SectionKind),

    #[error("section '{0}' is missing from the new layout")]
    Missing(SectionKind),

    #[error("section '{0}' cannot be placed in a layout region")]
    NotPlaceable(SectionKind),

    #[error("template has no sidebar but {0} section(s) were assigned to it")]
    SidebarUnavailable(usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DragError {
    #[error("a drag of '{0}' is already in progress")]
    AlreadyDragging(SectionKind),

    #[error("no drag in progress")]
    NotDragging,

    #[error("section '{0}' is not in the current layout")]
    NotInLayout(SectionKind),
}

/// Checks a proposed `{main, sidebar}` pair and returns it as a layout tagged with `shape`.
///
/// The pair must hold every placeable kind exactly once; a sidebar is only
/// accepted when the shape has one.
pub fn validate_reorder(
    main: &[SectionKind],
    sidebar: &[SectionKind],
    shape: LayoutShape,
) -> Result<SectionLayout, ReorderError> {
    if !shape.has_sidebar() && !sidebar.is_empty() {
        return Err(ReorderError::SidebarUnavailable(sidebar.len()));
    }

    let mut seen = HashSet::new();
    for kind in main.iter().chain(sidebar.iter()) {
        if !kind.is_placeable() {
            return Err(ReorderError::NotPlaceable(*kind));
        }
        if !seen.insert(*kind) {
            return Err(ReorderError::Duplicate(*kind));
        }
    }
    if let Some(missing) = PLACEABLE_KINDS.iter().find(|k| !seen.contains(k)) {
        return Err(ReorderError::Missing(*missing));
    }

    Ok(SectionLayout {
        main: main.to_vec(),
        sidebar: sidebar.to_vec(),
        shape: Some(shape),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Drag state machine
// ────────────────────────────────────────────────────────────────────────────

/// Where a dragged section was released: a region and an index into that
/// region's array as it looks with the dragged section taken out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTarget {
    pub region: Region,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    Idle,
    Dragging {
        kind: SectionKind,
        from: Region,
        from_index: usize,
        /// Layout as it was when the gesture started.
        snapshot: SectionLayout,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DragOutcome {
    /// The gesture completed; `layout` is what to pass to `reorder`.
    Dropped { layout: SectionLayout },
    /// Released outside any valid region, or cancelled explicitly.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragController {
    state: DragState,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    pub fn new() -> Self {
        DragController {
            state: DragState::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Picks up `kind` from `layout`. Only one gesture may be active.
    pub fn begin(&mut self, layout: &SectionLayout, kind: SectionKind) -> Result<(), DragError> {
        if let DragState::Dragging { kind: active, .. } = &self.state {
            return Err(DragError::AlreadyDragging(*active));
        }
        let (from, from_index) = locate(layout, kind).ok_or(DragError::NotInLayout(kind))?;
        self.state = DragState::Dragging {
            kind,
            from,
            from_index,
            snapshot: layout.clone(),
        };
        Ok(())
    }

    /// Ends the gesture. A missing target, or a sidebar target on a shape
    /// without one, cancels it.
    pub fn drop_at(
        &mut self,
        target: Option<DropTarget>,
        shape: LayoutShape,
    ) -> Result<DragOutcome, DragError> {
        let DragState::Dragging { kind, snapshot, .. } =
            std::mem::replace(&mut self.state, DragState::Idle)
        else {
            return Err(DragError::NotDragging);
        };

        let target = match target {
            Some(t) if t.region == Region::Sidebar && !shape.has_sidebar() => None,
            other => other,
        };
        Ok(match target {
            Some(target) => DragOutcome::Dropped {
                layout: move_section(&snapshot, kind, target),
            },
            None => DragOutcome::Cancelled,
        })
    }

    /// Abandons the active gesture. The layout is never touched.
    pub fn cancel(&mut self) -> Result<DragOutcome, DragError> {
        if !self.is_dragging() {
            return Err(DragError::NotDragging);
        }
        self.state = DragState::Idle;
        Ok(DragOutcome::Cancelled)
    }
}

fn locate(layout: &SectionLayout, kind: SectionKind) -> Option<(Region, usize)> {
    if let Some(i) = layout.main.iter().position(|k| *k == kind) {
        return Some((Region::Main, i));
    }
    layout
        .sidebar
        .iter()
        .position(|k| *k == kind)
        .map(|i| (Region::Sidebar, i))
}

/// Removes `kind` from wherever it is and inserts it at `target`. Indices past
/// the end append.
pub fn move_section(layout: &SectionLayout, kind: SectionKind, target: DropTarget) -> SectionLayout {
    let mut next = layout.clone();
    next.main.retain(|k| *k != kind);
    next.sidebar.retain(|k| *k != kind);
    let dest = match target.region {
        Region::Main => &mut next.main,
        Region::Sidebar => &mut next.sidebar,
    };
    let index = target.index.min(dest.len());
    dest.insert(index, kind);
    next
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
