//! Page Fill Analysis: checks how a rendered document sits on a single printed page.
//!
//! Operates on the estimated region heights of a `RenderTree`. The verdict and the
//! recommended action are advisory: nothing is ever trimmed from the document.
//!
//! # Fill rules
//! - Tallest region ≤ 100% of the usable page height → fits
//! - Overflow ≤ 5%  → try compact mode first, then moving a section into the sidebar
//! - Overflow > 5%  → try moving a main section into spare sidebar room, then compact mode
//! - Nothing left to try → accept the extra page

use serde::{Deserialize, Serialize};

use crate::layout::sections::{Region, SectionKind};
use crate::render::tree::RenderTree;

/// Overflow fraction at or below which an overflow counts as minor.
pub const MINOR_OVERFLOW_LIMIT: f32 = 0.05;

/// Sections moved into the narrower sidebar grow taller; this is the assumed growth.
const SIDEBAR_GROWTH: f32 = 1.5;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFillVerdict {
    /// Everything fits on one page.
    Fits,
    /// Up to 5% past the page boundary.
    MinorOverflow,
    /// More than 5% past the page boundary.
    MajorOverflow,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFillAnalysis {
    pub used_height_pt: f32,
    pub available_height_pt: f32,
    pub fill_fraction: f32,
    pub whitespace_fraction: f32,
    pub overflow_fraction: f32,
    /// Region whose content is tallest.
    pub tallest_region: Region,
    pub verdict: PageFillVerdict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FillAction {
    NoAction,
    /// Turn on compact spacing.
    EnableCompactMode,
    /// Move this section from the main column into the sidebar.
    MoveSectionToSidebar { kind: SectionKind },
    /// Leave it; the document prints on more than one page.
    AcceptExtraPage,
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Measures the tallest region of `tree` against one usable page height.
pub fn analyze_page_fill(tree: &RenderTree) -> PageFillAnalysis {
    let available = tree.page.usable_height_pt();
    let (tallest_region, used) = tree
        .regions
        .iter()
        .map(|r| (r.region, r.content_height_pt))
        .fold((Region::Main, 0.0_f32), |best, next| {
            if next.1 > best.1 {
                next
            } else {
                best
            }
        });

    let fill_fraction = if available > 0.0 { used / available } else { 0.0 };
    let whitespace_fraction = (1.0_f32 - fill_fraction).max(0.0);
    let overflow_fraction = (fill_fraction - 1.0_f32).max(0.0);

    let verdict = if overflow_fraction > MINOR_OVERFLOW_LIMIT {
        PageFillVerdict::MajorOverflow
    } else if overflow_fraction > 0.0 {
        PageFillVerdict::MinorOverflow
    } else {
        PageFillVerdict::Fits
    };

    PageFillAnalysis {
        used_height_pt: used,
        available_height_pt: available,
        fill_fraction,
        whitespace_fraction,
        overflow_fraction,
        tallest_region,
        verdict,
    }
}

/// Recommends a single remediation step. The caller applies it (or not) and re-renders.
pub fn recommend_fill_action(analysis: &PageFillAnalysis, tree: &RenderTree) -> FillAction {
    let move_candidate = || find_move_candidate(analysis, tree);
    match analysis.verdict {
        PageFillVerdict::Fits => FillAction::NoAction,

        PageFillVerdict::MinorOverflow => {
            if !tree.compact {
                FillAction::EnableCompactMode
            } else if let Some(kind) = move_candidate() {
                FillAction::MoveSectionToSidebar { kind }
            } else {
                FillAction::AcceptExtraPage
            }
        }

        PageFillVerdict::MajorOverflow => {
            if let Some(kind) = move_candidate() {
                FillAction::MoveSectionToSidebar { kind }
            } else if !tree.compact {
                FillAction::EnableCompactMode
            } else {
                FillAction::AcceptExtraPage
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

/// Bottom-most main section that would still fit in the sidebar's spare room.
///
/// Only applies when the main column is the one overflowing and the template has
/// a sidebar at all.
fn find_move_candidate(analysis: &PageFillAnalysis, tree: &RenderTree) -> Option<SectionKind> {
    if analysis.tallest_region != Region::Main {
        return None;
    }
    let sidebar = tree.region(Region::Sidebar)?;
    let main = tree.region(Region::Main)?;
    let room = analysis.available_height_pt - sidebar.content_height_pt;
    if room <= 0.0 {
        return None;
    }
    main.sections
        .iter()
        .rev()
        .find(|s| s.estimated_height_pt * SIDEBAR_GROWTH <= room)
        .map(|s| s.kind)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
