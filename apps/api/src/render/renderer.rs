//! Layout renderer: resolved layout + descriptor + content → `RenderTree`.
//!
//! Pure and synchronous. Section presence is decided here (empty sections emit
//! nothing); region membership and order come from the resolved layout as-is.
//! Heights are estimates from the static glyph tables and only drive the
//! advisory page-break markers.

use crate::layout::font_metrics::{get_metrics, FontFamily, FontMetricTable, PageGeometry};
use crate::layout::sections::{Region, SectionKind};
use crate::models::resume::{ResumeBasics, ResumeContent, ResumeDocument, SectionLayout};
use crate::render::tree::{
    ContactEntry, ContactKind, ContactPlacement, HeaderBlock, ItemArrangement, ItemNode,
    PageBreak, PhotoSlot, RegionNode, RenderTree, SectionBlock, SpacingTokens, COMPACT_SPACING,
    NORMAL_SPACING, PREVIEW_ROOT_ID, SKILL_STAR_THRESHOLD,
};
use crate::templates::{HeaderPlacement, LayoutShape, TemplateStyle};

// Estimation constants, in points unless noted.
const NAME_SCALE: f32 = 2.4;
const HEADLINE_SCALE: f32 = 1.4;
const TITLE_SCALE: f32 = 1.3;
const TITLE_MARGIN_PT: f32 = 6.0;
const INLINE_PHOTO_PT: f32 = 72.0;
const AVATAR_PT: f32 = 60.0;
const AVATAR_MARGIN_PT: f32 = 12.0;
const CONTACT_SEPARATOR: &str = "    ";
const CHIP_SEPARATOR: &str = "      ";

/// Renders `doc` with `style` using an already-resolved `layout`.
pub fn render(
    doc: &ResumeDocument,
    style: &'static TemplateStyle,
    layout: &SectionLayout,
    page: &PageGeometry,
) -> RenderTree {
    let metadata = &doc.render_metadata;
    let font = metadata
        .font
        .as_deref()
        .and_then(FontFamily::parse)
        .unwrap_or(style.font);
    let spacing = if metadata.compact_mode {
        COMPACT_SPACING
    } else {
        NORMAL_SPACING
    };
    let ctx = RenderContext {
        style,
        spacing,
        metrics: get_metrics(font),
        size_pt: page.body_size_pt,
        page,
    };

    let header = ctx.header(&doc.content.basics);

    let mut regions = Vec::with_capacity(2);
    let main = ctx.region(Region::Main, &layout.main, &doc.content, &header);
    if style.layout_shape.has_sidebar() {
        let sidebar = ctx.region(Region::Sidebar, &layout.sidebar, &doc.content, &header);
        match style.layout_shape {
            LayoutShape::TwoColumnLeft => regions.extend([sidebar, main]),
            _ => regions.extend([main, sidebar]),
        }
    } else {
        regions.push(main);
    }

    let usable = page.usable_height_pt();
    let page_breaks = regions
        .iter()
        .flat_map(|r| page_breaks(r, &header, usable))
        .collect::<Vec<_>>();
    let page_count = regions
        .iter()
        .map(|r| pages_for(r.content_height_pt, usable))
        .max()
        .unwrap_or(1);

    RenderTree {
        root_id: PREVIEW_ROOT_ID,
        template_id: style.id,
        layout_shape: style.layout_shape,
        font,
        container_token: container_token(style.tokens.container, font),
        colors: metadata.colors.clone(),
        compact: metadata.compact_mode,
        spacing,
        page: page.clone(),
        header,
        regions,
        page_breaks,
        page_count,
    }
}

/// Swaps the family class in a template's container token for `font`'s.
fn container_token(template_token: &str, font: FontFamily) -> String {
    const FAMILY_CLASSES: [&str; 3] = ["font-sans", "font-serif", "font-mono"];
    let mut classes: Vec<&str> = template_token
        .split_whitespace()
        .filter(|class| !FAMILY_CLASSES.contains(class))
        .collect();
    classes.insert(0, font.token());
    classes.join(" ")
}

struct RenderContext<'a> {
    style: &'static TemplateStyle,
    spacing: SpacingTokens,
    metrics: &'static FontMetricTable,
    size_pt: f32,
    page: &'a PageGeometry,
}

impl RenderContext<'_> {
    fn line_pt(&self) -> f32 {
        self.size_pt * self.spacing.line_height
    }

    fn width_em(&self, region: Region) -> f32 {
        let fraction = match (self.style.layout_shape.has_sidebar(), region) {
            (false, _) => 1.0,
            (true, Region::Sidebar) => self.style.sidebar_fraction,
            (true, Region::Main) => 1.0 - self.style.sidebar_fraction,
        };
        self.page.column_width_em(fraction, self.size_pt)
    }

    fn lines(&self, text: &str, region: Region) -> u32 {
        self.metrics.wrapped_lines(text, self.width_em(region))
    }

    // ── header ──────────────────────────────────────────────────────────────

    fn header(&self, basics: &ResumeBasics) -> HeaderBlock {
        let style = self.style;
        let region = match style.header_placement {
            HeaderPlacement::Sidebar if style.layout_shape.has_sidebar() => Region::Sidebar,
            _ => Region::Main,
        };
        let photo_src = basics
            .photo
            .as_deref()
            .map(str::trim)
            .filter(|src| !src.is_empty() && style.has_photo)
            .map(str::to_string);

        let (photo, contact_placement) = match region {
            Region::Sidebar if style.has_photo => {
                (PhotoSlot::Avatar { src: photo_src }, ContactPlacement::WithName)
            }
            Region::Sidebar => (PhotoSlot::Absent, ContactPlacement::WithName),
            Region::Main => match photo_src {
                Some(src) => (PhotoSlot::Inline { src }, ContactPlacement::BelowRow),
                None if style.layout_shape.has_sidebar() => {
                    (PhotoSlot::Absent, ContactPlacement::BelowRow)
                }
                None => (PhotoSlot::Absent, ContactPlacement::WithName),
            },
        };
        let centered = !style.layout_shape.has_sidebar() && photo == PhotoSlot::Absent;

        let headline = non_blank(&basics.headline);
        let contacts = contacts(basics);

        let mut header = HeaderBlock {
            region,
            token: style.tokens.header,
            name_token: style.tokens.name,
            headline_token: style.tokens.headline,
            contact_token: style.tokens.contact_row,
            name: basics.name.trim().to_string(),
            headline,
            contacts,
            contact_placement,
            photo,
            centered,
            estimated_height_pt: 0.0,
        };
        header.estimated_height_pt = self.header_height(&header);
        header
    }

    fn header_height(&self, header: &HeaderBlock) -> f32 {
        let region = header.region;
        let mut name_block = self.size_pt * NAME_SCALE * 1.2;
        if let Some(headline) = &header.headline {
            let line = self.size_pt * HEADLINE_SCALE * self.spacing.line_height;
            name_block += self.lines(headline, region) as f32 * line;
        }

        let contact_height = if header.contacts.is_empty() {
            0.0
        } else if region == Region::Sidebar {
            header.contacts.len() as f32 * self.line_pt()
        } else {
            let joined = header
                .contacts
                .iter()
                .map(|c| c.value.as_str())
                .collect::<Vec<_>>()
                .join(CONTACT_SEPARATOR);
            self.lines(&joined, region) as f32 * self.line_pt()
        };

        let body = match &header.photo {
            PhotoSlot::Inline { .. } => name_block.max(INLINE_PHOTO_PT) + contact_height,
            PhotoSlot::Avatar { .. } => {
                AVATAR_PT + AVATAR_MARGIN_PT + name_block + contact_height
            }
            PhotoSlot::Absent => name_block + contact_height,
        };
        body + self.spacing.section_gap_pt
    }

    // ── regions ─────────────────────────────────────────────────────────────

    fn region(
        &self,
        region: Region,
        kinds: &[SectionKind],
        content: &ResumeContent,
        header: &HeaderBlock,
    ) -> RegionNode {
        let sections: Vec<SectionBlock> = kinds
            .iter()
            .filter_map(|kind| self.section(*kind, region, content))
            .collect();
        let header_height = if header.region == region {
            header.estimated_height_pt
        } else {
            0.0
        };
        let content_height_pt =
            header_height + sections.iter().map(|s| s.estimated_height_pt).sum::<f32>();
        let token = match region {
            Region::Main => self.style.tokens.main,
            Region::Sidebar => self.style.tokens.sidebar,
        };
        RegionNode {
            region,
            token,
            sections,
            content_height_pt,
        }
    }

    /// Builds one section block, or `None` when the section has nothing visible.
    fn section(
        &self,
        kind: SectionKind,
        region: Region,
        content: &ResumeContent,
    ) -> Option<SectionBlock> {
        if !kind.is_placeable() || !content.has_renderable(kind) {
            return None;
        }
        let items = self.items(kind, content);
        if items.is_empty() {
            return None;
        }
        let arrangement = if kind == SectionKind::Skills && region == Region::Main {
            ItemArrangement::Chips
        } else {
            ItemArrangement::Stacked
        };

        let title_height = self.size_pt * TITLE_SCALE * self.spacing.line_height + TITLE_MARGIN_PT;
        let items_height = match arrangement {
            ItemArrangement::Chips => {
                let joined = items
                    .iter()
                    .filter_map(|item| match item {
                        ItemNode::Skill { name, .. } => Some(name.as_str()),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
                    .join(CHIP_SEPARATOR);
                self.lines(&joined, region) as f32 * (self.line_pt() + 4.0)
            }
            ItemArrangement::Stacked => {
                let gaps = items.len().saturating_sub(1) as f32 * self.spacing.item_gap_pt;
                items.iter().map(|item| self.item_height(item, region)).sum::<f32>() + gaps
            }
        };

        Some(SectionBlock {
            kind,
            region,
            title: self.style.section_title(kind),
            title_token: self.style.title_token(region),
            arrangement,
            items,
            estimated_height_pt: title_height + items_height + self.spacing.section_gap_pt,
        })
    }

    fn item_height(&self, item: &ItemNode, region: Region) -> f32 {
        let lines = match item {
            ItemNode::Text { text } => self.lines(text, region),
            ItemNode::Entry {
                title,
                subtitle,
                period,
                location,
                description,
                link,
                tags,
                ..
            } => {
                let heading = match period {
                    Some(period) => format!("{title}  {period}"),
                    None => title.clone(),
                };
                let sub = [subtitle.as_deref(), location.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(" • ");
                self.lines(&heading, region)
                    + self.lines(&sub, region)
                    + description.as_deref().map_or(0, |d| self.lines(d, region))
                    + link.as_deref().map_or(0, |l| self.lines(l, region))
                    + self.lines(&tags.join(", "), region)
            }
            ItemNode::Skill { .. } | ItemNode::Language { .. } => 1,
        };
        lines as f32 * self.line_pt()
    }

    // ── items ───────────────────────────────────────────────────────────────

    fn items(&self, kind: SectionKind, content: &ResumeContent) -> Vec<ItemNode> {
        match kind {
            SectionKind::Basics => Vec::new(),
            SectionKind::Summary => non_blank(&content.basics.summary)
                .map(|text| vec![ItemNode::Text { text }])
                .unwrap_or_default(),
            SectionKind::Experience => content
                .experience
                .iter()
                .filter(|i| i.visible)
                .map(|i| ItemNode::Entry {
                    id: i.id.clone(),
                    title: i.position.clone(),
                    subtitle: non_blank(&i.company),
                    period: period(&i.start_date, &i.end_date),
                    location: non_blank(&i.location),
                    description: non_blank(&i.description),
                    link: None,
                    tags: Vec::new(),
                })
                .collect(),
            SectionKind::Education => content
                .education
                .iter()
                .filter(|i| i.visible)
                .map(|i| ItemNode::Entry {
                    id: i.id.clone(),
                    title: i.school.clone(),
                    subtitle: degree_line(&i.degree, &i.field),
                    period: period(&i.start_date, &i.end_date),
                    location: None,
                    description: non_blank(&i.description),
                    link: None,
                    tags: Vec::new(),
                })
                .collect(),
            SectionKind::Skills => content
                .skills
                .iter()
                .filter(|i| i.visible)
                .map(|i| ItemNode::Skill {
                    id: i.id.clone(),
                    name: i.name.clone(),
                    level: i.level,
                    starred: i.level > SKILL_STAR_THRESHOLD,
                    token: self.style.tokens.skill_chip,
                })
                .collect(),
            SectionKind::Certificates => content
                .certificates
                .iter()
                .filter(|i| i.visible)
                .map(|i| ItemNode::Entry {
                    id: i.id.clone(),
                    title: i.name.clone(),
                    subtitle: non_blank(&i.issuer),
                    period: non_blank(&i.date),
                    location: None,
                    description: None,
                    link: i.url.as_deref().and_then(non_blank),
                    tags: Vec::new(),
                })
                .collect(),
            SectionKind::Activities => content
                .activities
                .iter()
                .filter(|i| i.visible)
                .map(|i| ItemNode::Entry {
                    id: i.id.clone(),
                    title: i.name.clone(),
                    subtitle: None,
                    period: None,
                    location: None,
                    description: non_blank(&i.description),
                    link: None,
                    tags: Vec::new(),
                })
                .collect(),
            SectionKind::Languages => content
                .languages
                .iter()
                .filter(|i| i.visible)
                .map(|i| ItemNode::Language {
                    id: i.id.clone(),
                    name: i.name.clone(),
                    fluency: non_blank(&i.fluency),
                })
                .collect(),
            SectionKind::Projects => content
                .projects
                .iter()
                .filter(|i| i.visible)
                .map(|i| ItemNode::Entry {
                    id: i.id.clone(),
                    title: i.name.clone(),
                    subtitle: None,
                    period: None,
                    location: None,
                    description: non_blank(&i.description),
                    link: i.link.as_deref().and_then(non_blank),
                    tags: i
                        .tech_stack
                        .iter()
                        .filter(|t| !t.trim().is_empty())
                        .cloned()
                        .collect(),
                })
                .collect(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn contacts(basics: &ResumeBasics) -> Vec<ContactEntry> {
    [
        (ContactKind::Email, &basics.email),
        (ContactKind::Phone, &basics.phone),
        (ContactKind::Location, &basics.location),
        (ContactKind::Website, &basics.website),
    ]
    .into_iter()
    .filter_map(|(kind, value)| non_blank(value).map(|value| ContactEntry { kind, value }))
    .collect()
}

fn period(start: &str, end: &str) -> Option<String> {
    match (non_blank(start), non_blank(end)) {
        (Some(start), Some(end)) => Some(format!("{start} - {end}")),
        (Some(one), None) | (None, Some(one)) => Some(one),
        (None, None) => None,
    }
}

fn degree_line(degree: &str, field: &str) -> Option<String> {
    match (non_blank(degree), non_blank(field)) {
        (Some(degree), Some(field)) => Some(format!("{degree} in {field}")),
        (Some(one), None) | (None, Some(one)) => Some(one),
        (None, None) => None,
    }
}

fn pages_for(height_pt: f32, usable_pt: f32) -> u32 {
    if height_pt <= usable_pt || usable_pt <= 0.0 {
        1
    } else {
        (height_pt / usable_pt).ceil() as u32
    }
}

/// Markers at every multiple of the usable page height the region's content crosses.
fn page_breaks(region: &RegionNode, header: &HeaderBlock, usable_pt: f32) -> Vec<PageBreak> {
    let pages = pages_for(region.content_height_pt, usable_pt);
    let header_height = if header.region == region.region {
        header.estimated_height_pt
    } else {
        0.0
    };

    (1..pages)
        .map(|n| {
            let offset_pt = n as f32 * usable_pt;
            let mut top = header_height;
            let within = if offset_pt < header_height {
                None
            } else {
                region
                    .sections
                    .iter()
                    .find(|s| {
                        let bottom = top + s.estimated_height_pt;
                        let hit = offset_pt < bottom;
                        top = bottom;
                        hit
                    })
                    .map(|s| s.kind)
            };
            PageBreak {
                region: region.region,
                page: n + 1,
                offset_pt,
                within,
            }
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{page_geometry, PaperSize};
    use crate::layout::resolver::resolve_layout;
    use crate::models::resume::{
        EducationItem, ExperienceItem, LanguageItem, ProjectItem, SkillItem,
    };
    use crate::templates::resolve_style;

    const ALL_TEMPLATES: [&str; 10] = [
        "onyx", "azurill", "bronzor", "chikorita", "ditto", "gengar", "glalie", "kakuna",
        "lapras", "leafish",
    ];

    fn make_experience(id: &str, visible: bool) -> ExperienceItem {
        ExperienceItem {
            id: id.to_string(),
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            location: "Berlin".to_string(),
            start_date: "2020".to_string(),
            end_date: "Present".to_string(),
            description: "Built the billing pipeline.".to_string(),
            visible,
        }
    }

    fn make_skill(id: &str, name: &str, level: u8) -> SkillItem {
        SkillItem {
            id: id.to_string(),
            name: name.to_string(),
            level,
            visible: true,
        }
    }

    fn make_doc(template: &str) -> ResumeDocument {
        let mut doc = ResumeDocument::new(Some("Test"), Some(template), None);
        let basics = &mut doc.content.basics;
        basics.name = "Ada Lovelace".to_string();
        basics.headline = "Analyst".to_string();
        basics.email = "ada@example.com".to_string();
        basics.location = "London".to_string();
        basics.summary = "Writes programs for engines.".to_string();
        doc.content.experience.push(make_experience("e1", true));
        doc.content.education.push(EducationItem {
            id: "ed1".to_string(),
            school: "University of London".to_string(),
            degree: "BSc".to_string(),
            field: "Mathematics".to_string(),
            start_date: "1830".to_string(),
            end_date: "1834".to_string(),
            description: String::new(),
            visible: true,
        });
        doc.content.skills.push(make_skill("s1", "Rust", 4));
        doc
    }

    fn render_doc(doc: &ResumeDocument) -> RenderTree {
        let style = resolve_style(&doc.render_metadata.template_id);
        let layout = resolve_layout(doc, style);
        render(doc, style, &layout, &page_geometry(PaperSize::A4))
    }

    // ── presence ────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_experience_omitted_for_every_template() {
        for template in ALL_TEMPLATES {
            let mut doc = make_doc(template);
            doc.content.experience.clear();
            let tree = render_doc(&doc);
            assert!(
                tree.sections().all(|s| s.kind != SectionKind::Experience),
                "{template}"
            );
            assert!(
                !tree.titles().iter().any(|t| t.contains("Experience")),
                "{template}: {:?}",
                tree.titles()
            );
        }
    }

    #[test]
    fn test_hidden_items_are_not_rendered() {
        let mut doc = make_doc("onyx");
        doc.content.experience.push(make_experience("e2", false));
        let tree = render_doc(&doc);
        let block = tree
            .sections()
            .find(|s| s.kind == SectionKind::Experience)
            .unwrap();
        assert_eq!(block.items.len(), 1);
    }

    #[test]
    fn test_all_hidden_items_omits_section() {
        let mut doc = make_doc("onyx");
        doc.content.experience = vec![make_experience("e1", false)];
        let tree = render_doc(&doc);
        assert!(tree.sections().all(|s| s.kind != SectionKind::Experience));
    }

    #[test]
    fn test_blank_summary_omitted() {
        let mut doc = make_doc("gengar");
        doc.content.basics.summary = "  ".to_string();
        let tree = render_doc(&doc);
        assert!(tree.sections().all(|s| s.kind != SectionKind::Summary));
    }

    #[test]
    fn test_every_rendered_section_appears_once() {
        for template in ALL_TEMPLATES {
            let mut doc = make_doc(template);
            doc.content.languages.push(LanguageItem {
                id: "l1".to_string(),
                name: "French".to_string(),
                fluency: "Fluent".to_string(),
                visible: true,
            });
            let tree = render_doc(&doc);
            let mut kinds: Vec<_> = tree.sections().map(|s| s.kind).collect();
            let count = kinds.len();
            kinds.sort();
            kinds.dedup();
            assert_eq!(kinds.len(), count, "{template}");
            assert_eq!(count, 5, "{template}");
        }
    }

    // ── ordering ────────────────────────────────────────────────────────────

    #[test]
    fn test_sections_follow_layout_order() {
        let doc = make_doc("onyx");
        let style = resolve_style("onyx");
        let layout = SectionLayout::new(
            vec![SectionKind::Skills, SectionKind::Experience, SectionKind::Summary],
            Vec::new(),
        );
        let tree = render(&doc, style, &layout, &page_geometry(PaperSize::A4));
        let kinds: Vec<_> = tree.sections().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SectionKind::Skills, SectionKind::Experience, SectionKind::Summary]
        );
    }

    #[test]
    fn test_items_keep_stored_order() {
        let mut doc = make_doc("onyx");
        doc.content.skills = vec![
            make_skill("b", "Go", 2),
            make_skill("a", "Rust", 5),
            make_skill("c", "SQL", 3),
        ];
        let tree = render_doc(&doc);
        let block = tree.sections().find(|s| s.kind == SectionKind::Skills).unwrap();
        let ids: Vec<_> = block
            .items
            .iter()
            .map(|i| match i {
                ItemNode::Skill { id, .. } => id.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_region_order_follows_shape() {
        let left = render_doc(&make_doc("gengar"));
        assert_eq!(left.regions[0].region, Region::Sidebar);
        let right = render_doc(&make_doc("chikorita"));
        assert_eq!(right.regions[0].region, Region::Main);
        assert_eq!(right.regions[1].region, Region::Sidebar);
        let single = render_doc(&make_doc("onyx"));
        assert_eq!(single.regions.len(), 1);
    }

    // ── tokens and titles ───────────────────────────────────────────────────

    #[test]
    fn test_region_title_tokens_differ() {
        let tree = render_doc(&make_doc("azurill"));
        let style = resolve_style("azurill");
        for block in tree.sections() {
            assert_eq!(block.title_token, style.title_token(block.region));
        }
        let sidebar = tree.region(Region::Sidebar).unwrap();
        assert!(!sidebar.sections.is_empty());
        assert_ne!(
            style.title_token(Region::Main),
            style.title_token(Region::Sidebar)
        );
    }

    #[test]
    fn test_title_overrides_apply() {
        let tree = render_doc(&make_doc("chikorita"));
        assert!(tree.titles().contains(&"Professional Summary"));
        assert!(tree.titles().contains(&"Work Experience"));
        let onyx = render_doc(&make_doc("onyx"));
        assert!(onyx.titles().contains(&"Profile"));
    }

    #[test]
    fn test_skills_are_chips_in_main_and_stacked_in_sidebar() {
        let onyx = render_doc(&make_doc("onyx"));
        let block = onyx.sections().find(|s| s.kind == SectionKind::Skills).unwrap();
        assert_eq!(block.arrangement, ItemArrangement::Chips);
        let gengar = render_doc(&make_doc("gengar"));
        let block = gengar.sections().find(|s| s.kind == SectionKind::Skills).unwrap();
        assert_eq!(block.region, Region::Sidebar);
        assert_eq!(block.arrangement, ItemArrangement::Stacked);
    }

    // ── skill star ──────────────────────────────────────────────────────────

    #[test]
    fn test_skill_star_threshold() {
        let mut doc = make_doc("onyx");
        doc.content.skills = vec![make_skill("s3", "Go", 3), make_skill("s4", "Rust", 4)];
        let tree = render_doc(&doc);
        let block = tree.sections().find(|s| s.kind == SectionKind::Skills).unwrap();
        let stars: Vec<bool> = block
            .items
            .iter()
            .map(|i| matches!(i, ItemNode::Skill { starred: true, .. }))
            .collect();
        assert_eq!(stars, vec![false, true]);
    }

    // ── header ──────────────────────────────────────────────────────────────

    #[test]
    fn test_single_column_without_photo_is_centered() {
        let tree = render_doc(&make_doc("onyx"));
        assert_eq!(tree.header.region, Region::Main);
        assert_eq!(tree.header.photo, PhotoSlot::Absent);
        assert_eq!(tree.header.contact_placement, ContactPlacement::WithName);
        assert!(tree.header.centered);
    }

    #[test]
    fn test_single_column_with_photo_is_inline() {
        let mut doc = make_doc("onyx");
        doc.content.basics.photo = Some("https://cdn.example.com/ada.png".to_string());
        let tree = render_doc(&doc);
        assert!(matches!(tree.header.photo, PhotoSlot::Inline { .. }));
        assert_eq!(tree.header.contact_placement, ContactPlacement::BelowRow);
        assert!(!tree.header.centered);
    }

    #[test]
    fn test_photo_ignored_when_template_has_no_slot() {
        let mut doc = make_doc("glalie");
        doc.content.basics.photo = Some("https://cdn.example.com/ada.png".to_string());
        let tree = render_doc(&doc);
        assert_eq!(tree.header.photo, PhotoSlot::Absent);
    }

    #[test]
    fn test_sidebar_header_uses_avatar_placeholder() {
        let tree = render_doc(&make_doc("leafish"));
        assert_eq!(tree.header.region, Region::Sidebar);
        assert_eq!(tree.header.photo, PhotoSlot::Avatar { src: None });
    }

    #[test]
    fn test_main_header_in_two_column_puts_contacts_below() {
        let tree = render_doc(&make_doc("azurill"));
        assert_eq!(tree.header.region, Region::Main);
        assert_eq!(tree.header.contact_placement, ContactPlacement::BelowRow);
    }

    #[test]
    fn test_blank_contacts_are_skipped() {
        let tree = render_doc(&make_doc("onyx"));
        let kinds: Vec<_> = tree.header.contacts.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ContactKind::Email, ContactKind::Location]);
    }

    // ── density and fonts ───────────────────────────────────────────────────

    #[test]
    fn test_compact_mode_changes_spacing_not_content() {
        let doc = make_doc("onyx");
        let mut compact = doc.clone();
        compact.render_metadata.compact_mode = true;
        let normal_tree = render_doc(&doc);
        let compact_tree = render_doc(&compact);
        assert_eq!(normal_tree.titles(), compact_tree.titles());
        assert_eq!(compact_tree.spacing, COMPACT_SPACING);
        assert!(
            compact_tree.regions[0].content_height_pt < normal_tree.regions[0].content_height_pt
        );
    }

    #[test]
    fn test_font_override_and_fallback() {
        let mut doc = make_doc("onyx");
        doc.render_metadata.font = Some("Georgia".to_string());
        assert_eq!(render_doc(&doc).font, FontFamily::Serif);
        doc.render_metadata.font = Some("Wingdings".to_string());
        assert_eq!(render_doc(&doc).font, FontFamily::Sans);
    }

    #[test]
    fn test_container_token_follows_font_override() {
        let mut doc = make_doc("onyx");
        assert_eq!(render_doc(&doc).container_token, "font-sans bg-white text-gray-900");
        doc.render_metadata.font = Some("mono".to_string());
        let tree = render_doc(&doc);
        assert_eq!(tree.container_token, "font-mono bg-white text-gray-900");
        assert_eq!(tree.container_token.matches("font-").count(), 1);
    }

    #[test]
    fn test_unknown_template_renders_with_default() {
        let tree = render_doc(&make_doc("nonexistent-xyz"));
        assert_eq!(tree.template_id, "onyx");
        assert_eq!(tree.root_id, PREVIEW_ROOT_ID);
    }

    // ── page boundaries ─────────────────────────────────────────────────────

    #[test]
    fn test_short_document_has_no_page_breaks() {
        let tree = render_doc(&make_doc("onyx"));
        assert!(tree.page_breaks.is_empty());
        assert_eq!(tree.page_count, 1);
    }

    #[test]
    fn test_long_document_gets_advisory_markers_without_truncation() {
        let mut doc = make_doc("onyx");
        for n in 0..30 {
            let mut item = make_experience(&format!("x{n}"), true);
            item.description = "Shipped features across the stack. ".repeat(8);
            doc.content.experience.push(item);
        }
        for n in 0..5 {
            doc.content.projects.push(ProjectItem {
                id: format!("p{n}"),
                name: format!("Project {n}"),
                description: "Side project.".to_string(),
                link: None,
                tech_stack: vec!["Rust".to_string()],
                visible: true,
            });
        }
        let tree = render_doc(&doc);
        assert!(tree.page_count >= 2);
        assert_eq!(tree.page_breaks.len() as u32, tree.page_count - 1);
        assert_eq!(tree.page_breaks[0].page, 2);
        assert_eq!(tree.page_breaks[0].within, Some(SectionKind::Experience));
        let block = tree
            .sections()
            .find(|s| s.kind == SectionKind::Experience)
            .unwrap();
        assert_eq!(block.items.len(), 31);
    }
}
