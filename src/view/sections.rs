//! Page section renderers.
//!
//! Every section renders to plain [`Line`]s. An item that has not revealed
//! yet renders as the same number of blank lines, so a section's height
//! depends only on its content and the terminal width. That is what lets
//! [`render_page_lines`] double as the layout measurement for the reveal
//! trackers.

use super::constants::{
    MAX_CONTENT_WIDTH, MESSAGE_FIELD_ROWS, PAGE_MARGIN, SKILL_BAR_WIDTH, SLIDE_COLUMNS,
};
use super::helpers::{empty_line, tail_fit, wrap_text};
use super::styles::Palette;
use crate::anim::intersection::RegionLayout;
use crate::model::content::{Point, Portfolio};
use crate::model::SectionId;
use crate::state::page::region_of;
use crate::state::{AppState, Focus, FormField};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// Narrowest text column the renderers will wrap to.
const MIN_TEXT_WIDTH: usize = 12;

/// Everything a section renderer reads.
pub struct RenderContext<'a> {
    /// State being drawn.
    pub state: &'a AppState,
    /// Styles to draw with.
    pub palette: &'a Palette,
    /// Full terminal width.
    pub width: u16,
    /// Frame time, for reveal progress.
    pub now: Duration,
}

impl RenderContext<'_> {
    fn portfolio(&self) -> &Portfolio {
        self.state.portfolio()
    }

    /// Columns available to text, leaving room for the slide-in offset.
    fn text_width(&self) -> usize {
        usize::from(content_width(self.width).saturating_sub(SLIDE_COLUMNS)).max(MIN_TEXT_WIDTH)
    }

    fn progress(&self, id: SectionId, item: usize) -> f64 {
        self.state.page.item_progress(id, item, self.now)
    }
}

/// Width of the centered content column for a terminal `width`.
pub fn content_width(width: u16) -> u16 {
    width
        .saturating_sub(PAGE_MARGIN * 2)
        .min(MAX_CONTENT_WIDTH)
        .max(1)
}

/// Render the whole page and measure where each section sits.
pub fn render_page_lines(ctx: &RenderContext<'_>) -> (Vec<Line<'static>>, RegionLayout) {
    let mut lines = Vec::new();
    let mut layout = RegionLayout::new();
    for id in SectionId::ALL {
        let section = section_lines(id, ctx);
        layout.push(region_of(id), u32::try_from(section.len()).unwrap_or(u32::MAX));
        lines.extend(section);
    }
    (lines, layout)
}

/// Render one section.
pub fn section_lines(id: SectionId, ctx: &RenderContext<'_>) -> Vec<Line<'static>> {
    let items = match id {
        SectionId::Hero => hero(ctx),
        SectionId::Experience => experience(ctx),
        SectionId::Skills => skills(ctx),
        SectionId::Projects => projects(ctx),
        SectionId::Philosophy => philosophy(ctx),
        SectionId::Vision => vision(ctx),
        SectionId::Contact => contact(ctx),
        SectionId::Footer => footer(ctx),
    };

    items
        .into_iter()
        .enumerate()
        .flat_map(|(index, item)| reveal(item, ctx.progress(id, index)))
        .collect()
}

/// Apply an item's enter animation: blank until it starts, then sliding in
/// from the right and dim for the first half.
fn reveal(item: Vec<Line<'static>>, progress: f64) -> Vec<Line<'static>> {
    if progress <= 0.0 {
        return vec![empty_line(); item.len()];
    }
    if progress >= 1.0 {
        return item;
    }

    let offset = ((1.0 - progress) * f64::from(SLIDE_COLUMNS)).round() as usize;
    item.into_iter()
        .map(|mut line| {
            if offset > 0 {
                line.spans.insert(0, Span::raw(" ".repeat(offset)));
            }
            if progress < 0.5 {
                line = line.patch_style(Style::default().add_modifier(Modifier::DIM));
            }
            line
        })
        .collect()
}

fn wrapped(text: &str, width: usize, indent: &str, style: Style) -> Vec<Line<'static>> {
    wrap_text(text, width.saturating_sub(indent.width()).max(1))
        .into_iter()
        .map(|row| Line::from(vec![Span::raw(indent.to_string()), Span::styled(row, style)]))
        .collect()
}

fn tags_line(tags: &[String], width: usize, indent: &str, style: Style) -> Vec<Line<'static>> {
    if tags.is_empty() {
        return Vec::new();
    }
    let joined = tags
        .iter()
        .map(|t| format!("#{t}"))
        .collect::<Vec<_>>()
        .join("  ");
    wrapped(&joined, width, indent, style)
}

/// Title, underline and subtitle: item 0 of every content section.
fn header(title: &str, subtitle: &str, ctx: &RenderContext<'_>) -> Vec<Line<'static>> {
    let palette = ctx.palette;
    let mut lines = vec![
        empty_line(),
        Line::from(Span::styled(title.to_string(), palette.heading)),
        Line::from(Span::styled(
            "─".repeat(title.width().max(3)),
            palette.accent,
        )),
    ];
    if !subtitle.is_empty() {
        lines.extend(wrapped(subtitle, ctx.text_width(), "", palette.muted));
    }
    lines.push(empty_line());
    lines
}

// ===== Sections =====

fn hero(ctx: &RenderContext<'_>) -> Vec<Vec<Line<'static>>> {
    let palette = ctx.palette;
    let profile = &ctx.portfolio().profile;
    let width = ctx.text_width();

    let mut headline = vec![
        Span::styled("> ", palette.accent),
        Span::styled(
            ctx.state.headline_text(),
            palette.accent.add_modifier(Modifier::BOLD),
        ),
    ];
    if ctx.state.page.animations() {
        headline.push(Span::styled("▌", palette.accent));
    }

    vec![
        vec![
            empty_line(),
            empty_line(),
            Line::from(Span::styled(profile.name.clone(), palette.name)),
            empty_line(),
        ],
        vec![Line::from(headline), empty_line()],
        wrapped(&profile.summary, width, "", palette.body),
        vec![
            empty_line(),
            Line::from(Span::styled(
                "↓ j/k to scroll · n next section · ? help",
                palette.muted,
            )),
            empty_line(),
        ],
    ]
}

fn experience(ctx: &RenderContext<'_>) -> Vec<Vec<Line<'static>>> {
    let palette = ctx.palette;
    let section = &ctx.portfolio().experience;
    let width = ctx.text_width();

    let mut items = vec![header(&section.title, &section.subtitle, ctx)];
    for milestone in &section.milestones {
        let mut item = vec![
            Line::from(vec![
                Span::styled("● ", palette.accent),
                Span::styled(milestone.date.clone(), palette.accent.add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![
                Span::styled("│ ", palette.muted),
                Span::styled(milestone.title.clone(), palette.name),
            ]),
        ];
        item.extend(wrapped(&milestone.description, width, "│ ", palette.body));
        item.extend(tags_line(&milestone.tags, width, "│ ", palette.tag));
        item.push(empty_line());
        items.push(item);
    }
    items
}

fn skills(ctx: &RenderContext<'_>) -> Vec<Vec<Line<'static>>> {
    let palette = ctx.palette;
    let section = &ctx.portfolio().skills;
    let width = ctx.text_width();

    let mut items = vec![header(&section.title, &section.subtitle, ctx)];
    for (index, category) in section.categories.iter().enumerate() {
        let progress = ctx.progress(SectionId::Skills, index + 1).clamp(0.0, 1.0);
        let name_column = category
            .skills
            .iter()
            .map(|s| s.name.width())
            .max()
            .unwrap_or(0)
            .saturating_add(2)
            .min(width / 2);
        // Room for "  " indent, " 100%" label.
        let bar_width = width
            .saturating_sub(name_column + 2 + 5)
            .min(usize::from(SKILL_BAR_WIDTH))
            .max(1);

        let mut item = vec![Line::from(Span::styled(
            category.title.clone(),
            palette.accent.add_modifier(Modifier::BOLD),
        ))];
        for skill in &category.skills {
            let level = f64::from(skill.level.min(100)) / 100.0;
            let filled = ((bar_width as f64) * level * progress).round() as usize;
            let filled = filled.min(bar_width);
            let shown = (f64::from(skill.level.min(100)) * progress).round() as u32;
            let pad = name_column.saturating_sub(skill.name.width());

            item.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{}{}", skill.name, " ".repeat(pad)), palette.body),
                Span::styled("█".repeat(filled), palette.bar_filled),
                Span::styled("░".repeat(bar_width - filled), palette.bar_empty),
                Span::styled(format!(" {shown:>3}%"), palette.muted),
            ]));
        }
        item.push(empty_line());
        items.push(item);
    }
    items
}

fn projects(ctx: &RenderContext<'_>) -> Vec<Vec<Line<'static>>> {
    let palette = ctx.palette;
    let section = &ctx.portfolio().projects;
    let width = ctx.text_width();

    let mut items = vec![header(&section.title, &section.subtitle, ctx)];
    for project in &section.projects {
        let mut item = vec![Line::from(vec![
            Span::styled(project.title.clone(), palette.name),
            Span::raw("  "),
            Span::styled(format!("[{}]", project.status), palette.tag),
        ])];
        item.extend(wrapped(&project.description, width, "", palette.body));
        for highlight in &project.highlights {
            let rows = wrap_text(highlight, width.saturating_sub(4).max(1));
            for (row_index, row) in rows.into_iter().enumerate() {
                let bullet = if row_index == 0 { "  • " } else { "    " };
                item.push(Line::from(vec![
                    Span::styled(bullet, palette.accent),
                    Span::styled(row, palette.body),
                ]));
            }
        }
        item.extend(tags_line(&project.tags, width, "", palette.tag));
        item.push(empty_line());
        items.push(item);
    }
    items
}

fn point(point: &Point, marker: String, ctx: &RenderContext<'_>) -> Vec<Line<'static>> {
    let palette = ctx.palette;
    let indent = " ".repeat(marker.width());
    let mut item = vec![Line::from(vec![
        Span::styled(marker, palette.accent),
        Span::styled(point.title.clone(), palette.name),
    ])];
    item.extend(wrapped(&point.description, ctx.text_width(), &indent, palette.body));
    item.push(empty_line());
    item
}

fn philosophy(ctx: &RenderContext<'_>) -> Vec<Vec<Line<'static>>> {
    let section = &ctx.portfolio().philosophy;

    let mut items = vec![header(&section.title, &section.subtitle, ctx)];
    items.extend(
        section
            .points
            .iter()
            .map(|p| point(p, "◆ ".to_string(), ctx)),
    );
    if let Some(motto) = &section.motto {
        let style = ctx.palette.accent.add_modifier(Modifier::ITALIC);
        let mut item = wrapped(&format!("“{motto}”"), ctx.text_width(), "", style);
        item.push(empty_line());
        items.push(item);
    }
    items
}

fn vision(ctx: &RenderContext<'_>) -> Vec<Vec<Line<'static>>> {
    let palette = ctx.palette;
    let section = &ctx.portfolio().vision;
    let width = ctx.text_width();

    let mut items = vec![header(&section.title, &section.subtitle, ctx)];
    items.extend(
        section
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| point(step, format!("{:02} ", i + 1), ctx)),
    );
    if let Some(statement) = &section.statement {
        let mut item = vec![Line::from(Span::styled(
            statement.title.clone(),
            palette.heading,
        ))];
        item.extend(wrapped(&statement.description, width, "", palette.body));
        item.push(empty_line());
        items.push(item);
    }
    if !section.impacts.is_empty() {
        let mut item = Vec::new();
        for impact in &section.impacts {
            item.extend(
                wrapped(impact, width, "  ", palette.body)
                    .into_iter()
                    .enumerate()
                    .map(|(row, mut line)| {
                        if row == 0 {
                            line.spans[0] = Span::styled("✓ ", palette.info);
                        }
                        line
                    }),
            );
        }
        item.push(empty_line());
        items.push(item);
    }
    items
}

fn contact(ctx: &RenderContext<'_>) -> Vec<Vec<Line<'static>>> {
    let palette = ctx.palette;
    let section = &ctx.portfolio().contact;
    let focus = ctx.state.focus;

    let mut items = vec![header(&section.title, &section.subtitle, ctx)];
    for (index, method) in section.methods.iter().enumerate() {
        let focused = focus == Some(Focus::ContactMethod(index));
        let marker = if focused { "▸ " } else { "  " };
        let mut card = Line::from(vec![
            Span::styled(marker, palette.accent),
            Span::styled(method.title.clone(), palette.name),
            Span::raw("  "),
            Span::styled(method.value.clone(), palette.accent),
        ]);
        if focused {
            card = card.patch_style(palette.focused);
        }
        items.push(vec![
            card,
            Line::from(Span::styled(
                format!("    {}", method.action.hint()),
                palette.muted,
            )),
            empty_line(),
        ]);
    }
    items.push(contact_form(ctx));
    items
}

fn contact_form(ctx: &RenderContext<'_>) -> Vec<Line<'static>> {
    let palette = ctx.palette;
    let state = ctx.state;
    let value_width = ctx.text_width().saturating_sub(4).max(1);

    let mut lines = vec![
        Line::from(Span::styled("Send a message", palette.heading)),
        empty_line(),
    ];

    for field in FormField::ALL {
        let focused = state.focused_field() == Some(field);
        let label_style = if focused { palette.accent } else { palette.muted };
        lines.push(Line::from(Span::styled(field.label(), label_style)));

        let value = state.form.value(field);
        let rows: Vec<Line<'static>> = if value.is_empty() && !focused {
            vec![Line::from(vec![
                Span::raw("  "),
                Span::styled(field.placeholder(), palette.muted.add_modifier(Modifier::ITALIC)),
            ])]
        } else {
            let cursor = if focused { "▌" } else { "" };
            if field == FormField::Message {
                let wrapped_rows = wrap_text(value, value_width.saturating_sub(1).max(1));
                let skip = wrapped_rows.len().saturating_sub(MESSAGE_FIELD_ROWS);
                let last = wrapped_rows.len().saturating_sub(1);
                wrapped_rows
                    .into_iter()
                    .enumerate()
                    .skip(skip)
                    .map(|(i, row)| {
                        let tail = if i == last { cursor } else { "" };
                        Line::from(vec![
                            Span::raw("  "),
                            Span::styled(format!("{row}{tail}"), palette.body),
                        ])
                    })
                    .collect()
            } else {
                let shown = tail_fit(value, value_width.saturating_sub(1));
                vec![Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!("{shown}{cursor}"), palette.body),
                ])]
            }
        };

        let rows_for_field = if field == FormField::Message {
            MESSAGE_FIELD_ROWS
        } else {
            1
        };
        let padding = rows_for_field.saturating_sub(rows.len());
        lines.extend(rows);
        lines.extend(std::iter::repeat_n(empty_line(), padding));
    }

    lines.push(empty_line());
    let submit_style = if state.focus == Some(Focus::Submit) {
        palette.focused
    } else {
        palette.accent
    };
    lines.push(Line::from(Span::styled("[ Send message ]", submit_style)));
    lines.push(empty_line());
    lines
}

fn footer(ctx: &RenderContext<'_>) -> Vec<Vec<Line<'static>>> {
    let palette = ctx.palette;
    let footer = &ctx.portfolio().footer;

    vec![vec![
        Line::from(Span::styled("─".repeat(ctx.text_width()), palette.muted)),
        Line::from(vec![
            Span::styled(footer.name.clone(), palette.name),
            Span::styled(" · ", palette.muted),
            Span::styled(footer.role.clone(), palette.body),
        ]),
        Line::from(Span::styled(footer.copyright.clone(), palette.muted)),
        empty_line(),
    ]]
}

#[cfg(test)]
#[path = "sections_tests.rs"]
mod tests;
