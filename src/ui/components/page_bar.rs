use std::collections::BTreeMap;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

/// One cell per discovered page plus the review toggle. The active study
/// page is highlighted; fully cleared pages are struck through.
pub struct PageBar<'a> {
    pages: &'a [u32],
    current: u32,
    review_mode: bool,
    cleared: &'a BTreeMap<u32, bool>,
    theme: &'a Theme,
}

impl<'a> PageBar<'a> {
    pub fn new(
        pages: &'a [u32],
        current: u32,
        review_mode: bool,
        cleared: &'a BTreeMap<u32, bool>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            pages,
            current,
            review_mode,
            cleared,
            theme,
        }
    }
}

impl Widget for PageBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" pages ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans: Vec<Span> = Vec::new();
        for &page in self.pages {
            let is_active = !self.review_mode && page == self.current;
            let is_cleared = self.cleared.get(&page).copied().unwrap_or(false);

            let mut style = if is_active {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else if is_cleared {
                Style::default().fg(colors.cleared())
            } else {
                Style::default().fg(colors.fg())
            };
            if is_cleared {
                style = style.add_modifier(Modifier::CROSSED_OUT);
            }

            spans.push(Span::styled(format!(" {page} "), style));
            spans.push(Span::raw(" "));
        }

        let review_style = if self.review_mode {
            Style::default()
                .fg(colors.bg())
                .bg(colors.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.accent_dim())
        };
        spans.push(Span::styled(" review ", review_style));

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
