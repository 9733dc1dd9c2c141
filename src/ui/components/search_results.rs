use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::content::SentenceItem;
use crate::ui::theme::Theme;

/// Query line plus the hit list. When a live scan comes back empty for a
/// non-blank query, a literal "no match" sentinel row is shown in place of
/// results.
pub struct SearchResults<'a> {
    query: &'a str,
    hits: &'a [SentenceItem],
    selected: usize,
    searching: bool,
    theme: &'a Theme,
}

impl<'a> SearchResults<'a> {
    pub fn new(
        query: &'a str,
        hits: &'a [SentenceItem],
        selected: usize,
        searching: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            query,
            hits,
            selected,
            searching,
            theme,
        }
    }
}

impl Widget for SearchResults<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" search ")
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);

        let query_line = Paragraph::new(Line::from(vec![
            Span::styled("/ ", Style::default().fg(colors.accent())),
            Span::styled(self.query, Style::default().fg(colors.fg())),
            Span::styled("▏", Style::default().fg(colors.accent())),
        ]));
        query_line.render(layout[0], buf);

        let list_area = layout[1];
        if self.searching {
            Paragraph::new(Line::from(Span::styled(
                "searching...",
                Style::default().fg(colors.hint()),
            )))
            .render(list_area, buf);
            return;
        }

        if self.hits.is_empty() {
            if !self.query.trim().is_empty() {
                Paragraph::new(Line::from(Span::styled(
                    "no match",
                    Style::default().fg(colors.error()),
                )))
                .render(list_area, buf);
            }
            return;
        }

        // Keep the selected row visible
        let visible = list_area.height as usize;
        let first = self.selected.saturating_sub(visible.saturating_sub(1));
        let lines: Vec<Line> = self
            .hits
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .map(|(i, item)| {
                let is_selected = i == self.selected;
                let indicator = if is_selected { ">" } else { " " };
                let style = if is_selected {
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.fg())
                };
                Line::from(vec![
                    Span::styled(format!("{indicator} page {}: ", item.page), style),
                    Span::styled(item.tr.as_str(), style),
                    Span::styled(
                        format!("  {}", item.en),
                        Style::default().fg(colors.hint()),
                    ),
                ])
            })
            .collect();

        Paragraph::new(lines).render(list_area, buf);
    }
}
