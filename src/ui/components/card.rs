use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::content::SentenceItem;
use crate::ui::theme::Theme;

/// The flippable card. Front shows the source sentence, back the target
/// translation.
pub struct CardView<'a> {
    item: &'a SentenceItem,
    flipped: bool,
    theme: &'a Theme,
}

impl<'a> CardView<'a> {
    pub fn new(item: &'a SentenceItem, flipped: bool, theme: &'a Theme) -> Self {
        Self {
            item,
            flipped,
            theme,
        }
    }
}

impl Widget for CardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let (side, text, text_color) = if self.flipped {
            ("back", &self.item.en, colors.card_back())
        } else {
            ("front", &self.item.tr, colors.card_front())
        };

        let block = Block::bordered()
            .title(format!(" page {} · {side} ", self.item.page))
            .border_style(Style::default().fg(if self.flipped {
                colors.border_focused()
            } else {
                colors.border()
            }))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(inner);

        let sentence = Paragraph::new(Line::from(Span::styled(
            text.as_str(),
            Style::default()
                .fg(text_color)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        sentence.render(centered_vertically(layout[0], text, layout[0].width), buf);

        let hint = Paragraph::new(Line::from(Span::styled(
            "[space] flip",
            Style::default().fg(colors.hint()),
        )))
        .alignment(Alignment::Center);
        hint.render(layout[1], buf);
    }
}

/// Vertically center a wrapped single paragraph inside `area`.
fn centered_vertically(area: Rect, text: &str, width: u16) -> Rect {
    if width == 0 || area.height <= 1 {
        return area;
    }
    let lines = (text.chars().count() as u16).div_ceil(width).max(1);
    let pad = area.height.saturating_sub(lines) / 2;
    Rect {
        x: area.x,
        y: area.y + pad,
        width: area.width,
        height: area.height.saturating_sub(pad),
    }
}
