//! Field view.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use super::FieldProps;
use crate::common::{display_width, truncate_with_ellipsis};

/// Rows used by the bordered value box.
pub const FIELD_HEIGHT: u16 = 3;

/// Total rows a field needs: optional label, the value box, optional error.
pub fn field_height(props: &FieldProps<'_>) -> u16 {
    FIELD_HEIGHT + u16::from(props.label.is_some()) + u16::from(props.error.is_some())
}

/// Renders a field. `focused` only affects the border and cursor.
pub fn render_field(buf: &mut Buffer, area: Rect, props: &FieldProps<'_>, focused: bool) {
    let mut y = area.y;
    let bottom = area.y + area.height;

    if let Some(label) = props.label {
        if y >= bottom {
            return;
        }
        let mut spans = vec![Span::styled(
            label.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )];
        if props.required {
            spans.push(Span::styled(" *", Style::default().fg(Color::Red)));
        }
        Paragraph::new(Line::from(spans)).render(Rect::new(area.x, y, area.width, 1), buf);
        y += 1;
    }

    if y + FIELD_HEIGHT > bottom {
        return;
    }
    let box_area = Rect::new(area.x, y, area.width, FIELD_HEIGHT);
    let border_color = if props.error.is_some() {
        Color::Red
    } else if props.disabled {
        Color::DarkGray
    } else if focused {
        Color::Cyan
    } else {
        Color::Gray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(box_area);
    block.render(box_area, buf);
    Paragraph::new(value_line(props, focused, inner.width)).render(inner, buf);
    y += FIELD_HEIGHT;

    if let Some(error) = props.error
        && y < bottom
    {
        Paragraph::new(Line::from(Span::styled(
            truncate_with_ellipsis(error, area.width as usize),
            Style::default().fg(Color::Red),
        )))
        .render(Rect::new(area.x, y, area.width, 1), buf);
    }
}

fn value_line(props: &FieldProps<'_>, focused: bool, width: u16) -> Line<'static> {
    let mut spans = Vec::new();
    let mut remaining = width;

    if let Some(prefix) = props.prefix {
        spans.push(Span::styled(
            format!("{prefix} "),
            Style::default().fg(Color::Yellow),
        ));
        remaining = remaining.saturating_sub(display_width(prefix) + 1);
    }

    let show_cursor = focused && !props.disabled;
    // One column for the cursor block.
    let text_width = remaining.saturating_sub(u16::from(show_cursor)) as usize;
    let text_style = if props.disabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    if props.value.is_empty() {
        if show_cursor {
            spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        }
        if let Some(placeholder) = props.placeholder {
            spans.push(Span::styled(
                truncate_with_ellipsis(placeholder, text_width),
                Style::default().fg(Color::DarkGray),
            ));
        }
    } else {
        spans.push(Span::styled(
            truncate_with_ellipsis(props.value, text_width),
            text_style,
        ));
        if show_cursor {
            spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        }
    }

    Line::from(spans)
}
