use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use super::CodeInputState;

const CELL_WIDTH: u16 = 5;
const CELL_GAP: u16 = 1;
pub const CODE_INPUT_HEIGHT: u16 = 3;

/// Columns needed to draw `len` cells.
pub fn code_input_width(len: usize) -> u16 {
    let len = u16::try_from(len).unwrap_or(u16::MAX);
    len.saturating_mul(CELL_WIDTH + CELL_GAP)
        .saturating_sub(CELL_GAP)
}

/// Draws the cells centered horizontally in `area`.
pub fn render_code_input(buf: &mut Buffer, area: Rect, state: &CodeInputState, focused: bool) {
    if area.height < CODE_INPUT_HEIGHT {
        return;
    }
    let total = code_input_width(state.len()).min(area.width);
    let mut x = area.x + (area.width - total) / 2;
    let right = area.x + area.width;

    for (index, cell) in state.cells().iter().enumerate() {
        if x + CELL_WIDTH > right {
            break;
        }
        let is_focused = focused && !state.is_disabled() && index == state.focus();
        let border_color = if state.is_errored() {
            Color::Red
        } else if state.is_disabled() {
            Color::DarkGray
        } else if is_focused {
            Color::Cyan
        } else if cell.is_some() {
            Color::Green
        } else {
            Color::Gray
        };
        let mut border_style = Style::default().fg(border_color);
        if is_focused {
            border_style = border_style.add_modifier(Modifier::BOLD);
        }

        let cell_area = Rect::new(x, area.y, CELL_WIDTH, CODE_INPUT_HEIGHT);
        let text = match cell {
            Some(digit) => digit.to_string(),
            None if is_focused => "_".to_string(),
            None => String::new(),
        };
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style),
            );
        paragraph.render(cell_area, buf);

        x += CELL_WIDTH + CELL_GAP;
    }
}
