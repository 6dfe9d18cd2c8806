use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use vaultx_core::i18n::{Namespace, Translator};

use super::{ShellLayout, ShellState, Tab, compute_layout, tab_slots};
use crate::common::truncate_with_ellipsis;

/// Draws the shell and its content.
///
/// `render_content` draws into an offscreen buffer `content_height` rows tall;
/// the rows under the current scroll offset are copied into the frame.
pub fn render_shell(
    frame: &mut Frame,
    area: Rect,
    shell: &ShellState,
    t: &Translator,
    content_height: u16,
    render_content: impl FnOnce(&mut Buffer, Rect),
) -> ShellLayout {
    let layout = compute_layout(area, shell.show_tabs);
    let viewport = layout.content;

    let max_scroll = content_height.saturating_sub(viewport.height);
    shell.max_scroll.set(max_scroll);
    shell.tab_bar_area.set(layout.tab_bar);
    let scroll = shell.scroll.min(max_scroll);

    if viewport.width > 0 && viewport.height > 0 {
        let scratch_area = Rect::new(0, 0, viewport.width, content_height.max(viewport.height));
        let mut scratch = Buffer::empty(scratch_area);
        render_content(&mut scratch, scratch_area);

        let target = frame.buffer_mut();
        for row in 0..viewport.height {
            for col in 0..viewport.width {
                target[(viewport.x + col, viewport.y + row)] =
                    scratch[(col, row + scroll)].clone();
            }
        }
    }

    if let Some(bar) = layout.tab_bar {
        render_tab_bar(frame.buffer_mut(), bar, t, shell.active);
    }
    layout
}

/// Draws the bottom navigation bar. `active` is highlighted when set.
pub fn render_tab_bar(buf: &mut Buffer, bar: Rect, t: &Translator, active: Option<Tab>) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(bar);
    block.render(bar, buf);

    for (tab, slot) in tab_slots(inner) {
        let is_active = active == Some(tab);
        let style = if is_active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let label = t.t(Namespace::Common, tab.label_key());
        let number = tab.index() + 1;
        let lines = vec![
            Line::from(Span::styled(
                truncate_with_ellipsis(&format!("{} {label}", tab.icon()), slot.width as usize),
                style,
            )),
            Line::from(Span::styled(
                format!("Alt+{number}"),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(slot, buf);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use vaultx_core::i18n::Language;

    use super::*;

    fn rows(buffer: &Buffer) -> Vec<String> {
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    fn numbered_content(buf: &mut Buffer, area: Rect) {
        for row in 0..area.height {
            Paragraph::new(format!("line {row}"))
                .render(Rect::new(area.x, area.y + row, area.width, 1), buf);
        }
    }

    #[test]
    fn test_tab_bar_uses_locale_labels() {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let shell = ShellState::new(true);
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_shell(
                    frame,
                    area,
                    &shell,
                    &Translator::new(Language::Es),
                    0,
                    |_, _| {},
                );
            })
            .unwrap();
        let screen = rows(terminal.backend().buffer()).join("\n");
        assert!(screen.contains("Inicio"));
        assert!(screen.contains("Alt+4"));
        assert_eq!(shell.tab_bar_area.get(), Some(Rect::new(0, 7, 60, 3)));
    }

    #[test]
    fn test_no_tab_bar_when_hidden() {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let shell = ShellState::new(false);
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_shell(frame, area, &shell, &Translator::default(), 0, |_, _| {});
            })
            .unwrap();
        let screen = rows(terminal.backend().buffer()).join("\n");
        assert!(!screen.contains("Alt+1"));
        assert_eq!(shell.tab_bar_area.get(), None);
    }

    #[test]
    fn test_content_scrolls() {
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        let mut shell = ShellState::new(false);
        shell.scroll = 3;
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_shell(frame, area, &shell, &Translator::default(), 10, numbered_content);
            })
            .unwrap();
        let rows = rows(terminal.backend().buffer());
        // Viewport is 4 rows tall starting at row 1.
        assert!(rows[1].starts_with("  line 3"));
        assert_eq!(shell.max_scroll.get(), 6);
    }
}
