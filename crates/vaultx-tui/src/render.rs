//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects. The shell records its layout in `Cell`s
//! so mouse routing can use the last drawn geometry.

use ratatui::Frame;

use crate::overlays::OverlayExt;
use crate::shell::render_shell;
use crate::state::AppState;
use crate::verification::{content_height, render_verification};

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;
    let t = &state.translator;

    let content_width = crate::shell::compute_layout(area, state.shell.show_tabs)
        .content
        .width;
    let height = content_height(&state.verification, content_width);

    render_shell(frame, area, &state.shell, t, height, |buf, content| {
        render_verification(buf, content, &state.verification, t);
    });

    app.overlay.render(frame, area, t);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    use super::*;
    use crate::overlays::OverlayRequest;

    fn screen(buffer: &Buffer) -> String {
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draw(app: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        screen(terminal.backend().buffer())
    }

    #[test]
    fn test_renders_collecting_screen() {
        let app = AppState::for_tests();
        let text = draw(&app, 80, 40);
        assert!(text.contains("Verify Your Phone"));
        assert!(text.contains("Send Verification Code"));
        assert!(!text.contains("Alt+1"));
    }

    #[test]
    fn test_renders_tab_bar_when_enabled() {
        let mut app = AppState::for_tests();
        app.tui.shell.show_tabs = true;
        let text = draw(&app, 80, 40);
        assert!(text.contains("Markets"));
        assert!(app.tui.shell.tab_bar_area.get().is_some());
    }

    #[test]
    fn test_overlay_drawn_on_top() {
        let mut app = AppState::for_tests();
        let (overlay, _) = OverlayRequest::LanguagePicker.build(&app.tui);
        app.overlay = Some(overlay);
        let text = draw(&app, 80, 40);
        assert!(text.contains("Language"));
        assert!(text.contains("Deutsch"));
    }

    #[test]
    fn test_small_terminal_does_not_panic() {
        let app = AppState::for_tests();
        draw(&app, 10, 4);
    }
}
