use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use vaultx_core::i18n::{Namespace, Translator};
use vaultx_core::phone::{COUNTRIES, Country};

use super::OverlayUpdate;
use crate::common::{display_width, fuzzy, pad_to_width};
use crate::effects::UiEffect;
use crate::mutations::{StateMutation, VerificationMutation};
use crate::state::TuiState;

const PAGE: usize = 10;

#[derive(Debug, Clone)]
pub struct CountryPickerState {
    pub filter: String,
    /// Indices into `COUNTRIES`, in display order.
    pub filtered: Vec<usize>,
    pub selected: usize,
    haystacks: Vec<String>,
}

impl CountryPickerState {
    pub fn open(current: Option<Country>) -> (Self, Vec<UiEffect>) {
        let haystacks = COUNTRIES
            .iter()
            .map(|c| format!("{} {}", c.name, c.calling_code))
            .collect();
        let mut picker = Self {
            filter: String::new(),
            filtered: Vec::new(),
            selected: 0,
            haystacks,
        };
        picker.apply_filter();
        if let Some(current) = current {
            picker.selected = picker
                .filtered
                .iter()
                .position(|idx| COUNTRIES[*idx] == current)
                .unwrap_or(0);
        }
        (picker, vec![])
    }

    pub fn selected_country(&self) -> Option<Country> {
        self.filtered
            .get(self.selected)
            .and_then(|idx| COUNTRIES.get(*idx))
            .copied()
    }

    fn apply_filter(&mut self) {
        self.filtered = fuzzy::rank(&self.filter, &self.haystacks);
        self.selected = 0;
    }

    fn move_selection(&mut self, delta: isize) {
        if self.filtered.is_empty() {
            return;
        }
        let last = self.filtered.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    pub fn handle_key(&mut self, _tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Up => {
                self.move_selection(-1);
                OverlayUpdate::stay()
            }
            KeyCode::Down => {
                self.move_selection(1);
                OverlayUpdate::stay()
            }
            KeyCode::PageUp => {
                self.move_selection(-(PAGE as isize));
                OverlayUpdate::stay()
            }
            KeyCode::PageDown => {
                self.move_selection(PAGE as isize);
                OverlayUpdate::stay()
            }
            KeyCode::Enter => match self.selected_country() {
                Some(country) => OverlayUpdate::close().with_mutations(vec![
                    StateMutation::Verification(VerificationMutation::SelectCountry(country)),
                ]),
                None => OverlayUpdate::stay(),
            },
            KeyCode::Backspace => {
                if self.filter.pop().is_some() {
                    self.apply_filter();
                }
                OverlayUpdate::stay()
            }
            KeyCode::Char(ch) if !ctrl => {
                self.filter.push(ch);
                self.apply_filter();
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, t: &Translator) {
        render_country_picker(frame, self, area, t);
    }
}

fn render_country_picker(
    frame: &mut Frame,
    picker: &CountryPickerState,
    area: Rect,
    t: &Translator,
) {
    use super::render_utils::{
        InputHint, OverlayConfig, render_filter_line, render_overlay, render_separator,
    };

    let title = t.t(Namespace::Auth, "sms.country");
    let select = t.t(Namespace::Common, "actions.select");
    let cancel = t.t(Namespace::Common, "actions.cancel");
    let hints = [
        InputHint::new("↑↓", "navigate"),
        InputHint::new("Enter", &select),
        InputHint::new("Esc", &cancel),
    ];
    let layout = render_overlay(
        frame,
        area,
        &OverlayConfig {
            title: &title,
            border_color: Color::Cyan,
            width: 56,
            height: 20,
            hints: &hints,
        },
    );
    let body = layout.body;
    if body.height < 3 {
        return;
    }

    render_filter_line(
        frame,
        Rect::new(body.x, body.y, body.width, 1),
        &picker.filter,
        &t.t(Namespace::Auth, "sms.country_search"),
        Color::Cyan,
    );
    render_separator(frame, body, 1);

    let list_area = Rect::new(body.x, body.y + 2, body.width, body.height - 2);

    if picker.filtered.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No matching countries",
                Style::default().fg(Color::DarkGray),
            )),
            list_area,
        );
        return;
    }

    // "▶ " highlight symbol plus the code column.
    let code_width = 6;
    let name_width = (list_area.width as usize).saturating_sub(2 + code_width + 3);

    let items: Vec<ListItem> = picker
        .filtered
        .iter()
        .filter_map(|idx| COUNTRIES.get(*idx))
        .map(|country| {
            // Flags render two columns wide in most terminals.
            let flag_pad = 2usize.saturating_sub(display_width(country.flag) as usize);
            ListItem::new(Line::from(vec![
                Span::raw(format!("{}{} ", country.flag, " ".repeat(flag_pad))),
                Span::styled(
                    pad_to_width(country.name, name_width),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:>code_width$}", country.calling_code),
                    Style::default().fg(Color::Yellow),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default();
    list_state.select(Some(picker.selected));
    frame.render_stateful_widget(list, list_area, &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_opens_on_current_country() {
        let canada = COUNTRIES.iter().find(|c| c.name == "Canada").copied();
        let (picker, _) = CountryPickerState::open(canada);
        assert_eq!(picker.selected_country(), canada);
    }

    #[test]
    fn test_typing_filters() {
        let app = AppState::for_tests();
        let (mut picker, _) = CountryPickerState::open(None);
        for ch in "japan".chars() {
            picker.handle_key(&app.tui, key(KeyCode::Char(ch)));
        }
        assert_eq!(picker.selected_country().map(|c| c.calling_code), Some("+81"));
    }

    #[test]
    fn test_enter_selects_country() {
        let app = AppState::for_tests();
        let (mut picker, _) = CountryPickerState::open(None);
        for ch in "+44".chars() {
            picker.handle_key(&app.tui, key(KeyCode::Char(ch)));
        }
        let update = picker.handle_key(&app.tui, key(KeyCode::Enter));
        let uk = COUNTRIES.iter().find(|c| c.calling_code == "+44").copied().unwrap();
        assert_eq!(
            update.mutations,
            vec![StateMutation::Verification(VerificationMutation::SelectCountry(uk))]
        );
    }

    #[test]
    fn test_selection_clamped() {
        let app = AppState::for_tests();
        let (mut picker, _) = CountryPickerState::open(None);
        picker.handle_key(&app.tui, key(KeyCode::Up));
        assert_eq!(picker.selected, 0);
        picker.handle_key(&app.tui, key(KeyCode::PageDown));
        assert_eq!(picker.selected, PAGE);
    }

    #[test]
    fn test_no_match_enter_stays() {
        let app = AppState::for_tests();
        let (mut picker, _) = CountryPickerState::open(None);
        for ch in "zzzzqqq".chars() {
            picker.handle_key(&app.tui, key(KeyCode::Char(ch)));
        }
        assert!(picker.filtered.is_empty());
        let update = picker.handle_key(&app.tui, key(KeyCode::Enter));
        assert!(update.mutations.is_empty());
    }
}
