use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};
use vaultx_core::i18n::{Language, Namespace, Translator};

use super::OverlayUpdate;
use crate::common::fuzzy;
use crate::effects::UiEffect;
use crate::mutations::{ConfigMutation, StateMutation};
use crate::state::TuiState;

#[derive(Debug, Clone)]
pub struct LanguagePickerState {
    pub filter: String,
    pub filtered: Vec<Language>,
    pub selected: usize,
    current: Language,
}

impl LanguagePickerState {
    pub fn open(current: Language) -> (Self, Vec<UiEffect>) {
        let selected = Language::ALL
            .iter()
            .position(|l| *l == current)
            .unwrap_or(0);
        (
            Self {
                filter: String::new(),
                filtered: Language::ALL.to_vec(),
                selected,
                current,
            },
            vec![],
        )
    }

    fn apply_filter(&mut self) {
        let haystacks: Vec<String> = Language::ALL
            .iter()
            .map(|l| format!("{} {}", l.code(), l.native_name()))
            .collect();
        self.filtered = fuzzy::rank(&self.filter, &haystacks)
            .into_iter()
            .filter_map(|idx| Language::ALL.get(idx).copied())
            .collect();
        self.selected = 0;
    }

    pub fn handle_key(&mut self, _tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                OverlayUpdate::stay()
            }
            KeyCode::Down => {
                if self.selected + 1 < self.filtered.len() {
                    self.selected += 1;
                }
                OverlayUpdate::stay()
            }
            KeyCode::Enter => {
                let Some(&language) = self.filtered.get(self.selected) else {
                    return OverlayUpdate::stay();
                };
                if language == self.current {
                    return OverlayUpdate::close();
                }
                OverlayUpdate::close()
                    .with_ui_effects(vec![UiEffect::PersistLanguage { language }])
                    .with_mutations(vec![StateMutation::Config(ConfigMutation::SetLanguage(
                        language,
                    ))])
            }
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
        use super::render_utils::{
            InputHint, OverlayConfig, render_filter_line, render_overlay, render_separator,
        };

        let title = t.t(Namespace::Common, "language.title");
        let select = t.t(Namespace::Common, "actions.select");
        let cancel = t.t(Namespace::Common, "actions.cancel");
        let hints = [
            InputHint::new("↑↓", "navigate"),
            InputHint::new("Enter", &select),
            InputHint::new("Esc", &cancel),
        ];
        let height = (Language::ALL.len() as u16) + 5;
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: &title,
                border_color: Color::Magenta,
                width: 44,
                height,
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
            &self.filter,
            &t.t(Namespace::Common, "language.search"),
            Color::Magenta,
        );
        render_separator(frame, body, 1);

        let items: Vec<ListItem> = self
            .filtered
            .iter()
            .map(|language| {
                let marker = if *language == self.current { " ✓" } else { "" };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", language.flag())),
                    Span::styled(
                        language.native_name().to_string(),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(marker, Style::default().fg(Color::Green)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .bg(Color::Magenta)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.selected));
        let list_area = Rect::new(body.x, body.y + 2, body.width, body.height - 2);
        frame.render_stateful_widget(list, list_area, &mut list_state);
    }
}
