//! Mobile page chrome: padded scrollable content plus an optional bottom
//! tab bar.
//!
//! The shell keeps no page state of its own. Scroll offset and whether the
//! bar is shown belong to the caller; the shell only reports the geometry it
//! used so mouse hits and scroll limits can be resolved later.

use std::cell::Cell;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;

mod render;

pub use render::{render_shell, render_tab_bar};

/// Rows reserved for the tab bar (border plus labels).
pub const TAB_BAR_HEIGHT: u16 = 3;
const PADDING_X: u16 = 2;
const PADDING_TOP: u16 = 1;
/// Bottom padding when the bar is shown (on top of the bar itself).
const PADDING_BOTTOM_WITH_TABS: u16 = 1;
const PADDING_BOTTOM: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Markets,
    Wallet,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Markets, Tab::Wallet, Tab::Profile];

    /// Key in the `common` namespace.
    pub fn label_key(self) -> &'static str {
        match self {
            Tab::Home => "tabs.home",
            Tab::Markets => "tabs.markets",
            Tab::Wallet => "tabs.wallet",
            Tab::Profile => "tabs.profile",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Tab::Home => "⌂",
            Tab::Markets => "↗",
            Tab::Wallet => "▣",
            Tab::Profile => "☺",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Home => "home",
            Tab::Markets => "markets",
            Tab::Wallet => "wallet",
            Tab::Profile => "profile",
        }
    }

    fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-owned shell state.
#[derive(Debug, Default)]
pub struct ShellState {
    pub show_tabs: bool,
    /// Tab highlighted in the bar; none while a flow screen is shown.
    pub active: Option<Tab>,
    pub scroll: u16,
    /// Largest valid scroll offset as of the last render.
    pub max_scroll: Cell<u16>,
    /// Where the tab bar was drawn on the last render.
    pub tab_bar_area: Cell<Option<Rect>>,
}

impl ShellState {
    pub fn new(show_tabs: bool) -> Self {
        Self {
            show_tabs,
            ..Default::default()
        }
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let max = i32::from(self.max_scroll.get());
        let next = (i32::from(self.scroll) + delta).clamp(0, max);
        self.scroll = u16::try_from(next).unwrap_or(0);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellLayout {
    pub content: Rect,
    pub tab_bar: Option<Rect>,
}

/// Splits `area` into the padded content region and the tab bar.
pub fn compute_layout(area: Rect, show_tabs: bool) -> ShellLayout {
    let (bottom, tab_bar) = if show_tabs {
        let bar_height = TAB_BAR_HEIGHT.min(area.height);
        let bar = Rect::new(
            area.x,
            area.y + area.height - bar_height,
            area.width,
            bar_height,
        );
        (PADDING_BOTTOM_WITH_TABS + bar_height, Some(bar))
    } else {
        (PADDING_BOTTOM, None)
    };

    let content = Rect::new(
        area.x + PADDING_X.min(area.width / 2),
        area.y + PADDING_TOP.min(area.height),
        area.width.saturating_sub(PADDING_X * 2),
        area.height.saturating_sub(PADDING_TOP + bottom),
    );
    ShellLayout { content, tab_bar }
}

/// `Alt+1..4` selects a tab.
pub fn handle_key(key: KeyEvent) -> Option<Tab> {
    if !key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Char(ch @ '1'..='4') => {
            let index = ch.to_digit(10)? as usize - 1;
            Tab::ALL.get(index).copied()
        }
        _ => None,
    }
}

/// Which tab, if any, sits under a mouse click.
pub fn hit_test(bar: Rect, column: u16, row: u16) -> Option<Tab> {
    if bar.width == 0
        || column < bar.x
        || column >= bar.x + bar.width
        || row < bar.y
        || row >= bar.y + bar.height
    {
        return None;
    }
    let slot = bar.width / Tab::ALL.len() as u16;
    if slot == 0 {
        return None;
    }
    let index = usize::from((column - bar.x) / slot).min(Tab::ALL.len() - 1);
    Tab::ALL.get(index).copied()
}

/// Column span of each tab in a bar of `width`.
fn tab_slots(bar: Rect) -> impl Iterator<Item = (Tab, Rect)> {
    let count = Tab::ALL.len() as u16;
    let slot = bar.width / count;
    Tab::ALL.into_iter().map(move |tab| {
        let index = tab.index() as u16;
        let x = bar.x + index * slot;
        // Last slot absorbs the remainder.
        let width = if index + 1 == count {
            bar.width - index * slot
        } else {
            slot
        };
        (tab, Rect::new(x, bar.y, width, bar.height))
    })
}
