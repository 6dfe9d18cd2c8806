//! Verification screen view.
//!
//! The screen is a vertical stack of sections. The same section list drives
//! both [`content_height`] and [`render_verification`], so the shell can size
//! its scroll region before drawing.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};
use vaultx_core::i18n::{Namespace, Translator};

use super::state::{Focus, Phase, VerificationState};
use super::update::phone_props;
use crate::code_input::{CODE_INPUT_HEIGHT, render_code_input};
use crate::common::{display_width, truncate_with_ellipsis};
use crate::field::{FieldProps, field_height, render_field};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Title,
    Subtitle,
    Gap,
    CountryLabel,
    CountryBox,
    Phone,
    Send,
    CodeLabel,
    Code,
    Resend,
    Skip,
    Message,
}

/// Message shown under the controls: errors win over info.
fn status_message(state: &VerificationState) -> Option<(&str, Color)> {
    if state.phase == Phase::CodeSent
        && let Some(error) = &state.error_message
    {
        return Some((error, Color::Red));
    }
    if state.error_message.is_none()
        && let Some(info) = &state.info_message
    {
        return Some((info, Color::Green));
    }
    None
}

/// Phone validation and send errors are shown under the phone field.
fn phone_error(state: &VerificationState) -> Option<&str> {
    match state.phase {
        Phase::Collecting => state.error_message.as_deref(),
        Phase::CodeSent => None,
    }
}

fn phone_field<'a>(
    state: &'a VerificationState,
    label: &'a str,
    placeholder: &'a str,
) -> FieldProps<'a> {
    phone_props(state)
        .label(label)
        .placeholder(placeholder)
        .required(true)
        .error(phone_error(state))
}

fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = width.max(1);
    display_width(text).div_ceil(width).max(1)
}

fn sections(state: &VerificationState, width: u16) -> Vec<(Section, u16)> {
    let mut out = vec![(Section::Title, 1), (Section::Subtitle, 1), (Section::Gap, 1)];

    match state.phase {
        Phase::Collecting => {
            // Spacer row above the field.
            let phone_height = 1 + field_height(&phone_field(state, "", ""));
            out.extend([
                (Section::CountryLabel, 1),
                (Section::CountryBox, 3),
                (Section::Phone, phone_height),
                (Section::Gap, 1),
                (Section::Send, 1),
            ]);
        }
        Phase::CodeSent => {
            out.extend([
                (Section::CodeLabel, 1),
                (Section::Code, CODE_INPUT_HEIGHT),
                (Section::Gap, 1),
                (Section::Resend, 1),
            ]);
        }
    }
    out.push((Section::Skip, 1));

    if let Some((message, _)) = status_message(state) {
        out.push((Section::Gap, 1));
        out.push((Section::Message, wrapped_height(message, width)));
    }
    out
}

/// Rows the screen needs at `width`.
pub fn content_height(state: &VerificationState, width: u16) -> u16 {
    sections(state, width).iter().map(|(_, h)| *h).sum()
}

fn button(label: &str, focused: bool, enabled: bool) -> Line<'static> {
    let style = if !enabled {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    Line::from(Span::styled(format!("[ {label} ]"), style))
}

fn centered(line: Line<'static>, area: Rect, buf: &mut Buffer) {
    Paragraph::new(line)
        .alignment(Alignment::Center)
        .render(area, buf);
}

pub fn render_verification(
    buf: &mut Buffer,
    area: Rect,
    state: &VerificationState,
    t: &Translator,
) {
    let auth = |key: &str| t.t(Namespace::Auth, key);
    let length = state.settings.code_length.to_string();
    let mut y = area.y;
    let bottom = area.y + area.height;

    for (section, height) in sections(state, area.width) {
        if y + height > bottom {
            break;
        }
        let rect = Rect::new(area.x, y, area.width, height);
        y += height;

        match section {
            Section::Gap => {}
            Section::Title => centered(
                Line::from(Span::styled(
                    auth("sms.title"),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
                rect,
                buf,
            ),
            Section::Subtitle => centered(
                Line::from(Span::styled(
                    t.t_with(Namespace::Auth, "sms.subtitle", &[("length", &length)]),
                    Style::default().fg(Color::Gray),
                )),
                rect,
                buf,
            ),
            Section::CountryLabel => {
                Paragraph::new(Span::styled(
                    auth("sms.country"),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ))
                .render(rect, buf);
            }
            Section::CountryBox => render_country_box(buf, rect, state),
            Section::Phone => {
                let label = auth("sms.phone_label");
                let placeholder = auth("sms.phone_placeholder");
                let props = phone_field(state, &label, &placeholder);
                let field_area = Rect::new(rect.x, rect.y + 1, rect.width, rect.height - 1);
                render_field(buf, field_area, &props, state.focus == Focus::Phone);
            }
            Section::Send => {
                let label = if state.sending {
                    auth("sms.sending")
                } else {
                    auth("sms.send")
                };
                centered(
                    button(&label, state.focus == Focus::Send, state.can_send()),
                    rect,
                    buf,
                );
            }
            Section::CodeLabel => {
                let label = if state.verifying {
                    auth("sms.verifying")
                } else {
                    t.t_with(Namespace::Auth, "sms.code_label", &[("length", &length)])
                };
                centered(
                    Line::from(Span::styled(
                        label,
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    )),
                    rect,
                    buf,
                );
            }
            Section::Code => {
                render_code_input(buf, rect, &state.code, state.focus == Focus::Code);
            }
            Section::Resend => {
                let label = if state.cooldown_remaining > 0 {
                    let seconds = state.cooldown_remaining.to_string();
                    t.t_with(Namespace::Auth, "sms.resend_in", &[("seconds", &seconds)])
                } else {
                    auth("sms.resend")
                };
                centered(
                    button(
                        &label,
                        state.focus == Focus::Resend,
                        state.can_resend() && !state.is_completed(),
                    ),
                    rect,
                    buf,
                );
            }
            Section::Skip => centered(
                button(
                    &auth("sms.skip"),
                    state.focus == Focus::Skip,
                    !state.is_completed(),
                ),
                rect,
                buf,
            ),
            Section::Message => {
                if let Some((message, color)) = status_message(state) {
                    Paragraph::new(Span::styled(message.to_string(), Style::default().fg(color)))
                        .alignment(Alignment::Center)
                        .wrap(Wrap { trim: true })
                        .render(rect, buf);
                }
            }
        }
    }
}

fn render_country_box(buf: &mut Buffer, area: Rect, state: &VerificationState) {
    let focused = state.focus == Focus::Country;
    let border = if state.sending {
        Color::DarkGray
    } else if focused {
        Color::Cyan
    } else {
        Color::Gray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    block.render(area, buf);

    let text = match state.country {
        Some(country) => format!(
            "{} {} ({})",
            country.flag, country.name, country.calling_code
        ),
        None => state.candidate.country_code.clone(),
    };
    // Leave room for the dropdown marker.
    let text = truncate_with_ellipsis(&text, inner.width.saturating_sub(2) as usize);
    let line = Line::from(vec![
        Span::styled(text, Style::default().fg(Color::White)),
        Span::styled(" ▾", Style::default().fg(Color::DarkGray)),
    ]);
    Paragraph::new(line).render(inner, buf);
}
