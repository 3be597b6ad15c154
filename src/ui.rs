use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Layout, Rect},
  style::{Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Padding, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;
use crate::constants::constants;
use crate::surface::Motion;

// --- Helpers ---

/// Truncate a string to `max_width` characters, appending "…" if truncated.
fn truncate_str(s: &str, max_width: usize) -> String {
  if s.chars().count() <= max_width {
    s.to_string()
  } else {
    let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    format!("{}…", truncated)
  }
}

// --- UI Rendering ---

pub fn ui(frame: &mut Frame, app: &mut App) {
  let theme = app.theme();

  frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), frame.area());

  let [header_area, player_area, strip_area, progress_area, status_area, footer_area] = Layout::vertical([
    Constraint::Length(1),
    Constraint::Min(5),
    Constraint::Length(3),
    Constraint::Length(1),
    Constraint::Length(1),
    Constraint::Length(1),
  ])
  .areas(frame.area());

  render_header(frame, app, header_area);
  render_player(frame, app, player_area);
  render_strip(frame, app, strip_area);
  render_progress(frame, app, progress_area);
  render_status(frame, app, status_area);
  render_footer(frame, app, footer_area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let left = Line::from(vec![
    Span::styled(" ▶ reel ", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
    Span::styled(format!("· {} ", app.category), Style::default().fg(theme.muted)),
  ]);
  frame.render_widget(left, area);

  let version = format!("v{} ", env!("CARGO_PKG_VERSION"));
  let right = Line::from(Span::styled(&version, Style::default().fg(theme.muted)));
  let right_area =
    Rect { x: area.x + area.width.saturating_sub(version.len() as u16), width: version.len() as u16, ..area };
  frame.render_widget(right, right_area);
}

fn render_player(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let block = Block::bordered()
    .title(Span::styled(" Now Playing ", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)))
    .border_type(ratatui::widgets::BorderType::Rounded)
    .border_style(Style::default().fg(theme.border))
    .padding(Padding::horizontal(1));
  let mut inner = block.inner(area);
  frame.render_widget(block, area);

  // A few columns of horizontal shift plus dimming stand in for the slide
  // animation while a transition is in flight.
  let motion = app.surface.motion;
  let shift: u16 = if motion == Motion::None { 0 } else { 3 };
  match motion {
    Motion::SlideOutLeft | Motion::SlideInLeft => {
      inner.width = inner.width.saturating_sub(shift);
    }
    Motion::SlideOutRight | Motion::SlideInRight => {
      inner.x += shift.min(inner.width);
      inner.width = inner.width.saturating_sub(shift);
    }
    Motion::None => {}
  }
  let fg = if motion == Motion::None { theme.fg } else { theme.muted };

  let is_error = !app.surface.title.is_empty() && app.carousel.is_none();
  let title_style = if is_error {
    Style::default().fg(theme.error).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
  };

  let inner_w = inner.width as usize;
  let mut lines = vec![Line::from(""), Line::from(Span::styled(truncate_str(&app.surface.title, inner_w), title_style))];

  if let Some(ref source) = app.surface.source {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(truncate_str(source, inner_w), Style::default().fg(theme.muted))));
  }

  let state = if motion != Motion::None {
    "⇆ transitioning"
  } else if app.player.paused {
    "⏸ paused"
  } else if app.player.is_playing() {
    "▶ playing"
  } else {
    ""
  };
  if !state.is_empty() {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(state, Style::default().fg(theme.status))));
  }

  let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
  frame.render_widget(paragraph, inner);
}

fn render_strip(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let block = Block::bordered()
    .title(Span::styled(" Clips ", Style::default().fg(theme.accent)))
    .border_type(ratatui::widgets::BorderType::Rounded)
    .border_style(Style::default().fg(theme.border));
  let inner = block.inner(area);
  frame.render_widget(block, area);

  if app.surface.thumbnails.is_empty() {
    frame.render_widget(Paragraph::new(Span::styled("no clips", Style::default().fg(theme.muted))), inner);
    return;
  }

  let max_label = constants().strip_label_max_width;
  let active = app.surface.active_thumbnail;
  let cells: Vec<(String, bool)> = app
    .surface
    .thumbnails
    .iter()
    .enumerate()
    .map(|(i, label)| (format!("  {}  ", truncate_str(label, max_label)), i == active))
    .collect();

  // Keep the active cell visible without jumping the strip around: the
  // offset only moves when the active cell would fall outside the viewport.
  let vw = inner.width as usize;
  let active_start: usize = cells.iter().take(active).map(|(t, _)| t.width()).sum();
  let active_end = active_start + cells.get(active).map_or(0, |(t, _)| t.width());
  if active_start < app.strip_scroll {
    app.strip_scroll = active_start;
  } else if active_end > app.strip_scroll + vw {
    app.strip_scroll = active_end.saturating_sub(vw);
  }
  let scroll = app.strip_scroll;

  let mut spans: Vec<Span> = Vec::new();
  let mut col = 0usize;
  for (i, (text, is_active)) in cells.iter().enumerate() {
    let mut visible = String::new();
    for c in text.chars() {
      let w = c.width().unwrap_or(0);
      if col + w > scroll && col < scroll + vw {
        visible.push(c);
      }
      col += w;
    }
    if !visible.is_empty() {
      let style = if *is_active {
        Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD)
      } else if i % 2 == 1 {
        Style::default().fg(theme.muted).bg(theme.stripe_bg)
      } else {
        Style::default().fg(theme.muted)
      };
      spans.push(Span::styled(visible, style));
    }
  }
  frame.render_widget(Line::from(spans), inner);
}

fn render_progress(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let (current, total) = app.surface.position;
  if total == 0 {
    return;
  }

  let prev_style = if app.surface.prev_enabled { Style::default().fg(theme.fg) } else { Style::default().fg(theme.border) };
  let next_style = if app.surface.next_enabled { Style::default().fg(theme.fg) } else { Style::default().fg(theme.border) };
  let counter = format!(" {} / {} ", current, total);

  let bar_w = area.width.saturating_sub(counter.len() as u16 + 6) as usize;
  let filled = (app.surface.progress / 100.0 * bar_w as f64).round() as usize;
  let bar: String =
    std::iter::repeat_n('█', filled.min(bar_w)).chain(std::iter::repeat_n('░', bar_w.saturating_sub(filled))).collect();

  let line = Line::from(vec![
    Span::styled(" ‹ ", prev_style),
    Span::styled(bar, Style::default().fg(theme.accent)),
    Span::styled(counter, Style::default().fg(theme.fg)),
    Span::styled(" › ", next_style),
  ]);
  frame.render_widget(line, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let (text, style) = if let Some(msg) = &app.status_message {
    (format!(" ⏳ {}", msg), Style::default().fg(theme.status))
  } else if let Some(err) = &app.last_error {
    (format!(" ⚠  {}", err), Style::default().fg(theme.error))
  } else if app.player.paused {
    (" ⏸ Paused".to_string(), Style::default().fg(theme.status))
  } else {
    (" Ready".to_string(), Style::default().fg(theme.muted))
  };
  frame.render_widget(Paragraph::new(text).style(style), area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let pause_label = if app.player.paused { "Resume" } else { "Pause" };
  let keys: Vec<(&str, &str)> =
    vec![("←/→", "Navigate"), ("1-9", "Jump"), ("Space", pause_label), ("^t", "Theme"), ("q", "Quit")];

  let spans: Vec<Span> = keys
    .iter()
    .enumerate()
    .flat_map(|(i, (key, action))| {
      let mut s = vec![
        Span::styled(format!(" {} ", key), Style::default().fg(theme.key_fg).bg(theme.key_bg)),
        Span::styled(format!(" {} ", action), Style::default().fg(theme.muted)),
      ];
      if i < keys.len() - 1 {
        s.push(Span::raw("  "));
      }
      s
    })
    .collect();

  frame.render_widget(Line::from(spans), area);

  let theme_label = format!("{} ", theme.name);
  let right = Line::from(Span::styled(&theme_label, Style::default().fg(theme.muted)));
  let right_area =
    Rect { x: area.x + area.width.saturating_sub(theme_label.len() as u16), width: theme_label.len() as u16, ..area };
  frame.render_widget(right, right_area);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn truncate_short_strings_unchanged() {
    assert_eq!(truncate_str("abc", 5), "abc");
    assert_eq!(truncate_str("abcde", 5), "abcde");
  }

  #[test]
  fn truncate_long_strings_get_ellipsis() {
    assert_eq!(truncate_str("abcdef", 5), "abcd…");
    assert_eq!(truncate_str("intro → setup_phase", 10), "intro → s…");
  }
}
