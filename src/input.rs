use anyhow::Result;
use ratatui::crossterm::event::{self, KeyCode, KeyModifiers};

use crate::app::App;

/// Global key handling. Arrow keys navigate the carousel, digits jump to a
/// thumbnail, Space toggles pause.
pub async fn handle_key_event(app: &mut App, key: event::KeyEvent) -> Result<()> {
  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
    app.should_quit = true;
    return Ok(());
  }

  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('t') {
    app.next_theme();
    return Ok(());
  }

  match key.code {
    KeyCode::Left => {
      app.nav_prev();
    }
    KeyCode::Right => {
      app.nav_next();
    }
    KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
      // Digit keys are the thumbnail-click analog: 1 jumps to the first clip.
      app.jump_to(c as usize - '1' as usize);
    }
    KeyCode::Char(' ') => {
      app.toggle_pause().await;
    }
    KeyCode::Char('q') | KeyCode::Esc => {
      app.should_quit = true;
    }
    _ => {}
  }
  Ok(())
}
