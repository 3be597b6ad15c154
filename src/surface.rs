//! Presentation capability surface.
//!
//! The carousel state machine never touches ratatui or mpv directly — it
//! drives a small trait covering exactly what it needs (text, strip state,
//! motion, media source, playback). `TuiSurface` is the real implementation;
//! tests use a recording fake.

use crate::carousel::Direction;

/// Motion state applied to the player pane during a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Motion {
  #[default]
  None,
  SlideOutLeft,
  SlideOutRight,
  SlideInLeft,
  SlideInRight,
}

impl Motion {
  /// Outgoing motion for a transition: advancing slides out left,
  /// retreating slides out right.
  pub fn outgoing(direction: Direction) -> Self {
    match direction {
      Direction::Next => Motion::SlideOutLeft,
      Direction::Previous => Motion::SlideOutRight,
    }
  }

  /// Incoming motion: the new clip enters from the side it was "behind".
  pub fn incoming(direction: Direction) -> Self {
    match direction {
      Direction::Next => Motion::SlideInRight,
      Direction::Previous => Motion::SlideInLeft,
    }
  }
}

/// Everything the carousel is allowed to do to the presentation layer.
pub trait Surface {
  /// Mark the playback surface for inline playback. Must be called before
  /// any play attempt — without it some players take over the full screen.
  fn prepare_inline_playback(&mut self);
  /// Replace the title text (also carries the fixed load-error strings).
  fn set_title(&mut self, title: &str);
  /// Update the 1-based position counter.
  fn set_position(&mut self, current: usize, total: usize);
  /// Update the progress indicator, 0.0..=100.0.
  fn set_progress(&mut self, percent: f64);
  /// Build the thumbnail strip, one label per clip.
  fn set_thumbnails(&mut self, labels: Vec<String>);
  /// Mark exactly one thumbnail as active.
  fn set_active_thumbnail(&mut self, index: usize);
  /// Enable/disable the previous and next controls.
  fn set_nav_enabled(&mut self, prev: bool, next: bool);
  /// Apply a motion state to the player pane.
  fn set_motion(&mut self, motion: Motion);
  /// Point the media surface at a new source URL.
  fn set_source(&mut self, url: &str);
  /// Reload the media surface from its current source.
  fn load(&mut self);
  /// Begin playback of the loaded source.
  fn begin_playback(&mut self);
}

/// The live surface: display state read by `ui.rs`, plus pending player
/// commands the event loop drains into mpv. `load`/`begin_playback` only
/// queue here because process control is async and the state machine is not.
#[derive(Debug, Default)]
pub struct TuiSurface {
  pub title: String,
  pub position: (usize, usize),
  pub progress: f64,
  pub thumbnails: Vec<String>,
  pub active_thumbnail: usize,
  pub prev_enabled: bool,
  pub next_enabled: bool,
  pub motion: Motion,
  pub source: Option<String>,
  inline_requested: bool,
  pending_load: Option<String>,
  pending_play: bool,
}

impl TuiSurface {
  pub fn new() -> Self {
    Self::default()
  }

  /// Take the queued reload target, if any.
  pub fn take_pending_load(&mut self) -> Option<String> {
    self.pending_load.take()
  }

  /// Take the queued play request.
  pub fn take_pending_play(&mut self) -> bool {
    std::mem::take(&mut self.pending_play)
  }

  /// Take the inline-playback request (set once, before the first play).
  pub fn take_inline_request(&mut self) -> bool {
    std::mem::take(&mut self.inline_requested)
  }
}

impl Surface for TuiSurface {
  fn prepare_inline_playback(&mut self) {
    self.inline_requested = true;
  }

  fn set_title(&mut self, title: &str) {
    self.title = title.to_string();
  }

  fn set_position(&mut self, current: usize, total: usize) {
    self.position = (current, total);
  }

  fn set_progress(&mut self, percent: f64) {
    self.progress = percent;
  }

  fn set_thumbnails(&mut self, labels: Vec<String>) {
    self.thumbnails = labels;
    self.active_thumbnail = 0;
  }

  fn set_active_thumbnail(&mut self, index: usize) {
    self.active_thumbnail = index;
  }

  fn set_nav_enabled(&mut self, prev: bool, next: bool) {
    self.prev_enabled = prev;
    self.next_enabled = next;
  }

  fn set_motion(&mut self, motion: Motion) {
    self.motion = motion;
  }

  fn set_source(&mut self, url: &str) {
    self.source = Some(url.to_string());
  }

  fn load(&mut self) {
    self.pending_load = self.source.clone();
  }

  fn begin_playback(&mut self) {
    self.pending_play = true;
  }
}

#[cfg(test)]
pub mod testing {
  use super::*;

  /// Ordered record of the surface calls the state machine makes.
  #[derive(Debug, Clone, PartialEq)]
  pub enum Event {
    PrepareInline,
    SetSource(String),
    Load,
    Play,
    Motion(Motion),
  }

  /// Recording fake for state-machine tests: display fields mirror
  /// `TuiSurface`, `events` captures call ordering.
  #[derive(Debug, Default)]
  pub struct FakeSurface {
    pub title: String,
    pub position: (usize, usize),
    pub progress: f64,
    pub thumbnails: Vec<String>,
    pub active_thumbnail: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub motion: Motion,
    pub source: Option<String>,
    pub events: Vec<Event>,
  }

  impl FakeSurface {
    pub fn new() -> Self {
      Self::default()
    }
  }

  impl Surface for FakeSurface {
    fn prepare_inline_playback(&mut self) {
      self.events.push(Event::PrepareInline);
    }

    fn set_title(&mut self, title: &str) {
      self.title = title.to_string();
    }

    fn set_position(&mut self, current: usize, total: usize) {
      self.position = (current, total);
    }

    fn set_progress(&mut self, percent: f64) {
      self.progress = percent;
    }

    fn set_thumbnails(&mut self, labels: Vec<String>) {
      self.thumbnails = labels;
      self.active_thumbnail = 0;
    }

    fn set_active_thumbnail(&mut self, index: usize) {
      self.active_thumbnail = index;
    }

    fn set_nav_enabled(&mut self, prev: bool, next: bool) {
      self.prev_enabled = prev;
      self.next_enabled = next;
    }

    fn set_motion(&mut self, motion: Motion) {
      self.motion = motion;
      self.events.push(Event::Motion(motion));
    }

    fn set_source(&mut self, url: &str) {
      self.source = Some(url.to_string());
      self.events.push(Event::SetSource(url.to_string()));
    }

    fn load(&mut self) {
      self.events.push(Event::Load);
    }

    fn begin_playback(&mut self) {
      self.events.push(Event::Play);
    }
  }
}
