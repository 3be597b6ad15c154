use anyhow::Result;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tracing::info;

use crate::carousel::Carousel;
use crate::config::Prefs;
use crate::constants::constants;
use crate::gallery::{self, GalleryConfig};
use crate::player::ClipPlayer;
use crate::surface::TuiSurface;
use crate::theme::{THEMES, Theme};

pub struct App {
  pub category: String,
  pub phases: usize,
  pub surface: TuiSurface,
  pub carousel: Option<Carousel>,
  pub player: ClipPlayer,
  pub theme_index: usize,
  pub status_message: Option<String>,
  pub last_error: Option<String>,
  pub should_quit: bool,
  /// Horizontal scroll offset of the thumbnail strip, in columns. Owned
  /// here so it stays stable across frames and transitions.
  pub strip_scroll: usize,
  config_rx: Option<oneshot::Receiver<Result<GalleryConfig>>>,
  /// When the last error was set — used for auto-dismiss after a few seconds.
  error_time: Option<Instant>,
}

impl App {
  /// Build the app and kick off the async gallery config load. Must run on
  /// a tokio runtime.
  pub fn new(category: String, phases: usize, config_source: String) -> Self {
    let prefs = Prefs::load();
    let theme_index =
      if let Some(ref name) = prefs.theme_name { THEMES.iter().position(|t| t.name == name).unwrap_or(0) } else { 0 };

    info!(category = %category, source = %config_source, "loading gallery config");
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
      let _ = tx.send(gallery::load_config(&config_source).await);
    });

    Self {
      category,
      phases,
      surface: TuiSurface::new(),
      carousel: None,
      player: ClipPlayer::new(),
      theme_index,
      status_message: Some("Loading gallery…".to_string()),
      last_error: None,
      should_quit: false,
      strip_scroll: 0,
      config_rx: Some(rx),
      error_time: None,
    }
  }

  pub fn theme(&self) -> &'static Theme {
    &THEMES[self.theme_index % THEMES.len()]
  }

  pub fn next_theme(&mut self) {
    self.theme_index = (self.theme_index + 1) % THEMES.len();
    Prefs { theme_name: Some(self.theme().name.to_string()) }.save();
  }

  /// Set an error message with auto-dismiss tracking.
  pub fn set_error(&mut self, msg: String) {
    self.last_error = Some(msg);
    self.error_time = Some(Instant::now());
  }

  /// Clear stale error messages after the dismiss window.
  pub fn expire_error(&mut self) {
    if let Some(t) = self.error_time
      && t.elapsed() >= Duration::from_secs(constants().error_dismiss_secs)
    {
      self.last_error = None;
      self.error_time = None;
    }
  }

  /// Apply a finished config load, if one is ready. The carousel only
  /// exists after a successful load; every failure path leaves it `None`
  /// with a fixed error title on the surface.
  pub fn check_pending(&mut self) {
    let Some(mut rx) = self.config_rx.take() else {
      return;
    };
    match rx.try_recv() {
      Ok(result) => {
        self.status_message = None;
        self.carousel = Carousel::from_load(result, &self.category, self.phases, &mut self.surface);
        if let Some(ref carousel) = self.carousel {
          info!(clips = carousel.clip_count(), index = carousel.current_index(), "carousel ready");
        }
      }
      Err(oneshot::error::TryRecvError::Empty) => {
        self.config_rx = Some(rx);
      }
      Err(oneshot::error::TryRecvError::Closed) => {
        self.status_message = None;
        self.carousel =
          Carousel::from_load(Err(anyhow::anyhow!("config load task failed")), &self.category, self.phases, &mut self.surface);
      }
    }
  }

  /// Advance the transition state machine.
  pub fn tick(&mut self, now: Instant) {
    if let Some(ref mut carousel) = self.carousel {
      carousel.tick(now, &mut self.surface);
    }
  }

  /// Drain queued surface commands into the mpv player.
  pub async fn flush_player(&mut self) -> Result<()> {
    if self.surface.take_inline_request() {
      self.player.set_inline();
    }
    if let Some(url) = self.surface.take_pending_load() {
      self.player.load(url).await?;
    }
    if self.surface.take_pending_play()
      && let Err(e) = self.player.play().await
    {
      self.set_error(format!("Playback error: {:#}", e));
    }
    Ok(())
  }

  /// Feed a natural mpv exit into the carousel as the clip-ended signal.
  pub fn poll_player(&mut self, now: Instant) {
    if self.player.poll_ended()
      && let Some(ref mut carousel) = self.carousel
    {
      carousel.on_ended(now, &mut self.surface);
    }
  }

  pub fn nav_next(&mut self) {
    if let Some(ref mut carousel) = self.carousel {
      carousel.next_clip(Instant::now(), &mut self.surface);
    }
  }

  pub fn nav_prev(&mut self) {
    if let Some(ref mut carousel) = self.carousel {
      carousel.prev_clip(Instant::now(), &mut self.surface);
    }
  }

  /// Jump straight to a thumbnail's clip.
  pub fn jump_to(&mut self, index: usize) {
    if let Some(ref mut carousel) = self.carousel {
      carousel.go_to(index, Instant::now(), &mut self.surface);
    }
  }

  pub async fn toggle_pause(&mut self) {
    if self.player.is_playing()
      && let Err(e) = self.player.toggle_pause().await
    {
      self.set_error(format!("Pause error: {}", e));
    }
  }
}
