//! Carousel state machine.
//!
//! Owns the navigation state for one gallery category: the current clip
//! index and the transition phase. All presentation goes through the
//! [`Surface`] trait; time comes in through `tick(now, ..)` so transitions
//! are deterministic under test.
//!
//! Transition sequence for a directional move:
//!
//! ```text
//! Idle -> SlidingOut (outgoing motion, 500ms)
//!      -> SourceSwapped (source swapped + reloaded, incoming motion applied)
//!      -> SlidingIn (next tick: motion cleared, playback begins, 500ms)
//!      -> Idle
//! ```
//!
//! At most one transition is in flight; navigation arriving mid-transition
//! is discarded before it can touch the index. A started transition always
//! runs to completion — there is no cancellation path.

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::constants::constants;
use crate::gallery::{GalleryConfig, clip_url};
use crate::names::{format_display_name, format_thumbnail_label};
use crate::surface::{Motion, Surface};

/// Title shown when the config fetch or parse fails, or a category has no clips.
pub const LOAD_ERROR_TITLE: &str = "Error loading videos";

/// Title shown when the config loads but the requested category is absent.
pub const MISSING_CATEGORY_TITLE: &str = "Error: Category not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  Previous,
  Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
  Idle,
  /// Outgoing motion in progress; swap happens when `until` is reached.
  SlidingOut { direction: Direction, until: Instant },
  /// Source swapped and incoming motion applied; playback begins on the
  /// next tick so the incoming state is rendered at least once.
  SourceSwapped,
  /// Playback started; the in-flight flag clears when `until` is reached.
  SlidingIn { until: Instant },
}

pub struct Carousel {
  videos: Vec<String>,
  base_path: String,
  phases: usize,
  current: usize,
  phase: Phase,
}

impl Carousel {
  /// Apply a finished config load. On success the carousel is initialized
  /// against `surface` (thumbnails built, first clip rendered and played).
  /// On any failure a fixed error title is written and `None` is returned —
  /// the widget stays inert, nothing is thrown at the caller.
  pub fn from_load(
    result: anyhow::Result<GalleryConfig>,
    category: &str,
    phases: usize,
    surface: &mut dyn Surface,
  ) -> Option<Self> {
    let config = match result {
      Ok(config) => config,
      Err(e) => {
        warn!(err = %format!("{:#}", e), "gallery config load failed");
        surface.set_title(LOAD_ERROR_TITLE);
        return None;
      }
    };

    let Some(cat) = config.get(category) else {
      warn!(category, "category not found in gallery config");
      surface.set_title(MISSING_CATEGORY_TITLE);
      return None;
    };
    if cat.videos.is_empty() {
      warn!(category, "category has no videos");
      surface.set_title(LOAD_ERROR_TITLE);
      return None;
    }

    info!(category, clips = cat.videos.len(), "gallery category loaded");
    let carousel =
      Self { videos: cat.videos.clone(), base_path: cat.base_path.clone(), phases, current: 0, phase: Phase::Idle };
    carousel.init(surface);
    Some(carousel)
  }

  /// Initial render: inline-playback capability, thumbnail strip, then the
  /// first clip with no motion — swap, reload and play immediately.
  fn init(&self, surface: &mut dyn Surface) {
    surface.prepare_inline_playback();
    let labels: Vec<String> = self.videos.iter().map(|v| format_thumbnail_label(v, self.phases)).collect();
    surface.set_thumbnails(labels);

    surface.set_source(&clip_url(&self.base_path, &self.videos[self.current]));
    surface.load();
    surface.begin_playback();
    self.apply_displays(surface);
  }

  pub fn current_index(&self) -> usize {
    self.current
  }

  pub fn clip_count(&self) -> usize {
    self.videos.len()
  }

  /// True while a transition is in flight.
  pub fn is_animating(&self) -> bool {
    self.phase != Phase::Idle
  }

  /// Advance by one. No-op at the last clip or mid-transition.
  pub fn next_clip(&mut self, now: Instant, surface: &mut dyn Surface) {
    if self.is_animating() || self.current + 1 >= self.videos.len() {
      return;
    }
    self.current += 1;
    self.start_transition(Direction::Next, now, surface);
  }

  /// Retreat by one. No-op at the first clip or mid-transition.
  pub fn prev_clip(&mut self, now: Instant, surface: &mut dyn Surface) {
    if self.is_animating() || self.current == 0 {
      return;
    }
    self.current -= 1;
    self.start_transition(Direction::Previous, now, surface);
  }

  /// Jump to `index`, clamped into range. The transition direction is
  /// implied by the comparison with the current index; jumping to the
  /// current clip (or mid-transition) is a no-op.
  pub fn go_to(&mut self, index: usize, now: Instant, surface: &mut dyn Surface) {
    if self.is_animating() {
      return;
    }
    let target = index.min(self.videos.len() - 1);
    if target == self.current {
      return;
    }
    let direction = if target > self.current { Direction::Next } else { Direction::Previous };
    self.current = target;
    self.start_transition(direction, now, surface);
  }

  /// Playback-ended signal: auto-advance, wrapping from the last clip back
  /// to index 0 with a next-direction transition (loop, don't stop).
  pub fn on_ended(&mut self, now: Instant, surface: &mut dyn Surface) {
    if self.is_animating() {
      return;
    }
    if self.current + 1 < self.videos.len() {
      self.next_clip(now, surface);
    } else {
      debug!("last clip ended, wrapping to start");
      self.current = 0;
      self.start_transition(Direction::Next, now, surface);
    }
  }

  /// Advance the transition state machine. Called once per event-loop
  /// iteration; a no-op while idle.
  pub fn tick(&mut self, now: Instant, surface: &mut dyn Surface) {
    match self.phase {
      Phase::Idle => {}
      Phase::SlidingOut { direction, until } => {
        if now >= until {
          surface.set_source(&clip_url(&self.base_path, &self.videos[self.current]));
          surface.load();
          surface.set_motion(Motion::incoming(direction));
          self.phase = Phase::SourceSwapped;
        }
      }
      Phase::SourceSwapped => {
        // The incoming motion has been rendered for one frame; clear it and play.
        surface.set_motion(Motion::None);
        surface.begin_playback();
        self.phase = Phase::SlidingIn { until: now + Duration::from_millis(constants().slide_in_ms) };
      }
      Phase::SlidingIn { until } => {
        if now >= until {
          self.phase = Phase::Idle;
        }
      }
    }
  }

  fn start_transition(&mut self, direction: Direction, now: Instant, surface: &mut dyn Surface) {
    debug!(index = self.current, ?direction, "starting transition");
    surface.set_motion(Motion::outgoing(direction));
    self.phase = Phase::SlidingOut { direction, until: now + Duration::from_millis(constants().slide_out_ms) };
    self.apply_displays(surface);
  }

  /// Push title, counter, progress, active thumbnail and nav enablement for
  /// the current index. Runs at transition start and on the initial render.
  fn apply_displays(&self, surface: &mut dyn Surface) {
    let clip = &self.videos[self.current];
    surface.set_title(&format_display_name(clip, self.phases));
    surface.set_position(self.current + 1, self.videos.len());
    surface.set_progress((self.current + 1) as f64 / self.videos.len() as f64 * 100.0);
    surface.set_active_thumbnail(self.current);
    surface.set_nav_enabled(self.current > 0, self.current + 1 < self.videos.len());
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::gallery::Category;
  use crate::surface::testing::{Event, FakeSurface};

  fn config(videos: &[&str]) -> GalleryConfig {
    let mut c = GalleryConfig::new();
    c.insert(
      "bouldering".to_string(),
      Category { base_path: "/media/".to_string(), videos: videos.iter().map(|v| v.to_string()).collect() },
    );
    c
  }

  fn carousel(videos: &[&str], surface: &mut FakeSurface) -> Carousel {
    Carousel::from_load(Ok(config(videos)), "bouldering", 2, surface).unwrap()
  }

  fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
  }

  /// Run one full transition to completion: swap at +500ms, play on the
  /// following tick, idle after another 500ms.
  fn settle(c: &mut Carousel, t0: Instant, surface: &mut FakeSurface) {
    c.tick(t0 + ms(500), surface);
    c.tick(t0 + ms(501), surface);
    c.tick(t0 + ms(1001), surface);
    assert!(!c.is_animating());
  }

  // --- load / init ---

  #[test]
  fn init_builds_thumbnails_and_plays_first_clip() {
    let mut s = FakeSurface::new();
    let c = carousel(&["(1)warmup.mp4", "crux-1+topout-2.mp4", "send.mp4"], &mut s);

    assert_eq!(c.current_index(), 0);
    assert_eq!(s.thumbnails, vec!["warmup", "crux → topout", "send"]);
    assert_eq!(s.title, "warmup");
    assert_eq!(s.position, (1, 3));
    assert_eq!(s.active_thumbnail, 0);
    assert!(!s.prev_enabled);
    assert!(s.next_enabled);
    // Inline capability precedes the play attempt, and no motion is involved.
    assert_eq!(
      s.events,
      vec![
        Event::PrepareInline,
        Event::SetSource("/media/%281%29warmup.mp4".to_string()),
        Event::Load,
        Event::Play,
      ]
    );
  }

  #[test]
  fn load_failure_writes_error_title_and_builds_nothing() {
    let mut s = FakeSurface::new();
    let c = Carousel::from_load(Err(anyhow::anyhow!("connection refused")), "bouldering", 2, &mut s);
    assert!(c.is_none());
    assert_eq!(s.title, LOAD_ERROR_TITLE);
    assert!(s.thumbnails.is_empty());
    assert!(s.events.is_empty());
  }

  #[test]
  fn missing_category_writes_error_title() {
    let mut s = FakeSurface::new();
    let c = Carousel::from_load(Ok(config(&["a.mp4"])), "lead", 2, &mut s);
    assert!(c.is_none());
    assert_eq!(s.title, MISSING_CATEGORY_TITLE);
    assert!(s.thumbnails.is_empty());
  }

  #[test]
  fn empty_category_is_inert() {
    let mut s = FakeSurface::new();
    let c = Carousel::from_load(Ok(config(&[])), "bouldering", 2, &mut s);
    assert!(c.is_none());
    assert_eq!(s.title, LOAD_ERROR_TITLE);
    assert!(s.events.is_empty());
  }

  // --- transition sequence ---

  #[test]
  fn next_runs_full_transition_sequence() {
    let mut s = FakeSurface::new();
    let mut c = carousel(&["a.mp4", "b_c-1.mp4"], &mut s);
    let t0 = Instant::now();
    s.events.clear();

    c.next_clip(t0, &mut s);
    assert_eq!(c.current_index(), 1);
    assert!(c.is_animating());
    // Displays update at transition start, before the swap.
    assert_eq!(s.title, "b_c-1");
    assert_eq!(s.position, (2, 2));
    assert_eq!(s.progress, 100.0);
    assert_eq!(s.active_thumbnail, 1);
    assert!(s.prev_enabled);
    assert!(!s.next_enabled);
    assert_eq!(s.events, vec![Event::Motion(Motion::SlideOutLeft)]);

    // Before the outgoing deadline nothing further happens.
    c.tick(t0 + ms(499), &mut s);
    assert_eq!(s.events.len(), 1);

    // Deadline: swap, reload, incoming motion — but not playing yet.
    c.tick(t0 + ms(500), &mut s);
    assert_eq!(
      s.events[1..],
      [Event::SetSource("/media/b_c-1.mp4".to_string()), Event::Load, Event::Motion(Motion::SlideInRight)]
    );

    // Next tick: motion cleared, playback begins, still animating.
    c.tick(t0 + ms(510), &mut s);
    assert_eq!(s.events[4..], [Event::Motion(Motion::None), Event::Play]);
    assert!(c.is_animating());

    // Incoming deadline: back to idle.
    c.tick(t0 + ms(1010), &mut s);
    assert!(!c.is_animating());
  }

  #[test]
  fn prev_uses_opposite_motion() {
    let mut s = FakeSurface::new();
    let mut c = carousel(&["a.mp4", "b.mp4"], &mut s);
    let t0 = Instant::now();
    c.next_clip(t0, &mut s);
    settle(&mut c, t0, &mut s);
    s.events.clear();

    let t1 = t0 + ms(2000);
    c.prev_clip(t1, &mut s);
    assert_eq!(s.events, vec![Event::Motion(Motion::SlideOutRight)]);
    c.tick(t1 + ms(500), &mut s);
    assert_eq!(*s.events.last().unwrap(), Event::Motion(Motion::SlideInLeft));
  }

  // --- navigation gating ---

  #[test]
  fn nav_is_dropped_mid_transition() {
    let mut s = FakeSurface::new();
    let mut c = carousel(&["a.mp4", "b.mp4", "c.mp4"], &mut s);
    let t0 = Instant::now();

    c.next_clip(t0, &mut s);
    assert_eq!(c.current_index(), 1);

    // All navigation while animating leaves the index untouched.
    c.next_clip(t0 + ms(10), &mut s);
    c.prev_clip(t0 + ms(20), &mut s);
    c.go_to(2, t0 + ms(30), &mut s);
    c.on_ended(t0 + ms(40), &mut s);
    assert_eq!(c.current_index(), 1);

    settle(&mut c, t0, &mut s);
    assert_eq!(c.current_index(), 1);
  }

  #[test]
  fn index_stays_in_bounds_at_either_end() {
    let mut s = FakeSurface::new();
    let mut c = carousel(&["a.mp4", "b.mp4"], &mut s);
    let mut t = Instant::now();

    c.prev_clip(t, &mut s);
    assert_eq!(c.current_index(), 0);
    assert!(!c.is_animating());

    for _ in 0..5 {
      c.next_clip(t, &mut s);
      settle(&mut c, t, &mut s);
      assert!(c.current_index() < c.clip_count());
      t += ms(2000);
    }
    assert_eq!(c.current_index(), 1);

    c.next_clip(t, &mut s);
    assert_eq!(c.current_index(), 1);
    assert!(!c.is_animating());
  }

  // --- go_to ---

  #[test]
  fn go_to_clamps_and_implies_direction() {
    let mut s = FakeSurface::new();
    let mut c = carousel(&["a.mp4", "b.mp4", "c.mp4"], &mut s);
    let t0 = Instant::now();
    s.events.clear();

    c.go_to(99, t0, &mut s);
    assert_eq!(c.current_index(), 2);
    assert_eq!(s.events, vec![Event::Motion(Motion::SlideOutLeft)]);
    settle(&mut c, t0, &mut s);

    let t1 = t0 + ms(2000);
    s.events.clear();
    c.go_to(0, t1, &mut s);
    assert_eq!(c.current_index(), 0);
    assert_eq!(s.events[0], Event::Motion(Motion::SlideOutRight));
  }

  #[test]
  fn go_to_current_index_is_a_no_op() {
    let mut s = FakeSurface::new();
    let mut c = carousel(&["a.mp4", "b.mp4"], &mut s);
    s.events.clear();

    c.go_to(0, Instant::now(), &mut s);
    assert_eq!(c.current_index(), 0);
    assert!(!c.is_animating());
    assert!(s.events.is_empty());
  }

  // --- ended / wrap ---

  #[test]
  fn ended_mid_list_advances() {
    let mut s = FakeSurface::new();
    let mut c = carousel(&["a.mp4", "b.mp4", "c.mp4"], &mut s);
    c.on_ended(Instant::now(), &mut s);
    assert_eq!(c.current_index(), 1);
    assert!(c.is_animating());
  }

  #[test]
  fn ended_at_last_clip_wraps_to_start_with_next_motion() {
    let mut s = FakeSurface::new();
    let mut c = carousel(&["a.mp4", "b.mp4", "c.mp4"], &mut s);
    let t0 = Instant::now();
    c.go_to(2, t0, &mut s);
    settle(&mut c, t0, &mut s);

    s.events.clear();
    let t1 = t0 + ms(2000);
    c.on_ended(t1, &mut s);
    assert_eq!(c.current_index(), 0);
    assert!(c.is_animating());
    // Wrap is presented as a "next" transition even though the index went down.
    assert_eq!(s.events, vec![Event::Motion(Motion::SlideOutLeft)]);
    assert_eq!(s.position, (1, 3));

    c.tick(t1 + ms(500), &mut s);
    assert_eq!(s.events[1], Event::SetSource("/media/a.mp4".to_string()));
  }
}
