use ratatui::style::Color;

/// A named color palette for the UI. Cycled at runtime with Ctrl+T and
/// persisted through the prefs file.
#[derive(Debug)]
pub struct Theme {
  pub name: &'static str,
  pub bg: Color,
  pub fg: Color,
  pub accent: Color,
  pub muted: Color,
  pub border: Color,
  pub error: Color,
  pub status: Color,
  pub highlight_fg: Color,
  pub highlight_bg: Color,
  pub key_fg: Color,
  pub key_bg: Color,
  pub stripe_bg: Color,
}

pub static THEMES: &[Theme] = &[
  Theme {
    name: "sketchbook",
    bg: Color::Rgb(30, 30, 38),
    fg: Color::Rgb(214, 214, 222),
    accent: Color::Rgb(250, 179, 135),
    muted: Color::Rgb(124, 124, 140),
    border: Color::Rgb(69, 71, 90),
    error: Color::Rgb(243, 139, 168),
    status: Color::Rgb(166, 227, 161),
    highlight_fg: Color::Rgb(30, 30, 38),
    highlight_bg: Color::Rgb(250, 179, 135),
    key_fg: Color::Rgb(30, 30, 38),
    key_bg: Color::Rgb(137, 180, 250),
    stripe_bg: Color::Rgb(36, 36, 46),
  },
  Theme {
    name: "midnight",
    bg: Color::Rgb(16, 20, 28),
    fg: Color::Rgb(200, 209, 218),
    accent: Color::Rgb(122, 162, 247),
    muted: Color::Rgb(86, 95, 115),
    border: Color::Rgb(48, 54, 70),
    error: Color::Rgb(247, 118, 142),
    status: Color::Rgb(158, 206, 106),
    highlight_fg: Color::Rgb(16, 20, 28),
    highlight_bg: Color::Rgb(122, 162, 247),
    key_fg: Color::Rgb(16, 20, 28),
    key_bg: Color::Rgb(187, 154, 247),
    stripe_bg: Color::Rgb(22, 27, 37),
  },
  Theme {
    name: "paper",
    bg: Color::Rgb(246, 242, 233),
    fg: Color::Rgb(60, 56, 54),
    accent: Color::Rgb(175, 58, 3),
    muted: Color::Rgb(146, 131, 116),
    border: Color::Rgb(213, 196, 161),
    error: Color::Rgb(157, 0, 6),
    status: Color::Rgb(121, 116, 14),
    highlight_fg: Color::Rgb(246, 242, 233),
    highlight_bg: Color::Rgb(175, 58, 3),
    key_fg: Color::Rgb(246, 242, 233),
    key_bg: Color::Rgb(7, 102, 120),
    stripe_bg: Color::Rgb(235, 228, 214),
  },
];
