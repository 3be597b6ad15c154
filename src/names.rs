//! Clip filename formatting.
//!
//! Gallery filenames follow a loose grammar: an optional parenthesized
//! ordinal prefix (authoring order, e.g. `(3)`), `+`-separated phase
//! segments, an optional `-<digits>` revision tag per segment, and a `.mp4`
//! suffix. e.g. `(2)intro-1+setup_phase-2.mp4` is a two-phase clip.
//!
//! These functions are total: malformed names degrade to a best-effort
//! string, never an error.

/// Separator between phase segments in formatted labels.
pub const PHASE_SEPARATOR: &str = " → ";

/// Strip the `.mp4` suffix and a leading `(<digits>)` ordinal prefix.
fn clean_base(filename: &str) -> &str {
  let name = filename.strip_suffix(".mp4").unwrap_or(filename);
  if let Some(rest) = name.strip_prefix('(')
    && let Some(close) = rest.find(')')
    && close > 0
    && rest[..close].bytes().all(|b| b.is_ascii_digit())
  {
    return &rest[close + 1..];
  }
  name
}

/// Strip a trailing `-<digits>` revision tag from a segment.
fn strip_revision(segment: &str) -> &str {
  let trimmed = segment.trim_end_matches(|c: char| c.is_ascii_digit());
  if trimmed.len() < segment.len()
    && let Some(base) = trimmed.strip_suffix('-')
  {
    return base;
  }
  segment
}

/// Uppercase only the first character, leaving the rest untouched.
fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    None => String::new(),
  }
}

/// Format a clip filename as a display title.
///
/// With at least `phases` `+`-separated segments, each segment loses its
/// revision tag, underscores become spaces, and the first character is
/// capitalized; segments are joined with [`PHASE_SEPARATOR`]. Below the
/// threshold the cleaned name is returned verbatim.
pub fn format_display_name(filename: &str, phases: usize) -> String {
  let name = clean_base(filename);
  let parts: Vec<&str> = name.split('+').collect();
  if parts.len() >= phases {
    let formatted: Vec<String> = parts.iter().map(|part| capitalize(&strip_revision(part).replace('_', " "))).collect();
    formatted.join(PHASE_SEPARATOR)
  } else {
    name.to_string()
  }
}

/// Format a clip filename as a thumbnail label.
///
/// Same cleaning and phase-count test as [`format_display_name`], but
/// segments keep their original case and underscores — only the revision
/// tag is stripped.
pub fn format_thumbnail_label(filename: &str, phases: usize) -> String {
  let name = clean_base(filename);
  let parts: Vec<&str> = name.split('+').collect();
  if parts.len() >= phases {
    parts.iter().map(|part| strip_revision(part)).collect::<Vec<_>>().join(PHASE_SEPARATOR)
  } else {
    name.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  // --- format_display_name ---

  #[test]
  fn display_name_multi_phase() {
    assert_eq!(format_display_name("intro-1+setup_phase-2.mp4", 2), "Intro → Setup phase");
  }

  #[test]
  fn display_name_below_threshold_returns_cleaned_name() {
    assert_eq!(format_display_name("(3)solo.mp4", 2), "solo");
    assert_eq!(format_display_name("warmup_set-4.mp4", 2), "warmup_set-4");
  }

  #[test]
  fn display_name_ordinal_prefix_stripped_before_split() {
    assert_eq!(format_display_name("(12)first-1+second-2.mp4", 2), "First → Second");
  }

  #[test]
  fn display_name_phase_one_always_formats() {
    // split always yields at least one segment, so phases <= 1 formats everything
    assert_eq!(format_display_name("warmup_set-4.mp4", 1), "Warmup set");
  }

  #[test]
  fn display_name_three_segments() {
    assert_eq!(format_display_name("a_b-1+c-2+d_e-3.mp4", 2), "A b → C → D e");
  }

  #[test]
  fn display_name_malformed_degrades() {
    assert_eq!(format_display_name("", 2), "");
    assert_eq!(format_display_name(".mp4", 2), "");
    assert_eq!(format_display_name("(x)clip.mp4", 2), "(x)clip");
    assert_eq!(format_display_name("()clip.mp4", 2), "()clip");
  }

  // --- format_thumbnail_label ---

  #[test]
  fn thumbnail_label_keeps_case_and_underscores() {
    assert_eq!(format_thumbnail_label("intro-1+setup_phase-2.mp4", 2), "intro → setup_phase");
  }

  #[test]
  fn thumbnail_label_below_threshold_returns_cleaned_name() {
    assert_eq!(format_thumbnail_label("(3)solo.mp4", 2), "solo");
    assert_eq!(format_thumbnail_label("single_clip-7.mp4", 2), "single_clip-7");
  }

  // --- helpers ---

  #[test]
  fn revision_tag_requires_hyphen_and_digits() {
    assert_eq!(strip_revision("intro-1"), "intro");
    assert_eq!(strip_revision("intro-12"), "intro");
    assert_eq!(strip_revision("intro1"), "intro1");
    assert_eq!(strip_revision("intro-"), "intro-");
    assert_eq!(strip_revision("intro"), "intro");
  }

  #[test]
  fn ordinal_prefix_requires_digits() {
    assert_eq!(clean_base("(3)clip.mp4"), "clip");
    assert_eq!(clean_base("(31)clip.mp4"), "clip");
    assert_eq!(clean_base("(3a)clip.mp4"), "(3a)clip");
    assert_eq!(clean_base("clip.mp4"), "clip");
  }
}
