use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::collections::HashMap;

/// One named category in the gallery config: a base path plus an ordered
/// list of clip filenames.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
  pub base_path: String,
  pub videos: Vec<String>,
}

/// The whole gallery config document, keyed by category name.
/// Loaded once per app instance; immutable after load.
pub type GalleryConfig = HashMap<String, Category>;

/// Parse a gallery config JSON document.
pub fn parse_config(text: &str) -> Result<GalleryConfig> {
  serde_json::from_str(text).context("Failed to parse gallery config JSON")
}

/// Load the gallery config from `source` — an http(s) URL or a file path.
///
/// No retry, no timeout beyond reqwest's defaults: the config either loads
/// or the carousel stays inert with an error title.
pub async fn load_config(source: &str) -> Result<GalleryConfig> {
  if source.starts_with("http://") || source.starts_with("https://") {
    let response =
      reqwest::get(source).await.with_context(|| format!("Failed to fetch gallery config from {}", source))?;
    if !response.status().is_success() {
      return Err(anyhow!("Gallery config fetch returned HTTP {}", response.status()));
    }
    let text = response.text().await.context("Failed to read gallery config response body")?;
    parse_config(&text)
  } else {
    let text = tokio::fs::read_to_string(source)
      .await
      .with_context(|| format!("Failed to read gallery config file {}", source))?;
    parse_config(&text)
  }
}

/// Build a clip's source URL: the category base path with the filename
/// percent-encoded (filenames routinely contain spaces and parentheses).
pub fn clip_url(base_path: &str, filename: &str) -> String {
  format!("{}{}", base_path, urlencoding::encode(filename))
}

#[cfg(test)]
mod tests {
  use super::*;

  const SAMPLE: &str = r#"{
    "climbing": {
      "basePath": "/media/climbing/",
      "videos": ["(1)warmup.mp4", "crux-1+topout-2.mp4"]
    },
    "empty": { "basePath": "/media/none/", "videos": [] }
  }"#;

  #[test]
  fn parse_sample_config() {
    let config = parse_config(SAMPLE).unwrap();
    let cat = config.get("climbing").unwrap();
    assert_eq!(cat.base_path, "/media/climbing/");
    assert_eq!(cat.videos.len(), 2);
    assert_eq!(cat.videos[1], "crux-1+topout-2.mp4");
    assert!(config.get("empty").unwrap().videos.is_empty());
  }

  #[test]
  fn parse_rejects_malformed_json() {
    assert!(parse_config("not json").is_err());
    assert!(parse_config(r#"{"cat": {"videos": "nope"}}"#).is_err());
  }

  #[test]
  fn parse_requires_camel_case_base_path() {
    // "base_path" is not the wire key; missing "basePath" is an error
    assert!(parse_config(r#"{"cat": {"base_path": "/m/", "videos": []}}"#).is_err());
  }

  #[test]
  fn clip_url_percent_encodes_filename() {
    assert_eq!(clip_url("/media/", "plain.mp4"), "/media/plain.mp4");
    assert_eq!(clip_url("/media/", "my clip (1).mp4"), "/media/my%20clip%20%281%29.mp4");
  }
}
