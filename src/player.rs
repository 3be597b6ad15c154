use anyhow::{Context, Result, anyhow};
use std::process::Stdio;
use tokio::process::{Child as TokioChild, Command};
use tracing::{debug, warn};

/// Drives one mpv process per clip. `load` points the player at a source
/// (stopping whatever is playing), `play` spawns mpv for it; a natural
/// process exit is the clip-ended signal.
pub struct ClipPlayer {
  current_process: Option<TokioChild>,
  source: Option<String>,
  ipc_socket_path: Option<String>,
  /// Inline playback: mpv gets a fixed windowed argument set instead of
  /// taking over the full screen. Set before the first play attempt.
  inline: bool,
  pub paused: bool,
}

impl ClipPlayer {
  pub fn new() -> Self {
    Self { current_process: None, source: None, ipc_socket_path: None, inline: false, paused: false }
  }

  pub fn is_playing(&self) -> bool {
    self.current_process.is_some()
  }

  /// Mark the player for inline (windowed, never fullscreen) playback.
  pub fn set_inline(&mut self) {
    self.inline = true;
  }

  /// Point the player at a new source, stopping any current playback.
  /// Playback does not start until `play`.
  pub async fn load(&mut self, url: String) -> Result<()> {
    self.stop().await.context("Failed to stop previous clip")?;
    debug!(url = %url, "clip loaded");
    self.source = Some(url);
    Ok(())
  }

  /// Spawn mpv for the loaded source. A no-op when nothing is loaded.
  pub async fn play(&mut self) -> Result<()> {
    let Some(url) = self.source.clone() else {
      return Ok(());
    };
    if self.current_process.is_some() {
      self.kill_current().await?;
    }
    self.paused = false;

    let socket_path = std::env::temp_dir().join(format!("reel-mpv-{}.sock", std::process::id()));
    let socket_path_str = socket_path.to_str().context("Temp dir path is not valid UTF-8")?.to_string();
    // Remove stale socket if it exists from a previous crash.
    let _ = std::fs::remove_file(&socket_path);

    let mut cmd = Command::new("mpv");
    if self.inline {
      cmd.args(["--fs=no", "--keep-open=no"]);
    }
    cmd.args(["--really-quiet", &format!("--input-ipc-server={}", socket_path_str), "--", &url]);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::null());
    cmd.stderr(Stdio::null());

    let child = cmd.spawn().map_err(|e| {
      if e.kind() == std::io::ErrorKind::NotFound {
        anyhow!("mpv not found. Install it with: brew install mpv (macOS) or apt install mpv (Linux)")
      } else {
        anyhow!(e).context("Failed to spawn mpv process")
      }
    })?;

    self.current_process = Some(child);
    self.ipc_socket_path = Some(socket_path_str);
    Ok(())
  }

  /// Poll for natural playback end. Returns true exactly once per clip,
  /// when the mpv process has exited on its own.
  pub fn poll_ended(&mut self) -> bool {
    let Some(child) = self.current_process.as_mut() else {
      return false;
    };
    match child.try_wait() {
      Ok(Some(status)) => {
        debug!(?status, "mpv exited, clip ended");
        self.current_process = None;
        self.paused = false;
        if let Some(path) = self.ipc_socket_path.take() {
          let _ = std::fs::remove_file(&path);
        }
        true
      }
      Ok(None) => false,
      Err(e) => {
        warn!(err = %e, "failed to poll mpv status");
        false
      }
    }
  }

  /// Toggle pause through mpv's JSON IPC socket.
  pub async fn toggle_pause(&mut self) -> Result<()> {
    let Some(ref socket_path) = self.ipc_socket_path else {
      return Ok(());
    };
    let stream = tokio::net::UnixStream::connect(socket_path).await.context("Failed to connect to mpv IPC socket")?;
    stream.writable().await.context("mpv IPC socket not writable")?;
    let cmd = b"{\"command\":[\"cycle\",\"pause\"]}\n";
    let written = stream.try_write(cmd).context("Failed to send pause command to mpv")?;
    if written < cmd.len() {
      return Err(anyhow!("Partial write to mpv IPC socket: wrote {} of {} bytes", written, cmd.len()));
    }
    self.paused = !self.paused;
    Ok(())
  }

  async fn kill_current(&mut self) -> Result<()> {
    if let Some(mut child) = self.current_process.take() {
      child.kill().await.context("Failed to kill mpv process")?;
      let _ = child.wait().await;
    }
    if let Some(path) = self.ipc_socket_path.take() {
      let _ = std::fs::remove_file(&path);
    }
    Ok(())
  }

  /// Stop playback and clear the loaded source.
  pub async fn stop(&mut self) -> Result<()> {
    self.kill_current().await?;
    self.source = None;
    self.paused = false;
    Ok(())
  }
}
