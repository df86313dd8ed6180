//! Optional external UCI engine for move suggestions.
//!
//! The engine binary is a scoped resource: spawned for a single call,
//! driven over stdin/stdout, and killed on every exit path. A missing or
//! misbehaving engine degrades to "no suggestion" rather than an error,
//! since the capability is optional.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};
use tracing::{debug, instrument, warn};

use super::{ChessError, parse_position};

/// Configuration for the external engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Path to the engine binary, if one is configured.
    pub path: Option<PathBuf>,
    /// Search depth in plies requested from the engine.
    pub depth: u32,
    /// Wall-clock budget for the whole engine dialogue.
    pub budget: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path: None,
            depth: 12,
            budget: Duration::from_secs(10),
        }
    }
}

/// Asks an external UCI engine for a move from the position `fen`.
///
/// `engine_path` overrides `config.path` when given. Returns `Ok(None)`
/// when no engine is configured, the binary does not exist, or the engine
/// fails to start or respond within `config.budget`.
///
/// # Errors
///
/// Returns [`ChessError::InvalidPosition`] when `fen` cannot be decoded;
/// engine failures are soft and never surface as errors.
#[instrument(skip(fen, config))]
pub async fn suggest_move(
    fen: &str,
    engine_path: Option<&Path>,
    config: &EngineConfig,
) -> Result<Option<String>, ChessError> {
    // Validate the position before paying for a subprocess.
    parse_position(fen)?;

    let path = match engine_path.or(config.path.as_deref()) {
        Some(p) => p,
        None => {
            debug!("no engine configured");
            return Ok(None);
        }
    };
    if !path.exists() {
        warn!(path = %path.display(), "engine binary not found");
        return Ok(None);
    }

    // kill_on_drop backstops the explicit kill below if this future is
    // dropped mid-dialogue.
    let mut child = match Command::new(path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to spawn engine");
            return Ok(None);
        }
    };

    let outcome = tokio::time::timeout(config.budget, dialogue(&mut child, fen, config.depth)).await;

    // The subprocess never outlives the call, whatever happened above.
    if let Err(e) = child.kill().await {
        warn!(error = %e, "failed to kill engine process");
    }

    match outcome {
        Ok(Ok(best)) => Ok(best),
        Ok(Err(e)) => {
            warn!(error = %e, "engine dialogue failed");
            Ok(None)
        }
        Err(_) => {
            warn!(budget = ?config.budget, "engine timed out");
            Ok(None)
        }
    }
}

/// Runs the UCI handshake and search request, returning the engine's
/// `bestmove` token.
async fn dialogue(
    child: &mut Child,
    fen: &str,
    depth: u32,
) -> Result<Option<String>, std::io::Error> {
    let stdin = child
        .stdin
        .as_mut()
        .ok_or_else(|| std::io::Error::other("engine stdin unavailable"))?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| std::io::Error::other("engine stdout unavailable"))?;
    let mut lines = BufReader::new(stdout).lines();

    stdin.write_all(b"uci\n").await?;
    stdin.flush().await?;
    wait_for(&mut lines, "uciok").await?;

    stdin.write_all(b"isready\n").await?;
    stdin.flush().await?;
    wait_for(&mut lines, "readyok").await?;

    stdin
        .write_all(format!("position fen {fen}\ngo depth {depth}\n").as_bytes())
        .await?;
    stdin.flush().await?;

    while let Some(line) = lines.next_line().await? {
        if let Some(rest) = line.strip_prefix("bestmove") {
            let token = rest.split_whitespace().next();
            return Ok(match token {
                None | Some("(none)") => None,
                Some(mv) => Some(mv.to_string()),
            });
        }
    }

    // Engine closed stdout without answering.
    Ok(None)
}

async fn wait_for(
    lines: &mut Lines<BufReader<ChildStdout>>,
    expected: &str,
) -> Result<(), std::io::Error> {
    while let Some(line) = lines.next_line().await? {
        if line.trim() == expected {
            return Ok(());
        }
    }
    Err(std::io::Error::other(format!(
        "engine closed stream before '{expected}'"
    )))
}
