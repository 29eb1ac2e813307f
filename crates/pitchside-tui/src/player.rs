//! External player bound to the modal's current content.
//!
//! The child is spawned with `kill_on_drop`, so dropping the `Player` (the
//! viewer closed or its link was replaced) terminates it.

use std::process::Stdio;

use pitchside_proto::config::PlayerConfig;
use pitchside_proto::platform;
use thiserror::Error;
use tokio::process::{Child, Command};
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("player `{0}` not found")]
    NotFound(String),
    #[error("failed to start player: {0}")]
    Spawn(#[from] std::io::Error),
}

#[derive(Debug)]
pub struct Player {
    child: Child,
    link: String,
}

impl Player {
    pub fn launch(config: &PlayerConfig, link: &str) -> Result<Self, PlayerError> {
        let binary = platform::find_player_binary(&config.command)
            .ok_or_else(|| PlayerError::NotFound(config.command.clone()))?;
        let child = Command::new(&binary)
            .args(&config.args)
            .arg(link)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;
        info!("player: spawned {:?} pid {:?}", binary, child.id());
        Ok(Self {
            child,
            link: link.to_string(),
        })
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    /// True while the child has not exited.
    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        debug!("player: releasing {}", self.link);
    }
}
