use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;
use std::time::Duration;

use log::{info, warn};

use crate::builders::{self, LaunchContext};
use crate::error::LaunchError;
use crate::instruction::PlaybackInstruction;

/// Starts external processes. The dispatcher only ever fires and forgets;
/// implementations must not wait on the child.
pub trait ProcessLauncher {
    fn launch(&mut self, exe: &Path, args: &[String]) -> io::Result<()>;
}

/// Real spawner: start the player and drop the child handle. Nothing tracks
/// the process afterwards.
pub struct OsLauncher;

impl ProcessLauncher for OsLauncher {
    fn launch(&mut self, exe: &Path, args: &[String]) -> io::Result<()> {
        Command::new(exe).args(args).spawn().map(drop)
    }
}

/// What a dispatch run did, for logging and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub launched: usize,
    pub skipped: usize,
}

/// Sequential, best-effort instruction dispatch. Configuration is borrowed
/// read-only for the lifetime of the run; the launcher is the only seam with
/// side effects.
pub struct Dispatcher<'a, L> {
    /// Target identifier → player executable path.
    players: &'a HashMap<String, PathBuf>,
    /// URL-path substring → user agent. Tried in key order, first match wins.
    user_agents: &'a BTreeMap<String, String>,
    /// Fixed pause between consecutive launches.
    delay: Duration,
    launcher: L,
}

impl<'a, L: ProcessLauncher> Dispatcher<'a, L> {
    pub fn new(
        players: &'a HashMap<String, PathBuf>,
        user_agents: &'a BTreeMap<String, String>,
        delay: Duration,
        launcher: L,
    ) -> Self {
        Self {
            players,
            user_agents,
            delay,
            launcher,
        }
    }

    /// Run every instruction in list order. Failures are isolated per
    /// instruction: a bad entry is logged and skipped, the rest of the batch
    /// still launches. Consecutive launches are paced by the configured
    /// delay so several heavyweight GUI processes do not start in the same
    /// instant.
    pub fn run(&mut self, instructions: &[PlaybackInstruction]) -> DispatchSummary {
        let mut summary = DispatchSummary::default();
        for (index, instruction) in instructions.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
            match self.dispatch_one(instruction) {
                Ok(()) => summary.launched += 1,
                Err(err) => {
                    warn!(
                        "skipping instruction {index} (target {:?}): {err}",
                        instruction.target
                    );
                    summary.skipped += 1;
                }
            }
        }
        summary
    }

    fn dispatch_one(&mut self, instruction: &PlaybackInstruction) -> Result<(), LaunchError> {
        let exe = self
            .players
            .get(&instruction.target)
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or_else(|| LaunchError::MissingExecutablePath(instruction.target.clone()))?;

        // Should not happen while the configured player set matches the
        // registry, but a config typo must not take the batch down.
        let builder = builders::builder_for(&instruction.target)
            .ok_or_else(|| LaunchError::UnknownTarget(instruction.target.clone()))?;

        let context = LaunchContext {
            exe,
            user_agent: self.user_agent_for(&instruction.url),
        };
        let args = builder(&context, instruction);

        info!(
            "launching {} ({}){}{}",
            instruction.target,
            exe.display(),
            instruction
                .title
                .as_deref()
                .map(|title| format!(", title {title:?}"))
                .unwrap_or_default(),
            instruction
                .geometry
                .as_deref()
                .map(|geometry| format!(", geometry {geometry}"))
                .unwrap_or_default(),
        );
        self.launcher.launch(exe, &args)?;
        info!("process started: {} {}", exe.display(), args.join(" "));
        Ok(())
    }

    /// First configured pattern contained in the URL's path component wins.
    fn user_agent_for(&self, url: &str) -> Option<&str> {
        let path = url_path(url);
        self.user_agents
            .iter()
            .find(|(pattern, _)| !pattern.is_empty() && path.contains(pattern.as_str()))
            .map(|(_, user_agent)| user_agent.as_str())
    }
}

/// Path component of a URL, without scheme and authority. Falls back to the
/// whole string when the input does not look like a URL.
fn url_path(url: &str) -> &str {
    let Some((_, rest)) = url.split_once("://") else {
        return url;
    };
    match rest.find('/') {
        Some(at) => &rest[at..],
        None => "",
    }
}
