use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;

use crate::instruction::PlaybackInstruction;

/// Everything target-specific a builder may draw on besides the instruction
/// itself.
pub struct LaunchContext<'a> {
    /// Resolved executable path for the instruction's target.
    pub exe: &'a Path,
    /// User agent picked from configuration for the instruction URL, if any.
    pub user_agent: Option<&'a str>,
}

/// Turns (context, instruction) into the argument vector handed to the
/// player process. Builders own all target-specific flag syntax.
pub type ArgBuilder = fn(&LaunchContext<'_>, &PlaybackInstruction) -> Vec<String>;

// Fixed target → builder table, assembled once. Adding a player is one
// builder function plus one entry here; nothing else branches on target
// identity.
static BUILDERS: Lazy<HashMap<&'static str, ArgBuilder>> = Lazy::new(|| {
    HashMap::from([
        ("mpv", mpv_args as ArgBuilder),
        ("vlc", vlc_args as ArgBuilder),
    ])
});

/// Look up the builder for a target identifier.
pub fn builder_for(target: &str) -> Option<ArgBuilder> {
    BUILDERS.get(target).copied()
}

/// Registered target identifiers, for diagnostics.
pub fn known_targets() -> impl Iterator<Item = &'static str> {
    BUILDERS.keys().copied()
}

/// mpv: optional flags first, the bare URL last.
fn mpv_args(context: &LaunchContext<'_>, instruction: &PlaybackInstruction) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(profile) = &instruction.profile {
        args.push(format!("--profile={profile}"));
    }
    if let Some(geometry) = &instruction.geometry {
        args.push(format!("--geometry={geometry}"));
    }
    if let Some(title) = &instruction.title {
        args.push(format!("--force-media-title={title}"));
    }
    if let Some(subtitle_url) = &instruction.subtitle_url {
        args.push(format!("--sub-file={subtitle_url}"));
    }
    if let Some(user_agent) = context.user_agent {
        args.push(format!("--user-agent={user_agent}"));
    }
    args.push(instruction.url.clone());
    args
}

/// vlc takes the location as-is; no flag syntax worth modelling.
fn vlc_args(_context: &LaunchContext<'_>, instruction: &PlaybackInstruction) -> Vec<String> {
    vec![instruction.url.clone()]
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn context(exe: &Path) -> LaunchContext<'_> {
        LaunchContext {
            exe,
            user_agent: None,
        }
    }

    #[test]
    fn mpv_injects_optional_flags_before_the_url() {
        let exe = PathBuf::from("/usr/bin/mpv");
        let instruction = PlaybackInstruction {
            target: "mpv".into(),
            url: "http://x/a.mkv".into(),
            profile: Some("cinema".into()),
            geometry: Some("50%x50%+0+0".into()),
            title: Some("Episode 1".into()),
            subtitle_url: Some("http://x/a.srt".into()),
        };
        let builder = builder_for("mpv").unwrap();
        let args = builder(&context(&exe), &instruction);
        assert_eq!(
            args,
            [
                "--profile=cinema",
                "--geometry=50%x50%+0+0",
                "--force-media-title=Episode 1",
                "--sub-file=http://x/a.srt",
                "http://x/a.mkv",
            ]
        );
    }

    #[test]
    fn mpv_with_no_options_is_just_the_url() {
        let exe = PathBuf::from("/usr/bin/mpv");
        let instruction = PlaybackInstruction {
            target: "mpv".into(),
            url: "http://x/a.mkv".into(),
            ..Default::default()
        };
        let builder = builder_for("mpv").unwrap();
        assert_eq!(builder(&context(&exe), &instruction), ["http://x/a.mkv"]);
    }

    #[test]
    fn mpv_forwards_the_context_user_agent() {
        let exe = PathBuf::from("/usr/bin/mpv");
        let instruction = PlaybackInstruction {
            target: "mpv".into(),
            url: "http://x/a.mkv".into(),
            ..Default::default()
        };
        let context = LaunchContext {
            exe: &exe,
            user_agent: Some("Jelly/1.0"),
        };
        let builder = builder_for("mpv").unwrap();
        assert_eq!(
            builder(&context, &instruction),
            ["--user-agent=Jelly/1.0", "http://x/a.mkv"]
        );
    }

    #[test]
    fn vlc_ignores_the_optional_fields() {
        let exe = PathBuf::from("/usr/bin/vlc");
        let instruction = PlaybackInstruction {
            target: "vlc".into(),
            url: "http://x/a.mkv".into(),
            title: Some("ignored".into()),
            ..Default::default()
        };
        let builder = builder_for("vlc").unwrap();
        assert_eq!(builder(&context(&exe), &instruction), ["http://x/a.mkv"]);
    }

    #[test]
    fn unregistered_targets_have_no_builder() {
        assert!(builder_for("winamp").is_none());
        assert!(builder_for("").is_none());
    }
}
