use serde::Deserialize;

/// One decoded unit of work: play this URL with these options.
///
/// Every field defaults when absent, so any JSON object deserializes into an
/// instruction; whether it is actually dispatchable is decided at dispatch
/// time (an empty `target` never resolves to a player).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaybackInstruction {
    /// Selects the builder and the configured executable. `mode` is the wire
    /// name used by older producers.
    #[serde(alias = "mode")]
    pub target: String,
    /// Media location. An empty value is syntactically valid and produces a
    /// degenerate launch; no content validation happens here.
    pub url: String,
    /// Player configuration profile name.
    pub profile: Option<String>,
    /// Window placement, e.g. `50%x50%+0+0`.
    pub geometry: Option<String>,
    /// Forced display title.
    pub title: Option<String>,
    /// External subtitle location.
    pub subtitle_url: Option<String>,
}
