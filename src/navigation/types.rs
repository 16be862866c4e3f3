use crate::view::ViewState;

/// Stage a navigation is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Entering,
    Normalizing,
    Resolving,
    Listing,
    Settled,
    ErrorRecovery,
}

impl Phase {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Entering => "entering",
            Phase::Normalizing => "normalizing",
            Phase::Resolving => "resolving",
            Phase::Listing => "listing",
            Phase::Settled => "settled",
            Phase::ErrorRecovery => "error_recovery",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where to send the user instead of rendering the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    /// Generic secrets landing view; mount missing or not listable here
    SecretsLanding,
    /// Same route with the corrected prefix
    ///
    /// `path` is relative to the mount: `foo/` for `secret/foo`.
    Replace { path: String },
}

/// Non-error result of a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationResult {
    Redirect(Redirect),
    Settled(ViewState),
    /// Navigation abandoned; the previous view stays, flagged with `has404`
    Aborted(ViewState),
    /// A newer navigation started before this one finished
    Superseded,
}

impl NavigationResult {
    /// Metric/log label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            NavigationResult::Redirect(_) => "redirect",
            NavigationResult::Settled(_) => "settled",
            NavigationResult::Aborted(_) => "aborted",
            NavigationResult::Superseded => "superseded",
        }
    }

    /// Rendered view, if the navigation produced one
    #[must_use]
    pub fn view(&self) -> Option<&ViewState> {
        match self {
            NavigationResult::Settled(view) | NavigationResult::Aborted(view) => Some(view),
            NavigationResult::Redirect(_) | NavigationResult::Superseded => None,
        }
    }
}
