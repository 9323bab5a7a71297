//! Status icons for CLI output

/// Status icons for flags and pull policies
pub struct StatusIcon;

impl StatusIcon {
    /// Flag enabled
    pub const ENABLED: &'static str = "✓";

    /// Flag disabled
    pub const DISABLED: &'static str = "✗";

    /// Value not set
    pub const UNSET: &'static str = "-";

    pub fn for_flag(enabled: bool) -> &'static str {
        if enabled {
            Self::ENABLED
        } else {
            Self::DISABLED
        }
    }
}
