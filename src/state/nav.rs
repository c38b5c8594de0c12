#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

/// Visibility of the collapsible navigation list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavState {
    #[default]
    Collapsed,
    Expanded,
}

impl NavState {
    /// State after one trigger activation.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }

    #[must_use]
    pub fn is_expanded(self) -> bool {
        self == Self::Expanded
    }

    /// Value for the trigger's `aria-expanded` attribute.
    #[must_use]
    pub fn aria_expanded(self) -> &'static str {
        if self.is_expanded() { "true" } else { "false" }
    }
}
