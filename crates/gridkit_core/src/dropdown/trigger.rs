//! Label model for the element that opens an option overlay.

/// Placeholder shown when a trigger has no value.
pub const DEFAULT_TRIGGER_PLACEHOLDER: &str = "Select...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownTrigger {
    pub value: String,
    pub placeholder: String,
    pub is_open: bool,
    pub disabled: bool,
}

impl Default for DropdownTrigger {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// Keys a focused trigger reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKey {
    Enter,
    Space,
    Other,
}

impl DropdownTrigger {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            placeholder: DEFAULT_TRIGGER_PLACEHOLDER.to_string(),
            is_open: false,
            disabled: false,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn open(mut self, is_open: bool) -> Self {
        self.is_open = is_open;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// The value when present, otherwise the placeholder.
    pub fn label(&self) -> &str {
        if self.value.is_empty() {
            &self.placeholder
        } else {
            &self.value
        }
    }

    pub fn shows_placeholder(&self) -> bool {
        self.value.is_empty()
    }

    /// Whether a click activates the trigger.
    pub fn accepts_click(&self) -> bool {
        !self.disabled
    }

    /// Enter and Space activate an enabled trigger.
    pub fn activates_on(&self, key: TriggerKey) -> bool {
        !self.disabled && matches!(key, TriggerKey::Enter | TriggerKey::Space)
    }
}
