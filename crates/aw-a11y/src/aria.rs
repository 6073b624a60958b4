//! ARIA Support
//!
//! Roles and live-region politeness, with their exact attribute strings.

/// ARIA role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Dialog,
    Tab,
    TabList,
    TabPanel,
    Region,
    Group,
    Button,
    Status,
    Presentation,
}

impl Role {
    /// The `role` attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dialog => "dialog",
            Self::Tab => "tab",
            Self::TabList => "tablist",
            Self::TabPanel => "tabpanel",
            Self::Region => "region",
            Self::Group => "group",
            Self::Button => "button",
            Self::Status => "status",
            Self::Presentation => "presentation",
        }
    }

    /// Parse from an attribute value
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_lowercase().as_str() {
            "dialog" => Self::Dialog,
            "tab" => Self::Tab,
            "tablist" => Self::TabList,
            "tabpanel" => Self::TabPanel,
            "region" => Self::Region,
            "group" => Self::Group,
            "button" => Self::Button,
            "status" => Self::Status,
            "none" | "presentation" => Self::Presentation,
            _ => return None,
        })
    }
}

/// Live region politeness (`aria-live`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Live {
    #[default]
    Off,
    Polite,
    Assertive,
}

impl Live {
    /// The `aria-live` attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }
}
