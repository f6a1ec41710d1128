//! View routing: which panel of the single-page dashboard is visible.
//!
//! The location fragment (`#/<panel>[/…]`) is the only input: its first
//! path segment selects the panel, and a missing, empty, or unknown segment
//! selects the home panel. Exactly one panel is visible at any time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A mutually-exclusive section of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Panel {
    /// Server summary: API version and loaded adapters.
    #[default]
    #[serde(rename = "home-view")]
    Home,
    /// Detector configuration and acquisition status.
    #[serde(rename = "detector-view")]
    Detector,
    /// Frame receiver table.
    #[serde(rename = "fr-view")]
    Receivers,
    /// Frame processor table and file writing controls.
    #[serde(rename = "fp-view")]
    Processors,
}

impl Panel {
    pub const ALL: [Self; 4] = [Self::Home, Self::Detector, Self::Receivers, Self::Processors];

    /// Fragment segment / element class of this panel.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Home => "home-view",
            Self::Detector => "detector-view",
            Self::Receivers => "fr-view",
            Self::Processors => "fp-view",
        }
    }

    /// Navigation label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Detector => "Detector",
            Self::Receivers => "Frame Receivers",
            Self::Processors => "Frame Processors",
        }
    }

    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|panel| panel.name() == segment)
    }

    /// Entering this panel re-fetches the server summary.
    #[must_use]
    pub fn refreshes_summary(self) -> bool {
        self == Self::Home
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of resolving a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Decoded first path segment, when present and non-empty.
    pub segment: Option<String>,
    pub panel: Panel,
}

/// Resolve a location fragment such as `#/fr-view` into a panel.
#[must_use]
pub fn resolve(fragment: &str) -> Route {
    let decoded = percent_decode(fragment);
    let path = decoded.strip_prefix('#').unwrap_or(&decoded);
    let path = path.strip_prefix('/').unwrap_or(path);
    let segment = path
        .split('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string);
    let panel = segment
        .as_deref()
        .and_then(Panel::from_segment)
        .unwrap_or_default();
    Route { segment, panel }
}

/// Decode `%XX` escapes; malformed escapes are kept verbatim.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && let (Some(hi), Some(lo)) = (
                bytes.get(i + 1).copied().and_then(hex_value),
                bytes.get(i + 2).copied().and_then(hex_value),
            )
        {
            out.push((hi << 4) | lo);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// A completed navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Panel,
    pub to: Panel,
}

impl Transition {
    /// Whether the summary fetches must be re-issued after this navigation.
    #[must_use]
    pub fn refreshes_summary(self) -> bool {
        self.to.refreshes_summary()
    }
}

/// Visible panel and page title, driven only by navigation events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    base_title: String,
    panel: Panel,
    title: String,
}

impl ViewState {
    /// Initial state: home panel, bare title.
    #[must_use]
    pub fn new(base_title: impl Into<String>) -> Self {
        let base_title = base_title.into();
        Self {
            title: base_title.clone(),
            base_title,
            panel: Panel::default(),
        }
    }

    /// Apply a fragment change (including the initial load).
    pub fn navigate(&mut self, fragment: &str) -> Transition {
        let route = resolve(fragment);
        let from = self.panel;
        self.panel = route.panel;
        self.title = match route.segment {
            Some(segment) if Panel::from_segment(&segment).is_some() => {
                format!("{} ({segment})", self.base_title)
            }
            _ => self.base_title.clone(),
        };
        Transition {
            from,
            to: route.panel,
        }
    }

    #[must_use]
    pub fn visible(&self) -> Panel {
        self.panel
    }

    #[must_use]
    pub fn is_visible(&self, panel: Panel) -> bool {
        self.panel == panel
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}
