use crate::utils::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Theme {
    Auto,
    Light,
    Dark,
}

impl Theme {
    pub const ATTR_NAME: &'static str = "data-theme";

    pub(crate) const fn scheme(self) -> Option<&'static str> {
        use Theme::*;
        match self {
            Auto => None,
            Light => Some("light"),
            Dark => Some("dark"),
        }
    }

    pub(crate) const fn next(self) -> Self {
        use Theme::*;
        match self {
            Auto => Light,
            Light => Dark,
            Dark => Auto,
        }
    }

    pub(crate) const fn label(self) -> &'static str {
        use Theme::*;
        match self {
            Auto => "◐",
            Light => "☀",
            Dark => "☾",
        }
    }

    fn update_html(self) {
        let root: Option<web_sys::Element> = gloo::utils::document().document_element();
        let Some(html) = root else {
            log::error!("document has no root element");
            return;
        };
        if let Some(scheme) = self.scheme() {
            log::debug!("theme-scheme: {}", scheme);
            if let Err(err) = html.set_attribute(Self::ATTR_NAME, scheme) {
                log::error!("failed to set theme: {:?}", err);
            }
        } else {
            log::debug!("no theme preference");
            if let Err(err) = html.remove_attribute(Self::ATTR_NAME) {
                log::error!("failed to set theme: {:?}", err);
            }
        }
    }

    pub(crate) fn init() -> Self {
        let theme: Self = LocalOrDefault::local_or_default();
        theme.update_html();
        theme
    }

    pub(crate) fn apply(self) {
        self.local_save();
        self.update_html();
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::Auto
    }
}

impl StorageKey for Theme {
    const KEY: &'static str = "memorush:theme";
}
