//! Page routing as a plain value.
//!
//! The site has three pages. The current page is a [`Page`] value and every
//! change goes through the pure [`route`] function, so routing can be tested
//! without rendering anything.
//!
//! [`Site`] couples the router with a [`LightboxController`]: the lightbox
//! belongs to the page it was opened from, and leaving that page closes it.

use crate::controller::LightboxController;
use crate::effects::Host;
use crate::session::{LightboxError, OpenRequest};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    About,
    Portfolio,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::About, Page::Portfolio];

    pub fn slug(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::About => "about",
            Page::Portfolio => "portfolio",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|p| p.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown page: {s}"))
    }
}

/// Something that can change the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteEvent {
    /// A nav link to a specific page.
    Navigate(Page),
    /// The site logo, which always leads home.
    Logo,
    /// A call-to-action on the home page ("View portfolio").
    ViewPortfolio,
}

/// Compute the page after `event`.
pub fn route(_current: Page, event: RouteEvent) -> Page {
    match event {
        RouteEvent::Navigate(page) => page,
        RouteEvent::Logo => Page::Home,
        RouteEvent::ViewPortfolio => Page::Portfolio,
    }
}

#[derive(Debug)]
pub struct Site<H: Host> {
    page: Page,
    lightbox: LightboxController<H>,
    lightbox_page: Option<Page>,
}

impl<H: Host> Site<H> {
    pub fn new(lightbox: LightboxController<H>) -> Self {
        Self {
            page: Page::default(),
            lightbox,
            lightbox_page: None,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn lightbox(&self) -> &LightboxController<H> {
        &self.lightbox
    }

    pub fn lightbox_mut(&mut self) -> &mut LightboxController<H> {
        &mut self.lightbox
    }

    /// Route to the next page, closing the lightbox if it was opened on a page
    /// we are leaving.
    pub fn dispatch(&mut self, event: RouteEvent) -> Page {
        let next = route(self.page, event);
        if next != self.page {
            debug!(from = %self.page, to = %next, "page changed");
            if self.lightbox_page.is_some_and(|p| p != next) {
                self.lightbox.close();
                self.lightbox_page = None;
            }
        }
        self.page = next;
        next
    }

    /// Open the lightbox on the current page.
    pub fn open_lightbox(
        &mut self,
        request: OpenRequest,
        return_focus: Option<String>,
    ) -> Result<(), LightboxError> {
        self.lightbox.open(request, return_focus)?;
        self.lightbox_page = Some(self.page);
        Ok(())
    }
}
