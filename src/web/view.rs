//! View model for the web UI: which page is shown and what the user has
//! typed or picked so far.

use serde::{Deserialize, Serialize};

/// Pages reachable from the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    Recommendations,
    About,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::Recommendations, Page::About];

    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Recommendations => "/recommendations",
            Page::About => "/about",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Recommendations => "Recommendations",
            Page::About => "About",
        }
    }
}

/// User interactions that move the view between states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    Navigate(Page),
    /// Filter the title list by substring
    Search(String),
    /// Change the number of recommendations, clamped to `1..=max`
    SetCount { count: usize, max: usize },
    /// Ask for recommendations for a title
    Select(String),
    /// A title drawn by the "surprise me" shortcut
    Random(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub page: Page,
    pub query: String,
    pub count: usize,
    pub selected: Option<String>,
    /// Set when the selection came from the random shortcut
    pub surprise: bool,
}

impl ViewState {
    pub fn new(default_count: usize) -> Self {
        Self {
            page: Page::Home,
            query: String::new(),
            count: default_count.max(1),
            selected: None,
            surprise: false,
        }
    }

    /// Applies one transition.
    ///
    /// Navigating to Home or About clears the selection; everything other than
    /// `Navigate` and `SetCount` lands on the Recommendations page.
    pub fn apply(mut self, action: ViewAction) -> Self {
        match action {
            ViewAction::Navigate(page) => {
                if page != Page::Recommendations {
                    self.selected = None;
                    self.surprise = false;
                }
                self.page = page;
            }
            ViewAction::Search(query) => {
                self.page = Page::Recommendations;
                self.query = query.trim().to_string();
            }
            ViewAction::SetCount { count, max } => {
                self.count = count.clamp(1, max.max(1));
            }
            ViewAction::Select(title) => {
                self.page = Page::Recommendations;
                let title = title.trim().to_string();
                self.selected = (!title.is_empty()).then_some(title);
                self.surprise = false;
            }
            ViewAction::Random(title) => {
                self.page = Page::Recommendations;
                self.selected = Some(title);
                self.surprise = true;
            }
        }
        self
    }

    pub fn apply_all<I>(self, actions: I) -> Self
    where
        I: IntoIterator<Item = ViewAction>,
    {
        actions.into_iter().fold(self, ViewState::apply)
    }
}
