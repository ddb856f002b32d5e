/// What the page transition asks the demo to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleAction {
    Suspend,
    Resume,
    Teardown,
    Ignore,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PageState {
    #[default]
    Live,
    /// Held in the back/forward cache; may come back.
    Frozen,
    Closed,
}

/// Tracks `pagehide`/`pageshow` so a page restored from the back/forward
/// cache resumes instead of staying torn down.
#[derive(Clone, Copy, Debug, Default)]
pub struct PageLifecycle {
    state: PageState,
}

impl PageLifecycle {
    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn is_live(&self) -> bool {
        self.state == PageState::Live
    }

    pub fn is_closed(&self) -> bool {
        self.state == PageState::Closed
    }

    pub fn hide(&mut self, persisted: bool) -> LifecycleAction {
        match (self.state, persisted) {
            (PageState::Closed, _) => LifecycleAction::Ignore,
            (PageState::Live, true) => {
                self.state = PageState::Frozen;
                LifecycleAction::Suspend
            }
            (PageState::Frozen, true) => LifecycleAction::Ignore,
            (_, false) => {
                self.state = PageState::Closed;
                LifecycleAction::Teardown
            }
        }
    }

    pub fn show(&mut self) -> LifecycleAction {
        if self.state == PageState::Frozen {
            self.state = PageState::Live;
            LifecycleAction::Resume
        } else {
            LifecycleAction::Ignore
        }
    }
}
