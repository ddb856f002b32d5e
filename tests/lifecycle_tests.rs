// Host-side tests for the pagehide/pageshow state machine.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod lifecycle {
        include!("../src/core/lifecycle.rs");
    }
}

use crate::core::lifecycle::*;

#[test]
fn back_forward_cache_round_trip_resumes() {
    let mut page = PageLifecycle::default();
    assert!(page.is_live());
    assert_eq!(page.hide(true), LifecycleAction::Suspend);
    assert_eq!(page.state(), PageState::Frozen);
    assert!(!page.is_live() && !page.is_closed());

    assert_eq!(page.show(), LifecycleAction::Resume);
    assert!(page.is_live());

    // and it can be cached again
    assert_eq!(page.hide(true), LifecycleAction::Suspend);
    assert_eq!(page.show(), LifecycleAction::Resume);
}

#[test]
fn real_unload_tears_down_once() {
    let mut page = PageLifecycle::default();
    assert_eq!(page.hide(false), LifecycleAction::Teardown);
    assert!(page.is_closed());
    assert_eq!(page.hide(false), LifecycleAction::Ignore);
    assert_eq!(page.hide(true), LifecycleAction::Ignore);
    assert_eq!(page.show(), LifecycleAction::Ignore);
    assert!(page.is_closed(), "a closed page never comes back");
}

#[test]
fn frozen_page_can_still_be_discarded() {
    let mut page = PageLifecycle::default();
    page.hide(true);
    assert_eq!(page.hide(true), LifecycleAction::Ignore);
    assert_eq!(page.hide(false), LifecycleAction::Teardown);
    assert!(page.is_closed());
}

#[test]
fn show_without_hide_is_ignored() {
    let mut page = PageLifecycle::default();
    assert_eq!(page.show(), LifecycleAction::Ignore);
    assert!(page.is_live());
}
