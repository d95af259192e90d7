//! Marketplace modal controller: page-level load, listing inputs, install prompt.

use crate::core::bridge::{AppsBridge, MarketplaceBridge};
use crate::core::notify::Notifier;
use crate::features::marketplace::install::{InstallCoordinator, InstallError, Installed};
use crate::features::marketplace::listing::{
    ALL_CATEGORIES, ListedTracker, Listing, ListingMemo, ListingQuery, SortMode,
    extract_categories,
};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};

/// Page-level load progress.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Request pending.
    Loading,
    /// Listing available.
    Ready,
    /// Load failed; the view offers "Try again".
    Failed(String),
}

/// Marketplace UI state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarketplaceState {
    /// Enriched listing in backend order.
    pub trackers: Rc<Vec<ListedTracker>>,
    /// Bumped whenever `trackers` is replaced.
    pub generation: u64,
    /// Category filter options.
    pub categories: Vec<String>,
    /// Listing inputs.
    pub query: ListingQuery,
    /// Load progress.
    pub load: LoadState,
    /// Tracker whose install prompt is open.
    pub selected: Option<String>,
    /// Modal visibility.
    pub visible: bool,
}

/// Controller behind the marketplace modal.
pub struct Marketplace<B, N> {
    bridge: Rc<B>,
    notifier: Rc<N>,
    installer: InstallCoordinator<B, N>,
    state: RefCell<MarketplaceState>,
    memo: RefCell<ListingMemo>,
}

impl<B, N> Marketplace<B, N>
where
    B: MarketplaceBridge + AppsBridge,
    N: Notifier,
{
    /// Create an empty, hidden marketplace.
    pub fn new(bridge: Rc<B>, notifier: Rc<N>) -> Self {
        Self {
            installer: InstallCoordinator::new(Rc::clone(&bridge), Rc::clone(&notifier)),
            bridge,
            notifier,
            state: RefCell::new(MarketplaceState::default()),
            memo: RefCell::new(ListingMemo::default()),
        }
    }

    /// Copy of the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> MarketplaceState {
        self.state.borrow().clone()
    }

    /// Fetch the listing and the installed set.
    ///
    /// A listing failure is page-level: it sets [`LoadState::Failed`] and
    /// notifies. Failing to read installed apps only logs; the listing still
    /// renders, without installed badges.
    pub async fn load(&self) {
        self.state.borrow_mut().load = LoadState::Loading;
        match self.bridge.tracker_list().await {
            Ok(trackers) => {
                let listed: Vec<ListedTracker> =
                    trackers.into_iter().map(ListedTracker::from).collect();
                let categories = extract_categories(&listed);
                debug!(count = listed.len(), "marketplace listing loaded");
                let mut state = self.state.borrow_mut();
                if !categories.contains(&state.query.category) {
                    state.query.category = ALL_CATEGORIES.to_string();
                }
                state.trackers = Rc::new(listed);
                state.generation += 1;
                state.categories = categories;
                state.load = LoadState::Ready;
            }
            Err(err) => {
                warn!(error = %err, "marketplace listing failed");
                let message = err.to_string();
                self.notifier.error("Could not load marketplace", &message);
                self.state.borrow_mut().load = LoadState::Failed(message);
            }
        }
        match self.bridge.app_trackers().await {
            Ok(apps) => self.installer.sync_installed(&apps),
            Err(err) => warn!(error = %err, "installed trackers unavailable"),
        }
    }

    /// Current carousel and grid, recomputed only when an input changed.
    #[must_use]
    pub fn listing(&self) -> Rc<Listing> {
        let state = self.state.borrow();
        self.memo
            .borrow_mut()
            .get(state.generation, &state.trackers, &state.query)
    }

    /// Update the search text.
    pub fn set_search(&self, search: &str) {
        self.state.borrow_mut().query.search = search.to_string();
    }

    /// Update the category filter.
    pub fn set_category(&self, category: &str) {
        self.state.borrow_mut().query.category = category.to_string();
    }

    /// Update the sort mode.
    pub fn set_sort(&self, sort: SortMode) {
        self.state.borrow_mut().query.sort = sort;
    }

    /// Show the modal.
    pub fn open(&self) {
        self.state.borrow_mut().visible = true;
    }

    /// Hide the modal and any install prompt.
    pub fn close(&self) {
        let mut state = self.state.borrow_mut();
        state.visible = false;
        state.selected = None;
    }

    /// Open the install prompt for `id`.
    pub fn select(&self, id: &str) {
        self.state.borrow_mut().selected = Some(id.to_string());
    }

    /// Close the install prompt.
    pub fn dismiss_prompt(&self) {
        self.state.borrow_mut().selected = None;
    }

    /// Whether `id` is installed.
    #[must_use]
    pub fn is_installed(&self, id: &str) -> bool {
        self.installer.is_installed(id)
    }

    /// Whether an install is pending.
    #[must_use]
    pub fn is_installing(&self) -> bool {
        self.installer.is_busy()
    }

    /// Install the listed tracker `id`; closes the prompt on success.
    ///
    /// # Errors
    ///
    /// See [`InstallCoordinator::install`]; unknown ids yield
    /// [`InstallError::UnknownTracker`].
    pub async fn install(&self, id: &str) -> Result<Installed, InstallError> {
        let tracker = self
            .state
            .borrow()
            .trackers
            .iter()
            .find(|entry| entry.tracker.id == id)
            .map(|entry| entry.tracker.clone());
        let Some(tracker) = tracker else {
            return Err(InstallError::UnknownTracker(id.to_string()));
        };
        let installed = self.installer.install(&tracker).await?;
        self.dismiss_prompt();
        Ok(installed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bridge::BridgeError;
    use crate::test_support::{FakeBridge, RecordingNotifier, app, tracker};

    fn marketplace(bridge: &Rc<FakeBridge>) -> Marketplace<FakeBridge, RecordingNotifier> {
        Marketplace::new(Rc::clone(bridge), Rc::new(RecordingNotifier::default()))
    }

    #[tokio::test]
    async fn load_populates_listing_categories_and_installed_set() {
        let bridge = Rc::new(FakeBridge::default());
        let mut focus = tracker("focus", "Focus Timer");
        focus.description = "Pomodoro (Productivity)".into();
        bridge.set_trackers(vec![focus, tracker("mail", "Mail Watch")]);
        bridge.set_apps(vec![app("x1", "Focus Timer", true, Some("/apps/focus"))]);
        let market = marketplace(&bridge);

        market.load().await;

        let state = market.snapshot();
        assert_eq!(state.load, LoadState::Ready);
        assert_eq!(state.categories, vec!["All", "Productivity"]);
        assert_eq!(market.listing().len(), 2);
        assert!(market.is_installed("focus"));
        assert!(!market.is_installed("mail"));
    }

    #[tokio::test]
    async fn failed_load_is_page_level_and_retry_recovers() {
        let bridge = Rc::new(FakeBridge::default());
        bridge.fail_tracker_list(BridgeError::Transport("offline".into()));
        let market = marketplace(&bridge);

        market.load().await;
        assert!(matches!(market.snapshot().load, LoadState::Failed(_)));

        bridge.set_trackers(vec![tracker("focus", "Focus Timer")]);
        market.load().await;
        assert_eq!(market.snapshot().load, LoadState::Ready);
        assert_eq!(market.listing().len(), 1);
    }

    #[tokio::test]
    async fn listing_reacts_to_each_input() {
        let bridge = Rc::new(FakeBridge::default());
        let mut featured = tracker("beats", "Beats");
        featured.featured = true;
        bridge.set_trackers(vec![featured, tracker("focus", "Focus Timer")]);
        let market = marketplace(&bridge);
        market.load().await;

        assert_eq!(market.listing().featured.len(), 1);
        market.set_sort(SortMode::Newest);
        assert!(market.listing().featured.is_empty());
        market.set_search("focus");
        assert_eq!(market.listing().len(), 1);
        market.set_category("Nope");
        assert!(market.listing().is_empty());
    }

    #[tokio::test]
    async fn successful_install_closes_prompt() {
        let bridge = Rc::new(FakeBridge::default());
        bridge.set_trackers(vec![tracker("focus", "Focus Timer")]);
        let market = marketplace(&bridge);
        market.load().await;
        market.select("focus");

        let installed = market.install("focus").await.unwrap();

        assert_eq!(installed.tracker.name, "Focus Timer");
        assert_eq!(market.snapshot().selected, None);
        assert!(market.is_installed("focus"));
    }

    #[tokio::test]
    async fn failed_install_keeps_prompt_open() {
        let bridge = Rc::new(FakeBridge::default());
        bridge.set_trackers(vec![tracker("focus", "Focus Timer")]);
        bridge.fail_next_install(BridgeError::Rejected("boom".into()));
        let market = marketplace(&bridge);
        market.load().await;
        market.select("focus");

        assert!(market.install("focus").await.is_err());
        assert_eq!(market.snapshot().selected.as_deref(), Some("focus"));
        assert_eq!(
            market.install("ghost").await,
            Err(InstallError::UnknownTracker("ghost".into()))
        );
    }
}
