//! Marketplace listing derivation: categories, tags, filtering and sorting.
//!
//! # Design
//! - Everything here is a pure function of (trackers, query, category, sort).
//! - [`ListingMemo`] keeps only the last input/output pair.
//! - Simulated popularity metrics are seeded from the tracker id so they stay
//!   stable across refreshes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::rc::Rc;
use trackdeck_bridge_models::Tracker;

/// Synthetic category that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";
/// Category of trackers whose description has no parenthesized segment.
pub const DEFAULT_CATEGORY: &str = "Miscellaneous";

const TAG_VOCABULARY: &[&str] = &[
    "activity",
    "analytics",
    "browser",
    "calendar",
    "chat",
    "code",
    "coding",
    "communication",
    "development",
    "documents",
    "email",
    "files",
    "finance",
    "fitness",
    "focus",
    "gaming",
    "health",
    "meetings",
    "music",
    "news",
    "notes",
    "productivity",
    "reading",
    "social",
    "tasks",
    "time",
    "tracking",
    "video",
    "writing",
];

/// Marketplace entry enriched with derived display fields.
#[derive(Clone, Debug, PartialEq)]
pub struct ListedTracker {
    /// Raw listing entry.
    pub tracker: Tracker,
    /// First parenthesized description segment, or [`DEFAULT_CATEGORY`].
    pub category: String,
    /// Vocabulary keywords found in the description.
    pub tags: Vec<&'static str>,
    /// Simulated download count.
    pub downloads: u32,
    /// Simulated rating in the range 3.5–5.0.
    pub rating: f32,
}

impl From<Tracker> for ListedTracker {
    fn from(tracker: Tracker) -> Self {
        let (downloads, rating) = simulated_metrics(&tracker.id);
        Self {
            category: primary_category(&tracker.description),
            tags: extract_tags(&tracker.description),
            downloads,
            rating,
            tracker,
        }
    }
}

/// Ordering applied to the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// Featured, then verified, then name.
    #[default]
    Featured,
    /// Most downloads first.
    MostPopular,
    /// Highest rating first.
    HighestRated,
    /// Highest version first.
    Newest,
}

impl SortMode {
    /// All modes in menu order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::Featured,
            Self::MostPopular,
            Self::HighestRated,
            Self::Newest,
        ]
    }

    /// Stable value used by `<select>` options.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::MostPopular => "popular",
            Self::HighestRated => "rating",
            Self::Newest => "newest",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::MostPopular => "Most Popular",
            Self::HighestRated => "Highest Rated",
            Self::Newest => "Newest",
        }
    }

    /// Parse a `<select>` value.
    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::all().into_iter().find(|mode| mode.as_str() == value)
    }
}

/// User-controlled listing inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingQuery {
    /// Free-text search.
    pub search: String,
    /// Selected category, [`ALL_CATEGORIES`] for none.
    pub category: String,
    /// Grid ordering.
    pub sort: SortMode,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
            sort: SortMode::default(),
        }
    }
}

/// Derived view: carousel plus grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Listing {
    /// Featured carousel; only populated while sorting by [`SortMode::Featured`].
    pub featured: Vec<ListedTracker>,
    /// General grid.
    pub grid: Vec<ListedTracker>,
}

impl Listing {
    /// Total entries across both sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.featured.len() + self.grid.len()
    }

    /// Whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.featured.is_empty() && self.grid.is_empty()
    }
}

/// Trimmed, non-empty `( ... )` segments of a description in order of appearance.
#[must_use]
pub fn parenthesized_segments(description: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut rest = description;
    while let Some(open) = rest.find('(') {
        let after = &rest[open + 1..];
        let Some(close) = after.find(')') else {
            break;
        };
        let inner = after[..close].trim();
        if !inner.is_empty() {
            segments.push(inner);
        }
        rest = &after[close + 1..];
    }
    segments
}

/// Category a tracker files under.
#[must_use]
pub fn primary_category(description: &str) -> String {
    parenthesized_segments(description)
        .first()
        .map_or_else(|| DEFAULT_CATEGORY.to_string(), |segment| (*segment).to_string())
}

/// Sorted distinct categories across all descriptions, with [`ALL_CATEGORIES`] first.
#[must_use]
pub fn extract_categories(trackers: &[ListedTracker]) -> Vec<String> {
    let distinct: BTreeSet<&str> = trackers
        .iter()
        .flat_map(|entry| parenthesized_segments(&entry.tracker.description))
        .collect();
    std::iter::once(ALL_CATEGORIES.to_string())
        .chain(distinct.into_iter().map(str::to_string))
        .collect()
}

/// Vocabulary keywords present in a description, in vocabulary order.
#[must_use]
pub fn extract_tags(description: &str) -> Vec<&'static str> {
    let lower = description.to_lowercase();
    let words: BTreeSet<&str> = lower
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();
    TAG_VOCABULARY
        .iter()
        .copied()
        .filter(|tag| words.contains(tag))
        .collect()
}

/// Whether an entry passes the search and category filters.
#[must_use]
pub fn matches(entry: &ListedTracker, query: &ListingQuery) -> bool {
    category_matches(entry, &query.category) && search_matches(entry, &query.search.to_lowercase())
}

fn category_matches(entry: &ListedTracker, category: &str) -> bool {
    category == ALL_CATEGORIES || entry.category == category
}

fn search_matches(entry: &ListedTracker, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    entry.tracker.name.to_lowercase().contains(needle)
        || entry.tracker.description.to_lowercase().contains(needle)
        || entry.tags.iter().any(|tag| tag.contains(needle))
}

/// Compare dotted versions numerically; missing or non-numeric segments count as zero.
#[must_use]
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let parse = |version: &str| -> Vec<u64> {
        version
            .split('.')
            .map(|segment| segment.trim().parse::<u64>().unwrap_or(0))
            .collect()
    };
    let (left, right) = (parse(left), parse(right));
    let width = left.len().max(right.len());
    (0..width)
        .map(|idx| {
            let a = left.get(idx).copied().unwrap_or(0);
            let b = right.get(idx).copied().unwrap_or(0);
            a.cmp(&b)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn compare_names(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

/// Stable in-place sort for the given mode.
pub fn sort_entries(entries: &mut [ListedTracker], sort: SortMode) {
    match sort {
        SortMode::Featured => entries.sort_by(|a, b| {
            b.tracker
                .featured
                .cmp(&a.tracker.featured)
                .then_with(|| b.tracker.verified.cmp(&a.tracker.verified))
                .then_with(|| compare_names(&a.tracker.name, &b.tracker.name))
        }),
        SortMode::MostPopular => entries.sort_by(|a, b| b.downloads.cmp(&a.downloads)),
        SortMode::HighestRated => entries.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortMode::Newest => {
            entries.sort_by(|a, b| compare_versions(&b.tracker.version, &a.tracker.version));
        }
    }
}

/// Filter, sort and split the listing.
#[must_use]
pub fn derive_listing(trackers: &[ListedTracker], query: &ListingQuery) -> Listing {
    let mut visible: Vec<ListedTracker> = trackers
        .iter()
        .filter(|entry| matches(entry, query))
        .cloned()
        .collect();
    sort_entries(&mut visible, query.sort);
    if query.sort != SortMode::Featured {
        return Listing {
            featured: Vec::new(),
            grid: visible,
        };
    }
    let (featured, grid) = visible
        .into_iter()
        .partition(|entry| entry.tracker.featured);
    Listing { featured, grid }
}

/// Last-input/last-output cache around [`derive_listing`].
#[derive(Debug, Default)]
pub struct ListingMemo {
    last: Option<(u64, ListingQuery, Rc<Listing>)>,
}

impl ListingMemo {
    /// Return the cached listing when `generation` and `query` match, else recompute.
    ///
    /// `generation` must change whenever `trackers` is replaced.
    pub fn get(&mut self, generation: u64, trackers: &[ListedTracker], query: &ListingQuery) -> Rc<Listing> {
        if let Some((last_generation, last_query, listing)) = &self.last
            && *last_generation == generation
            && last_query == query
        {
            return Rc::clone(listing);
        }
        let listing = Rc::new(derive_listing(trackers, query));
        self.last = Some((generation, query.clone(), Rc::clone(&listing)));
        listing
    }
}

/// Compact download counter: `999`, `1.5k`, `2.3M`.
#[must_use]
pub fn format_downloads(downloads: u32) -> String {
    let value = f64::from(downloads);
    if downloads >= 1_000_000 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if downloads >= 1_000 {
        format!("{:.1}k", value / 1_000.0)
    } else {
        downloads.to_string()
    }
}

/// Rating label with one decimal.
#[must_use]
pub fn format_rating(rating: f32) -> String {
    format!("{rating:.1}")
}

/// Deterministic simulated (downloads, rating) for a tracker id.
#[must_use]
pub fn simulated_metrics(id: &str) -> (u32, f32) {
    let mut rng = StdRng::seed_from_u64(stable_seed(id));
    let downloads = rng.random_range(100..=50_000);
    let tenths: u8 = rng.random_range(35..=50);
    (downloads, f32::from(tenths) / 10.0)
}

// FNV-1a; std's hasher is not guaranteed stable between releases.
fn stable_seed(id: &str) -> u64 {
    id.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(id: &str, name: &str, description: &str, version: &str) -> ListedTracker {
        ListedTracker::from(Tracker {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            version: version.into(),
            developer: "Acme".into(),
            icon_path: None,
            verified: false,
            featured: false,
        })
    }

    fn sample() -> Vec<ListedTracker> {
        vec![
            tracker("focus", "Focus Timer", "Pomodoro timer (Productivity)", "1.2.0"),
            tracker("mail", "Mail Watch", "Tracks email time (Communication) (Email)", "1.10.0"),
            tracker("beats", "Beats", "Music listening history", "1.2.3"),
            tracker("notes", "Notes Sync", "Keeps notes tidy ( Productivity )", "0.9"),
        ]
    }

    fn query(search: &str, category: &str, sort: SortMode) -> ListingQuery {
        ListingQuery {
            search: search.into(),
            category: category.into(),
            sort,
        }
    }

    #[test]
    fn categories_are_distinct_sorted_and_prefixed() {
        assert_eq!(
            extract_categories(&sample()),
            vec!["All", "Communication", "Email", "Productivity"]
        );
    }

    #[test]
    fn every_tracker_category_is_known() {
        let trackers = sample();
        let categories = extract_categories(&trackers);
        for entry in &trackers {
            assert!(
                categories.contains(&entry.category) || entry.category == DEFAULT_CATEGORY,
                "{} not in {categories:?}",
                entry.category
            );
        }
        assert_eq!(trackers[2].category, DEFAULT_CATEGORY);
    }

    #[test]
    fn segments_skip_blank_and_unclosed_parentheses() {
        assert_eq!(parenthesized_segments("a ( ) b (x) (y"), vec!["x"]);
        assert_eq!(primary_category("no parens"), DEFAULT_CATEGORY);
    }

    #[test]
    fn tags_come_from_vocabulary_only() {
        assert_eq!(
            extract_tags("Tracks EMAIL time, not spam-tracking"),
            vec!["email", "time", "tracking"]
        );
    }

    #[test]
    fn search_covers_name_description_and_tags() {
        let trackers = sample();
        let hits = |search: &str| derive_listing(&trackers, &query(search, ALL_CATEGORIES, SortMode::Newest)).len();
        assert_eq!(hits("focus"), 1);
        assert_eq!(hits("POMODORO"), 1);
        assert_eq!(hits("music"), 1);
        assert_eq!(hits(""), trackers.len());
    }

    #[test]
    fn category_filter_uses_first_segment() {
        let trackers = sample();
        let listing = derive_listing(&trackers, &query("", "Email", SortMode::Newest));
        assert!(listing.is_empty());
        let listing = derive_listing(&trackers, &query("", "Productivity", SortMode::Newest));
        assert_eq!(listing.len(), 2);
        let listing = derive_listing(&trackers, &query("", DEFAULT_CATEGORY, SortMode::Newest));
        assert_eq!(listing.grid[0].tracker.id, "beats");
    }

    #[test]
    fn narrowing_the_search_never_grows_results() {
        let trackers = sample();
        let mut previous = usize::MAX;
        for search in ["", "t", "ti", "tim", "time", "timer"] {
            let count = derive_listing(&trackers, &query(search, ALL_CATEGORIES, SortMode::Featured)).len();
            assert!(count <= previous, "{search} grew results");
            previous = count;
        }
    }

    #[test]
    fn newest_orders_versions_numerically() {
        let trackers = vec![
            tracker("a", "A", "", "1.2.0"),
            tracker("b", "B", "", "1.10.0"),
            tracker("c", "C", "", "1.2.3"),
        ];
        let listing = derive_listing(&trackers, &query("", ALL_CATEGORIES, SortMode::Newest));
        let versions: Vec<&str> = listing.grid.iter().map(|e| e.tracker.version.as_str()).collect();
        assert_eq!(versions, vec!["1.10.0", "1.2.3", "1.2.0"]);
    }

    #[test]
    fn version_compare_pads_missing_segments() {
        assert_eq!(compare_versions("1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.2.beta", "1.2.0"), Ordering::Equal);
        assert_eq!(compare_versions("2", "1.9.9"), Ordering::Greater);
    }

    #[test]
    fn newest_keeps_equal_versions_stable() {
        let trackers = vec![
            tracker("x", "X", "", "1.0"),
            tracker("y", "Y", "", "1.0.0"),
            tracker("z", "Z", "", "2.0"),
        ];
        let listing = derive_listing(&trackers, &query("", ALL_CATEGORIES, SortMode::Newest));
        let ids: Vec<&str> = listing.grid.iter().map(|e| e.tracker.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "x", "y"]);
    }

    #[test]
    fn featured_mode_splits_carousel_and_orders_grid() {
        let mut trackers = sample();
        trackers[2].tracker.featured = true;
        trackers[3].tracker.verified = true;
        let listing = derive_listing(&trackers, &query("", ALL_CATEGORIES, SortMode::Featured));
        assert_eq!(listing.featured.len(), 1);
        assert_eq!(listing.featured[0].tracker.id, "beats");
        let grid: Vec<&str> = listing.grid.iter().map(|e| e.tracker.id.as_str()).collect();
        assert_eq!(grid, vec!["notes", "focus", "mail"]);

        let listing = derive_listing(&trackers, &query("", ALL_CATEGORIES, SortMode::MostPopular));
        assert!(listing.featured.is_empty());
        assert_eq!(listing.grid.len(), trackers.len());
    }

    #[test]
    fn popularity_and_rating_sort_descending() {
        let trackers = sample();
        let listing = derive_listing(&trackers, &query("", ALL_CATEGORIES, SortMode::MostPopular));
        assert!(listing.grid.windows(2).all(|pair| pair[0].downloads >= pair[1].downloads));
        let listing = derive_listing(&trackers, &query("", ALL_CATEGORIES, SortMode::HighestRated));
        assert!(listing.grid.windows(2).all(|pair| pair[0].rating >= pair[1].rating));
    }

    #[test]
    fn simulated_metrics_are_stable_and_bounded() {
        assert_eq!(simulated_metrics("focus"), simulated_metrics("focus"));
        for id in ["a", "b", "focus", "mail"] {
            let (downloads, rating) = simulated_metrics(id);
            assert!((100..=50_000).contains(&downloads));
            assert!((3.5..=5.0).contains(&rating));
        }
    }

    #[test]
    fn memo_reuses_until_inputs_change() {
        let trackers = sample();
        let mut memo = ListingMemo::default();
        let q = ListingQuery::default();
        let first = memo.get(1, &trackers, &q);
        let again = memo.get(1, &trackers, &q);
        assert!(Rc::ptr_eq(&first, &again));
        let sorted = memo.get(1, &trackers, &query("", ALL_CATEGORIES, SortMode::Newest));
        assert!(!Rc::ptr_eq(&first, &sorted));
        let reloaded = memo.get(2, &trackers, &query("", ALL_CATEGORIES, SortMode::Newest));
        assert!(!Rc::ptr_eq(&sorted, &reloaded));
    }

    #[test]
    fn downloads_format_compactly() {
        assert_eq!(format_downloads(999), "999");
        assert_eq!(format_downloads(1_500), "1.5k");
        assert_eq!(format_downloads(2_300_000), "2.3M");
        assert_eq!(format_rating(4.0), "4.0");
    }

    #[test]
    fn sort_modes_round_trip_through_select_values() {
        for mode in SortMode::all() {
            assert_eq!(SortMode::from_value(mode.as_str()), Some(mode));
        }
        assert_eq!(SortMode::from_value("bogus"), None);
    }
}
