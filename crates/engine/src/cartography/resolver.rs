//! Fuzzy location resolution: free text in, ranked zone names out.

use std::sync::Arc;

use tracing::debug;

use super::name_index::NameIndex;
use super::overlay::PortalOverlay;
use super::route::RoutePlanner;

/// Rank given to candidates with no path from home; sorts them last.
pub const UNREACHABLE_RANK: usize = usize::MAX;

pub struct LocationResolver {
    names: Arc<NameIndex>,
    planner: Arc<dyn RoutePlanner>,
}

impl LocationResolver {
    pub fn new(names: Arc<NameIndex>, planner: Arc<dyn RoutePlanner>) -> Self {
        Self { names, planner }
    }

    /// Candidate zone names for `query`, best first.
    ///
    /// A query that is the abbreviation of exactly one name resolves to that
    /// name alone. Otherwise substring matches come first, ordered by route
    /// length from `home` when one is given, followed by any abbreviation
    /// matches not already listed.
    ///
    /// The query is matched as typed apart from case: surrounding whitespace
    /// is kept, so a padded abbreviation does not hit the cache.
    pub fn best_guesses(&self, query: &str, home: Option<&str>) -> Vec<String> {
        let query = query.to_lowercase();
        if query.trim().is_empty() {
            return Vec::new();
        }

        let abbreviated = self.names.abbreviations.get(&query);
        if let [only] = abbreviated {
            return vec![only.clone()];
        }

        let mut guesses = self.names.substrings.get(&query);
        if let Some(home) = home {
            self.rank_by_distance(&mut guesses, home);
        }
        for name in abbreviated {
            if !guesses.contains(name) {
                guesses.push(name.clone());
            }
        }
        guesses
    }

    pub fn best_guess(&self, query: &str, home: Option<&str>) -> Option<String> {
        let guess = self.best_guesses(query, home).into_iter().next();
        match &guess {
            Some(zone) => debug!(query, home, guess = %zone, "Resolved location"),
            None => debug!(query, home, "No location matched"),
        }
        guess
    }

    /// Stable sort by path length from `home` over the static graph.
    fn rank_by_distance(&self, candidates: &mut [String], home: &str) {
        let overlay = PortalOverlay::empty();
        candidates.sort_by_cached_key(|candidate| {
            match self.planner.shortest_path(home, candidate, &overlay, None).len() {
                0 => UNREACHABLE_RANK,
                zones => zones,
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartography::route::MockRoutePlanner;
    use crate::test_fixtures::{fixture_names, fixture_resolver};

    #[test]
    fn unique_abbreviation_wins_outright() {
        let resolver = fixture_resolver();

        assert_eq!(
            resolver.best_guesses("fsp", None),
            vec!["Fort Sterling Portal"]
        );
    }

    #[test]
    fn abbreviation_is_case_insensitive() {
        let resolver = fixture_resolver();

        assert_eq!(
            resolver.best_guess("FSP", None).as_deref(),
            Some("Fort Sterling Portal")
        );
    }

    #[test]
    fn padded_query_is_not_trimmed() {
        let resolver = fixture_resolver();

        assert_eq!(resolver.best_guesses(" fsp", None), Vec::<String>::new());
        assert!(resolver.best_guesses("   ", None).is_empty());
    }

    #[test]
    fn substring_matches_in_catalog_order_without_home() {
        let resolver = fixture_resolver();

        assert_eq!(
            resolver.best_guesses("shaleheath", None),
            vec!["Shaleheath Steep", "Shaleheath Hills"]
        );
    }

    #[test]
    fn home_ranks_nearer_zones_first() {
        let resolver = fixture_resolver();

        assert_eq!(
            resolver.best_guesses("shaleheath", Some("Fort Sterling")),
            vec!["Shaleheath Hills", "Shaleheath Steep"]
        );
    }

    #[test]
    fn unreachable_candidates_sort_last() {
        let mut planner = MockRoutePlanner::new();
        planner
            .expect_shortest_path()
            .returning(|home, end, _, _| match end {
                "Fort Sterling" => Vec::new(),
                _ => vec![home.to_string(), end.to_string()],
            });
        let resolver = LocationResolver::new(Arc::new(fixture_names()), Arc::new(planner));

        assert_eq!(
            resolver.best_guesses("sterling", Some("Scuttlesink Marsh")),
            vec!["Fort Sterling Portal", "Fort Sterling"]
        );
    }

    #[test]
    fn ambiguous_abbreviations_follow_substring_matches() {
        let resolver = fixture_resolver();

        assert_eq!(
            resolver.best_guesses("qat", None),
            vec!["Qiient-Al-Tersas", "Quaent-Al-Tersis"]
        );
    }

    #[test]
    fn no_match_yields_none() {
        let resolver = fixture_resolver();

        assert!(resolver.best_guesses("zzz-nonexistent", None).is_empty());
        assert_eq!(resolver.best_guess("zzz-nonexistent", Some("Fort Sterling")), None);
        assert_eq!(resolver.best_guess("", None), None);
    }

    #[test]
    fn scenario_guess_then_route() {
        let resolver = fixture_resolver();

        let guess = resolver.best_guess("Scuttlesink", None);

        assert_eq!(guess.as_deref(), Some("Scuttlesink Marsh"));
    }
}
