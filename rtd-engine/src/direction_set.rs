//! Per-direction candidate state.
//!
//! A [`DirectionSet`] is the engine's value model for one half of the trip:
//! the candidates in display order, the single selection, the originally
//! fetched paths used by reset, the direction's custom path and the one
//! candidate currently granted drag ability. Renderer handles never live
//! here; renderers look them up by [`CandidateKey`].

use rtd_core::{
    CandidateKey, Direction, DirectionRoute, LegMetric, ProviderPathResult,
};

use crate::{EngineConfig, EngineError};

/// One alternative route shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCandidate {
    /// Path currently drawn for this candidate, dragged geometry included.
    pub raw_path: ProviderPathResult,
    /// Metric of `raw_path`'s first leg.
    pub leg_metric: LegMetric,
    /// Stroke colour.
    pub color: String,
    /// Whether this is the direction's selected candidate.
    pub is_selected: bool,
    /// Whether the user has dragged this candidate since it was fetched.
    pub is_custom: bool,
}

impl PathCandidate {
    fn new(raw_path: ProviderPathResult, color: &str) -> Self {
        Self {
            leg_metric: LegMetric::of(&raw_path),
            raw_path,
            color: color.to_owned(),
            is_selected: false,
            is_custom: false,
        }
    }
}

/// Candidates and selection state for one direction.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionSet {
    direction: Direction,
    candidates: Vec<PathCandidate>,
    originals: Vec<ProviderPathResult>,
    selected_index: usize,
    custom_path: Option<ProviderPathResult>,
    draggable: Option<usize>,
}

impl DirectionSet {
    /// A direction with nothing to show.
    #[must_use]
    pub const fn empty(direction: Direction) -> Self {
        Self {
            direction,
            candidates: Vec::new(),
            originals: Vec::new(),
            selected_index: 0,
            custom_path: None,
            draggable: None,
        }
    }

    /// Build a set from freshly fetched alternatives.
    ///
    /// Alternatives are ordered by ascending first-leg distance (ties keep
    /// provider order), padded to `config.min_candidates` by duplicating
    /// the shortest, and the shortest is selected. Returns `None` when
    /// there are no alternatives.
    #[must_use]
    pub fn from_alternatives(
        direction: Direction,
        mut alternatives: Vec<ProviderPathResult>,
        config: &EngineConfig,
    ) -> Option<Self> {
        alternatives.retain(|path| !path.is_empty());
        alternatives.sort_by_key(|path| LegMetric::of(path).distance_value_meters);
        let originals = pad(alternatives, config.min_candidates)?;
        Some(Self::with_originals(direction, originals, config, 0))
    }

    /// Rebuild a set from a reconstructed trip route record.
    ///
    /// Candidates come from `suggested`, or from `selected` alone when there
    /// are no suggestions, padded as for fresh alternatives. The selection is
    /// the suggestion matching `selected`. A `selected` path matching no
    /// suggestion is dragged geometry and is shown, custom, on the first
    /// candidate. The stored custom path is kept as the direction's custom
    /// path and is drawn only on the selected candidate it describes.
    /// Returns `None` when the record has nothing to render.
    #[must_use]
    pub fn from_record(
        direction: Direction,
        record: DirectionRoute,
        config: &EngineConfig,
    ) -> Option<Self> {
        let DirectionRoute {
            selected,
            suggested,
            custom_path,
        } = record;
        let stored_custom = custom_path.filter(|path| !path.is_empty());
        let paths: Vec<ProviderPathResult> = if suggested.is_empty() {
            std::iter::once(selected.clone())
                .chain(stored_custom.clone())
                .find(|path| !path.is_empty())
                .into_iter()
                .collect()
        } else {
            suggested
        };
        let matched = paths.iter().position(|path| path.same_route(&selected));
        let selected_index = matched.unwrap_or(0);
        let originals = pad(paths, config.min_candidates)?;
        let mut set = Self::with_originals(direction, originals, config, selected_index);

        if matched.is_none() && !selected.is_empty() {
            set.show_custom(selected_index, selected);
        } else if let Some(custom) = stored_custom.as_ref().filter(|path| path.same_route(&selected)) {
            set.show_custom(selected_index, custom.clone());
        }
        set.custom_path = stored_custom;
        Some(set)
    }

    fn with_originals(
        direction: Direction,
        originals: Vec<ProviderPathResult>,
        config: &EngineConfig,
        selected_index: usize,
    ) -> Self {
        let color = config.color_for(direction);
        let candidates = originals
            .iter()
            .enumerate()
            .map(|(index, path)| {
                let mut candidate = PathCandidate::new(path.clone(), color);
                candidate.is_selected = index == selected_index;
                candidate
            })
            .collect();
        Self {
            direction,
            candidates,
            originals,
            selected_index,
            custom_path: None,
            draggable: None,
        }
    }

    /// Direction this set belongs to.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Candidates in display order.
    #[must_use]
    pub fn candidates(&self) -> &[PathCandidate] {
        &self.candidates
    }

    /// Candidate at `index`.
    #[must_use]
    pub fn candidate(&self, index: usize) -> Option<&PathCandidate> {
        self.candidates.get(index)
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the direction has no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Index of the selected candidate.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// The selected candidate, if the direction has any.
    #[must_use]
    pub fn selected(&self) -> Option<&PathCandidate> {
        self.candidates.get(self.selected_index)
    }

    /// The direction's last dragged path.
    #[must_use]
    pub const fn custom_path(&self) -> Option<&ProviderPathResult> {
        self.custom_path.as_ref()
    }

    /// The candidate currently granted drag ability.
    #[must_use]
    pub const fn draggable(&self) -> Option<usize> {
        self.draggable
    }

    /// Key of the candidate at `index`.
    #[must_use]
    pub const fn key(&self, index: usize) -> CandidateKey {
        CandidateKey::new(self.direction, index)
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<(), EngineError> {
        if index < self.candidates.len() {
            Ok(())
        } else {
            Err(EngineError::IndexOutOfRange {
                direction: self.direction,
                index,
                len: self.candidates.len(),
            })
        }
    }

    /// Make `index` the only selected candidate.
    pub(crate) fn select(&mut self, index: usize) -> Result<(), EngineError> {
        self.check_index(index)?;
        for (position, candidate) in self.candidates.iter_mut().enumerate() {
            candidate.is_selected = position == index;
        }
        self.selected_index = index;
        Ok(())
    }

    pub(crate) const fn set_draggable(&mut self, index: Option<usize>) {
        self.draggable = index;
    }

    /// Replace a candidate's path with dragged geometry and record it as
    /// the direction's custom path.
    pub(crate) fn apply_drag(&mut self, index: usize, dragged: ProviderPathResult) {
        if self.show_custom(index, dragged.clone()) {
            self.custom_path = Some(dragged);
        }
    }

    /// Draw `path` on the candidate at `index` and mark it custom.
    fn show_custom(&mut self, index: usize, path: ProviderPathResult) -> bool {
        let Some(candidate) = self.candidates.get_mut(index) else {
            return false;
        };
        candidate.leg_metric = LegMetric::of(&path);
        candidate.raw_path = path;
        candidate.is_custom = true;
        true
    }

    /// Restore a candidate to its fetched path and clear the custom path.
    pub(crate) fn reset_candidate(&mut self, index: usize) -> Result<(), EngineError> {
        self.check_index(index)?;
        let original = self.originals.get(index).cloned().unwrap_or_default();
        if let Some(candidate) = self.candidates.get_mut(index) {
            candidate.leg_metric = LegMetric::of(&original);
            candidate.raw_path = original;
            candidate.is_custom = false;
        }
        self.custom_path = None;
        Ok(())
    }

    /// Persistable view of the direction.
    #[must_use]
    pub fn snapshot(&self) -> DirectionRoute {
        DirectionRoute {
            selected: self
                .selected()
                .map_or_else(ProviderPathResult::empty, |candidate| {
                    candidate.raw_path.clone()
                }),
            suggested: self.originals.clone(),
            custom_path: self.custom_path.clone(),
        }
    }
}

/// Pad `paths` to `min` entries by repeating the first; `None` if empty.
fn pad(mut paths: Vec<ProviderPathResult>, min: usize) -> Option<Vec<ProviderPathResult>> {
    let first = paths.first()?.clone();
    if paths.len() < min {
        paths.resize(min, first);
    }
    Some(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use rtd_core::test_support::{sample_route, single_path};

    #[fixture]
    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    fn paths(distances: &[u64]) -> Vec<ProviderPathResult> {
        distances
            .iter()
            .map(|metres| single_path(sample_route(*metres, &format!("{metres} m"), "5 mins")))
            .collect()
    }

    fn distances(set: &DirectionSet) -> Vec<u64> {
        set.candidates()
            .iter()
            .map(|candidate| candidate.leg_metric.distance_value_meters)
            .collect()
    }

    #[rstest]
    fn sorts_and_selects_shortest(config: EngineConfig) {
        let set = DirectionSet::from_alternatives(Direction::Return, paths(&[400, 100, 300, 200]), &config)
            .expect("alternatives");

        assert_eq!(distances(&set), vec![100, 200, 300, 400]);
        assert_eq!(set.selected_index(), 0);
        assert!(set.candidates().iter().all(|candidate| candidate.color == "purple"));
    }

    #[rstest]
    fn pads_by_duplicating_shortest(config: EngineConfig) {
        let set = DirectionSet::from_alternatives(Direction::Outbound, paths(&[900, 500]), &config)
            .expect("alternatives");

        assert_eq!(distances(&set), vec![500, 900, 500]);
    }

    #[rstest]
    fn no_alternatives_builds_nothing(config: EngineConfig) {
        assert!(DirectionSet::from_alternatives(Direction::Outbound, Vec::new(), &config).is_none());
    }

    #[rstest]
    fn drag_then_reset_restores_original(config: EngineConfig) {
        let mut set = DirectionSet::from_alternatives(Direction::Outbound, paths(&[100]), &config)
            .expect("alternatives");
        let dragged = single_path(sample_route(150, "150 m", "6 mins"));

        set.apply_drag(0, dragged.clone());
        assert!(set.candidate(0).is_some_and(|candidate| candidate.is_custom));
        assert_eq!(set.custom_path(), Some(&dragged));

        set.reset_candidate(0).expect("in range");
        let candidate = set.candidate(0).expect("candidate");
        assert!(!candidate.is_custom);
        assert_eq!(candidate.leg_metric.distance_value_meters, 100);
        assert!(set.custom_path().is_none());
    }

    #[rstest]
    fn record_selection_follows_selected_path(config: EngineConfig) {
        let suggested = paths(&[100, 200, 300]);
        let record = DirectionRoute {
            selected: suggested.get(2).cloned().expect("third path"),
            suggested,
            custom_path: None,
        };

        let set = DirectionSet::from_record(Direction::Outbound, record, &config).expect("record");

        assert_eq!(set.selected_index(), 2);
        assert_eq!(
            set.candidates().iter().filter(|candidate| candidate.is_selected).count(),
            1
        );
    }

    #[rstest]
    #[case::custom_is_selected(250, true)]
    #[case::custom_is_elsewhere(200, false)]
    fn record_without_suggestions_uses_selected(
        config: EngineConfig,
        #[case] selected_metres: u64,
        #[case] shows_custom: bool,
    ) {
        let custom = single_path(sample_route(250, "250 m", "7 mins"));
        let selected_path = single_path(sample_route(
            selected_metres,
            &format!("{selected_metres} m"),
            "6 mins",
        ));
        let record = DirectionRoute {
            selected: selected_path.clone(),
            suggested: Vec::new(),
            custom_path: Some(custom.clone()),
        };

        let set = DirectionSet::from_record(Direction::Return, record, &config).expect("record");

        assert_eq!(set.len(), 3);
        let selected = set.selected().expect("selected");
        assert_eq!(selected.is_custom, shows_custom);
        assert_eq!(selected.raw_path, selected_path);
        assert_eq!(set.custom_path(), Some(&custom));
        assert_eq!(set.snapshot().suggested.len(), 3);
    }

    #[rstest]
    fn record_with_only_custom_path_shows_it(config: EngineConfig) {
        let custom = single_path(sample_route(250, "250 m", "7 mins"));
        let record = DirectionRoute {
            selected: ProviderPathResult::empty(),
            suggested: Vec::new(),
            custom_path: Some(custom.clone()),
        };

        let set = DirectionSet::from_record(Direction::Outbound, record, &config).expect("record");

        assert_eq!(set.selected().map(|candidate| &candidate.raw_path), Some(&custom));
        assert_eq!(set.custom_path(), Some(&custom));
    }

    #[rstest]
    fn custom_path_of_unselected_candidate_is_not_drawn_on_selection(config: EngineConfig) {
        let suggested = paths(&[100, 200, 300]);
        let record = DirectionRoute {
            selected: suggested.get(1).cloned().expect("second path"),
            suggested: suggested.clone(),
            custom_path: Some(single_path(sample_route(880, "880 m", "9 mins"))),
        };

        let set = DirectionSet::from_record(Direction::Return, record.clone(), &config)
            .expect("record");

        assert_eq!(set.selected_index(), 1);
        assert_eq!(distances(&set), vec![100, 200, 300]);
        assert!(set.candidates().iter().all(|candidate| !candidate.is_custom));
        assert_eq!(set.snapshot(), record);
    }

    #[rstest]
    fn unmatched_selected_path_is_custom_geometry(config: EngineConfig) {
        let suggested = paths(&[100, 200, 300]);
        let dragged = single_path(sample_route(990, "990 m", "12 mins"));
        let record = DirectionRoute {
            selected: dragged.clone(),
            suggested,
            custom_path: None,
        };

        let set = DirectionSet::from_record(Direction::Return, record.clone(), &config)
            .expect("record");

        let selected = set.selected().expect("selected");
        assert!(selected.is_custom);
        assert_eq!(selected.raw_path, dragged);
        assert!(set.custom_path().is_none());
        assert_eq!(set.snapshot(), record);
    }

    #[rstest]
    fn empty_record_builds_nothing(config: EngineConfig) {
        assert!(DirectionSet::from_record(Direction::Return, DirectionRoute::default(), &config).is_none());
    }

    #[rstest]
    fn select_rejects_out_of_range(config: EngineConfig) {
        let mut set = DirectionSet::from_alternatives(Direction::Outbound, paths(&[100]), &config)
            .expect("alternatives");
        assert_eq!(
            set.select(3),
            Err(EngineError::IndexOutOfRange {
                direction: Direction::Outbound,
                index: 3,
                len: 3
            })
        );
    }
}
