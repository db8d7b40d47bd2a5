//! The dual-direction route engine.
//!
//! [`DualRouteEngine`] owns the outbound and return [`DirectionSet`]s and is
//! the only place they are mutated. Every operation runs to completion on
//! `&mut self`; provider calls are the only awaits. A computation can be
//! split into [`DualRouteEngine::begin_computation`],
//! [`PendingComputation::resolve`] and
//! [`DualRouteEngine::apply_computation`] so a host can keep handling user
//! events while routes are fetched. Results from a computation that has
//! since been superseded are discarded.

mod compute;

use std::sync::Arc;

use log::{debug, warn};
use rtd_core::reconcile::{ReconcileContext, reconstruct_path, reconstruct_trip_route};
use rtd_core::{
    Direction, DirectionsError, DirectionsProvider, EndpointPair, GeoPoint, GeofenceRole,
    ProviderPathResult, ProviderRoute, RouteRenderer, TripEndpoints, TripRoute,
};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::events::EventBus;
use crate::{DirectionSet, EngineConfig, EngineError, RouteEvent};

pub use compute::{ComputeOutcome, PendingComputation, RequestToken, ResolvedComputation};

/// Interactive route editor for a round trip.
///
/// The engine is generic over the injected directions provider and the
/// render layer. It keeps both directions consistent with user input and
/// publishes a [`TripRoute`] snapshot after every change.
pub struct DualRouteEngine<P, R>
where
    P: DirectionsProvider,
    R: RouteRenderer,
{
    provider: Arc<P>,
    renderer: R,
    config: EngineConfig,
    outbound: DirectionSet,
    return_trip: DirectionSet,
    endpoints: Option<EndpointPair>,
    geofences: Option<TripEndpoints>,
    ready: bool,
    latest: RequestToken,
    events: EventBus,
}

impl<P, R> DualRouteEngine<P, R>
where
    P: DirectionsProvider,
    R: RouteRenderer,
{
    /// Construct an engine using default configuration.
    pub fn new(provider: Arc<P>, renderer: R) -> Self {
        Self::with_config(provider, renderer, EngineConfig::default())
    }

    /// Construct an engine with explicit configuration.
    pub const fn with_config(provider: Arc<P>, renderer: R, config: EngineConfig) -> Self {
        Self {
            provider,
            renderer,
            config,
            outbound: DirectionSet::empty(Direction::Outbound),
            return_trip: DirectionSet::empty(Direction::Return),
            endpoints: None,
            geofences: None,
            ready: false,
            latest: RequestToken::INITIAL,
            events: EventBus::new(),
        }
    }

    /// Subscribe to [`RouteEvent`]s published after every state change.
    pub fn subscribe(&mut self) -> UnboundedReceiver<RouteEvent> {
        self.events.subscribe()
    }

    /// Store the endpoint geofences, draw them and compute routes between
    /// their centres.
    ///
    /// # Errors
    /// As for [`DualRouteEngine::compute_routes`].
    pub async fn set_endpoints(
        &mut self,
        endpoints: TripEndpoints,
    ) -> Result<ComputeOutcome, EngineError> {
        let pair = endpoints.points();
        validate_endpoint("source", pair.source)?;
        validate_endpoint("destination", pair.destination)?;
        self.renderer
            .render_geofence(GeofenceRole::Source, &endpoints.source);
        self.renderer
            .render_geofence(GeofenceRole::Destination, &endpoints.destination);
        self.geofences = Some(endpoints);
        self.compute_routes(pair.source, pair.destination).await
    }

    /// Fetch, order, pad and render alternatives for both directions.
    ///
    /// Returns [`ComputeOutcome::Skipped`] without contacting the provider
    /// when either point is the zero default.
    ///
    /// # Errors
    /// [`EngineError::InvalidCoordinate`] for out-of-range points and
    /// [`EngineError::RouteComputation`] when either direction fails or
    /// returns no routes; in both cases nothing is committed.
    pub async fn compute_routes(
        &mut self,
        source: GeoPoint,
        destination: GeoPoint,
    ) -> Result<ComputeOutcome, EngineError> {
        let Some(pending) = self.begin_computation(source, destination)? else {
            return Ok(ComputeOutcome::Skipped);
        };
        let resolved = pending.resolve().await;
        self.apply_computation(resolved)
    }

    /// Issue a computation with a fresh [`RequestToken`], superseding any
    /// computation issued earlier.
    ///
    /// Returns `None` when either point is the zero default.
    ///
    /// # Errors
    /// [`EngineError::InvalidCoordinate`] for out-of-range points.
    pub fn begin_computation(
        &mut self,
        source: GeoPoint,
        destination: GeoPoint,
    ) -> Result<Option<PendingComputation<P>>, EngineError> {
        validate_endpoint("source", source)?;
        validate_endpoint("destination", destination)?;
        if source.is_zero() || destination.is_zero() {
            debug!("skipping route computation: an endpoint is unset");
            return Ok(None);
        }
        self.latest = self.latest.next();
        debug!("issuing route computation {}", self.latest.sequence());
        Ok(Some(PendingComputation {
            token: self.latest,
            endpoints: EndpointPair {
                source,
                destination,
            },
            provider: Arc::clone(&self.provider),
        }))
    }

    /// Commit a resolved computation if it is still the latest issued.
    ///
    /// # Errors
    /// [`EngineError::RouteComputation`] when either direction failed or
    /// returned no routes; nothing is committed.
    pub fn apply_computation(
        &mut self,
        resolved: ResolvedComputation,
    ) -> Result<ComputeOutcome, EngineError> {
        if resolved.token != self.latest {
            warn!(
                "discarding superseded route computation {} (latest is {})",
                resolved.token.sequence(),
                self.latest.sequence()
            );
            return Ok(ComputeOutcome::Superseded);
        }
        let ResolvedComputation {
            endpoints,
            outbound,
            return_trip,
            ..
        } = resolved;
        let outbound_set = self.build_set(Direction::Outbound, outbound)?;
        let return_set = self.build_set(Direction::Return, return_trip)?;

        self.endpoints = Some(endpoints);
        self.commit(outbound_set, return_set);
        let trip = self.snapshot();
        self.events
            .publish(&RouteEvent::RoutesCreated(trip.clone()));
        Ok(ComputeOutcome::Applied(trip))
    }

    /// Rebuild both directions from a persisted trip route record.
    ///
    /// Each direction is reconstructed independently; one with nothing to
    /// render stays empty. Any computation still in flight is superseded.
    ///
    /// # Errors
    /// [`EngineError::EmptyRecord`] when neither direction has a route.
    pub fn load_trip_route(&mut self, raw: &Value) -> Result<TripRoute, EngineError> {
        let trip = reconstruct_trip_route(raw, self.endpoints);
        let outbound = DirectionSet::from_record(Direction::Outbound, trip.outbound, &self.config);
        let return_set =
            DirectionSet::from_record(Direction::Return, trip.return_trip, &self.config);
        if outbound.is_none() && return_set.is_none() {
            return Err(EngineError::EmptyRecord);
        }

        self.latest = self.latest.next();
        self.commit(
            outbound.unwrap_or_else(|| DirectionSet::empty(Direction::Outbound)),
            return_set.unwrap_or_else(|| DirectionSet::empty(Direction::Return)),
        );
        let snapshot = self.snapshot();
        self.events
            .publish(&RouteEvent::RoutesCreated(snapshot.clone()));
        Ok(snapshot)
    }

    /// Select the candidate at `index`, restyle the direction and move drag
    /// ability to it. Selecting the current candidate again is harmless.
    ///
    /// # Errors
    /// [`EngineError::NotReady`] before routes exist and
    /// [`EngineError::IndexOutOfRange`] for an unknown index.
    pub fn select_route(
        &mut self,
        direction: Direction,
        index: usize,
    ) -> Result<TripRoute, EngineError> {
        self.ensure_ready()?;
        let (renderer, config, set) = self.parts(direction);
        set.select(index)?;
        draw_set(renderer, config, set);
        attach_drag(renderer, set);
        self.fit_viewport();
        debug!("selected {direction} candidate {index}");
        Ok(self.publish_selected())
    }

    /// Accept the geometry of a finished drag for the draggable candidate.
    ///
    /// The candidate is marked custom until it is reset, and the path is
    /// stored as the direction's custom path.
    ///
    /// # Errors
    /// [`EngineError::DragRejected`] when `index` is not the draggable
    /// candidate and [`EngineError::DragReconciliation`] when `dragged` has
    /// no route leg. The candidate is unchanged in both cases.
    pub fn on_path_dragged(
        &mut self,
        direction: Direction,
        index: usize,
        dragged: ProviderPathResult,
    ) -> Result<TripRoute, EngineError> {
        self.ensure_ready()?;
        if self.direction_set(direction).draggable() != Some(index) {
            warn!("ignoring drag of {direction} candidate {index}: it is not draggable");
            return Err(EngineError::DragRejected { direction, index });
        }
        if dragged.primary_leg().is_none() {
            warn!("ignoring drag of {direction} candidate {index}: dragged path has no leg");
            return Err(EngineError::DragReconciliation { direction, index });
        }

        let (renderer, config, set) = self.parts(direction);
        set.apply_drag(index, dragged);
        draw_candidate(renderer, config, set, index);
        attach_drag(renderer, set);
        debug!("{direction} candidate {index} customised by drag");
        Ok(self.publish_selected())
    }

    /// Reconstruct a dragged path delivered as plain JSON and apply it as
    /// [`DualRouteEngine::on_path_dragged`] does.
    ///
    /// # Errors
    /// As for [`DualRouteEngine::on_path_dragged`].
    pub fn on_path_dragged_json(
        &mut self,
        direction: Direction,
        index: usize,
        raw: &Value,
    ) -> Result<TripRoute, EngineError> {
        let ctx = ReconcileContext::for_direction(self.endpoints, direction);
        let dragged = reconstruct_path(raw, &ctx);
        self.on_path_dragged(direction, index, dragged)
    }

    /// Restore a candidate to the path fetched for it and clear the
    /// direction's custom path.
    ///
    /// # Errors
    /// [`EngineError::NotReady`] before routes exist and
    /// [`EngineError::IndexOutOfRange`] for an unknown index.
    pub fn reset_to_original(
        &mut self,
        direction: Direction,
        index: usize,
    ) -> Result<TripRoute, EngineError> {
        self.ensure_ready()?;
        let (renderer, config, set) = self.parts(direction);
        set.reset_candidate(index)?;
        draw_candidate(renderer, config, set, index);
        if set.selected_index() == index {
            attach_drag(renderer, set);
        }
        debug!("{direction} candidate {index} reset to its fetched path");
        Ok(self.publish_selected())
    }

    /// Current trip route, or `None` before routes are computed or loaded.
    #[must_use]
    pub fn trip_route(&self) -> Option<TripRoute> {
        self.ready.then(|| self.snapshot())
    }

    /// Drop all route state and rendered overlays. In-flight computations
    /// are superseded.
    pub fn reset(&mut self) {
        self.erase();
        self.outbound = DirectionSet::empty(Direction::Outbound);
        self.return_trip = DirectionSet::empty(Direction::Return);
        self.endpoints = None;
        self.geofences = None;
        self.ready = false;
        self.latest = self.latest.next();
    }

    /// Candidate state for `direction`.
    #[must_use]
    pub const fn direction_set(&self, direction: Direction) -> &DirectionSet {
        match direction {
            Direction::Outbound => &self.outbound,
            Direction::Return => &self.return_trip,
        }
    }

    /// Endpoints of the last committed computation.
    #[must_use]
    pub const fn endpoints(&self) -> Option<EndpointPair> {
        self.endpoints
    }

    /// Geofences supplied through [`DualRouteEngine::set_endpoints`].
    #[must_use]
    pub const fn geofences(&self) -> Option<&TripEndpoints> {
        self.geofences.as_ref()
    }

    /// Token of the most recently issued computation.
    #[must_use]
    pub const fn latest_token(&self) -> RequestToken {
        self.latest
    }

    /// Engine configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The render layer.
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the render layer.
    pub const fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    fn ensure_ready(&self) -> Result<(), EngineError> {
        if self.ready {
            Ok(())
        } else {
            Err(EngineError::NotReady)
        }
    }

    const fn parts(&mut self, direction: Direction) -> (&mut R, &EngineConfig, &mut DirectionSet) {
        let set = match direction {
            Direction::Outbound => &mut self.outbound,
            Direction::Return => &mut self.return_trip,
        };
        (&mut self.renderer, &self.config, set)
    }

    fn build_set(
        &self,
        direction: Direction,
        fetched: Result<ProviderPathResult, DirectionsError>,
    ) -> Result<DirectionSet, EngineError> {
        let path = fetched.map_err(|source| EngineError::RouteComputation { direction, source })?;
        DirectionSet::from_alternatives(direction, path.into_alternatives(), &self.config).ok_or_else(
            || EngineError::RouteComputation {
                direction,
                source: DirectionsError::Status {
                    code: "ZERO_RESULTS".to_owned(),
                    message: "provider returned no routes".to_owned(),
                },
            },
        )
    }

    fn commit(&mut self, outbound: DirectionSet, return_set: DirectionSet) {
        self.erase();
        self.outbound = outbound;
        self.return_trip = return_set;
        self.ready = true;
        for direction in Direction::BOTH {
            let (renderer, config, set) = self.parts(direction);
            draw_set(renderer, config, set);
            attach_drag(renderer, set);
        }
        self.fit_viewport();
    }

    fn erase(&mut self) {
        for direction in Direction::BOTH {
            let (renderer, _, set) = self.parts(direction);
            for index in 0..set.len() {
                renderer.remove(set.key(index));
            }
            set.set_draggable(None);
        }
    }

    fn fit_viewport(&mut self) {
        let bounds = self
            .outbound
            .candidates()
            .iter()
            .chain(self.return_trip.candidates())
            .filter_map(|candidate| candidate.raw_path.primary_route())
            .filter_map(ProviderRoute::effective_bounds)
            .reduce(|acc, next| acc.union(&next));
        if let Some(union) = bounds {
            self.renderer.fit_viewport(union);
        }
    }

    fn snapshot(&self) -> TripRoute {
        TripRoute {
            outbound: self.outbound.snapshot(),
            return_trip: self.return_trip.snapshot(),
        }
    }

    fn publish_selected(&mut self) -> TripRoute {
        let trip = self.snapshot();
        self.events
            .publish(&RouteEvent::RouteSelected(trip.clone()));
        trip
    }
}

fn validate_endpoint(endpoint: &'static str, point: GeoPoint) -> Result<(), EngineError> {
    GeoPoint::new(point.lat, point.lng)
        .map(|_| ())
        .map_err(|source| EngineError::InvalidCoordinate { endpoint, source })
}

fn draw_candidate<R: RouteRenderer>(
    renderer: &mut R,
    config: &EngineConfig,
    set: &DirectionSet,
    index: usize,
) {
    if let Some(candidate) = set.candidate(index) {
        let style = config.style_for(set.direction(), candidate.is_selected);
        renderer.render(set.key(index), &candidate.raw_path, &style);
    }
}

fn draw_set<R: RouteRenderer>(renderer: &mut R, config: &EngineConfig, set: &DirectionSet) {
    for index in 0..set.len() {
        draw_candidate(renderer, config, set, index);
    }
}

/// Revoke drag ability from every other candidate, then grant it to the
/// selected one.
fn attach_drag<R: RouteRenderer>(renderer: &mut R, set: &mut DirectionSet) {
    let selected = set.selected_index();
    for index in (0..set.len()).filter(|index| *index != selected) {
        renderer.set_draggable(set.key(index), false);
    }
    if set.is_empty() {
        set.set_draggable(None);
    } else {
        renderer.set_draggable(set.key(selected), true);
        set.set_draggable(Some(selected));
    }
}
