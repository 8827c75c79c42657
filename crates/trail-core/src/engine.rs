use crate::catalog::Catalog;
use crate::config::{Capabilities, SiteConfig};
use crate::effect::Effect;
use crate::error::{CatalogError, PlaybackError, SensorError};
use crate::geo::{Coordinate, PointOfInterest};
use crate::narration::{NarrationSession, NarrationState, Narrator, UtteranceId};
use crate::proximity::{resolve_within, ProximityResult};
use crate::sampler::{LiveFix, LocationSampler, RequestKind, Ticket};
use crate::status::StatusMessage;
use crate::surface::MapScene;
use crate::viewport::{Camera, ViewportController};

/// The site map: wires sampling, proximity, narration and the viewport.
///
/// Every operation appends the side effects it needs to `out`. After
/// [`SiteMap::teardown`] all event methods are no-ops.
pub struct SiteMap {
    catalog: &'static Catalog,
    config: SiteConfig,
    sampler: LocationSampler,
    narrator: Narrator,
    viewport: ViewportController,
    proximity: ProximityResult<'static>,
    status: StatusMessage,
    torn_down: bool,
}

impl SiteMap {
    pub fn new(
        catalog: &'static Catalog,
        config: SiteConfig,
        caps: Capabilities,
    ) -> Result<Self, CatalogError> {
        let boundary = catalog.validate()?;
        let viewport = ViewportController::new(boundary, catalog.initial_center, &config);
        log::info!(
            "[site] {} narrated points, {} landmarks, geolocation={} speech={}",
            catalog.points.len(),
            catalog.landmarks.len(),
            caps.geolocation,
            caps.speech
        );
        Ok(Self {
            catalog,
            sampler: LocationSampler::new(caps.geolocation, config.locate_timeout_ms),
            narrator: Narrator::new(caps.speech, config.voice),
            viewport,
            proximity: ProximityResult::NONE,
            status: StatusMessage::Intro,
            torn_down: false,
            config,
        })
    }

    #[inline]
    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    #[inline]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[inline]
    pub fn status(&self) -> StatusMessage {
        self.status
    }

    #[inline]
    pub fn proximity(&self) -> ProximityResult<'static> {
        self.proximity
    }

    /// The point of interest the visitor is currently standing at.
    #[inline]
    pub fn highlighted_point(&self) -> Option<&'static PointOfInterest> {
        self.proximity.point
    }

    #[inline]
    pub fn live_fix(&self) -> Option<LiveFix> {
        self.sampler.live_fix()
    }

    #[inline]
    pub fn camera(&self) -> Camera {
        self.viewport.camera()
    }

    #[inline]
    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    #[inline]
    pub fn sampler(&self) -> &LocationSampler {
        &self.sampler
    }

    #[inline]
    pub fn narration(&self) -> NarrationState {
        self.narrator.state()
    }

    #[inline]
    pub fn session(&self) -> NarrationSession {
        self.narrator.session()
    }

    #[inline]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn scene(&self) -> MapScene {
        MapScene::build(self.catalog, self.sampler.live_fix(), &self.proximity)
    }

    fn set_status(&mut self, status: StatusMessage, out: &mut Vec<Effect>) {
        if self.status != status {
            self.status = status;
            out.push(status.into());
        }
    }

    fn refresh_proximity(&mut self, fix: Coordinate) {
        let prev = self.proximity.point.map(|p| p.id());
        self.proximity = resolve_within(fix, self.catalog.points, self.config.proximity_radius_m);
        let now = self.proximity.point.map(|p| p.id());
        if prev != now {
            match now {
                Some(id) => log::info!(
                    "[site] in range of {} ({:.1} m)",
                    id,
                    self.proximity.distance_m
                ),
                None => log::info!("[site] no point in range"),
            }
        }
    }

    // ---------------- Location ----------------

    /// "Locate me": one-shot request, fly to the result, then keep polling.
    pub fn locate_me(&mut self, out: &mut Vec<Effect>) -> Option<Ticket> {
        if self.torn_down {
            return None;
        }
        match self.sampler.request_once(out) {
            Ok(ticket) => {
                self.set_status(StatusMessage::Locating, out);
                Some(ticket)
            }
            Err(e) => {
                self.set_status(e.into(), out);
                None
            }
        }
    }

    pub fn on_position(&mut self, ticket: Ticket, fix: LiveFix, out: &mut Vec<Effect>) {
        if self.torn_down {
            return;
        }
        let Some(sample) = self.sampler.on_position(ticket, fix, out) else {
            return;
        };
        if sample.applied {
            self.refresh_proximity(sample.fix.location);
        }
        if sample.kind == RequestKind::OneShot {
            self.set_status(StatusMessage::LocationFound, out);
            // A rejected older fix still completes the locate, but the camera
            // follows the retained fix.
            let target = self
                .sampler
                .live_fix()
                .map_or(sample.fix.location, |f| f.location);
            let zoom = self.config.locate_zoom;
            self.viewport.fly_to(target, zoom, out);
            self.sampler.ensure_polling(self.config.poll_interval_ms, out);
        }
    }

    pub fn on_position_error(&mut self, ticket: Ticket, error: SensorError, out: &mut Vec<Effect>) {
        if self.torn_down {
            return;
        }
        if let Some(e) = self.sampler.on_error(ticket, error, out) {
            self.set_status(e.into(), out);
        }
    }

    pub fn on_request_timeout(&mut self, ticket: Ticket, out: &mut Vec<Effect>) {
        if self.torn_down {
            return;
        }
        if let Some(e) = self.sampler.on_timeout(ticket) {
            self.set_status(e.into(), out);
        }
    }

    pub fn on_poll_tick(&mut self, out: &mut Vec<Effect>) -> Option<Ticket> {
        if self.torn_down {
            return None;
        }
        self.sampler.on_poll_tick(out)
    }

    // ---------------- Viewport ----------------

    pub fn return_to_overview(&mut self, out: &mut Vec<Effect>) {
        if self.torn_down {
            return;
        }
        self.viewport.recenter_to_boundary(out);
    }

    /// Host request to center the map on a coordinate at the current zoom.
    pub fn center_map(&mut self, center: Coordinate, out: &mut Vec<Effect>) {
        if self.torn_down {
            return;
        }
        let zoom = self.viewport.camera().zoom;
        self.viewport.fly_to(center, zoom, out);
    }

    pub fn pan_to(&mut self, center: Coordinate) -> Camera {
        self.viewport.pan_to(center)
    }

    pub fn zoom_by(&mut self, delta: f64) -> Camera {
        self.viewport.zoom_by(delta)
    }

    pub fn set_camera(&mut self, camera: Camera) -> Camera {
        self.viewport.set_camera(camera)
    }

    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport.set_viewport_size(width, height);
    }

    // ---------------- Narration ----------------

    /// Narrate the point in range. `Ok(None)` when nothing is in range.
    pub fn play_nearest(
        &mut self,
        out: &mut Vec<Effect>,
    ) -> Result<Option<UtteranceId>, PlaybackError> {
        if self.torn_down {
            return Ok(None);
        }
        let Some(point) = self.proximity.point else {
            return Ok(None);
        };
        match self.narrator.play(point.id(), point.narration, out) {
            Ok(utterance) => Ok(Some(utterance)),
            Err(e) => {
                self.set_status((&e).into(), out);
                Err(e)
            }
        }
    }

    pub fn stop_narration(&mut self, out: &mut Vec<Effect>) {
        if self.torn_down {
            return;
        }
        self.narrator.stop(out);
    }

    pub fn on_speech_start(&mut self, utterance: UtteranceId) {
        if self.torn_down {
            return;
        }
        self.narrator.on_start(utterance);
    }

    pub fn on_speech_end(&mut self, utterance: UtteranceId) {
        if self.torn_down {
            return;
        }
        self.narrator.on_end(utterance);
    }

    pub fn on_speech_error(
        &mut self,
        utterance: UtteranceId,
        error: PlaybackError,
        out: &mut Vec<Effect>,
    ) {
        if self.torn_down {
            return;
        }
        if let Some(e) = self.narrator.on_error(utterance, error) {
            self.set_status((&e).into(), out);
        }
    }

    // ---------------- Lifecycle ----------------

    /// Stop polling, cancel narration and release timers. Idempotent.
    /// Page hidden. A page kept in the back/forward cache only falls silent
    /// and comes back live; a page being unloaded is torn down.
    pub fn on_page_hide(&mut self, persisted: bool, out: &mut Vec<Effect>) {
        if persisted {
            log::info!("[site] page cached, silencing narration");
            self.stop_narration(out);
        } else {
            self.teardown(out);
        }
    }

    pub fn teardown(&mut self, out: &mut Vec<Effect>) {
        if self.torn_down {
            return;
        }
        self.sampler.shutdown(out);
        self.narrator.stop(out);
        self.torn_down = true;
        log::info!("[site] torn down");
    }
}
