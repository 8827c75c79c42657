use std::cell::RefCell;
use std::rc::Rc;

use trail_core::{Camera, CameraCommand, Effect, Flight, SiteMap};
use web_sys as web;

use crate::geolocation::Sensor;
use crate::overlay;
use crate::speech::Speech;
use crate::{geolocation, speech};

/// What the canvas currently shows. Trails the site map's target camera
/// while a flight is running.
pub struct MapView {
    pub camera: Camera,
    pub flight: Option<Flight>,
}

impl MapView {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            flight: None,
        }
    }

    pub fn start_flight(&mut self, cmd: CameraCommand) {
        let (target, duration_sec) = match cmd {
            CameraCommand::FlyTo {
                target,
                duration_sec,
            } => (target, duration_sec),
            CameraCommand::FitBounds {
                target,
                duration_sec,
                ..
            } => (target, duration_sec),
        };
        self.flight = Some(Flight::new(self.camera, target, duration_sec));
    }

    /// Show `camera` immediately, abandoning any flight.
    pub fn jump(&mut self, camera: Camera) {
        self.flight = None;
        self.camera = camera;
    }

    pub fn advance(&mut self, dt_sec: f64) -> Camera {
        if let Some(flight) = &mut self.flight {
            self.camera = flight.advance(dt_sec);
            if flight.is_finished() {
                self.flight = None;
            }
        }
        self.camera
    }
}

/// Browser-side owner of the site map and every platform handle it drives.
pub struct App {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub site: RefCell<SiteMap>,
    pub view: RefCell<MapView>,
    pub sensor: RefCell<Sensor>,
    pub speech: Speech,
}

impl App {
    pub fn new(
        document: web::Document,
        canvas: web::HtmlCanvasElement,
        site: SiteMap,
        sensor: Sensor,
        speech: Speech,
    ) -> Self {
        let view = MapView::new(site.camera());
        Self {
            document,
            canvas,
            site: RefCell::new(site),
            view: RefCell::new(view),
            sensor: RefCell::new(sensor),
            speech,
        }
    }
}

/// Run one site map operation, then carry out the effects it produced.
///
/// The site map borrow ends before any effect runs, so browser callbacks
/// fired while executing (or queued by) an effect may call `update` again.
pub fn update<R>(app: &Rc<App>, f: impl FnOnce(&mut SiteMap, &mut Vec<Effect>) -> R) -> R {
    let mut out = Vec::new();
    let result = {
        let mut site = app.site.borrow_mut();
        f(&mut *site, &mut out)
    };
    apply(app, out);
    result
}

fn apply(app: &Rc<App>, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::Sensor(cmd) => geolocation::execute(app, cmd),
            Effect::Speech(cmd) => speech::execute(app, cmd),
            Effect::Camera(cmd) => app.view.borrow_mut().start_flight(cmd),
            Effect::Status(status) => overlay::show_status(&app.document, status),
        }
    }
    overlay::sync_controls(&app.document, &app.site.borrow());
}
