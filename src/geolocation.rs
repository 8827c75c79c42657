use std::rc::Rc;

use fnv::FnvHashMap;
use js_sys::Reflect;
use trail_core::{Coordinate, LiveFix, PositionOptions, SensorCommand, SensorError, Ticket};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::app::{self, App};

/// Browser geolocation plus the timers the sampler asks for.
pub struct Sensor {
    geolocation: Option<web::Geolocation>,
    interval: Option<(i32, Closure<dyn FnMut()>)>,
    timeouts: FnvHashMap<Ticket, i32>,
}

impl Sensor {
    pub fn detect(window: &web::Window) -> Self {
        let navigator = window.navigator();
        let present = Reflect::has(&navigator, &JsValue::from_str("geolocation")).unwrap_or(false);
        let geolocation = if present {
            navigator.geolocation().ok()
        } else {
            None
        };
        Self {
            geolocation,
            interval: None,
            timeouts: FnvHashMap::default(),
        }
    }

    #[inline]
    pub fn is_supported(&self) -> bool {
        self.geolocation.is_some()
    }
}

pub fn execute(app: &Rc<App>, cmd: SensorCommand) {
    match cmd {
        SensorCommand::Request { ticket, options } => request_position(app, ticket, options),
        SensorCommand::ArmTimeout { ticket, after_ms } => arm_timeout(app, ticket, after_ms),
        SensorCommand::DisarmTimeout { ticket } => {
            if let Some(handle) = app.sensor.borrow_mut().timeouts.remove(&ticket) {
                if let Some(w) = web::window() {
                    w.clear_timeout_with_handle(handle);
                }
            }
        }
        SensorCommand::StartInterval { every_ms } => start_interval(app, every_ms),
        SensorCommand::StopInterval => {
            // Dropping the closure releases its handle on the app.
            if let Some((handle, _closure)) = app.sensor.borrow_mut().interval.take() {
                if let Some(w) = web::window() {
                    w.clear_interval_with_handle(handle);
                }
            }
        }
    }
}

fn request_position(app: &Rc<App>, ticket: Ticket, options: PositionOptions) {
    let geolocation = app.sensor.borrow().geolocation.clone();
    let Some(geolocation) = geolocation else {
        app::update(app, |site, out| {
            site.on_position_error(ticket, SensorError::Unsupported, out)
        });
        return;
    };

    let app_ok = app.clone();
    let on_success = Closure::once_into_js(move |position: JsValue| {
        match parse_position(&position) {
            Some(fix) => app::update(&app_ok, |site, out| site.on_position(ticket, fix, out)),
            None => {
                log::warn!("[geo] {} returned an unreadable position", ticket);
                app::update(&app_ok, |site, out| {
                    site.on_position_error(ticket, SensorError::Unavailable, out)
                })
            }
        }
    });
    let app_err = app.clone();
    let on_error = Closure::once_into_js(move |error: JsValue| {
        let code = Reflect::get(&error, &JsValue::from_str("code"))
            .ok()
            .and_then(|v| v.as_f64())
            .map(|c| c as u16)
            .unwrap_or(2);
        app::update(&app_err, |site, out| {
            site.on_position_error(ticket, SensorError::from_code(code), out)
        });
    });

    let result = geolocation.get_current_position_with_error_callback_and_options(
        on_success.unchecked_ref(),
        Some(on_error.unchecked_ref()),
        &position_options(options),
    );
    if let Err(e) = result {
        log::error!("[geo] getCurrentPosition failed: {:?}", e);
        app::update(app, |site, out| {
            site.on_position_error(ticket, SensorError::Unavailable, out)
        });
    }
}

fn position_options(options: PositionOptions) -> web::PositionOptions {
    let obj = js_sys::Object::new();
    _ = Reflect::set(
        &obj,
        &JsValue::from_str("enableHighAccuracy"),
        &JsValue::from_bool(options.high_accuracy),
    );
    _ = Reflect::set(
        &obj,
        &JsValue::from_str("maximumAge"),
        &JsValue::from(options.maximum_age_ms),
    );
    if let Some(timeout) = options.timeout_ms {
        _ = Reflect::set(&obj, &JsValue::from_str("timeout"), &JsValue::from(timeout));
    }
    obj.unchecked_into()
}

fn parse_position(position: &JsValue) -> Option<LiveFix> {
    let get = |target: &JsValue, key: &str| {
        Reflect::get(target, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_f64())
    };
    let coords = Reflect::get(position, &JsValue::from_str("coords")).ok()?;
    let location = Coordinate::new(get(&coords, "latitude")?, get(&coords, "longitude")?);
    if !location.is_finite() {
        return None;
    }
    Some(LiveFix {
        location,
        timestamp_ms: get(position, "timestamp").unwrap_or_else(js_sys::Date::now),
        accuracy_m: get(&coords, "accuracy"),
    })
}

fn arm_timeout(app: &Rc<App>, ticket: Ticket, after_ms: u32) {
    let Some(window) = web::window() else {
        return;
    };
    let app_timer = app.clone();
    let on_timeout = Closure::once_into_js(move || {
        app_timer.sensor.borrow_mut().timeouts.remove(&ticket);
        app::update(&app_timer, |site, out| site.on_request_timeout(ticket, out));
    });
    match window.set_timeout_with_callback_and_timeout_and_arguments_0(
        on_timeout.unchecked_ref(),
        after_ms.min(i32::MAX as u32) as i32,
    ) {
        Ok(handle) => {
            app.sensor.borrow_mut().timeouts.insert(ticket, handle);
        }
        Err(e) => log::error!("[geo] setTimeout failed for {}: {:?}", ticket, e),
    }
}

fn start_interval(app: &Rc<App>, every_ms: u32) {
    let Some(window) = web::window() else {
        return;
    };
    let app_tick = app.clone();
    let closure = Closure::wrap(Box::new(move || {
        app::update(&app_tick, |site, out| {
            site.on_poll_tick(out);
        });
    }) as Box<dyn FnMut()>);
    match window.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        every_ms.min(i32::MAX as u32) as i32,
    ) {
        Ok(handle) => {
            log::info!("[geo] polling every {} ms", every_ms);
            app.sensor.borrow_mut().interval = Some((handle, closure));
        }
        Err(e) => log::error!("[geo] setInterval failed: {:?}", e),
    }
}
