use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use trail_core::{PlaybackError, SpeechCommand, UtteranceId, Voice};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::app::{self, App};

/// The page's speech synthesizer and the utterance it is currently speaking.
pub struct Speech {
    synth: Option<web::SpeechSynthesis>,
    // Held so the utterance (and its callbacks) outlive a garbage collection.
    current: RefCell<Option<web::SpeechSynthesisUtterance>>,
}

impl Speech {
    pub fn detect(window: &web::Window) -> Self {
        let present = Reflect::has(window, &JsValue::from_str("speechSynthesis")).unwrap_or(false);
        let synth = if present {
            window.speech_synthesis().ok()
        } else {
            None
        };
        Self {
            synth,
            current: RefCell::new(None),
        }
    }

    #[inline]
    pub fn is_supported(&self) -> bool {
        self.synth.is_some()
    }

    fn cancel(&self) {
        self.current.borrow_mut().take();
        if let Some(synth) = &self.synth {
            synth.cancel();
        }
    }
}

pub fn execute(app: &Rc<App>, cmd: SpeechCommand) {
    match cmd {
        SpeechCommand::Speak {
            utterance,
            text,
            voice,
        } => {
            if let Err(e) = speak(app, utterance, &text, voice) {
                log::error!("[speech] {} could not start: {:?}", utterance, e);
                app::update(app, |site, out| {
                    site.on_speech_error(utterance, PlaybackError::Failed(e.to_string()), out)
                });
            }
        }
        SpeechCommand::Cancel => app.speech.cancel(),
    }
}

fn speak(app: &Rc<App>, id: UtteranceId, text: &str, voice: Voice) -> anyhow::Result<()> {
    let synth = app
        .speech
        .synth
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("speech synthesis unavailable"))?;
    let utterance = web::SpeechSynthesisUtterance::new_with_text(text)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    utterance.set_lang(voice.lang);
    utterance.set_rate(voice.rate);

    let app_start = app.clone();
    let on_start = Closure::once_into_js(move || {
        app::update(&app_start, |site, _| site.on_speech_start(id));
    });
    let app_end = app.clone();
    let on_end = Closure::once_into_js(move || {
        app::update(&app_end, |site, _| site.on_speech_end(id));
    });
    let app_err = app.clone();
    let on_error = Closure::once_into_js(move |event: JsValue| {
        let reason = Reflect::get(&event, &JsValue::from_str("error"))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| "unknown".to_owned());
        app::update(&app_err, |site, out| {
            site.on_speech_error(id, PlaybackError::Failed(reason), out)
        });
    });
    utterance.set_onstart(Some(on_start.unchecked_ref()));
    utterance.set_onend(Some(on_end.unchecked_ref()));
    utterance.set_onerror(Some(on_error.unchecked_ref()));

    synth.speak(&utterance);
    *app.speech.current.borrow_mut() = Some(utterance);
    log::info!("[speech] speaking {} ({} chars)", id, text.len());
    Ok(())
}
