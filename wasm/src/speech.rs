//! Voice capture of the city name
//!
//! The browser recognizer hides behind [`SpeechCapture`] so the controller
//! can be exercised without a microphone.

use js_sys::{Array, Function, Reflect};
use thiserror::Error;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpeechError {
    #[error("Reconhecimento de voz não suportado neste navegador")]
    Unsupported,

    #[error("Falha no reconhecimento de voz: {0}")]
    Browser(String),
}

impl From<JsValue> for SpeechError {
    fn from(value: JsValue) -> Self {
        SpeechError::Browser(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

/// A single-shot speech recognizer.
///
/// `recognize` starts one recognition in `locale` and hands the transcripts
/// of that session to `deliver`, at most once. Sessions are not restartable.
pub trait SpeechCapture {
    type Transcripts: Iterator<Item = String>;

    fn recognize(
        &self,
        locale: &str,
        deliver: Box<dyn FnOnce(Self::Transcripts)>,
    ) -> Result<(), SpeechError>;
}

/// First non-blank transcript, trimmed
pub fn city_from_speech(transcripts: impl IntoIterator<Item = String>) -> Option<String> {
    transcripts
        .into_iter()
        .next()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Listen once in Brazilian Portuguese and pass the recognized city on
pub fn listen_for_city<S, F>(speech: &S, on_city: F) -> Result<(), SpeechError>
where
    S: SpeechCapture,
    F: FnOnce(String) + 'static,
{
    speech.recognize(
        shared::SPEECH_LOCALE,
        Box::new(move |transcripts| {
            if let Some(city) = city_from_speech(transcripts) {
                on_city(city);
            }
        }),
    )
}

// ============================================================================
// Browser implementation
// ============================================================================

/// `SpeechRecognition` (or the prefixed `webkitSpeechRecognition`)
pub struct BrowserSpeech;

impl SpeechCapture for BrowserSpeech {
    type Transcripts = EventTranscripts;

    fn recognize(
        &self,
        locale: &str,
        deliver: Box<dyn FnOnce(EventTranscripts)>,
    ) -> Result<(), SpeechError> {
        let window = web_sys::window().ok_or(SpeechError::Unsupported)?;
        let constructor = ["SpeechRecognition", "webkitSpeechRecognition"]
            .iter()
            .filter_map(|name| Reflect::get(&window, &JsValue::from_str(name)).ok())
            .find_map(|value| value.dyn_into::<Function>().ok())
            .ok_or(SpeechError::Unsupported)?;

        let recognition = Reflect::construct(&constructor, &Array::new())?;
        Reflect::set(&recognition, &"lang".into(), &locale.into())?;
        Reflect::set(&recognition, &"continuous".into(), &JsValue::FALSE)?;
        Reflect::set(&recognition, &"interimResults".into(), &JsValue::FALSE)?;
        Reflect::set(&recognition, &"maxAlternatives".into(), &JsValue::from(1))?;

        let on_result = Closure::once_into_js(move |event: JsValue| {
            deliver(EventTranscripts::from_event(&event));
        });
        Reflect::set(&recognition, &"onresult".into(), &on_result)?;

        let start: Function = Reflect::get(&recognition, &"start".into())?.dyn_into()?;
        start.call0(&recognition)?;
        Ok(())
    }
}

/// Lazily reads `event.results[i][0].transcript`
pub struct EventTranscripts {
    results: JsValue,
    index: u32,
    len: u32,
}

impl EventTranscripts {
    fn from_event(event: &JsValue) -> Self {
        let results = Reflect::get(event, &"results".into()).unwrap_or(JsValue::UNDEFINED);
        let len = Reflect::get(&results, &"length".into())
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as u32;
        Self {
            results,
            index: 0,
            len,
        }
    }
}

impl Iterator for EventTranscripts {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while self.index < self.len {
            let result = Reflect::get_u32(&self.results, self.index).ok();
            self.index += 1;
            let transcript = result
                .and_then(|r| Reflect::get_u32(&r, 0).ok())
                .and_then(|alt| Reflect::get(&alt, &"transcript".into()).ok())
                .and_then(|t| t.as_string());
            if transcript.is_some() {
                return transcript;
            }
        }
        None
    }
}
