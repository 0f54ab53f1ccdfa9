//! WebAssembly frontend for Clima
//!
//! Drives the weather page from the browser:
//! - City lookup and weather card rendering
//! - Clothing suggestion requests built from the rendered card
//! - Voice input of the city name

use wasm_bindgen::prelude::*;

pub mod api;
pub mod controller;
mod dom;
pub mod speech;

use controller::{
    render_error, render_loading, render_suggestion, render_suggestion_loading, SuggestionForm,
    CITY_INPUT, CITY_TITLE, HUMIDITY_TEXT, SUGGESTION_BUTTON, SUGGESTION_SLOT, TEMPERATURE_TEXT,
    WEATHER_PANEL,
};
use speech::BrowserSpeech;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Look up the weather for the city typed in the input
#[wasm_bindgen]
pub async fn lookup_weather() -> Result<(), JsValue> {
    let city = dom::input(CITY_INPUT)?.value();
    dom::set_html(WEATHER_PANEL, &render_loading())?;

    match api::fetch_weather(&city).await {
        Ok(card) => {
            dom::set_html(WEATHER_PANEL, &card.render())?;
            dom::on_click(SUGGESTION_BUTTON, || {
                wasm_bindgen_futures::spawn_local(async {
                    if let Err(err) = request_suggestion().await {
                        dom::log_error(&format!("{:?}", err));
                    }
                });
            })?;
        }
        Err(err) => {
            dom::log_error(&err.to_string());
            dom::set_html(WEATHER_PANEL, &render_error(&format!("Erro: {}", err)))?;
        }
    }
    Ok(())
}

/// Ask the backend for a clothing suggestion for the card on screen
#[wasm_bindgen]
pub async fn request_suggestion() -> Result<(), JsValue> {
    dom::set_html(SUGGESTION_SLOT, &render_suggestion_loading())?;

    let form = SuggestionForm::from_rendered(
        &dom::text(TEMPERATURE_TEXT)?,
        &dom::text(HUMIDITY_TEXT)?,
        &dom::text(CITY_TITLE)?,
    );
    let form = match form {
        Ok(form) => form,
        Err(err) => {
            dom::set_html(SUGGESTION_SLOT, &render_error(&err.to_string()))?;
            return Ok(());
        }
    };

    match api::fetch_suggestion(&form.into_request()).await {
        Ok(result) => dom::set_html(SUGGESTION_SLOT, &render_suggestion(&result))?,
        Err(err) => {
            dom::log_error(&err.to_string());
            dom::set_html(SUGGESTION_SLOT, &render_error(&format!("Erro na IA: {}", err)))?;
        }
    }
    Ok(())
}

/// Capture the city by voice, then look up its weather
#[wasm_bindgen]
pub fn listen_for_city() -> Result<(), JsValue> {
    speech::listen_for_city(&BrowserSpeech, |city| {
        match dom::input(CITY_INPUT) {
            Ok(input) => input.set_value(&city),
            Err(err) => dom::log_error(&format!("{:?}", err)),
        }
        wasm_bindgen_futures::spawn_local(async {
            if let Err(err) = lookup_weather().await {
                dom::log_error(&format!("{:?}", err));
            }
        });
    })
    .map_err(|err| JsValue::from_str(&err.to_string()))
}
