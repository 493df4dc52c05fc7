//! Background retrieval of remote assets.
//!
//! The browser build fetches with `window.fetch` on the JS event loop, the native
//! build uses a blocking HTTP client on a worker thread. Either way the outcome is
//! posted to a [`Mailbox`] that a system drains on the main schedule.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use crate::engine::assets::environment_map::EnvironmentCubemaps;
use crate::error::AssetResult;

/// Single-slot hand-off between a background job and the main schedule.
#[derive(Debug)]
pub struct Mailbox<T>(Arc<Mutex<Option<T>>>);

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self(Arc::new(Mutex::new(None)))
    }
}

impl<T> Clone for Mailbox<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Mailbox<T> {
    pub fn post(&self, value: T) {
        match self.0.lock() {
            Ok(mut slot) => *slot = Some(value),
            Err(err) => error!("Mailbox lock poisoned, dropping result: {}", err),
        }
    }

    /// Take the posted value, if any. A poisoned lock reads as empty.
    pub fn take(&self) -> Option<T> {
        match self.0.lock() {
            Ok(mut slot) => slot.take(),
            Err(err) => {
                warn!("Mailbox lock poisoned: {}", err);
                None
            }
        }
    }
}

/// Fetch the panorama at `url`, decode it and build the environment cubemaps,
/// posting the outcome to `mailbox`.
pub fn spawn_environment_job(
    url: String,
    specular_size: u32,
    diffuse_size: u32,
    mailbox: Mailbox<AssetResult<EnvironmentCubemaps>>,
) {
    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async move {
            let result = match fetch_bytes(&url).await {
                Ok(bytes) => {
                    EnvironmentCubemaps::from_hdr_bytes(&bytes, specular_size, diffuse_size)
                }
                Err(err) => Err(err),
            };
            mailbox.post(result);
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        std::thread::spawn(move || {
            let result = fetch_bytes_blocking(&url).and_then(|bytes| {
                EnvironmentCubemaps::from_hdr_bytes(&bytes, specular_size, diffuse_size)
            });
            mailbox.post(result);
        });
    }
}

#[cfg(target_arch = "wasm32")]
fn js_err(url: &str, value: wasm_bindgen::JsValue) -> crate::error::AssetError {
    crate::error::AssetError::Request {
        url: url.to_string(),
        reason: format!("{:?}", value),
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_bytes(url: &str) -> AssetResult<Vec<u8>> {
    use crate::error::AssetError;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or_else(|| AssetError::Request {
        url: url.to_string(),
        reason: "no window".to_string(),
    })?;
    let response_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| js_err(url, e))?;
    let response: web_sys::Response = response_value.dyn_into().map_err(|e| js_err(url, e))?;

    if !response.ok() {
        return Err(AssetError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let buffer_promise = response.array_buffer().map_err(|e| js_err(url, e))?;
    let buffer = JsFuture::from(buffer_promise)
        .await
        .map_err(|e| js_err(url, e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

#[cfg(not(target_arch = "wasm32"))]
fn fetch_bytes_blocking(url: &str) -> AssetResult<Vec<u8>> {
    use crate::error::AssetError;

    let response = reqwest::blocking::get(url).map_err(|e| AssetError::request(url, e))?;
    let status = response.status();
    if !status.is_success() {
        return Err(AssetError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let bytes = response.bytes().map_err(|e| AssetError::request(url, e))?;
    Ok(bytes.to_vec())
}
