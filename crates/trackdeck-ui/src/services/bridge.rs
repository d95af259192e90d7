//! `window.api` adapter.
//!
//! # Design
//! - Each call looks up `window.api.<namespace>.<method>` at call time, so a
//!   shell that exposes the API late still works.
//! - Responses are stringified and decoded through the models crate; nothing
//!   here interprets payloads beyond picking the right reply type.

use crate::core::bridge::{AppsBridge, BridgeError, MarketplaceBridge};
use async_trait::async_trait;
use gloo::console;
use gloo::utils::window;
use js_sys::{Array, Function, JSON, Promise, Reflect};
use serde::de::DeserializeOwned;
use serde_json::Value;
use trackdeck_bridge_models::{
    AppTracker, AppTrackerReply, AppTrackersReply, DocumentCountReply, DocumentStats,
    IconPathReply, MessageReply, Tracker, TrackerListReply, decode_envelope,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

const APPS: &str = "apps";
const MARKETPLACE: &str = "trackerMarketplace";

/// Bridge backed by the preload script's `window.api` object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct WindowBridge;

impl WindowBridge {
    async fn call_raw(
        &self,
        namespace: &str,
        method: &str,
        args: &[JsValue],
    ) -> Result<String, BridgeError> {
        let api = Reflect::get(&window(), &JsValue::from_str("api"))
            .map_err(|_| BridgeError::Unavailable)?;
        let scope = Reflect::get(&api, &JsValue::from_str(namespace))
            .ok()
            .filter(|value| value.is_object())
            .ok_or(BridgeError::Unavailable)?;
        let function = Reflect::get(&scope, &JsValue::from_str(method))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
            .ok_or(BridgeError::Unavailable)?;
        let argv: Array = args.iter().collect();
        let returned = function.apply(&scope, &argv).map_err(transport_error)?;
        let resolved = JsFuture::from(Promise::resolve(&returned))
            .await
            .map_err(transport_error)?;
        if resolved.is_undefined() {
            return Ok("null".to_string());
        }
        let text = JSON::stringify(&resolved).map_err(transport_error)?;
        Ok(String::from(text))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        namespace: &str,
        method: &str,
        args: &[JsValue],
    ) -> Result<T, BridgeError> {
        let raw = match self.call_raw(namespace, method, args).await {
            Ok(raw) => raw,
            Err(err) => {
                console::error!(format!("{namespace}.{method} failed: {err}"));
                return Err(err);
            }
        };
        decode_envelope::<T>(&raw).map_err(|err| {
            let err = BridgeError::from(err);
            console::error!(format!("{namespace}.{method} rejected: {err}"));
            err
        })
    }
}

fn transport_error(value: JsValue) -> BridgeError {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|error| String::from(error.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| "unknown JavaScript error".to_string());
    BridgeError::Transport(message)
}

#[async_trait(?Send)]
impl AppsBridge for WindowBridge {
    async fn document_count(&self) -> Result<DocumentStats, BridgeError> {
        let reply: DocumentCountReply = self.call(APPS, "getDocumentCount", &[]).await?;
        Ok(reply.stats)
    }

    async fn app_trackers(&self) -> Result<Vec<AppTracker>, BridgeError> {
        let reply: AppTrackersReply = self.call(APPS, "getAppTrackers", &[]).await?;
        Ok(reply.app_trackers)
    }

    async fn app_icon_path(&self, id: &str, path: Option<&str>) -> Result<String, BridgeError> {
        let mut args = vec![JsValue::from_str(id)];
        if let Some(path) = path {
            args.push(JsValue::from_str(path));
        }
        let reply: IconPathReply = self.call(APPS, "getAppIconPath", &args).await?;
        Ok(reply.into_path())
    }

    async fn toggle_app_tracker(&self, id: &str) -> Result<AppTracker, BridgeError> {
        let reply: AppTrackerReply = self
            .call(APPS, "toggleAppTracker", &[JsValue::from_str(id)])
            .await?;
        Ok(reply.app_tracker)
    }

    async fn uninstall_app_tracker(&self, id: &str) -> Result<Option<String>, BridgeError> {
        let reply: MessageReply = self
            .call(APPS, "uninstallAppTracker", &[JsValue::from_str(id)])
            .await?;
        Ok(reply.message)
    }

    async fn update_app_tracker(&self, id: &str) -> Result<AppTracker, BridgeError> {
        let reply: AppTrackerReply = self
            .call(APPS, "updateAppTracker", &[JsValue::from_str(id)])
            .await?;
        Ok(reply.app_tracker)
    }

    async fn cleanup_documents(&self) -> Result<Option<String>, BridgeError> {
        let reply: MessageReply = self.call(APPS, "cleanupDocuments", &[]).await?;
        Ok(reply.message)
    }
}

#[async_trait(?Send)]
impl MarketplaceBridge for WindowBridge {
    async fn tracker_list(&self) -> Result<Vec<Tracker>, BridgeError> {
        let reply: TrackerListReply = self.call(MARKETPLACE, "getTrackerList", &[]).await?;
        Ok(reply.trackers)
    }

    async fn install_tracker(&self, id: &str) -> Result<Value, BridgeError> {
        self.call(MARKETPLACE, "installTracker", &[JsValue::from_str(id)])
            .await
    }
}
