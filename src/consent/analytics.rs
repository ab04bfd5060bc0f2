use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Date;
use web_sys::{window, Document, HtmlScriptElement};

use crate::config;
use crate::consent::store::AnalyticsSink;
use crate::error::SiteError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = window, js_name = gtag, catch)]
    fn gtag(command: &str, target: &JsValue, params: &JsValue) -> Result<(), JsValue>;
}

const GTAG_BOOTSTRAP: &str =
    "window.dataLayer = window.dataLayer || []; function gtag(){dataLayer.push(arguments);}";

/// Google tag loader. Nothing is injected into the page until consent for
/// analytics has been given.
pub struct GtagAnalytics {
    measurement_id: &'static str,
}

impl GtagAnalytics {
    pub fn new() -> Self {
        Self {
            measurement_id: config::ANALYTICS_MEASUREMENT_ID,
        }
    }

    fn inject_script(
        document: &Document,
        configure: impl FnOnce(&HtmlScriptElement),
    ) -> Result<(), SiteError> {
        let script = document
            .create_element("script")
            .map_err(|e| SiteError::from_js("create script", e))?
            .dyn_into::<HtmlScriptElement>()
            .map_err(|_| SiteError::Browser("script element"))?;
        configure(&script);
        document
            .head()
            .ok_or(SiteError::Browser("document head"))?
            .append_child(&script)
            .map_err(|e| SiteError::from_js("append script", e))?;
        Ok(())
    }
}

fn to_js(params: &Value) -> Result<JsValue, SiteError> {
    params
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| SiteError::Analytics(e.to_string()))
}

impl AnalyticsSink for GtagAnalytics {
    fn initialize(&self) -> Result<(), SiteError> {
        let document = window()
            .and_then(|w| w.document())
            .ok_or(SiteError::Browser("document"))?;

        Self::inject_script(&document, |script| {
            let _ = script.set_text(GTAG_BOOTSTRAP);
        })?;
        let src = format!(
            "https://www.googletagmanager.com/gtag/js?id={}",
            urlencoding::encode(self.measurement_id)
        );
        Self::inject_script(&document, |script| {
            script.set_async(true);
            script.set_src(&src);
        })?;

        gtag("js", &Date::new_0().into(), &JsValue::UNDEFINED)
            .map_err(|e| SiteError::from_js("gtag js", e))?;
        gtag(
            "config",
            &JsValue::from_str(self.measurement_id),
            &to_js(&json!({ "anonymize_ip": true, "send_page_view": false }))?,
        )
        .map_err(|e| SiteError::from_js("gtag config", e))
    }

    fn report(&self, event: &str, params: &Value) -> Result<(), SiteError> {
        gtag("event", &JsValue::from_str(event), &to_js(params)?)
            .map_err(|e| SiteError::from_js("gtag event", e))
    }
}

pub fn page_view(path: &str) -> (&'static str, Value) {
    ("page_view", json!({ "page_path": path }))
}
