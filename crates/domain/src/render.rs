//! Rendering of decoded status responses into the page view model.

use crate::indicator::Indicator;
use crate::page::Page;
use crate::status::{AdapterList, ApiInfo, DetectorConfig, DetectorStatus, StatusResponse};
use crate::unit_table::render_units;

/// Element ids of the single-value cells.
pub mod ids {
    pub const API_VERSION: &str = "api-version";
    pub const API_ADAPTERS: &str = "api-adapters";
    pub const EXPOSURE: &str = "get-exposure";
    pub const PERIOD: &str = "get-period";
    pub const NIMAGES: &str = "get-nimages";
    pub const ACQUIRE: &str = "get-acquire";
    pub const STATE: &str = "get-state";
}

/// Round to three decimal places and drop trailing zeros (`0.00251` → `0.003`).
#[must_use]
pub fn round3(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    rounded.to_string()
}

/// Render `response` into `page`. Unit tables are padded to `table_rows`.
pub fn apply(page: &mut Page, response: &StatusResponse, table_rows: usize) {
    match response {
        StatusResponse::ApiVersion(info) => render_api_info(page, info),
        StatusResponse::Adapters(list) => render_adapters(page, list),
        StatusResponse::DetectorConfig(config) => render_detector_config(page, config),
        StatusResponse::DetectorStatus(status) => render_detector_status(page, status),
        StatusResponse::Receivers(units) => {
            render_units(page, units, table_rows);
        }
        StatusResponse::Processors(units) => {
            render_units(page, units, table_rows);
        }
    }
}

fn render_api_info(page: &mut Page, info: &ApiInfo) {
    page.set_text(ids::API_VERSION, info.api.clone());
}

fn render_adapters(page: &mut Page, list: &AdapterList) {
    page.set_text(ids::API_ADAPTERS, list.adapters.join(", "));
}

fn render_detector_config(page: &mut Page, config: &DetectorConfig) {
    page.set_text(ids::EXPOSURE, round3(config.count_time.value));
    page.set_text(ids::PERIOD, round3(config.frame_time.value));
    page.set_text(ids::NIMAGES, config.nimages.value.to_string());
}

fn render_detector_status(page: &mut Page, status: &DetectorStatus) {
    page.set_indicator(
        ids::ACQUIRE,
        Indicator::healthy(status.acquisition_complete.value),
    );
    match &status.state {
        Some(state) => page.set_text(ids::STATE, state.value.clone()),
        None => page.clear(ids::STATE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::StatusTarget;
    use serde_json::json;

    fn parse(target: StatusTarget, body: serde_json::Value) -> StatusResponse {
        StatusResponse::parse(target, body).unwrap()
    }

    #[test]
    fn should_round_to_three_decimals() {
        assert_eq!(round3(0.002_51), "0.003");
        assert_eq!(round3(0.1), "0.1");
        assert_eq!(round3(1.0), "1");
        assert_eq!(round3(12.345_67), "12.346");
    }

    #[test]
    fn should_render_rounded_exposure_and_period() {
        let mut page = Page::new();
        let response = parse(
            StatusTarget::DetectorConfig,
            json!({
                "count_time": {"value": 0.00251},
                "frame_time": {"value": 0.0999999},
                "nimages": {"value": 7}
            }),
        );
        apply(&mut page, &response, 0);

        assert_eq!(page.text(ids::EXPOSURE), "0.003");
        assert_eq!(page.text(ids::PERIOD), "0.1");
        assert_eq!(page.text(ids::NIMAGES), "7");
    }

    #[test]
    fn should_render_acquisition_indicator_and_state() {
        let mut page = Page::new();
        let response = parse(
            StatusTarget::DetectorStatus,
            json!({"acquisition_complete": {"value": true}, "state": {"value": "idle"}}),
        );
        apply(&mut page, &response, 0);

        assert!(page.indicator(ids::ACQUIRE).unwrap().on);
        assert_eq!(page.text(ids::STATE), "idle");
    }

    #[test]
    fn should_clear_state_when_not_reported() {
        let mut page = Page::new();
        page.set_text(ids::STATE, "ready");
        let response = parse(
            StatusTarget::DetectorStatus,
            json!({"acquisition_complete": {"value": 0}}),
        );
        apply(&mut page, &response, 0);

        assert!(!page.indicator(ids::ACQUIRE).unwrap().on);
        assert_eq!(page.text(ids::STATE), "");
    }

    #[test]
    fn should_join_adapter_names() {
        let mut page = Page::new();
        let response = parse(
            StatusTarget::Adapters,
            json!({"adapters": ["eiger", "fr", "fp"]}),
        );
        apply(&mut page, &response, 0);
        assert_eq!(page.text(ids::API_ADAPTERS), "eiger, fr, fp");
    }

    #[test]
    fn should_render_api_version() {
        let mut page = Page::new();
        apply(&mut page, &parse(StatusTarget::ApiVersion, json!({"api": 0.1})), 0);
        assert_eq!(page.text(ids::API_VERSION), "0.1");
    }

    #[test]
    fn should_pad_unit_tables_to_row_count() {
        let mut page = Page::new();
        apply(
            &mut page,
            &parse(StatusTarget::Receivers, json!({"value": []})),
            2,
        );
        assert!(page.get("fr2-connected").unwrap().is_empty());
        assert!(page.get("fr3-connected").is_none());
    }
}
