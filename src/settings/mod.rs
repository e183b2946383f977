//! Settings bundle export and apply.
//!
//! A bundle is a JSON artifact holding some subset of the four exportable
//! categories. Export is gated by the [`ExportMask`]; apply walks the
//! incoming categories, patches the live configuration and narrates every
//! key through the feedback surface.

use anyhow::Result;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::export::ExportMask;
use crate::feedback::{ChangeStatus, FeedbackSurface, LogTag};

/// Exportable categories, in apply/export order.
pub const CATEGORIES: [&str; 4] = ["parameters", "keybinds", "discord", "configuration"];

/// Serialize the selected categories of `config` into a bundle.
///
/// `parameters` is always present, matching the latched mask field.
pub fn export_json(config: &AppConfig, mask: &ExportMask) -> Result<Value> {
    let full = serde_json::to_value(config)?;
    let mut out = serde_json::Map::new();

    out.insert("parameters".to_string(), full["parameters"].clone());
    if mask.keybinds {
        out.insert("keybinds".to_string(), full["keybinds"].clone());
    }
    if mask.discord {
        out.insert("discord".to_string(), full["discord"].clone());
    }
    if mask.configuration {
        out.insert("configuration".to_string(), full["configuration"].clone());
    }
    Ok(Value::Object(out))
}

/// Apply an incoming bundle to `config`, reporting through `surface`.
///
/// Unknown top-level keys are ignored; a category that fails to
/// deserialize marks all of its keys failed and leaves that section of the
/// configuration untouched. The surface ends in its terminal phase either
/// way.
pub fn apply_bundle(config: &mut AppConfig, incoming: &Value, surface: &Arc<Mutex<FeedbackSurface>>) {
    let categories: Vec<&str> = CATEGORIES
        .iter()
        .copied()
        .filter(|c| incoming.get(c).is_some())
        .collect();

    if categories.is_empty() {
        surface
            .lock()
            .show_error("Apply failed", "bundle contains no known categories");
        return;
    }

    let current = match serde_json::to_value(&*config) {
        Ok(v) => v,
        Err(e) => {
            surface.lock().show_error("Apply failed", &e.to_string());
            return;
        }
    };

    let mut succeeded = 0usize;
    let mut failed = 0usize;
    let mut total = 0usize;

    for (i, category) in categories.iter().enumerate() {
        let new_value = &incoming[*category];
        let old_pairs = flatten(current.get(*category).unwrap_or(&Value::Null));
        let new_pairs = flatten(new_value);
        let applied = apply_category(config, category, new_value).is_ok();

        let mut s = surface.lock();
        s.add_section(category);
        for (name, new_str) in &new_pairs {
            total += 1;
            let old_str = old_pairs
                .get(name)
                .cloned()
                .unwrap_or_else(|| "unset".to_string());
            if applied {
                succeeded += 1;
                s.add_change_entry(name, &old_str, new_str, ChangeStatus::Applied);
            } else {
                failed += 1;
                s.add_change_entry(name, &old_str, new_str, ChangeStatus::Failed);
            }
        }
        if !applied {
            s.add_text(
                &format!("Category '{category}' could not be parsed; section left unchanged"),
                LogTag::Warning,
            );
        }
        let pct = ((i + 1) as f32 / categories.len() as f32) * 100.0;
        s.update_progress(pct, None);
    }

    info!("settings apply finished: {succeeded} applied, {failed} failed");
    let mut s = surface.lock();
    s.add_summary_stats(succeeded, failed, total);
    s.operation_complete(failed == 0);
}

fn apply_category(config: &mut AppConfig, category: &str, value: &Value) -> Result<()> {
    match category {
        "parameters" => config.parameters = serde_json::from_value(value.clone())?,
        "keybinds" => config.keybinds = serde_json::from_value(value.clone())?,
        "discord" => config.discord = serde_json::from_value(value.clone())?,
        "configuration" => config.configuration = serde_json::from_value(value.clone())?,
        other => anyhow::bail!("unknown category '{other}'"),
    }
    Ok(())
}

/// Flatten a category value into dotted-name → display-string pairs.
fn flatten(value: &Value) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    flatten_into("", value, &mut out);
    out
}

fn flatten_into(prefix: &str, value: &Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten_into(&key, v, out);
            }
        }
        Value::Null => {
            out.insert(prefix.to_string(), "unset".to_string());
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::SurfacePhase;

    fn shown_surface() -> Arc<Mutex<FeedbackSurface>> {
        let mut surface = FeedbackSurface::new("Applying settings");
        surface.show_window();
        Arc::new(Mutex::new(surface))
    }

    #[test]
    fn test_export_gating() {
        let config = AppConfig::default();

        let minimal = export_json(&config, &ExportMask::from_toggles(false, false, false)).unwrap();
        assert!(minimal.get("parameters").is_some());
        assert!(minimal.get("keybinds").is_none());
        assert!(minimal.get("discord").is_none());
        assert!(minimal.get("configuration").is_none());

        let wider = export_json(&config, &ExportMask::from_toggles(true, true, false)).unwrap();
        assert!(wider.get("parameters").is_some());
        assert!(wider.get("keybinds").is_some());
        assert!(wider.get("discord").is_some());
        assert!(wider.get("configuration").is_none());
    }

    #[test]
    fn test_apply_patches_config_and_reports() {
        let mut config = AppConfig::default();
        let surface = shown_surface();
        let incoming = serde_json::json!({
            "parameters": {
                "capture_region": null,
                "tick_interval_ms": 50,
                "auto_click": false,
                "click_delay_ms": 200,
            }
        });

        apply_bundle(&mut config, &incoming, &surface);

        assert_eq!(config.parameters.tick_interval_ms, 50);

        let s = surface.lock();
        assert_eq!(s.phase(), SurfacePhase::Terminal);
        assert_eq!(s.completion(), Some(true));
        assert_eq!(s.progress(), 100.0);

        // tick_interval_ms changed, the other three keys are unchanged.
        let changed: Vec<_> = s
            .entries()
            .iter()
            .filter(|e| e.tag == LogTag::Success && e.text.contains('\u{2192}'))
            .collect();
        assert_eq!(changed.len(), 1);
        assert!(changed[0].text.contains("tick_interval_ms"));
        let unchanged = s
            .entries()
            .iter()
            .filter(|e| e.tag == LogTag::Unchanged)
            .count();
        assert_eq!(unchanged, 3);
        assert!(s.entries().iter().any(|e| e.text == "No failures detected"));
    }

    #[test]
    fn test_apply_unparsable_category_fails_cleanly() {
        let mut config = AppConfig::default();
        let before = config.clone();
        let surface = shown_surface();
        let incoming = serde_json::json!({
            "discord": { "enabled": "definitely" }
        });

        apply_bundle(&mut config, &incoming, &surface);

        assert_eq!(config, before);
        let s = surface.lock();
        assert_eq!(s.completion(), Some(false));
        assert!(s.entries().iter().any(|e| e.text.contains("Failed items")));
    }

    #[test]
    fn test_apply_empty_bundle_is_an_error() {
        let mut config = AppConfig::default();
        let surface = shown_surface();

        apply_bundle(&mut config, &serde_json::json!({"bogus": 1}), &surface);

        let s = surface.lock();
        assert_eq!(s.completion(), Some(false));
    }

    #[test]
    fn test_apply_after_close_leaves_surface_alone() {
        let mut config = AppConfig::default();
        let surface = shown_surface();
        surface.lock().close_window();

        let incoming = serde_json::json!({ "keybinds": { "dig": "F9" } });
        apply_bundle(&mut config, &incoming, &surface);

        // Config is still patched; the dismissed surface stays silent.
        assert_eq!(config.keybinds.get("dig").unwrap(), "F9");
        let s = surface.lock();
        assert_eq!(s.phase(), SurfacePhase::Closed);
        assert!(s.entries().is_empty());
    }

    #[test]
    fn test_flatten_nested_and_scalars() {
        let value = serde_json::json!({
            "a": { "b": 1, "c": "two" },
            "d": true,
            "e": null,
        });
        let pairs = flatten(&value);

        assert_eq!(pairs.get("a.b").unwrap(), "1");
        assert_eq!(pairs.get("a.c").unwrap(), "two");
        assert_eq!(pairs.get("d").unwrap(), "true");
        assert_eq!(pairs.get("e").unwrap(), "unset");
    }
}
