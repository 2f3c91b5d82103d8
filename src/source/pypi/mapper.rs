use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::source::types::PackageInfo;

#[derive(Deserialize)]
struct PackagePayload {
    info: InfoPayload,
    #[serde(default)]
    urls: Vec<UrlPayload>,
}

#[derive(Deserialize)]
struct InfoPayload {
    name: String,
    version: String,
    requires_python: Option<String>,
    #[serde(default)]
    requires_dist: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct UrlPayload {
    upload_time_iso_8601: DateTime<Utc>,
}

pub fn map_package_info(
    body: &serde_json::Value,
    url: &str,
    upstream: &str,
) -> Result<PackageInfo> {
    let payload: PackagePayload =
        serde_json::from_value(body.clone()).map_err(|e| AppError::Payload {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let requires_upstream = payload
        .info
        .requires_dist
        .as_deref()
        .and_then(|reqs| extract_requires_upstream(reqs, upstream));

    Ok(PackageInfo {
        name: payload.info.name,
        version: payload.info.version,
        // No uploaded files means no release date to report.
        released_at: payload.urls.first().map(|u| u.upload_time_iso_8601),
        requires_python: payload.info.requires_python,
        requires_upstream,
    })
}

/// Find the dist requirement that names the upstream package itself: the
/// package name followed immediately by `<`, `>` or a space. This keeps
/// `nautobot>=2.0,<3.0` and rejects `nautobot-plugin-x>=1.0`.
fn extract_requires_upstream(requires_dist: &[String], upstream: &str) -> Option<String> {
    requires_dist
        .iter()
        .find(|req| {
            req.strip_prefix(upstream).is_some_and(|rest| {
                rest.starts_with('<') || rest.starts_with('>') || rest.starts_with(' ')
            })
        })
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_package_info() {
        let body = json!({
            "info": {
                "name": "nautobot-golden-config",
                "version": "2.0.1",
                "requires_python": ">=3.8,<3.13",
                "requires_dist": [
                    "deepdiff>=5.5.0,<8",
                    "nautobot>=2.0.0,<3.0.0",
                    "nautobot-plugin-nornir>=2.0.0"
                ]
            },
            "urls": [
                {"upload_time_iso_8601": "2024-03-10T16:20:00.000000Z"},
                {"upload_time_iso_8601": "2024-03-10T16:20:05.000000Z"}
            ]
        });
        let info = map_package_info(&body, "http://test", "nautobot").unwrap();
        assert_eq!(info.version, "2.0.1");
        assert_eq!(
            info.requires_upstream.as_deref(),
            Some("nautobot>=2.0.0,<3.0.0")
        );
        assert!(info.released_at.is_some());
    }

    #[test]
    fn test_empty_urls_means_no_release_date() {
        let body = json!({
            "info": {
                "name": "pkg", "version": "0.1.0",
                "requires_python": null, "requires_dist": null
            },
            "urls": []
        });
        let info = map_package_info(&body, "http://test", "nautobot").unwrap();
        assert!(info.released_at.is_none());
        assert!(info.requires_upstream.is_none());
    }

    #[test]
    fn test_missing_info_is_payload_error() {
        let body = json!({"urls": []});
        assert!(map_package_info(&body, "http://test", "nautobot").is_err());
    }

    #[test]
    fn test_requires_upstream_prefix_discipline() {
        let reqs = vec![
            "nautobot-plugin-x>=1.0".to_string(),
            "nautobotty<2".to_string(),
            "nautobot >=1.6".to_string(),
        ];
        assert_eq!(
            extract_requires_upstream(&reqs, "nautobot").as_deref(),
            Some("nautobot >=1.6")
        );

        let bare = vec!["nautobot".to_string()];
        assert!(extract_requires_upstream(&bare, "nautobot").is_none());
    }
}
