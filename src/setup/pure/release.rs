// Release asset selection and version comparison (pure functions)

use semver::Version;

use crate::setup::types::ReleaseAsset;

fn normalized(name: &str) -> String {
    name.to_ascii_lowercase()
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' ' | '.'))
        .collect()
}

/// First `.jar` asset whose name, ignoring case and separators, mentions thunderstorm
pub fn pick_thunderstorm_asset(assets: &[ReleaseAsset]) -> Option<&ReleaseAsset> {
    assets.iter().find(|a| {
        a.name.to_ascii_lowercase().ends_with(".jar") && normalized(&a.name).contains("thunderstorm")
    })
}

/// Parse release tags like `v1.3` or `1.3.0-beta` as semver
pub fn parse_lenient_version(tag: &str) -> Option<Version> {
    let tag = tag.trim();
    let tag = tag.strip_prefix(['v', 'V']).unwrap_or(tag);
    let (core, pre) = match tag.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (tag, None),
    };

    let mut parts: Vec<&str> = core.split('.').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    while parts.len() < 3 {
        parts.push("0");
    }

    let mut text = parts.join(".");
    if let Some(pre) = pre {
        text.push('-');
        text.push_str(pre);
    }
    Version::parse(&text).ok()
}

/// Whether `installed` is at least `latest`; unparsable tags compare as strings
pub fn is_up_to_date(installed: &str, latest: &str) -> bool {
    match (parse_lenient_version(installed), parse_lenient_version(latest)) {
        (Some(installed), Some(latest)) => installed >= latest,
        _ => installed.trim() == latest.trim(),
    }
}
