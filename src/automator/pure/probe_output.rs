// Probe macro output parsing (pure functions)

use std::sync::LazyLock;

use regex::Regex;

use crate::script::PROBE_MARKER;

static VERSION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ImageJ version:\s*(\S+)").expect("version pattern is valid"));

/// Version printed by the probe macro, e.g. `1.54f`
pub fn parse_imagej_version(stdout: &str) -> Option<String> {
    VERSION_LINE
        .captures(stdout)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn saw_probe_marker(stdout: &str) -> bool {
    stdout.lines().any(|l| l.trim() == PROBE_MARKER)
}
