//! Static defaults and generated directory settings

use serde_json::Value;

/// Directory settings derived from the project root, with the suffix appended
/// to it. `None` is the root itself.
pub const GENERATED_PATHS: &[(&str, Option<&str>)] = &[
    ("dir.root", None),
    ("dir.var", Some("/var")),
    ("dir.cache", Some("/var/cache")),
    ("dir.storage", Some("/storage")),
    ("dir.uploads", Some("/storage/uploads")),
    ("dir.assets", Some("/assets")),
    ("dir.public", Some("/public")),
    ("dir.public.assets", Some("/public/assets")),
    ("dir.public.uploads", Some("/public/uploads")),
];

/// Fallbacks used when a setting is neither stored nor generated
pub const DEFAULTS: &[(&str, &str)] = &[("unusual.default.value", "dingleberries")];

/// The suffix for a generated setting, `None` when the setting is not generated
pub fn generated_suffix(setting: &str) -> Option<Option<&'static str>> {
    GENERATED_PATHS
        .iter()
        .find(|(name, _)| *name == setting)
        .map(|(_, suffix)| *suffix)
}

pub fn default_value(setting: &str) -> Option<Value> {
    DEFAULTS
        .iter()
        .find(|(name, _)| *name == setting)
        .map(|(_, value)| Value::String((*value).to_string()))
}

/// Join `root` and `suffix` into a forward-slash path without empty, `.`
/// or trailing segments
pub fn normalize_path(root: &str, suffix: Option<&str>) -> String {
    let joined = match suffix {
        Some(suffix) => format!("{}/{}", root, suffix),
        None => root.to_string(),
    }
    .replace('\\', "/");

    let body = joined
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");

    if joined.starts_with('/') {
        format!("/{}", body)
    } else if body.is_empty() {
        ".".to_string()
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_suffix_lookup() {
        assert_eq!(generated_suffix("dir.root"), Some(None));
        assert_eq!(generated_suffix("dir.cache"), Some(Some("/var/cache")));
        assert_eq!(generated_suffix("dir.unknown"), None);
    }

    #[test]
    fn test_default_value_lookup() {
        assert_eq!(
            default_value("unusual.default.value"),
            Some(Value::String("dingleberries".to_string()))
        );
        assert_eq!(default_value("dir.cache"), None);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/srv/app", Some("/var/cache")), "/srv/app/var/cache");
        assert_eq!(normalize_path("/srv/app/", Some("/var")), "/srv/app/var");
        assert_eq!(normalize_path("/srv/app/", None), "/srv/app");
        assert_eq!(normalize_path("C:\\app", Some("/public")), "C:/app/public");
        assert_eq!(normalize_path("./app", Some("assets")), "app/assets");
        assert_eq!(normalize_path("/", None), "/");
        assert_eq!(normalize_path(".", None), ".");
    }
}
