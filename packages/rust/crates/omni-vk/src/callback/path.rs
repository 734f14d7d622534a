pub const DEFAULT_CALLBACK_PATH: &str = "/vk/callback";

pub(super) fn normalize_callback_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        DEFAULT_CALLBACK_PATH.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_empty_and_relative_paths() {
        assert_eq!(normalize_callback_path("  "), "/vk/callback");
        assert_eq!(normalize_callback_path("hooks/vk"), "/hooks/vk");
        assert_eq!(normalize_callback_path("/vk"), "/vk");
    }
}
