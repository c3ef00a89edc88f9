//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/style.css") // -> "/blog/css/style.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Whether a relative path stays inside the directory it is joined onto:
/// no `.`, `..` or empty segments, and no backslashes
pub fn is_contained_path(path: &str) -> bool {
    !path.is_empty()
        && !path.contains('\\')
        && path
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

/// Link target for a post slug: `<root><slug>/`
pub fn post_url(config: &SiteConfig, slug: &str) -> String {
    url_for(config, &format!("{}/", slug.trim_matches('/')))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com/".to_string(),
            root: "/blog/".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/css/style.css"), "/blog/css/style.css");
        assert_eq!(url_for(&config, ""), "/blog/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/about/"),
            "https://example.com/blog/about/"
        );
    }

    #[test]
    fn test_is_contained_path() {
        assert!(is_contained_path("hello-world"));
        assert!(is_contained_path("notes/intro"));
        assert!(is_contained_path("v1.2"));
        assert!(!is_contained_path(".."));
        assert!(!is_contained_path("../escaped"));
        assert!(!is_contained_path("a/./b"));
        assert!(!is_contained_path("a//b"));
        assert!(!is_contained_path("a\\b"));
        assert!(!is_contained_path(""));
    }

    #[test]
    fn test_post_url() {
        let config = test_config();
        assert_eq!(post_url(&config, "hello-world"), "/blog/hello-world/");
        assert_eq!(post_url(&config, "/notes/intro/"), "/blog/notes/intro/");
        assert_eq!(post_url(&SiteConfig::default(), "a"), "/a/");
    }
}
