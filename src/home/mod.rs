//! Home page renderer
//!
//! Turns a borrowed snapshot of the post collection into one [`Fragment`]
//! per post, newest first. Rendering is a pure function of its input: the
//! same posts always produce the same fragments.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::error::DataError;
use crate::helpers::{date_xml, format_date, post_url};

/// A post paired with its parsed date
#[derive(Debug, Clone, Copy)]
pub struct DatedPost<'a> {
    pub date: DateTime<FixedOffset>,
    pub post: &'a Post,
}

/// The rendered representation of one post on the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    /// Identifier of the post this fragment was built from
    pub id: String,
    /// Link text
    pub title: String,
    /// Link target, derived from the slug
    pub href: String,
    /// Human-readable date, e.g. "05 March 2024"
    pub date: String,
    /// Machine-readable date for the `<time>` element
    pub datetime: String,
    /// Present only when the post has a description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Order posts by date, newest first.
///
/// Posts with equal dates keep their input order. Any date that does not
/// parse aborts the whole ordering, since the post cannot be placed.
pub fn order_posts(posts: &[Post]) -> Result<Vec<DatedPost<'_>>, DataError> {
    let mut dated = posts
        .iter()
        .map(|post| post.parsed_date().map(|date| DatedPost { date, post }))
        .collect::<Result<Vec<_>, DataError>>()?;

    // `sort_by` is stable, which keeps ties in input order
    dated.sort_by(|a, b| b.date.cmp(&a.date));

    Ok(dated)
}

/// Renders the list of posts shown on the site's front page
#[derive(Debug, Clone, Copy)]
pub struct HomePage<'a> {
    config: &'a SiteConfig,
}

impl<'a> HomePage<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Render every post, most recent first
    pub fn render(&self, posts: &[Post]) -> Result<Vec<Fragment>, DataError> {
        Ok(order_posts(posts)?
            .iter()
            .map(|dated| self.fragment(dated))
            .collect())
    }

    /// Build the fragment for a single, already dated post
    pub fn fragment(&self, dated: &DatedPost<'_>) -> Fragment {
        let post = dated.post;
        Fragment {
            id: post.id.clone(),
            title: post.title.clone(),
            href: post_url(self.config, &post.slug),
            date: format_date(&dated.date, &self.config.date_format),
            datetime: date_xml(&dated.date),
            description: post.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, date: &str) -> Post {
        Post::new(id, id.to_uppercase(), date, id)
    }

    fn titles(fragments: &[Fragment]) -> Vec<&str> {
        fragments.iter().map(|f| f.title.as_str()).collect()
    }

    #[test]
    fn test_newest_first_with_ties_in_input_order() {
        let config = SiteConfig::default();
        let posts = vec![
            post("a", "2024-01-01"),
            post("b", "2024-03-01"),
            post("c", "2024-03-01"),
        ];

        let fragments = HomePage::new(&config).render(&posts).unwrap();
        assert_eq!(titles(&fragments), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_ties_follow_input_not_id() {
        let config = SiteConfig::default();
        let posts = vec![
            post("z", "2024-05-05"),
            post("m", "2024-05-05"),
            post("a", "2024-05-05"),
        ];

        let fragments = HomePage::new(&config).render(&posts).unwrap();
        assert_eq!(titles(&fragments), vec!["Z", "M", "A"]);
    }

    #[test]
    fn test_order_is_non_increasing_and_stable() {
        // Deterministic pseudo-random collections with many shared dates
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for round in 0..20 {
            let posts: Vec<Post> = (0..40)
                .map(|i| {
                    seed = seed
                        .wrapping_mul(6364136223846793005)
                        .wrapping_add(1442695040888963407);
                    let day = (seed >> 33) % 5 + 1;
                    post(&format!("p{}-{}", round, i), &format!("2024-02-0{}", day))
                })
                .collect();

            let ordered = order_posts(&posts).unwrap();
            assert_eq!(ordered.len(), posts.len());

            for pair in ordered.windows(2) {
                assert!(pair[0].date >= pair[1].date);
                if pair[0].date == pair[1].date {
                    let first = posts.iter().position(|p| p.id == pair[0].post.id);
                    let second = posts.iter().position(|p| p.id == pair[1].post.id);
                    assert!(first < second);
                }
            }
        }
    }

    #[test]
    fn test_dates_compare_across_offsets() {
        let config = SiteConfig::default();
        let posts = vec![
            post("tokyo", "2024-03-01T08:00:00+09:00"),
            post("london", "2024-03-01T00:30:00Z"),
        ];

        let fragments = HomePage::new(&config).render(&posts).unwrap();
        assert_eq!(titles(&fragments), vec!["LONDON", "TOKYO"]);
    }

    #[test]
    fn test_fragment_fields() {
        let config = SiteConfig {
            root: "/blog/".to_string(),
            ..SiteConfig::default()
        };
        let posts = vec![Post::new("1", "Spring", "2024-03-05", "spring")
            .with_description("Notes on the thaw")];

        let fragments = HomePage::new(&config).render(&posts).unwrap();
        assert_eq!(
            fragments,
            vec![Fragment {
                id: "1".to_string(),
                title: "Spring".to_string(),
                href: "/blog/spring/".to_string(),
                date: "05 March 2024".to_string(),
                datetime: "2024-03-05T00:00:00+00:00".to_string(),
                description: Some("Notes on the thaw".to_string()),
            }]
        );
    }

    #[test]
    fn test_missing_description_is_omitted() {
        let config = SiteConfig::default();
        let fragments = HomePage::new(&config)
            .render(&[post("bare", "2024-01-01")])
            .unwrap();

        assert_eq!(fragments[0].description, None);
        let json = serde_json::to_value(&fragments[0]).unwrap();
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_description_is_verbatim() {
        let config = SiteConfig::default();
        let text = "  <b>raw</b> & spaced  ";
        let posts = vec![post("x", "2024-01-01").with_description(text)];

        let fragments = HomePage::new(&config).render(&posts).unwrap();
        assert_eq!(fragments[0].description.as_deref(), Some(text));
    }

    #[test]
    fn test_render_is_idempotent() {
        let config = SiteConfig::default();
        let posts = vec![
            post("a", "2023-12-31 23:59:59"),
            post("b", "2024-01-01"),
            post("c", "2023-12-31 23:59:59").with_description("tie"),
        ];

        let home = HomePage::new(&config);
        assert_eq!(home.render(&posts).unwrap(), home.render(&posts).unwrap());
    }

    #[test]
    fn test_invalid_date_is_surfaced() {
        let config = SiteConfig::default();
        let posts = vec![post("ok", "2024-01-01"), post("bad", "31/31/2024")];

        assert_eq!(
            HomePage::new(&config).render(&posts),
            Err(DataError::InvalidDate {
                id: "bad".to_string(),
                value: "31/31/2024".to_string(),
            })
        );
    }

    #[test]
    fn test_empty_collection() {
        let config = SiteConfig::default();
        assert!(HomePage::new(&config).render(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_custom_date_format() {
        let config = SiteConfig {
            date_format: "YYYY-MM-DD".to_string(),
            ..SiteConfig::default()
        };
        let fragments = HomePage::new(&config)
            .render(&[post("a", "2024-03-05 12:00")])
            .unwrap();
        assert_eq!(fragments[0].date, "2024-03-05");
    }
}
