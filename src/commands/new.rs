//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::helpers::is_contained_path;
use crate::Site;

const FALLBACK_SCAFFOLD: &str = "---\ntitle: {{ title }}\ndate: {{ date }}\n---\n";

/// Create a new post from the scaffold and return its path
pub fn create_post(
    site: &Site,
    title: &str,
    path: Option<&str>,
    description: Option<&str>,
) -> Result<PathBuf> {
    let now = chrono::Local::now();
    let target_dir = site.source_dir.join("_posts");
    fs::create_dir_all(&target_dir)?;

    let filename = match path {
        Some(p) => {
            let p = p.trim_end_matches(".md");
            if !is_contained_path(p) {
                anyhow::bail!("Post path must stay inside the posts directory: {:?}", p);
            }
            format!("{}.md", p)
        }
        None => site
            .config
            .new_post_name
            .replace(":title", &slug::slugify(title))
            .replace(":year", &now.format("%Y").to_string())
            .replace(":month", &now.format("%m").to_string())
            .replace(":day", &now.format("%d").to_string())
            .replace(":i_month", &now.format("%-m").to_string())
            .replace(":i_day", &now.format("%-d").to_string()),
    };

    let file_path = target_dir.join(filename);
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let scaffold_path = site.base_dir.join("scaffolds/post.md");
    let scaffold = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)?
    } else {
        FALLBACK_SCAFFOLD.to_string()
    };

    let content = fill_scaffold(
        &scaffold,
        title,
        &now.format("%Y-%m-%d %H:%M:%S").to_string(),
        description,
    );

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Substitute scaffold variables. Values are quoted so YAML reads them as
/// text; a scaffold line whose value ends up empty is dropped.
fn fill_scaffold(scaffold: &str, title: &str, date: &str, description: Option<&str>) -> String {
    let mut out = String::with_capacity(scaffold.len() + title.len());
    for line in scaffold.split_inclusive('\n') {
        if line.contains("{{ description }}") {
            match description {
                Some(d) => out.push_str(&line.replace("{{ description }}", &yaml_quote(d))),
                None => continue,
            }
        } else {
            out.push_str(
                &line
                    .replace("{{ title }}", &yaml_quote(title))
                    .replace("{{ date }}", date),
            );
        }
    }
    out
}

fn yaml_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;
    use tempfile::TempDir;

    #[test]
    fn test_create_post_with_description() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();

        let path = create_post(&site, "It's: Alive", None, Some("A short note")).unwrap();
        assert_eq!(path, site.source_dir.join("_posts/it-s-alive.md"));

        let content = fs::read_to_string(&path).unwrap();
        let (fm, _) = FrontMatter::parse(&content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("It's: Alive"));
        assert!(fm.date.is_some());
    }

    #[test]
    fn test_scaffold_drops_missing_description() {
        let scaffold = "---\ntitle: {{ title }}\ndate: {{ date }}\ndescription: {{ description }}\n---\n";
        let filled = fill_scaffold(scaffold, "T", "2024-03-05 00:00:00", None);
        assert_eq!(filled, "---\ntitle: 'T'\ndate: 2024-03-05 00:00:00\n---\n");

        let filled = fill_scaffold(scaffold, "T", "2024-03-05 00:00:00", Some("d"));
        assert!(filled.contains("description: 'd'\n"));
    }

    #[test]
    fn test_create_post_rejects_escaping_path() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();

        assert!(create_post(&site, "Out", Some("../../x"), None).is_err());
        assert!(create_post(&site, "Out", Some("/abs"), None).is_err());
        assert!(!dir.path().join("x.md").exists());
        assert!(!site.source_dir.join("x.md").exists());
    }

    #[test]
    fn test_create_post_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();

        create_post(&site, "Twice", Some("custom/name"), None).unwrap();
        assert!(site.source_dir.join("_posts/custom/name.md").exists());
        assert!(create_post(&site, "Twice", Some("custom/name"), None).is_err());
    }
}
