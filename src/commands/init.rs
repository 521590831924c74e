//! Initialize a new showcase site

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use std::fs;

use crate::config::Language;
use crate::content::{PostDetail, PostSummary};
use crate::Showcase;

fn sample_posts() -> Vec<PostDetail> {
    let now = Utc::now();
    let post = |slug: &str, title: &str, excerpt: &str, language: Language, days_ago: i64| {
        PostDetail {
            summary: PostSummary {
                slug: slug.to_string(),
                title: title.to_string(),
                excerpt: Some(excerpt.to_string()),
                category: Some("Getting Started".to_string()),
                featured_image_url: None,
                language,
                created_at: now - Duration::days(days_ago),
            },
            content: format!("<p>{}</p>", excerpt),
            author: Some("BlogFlow".to_string()),
            tags: vec!["blogflow".to_string()],
        }
    };

    vec![
        post(
            "hello-world",
            "Hello World",
            "Welcome to your BlogFlow showcase. Edit the look of this page from the admin panel.",
            Language::En,
            0,
        ),
        post(
            "customizing-the-showcase",
            "Customizing the Showcase",
            "Themes, view modes and card styles are stored in config.json.",
            Language::En,
            1,
        ),
        post(
            "hello-world",
            "你好，世界",
            "欢迎使用 BlogFlow 展示站点。",
            Language::Zh,
            0,
        ),
    ]
}

/// Write the default config document and, if absent, a sample posts file.
///
/// An existing config document is only replaced when `force` is set.
pub fn run(showcase: &Showcase, force: bool) -> Result<()> {
    fs::create_dir_all(&showcase.base_dir)
        .with_context(|| format!("Failed to create {:?}", showcase.base_dir))?;

    if showcase.store.init(force)? {
        println!("Wrote default config to {:?}", showcase.config_path);
    } else {
        println!(
            "Config {:?} already exists, use --force to overwrite",
            showcase.config_path
        );
    }

    if showcase.posts_path.exists() {
        tracing::debug!("Keeping existing posts file {:?}", showcase.posts_path);
    } else {
        let content = serde_json::to_string_pretty(&sample_posts())?;
        fs::write(&showcase.posts_path, content + "\n")
            .with_context(|| format!("Failed to write {:?}", showcase.posts_path))?;
        println!("Wrote sample posts to {:?}", showcase.posts_path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SiteConfiguration, Theme};
    use tempfile::TempDir;

    #[test]
    fn test_init_site() {
        let dir = TempDir::new().unwrap();
        let showcase = Showcase::new(dir.path().join("blog"));
        run(&showcase, false).unwrap();

        assert_eq!(showcase.store.load().unwrap(), SiteConfiguration::default());
        assert_eq!(showcase.content_source().unwrap().len(), 3);
    }

    #[test]
    fn test_init_keeps_existing_config_without_force() {
        let dir = TempDir::new().unwrap();
        let showcase = Showcase::new(dir.path());
        let mut config = SiteConfiguration::default();
        config.theme = Theme::Dark;
        showcase.store.save(&config).unwrap();

        run(&showcase, false).unwrap();
        assert_eq!(showcase.store.load().unwrap().theme, Theme::Dark);

        run(&showcase, true).unwrap();
        assert_eq!(showcase.store.load().unwrap().theme, Theme::Default);
    }
}
