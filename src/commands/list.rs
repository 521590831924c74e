//! List site content

use anyhow::Result;

use crate::config::Language;
use crate::content::{ContentSource, FixtureSource, ListingQuery};
use crate::Showcase;

/// List posts in one language, newest first
pub async fn run(showcase: &Showcase, language: Option<Language>) -> Result<()> {
    let source = showcase.content_source()?;
    let language = language.unwrap_or_else(|| showcase.config().language);

    for line in post_lines(&source, language).await? {
        println!("{}", line);
    }
    Ok(())
}

async fn post_lines(source: &FixtureSource, language: Language) -> Result<Vec<String>> {
    let all = ListingQuery::new(language, 1, source.len().max(1) as u32);
    let page = source.list_posts(&all).await?;

    let mut lines = vec![format!("Posts ({}, {}):", page.total_count, language.label())];
    lines.extend(page.items.iter().map(|post| {
        format!(
            "  {} - {} [{}]",
            post.created_at.format("%Y-%m-%d"),
            post.title,
            post.slug
        )
    }));
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{PostDetail, PostSummary};
    use chrono::{TimeZone, Utc};

    fn post(slug: &str, language: Language, day: u32) -> PostDetail {
        PostDetail {
            summary: PostSummary {
                slug: slug.to_string(),
                title: slug.to_uppercase(),
                excerpt: None,
                category: None,
                featured_image_url: None,
                language,
                created_at: Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap(),
            },
            content: String::new(),
            author: None,
            tags: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_post_lines() {
        let source = FixtureSource::new(vec![
            post("old", Language::En, 1),
            post("new", Language::En, 9),
            post("zh", Language::Zh, 5),
        ]);

        let lines = post_lines(&source, Language::En).await.unwrap();
        assert_eq!(
            lines,
            vec![
                "Posts (2, English):".to_string(),
                "  2024-05-09 - NEW [new]".to_string(),
                "  2024-05-01 - OLD [old]".to_string(),
            ]
        );
    }
}
