//! HTML helper functions

use super::url::SharePlatform;
use crate::config::SiteConfiguration;
use crate::i18n::I18n;

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strip HTML tags from a string, leaving a space where each tag was
pub fn strip_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;

    for c in s.chars() {
        match c {
            '<' => {
                in_tag = true;
                result.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Truncate a string to a specified length
pub fn truncate(s: &str, length: usize, omission: Option<&str>) -> String {
    let omission = omission.unwrap_or("...");

    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s
            .chars()
            .take(length.saturating_sub(omission.chars().count()))
            .collect();
        format!("{}{}", truncated.trim_end(), omission)
    }
}

/// Generate Open Graph meta tags
pub fn open_graph(
    title: &str,
    description: &str,
    url: &str,
    image: Option<&str>,
    site_name: &str,
) -> String {
    let mut tags = vec![
        r#"<meta property="og:type" content="article">"#.to_string(),
        format!(
            r#"<meta property="og:title" content="{}">"#,
            html_escape(title)
        ),
        format!(r#"<meta property="og:url" content="{}">"#, html_escape(url)),
        format!(
            r#"<meta property="og:site_name" content="{}">"#,
            html_escape(site_name)
        ),
    ];

    if !description.is_empty() {
        tags.push(format!(
            r#"<meta property="og:description" content="{}">"#,
            html_escape(description)
        ));
    }

    if let Some(img) = image {
        tags.push(format!(
            r#"<meta property="og:image" content="{}">"#,
            html_escape(img)
        ));
    }

    tags.join("\n")
}

/// Generate meta generator tag
pub fn meta_generator() -> String {
    format!(
        r#"<meta name="generator" content="blogflow-showcase {}">"#,
        env!("CARGO_PKG_VERSION")
    )
}

/// Wrap a rendered body in a full HTML document themed by `config`.
///
/// `scroll_locked` pins the page body while an overlay is open.
pub fn page_document(
    config: &SiteConfiguration,
    i18n: &I18n,
    title: &str,
    head: &str,
    body: &str,
    scroll_locked: bool,
) -> String {
    let body_style = if scroll_locked {
        r#" style="overflow:hidden""#
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{generator}
{head}
</head>
<body class="blogflow-theme-{theme}"{body_style}>
<main class="container" style="{card_vars}">
{body}
</main>
</body>
</html>
"#,
        lang = i18n.locale(),
        title = html_escape(title),
        generator = meta_generator(),
        head = head,
        theme = config.theme,
        body_style = body_style,
        card_vars = html_escape(&config.card.css_variables()),
        body = body,
    )
}

/// Share buttons for a page plus a copy-link control
pub fn share_toolbar(url: &str, title: &str, i18n: &I18n) -> String {
    let mut html = format!(
        r#"<div class="bf-share"><span class="bf-share-label">{}:</span>"#,
        html_escape(i18n.get("share"))
    );

    for platform in SharePlatform::ALL {
        html.push_str(&format!(
            r#"<a class="bf-share-{slug}" href="{href}" target="_blank" rel="noopener" aria-label="{share_on} {name}">{name}</a>"#,
            slug = platform.name().to_lowercase(),
            href = html_escape(&platform.share_url(url, title)),
            share_on = html_escape(i18n.get("share_on")),
            name = platform.name(),
        ));
    }

    html.push_str(&format!(
        r#"<button type="button" class="bf-copy-link" data-url="{}" data-copied="{}">{}</button></div>"#,
        html_escape(url),
        html_escape(i18n.get("copied")),
        html_escape(i18n.get("copy_link")),
    ));
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Language, Theme};

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("<p>Hello <b>World</b></p>").split_whitespace().collect::<Vec<_>>(),
            vec!["Hello", "World"]
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 8, None), "Hello...");
        assert_eq!(truncate("Hi", 10, None), "Hi");
    }

    #[test]
    fn test_page_document() {
        let mut config = SiteConfiguration::default();
        config.theme = Theme::Dark;
        let i18n = I18n::new(Language::Zh);

        let html = page_document(&config, &i18n, "A & B", "", "<p>body</p>", true);
        assert!(html.contains(r#"<html lang="zh-CN">"#));
        assert!(html.contains("<title>A &amp; B</title>"));
        assert!(html.contains(r#"class="blogflow-theme-dark" style="overflow:hidden""#));
        assert!(html.contains("--blogflow-card-border-width:1px;"));

        let html = page_document(&config, &i18n, "t", "", "", false);
        assert!(!html.contains("overflow:hidden"));
    }

    #[test]
    fn test_share_toolbar() {
        let html = share_toolbar(
            "https://blog.example.com/posts/a",
            "Title",
            &I18n::new(Language::Fr),
        );
        assert!(html.contains("Partager:"));
        assert!(html.contains("facebook.com/sharer"));
        assert!(html.contains("linkedin.com/sharing"));
        assert!(html.contains("Copier le lien"));
        assert!(html.contains(r#"data-url="https://blog.example.com/posts/a""#));
    }
}
