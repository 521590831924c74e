//! Internationalization (i18n) support
//!
//! Built-in UI strings for every supported content language. Missing keys
//! fall back to English, then to the key itself.

use crate::config::Language;

type Table = &'static [(&'static str, &'static str)];

const EN: Table = &[
    ("share", "Share"),
    ("copy_link", "Copy Link"),
    ("copied", "Copied!"),
    ("share_on", "Share on"),
    ("posts", "Posts"),
    ("no_posts", "No posts available"),
    ("load_failed", "Failed to load"),
    ("error", "Error"),
    (
        "api_key_hint",
        "Make sure BLOGFLOW_API_KEY or NEXT_PUBLIC_BLOGFLOW_API_KEY is configured.",
    ),
    ("search_placeholder", "Search by title, excerpt, or category..."),
    ("search", "Search"),
    ("first", "First"),
    ("previous", "Previous"),
    ("next", "Next"),
    ("last", "Last"),
    ("page_info", "Page %page of %total (%count posts)"),
    ("reading_time", "%d min read"),
    ("close", "Close"),
    ("back", "Back to posts"),
];

const ZH: Table = &[
    ("share", "分享"),
    ("copy_link", "复制链接"),
    ("copied", "已复制！"),
    ("share_on", "分享到"),
    ("posts", "文章"),
    ("no_posts", "暂无文章"),
    ("load_failed", "加载失败"),
    ("error", "错误"),
    ("search_placeholder", "按标题、摘要或分类搜索..."),
    ("search", "搜索"),
    ("first", "首页"),
    ("previous", "上一页"),
    ("next", "下一页"),
    ("last", "末页"),
    ("page_info", "第 %page / %total 页（共 %count 篇）"),
    ("reading_time", "阅读约 %d 分钟"),
    ("close", "关闭"),
    ("back", "返回列表"),
];

const ES: Table = &[
    ("share", "Compartir"),
    ("copy_link", "Copiar enlace"),
    ("copied", "¡Copiado!"),
    ("share_on", "Compartir en"),
];

const FR: Table = &[
    ("share", "Partager"),
    ("copy_link", "Copier le lien"),
    ("copied", "Copié !"),
    ("share_on", "Partager sur"),
];

const DE: Table = &[
    ("share", "Teilen"),
    ("copy_link", "Link kopieren"),
    ("copied", "Kopiert!"),
    ("share_on", "Teilen auf"),
];

const JA: Table = &[
    ("share", "共有"),
    ("copy_link", "リンクをコピー"),
    ("copied", "コピーしました"),
    ("share_on", "共有先"),
];

const KO: Table = &[
    ("share", "공유"),
    ("copy_link", "링크 복사"),
    ("copied", "복사됨!"),
    ("share_on", "공유"),
];

fn table(language: Language) -> Table {
    match language {
        Language::En => EN,
        Language::Zh => ZH,
        Language::Es => ES,
        Language::Fr => FR,
        Language::De => DE,
        Language::Ja => JA,
        Language::Ko => KO,
    }
}

fn lookup(table: Table, key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Internationalization handler
#[derive(Debug, Clone, Copy)]
pub struct I18n {
    language: Language,
}

impl I18n {
    /// Create a new i18n handler
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Get the current language
    pub fn language(&self) -> Language {
        self.language
    }

    /// Get a translation by key
    pub fn get<'a>(&self, key: &'a str) -> &'a str {
        lookup(table(self.language), key)
            .or_else(|| lookup(EN, key))
            .unwrap_or(key)
    }

    /// Check if the current language has its own translation
    pub fn has(&self, key: &str) -> bool {
        lookup(table(self.language), key).is_some()
    }

    /// Get a translation with `%d` replaced by `count`
    pub fn get_count(&self, key: &str, count: usize) -> String {
        self.get(key).replace("%d", &count.to_string())
    }

    /// "Page X of Y (N posts)"
    pub fn page_info(&self, page: u32, total_pages: u32, total_count: u64) -> String {
        self.get("page_info")
            .replace("%page", &page.to_string())
            .replace("%total", &total_pages.to_string())
            .replace("%count", &total_count.to_string())
    }

    /// BCP 47 tag used for `lang` attributes
    pub fn locale(&self) -> &'static str {
        match self.language {
            Language::En => "en-US",
            Language::Zh => "zh-CN",
            Language::Es => "es-ES",
            Language::Fr => "fr-FR",
            Language::De => "de-DE",
            Language::Ja => "ja-JP",
            Language::Ko => "ko-KR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation() {
        let i18n = I18n::new(Language::Zh);
        assert_eq!(i18n.get("share"), "分享");
        assert_eq!(i18n.get("load_failed"), "加载失败");
    }

    #[test]
    fn test_fallback_to_english() {
        let i18n = I18n::new(Language::De);
        assert_eq!(i18n.get("share"), "Teilen");
        assert!(!i18n.has("no_posts"));
        assert_eq!(i18n.get("no_posts"), "No posts available");
        assert_eq!(i18n.get("unknown.key"), "unknown.key");
    }

    #[test]
    fn test_every_language_has_share_labels() {
        for language in Language::ALL {
            let i18n = I18n::new(*language);
            for key in ["share", "copy_link", "copied", "share_on"] {
                assert!(i18n.has(key), "{} missing {}", language, key);
            }
        }
    }

    #[test]
    fn test_interpolation() {
        let i18n = I18n::new(Language::En);
        assert_eq!(i18n.get_count("reading_time", 4), "4 min read");
        assert_eq!(i18n.page_info(2, 5, 57), "Page 2 of 5 (57 posts)");
    }
}
