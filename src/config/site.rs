//! Site configuration (config.json)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use super::ConfigError;

/// Fields a candidate document must carry as non-empty strings
pub const REQUIRED_FIELDS: [&str; 3] = ["title", "theme", "viewMode"];

/// Declare a closed set of named options with a JSON name and a UI label
macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($what:literal) {
            $($variant:ident => $value:literal, $label:literal;)+
        }
        default = $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every option, in the order the admin controls list them
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Name used in the JSON document and query strings
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            /// Human readable label
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => Err(ConfigError::invalid(format!(
                        "unknown {} `{}`",
                        $what, other
                    ))),
                }
            }
        }
    };
}

closed_set! {
    /// Named colour theme
    pub enum Theme ("theme") {
        Default => "default", "Default";
        Blue => "blue", "Blue";
        Minimal => "minimal", "Minimal";
        Modern => "modern", "Modern";
        Dark => "dark", "Dark";
        Magic => "magic", "Magic Kingdom";
        Fantasy => "fantasy", "Fantasy";
        Adventure => "adventure", "Adventure";
        Tomorrow => "tomorrow", "Tomorrow";
        MainStreet => "mainstreet", "Main Street";
        EyeCare => "eyecare", "Eye Care";
        PureWhite => "purewhite", "Pure White";
        PureBlack => "pureblack", "Pure Black";
        CyanBlue => "cyanblue", "Cyan Blue";
        Violet => "violet", "Violet Gradient";
        Cardinal => "cardinal", "Cardinal Gradient";
    }
    default = Default
}

closed_set! {
    /// Layout used for the post list
    pub enum ViewMode ("view mode") {
        Card => "card", "Card";
        List => "list", "List";
        Grid => "grid", "Grid";
        Masonry => "masonry", "Masonry (CSS)";
        Waterfall => "waterfall", "Waterfall (JS)";
        Magazine => "magazine", "Magazine";
        Dense => "dense", "Dense";
        Timeline => "timeline", "Timeline";
        Fullscreen => "fullscreen", "Fullscreen";
        Fast => "fast", "Fast";
        Modern => "modern", "Modern";
        Carousel => "carousel", "Carousel";
    }
    default = Grid
}

closed_set! {
    /// Content language supported by the blog service
    pub enum Language ("language") {
        En => "en", "English";
        Zh => "zh", "Chinese";
        Es => "es", "Spanish";
        Fr => "fr", "French";
        De => "de", "German";
        Ja => "ja", "Japanese";
        Ko => "ko", "Korean";
    }
    default = En
}

closed_set! {
    /// Style of the pagination control
    pub enum PaginationVariant ("pagination variant") {
        Text => "text", "Text";
        Icon => "icon", "Icon";
        Mixed => "mixed", "Mixed";
        Simple => "simple", "Simple";
    }
    default = Icon
}

/// The persisted document controlling site-wide display defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfiguration {
    pub title: String,
    pub description: Option<String>,
    pub theme: Theme,
    pub view_mode: ViewMode,
    pub language: Language,
    pub pagination_variant: PaginationVariant,
    pub page_size: u32,
    /// Staleness window for server-rendered listings, 0 disables caching
    pub revalidate_seconds: u64,
    pub search: SearchOptions,
    pub card: CardStyle,
    pub content: ContentOptions,
    /// Top-level keys outside this model, written back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SiteConfiguration {
    fn default() -> Self {
        Self {
            title: "BlogFlow Showcase".to_string(),
            description: Some("Latest articles powered by the BlogFlow SDK.".to_string()),
            theme: Theme::default(),
            view_mode: ViewMode::default(),
            language: Language::default(),
            pagination_variant: PaginationVariant::default(),
            page_size: 12,
            revalidate_seconds: 300,
            search: SearchOptions::default(),
            card: CardStyle::default(),
            content: ContentOptions::default(),
            extra: Map::new(),
        }
    }
}

impl SiteConfiguration {
    /// Build a configuration from an untrusted JSON document.
    ///
    /// `title`, `theme` and `viewMode` must be present as non-empty strings;
    /// every other field falls back to its default.
    pub fn from_candidate(candidate: Value) -> Result<Self, ConfigError> {
        let object = candidate
            .as_object()
            .ok_or_else(|| ConfigError::invalid("configuration must be a JSON object"))?;

        for field in REQUIRED_FIELDS {
            match object.get(field) {
                Some(Value::String(s)) if !s.trim().is_empty() => {}
                _ => return Err(ConfigError::MissingField(field)),
            }
        }

        let config: SiteConfiguration =
            serde_json::from_value(candidate).map_err(|e| ConfigError::invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants a document must hold before it is persisted
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::MissingField("title"));
        }

        if self.page_size == 0 {
            return Err(ConfigError::invalid("pageSize must be greater than 0"));
        }

        let card_values = [
            ("card.borderWidth", self.card.border_width),
            ("card.borderRadius", self.card.border_radius),
            ("card.shadow", self.card.shadow),
        ];
        for (name, value) in card_values {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Description shown under the site title, if any
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }
}

/// Search bar configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub enabled: bool,
}

/// Post card styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardStyle {
    /// Border width in pixels
    pub border_width: f64,
    /// Border radius in rem
    pub border_radius: f64,
    pub border_color: Option<String>,
    /// Shadow intensity, 0 is off
    pub shadow: f64,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            border_width: 1.0,
            border_radius: 0.75,
            border_color: None,
            shadow: 1.0,
        }
    }
}

impl CardStyle {
    /// Border colour, treating an empty string as unset
    pub fn border_color(&self) -> Option<&str> {
        self.border_color
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Inline CSS custom properties for the card styling
    pub fn css_variables(&self) -> String {
        let mut vars = format!(
            "--blogflow-card-border-width:{}px;--blogflow-card-border-radius:{}rem;--blogflow-card-shadow:{};",
            self.border_width, self.border_radius, self.shadow
        );
        if let Some(color) = self.border_color() {
            vars.push_str(&format!("--blogflow-card-border-color:{};", color));
        }
        vars
    }
}

/// Which parts of the post list are shown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentOptions {
    pub show_excerpt: bool,
    pub show_category: bool,
    pub show_date: bool,
    pub show_list_title: bool,
    pub show_card_title: bool,
}

impl Default for ContentOptions {
    fn default() -> Self {
        Self {
            show_excerpt: true,
            show_category: true,
            show_date: true,
            show_list_title: true,
            show_card_title: true,
        }
    }
}
