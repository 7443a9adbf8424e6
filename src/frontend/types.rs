use serde::{Deserialize, Serialize};

const COMPATIBILITY_DATE: &str = "2024-04-03";
const DEFAULT_MODULES: [&str; 3] = [
    "@nuxtjs/tailwindcss",
    "@nuxtjs/color-mode",
    "@formkit/auto-animate/nuxt",
];
const DEFAULT_CSS: &str = "@/assets/css/tailwind.css";
const FONT_AWESOME_HREF: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.0.0/css/all.min.css";
const GOOGLE_FONTS_HREF: &str = "https://fonts.googleapis.com/css2?family=Noto+Sans:ital,wght@0,100..900;1,100..900&family=Nunito+Sans:ital,opsz,wght@0,6..12,200..1000;1,6..12,200..1000&display=swap";
const STYLESHEET_REL: &str = "stylesheet";
const DAISYUI_PLUGIN: &str = "daisyui";

/// The single explicit frontend build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendConfig {
    pub compatibility_date: String,
    pub devtools: bool,
    pub modules: Vec<String>,
    pub css: Vec<String>,
    pub links: Vec<HeadLink>,
    pub color_mode: ColorMode,
    pub tailwind: TailwindConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadLink {
    pub rel: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorMode {
    pub preference: ColorPreference,
    pub data_value: String,
    pub class_suffix: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorPreference {
    #[default]
    System,
    Light,
    Dark,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TailwindConfig {
    pub content: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sans_font: Option<Vec<String>>,
    pub plugins: Vec<String>,
    pub themes: Vec<String>,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            compatibility_date: COMPATIBILITY_DATE.to_owned(),
            devtools: true,
            modules: DEFAULT_MODULES.iter().map(|name| (*name).to_owned()).collect(),
            css: vec![DEFAULT_CSS.to_owned()],
            links: vec![
                HeadLink::stylesheet(FONT_AWESOME_HREF),
                HeadLink::stylesheet(GOOGLE_FONTS_HREF),
            ],
            color_mode: ColorMode::default(),
            tailwind: TailwindConfig {
                plugins: vec![DAISYUI_PLUGIN.to_owned()],
                ..TailwindConfig::default()
            },
        }
    }
}

impl HeadLink {
    #[must_use]
    pub fn stylesheet(href: &str) -> Self {
        Self {
            rel: STYLESHEET_REL.to_owned(),
            href: href.to_owned(),
        }
    }
}

impl Default for ColorMode {
    fn default() -> Self {
        Self {
            preference: ColorPreference::System,
            data_value: "theme".to_owned(),
            class_suffix: String::new(),
        }
    }
}

impl TailwindConfig {
    /// The single-theme variant: `autumn` with a Nunito sans stack.
    #[must_use]
    pub fn autumn() -> Self {
        Self {
            content: Vec::new(),
            sans_font: Some(vec!["Nunito".to_owned(), "sans-serif".to_owned()]),
            plugins: vec![DAISYUI_PLUGIN.to_owned()],
            themes: vec!["autumn".to_owned()],
        }
    }
}

/// A descriptor file as written on disk. Every key is optional so that
/// variants can be merged field by field; missing keys fall back to
/// [`FrontendConfig::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrontendDescriptor {
    pub compatibility_date: Option<String>,
    pub devtools: Option<bool>,
    pub modules: Option<Vec<String>>,
    pub css: Option<Vec<String>>,
    pub links: Option<Vec<HeadLink>>,
    pub color_mode: Option<ColorModeDescriptor>,
    pub tailwind: Option<TailwindDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorModeDescriptor {
    pub preference: Option<ColorPreference>,
    pub data_value: Option<String>,
    pub class_suffix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TailwindDescriptor {
    pub content: Option<Vec<String>>,
    pub sans_font: Option<Vec<String>>,
    pub plugins: Option<Vec<String>>,
    pub themes: Option<Vec<String>>,
}

impl FrontendDescriptor {
    #[must_use]
    pub fn resolve(self) -> FrontendConfig {
        let defaults = FrontendConfig::default();
        let color_mode = self.color_mode.unwrap_or_default();
        let tailwind = self.tailwind.unwrap_or_default();
        FrontendConfig {
            compatibility_date: self
                .compatibility_date
                .unwrap_or(defaults.compatibility_date),
            devtools: self.devtools.unwrap_or(defaults.devtools),
            modules: self.modules.unwrap_or(defaults.modules),
            css: self.css.unwrap_or(defaults.css),
            links: self.links.unwrap_or(defaults.links),
            color_mode: ColorMode {
                preference: color_mode
                    .preference
                    .unwrap_or(defaults.color_mode.preference),
                data_value: color_mode
                    .data_value
                    .unwrap_or(defaults.color_mode.data_value),
                class_suffix: color_mode
                    .class_suffix
                    .unwrap_or(defaults.color_mode.class_suffix),
            },
            tailwind: TailwindConfig {
                content: tailwind.content.unwrap_or(defaults.tailwind.content),
                sans_font: tailwind.sans_font.or(defaults.tailwind.sans_font),
                plugins: tailwind.plugins.unwrap_or(defaults.tailwind.plugins),
                themes: tailwind.themes.unwrap_or(defaults.tailwind.themes),
            },
        }
    }
}
