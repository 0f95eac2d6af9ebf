use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::display::{DisplayConfig, EasingType, TransitionStyle};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub cadence: CadenceConfig,
    #[serde(default = "default_sections")]
    pub sections: Vec<SectionConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            ui: UiConfig::default(),
            cadence: CadenceConfig::default(),
            sections: default_sections(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (overridden by RUST_LOG)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event loop poll/render cadence in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// How long the splash screen stays up (0 = no splash)
    #[serde(default = "default_splash_duration")]
    pub splash_duration_ms: u64,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            splash_duration_ms: default_splash_duration(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Cadences applied to sections that do not override them.
/// Text rotation and caret blink are independent timers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CadenceConfig {
    #[serde(default = "default_text_interval")]
    pub text_interval_ms: u64,
    #[serde(default = "default_cursor_interval")]
    pub cursor_interval_ms: u64,
    #[serde(default = "default_transition_duration")]
    pub transition_duration_ms: u64,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            text_interval_ms: default_text_interval(),
            cursor_interval_ms: default_cursor_interval(),
            transition_duration_ms: default_transition_duration(),
        }
    }
}

/// One page of the showcase, hosting one rotating-text display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    /// Stable identifier ("hero", "about", ...)
    pub id: String,
    /// Navigation tab label
    pub title: String,
    /// Large heading above the rotating text
    #[serde(default)]
    pub heading: String,
    /// Small caption directly above the rotating text
    #[serde(default)]
    pub label: String,
    /// Paragraphs below the rotating text
    #[serde(default)]
    pub body: Vec<String>,
    /// Strings to cycle through
    #[serde(default)]
    pub content: Vec<String>,
    #[serde(default)]
    pub text_interval_ms: Option<u64>,
    /// Show a blinking caret after the text
    #[serde(default = "default_true")]
    pub cursor: bool,
    #[serde(default)]
    pub cursor_interval_ms: Option<u64>,
    #[serde(default)]
    pub transition_duration_ms: Option<u64>,
    #[serde(default)]
    pub style: TransitionStyle,
    #[serde(default)]
    pub easing: EasingType,
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "synthwave", "nord")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Accept either a bare theme name or a map with 'name' and optional 'colors'
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

/// Optional color overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Page background
    pub background: Option<String>,
    /// Body text
    pub foreground: Option<String>,
    /// Secondary text (labels, hints)
    pub muted: Option<String>,
    /// Active tab and highlights
    pub accent: Option<String>,
    /// Rotating text gradient start
    pub gradient_start: Option<String>,
    /// Rotating text gradient end
    pub gradient_end: Option<String>,
    /// Caret color
    pub cursor: Option<String>,
}

fn default_theme_name() -> String {
    "synthwave".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    50
}

fn default_splash_duration() -> u64 {
    3000
}

fn default_text_interval() -> u64 {
    3000
}

fn default_cursor_interval() -> u64 {
    500
}

fn default_transition_duration() -> u64 {
    500
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_sections() -> Vec<SectionConfig> {
    vec![
        SectionConfig {
            id: "hero".to_string(),
            title: "Home".to_string(),
            heading: "Hi, I'm Sarah".to_string(),
            label: String::new(),
            body: strings(&[
                "I create beautiful, functional websites and applications that deliver exceptional user experiences.",
            ]),
            content: strings(&[
                "Full Stack Developer",
                "UI/UX Designer",
                "React Specialist",
                "Problem Solver",
                "Creative Thinker",
            ]),
            text_interval_ms: Some(3000),
            cursor: true,
            cursor_interval_ms: None,
            transition_duration_ms: None,
            style: TransitionStyle::SlideUp,
            easing: EasingType::Cubic,
        },
        SectionConfig {
            id: "about".to_string(),
            title: "About".to_string(),
            heading: "About Me".to_string(),
            label: "Currently Specializing In:".to_string(),
            body: strings(&[
                "I'm a passionate developer who enjoys turning complex problems into simple, elegant designs.",
                "When I'm not coding, you can find me exploring new design trends, contributing to open-source projects, or sharing my knowledge through technical writing and mentoring.",
            ]),
            content: strings(&[
                "Frontend Development",
                "Backend Development",
                "UI/UX Design",
                "Mobile Development",
                "Cloud Architecture",
                "DevOps & Deployment",
            ]),
            text_interval_ms: Some(2500),
            cursor: true,
            cursor_interval_ms: None,
            transition_duration_ms: None,
            style: TransitionStyle::SlideLeft,
            easing: EasingType::Cubic,
        },
        SectionConfig {
            id: "experience".to_string(),
            title: "Experience".to_string(),
            heading: "Work Experience".to_string(),
            label: "What I have done so far".to_string(),
            body: strings(&[
                "Jan 2023 - Present     Full Stack Developer @ Meta",
                "Jan 2022 - Jan 2023    Web Developer @ Shopify",
                "Jan 2021 - Feb 2022    React Native Developer @ Tesla",
                "Mar 2020 - Apr 2021    React.js Developer @ Starbucks",
                "Developing and maintaining web applications, collaborating with designers and product managers, and reviewing code across teams.",
            ]),
            content: strings(&[
                "Full Stack Developer",
                "Web Developer",
                "React Native Developer",
                "React.js Developer",
            ]),
            text_interval_ms: Some(2500),
            cursor: true,
            cursor_interval_ms: None,
            transition_duration_ms: None,
            style: TransitionStyle::SlideUp,
            easing: EasingType::Cubic,
        },
        SectionConfig {
            id: "projects".to_string(),
            title: "Projects".to_string(),
            heading: "Projects".to_string(),
            label: "My work".to_string(),
            body: strings(&[
                "Following projects showcase my skills and experience through real-world examples of my work.",
                "Car Rent (react, mongodb, tailwind)  |  Job IT (react, restapi, scss)  |  Trip Guide (nextjs, supabase, css)",
                "AI Summarizer  |  Crypto Tracker  |  Social Media Dashboard",
                "Stack: React, TypeScript, Node.js, Python, PostgreSQL, MongoDB, AWS, Docker",
            ]),
            content: strings(&[
                "Car Rent",
                "Job IT",
                "Trip Guide",
                "AI Summarizer",
                "Crypto Tracker",
                "Social Media Dashboard",
            ]),
            text_interval_ms: Some(3000),
            cursor: false,
            cursor_interval_ms: None,
            transition_duration_ms: None,
            style: TransitionStyle::Fade,
            easing: EasingType::Cubic,
        },
        SectionConfig {
            id: "contact".to_string(),
            title: "Contact".to_string(),
            heading: "Get In Touch".to_string(),
            label: String::new(),
            body: strings(&[
                "Have a project in mind? Let's work together to create something amazing.",
                "Email: sarah@example.com  |  Location: San Francisco, CA",
            ]),
            content: strings(&[
                "Let's Build Something Amazing",
                "Ready to Start Your Project?",
                "Have an Idea? Let's Discuss",
                "Need a Developer? I'm Here",
                "Let's Create Together",
            ]),
            text_interval_ms: Some(3000),
            cursor: true,
            cursor_interval_ms: None,
            transition_duration_ms: None,
            style: TransitionStyle::SlideUp,
            easing: EasingType::Cubic,
        },
    ]
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults if it does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/marquee/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("marquee")
            .join("config.toml")
    }

    /// Log file used while the terminal UI owns the screen
    pub fn log_path() -> PathBuf {
        Self::config_path().with_file_name("marquee.log")
    }

    pub fn section(&self, id: &str) -> Option<&SectionConfig> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Resolve a section's display settings against the cadence defaults
    pub fn display_config(&self, section: &SectionConfig) -> DisplayConfig {
        let cursor_interval_ms = if section.cursor {
            Some(
                section
                    .cursor_interval_ms
                    .unwrap_or(self.cadence.cursor_interval_ms),
            )
        } else {
            None
        };

        DisplayConfig {
            content: section.content.clone(),
            text_interval_ms: section
                .text_interval_ms
                .unwrap_or(self.cadence.text_interval_ms),
            cursor_interval_ms,
            transition_duration_ms: section
                .transition_duration_ms
                .unwrap_or(self.cadence.transition_duration_ms),
            style: section.style,
            easing: section.easing,
        }
    }

    /// Check every section, reporting the first problem found
    pub fn validate(&self) -> crate::Result<()> {
        if self.sections.is_empty() {
            return Err(crate::Error::Config("at least one section is required".to_string()));
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(crate::Error::Config("ui.tick_rate_ms must be greater than zero".to_string()));
        }

        let mut seen = HashSet::new();
        for section in &self.sections {
            if !seen.insert(section.id.as_str()) {
                return Err(crate::Error::Config(format!(
                    "duplicate section id '{}'",
                    section.id
                )));
            }
            if let Err(crate::Error::InvalidConfig(msg)) = self.display_config(section).validate() {
                return Err(crate::Error::InvalidConfig(format!(
                    "section '{}': {}",
                    section.id, msg
                )));
            }
        }
        Ok(())
    }
}
