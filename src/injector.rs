use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use lazy_static::lazy_static;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use mdbook::book::Book;
use mdbook::book::Chapter;
use mdbook::preprocess::{Preprocessor, PreprocessorContext};

use crate::assets::{
    AssetBundle, AssetSource, CdnUrls, EDITOR_CSS_URL, EDITOR_JS_URL, MARKED_JS_URL,
};
use crate::utils::map_chapter;

pub const PREPROCESSOR_NAME: &str = "live-wysiwyg";

/// Environment variable carrying the mdbook command that launched the
/// preprocessor. The preprocessor protocol itself does not say whether the
/// book is being served or built, so the wrapper invocation has to.
pub const COMMAND_ENV_VAR: &str = "MDBOOK_LIVE_WYSIWYG_COMMAND";

/// The command the host was started with. Anything other than `Serve`
/// disables injection, and so does never learning the command at all.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Build,
    Serve,
    Deploy,
}

impl RunMode {
    pub fn from_command(command: &str) -> Self {
        match command {
            "build" => Self::Build,
            "serve" => Self::Serve,
            "deploy" | "gh-deploy" => Self::Deploy,
            other => {
                warn!("Unknown command {other:?}, treating it as a static build");
                Self::Build
            }
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct InjectorConfig {
    pub assets: AssetSource,
    pub article_selector: Option<String>,
    pub autoload: bool,
    pub assets_dir: Option<PathBuf>,
    pub marked_js_url: String,
    pub editor_css_url: String,
    pub editor_js_url: String,
}

impl Default for InjectorConfig {
    fn default() -> Self {
        Self {
            assets: AssetSource::default(),
            article_selector: None,
            autoload: true,
            assets_dir: None,
            marked_js_url: MARKED_JS_URL.to_string(),
            editor_css_url: EDITOR_CSS_URL.to_string(),
            editor_js_url: EDITOR_JS_URL.to_string(),
        }
    }
}

impl InjectorConfig {
    pub fn create_injector(&self, asset_dir: PathBuf, run_mode: RunMode) -> LiveWysiwyg {
        LiveWysiwyg {
            run_mode,
            source: self.assets,
            urls: CdnUrls {
                marked_js: self.marked_js_url.clone(),
                editor_css: self.editor_css_url.clone(),
                editor_js: self.editor_js_url.clone(),
            },
            article_selector: self.article_selector.clone(),
            autoload: self.autoload,
            asset_dir,
        }
    }
}

/// The asset injector. Holds the run mode set by [`LiveWysiwyg::on_startup`]
/// and the resolved plugin settings; everything else is read from disk per
/// page.
pub struct LiveWysiwyg {
    pub run_mode: RunMode,
    pub source: AssetSource,
    pub urls: CdnUrls,
    pub article_selector: Option<String>,
    pub autoload: bool,
    pub asset_dir: PathBuf,
}

impl Default for LiveWysiwyg {
    fn default() -> Self {
        InjectorConfig::default().create_injector(DEFAULT_ASSET_DIR.clone(), RunMode::default())
    }
}

lazy_static! {
    static ref DEFAULT_ASSET_DIR: PathBuf = default_asset_dir();
}

// The shipped assets live next to the installed binary.
fn default_asset_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .map(|dir| dir.join("assets"))
        .unwrap_or_else(|| PathBuf::from("assets"))
}

impl LiveWysiwyg {
    /// Records which command the host was started with. `dirty` is part of
    /// the host's startup notification but has no bearing on injection.
    pub fn on_startup(&mut self, command: RunMode, _dirty: bool) {
        self.run_mode = command;
        debug!("Startup with {:?}, injection {}", command, if self.is_serving() { "enabled" } else { "disabled" });
    }

    pub fn is_serving(&self) -> bool {
        self.run_mode == RunMode::Serve
    }

    /// Returns the page HTML with the editor assets prepended, or unchanged
    /// when the book is not being served.
    pub fn on_page_content(&self, html: &str) -> Result<String> {
        if !self.is_serving() {
            return Ok(html.to_string());
        }
        let bundle = AssetBundle::resolve(self.source, &self.urls, &self.asset_dir)?;
        let preamble = self.preamble(bundle.icon());
        Ok(format!("{}\n{}", bundle.render(&preamble), html))
    }

    fn run_on_chapter(&self, chapter: &mut Chapter) -> Result<()> {
        chapter.content = self.on_page_content(&chapter.content)?;
        Ok(())
    }

    // Constants consumed by the integration script. JSON-encoding the string
    // options gives correct quoting and a literal `null` when unset.
    fn preamble(&self, icon: Option<&str>) -> String {
        format!(
            "const liveWysiwygArticleSelector = {};\nconst liveWysiwygAutoload = {};\nconst liveWysiwygIcon = {};",
            js_literal(self.article_selector.as_deref()),
            self.autoload,
            js_literal(icon),
        )
    }
}

fn js_literal(value: Option<&str>) -> String {
    serde_json::to_string(&value).unwrap_or_else(|_| "null".to_string())
}

impl Preprocessor for LiveWysiwyg {
    fn name(&self) -> &str {
        PREPROCESSOR_NAME
    }

    fn supports_renderer(&self, renderer: &str) -> bool {
        renderer == "html"
    }

    fn run(&self, context: &PreprocessorContext, mut book: Book) -> Result<Book> {
        let key = format!("preprocessor.{}", self.name());
        let config = context
            .config
            .get_deserialized_opt::<InjectorConfig, _>(key)
            .with_context(|| "Could not deserialize [preprocessor.live-wysiwyg]")?
            .unwrap_or_default();
        let asset_dir = match config.assets_dir.clone() {
            Some(dir) if dir.is_relative() => context.root.join(dir),
            Some(dir) => dir,
            None => DEFAULT_ASSET_DIR.clone(),
        };
        let injector = config.create_injector(asset_dir, self.run_mode);
        if !injector.is_serving() {
            debug!("Not serving, leaving the book untouched");
            return Ok(book);
        }
        map_chapter(&mut book, &mut move |chapter| {
            injector.run_on_chapter(chapter)
        })?;
        Ok(book)
    }
}
