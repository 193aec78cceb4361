//! Current page context, used to default page-view titles and referrers.

pub trait PageContext: Send + Sync {
    fn title(&self) -> String;
    fn referrer(&self) -> String;
}

/// A page context with fixed values. Useful for native hosts and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticPage {
    pub title: String,
    pub referrer: String,
}

impl StaticPage {
    pub fn new(title: impl Into<String>, referrer: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            referrer: referrer.into(),
        }
    }
}

impl PageContext for StaticPage {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn referrer(&self) -> String {
        self.referrer.clone()
    }
}

/// Reads `document.title` and `document.referrer` at call time.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDocument;

#[cfg(target_arch = "wasm32")]
impl BrowserDocument {
    fn document() -> Option<web_sys::Document> {
        web_sys::window()?.document()
    }
}

#[cfg(target_arch = "wasm32")]
impl PageContext for BrowserDocument {
    fn title(&self) -> String {
        Self::document().map(|d| d.title()).unwrap_or_default()
    }

    fn referrer(&self) -> String {
        Self::document().map(|d| d.referrer()).unwrap_or_default()
    }
}

/// The page context a tracker uses when the host does not provide one.
#[cfg(target_arch = "wasm32")]
pub fn default_page() -> std::sync::Arc<dyn PageContext> {
    std::sync::Arc::new(BrowserDocument)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn default_page() -> std::sync::Arc<dyn PageContext> {
    std::sync::Arc::new(StaticPage::default())
}
