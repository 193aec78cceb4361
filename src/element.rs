//! The narrow view of a clicked UI element that click tracking needs.

use analytics_shared::Click;

/// Anything that can describe itself as a click target.
pub trait DescribeElement {
    fn id(&self) -> String;
    fn class_name(&self) -> String;
    fn text(&self) -> String;
    /// Link target, only for hyperlinks.
    fn href(&self) -> Option<String>;

    fn to_click(&self) -> Click {
        Click {
            element_id: self.id(),
            element_class: self.class_name(),
            element_text: self.text(),
            href: self.href(),
        }
    }
}

/// Plain-data element description, for hosts without a DOM.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementSnapshot {
    pub id: String,
    pub class_name: String,
    pub text: String,
    pub href: Option<String>,
}

impl ElementSnapshot {
    pub fn new(
        id: impl Into<String>,
        class_name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            class_name: class_name.into(),
            text: text.into(),
            href: None,
        }
    }

    pub fn link(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }
}

impl DescribeElement for ElementSnapshot {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn class_name(&self) -> String {
        self.class_name.clone()
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn href(&self) -> Option<String> {
        self.href.clone()
    }
}

#[cfg(target_arch = "wasm32")]
impl DescribeElement for web_sys::HtmlElement {
    fn id(&self) -> String {
        web_sys::Element::id(self)
    }

    fn class_name(&self) -> String {
        web_sys::Element::class_name(self)
    }

    fn text(&self) -> String {
        self.text_content().unwrap_or_default()
    }

    fn href(&self) -> Option<String> {
        use wasm_bindgen::JsCast;

        self.dyn_ref::<web_sys::HtmlAnchorElement>().map(|a| a.href())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_to_click() {
        let button = ElementSnapshot::new("checkout-button", "primary-cta", "Proceed to Checkout");
        let click = button.to_click();
        assert_eq!(click.element_id, "checkout-button");
        assert_eq!(click.element_class, "primary-cta");
        assert_eq!(click.element_text, "Proceed to Checkout");
        assert_eq!(click.href, None);

        let link = ElementSnapshot::new("", "nav-link", "View Pricing").link("/pricing");
        assert_eq!(link.to_click().href.as_deref(), Some("/pricing"));
    }
}
