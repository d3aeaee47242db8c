//! Static metadata for the supported HTML elements.

use std::collections::HashMap;

use lazy_static::lazy_static;

#[derive(Debug, PartialEq, Eq)]
pub struct ElementMeta {
    pub tag_name: &'static str,
    /// Void elements (`false`) serialize as a bare start tag and
    /// cannot hold children.
    pub has_closing_tag: bool,
}

macro_rules! def_tags {
    { $($konst:ident: $tag:literal, $closing:literal;)* } => {
        $(
            pub static $konst: ElementMeta = ElementMeta {
                tag_name: $tag,
                has_closing_tag: $closing,
            };
        )*
        static ALL_TAGS: &[&ElementMeta] = &[$(&$konst),*];
    }
}

def_tags! {
    HTML: "html", true;
    HEAD: "head", true;
    TITLE: "title", true;
    META: "meta", false;
    LINK: "link", false;
    BODY: "body", true;
    DIV: "div", true;
    SPAN: "span", true;
    NAV: "nav", true;
    HEADER: "header", true;
    FOOTER: "footer", true;
    MAIN: "main", true;
    SECTION: "section", true;
    UL: "ul", true;
    OL: "ol", true;
    LI: "li", true;
    A: "a", true;
    P: "p", true;
    H1: "h1", true;
    H2: "h2", true;
    H3: "h3", true;
    H4: "h4", true;
    H5: "h5", true;
    H6: "h6", true;
    I: "i", true;
    EM: "em", true;
    STRONG: "strong", true;
    SMALL: "small", true;
    FORM: "form", true;
    LABEL: "label", true;
    INPUT: "input", false;
    TEXTAREA: "textarea", true;
    BUTTON: "button", true;
    IMG: "img", false;
    BR: "br", false;
    HR: "hr", false;
    TABLE: "table", true;
    THEAD: "thead", true;
    TBODY: "tbody", true;
    TR: "tr", true;
    TD: "td", true;
    TH: "th", true;
}

pub struct MetaDb {
    by_tag: HashMap<&'static str, &'static ElementMeta>,
}

impl MetaDb {
    fn build() -> MetaDb {
        MetaDb {
            by_tag: ALL_TAGS.iter().map(|meta| (meta.tag_name, *meta)).collect(),
        }
    }

    pub fn get(&self, tag: &str) -> Option<&'static ElementMeta> {
        self.by_tag.get(tag).copied()
    }
}

lazy_static! {
    pub static ref METADB: MetaDb = MetaDb::build();
}
