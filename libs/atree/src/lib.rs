//! Immutable HTML element trees with validating construction.
//!
//! Trees are built fresh for every render via the per-tag methods on
//! [`Html`] and never mutated afterwards; "updating" a page means
//! building a new tree and swapping it in wholesale.

pub mod flat;
pub mod kconv;
pub mod meta;

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use kstring::KString;

pub use flat::Flat;
pub use kconv::ToKString;
use meta::{ElementMeta, MetaDb, METADB};

pub const NBSP: &str = "\u{00A0}";

// https://www.w3.org/International/questions/qa-byte-order-mark#problems
const BOM: &str = "\u{FEFF}";
#[cfg(test)]
#[test]
fn t_file_encoding() {
    assert_eq!(BOM.as_bytes(), &[0xEF, 0xBB, 0xBF]);
}

const DOCTYPE: &str = "<!DOCTYPE html>\n";

/// Attribute key owned by the content-region machinery; element
/// construction rejects it in caller input so that no two elements
/// can masquerade as the live content region.
pub const REGION_ATTR: &str = "data-content-region";

#[derive(thiserror::Error, Debug)]
pub enum TreeError {
    #[error("duplicate attribute {key:?} on element {tag:?}")]
    DuplicateAttribute { tag: &'static str, key: KString },
    #[error("attribute {key:?} on element {tag:?} is reserved for the content region")]
    ReservedAttribute { tag: &'static str, key: KString },
    #[error("unknown element tag {tag:?}")]
    UnknownTag { tag: KString },
    #[error("void element {tag:?} cannot hold children")]
    ChildrenInVoidElement { tag: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Arc<Element>),
    Text(KString),
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    meta: &'static ElementMeta,
    attr: Box<[(KString, KString)]>,
    body: Box<[Node]>,
}

impl Element {
    pub fn tag_name(&self) -> &'static str {
        self.meta.tag_name
    }

    pub fn attr(&self) -> &[(KString, KString)] {
        &self.attr
    }

    pub fn body(&self) -> &[Node] {
        &self.body
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attr
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }
}

impl From<&'static str> for Node {
    fn from(s: &'static str) -> Self {
        Node::Text(KString::from_static(s))
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Text(KString::from_string(s))
    }
}

// ------------------------------------------------------------------
// Attribute and child composition

pub fn att<K: ToKString, V: ToKString>(key: K, val: V) -> Option<(KString, KString)> {
    Some((key.to_kstring(), val.to_kstring()))
}

pub fn opt_att<K: ToKString, V: ToKString>(
    key: K,
    val: Option<V>,
) -> Option<(KString, KString)> {
    val.map(|val| (key.to_kstring(), val.to_kstring()))
}

pub trait ToAttrs {
    fn to_attrs(self) -> Vec<(KString, KString)>;
}

// Values returned by `att` and `opt_att`; `None` entries are dropped.
impl<const N: usize> ToAttrs for [Option<(KString, KString)>; N] {
    fn to_attrs(self) -> Vec<(KString, KString)> {
        self.into_iter().flatten().collect()
    }
}

impl ToAttrs for Vec<(KString, KString)> {
    fn to_attrs(self) -> Vec<(KString, KString)> {
        self
    }
}

pub trait ToBody {
    fn to_body(self) -> Vec<Node>;
}

impl<const N: usize> ToBody for [Node; N] {
    fn to_body(self) -> Vec<Node> {
        self.into()
    }
}

impl ToBody for Vec<Node> {
    fn to_body(self) -> Vec<Node> {
        self
    }
}

impl ToBody for Node {
    fn to_body(self) -> Vec<Node> {
        vec![self]
    }
}

// Plain strings auto-wrap as text leaves.
impl ToBody for &'static str {
    fn to_body(self) -> Vec<Node> {
        vec![Node::from(self)]
    }
}

impl ToBody for String {
    fn to_body(self) -> Vec<Node> {
        vec![Node::from(self)]
    }
}

pub trait TryCollectBody {
    fn try_collect_body(&mut self) -> Result<Vec<Node>>;
}

impl<I: Iterator<Item = Result<Node>>> TryCollectBody for I {
    fn try_collect_body(&mut self) -> Result<Vec<Node>> {
        self.collect()
    }
}

// ------------------------------------------------------------------
// Construction

/// Handle for building nodes. Carries the tag metadata used to
/// validate construction; cheap to create, holds no tree storage.
pub struct Html {
    metadb: &'static MetaDb,
}

impl Html {
    pub fn new() -> Self {
        Html { metadb: &*METADB }
    }

    /// Generic entry point for dynamic tag names; the per-tag methods
    /// below are preferable where the tag is known statically.
    pub fn element(
        &self,
        tag: &str,
        attr: impl ToAttrs,
        body: impl ToBody,
    ) -> Result<Node, TreeError> {
        let meta = self.metadb.get(tag).ok_or_else(|| TreeError::UnknownTag {
            tag: KString::from_ref(tag),
        })?;
        self.new_element(meta, attr.to_attrs(), body.to_body())
    }

    fn new_element(
        &self,
        meta: &'static ElementMeta,
        attr: Vec<(KString, KString)>,
        body: Vec<Node>,
    ) -> Result<Node, TreeError> {
        for (i, (key, _)) in attr.iter().enumerate() {
            if key.as_str() == REGION_ATTR {
                return Err(TreeError::ReservedAttribute {
                    tag: meta.tag_name,
                    key: key.clone(),
                });
            }
            if attr[..i].iter().any(|(seen, _)| seen == key) {
                return Err(TreeError::DuplicateAttribute {
                    tag: meta.tag_name,
                    key: key.clone(),
                });
            }
        }
        if !meta.has_closing_tag && !body.is_empty() {
            return Err(TreeError::ChildrenInVoidElement { tag: meta.tag_name });
        }
        Ok(Node::Element(Arc::new(Element {
            meta,
            attr: attr.into_boxed_slice(),
            body: body.into_boxed_slice(),
        })))
    }

    /// The one sanctioned way to produce an element carrying the
    /// reserved region marker. `name` identifies the region to the
    /// rendering surface.
    pub fn content_region(
        &self,
        name: impl ToKString,
        body: impl ToBody,
    ) -> Result<Node, TreeError> {
        let attr = vec![(KString::from_static(REGION_ATTR), name.to_kstring())];
        Ok(Node::Element(Arc::new(Element {
            meta: &meta::DIV,
            attr: attr.into_boxed_slice(),
            body: body.to_body().into_boxed_slice(),
        })))
    }

    pub fn staticstr(&self, s: &'static str) -> Node {
        Node::Text(KString::from_static(s))
    }

    pub fn str(&self, s: &str) -> Node {
        Node::Text(KString::from_ref(s))
    }

    pub fn string(&self, s: String) -> Node {
        Node::Text(KString::from_string(s))
    }

    pub fn text(&self, s: impl ToKString) -> Node {
        Node::Text(s.to_kstring())
    }

    pub fn empty_node(&self) -> Node {
        Node::None
    }

    /// A text node with just a non-breaking space.
    pub fn nbsp(&self) -> Node {
        self.staticstr(NBSP)
    }
}

impl Default for Html {
    fn default() -> Self {
        Html::new()
    }
}

macro_rules! def_element_methods {
    { $($method:ident: $konst:ident;)* } => {
        impl Html {
            $(
                pub fn $method(
                    &self,
                    attr: impl ToAttrs,
                    body: impl ToBody,
                ) -> Result<Node, TreeError> {
                    self.new_element(&meta::$konst, attr.to_attrs(), body.to_body())
                }
            )*
        }
    }
}

def_element_methods! {
    html: HTML;
    head: HEAD;
    title: TITLE;
    meta: META;
    link: LINK;
    body: BODY;
    div: DIV;
    span: SPAN;
    nav: NAV;
    header: HEADER;
    footer: FOOTER;
    main: MAIN;
    section: SECTION;
    ul: UL;
    ol: OL;
    li: LI;
    a: A;
    p: P;
    h1: H1;
    h2: H2;
    h3: H3;
    h4: H4;
    h5: H5;
    h6: H6;
    i: I;
    em: EM;
    strong: STRONG;
    small: SMALL;
    form: FORM;
    label: LABEL;
    input: INPUT;
    textarea: TEXTAREA;
    button: BUTTON;
    img: IMG;
    br: BR;
    hr: HR;
    table: TABLE;
    thead: THEAD;
    tbody: TBODY;
    tr: TR;
    td: TD;
    th: TH;
}

// ------------------------------------------------------------------
// Serialization

fn write_escaped(out: &mut impl Write, s: &str) -> Result<()> {
    for b in s.as_bytes() {
        match b {
            b'&' => out.write_all(b"&amp;")?,
            b'<' => out.write_all(b"&lt;")?,
            b'>' => out.write_all(b"&gt;")?,
            b'"' => out.write_all(b"&quot;")?,
            b'\'' => out.write_all(b"&#39;")?,
            _ => out.write_all(std::slice::from_ref(b))?,
        }
    }
    Ok(())
}

pub trait Print {
    /// Print serialized HTML. Deterministic: the same tree always
    /// yields byte-identical output.
    fn print_html_fragment(&self, out: &mut impl Write) -> Result<()>;

    /// Print plain text, completely *ignoring* HTML markup.
    fn print_plain(&self, out: &mut String);

    fn to_html_fragment_string(&self) -> Result<String> {
        let mut v = Vec::new();
        self.print_html_fragment(&mut v)?;
        Ok(String::from_utf8(v).expect("serializer only concatenates UTF-8 pieces"))
    }

    /// Prefix with a byte-order mark (BOM) to make sure the output is
    /// read correctly from files, too (e.g. by Safari), then the
    /// doctype.
    fn print_html_document(&self, out: &mut impl Write) -> Result<()> {
        out.write_all(BOM.as_bytes())?;
        out.write_all(DOCTYPE.as_bytes())?;
        self.print_html_fragment(out)
    }

    fn to_html_document_string(&self) -> Result<String> {
        let mut v = Vec::new();
        self.print_html_document(&mut v)?;
        Ok(String::from_utf8(v).expect("serializer only concatenates UTF-8 pieces"))
    }

    fn to_plain_string(&self) -> String {
        let mut s = String::new();
        self.print_plain(&mut s);
        s
    }
}

impl Print for Node {
    fn print_html_fragment(&self, out: &mut impl Write) -> Result<()> {
        match self {
            Node::Element(e) => e.print_html_fragment(out),
            Node::Text(s) => write_escaped(out, s.as_str()),
            Node::None => Ok(()),
        }
    }

    fn print_plain(&self, out: &mut String) {
        match self {
            Node::Element(e) => e.print_plain(out),
            Node::Text(s) => out.push_str(s.as_str()),
            Node::None => (),
        }
    }
}

impl Print for Element {
    fn print_html_fragment(&self, out: &mut impl Write) -> Result<()> {
        let meta = self.meta;
        out.write_all(b"<")?;
        out.write_all(meta.tag_name.as_bytes())?;
        for (key, val) in self.attr.iter() {
            out.write_all(b" ")?;
            out.write_all(key.as_bytes())?;
            out.write_all(b"=\"")?;
            write_escaped(out, val.as_str())?;
            out.write_all(b"\"")?;
        }
        out.write_all(b">")?;
        for node in self.body.iter() {
            node.print_html_fragment(out)?;
        }
        if meta.has_closing_tag {
            out.write_all(b"</")?;
            out.write_all(meta.tag_name.as_bytes())?;
            out.write_all(b">")?;
        }
        Ok(())
    }

    fn print_plain(&self, out: &mut String) {
        for node in self.body.iter() {
            node.print_plain(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html() -> Html {
        Html::new()
    }

    #[test]
    fn t_escape() -> Result<()> {
        let h = html();
        let node = h.p([], h.str("a < b & \"c\" > 'd'"))?;
        assert_eq!(
            node.to_html_fragment_string()?,
            "<p>a &lt; b &amp; &quot;c&quot; &gt; &#39;d&#39;</p>"
        );
        Ok(())
    }

    #[test]
    fn t_attribute_escape() -> Result<()> {
        let h = html();
        let node = h.a([att("href", "/x?a=1&b=\"2\"")], "link")?;
        assert_eq!(
            node.to_html_fragment_string()?,
            "<a href=\"/x?a=1&amp;b=&quot;2&quot;\">link</a>"
        );
        Ok(())
    }

    #[test]
    fn t_void_elements() -> Result<()> {
        let h = html();
        assert_eq!(h.br([], [])?.to_html_fragment_string()?, "<br>");
        assert_eq!(
            h.img([att("src", "/p.png"), att("alt", "")], [])?
                .to_html_fragment_string()?,
            "<img src=\"/p.png\" alt=\"\">"
        );
        Ok(())
    }

    #[test]
    fn t_void_with_children() {
        let h = html();
        let e = h.br([], "no").err().unwrap();
        assert!(matches!(e, TreeError::ChildrenInVoidElement { tag: "br" }));
    }

    #[test]
    fn t_duplicate_attribute() {
        let h = html();
        let e = h
            .div([att("class", "a"), att("class", "b")], [])
            .err()
            .unwrap();
        assert_eq!(
            e.to_string(),
            "duplicate attribute \"class\" on element \"div\""
        );
    }

    #[test]
    fn t_reserved_attribute() {
        let h = html();
        let e = h.div([att(REGION_ATTR, "fake")], []).err().unwrap();
        assert!(matches!(e, TreeError::ReservedAttribute { tag: "div", .. }));
        // the sanctioned constructor does carry it
        let node = h.content_region("page-content", []).unwrap();
        match &node {
            Node::Element(e) => assert_eq!(e.get_attr(REGION_ATTR), Some("page-content")),
            _ => panic!("expected element"),
        }
    }

    #[test]
    fn t_unknown_tag() {
        let h = html();
        let e = h.element("blink", [], []).err().unwrap();
        assert_eq!(e.to_string(), "unknown element tag \"blink\"");
    }

    #[test]
    fn t_opt_att() -> Result<()> {
        let h = html();
        let node = h.a(
            [att("href", "/"), opt_att("title", None::<&str>)],
            "home",
        )?;
        assert_eq!(node.to_html_fragment_string()?, "<a href=\"/\">home</a>");
        Ok(())
    }

    #[test]
    fn t_flatten_preserves_order() -> Result<()> {
        let h = html();
        let mut body = vec![h.staticstr("a")];
        Flat::Two(h.staticstr("b"), h.staticstr("c")).push_onto(&mut body);
        Flat::None.push_onto(&mut body);
        Flat::Many(vec![h.staticstr("d"), h.staticstr("e")]).push_onto(&mut body);
        let node = h.p([], body)?;
        assert_eq!(node.to_html_fragment_string()?, "<p>abcde</p>");
        Ok(())
    }

    #[test]
    fn t_try_collect_body() -> Result<()> {
        let h = html();
        let items = ["one", "two"];
        let node = h.ul(
            [],
            items
                .into_iter()
                .map(|s| -> Result<Node> { Ok(h.li([], h.str(s))?) })
                .try_collect_body()?,
        )?;
        assert_eq!(
            node.to_html_fragment_string()?,
            "<ul><li>one</li><li>two</li></ul>"
        );
        Ok(())
    }

    #[test]
    fn t_plain_projection() -> Result<()> {
        let h = html();
        let node = h.div(
            [att("class", "x")],
            [h.h1([], "Title")?, h.p([], [h.str("body "), h.em([], "text")?])?],
        )?;
        assert_eq!(node.to_plain_string(), "Titlebody text");
        Ok(())
    }

    #[test]
    fn t_document_prefix() -> Result<()> {
        let h = html();
        let doc = h.html([], [h.body([], [])?])?.to_html_document_string()?;
        assert!(doc.starts_with("\u{FEFF}<!DOCTYPE html>\n<html>"));
        Ok(())
    }

    #[test]
    fn t_render_deterministic() -> Result<()> {
        let h = html();
        let build = || -> Result<Node> {
            Ok(h.div(
                [att("id", "d"), att("class", "c")],
                [h.p([], "one")?, Node::from("two"), h.empty_node()],
            )?)
        };
        let a = build()?;
        let b = build()?;
        assert_eq!(a, b);
        assert_eq!(a.to_html_fragment_string()?, b.to_html_fragment_string()?);
        assert_eq!(a.to_html_fragment_string()?, a.to_html_fragment_string()?);
        Ok(())
    }
}
