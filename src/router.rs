//! The path router: maps path-change events to content-subtree
//! replacement events.
//!
//! A [`RouteTable`] is built once at startup and immutable
//! thereafter; the [`PathRouter`] owns the published content subtree
//! and recomputes it, synchronously and wholesale, on every
//! `path_changed` notification. Unmatched paths are not an error:
//! they resolve to the designated default entry.

use std::fmt::{self, Debug};
use std::sync::Arc;

use anyhow::Result;
use atree::{Html, Node};
use kstring::KString;

use crate::def_boxed_thiserror;
use crate::path::normalize_path;
use crate::swapcell::SwapCell;
use crate::warn;

def_boxed_thiserror!(RouterError, pub enum RouterErrorKind {
    #[error("route table already contains an entry for {path:?}")]
    DuplicateRoute { path: KString },
    #[error("default route {path:?} is not registered")]
    MissingDefault { path: KString },
    #[error("producer for route {path:?} failed: {message}")]
    Producer { path: KString, message: String },
});

/// A content producer for one route. Total and side-effect-free with
/// respect to router state: reads the injected configuration, builds
/// a fresh tree, returns. Must not block.
pub trait Producer<C>: Send + Sync {
    fn produce(&self, config: &C, html: &Html) -> Result<Node>;
}

/// Allow closures to be used as `Producer`s.
pub struct FnProducer<F>(pub F);

impl<C, F> Producer<C> for FnProducer<F>
where
    F: Fn(&C, &Html) -> Result<Node> + Send + Sync,
{
    fn produce(&self, config: &C, html: &Html) -> Result<Node> {
        (self.0)(config, html)
    }
}

pub struct RouteEntry<C> {
    pattern: KString,
    producer: Arc<dyn Producer<C>>,
}

impl<C> RouteEntry<C> {
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl<C> Debug for RouteEntry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// Ordered mapping from normalized path to producer. The handful of
/// entries a site carries makes a linear scan the right lookup
/// structure.
#[derive(Debug)]
pub struct RouteTable<C> {
    entries: Vec<RouteEntry<C>>,
}

impl<C> RouteTable<C> {
    pub fn new() -> RouteTable<C> {
        RouteTable {
            entries: Vec::new(),
        }
    }

    /// Register a producer under a path, chaining. The path is
    /// normalized first; registering the same normalized path twice
    /// is a configuration error.
    pub fn add(
        &mut self,
        path: &str,
        producer: Arc<dyn Producer<C>>,
    ) -> Result<&mut Self, RouterError> {
        let pattern = normalize_path(path);
        if self.get(&pattern).is_some() {
            return Err(RouterErrorKind::DuplicateRoute { path: pattern }.into());
        }
        self.entries.push(RouteEntry { pattern, producer });
        Ok(self)
    }

    /// Exact lookup; `pattern` must already be normalized.
    fn get(&self, pattern: &str) -> Option<&RouteEntry<C>> {
        self.entries.iter().find(|e| e.pattern.as_str() == pattern)
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.pattern.as_str())
    }
}

impl<C> Default for RouteTable<C> {
    fn default() -> Self {
        RouteTable::new()
    }
}

/// Reacts to exactly one kind of external event (a path change) with
/// exactly one kind of output event (a content-subtree replacement).
///
/// The hosting shell owns the current-path value and delivers its
/// changes through [`PathRouter::path_changed`]; recomputation is
/// synchronous and completes before the next event is accepted, so
/// the transient resolving state is never observable.
pub struct PathRouter<C> {
    table: RouteTable<C>,
    default_pattern: KString,
    config: C,
    html: Html,
    content: SwapCell<Node>,
    on_content: Option<Box<dyn Fn(&Arc<Node>) + Send + Sync>>,
}

impl<C> PathRouter<C> {
    /// `default_path` must already be registered in `table`,
    /// otherwise construction fails.
    pub fn new(table: RouteTable<C>, default_path: &str, config: C) -> Result<Self, RouterError> {
        let default_pattern = normalize_path(default_path);
        if table.get(&default_pattern).is_none() {
            return Err(RouterErrorKind::MissingDefault {
                path: default_pattern,
            }
            .into());
        }
        Ok(PathRouter {
            table,
            default_pattern,
            config,
            html: Html::new(),
            content: SwapCell::new(Arc::new(Node::None)),
            on_content: None,
        })
    }

    /// Register the outbound `contentChanged` listener, called with
    /// every newly published subtree.
    pub fn set_content_listener(&mut self, f: impl Fn(&Arc<Node>) + Send + Sync + 'static) {
        self.on_content = Some(Box::new(f));
    }

    /// Compute the content tree for `path` without publishing it.
    /// A miss resolves to the default entry; a failing producer is
    /// reported as is, with no retry and no fallback.
    pub fn resolve(&self, path: &str) -> Result<Node, RouterError> {
        let pattern = normalize_path(path);
        let entry = match self.table.get(&pattern) {
            Some(entry) => entry,
            None => {
                warn!("no route for {:?}, using default", path);
                self.table
                    .get(&self.default_pattern)
                    .expect("default checked at construction")
            }
        };
        entry
            .producer
            .produce(&self.config, &self.html)
            .map_err(|e| {
                RouterErrorKind::Producer {
                    path: entry.pattern.clone(),
                    message: format!("{e:#}"),
                }
                .into()
            })
    }

    /// Inbound `pathChanged` notification, including the initial
    /// mount. Recomputes, publishes the new subtree wholesale, then
    /// notifies the listener. On producer failure the previously
    /// published subtree stays in place untouched.
    pub fn path_changed(&self, path: &str) -> Result<Arc<Node>, RouterError> {
        let tree = Arc::new(self.resolve(path)?);
        self.content.set(Arc::clone(&tree));
        if let Some(f) = &self.on_content {
            f(&tree);
        }
        Ok(tree)
    }

    /// The currently published content subtree ([`Node::None`] before
    /// the initial mount).
    pub fn current_tree(&self) -> Arc<Node> {
        self.content.get()
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::bail;
    use atree::Print;

    use super::*;

    fn leaf(text: &'static str) -> Arc<dyn Producer<()>> {
        Arc::new(FnProducer(move |_: &(), html: &Html| -> Result<Node> {
            Ok(html.p([], text)?)
        }))
    }

    fn table() -> RouteTable<()> {
        let mut t = RouteTable::new();
        t.add("/", leaf("Home"))
            .unwrap()
            .add("/projects", leaf("Projects"))
            .unwrap();
        t
    }

    #[test]
    fn t_duplicate_route() {
        let mut t = table();
        let e = t.add("/projects", leaf("Again")).err().unwrap();
        assert_eq!(
            e.to_string(),
            "route table already contains an entry for \"/projects\""
        );
        // a trailing-slash variant is the same normalized pattern
        let e = t.add("/projects/", leaf("Again")).err().unwrap();
        assert!(matches!(*e, RouterErrorKind::DuplicateRoute { .. }));
    }

    #[test]
    fn t_missing_default() {
        let e = PathRouter::new(table(), "/nope", ()).err().unwrap();
        assert_eq!(e.to_string(), "default route \"/nope\" is not registered");
    }

    #[test]
    fn t_resolve_deterministic() -> Result<()> {
        let router = PathRouter::new(table(), "/", ())?;
        let a = router.resolve("/projects")?;
        let b = router.resolve("/projects")?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn t_default_fallback() -> Result<()> {
        let router = PathRouter::new(table(), "/", ())?;
        assert_eq!(router.resolve("/nonexistent")?, router.resolve("/")?);
        assert_eq!(router.resolve("")?, router.resolve("/")?);
        Ok(())
    }

    #[test]
    fn t_trailing_slash_equivalence() -> Result<()> {
        let router = PathRouter::new(table(), "/", ())?;
        assert_eq!(router.resolve("/projects/")?, router.resolve("/projects")?);
        Ok(())
    }

    #[test]
    fn t_navigation_scenario() -> Result<()> {
        let router = PathRouter::new(table(), "/", ())?;
        assert_eq!(*router.current_tree(), Node::None);

        let tree = router.path_changed("/projects")?;
        assert_eq!(tree.to_html_fragment_string()?, "<p>Projects</p>");
        assert_eq!(router.current_tree(), tree);

        // unknown paths publish the default page, not an error
        let tree = router.path_changed("/unknown")?;
        assert_eq!(tree.to_html_fragment_string()?, "<p>Home</p>");
        assert_eq!(router.current_tree(), tree);
        Ok(())
    }

    #[test]
    fn t_content_listener() -> Result<()> {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let mut router = PathRouter::new(table(), "/", ())?;
        router.set_content_listener(|tree| {
            assert!(matches!(**tree, Node::Element(_)));
            CALLS.fetch_add(1, Ordering::SeqCst);
        });
        router.path_changed("/")?;
        router.path_changed("/projects")?;
        assert_eq!(CALLS.load(Ordering::SeqCst), 2);
        Ok(())
    }

    #[test]
    fn t_failing_producer_keeps_prior_tree() -> Result<()> {
        let mut t = RouteTable::new();
        t.add("/", leaf("Home"))?
            .add(
                "/broken",
                Arc::new(FnProducer(|_: &(), _: &Html| -> Result<Node> {
                    bail!("no content today")
                })),
            )?;
        let router = PathRouter::new(t, "/", ())?;
        let home = router.path_changed("/")?;

        let e = router.path_changed("/broken").err().unwrap();
        assert_eq!(
            e.to_string(),
            "producer for route \"/broken\" failed: no content today"
        );
        // the published subtree is still entirely the prior route's
        assert_eq!(router.current_tree(), home);
        Ok(())
    }
}
