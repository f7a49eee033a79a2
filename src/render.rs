//! The list-rendering core.
//!
//! Maps an ordered slice of entries to an ordered sequence of rendered
//! nodes, one per entry, dispatching each to one of two injected renderers
//! and tagging each node with the entry's name as its identity key. The
//! module knows nothing about any UI toolkit, so renderers can be plain
//! closures in tests.

use std::collections::HashMap;

use crate::entries::{Entry, ObjectEntry, PrefixEntry};

/// Turns a prefix entry into a rendered node.
pub trait PrefixRenderer<N> {
    fn render(&self, prefix: &PrefixEntry) -> N;
}

/// Turns an object entry into a rendered node.
pub trait ObjectRenderer<N> {
    fn render(&self, object: &ObjectEntry) -> N;
}

impl<N, F> PrefixRenderer<N> for F
where
    F: Fn(&PrefixEntry) -> N,
{
    fn render(&self, prefix: &PrefixEntry) -> N {
        self(prefix)
    }
}

impl<N, F> ObjectRenderer<N> for F
where
    F: Fn(&ObjectEntry) -> N,
{
    fn render(&self, object: &ObjectEntry) -> N {
        self(object)
    }
}

/// A rendered node tagged with the name of the entry it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyed<N> {
    key: String,
    node: N,
}

impl<N> Keyed<N> {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn into_node(self) -> N {
        self.node
    }
}

/// Container wrapping one keyed node per input entry, in input order.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedList<N> {
    items: Vec<Keyed<N>>,
}

impl<N> RenderedList<N> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyed<N>> {
        self.items.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.key())
    }

    /// Unwraps the nodes, keeping their order.
    pub fn into_nodes(self) -> Vec<N> {
        self.items.into_iter().map(Keyed::into_node).collect()
    }
}

fn render_one<N, P, O>(entry: &Entry, prefixes: &P, objects: &O) -> N
where
    P: PrefixRenderer<N> + ?Sized,
    O: ObjectRenderer<N> + ?Sized,
{
    match entry {
        Entry::Prefix(prefix) => prefixes.render(prefix),
        Entry::Object(object) => objects.render(object),
    }
}

/// Renders every entry in input order. No entries are dropped, added or
/// reordered, and no validation is performed.
pub fn render_entries<N, P, O>(entries: &[Entry], prefixes: &P, objects: &O) -> RenderedList<N>
where
    P: PrefixRenderer<N> + ?Sized,
    O: ObjectRenderer<N> + ?Sized,
{
    let items = entries
        .iter()
        .map(|entry| Keyed {
            key: entry.name().to_owned(),
            node: render_one(entry, prefixes, objects),
        })
        .collect();
    RenderedList { items }
}

/// Keyed node reuse across re-renders.
///
/// An entry whose key was rendered before and whose value is unchanged gets
/// its previous node back without either renderer running; keys absent from
/// the new input are dropped.
pub struct RenderCache<N> {
    nodes: HashMap<String, (Entry, N)>,
}

impl<N: Clone> RenderCache<N> {
    pub fn new() -> RenderCache<N> {
        RenderCache {
            nodes: HashMap::new(),
        }
    }

    pub fn render_entries<P, O>(
        &mut self,
        entries: &[Entry],
        prefixes: &P,
        objects: &O,
    ) -> RenderedList<N>
    where
        P: PrefixRenderer<N> + ?Sized,
        O: ObjectRenderer<N> + ?Sized,
    {
        let mut next = HashMap::with_capacity(entries.len());
        let items = entries
            .iter()
            .map(|entry| {
                let key = entry.name().to_owned();
                let node = match self.nodes.get(&key) {
                    Some((cached, node)) if cached == entry => node.clone(),
                    _ => render_one(entry, prefixes, objects),
                };
                next.insert(key.clone(), (entry.clone(), node.clone()));
                Keyed { key, node }
            })
            .collect();
        self.nodes = next;
        RenderedList { items }
    }
}

impl<N: Clone> Default for RenderCache<N> {
    fn default() -> RenderCache<N> {
        RenderCache::new()
    }
}
