use std::{borrow::Cow, collections::HashMap};

use crate::{
    params::Params,
    pattern::{Pattern, Segment},
    InsertError, MatchError, SmallStr,
};

/// A segment trie used for URL path matching.
///
/// See [the crate documentation](crate) for details.
#[derive(Clone)]
pub(crate) struct Node<T> {
    // Children reached by exact segment text.
    statics: HashMap<Box<str>, Node<T>>,

    // Child reached by any segment without a static match.
    named: Option<Box<Node<T>>>,

    // Child consuming every remaining segment.
    greedy: Option<Box<Node<T>>>,

    // The route terminating at this node.
    leaf: Option<Leaf<T>>,
}

/// A registered route stored at the node it terminates on.
#[derive(Clone)]
pub(crate) struct Leaf<T> {
    pub(crate) value: T,

    // Every parameter name of the route in declaration order, including the optional tail that
    // may not be bound at this node.
    pub(crate) params: Box<[SmallStr]>,

    // Number of parameters bound positionally on the way from root to this node.
    bound: usize,

    // The pattern this route was registered with.
    pub(crate) route: Box<str>,
}

impl<T> Leaf<T> {
    fn same_bound_params(&self, names: &[&str]) -> bool {
        self.params[..self.bound].iter().map(|p| p.as_ref()).eq(names[..self.bound].iter().copied())
    }
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            statics: HashMap::new(),
            named: None,
            greedy: None,
            leaf: None,
        }
    }
}

impl<T> Node<T> {
    fn static_mut(&mut self, segment: &str) -> &mut Node<T> {
        self.statics.entry(segment.into()).or_default()
    }

    fn named_mut(&mut self) -> &mut Node<T> {
        self.named.get_or_insert_with(Default::default)
    }

    fn greedy_mut(&mut self) -> &mut Node<T> {
        self.greedy.get_or_insert_with(Default::default)
    }

    fn conflicting_leaf(&self, names: &[&str]) -> Option<&Leaf<T>> {
        self.leaf.as_ref().filter(|leaf| !leaf.same_bound_params(names))
    }

    // Walk the nodes an insertion of pattern would touch without mutating anything and return the
    // first existing leaf binding different parameter names at the same position.
    fn conflict(&self, pattern: &Pattern) -> Option<&Leaf<T>> {
        let names = pattern.params().collect::<Vec<_>>();

        let mut node = self;
        let mut segments = pattern.segments().iter().peekable();

        while let Some(segment) = segments.next_if(|s| s.is_required()) {
            node = match segment {
                Segment::Literal(lit) => node.statics.get(lit.as_str())?,
                _ => node.named.as_deref()?,
            };
        }

        if let Some(leaf) = node.conflicting_leaf(&names) {
            return Some(leaf);
        }

        for segment in segments {
            node = match segment {
                Segment::Greedy(_) => node.greedy.as_deref()?,
                _ => node.named.as_deref()?,
            };

            if let Some(leaf) = node.conflicting_leaf(&names) {
                return Some(leaf);
            }
        }

        None
    }

    // Insert a route into the tree.
    //
    // The node reached by the last required segment and every node of the optional tail receive a
    // leaf so a path stopping early still matches.
    pub(crate) fn insert(&mut self, pattern: &Pattern, value: T) -> Result<(), InsertError>
    where
        T: Clone,
    {
        if let Some(leaf) = self.conflict(pattern) {
            return Err(InsertError::Conflict {
                with: leaf.route.to_string(),
            });
        }

        let params = pattern.params().map(SmallStr::from).collect::<Box<[_]>>();
        let route = Box::<str>::from(pattern.source());
        let leaf = |bound| Leaf {
            value: value.clone(),
            params: params.clone(),
            bound,
            route: route.clone(),
        };

        let mut node = self;
        let mut bound = 0;
        let mut segments = pattern.segments().iter().peekable();

        while let Some(segment) = segments.next_if(|s| s.is_required()) {
            node = match segment {
                Segment::Literal(lit) => node.static_mut(lit),
                _ => {
                    bound += 1;
                    node.named_mut()
                }
            };
        }

        node.leaf = Some(leaf(bound));

        for segment in segments {
            bound += 1;
            node = match segment {
                Segment::Greedy(_) => node.greedy_mut(),
                _ => node.named_mut(),
            };
            node.leaf = Some(leaf(bound));
        }

        Ok(())
    }

    // Match a path against the tree.
    //
    // Static children are preferred over the named child which is preferred over the greedy child.
    // A segment matching none of them fails the whole match.
    pub(crate) fn at<'m, 'p>(&'m self, path: &'p str) -> Result<(&'m Leaf<T>, Params<'m, 'p>), MatchError> {
        let mut node = self;
        let mut params = Params::new();
        let mut rest = path;

        loop {
            rest = rest.trim_start_matches('/');

            if rest.is_empty() {
                break;
            }

            let (segment, tail) = rest.split_at(rest.find('/').unwrap_or(rest.len()));

            if let Some(child) = node.statics.get(segment) {
                node = child;
            } else if let Some(child) = node.named.as_deref() {
                params.push(Cow::Borrowed(segment));
                node = child;
            } else if let Some(child) = node.greedy.as_deref() {
                params.push(join_tail(rest));
                node = child;
                break;
            } else {
                return Err(MatchError);
            }

            rest = tail;
        }

        let leaf = node.leaf.as_ref().ok_or(MatchError)?;
        params.bind(&leaf.params);
        Ok((leaf, params))
    }

    pub(crate) fn count(&self) -> usize {
        1 + self.statics.values().map(Node::count).sum::<usize>()
            + self.named.as_deref().map_or(0, Node::count)
            + self.greedy.as_deref().map_or(0, Node::count)
    }
}

// remaining path with trailing and repeated slashes removed.
fn join_tail(tail: &str) -> Cow<'_, str> {
    let tail = tail.trim_end_matches('/');

    if tail.contains("//") {
        let segments = tail.split('/').filter(|s| !s.is_empty()).collect::<Vec<_>>();
        Cow::Owned(segments.join("/"))
    } else {
        Cow::Borrowed(tail)
    }
}
