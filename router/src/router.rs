use std::collections::HashMap;

use http::Method;

use super::{pattern::Pattern, tree::Node, InsertError, MatchError, Params};

/// A URL router holding one segment trie per HTTP method.
///
/// See [the crate documentation](crate) for details.
#[derive(Clone)]
pub struct Router<T> {
    roots: HashMap<Method, Node<T>>,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    /// Construct a new router.
    pub fn new() -> Self {
        Self { roots: HashMap::new() }
    }

    /// Insert a route.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flash_router::Router;
    /// # use http::Method;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router = Router::new();
    /// router.insert(Method::GET, "/home", "Welcome!")?;
    /// router.insert(Method::GET, "/users/:id", "A User")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn insert(&mut self, method: Method, route: &str, value: T) -> Result<(), InsertError>
    where
        T: Clone,
    {
        self.insert_with_extras(method, route, &[], value)
    }

    /// Insert a route with trailing optional parameters appended to it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flash_router::Router;
    /// # use http::Method;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router = Router::new();
    /// router.insert_with_extras(Method::GET, "/pages", &["id", "action"], "pages")?;
    ///
    /// let matched = router.at(&Method::GET, "/pages/1")?;
    /// assert_eq!(matched.params.get("id"), Some("1"));
    /// assert_eq!(matched.params.get("action"), Some(""));
    /// # Ok(())
    /// # }
    /// ```
    pub fn insert_with_extras(&mut self, method: Method, route: &str, extras: &[&str], value: T) -> Result<(), InsertError>
    where
        T: Clone,
    {
        let pattern = Pattern::parse_with_extras(route, extras)?;
        self.insert_pattern(method, &pattern, value)
    }

    /// Insert an already parsed [Pattern].
    pub fn insert_pattern(&mut self, method: Method, pattern: &Pattern, value: T) -> Result<(), InsertError>
    where
        T: Clone,
    {
        match self.roots.get_mut(&method) {
            Some(root) => root.insert(pattern, value),
            None => {
                let mut root = Node::default();
                root.insert(pattern, value)?;
                self.roots.insert(method, root);
                Ok(())
            }
        }
    }

    /// Tries to find a value in the router matching the given method and path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flash_router::Router;
    /// # use http::Method;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router = Router::new();
    /// router.insert(Method::GET, "/home", "Welcome!")?;
    ///
    /// let matched = router.at(&Method::GET, "/home/").unwrap();
    /// assert_eq!(*matched.value, "Welcome!");
    /// assert_eq!(matched.route, "/home");
    ///
    /// assert!(router.at(&Method::POST, "/home").is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn at<'m, 'p>(&'m self, method: &Method, path: &'p str) -> Result<Match<'m, 'p, &'m T>, MatchError> {
        let root = self.roots.get(method).ok_or(MatchError)?;
        root.at(path).map(|(leaf, params)| Match {
            value: &leaf.value,
            params,
            route: &leaf.route,
        })
    }

    /// Total number of trie nodes across all methods.
    pub fn node_count(&self) -> usize {
        self.roots.values().map(Node::count).sum()
    }
}

/// A successful match consisting of the registered value
/// and URL parameters, returned by [`Router::at`](Router::at).
#[derive(Debug)]
pub struct Match<'m, 'p, V> {
    /// The value stored under the matched node.
    pub value: V,
    /// The route parameters. See [parameters](crate#parameters) for more details.
    pub params: Params<'m, 'p>,
    /// The pattern the matched route was registered with.
    pub route: &'m str,
}
