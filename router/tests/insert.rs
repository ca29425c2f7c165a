use flash_router::{InsertError, Router};
use http::Method;

struct InsertTest(Vec<(&'static str, Result<(), InsertError>)>);

impl InsertTest {
    fn run(self) {
        let mut router = Router::new();
        for (route, expected) in self.0 {
            let got = router.insert(Method::GET, route, route.to_owned());
            assert_eq!(got, expected, "{route}");
        }
    }
}

fn conflict(with: &'static str) -> InsertError {
    InsertError::Conflict { with: with.into() }
}

#[test]
fn named_conflict() {
    InsertTest(vec![
        ("/a/:id", Ok(())),
        ("/a/:id", Ok(())),
        ("/a/:name", Err(conflict("/a/:id"))),
        ("/a/:id/:x", Ok(())),
        ("/a/:name/:x", Err(conflict("/a/:id/:x"))),
        ("/a/b", Ok(())),
        ("/a/b/:name", Ok(())),
        ("/:x/:y", Ok(())),
        ("/:y/:x", Err(conflict("/:x/:y"))),
    ])
    .run()
}

#[test]
fn optional_conflict() {
    InsertTest(vec![
        ("/c", Ok(())),
        ("/c/&id", Ok(())),
        ("/c/:key", Err(conflict("/c/&id"))),
        ("/c/:id", Ok(())),
        ("/d/&id/&action", Ok(())),
        ("/d/:id/:verb", Err(conflict("/d/&id/&action"))),
        // the conflicting tail link rejects the whole route.
        ("/d/&id/&verb", Err(conflict("/d/&id/&action"))),
    ])
    .run()
}

#[test]
fn greedy_conflict() {
    InsertTest(vec![
        ("/b/@rest", Ok(())),
        ("/b/@path", Err(conflict("/b/@rest"))),
        ("/b", Ok(())),
        ("/b/:id", Ok(())),
        ("/b/static", Ok(())),
    ])
    .run()
}

#[test]
fn invalid() {
    InsertTest(vec![
        ("/x/@rest/y", Err(InsertError::InvalidGreedy)),
        ("/x/@rest/@more", Err(InsertError::InvalidGreedy)),
        ("/x/&id/y", Err(InsertError::InvalidOptional)),
        ("/x/&id/:y", Err(InsertError::InvalidOptional)),
        ("/x/:", Err(InsertError::UnnamedParam)),
        ("/x/&", Err(InsertError::UnnamedParam)),
        ("/x/@", Err(InsertError::UnnamedParam)),
        ("//", Err(InsertError::Empty)),
        (
            "/x/:id/:id",
            Err(InsertError::DuplicateParam { name: "id".into() }),
        ),
        ("/", Ok(())),
        ("", Ok(())),
    ])
    .run()
}

#[test]
fn extras_after_greedy() {
    let mut router = Router::new();
    assert_eq!(
        router.insert_with_extras(Method::GET, "/files/@rest", &["id"], ()),
        Err(InsertError::InvalidGreedy)
    );
    assert_eq!(router.node_count(), 0);
}

#[test]
fn rejected_insert_leaves_router_untouched() {
    let mut router = Router::new();
    router.insert(Method::GET, "/a/:id", 1).unwrap();
    let count = router.node_count();

    assert_eq!(
        router.insert_with_extras(Method::GET, "/a/:name", &["action"], 2),
        Err(conflict("/a/:id"))
    );
    assert_eq!(router.node_count(), count);
    assert!(router.at(&Method::GET, "/a/1/edit").is_err());
    assert_eq!(*router.at(&Method::GET, "/a/1").unwrap().value, 1);
}

#[test]
fn methods_do_not_conflict() {
    let mut router = Router::new();
    router.insert(Method::GET, "/a/:id", ()).unwrap();
    router.insert(Method::POST, "/a/:name", ()).unwrap();
}

#[test]
fn error_display() {
    assert_eq!(
        conflict("/a/:id").to_string(),
        "insertion failed due to conflict with previously registered route: /a/:id"
    );
    assert_eq!(
        InsertError::InvalidGreedy.to_string(),
        "greedy parameters are only allowed at the end of a route"
    );
}
