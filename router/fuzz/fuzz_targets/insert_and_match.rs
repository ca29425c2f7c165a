#![no_main]
use flash_router::Router;
use http::Method;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<(String, i32)>, String, Option<(String, String)>)| {
    let mut router = Router::new();

    for (pattern, item) in data.0 {
        let _ = router.insert(Method::GET, &pattern, item);
    }

    let _ = router.at(&Method::GET, &data.1);

    if let Some((id, action)) = data.2 {
        let _ = flash_router::action::resolve(&Method::GET, &id, &action, &["GETCollection"]);
    }
});
