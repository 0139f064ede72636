use armature_injector::{constructed, factory, Error, Injector};
use std::sync::Arc;

#[tokio::test]
async fn chained_factories_resolve_through_their_dependencies() {
    let injector = Injector::new();
    injector.constant("x", 5_i64).unwrap();
    factory!(injector, "y", |x: i64| *x + 1).unwrap();
    factory!(injector, "z", |y: i64| *y * 2).unwrap();

    assert_eq!(*injector.resolve_as::<i64>("z").await.unwrap(), 12);
}

#[tokio::test]
async fn constant_resolves_to_the_stored_value() {
    let injector = Injector::new();
    injector
        .constant("config", String::from("https://s.example"))
        .unwrap();

    let config = injector.resolve_as::<String>("config").await.unwrap();
    assert_eq!(*config, "https://s.example");
}

#[tokio::test]
async fn factory_receives_dependencies_in_declared_order() {
    let injector = Injector::new();
    injector.constant("first", 1_i64).unwrap();
    injector.constant("second", 2_i64).unwrap();
    injector
        .factory("pair", ["second", "first"], |resolved| {
            let a = resolved.get::<i64>(0)?;
            let b = resolved.get::<i64>(1)?;
            Ok((*a, *b))
        })
        .unwrap();

    let pair = injector.resolve_as::<(i64, i64)>("pair").await.unwrap();
    assert_eq!(*pair, (2, 1));
}

#[tokio::test]
async fn unregistered_name_fails_naming_the_missing_identifier() {
    let injector = Injector::new();
    injector.constant("present", 1_i64).unwrap();

    let err = injector.resolve("missing").await.unwrap_err();
    assert!(matches!(
        err,
        Error::UnknownProvider(ref name) if name == "missing"
    ));
}

#[tokio::test]
async fn missing_transitive_dependency_propagates_fail_fast() {
    let injector = Injector::new();
    factory!(injector, "top", |absent: i64| *absent).unwrap();

    let err = injector.resolve("top").await.unwrap_err();
    assert!(matches!(
        err,
        Error::UnknownProvider(ref name) if name == "absent"
    ));
}

#[tokio::test]
async fn duplicate_registration_keeps_the_original_producer() {
    let injector = Injector::new();
    injector.constant("answer", 42_i64).unwrap();

    let err = injector.constant("answer", 0_i64).unwrap_err();
    assert!(matches!(
        err,
        Error::DuplicateProvider(ref name) if name == "answer"
    ));

    assert_eq!(*injector.resolve_as::<i64>("answer").await.unwrap(), 42);
}

struct HomeController {
    base_url: Arc<String>,
}

impl HomeController {
    fn new(base_url: Arc<String>) -> Self {
        Self { base_url }
    }

    fn home(&self) -> String {
        format!("{}/", self.base_url)
    }
}

#[tokio::test]
async fn constructed_builder_yields_a_fresh_instance() {
    let injector = Injector::new();
    injector
        .constant("base_url", String::from("https://s.example"))
        .unwrap();
    constructed!(injector, "controller", |base_url: String| {
        HomeController::new(base_url)
    })
    .unwrap();

    let controller = injector
        .resolve_as::<HomeController>("controller")
        .await
        .unwrap();
    assert_eq!(controller.home(), "https://s.example/");
}

#[tokio::test]
async fn builder_without_initializer_takes_no_dependencies() {
    #[derive(Default)]
    struct Defaults {
        limit: usize,
    }

    let injector = Injector::new();
    constructed!(injector, "defaults", || Defaults::default()).unwrap();

    let defaults = injector.resolve_as::<Defaults>("defaults").await.unwrap();
    assert_eq!(defaults.limit, 0);
}

#[tokio::test]
async fn repeated_resolution_returns_the_identical_value() {
    let injector = Injector::new();
    factory!(injector, "service", || String::from("built")).unwrap();

    let a = injector.resolve("service").await.unwrap();
    let b = injector.resolve("service").await.unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[tokio::test]
async fn typed_resolution_of_the_wrong_type_fails() {
    let injector = Injector::new();
    injector.constant("count", 3_i64).unwrap();

    let err = injector.resolve_as::<String>("count").await.unwrap_err();
    assert!(matches!(
        err,
        Error::TypeMismatch { ref name, .. } if name == "count"
    ));
}

#[tokio::test]
async fn async_factory_builds_through_await_points() {
    let injector = Injector::new();
    injector.constant("path", String::from("abc12")).unwrap();
    injector
        .factory_async("record", ["path"], |resolved| async move {
            let path = resolved.get::<String>(0)?;
            tokio::task::yield_now().await;
            Ok(format!("record for {path}"))
        })
        .unwrap();

    let record = injector.resolve_as::<String>("record").await.unwrap();
    assert_eq!(*record, "record for abc12");
}
