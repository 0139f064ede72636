//! Registration macros with dependency-name inference.
//!
//! [`factory!`](crate::factory) and [`constructed!`](crate::constructed)
//! mirror the explicit-deps methods on [`Injector`](crate::Injector) but
//! derive the dependency list from the closure's declared parameter
//! names, the way the original injector inspected a function's source
//! text: the parameter list is captured with `stringify!` and parsed by
//! [`parameter_names`](crate::extract::parameter_names).
//!
//! Each parameter binds as `Arc<T>` inside the body:
//!
//! ```
//! use armature_injector::{factory, Injector};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), armature_injector::Error> {
//! let injector = Injector::new();
//! injector.constant("base", String::from("https://s.example"))?;
//! factory!(injector, "home", |base: String| format!("{base}/"))?;
//!
//! let home = injector.resolve_as::<String>("home").await?;
//! assert_eq!(*home, "https://s.example/");
//! # Ok(())
//! # }
//! ```

/// Registers a factory, inferring its dependencies from the closure's
/// parameter names.
#[macro_export]
macro_rules! factory {
    ($injector:expr, $name:expr, || $body:expr) => {
        $crate::factory!($injector, $name, | | $body)
    };
    ($injector:expr, $name:expr, | $($param:ident : $ty:ty),* $(,)? | $body:expr) => {
        match $crate::extract::parameter_names(stringify!(($($param),*))) {
            Ok(dependencies) => {
                $injector.factory($name, dependencies, move |resolved: $crate::Resolved| {
                    $crate::bind_parameters!(resolved, 0usize, $($param : $ty),*);
                    Ok($body)
                })
            }
            Err(err) => Err($crate::Error::from(err)),
        }
    };
}

/// Registers a constructor-like builder, inferring its dependencies from
/// the closure's parameter names. A zero-parameter closure models a
/// builder with no explicit initializer: empty dependency list.
#[macro_export]
macro_rules! constructed {
    ($injector:expr, $name:expr, || $body:expr) => {
        $crate::constructed!($injector, $name, | | $body)
    };
    ($injector:expr, $name:expr, | $($param:ident : $ty:ty),* $(,)? | $body:expr) => {
        match $crate::extract::parameter_names(stringify!(($($param),*))) {
            Ok(dependencies) => {
                $injector.constructed($name, dependencies, move |resolved: $crate::Resolved| {
                    $crate::bind_parameters!(resolved, 0usize, $($param : $ty),*);
                    Ok($body)
                })
            }
            Err(err) => Err($crate::Error::from(err)),
        }
    };
}

/// Binds each closure parameter to its positional resolved value.
#[doc(hidden)]
#[macro_export]
macro_rules! bind_parameters {
    ($resolved:ident, $index:expr $(,)?) => {
        let _ = &$resolved;
    };
    ($resolved:ident, $index:expr, $param:ident : $ty:ty $(, $rest:ident : $rest_ty:ty)*) => {
        let $param: ::std::sync::Arc<$ty> = $resolved.get($index)?;
        $crate::bind_parameters!($resolved, $index + 1usize $(, $rest : $rest_ty)*);
    };
}
