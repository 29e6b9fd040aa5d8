pub mod macros;

pub trait Apply {
    /// Passes `self` through the function `f`.
    fn apply(self, f: impl FnOnce(Self) -> Self) -> Self
    where
        Self: Sized,
    {
        f(self)
    }

    /// Applies the function `f` only if `value` is `Some(...)` and provides the
    /// contained value to `f`.
    ///
    /// #### Example
    /// ```rust
    /// # use immerse_utils::Apply;
    /// fn greet(greeting: String, name: Option<&str>) -> String {
    ///     greeting.apply_map(name, |slf, name| format!("{slf}, {name}"))
    /// }
    /// assert_eq!(greet("Hello".into(), None), "Hello");
    /// assert_eq!(greet("Hello".into(), Some("Ann")), "Hello, Ann");
    /// ```
    fn apply_map<U>(self, value: Option<U>, f: impl FnOnce(Self, U) -> Self) -> Self
    where
        Self: Sized,
    {
        if let Some(value) = value {
            f(self, value)
        } else {
            self
        }
    }
}

impl<T> Apply for T {}

/// Returns the version of the immerse binaries, including the git commit when
/// it was known at build time.
pub const fn immerse_version() -> &'static str {
    match option_env!("IMMERSE_VERSION") {
        Some(version) => version,
        None => env!("CARGO_PKG_VERSION"),
    }
}
