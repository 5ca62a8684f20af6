mod macros;

pub trait Apply {
    /// Applies the function `f` only if `value` is `Some(...)` and provides the
    /// contained value to `f`.
    ///
    /// #### Example
    /// ```rust
    /// # use portfolio_utils::Apply;
    /// fn prefix(subject: String, prefix: Option<&str>) -> String {
    ///     subject.apply_map(prefix, |slf, prefix| format!("{prefix} {slf}"))
    /// }
    /// assert_eq!(prefix("Hello".into(), None), "Hello");
    /// assert_eq!(prefix("Hello".into(), Some("[Contact]")), "[Contact] Hello");
    /// ```
    fn apply_map<U>(self, value: Option<U>, f: impl FnOnce(Self, U) -> Self) -> Self
    where
        Self: Sized,
    {
        match value {
            Some(value) => f(self, value),
            None => self,
        }
    }
}

impl<T> Apply for T {}

pub fn portfolio_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
