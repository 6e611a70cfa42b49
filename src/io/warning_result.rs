/// A value that may come with warnings raised while reading it.
///
/// Unlike a `Result`, there is always a value; the warnings are just informative.
pub enum WarningResult<T, W> {
    Ok(T),
    Warned(T, Vec<W>),
}

impl<T, W> WarningResult<T, W> {
    /// Builds a value from a list of warnings, which may be empty.
    pub fn with_warnings(value: T, warnings: Vec<W>) -> Self {
        if warnings.is_empty() {
            WarningResult::Ok(value)
        } else {
            WarningResult::Warned(value, warnings)
        }
    }

    /// Consumes the warnings, returning the value.
    ///
    /// The warnings (if any) are passed to the provided callback.
    pub fn consume_warnings<F>(self, f: F) -> T
    where
        F: FnOnce(Vec<W>),
    {
        match self {
            WarningResult::Ok(t) => t,
            WarningResult::Warned(t, w) => {
                f(w);
                t
            }
        }
    }

    /// Applies a function to the value, keeping the warnings.
    pub fn map<U, F>(self, f: F) -> WarningResult<U, W>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            WarningResult::Ok(t) => WarningResult::Ok(f(t)),
            WarningResult::Warned(t, w) => WarningResult::Warned(f(t), w),
        }
    }
}
