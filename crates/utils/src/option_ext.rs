use crate::f;

/// Extends Option for easy display formatting
pub trait OptionExt {
    /// Better option outputs
    ///
    /// Generic over anything that implements `Display`, this will either be the
    /// value contained within `Some()` or "none" for the `None` variant.
    ///
    /// Mostly used for logging header values that may not have parsed.
    ///
    /// ```rust
    /// # use ftools_utils::OptionExt;
    /// let variables: Option<usize> = Some(1);
    /// assert_eq!(variables.display(), "1");
    ///
    /// let variables: Option<usize> = None;
    /// assert_eq!(variables.display(), "none");
    /// ```
    fn display(&self) -> String;
}

impl<T: std::fmt::Display> OptionExt for Option<T> {
    fn display(&self) -> String {
        match self {
            Some(value) => f!("{value}"),
            None => "none".to_string(),
        }
    }
}
