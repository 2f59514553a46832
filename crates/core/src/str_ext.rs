//! Extension traits for `str`.
//!
//! Environment values and CLI strings arrive with stray whitespace and
//! sometimes empty; these helpers collapse that to `Option` semantics.

/// Extension trait for `str` to handle blank-as-none semantics.
pub trait StrExt {
    /// Returns the trimmed value, or `None` if nothing is left after trimming.
    ///
    /// # Example
    /// ```
    /// use auth_core::StrExt;
    ///
    /// assert_eq!("  localhost:9099 ".non_blank(), Some("localhost:9099"));
    /// assert_eq!("   ".non_blank(), None);
    /// ```
    #[must_use]
    fn non_blank(&self) -> Option<&str>;

    /// Length in characters rather than bytes.
    #[must_use]
    fn char_len(&self) -> usize;
}

impl StrExt for str {
    #[inline]
    fn non_blank(&self) -> Option<&str> {
        let trimmed = self.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    #[inline]
    fn char_len(&self) -> usize {
        self.chars().count()
    }
}

/// Extension trait for `Option<String>` mirroring [`StrExt::non_blank`].
pub trait OptionStrExt {
    /// Trimmed owned value, `None` when absent or blank.
    #[must_use]
    fn non_blank(&self) -> Option<String>;
}

impl OptionStrExt for Option<String> {
    #[inline]
    fn non_blank(&self) -> Option<String> {
        self.as_deref().and_then(StrExt::non_blank).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_trims() {
        assert_eq!(" a ".non_blank(), Some("a"));
        assert_eq!("".non_blank(), None);
        assert_eq!("\t\n".non_blank(), None);
    }

    #[test]
    fn char_len_counts_chars() {
        assert_eq!("héllo".char_len(), 5);
        assert_eq!("héllo".len(), 6);
    }

    #[test]
    fn option_non_blank() {
        assert_eq!(Some(" x ".to_string()).non_blank(), Some("x".to_string()));
        assert_eq!(Some("  ".to_string()).non_blank(), None);
        assert_eq!(None::<String>.non_blank(), None);
    }
}
