use crate::f;
use std::path::{Path, PathBuf};

/// Extends paths with the naming conventions used for facies outputs
pub trait PathExt {
    /// Case identifier taken from the file name with the extension stripped
    ///
    /// Only the final extension is removed, so `case.1.out` gives `case.1`.
    ///
    /// ```rust
    /// # use ftools_utils::PathExt;
    /// # use std::path::Path;
    /// assert_eq!(Path::new("runs/ti_001.out").case_id(), Some("ti_001".to_string()));
    /// assert_eq!(Path::new("runs/case.1.out").case_id(), Some("case.1".to_string()));
    /// assert_eq!(Path::new("/").case_id(), None);
    /// ```
    fn case_id(&self) -> Option<String>;

    /// Path in the same directory named `<case id><suffix>`
    ///
    /// ```rust
    /// # use ftools_utils::PathExt;
    /// # use std::path::{Path, PathBuf};
    /// let path = Path::new("runs/ti_001.out");
    /// assert_eq!(path.sibling(".npy"), PathBuf::from("runs/ti_001.npy"));
    /// assert_eq!(path.sibling("_slices.png"), PathBuf::from("runs/ti_001_slices.png"));
    /// ```
    fn sibling(&self, suffix: &str) -> PathBuf;

    /// True if the file name ends with the literal `suffix`
    ///
    /// Case sensitive, and does not care about what an extension is.
    ///
    /// ```rust
    /// # use ftools_utils::PathExt;
    /// # use std::path::Path;
    /// assert!(Path::new("runs/ti_001.out").ends_with_suffix(".out"));
    /// assert!(!Path::new("runs/ti_001.OUT").ends_with_suffix(".out"));
    /// assert!(!Path::new("runs/ti_001.out.bak").ends_with_suffix(".out"));
    /// ```
    fn ends_with_suffix(&self, suffix: &str) -> bool;
}

impl<P: AsRef<Path>> PathExt for P {
    fn case_id(&self) -> Option<String> {
        self.as_ref()
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let path = self.as_ref();
        let name = f!("{}{suffix}", path.case_id().unwrap_or_default());
        path.with_file_name(name)
    }

    fn ends_with_suffix(&self, suffix: &str) -> bool {
        self.as_ref()
            .file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(suffix))
    }
}
