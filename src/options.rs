//! Configuration options for decoding and text output.
//!
//! - [`ReadOptions`]: limits applied by the binary reader and the text parser
//! - [`SnbtOptions`]: formatting of stringified output
//!
//! ## Examples
//!
//! ```rust
//! use nbt_codec::{from_snbt_with_options, to_snbt_with_options, ReadOptions, SnbtOptions};
//!
//! let options = ReadOptions::new().with_max_depth(2);
//! assert!(from_snbt_with_options("{a: {b: {c: 1}}}", &options).is_err());
//!
//! let tag = from_snbt_with_options("{a: 1}", &ReadOptions::default()).unwrap();
//! let pretty = to_snbt_with_options(&tag, &SnbtOptions::pretty());
//! assert_eq!(pretty, "{\n  a: 1\n}");
//! ```

/// Default nesting limit. Both codecs recurse once per level, and this keeps
/// the deepest accepted input within a 2 MiB thread stack in debug builds.
/// Raise it with [`ReadOptions::with_max_depth`] on threads with more stack.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Default ceiling for array, list and string element counts.
pub const DEFAULT_MAX_LEN: usize = 16 * 1024 * 1024;

/// Limits applied while decoding untrusted input.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::ReadOptions;
///
/// let options = ReadOptions::new();
/// assert_eq!(options.max_depth, 128);
///
/// let strict = ReadOptions::new().with_max_depth(16).with_max_len(1024);
/// assert_eq!(strict.max_len, 1024);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadOptions {
    pub max_depth: usize,
    pub max_len: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            max_len: DEFAULT_MAX_LEN,
        }
    }
}

impl ReadOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum container nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the maximum element count of a single array or list.
    #[must_use]
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }
}

/// Formatting options for stringified output.
///
/// The default is the compact canonical form: `{key: value, key: value}` and
/// `[ a, b ]`. Pretty output breaks compounds and lists of containers over
/// indented lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnbtOptions {
    pub indent: usize,
    pub pretty: bool,
}

impl Default for SnbtOptions {
    fn default() -> Self {
        SnbtOptions {
            indent: 2,
            pretty: false,
        }
    }
}

impl SnbtOptions {
    /// Creates default options (compact canonical form).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nbt_codec::SnbtOptions;
    ///
    /// let options = SnbtOptions::new();
    /// assert!(!options.pretty);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for multi-line output.
    #[must_use]
    pub fn pretty() -> Self {
        SnbtOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the indentation size. Only affects pretty output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nbt_codec::SnbtOptions;
    ///
    /// let options = SnbtOptions::pretty().with_indent(4);
    /// assert_eq!(options.indent, 4);
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}
