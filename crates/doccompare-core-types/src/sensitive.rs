//! Sensitive data marker for automatic redaction
//!
//! Uploaded documents are frequently contracts or other confidential
//! material. Wrapping their raw bytes in `Sensitive<T>` keeps them out of
//! `Debug` output and therefore out of structured logs.

use std::fmt;

/// Wrapper for sensitive data that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use doccompare_core_types::Sensitive;
///
/// let contents = Sensitive::new(b"Confidential terms".to_vec());
/// assert_eq!(format!("{:?}", contents), "***REDACTED***");
/// assert_eq!(contents.byte_len(), 18);
///
/// // Access the actual value when needed
/// assert_eq!(contents.expose().as_slice(), b"Confidential terms");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying sensitive value
    ///
    /// Only extraction backends should need this.
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: AsRef<[u8]>> Sensitive<T> {
    /// Size of the wrapped payload in bytes; safe to log
    pub fn byte_len(&self) -> usize {
        self.0.as_ref().len()
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}
