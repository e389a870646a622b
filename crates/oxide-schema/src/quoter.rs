//! Generic identifier quoting.
//!
//! A [`Quoter`] wraps identifiers in a dialect's quote characters, one
//! dot-separated part at a time, but only for parts its reserved-word check
//! accepts. Parts that are already quoted and the `*` wildcard are copied
//! through untouched.

use std::fmt::{self, Write};

/// Reserved-word check that treats every identifier as reserved.
#[must_use]
pub const fn always_reserve(_name: &str) -> bool {
    true
}

/// Quotes identifiers with a prefix/suffix pair.
#[derive(Clone, Copy)]
pub struct Quoter {
    pub prefix: char,
    pub suffix: char,
    pub is_reserved: fn(&str) -> bool,
}

impl fmt::Debug for Quoter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quoter")
            .field("prefix", &self.prefix)
            .field("suffix", &self.suffix)
            .finish_non_exhaustive()
    }
}

impl Quoter {
    #[must_use]
    pub const fn new(prefix: char, suffix: char, is_reserved: fn(&str) -> bool) -> Self {
        Self {
            prefix,
            suffix,
            is_reserved,
        }
    }

    /// Quotes every part of a possibly schema-qualified name.
    #[must_use]
    pub fn quote(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        // Writing into a String cannot fail.
        let _ = self.quote_to(&mut out, value);
        out
    }

    /// Writes `value` to `w`, quoting each dot-separated part that the
    /// reserved check selects.
    pub fn quote_to<W: Write>(&self, w: &mut W, value: &str) -> fmt::Result {
        let value = value.trim();
        if value == "*" {
            return w.write_str(value);
        }
        for (i, part) in value.split('.').enumerate() {
            if i > 0 {
                w.write_char('.')?;
            }
            let part = part.trim();
            if self.is_quoted(part) || part == "*" || !(self.is_reserved)(part) {
                w.write_str(part)?;
            } else {
                w.write_char(self.prefix)?;
                w.write_str(part)?;
                w.write_char(self.suffix)?;
            }
        }
        Ok(())
    }

    /// Quotes each name and joins them with `sep`.
    pub fn join_write<W: Write, S: AsRef<str>>(
        &self,
        w: &mut W,
        names: &[S],
        sep: &str,
    ) -> fmt::Result {
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                w.write_str(sep)?;
            }
            self.quote_to(w, name.as_ref())?;
        }
        Ok(())
    }

    /// Quotes each name and joins them with `sep`.
    #[must_use]
    pub fn join<S: AsRef<str>>(&self, names: &[S], sep: &str) -> String {
        let mut out = String::new();
        let _ = self.join_write(&mut out, names, sep);
        out
    }

    fn is_quoted(&self, part: &str) -> bool {
        part.len() >= 2 && part.starts_with(self.prefix) && part.ends_with(self.suffix)
    }
}
