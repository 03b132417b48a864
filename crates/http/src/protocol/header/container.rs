use std::fmt;
use std::iter::Flatten;
use std::slice;

use indexmap::IndexMap;
use indexmap::map::Values;
use tracing::trace;

use super::cache_control::{DirectiveValue, parse_directives, render_directives};
use super::name::{CACHE_CONTROL, Header, normalize_name};
use crate::ensure;
use crate::protocol::HttpFormatError;

/// The headers stored under one canonical name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderSlot {
    Single(Header),
    Multiple(Vec<Header>),
}

impl HeaderSlot {
    /// All headers of the slot, in insertion order.
    pub fn headers(&self) -> &[Header] {
        match self {
            Self::Single(header) => slice::from_ref(header),
            Self::Multiple(headers) => headers,
        }
    }

    /// The first header of the slot.
    ///
    /// Slots of a container are never empty, removing the last value removes the slot itself.
    pub fn first(&self) -> Option<&Header> {
        self.headers().first()
    }

    pub fn len(&self) -> usize {
        self.headers().len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers().is_empty()
    }

    fn contains_value(&self, value: &str) -> bool {
        self.headers().iter().any(|header| header.value() == value)
    }

    fn push(&mut self, header: Header) {
        match self {
            Self::Single(existing) => {
                let existing = existing.clone();
                *self = Self::Multiple(vec![existing, header]);
            }
            Self::Multiple(headers) => headers.push(header),
        }
    }
}

impl<'a> IntoIterator for &'a HeaderSlot {
    type Item = &'a Header;
    type IntoIter = slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers().iter()
    }
}

/// An ordered collection of headers keyed by canonical name.
///
/// Iteration yields every header in the order its name was first inserted; repeated headers
/// are yielded one after the other at that position.
///
/// The `Cache-Control` header is mirrored by a directive map. Adding a raw `Cache-Control`
/// header reparses it and replaces the directives, while the directive methods
/// ([`add_directive`](Self::add_directive), [`remove_directive`](Self::remove_directive))
/// re-render the header after every change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderContainer {
    headers: IndexMap<String, HeaderSlot>,
    directives: IndexMap<String, DirectiveValue>,
}

impl HeaderContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header, see [`add_header`](Self::add_header).
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidHeaderName`] when the name is empty.
    pub fn add(&mut self, name: &str, value: impl Into<String>, prepend: bool) -> Result<(), HttpFormatError> {
        self.add_header(Header::new(name, value)?, prepend);
        Ok(())
    }

    /// Adds a header next to the existing ones with the same name.
    ///
    /// Adding a value the name already holds does nothing. `prepend` places a new name in front
    /// of all others, it has no effect on names already present.
    pub fn add_header(&mut self, header: Header, prepend: bool) {
        if header.name() == CACHE_CONTROL {
            self.directives = parse_directives(header.value());
            self.put(header, prepend);
            return;
        }

        match self.headers.get_mut(header.name()) {
            Some(slot) if slot.contains_value(header.value()) => {
                trace!(name = header.name(), "skipping duplicate header value");
            }
            Some(slot) => slot.push(header),
            None => self.put(header, prepend),
        }
    }

    /// Sets a header, see [`set_header`](Self::set_header).
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidHeaderName`] when the name is empty.
    pub fn set(&mut self, name: &str, value: impl Into<String>, prepend: bool) -> Result<(), HttpFormatError> {
        self.set_header(Header::new(name, value)?, prepend);
        Ok(())
    }

    /// Replaces all values of the header's name with this single header.
    ///
    /// An existing name keeps its position, a new name is added like [`add_header`](Self::add_header).
    pub fn set_header(&mut self, header: Header, prepend: bool) {
        if header.name() == CACHE_CONTROL {
            self.directives = parse_directives(header.value());
        }
        self.put(header, prepend);
    }

    fn put(&mut self, header: Header, prepend: bool) {
        if let Some(slot) = self.headers.get_mut(header.name()) {
            *slot = HeaderSlot::Single(header);
        } else if prepend {
            self.headers.shift_insert(0, header.name().to_string(), HeaderSlot::Single(header));
        } else {
            self.headers.insert(header.name().to_string(), HeaderSlot::Single(header));
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The header or headers stored under a name, matched case-insensitively.
    pub fn get(&self, name: &str) -> Option<&HeaderSlot> {
        let name = normalize_name(name).ok()?;
        self.headers.get(&name)
    }

    /// The first value of a header.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(HeaderSlot::first).map(Header::value)
    }

    /// All values of a header, empty when the header is absent.
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.get(name).map(|slot| slot.headers().iter().map(Header::value).collect()).unwrap_or_default()
    }

    /// All headers, multi-valued names expanded in place.
    pub fn get_all(&self) -> Vec<&Header> {
        self.iter().collect()
    }

    /// Removes every value of a header.
    ///
    /// Removing `Cache-Control` also clears the directive map.
    pub fn remove(&mut self, name: &str) -> Option<HeaderSlot> {
        let name = normalize_name(name).ok()?;
        if name == CACHE_CONTROL {
            self.directives.clear();
        }
        self.headers.shift_remove(&name)
    }

    pub fn remove_all<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.remove(name.as_ref());
        }
    }

    /// Removes a single value of a header, keeping the other values of that name.
    ///
    /// Returns whether the value was present.
    pub fn remove_value(&mut self, name: &str, value: &str) -> bool {
        let Ok(name) = normalize_name(name) else {
            return false;
        };
        let Some(slot) = self.headers.get_mut(&name) else {
            return false;
        };

        match slot {
            HeaderSlot::Single(header) => {
                if header.value() != value {
                    return false;
                }
            }
            HeaderSlot::Multiple(headers) => {
                let before = headers.len();
                headers.retain(|header| header.value() != value);
                let removed = headers.len() != before;

                if headers.len() == 1 {
                    let remaining = headers.remove(0);
                    *slot = HeaderSlot::Single(remaining);
                }
                return removed;
            }
        }

        self.remove(&name);
        true
    }

    /// The number of header values, each value of a repeated header counted separately.
    pub fn len(&self) -> usize {
        self.headers.values().map(HeaderSlot::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Sorts the headers by name.
    pub fn sort(&mut self) {
        self.headers.sort_keys();
    }

    pub fn iter(&self) -> Flatten<Values<'_, String, HeaderSlot>> {
        self.headers.values().flatten()
    }

    /// Sets a cache-control directive and re-renders the `Cache-Control` header.
    ///
    /// Directive names are lower-cased.
    ///
    /// # Errors
    ///
    /// Returns [`HttpFormatError::InvalidHeaderValue`] when the name or the value is empty.
    pub fn add_directive(&mut self, name: &str, value: impl Into<DirectiveValue>) -> Result<(), HttpFormatError> {
        let name = name.trim();
        ensure!(!name.is_empty(), HttpFormatError::invalid_header_value("cache-control directive name is empty"));

        let value = value.into();
        ensure!(
            value.as_str().is_none_or(|value| !value.is_empty()),
            HttpFormatError::invalid_header_value(format!("value of cache-control directive {name} is empty"))
        );

        self.put_directive(name, value);
        Ok(())
    }

    /// Sets a directive known to be valid, such as the constants of
    /// [`cache_control`](super::cache_control).
    pub(crate) fn put_directive(&mut self, name: &str, value: DirectiveValue) {
        self.directives.insert(name.to_ascii_lowercase(), value);
        self.sync_cache_control();
    }

    pub fn directive(&self, name: &str) -> Option<&DirectiveValue> {
        self.directives.get(&name.trim().to_ascii_lowercase())
    }

    /// Removes a cache-control directive, dropping the `Cache-Control` header once no
    /// directive remains.
    pub fn remove_directive(&mut self, name: &str) -> Option<DirectiveValue> {
        let removed = self.directives.shift_remove(&name.trim().to_ascii_lowercase())?;
        self.sync_cache_control();
        Some(removed)
    }

    pub fn directives(&self) -> &IndexMap<String, DirectiveValue> {
        &self.directives
    }

    fn sync_cache_control(&mut self) {
        let rendered = render_directives(&self.directives);
        if rendered.is_empty() {
            self.headers.shift_remove(CACHE_CONTROL);
            return;
        }

        let header = Header::from_canonical(CACHE_CONTROL, rendered);
        self.put(header, false);
    }
}

impl<'a> IntoIterator for &'a HeaderContainer {
    type Item = &'a Header;
    type IntoIter = Flatten<Values<'a, String, HeaderSlot>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for HeaderContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for header in self {
            write!(f, "{header}\r\n")?;
        }
        Ok(())
    }
}
