//! Insertion-ordered map.
//!
//! [`OrderedMap`] is the container every record and keyed collection is converted into. It is
//! backed by [`IndexMap`], so lookups are O(1) and iteration follows insertion order.

use std::{fmt, io};

use indexmap::IndexMap;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
};
use serde_json::ser::Formatter;

use crate::OrderedValue;

/// A string-keyed map that remembers insertion order.
///
/// Re-inserting an existing key replaces the value in place; the key keeps its original
/// position. Keys are never re-sorted unless [`OrderedMap::sort_keys`] is called.
///
/// Equality is order-sensitive: two maps with the same entries in a different order are not
/// equal.
#[derive(Debug, Clone, Default)]
pub struct OrderedMap {
    entries: IndexMap<String, OrderedValue>,
    escape_html: bool,
}

impl OrderedMap {
    /// An empty map with HTML escaping disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            escape_html: false,
        }
    }

    /// Whether [`OrderedMap::to_json_string`] escapes HTML-sensitive characters.
    pub fn escape_html(&self) -> bool {
        self.escape_html
    }

    /// Toggle escaping of `<`, `>`, `&`, U+2028 and U+2029 in JSON produced by
    /// [`OrderedMap::to_json_string`] and [`OrderedMap::write_json`].
    ///
    /// The setting of the map the encoding starts from applies to the whole output, nested maps
    /// included. Encoding through [`Serialize`] (`serde_json::to_string`, `to_writer`, ...)
    /// never escapes; a `trace` event is emitted when an enabled flag is skipped that way.
    pub fn set_escape_html(&mut self, escape_html: bool) {
        self.escape_html = escape_html;
    }

    /// Insert a value, returning the previous value stored under `key`.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<OrderedValue>,
    ) -> Option<OrderedValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// The value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&OrderedValue> {
        self.entries.get(key)
    }

    /// Mutable access to the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut OrderedValue> {
        self.entries.get_mut(key)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove `key`, shifting later entries down so the remaining order is kept.
    pub fn remove(&mut self, key: &str) -> Option<OrderedValue> {
        self.entries.shift_remove(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &OrderedValue> {
        self.entries.values()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &OrderedValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reorder the entries by ascending key.
    pub fn sort_keys(&mut self) {
        self.entries.sort_keys();
    }

    /// Encode as compact JSON, keys in insertion order.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        let mut buffer = Vec::new();
        self.write_json(&mut buffer)?;
        String::from_utf8(buffer).map_err(<serde_json::Error as serde::ser::Error>::custom)
    }

    /// Encode as compact JSON into `writer`, keys in insertion order.
    pub fn write_json<W: io::Write>(&self, writer: W) -> serde_json::Result<()> {
        if self.escape_html {
            let mut serializer = serde_json::Serializer::with_formatter(writer, HtmlEscape);
            (&mut serializer).collect_map(&self.entries)
        } else {
            let mut serializer = serde_json::Serializer::new(writer);
            (&mut serializer).collect_map(&self.entries)
        }
    }
}

impl PartialEq for OrderedMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl Serialize for OrderedMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.escape_html {
            tracing::trace!(
                "escape_html is ignored outside OrderedMap::to_json_string and OrderedMap::write_json"
            );
        }
        serializer.collect_map(&self.entries)
    }
}

impl<'de> Deserialize<'de> for OrderedMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor)
    }
}

struct OrderedMapVisitor;

impl<'de> Visitor<'de> for OrderedMapVisitor {
    type Value = OrderedMap;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map with string keys")
    }

    fn visit_map<A>(self, access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        read_entries(access)
    }
}

/// Collect map entries in the order the deserializer yields them.
pub(crate) fn read_entries<'de, A>(mut access: A) -> Result<OrderedMap, A::Error>
where
    A: MapAccess<'de>,
{
    let mut map = OrderedMap::with_capacity(access.size_hint().unwrap_or(0));
    while let Some((key, value)) = access.next_entry::<String, OrderedValue>()? {
        map.insert(key, value);
    }
    Ok(map)
}

impl FromIterator<(String, OrderedValue)> for OrderedMap {
    fn from_iter<I: IntoIterator<Item = (String, OrderedValue)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl Extend<(String, OrderedValue)> for OrderedMap {
    fn extend<I: IntoIterator<Item = (String, OrderedValue)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for OrderedMap {
    type Item = (String, OrderedValue);
    type IntoIter = indexmap::map::IntoIter<String, OrderedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a OrderedMap {
    type Item = (&'a String, &'a OrderedValue);
    type IntoIter = indexmap::map::Iter<'a, String, OrderedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Compact JSON formatter that escapes characters browsers treat specially.
struct HtmlEscape;

impl Formatter for HtmlEscape {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            let escaped = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..index].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}
