use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use log::error;

/// Separates a key from its value within one serialized pair.
pub const KEY_VALUE_DELIMITER: char = '=';

/// Separates serialized pairs from one another.
pub const PAIR_DELIMITER: char = ' ';

/// The token stored for a `true` boolean value.
const TRUE_TOKEN: &str = "1";

/// The token stored for a `false` boolean value.
const FALSE_TOKEN: &str = "0";

/// A record that round-trips through a flat text representation, meant
/// for callers that persist their state as plain strings.
///
/// The storage key names the slot a caller's storage layer should file
/// the serialized form under; `None` means the record is not meant to
/// be persisted.
///
/// # Examples
/// ```
/// use flagword::{TextMap, TextRecord};
///
/// let mut map = TextMap::new();
/// map.put("volume", "11");
/// let text = map.to_text();
///
/// let mut restored = TextMap::new();
/// restored.from_text(&text);
/// assert_eq!(restored, map);
/// ```
pub trait TextRecord {
    /// Returns the key under which this record is persisted, if any.
    fn storage_key(&self) -> Option<&str>;

    /// Returns the number of elements stored in this record.
    fn len(&self) -> usize;

    /// Returns `true` if this record holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all elements from this record, leaving it empty.
    fn clear(&mut self);

    /// Serializes this record to its flat text form.
    fn to_text(&self) -> String;

    /// Replaces the contents of this record with the elements parsed
    /// from `source` and returns the resulting element count.
    fn from_text(&mut self, source: &str) -> usize;
}

/// A string-keyed string map that serializes to a single delimited
/// line: `key=value` pairs joined by spaces.
///
/// Values are stored as strings; typed accessors parse on the way out
/// and fall back to a caller-supplied default on failure instead of
/// raising. Empty keys and values are never stored: putting an empty
/// value removes the key.
///
/// The encoding does no escaping, so keys and values must not contain
/// the `=` or space delimiter characters; round-trips are lossy if
/// they do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextMap {
    key: Option<String>,
    entries: BTreeMap<String, String>,
}

impl TextMap {
    /// Creates a new, empty map with no storage key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty map persisted under `key`.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            entries: BTreeMap::new(),
        }
    }

    /// Assigns the key under which this map is persisted.
    pub fn set_storage_key(&mut self, key: impl Into<String>) {
        self.key = Some(key.into());
    }

    /// Returns whether this map contains the given key.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns whether this map contains exactly the given key/value
    /// pair.
    pub fn contains_pair(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    /// Returns the value mapped to `key`, or `None` if there is none.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the value mapped to `key`, or `default` if there is
    /// none.
    ///
    /// # Examples
    /// ```
    /// use flagword::TextMap;
    ///
    /// let mut map = TextMap::new();
    /// map.put("name", "deep thought");
    /// assert_eq!(map.get_or("name", "unknown"), "deep thought");
    /// assert_eq!(map.get_or("answer", "42"), "42");
    /// ```
    pub fn get_or<'map>(&'map self, key: &str, default: &'map str) -> &'map str {
        self.get(key).unwrap_or(default)
    }

    /// Returns the value mapped to `key` parsed as an `i32`, or
    /// `default` if the key is absent or the value does not parse.
    ///
    /// A parse failure is logged and swallowed, never raised.
    ///
    /// # Examples
    /// ```
    /// use flagword::TextMap;
    ///
    /// let mut map = TextMap::new();
    /// map.put("count", "3");
    /// map.put("junk", "abc");
    /// assert_eq!(map.get_int("count", 0), 3);
    /// assert_eq!(map.get_int("junk", 7), 7);
    /// ```
    pub fn get_int(&self, key: &str, default: i32) -> i32 {
        let Some(value) = self.get(key) else {
            return default;
        };
        match value.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                error!("value {value:?} for key {key:?} cannot be parsed as an integer");
                default
            }
        }
    }

    /// Returns the value mapped to `key` parsed as an `i64`, or
    /// `default` if the key is absent or the value does not parse.
    ///
    /// A parse failure is logged and swallowed, never raised.
    pub fn get_long(&self, key: &str, default: i64) -> i64 {
        let Some(value) = self.get(key) else {
            return default;
        };
        match value.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                error!("value {value:?} for key {key:?} cannot be parsed as a long integer");
                default
            }
        }
    }

    /// Returns the value mapped to `key` parsed as a boolean, or
    /// `default` if the key is absent or the value is neither of the
    /// recognized tokens `"1"` and `"0"`.
    ///
    /// A parse failure is logged and swallowed, never raised.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        let Some(value) = self.get(key) else {
            return default;
        };
        match value {
            TRUE_TOKEN => true,
            FALSE_TOKEN => false,
            _ => {
                error!("value {value:?} for key {key:?} cannot be parsed as a boolean");
                default
            }
        }
    }

    /// Maps `key` to `value` and returns the previously mapped value,
    /// if any.
    ///
    /// An empty value removes the key instead, so no empty-string
    /// entries are ever stored; an empty key is a no-op returning
    /// `None`.
    ///
    /// # Examples
    /// ```
    /// use flagword::TextMap;
    ///
    /// let mut map = TextMap::new();
    /// assert_eq!(map.put("name", "arthur"), None);
    /// assert_eq!(map.put("name", "ford"), Some("arthur".to_string()));
    /// map.put("name", "");
    /// assert_eq!(map.get_or("name", "missing"), "missing");
    /// ```
    pub fn put(&mut self, key: &str, value: &str) -> Option<String> {
        if key.is_empty() {
            return None;
        }
        if value.is_empty() {
            return self.remove(key);
        }
        self.entries.insert(key.to_owned(), value.to_owned())
    }

    /// Maps `key` to the decimal form of `value` and returns the
    /// previously mapped value, if any.
    pub fn put_int(&mut self, key: &str, value: i32) -> Option<String> {
        self.put(key, &value.to_string())
    }

    /// Maps `key` to the decimal form of `value` and returns the
    /// previously mapped value, if any.
    pub fn put_long(&mut self, key: &str, value: i64) -> Option<String> {
        self.put(key, &value.to_string())
    }

    /// Maps `key` to the boolean token `"1"` or `"0"` and returns the
    /// previously mapped value, if any.
    pub fn put_bool(&mut self, key: &str, value: bool) -> Option<String> {
        self.put(key, if value { TRUE_TOKEN } else { FALSE_TOKEN })
    }

    /// Removes the mapping for `key` and returns the removed value, if
    /// any.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }
}

impl TextRecord for TextMap {
    fn storage_key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    /// Serializes all pairs as `key=value` joined by single spaces,
    /// with no leading or trailing whitespace; an empty map serializes
    /// to an empty string.
    ///
    /// Entries are emitted in key order, so the output is
    /// deterministic across calls.
    ///
    /// # Examples
    /// ```
    /// use flagword::{TextMap, TextRecord};
    ///
    /// let mut map = TextMap::new();
    /// map.put("b", "2");
    /// map.put("a", "1");
    /// assert_eq!(map.to_text(), "a=1 b=2");
    /// ```
    fn to_text(&self) -> String {
        let mut text = String::new();
        for (key, value) in &self.entries {
            if !text.is_empty() {
                text.push(PAIR_DELIMITER);
            }
            text.push_str(key);
            text.push(KEY_VALUE_DELIMITER);
            text.push_str(value);
        }
        text
    }

    /// Clears this map, then loads every well-formed `key=value` pair
    /// found in `source`.
    ///
    /// Entries that do not split into exactly two parts are silently
    /// skipped; the remainder still loads. Surviving pairs pass
    /// through [`put`](TextMap::put), so empty keys and values are
    /// discarded here too.
    ///
    /// # Examples
    /// ```
    /// use flagword::{TextMap, TextRecord};
    ///
    /// let mut map = TextMap::new();
    /// assert_eq!(map.from_text("a=1 junk b=2 c=x=y"), 2);
    /// assert_eq!(map.get_int("b", 0), 2);
    /// assert!(!map.contains("c"));
    /// ```
    fn from_text(&mut self, source: &str) -> usize {
        self.clear();
        for entry in source.split(PAIR_DELIMITER) {
            let parts: Vec<&str> = entry.split(KEY_VALUE_DELIMITER).collect();
            if let [key, value] = parts[..] {
                self.put(key, value);
            }
        }
        self.len()
    }
}

/// Renders the serialized flat text form, the same string produced by
/// [`to_text`](TextRecord::to_text).
impl Display for TextMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
