//! Named template parameters.

use std::fmt;

use url::Url;

use crate::source::AddressableSource;
use crate::vocab::QName;

/// Parameter name: namespace + local name, or a plain name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamName {
    Qualified { namespace: String, local: String },
    Plain(String),
}

impl ParamName {
    pub fn plain(name: impl Into<String>) -> Self {
        ParamName::Plain(name.into())
    }

    pub fn local(&self) -> &str {
        match self {
            ParamName::Qualified { local, .. } => local,
            ParamName::Plain(name) => name,
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        match self {
            ParamName::Qualified { namespace, .. } => Some(namespace),
            ParamName::Plain(_) => None,
        }
    }
}

impl From<QName> for ParamName {
    fn from(q: QName) -> Self {
        ParamName::Qualified { namespace: q.namespace.to_owned(), local: q.local.to_owned() }
    }
}

impl From<&str> for ParamName {
    fn from(name: &str) -> Self {
        ParamName::Plain(name.to_owned())
    }
}

/// Clark notation for qualified names.
impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamName::Qualified { namespace, local } => write!(f, "{{{namespace}}}{local}"),
            ParamName::Plain(name) => write!(f, "{name}"),
        }
    }
}

/// Typed parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Uri(Url),
    Uris(Vec<Url>),
    Source(AddressableSource),
    String(String),
}

impl ParamValue {
    pub fn as_uri(&self) -> Option<&Url> {
        match self {
            ParamValue::Uri(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_source(&self) -> Option<&AddressableSource> {
        match self {
            ParamValue::Source(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Url> for ParamValue { fn from(v: Url) -> Self { ParamValue::Uri(v) } }
impl From<Vec<Url>> for ParamValue { fn from(v: Vec<Url>) -> Self { ParamValue::Uris(v) } }
impl From<AddressableSource> for ParamValue { fn from(v: AddressableSource) -> Self { ParamValue::Source(v) } }
impl From<String> for ParamValue { fn from(v: String) -> Self { ParamValue::String(v) } }
impl From<&str> for ParamValue { fn from(v: &str) -> Self { ParamValue::String(v.to_owned()) } }

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Uri(u) => write!(f, "<{u}>"),
            ParamValue::Uris(us) => {
                for (i, u) in us.iter().enumerate() {
                    if i > 0 { write!(f, " ")?; }
                    write!(f, "<{u}>")?;
                }
                Ok(())
            }
            ParamValue::Source(s) => write!(f, "{s}"),
            ParamValue::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
        }
    }
}

/// Parameters for one rendering, in first-insertion order.
///
/// Names are unique: inserting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    entries: Vec<(ParamName, ParamValue)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<ParamName>, value: impl Into<ParamValue>) -> Option<ParamValue> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &ParamName) -> Option<&ParamValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn get_uri(&self, name: impl Into<ParamName>) -> Option<&Url> {
        self.get(&name.into())?.as_uri()
    }

    pub fn get_source(&self, name: impl Into<ParamName>) -> Option<&AddressableSource> {
        self.get(&name.into())?.as_source()
    }

    pub fn contains(&self, name: impl Into<ParamName>) -> bool {
        self.get(&name.into()).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParamName, &ParamValue)> {
        self.entries.iter().map(|(n, v)| (n, v))
    }

    pub fn names(&self) -> impl Iterator<Item = &ParamName> {
        self.entries.iter().map(|(n, _)| n)
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl IntoIterator for ParameterSet {
    type Item = (ParamName, ParamValue);
    type IntoIter = std::vec::IntoIter<(ParamName, ParamValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
