use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::SqlPoweredError;
use crate::types::{RowValues, StorageKind};

/// A value paired with the storage kind the driver should bind it as.
///
/// The storage kind only affects real binding; literal rendering looks at the inner value.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedParam {
    value: RowValues,
    storage: StorageKind,
}

impl TypedParam {
    /// Integer wrapper. The input is cast loosely (`"3"` becomes `3`).
    #[must_use]
    pub fn int(value: impl Into<RowValues>) -> Self {
        Self {
            value: RowValues::Int(value.into().cast_int()),
            storage: StorageKind::Int,
        }
    }

    /// String wrapper. The input is cast to text (`2` becomes `"2"`).
    #[must_use]
    pub fn string(value: impl Into<RowValues>) -> Self {
        Self {
            value: RowValues::Text(value.into().cast_text()),
            storage: StorageKind::Str,
        }
    }

    /// JSON-encodes `value` and stores the encoded text as a string.
    ///
    /// # Errors
    ///
    /// Returns `SqlPoweredError::ParameterError` if `value` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, SqlPoweredError> {
        let encoded = serde_json::to_string(value)
            .map_err(|e| SqlPoweredError::ParameterError(format!("JSON encoding failed: {e}")))?;
        Ok(Self {
            value: RowValues::Text(encoded),
            storage: StorageKind::Str,
        })
    }

    /// Passes `value` through with an explicit storage kind.
    ///
    /// A stringable value is converted to its text here; a typed value is unwrapped to its
    /// inner value, so wrappers never nest.
    #[must_use]
    pub fn native(value: impl Into<Param>, storage: StorageKind) -> Self {
        Self {
            value: value.into().bind_value(),
            storage,
        }
    }

    #[must_use]
    pub fn value(&self) -> &RowValues {
        &self.value
    }

    #[must_use]
    pub fn storage_kind(&self) -> StorageKind {
        self.storage
    }
}

/// Custom text conversion attached to a [`Param::Stringable`].
pub type TextFn = Arc<dyn Fn() -> String + Send + Sync>;

/// A single bound value.
#[derive(Clone)]
pub enum Param {
    /// Plain scalar.
    Value(RowValues),
    /// Value with an explicit storage kind.
    Typed(TypedParam),
    /// Object with its own text conversion; bound and rendered as the produced text.
    Stringable(TextFn),
}

impl Param {
    pub fn stringable<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Param::Stringable(Arc::new(f))
    }

    /// Storage kind used when binding this parameter to a driver statement.
    #[must_use]
    pub fn bind_kind(&self) -> StorageKind {
        match self {
            Param::Value(value) => value.storage_kind(),
            Param::Typed(typed) => typed.storage_kind(),
            Param::Stringable(_) => StorageKind::Str,
        }
    }

    /// The value a driver would receive for this parameter.
    #[must_use]
    pub fn bind_value(&self) -> RowValues {
        match self {
            Param::Value(value) => value.clone(),
            Param::Typed(typed) => typed.value().clone(),
            Param::Stringable(text) => RowValues::Text(text()),
        }
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Param::Typed(typed) => f.debug_tuple("Typed").field(typed).finish(),
            Param::Stringable(_) => f.debug_tuple("Stringable").field(&"<fn>").finish(),
        }
    }
}

impl From<RowValues> for Param {
    fn from(value: RowValues) -> Self {
        Param::Value(value)
    }
}

impl From<TypedParam> for Param {
    fn from(value: TypedParam) -> Self {
        Param::Typed(value)
    }
}

macro_rules! param_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Param {
                fn from(value: $ty) -> Self {
                    Param::Value(RowValues::from(value))
                }
            }
        )*
    };
}

param_from_scalar!(i64, i32, f64, bool, &str, String);

/// Key under which a parameter is bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamKey {
    Index(usize),
    Name(String),
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKey::Index(idx) => write!(f, "{idx}"),
            ParamKey::Name(name) => f.write_str(name),
        }
    }
}

/// Where a driver should bind a parameter: 1-based position or `:name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindTarget<'a> {
    Position(usize),
    Name(&'a str),
}

/// Ordered parameter collection handed to a query.
///
/// Positional collections are keyed `0..n` in order; anything else is treated as named:
/// ```rust
/// use sql_powered::prelude::*;
///
/// let positional = BoundParams::positional([Param::from(1), Param::from("2")]);
/// assert!(positional.is_positional());
///
/// let named = BoundParams::named([("id", Param::from(7))]);
/// assert!(!named.is_positional());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoundParams {
    entries: Vec<(ParamKey, Param)>,
}

impl BoundParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positional<I, P>(params: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Param>,
    {
        let entries = params
            .into_iter()
            .enumerate()
            .map(|(idx, param)| (ParamKey::Index(idx), param.into()))
            .collect();
        Self { entries }
    }

    pub fn named<I, K, P>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<Param>,
    {
        let entries = params
            .into_iter()
            .map(|(name, param)| (ParamKey::Name(name.into()), param.into()))
            .collect();
        Self { entries }
    }

    /// Append an entry. A repeated key replaces the earlier value in place.
    pub fn push(&mut self, key: ParamKey, param: impl Into<Param>) {
        let param = param.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = param;
        } else {
            self.entries.push((key, param));
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when the keys are exactly `Index(0), Index(1), ..` in order.
    #[must_use]
    pub fn is_positional(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(idx, (key, _))| *key == ParamKey::Index(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParamKey, &Param)> {
        self.entries.iter().map(|(key, param)| (key, param))
    }

    pub fn values(&self) -> impl Iterator<Item = &Param> {
        self.entries.iter().map(|(_, param)| param)
    }

    /// Driver bind targets in collection order.
    ///
    /// Positional collections bind at `index + 1`. Named entries bind by name; an integer
    /// key inside a named collection binds at that index as-is, without the `+ 1` shift.
    pub fn bind_targets(&self) -> Vec<(BindTarget<'_>, &Param)> {
        let positional = self.is_positional();
        self.entries
            .iter()
            .map(|(key, param)| {
                let target = match key {
                    ParamKey::Index(idx) if positional => BindTarget::Position(idx + 1),
                    ParamKey::Index(idx) => BindTarget::Position(*idx),
                    ParamKey::Name(name) => BindTarget::Name(name.as_str()),
                };
                (target, param)
            })
            .collect()
    }
}

impl<P: Into<Param>> FromIterator<P> for BoundParams {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::positional(iter)
    }
}
