//! IPC-safe carrier-config payloads.
//!
//! A [`Bundle`] is the loosely typed map a request is assembled in; it can hold
//! values the privileged service would refuse. A [`ConfigPayload`] only ever
//! holds the primitive whitelist ([`ConfigValue`]), so converting one into the
//! other is where unsupported values are caught:
//!
//! - [`filter`] is the write path: one unsupported entry fails the whole
//!   conversion and nothing partially filled escapes.
//! - [`filter_lossy`] is the read path: unsupported entries are skipped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SerializationError;

/// A value that may cross the privileged boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ConfigValue {
	Int(i32),
	IntArray(Vec<i32>),
	Long(i64),
	LongArray(Vec<i64>),
	Double(f64),
	DoubleArray(Vec<f64>),
	String(String),
	StringArray(Vec<String>),
	Bool(bool),
	BoolArray(Vec<bool>),
	Payload(ConfigPayload),
}

impl ConfigValue {
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Int(_) => "int",
			Self::IntArray(_) => "int[]",
			Self::Long(_) => "long",
			Self::LongArray(_) => "long[]",
			Self::Double(_) => "double",
			Self::DoubleArray(_) => "double[]",
			Self::String(_) => "String",
			Self::StringArray(_) => "String[]",
			Self::Bool(_) => "boolean",
			Self::BoolArray(_) => "boolean[]",
			Self::Payload(_) => "PersistableBundle",
		}
	}
}

/// Any value a request bundle may carry, including ones the service rejects.
#[derive(Debug, Clone, PartialEq)]
pub enum BundleValue {
	Int(i32),
	IntArray(Vec<i32>),
	Long(i64),
	LongArray(Vec<i64>),
	Double(f64),
	DoubleArray(Vec<f64>),
	String(String),
	StringArray(Vec<String>),
	Bool(bool),
	BoolArray(Vec<bool>),
	Payload(ConfigPayload),
	Byte(i8),
	ByteArray(Vec<u8>),
	Short(i16),
	Char(char),
	CharArray(Vec<char>),
	Float(f32),
	FloatArray(Vec<f32>),
	Bundle(Bundle),
	Null,
	/// A platform object known only by its type name.
	Opaque(&'static str),
}

impl BundleValue {
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Int(_) => "int",
			Self::IntArray(_) => "int[]",
			Self::Long(_) => "long",
			Self::LongArray(_) => "long[]",
			Self::Double(_) => "double",
			Self::DoubleArray(_) => "double[]",
			Self::String(_) => "String",
			Self::StringArray(_) => "String[]",
			Self::Bool(_) => "boolean",
			Self::BoolArray(_) => "boolean[]",
			Self::Payload(_) => "PersistableBundle",
			Self::Byte(_) => "byte",
			Self::ByteArray(_) => "byte[]",
			Self::Short(_) => "short",
			Self::Char(_) => "char",
			Self::CharArray(_) => "char[]",
			Self::Float(_) => "float",
			Self::FloatArray(_) => "float[]",
			Self::Bundle(_) => "Bundle",
			Self::Null => "null",
			Self::Opaque(name) => *name,
		}
	}

	/// True when the value is in the primitive whitelist.
	pub fn is_persistable(&self) -> bool {
		matches!(
			self,
			Self::Int(_)
				| Self::IntArray(_)
				| Self::Long(_)
				| Self::LongArray(_)
				| Self::Double(_)
				| Self::DoubleArray(_)
				| Self::String(_)
				| Self::StringArray(_)
				| Self::Bool(_)
				| Self::BoolArray(_)
				| Self::Payload(_)
		)
	}
}

impl TryFrom<BundleValue> for ConfigValue {
	/// The rejected value is handed back untouched.
	type Error = BundleValue;

	fn try_from(value: BundleValue) -> Result<Self, Self::Error> {
		Ok(match value {
			BundleValue::Int(v) => Self::Int(v),
			BundleValue::IntArray(v) => Self::IntArray(v),
			BundleValue::Long(v) => Self::Long(v),
			BundleValue::LongArray(v) => Self::LongArray(v),
			BundleValue::Double(v) => Self::Double(v),
			BundleValue::DoubleArray(v) => Self::DoubleArray(v),
			BundleValue::String(v) => Self::String(v),
			BundleValue::StringArray(v) => Self::StringArray(v),
			BundleValue::Bool(v) => Self::Bool(v),
			BundleValue::BoolArray(v) => Self::BoolArray(v),
			BundleValue::Payload(v) => Self::Payload(v),
			other => return Err(other),
		})
	}
}

impl From<ConfigValue> for BundleValue {
	fn from(value: ConfigValue) -> Self {
		match value {
			ConfigValue::Int(v) => Self::Int(v),
			ConfigValue::IntArray(v) => Self::IntArray(v),
			ConfigValue::Long(v) => Self::Long(v),
			ConfigValue::LongArray(v) => Self::LongArray(v),
			ConfigValue::Double(v) => Self::Double(v),
			ConfigValue::DoubleArray(v) => Self::DoubleArray(v),
			ConfigValue::String(v) => Self::String(v),
			ConfigValue::StringArray(v) => Self::StringArray(v),
			ConfigValue::Bool(v) => Self::Bool(v),
			ConfigValue::BoolArray(v) => Self::BoolArray(v),
			ConfigValue::Payload(v) => Self::Payload(v),
		}
	}
}

impl From<i32> for BundleValue {
	fn from(v: i32) -> Self { Self::Int(v) }
}
impl From<i64> for BundleValue {
	fn from(v: i64) -> Self { Self::Long(v) }
}
impl From<f64> for BundleValue {
	fn from(v: f64) -> Self { Self::Double(v) }
}
impl From<f32> for BundleValue {
	fn from(v: f32) -> Self { Self::Float(v) }
}
impl From<bool> for BundleValue {
	fn from(v: bool) -> Self { Self::Bool(v) }
}
impl From<&str> for BundleValue {
	fn from(v: &str) -> Self { Self::String(v.to_owned()) }
}
impl From<String> for BundleValue {
	fn from(v: String) -> Self { Self::String(v) }
}

/// Loosely typed, key-ordered argument map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bundle {
	entries: BTreeMap<String, BundleValue>,
}

impl Bundle {
	pub fn new() -> Self { Self::default() }

	pub fn put(&mut self, key: impl Into<String>, value: impl Into<BundleValue>) {
		self.entries.insert(key.into(), value.into());
	}
	pub fn put_int(&mut self, key: impl Into<String>, v: i32) { self.put(key, BundleValue::Int(v)); }
	pub fn put_bool(&mut self, key: impl Into<String>, v: bool) { self.put(key, BundleValue::Bool(v)); }
	pub fn put_string(&mut self, key: impl Into<String>, v: impl Into<String>) {
		self.put(key, BundleValue::String(v.into()));
	}

	pub fn get(&self, key: &str) -> Option<&BundleValue> { self.entries.get(key) }
	pub fn get_int(&self, key: &str) -> Option<i32> {
		match self.entries.get(key) {
			Some(BundleValue::Int(v)) => Some(*v),
			_ => None,
		}
	}
	pub fn get_bool(&self, key: &str, default: bool) -> bool {
		match self.entries.get(key) {
			Some(BundleValue::Bool(v)) => *v,
			_ => default,
		}
	}
	pub fn get_string(&self, key: &str) -> Option<&str> {
		match self.entries.get(key) {
			Some(BundleValue::String(v)) => Some(v),
			_ => None,
		}
	}

	pub fn remove(&mut self, key: &str) -> Option<BundleValue> { self.entries.remove(key) }
	pub fn contains_key(&self, key: &str) -> bool { self.entries.contains_key(key) }
	pub fn len(&self) -> usize { self.entries.len() }
	pub fn is_empty(&self) -> bool { self.entries.is_empty() }
	pub fn keys(&self) -> impl Iterator<Item = &str> { self.entries.keys().map(String::as_str) }
	pub fn iter(&self) -> impl Iterator<Item = (&str, &BundleValue)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v))
	}
}

impl From<ConfigPayload> for Bundle {
	fn from(payload: ConfigPayload) -> Self {
		Self { entries: payload.entries.into_iter().map(|(k, v)| (k, v.into())).collect() }
	}
}

impl<K: Into<String>, V: Into<BundleValue>> FromIterator<(K, V)> for Bundle {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self { entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
	}
}

/// Key-ordered map restricted to [`ConfigValue`]; the only shape handed to the
/// privileged configuration service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigPayload {
	entries: BTreeMap<String, ConfigValue>,
}

impl ConfigPayload {
	pub fn new() -> Self { Self::default() }

	/// Store one entry, refusing values outside the whitelist.
	pub fn put_one(&mut self, key: impl Into<String>, value: BundleValue) -> Result<(), SerializationError> {
		let key = key.into();
		match ConfigValue::try_from(value) {
			Ok(v) => {
				self.entries.insert(key, v);
				Ok(())
			}
			Err(rejected) => Err(SerializationError::unsupported(key, rejected.type_name())),
		}
	}

	pub fn insert(&mut self, key: impl Into<String>, value: ConfigValue) -> Option<ConfigValue> {
		self.entries.insert(key.into(), value)
	}
	pub fn put_int(&mut self, key: impl Into<String>, v: i32) { self.insert(key, ConfigValue::Int(v)); }
	pub fn put_bool(&mut self, key: impl Into<String>, v: bool) { self.insert(key, ConfigValue::Bool(v)); }
	pub fn put_string(&mut self, key: impl Into<String>, v: impl Into<String>) {
		self.insert(key, ConfigValue::String(v.into()));
	}

	pub fn get(&self, key: &str) -> Option<&ConfigValue> { self.entries.get(key) }
	pub fn get_int(&self, key: &str) -> Option<i32> {
		match self.entries.get(key) {
			Some(ConfigValue::Int(v)) => Some(*v),
			_ => None,
		}
	}
	/// Mirrors the platform getter: absent or mistyped keys yield `default`.
	pub fn get_bool(&self, key: &str, default: bool) -> bool {
		match self.entries.get(key) {
			Some(ConfigValue::Bool(v)) => *v,
			_ => default,
		}
	}
	pub fn get_string(&self, key: &str) -> Option<&str> {
		match self.entries.get(key) {
			Some(ConfigValue::String(v)) => Some(v),
			_ => None,
		}
	}

	pub fn contains_key(&self, key: &str) -> bool { self.entries.contains_key(key) }
	pub fn len(&self) -> usize { self.entries.len() }
	pub fn is_empty(&self) -> bool { self.entries.is_empty() }
	pub fn keys(&self) -> impl Iterator<Item = &str> { self.entries.keys().map(String::as_str) }
	pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v))
	}
}

/// Strict conversion used before anything is written.
pub fn filter(input: &Bundle) -> Result<ConfigPayload, SerializationError> {
	let mut out = ConfigPayload::new();
	for (key, value) in input.iter() {
		out.put_one(key, value.clone())?;
	}
	Ok(out)
}

/// Best-effort conversion for display; unsupported entries are dropped.
///
/// Backs `CurrentOverrides::from_bundle` on the read side.
pub fn filter_lossy(input: &Bundle) -> ConfigPayload {
	let mut out = ConfigPayload::new();
	for (key, value) in input.iter() {
		if let Err(e) = out.put_one(key, value.clone()) {
			debug!(key = %e.key, observed_type = e.observed_type, "skipping non-persistable entry");
		}
	}
	out
}
