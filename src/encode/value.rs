//! Label values.
//!
//! A label sequence is a flat slice of [`Value`]s. Keys sit at even
//! positions and are normally strings; values may be any of the supported
//! kinds, including deferred computations built with [`lazy`].

use std::borrow::Cow;
use std::fmt::{self, Write};

use crate::encode::format::{push_escaped, push_quoted, Escaped};

/// A single key or value in a label sequence.
pub enum Value<'a> {
    Str(Cow<'a, str>),
    Int(i64),
    Uint(u64),
    Bool(bool),
    F32(f32),
    F64(f64),
    /// Rendered with its `Display` implementation, unquoted.
    Display(&'a dyn fmt::Display),
    /// Evaluated only when the line is actually written.
    Lazy(Lazy<'a>),
    /// Generic fallback, rendered with its `Debug` implementation, unquoted.
    Debug(&'a dyn fmt::Debug),
}

/// A deferred value, tagged by the kind it produces.
pub enum Lazy<'a> {
    Str(Box<dyn Fn() -> String + 'a>),
    Int(Box<dyn Fn() -> i64 + 'a>),
    Uint(Box<dyn Fn() -> u64 + 'a>),
    Bool(Box<dyn Fn() -> bool + 'a>),
    F32(Box<dyn Fn() -> f32 + 'a>),
    F64(Box<dyn Fn() -> f64 + 'a>),
}

/// Result types a lazy label may produce.
pub trait LazyOutput: Sized {
    fn into_lazy<'a, F>(f: F) -> Lazy<'a>
    where
        F: Fn() -> Self + 'a;
}

macro_rules! lazy_output {
    ($($ty:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl LazyOutput for $ty {
                fn into_lazy<'a, F>(f: F) -> Lazy<'a>
                where
                    F: Fn() -> Self + 'a,
                {
                    Lazy::$variant(Box::new(move || <$target>::from(f())))
                }
            }
        )*
    };
}

lazy_output! {
    String => Str as String,
    &'static str => Str as String,
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => Uint as u64,
    u16 => Uint as u64,
    u32 => Uint as u64,
    u64 => Uint as u64,
    bool => Bool as bool,
    f32 => F32 as f32,
    f64 => F64 as f64,
}

impl LazyOutput for isize {
    fn into_lazy<'a, F>(f: F) -> Lazy<'a>
    where
        F: Fn() -> Self + 'a,
    {
        Lazy::Int(Box::new(move || f() as i64))
    }
}

impl LazyOutput for usize {
    fn into_lazy<'a, F>(f: F) -> Lazy<'a>
    where
        F: Fn() -> Self + 'a,
    {
        Lazy::Uint(Box::new(move || f() as u64))
    }
}

/// Wrap an expensive computation so it only runs if the log is written.
///
/// ```
/// use qlog::{labels, lazy};
///
/// let items = vec![1, 2, 3];
/// let labels = labels!["count", lazy(|| items.len())];
/// # let _ = labels;
/// ```
pub fn lazy<'a, T, F>(f: F) -> Value<'a>
where
    T: LazyOutput,
    F: Fn() -> T + 'a,
{
    Value::Lazy(T::into_lazy(f))
}

/// A value rendered through its `Display` implementation.
pub fn display(value: &dyn fmt::Display) -> Value<'_> {
    Value::Display(value)
}

/// A value rendered through its `Debug` implementation.
pub fn debug(value: &dyn fmt::Debug) -> Value<'_> {
    Value::Debug(value)
}

impl Value<'_> {
    /// Append this value in field-value position: strings quoted, floats to
    /// two decimals, lazy values evaluated.
    pub(crate) fn write_value(&self, buf: &mut String) {
        match self {
            Value::Str(s) => push_quoted(buf, s),
            Value::Int(v) => write_display(buf, v),
            Value::Uint(v) => write_display(buf, v),
            Value::Bool(v) => buf.push_str(if *v { "true" } else { "false" }),
            Value::F32(v) => write_float(buf, f64::from(*v)),
            Value::F64(v) => write_float(buf, *v),
            Value::Display(v) => write_display(buf, v),
            Value::Lazy(lazy) => match lazy {
                Lazy::Str(f) => push_quoted(buf, &f()),
                Lazy::Int(f) => write_display(buf, &f()),
                Lazy::Uint(f) => write_display(buf, &f()),
                Lazy::Bool(f) => Value::Bool(f()).write_value(buf),
                Lazy::F32(f) => write_float(buf, f64::from(f())),
                Lazy::F64(f) => write_float(buf, f()),
            },
            Value::Debug(v) => write_debug(buf, v),
        }
    }

    /// Append this value in key position: plain text, never quoted, but
    /// escaped like a string value.
    pub(crate) fn write_key(&self, buf: &mut String) {
        match self {
            Value::Str(s) => push_escaped(buf, s),
            Value::Int(v) => write_display(buf, v),
            Value::Uint(v) => write_display(buf, v),
            Value::Bool(v) => write_display(buf, v),
            Value::F32(v) => write_display(buf, v),
            Value::F64(v) => write_display(buf, v),
            Value::Display(v) => write_display(buf, v),
            Value::Lazy(lazy) => match lazy {
                Lazy::Str(f) => push_escaped(buf, &f()),
                Lazy::Int(f) => write_display(buf, &f()),
                Lazy::Uint(f) => write_display(buf, &f()),
                Lazy::Bool(f) => write_display(buf, &f()),
                Lazy::F32(f) => write_display(buf, &f()),
                Lazy::F64(f) => write_display(buf, &f()),
            },
            Value::Debug(v) => write_debug(buf, v),
        }
    }
}

// Writing into a String cannot fail.
fn write_display(buf: &mut String, v: &dyn fmt::Display) {
    let _ = write!(Escaped(buf), "{v}");
}

fn write_debug(buf: &mut String, v: &dyn fmt::Debug) {
    let _ = write!(Escaped(buf), "{v:?}");
}

fn write_float(buf: &mut String, v: f64) {
    let _ = write!(buf, "{v:.2}");
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Value::Uint(v) => f.debug_tuple("Uint").field(v).finish(),
            Value::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Value::F32(v) => f.debug_tuple("F32").field(v).finish(),
            Value::F64(v) => f.debug_tuple("F64").field(v).finish(),
            Value::Display(v) => f.debug_tuple("Display").field(&v.to_string()).finish(),
            Value::Lazy(_) => f.write_str("Lazy(..)"),
            Value::Debug(v) => f.debug_tuple("Debug").field(v).finish(),
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(v: &'a str) -> Self {
        Value::Str(Cow::Borrowed(v))
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(v: &'a String) -> Self {
        Value::Str(Cow::Borrowed(v.as_str()))
    }
}

impl From<String> for Value<'_> {
    fn from(v: String) -> Self {
        Value::Str(Cow::Owned(v))
    }
}

impl<'a> From<Cow<'a, str>> for Value<'a> {
    fn from(v: Cow<'a, str>) -> Self {
        Value::Str(v)
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value<'_> {
                fn from(v: $ty) -> Self {
                    Value::$variant(v as $target)
                }
            }
        )*
    };
}

value_from! {
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    isize => Int as i64,
    u8 => Uint as u64,
    u16 => Uint as u64,
    u32 => Uint as u64,
    u64 => Uint as u64,
    usize => Uint as u64,
    f32 => F32 as f32,
    f64 => F64 as f64,
}

impl From<bool> for Value<'_> {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl<'a> From<Lazy<'a>> for Value<'a> {
    fn from(v: Lazy<'a>) -> Self {
        Value::Lazy(v)
    }
}

/// Build a label sequence: `labels!["key", value, "other", lazy(|| ...)]`.
///
/// Each element goes through `Value::from`, so anything with a `From` impl
/// (strings, integers, floats, bools, and the results of [`lazy`],
/// [`display`] and [`debug`]) can be used directly.
#[macro_export]
macro_rules! labels {
    () => {
        []
    };
    ($($item:expr),+ $(,)?) => {
        [$($crate::Value::from($item)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::net::{IpAddr, Ipv4Addr};

    fn rendered(value: Value<'_>) -> String {
        let mut buf = String::new();
        value.write_value(&mut buf);
        buf
    }

    #[test]
    fn test_primitive_rendering() {
        assert_eq!(rendered("hello".into()), "\"hello\"");
        assert_eq!(rendered(String::from("owned").into()), "\"owned\"");
        assert_eq!(rendered((-42i32).into()), "-42");
        assert_eq!(rendered(42u8.into()), "42");
        assert_eq!(rendered(true.into()), "true");
        assert_eq!(rendered(3.14159f64.into()), "3.14");
        assert_eq!(rendered(2.5f32.into()), "2.50");
    }

    #[test]
    fn test_display_and_debug_are_unquoted() {
        let ip = IpAddr::V4(Ipv4Addr::LOCALHOST);
        assert_eq!(rendered(display(&ip)), "127.0.0.1");
        assert_eq!(rendered(debug(&vec![1, 2])), "[1, 2]");
    }

    #[test]
    fn test_lazy_matches_direct_rendering() {
        assert_eq!(rendered(lazy(|| "s".to_string())), rendered("s".into()));
        assert_eq!(rendered(lazy(|| "static")), rendered("static".into()));
        assert_eq!(rendered(lazy(|| -7i64)), rendered((-7i64).into()));
        assert_eq!(rendered(lazy(|| 7usize)), rendered(7usize.into()));
        assert_eq!(rendered(lazy(|| false)), rendered(false.into()));
        assert_eq!(rendered(lazy(|| 1.005f32)), rendered(1.005f32.into()));
        assert_eq!(rendered(lazy(|| 9.999f64)), rendered(9.999f64.into()));
    }

    #[test]
    fn test_lazy_runs_once_per_render() {
        let calls = Cell::new(0);
        let value = lazy(|| {
            calls.set(calls.get() + 1);
            1u32
        });
        assert_eq!(calls.get(), 0);
        rendered(value);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_key_rendering() {
        let mut buf = String::new();
        Value::from(12i64).write_key(&mut buf);
        Value::from("k").write_key(&mut buf);
        Value::from(1.5f64).write_key(&mut buf);
        assert_eq!(buf, "12k1.5");
    }

    struct TwoLines;

    impl fmt::Display for TwoLines {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("line1\nline2 \"q\"")
        }
    }

    #[test]
    fn test_display_value_is_escaped() {
        assert_eq!(rendered(display(&TwoLines)), r#"line1\nline2 \"q\""#);
        assert_eq!(rendered(debug(&"a\nb")), r#"\"a\\nb\""#);
    }

    #[test]
    fn test_key_is_escaped() {
        let mut buf = String::new();
        Value::from("bad\"key\nx").write_key(&mut buf);
        display(&TwoLines).write_key(&mut buf);
        assert_eq!(buf, r#"bad\"key\nxline1\nline2 \"q\""#);
        assert!(!buf.contains('\n'));
    }
}
