//! Typed binding destinations and value coercion.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{InvalidBool, OutOfRange};
use crate::{EnvBindError, Result};

/// A writable destination for a bound value.
///
/// Every supported `&mut T` converts into a `Target` with `.into()`, and so
/// does `Option<&mut T>` (`None` becomes [`Target::Absent`]).
#[derive(Debug)]
pub enum Target<'a> {
    Str(&'a mut String),
    StrList(&'a mut Vec<String>),
    Bool(&'a mut bool),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    /// A destination type with no coercion rule.
    Unsupported { type_name: &'static str },
    /// No destination at all.
    Absent,
}

/// The kind of a [`Target`], without the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Str,
    StrList,
    Bool,
    I32,
    I64,
    Isize,
    F32,
    F64,
    Unsupported,
    Absent,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetKind::Str => "string",
            TargetKind::StrList => "string list",
            TargetKind::Bool => "bool",
            TargetKind::I32 => "i32",
            TargetKind::I64 => "i64",
            TargetKind::Isize => "isize",
            TargetKind::F32 => "f32",
            TargetKind::F64 => "f64",
            TargetKind::Unsupported => "unsupported",
            TargetKind::Absent => "absent",
        };
        f.write_str(name)
    }
}

impl<'a> Target<'a> {
    /// Wrap a destination whose type has no coercion rule.
    ///
    /// Binding into it always fails with [`EnvBindError::UnsupportedType`].
    pub fn unsupported<T: ?Sized>(_target: &'a mut T) -> Self {
        Target::Unsupported {
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn kind(&self) -> TargetKind {
        match self {
            Target::Str(_) => TargetKind::Str,
            Target::StrList(_) => TargetKind::StrList,
            Target::Bool(_) => TargetKind::Bool,
            Target::I32(_) => TargetKind::I32,
            Target::I64(_) => TargetKind::I64,
            Target::Isize(_) => TargetKind::Isize,
            Target::F32(_) => TargetKind::F32,
            Target::F64(_) => TargetKind::F64,
            Target::Unsupported { .. } => TargetKind::Unsupported,
            Target::Absent => TargetKind::Absent,
        }
    }

    /// Parse `value` and store it. On error the destination is untouched.
    ///
    /// `key` only feeds error messages.
    pub(crate) fn assign(self, key: &str, value: String) -> Result<()> {
        let kind = self.kind();
        match self {
            Target::Str(t) => *t = value,
            Target::StrList(t) => *t = value.split(',').map(str::to_string).collect(),
            Target::Bool(t) => {
                *t = parse_bool(&value).map_err(|e| EnvBindError::parse(key, kind, e))?
            }
            Target::I32(t) => {
                *t = value
                    .parse::<i32>()
                    .map_err(|e| EnvBindError::parse(key, kind, e))?
            }
            Target::I64(t) => {
                *t = value
                    .parse::<i64>()
                    .map_err(|e| EnvBindError::parse(key, kind, e))?
            }
            Target::Isize(t) => {
                *t = value
                    .parse::<isize>()
                    .map_err(|e| EnvBindError::parse(key, kind, e))?
            }
            Target::F32(t) => {
                let parsed = value
                    .parse::<f32>()
                    .map_err(|e| EnvBindError::parse(key, kind, e))?;
                check_finite(&value, parsed.is_infinite())
                    .map_err(|e| EnvBindError::parse(key, kind, e))?;
                *t = parsed
            }
            Target::F64(t) => {
                let parsed = value
                    .parse::<f64>()
                    .map_err(|e| EnvBindError::parse(key, kind, e))?;
                check_finite(&value, parsed.is_infinite())
                    .map_err(|e| EnvBindError::parse(key, kind, e))?;
                *t = parsed
            }
            Target::Unsupported { type_name } => {
                return Err(EnvBindError::UnsupportedType {
                    key: key.to_string(),
                    type_name,
                })
            }
            Target::Absent => return Err(EnvBindError::NilTarget),
        }
        Ok(())
    }
}

/// Parse boolean text.
///
/// Recognizes: "1", "t", "T", "TRUE", "true", "True" as true
/// Recognizes: "0", "f", "F", "FALSE", "false", "False" as false
pub fn parse_bool(value: &str) -> std::result::Result<bool, InvalidBool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(InvalidBool(value.to_string())),
    }
}

/// Reject magnitudes that overflowed to infinity. Only an explicit
/// `inf`/`infinity` spelling may produce an infinite value.
fn check_finite(value: &str, infinite: bool) -> std::result::Result<(), OutOfRange> {
    if !infinite {
        return Ok(());
    }
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    if unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity") {
        Ok(())
    } else {
        Err(OutOfRange)
    }
}

macro_rules! impl_from_ref {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a mut $ty> for Target<'a> {
                fn from(target: &'a mut $ty) -> Self {
                    Target::$variant(target)
                }
            }

            impl<'a> From<Option<&'a mut $ty>> for Target<'a> {
                fn from(target: Option<&'a mut $ty>) -> Self {
                    target.map_or(Target::Absent, Target::$variant)
                }
            }
        )*
    };
}

impl_from_ref! {
    String => Str,
    Vec<String> => StrList,
    bool => Bool,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    f32 => F32,
    f64 => F64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_bool_forms() {
        let test_cases = vec![
            ("1", true),
            ("t", true),
            ("T", true),
            ("TRUE", true),
            ("true", true),
            ("True", true),
            ("0", false),
            ("f", false),
            ("F", false),
            ("FALSE", false),
            ("false", false),
            ("False", false),
        ];

        for (value, expected) in test_cases {
            assert_eq!(parse_bool(value), Ok(expected), "Failed for value: {}", value);
        }
    }

    #[test]
    fn test_parse_bool_rejects_other_forms() {
        for value in ["yes", "no", "tRuE", "", " true"] {
            assert_eq!(parse_bool(value), Err(InvalidBool(value.to_string())));
        }
    }

    #[test]
    fn test_assign_string_verbatim() {
        let mut s = String::from("default");
        Target::from(&mut s).assign("K", " spaced value ".into()).unwrap();
        assert_eq!(s, " spaced value ");

        Target::from(&mut s).assign("K", String::new()).unwrap();
        assert_eq!(s, "");
    }

    #[test]
    fn test_assign_string_list() {
        let mut list: Vec<String> = Vec::new();
        Target::from(&mut list).assign("K", "test1,test2".into()).unwrap();
        assert_eq!(list, vec!["test1", "test2"]);

        Target::from(&mut list).assign("K", String::new()).unwrap();
        assert_eq!(list, vec![""]);
    }

    #[test]
    fn test_assign_i32_range_checked() {
        let mut n = 7i32;
        Target::from(&mut n).assign("K", "-2147483648".into()).unwrap();
        assert_eq!(n, i32::MIN);

        let err = Target::from(&mut n).assign("K", "2147483648".into()).unwrap_err();
        assert!(matches!(err, EnvBindError::Parse { kind: TargetKind::I32, .. }));
        assert_eq!(n, i32::MIN);
    }

    #[test]
    fn test_assign_integers() {
        let mut wide = 0i64;
        Target::from(&mut wide).assign("K", "9223372036854775807".into()).unwrap();
        assert_eq!(wide, i64::MAX);

        let mut platform = 0isize;
        Target::from(&mut platform).assign("K", "+42".into()).unwrap();
        assert_eq!(platform, 42);
    }

    #[test]
    fn test_assign_floats() {
        let mut narrow = 0f32;
        Target::from(&mut narrow).assign("K", "5.5".into()).unwrap();
        assert_eq!(narrow, 5.5);

        let mut double = 0f64;
        Target::from(&mut double).assign("K", "6.6".into()).unwrap();
        assert_eq!(double, 6.6);

        let err = Target::from(&mut double).assign("K", "6.6.6".into()).unwrap_err();
        assert!(matches!(err, EnvBindError::Parse { kind: TargetKind::F64, .. }));
        assert_eq!(double, 6.6);
    }

    #[test]
    fn test_parse_failure_leaves_target() {
        let mut flag = true;
        let err = Target::from(&mut flag).assign("TEST_FLAG", "maybe".into()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to parse TEST_FLAG as bool: invalid boolean value"
        );
        assert!(flag);
    }

    #[test]
    fn test_option_none_is_absent() {
        let target: Target<'_> = Option::<&mut String>::None.into();
        assert_eq!(target.kind(), TargetKind::Absent);

        let mut s = String::new();
        let target: Target<'_> = Some(&mut s).into();
        assert_eq!(target.kind(), TargetKind::Str);
    }

    #[test]
    fn test_unsupported_records_type_name() {
        let mut when = std::time::Duration::from_secs(1);
        let target = Target::unsupported(&mut when);
        assert_eq!(target.kind(), TargetKind::Unsupported);

        let err = target.assign("TEST_WHEN", "1s".into()).unwrap_err();
        match err {
            EnvBindError::UnsupportedType { key, type_name } => {
                assert_eq!(key, "TEST_WHEN");
                assert!(type_name.ends_with("Duration"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TargetKind::StrList.to_string(), "string list");
        assert_eq!(TargetKind::F32.to_string(), "f32");
    }

    #[test]
    fn test_float_overflow_rejected() {
        let mut narrow = 1.5f32;
        let err = Target::from(&mut narrow).assign("K", "1e40".into()).unwrap_err();
        assert!(matches!(err, EnvBindError::Parse { kind: TargetKind::F32, .. }));
        assert_eq!(narrow, 1.5);

        let mut double = 2.5f64;
        let err = Target::from(&mut double).assign("K", "-1e400".into()).unwrap_err();
        assert_eq!(err.to_string(), "failed to parse K as f64: value out of range");
        assert_eq!(double, 2.5);
    }

    #[test]
    fn test_explicit_infinity_accepted() {
        let mut narrow = 0f32;
        Target::from(&mut narrow).assign("K", "inf".into()).unwrap();
        assert_eq!(narrow, f32::INFINITY);

        let mut double = 0f64;
        Target::from(&mut double).assign("K", "-Infinity".into()).unwrap();
        assert_eq!(double, f64::NEG_INFINITY);
    }

    proptest! {
        #[test]
        fn i32_round_trip(n in any::<i32>()) {
            let mut target = 0i32;
            Target::from(&mut target).assign("K", n.to_string()).unwrap();
            prop_assert_eq!(target.to_string(), n.to_string());
        }

        #[test]
        fn i64_round_trip(n in any::<i64>()) {
            let mut target = 0i64;
            Target::from(&mut target).assign("K", n.to_string()).unwrap();
            prop_assert_eq!(target.to_string(), n.to_string());
        }

        #[test]
        fn isize_round_trip(n in any::<isize>()) {
            let mut target = 0isize;
            Target::from(&mut target).assign("K", n.to_string()).unwrap();
            prop_assert_eq!(target.to_string(), n.to_string());
        }

        #[test]
        fn bool_round_trip(b in any::<bool>()) {
            let mut target = !b;
            Target::from(&mut target).assign("K", b.to_string()).unwrap();
            prop_assert_eq!(target.to_string(), b.to_string());
        }

        #[test]
        fn f64_round_trip(x in -1e300f64..1e300f64) {
            let mut target = 0f64;
            Target::from(&mut target).assign("K", x.to_string()).unwrap();
            prop_assert_eq!(target.to_string(), x.to_string());
        }

        #[test]
        fn f32_round_trip(quarters in -4_000_000i32..4_000_000i32) {
            // Multiples of 0.25 below 2^20 are exact in f32.
            let x = quarters as f32 / 4.0;
            let mut target = 0f32;
            Target::from(&mut target).assign("K", x.to_string()).unwrap();
            prop_assert_eq!(target, x);
            prop_assert_eq!(target.to_string(), x.to_string());
        }

        #[test]
        fn string_round_trip(text in "[^,]*") {
            let mut target = String::new();
            Target::from(&mut target).assign("K", text.clone()).unwrap();
            prop_assert_eq!(&target, &text);

            let mut list: Vec<String> = Vec::new();
            Target::from(&mut list).assign("K", text.clone()).unwrap();
            prop_assert_eq!(list.join(","), text);
        }
    }
}
