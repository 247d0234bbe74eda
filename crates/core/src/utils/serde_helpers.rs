//! Serde utility helpers for case-insensitive deserialization

/// Implement case-insensitive deserialization for a fieldless enum.
///
/// Each variant accepts one or more spellings; input is lowercased before
/// matching, so spellings must be given in lowercase.
///
/// Usage:
/// ```ignore
/// impl_case_insensitive_deserialize!(
///     MyEnum,
///     Variant1 => "variant1",
///     Variant2 => "variant2" | "variant_2"
/// );
/// ```
#[macro_export]
macro_rules! impl_case_insensitive_deserialize {
    ($enum_type:ty, $($variant:ident => $($str_val:literal)|+),+ $(,)?) => {
        impl<'de> serde::Deserialize<'de> for $enum_type {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                match s.trim().to_lowercase().as_str() {
                    $(
                        $($str_val)|+ => Ok(Self::$variant),
                    )+
                    _ => Err(serde::de::Error::custom(format!(
                        "unknown variant '{}', expected one of: {}",
                        s,
                        [$($($str_val),+),+].join(", ")
                    ))),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    #[derive(Debug, PartialEq)]
    enum Shade {
        Light,
        Dark,
    }

    impl_case_insensitive_deserialize!(
        Shade,
        Light => "light" | "bright",
        Dark => "dark"
    );

    #[test]
    fn test_accepts_any_case_and_alias() {
        assert_eq!(serde_json::from_str::<Shade>("\"LIGHT\"").unwrap(), Shade::Light);
        assert_eq!(serde_json::from_str::<Shade>("\" Bright \"").unwrap(), Shade::Light);
        assert_eq!(serde_json::from_str::<Shade>("\"dark\"").unwrap(), Shade::Dark);
    }

    #[test]
    fn test_error_lists_expected_spellings() {
        let err = serde_json::from_str::<Shade>("\"dim\"").unwrap_err();
        assert!(err.to_string().contains("light, bright, dark"));
    }
}
