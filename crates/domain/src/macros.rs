//! Macro for implementing Display and FromStr for small domain enums
//!
//! Navigation directions, navigation units and upload phases all travel as
//! lowercase strings (CLI commands, log fields). This macro keeps their
//! string forms in one place.
//!
//! # Example
//!
//! ```rust
//! use calstats_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Granularity {
//!     Day,
//!     Week,
//! }
//!
//! impl_domain_status_conversions!(Granularity {
//!     Day => "day",
//!     Week => "week",
//! });
//!
//! assert_eq!(Granularity::Week.to_string(), "week");
//! assert_eq!("DAY".parse::<Granularity>(), Ok(Granularity::Day));
//! ```

/// Implements Display and FromStr traits for unit-only enums
///
/// - Display writes the mapped lowercase string
/// - FromStr parses case-insensitively and reports the enum name on failure
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
