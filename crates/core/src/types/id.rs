//! Newtype IDs for type-safe entity references.
//!
//! Store and account IDs arrive from untrusted places (cookies, form posts),
//! so every ID type parses through [`IdError`] and only accepts positive
//! integers. Zero is never a valid ID: it is what an empty or garbage cookie
//! value decodes to.

/// Errors that can occur when parsing an ID from text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input was empty (after trimming).
    #[error("id cannot be empty")]
    Empty,
    /// The input is not an integer.
    #[error("id must be an integer, got {0:?}")]
    NotANumber(String),
    /// The input is zero or negative.
    #[error("id must be positive, got {0}")]
    NotPositive(i32),
}

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Ord`
/// - `new()`, `as_i32()` and a validating `parse()` / `FromStr`
/// - `From<i32>` and `Into<i32>` implementations
/// - `sqlx` `Type`, `Encode`, and `Decode` implementations (with `postgres` feature)
///
/// # Example
///
/// ```rust
/// # use store_selector_core::define_id;
/// define_id!(WarehouseId);
///
/// let id = WarehouseId::parse("7").unwrap();
/// assert_eq!(id.as_i32(), 7);
/// assert!(WarehouseId::parse("0").is_err());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }

            /// Parse an ID from text, accepting only positive integers.
            ///
            /// # Errors
            ///
            /// Returns [`IdError`](`$crate::IdError`) if the input is empty,
            /// not an integer, or not positive.
            pub fn parse(s: &str) -> ::core::result::Result<Self, $crate::IdError> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err($crate::IdError::Empty);
                }
                let value = trimmed
                    .parse::<i32>()
                    .map_err(|_| $crate::IdError::NotANumber(trimmed.to_owned()))?;
                if value <= 0 {
                    return Err($crate::IdError::NotPositive(value));
                }
                Ok(Self(value))
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <i32 as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <i32 as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
                let id = <i32 as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
                Ok(Self(id))
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Encode<'_, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <i32 as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

define_id!(StoreId);
define_id!(AccountId);
