//! Value Objects
//!
//! Closed vocabularies shared by validation, storage and the HTTP surface.
//! Each variant serializes to the exact label used on the wire and in the store.

/// Declares a closed vocabulary enum with its wire labels.
///
/// Generates `as_str`, `ALL`, `labels`, `Display` and a case-insensitive `FromStr`
/// whose error lists every accepted label.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $subject:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            serde::Serialize,
            serde::Deserialize,
            utoipa::ToSchema,
        )]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire label of this member
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn labels() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| {
                        format!("{} must be one of: {}", $subject, Self::labels().join(", "))
                    })
            }
        }
    };
}

mod commerce;
mod disease;
mod medicine;
mod plant;
mod prompt_type;

pub use commerce::*;
pub use disease::*;
pub use medicine::*;
pub use plant::*;
pub use prompt_type::*;
