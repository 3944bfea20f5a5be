//! Defines a helper macro for string-tagged enums.

/// Declare a fieldless enum whose wire form is a fixed string tag.
///
/// The generated type derives serde and `ToSchema` with the given tags and
/// implements [`ClosedSet`](crate::domain::validation::ClosedSet) so
/// contracts can check membership with
/// [`OneOf`](crate::domain::validation::OneOf).
macro_rules! closed_set {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $tag:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
            ::utoipa::ToSchema,
        )]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $tag)]
                $variant,
            )+
        }

        impl $crate::domain::validation::ClosedSet for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $tag,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::domain::validation::ClosedSet::as_str(*self))
            }
        }
    };
}

pub(crate) use closed_set;
