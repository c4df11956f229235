/// Declares a `u8`-backed enum stored on the wire as a single byte.
///
/// Unknown wire values decode to the declared default instead of failing, so files written by
/// newer exporters stay loadable.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal ),+ $(,)?
        }
        default = $default:ident;
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[repr(u8)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant = $value ),+
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl $name {
            /// Map a wire byte to a variant; unknown values fall back to the default.
            pub fn from_u8(value: u8) -> Self {
                match value {
                    $( $value => Self::$variant, )+
                    _ => Self::$default,
                }
            }

            /// The wire byte of this variant.
            pub fn to_u8(self) -> u8 {
                self as u8
            }
        }

        impl $crate::codec::attributes::AttributeValue for $name {
            fn read_value(
                stream: &mut $crate::codec::stream::DecodeStream<'_>,
            ) -> $crate::foundation::error::PagResult<Self> {
                Ok(Self::from_u8(stream.read_u8()?))
            }

            fn write_value(&self, stream: &mut $crate::codec::stream::EncodeStream) {
                stream.write_u8(self.to_u8());
            }
        }
    };
}
