/// Defines a closed enumeration backed by sequential raw values.
///
/// Each variant carries the canonical name used by the opcode table
/// source and by `Display`. The raw value of a variant is its position.
#[macro_export]
macro_rules! define_enum {
    ($(#[$attr:meta])* $vis:vis enum $name:ident {
        $($(#[$vattr:meta])* $variant:ident = $text:literal),+ $(,)?
    }) => (
        #[repr(u8)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $(#[$attr])*
        $vis enum $name {
            $($(#[$vattr])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];
            pub const COUNT: usize = Self::ALL.len();

            pub fn from_raw(value: u32) -> Option<Self> {
                Self::ALL.get(value as usize).copied()
            }

            pub const fn raw(self) -> u32 {
                self as u32
            }

            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                Some(match name {
                    $($text => Self::$variant,)+
                    _ => return None,
                })
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
                fmt.write_str(self.name())
            }
        }
    );
}
pub use define_enum;
