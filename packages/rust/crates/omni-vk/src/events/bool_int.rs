use serde::Deserialize;
use serde::de::{self, Deserializer, Visitor};

/// VK encodes most flags as `0`/`1`; some endpoints send real booleans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BoolInt(pub bool);

impl BoolInt {
    pub fn get(self) -> bool {
        self.0
    }
}

impl From<BoolInt> for bool {
    fn from(value: BoolInt) -> Self {
        value.0
    }
}

impl<'de> Deserialize<'de> for BoolInt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BoolIntVisitor;

        impl Visitor<'_> for BoolIntVisitor {
            type Value = BoolInt;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a 0/1 integer or a boolean")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<BoolInt, E> {
                Ok(BoolInt(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<BoolInt, E> {
                Ok(BoolInt(value != 0))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<BoolInt, E> {
                Ok(BoolInt(value != 0))
            }
        }

        deserializer.deserialize_any(BoolIntVisitor)
    }
}
