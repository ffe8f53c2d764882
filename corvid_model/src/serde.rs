//! A convenience prelude for all the serde stuff we're doing.

pub use enumset::*;
pub use serde::{Deserialize, Deserializer, Serialize, Serializer};
pub use serde::de::{DeserializeOwned, Visitor, Error as DeError};
pub use serde_repr::*;
pub use serde_json::{self, Value as JsonValue, Map as JsonMap};
pub use strum_macros::*;

/// A raw gateway payload object.
pub type JsonObject = JsonMap<String, JsonValue>;

pub mod utils {
    use super::*;
    use std::fmt::{Formatter, Result as FmtResult};

    pub fn if_false(b: &bool) -> bool {
        !*b
    }

    pub mod snowflake {
        use super::*;

        pub fn serialize<S: Serializer>(t: &u64, s: S) -> Result<S::Ok, S::Error> {
            let id_str = t.to_string();
            id_str.serialize(s)
        }

        struct DeserializeVisiter;
        impl <'de> Visitor<'de> for DeserializeVisiter {
            type Value = u64;
            fn expecting(&self, formatter: &mut Formatter<'_>) -> FmtResult {
                formatter.write_str("snowflake")
            }

            fn visit_i64<E>(self, v: i64) -> Result<u64, E> where E: DeError {
                if v < 0 {
                    Err(E::custom("ids cannot be negative"))
                } else {
                    Ok(v as u64)
                }
            }
            fn visit_u64<E>(self, v: u64) -> Result<u64, E> where E: DeError {
                Ok(v)
            }

            fn visit_str<E>(self, v: &str) -> Result<u64, E> where E: DeError {
                v.parse().map_err(|_| E::custom("could not parse snowflake"))
            }
            fn visit_bytes<E>(self, v: &[u8]) -> Result<u64, E> where E: DeError {
                self.visit_str(::std::str::from_utf8(v)
                    .map_err(|_| E::custom("could not parse snowflake string as utf-8"))?)
            }
        }
        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
            d.deserialize_any(DeserializeVisiter)
        }
    }

    /// Integers Discord sends as strings, such as permission bitsets.
    pub mod stringly_u64 {
        pub use super::snowflake::{serialize, deserialize};
    }
}
