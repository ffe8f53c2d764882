//! The data model for Discord gateway events and the entities they carry.
//!
//! This is reexposed in `corvid`, and that should be preferred over this crate.

#[macro_use] mod serde;

macro_rules! into_id {
    ($ty:ty, $field_ty:ty, $field:ident) => {
        impl <'a> From<&'a $ty> for $field_ty {
            fn from(b: &'a $ty) -> $field_ty {
                b.$field
            }
        }
        impl From<$ty> for $field_ty {
            fn from(b: $ty) -> $field_ty {
                b.$field
            }
        }
    }
}

pub mod audit_log;
pub mod auto_mod;
pub mod channel;
pub mod embed;
pub mod emoji;
pub mod event;
pub mod guild;
pub mod intents;
pub mod interaction;
pub mod message;
pub mod monetization;
pub mod presence;
pub mod scheduled_event;
pub mod time;
pub mod types;
pub mod undefined;
pub mod user;
pub mod voice;

pub use crate::serde::JsonObject;
