#![deny(unused_must_use)]

#[macro_use] extern crate derivative;
#[macro_use] extern crate corvid_errors;
#[macro_use] extern crate lazy_static;
#[macro_use] extern crate tracing;

pub(crate) mod errors {
    pub use corvid_errors::*;
}

mod context;
pub mod decoder;
pub mod dispatch;
pub mod factory;
pub mod tasks;

#[doc(inline)] pub use context::*;
#[doc(inline)] pub use corvid_errors::{Error, ErrorKind, Result};

/// Types used to represent Discord gateway events.
#[doc(inline)] pub extern crate corvid_model as model;

/// A set of reexports for more conveniently using the library.
pub mod prelude {
    #[doc(no_inline)] pub use crate::context::{DiscordContext, DiscordContextBuilder};
    #[doc(no_inline)] pub use crate::dispatch::{EventContext, EventDispatcher, EventHandler};
    #[doc(no_inline)] pub use crate::tasks::{all_of, first_of, TaskHandle, TaskScheduler};
    pub use corvid_model::event::{GatewayEvent, GatewayEventType};
    pub use corvid_model::intents::Intent;
    pub use corvid_model::types::ShardId;
}
