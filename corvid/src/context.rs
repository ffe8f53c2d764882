use crate::decoder::{EntityDecoder, SerdeEntityDecoder};
use crate::dispatch::{EventDispatcher, EventHandler};
use crate::errors::*;
use crate::factory::EventFactory;
use crate::model::intents::{Intent, IntentSet};
use crate::tasks;
use derive_setters::*;
use enumset::EnumSet;
use std::borrow::Cow;
use std::sync::Arc;

type ExceptionReporter = Arc<dyn Fn(&str, &Error) + Send + Sync>;

#[derive(Derivative)]
#[derivative(Debug)]
pub(crate) struct DiscordContextData {
    pub library_name: Cow<'static, str>,
    pub intents: EnumSet<Intent>,
    pub emit_shard_payloads: bool,
    pub factory: EventFactory,
}

/// Holds the configuration shared by everything processing events for a particular bot.
///
/// The [`Clone`] implementation creates a new handle to the same context.
#[derive(Clone, Debug)]
pub struct DiscordContext {
    pub(crate) data: Arc<DiscordContextData>,
}
impl DiscordContext {
    /// Creates a new Discord context using the default settings.
    pub fn new() -> Result<Self> {
        DiscordContextBuilder::new().build()
    }

    /// Returns a builder that allows configuring the Discord context's settings.
    pub fn builder() -> DiscordContextBuilder {
        DiscordContextBuilder::new()
    }

    /// Returns the library name reported to Discord.
    pub fn library_name(&self) -> &str {
        &self.data.library_name
    }

    /// Returns the intents shards of this bot connect with.
    pub fn intents(&self) -> EnumSet<Intent> {
        self.data.intents
    }

    /// Returns whether raw payloads are dispatched as [`ShardPayload`] events.
    ///
    /// [`ShardPayload`]: crate::model::event::GatewayEvent::ShardPayload
    pub fn emits_shard_payloads(&self) -> bool {
        self.data.emit_shard_payloads
    }

    /// Returns the event factory used to decode gateway events.
    pub fn factory(&self) -> &EventFactory {
        &self.data.factory
    }

    /// Creates a dispatcher delivering this context's events to a handler.
    pub fn dispatcher<H: EventHandler>(&self, handler: H) -> EventDispatcher<H> {
        EventDispatcher::new(self.clone(), handler)
    }
}

/// A builder for a [`DiscordContext`].
#[derive(Derivative, Setters)]
#[derivative(Debug)]
#[setters(strip_option)]
pub struct DiscordContextBuilder {
    /// Sets the library name reported to the Discord API.
    library_name: Option<String>,
    /// Sets the intents shards connect with.
    intents: EnumSet<Intent>,
    /// Sets whether every raw payload is also dispatched as a `ShardPayload` event.
    emit_shard_payloads: bool,
    /// Sets the decoder used for entities nested inside event payloads.
    #[derivative(Debug="ignore")]
    entity_decoder: Option<Arc<dyn EntityDecoder>>,
    #[derivative(Debug="ignore")]
    #[setters(skip)]
    exception_reporter: Option<ExceptionReporter>,
}
impl DiscordContextBuilder {
    fn new() -> Self {
        DiscordContextBuilder {
            library_name: None,
            intents: Intent::ALL_UNPRIVILEGED,
            emit_shard_payloads: false,
            entity_decoder: None,
            exception_reporter: None,
        }
    }

    /// Sets the function receiving errors that no caller is left to handle.
    ///
    /// This replaces the process-wide reporter when the context is built.
    pub fn exception_reporter(
        mut self, reporter: impl Fn(&str, &Error) + Send + Sync + 'static,
    ) -> Self {
        self.exception_reporter = Some(Arc::new(reporter));
        self
    }

    pub fn build(self) -> Result<DiscordContext> {
        ensure!(!self.intents.is_empty(), InvalidInput, "At least one intent must be enabled.");
        if self.intents.is_privileged() {
            debug!("Privileged intents are enabled: {:?}", self.intents & Intent::ALL_PRIVILEGED);
        }

        let library_name: Cow<str> = match self.library_name {
            Some(lib) => lib.into(),
            None => "corvid".into(),
        };
        let decoder = match self.entity_decoder {
            Some(decoder) => decoder,
            None => Arc::new(SerdeEntityDecoder),
        };
        if let Some(reporter) = self.exception_reporter {
            tasks::set_exception_reporter(move |source, err| reporter(source, err));
        }

        Ok(DiscordContext {
            data: Arc::new(DiscordContextData {
                library_name,
                intents: self.intents,
                emit_shard_payloads: self.emit_shard_payloads,
                factory: EventFactory::new(decoder),
            }),
        })
    }
}
