//! Delivers decoded gateway events to an event handler.

use crate::context::DiscordContext;
use crate::errors::*;
use crate::factory::EventFactory;
use crate::model::JsonObject;
use crate::model::event::*;
use crate::model::intents::Intent;
use crate::model::types::ShardId;
use crate::tasks::{format_error, report_exception};
use std::error::Error as StdError;
use std::fmt::Write;
use std::result::{Result as StdResult};
use std::sync::Arc;

/// Passed to an [`EventHandler`] to indicate what type of error occurred.
#[derive(Debug)]
#[non_exhaustive]
pub enum DispatchError<T: EventHandler> {
    /// The payload of an event could not be decoded.
    ///
    /// This includes payloads that violate the gateway protocol, such as a guild event with no
    /// guild ID.
    DecodeFailed(GatewayEventType, Error),
    /// An event with no registered decoder was received.
    UnknownEvent(String),
    /// The error occurred in the [`EventHandler`] itself.
    EventHandlingFailed(T::Error),
    /// The event handler panicked.
    EventHandlingPanicked(Error),
}
impl <T: EventHandler> DispatchError<T> {
    /// Returns a string representing the type of error that occurred.
    pub fn error_str(&self, shard: Option<ShardId>) -> String {
        let source = match shard {
            Some(shard) => format!("Shard #{}", shard),
            None => "Dispatcher".to_string(),
        };
        match self {
            DispatchError::DecodeFailed(ty, _) =>
                format!("{} could not decode {} event", source, ty.name()),
            DispatchError::UnknownEvent(name) =>
                format!("{} received an unknown event: {}", source, name),
            DispatchError::EventHandlingFailed(_) =>
                format!("{} encountered an error in its event handler", source),
            DispatchError::EventHandlingPanicked(_) =>
                format!("{} panicked in its event handler", source),
        }
    }

    pub fn as_error(&self) -> Option<&Error> {
        match self {
            DispatchError::DecodeFailed(_, err) |
            DispatchError::EventHandlingPanicked(err) =>
                Some(err),
            _ => None,
        }
    }
}

/// Passed to an [`EventHandler`] to indicate the context in which an event was generated.
///
/// This struct can be cloned to obtain a `'static` version if needed.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct EventContext {
    /// The Discord context in which the event was generated.
    pub ctx: DiscordContext,
    /// The shard in which the event was generated, if any.
    pub shard_id: Option<ShardId>,
}

/// Handles events received from the gateway.
///
/// Event dispatches are synchronous. Anything that must wait on IO should be spawned into a
/// [`TaskScheduler`](crate::tasks::TaskScheduler) instead.
pub trait EventHandler: Sized + Send + Sync + 'static {
    /// The type of error used by this handler.
    type Error: StdError + Send + Sync + 'static;

    /// Handle events received by the gateway.
    fn on_event(&self, _: &EventContext, _: GatewayEvent) -> StdResult<(), Self::Error> {
        Ok(())
    }

    /// Called when an event could not be dispatched. This method should create an error report
    /// of some kind and then return.
    ///
    /// By default, unknown events are logged at the debug level and everything else is logged
    /// as an error.
    #[inline(never)]
    fn report_error(&self, ctx: &EventContext, err: DispatchError<Self>) {
        let mut buf = err.error_str(ctx.shard_id);
        if let DispatchError::UnknownEvent(_) = &err {
            debug!("{}", buf);
            return;
        }
        if let Some(err) = err.as_error() {
            let _ = write!(buf, ": {}", format_error(err));
        } else if let DispatchError::EventHandlingFailed(err) = &err {
            let _ = write!(buf, ": {}", err);
            let mut cause = err.source();
            while let Some(c) = cause {
                let _ = write!(buf, "\nCaused by: {}", c);
                cause = c.source();
            }
        }
        error!("{}", buf);
    }

    /// Decides whether to ignore a type of event.
    ///
    /// For any event where this method returns `true`, the library will not decode the event,
    /// and [`EventHandler::on_event`] will not be called.
    ///
    /// Returns `false` by default.
    fn ignores_event(&self, _: &EventContext, _: &GatewayEventType) -> bool {
        false
    }

    /// Returns the event types this handler is interested in.
    ///
    /// This is only used to warn about events the configured intents will never deliver.
    fn listens_for(&self) -> Vec<GatewayEventType> {
        Vec::new()
    }
}

/// Decodes raw gateway events and delivers them to an [`EventHandler`].
///
/// A failure while handling one event is reported to the handler and never affects the events
/// that follow it.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct EventDispatcher<H: EventHandler> {
    ctx: DiscordContext,
    factory: EventFactory,
    #[derivative(Debug="ignore")]
    handler: Arc<H>,
}
impl <H: EventHandler> EventDispatcher<H> {
    /// Creates a new dispatcher.
    pub fn new(ctx: DiscordContext, handler: H) -> Self {
        for ty in handler.listens_for() {
            if !Intent::can_receive(ctx.intents(), &ty) {
                warn!(
                    "Listening for {} events, but no enabled intent allows receiving them. \
                     Required intents: {:?}",
                    ty.name(), ty.required_intents(),
                );
            }
        }
        EventDispatcher {
            factory: ctx.factory().clone(),
            ctx,
            handler: Arc::new(handler),
        }
    }

    /// Returns the context this dispatcher was created for.
    pub fn context(&self) -> &DiscordContext {
        &self.ctx
    }

    /// Returns the handler events are delivered to.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Decodes a raw event received by a shard, and delivers it to the handler.
    ///
    /// Decode failures and handler failures are passed to [`EventHandler::report_error`].
    pub fn consume_raw_event(&self, shard: ShardId, name: &str, payload: JsonObject) {
        let ctx = self.event_context(Some(shard));
        let ty = GatewayEventType::from_name(name);
        if self.ctx.emits_shard_payloads() {
            let raw = self.factory.shard_payload(shard, name, payload.clone());
            self.deliver(&ctx, raw);
        }
        if self.handler.ignores_event(&ctx, &ty) {
            trace!("Ignoring {} event on shard #{}", ty.name(), shard);
            return;
        }

        match catch_panic(|| self.factory.decode_event(shard, &ty, &payload)) {
            Ok(event) => self.deliver(&ctx, event),
            Err(e) => match e.error_kind() {
                ErrorKind::UnknownEvent(name) =>
                    self.report(&ctx, DispatchError::UnknownEvent(name.clone())),
                _ => self.report(&ctx, DispatchError::DecodeFailed(ty, e)),
            },
        }
    }

    /// Delivers an event that did not come from a raw payload, such as a lifecycle event.
    pub fn dispatch(&self, event: GatewayEvent) {
        let ctx = self.event_context(event.shard());
        self.deliver(&ctx, event);
    }

    /// Delivers a [`LifecycleEvent`] for the given stage.
    pub fn dispatch_lifecycle(&self, stage: LifecycleStage) {
        self.dispatch(self.factory.lifecycle(stage));
    }

    /// Delivers the event sent when a shard establishes a new session.
    pub fn shard_connected(&self, shard: ShardId) {
        self.dispatch(self.factory.shard_connected(shard));
    }

    /// Delivers the event sent when a shard loses its connection.
    pub fn shard_disconnected(&self, shard: ShardId) {
        self.dispatch(self.factory.shard_disconnected(shard));
    }

    fn event_context(&self, shard_id: Option<ShardId>) -> EventContext {
        EventContext { ctx: self.ctx.clone(), shard_id }
    }

    fn deliver(&self, ctx: &EventContext, event: GatewayEvent) {
        match catch_panic(|| Ok(self.handler.on_event(ctx, event))) {
            Ok(Ok(())) => { }
            Ok(Err(e)) => self.report(ctx, DispatchError::EventHandlingFailed(e)),
            Err(e) => self.report(ctx, DispatchError::EventHandlingPanicked(e)),
        }
    }

    fn report(&self, ctx: &EventContext, err: DispatchError<H>) {
        if let Err(e) = catch_panic(|| Ok(self.handler.report_error(ctx, err))) {
            report_exception("event handler error reporting", &e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::{GuildId, RoleId};
    use parking_lot::Mutex;
    use serde_json::json;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<GatewayEvent>>,
        errors: Mutex<Vec<String>>,
    }
    impl EventHandler for Recorder {
        type Error = Error;

        fn on_event(&self, _: &EventContext, ev: GatewayEvent) -> Result<()> {
            if let GatewayEvent::GuildMessageDelete(_) = &ev {
                panic!("handler exploded");
            }
            if let GatewayEvent::DmMessageDelete(_) = &ev {
                bail!(InvalidInput, "handler refused event");
            }
            self.events.lock().push(ev);
            Ok(())
        }

        fn report_error(&self, ctx: &EventContext, err: DispatchError<Self>) {
            let text = match &err {
                DispatchError::EventHandlingFailed(e) => format!("failed: {}", e),
                _ => err.error_str(ctx.shard_id),
            };
            self.errors.lock().push(text);
        }

        fn ignores_event(&self, _: &EventContext, ty: &GatewayEventType) -> bool {
            *ty == GatewayEventType::TypingStart
        }
    }

    fn obj(value: serde_json::Value) -> JsonObject {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn bad_events_do_not_affect_later_ones() {
        let ctx = DiscordContext::new().unwrap();
        let dispatcher = ctx.dispatcher(Recorder::default());
        let shard = ShardId(0, 1);

        dispatcher.consume_raw_event(shard, "BRAND_NEW_EVENT", JsonObject::new());
        dispatcher.consume_raw_event(shard, "GUILD_BAN_ADD", obj(json!({ "guild_id": "1" })));
        dispatcher.consume_raw_event(shard, "MESSAGE_DELETE", obj(json!({
            "id": "3", "channel_id": "2", "guild_id": "1",
        })));
        dispatcher.consume_raw_event(shard, "MESSAGE_DELETE", obj(json!({
            "id": "3", "channel_id": "2",
        })));
        dispatcher.consume_raw_event(shard, "TYPING_START", JsonObject::new());
        dispatcher.consume_raw_event(shard, "GUILD_ROLE_DELETE", obj(json!({
            "guild_id": "1", "role_id": "4",
        })));

        let errors = dispatcher.handler().errors.lock().clone();
        assert_eq!(errors, vec![
            "Shard #1/1 received an unknown event: BRAND_NEW_EVENT".to_string(),
            "Shard #1/1 could not decode GUILD_BAN_ADD event".to_string(),
            "Shard #1/1 panicked in its event handler".to_string(),
            "failed: Invalid API usage: handler refused event".to_string(),
        ]);
        let events = dispatcher.handler().events.lock().clone();
        assert_eq!(events, vec![GatewayEvent::RoleDelete(RoleDeleteEvent {
            shard,
            guild_id: GuildId::from(1),
            role_id: RoleId::from(4),
        })]);
    }

    #[test]
    fn shard_payloads() {
        let ctx = DiscordContext::builder().emit_shard_payloads(true).build().unwrap();
        let dispatcher = ctx.dispatcher(Recorder::default());
        let shard = ShardId(1, 2);
        dispatcher.consume_raw_event(shard, "RESUMED", JsonObject::new());
        dispatcher.shard_connected(shard);
        dispatcher.dispatch_lifecycle(LifecycleStage::Stopping);

        let events = dispatcher.handler().events.lock().clone();
        assert_eq!(events, vec![
            GatewayEvent::ShardPayload(ShardPayloadEvent {
                shard, name: "RESUMED".to_string(), payload: JsonObject::new(),
            }),
            GatewayEvent::ShardResumed(ShardResumedEvent { shard }),
            GatewayEvent::ShardConnected(ShardConnectedEvent { shard }),
            GatewayEvent::Lifecycle(LifecycleEvent { stage: LifecycleStage::Stopping }),
        ]);
    }
}
