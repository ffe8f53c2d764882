use corvid::decoder::{EntityDecoder, SerdeEntityDecoder};
use corvid::factory::EventFactory;
use corvid::model::JsonObject;
use corvid::model::audit_log::AuditLogEntry;
use corvid::model::auto_mod::{AutoModAction, AutoModRule};
use corvid::model::channel::{Channel, InviteWithMetadata, ThreadMember};
use corvid::model::emoji::Emoji;
use corvid::model::event::*;
use corvid::model::guild::*;
use corvid::model::interaction::Interaction;
use corvid::model::message::{Message, PartialMessage};
use corvid::model::monetization::Entitlement;
use corvid::model::presence::MemberPresence;
use corvid::model::scheduled_event::ScheduledEvent;
use corvid::model::types::*;
use corvid::model::undefined::Undefinable;
use corvid::model::user::{OwnUser, PartialUser, User};
use corvid::model::voice::VoiceState;
use corvid::{ErrorKind, Result};
use serde_json::{json, Value as JsonValue};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};

const SHARD: ShardId = ShardId(0, 1);

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_log::LogTracer::init();
        let subscriber = tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

fn factory() -> EventFactory {
    init_tracing();
    EventFactory::new(Arc::new(SerdeEntityDecoder))
}

fn obj(value: JsonValue) -> JsonObject {
    match value {
        JsonValue::Object(map) => map,
        _ => panic!("fixture is not an object"),
    }
}

/// Adds `guild_id: "2"` to a payload.
fn in_guild(value: &JsonValue) -> JsonObject {
    let mut map = obj(value.clone());
    map.insert("guild_id".to_string(), json!("2"));
    map
}

fn decode(name: &str, payload: &JsonObject) -> GatewayEvent {
    factory().decode(SHARD, name, payload).unwrap()
}

fn user(id: &str) -> JsonValue {
    json!({ "id": id, "username": "someone", "discriminator": "0" })
}

fn member(id: &str) -> JsonValue {
    json!({ "user": user(id), "roles": [] })
}

fn message() -> JsonValue {
    json!({
        "id": "10",
        "channel_id": "1",
        "author": user("5"),
        "content": "hello",
        "timestamp": "2024-01-01T00:00:00+00:00",
    })
}

/// Checks that a payload decodes to the guild variant with `guild_id` and the DM variant
/// without it.
fn check_split(name: &str, payload: JsonValue, guild: &str, dm: &str) {
    let guild_event = decode(name, &in_guild(&payload));
    assert_eq!(guild_event.variant_name(), guild, "{} in a guild", name);
    let dm_event = decode(name, &obj(payload));
    assert_eq!(dm_event.variant_name(), dm, "{} in a DM", name);
}

#[test]
fn guild_and_dm_variants() {
    check_split("MESSAGE_CREATE", message(), "GuildMessageCreate", "DmMessageCreate");
    check_split(
        "MESSAGE_UPDATE", json!({ "id": "10", "channel_id": "1", "content": "edited" }),
        "GuildMessageUpdate", "DmMessageUpdate",
    );
    check_split(
        "MESSAGE_DELETE", json!({ "id": "10", "channel_id": "1" }),
        "GuildMessageDelete", "DmMessageDelete",
    );
    check_split(
        "CHANNEL_PINS_UPDATE", json!({ "channel_id": "1", "last_pin_timestamp": null }),
        "GuildPinsUpdate", "DmPinsUpdate",
    );
    check_split(
        "MESSAGE_REACTION_REMOVE",
        json!({
            "channel_id": "1", "message_id": "10", "user_id": "5",
            "emoji": { "id": null, "name": "👍" },
        }),
        "GuildReactionDelete", "DmReactionDelete",
    );
    check_split(
        "MESSAGE_REACTION_REMOVE_ALL", json!({ "channel_id": "1", "message_id": "10" }),
        "GuildReactionDeleteAll", "DmReactionDeleteAll",
    );
    check_split(
        "MESSAGE_REACTION_REMOVE_EMOJI",
        json!({ "channel_id": "1", "message_id": "10", "emoji": { "id": "9", "name": "blob" } }),
        "GuildReactionDeleteEmoji", "DmReactionDeleteEmoji",
    );
    let vote = json!({ "channel_id": "1", "message_id": "10", "user_id": "5", "answer_id": 1 });
    check_split("MESSAGE_POLL_VOTE_ADD", vote.clone(), "GuildPollVoteAdd", "DmPollVoteAdd");
    check_split("MESSAGE_POLL_VOTE_REMOVE", vote, "GuildPollVoteRemove", "DmPollVoteRemove");
}

#[test]
fn reaction_add_decodes_member_in_guilds() {
    let payload = json!({
        "channel_id": "1", "message_id": "10", "user_id": "5",
        "emoji": { "id": null, "name": "👍" },
    });
    match decode("MESSAGE_REACTION_ADD", &obj(payload.clone())) {
        GatewayEvent::DmReactionAdd(ev) => {
            assert_eq!(ev.user_id, UserId::from(5));
            assert_eq!(ev.emoji.name(), Some("👍"));
            assert_eq!(ev.message_author_id, None);
        }
        ev => panic!("unexpected event: {:?}", ev),
    }

    let mut guild_payload = in_guild(&payload);
    guild_payload.insert("member".to_string(), member("5"));
    guild_payload.insert("message_author_id".to_string(), json!("6"));
    match decode("MESSAGE_REACTION_ADD", &guild_payload) {
        GatewayEvent::GuildReactionAdd(ev) => {
            assert_eq!(ev.member.user.id, UserId::from(5));
            assert_eq!(ev.member.guild_id, Some(GuildId::from(2)));
            assert_eq!(ev.message_author_id, Some(UserId::from(6)));
        }
        ev => panic!("unexpected event: {:?}", ev),
    }
}

#[test]
fn message_accessors() {
    let mut payload = obj(message());
    payload.insert("webhook_id".to_string(), json!("77"));
    match decode("MESSAGE_CREATE", &payload) {
        GatewayEvent::DmMessageCreate(ev) => {
            assert_eq!(ev.author_id(), UserId::from(5));
            assert_eq!(ev.content(), "hello");
            assert!(ev.is_webhook());
            assert!(!ev.is_bot());
            // not a bot, but sent through a webhook
            assert!(!ev.is_human());
        }
        ev => panic!("unexpected event: {:?}", ev),
    }

    match decode("MESSAGE_UPDATE", &obj(json!({ "id": "10", "channel_id": "1" }))) {
        GatewayEvent::DmMessageUpdate(ev) => {
            assert_eq!(ev.content(), Undefinable::Unchanged);
            assert_eq!(ev.author_id(), None);
            assert_eq!(ev.is_human(), None);
        }
        ev => panic!("unexpected event: {:?}", ev),
    }

    match decode("MESSAGE_UPDATE", &obj(json!({
        "id": "10", "channel_id": "1", "webhook_id": "7",
    }))) {
        GatewayEvent::DmMessageUpdate(ev) => {
            assert_eq!(ev.is_webhook(), Some(true));
            assert_eq!(ev.is_human(), Some(false));
            assert_eq!(ev.is_bot(), None);
        }
        ev => panic!("unexpected event: {:?}", ev),
    }
}

#[test]
fn bulk_delete() {
    let payload = obj(json!({ "channel_id": "1", "guild_id": "2", "ids": ["10", "11"] }));
    let expected = GatewayEvent::GuildBulkMessageDelete(GuildBulkMessageDeleteEvent {
        shard: SHARD,
        guild_id: GuildId::from(2),
        channel_id: ChannelId::from(1),
        message_ids: vec![MessageId::from(10), MessageId::from(11)].into_iter()
            .collect::<BTreeSet<_>>(),
        old_messages: BTreeMap::new(),
    });
    assert_eq!(decode("MESSAGE_DELETE_BULK", &payload), expected);

    let err = factory().decode(SHARD, "MESSAGE_DELETE_BULK", &obj(json!({
        "channel_id": "1", "ids": ["10"],
    }))).unwrap_err();
    assert_eq!(err.error_kind(), &ErrorKind::ProtocolViolation("guild event without a `guild_id`"));
}

#[test]
fn presence_partial_user() {
    let presence = |user: JsonValue| obj(json!({
        "user": user, "guild_id": "2", "status": "online", "activities": [],
    }));

    match decode("PRESENCE_UPDATE", &presence(json!({ "id": "5" }))) {
        GatewayEvent::PresenceUpdate(ev) => {
            assert_eq!(ev.user_id(), UserId::from(5));
            assert_eq!(ev.user, None);
        }
        ev => panic!("unexpected event: {:?}", ev),
    }

    match decode("PRESENCE_UPDATE", &presence(json!({ "id": "5", "username": "x" }))) {
        GatewayEvent::PresenceUpdate(ev) => {
            let user = ev.user.expect("multi-key user fragment yields a partial user");
            assert_eq!(user.id, UserId::from(5));
            assert_eq!(user.username, Undefinable::Value("x".to_string()));
            assert_eq!(user.avatar, Undefinable::Unchanged);
            assert_eq!(user.global_name, Undefinable::Unchanged);
            assert_eq!(user.bot, Undefinable::Unchanged);
        }
        ev => panic!("unexpected event: {:?}", ev),
    }
}

/// Wraps [`SerdeEntityDecoder`] and counts calls to `decode_member`.
#[derive(Default)]
struct CountingDecoder {
    member_calls: AtomicUsize,
}
impl EntityDecoder for CountingDecoder {
    fn decode_user(&self, f: &JsonValue) -> Result<User> {
        SerdeEntityDecoder.decode_user(f)
    }
    fn decode_own_user(&self, f: &JsonValue) -> Result<OwnUser> {
        SerdeEntityDecoder.decode_own_user(f)
    }
    fn decode_partial_user(&self, f: &JsonValue) -> Result<PartialUser> {
        SerdeEntityDecoder.decode_partial_user(f)
    }
    fn decode_member(&self, f: &JsonValue, guild_id: Option<GuildId>) -> Result<Member> {
        self.member_calls.fetch_add(1, Ordering::SeqCst);
        SerdeEntityDecoder.decode_member(f, guild_id)
    }
    fn decode_role(&self, f: &JsonValue, guild_id: GuildId) -> Result<Role> {
        SerdeEntityDecoder.decode_role(f, guild_id)
    }
    fn decode_emoji(&self, f: &JsonValue) -> Result<Emoji> {
        SerdeEntityDecoder.decode_emoji(f)
    }
    fn decode_known_custom_emoji(
        &self, f: &JsonValue, guild_id: GuildId,
    ) -> Result<KnownCustomEmoji> {
        SerdeEntityDecoder.decode_known_custom_emoji(f, guild_id)
    }
    fn decode_sticker(&self, f: &JsonValue) -> Result<GuildSticker> {
        SerdeEntityDecoder.decode_sticker(f)
    }
    fn decode_presence(
        &self, f: &JsonValue, guild_id: Option<GuildId>,
    ) -> Result<MemberPresence> {
        SerdeEntityDecoder.decode_presence(f, guild_id)
    }
    fn decode_channel(&self, f: &JsonValue, guild_id: Option<GuildId>) -> Result<Channel> {
        SerdeEntityDecoder.decode_channel(f, guild_id)
    }
    fn decode_thread_member(&self, f: &JsonValue) -> Result<ThreadMember> {
        SerdeEntityDecoder.decode_thread_member(f)
    }
    fn decode_gateway_guild(&self, f: &JsonValue) -> Result<GatewayGuild> {
        SerdeEntityDecoder.decode_gateway_guild(f)
    }
    fn decode_message(&self, f: &JsonValue) -> Result<Message> {
        SerdeEntityDecoder.decode_message(f)
    }
    fn decode_partial_message(&self, f: &JsonValue) -> Result<PartialMessage> {
        SerdeEntityDecoder.decode_partial_message(f)
    }
    fn decode_voice_state(&self, f: &JsonValue) -> Result<VoiceState> {
        SerdeEntityDecoder.decode_voice_state(f)
    }
    fn decode_integration(&self, f: &JsonValue) -> Result<Integration> {
        SerdeEntityDecoder.decode_integration(f)
    }
    fn decode_invite(&self, f: &JsonValue) -> Result<InviteWithMetadata> {
        SerdeEntityDecoder.decode_invite(f)
    }
    fn decode_interaction(&self, f: &JsonValue) -> Result<Interaction> {
        SerdeEntityDecoder.decode_interaction(f)
    }
    fn decode_scheduled_event(&self, f: &JsonValue) -> Result<ScheduledEvent> {
        SerdeEntityDecoder.decode_scheduled_event(f)
    }
    fn decode_auto_mod_rule(&self, f: &JsonValue) -> Result<AutoModRule> {
        SerdeEntityDecoder.decode_auto_mod_rule(f)
    }
    fn decode_auto_mod_action(&self, f: &JsonValue) -> Result<AutoModAction> {
        SerdeEntityDecoder.decode_auto_mod_action(f)
    }
    fn decode_entitlement(&self, f: &JsonValue) -> Result<Entitlement> {
        SerdeEntityDecoder.decode_entitlement(f)
    }
    fn decode_audit_log_entry(
        &self, f: &JsonValue, guild_id: GuildId,
    ) -> Result<AuditLogEntry> {
        SerdeEntityDecoder.decode_audit_log_entry(f, guild_id)
    }
}

#[test]
fn typing_start() {
    init_tracing();
    let decoder = Arc::new(CountingDecoder::default());
    let factory = EventFactory::new(decoder.clone());
    let payload = json!({ "channel_id": "1", "user_id": "5", "timestamp": 1700000000 });

    match factory.decode(SHARD, "TYPING_START", &obj(payload.clone())).unwrap() {
        GatewayEvent::DmTyping(ev) => {
            assert_eq!(ev.user_id, UserId::from(5));
            assert_eq!(ev.timestamp.timestamp(), 1700000000);
        }
        ev => panic!("unexpected event: {:?}", ev),
    }
    assert_eq!(decoder.member_calls.load(Ordering::SeqCst), 0);

    let mut guild_payload = in_guild(&payload);
    guild_payload.insert("member".to_string(), member("5"));
    match factory.decode(SHARD, "TYPING_START", &guild_payload).unwrap() {
        GatewayEvent::GuildTyping(ev) => {
            assert_eq!(ev.guild_id, GuildId::from(2));
            assert_eq!(ev.member.user.id, UserId::from(5));
        }
        ev => panic!("unexpected event: {:?}", ev),
    }
    assert_eq!(decoder.member_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn decoding_is_idempotent() {
    let factory = factory();
    let payloads = [
        ("MESSAGE_CREATE", in_guild(&message())),
        ("MESSAGE_DELETE_BULK", obj(json!({ "channel_id": "1", "guild_id": "2", "ids": ["3"] }))),
        ("CHANNEL_PINS_UPDATE", obj(json!({
            "channel_id": "1", "last_pin_timestamp": "2024-01-01T00:00:00+00:00",
        }))),
    ];
    for (name, payload) in &payloads {
        let first = factory.decode(SHARD, name, payload).unwrap();
        let second = factory.decode(SHARD, name, payload).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn pins_timestamp() {
    let absent = decode("CHANNEL_PINS_UPDATE", &obj(json!({ "channel_id": "1" })));
    let null = decode("CHANNEL_PINS_UPDATE", &obj(json!({
        "channel_id": "1", "last_pin_timestamp": null,
    })));
    assert_eq!(absent, null);
    match decode("CHANNEL_PINS_UPDATE", &obj(json!({
        "channel_id": "1", "last_pin_timestamp": "2024-01-01T00:00:00+00:00",
    }))) {
        GatewayEvent::DmPinsUpdate(ev) => {
            assert_eq!(ev.last_pin_timestamp.map(|t| t.timestamp()), Some(1704067200));
        }
        ev => panic!("unexpected event: {:?}", ev),
    }

    let err = factory().decode(SHARD, "CHANNEL_PINS_UPDATE", &obj(json!({
        "channel_id": "1", "last_pin_timestamp": 12,
    }))).unwrap_err();
    assert!(err.is_decode());
}

#[test]
fn null_guild_id_is_a_protocol_violation() {
    let payload = obj(json!({ "id": "10", "channel_id": "1", "guild_id": null }));
    let err = factory().decode(SHARD, "MESSAGE_DELETE", &payload).unwrap_err();
    assert_eq!(
        err.error_kind(), &ErrorKind::ProtocolViolation("guild event with a null `guild_id`"),
    );
    assert!(err.is_error());
    assert!(!err.is_decode());
}

#[test]
fn missing_fields_are_decode_errors() {
    let err = factory().decode(SHARD, "MESSAGE_DELETE", &obj(json!({ "id": "10" })))
        .unwrap_err();
    assert_eq!(err.error_kind(), &ErrorKind::MissingField("channel_id"));
    assert!(err.is_decode());

    let err = factory().decode(SHARD, "MESSAGE_DELETE", &obj(json!({
        "id": true, "channel_id": "1",
    }))).unwrap_err();
    assert_eq!(err.error_kind(), &ErrorKind::InvalidField("id"));
    assert!(err.is_decode());

    // numeric snowflakes are accepted
    match decode("MESSAGE_DELETE", &obj(json!({ "id": 10, "channel_id": "1" }))) {
        GatewayEvent::DmMessageDelete(ev) => assert_eq!(ev.message_id, MessageId::from(10)),
        ev => panic!("unexpected event: {:?}", ev),
    }
}

#[test]
fn thread_list_sync_channel_ids() {
    match decode("THREAD_LIST_SYNC", &obj(json!({
        "guild_id": "2", "threads": [], "members": [],
    }))) {
        GatewayEvent::ThreadListSync(ev) => {
            assert_eq!(ev.channel_ids, None);
            assert!(ev.threads.is_empty());
        }
        ev => panic!("unexpected event: {:?}", ev),
    }
    match decode("THREAD_LIST_SYNC", &obj(json!({
        "guild_id": "2", "channel_ids": [], "threads": [], "members": [],
    }))) {
        GatewayEvent::ThreadListSync(ev) => assert_eq!(ev.channel_ids, Some(vec![])),
        ev => panic!("unexpected event: {:?}", ev),
    }
    match decode("THREAD_LIST_SYNC", &obj(json!({
        "guild_id": "2", "channel_ids": ["3", "4"], "threads": [], "members": [],
    }))) {
        GatewayEvent::ThreadListSync(ev) =>
            assert_eq!(ev.channel_ids, Some(vec![ChannelId::from(3), ChannelId::from(4)])),
        ev => panic!("unexpected event: {:?}", ev),
    }
}

#[test]
fn guild_delete_variants() {
    assert_eq!(
        decode("GUILD_DELETE", &obj(json!({ "id": "2", "unavailable": true }))),
        GatewayEvent::GuildUnavailable(GuildUnavailableEvent {
            shard: SHARD, guild_id: GuildId::from(2),
        }),
    );
    assert_eq!(
        decode("GUILD_DELETE", &obj(json!({ "id": "2" }))),
        GatewayEvent::GuildLeave(GuildLeaveEvent { shard: SHARD, guild_id: GuildId::from(2) }),
    );
}

#[test]
fn voice_server_endpoint() {
    match decode("VOICE_SERVER_UPDATE", &obj(json!({
        "token": "abc", "guild_id": "2", "endpoint": "us-east1.discord.media:443",
    }))) {
        GatewayEvent::VoiceServerUpdate(ev) => {
            assert_eq!(ev.token, "abc");
            assert_eq!(ev.endpoint().as_deref(), Some("wss://us-east1.discord.media:443"));
        }
        ev => panic!("unexpected event: {:?}", ev),
    }
    match decode("VOICE_SERVER_UPDATE", &obj(json!({
        "token": "abc", "guild_id": "2", "endpoint": null,
    }))) {
        GatewayEvent::VoiceServerUpdate(ev) => assert_eq!(ev.endpoint(), None),
        ev => panic!("unexpected event: {:?}", ev),
    }
}

#[test]
fn unknown_event() {
    let err = factory().decode(SHARD, "SOMETHING_NEW", &JsonObject::new()).unwrap_err();
    assert_eq!(err.error_kind(), &ErrorKind::UnknownEvent("SOMETHING_NEW".to_string()));
}
