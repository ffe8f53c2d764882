//! Decodes a handful of recorded gateway payloads and prints the resulting events.

use corvid::dispatch::{DispatchError, EventContext};
use corvid::model::JsonObject;
use corvid::model::event::LifecycleStage;
use corvid::prelude::*;
use corvid::tasks::TaskHandle;
use serde_json::json;
use std::time::Duration;

mod common;

struct Dispatch;
impl EventHandler for Dispatch {
    type Error = corvid::Error;

    fn on_event(&self, ctx: &EventContext, ev: GatewayEvent) -> Result<(), corvid::Error> {
        match ctx.shard_id {
            Some(shard) => println!("Received event on shard #{}: {:?}", shard, ev),
            None => println!("Received event: {:?}", ev),
        }
        Ok(())
    }

    fn report_error(&self, ctx: &EventContext, err: DispatchError<Self>) {
        println!("{}", err.error_str(ctx.shard_id));
    }

    fn listens_for(&self) -> Vec<GatewayEventType> {
        vec![GatewayEventType::MessageCreate, GatewayEventType::PresenceUpdate]
    }
}

fn recorded() -> Vec<(&'static str, serde_json::Value)> {
    vec![
        ("MESSAGE_DELETE", json!({ "id": "10", "channel_id": "1", "guild_id": "2" })),
        ("MESSAGE_DELETE", json!({ "id": "11", "channel_id": "3" })),
        ("MESSAGE_DELETE_BULK", json!({ "channel_id": "1", "guild_id": "2", "ids": ["10", "11"] })),
        ("TYPING_START", json!({ "channel_id": "3", "user_id": "5", "timestamp": 1700000000 })),
        ("GUILD_ROLE_DELETE", json!({ "guild_id": "2", "role_id": "4" })),
        ("GUILD_BAN_ADD", json!({ "guild_id": null })),
        ("NOT_A_REAL_EVENT", json!({})),
    ]
}

async fn async_main(ctx: DiscordContext) {
    let dispatcher = ctx.dispatcher(Dispatch);
    dispatcher.dispatch_lifecycle(LifecycleStage::Started);

    let shard = ShardId(0, 1);
    dispatcher.shard_connected(shard);
    for (name, payload) in recorded() {
        let payload: JsonObject = match payload {
            serde_json::Value::Object(map) => map,
            _ => continue,
        };
        dispatcher.consume_raw_event(shard, name, payload);
    }

    let heartbeat = TaskHandle::spawn("heartbeat", async {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    });
    let timed_out = first_of(vec![heartbeat], Some(Duration::from_millis(50))).await;
    println!("Heartbeat result: {:?}", timed_out.map_err(|e| e.to_string()));

    dispatcher.dispatch_lifecycle(LifecycleStage::Stopped);
}

pub fn main() {
    common::init_tracing();
    common::start(async_main(common::new_context()));
}
