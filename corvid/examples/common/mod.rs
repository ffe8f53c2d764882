use corvid::prelude::*;
use corvid::tasks::TaskScheduler;
use std::future::Future;
use tracing::*;
use tracing_futures::*;

pub fn init_tracing() {
    tracing_log::LogTracer::init().unwrap();
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).unwrap();
}
pub fn new_context() -> DiscordContext {
    DiscordContext::builder()
        .library_name("corvid-demo".to_string())
        .emit_shard_payloads(false)
        .build()
        .unwrap()
}
pub fn start(fut: impl Future<Output = ()> + Send + 'static) {
    let scheduler = TaskScheduler::new().unwrap();
    scheduler.block_on(fut.instrument(info_span!("main_thread")));
    scheduler.shutdown();
}
