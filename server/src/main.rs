use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use spin_wheel_engine::{parse_labels, SpinEngine, TickOutcome};
use spin_wheel_shared::*;
use tokio::net::TcpListener;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::MissedTickBehavior;
use tokio_tungstenite::tungstenite::Message;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::network::handle_connection;
use crate::settings::{ServerSettings, DEFAULT_SETTINGS_PATH};

mod network;
mod settings;

type Tx = UnboundedSender<Message>;
type PeerMap = Arc<Mutex<HashMap<String, Tx>>>;
type SharedEngine = Arc<Mutex<SpinEngine<StdRng>>>;

const MIN_FRAME_PERIOD: Duration = Duration::from_millis(1);

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn encode(msg: &ServerMessage) -> Option<Message> {
    match serde_json::to_string(msg) {
        Ok(txt) => Some(Message::Text(txt.into())),
        Err(e) => {
            error!("failed to encode {msg:?}: {e}");
            None
        }
    }
}

fn broadcast(peers: &PeerMap, msg: &ServerMessage) {
    let Some(msg) = encode(msg) else {
        return;
    };
    let peers_guard = lock(peers);
    for (_id, tx) in peers_guard.iter() {
        let _ = tx.send(msg.clone());
    }
}

fn send_to(peers: &PeerMap, id: &str, msg: &ServerMessage) {
    let Some(msg) = encode(msg) else {
        return;
    };
    if let Some(tx) = lock(peers).get(id) {
        let _ = tx.send(msg);
    }
}

/// Animates the active spin until it finishes, broadcasting one frame per
/// tick and the result at the end. Returns once the wheel is idle.
async fn drive_spin(engine: SharedEngine, peers: PeerMap, frame_period: Duration) {
    let mut frames = tokio::time::interval(frame_period.max(MIN_FRAME_PERIOD));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        frames.tick().await;
        let (outcome, frame) = {
            let mut engine = lock(&engine);
            let outcome = engine.tick(Instant::now());
            (outcome, engine.frame())
        };

        match outcome {
            Ok(TickOutcome::Frame { .. }) => {
                broadcast(&peers, &ServerMessage::Frame { frame });
            }
            Ok(TickOutcome::Finished(result)) => {
                info!(index = result.index, label = %result.label, "announcing winner");
                broadcast(&peers, &ServerMessage::Frame { frame });
                broadcast(&peers, &ServerMessage::Result { result });
                break;
            }
            Ok(TickOutcome::Idle) => break,
            Err(e) => {
                warn!("spin ended without a winner: {e}");
                broadcast(&peers, &ServerMessage::Frame { frame });
                break;
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let addr = args.next();
    let settings_path = args
        .next()
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());

    let mut settings = ServerSettings::load(Path::new(&settings_path))?;
    if let Some(addr) = addr {
        settings.bind = addr;
    }
    info!("Starting server on {}", settings.bind);

    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let engine: SharedEngine = Arc::new(Mutex::new(SpinEngine::new(
        parse_labels(&settings.labels),
        rng,
    )));
    let peers: PeerMap = Arc::new(Mutex::new(HashMap::new()));
    let frame_period = settings.frame_period();

    let listener = TcpListener::bind(&settings.bind).await?;
    while let Ok((stream, _)) = listener.accept().await {
        let peers = peers.clone();
        let engine = engine.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peers, engine, frame_period).await {
                warn!("Connection error: {e:?}");
            }
        });
    }

    Ok(())
}
