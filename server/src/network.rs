use std::time::{Duration, Instant};

use futures::{SinkExt, StreamExt};
use spin_wheel_shared::{ClientMessage, Command, ServerMessage};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::accept_async;
use tracing::{debug, info, warn};
use tungstenite::Message;
use uuid::Uuid;

use crate::{broadcast, drive_spin, lock, send_to, PeerMap, SharedEngine};

/// Applies one command from `client_id` to the wheel and notifies peers.
pub fn apply_command(
    cmd: Command,
    client_id: &str,
    peers: &PeerMap,
    engine: &SharedEngine,
    frame_period: Duration,
) {
    match cmd {
        Command::Spin => {
            let started = lock(engine).spin(Instant::now());
            match started {
                Ok(plan) => {
                    info!(
                        client = client_id,
                        duration_ms = plan.duration.as_millis() as u64,
                        "spin started"
                    );
                    broadcast_frame(peers, engine);
                    tokio::spawn(drive_spin(engine.clone(), peers.clone(), frame_period));
                }
                Err(e) => {
                    debug!(client = client_id, "spin rejected: {e}");
                    send_to(
                        peers,
                        client_id,
                        &ServerMessage::Rejected { reason: e.into() },
                    );
                }
            }
        }
        Command::ResetRotation => {
            if lock(engine).reset_rotation() {
                broadcast_frame(peers, engine);
            }
        }
        Command::SetLabels { text } => {
            if lock(engine).set_labels_from_text(&text) {
                broadcast_frame(peers, engine);
            }
        }
        Command::SetOptions { labels } => {
            let labels = labels
                .into_iter()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect();
            if lock(engine).set_labels(labels) {
                broadcast_frame(peers, engine);
            }
        }
        Command::Shuffle => {
            if lock(engine).shuffle() {
                broadcast_frame(peers, engine);
            }
        }
    }
}

fn broadcast_frame(peers: &PeerMap, engine: &SharedEngine) {
    let frame = lock(engine).frame();
    broadcast(peers, &ServerMessage::Frame { frame });
}

pub async fn handle_connection(
    stream: TcpStream,
    peers: PeerMap,
    engine: SharedEngine,
    frame_period: Duration,
) -> anyhow::Result<()> {
    let ws = accept_async(stream).await?;
    let (mut ws_sender, mut ws_receiver) = ws.split();

    let client_id = Uuid::new_v4().to_string();
    info!("New client {}", client_id);
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    lock(&peers).insert(client_id.clone(), tx);

    let assign = ServerMessage::AssignId {
        id: client_id.clone(),
    };
    ws_sender
        .send(Message::Text(serde_json::to_string(&assign)?.into()))
        .await?;
    let (frame, last_result) = {
        let engine = lock(&engine);
        (engine.frame(), engine.state().last_result().cloned())
    };
    let frame = ServerMessage::Frame { frame };
    ws_sender
        .send(Message::Text(serde_json::to_string(&frame)?.into()))
        .await?;
    if let Some(result) = last_result {
        let result = ServerMessage::Result { result };
        ws_sender
            .send(Message::Text(serde_json::to_string(&result)?.into()))
            .await?;
    }

    let forward_out = async {
        while let Some(msg) = rx.recv().await {
            if ws_sender.send(msg).await.is_err() {
                break;
            }
        }
        Ok::<(), anyhow::Error>(())
    };

    let inbound = async {
        while let Some(Ok(msg)) = ws_receiver.next().await {
            if let Message::Text(txt) = msg {
                match serde_json::from_str::<ClientMessage>(&txt) {
                    Ok(ClientMessage::Ping { ts }) => {
                        send_to(&peers, &client_id, &ServerMessage::Pong { ts });
                    }
                    Ok(ClientMessage::Command { cmd }) => {
                        debug!(client = %client_id, ?cmd, "command");
                        apply_command(cmd, &client_id, &peers, &engine, frame_period);
                    }
                    Err(e) => {
                        warn!("Malformed client msg: {e}");
                    }
                }
            }
        }
        Ok::<(), anyhow::Error>(())
    };

    tokio::select! {
        res = forward_out => { let _ = res; },
        res = inbound => { let _ = res; },
    }

    info!("Client {} disconnected", client_id);
    lock(&peers).remove(&client_id);

    Ok(())
}
