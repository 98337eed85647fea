//! WebSocket server implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{Sink, SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::data::LoadedBank;
use crate::error::QuizError;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::session::RandomShuffler;

use super::host::Host;

/// The hosted session; every command runs under this lock.
type SharedHost = Arc<Mutex<Host<RandomShuffler>>>;

/// Serve one quiz session on `port` until interrupted.
pub async fn run(port: u16, bank: LoadedBank, shuffler: RandomShuffler) -> Result<(), QuizError> {
    let mut host = Host::new(bank.records, shuffler);
    if let Some(reason) = bank.fallback {
        host = host.with_fallback(reason.to_string());
    }
    info!(questions = host.total_questions(), "quiz bank ready");
    let host = Arc::new(Mutex::new(host));

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "server listening");
    println!("Serving quiz on ws://{} (Ctrl-C to stop)", addr);

    tokio::select! {
        _ = accept_loop(listener, host) => {}
        _ = tokio::signal::ctrl_c() => info!("shutting down"),
    }

    Ok(())
}

async fn accept_loop(listener: TcpListener, host: SharedHost) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                tokio::spawn(handle_connection(stream, peer, Arc::clone(&host)));
            }
            Err(e) => error!(error = %e, "failed to accept connection"),
        }
    }
}

/// Handle a single WebSocket connection.
async fn handle_connection(stream: TcpStream, peer: SocketAddr, host: SharedHost) {
    let client = Uuid::new_v4();
    if let Err(e) = serve_client(stream, peer, client, &host).await {
        warn!(%peer, error = %e, "connection ended with error");
    }
    host.lock().await.detach(client);
    info!(%peer, "client disconnected");
}

async fn serve_client(
    stream: TcpStream,
    peer: SocketAddr,
    client: Uuid,
    host: &SharedHost,
) -> Result<(), QuizError> {
    let ws_stream = tokio_tungstenite::accept_async(stream).await?;
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    let greeting = {
        let mut host = host.lock().await;
        if host.attach(client) {
            ServerMessage::ConnectionAck {
                total_questions: host.total_questions(),
                fallback: host.fallback().map(str::to_string),
            }
        } else {
            ServerMessage::Busy
        }
    };

    let busy = greeting == ServerMessage::Busy;
    send(&mut ws_sender, &greeting).await?;
    if busy {
        info!(%peer, "rejected second client");
        ws_sender.close().await?;
        return Ok(());
    }
    info!(%peer, %client, "client attached");

    while let Some(msg) = ws_receiver.next().await {
        let text = match msg? {
            Message::Text(text) => text.to_string(),
            Message::Close(_) => break,
            _ => continue,
        };

        let command: ClientMessage = match serde_json::from_str(&text) {
            Ok(command) => command,
            Err(e) => {
                warn!(%peer, error = %e, "ignoring unreadable message");
                continue;
            }
        };

        // The lock is held for the whole command so transitions never interleave.
        let reply = host.lock().await.handle(command);
        send(&mut ws_sender, &reply).await?;
    }

    Ok(())
}

async fn send<S>(sink: &mut S, msg: &ServerMessage) -> Result<(), QuizError>
where
    S: Sink<Message> + Unpin,
    QuizError: From<S::Error>,
{
    let json = serde_json::to_string(msg)?;
    sink.send(Message::Text(json.into())).await?;
    Ok(())
}
