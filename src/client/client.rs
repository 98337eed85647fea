//! WebSocket client implementation.

use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info};

use crate::error::QuizError;
use crate::protocol::ServerMessage;

use super::commands::{parse_command, LineCommand, HELP};
use super::render::format_message;

/// Connect to a quiz server and drive its session from stdin.
pub async fn run(host: String, port: u16) -> Result<(), QuizError> {
    let url = format!("ws://{}:{}", host, port);
    println!("Connecting to {}...", url);
    play(&url, BufReader::new(tokio::io::stdin())).await
}

/// Send commands read from `input` until it ends, the user quits or the
/// server closes the connection.
async fn play<R>(url: &str, input: R) -> Result<(), QuizError>
where
    R: AsyncBufRead + Unpin,
{
    let (ws_stream, _) = tokio_tungstenite::connect_async(url).await?;
    info!(%url, "connected");
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    // Print everything the server says as it arrives.
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_receiver.next().await {
            let text = match msg {
                Ok(Message::Text(text)) => text.to_string(),
                Ok(Message::Close(_)) => {
                    println!("Connection closed by server");
                    break;
                }
                Err(e) => {
                    println!("Connection error: {}", e);
                    break;
                }
                _ => continue,
            };

            match serde_json::from_str::<ServerMessage>(&text) {
                Ok(server_msg) => println!("{}\n", format_message(&server_msg)),
                Err(e) => debug!(error = %e, "ignoring unreadable message"),
            }
        }
    });

    let mut lines = input.lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => line,
                None => break,
            },
            // The server went away; stop waiting for input.
            _ = &mut recv_task => return Ok(()),
        };

        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(LineCommand::Help)) => println!("{}\n", HELP),
            Ok(Some(LineCommand::Quit)) => break,
            Ok(Some(LineCommand::Send(msg))) => {
                let json = serde_json::to_string(&msg)?;
                ws_sender.send(Message::Text(json.into())).await?;
            }
            Err(message) => println!("{}\n", message),
        }
    }

    let _ = ws_sender.close().await;
    recv_task.abort();
    Ok(())
}
