//! Serialized world task and the line-oriented front ends that feed it.
//!
//! One tokio task owns the [`World`] and applies commands strictly one at a
//! time, in arrival order. Front ends (the console, each TCP connection)
//! hold a cloned [`WorldHandle`] and send each line over a bounded channel
//! together with a oneshot sender for the reply.

use std::net::SocketAddr;

use delve_engine::{World, handle_command};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::ServerError;

/// Reply to `exit` before the session closes.
pub const FAREWELL: &str = "Thank you for playing!";

/// Longest accepted command line in bytes, newline included.
pub const MAX_LINE_LEN: usize = 4 * 1024;

/// One framed read from a session's input.
#[derive(Debug, PartialEq, Eq)]
enum Frame {
    /// A complete command line, trimmed.
    Line(String),
    /// A line that was dropped; the session carries on.
    Skipped,
    /// End of input.
    Eof,
}

/// One command waiting for the world task.
#[derive(Debug)]
struct CommandRequest {
    line: String,
    reply: oneshot::Sender<String>,
}

/// Cloneable sender side of the world task.
#[derive(Debug, Clone)]
pub struct WorldHandle {
    requests: mpsc::Sender<CommandRequest>,
}

impl WorldHandle {
    /// Move the world into its own task and return a handle to it.
    ///
    /// The task ends, handing the world back through the [`JoinHandle`],
    /// once every handle has been dropped.
    pub fn spawn(world: World, queue_depth: usize) -> (Self, JoinHandle<World>) {
        let (requests, inbox) = mpsc::channel(queue_depth.max(1));
        let task = tokio::spawn(run_world(world, inbox));
        (Self { requests }, task)
    }

    /// Send one command line and wait for its reply.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::WorldTaskClosed`] if the world task has
    /// stopped.
    pub async fn submit(&self, line: &str) -> Result<String, ServerError> {
        let (reply, response) = oneshot::channel();
        let request = CommandRequest {
            line: line.to_owned(),
            reply,
        };
        if self.requests.send(request).await.is_err() {
            return Err(ServerError::WorldTaskClosed);
        }
        response.await.ok().ok_or(ServerError::WorldTaskClosed)
    }
}

async fn run_world(mut world: World, mut inbox: mpsc::Receiver<CommandRequest>) -> World {
    while let Some(request) = inbox.recv().await {
        let reply = handle_command(&mut world, &request.line);
        if request.reply.send(reply).is_err() {
            debug!(command = %request.line, "Requester left before the reply");
        }
    }
    info!(players = world.players.len(), "World task stopped");
    world
}

/// Pump command lines from `reader` through the world task into `writer`.
///
/// Blank lines are skipped, as are lines longer than [`MAX_LINE_LEN`] or
/// not valid UTF-8. Each reply is followed by `separator`. `exit` (any
/// case) writes [`FAREWELL`] and ends the session; so does end of input.
///
/// # Errors
///
/// Returns [`ServerError::Io`] on read/write failure or
/// [`ServerError::WorldTaskClosed`] if the world task is gone.
pub async fn serve_lines<R, W>(
    handle: &WorldHandle,
    mut reader: R,
    writer: &mut W,
    separator: &str,
) -> Result<(), ServerError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::with_capacity(256);
    loop {
        let line = match read_frame(&mut reader, &mut buf).await? {
            Frame::Line(line) => line,
            Frame::Skipped => continue,
            Frame::Eof => break,
        };
        let command = line.as_str();
        if command.is_empty() {
            continue;
        }
        if command.eq_ignore_ascii_case("exit") {
            writer.write_all(FAREWELL.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            break;
        }
        let reply = handle.submit(command).await?;
        writer.write_all(reply.as_bytes()).await?;
        writer.write_all(separator.as_bytes()).await?;
        writer.flush().await?;
    }
    writer.flush().await?;
    Ok(())
}

/// Read one newline-terminated line of at most [`MAX_LINE_LEN`] bytes.
async fn read_frame<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Frame>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let limit = u64::try_from(MAX_LINE_LEN).unwrap_or(u64::MAX);
    let read = (&mut *reader).take(limit).read_until(b'\n', buf).await?;
    if read == 0 {
        return Ok(Frame::Eof);
    }
    if buf.last() != Some(&b'\n') && buf.len() >= MAX_LINE_LEN {
        discard_line(reader).await?;
        warn!(limit = MAX_LINE_LEN, "Skipping overlong command line");
        return Ok(Frame::Skipped);
    }
    match std::str::from_utf8(buf) {
        Ok(text) => Ok(Frame::Line(text.trim().to_owned())),
        Err(e) => {
            warn!(err = %e, "Skipping command line that is not valid UTF-8");
            Ok(Frame::Skipped)
        }
    }
}

/// Consume input up to and including the next newline.
async fn discard_line<R>(reader: &mut R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(());
        }
        if let Some(pos) = available.iter().position(|b| *b == b'\n') {
            reader.consume(pos.saturating_add(1));
            return Ok(());
        }
        let len = available.len();
        reader.consume(len);
    }
}

/// Run the console front end on standard input and output.
///
/// # Errors
///
/// As [`serve_lines`].
pub async fn run_stdin(handle: &WorldHandle) -> Result<(), ServerError> {
    info!("Reading commands from stdin");
    let mut stdout = tokio::io::stdout();
    serve_lines(handle, BufReader::new(tokio::io::stdin()), &mut stdout, "\n").await
}

/// Bind the TCP listener.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the address cannot be bound.
pub async fn bind(addr: &str) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr).await.map_err(|source| ServerError::Bind {
        addr: addr.to_owned(),
        source,
    })
}

/// Accept connections forever, serving each on its own task.
///
/// # Errors
///
/// Returns [`ServerError::Io`] if accepting fails.
pub async fn run_tcp(handle: WorldHandle, listener: TcpListener) -> Result<(), ServerError> {
    info!(addr = ?listener.local_addr().ok(), "Accepting TCP connections");
    loop {
        let (stream, peer) = listener.accept().await?;
        let handle = handle.clone();
        tokio::spawn(async move {
            if let Err(e) = serve_connection(&handle, stream, peer).await {
                warn!(peer = %peer, err = %e, "Connection ended with error");
            }
        });
    }
}

async fn serve_connection(handle: &WorldHandle, stream: TcpStream, peer: SocketAddr) -> anyhow::Result<()> {
    info!(peer = %peer, "Connection opened");
    let (rd, mut wr) = stream.into_split();
    serve_lines(handle, BufReader::new(rd), &mut wr, "\n\n").await?;
    info!(peer = %peer, "Connection closed");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn spawn_starting_world() -> (WorldHandle, JoinHandle<World>) {
        WorldHandle::spawn(World::starting().unwrap(), 8)
    }

    #[tokio::test]
    async fn submit_round_trips_through_the_task() {
        let (handle, task) = spawn_starting_world();
        let reply = handle.submit("wizard: health").await.ok();
        assert_eq!(reply.as_deref(), Some("Your current health is 3."));
        drop(handle);
        let world = task.await.ok();
        assert_eq!(world.map(|w| w.players.len()), Some(1));
    }

    #[tokio::test]
    async fn concurrent_clients_are_serialized() {
        let (handle, task) = spawn_starting_world();
        let mut clients = Vec::new();
        for name in ["a", "b", "c", "d"] {
            let handle = handle.clone();
            clients.push(tokio::spawn(async move {
                for command in ["get axe", "drop axe", "get coin", "drop coin", "look"] {
                    let _ = handle.submit(&format!("{name}: {command}")).await;
                }
            }));
        }
        for client in clients {
            assert!(client.await.is_ok());
        }
        drop(handle);
        let world = task.await.ok();
        assert_eq!(world.as_ref().map(|w| w.players.len()), Some(4));
        assert!(world.is_some_and(|w| w.ownership_census().values().all(|n| *n == 1)));
    }

    #[tokio::test]
    async fn console_session_until_exit() {
        let (handle, _task) = spawn_starting_world();
        let input: &[u8] = b"wizard: get potion\n\n  \nwizard: inv\nEXIT\nwizard: look\n";
        let mut output: Vec<u8> = Vec::new();
        assert!(serve_lines(&handle, input, &mut output, "\n").await.is_ok());
        let text = String::from_utf8_lossy(&output);
        assert_eq!(
            text,
            "You picked up the 'potion' and placed it in your inventory.\n\
             Here is what's currently in your inventory: potion\n\
             Thank you for playing!\n"
        );
    }

    #[tokio::test]
    async fn bad_lines_are_skipped_and_session_continues() {
        let (handle, _task) = spawn_starting_world();
        let mut input: Vec<u8> = b"wizard: get \xff\xfe axe\n".to_vec();
        input.extend(std::iter::repeat_n(b'a', MAX_LINE_LEN.saturating_mul(3)));
        input.extend_from_slice(b"\nwizard: health\r\nexit\n");
        let mut output: Vec<u8> = Vec::new();
        assert!(serve_lines(&handle, input.as_slice(), &mut output, "\n").await.is_ok());
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Your current health is 3.\nThank you for playing!\n"
        );
    }

    #[tokio::test]
    async fn frames_respect_the_length_cap() {
        let mut input: Vec<u8> = vec![b'x'; MAX_LINE_LEN.saturating_sub(1)];
        input.extend_from_slice(b"\nlast");
        let mut reader = input.as_slice();
        let mut buf = Vec::new();
        let first = read_frame(&mut reader, &mut buf).await.unwrap();
        assert_eq!(first, Frame::Line("x".repeat(MAX_LINE_LEN.saturating_sub(1))));
        let second = read_frame(&mut reader, &mut buf).await.unwrap();
        assert_eq!(second, Frame::Line(String::from("last")));
        assert_eq!(read_frame(&mut reader, &mut buf).await.unwrap(), Frame::Eof);
    }

    #[tokio::test]
    async fn closed_world_task_is_reported() {
        let (handle, task) = spawn_starting_world();
        task.abort();
        let _ = task.await;
        assert!(matches!(handle.submit("wizard: look").await, Err(ServerError::WorldTaskClosed)));
    }

    #[tokio::test]
    async fn tcp_connection_plays_and_exits() {
        let (handle, _task) = spawn_starting_world();
        let listener = bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(run_tcp(handle, listener));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        let script = b"wizard: goto forest\nwizard: get key\nexit\n";
        assert!(stream.write_all(script).await.is_ok());
        let mut received = String::new();
        assert!(stream.read_to_string(&mut received).await.is_ok());
        assert_eq!(
            received,
            "You have moved to the 'forest'.\n\n\
             You picked up the 'key' and placed it in your inventory.\n\n\
             Thank you for playing!\n"
        );
    }
}
