//! Keyboard input as raw bytes.
//!
//! Arrow keys arrive as the ANSI sequences `ESC [ A` to `ESC [ D`:
//!
//! | key   | bytes     |
//! |-------|-----------|
//! | up    | `ESC [ A` |
//! | down  | `ESC [ B` |
//! | right | `ESC [ C` |
//! | left  | `ESC [ D` |
//!
//! At most three bytes are consumed per tick. A sequence split across two
//! reads is dropped.

use std::io::Read;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use anyhow::{Context, Result};
use tracing::debug;

use crate::snake::Direction;

const ESC: u8 = 0x1b;
const CTRL_C: u8 = 0x03;
pub const CHUNK_LEN: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    NewGame,
    Quit,
}

pub fn decode(bytes: &[u8]) -> Option<Command> {
    match bytes {
        [ESC, b'[', b'A'] => Some(Command::Turn(Direction::Up)),
        [ESC, b'[', b'B'] => Some(Command::Turn(Direction::Down)),
        [ESC, b'[', b'C'] => Some(Command::Turn(Direction::Right)),
        [ESC, b'[', b'D'] => Some(Command::Turn(Direction::Left)),
        [b'q' | b'Q'] | [CTRL_C] => Some(Command::Quit),
        [b'n' | b'N'] => Some(Command::NewGame),
        _ => None,
    }
}

pub trait InputSource {
    /// Returns immediately with the command decoded from whatever arrived
    /// since the previous call, if any.
    fn poll(&mut self) -> Result<Option<Command>>;
}

/// Byte chunks fed by a reader thread. The thread only blocks on the reader;
/// nothing but the channel is shared with the game loop.
pub struct ByteInput {
    chunks: Receiver<std::io::Result<Vec<u8>>>,
}

impl ByteInput {
    pub fn stdin() -> Self {
        Self::spawn(std::io::stdin())
    }

    pub fn spawn<R: Read + Send + 'static>(mut reader: R) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let mut buf = [0u8; CHUNK_LEN];
            loop {
                let msg = match reader.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => Ok(buf[..n].to_vec()),
                    Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(err) => Err(err),
                };
                let failed = msg.is_err();
                if tx.send(msg).is_err() || failed {
                    break;
                }
            }
        });

        Self::from_receiver(rx)
    }

    pub fn from_receiver(chunks: Receiver<std::io::Result<Vec<u8>>>) -> Self {
        ByteInput { chunks }
    }
}

impl InputSource for ByteInput {
    fn poll(&mut self) -> Result<Option<Command>> {
        match self.chunks.try_recv() {
            Ok(chunk) => {
                let chunk = chunk.context("Error reading input")?;
                let cmd = decode(&chunk);
                if cmd.is_none() {
                    debug!(bytes = ?chunk, "ignored input");
                }
                Ok(cmd)
            }
            Err(TryRecvError::Empty) => Ok(None),
            // Input is gone for good, nothing left to play with.
            Err(TryRecvError::Disconnected) => Ok(Some(Command::Quit)),
        }
    }
}
