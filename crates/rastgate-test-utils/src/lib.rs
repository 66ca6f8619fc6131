//! Test utilities and scripted terminals for rastgate development.
//!
//! Provides a [`ScriptedTerminal`] standing in for `/dev/tty`, channel
//! source helpers accepted wherever a
//! `ChannelSource` is expected (any `FnMut() -> io::Result<S>` qualifies),
//! and input fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::RefCell;
use std::io::{self, Cursor, Read, Write};
use std::rc::Rc;

use rastgate_arena::Arena;

/// In-memory terminal: reads come from a fixed script, writes are captured.
///
/// Clones share the same transcript, so a test can hand one clone to the
/// code under test and inspect the prompts through another.
#[derive(Clone)]
pub struct ScriptedTerminal {
    input: Cursor<Vec<u8>>,
    transcript: Rc<RefCell<Vec<u8>>>,
}

impl ScriptedTerminal {
    /// A terminal that will answer reads with `input`.
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        Self {
            input: Cursor::new(input.into()),
            transcript: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// A terminal answering two prompts with `user` and `password`, each
    /// followed by `\n`.
    pub fn answering(user: &str, password: &str) -> Self {
        Self::new(format!("{user}\n{password}\n"))
    }

    /// Everything written to the terminal so far.
    pub fn transcript(&self) -> String {
        String::from_utf8_lossy(&self.transcript.borrow()).into_owned()
    }

    /// A channel source opening a fresh clone of this terminal.
    pub fn source(&self) -> impl FnMut() -> io::Result<ScriptedTerminal> {
        let terminal = self.clone();
        move || Ok(terminal.clone())
    }
}

impl Read for ScriptedTerminal {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for ScriptedTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.transcript.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A channel source that always fails to open, like a process without a
/// controlling terminal.
pub fn no_terminal() -> impl FnMut() -> io::Result<ScriptedTerminal> {
    || {
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            "no controlling terminal",
        ))
    }
}

/// An arena with exactly `remaining` bytes free after a filler allocation.
///
/// `remaining` must be at least 1: allocation needs strict headroom, so the
/// bump pointer never reaches the end of the region.
pub fn arena_with_remaining(capacity: usize, remaining: usize) -> Arena {
    assert!(
        (1..=capacity).contains(&remaining),
        "remaining must be in 1..=capacity"
    );
    let mut arena = Arena::with_capacity(capacity);
    arena
        .allocate(capacity - remaining)
        .expect("filler leaves headroom");
    arena
}
