//! チャットセッションの状態機械
//!
//! 1 接続のライフサイクル（handshake → active → closed）を明示的な
//! 状態遷移として表現します。WebSocket のコールバック順序に暗黙的に
//! 依存するのではなく、「何が何より先に起きるか」を型で固定します。

use thiserror::Error;

/// Consecutive malformed frames tolerated before the connection is dropped
pub const MAX_MALFORMED_FRAMES: u32 = 5;

/// Liveness state of one connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Transport is open, join handshake not yet completed
    Connecting,
    /// Registered; the only state in which inbound messages are accepted
    Active,
    /// Teardown has begun; inbound messages are dropped
    Closing,
    /// Fully torn down
    Closed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("invalid transition: session is {0:?}, expected Connecting")]
    AlreadyActivated(SessionState),
}

/// What to do with the connection after a malformed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameVerdict {
    /// Discard the frame, keep the session open
    KeepOpen,
    /// Too many malformed frames; disconnect
    Disconnect,
}

/// State machine for a single connection's lifecycle
///
/// `Connecting -> Active -> Closing -> Closed`
///
/// close 系の遷移は冪等：read エラー経路と明示的な close 経路の両方から
/// 呼ばれても二重の副作用は発生しない。
#[derive(Debug)]
pub struct ChatSession {
    state: SessionState,
    malformed_frames: u32,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Connecting,
            malformed_frames: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// `Connecting -> Active`, on successful registration
    pub fn activate(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Connecting => {
                self.state = SessionState::Active;
                Ok(())
            }
            other => Err(SessionError::AlreadyActivated(other)),
        }
    }

    /// Whether inbound content frames are processed in the current state
    pub fn accepts_inbound(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Begin teardown; no-op if teardown has already begun
    pub fn begin_close(&mut self) {
        if matches!(self.state, SessionState::Connecting | SessionState::Active) {
            self.state = SessionState::Closing;
        }
    }

    /// Complete teardown; idempotent
    pub fn finish_close(&mut self) {
        self.state = SessionState::Closed;
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// Record one unparseable inbound frame
    ///
    /// A single bad frame never kills the session; repeated ones do.
    pub fn record_malformed_frame(&mut self) -> FrameVerdict {
        self.malformed_frames += 1;
        if self.malformed_frames >= MAX_MALFORMED_FRAMES {
            FrameVerdict::Disconnect
        } else {
            FrameVerdict::KeepOpen
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
