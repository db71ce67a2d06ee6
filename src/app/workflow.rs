//! Generation-and-mint state machine.
//!
//! `Disconnected -> Idle -> Generating -> Previewing -> Minting -> Minted`, with
//! `Failed` reachable from `Generating` and `Minting`. Every mutation of the
//! current request, artifact and transaction id goes through this type.

use std::fmt;
use tracing::{debug, info, warn};

use crate::error::{MintError, MintResult};
use crate::generation::{GeneratedArtifact, GenerationRequest};
use crate::hedera::TransactionId;
use crate::storage::ContentId;

/// Which external call an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Generation,
    Mint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Disconnected,
    Idle,
    Generating,
    Previewing,
    Minting,
    Minted,
    Failed(Stage),
}

impl Phase {
    fn describe(self) -> &'static str {
        match self {
            Phase::Disconnected => "disconnected",
            Phase::Idle => "idle",
            Phase::Generating => "generating",
            Phase::Previewing => "previewing",
            Phase::Minting => "minting",
            Phase::Minted => "minted",
            Phase::Failed(Stage::Generation) => "generation failed",
            Phase::Failed(Stage::Mint) => "mint failed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Identifies one outstanding external call. Completions carrying any other
/// token are stale and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

#[derive(Debug)]
pub struct Workflow {
    phase: Phase,
    next_token: u64,
    pending: Option<RequestToken>,
    request: Option<GenerationRequest>,
    artifact: Option<GeneratedArtifact>,
    transaction_id: Option<TransactionId>,
    last_error: Option<String>,
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new()
    }
}

impl Workflow {
    pub fn new() -> Self {
        Self {
            phase: Phase::Disconnected,
            next_token: 0,
            pending: None,
            request: None,
            artifact: None,
            transaction_id: None,
            last_error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn request(&self) -> Option<&GenerationRequest> {
        self.request.as_ref()
    }

    pub fn artifact(&self) -> Option<&GeneratedArtifact> {
        self.artifact.as_ref()
    }

    pub fn transaction_id(&self) -> Option<&TransactionId> {
        self.transaction_id.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[cfg(test)]
    pub fn pending(&self) -> Option<RequestToken> {
        self.pending
    }

    /// A generation or mint call is outstanding.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Generating | Phase::Minting)
    }

    /// Pairing succeeded. Already connected states are left alone.
    pub fn connect(&mut self) {
        if self.phase == Phase::Disconnected {
            self.transition(Phase::Idle);
        }
    }

    /// Drop everything, including any outstanding call.
    pub fn disconnect(&mut self) {
        self.clear();
        self.transition(Phase::Disconnected);
    }

    pub fn begin_generation(&mut self, request: GenerationRequest) -> MintResult<RequestToken> {
        match self.phase {
            Phase::Idle | Phase::Failed(Stage::Generation) => {}
            Phase::Disconnected => return Err(MintError::NotConnected),
            Phase::Generating => return Err(MintError::Busy),
            Phase::Minting => return Err(MintError::Busy),
            Phase::Previewing | Phase::Minted | Phase::Failed(Stage::Mint) => {
                return Err(MintError::ArtifactPending)
            }
        }

        let token = self.issue_token();
        self.request = Some(request);
        self.last_error = None;
        self.transition(Phase::Generating);
        Ok(token)
    }

    /// Apply a generation result. Returns `false` when the result was stale
    /// and discarded.
    pub fn complete_generation(
        &mut self,
        token: RequestToken,
        result: MintResult<GeneratedArtifact>,
    ) -> bool {
        if !self.accepts(token, Phase::Generating) {
            debug!(?token, phase = %self.phase, "discarding stale generation result");
            return false;
        }

        self.pending = None;
        self.request = None;
        match result {
            Ok(artifact) => {
                self.artifact = Some(artifact);
                self.transition(Phase::Previewing);
            }
            Err(e) => {
                warn!(error = %e, "generation failed");
                self.last_error = Some(e.to_string());
                self.transition(Phase::Failed(Stage::Generation));
            }
        }
        true
    }

    pub fn begin_mint(&mut self) -> MintResult<RequestToken> {
        match self.phase {
            Phase::Previewing | Phase::Failed(Stage::Mint) => {}
            Phase::Disconnected => return Err(MintError::NotConnected),
            Phase::Generating | Phase::Minting => return Err(MintError::Busy),
            other => return Err(MintError::InvalidState(other.describe())),
        }
        if self.artifact.is_none() {
            return Err(MintError::InvalidState("no artwork is loaded"));
        }

        let token = self.issue_token();
        self.last_error = None;
        self.transition(Phase::Minting);
        Ok(token)
    }

    /// Remember where the current artwork was uploaded during a mint attempt.
    pub fn record_content(&mut self, token: RequestToken, content_id: ContentId, gateway: &str) -> bool {
        if !self.accepts(token, Phase::Minting) {
            return false;
        }
        match self.artifact.as_mut() {
            Some(artifact) => {
                artifact.attach_content(content_id, gateway);
                true
            }
            None => false,
        }
    }

    pub fn complete_mint(&mut self, token: RequestToken, result: MintResult<TransactionId>) -> bool {
        if !self.accepts(token, Phase::Minting) {
            debug!(?token, phase = %self.phase, "discarding stale mint result");
            return false;
        }

        self.pending = None;
        match result {
            Ok(transaction_id) => {
                info!(%transaction_id, "mint accepted");
                self.transaction_id = Some(transaction_id);
                self.transition(Phase::Minted);
            }
            Err(e) => {
                warn!(error = %e, "mint failed");
                self.last_error = Some(e.to_string());
                self.transition(Phase::Failed(Stage::Mint));
            }
        }
        true
    }

    /// Return to `Idle`, discarding the artwork and any transaction id.
    ///
    /// An outstanding generation is abandoned and its late result ignored.
    /// Cancelling while a mint is in flight is refused.
    pub fn cancel(&mut self) -> MintResult<()> {
        match self.phase {
            Phase::Minting => Err(MintError::InvalidState("a mint is in flight")),
            Phase::Disconnected => Ok(()),
            _ => {
                self.clear();
                self.transition(Phase::Idle);
                Ok(())
            }
        }
    }

    /// Close the error alert. A failed mint keeps its artwork for another try.
    pub fn dismiss_error(&mut self) {
        self.last_error = None;
        match self.phase {
            Phase::Failed(Stage::Generation) => self.transition(Phase::Idle),
            Phase::Failed(Stage::Mint) => self.transition(Phase::Previewing),
            _ => {}
        }
    }

    fn accepts(&self, token: RequestToken, phase: Phase) -> bool {
        self.phase == phase && self.pending == Some(token)
    }

    fn issue_token(&mut self) -> RequestToken {
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.pending = Some(token);
        token
    }

    fn clear(&mut self) {
        self.pending = None;
        self.request = None;
        self.artifact = None;
        self.transaction_id = None;
        self.last_error = None;
    }

    fn transition(&mut self, next: Phase) {
        if self.phase != next {
            debug!(from = %self.phase, to = %next, "workflow transition");
        }
        self.phase = next;
    }
}
