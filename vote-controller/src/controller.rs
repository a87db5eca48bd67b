//! VoteController - vote dialog and submission state machine.
//!
//! One controller serves one content item. The dialog and slider changes are
//! synchronous local state; confirming spawns the transport call and returns
//! immediately. Completions reconcile the vote list through the
//! [`crate::ports::VoteListSink`] only after the ledger accepted the vote,
//! and only while the controller is still alive.

use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use reward_estimator::{
    AccountSnapshot, ActiveVote, ContentKey, ContentSnapshot, EconomicSnapshot, RewardEstimator,
    VotingPower,
};

use crate::config::{ControllerConfig, SubmissionPolicy};
use crate::dialog::VoteDialog;
use crate::error::{ControllerError, Result};
use crate::inflight::{InFlightGuard, InFlightKey, InFlightRegistry};
use crate::liveness::{Liveness, LivenessToken};
use crate::ports::Collaborators;
use crate::preferences::{VoteDirection, VotePreferences};
use crate::transport::{VoteReceipt, VoteTransport};
use crate::votes::{is_voted, merge_vote, vote_weight, VoteStatus};

/// Observable controller state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VoteState {
    /// Nothing open, nothing in flight
    Idle,
    /// Dialog open with the active slider at `percent`
    DialogOpen { percent: f64 },
    /// A vote of `percent` awaits the ledger
    Submitting { percent: f64 },
}

/// Result of a dialog open/toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    Closed,
    /// No active account; the login flow was started instead
    LoginRequired,
}

/// Estimated value for a slider position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoteEstimate {
    /// Percent actually in effect (after clamping)
    pub percent: f64,
    /// Estimated currency value
    pub value: f64,
}

/// Vote button badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonStatus {
    /// A vote from this controller awaits the ledger
    pub in_progress: bool,
    /// Direction of the active user's recorded vote
    pub voted: Option<VoteDirection>,
}

/// How a submission ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Ledger accepted; `votes` was proposed to the sink
    Applied {
        receipt: VoteReceipt,
        votes: Vec<ActiveVote>,
    },
    /// Ledger or network refused; `message` was shown to the user
    Failed { message: String },
    /// Completed after disposal; nothing was applied
    Stale,
}

/// Handle to a spawned submission.
///
/// Dropping the handle does not cancel the submission.
#[derive(Debug)]
pub struct SubmissionHandle {
    submission_id: Uuid,
    weight: i32,
    task: JoinHandle<SubmissionOutcome>,
}

impl SubmissionHandle {
    pub fn submission_id(&self) -> Uuid {
        self.submission_id
    }

    /// Weight sent to the transport.
    pub fn weight(&self) -> i32 {
        self.weight
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the submission to finish.
    pub async fn outcome(self) -> Result<SubmissionOutcome> {
        Ok(self.task.await?)
    }
}

#[derive(Debug)]
struct PendingVote {
    submission_id: Uuid,
    percent: f64,
}

#[derive(Debug)]
struct ControllerState {
    account: Option<AccountSnapshot>,
    content: ContentSnapshot,
    economics: EconomicSnapshot,
    dialog: Option<VoteDialog>,
    pending: Vec<PendingVote>,
}

#[derive(Debug)]
struct VoteRequest {
    submission_id: Uuid,
    voter: String,
    author: String,
    permalink: String,
    weight: i32,
}

impl VoteRequest {
    fn in_flight_key(&self) -> InFlightKey {
        InFlightKey::new(&self.voter, &self.author, &self.permalink)
    }
}

/// State reachable from spawned completions.
struct Shared {
    content_key: ContentKey,
    transport: Arc<dyn VoteTransport>,
    collaborators: Collaborators,
    state: RwLock<ControllerState>,
    liveness: Liveness,
}

impl Shared {
    async fn complete(
        &self,
        request: VoteRequest,
        token: LivenessToken,
        _claim: Option<InFlightGuard>,
    ) -> SubmissionOutcome {
        let result = self
            .transport
            .submit_vote(&request.voter, &request.author, &request.permalink, request.weight)
            .await;

        // Checked under the lock: dispose may land while waiting for it.
        let mut state = self.state.write().await;
        if !self.liveness.is_current(&token) {
            debug!(
                submission_id = %request.submission_id,
                content = %self.content_key,
                "Dropping vote completion for disposed controller"
            );
            return SubmissionOutcome::Stale;
        }

        state
            .pending
            .retain(|p| p.submission_id != request.submission_id);

        // Collaborators are called without the lock held; they may call back
        // into the controller.
        match result {
            Ok(receipt) => {
                let votes = merge_vote(&state.content.active_votes, &request.voter, request.weight);
                drop(state);

                self.collaborators.sink.after_vote(&self.content_key, votes.clone());
                self.collaborators.refresher.refresh_account(&request.voter);

                info!(
                    submission_id = %request.submission_id,
                    voter = %request.voter,
                    content = %self.content_key,
                    weight = request.weight,
                    transaction_id = %receipt.transaction_id,
                    "Vote applied"
                );
                SubmissionOutcome::Applied { receipt, votes }
            }
            Err(err) => {
                drop(state);

                warn!(
                    submission_id = %request.submission_id,
                    voter = %request.voter,
                    content = %self.content_key,
                    error = %err,
                    "Vote submission failed"
                );
                let message = self.collaborators.formatter.format_error(&err);
                self.collaborators.notifier.notify_error(&message);
                SubmissionOutcome::Failed { message }
            }
        }
    }
}

/// Vote dialog and submission controller for one content item.
///
/// Dropping the controller disposes it.
pub struct VoteController {
    config: ControllerConfig,
    estimator: RewardEstimator,
    preferences: VotePreferences,
    in_flight: Arc<InFlightRegistry>,
    shared: Arc<Shared>,
}

impl VoteController {
    /// Create a controller for `content` with default configuration.
    pub fn new(
        content: ContentSnapshot,
        transport: Arc<dyn VoteTransport>,
        collaborators: Collaborators,
    ) -> Self {
        let config = ControllerConfig::default();
        let estimator = RewardEstimator::new(config.curve, Arc::new(config.power));
        let preferences = VotePreferences::new(Arc::clone(&collaborators.preferences));

        Self {
            config,
            estimator,
            preferences,
            in_flight: InFlightRegistry::new(),
            shared: Arc::new(Shared {
                content_key: content.key(),
                transport,
                collaborators,
                state: RwLock::new(ControllerState {
                    account: None,
                    content,
                    economics: EconomicSnapshot::default(),
                    dialog: None,
                    pending: Vec::new(),
                }),
                liveness: Liveness::new(),
            }),
        }
    }

    /// Apply configuration. Resets the voting power source to the
    /// configured regeneration; call [`Self::with_voting_power`] afterwards
    /// to override it.
    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.estimator = RewardEstimator::new(config.curve, Arc::new(config.power));
        self.config = config;
        self
    }

    /// Use an external voting power source.
    pub fn with_voting_power(mut self, power: Arc<dyn VotingPower>) -> Self {
        self.estimator = self.estimator.clone().with_voting_power(power);
        self
    }

    /// Share an in-flight registry with other controllers.
    pub fn with_in_flight_registry(mut self, registry: Arc<InFlightRegistry>) -> Self {
        self.in_flight = registry;
        self
    }

    pub fn content_key(&self) -> &ContentKey {
        &self.shared.content_key
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Replace the active account (`None` when logged out).
    ///
    /// Switching to a different user closes the dialog.
    pub async fn set_account(&self, account: Option<AccountSnapshot>) {
        let mut state = self.shared.state.write().await;
        let same_user = matches!(
            (&state.account, &account),
            (Some(current), Some(next)) if current.name == next.name
        );
        if !same_user {
            state.dialog = None;
        }
        state.account = account;
    }

    /// Replace the content snapshot; it must be the same item.
    pub async fn set_content(&self, content: ContentSnapshot) -> Result<()> {
        let key = content.key();
        if key != self.shared.content_key {
            return Err(ControllerError::ContentMismatch {
                expected: self.shared.content_key.clone(),
                actual: key,
            });
        }
        self.shared.state.write().await.content = content;
        Ok(())
    }

    /// Replace the global economic snapshot.
    pub async fn set_economics(&self, economics: EconomicSnapshot) {
        self.shared.state.write().await.economics = economics;
    }

    /// Current state.
    pub async fn state(&self) -> VoteState {
        let state = self.shared.state.read().await;
        if let Some(pending) = state.pending.last() {
            VoteState::Submitting {
                percent: pending.percent,
            }
        } else if let Some(dialog) = &state.dialog {
            VoteState::DialogOpen {
                percent: dialog.selected_percent(),
            }
        } else {
            VoteState::Idle
        }
    }

    pub async fn is_dialog_open(&self) -> bool {
        self.shared.state.read().await.dialog.is_some()
    }

    /// Snapshot of the open dialog.
    pub async fn dialog(&self) -> Option<VoteDialog> {
        self.shared.state.read().await.dialog.clone()
    }

    /// Open the vote dialog, or start the login flow without an account.
    pub async fn open_dialog(&self) -> Result<OpenOutcome> {
        self.ensure_live()?;

        let mut state = self.shared.state.write().await;
        let Some(username) = state.account.as_ref().map(|a| a.name.clone()) else {
            drop(state);
            debug!(content = %self.shared.content_key, "Login required to vote");
            self.shared.collaborators.login.require_login();
            return Ok(OpenOutcome::LoginRequired);
        };

        if state.dialog.is_none() {
            state.dialog = Some(VoteDialog::load(
                &self.preferences,
                &username,
                &self.config.dialog,
            ));
        }
        Ok(OpenOutcome::Opened)
    }

    /// Close the dialog without voting.
    pub async fn close_dialog(&self) {
        self.shared.state.write().await.dialog = None;
    }

    /// Close the dialog if open, otherwise open it.
    pub async fn toggle_dialog(&self) -> Result<OpenOutcome> {
        {
            let mut state = self.shared.state.write().await;
            if state.dialog.take().is_some() {
                return Ok(OpenOutcome::Closed);
            }
        }
        self.open_dialog().await
    }

    /// Move the active slider and re-estimate.
    ///
    /// The clamped value is remembered for the active user and direction.
    /// Nothing changes if the estimate cannot be computed.
    pub async fn set_percent(&self, percent: f64) -> Result<VoteEstimate> {
        self.ensure_live()?;

        let mut state = self.shared.state.write().await;
        let mut dialog = state.dialog.clone().ok_or(ControllerError::DialogNotOpen)?;
        let value = dialog.set_value(percent)?;
        let estimate = self.estimate_with(&state, value)?;

        if let Some(account) = &state.account {
            self.preferences.set_vote_value(dialog.mode(), &account.name, value);
        }
        state.dialog = Some(dialog);

        debug!(percent = value, estimate = estimate.value, "Estimate recomputed");
        Ok(estimate)
    }

    /// Switch between the up and down slider and re-estimate.
    pub async fn change_mode(&self, mode: VoteDirection) -> Result<VoteEstimate> {
        self.ensure_live()?;

        let mut state = self.shared.state.write().await;
        let mut dialog = state.dialog.clone().ok_or(ControllerError::DialogNotOpen)?;
        dialog.change_mode(mode);
        let estimate = self.estimate_with(&state, dialog.selected_percent())?;

        state.dialog = Some(dialog);
        Ok(estimate)
    }

    /// Estimate for the dialog's active slider.
    pub async fn estimate(&self) -> Result<VoteEstimate> {
        let state = self.shared.state.read().await;
        let percent = state
            .dialog
            .as_ref()
            .map(VoteDialog::selected_percent)
            .ok_or(ControllerError::DialogNotOpen)?;
        self.estimate_with(&state, percent)
    }

    /// Estimate for an arbitrary percent, dialog or not.
    pub async fn estimate_percent(&self, percent: f64) -> Result<VoteEstimate> {
        let state = self.shared.state.read().await;
        self.estimate_with(&state, percent)
    }

    /// The active user's vote on this item.
    pub async fn vote_status(&self) -> VoteStatus {
        let state = self.shared.state.read().await;
        is_voted(
            &state.content.active_votes,
            state.account.as_ref().map(|a| a.name.as_str()),
        )
    }

    /// Badge state for the vote button.
    pub async fn status(&self) -> ButtonStatus {
        let in_progress = !self.shared.state.read().await.pending.is_empty();
        let voted = match self.vote_status().await {
            VoteStatus { up_voted: true, .. } => Some(VoteDirection::Up),
            VoteStatus { down_voted: true, .. } => Some(VoteDirection::Down),
            _ => None,
        };
        ButtonStatus { in_progress, voted }
    }

    /// Submit the active slider's value.
    ///
    /// The dialog closes before the ledger answers. The returned handle can
    /// be awaited or dropped; either way the completion is applied (or
    /// dropped, after disposal) in the background.
    pub async fn confirm(&self) -> Result<SubmissionHandle> {
        self.ensure_live()?;

        let mut state = self.shared.state.write().await;
        let percent = state
            .dialog
            .as_ref()
            .map(VoteDialog::selected_percent)
            .ok_or(ControllerError::DialogNotOpen)?;
        let voter = state
            .account
            .as_ref()
            .map(|a| a.name.clone())
            .ok_or(ControllerError::NotAuthenticated)?;

        let request = VoteRequest {
            submission_id: Uuid::new_v4(),
            voter,
            author: self.shared.content_key.author.clone(),
            permalink: self.shared.content_key.permalink.clone(),
            weight: vote_weight(percent),
        };

        let claim = match self.config.submission_policy {
            SubmissionPolicy::AllowConcurrent => None,
            SubmissionPolicy::RejectWhileInFlight => {
                match self.in_flight.try_acquire(request.in_flight_key(), request.submission_id) {
                    Ok(claim) => Some(claim),
                    Err(err) => {
                        warn!(
                            voter = %request.voter,
                            content = %self.shared.content_key,
                            "Vote already in flight, rejecting"
                        );
                        return Err(err);
                    }
                }
            }
        };

        state.dialog = None;
        state.pending.push(PendingVote {
            submission_id: request.submission_id,
            percent,
        });
        drop(state);

        info!(
            submission_id = %request.submission_id,
            voter = %request.voter,
            content = %self.shared.content_key,
            weight = request.weight,
            direction = %VoteDirection::of_percent(percent),
            "Submitting vote"
        );

        let submission_id = request.submission_id;
        let weight = request.weight;
        let token = self.shared.liveness.token();
        let shared = Arc::clone(&self.shared);
        let task = tokio::spawn(async move { shared.complete(request, token, claim).await });

        Ok(SubmissionHandle {
            submission_id,
            weight,
            task,
        })
    }

    /// Detach from the owning UI. In-flight completions will be dropped.
    pub fn dispose(&self) {
        if !self.shared.liveness.is_disposed() {
            debug!(content = %self.shared.content_key, "Disposing vote controller");
        }
        self.shared.liveness.dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.liveness.is_disposed()
    }

    fn ensure_live(&self) -> Result<()> {
        if self.shared.liveness.is_disposed() {
            return Err(ControllerError::Disposed);
        }
        Ok(())
    }

    fn estimate_with(&self, state: &ControllerState, percent: f64) -> Result<VoteEstimate> {
        let value = self.estimator.estimate(
            state.account.as_ref(),
            &state.content,
            &state.economics,
            percent,
        )?;
        Ok(VoteEstimate { percent, value })
    }
}

impl Drop for VoteController {
    fn drop(&mut self) {
        self.shared.liveness.dispose();
    }
}
