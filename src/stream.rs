//! The polling loop that approximates token streaming.
//!
//! The backend has no push channel: every `streaming_generate` call returns
//! the full answer built so far plus a completion flag. The accumulator
//! re-issues the request in a tight loop, forwarding each non-empty answer
//! to the caller's callback, until the backend reports completion or one of
//! the give-up conditions fires.

use std::time::{Duration, Instant};

use reqwest::Client;

use crate::error::RippleError;
use crate::prompt;
use crate::protocol::{
    self, GenerateRequest, GenerateResponse, MSG_NETWORK, MSG_RUNNING_LATE, MSG_UNEXPECTED,
};

/// Timing policy for one polling turn. The defaults are the production
/// contract; tests shrink them to keep the suite fast.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Per-cycle request timeout. Expiry means "no token yet" and the loop
    /// continues; it is never surfaced to the caller.
    pub request_timeout: Duration,
    /// Budget for the first non-empty fragment, measured from turn start.
    pub first_token_budget: Duration,
    /// Hard ceiling on a whole turn. Hitting it stops the loop without a
    /// further callback.
    pub max_turn_duration: Duration,
    /// Pause between cycles. Yield-sized rather than backoff-sized: the
    /// production value trades request volume for apparent responsiveness.
    pub poll_interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(3),
            first_token_budget: Duration::from_secs(3),
            max_turn_duration: Duration::from_secs(150),
            poll_interval: Duration::from_millis(1),
        }
    }
}

/// Why a turn stopped without a completed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiveUpReason {
    /// No non-empty fragment arrived within the first-token budget. The
    /// callback got the "running late" message.
    FirstTokenTimeout,
    /// The turn hit the overall duration ceiling. The callback stays silent
    /// so the transcript keeps whatever text already arrived.
    DeadlineExceeded,
}

/// Terminal state of one turn. Failures are also delivered through the
/// update callback as user-facing text; this is the caller-facing summary,
/// so a turn never resolves through the error channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Generation finished; carries the complete answer text.
    Complete(String),
    GaveUp(GiveUpReason),
    /// Terminal failure; carries the message the callback received.
    Failed(String),
}

/// Decision after one request/response cycle.
enum CycleOutcome {
    Continue,
    Complete(String),
    GiveUp(GiveUpReason),
    Error(String),
}

/// Mutable state scoped to exactly one turn. Created at turn start,
/// dropped at turn end; never shared across turns.
struct PollState {
    started: Instant,
    first_token: bool,
    /// Latest cumulative answer. Replaced, not appended, each cycle.
    text: String,
}

pub struct StreamingResponseAccumulator {
    client: Client,
    base_url: String,
    policy: PollPolicy,
}

impl StreamingResponseAccumulator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_policy(base_url, PollPolicy::default())
    }

    pub fn with_policy(base_url: impl Into<String>, policy: PollPolicy) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .expect("failed to build HTTP client");

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            policy,
        }
    }

    /// Run one turn: poll until completion, give-up, or terminal failure.
    ///
    /// `on_update` receives the cumulative answer text after every cycle
    /// that produced a non-empty fragment, and the terminal user message on
    /// failure. It is never called with an empty string — an empty overwrite
    /// would clear the caller's loading indicator.
    pub async fn run<F>(
        &self,
        prompt_text: &str,
        model_identifier: Option<&str>,
        mut on_update: F,
        auth_token: Option<&str>,
        max_output_tokens: u64,
    ) -> TurnOutcome
    where
        F: FnMut(&str),
    {
        let templated = prompt::apply_template(model_identifier, prompt_text);
        let request = GenerateRequest::new(model_identifier, templated, max_output_tokens);
        let url = format!("{}/streaming_generate", self.base_url);

        let mut state = PollState {
            started: Instant::now(),
            first_token: false,
            text: String::new(),
        };

        tracing::info!(
            model = model_identifier.unwrap_or("<backend default>"),
            max_tokens = max_output_tokens,
            "turn started"
        );

        loop {
            let elapsed = state.started.elapsed();

            let outcome = if !state.first_token && elapsed > self.policy.first_token_budget {
                CycleOutcome::GiveUp(GiveUpReason::FirstTokenTimeout)
            } else if elapsed > self.policy.max_turn_duration {
                CycleOutcome::GiveUp(GiveUpReason::DeadlineExceeded)
            } else {
                self.cycle(&url, &request, auth_token, &mut state, &mut on_update)
                    .await
            };

            let elapsed_ms = state.started.elapsed().as_millis() as u64;
            match outcome {
                CycleOutcome::Continue => {
                    tokio::time::sleep(self.policy.poll_interval).await;
                }
                CycleOutcome::Complete(text) => {
                    tracing::info!(elapsed_ms, chars = text.len(), "turn completed");
                    return TurnOutcome::Complete(text);
                }
                CycleOutcome::GiveUp(reason @ GiveUpReason::FirstTokenTimeout) => {
                    tracing::warn!(elapsed_ms, "no first token within budget — giving up");
                    on_update(MSG_RUNNING_LATE);
                    return TurnOutcome::GaveUp(reason);
                }
                CycleOutcome::GiveUp(reason @ GiveUpReason::DeadlineExceeded) => {
                    tracing::warn!(elapsed_ms, "turn exceeded duration ceiling — abandoning");
                    return TurnOutcome::GaveUp(reason);
                }
                CycleOutcome::Error(message) => {
                    tracing::warn!(elapsed_ms, "turn failed: {message}");
                    on_update(&message);
                    return TurnOutcome::Failed(message);
                }
            }
        }
    }

    /// One request/response cycle against the endpoint.
    async fn cycle<F>(
        &self,
        url: &str,
        request: &GenerateRequest,
        auth_token: Option<&str>,
        state: &mut PollState,
        on_update: &mut F,
    ) -> CycleOutcome
    where
        F: FnMut(&str),
    {
        let mut builder = self.client.post(url).json(request);
        if let Some(token) = auth_token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }

        // One timeout covers both sending the request and reading the body,
        // mirroring a per-call abort signal.
        let sent = tokio::time::timeout(self.policy.request_timeout, async {
            let response = builder.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, RippleError>((status, body))
        })
        .await;

        let (status, body) = match sent {
            Ok(Ok(pair)) => pair,
            Ok(Err(e)) => {
                tracing::warn!("request failed: {e}");
                return CycleOutcome::Error(MSG_NETWORK.to_string());
            }
            Err(_) => {
                tracing::debug!(
                    elapsed_ms = state.started.elapsed().as_millis() as u64,
                    "cycle timed out — continuing"
                );
                return CycleOutcome::Continue;
            }
        };

        // The body is parsed before the status is consulted: a non-JSON
        // body is terminal no matter what the status code says.
        let value: serde_json::Value = match serde_json::from_slice(&body) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(status = status.as_u16(), "unparseable response body: {e}");
                return CycleOutcome::Error(MSG_UNEXPECTED.to_string());
            }
        };

        if !status.is_success() {
            let message = match protocol::server_detail(&value) {
                Some(detail) => detail.to_string(),
                None => protocol::classify_status(status.as_u16()).to_string(),
            };
            tracing::warn!(status = status.as_u16(), "generate failed: {message}");
            return CycleOutcome::Error(message);
        }

        let parsed = match GenerateResponse::from_value(value) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("malformed generate response: {e}");
                return CycleOutcome::Error(MSG_UNEXPECTED.to_string());
            }
        };

        let fragment = parsed.fragment();
        if fragment.is_empty() {
            if state.started.elapsed() > self.policy.first_token_budget {
                return CycleOutcome::GiveUp(GiveUpReason::FirstTokenTimeout);
            }
            // No callback for an empty fragment; the completion flag is
            // also ignored here, matching the backend's observed contract.
            return CycleOutcome::Continue;
        }

        state.first_token = true;
        state.text.clear();
        state.text.push_str(fragment);
        on_update(fragment);

        if parsed.finished() {
            CycleOutcome::Complete(state.text.clone())
        } else {
            tracing::debug!(chars = state.text.len(), "partial answer received");
            CycleOutcome::Continue
        }
    }
}
