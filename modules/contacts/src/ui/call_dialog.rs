//! State machine backing the call-simulation dialog:
//! `Idle → Calling → Finished(outcome)`.

use uuid::Uuid;

use crate::contract::client::ContactsApi;
use crate::contract::model::CallOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Idle,
    Calling,
    Finished(CallOutcome),
}

/// Dialog-scoped call workflow. Opening the dialog (or pointing it at a
/// different contact) always resets to `Idle`; a failed request reads as a
/// failed call.
#[derive(Debug)]
pub struct CallDialog {
    target: Option<Uuid>,
    state: CallState,
    error: Option<String>,
}

impl Default for CallDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl CallDialog {
    pub fn new() -> Self {
        Self {
            target: None,
            state: CallState::Idle,
            error: None,
        }
    }

    /// Open the dialog for `contact_id`, discarding any previous attempt.
    pub fn open(&mut self, contact_id: Uuid) {
        self.target = Some(contact_id);
        self.state = CallState::Idle;
        self.error = None;
    }

    pub fn target(&self) -> Option<Uuid> {
        self.target
    }

    pub fn state(&self) -> CallState {
        self.state
    }

    /// The request failure message, if the last attempt did not reach the
    /// server or was rejected by it.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Drive one attempt to its terminal state.
    pub async fn place_call(&mut self, api: &dyn ContactsApi) -> CallState {
        let Some(id) = self.target else {
            return self.state;
        };

        self.state = CallState::Calling;
        self.error = None;

        match api.simulate_call(id).await {
            Ok(outcome) => {
                self.state = CallState::Finished(outcome);
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.state = CallState::Finished(CallOutcome::Failed);
            }
        }

        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::{Contact, ContactInput};
    use anyhow::anyhow;
    use async_trait::async_trait;

    /// Stub API with a scripted simulate-call result.
    struct ScriptedApi {
        result: Result<CallOutcome, String>,
    }

    #[async_trait]
    impl ContactsApi for ScriptedApi {
        async fn list_contacts(&self) -> anyhow::Result<Vec<Contact>> {
            unimplemented!("not used by the call dialog")
        }
        async fn get_contact(&self, _id: Uuid) -> anyhow::Result<Contact> {
            unimplemented!("not used by the call dialog")
        }
        async fn create_contact(&self, _input: ContactInput) -> anyhow::Result<Contact> {
            unimplemented!("not used by the call dialog")
        }
        async fn update_contact(&self, _id: Uuid, _input: ContactInput) -> anyhow::Result<Contact> {
            unimplemented!("not used by the call dialog")
        }
        async fn delete_contact(&self, _id: Uuid) -> anyhow::Result<()> {
            unimplemented!("not used by the call dialog")
        }
        async fn simulate_call(&self, _id: Uuid) -> anyhow::Result<CallOutcome> {
            self.result.clone().map_err(|m| anyhow!(m))
        }
    }

    #[tokio::test]
    async fn successful_call_lands_in_the_reported_outcome() {
        let api = ScriptedApi {
            result: Ok(CallOutcome::Busy),
        };
        let mut dialog = CallDialog::new();
        dialog.open(Uuid::new_v4());
        assert_eq!(dialog.state(), CallState::Idle);

        let state = dialog.place_call(&api).await;
        assert_eq!(state, CallState::Finished(CallOutcome::Busy));
        assert!(dialog.error().is_none());
    }

    #[tokio::test]
    async fn request_failure_reads_as_failed_call() {
        let api = ScriptedApi {
            result: Err("Contact not found: 42".to_string()),
        };
        let mut dialog = CallDialog::new();
        dialog.open(Uuid::new_v4());

        let state = dialog.place_call(&api).await;
        assert_eq!(state, CallState::Finished(CallOutcome::Failed));
        assert_eq!(dialog.error(), Some("Contact not found: 42"));
    }

    #[tokio::test]
    async fn reopening_resets_to_idle() {
        let api = ScriptedApi {
            result: Ok(CallOutcome::Connected),
        };
        let target = Uuid::new_v4();
        let mut dialog = CallDialog::new();
        dialog.open(target);
        dialog.place_call(&api).await;
        assert_eq!(dialog.state(), CallState::Finished(CallOutcome::Connected));

        // Same contact, opened again.
        dialog.open(target);
        assert_eq!(dialog.state(), CallState::Idle);
        assert!(dialog.error().is_none());
    }

    #[tokio::test]
    async fn switching_target_resets_to_idle() {
        let api = ScriptedApi {
            result: Ok(CallOutcome::NoAnswer),
        };
        let mut dialog = CallDialog::new();
        dialog.open(Uuid::new_v4());
        dialog.place_call(&api).await;

        let other = Uuid::new_v4();
        dialog.open(other);
        assert_eq!(dialog.state(), CallState::Idle);
        assert_eq!(dialog.target(), Some(other));
    }

    #[tokio::test]
    async fn placing_a_call_with_no_target_stays_idle() {
        let api = ScriptedApi {
            result: Ok(CallOutcome::Connected),
        };
        let mut dialog = CallDialog::new();
        let state = dialog.place_call(&api).await;
        assert_eq!(state, CallState::Idle);
    }
}
