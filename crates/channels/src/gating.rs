use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How the integration's credentials were provisioned.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigMode {
    /// Credentials obtained through the platform's OAuth setup flow.
    #[default]
    Managed,
    /// Operator-supplied access token and phone number id.
    Manual,
    /// Shared evaluation number. Billable sends are blocked.
    Sandbox,
}

/// Reject actions that would consume billable resources on a sandbox account.
///
/// `what` names the action for the error message, e.g. "starting a flow".
pub fn ensure_billable(mode: ConfigMode, what: &str) -> Result<()> {
    if mode == ConfigMode::Sandbox {
        return Err(Error::policy(format!(
            "{what} is not supported in sandbox mode"
        )));
    }
    Ok(())
}
