//! OAuth phase machine.
//!
//! ```text
//!  Idle / Failed ──Start──► LaunchBrowser ──CallbackReceived──► HandlingCallback
//!        │                                                        │        │
//!        └──────────────CallbackReceived──────────────────────────┘        │
//!                                             CallbackSucceeded ◄──────────┤
//!                                                    │         CallbackFailed
//!                                                    ▼                 ▼
//!                                              Authenticated         Failed
//! ```
//!
//! `Authenticated` only accepts a fresh `Start`; late callbacks are rejected.

use rust_fsm::*;

state_machine! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub oauth_machine(Idle)

    Idle => {
        Start => LaunchBrowser,
        MissingConfig => Failed,
        CallbackReceived => HandlingCallback
    },
    LaunchBrowser => {
        Start => LaunchBrowser,
        MissingConfig => Failed,
        CallbackReceived => HandlingCallback
    },
    HandlingCallback => {
        // A caller that abandoned the previous attempt may retry it.
        CallbackReceived => HandlingCallback,
        CallbackSucceeded => Authenticated,
        CallbackFailed => Failed,
        Start => LaunchBrowser,
        MissingConfig => Failed
    },
    Authenticated => {
        Start => LaunchBrowser,
        MissingConfig => Failed
    },
    Failed => {
        Start => LaunchBrowser,
        MissingConfig => Failed,
        CallbackReceived => HandlingCallback
    }
}

pub use oauth_machine::Input as OAuthMachineInput;
pub use oauth_machine::State as OAuthMachineState;
pub use oauth_machine::StateMachine as OAuthMachine;
