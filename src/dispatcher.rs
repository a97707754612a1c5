use std::fmt;

use serde_json::Value;

use crate::{actuator::ActuatorState, config::BridgeConfig, error::DispatchError};

/// Parsed response body of the light controller, kept for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct Acknowledgement(pub Value);

impl fmt::Display for Acknowledgement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub trait Dispatcher {
    fn dispatch(&mut self, state: &ActuatorState) -> Result<Acknowledgement, DispatchError>;
}

/// A single light behind a Hue bridge.
#[derive(Debug)]
pub struct HueBridge {
    agent: ureq::Agent,
    url: String,
}

impl HueBridge {
    pub fn new(config: &BridgeConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout()).build();

        HueBridge {
            agent,
            url: config.state_url(),
        }
    }
}

impl Dispatcher for HueBridge {
    fn dispatch(&mut self, state: &ActuatorState) -> Result<Acknowledgement, DispatchError> {
        let response = match self.agent.put(&self.url).send_json(state) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = response.into_string().unwrap_or_default();
                return Err(DispatchError::Status { code, body });
            }
            Err(ureq::Error::Transport(e)) => {
                return Err(DispatchError::Transport(e.to_string()));
            }
        };

        let body: Value = response
            .into_json()
            .map_err(|e| DispatchError::Acknowledgement(e.to_string()))?;

        Ok(Acknowledgement(body))
    }
}
