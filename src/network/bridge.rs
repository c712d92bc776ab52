//! Command bridge to the host process.
//!
//! Every call is a single attempt: no retry, no timeout, no batching.  Host
//! failures always come back as a [`CommandError`] that names the command and
//! keeps the raw rejection around as its `source()`.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;
use wasm_bindgen::JsValue;

/// Flat key/value arguments of a host command.
pub type CommandArgs = Map<String, Value>;

/// Raw rejection as delivered by the host (usually a string, sometimes an
/// object with a `message` field).
#[derive(Clone, Debug, PartialEq)]
pub struct HostFailure {
    payload: Value,
}

impl HostFailure {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }

    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            payload: Value::String(message.into()),
        }
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Human readable text of the rejection.
    pub fn message(&self) -> String {
        match &self.payload {
            Value::String(s) if !s.is_empty() => s.clone(),
            Value::Object(map) => match map.get("message") {
                Some(Value::String(s)) if !s.is_empty() => s.clone(),
                _ => self.payload.to_string(),
            },
            Value::Null => "unknown host error".to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for HostFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for HostFailure {}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Failed to invoke command '{command}': {cause}")]
    Host {
        command: String,
        #[source]
        cause: HostFailure,
    },
    #[error("Failed to encode arguments of command '{command}': {cause}")]
    Encode {
        command: String,
        #[source]
        cause: serde_json::Error,
    },
    #[error("Unexpected response to command '{command}': {cause}")]
    Decode {
        command: String,
        #[source]
        cause: serde_json::Error,
    },
}

impl CommandError {
    pub fn command(&self) -> &str {
        match self {
            CommandError::Host { command, .. }
            | CommandError::Encode { command, .. }
            | CommandError::Decode { command, .. } => command,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    /// The host rejection, when the failure came from the host itself.
    pub fn host_failure(&self) -> Option<&HostFailure> {
        match self {
            CommandError::Host { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

impl From<CommandError> for JsValue {
    fn from(err: CommandError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// The out-of-process side of the bridge.
#[allow(async_fn_in_trait)]
pub trait CommandHost {
    async fn invoke(&self, command: &str, args: Option<&CommandArgs>) -> Result<Value, HostFailure>;
}

/// Typed front door to a [`CommandHost`].
#[derive(Clone, Debug, Default)]
pub struct CommandBridge<H> {
    host: H,
}

impl<H: CommandHost> CommandBridge<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Invoke `command` and decode its result into `T`.
    pub async fn invoke<T: DeserializeOwned>(&self, command: &str, args: Option<CommandArgs>) -> Result<T, CommandError> {
        let value = self.invoke_raw(command, args).await?;
        serde_json::from_value(value).map_err(|cause| CommandError::Decode {
            command: command.to_string(),
            cause,
        })
    }

    /// Invoke `command` with any serializable struct as its argument object.
    pub async fn invoke_with<A, T>(&self, command: &str, args: &A) -> Result<T, CommandError>
    where
        A: Serialize,
        T: DeserializeOwned,
    {
        let args = to_args(args).map_err(|cause| CommandError::Encode {
            command: command.to_string(),
            cause,
        })?;
        self.invoke(command, Some(args)).await
    }

    /// Invoke `command` and hand back the undecoded host value.
    pub async fn invoke_raw(&self, command: &str, args: Option<CommandArgs>) -> Result<Value, CommandError> {
        let request_id = Uuid::new_v4();
        crate::log_info!("[bridge] {} -> {}", request_id, command);

        match self.host.invoke(command, args.as_ref()).await {
            Ok(value) => Ok(value),
            Err(cause) => {
                crate::log_warn!("[bridge] {} <- {} failed: {}", request_id, command, cause);
                Err(CommandError::Host {
                    command: command.to_string(),
                    cause,
                })
            }
        }
    }
}

/// Flatten a serializable value into command arguments.  Anything that is
/// not a JSON object becomes an empty argument set.
pub fn to_args<A: Serialize>(args: &A) -> Result<CommandArgs, serde_json::Error> {
    match serde_json::to_value(args)? {
        Value::Object(map) => Ok(map),
        _ => Ok(CommandArgs::new()),
    }
}

/// Build a [`CommandArgs`] from `key => value` pairs.
///
/// ```rust,ignore
/// let args = command_args! { "server_url" => url };
/// ```
#[macro_export]
macro_rules! command_args {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut args = $crate::network::CommandArgs::new();
        $(args.insert($key.to_string(), serde_json::json!($value));)*
        args
    }};
}

#[cfg(test)]
pub(crate) mod test_host {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// Scripted host: each command answers with a fixed result and every call
    /// is recorded.
    #[derive(Default)]
    pub struct ScriptedHost {
        responses: HashMap<String, Result<Value, HostFailure>>,
        pub calls: RefCell<Vec<(String, Option<CommandArgs>)>>,
    }

    impl ScriptedHost {
        pub fn answer(mut self, command: &str, value: Value) -> Self {
            self.responses.insert(command.to_string(), Ok(value));
            self
        }

        pub fn reject(mut self, command: &str, payload: Value) -> Self {
            self.responses.insert(command.to_string(), Err(HostFailure::new(payload)));
            self
        }
    }

    impl CommandHost for ScriptedHost {
        async fn invoke(&self, command: &str, args: Option<&CommandArgs>) -> Result<Value, HostFailure> {
            self.calls.borrow_mut().push((command.to_string(), args.cloned()));
            self.responses
                .get(command)
                .cloned()
                .unwrap_or_else(|| Err(HostFailure::from_message(format!("command {} not found", command))))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use futures::executor::block_on;
    use serde_json::json;

    use super::test_host::ScriptedHost;
    use super::*;

    #[test]
    fn rejection_names_command_and_host_message() {
        let bridge = CommandBridge::new(ScriptedHost::default().reject("load_project", json!("file not found")));

        let err = block_on(bridge.invoke::<Value>("load_project", None)).unwrap_err();

        let message = err.message();
        assert!(message.contains("load_project"), "{}", message);
        assert!(message.contains("file not found"), "{}", message);
        assert_eq!(err.command(), "load_project");

        let cause = err.source().expect("cause retained");
        assert_eq!(cause.to_string(), "file not found");
        assert_eq!(err.host_failure().unwrap().payload(), &json!("file not found"));
    }

    #[test]
    fn object_rejections_use_their_message_field() {
        let bridge = CommandBridge::new(
            ScriptedHost::default().reject("create_new_project", json!({"message": "bad toml", "line": 3})),
        );

        let err = block_on(bridge.invoke::<Value>("create_new_project", None)).unwrap_err();

        assert!(err.message().ends_with("bad toml"));
        assert_eq!(err.host_failure().unwrap().payload()["line"], json!(3));
    }

    #[test]
    fn empty_rejection_still_has_a_message() {
        let bridge = CommandBridge::new(ScriptedHost::default().reject("clear_proxy", Value::Null));

        let err = block_on(bridge.invoke::<Value>("clear_proxy", None)).unwrap_err();

        assert!(!err.host_failure().unwrap().message().is_empty());
        assert!(err.message().contains("clear_proxy"));
    }

    #[test]
    fn success_is_decoded_and_args_are_forwarded() {
        let host = ScriptedHost::default().answer("set_server_url", json!({"url": "http://grid", "status": "configured"}));
        let bridge = CommandBridge::new(host);

        let args = crate::command_args! { "server_url" => "http://grid" };
        let out: crate::models::ServerUrlResponse = block_on(bridge.invoke("set_server_url", Some(args))).unwrap();

        assert_eq!(out.status, "configured");
        let calls = bridge.host().calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.as_ref().unwrap()["server_url"], json!("http://grid"));
    }

    #[test]
    fn undecodable_response_is_a_decode_error() {
        let bridge = CommandBridge::new(ScriptedHost::default().answer("get_server_url", json!(42)));

        let err = block_on(bridge.invoke::<crate::models::ServerUrlResponse>("get_server_url", None)).unwrap_err();

        assert!(matches!(err, CommandError::Decode { .. }));
        assert!(err.host_failure().is_none());
    }

    #[test]
    fn every_call_is_a_single_attempt() {
        let bridge = CommandBridge::new(ScriptedHost::default().reject("load_outputs", json!("busy")));

        let _ = block_on(bridge.invoke_raw("load_outputs", None));

        assert_eq!(bridge.host().calls.borrow().len(), 1);
    }
}
