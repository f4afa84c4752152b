// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Request and response envelopes exchanged with the JavaScript side.
//
// Both are plain JSON objects. The only field with fixed meaning is `msg`, the
// command identifier; everything else belongs to the command.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::{BridgeError, Result};
use crate::types::COMMAND_FIELD;

/// A parsed request from JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Request {
    body: Map<String, Value>,
}

impl Request {
    /// Parse a raw payload. Anything other than a JSON object is rejected.
    pub fn parse(payload: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| BridgeError::Parse(e.to_string()))?;
        match value {
            Value::Object(body) => Ok(Self { body }),
            other => Err(BridgeError::Parse(format!(
                "expected an object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// The command identifier carried in `msg`.
    ///
    /// Strings are taken as-is. Numbers and booleans are read as their JSON
    /// text, so `{"msg": 7}` names the command `"7"`. Anything else counts as
    /// a missing command.
    pub fn command(&self) -> Result<String> {
        match self.body.get(COMMAND_FIELD) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(v.to_string()),
            _ => Err(BridgeError::MissingCommand),
        }
    }

    /// Raw access to a single parameter.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    /// Deserialize one parameter. `Ok(None)` when the key is absent or null.
    pub fn param<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.body.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => Ok(Some(T::deserialize(v)?)),
        }
    }

    /// Deserialize the whole request body into a typed parameter struct.
    pub fn params<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(self.body.clone()))?)
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }
}

/// A response built fresh for each request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Response {
    body: Map<String, Value>,
}

impl Response {
    /// An empty response object.
    pub fn new() -> Self {
        Self::default()
    }

    /// A response whose `msg` field is set to `command`.
    pub fn for_command(command: impl Into<String>) -> Self {
        let command: String = command.into();
        Self::new().with(COMMAND_FIELD, command)
    }

    pub fn from_map(body: Map<String, Value>) -> Self {
        Self { body }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.body.insert(key.into(), value.into());
    }

    /// The error envelope sent when a request fails under the reporting policy:
    /// `{"msg": <command or null>, "error": {"kind": <code>, "message": <text>}}`.
    pub fn error(command: Option<&str>, err: &BridgeError) -> Self {
        let mut body = Map::new();
        body.insert(
            COMMAND_FIELD.into(),
            command.map_or(Value::Null, |c| Value::String(c.to_owned())),
        );
        body.insert(
            "error".into(),
            json!({ "kind": err.code(), "message": err.to_string() }),
        );
        Self { body }
    }

    /// Whether this response is an error envelope.
    pub fn is_error(&self) -> bool {
        self.body.get("error").is_some_and(Value::is_object)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    /// Serialize into the string handed to the callback.
    pub fn to_payload(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.body)?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
