// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # JSON bridge
//!
//! Converts between JSON text and [`DecodedMessage`] so partial messages can
//! be written by hand and decoded messages can be printed.
//!
//! JSON numbers become `Int64`/`UInt64`/`Float64`; the ROS1 codec narrows
//! them into the declared field width on encode. `time` and `duration`
//! values are written as `{"secs": .., "nsecs": ..}` objects, which the codec
//! also accepts on input. Byte sequences are written as arrays of numbers.
//!
//! ## Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use robowire::encoding::json::decoder::JsonDecoder;
//!
//! let decoder = JsonDecoder::new();
//! let decoded = decoder.decode(r#"{"channel": [1, 2], "state": [0, 1]}"#)?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use crate::{CodecError, CodecValue, DecodedMessage, Result as CoreResult};

/// Converts JSON text to and from decoded messages.
#[derive(Debug, Default)]
pub struct JsonDecoder {
    _private: (),
}

impl JsonDecoder {
    /// Create a new JSON decoder.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Decode a JSON object into a DecodedMessage.
    ///
    /// # Arguments
    ///
    /// * `json` - The JSON string to decode; must be an object
    pub fn decode(&self, json: &str) -> CoreResult<DecodedMessage> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| CodecError::parse("json", format!("{e}")))?;

        match value {
            serde_json::Value::Object(obj) => obj
                .iter()
                .map(|(key, val)| Ok((key.clone(), json_to_value(val)?)))
                .collect(),
            other => Err(CodecError::parse(
                "json",
                format!("expected an object, got {}", json_kind(&other)),
            )),
        }
    }

    /// Encode a DecodedMessage to a JSON string.
    ///
    /// # Arguments
    ///
    /// * `message` - The decoded message to encode
    /// * `pretty` - Whether to pretty-print the output
    pub fn encode(&self, message: &DecodedMessage, pretty: bool) -> CoreResult<String> {
        let json_value = self.to_json_value(message)?;

        let text = if pretty {
            serde_json::to_string_pretty(&json_value)
        } else {
            serde_json::to_string(&json_value)
        };
        text.map_err(|e| CodecError::parse("json encode", format!("{e}")))
    }

    /// Convert a decoded message to a JSON value.
    pub fn to_json_value(&self, message: &DecodedMessage) -> CoreResult<serde_json::Value> {
        let mut obj = serde_json::Map::new();
        for (key, value) in message {
            obj.insert(key.clone(), value_to_json(value)?);
        }
        Ok(serde_json::Value::Object(obj))
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Convert a JSON value to a codec value.
fn json_to_value(value: &serde_json::Value) -> CoreResult<CodecValue> {
    match value {
        serde_json::Value::Null => Ok(CodecValue::Null),
        serde_json::Value::Bool(b) => Ok(CodecValue::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(CodecValue::Int64(i))
            } else if let Some(u) = n.as_u64() {
                Ok(CodecValue::UInt64(u))
            } else if let Some(f) = n.as_f64() {
                Ok(CodecValue::Float64(f))
            } else {
                Err(CodecError::parse("number", "unknown number format"))
            }
        }
        serde_json::Value::String(s) => Ok(CodecValue::String(s.clone())),
        serde_json::Value::Array(arr) => arr
            .iter()
            .map(json_to_value)
            .collect::<CoreResult<Vec<_>>>()
            .map(CodecValue::Array),
        serde_json::Value::Object(obj) => {
            let mut map = HashMap::with_capacity(obj.len());
            for (key, val) in obj {
                map.insert(key.clone(), json_to_value(val)?);
            }
            Ok(CodecValue::Struct(map))
        }
    }
}

fn pair(secs: serde_json::Value, nsecs: serde_json::Value) -> serde_json::Value {
    let mut obj = serde_json::Map::new();
    obj.insert("secs".to_string(), secs);
    obj.insert("nsecs".to_string(), nsecs);
    serde_json::Value::Object(obj)
}

/// Convert a codec value to a JSON value.
fn value_to_json(value: &CodecValue) -> CoreResult<serde_json::Value> {
    use serde_json::{Number, Value};

    match value {
        CodecValue::Null => Ok(Value::Null),
        CodecValue::Bool(b) => Ok(Value::Bool(*b)),
        CodecValue::Int8(i) => Ok(Value::Number(Number::from(*i))),
        CodecValue::Int16(i) => Ok(Value::Number(Number::from(*i))),
        CodecValue::Int32(i) => Ok(Value::Number(Number::from(*i))),
        CodecValue::Int64(i) => Ok(Value::Number(Number::from(*i))),
        CodecValue::UInt8(u) => Ok(Value::Number(Number::from(*u))),
        CodecValue::UInt16(u) => Ok(Value::Number(Number::from(*u))),
        CodecValue::UInt32(u) => Ok(Value::Number(Number::from(*u))),
        CodecValue::UInt64(u) => Ok(Value::Number(Number::from(*u))),
        CodecValue::Float32(f) => Number::from_f64(*f as f64)
            .map(Value::Number)
            .ok_or_else(|| CodecError::parse("float32", "not representable as JSON number")),
        CodecValue::Float64(f) => Number::from_f64(*f)
            .map(Value::Number)
            .ok_or_else(|| CodecError::parse("float64", "not representable as JSON number")),
        CodecValue::String(s) => Ok(Value::String(s.clone())),
        CodecValue::Time { secs, nsecs } => Ok(pair(
            Value::Number(Number::from(*secs)),
            Value::Number(Number::from(*nsecs)),
        )),
        CodecValue::Duration { secs, nsecs } => Ok(pair(
            Value::Number(Number::from(*secs)),
            Value::Number(Number::from(*nsecs)),
        )),
        CodecValue::Bytes(b) => Ok(Value::Array(
            b.iter().map(|byte| Value::Number(Number::from(*byte))).collect(),
        )),
        CodecValue::Array(arr) => arr
            .iter()
            .map(value_to_json)
            .collect::<CoreResult<Vec<_>>>()
            .map(Value::Array),
        CodecValue::Struct(map) => {
            let mut obj = serde_json::Map::new();
            for (key, val) in map {
                obj.insert(key.clone(), value_to_json(val)?);
            }
            Ok(Value::Object(obj))
        }
    }
}
