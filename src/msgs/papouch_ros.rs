// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `papouch_ros` package: digital IO writes on a Papouch Quido board.

use crate::core::{CodecValue, DecodedMessage, Result};
use crate::encoding::ros1::primitive::{
    array_size, decode_array, decode_value, encode_array, encode_value, value_size,
};
use crate::encoding::ros1::DefaultTable;
use crate::message::{
    array_field, array_value, scalar_field, Decodable, Encodable, RosMessage, RosService,
};

/// Request half of the `papouch_ros/WriteIO` service.
///
/// `channel[i]` is driven to `state[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteIORequest {
    pub channel: Vec<i8>,
    pub state: Vec<i8>,
}

impl Encodable for WriteIORequest {
    fn encoded_len(&self) -> usize {
        array_size(&self.channel, None) + array_size(&self.state, None)
    }

    fn encode(&self, buffer: &mut [u8], offset: usize) -> Result<usize> {
        let offset = encode_array(&self.channel, buffer, offset, None)?;
        encode_array(&self.state, buffer, offset, None)
    }
}

impl Decodable for WriteIORequest {
    fn decode(buffer: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (channel, offset) = decode_array(buffer, offset, None)?;
        let (state, offset) = decode_array(buffer, offset, None)?;
        Ok((Self { channel, state }, offset))
    }
}

impl RosMessage for WriteIORequest {
    const DATATYPE: &'static str = "papouch_ros/WriteIORequest";
    const MD5SUM: &'static str = "f441b6fe8c47b0a1a0e45816683dfd61";
    const DEFINITION: &'static str = "
# List of IO channels to write.
int8[] channel

# List of state
int8[] state
";

    fn defaults() -> DefaultTable {
        DefaultTable::new()
            .with("channel", CodecValue::Array(Vec::new()))
            .with("state", CodecValue::Array(Vec::new()))
    }

    fn to_value(&self) -> DecodedMessage {
        let mut message = DecodedMessage::with_capacity(2);
        message.insert("channel".to_string(), array_value(&self.channel));
        message.insert("state".to_string(), array_value(&self.state));
        message
    }

    fn from_value(message: &DecodedMessage) -> Result<Self> {
        Ok(Self {
            channel: array_field(message, Self::DATATYPE, "channel")?,
            state: array_field(message, Self::DATATYPE, "state")?,
        })
    }
}

/// Response half of the `papouch_ros/WriteIO` service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteIOResponse {
    pub retval: bool,
}

impl Encodable for WriteIOResponse {
    fn encoded_len(&self) -> usize {
        value_size(&self.retval)
    }

    fn encode(&self, buffer: &mut [u8], offset: usize) -> Result<usize> {
        encode_value(&self.retval, buffer, offset)
    }
}

impl Decodable for WriteIOResponse {
    fn decode(buffer: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (retval, offset) = decode_value(buffer, offset)?;
        Ok((Self { retval }, offset))
    }
}

impl RosMessage for WriteIOResponse {
    const DATATYPE: &'static str = "papouch_ros/WriteIOResponse";
    const MD5SUM: &'static str = "e60db45b9ec4a458523094ea4ee7553a";
    const DEFINITION: &'static str = "bool retval\n";

    fn defaults() -> DefaultTable {
        DefaultTable::new().with("retval", CodecValue::Bool(false))
    }

    fn to_value(&self) -> DecodedMessage {
        let mut message = DecodedMessage::with_capacity(1);
        message.insert("retval".to_string(), CodecValue::Bool(self.retval));
        message
    }

    fn from_value(message: &DecodedMessage) -> Result<Self> {
        Ok(Self {
            retval: scalar_field(message, Self::DATATYPE, "retval")?,
        })
    }
}

/// `papouch_ros/WriteIO` service.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteIO;

impl RosService for WriteIO {
    type Request = WriteIORequest;
    type Response = WriteIOResponse;

    const DATATYPE: &'static str = "papouch_ros/WriteIO";
    const MD5SUM: &'static str = "acedff32d14bc005248c00858b1d9393";
}
