// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `kinematics_6dof_ros_pkg` package: kinematic configuration switching.

#![allow(non_camel_case_types)]

use crate::core::{CodecValue, DecodedMessage, Result};
use crate::encoding::ros1::primitive::{decode_value, encode_value, value_size};
use crate::encoding::ros1::DefaultTable;
use crate::message::{scalar_field, Decodable, Encodable, RosMessage, RosService};

/// Request half of `kinematics_6dof_ros_pkg/changeKinematicsConfig`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct changeKinematicsConfigRequest {
    pub configuration: String,
    pub eef_robot_frame: String,
}

impl Encodable for changeKinematicsConfigRequest {
    fn encoded_len(&self) -> usize {
        value_size(&self.configuration) + value_size(&self.eef_robot_frame)
    }

    fn encode(&self, buffer: &mut [u8], offset: usize) -> Result<usize> {
        let offset = encode_value(&self.configuration, buffer, offset)?;
        encode_value(&self.eef_robot_frame, buffer, offset)
    }
}

impl Decodable for changeKinematicsConfigRequest {
    fn decode(buffer: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (configuration, offset) = decode_value(buffer, offset)?;
        let (eef_robot_frame, offset) = decode_value(buffer, offset)?;
        Ok((
            Self {
                configuration,
                eef_robot_frame,
            },
            offset,
        ))
    }
}

impl RosMessage for changeKinematicsConfigRequest {
    const DATATYPE: &'static str = "kinematics_6dof_ros_pkg/changeKinematicsConfigRequest";
    const MD5SUM: &'static str = "7610575331dca08deb1829a93e58249c";
    const DEFINITION: &'static str = "string configuration\nstring eef_robot_frame\n";

    fn defaults() -> DefaultTable {
        DefaultTable::new()
            .with("configuration", CodecValue::String(String::new()))
            .with("eef_robot_frame", CodecValue::String(String::new()))
    }

    fn to_value(&self) -> DecodedMessage {
        let mut message = DecodedMessage::with_capacity(2);
        message.insert(
            "configuration".to_string(),
            CodecValue::String(self.configuration.clone()),
        );
        message.insert(
            "eef_robot_frame".to_string(),
            CodecValue::String(self.eef_robot_frame.clone()),
        );
        message
    }

    fn from_value(message: &DecodedMessage) -> Result<Self> {
        Ok(Self {
            configuration: scalar_field(message, Self::DATATYPE, "configuration")?,
            eef_robot_frame: scalar_field(message, Self::DATATYPE, "eef_robot_frame")?,
        })
    }
}

/// Response half of `kinematics_6dof_ros_pkg/changeKinematicsConfig`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct changeKinematicsConfigResponse {
    pub result: String,
}

impl Encodable for changeKinematicsConfigResponse {
    fn encoded_len(&self) -> usize {
        value_size(&self.result)
    }

    fn encode(&self, buffer: &mut [u8], offset: usize) -> Result<usize> {
        encode_value(&self.result, buffer, offset)
    }
}

impl Decodable for changeKinematicsConfigResponse {
    fn decode(buffer: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (result, offset) = decode_value(buffer, offset)?;
        Ok((Self { result }, offset))
    }
}

impl RosMessage for changeKinematicsConfigResponse {
    const DATATYPE: &'static str = "kinematics_6dof_ros_pkg/changeKinematicsConfigResponse";
    const MD5SUM: &'static str = "c22f2a1ed8654a0b365f1bb3f7ff2c0f";
    const DEFINITION: &'static str = "string result\n";

    fn defaults() -> DefaultTable {
        DefaultTable::new().with("result", CodecValue::String(String::new()))
    }

    fn to_value(&self) -> DecodedMessage {
        let mut message = DecodedMessage::with_capacity(1);
        message.insert("result".to_string(), CodecValue::String(self.result.clone()));
        message
    }

    fn from_value(message: &DecodedMessage) -> Result<Self> {
        Ok(Self {
            result: scalar_field(message, Self::DATATYPE, "result")?,
        })
    }
}

/// `kinematics_6dof_ros_pkg/changeKinematicsConfig` service.
#[derive(Debug, Clone, Copy, Default)]
pub struct changeKinematicsConfig;

impl RosService for changeKinematicsConfig {
    type Request = changeKinematicsConfigRequest;
    type Response = changeKinematicsConfigResponse;

    const DATATYPE: &'static str = "kinematics_6dof_ros_pkg/changeKinematicsConfig";
    const MD5SUM: &'static str = "f5f869dd94ca439f0a9ec55af2a70f63";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodecError;

    #[test]
    fn test_request_wire_layout() {
        let request = changeKinematicsConfigRequest {
            configuration: "cfg1".to_string(),
            eef_robot_frame: String::new(),
        };
        let bytes = request.to_bytes().unwrap();
        assert_eq!(bytes, vec![4, 0, 0, 0, b'c', b'f', b'g', b'1', 0, 0, 0, 0]);
        assert_eq!(request.encoded_len(), 12);
        assert_eq!(changeKinematicsConfigRequest::from_bytes(&bytes).unwrap(), request);
    }

    #[test]
    fn test_resolve_fills_missing_frame() {
        let mut partial = DecodedMessage::new();
        partial.insert(
            "configuration".to_string(),
            CodecValue::String("cfg1".to_string()),
        );
        let request = changeKinematicsConfigRequest::resolve(&partial).unwrap();
        assert_eq!(request.configuration, "cfg1");
        assert_eq!(request.eef_robot_frame, "");
    }

    #[test]
    fn test_from_value_requires_every_field() {
        let mut partial = DecodedMessage::new();
        partial.insert(
            "configuration".to_string(),
            CodecValue::String("cfg1".to_string()),
        );
        let err = changeKinematicsConfigRequest::from_value(&partial).unwrap_err();
        assert!(matches!(err, CodecError::Encoding { .. }));
    }

    #[test]
    fn test_invalid_utf8_response() {
        let err =
            changeKinematicsConfigResponse::from_bytes(&[2, 0, 0, 0, 0xC3, 0x28]).unwrap_err();
        assert!(matches!(err, CodecError::Encoding { .. }));
    }

    #[test]
    fn test_response_multibyte() {
        let response = changeKinematicsConfigResponse {
            result: "ok é".to_string(),
        };
        let bytes = response.to_bytes().unwrap();
        assert_eq!(&bytes[..4], &[5, 0, 0, 0]);
        assert_eq!(changeKinematicsConfigResponse::from_bytes(&bytes).unwrap(), response);
    }

    #[test]
    fn test_service_schema() {
        let schema = changeKinematicsConfig::schema().unwrap();
        let request = schema.request.root_type().unwrap();
        assert_eq!(request.fields.len(), 2);
        assert_eq!(schema.response.root_type().unwrap().fields[0].name, "result");
    }
}
