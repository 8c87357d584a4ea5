// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Predefined ROS1 builtin message types.
//!
//! ## Supported Types
//!
//! - `std_msgs/Header` - Standard ROS1 message header
//!
//! ```text
//! uint32 seq
//! time stamp
//! string frame_id
//! ```
//!
//! `time` and `duration` are wire primitives in ROS1 and need no entry here.

use crate::schema::ast::{Field, FieldType, MessageSchema, MessageType, PrimitiveType};

/// Datatype of the ROS1 standard header.
pub const HEADER_TYPE: &str = "std_msgs/Header";

/// Create the predefined std_msgs/Header type.
fn builtin_header() -> MessageType {
    let mut msg_type = MessageType::new(HEADER_TYPE.to_string());

    msg_type.add_field(Field {
        name: "seq".to_string(),
        type_name: FieldType::Primitive(PrimitiveType::UInt32),
    });

    msg_type.add_field(Field {
        name: "stamp".to_string(),
        type_name: FieldType::Primitive(PrimitiveType::Time),
    });

    msg_type.add_field(Field {
        name: "frame_id".to_string(),
        type_name: FieldType::Primitive(PrimitiveType::String),
    });

    msg_type
}

/// Get all predefined builtin message types.
pub fn get_all() -> Vec<MessageType> {
    vec![builtin_header()]
}

/// Add every builtin type the schema does not already define inline.
pub fn add_missing(schema: &mut MessageSchema) {
    for builtin in get_all() {
        if !schema.types.contains_key(&builtin.name) {
            schema.add_type(builtin);
        }
    }
}
