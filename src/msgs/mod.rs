// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Generated message and service types.
//!
//! One submodule per ROS package. Each type implements
//! [`RosMessage`](crate::message::RosMessage) and each service implements
//! [`RosService`](crate::message::RosService).

pub mod kinematics_6dof_ros_pkg;
pub mod papouch_ros;

use crate::core::{Result, TypeRegistry};
use crate::message::{RosMessage, RosService};
use crate::schema::{MessageSchema, ServiceSchema};

fn register_message<M: RosMessage>(registry: &TypeRegistry<MessageSchema>) -> Result<()> {
    registry.register(M::DATATYPE, M::schema()?)
}

fn register_service<S: RosService>(registry: &TypeRegistry<ServiceSchema>) -> Result<()> {
    registry.register(S::DATATYPE, S::schema()?)
}

/// Schemas of every generated message, keyed by datatype.
pub fn message_registry() -> Result<TypeRegistry<MessageSchema>> {
    let registry = TypeRegistry::new();
    register_message::<papouch_ros::WriteIORequest>(&registry)?;
    register_message::<papouch_ros::WriteIOResponse>(&registry)?;
    register_message::<kinematics_6dof_ros_pkg::changeKinematicsConfigRequest>(&registry)?;
    register_message::<kinematics_6dof_ros_pkg::changeKinematicsConfigResponse>(&registry)?;
    Ok(registry)
}

/// Schemas of every generated service, keyed by datatype.
pub fn service_registry() -> Result<TypeRegistry<ServiceSchema>> {
    let registry = TypeRegistry::new();
    register_service::<papouch_ros::WriteIO>(&registry)?;
    register_service::<kinematics_6dof_ros_pkg::changeKinematicsConfig>(&registry)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_registry() {
        let registry = message_registry().unwrap();
        assert_eq!(registry.len().unwrap(), 4);
        let schema = registry.require("papouch_ros/WriteIOResponse").unwrap();
        assert_eq!(schema.root_type().unwrap().fields[0].name, "retval");
    }

    #[test]
    fn test_service_registry() {
        let registry = service_registry().unwrap();
        assert!(registry
            .contains("kinematics_6dof_ros_pkg/changeKinematicsConfig")
            .unwrap());
        assert!(registry.get("papouch_ros/Missing").unwrap().is_none());
    }
}
