//! Robot description records and their URDF/SRDF serialization.
//!
//! Links and joints are collected into a [`Robot`] tree first and
//! serialized once, so a half-built robot never leaks into an output
//! document.

mod srdf;
mod urdf;

pub use srdf::write_srdf;
pub use urdf::write_urdf;

use std::collections::HashSet;

use crate::error::DescriptionError;
use crate::math::Vector3;

/// Position and orientation, URDF style: translation plus
/// roll/pitch/yaw in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pose {
    pub xyz: Vector3,
    pub rpy: Vector3,
}

impl Pose {
    #[must_use]
    pub fn new(xyz: Vector3, rpy: Vector3) -> Self {
        Self { xyz, rpy }
    }
}

/// Symmetric inertia tensor, six unique components.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Inertia {
    pub ixx: f64,
    pub ixy: f64,
    pub ixz: f64,
    pub iyy: f64,
    pub iyz: f64,
    pub izz: f64,
}

/// One rigid body of the kinematic chain.
///
/// A link without a mesh (e.g. the `world` anchor) serializes as an
/// empty element with no visual, collision or inertial blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub name: String,
    /// Mesh file used for both the visual and collision geometry.
    pub mesh: Option<String>,
    pub mass: f64,
    pub inertia: Inertia,
    /// Where the outgoing joint attaches, in this link's frame.
    pub joint_attach: Pose,
}

impl Link {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mesh: None,
            mass: 1.0,
            inertia: Inertia::default(),
            joint_attach: Pose::default(),
        }
    }

    #[must_use]
    pub fn with_mesh(mut self, mesh: impl Into<String>) -> Self {
        self.mesh = Some(mesh.into());
        self
    }

    #[must_use]
    pub fn with_mass(mut self, mass: f64, inertia: Inertia) -> Self {
        self.mass = mass;
        self.inertia = inertia;
        self
    }

    #[must_use]
    pub fn with_joint_attach(mut self, pose: Pose) -> Self {
        self.joint_attach = pose;
        self
    }

    /// True for the massless world anchor, which has no body at all.
    #[must_use]
    pub fn is_anchor(&self) -> bool {
        self.name == "world"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointType {
    Revolute,
    Continuous,
    Prismatic,
    Fixed,
    Floating,
    Planar,
}

impl JointType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Revolute => "revolute",
            Self::Continuous => "continuous",
            Self::Prismatic => "prismatic",
            Self::Fixed => "fixed",
            Self::Floating => "floating",
            Self::Planar => "planar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointLimits {
    pub lower: f64,
    pub upper: f64,
    pub velocity: f64,
    pub effort: f64,
}

impl Default for JointLimits {
    fn default() -> Self {
        Self {
            lower: -std::f64::consts::PI,
            upper: std::f64::consts::PI,
            velocity: 1.0,
            effort: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JointDynamics {
    pub damping: f64,
    pub friction: f64,
}

/// A connection between a parent and a child link.
#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    pub name: String,
    pub joint_type: JointType,
    pub parent: String,
    pub child: String,
    /// Joint frame in the parent's frame. Defaults to the parent
    /// link's attach pose when built via [`Robot::connect`].
    pub origin: Pose,
    pub axis: Vector3,
    pub limits: JointLimits,
    pub dynamics: JointDynamics,
}

impl Joint {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        joint_type: JointType,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            joint_type,
            parent: parent.into(),
            child: child.into(),
            origin: Pose::default(),
            axis: Vector3::new(0.0, 0.0, 1.0),
            limits: JointLimits::default(),
            dynamics: JointDynamics::default(),
        }
    }

    #[must_use]
    pub fn with_origin(mut self, origin: Pose) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn with_axis(mut self, axis: Vector3) -> Self {
        self.axis = axis;
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: JointLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn with_dynamics(mut self, dynamics: JointDynamics) -> Self {
        self.dynamics = dynamics;
        self
    }
}

/// The whole kinematic description, validated as it is built.
#[derive(Debug, Clone, Default)]
pub struct Robot {
    pub name: String,
    links: Vec<Link>,
    joints: Vec<Joint>,
}

impl Robot {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            links: Vec::new(),
            joints: Vec::new(),
        }
    }

    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Adds a link, rejecting duplicate names.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::DuplicateLink`] when the name is
    /// already taken.
    pub fn add_link(&mut self, link: Link) -> Result<(), DescriptionError> {
        if self.links.iter().any(|l| l.name == link.name) {
            return Err(DescriptionError::DuplicateLink(link.name));
        }
        self.links.push(link);
        Ok(())
    }

    /// Adds a joint, rejecting duplicate names and references to links
    /// that have not been added yet.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::DuplicateJoint`] or
    /// [`DescriptionError::UnknownLink`].
    pub fn add_joint(&mut self, joint: Joint) -> Result<(), DescriptionError> {
        if self.joints.iter().any(|j| j.name == joint.name) {
            return Err(DescriptionError::DuplicateJoint(joint.name));
        }
        for link in [&joint.parent, &joint.child] {
            if !self.links.iter().any(|l| &l.name == link) {
                return Err(DescriptionError::UnknownLink {
                    joint: joint.name.clone(),
                    link: link.clone(),
                });
            }
        }
        self.joints.push(joint);
        Ok(())
    }

    /// Adds `child` and joins it to an existing parent in one step,
    /// defaulting the joint origin to the parent's attach pose.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::add_link`] and
    /// [`Self::add_joint`].
    pub fn connect(
        &mut self,
        parent: &str,
        child: Link,
        joint: Joint,
    ) -> Result<(), DescriptionError> {
        let mut joint = joint;
        if joint.origin == Pose::default() {
            if let Some(p) = self.links.iter().find(|l| l.name == parent) {
                joint.origin = p.joint_attach;
            }
        }
        self.add_link(child)?;
        self.add_joint(joint)
    }

    /// Pairs of links joined by a joint, for collision suppression.
    #[must_use]
    pub fn adjacent_pairs(&self) -> Vec<(&str, &str)> {
        let mut seen = HashSet::new();
        let mut pairs = Vec::new();
        for joint in &self.joints {
            let pair = (joint.parent.as_str(), joint.child.as_str());
            if seen.insert(pair) {
                pairs.push(pair);
            }
        }
        pairs
    }
}
