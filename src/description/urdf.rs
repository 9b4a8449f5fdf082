//! URDF serialization of a [`Robot`].

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::error::DescriptionError;
use crate::math::Vector3;

use super::{Joint, Link, Robot};

fn xml_err(e: impl std::fmt::Display) -> DescriptionError {
    DescriptionError::Serialize(e.to_string())
}

fn triple(v: &Vector3) -> String {
    format!("{} {} {}", v.x, v.y, v.z)
}

/// Writes the robot as a URDF document.
///
/// # Errors
///
/// Returns [`DescriptionError::Serialize`] when the underlying writer
/// fails.
pub fn write_urdf<W: Write>(robot: &Robot, writer: W) -> Result<(), DescriptionError> {
    let mut xml = Writer::new_with_indent(writer, b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))
        .map_err(xml_err)?;

    let mut root = BytesStart::new("robot");
    root.push_attribute(("name", robot.name.as_str()));
    xml.write_event(Event::Start(root)).map_err(xml_err)?;

    for link in robot.links() {
        write_link(&mut xml, link)?;
    }
    for joint in robot.joints() {
        write_joint(&mut xml, joint)?;
    }

    xml.write_event(Event::End(BytesEnd::new("robot")))
        .map_err(xml_err)?;
    Ok(())
}

fn write_link<W: Write>(xml: &mut Writer<W>, link: &Link) -> Result<(), DescriptionError> {
    let mut elem = BytesStart::new("link");
    elem.push_attribute(("name", link.name.as_str()));

    // The world anchor is a bare frame, nothing to describe.
    if link.is_anchor() {
        xml.write_event(Event::Empty(elem)).map_err(xml_err)?;
        return Ok(());
    }

    xml.write_event(Event::Start(elem)).map_err(xml_err)?;

    if let Some(mesh) = &link.mesh {
        for body in ["visual", "collision"] {
            xml.write_event(Event::Start(BytesStart::new(body)))
                .map_err(xml_err)?;
            xml.write_event(Event::Start(BytesStart::new("geometry")))
                .map_err(xml_err)?;
            let mut mesh_elem = BytesStart::new("mesh");
            mesh_elem.push_attribute(("filename", mesh.as_str()));
            xml.write_event(Event::Empty(mesh_elem)).map_err(xml_err)?;
            xml.write_event(Event::End(BytesEnd::new("geometry")))
                .map_err(xml_err)?;
            xml.write_event(Event::End(BytesEnd::new(body)))
                .map_err(xml_err)?;
        }
    }

    xml.write_event(Event::Start(BytesStart::new("inertial")))
        .map_err(xml_err)?;
    let mut mass = BytesStart::new("mass");
    mass.push_attribute(("value", link.mass.to_string().as_str()));
    xml.write_event(Event::Empty(mass)).map_err(xml_err)?;
    let mut inertia = BytesStart::new("inertia");
    inertia.push_attribute(("ixx", link.inertia.ixx.to_string().as_str()));
    inertia.push_attribute(("ixy", link.inertia.ixy.to_string().as_str()));
    inertia.push_attribute(("ixz", link.inertia.ixz.to_string().as_str()));
    inertia.push_attribute(("iyy", link.inertia.iyy.to_string().as_str()));
    inertia.push_attribute(("iyz", link.inertia.iyz.to_string().as_str()));
    inertia.push_attribute(("izz", link.inertia.izz.to_string().as_str()));
    xml.write_event(Event::Empty(inertia)).map_err(xml_err)?;
    xml.write_event(Event::End(BytesEnd::new("inertial")))
        .map_err(xml_err)?;

    xml.write_event(Event::End(BytesEnd::new("link")))
        .map_err(xml_err)?;
    Ok(())
}

fn write_joint<W: Write>(xml: &mut Writer<W>, joint: &Joint) -> Result<(), DescriptionError> {
    let mut elem = BytesStart::new("joint");
    elem.push_attribute(("name", joint.name.as_str()));
    elem.push_attribute(("type", joint.joint_type.as_str()));
    xml.write_event(Event::Start(elem)).map_err(xml_err)?;

    let mut parent = BytesStart::new("parent");
    parent.push_attribute(("link", joint.parent.as_str()));
    xml.write_event(Event::Empty(parent)).map_err(xml_err)?;

    let mut child = BytesStart::new("child");
    child.push_attribute(("link", joint.child.as_str()));
    xml.write_event(Event::Empty(child)).map_err(xml_err)?;

    let mut origin = BytesStart::new("origin");
    origin.push_attribute(("xyz", triple(&joint.origin.xyz).as_str()));
    origin.push_attribute(("rpy", triple(&joint.origin.rpy).as_str()));
    xml.write_event(Event::Empty(origin)).map_err(xml_err)?;

    let mut axis = BytesStart::new("axis");
    axis.push_attribute(("xyz", triple(&joint.axis).as_str()));
    xml.write_event(Event::Empty(axis)).map_err(xml_err)?;

    let mut limit = BytesStart::new("limit");
    limit.push_attribute(("effort", joint.limits.effort.to_string().as_str()));
    limit.push_attribute(("lower", joint.limits.lower.to_string().as_str()));
    limit.push_attribute(("upper", joint.limits.upper.to_string().as_str()));
    limit.push_attribute(("velocity", joint.limits.velocity.to_string().as_str()));
    xml.write_event(Event::Empty(limit)).map_err(xml_err)?;

    let mut dynamics = BytesStart::new("dynamics");
    dynamics.push_attribute(("damping", joint.dynamics.damping.to_string().as_str()));
    dynamics.push_attribute(("friction", joint.dynamics.friction.to_string().as_str()));
    xml.write_event(Event::Empty(dynamics)).map_err(xml_err)?;

    xml.write_event(Event::End(BytesEnd::new("joint")))
        .map_err(xml_err)?;
    Ok(())
}
