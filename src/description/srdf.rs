//! SRDF serialization: planning group, end effector, virtual joint and
//! adjacent-link collision suppression for a [`Robot`].

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::error::DescriptionError;

use super::Robot;

fn xml_err(e: impl std::fmt::Display) -> DescriptionError {
    DescriptionError::Serialize(e.to_string())
}

/// Writes the semantic description to go with the URDF.
///
/// The group lists every joint in insertion order; the end effector
/// hangs off `tip_link`; a fixed virtual joint anchors `root_link` to
/// the world frame; collisions between joint-adjacent links are
/// disabled.
///
/// # Errors
///
/// Returns [`DescriptionError::Serialize`] when the underlying writer
/// fails.
pub fn write_srdf<W: Write>(
    robot: &Robot,
    writer: W,
    group: &str,
    root_link: &str,
    tip_link: &str,
) -> Result<(), DescriptionError> {
    let mut xml = Writer::new_with_indent(writer, b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))
        .map_err(xml_err)?;

    let mut root = BytesStart::new("robot");
    root.push_attribute(("name", robot.name.as_str()));
    xml.write_event(Event::Start(root)).map_err(xml_err)?;

    let mut group_elem = BytesStart::new("group");
    group_elem.push_attribute(("name", group));
    xml.write_event(Event::Start(group_elem)).map_err(xml_err)?;
    for joint in robot.joints() {
        let mut elem = BytesStart::new("joint");
        elem.push_attribute(("name", joint.name.as_str()));
        xml.write_event(Event::Empty(elem)).map_err(xml_err)?;
    }
    xml.write_event(Event::End(BytesEnd::new("group")))
        .map_err(xml_err)?;

    let mut eef = BytesStart::new("end_effector");
    eef.push_attribute(("name", "eef"));
    eef.push_attribute(("parent_link", tip_link));
    eef.push_attribute(("group", group));
    xml.write_event(Event::Empty(eef)).map_err(xml_err)?;

    let mut virtual_joint = BytesStart::new("virtual_joint");
    virtual_joint.push_attribute(("name", "virtual_joint"));
    virtual_joint.push_attribute(("type", "fixed"));
    virtual_joint.push_attribute(("parent_frame", "world"));
    virtual_joint.push_attribute(("child_link", root_link));
    xml.write_event(Event::Empty(virtual_joint))
        .map_err(xml_err)?;

    for (link1, link2) in robot.adjacent_pairs() {
        let mut elem = BytesStart::new("disable_collisions");
        elem.push_attribute(("link1", link1));
        elem.push_attribute(("link2", link2));
        elem.push_attribute(("reason", "Adjacent"));
        xml.write_event(Event::Empty(elem)).map_err(xml_err)?;
    }

    xml.write_event(Event::End(BytesEnd::new("robot")))
        .map_err(xml_err)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::{Joint, JointType, Link, Robot};
    use super::write_srdf;

    fn chain() -> Robot {
        let mut robot = Robot::new("test_robot");
        robot.add_link(Link::new("world")).unwrap();
        robot.add_link(Link::new("base_link")).unwrap();
        robot.add_link(Link::new("link_01")).unwrap();
        robot
            .add_joint(Joint::new(
                "world_joint",
                JointType::Fixed,
                "world",
                "base_link",
            ))
            .unwrap();
        robot
            .add_joint(Joint::new(
                "joint_01",
                JointType::Revolute,
                "base_link",
                "link_01",
            ))
            .unwrap();
        robot
    }

    #[test]
    fn group_lists_joints_in_order() {
        let mut buf = Vec::new();
        write_srdf(&chain(), &mut buf, "arm", "base_link", "link_01").unwrap();
        let doc = String::from_utf8(buf).unwrap();
        let world = doc.find(r#"<joint name="world_joint"/>"#).unwrap();
        let first = doc.find(r#"<joint name="joint_01"/>"#).unwrap();
        assert!(world < first);
        assert!(doc.contains(r#"<group name="arm">"#));
    }

    #[test]
    fn end_effector_and_virtual_joint_present() {
        let mut buf = Vec::new();
        write_srdf(&chain(), &mut buf, "arm", "base_link", "link_01").unwrap();
        let doc = String::from_utf8(buf).unwrap();
        assert!(doc.contains(
            r#"<end_effector name="eef" parent_link="link_01" group="arm"/>"#
        ));
        assert!(doc.contains(
            r#"<virtual_joint name="virtual_joint" type="fixed" parent_frame="world" child_link="base_link"/>"#
        ));
    }

    #[test]
    fn adjacent_links_have_collisions_disabled() {
        let mut buf = Vec::new();
        write_srdf(&chain(), &mut buf, "arm", "base_link", "link_01").unwrap();
        let doc = String::from_utf8(buf).unwrap();
        assert!(doc.contains(
            r#"<disable_collisions link1="world" link2="base_link" reason="Adjacent"/>"#
        ));
        assert!(doc.contains(
            r#"<disable_collisions link1="base_link" link2="link_01" reason="Adjacent"/>"#
        ));
    }
}
