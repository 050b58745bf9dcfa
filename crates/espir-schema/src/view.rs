//! # Entity Views
//!
//! Typed, borrowed views over the entities of a configuration document:
//! system, network, MQTT, and the containment tree
//! home → room → device → remote → button.
//!
//! A view is built from a JSON object by checked lookups only. Each field is
//! a [`Field`], so "key not found" and "value of the wrong kind" are explicit
//! outcomes the validator inspects. Views never own or modify the document
//! and live only for the duration of one validation pass.

use serde_json::{Map, Number, Value};

use espir_core::field;
use espir_core::Field;

type Object = Map<String, Value>;

/// Root of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfigView<'a> {
    pub schema_version: Field<&'a Value>,
    pub system: Field<&'a Object>,
    pub network: Field<&'a Object>,
    pub mqtt: Field<&'a Object>,
    pub homes: Field<&'a [Value]>,
}

impl<'a> ConfigView<'a> {
    pub fn read(root: &'a Object) -> Self {
        Self {
            schema_version: field::any(root, "schema_version"),
            system: field::object(root, "system"),
            network: field::object(root, "network"),
            mqtt: field::object(root, "mqtt"),
            homes: field::array(root, "homes"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemView<'a> {
    pub device_id: Field<&'a Value>,
    pub timezone: Field<&'a Value>,
    pub boot_fail_limit: Field<&'a Number>,
    pub safe_mode_enabled: Field<bool>,
}

impl<'a> SystemView<'a> {
    pub fn read(obj: &'a Object) -> Self {
        Self {
            device_id: field::any(obj, "device_id"),
            timezone: field::any(obj, "timezone"),
            boot_fail_limit: field::integer(obj, "boot_fail_limit"),
            safe_mode_enabled: field::boolean(obj, "safe_mode_enabled"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkView<'a> {
    pub wifi: Field<&'a Object>,
}

impl<'a> NetworkView<'a> {
    pub fn read(obj: &'a Object) -> Self {
        Self {
            wifi: field::object(obj, "wifi"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WifiView<'a> {
    pub ssid: Field<&'a Value>,
    pub password: Field<&'a Value>,
    pub reconnect_interval_sec: Field<&'a Number>,
}

impl<'a> WifiView<'a> {
    pub fn read(obj: &'a Object) -> Self {
        Self {
            ssid: field::any(obj, "ssid"),
            password: field::any(obj, "password"),
            reconnect_interval_sec: field::integer(obj, "reconnect_interval_sec"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MqttView<'a> {
    pub broker: Field<&'a Value>,
    pub port: Field<&'a Number>,
    pub base_topic: Field<&'a Value>,
    pub enabled: Field<bool>,
    pub ha_discovery: Field<bool>,
    pub retain: Field<bool>,
}

impl<'a> MqttView<'a> {
    pub fn read(obj: &'a Object) -> Self {
        Self {
            broker: field::any(obj, "broker"),
            port: field::integer(obj, "port"),
            base_topic: field::any(obj, "base_topic"),
            enabled: field::boolean(obj, "enabled"),
            ha_discovery: field::boolean(obj, "ha_discovery"),
            retain: field::boolean(obj, "retain"),
        }
    }
}

/// One level of the containment tree: an identifier, a display name, and
/// the sequence of children.
///
/// Homes, rooms, devices and remotes share this shape and differ only in
/// key names, which [`Level`] supplies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerView<'a> {
    pub level: Level,
    pub id: Field<&'a Value>,
    pub name: Field<&'a Value>,
    pub children: Field<&'a [Value]>,
}

impl<'a> ContainerView<'a> {
    pub fn read(level: Level, obj: &'a Object) -> Self {
        let keys = level.keys();
        Self {
            level,
            id: field::any(obj, keys[0]),
            name: field::any(obj, keys[1]),
            children: field::array(obj, keys[2]),
        }
    }
}

/// A level of the containment tree above buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Home,
    Room,
    Device,
    Remote,
}

impl Level {
    /// Required keys in order: id, name, children.
    pub fn keys(&self) -> [&'static str; 3] {
        match self {
            Self::Home => ["home_id", "name", "rooms"],
            Self::Room => ["room_id", "name", "devices"],
            Self::Device => ["device_id", "name", "remotes"],
            Self::Remote => ["remote_id", "name", "buttons"],
        }
    }

    /// The level of this container's children, or `None` when they are buttons.
    pub fn child(&self) -> Option<Level> {
        match self {
            Self::Home => Some(Self::Room),
            Self::Room => Some(Self::Device),
            Self::Device => Some(Self::Remote),
            Self::Remote => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonView<'a> {
    pub button_id: Field<&'a Value>,
    pub label: Field<&'a Value>,
    pub protocol: Field<&'a str>,
    pub address: Field<&'a Value>,
    pub command: Field<&'a Value>,
    pub repeat_behavior: Field<&'a Value>,
}

impl<'a> ButtonView<'a> {
    pub const KEYS: [&'static str; 6] = [
        "button_id",
        "label",
        "protocol",
        "address",
        "command",
        "repeat_behavior",
    ];

    pub fn read(obj: &'a Object) -> Self {
        Self {
            button_id: field::any(obj, "button_id"),
            label: field::any(obj, "label"),
            protocol: field::string(obj, "protocol"),
            address: field::any(obj, "address"),
            command: field::any(obj, "command"),
            repeat_behavior: field::any(obj, "repeat_behavior"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Object {
        match value {
            Value::Object(map) => map,
            other => panic!("fixture must be an object, got {other}"),
        }
    }

    #[test]
    fn config_view_distinguishes_shapes() {
        let root = obj(json!({ "schema_version": 1, "system": [], "homes": {} }));
        let view = ConfigView::read(&root);
        assert!(view.schema_version.is_present());
        assert!(matches!(view.system, Field::WrongType { .. }));
        assert_eq!(view.network, Field::Missing);
        assert!(matches!(view.homes, Field::WrongType { .. }));
    }

    #[test]
    fn mqtt_view_port_string_is_wrong_type() {
        let mqtt = obj(json!({ "broker": "b", "port": "1883", "base_topic": "t",
                               "enabled": true, "ha_discovery": false, "retain": 1 }));
        let view = MqttView::read(&mqtt);
        assert!(!view.port.is_present());
        assert_eq!(view.ha_discovery, Field::Present(false));
        assert!(!view.retain.is_present());
    }

    #[test]
    fn container_view_uses_level_keys() {
        let room = obj(json!({ "room_id": "r1", "name": "Room", "devices": [] }));
        let view = ContainerView::read(Level::Room, &room);
        assert!(view.id.is_present());
        assert_eq!(view.children.present().map(<[Value]>::len), Some(0));

        let as_home = ContainerView::read(Level::Home, &room);
        assert_eq!(as_home.id, Field::Missing);
        assert_eq!(as_home.children, Field::Missing);
    }

    #[test]
    fn level_chain_ends_at_remote() {
        assert_eq!(Level::Home.child(), Some(Level::Room));
        assert_eq!(Level::Room.child(), Some(Level::Device));
        assert_eq!(Level::Device.child(), Some(Level::Remote));
        assert_eq!(Level::Remote.child(), None);
    }

    #[test]
    fn button_view_protocol_must_be_string() {
        let button = obj(json!({ "button_id": "b", "label": "B", "protocol": 5,
                                 "address": "0x1", "command": 2, "repeat_behavior": "none" }));
        let view = ButtonView::read(&button);
        assert!(matches!(view.protocol, Field::WrongType { .. }));
        assert!(view.address.is_present());
    }
}
