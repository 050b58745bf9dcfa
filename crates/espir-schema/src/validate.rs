//! # Configuration Validation
//!
//! Nominal, recursive-descent validation of ESP IR hub configuration
//! documents.
//!
//! ## Contract
//!
//! [`validate`] maps any `serde_json::Value` to a verdict. It never panics
//! and never returns an error: a missing key, a value of the wrong kind, a
//! non-object where an object is required, or a non-object root all fold
//! into `false`. [`ConfigValidator::check_document`] performs the same walk
//! and reports the first violation with its JSON pointer.
//!
//! ## Rules
//!
//! - The root carries `schema_version`, `system`, `network`, `mqtt`, `homes`.
//! - `schema_version` is the integer `1`. `true`, `1.0` and `"1"` are not.
//! - `system.boot_fail_limit`, `network.wifi.reconnect_interval_sec` and
//!   `mqtt.port` are integers; `system.safe_mode_enabled` and the three MQTT
//!   flags are booleans. Kinds are nominal: booleans are not integers and
//!   `0`/`1` are not booleans.
//! - Identifier, name and credential keys are checked for presence only.
//! - `homes`, `rooms`, `devices`, `remotes` and `buttons` are arrays of
//!   objects. Empty arrays are valid at every level.
//! - Each button carries six keys and its `protocol` is exactly one of
//!   `NEC`, `RC5`, `Sony`, `RAW`.

use serde_json::{Map, Value};

use espir_core::field::{self, pointer_join};
use espir_core::{
    Field, IrProtocol, JsonKind, Violation, ViolationKind, REQUIRED_TOP_LEVEL_KEYS,
    SUPPORTED_SCHEMA_VERSION,
};

use crate::view::{
    ButtonView, ConfigView, ContainerView, Level, MqttView, NetworkView, SystemView, WifiView,
};

type Object = Map<String, Value>;

/// Validate a configuration document.
pub fn validate(document: &Value) -> bool {
    ConfigValidator.check_document(document).is_ok()
}

/// The nominal configuration validator.
///
/// Stateless; one instance can check any number of documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn new() -> Self {
        Self
    }

    /// Walk the document top-down and stop at the first violation.
    pub fn check_document(&self, document: &Value) -> Result<(), Violation> {
        let root = as_object(document, "")?;

        for key in REQUIRED_TOP_LEVEL_KEYS {
            field::any(root, key).require(pointer_join("", key))?;
        }

        let config = ConfigView::read(root);
        check_schema_version(config.schema_version)?;

        let system = config.system.require("/system")?;
        check_system(&SystemView::read(system))?;

        let network = config.network.require("/network")?;
        let wifi = NetworkView::read(network).wifi.require("/network/wifi")?;
        check_wifi(&WifiView::read(wifi))?;

        let mqtt = config.mqtt.require("/mqtt")?;
        check_mqtt(&MqttView::read(mqtt))?;

        let homes = config.homes.require("/homes")?;
        check_children(Some(Level::Home), homes, "/homes")
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Object, Violation> {
    value.as_object().ok_or_else(|| {
        Violation::new(
            path,
            ViolationKind::WrongType {
                expected: JsonKind::Object,
                found: JsonKind::of(value),
            },
        )
    })
}

fn check_schema_version(version: Field<&Value>) -> Result<(), Violation> {
    let version = version.require("/schema_version")?;
    match version {
        Value::Number(n) if n.as_u64() == Some(SUPPORTED_SCHEMA_VERSION) => Ok(()),
        other => Err(Violation::new(
            "/schema_version",
            ViolationKind::UnsupportedSchemaVersion {
                found: other.to_string(),
                supported: SUPPORTED_SCHEMA_VERSION,
            },
        )),
    }
}

fn check_system(system: &SystemView<'_>) -> Result<(), Violation> {
    system.device_id.require("/system/device_id")?;
    system.timezone.require("/system/timezone")?;
    system.boot_fail_limit.require("/system/boot_fail_limit")?;
    system.safe_mode_enabled.require("/system/safe_mode_enabled")?;
    Ok(())
}

fn check_wifi(wifi: &WifiView<'_>) -> Result<(), Violation> {
    wifi.ssid.require("/network/wifi/ssid")?;
    wifi.password.require("/network/wifi/password")?;
    wifi.reconnect_interval_sec
        .require("/network/wifi/reconnect_interval_sec")?;
    Ok(())
}

fn check_mqtt(mqtt: &MqttView<'_>) -> Result<(), Violation> {
    mqtt.broker.require("/mqtt/broker")?;
    mqtt.port.require("/mqtt/port")?;
    mqtt.base_topic.require("/mqtt/base_topic")?;
    mqtt.enabled.require("/mqtt/enabled")?;
    mqtt.ha_discovery.require("/mqtt/ha_discovery")?;
    mqtt.retain.require("/mqtt/retain")?;
    Ok(())
}

/// Check every element of a containment array. `level` is the level of the
/// elements; `None` means they are buttons.
fn check_children(level: Option<Level>, items: &[Value], path: &str) -> Result<(), Violation> {
    for (index, item) in items.iter().enumerate() {
        let item_path = format!("{path}/{index}");
        let obj = as_object(item, &item_path)?;
        match level {
            Some(level) => check_container(level, obj, &item_path)?,
            None => check_button(obj, &item_path)?,
        }
    }
    Ok(())
}

fn check_container(level: Level, obj: &Object, path: &str) -> Result<(), Violation> {
    let view = ContainerView::read(level, obj);
    let [id_key, name_key, children_key] = level.keys();

    view.id.require(pointer_join(path, id_key))?;
    view.name.require(pointer_join(path, name_key))?;

    let children_path = pointer_join(path, children_key);
    let children = view.children.require(children_path.as_str())?;
    check_children(level.child(), children, &children_path)
}

fn check_button(obj: &Object, path: &str) -> Result<(), Violation> {
    let button = ButtonView::read(obj);

    button.button_id.require(pointer_join(path, "button_id"))?;
    button.label.require(pointer_join(path, "label"))?;
    button.address.require(pointer_join(path, "address"))?;
    button.command.require(pointer_join(path, "command"))?;
    button
        .repeat_behavior
        .require(pointer_join(path, "repeat_behavior"))?;

    let protocol_path = pointer_join(path, "protocol");
    let protocol = button.protocol.require(protocol_path.as_str())?;
    protocol.parse::<IrProtocol>().map_err(|e| {
        Violation::new(
            protocol_path,
            ViolationKind::UnknownProtocol {
                found: format!("{:?}", e.0),
            },
        )
    })?;
    Ok(())
}
