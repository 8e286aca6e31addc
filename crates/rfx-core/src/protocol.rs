//! Registry of transmit-capable RF protocol families
//!
//! Each family carries a static descriptor: its subtype table (subtype name ->
//! firmware subtype code) and the generic verbs it can execute. Outbound
//! commands resolve through this registry instead of looking up handler
//! constructors by name at runtime.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generic verbs carried in `data.state` of outbound signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenericVerb {
    On,
    Off,
    Trigger,
}

impl GenericVerb {
    /// Parse a bus state value; anything outside the fixed table is `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "on" => Some(GenericVerb::On),
            "off" => Some(GenericVerb::Off),
            "trigger" => Some(GenericVerb::Trigger),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GenericVerb::On => "on",
            GenericVerb::Off => "off",
            GenericVerb::Trigger => "trigger",
        }
    }

    /// Fixed translation table to protocol handler methods
    pub fn method(self) -> HandlerMethod {
        match self {
            GenericVerb::On => HandlerMethod::SwitchOn,
            GenericVerb::Off => HandlerMethod::SwitchOff,
            GenericVerb::Trigger => HandlerMethod::Chime,
        }
    }
}

impl fmt::Display for GenericVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Methods exposed by protocol handler objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HandlerMethod {
    SwitchOn,
    SwitchOff,
    Chime,
}

impl HandlerMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HandlerMethod::SwitchOn => "switchOn",
            HandlerMethod::SwitchOff => "switchOff",
            HandlerMethod::Chime => "chime",
        }
    }
}

impl fmt::Display for HandlerMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static per-family metadata
#[derive(Debug, Clone, Copy)]
pub struct ProtocolDescriptor {
    pub family: ProtocolFamily,
    /// Subtype name -> firmware subtype code
    pub subtypes: &'static [(&'static str, u8)],
    /// Verbs this family can execute
    pub verbs: &'static [GenericVerb],
}

impl ProtocolDescriptor {
    /// Look up a subtype code by name (exact match, as configured)
    pub fn subtype_code(&self, name: &str) -> Option<u8> {
        self.subtypes
            .iter()
            .find(|(subtype, _)| *subtype == name)
            .map(|(_, code)| *code)
    }

    pub fn supports(&self, verb: GenericVerb) -> bool {
        self.verbs.contains(&verb)
    }
}

/// RF protocol families that can be constructed for outbound commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolFamily {
    Lighting1,
    Lighting2,
    Lighting3,
    Lighting5,
    Lighting6,
    Chime1,
}

const SWITCH_AND_CHIME: &[GenericVerb] =
    &[GenericVerb::On, GenericVerb::Off, GenericVerb::Trigger];
const SWITCH_ONLY: &[GenericVerb] = &[GenericVerb::On, GenericVerb::Off];
const CHIME_ONLY: &[GenericVerb] = &[GenericVerb::Trigger];

const LIGHTING1_SUBTYPES: &[(&str, u8)] = &[
    ("X10", 0x00),
    ("ARC", 0x01),
    ("ELRO", 0x02),
    ("WAVEMAN", 0x03),
    ("CHACON", 0x04),
    ("IMPULS", 0x05),
    ("RISING_SUN", 0x06),
    ("PHILIPS_SBC", 0x07),
    ("ENERGENIE", 0x08),
    ("ENERGENIE_5", 0x09),
    ("COCO", 0x0A),
    ("HQ", 0x0B),
];

const LIGHTING2_SUBTYPES: &[(&str, u8)] = &[
    ("AC", 0x00),
    ("HOMEEASY_EU", 0x01),
    ("ANSLUT", 0x02),
    ("KAMBROOK", 0x03),
];

const LIGHTING3_SUBTYPES: &[(&str, u8)] = &[("KOPPLA", 0x00)];

const LIGHTING5_SUBTYPES: &[(&str, u8)] = &[
    ("LIGHTWAVERF", 0x00),
    ("EMW100", 0x01),
    ("BBSB", 0x02),
    ("MDREMOTE", 0x03),
    ("CONRAD", 0x04),
    ("LIVOLO", 0x05),
    ("TRC02", 0x06),
    ("AOKE", 0x07),
    ("TRC02_2", 0x08),
    ("EURODOMEST", 0x09),
    ("LIVOLO_1TO10", 0x0A),
    ("RGB432W", 0x0B),
    ("MDREMOTE_107", 0x0C),
    ("LEGRAND", 0x0D),
    ("AVANTEK", 0x0E),
    ("IT", 0x0F),
    ("MDREMOTE_108", 0x10),
    ("KANGTAI", 0x11),
];

const LIGHTING6_SUBTYPES: &[(&str, u8)] = &[("BLYSS", 0x00), ("CUVEO", 0x01)];

const CHIME1_SUBTYPES: &[(&str, u8)] = &[
    ("BYRON_SX", 0x00),
    ("BYRON_MP001", 0x01),
    ("SELECT_PLUS", 0x02),
    ("SELECT_PLUS3", 0x03),
    ("ENVIVO", 0x04),
];

impl ProtocolFamily {
    pub const ALL: [ProtocolFamily; 6] = [
        ProtocolFamily::Lighting1,
        ProtocolFamily::Lighting2,
        ProtocolFamily::Lighting3,
        ProtocolFamily::Lighting5,
        ProtocolFamily::Lighting6,
        ProtocolFamily::Chime1,
    ];

    /// Parse a family name case-insensitively (`Lighting2`, `lighting2`)
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|family| family.name().eq_ignore_ascii_case(name))
    }

    /// Canonical family name as written in device identifiers
    pub fn name(self) -> &'static str {
        match self {
            ProtocolFamily::Lighting1 => "Lighting1",
            ProtocolFamily::Lighting2 => "Lighting2",
            ProtocolFamily::Lighting3 => "Lighting3",
            ProtocolFamily::Lighting5 => "Lighting5",
            ProtocolFamily::Lighting6 => "Lighting6",
            ProtocolFamily::Chime1 => "Chime1",
        }
    }

    pub fn descriptor(self) -> ProtocolDescriptor {
        let (subtypes, verbs) = match self {
            ProtocolFamily::Lighting1 => (LIGHTING1_SUBTYPES, SWITCH_AND_CHIME),
            ProtocolFamily::Lighting2 => (LIGHTING2_SUBTYPES, SWITCH_AND_CHIME),
            ProtocolFamily::Lighting3 => (LIGHTING3_SUBTYPES, SWITCH_ONLY),
            ProtocolFamily::Lighting5 => (LIGHTING5_SUBTYPES, SWITCH_ONLY),
            ProtocolFamily::Lighting6 => (LIGHTING6_SUBTYPES, SWITCH_ONLY),
            ProtocolFamily::Chime1 => (CHIME1_SUBTYPES, CHIME_ONLY),
        };
        ProtocolDescriptor {
            family: self,
            subtypes,
            verbs,
        }
    }
}

impl fmt::Display for ProtocolFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verb_table() {
        let method = |s: &str| GenericVerb::parse(s).map(GenericVerb::method);
        assert_eq!(method("on"), Some(HandlerMethod::SwitchOn));
        assert_eq!(method("off"), Some(HandlerMethod::SwitchOff));
        assert_eq!(method("trigger"), Some(HandlerMethod::Chime));
        assert_eq!(GenericVerb::parse("dim"), None);
        assert_eq!(GenericVerb::parse("ON"), None);
    }

    #[test]
    fn family_parse_is_case_insensitive() {
        assert_eq!(
            ProtocolFamily::parse("Lighting2"),
            Some(ProtocolFamily::Lighting2)
        );
        assert_eq!(
            ProtocolFamily::parse("lighting2"),
            Some(ProtocolFamily::Lighting2)
        );
        assert_eq!(ProtocolFamily::parse("Lighting4"), None);
        assert_eq!(ProtocolFamily::parse("temperaturehumidity1"), None);
    }

    #[test]
    fn subtype_lookup() {
        let lighting2 = ProtocolFamily::Lighting2.descriptor();
        assert_eq!(lighting2.subtype_code("AC"), Some(0x00));
        assert_eq!(lighting2.subtype_code("KAMBROOK"), Some(0x03));
        assert_eq!(lighting2.subtype_code("ac"), None);
    }

    #[test]
    fn chime_family_only_triggers() {
        let chime = ProtocolFamily::Chime1.descriptor();
        assert!(chime.supports(GenericVerb::Trigger));
        assert!(!chime.supports(GenericVerb::On));
    }
}
