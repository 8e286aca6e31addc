//! Firmware receive-protocol flags
//!
//! The transceiver's set-mode command carries the enabled receive protocols
//! as bits spread over message bytes 3..=6. Each protocol name maps to one
//! `(msg, bit)` pair.

use serde::Serialize;

/// A single enable bit in the set-mode command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ProtocolFlag {
    pub name: &'static str,
    /// Message byte index (3..=6)
    pub msg: u8,
    /// Bit mask within the byte
    pub bit: u8,
}

const fn flag(name: &'static str, msg: u8, bit: u8) -> ProtocolFlag {
    ProtocolFlag { name, msg, bit }
}

/// Protocol name -> flag table
pub const PROTOCOL_FLAGS: &[ProtocolFlag] = &[
    // msg3
    flag("UNDECODED", 3, 0x80),
    flag("IMAGINTRONIX", 3, 0x40),
    flag("BYRONSX", 3, 0x20),
    flag("RSL", 3, 0x10),
    flag("LIGHTING4", 3, 0x08),
    flag("FINEOFFSET", 3, 0x04),
    flag("RUBICSON", 3, 0x02),
    flag("AE", 3, 0x01),
    // msg4
    flag("BLINDST1", 4, 0x80),
    flag("BLINDST0", 4, 0x40),
    flag("PROGUARD", 4, 0x20),
    flag("FS20", 4, 0x10),
    flag("LACROSSE", 4, 0x08),
    flag("HIDEKI", 4, 0x04),
    flag("AD", 4, 0x02),
    flag("MERTIK", 4, 0x01),
    // msg5
    flag("VISONIC", 5, 0x80),
    flag("ATI", 5, 0x40),
    flag("OREGON", 5, 0x20),
    flag("MEIANTECH", 5, 0x10),
    flag("HOMEEASY", 5, 0x08),
    flag("AC", 5, 0x04),
    flag("ARC", 5, 0x02),
    flag("X10", 5, 0x01),
    // msg6
    flag("KEELOQ", 6, 0x01),
    flag("HOMECONFORT", 6, 0x02),
];

impl ProtocolFlag {
    /// Look up the flag for a firmware protocol name (exact match)
    pub fn for_name(name: &str) -> Option<ProtocolFlag> {
        PROTOCOL_FLAGS.iter().find(|flag| flag.name == name).copied()
    }

    /// Fold flags into the msg3..=msg6 bytes of the set-mode command
    pub fn to_mode_bytes(flags: &[ProtocolFlag]) -> [u8; 4] {
        let mut bytes = [0u8; 4];
        for flag in flags {
            if (3..=6).contains(&flag.msg) {
                bytes[(flag.msg - 3) as usize] |= flag.bit;
            }
        }
        bytes
    }
}
