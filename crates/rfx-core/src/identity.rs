//! Composite device identifiers used on the home-automation bus.
//!
//! A device is addressed on the bus as
//! `<protocolFamily>/<protocolSubType>-<hardwareAddress>[/<unitCode>]`,
//! e.g. `Lighting2/AC-0x01/1`. Sensor identifiers may omit the subtype
//! (`temperaturehumidity1-0x7A02`), in which case the subtype is empty.
//!
//! Encoding is deterministic and decoding is its exact inverse for every
//! well-formed identifier (the hardware address never contains `-`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, GatewayResult};

/// Immutable identity of one device on the RF network
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceIdentifier {
    protocol_family: String,
    protocol_sub_type: String,
    hardware_address: String,
    unit_code: Option<String>,
}

impl DeviceIdentifier {
    pub fn new(
        protocol_family: impl Into<String>,
        protocol_sub_type: impl Into<String>,
        hardware_address: impl Into<String>,
        unit_code: Option<String>,
    ) -> Self {
        Self {
            protocol_family: protocol_family.into(),
            protocol_sub_type: protocol_sub_type.into(),
            hardware_address: hardware_address.into(),
            unit_code,
        }
    }

    /// Decode a bus identifier.
    ///
    /// Splits on the last `-` into protocol descriptor and address portion,
    /// the descriptor on `/` into family and subtype, and the address portion
    /// on `/` into hardware address and unit code. No best-effort decode is
    /// attempted.
    ///
    /// ```
    /// # use rfx_core::DeviceIdentifier;
    /// let id = DeviceIdentifier::decode("Lighting2/AC-0x02/3").unwrap();
    /// assert_eq!(id.protocol_family(), "Lighting2");
    /// assert_eq!(id.protocol_sub_type(), "AC");
    /// assert_eq!(id.hardware_address(), "0x02");
    /// assert_eq!(id.unit_code(), Some("3"));
    /// assert!(DeviceIdentifier::decode("Lighting2").is_err());
    /// ```
    pub fn decode(s: &str) -> GatewayResult<Self> {
        let malformed = || GatewayError::MalformedIdentifier(s.to_string());

        let (descriptor, address_part) = s.rsplit_once('-').ok_or_else(malformed)?;
        if descriptor.is_empty() || address_part.is_empty() {
            return Err(malformed());
        }

        let (family, sub_type) = match descriptor.split_once('/') {
            Some((family, sub_type)) if !family.is_empty() && !sub_type.is_empty() => {
                (family, sub_type)
            }
            Some(_) => return Err(malformed()),
            None => (descriptor, ""),
        };

        let (address, unit_code) = match address_part.split_once('/') {
            Some((address, unit)) if !address.is_empty() && !unit.is_empty() => {
                (address, Some(unit.to_string()))
            }
            Some(_) => return Err(malformed()),
            None => (address_part, None),
        };

        Ok(Self::new(family, sub_type, address, unit_code))
    }

    /// Encode to the bus wire format
    pub fn encode(&self) -> String {
        self.to_string()
    }

    pub fn protocol_family(&self) -> &str {
        &self.protocol_family
    }

    /// Subtype name; empty for sensor identifiers that omit it
    pub fn protocol_sub_type(&self) -> &str {
        &self.protocol_sub_type
    }

    pub fn hardware_address(&self) -> &str {
        &self.hardware_address
    }

    pub fn unit_code(&self) -> Option<&str> {
        self.unit_code.as_deref()
    }

    /// Address as the transceiver reports it: `id` or `id/unitCode`
    pub fn address_with_unit(&self) -> String {
        match &self.unit_code {
            Some(unit) => format!("{}/{}", self.hardware_address, unit),
            None => self.hardware_address.clone(),
        }
    }

    /// Protocol descriptor portion: `family` or `family/subtype`
    pub fn descriptor(&self) -> String {
        if self.protocol_sub_type.is_empty() {
            self.protocol_family.clone()
        } else {
            format!("{}/{}", self.protocol_family, self.protocol_sub_type)
        }
    }
}

impl fmt::Display for DeviceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.descriptor(), self.address_with_unit())
    }
}

impl FromStr for DeviceIdentifier {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl TryFrom<String> for DeviceIdentifier {
    type Error = GatewayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::decode(&value)
    }
}

impl From<DeviceIdentifier> for String {
    fn from(id: DeviceIdentifier) -> Self {
        id.encode()
    }
}
