//! Art-Net Port-Address
//!
//! A 15-bit universe number: 7-bit Net, 4-bit Sub-Net, 4-bit Universe.

use std::fmt;

/// 15-bit Art-Net Port-Address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortAddress(u16);

impl PortAddress {
    /// Highest valid Port-Address
    pub const MAX: u16 = 0x7FFF;

    /// Create from a raw value, masking off bit 15
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw & Self::MAX)
    }

    /// Compose from Net (0-127), Sub-Net (0-15) and Universe (0-15)
    #[must_use]
    pub const fn from_parts(net: u8, sub_net: u8, universe: u8) -> Self {
        let net = (net as u16 & 0x7F) << 8;
        let sub_net = (sub_net as u16 & 0x0F) << 4;
        Self(net | sub_net | (universe as u16 & 0x0F))
    }

    /// Parse the SubUni / Net byte pair as it appears on the wire
    #[must_use]
    pub const fn from_wire(sub_uni: u8, net: u8) -> Self {
        Self::new(u16::from_le_bytes([sub_uni, net]))
    }

    /// SubUni / Net byte pair as it appears on the wire
    #[must_use]
    pub const fn to_wire(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    /// Net (bits 14-8)
    #[must_use]
    pub const fn net(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Sub-Net (bits 7-4)
    #[must_use]
    pub const fn sub_net(self) -> u8 {
        ((self.0 >> 4) & 0x0F) as u8
    }

    /// Universe within the Sub-Net (bits 3-0)
    #[must_use]
    pub const fn universe(self) -> u8 {
        (self.0 & 0x0F) as u8
    }

    /// Flat 15-bit value
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl From<u16> for PortAddress {
    fn from(raw: u16) -> Self {
        Self::new(raw)
    }
}

impl From<PortAddress> for u16 {
    fn from(addr: PortAddress) -> Self {
        addr.0
    }
}

impl fmt::Display for PortAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.net(), self.sub_net(), self.universe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts() {
        let addr = PortAddress::from_parts(1, 2, 3);
        assert_eq!(addr.as_u16(), 0x0123);
        assert_eq!(addr.net(), 1);
        assert_eq!(addr.sub_net(), 2);
        assert_eq!(addr.universe(), 3);
        assert_eq!(addr.to_string(), "1:2:3");
    }

    #[test]
    fn test_wire_order_is_low_byte_first() {
        let addr = PortAddress::from_wire(0x23, 0x01);
        assert_eq!(addr.as_u16(), 0x0123);
        assert_eq!(addr.to_wire(), [0x23, 0x01]);
    }

    #[test]
    fn test_top_bit_masked() {
        assert_eq!(PortAddress::new(0xFFFF).as_u16(), PortAddress::MAX);
        assert_eq!(PortAddress::from_wire(0xFF, 0xFF).net(), 0x7F);
    }
}
